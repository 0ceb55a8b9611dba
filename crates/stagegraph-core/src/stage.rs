//! Pipeline stages: the source, transforms, and destination of a pipeline.
//!
//! Sources and destinations share one shape ([`ConnectorStage`]) and are told
//! apart by a zero-sized role marker, so a destination can never be passed
//! where a source is expected. Transforms carry an optional [`Predicate`]
//! shown as a filter badge.

use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Marker trait for the two connector roles.
pub trait Role: fmt::Debug + Clone + Copy + PartialEq + Eq + Default {
    /// Lowercase role name, used in logs and validation output.
    const NAME: &'static str;
}

/// Role marker for the stage that produces change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Source;

/// Role marker for the stage that receives change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Destination;

impl Role for Source {
    const NAME: &'static str = "source";
}

impl Role for Destination {
    const NAME: &'static str = "destination";
}

/// A source or destination stage backed by a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStage<R: Role> {
    id: Id,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(rename = "connector")]
    connector_kind: String,
    #[serde(skip)]
    role: PhantomData<R>,
}

/// A stage in the source role.
pub type SourceStage = ConnectorStage<Source>;

/// A stage in the destination role.
pub type DestinationStage = ConnectorStage<Destination>;

impl<R: Role> ConnectorStage<R> {
    /// Creates a connector stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagegraph_core::{identifier::Id, stage::SourceStage};
    ///
    /// let source = SourceStage::new(Id::new("orders-db"), "Orders", "postgres");
    /// assert_eq!(source.connector_kind(), "postgres");
    /// ```
    pub fn new(id: Id, display_name: impl Into<String>, connector_kind: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            connector_kind: connector_kind.into(),
            role: PhantomData,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Connector type, e.g. `postgres` or `kafka`.
    pub fn connector_kind(&self) -> &str {
        &self.connector_kind
    }

    /// Lowercase name of this stage's role.
    pub fn role_name(&self) -> &'static str {
        R::NAME
    }
}

/// Condition gating when a transform applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    kind: String,
    #[serde(default)]
    negate: bool,
}

impl Predicate {
    pub fn new(kind: impl Into<String>, negate: bool) -> Self {
        Self {
            kind: kind.into(),
            negate,
        }
    }

    /// Fully qualified predicate kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    /// Short badge label: the last segment of a dotted kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagegraph_core::stage::Predicate;
    ///
    /// let predicate = Predicate::new(
    ///     "org.apache.kafka.connect.transforms.predicates.TopicNameMatches",
    ///     false,
    /// );
    /// assert_eq!(predicate.label(), "TopicNameMatches");
    /// ```
    pub fn label(&self) -> &str {
        self.kind.rsplit('.').next().unwrap_or(&self.kind)
    }
}

/// A transform applied to every event between source and destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStage {
    id: Id,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    predicate: Option<Predicate>,
}

impl TransformStage {
    pub fn new(id: Id, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            predicate: None,
        }
    }

    /// Attaches a predicate (builder style).
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }
}

/// Any stage of a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Stage {
    Source(SourceStage),
    Transform(TransformStage),
    Destination(DestinationStage),
}

impl Stage {
    pub fn id(&self) -> Id {
        match self {
            Stage::Source(stage) => stage.id(),
            Stage::Transform(stage) => stage.id(),
            Stage::Destination(stage) => stage.id(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Source(stage) => stage.display_name(),
            Stage::Transform(stage) => stage.display_name(),
            Stage::Destination(stage) => stage.display_name(),
        }
    }
}

impl From<SourceStage> for Stage {
    fn from(stage: SourceStage) -> Self {
        Stage::Source(stage)
    }
}

impl From<TransformStage> for Stage {
    fn from(stage: TransformStage) -> Self {
        Stage::Transform(stage)
    }
}

impl From<DestinationStage> for Stage {
    fn from(stage: DestinationStage) -> Self {
        Stage::Destination(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_label_without_dots() {
        let predicate = Predicate::new("HasHeaderKey", true);
        assert_eq!(predicate.label(), "HasHeaderKey");
        assert!(predicate.negate());
    }

    #[test]
    fn test_role_names() {
        let source = SourceStage::new(Id::new("s"), "S", "mysql");
        let destination = DestinationStage::new(Id::new("d"), "D", "kafka");
        assert_eq!(source.role_name(), "source");
        assert_eq!(destination.role_name(), "destination");
    }

    #[test]
    fn test_stage_accessors() {
        let stage: Stage = TransformStage::new(Id::new("t1"), "Reroute").into();
        assert_eq!(stage.id(), Id::new("t1"));
        assert_eq!(stage.display_name(), "Reroute");
    }

    #[test]
    fn test_connector_stage_deserialize() {
        let json = r#"{"id":"orders","name":"Orders","connector":"postgres"}"#;
        let source: SourceStage = serde_json::from_str(json).unwrap();
        assert_eq!(source.id(), Id::new("orders"));
        assert_eq!(source.display_name(), "Orders");
        assert_eq!(source.connector_kind(), "postgres");
    }

    #[test]
    fn test_transform_deserialize_with_predicate() {
        let json = r#"{"id":"t1","name":"Filter","predicate":{"kind":"a.b.TopicNameMatches"}}"#;
        let transform: TransformStage = serde_json::from_str(json).unwrap();
        let predicate = transform.predicate().expect("predicate should be present");
        assert_eq!(predicate.label(), "TopicNameMatches");
        assert!(!predicate.negate());
    }

    #[test]
    fn test_stage_serializes_with_role_tag() {
        let stage = Stage::from(DestinationStage::new(Id::new("sink"), "Sink", "kafka"));
        let value = serde_json::to_value(&stage).unwrap();
        assert_eq!(value["role"], "destination");
        assert_eq!(value["id"], "sink");
        assert_eq!(value["connector"], "kafka");
    }
}
