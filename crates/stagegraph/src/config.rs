//! Configuration types for pipeline diagram layout.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and path settings.
//! - [`LayoutConfig`] - Node sizes and spacing used by the layout engine.
//! - [`PathConfig`] - Edge curvature and animation timing.
//!
//! # Example
//!
//! ```
//! # use stagegraph::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     step = 180.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.layout().step(), 180.0);
//! assert!(config.validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use stagegraph_core::geometry::{Point, Size};

use crate::error::StagegraphError;

/// Which designer view the layout is produced for.
///
/// # Variants
///
/// - `ReadOnly` - Pipeline creation and overview (default)
/// - `Editable` - Pipeline edit view, which ends an expanded chain with an
///   inline "add transform" slot
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    #[default]
    ReadOnly,
    Editable,
}

impl FromStr for LayoutMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read-only" => Ok(Self::ReadOnly),
            "editable" => Ok(Self::Editable),
            _ => Err("Unsupported layout mode"),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => f.write_str("read-only"),
            Self::Editable => f.write_str("editable"),
        }
    }
}

/// Top-level configuration combining layout and path settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Edge path configuration section.
    #[serde(default)]
    path: PathConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, path: PathConfig) -> Self {
        Self { layout, path }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the edge path configuration.
    pub fn path(&self) -> &PathConfig {
        &self.path
    }

    /// Checks that the configured geometry can keep nodes from overlapping.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<(), StagegraphError> {
        self.layout.validate()?;
        self.path.validate()
    }
}

/// Node sizes and spacing for the pipeline layout.
///
/// Positions are top-left corners. Defaults place the source at `(40, 40)`,
/// the transform group at `x = 260`, transforms every 150 units from
/// `x = 285`, and the destination at `x = 500` when the chain is empty or
/// collapsed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top-left corner of the source node.
    origin: Point,
    /// Size of the source and destination nodes.
    data_node_size: Size,
    /// Size of each transform node.
    transform_node_size: Size,
    /// Size of the "add transform" placeholder shown for an empty chain.
    placeholder_size: Size,
    /// Size of the collapsed transform summary node.
    summary_size: Size,
    /// Size of the inline "add transform" node in editable mode.
    add_node_size: Size,
    /// Horizontal distance between consecutive transform nodes.
    step: f32,
    /// Horizontal offset of the transform group from the source node.
    group_offset: f32,
    /// Inset of the first transform node inside the group.
    group_padding: f32,
    /// Amount trimmed from `step * count` to get the group width.
    group_gap: f32,
    /// Height of the transform group.
    group_height: f32,
    /// Distance from the end of the last transform slot to the destination.
    destination_margin: f32,
    /// Destination offset from the source when the chain is empty or collapsed.
    compact_destination_offset: f32,
    /// Width reserved for the inline "add transform" slot in editable mode.
    add_slot_width: f32,
    /// Default layout mode.
    mode: LayoutMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(40.0, 40.0),
            data_node_size: Size::new(160.0, 64.0),
            transform_node_size: Size::new(110.0, 40.0),
            placeholder_size: Size::new(120.0, 48.0),
            summary_size: Size::new(180.0, 52.0),
            add_node_size: Size::new(40.0, 40.0),
            step: 150.0,
            group_offset: 220.0,
            group_padding: 25.0,
            group_gap: 10.0,
            group_height: 80.0,
            destination_margin: 65.0,
            compact_destination_offset: 460.0,
            add_slot_width: 100.0,
            mode: LayoutMode::default(),
        }
    }
}

impl LayoutConfig {
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn data_node_size(&self) -> Size {
        self.data_node_size
    }

    pub fn transform_node_size(&self) -> Size {
        self.transform_node_size
    }

    pub fn placeholder_size(&self) -> Size {
        self.placeholder_size
    }

    pub fn summary_size(&self) -> Size {
        self.summary_size
    }

    pub fn add_node_size(&self) -> Size {
        self.add_node_size
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn group_offset(&self) -> f32 {
        self.group_offset
    }

    pub fn group_padding(&self) -> f32 {
        self.group_padding
    }

    pub fn group_gap(&self) -> f32 {
        self.group_gap
    }

    pub fn group_height(&self) -> f32 {
        self.group_height
    }

    pub fn destination_margin(&self) -> f32 {
        self.destination_margin
    }

    pub fn compact_destination_offset(&self) -> f32 {
        self.compact_destination_offset
    }

    pub fn add_slot_width(&self) -> f32 {
        self.add_slot_width
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Sets the step (builder style).
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the default layout mode (builder style).
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    fn validate(&self) -> Result<(), StagegraphError> {
        let sizes = [
            ("data_node_size", self.data_node_size),
            ("transform_node_size", self.transform_node_size),
            ("placeholder_size", self.placeholder_size),
            ("summary_size", self.summary_size),
            ("add_node_size", self.add_node_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| size.is_degenerate()) {
            return Err(StagegraphError::Config(format!(
                "layout.{name} must have a positive width and height"
            )));
        }

        if self.step <= self.transform_node_size.width() {
            return Err(StagegraphError::Config(format!(
                "layout.step ({}) must exceed the transform node width ({})",
                self.step,
                self.transform_node_size.width()
            )));
        }

        if self.step - self.group_gap <= 0.0 {
            return Err(StagegraphError::Config(
                "layout.group_gap must be smaller than layout.step".to_string(),
            ));
        }

        // Every transform slot ends `group_gap` before the next one starts.
        let slot_width = self.step - self.group_gap;
        if self.group_padding + self.transform_node_size.width() > slot_width {
            return Err(StagegraphError::Config(format!(
                "layout.group_padding plus the transform node width ({}) must fit in \
                 layout.step minus layout.group_gap ({slot_width})",
                self.group_padding + self.transform_node_size.width()
            )));
        }

        let add_slot = self.add_slot_width - self.group_gap;
        if self.group_padding + self.add_node_size.width() > add_slot {
            return Err(StagegraphError::Config(format!(
                "layout.group_padding plus layout.add_node_size width ({}) must fit in \
                 layout.add_slot_width minus layout.group_gap ({add_slot})",
                self.group_padding + self.add_node_size.width()
            )));
        }

        let group_members = [
            ("transform_node_size", self.transform_node_size),
            ("add_node_size", self.add_node_size),
        ];
        if let Some((name, size)) = group_members
            .iter()
            .find(|(_, size)| size.height() > self.group_height)
        {
            return Err(StagegraphError::Config(format!(
                "layout.{name} height ({}) must not exceed layout.group_height ({})",
                size.height(),
                self.group_height
            )));
        }

        let compact_gap = self.compact_destination_offset - self.data_node_size.width();
        if compact_gap <= 0.0 {
            return Err(StagegraphError::Config(format!(
                "layout.compact_destination_offset ({}) must exceed the data node width ({})",
                self.compact_destination_offset,
                self.data_node_size.width()
            )));
        }

        let gap_members = [
            ("placeholder_size", self.placeholder_size),
            ("summary_size", self.summary_size),
        ];
        if let Some((name, size)) = gap_members
            .iter()
            .find(|(_, size)| size.width() > compact_gap)
        {
            return Err(StagegraphError::Config(format!(
                "layout.{name} width ({}) must fit between the source and the compact \
                 destination ({compact_gap})",
                size.width()
            )));
        }

        Ok(())
    }
}

/// Edge curvature and animation timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// How far waypoints are lifted above the flow line.
    bow_height: f32,
    /// Animation duration, in seconds, for a chain with no transforms.
    base_duration_secs: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            bow_height: 1.0,
            base_duration_secs: 3.0,
        }
    }
}

impl PathConfig {
    pub fn bow_height(&self) -> f32 {
        self.bow_height
    }

    pub fn base_duration_secs(&self) -> f32 {
        self.base_duration_secs
    }

    fn validate(&self) -> Result<(), StagegraphError> {
        if self.base_duration_secs <= 0.0 {
            return Err(StagegraphError::Config(
                "path.base_duration_secs must be positive".to_string(),
            ));
        }
        if self.bow_height < 0.0 {
            return Err(StagegraphError::Config(
                "path.bow_height must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
