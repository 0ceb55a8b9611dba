//! Error adapter for converting StagegraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use stagegraph::StagegraphError;

/// Adapter rendering a [`StagegraphError`] as a miette diagnostic.
///
/// Pipeline errors carry no source spans; the adapter adds a stable code per
/// variant and help text where a fix is known.
pub struct ErrorAdapter<'a>(pub &'a StagegraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StagegraphError::Io(_) => "stagegraph::io",
            StagegraphError::DuplicateStageId(_) => "stagegraph::duplicate_stage",
            StagegraphError::UnknownStage(_) => "stagegraph::unknown_stage",
            StagegraphError::InvalidReorder { .. } => "stagegraph::reorder",
            StagegraphError::SessionNotOpen => "stagegraph::session",
            StagegraphError::Layout(_) => "stagegraph::layout",
            StagegraphError::Config(_) => "stagegraph::config",
            StagegraphError::IncompletePipeline(_) => "stagegraph::incomplete",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StagegraphError::DuplicateStageId(_) => {
                "give every transform in the pipeline file a unique `id`"
            }
            StagegraphError::InvalidReorder { .. } => {
                "the new order must list every transform id exactly once"
            }
            StagegraphError::Config(_) => {
                "remove the offending key to fall back to its default value"
            }
            StagegraphError::IncompletePipeline(_) => {
                "add the missing [source] or [destination] table to the pipeline file"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use stagegraph::{identifier::Id, validate::MissingStage};

    use super::*;

    #[test]
    fn test_code_per_variant() {
        let err = StagegraphError::UnknownStage(Id::new("t9"));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "stagegraph::unknown_stage");
        assert!(adapter.help().is_none());
        assert_eq!(
            adapter.to_string(),
            "No transform with id `t9` in this pipeline"
        );
    }

    #[test]
    fn test_incomplete_pipeline_has_help() {
        let err = StagegraphError::IncompletePipeline(vec![MissingStage::Destination]);
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "stagegraph::incomplete");
        assert!(adapter.help().unwrap().to_string().contains("[destination]"));
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = StagegraphError::Config("layout.step must exceed 110".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("stagegraph::config"));
        assert!(out.contains("layout.step"));
    }
}
