//! Typed errors and the run-level report.
//!
//! The pipeline never stops at the first per-type failure: each derived type
//! is processed independently, failures and warnings are collected, and the
//! whole set is reported together at the end of the run. Only run-level
//! errors (an ambiguous base block, unreadable input) abort before anything
//! is written.

use colored::*;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Structural errors the extraction engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitError {
    /// The base class pattern matched zero or more than one time. Fatal for
    /// the whole run; no file is written.
    #[error("base class block matched {matches} times in the aggregate header; expected exactly one")]
    AmbiguousBase { matches: usize },

    /// A discovered derived type declares no matching constructor. Fatal for
    /// that type only; its artifacts are skipped.
    #[error("type `{type_name}` has no matching constructor declaration")]
    MissingConstructor { type_name: String },

    /// No implementation marker comment was found for a discovered type.
    /// Non-fatal; a placeholder body is emitted instead.
    #[error("no implementation marker found for type `{type_name}`")]
    MissingImplementation { type_name: String },

    /// Delimiter-depth tracking ran off the end of the source without
    /// finding the block's terminator. Fatal for that type.
    #[error("unbalanced body for type `{type_name}`: no matching terminator (scan began at offset {offset})")]
    UnbalancedBody { type_name: String, offset: usize },
}

impl SplitError {
    /// The type this error is scoped to, if it is a per-type error.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::AmbiguousBase { .. } => None,
            Self::MissingConstructor { type_name }
            | Self::MissingImplementation { type_name }
            | Self::UnbalancedBody { type_name, .. } => Some(type_name),
        }
    }
}

/// One successfully emitted declaration/implementation pair.
#[derive(Debug, Clone, Serialize)]
pub struct EmittedPair {
    pub type_name: String,
    pub header_path: String,
    pub source_path: String,
}

/// Results of one split run, following the "fail completely" pattern:
/// successes, per-type failures, and warnings are all kept and presented
/// together instead of abandoning the run at the first problem.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub emitted: Vec<EmittedPair>,
    pub failures: Vec<SplitError>,
    pub warnings: Vec<SplitError>,
    pub aggregate_path: Option<String>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn record_pair(&mut self, pair: EmittedPair) {
        self.emitted.push(pair);
    }

    pub fn record_failure(&mut self, error: SplitError) {
        self.failures.push(error);
    }

    pub fn record_warning(&mut self, error: SplitError) {
        self.warnings.push(error);
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the report for a terminal, one line per outcome.
    pub fn render_terminal(&self) -> String {
        let mut out = String::new();
        for pair in &self.emitted {
            out.push_str(&format!(
                "{} {} -> {}, {}\n",
                "extracted".green(),
                pair.type_name,
                pair.header_path,
                pair.source_path
            ));
        }
        for warning in &self.warnings {
            out.push_str(&format!("{} {}\n", "warning".yellow(), warning));
        }
        for failure in &self.failures {
            out.push_str(&format!("{} {}\n", "error".red(), failure));
        }
        if let Some(path) = &self.aggregate_path {
            out.push_str(&format!("{} {}\n", "rewrote".green(), path));
        }
        let verb = if self.dry_run { "would emit" } else { "emitted" };
        out.push_str(&format!(
            "{} {} pair(s), {} warning(s), {} failure(s)\n",
            verb,
            self.emitted_count(),
            self.warning_count(),
            self.failure_count()
        ));
        out
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_type_errors_expose_their_type_name() {
        let err = SplitError::MissingConstructor {
            type_name: "ErodeOperator".to_string(),
        };
        assert_eq!(err.type_name(), Some("ErodeOperator"));
        assert_eq!(
            SplitError::AmbiguousBase { matches: 2 }.type_name(),
            None
        );
    }

    #[test]
    fn report_counts_track_recorded_outcomes() {
        let mut report = RunReport::default();
        report.record_pair(EmittedPair {
            type_name: "DilateOperator".to_string(),
            header_path: "include/DilateOperator.hpp".to_string(),
            source_path: "src/DilateOperator.cpp".to_string(),
        });
        report.record_warning(SplitError::MissingImplementation {
            type_name: "FillOperator".to_string(),
        });
        assert_eq!(report.emitted_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.is_clean());

        report.record_failure(SplitError::MissingConstructor {
            type_name: "FillOperator".to_string(),
        });
        assert!(!report.is_clean());
    }

    #[test]
    fn json_report_tags_error_kinds() {
        let mut report = RunReport::default();
        report.record_failure(SplitError::UnbalancedBody {
            type_name: "SmoothOperator".to_string(),
            offset: 42,
        });
        let json = report.to_json().unwrap();
        assert!(json.contains("unbalanced_body"));
        assert!(json.contains("\"offset\": 42"));
    }
}
