// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod io;

// Re-export commonly used types
pub use crate::config::Conventions;
pub use crate::core::{
    AggregateSource, DeclarationParts, GeneratedArtifact, ImplementationBlock, TypeSpan,
};
pub use crate::errors::{EmittedPair, RunReport, SplitError};
pub use crate::extract::{decompose, discover, locate_implementation, Discovery};

pub use crate::commands::{handle_split, SplitOptions};
pub use crate::emit::{
    render_aggregate, render_header, render_source, MISSING_IMPL_PLACEHOLDER,
};
