//! Core data model for the split pipeline.
//!
//! Everything here is plain data: the pipeline stages (block matching,
//! section decomposition, implementation lookup, emission) communicate
//! exclusively through these types, which keeps each stage a pure function
//! over borrowed text.

use serde::Serialize;
use std::path::PathBuf;

/// One aggregate input artifact (the monolithic header or source), read once
/// at the start of a run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AggregateSource {
    pub path: PathBuf,
    pub content: String,
}

impl AggregateSource {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A located, named region of an [`AggregateSource`].
///
/// `start..end` covers the whole block (from the class keyword through the
/// closing `};` terminator); `body_start..body_end` covers the text inside
/// the outer braces. Created by the block matcher, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSpan {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub body_start: usize,
    pub body_end: usize,
}

impl TypeSpan {
    /// The full block text, terminator included.
    pub fn block_text<'a>(&self, source: &'a AggregateSource) -> &'a str {
        &source.content[self.start..self.end]
    }

    /// The text between the block's outer braces.
    pub fn body_text<'a>(&self, source: &'a AggregateSource) -> &'a str {
        &source.content[self.body_start..self.body_end]
    }
}

/// Decomposition of one derived class body into its three sections.
///
/// Any field may legitimately be empty; a class with no extra members is
/// valid. A body whose constructor cannot be located at all never produces
/// a `DeclarationParts` (see `SplitError::MissingConstructor`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclarationParts {
    /// Constructor parameter list, interior whitespace normalized to single
    /// spaces, trimmed.
    pub constructor_params: String,
    /// Method declarations from the public section, marker token and
    /// constructor declaration stripped.
    pub public_methods: String,
    /// Everything after the first protected/private marker.
    pub private_fields: String,
}

/// The implementation text for one derived type, or an explicit sentinel
/// when no marker comment was found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImplementationBlock {
    Found(String),
    Missing,
}

impl ImplementationBlock {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// A fully rendered output text plus its target path. Write-once; nothing
/// in the pipeline reads a generated artifact back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}
