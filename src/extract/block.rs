//! Block matcher: locates the base class block and every derived class
//! block in the aggregate header.
//!
//! Class headers are found with regular expressions, but bodies are scanned
//! with an explicit delimiter-depth counter so that a brace pair nested
//! inside a body (an inline template method, an initializer list) can never
//! truncate the block at the wrong closing brace.

use crate::config::Conventions;
use crate::core::{AggregateSource, TypeSpan};
use crate::errors::SplitError;
use regex::Regex;

/// Everything the block matcher finds in one aggregate header, in document
/// order. `derived` is the discovery-order list threaded through the rest
/// of the pipeline; `failures` carries per-type unbalanced-body errors.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub include_block: String,
    pub base: TypeSpan,
    pub derived: Vec<TypeSpan>,
    pub failures: Vec<SplitError>,
}

fn base_header_pattern(base_class: &str) -> Regex {
    Regex::new(&format!(r"\bclass\s+{}\s*\{{", regex::escape(base_class))).unwrap()
}

fn derived_header_pattern(base_class: &str) -> Regex {
    Regex::new(&format!(
        r"\bclass\s+(\w+)\s*:\s*public\s+{}\s*\{{",
        regex::escape(base_class)
    ))
    .unwrap()
}

/// Scan a balanced body starting at the opening brace `open`, tracking
/// nesting depth. Returns `(body_start, body_end, block_end)` where
/// `block_end` is past the `;` terminator, or `None` if no matching
/// terminator exists before end of source.
fn scan_block(content: &str, open: usize) -> Option<(usize, usize, usize)> {
    let bytes = content.as_bytes();
    debug_assert_eq!(bytes[open], b'{');
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let mut j = i + 1;
                    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j] == b';' {
                        return Some((open + 1, i, j + 1));
                    }
                    return None;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// The shared include block: from the first `#include` line up to the line
/// where the namespace or the first class begins. Opaque text, reused
/// verbatim by the emitter.
fn extract_include_block(content: &str) -> String {
    let mut offset = 0usize;
    let mut start = None;
    let mut end = None;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if start.is_none() {
            if trimmed.starts_with("#include") {
                start = Some(offset);
            }
        } else if trimmed.starts_with("namespace") || trimmed.starts_with("class") {
            end = Some(offset);
            break;
        }
        offset += line.len();
    }
    match start {
        Some(s) => content[s..end.unwrap_or(content.len())].trim_end().to_string(),
        None => String::new(),
    }
}

/// Locate the base block (required to match exactly once) and every derived
/// block, in document order, non-overlapping.
pub fn discover(
    source: &AggregateSource,
    conventions: &Conventions,
) -> Result<Discovery, SplitError> {
    let content = &source.content;

    let base_matches: Vec<_> = base_header_pattern(&conventions.base_class)
        .find_iter(content)
        .collect();
    if base_matches.len() != 1 {
        return Err(SplitError::AmbiguousBase {
            matches: base_matches.len(),
        });
    }
    let base_match = base_matches[0];
    let (body_start, body_end, block_end) = scan_block(content, base_match.end() - 1).ok_or(
        SplitError::UnbalancedBody {
            type_name: conventions.base_class.clone(),
            offset: base_match.start(),
        },
    )?;
    let base = TypeSpan {
        name: conventions.base_class.clone(),
        start: base_match.start(),
        end: block_end,
        body_start,
        body_end,
    };

    let mut derived = Vec::new();
    let mut failures = Vec::new();
    let mut last_end = 0usize;
    for caps in derived_header_pattern(&conventions.base_class).captures_iter(content) {
        let header = caps.get(0).unwrap();
        if header.start() < last_end {
            continue;
        }
        let name = caps[1].to_string();
        match scan_block(content, header.end() - 1) {
            Some((body_start, body_end, block_end)) => {
                last_end = block_end;
                derived.push(TypeSpan {
                    name,
                    start: header.start(),
                    end: block_end,
                    body_start,
                    body_end,
                });
            }
            None => {
                failures.push(SplitError::UnbalancedBody {
                    type_name: name,
                    offset: header.start(),
                });
            }
        }
    }

    log::debug!(
        "discovered base `{}` and {} derived type(s)",
        base.name,
        derived.len()
    );

    Ok(Discovery {
        include_block: extract_include_block(content),
        base,
        derived,
        failures,
    })
}
