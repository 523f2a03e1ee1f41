//! Implementation locator: finds one derived type's method bodies in the
//! aggregate implementation source.
//!
//! Lookup is by the exact marker comment for the type name, case-sensitive,
//! never fuzzy. A block runs from just after its marker to the next marker
//! comment (for any type) or to the namespace epilogue / end of text. A
//! type with no marker gets the explicit `Missing` sentinel; callers render
//! a visible placeholder, they never drop the file.

use crate::config::{Conventions, CLASS_SLOT};
use crate::core::{AggregateSource, ImplementationBlock};
use regex::Regex;

/// A pattern matching the marker comment for any type name.
fn any_marker_pattern(conventions: &Conventions) -> Regex {
    let escaped = regex::escape(&conventions.impl_marker);
    let pattern = escaped.replace(&regex::escape(CLASS_SLOT), r"\w+");
    Regex::new(&pattern).unwrap()
}

pub fn locate_implementation(
    source: &AggregateSource,
    type_name: &str,
    conventions: &Conventions,
) -> ImplementationBlock {
    let marker = conventions.marker_for(type_name);
    let Some(marker_pos) = source.content.find(&marker) else {
        log::warn!("no implementation marker for `{type_name}`");
        return ImplementationBlock::Missing;
    };

    let start = marker_pos + marker.len();
    let rest = &source.content[start..];

    let mut end = rest.len();
    if let Some(next) = any_marker_pattern(conventions).find(rest) {
        end = next.start();
    }
    if let Some(epilogue) = rest[..end].find(&conventions.impl_epilogue) {
        end = epilogue;
    }

    ImplementationBlock::Found(rest[..end].trim().to_string())
}
