//! Section decomposer: splits one derived class body into its constructor
//! parameter list, public method declarations, and private/protected field
//! declarations.
//!
//! Assumes access markers appear in the order public -> protected/private.
//! Bodies with fields declared before the public section, or with multiple
//! interleaved access sections, are outside that contract and are not
//! guaranteed to decompose correctly.

use crate::config::Conventions;
use crate::core::DeclarationParts;
use crate::errors::SplitError;
use regex::Regex;

struct ConstructorMatch {
    params: String,
    /// Span of the whole constructor declaration statement within the body,
    /// from the start of its line through the `;` and trailing newline.
    decl_start: usize,
    decl_end: usize,
}

/// Find the matching `)` for the `(` at `open`, tracking paren depth so
/// default arguments containing calls do not end the list early.
fn scan_params(body: &str, open: usize) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn find_constructor(body: &str, type_name: &str) -> Option<ConstructorMatch> {
    let head = Regex::new(&format!(r"{}\s*\(", regex::escape(type_name))).unwrap();
    let matched = head.find(body)?;
    let open = matched.end() - 1;
    let close = scan_params(body, open)?;

    // The declaration must terminate with `;` right after the parameter list.
    let mut semi = close + 1;
    let bytes = body.as_bytes();
    while semi < bytes.len() && bytes[semi].is_ascii_whitespace() {
        semi += 1;
    }
    if semi >= bytes.len() || bytes[semi] != b';' {
        return None;
    }

    let params = body[open + 1..close]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let decl_start = body[..matched.start()]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let mut decl_end = semi + 1;
    if bytes.get(decl_end) == Some(&b'\n') {
        decl_end += 1;
    }

    Some(ConstructorMatch {
        params,
        decl_start,
        decl_end,
    })
}

fn earliest_marker(body: &str, from: usize, markers: &[&str]) -> Option<(usize, usize)> {
    markers
        .iter()
        .filter_map(|marker| body[from..].find(marker).map(|i| (from + i, marker.len())))
        .min_by_key(|(pos, _)| *pos)
}

/// Remove the constructor declaration statement from the public section
/// text, given both in body-absolute coordinates.
fn strip_constructor(section: &str, section_start: usize, ctor: &ConstructorMatch) -> String {
    let section_end = section_start + section.len();
    if ctor.decl_start >= section_end || ctor.decl_end <= section_start {
        return section.to_string();
    }
    let cut_start = ctor.decl_start.saturating_sub(section_start);
    let cut_end = (ctor.decl_end.min(section_end)) - section_start;
    format!("{}{}", &section[..cut_start], &section[cut_end..])
}

/// Decompose one derived class body. The constructor is contractually
/// required; its absence is a structural error for the type. Absent access
/// sections yield empty strings.
pub fn decompose(
    body: &str,
    type_name: &str,
    conventions: &Conventions,
) -> Result<DeclarationParts, SplitError> {
    let ctor = find_constructor(body, type_name).ok_or_else(|| SplitError::MissingConstructor {
        type_name: type_name.to_string(),
    })?;

    let field_markers = [
        conventions.protected_marker.as_str(),
        conventions.private_marker.as_str(),
    ];

    let public_methods = match body.find(&conventions.public_marker) {
        Some(pos) => {
            let section_start = pos + conventions.public_marker.len();
            let section_end = earliest_marker(body, section_start, &field_markers)
                .map(|(pos, _)| pos)
                .unwrap_or(body.len());
            strip_constructor(&body[section_start..section_end], section_start, &ctor)
                .trim()
                .to_string()
        }
        None => String::new(),
    };

    let private_fields = match earliest_marker(body, 0, &field_markers) {
        Some((pos, len)) => body[pos + len..].trim().to_string(),
        None => String::new(),
    };

    Ok(DeclarationParts {
        constructor_params: ctor.params,
        public_methods,
        private_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn conventions() -> Conventions {
        Conventions::default()
    }

    const BODY: &str = indoc! {r#"

        public:
            explicit SmoothOperator(int iterations = 1,
                                    float threshold = 0.5f);

            bool apply(VoxelGrid& grid) const override;

        private:
            int iterations_;
            float threshold_;
    "#};

    #[test]
    fn constructor_params_are_whitespace_normalized() {
        let parts = decompose(BODY, "SmoothOperator", &conventions()).unwrap();
        assert_eq!(
            parts.constructor_params,
            "int iterations = 1, float threshold = 0.5f"
        );
    }

    #[test]
    fn public_methods_exclude_marker_and_constructor() {
        let parts = decompose(BODY, "SmoothOperator", &conventions()).unwrap();
        assert_eq!(
            parts.public_methods,
            "bool apply(VoxelGrid& grid) const override;"
        );
    }

    #[test]
    fn private_fields_run_to_end_of_body() {
        let parts = decompose(BODY, "SmoothOperator", &conventions()).unwrap();
        assert_eq!(parts.private_fields, "int iterations_;\n    float threshold_;");
    }

    #[test]
    fn protected_marker_bounds_the_public_section_too() {
        let body = indoc! {r#"
            public:
                explicit FillOperator(float value);
                bool apply(VoxelGrid& grid) const override;
            protected:
                float value_;
        "#};
        let parts = decompose(body, "FillOperator", &conventions()).unwrap();
        assert_eq!(parts.public_methods, "bool apply(VoxelGrid& grid) const override;");
        assert_eq!(parts.private_fields, "float value_;");
    }

    #[test]
    fn missing_sections_yield_empty_strings() {
        let body = "\npublic:\n    explicit EmptyOperator();\n";
        let parts = decompose(body, "EmptyOperator", &conventions()).unwrap();
        assert_eq!(parts.constructor_params, "");
        assert_eq!(parts.public_methods, "");
        assert_eq!(parts.private_fields, "");
    }

    #[test]
    fn missing_constructor_is_a_structural_error() {
        let body = "\npublic:\n    bool apply(VoxelGrid& grid) const override;\n";
        let err = decompose(body, "GhostOperator", &conventions()).unwrap_err();
        assert_eq!(
            err,
            SplitError::MissingConstructor {
                type_name: "GhostOperator".to_string()
            }
        );
    }

    #[test]
    fn default_argument_parens_stay_inside_the_parameter_list() {
        let body =
            "\npublic:\n    explicit SeedOperator(Vec3 seed = Vec3(0, 0, 0), int fill = 1);\n";
        let parts = decompose(body, "SeedOperator", &conventions()).unwrap();
        assert_eq!(
            parts.constructor_params,
            "Vec3 seed = Vec3(0, 0, 0), int fill = 1"
        );
    }
}
