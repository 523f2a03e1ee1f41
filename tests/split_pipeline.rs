//! End-to-end tests for the split pipeline: discovery, decomposition,
//! implementation lookup, emission, and aggregate regeneration against a
//! realistic operator-family fixture.

use declsplit::commands::{handle_split, SplitOptions};
use declsplit::config::Conventions;
use declsplit::core::AggregateSource;
use declsplit::errors::SplitError;
use declsplit::{decompose, discover, render_header, MISSING_IMPL_PLACEHOLDER};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Derived types deliberately appear in non-lexical order (Z, A, M) so the
// discovery-order assertions cannot pass by accident. MOperator carries an
// inline method body and the base carries an inline template method, so
// both exercise nested-brace matching.
const HEADER: &str = indoc! {r#"
    #pragma once

    #include <memory>
    #include "core/voxel_grid.hpp"

    namespace VXZ {

    class GridOperator {
    public:
        virtual ~GridOperator() = default;
        virtual bool apply(VoxelGrid& grid) const = 0;

    protected:
        template <typename F>
        void for_each(VoxelGrid& grid, F f) const { f(grid); }
    };

    class ZOperator : public GridOperator {
    public:
        explicit ZOperator(int depth = 1);
        bool apply(VoxelGrid& grid) const override;
    private:
        int depth_;
    };

    class AOperator : public GridOperator {
    public:
        explicit AOperator(float alpha,
                           float beta = 0.5f);
        bool apply(VoxelGrid& grid) const override;
    private:
        float alpha_;
        float beta_;
    };

    class MOperator : public GridOperator {
    public:
        explicit MOperator(int margin);
        bool apply(VoxelGrid& grid) const override;
        void reset() { margin_ = 0; }
    private:
        int margin_;
    };

    }
"#};

// AOperator has no marker here: the missing-implementation scenario.
const SOURCE: &str = indoc! {r#"
    #include "operator/grid_operator.hpp"
    #include <algorithm>

    namespace VXZ {

    // ZOperator implementation
    ZOperator::ZOperator(int depth) : depth_(depth) {}

    bool ZOperator::apply(VoxelGrid& grid) const {
        if (depth_ <= 0) {
            return true;
        }
        grid.step(depth_);
        return true;
    }

    // MOperator implementation
    MOperator::MOperator(int margin) : margin_(margin) {}

    bool MOperator::apply(VoxelGrid& grid) const {
        grid.pad(margin_);
        return true;
    }

    } // namespace VXZ
"#};

struct Workspace {
    _dir: TempDir,
    header: PathBuf,
    source: PathBuf,
    header_out: PathBuf,
    source_out: PathBuf,
}

fn workspace(header: &str, source: &str) -> Workspace {
    let dir = TempDir::new().unwrap();
    let header_path = dir.path().join("grid_operator.hpp");
    let source_path = dir.path().join("grid_operator.cpp");
    fs::write(&header_path, header).unwrap();
    fs::write(&source_path, source).unwrap();
    Workspace {
        header: header_path,
        source: source_path,
        header_out: dir.path().join("include"),
        source_out: dir.path().join("src"),
        _dir: dir,
    }
}

fn options(ws: &Workspace) -> SplitOptions {
    SplitOptions {
        header: ws.header.clone(),
        source: ws.source.clone(),
        header_out: ws.header_out.clone(),
        source_out: ws.source_out.clone(),
        base: None,
        config: None,
        dry_run: false,
        jobs: 0,
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn emits_one_pair_per_derived_type_with_exact_names() {
    let ws = workspace(HEADER, SOURCE);
    let report = handle_split(&options(&ws)).unwrap();

    assert_eq!(report.emitted_count(), 3);
    assert!(report.is_clean());
    let names: Vec<_> = report
        .emitted
        .iter()
        .map(|pair| pair.type_name.as_str())
        .collect();
    assert_eq!(names, vec!["ZOperator", "AOperator", "MOperator"]);

    for name in ["ZOperator", "AOperator", "MOperator"] {
        assert!(ws.header_out.join(format!("{name}.hpp")).is_file());
        assert!(ws.source_out.join(format!("{name}.cpp")).is_file());
    }
}

#[test]
fn aggregate_preserves_discovery_order_not_lexical_order() {
    let ws = workspace(HEADER, SOURCE);
    handle_split(&options(&ws)).unwrap();

    let aggregate = read(&ws.header);
    let z = aggregate.find("ZOperator.hpp").unwrap();
    let a = aggregate.find("AOperator.hpp").unwrap();
    let m = aggregate.find("MOperator.hpp").unwrap();
    assert!(z < a && a < m, "includes must follow discovery order");
    assert!(!aggregate.contains("class ZOperator"), "derived blocks are gone");
}

#[test]
fn base_body_survives_the_rewrite_byte_for_byte() {
    let conventions = Conventions::default();
    let original = AggregateSource::new("grid_operator.hpp", HEADER);
    let before = discover(&original, &conventions).unwrap();
    let original_body = before.base.body_text(&original).to_string();

    let ws = workspace(HEADER, SOURCE);
    handle_split(&options(&ws)).unwrap();

    let rewritten = AggregateSource::new("grid_operator.hpp", read(&ws.header));
    let after = discover(&rewritten, &conventions).unwrap();
    assert!(after.derived.is_empty());
    assert_eq!(after.base.body_text(&rewritten), original_body);
}

#[test]
fn missing_implementation_emits_placeholder_and_exactly_one_warning() {
    let ws = workspace(HEADER, SOURCE);
    let report = handle_split(&options(&ws)).unwrap();

    assert_eq!(
        report.warnings,
        vec![SplitError::MissingImplementation {
            type_name: "AOperator".to_string()
        }]
    );

    let placeholder_source = read(&ws.source_out.join("AOperator.cpp"));
    assert!(placeholder_source.contains(MISSING_IMPL_PLACEHOLDER));
    assert!(placeholder_source.contains("AOperator"));

    // Located blocks stay scoped to their own type.
    let z_source = read(&ws.source_out.join("ZOperator.cpp"));
    assert!(z_source.contains("grid.step(depth_);"));
    assert!(!z_source.contains("MOperator"));
}

#[test]
fn nested_inner_braces_do_not_truncate_blocks() {
    let ws = workspace(HEADER, SOURCE);
    handle_split(&options(&ws)).unwrap();

    let header = read(&ws.header_out.join("MOperator.hpp"));
    assert!(header.contains("void reset() { margin_ = 0; }"));
    assert!(
        header.contains("int margin_;"),
        "fields after the inner brace pair must stay in the block"
    );
}

#[test]
fn decompose_render_decompose_is_idempotent() {
    let conventions = Conventions::default();
    let src = AggregateSource::new("grid_operator.hpp", HEADER);
    let discovery = discover(&src, &conventions).unwrap();
    assert_eq!(discovery.derived.len(), 3);

    for span in &discovery.derived {
        let parts = decompose(span.body_text(&src), &span.name, &conventions).unwrap();
        let rendered = render_header(&span.name, &parts, "", &conventions);

        let roundtrip = AggregateSource::new(
            "one.hpp",
            format!("class GridOperator {{\n}};\n\n{rendered}"),
        );
        let rediscovered = discover(&roundtrip, &conventions).unwrap();
        assert_eq!(rediscovered.derived.len(), 1);
        let reparts = decompose(
            rediscovered.derived[0].body_text(&roundtrip),
            &span.name,
            &conventions,
        )
        .unwrap();
        assert_eq!(reparts, parts, "round trip must be stable for {}", span.name);
    }
}

#[test]
fn ambiguous_base_aborts_with_zero_files_written() {
    let doubled = format!("{HEADER}\nclass GridOperator {{\n}};\n");
    let ws = workspace(&doubled, SOURCE);
    let err = handle_split(&options(&ws)).unwrap_err();
    assert!(err.to_string().contains("matched 2 times"));

    assert!(!ws.header_out.exists(), "no output directory is created");
    assert!(!ws.source_out.exists());
    assert_eq!(read(&ws.header), doubled, "the input aggregate is untouched");
}

#[test]
fn missing_constructor_skips_only_that_type() {
    let header = indoc! {r#"
        #pragma once

        #include <memory>

        namespace VXZ {

        class GridOperator {
        public:
            virtual ~GridOperator() = default;
        };

        class GoodOperator : public GridOperator {
        public:
            explicit GoodOperator(int n);
            bool apply(VoxelGrid& grid) const override;
        private:
            int n_;
        };

        class GhostOperator : public GridOperator {
        public:
            bool apply(VoxelGrid& grid) const override;
        };

        }
    "#};
    let source = indoc! {r#"
        namespace VXZ {

        // GoodOperator implementation
        GoodOperator::GoodOperator(int n) : n_(n) {}

        } // namespace VXZ
    "#};

    let ws = workspace(header, source);
    let report = handle_split(&options(&ws)).unwrap();

    assert_eq!(report.emitted_count(), 1);
    assert_eq!(
        report.failures,
        vec![SplitError::MissingConstructor {
            type_name: "GhostOperator".to_string()
        }]
    );
    assert!(ws.header_out.join("GoodOperator.hpp").is_file());
    assert!(
        !ws.header_out.join("GhostOperator.hpp").exists(),
        "no artifact is guessed for a type without a constructor"
    );

    let aggregate = read(&ws.header);
    assert!(aggregate.contains("GoodOperator.hpp"));
    assert!(!aggregate.contains("GhostOperator.hpp"));
}

#[test]
fn dry_run_reports_without_writing() {
    let ws = workspace(HEADER, SOURCE);
    let mut opts = options(&ws);
    opts.dry_run = true;
    let report = handle_split(&opts).unwrap();

    assert_eq!(report.emitted_count(), 3);
    assert!(report.dry_run);
    assert!(!ws.header_out.exists());
    assert_eq!(read(&ws.header), HEADER, "dry run leaves the aggregate alone");
}
