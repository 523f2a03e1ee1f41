//! The `split` command: the batch driver that owns file I/O and drives the
//! extraction pipeline end to end.
//!
//! Run shape: read both aggregates once, discover the base and derived
//! blocks, then decompose/locate/render each derived type independently.
//! Per-type failures are collected, not fatal to the run; only an ambiguous
//! base (or unreadable input) aborts before anything is written. All writes
//! happen after the whole pipeline has run, with the aggregate rewrite
//! last, so an aborted run never clobbers its input.

use crate::config::Conventions;
use crate::core::{AggregateSource, GeneratedArtifact, TypeSpan};
use crate::emit;
use crate::errors::{EmittedPair, RunReport, SplitError};
use crate::extract::{self, Discovery};
use crate::io;
use anyhow::Result;
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Aggregate declaration file; also the target of the rewrite.
    pub header: PathBuf,
    /// Aggregate implementation file.
    pub source: PathBuf,
    /// Output directory for per-type headers.
    pub header_out: PathBuf,
    /// Output directory for per-type implementation files.
    pub source_out: PathBuf,
    /// Base class override, applied on top of the conventions file.
    pub base: Option<String>,
    /// Explicit conventions file path.
    pub config: Option<PathBuf>,
    /// Run the full pipeline and report without writing any file.
    pub dry_run: bool,
    /// Worker threads for per-type extraction (0 = rayon default).
    pub jobs: usize,
}

struct TypeOutcome {
    type_name: String,
    result: Result<(GeneratedArtifact, GeneratedArtifact), SplitError>,
    warning: Option<SplitError>,
}

pub fn handle_split(options: &SplitOptions) -> Result<RunReport> {
    let conventions = Conventions::resolve(options.config.as_deref(), options.base.as_deref())?;

    let header_src = AggregateSource::new(&options.header, io::read_file(&options.header)?);
    let source_src = AggregateSource::new(&options.source, io::read_file(&options.source)?);

    let discovery = extract::discover(&header_src, &conventions)?;
    log::info!(
        "found {} derived type(s) of `{}` in {}",
        discovery.derived.len(),
        conventions.base_class,
        options.header.display()
    );

    configure_thread_pool(options.jobs);

    // Per-type extraction is independent; run it in parallel but collect in
    // discovery order so the aggregate references cannot be reordered.
    let outcomes: Vec<TypeOutcome> = discovery
        .derived
        .par_iter()
        .map(|span| {
            extract_one(
                span,
                &header_src,
                &source_src,
                &discovery,
                &conventions,
                options,
            )
        })
        .collect();

    let mut report = RunReport {
        dry_run: options.dry_run,
        ..Default::default()
    };
    let mut artifacts: Vec<GeneratedArtifact> = Vec::new();
    let mut emitted_names: Vec<String> = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok((header_artifact, source_artifact)) => {
                report.record_pair(EmittedPair {
                    type_name: outcome.type_name.clone(),
                    header_path: header_artifact.path.display().to_string(),
                    source_path: source_artifact.path.display().to_string(),
                });
                emitted_names.push(outcome.type_name);
                artifacts.push(header_artifact);
                artifacts.push(source_artifact);
            }
            Err(error) => report.record_failure(error),
        }
        if let Some(warning) = outcome.warning {
            report.record_warning(warning);
        }
    }
    for failure in &discovery.failures {
        report.record_failure(failure.clone());
    }

    let aggregate = GeneratedArtifact::new(
        &options.header,
        emit::render_aggregate(
            &discovery.include_block,
            &emitted_names,
            discovery.base.block_text(&header_src),
            &conventions,
        ),
    );
    report.aggregate_path = Some(aggregate.path.display().to_string());

    if !options.dry_run {
        io::ensure_dir(&options.header_out)?;
        io::ensure_dir(&options.source_out)?;
        for artifact in &artifacts {
            io::write_file(&artifact.path, &artifact.content)?;
        }
        io::write_file(&aggregate.path, &aggregate.content)?;
    }

    Ok(report)
}

fn extract_one(
    span: &TypeSpan,
    header_src: &AggregateSource,
    source_src: &AggregateSource,
    discovery: &Discovery,
    conventions: &Conventions,
    options: &SplitOptions,
) -> TypeOutcome {
    let body = span.body_text(header_src);
    let parts = match extract::decompose(body, &span.name, conventions) {
        Ok(parts) => parts,
        Err(error) => {
            return TypeOutcome {
                type_name: span.name.clone(),
                result: Err(error),
                warning: None,
            }
        }
    };

    let implementation = extract::locate_implementation(source_src, &span.name, conventions);
    let warning = implementation
        .is_missing()
        .then(|| SplitError::MissingImplementation {
            type_name: span.name.clone(),
        });

    let header_artifact = GeneratedArtifact::new(
        options
            .header_out
            .join(format!("{}.{}", span.name, conventions.header_ext)),
        emit::render_header(&span.name, &parts, &discovery.include_block, conventions),
    );
    let source_artifact = GeneratedArtifact::new(
        options
            .source_out
            .join(format!("{}.{}", span.name, conventions.source_ext)),
        emit::render_source(&span.name, &implementation, conventions),
    );

    TypeOutcome {
        type_name: span.name.clone(),
        result: Ok((header_artifact, source_artifact)),
        warning,
    }
}

fn configure_thread_pool(jobs: usize) {
    if jobs > 0 {
        if let Err(error) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            log::debug!("thread pool already configured: {error}");
        }
    }
}
