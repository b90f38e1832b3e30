use anyhow::{Context, Result};
use scopehint_core::{
    CompletionEngine, CompletionRequest, Config, Flavor, Position, RankedResult, RuntimeSnapshot,
    runtime::LoadedRuntime,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::display::format_candidates;
use crate::utils::parse_filepath_with_position;

pub struct CompleteOptions {
    pub filepath: String,
    pub offset: Option<usize>,
    pub runtime: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub limit: Option<usize>,
    pub json: bool,
}

#[derive(Serialize)]
struct CompletionReport<'a> {
    file: &'a str,
    offset: usize,
    position: Position,
    total: usize,
    candidates: &'a [scopehint_core::Candidate],
}

pub fn complete_command(options: CompleteOptions) -> Result<()> {
    debug!("Completing in: {}", options.filepath);

    let (filepath, position) = parse_filepath_with_position(&options.filepath);
    let path = Path::new(&filepath);
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let offset = match (options.offset, position) {
        (Some(offset), _) => offset,
        (None, Some(position)) => position.to_offset(&source),
        (None, None) => source.len(),
    };

    let config = load_config(options.config.as_deref(), path)?;
    let runtime = options
        .runtime
        .as_deref()
        .map(load_runtime)
        .transpose()?;

    let flavor = if runtime.is_some() {
        Flavor::Script
    } else {
        Flavor::Markup
    };
    let engine = CompletionEngine::new(config, flavor);

    let mut request = CompletionRequest::new(&source, offset);
    if let Some(runtime) = &runtime {
        request = request.with_runtime(runtime.context());
    }
    let result = engine.rank(&request);

    if options.json {
        print_json(&filepath, &source, offset, &result, options.limit)?;
    } else {
        print_formatted(&filepath, &source, offset, &result, options.limit);
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>, file: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let start = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or(std::env::current_dir()?);
    Config::discover(&start).context("Failed to load discovered config")
}

fn load_runtime(path: &Path) -> Result<LoadedRuntime> {
    let snapshot = RuntimeSnapshot::load_from_file(path)
        .with_context(|| format!("Failed to read runtime snapshot {}", path.display()))?;
    snapshot
        .build()
        .with_context(|| format!("Invalid runtime snapshot {}", path.display()))
}

fn limited(result: &RankedResult, limit: Option<usize>) -> &[scopehint_core::Candidate] {
    let candidates = result.candidates();
    match limit {
        Some(limit) => &candidates[..limit.min(candidates.len())],
        None => candidates,
    }
}

fn print_json(
    filepath: &str,
    source: &str,
    offset: usize,
    result: &RankedResult,
    limit: Option<usize>,
) -> Result<()> {
    let report = CompletionReport {
        file: filepath,
        offset,
        position: Position::from_offset(source, offset),
        total: result.len(),
        candidates: limited(result, limit),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_formatted(
    filepath: &str,
    source: &str,
    offset: usize,
    result: &RankedResult,
    limit: Option<usize>,
) {
    let position = Position::from_offset(source, offset);
    println!(
        "🔍 Completing: {}:{}:{} (offset {})",
        filepath,
        position.line + 1,
        position.character + 1,
        offset
    );
    println!("{}", "=".repeat(80));

    if result.is_empty() {
        println!("\n❌ No completions at this position.");
        return;
    }

    let shown = limited(result, limit);
    for row in format_candidates(shown) {
        println!("{row}");
    }
    if shown.len() < result.len() {
        println!("   ... {} more", result.len() - shown.len());
    }
}
