use crate::config::{load_config, load_config_from, VarmapConfig};
use crate::ingest::Session;
use crate::pipeline::{default_stats_path, RunSummary};
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub events: PathBuf,
    pub output: PathBuf,
    pub stats: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_parallel: bool,
    pub pretty: bool,
}

impl AnalyzeConfig {
    fn resolve_config(&self) -> Result<VarmapConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)?,
            None => load_config(),
        };
        if self.no_parallel {
            config.detection.parallel = false;
        }
        if self.pretty {
            config.output.pretty = true;
        }
        Ok(config)
    }
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<RunSummary> {
    let varmap_config = config.resolve_config()?;
    let stats_path = config
        .stats
        .clone()
        .unwrap_or_else(|| default_stats_path(&config.output));

    let mut session = Session::in_memory(varmap_config);
    session
        .ingest_file(&config.events)
        .with_context(|| format!("Failed to ingest {}", config.events.display()))?;

    let summary = session.run_detection_and_export(&config.output, &stats_path)?;
    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.statistics;
    let ingest = &summary.ingest;

    println!("{}", "Variability analysis".bold());
    println!(
        "  events: {} accepted, {} rejected",
        ingest.accepted.to_string().green(),
        if ingest.rejected > 0 {
            ingest.rejected.to_string().yellow()
        } else {
            ingest.rejected.to_string().normal()
        }
    );
    println!(
        "  graph: {} entities, {} relationships ({} inheritance), {} corrected links",
        summary.nodes, summary.relationships, summary.inheritance_links,
        ingest.corrected_inheritance_links
    );
    println!(
        "  patterns: {} strategy, {} factory, {} decorator",
        summary.passes.patterns.strategy,
        summary.passes.patterns.factory,
        summary.passes.patterns.decorator
    );
    println!(
        "  {} {} (class level {}, method level {})",
        "VPs:".bright_cyan().bold(),
        stats.vps,
        stats.class_level_vps,
        stats.method_level_vps
    );
    println!(
        "  {} {} (class level {}, method level {})",
        "variants:".bright_cyan().bold(),
        stats.variants,
        stats.class_level_variants,
        stats.method_level_variants
    );
    println!(
        "  wrote {} and {}",
        summary.graph_path.display(),
        summary.stats_path.display()
    );
}
