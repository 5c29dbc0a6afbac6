//! Analysis pipeline: detection, counters, labeling, export
//!
//! The passes depend on each other in a fixed order. Pattern detectors only
//! read the graph, so they run together and their tags are applied at a
//! single point; counters come next, and labeling reads both.

use crate::errors::VarmapError;
use crate::graph::GraphStore;
use crate::inference::infer_abstract_classes;
use crate::ingest::{IngestReport, Session};
use crate::io::{write_json_atomic, GraphDocument, Statistics};
use crate::labeling::{apply_labels, LabelCounts};
use crate::metrics::compute_counters;
use crate::patterns::{apply_matches, PatternCounts, PatternDetector};
use crate::resilience::with_retry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Figures produced by one run of the analysis passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub inferred_abstract: usize,
    pub patterns: PatternCounts,
    pub labels: LabelCounts,
}

/// Everything a caller may want to report about a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub statistics: Statistics,
    pub ingest: IngestReport,
    pub passes: PassSummary,
    pub nodes: usize,
    pub relationships: usize,
    pub inheritance_links: usize,
    pub exported_nodes: usize,
    pub exported_links: usize,
    pub graph_path: PathBuf,
    pub stats_path: PathBuf,
}

/// `graph.json` -> `graph-stats.json`, next to the graph document
pub fn default_stats_path(graph_path: &Path) -> PathBuf {
    let file_name = graph_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph.json".to_string());
    let stem = file_name.strip_suffix(".json").unwrap_or(&file_name);
    graph_path.with_file_name(format!("{}-stats.json", stem))
}

impl<S: GraphStore> Session<S> {
    /// Run inference, pattern detection, counters and labeling over the
    /// ingested graph. Safe to call repeatedly.
    pub fn run_passes(&mut self) -> Result<PassSummary, VarmapError> {
        with_retry(&self.config.retry, "ensure_available", || {
            self.store.ensure_available()
        })?;

        let detection = &self.config.detection;
        let graph = self.store.graph_mut();
        let mut summary = PassSummary::default();

        if detection.infer_abstract {
            summary.inferred_abstract = infer_abstract_classes(graph);
        }

        let detector = PatternDetector::from_config(detection);
        let start = Instant::now();
        let matches = detector.detect_all_patterns(graph);
        summary.patterns = apply_matches(graph, &matches);
        info!(
            strategy = summary.patterns.strategy,
            factory = summary.patterns.factory,
            decorator = summary.patterns.decorator,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "pattern detection complete"
        );

        compute_counters(graph);
        summary.labels = apply_labels(graph);
        info!(
            vps = summary.labels.variation_points,
            variants = summary.labels.variants,
            method_level_vps = summary.labels.method_level_vps,
            "labeling complete"
        );

        Ok(summary)
    }

    /// Run every pass, then write the graph document to `graph_path` and the
    /// statistics document to `stats_path`.
    pub fn run_detection_and_export(
        &mut self,
        graph_path: &Path,
        stats_path: &Path,
    ) -> Result<RunSummary, VarmapError> {
        let passes = self.run_passes()?;

        let graph = self.store.graph();
        let document = GraphDocument::from_graph(graph);
        let statistics = Statistics::from_graph(graph);
        let pretty = self.config.output.pretty;

        write_json_atomic(graph_path, &document, pretty)?;
        write_json_atomic(stats_path, &statistics, pretty)?;

        let summary = RunSummary {
            statistics,
            ingest: self.report,
            passes,
            nodes: graph.node_count(),
            relationships: graph.relationship_count(),
            inheritance_links: graph.inheritance_count(),
            exported_nodes: document.nodes.len(),
            exported_links: document.links.len(),
            graph_path: graph_path.to_path_buf(),
            stats_path: stats_path.to_path_buf(),
        };

        info!(
            nodes = summary.nodes,
            relationships = summary.relationships,
            inheritance_links = summary.inheritance_links,
            corrected_links = summary.ingest.corrected_inheritance_links,
            vps = summary.statistics.vps,
            variants = summary.statistics.variants,
            graph = %graph_path.display(),
            stats = %stats_path.display(),
            "variability analysis exported"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_path() {
        assert_eq!(
            default_stats_path(Path::new("out/db.json")),
            PathBuf::from("out/db-stats.json")
        );
        assert_eq!(
            default_stats_path(Path::new("graph")),
            PathBuf::from("graph-stats.json")
        );
    }
}
