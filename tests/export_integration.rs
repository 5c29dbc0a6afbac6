//! Graph and statistics documents written by a full run.

use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use varmap::{default_stats_path, GraphDocument, Session, Statistics, VarmapConfig};

const SHAPES: &str = indoc! {r#"
    {"event":"entity","name":"shapes.Shape","kind":"INTERFACE"}
    {"event":"entity","name":"shapes.Circle","kind":"CLASS"}
    {"event":"entity","name":"shapes.Square","kind":"CLASS"}
    {"event":"edge","from":"shapes.Shape","to":"shapes.Circle","kind":"IMPLEMENTS"}
    {"event":"edge","from":"shapes.Shape","to":"shapes.Square","kind":"IMPLEMENTS"}
    {"event":"edge","from":"java.io.Serializable","to":"shapes.Circle","kind":"IMPLEMENTS"}
    {"event":"entity","name":"shapes.Canvas","kind":"CLASS"}
    {"event":"member","owner":"shapes.Canvas","name":"Canvas","kind":"CONSTRUCTOR"}
    {"event":"member","owner":"shapes.Canvas","name":"Canvas","kind":"CONSTRUCTOR"}
    {"event":"member","owner":"shapes.Canvas","name":"draw","kind":"METHOD"}
    {"event":"member","owner":"shapes.Canvas","name":"draw","kind":"METHOD"}
    {"event":"attribute","owner":"shapes.Canvas","name":"current","declared_type":"shapes.Shape"}
"#};

fn run(dir: &Path) -> (GraphDocument, Statistics) {
    let events = dir.join("events.jsonl");
    fs::write(&events, SHAPES).unwrap();
    let graph_path = dir.join("out").join("shapes.json");
    let stats_path = default_stats_path(&graph_path);

    let mut session = Session::in_memory(VarmapConfig::default());
    session.ingest_file(&events).unwrap();
    let summary = session
        .run_detection_and_export(&graph_path, &stats_path)
        .unwrap();
    assert_eq!(summary.ingest.rejected, 0);
    assert_eq!(summary.passes.patterns.strategy, 1);

    let graph = serde_json::from_str(&fs::read_to_string(&graph_path).unwrap()).unwrap();
    let stats = serde_json::from_str(&fs::read_to_string(&stats_path).unwrap()).unwrap();
    (graph, stats)
}

#[test]
fn test_graph_document_contents() {
    let dir = TempDir::new().unwrap();
    let (graph, _) = run(dir.path());

    let names: Vec<_> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["shapes.Shape", "shapes.Circle", "shapes.Square", "shapes.Canvas"]
    );

    let shape = &graph.nodes[0];
    assert_eq!(shape.types, vec!["INTERFACE", "VP", "STRATEGY"]);
    assert_eq!(shape.class_variants, 2);

    let canvas = &graph.nodes[3];
    assert_eq!(canvas.types, vec!["CLASS", "METHOD_LEVEL_VP"]);
    assert_eq!(canvas.method_vps, 1);
    assert_eq!(canvas.constructor_variants, 2);

    let links: Vec<_> = graph
        .links
        .iter()
        .map(|l| (l.source.as_str(), l.target.as_str(), l.kind.as_str()))
        .collect();
    assert_eq!(
        links,
        vec![
            ("shapes.Shape", "shapes.Circle", "IMPLEMENTS"),
            ("shapes.Shape", "shapes.Square", "IMPLEMENTS"),
        ]
    );
}

#[test]
fn test_out_of_scope_supertypes_never_exported() {
    let dir = TempDir::new().unwrap();
    let (graph, _) = run(dir.path());

    assert!(graph
        .nodes
        .iter()
        .all(|node| node.name != "java.io.Serializable"));
    assert!(graph
        .links
        .iter()
        .all(|link| link.source != "java.io.Serializable"));
}

#[test]
fn test_statistics_document() {
    let dir = TempDir::new().unwrap();
    let (_, stats) = run(dir.path());

    assert_eq!(
        stats,
        Statistics {
            vps: 3,
            methods_vps: 1,
            constructors_vps: 1,
            method_level_vps: 2,
            class_level_vps: 1,
            variants: 6,
            methods_variants: 2,
            constructors_variants: 2,
            method_level_variants: 4,
            class_level_variants: 2,
        }
    );
}

#[test]
fn test_statistics_use_the_external_field_names() {
    let dir = TempDir::new().unwrap();
    run(dir.path());

    let raw: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("out").join("shapes-stats.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(raw["VPs"], 3);
    assert_eq!(raw["methodLevelVPs"], 2);
    assert_eq!(raw["classLevelVariants"], 2);
}

#[test]
fn test_rerunning_export_is_stable() {
    let dir = TempDir::new().unwrap();
    let events = dir.path().join("events.jsonl");
    fs::write(&events, SHAPES).unwrap();
    let graph_path = dir.path().join("graph.json");
    let stats_path = dir.path().join("stats.json");

    let mut session = Session::in_memory(VarmapConfig::default());
    session.ingest_file(&events).unwrap();
    session
        .run_detection_and_export(&graph_path, &stats_path)
        .unwrap();
    let first = fs::read_to_string(&graph_path).unwrap();
    session
        .run_detection_and_export(&graph_path, &stats_path)
        .unwrap();

    assert_eq!(first, fs::read_to_string(&graph_path).unwrap());
}
