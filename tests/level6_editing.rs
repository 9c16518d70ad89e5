//! Level 6: Editing and Export Tests
//!
//! Tests renames, parameter edits, drop payloads, unavailable kinds and the
//! export snapshot.

mod common;

use common::harness::CanvasHarness;
use layer_canvas::{
    CanvasConfig, Connection, GraphExport, HitTarget, NodeKind, ParamValue, Point,
};
use serde_json::json;

// ============================================================================
// Rename
// ============================================================================

#[test]
fn test_rename_rewrites_connections() {
    let mut harness = CanvasHarness::new();
    let a = harness.add(NodeKind::Input, 0.0, 0.0);
    let b = harness.add(NodeKind::Linear, 400.0, 0.0);
    let c = harness.add(NodeKind::Output, 800.0, 0.0);
    harness.connect(&a, &b);
    harness.connect(&b, &c);

    assert!(harness.ctrl.rename_node(&b, "hidden"));

    assert!(!harness.ctrl.graph().contains(&b));
    assert_eq!(
        harness.ctrl.graph().connections(),
        &[Connection::new(&a, "hidden"), Connection::new("hidden", &c)]
    );
}

#[test]
fn test_rename_trims_and_follows_selection() {
    let (mut harness, a, _) = CanvasHarness::with_two_nodes();
    harness.click_node(&a);

    assert!(harness.ctrl.rename_node(&a, "  features  "));

    assert!(harness.ctrl.graph().contains("features"));
    assert_eq!(harness.ctrl.selected(), Some("features"));
}

#[test]
fn test_rename_to_empty_is_rejected() {
    let (mut harness, a, _) = CanvasHarness::with_two_nodes();

    assert!(!harness.ctrl.rename_node(&a, ""));
    assert!(!harness.ctrl.rename_node(&a, "   "));

    assert!(harness.ctrl.graph().contains(&a));
}

#[test]
fn test_rename_to_existing_id_is_rejected() {
    let (mut harness, a, b) = CanvasHarness::with_two_nodes();
    harness.connect(&a, &b);

    assert!(!harness.ctrl.rename_node(&a, &b));

    assert!(harness.ctrl.graph().contains(&a));
    assert!(harness.ctrl.graph().has_connection(&a, &b));
}

#[test]
fn test_rename_to_same_id_is_accepted() {
    let (mut harness, a, _) = CanvasHarness::with_two_nodes();
    assert!(harness.ctrl.rename_node(&a, &a));
    assert!(harness.ctrl.graph().contains(&a));
}

#[test]
fn test_renamed_snap_target_still_connects() {
    let (mut harness, a, b) = CanvasHarness::with_two_nodes();
    let end = harness.input_handle(&b);
    harness.press(harness.output_handle(&a), HitTarget::OutputHandle(a.clone()));
    harness.move_to(end);

    assert!(harness.ctrl.rename_node(&b, "head"));
    assert_eq!(harness.ctrl.snap_target(), Some("head"));
    harness.release(end, HitTarget::InputHandle("head".into()));

    assert!(harness.ctrl.graph().has_connection(&a, "head"));
}

// ============================================================================
// Parameter edits
// ============================================================================

#[test]
fn test_numeric_edit_becomes_number() {
    let mut harness = CanvasHarness::new();
    let id = harness.add(NodeKind::Linear, 0.0, 0.0);

    assert!(harness.ctrl.update_parameter(&id, "outputSize", "128"));

    assert_eq!(harness.node(&id).parameters["outputSize"], ParamValue::Number(128.0));
}

#[test]
fn test_shape_edit_becomes_sequence() {
    let mut harness = CanvasHarness::new();
    let id = harness.add(NodeKind::Input, 0.0, 0.0);

    assert!(harness.ctrl.update_parameter(&id, "inputShape", "3, 224, abc, 224"));

    assert_eq!(
        harness.node(&id).parameters["inputShape"],
        ParamValue::Sequence(vec![3.0, 224.0, 224.0])
    );
}

#[test]
fn test_text_edit_stays_text() {
    let mut harness = CanvasHarness::new();
    let id = harness.add(NodeKind::Conv2d, 0.0, 0.0);

    assert!(harness.ctrl.update_parameter(&id, "activationFunction", "gelu"));

    assert_eq!(
        harness.node(&id).parameters["activationFunction"],
        ParamValue::Text("gelu".into())
    );
}

#[test]
fn test_flag_edit_stays_flag() {
    let mut harness = CanvasHarness::new();
    let id = harness.add(NodeKind::Linear, 0.0, 0.0);

    assert!(harness.ctrl.update_parameter(&id, "bias", "false"));

    assert_eq!(harness.node(&id).parameters["bias"], ParamValue::Flag(false));
}

#[test]
fn test_edit_of_unknown_node_is_noop() {
    let (mut harness, _, _) = CanvasHarness::with_two_nodes();
    let before = harness.ctrl.export();

    assert!(!harness.ctrl.update_parameter("ghost", "outputSize", "1"));

    assert_eq!(harness.ctrl.export(), before);
}

// ============================================================================
// Drops
// ============================================================================

#[test]
fn test_drop_accepts_short_kind_names() {
    let mut harness = CanvasHarness::new();
    let id = harness
        .ctrl
        .handle_drop(r#"{"kind":"max-pool"}"#, Point::new(60.0, 50.0))
        .unwrap();
    assert_eq!(harness.node(&id).kind, NodeKind::MaxPool);
    assert_eq!(harness.position(&id), Point::ORIGIN);
}

#[test]
fn test_malformed_drops_leave_graph_untouched() {
    let mut harness = CanvasHarness::new();
    for raw in ["", "[]", "{\"type\": 3}", "{\"type\":\"GRULayer\"}", "{\"id\":\"x\"}"] {
        assert!(harness.ctrl.handle_drop(raw, Point::new(100.0, 100.0)).is_none());
    }
    assert!(harness.ctrl.graph().is_empty());
    assert!(harness.ctrl.mode().is_idle());
}

#[test]
fn test_unavailable_kinds_are_refused() {
    let mut harness = CanvasHarness::with_config(CanvasConfig {
        disabled_kinds: vec![
            NodeKind::Conv2d,
            NodeKind::MaxPool,
            NodeKind::Flatten,
            NodeKind::Concat,
        ],
        ..CanvasConfig::default()
    });

    for tag in ["Conv2DLayer", "MaxPoolLayer", "FlattenLayer", "ConcatLayer"] {
        let raw = format!(r#"{{"type":"{}"}}"#, tag);
        assert!(harness.ctrl.handle_drop(&raw, Point::ORIGIN).is_none());
    }
    for tag in ["InputLayer", "LinearLayer", "OutputLayer"] {
        let raw = format!(r#"{{"type":"{}"}}"#, tag);
        assert!(harness.ctrl.handle_drop(&raw, Point::ORIGIN).is_some());
    }
    assert_eq!(harness.ctrl.graph().len(), 3);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_scenario() {
    let (mut harness, n1, n2) = CanvasHarness::with_two_nodes();

    harness.ctrl.toggle_connection(&n1, &n2);
    assert_eq!(
        harness.ctrl.export().connections,
        vec![Connection::new(&n1, &n2)]
    );

    harness.ctrl.toggle_connection(&n1, &n2);
    assert!(harness.ctrl.export().connections.is_empty());
}

#[test]
fn test_export_contains_no_interaction_state() {
    let (mut harness, a, b) = CanvasHarness::with_two_nodes();
    harness.connect(&a, &b);
    harness.click_node(&a);
    harness.press(harness.output_handle(&a), HitTarget::OutputHandle(a.clone()));
    harness.move_to(harness.input_handle(&b));

    let value = serde_json::to_value(harness.ctrl.export()).unwrap();

    assert_eq!(
        value,
        json!({
            "nodes": [
                {
                    "id": a,
                    "kind": "InputLayer",
                    "parameters": { "inputShape": [16.0] },
                    "position": { "x": 100.0, "y": 100.0 }
                },
                {
                    "id": b,
                    "kind": "OutputLayer",
                    "parameters": { "activationFunction": "softmax", "outputShape": [10.0] },
                    "position": { "x": 400.0, "y": 100.0 }
                }
            ],
            "connections": [{ "from": a, "to": b }]
        })
    );
}

#[test]
fn test_export_round_trips_through_json() {
    let (mut harness, a, b) = CanvasHarness::with_two_nodes();
    harness.connect(&a, &b);
    harness.ctrl.update_parameter(&a, "inputShape", "1, 28, 28");

    let export = harness.ctrl.export().with_metadata();
    let text = export.to_json_pretty().unwrap();
    let parsed: GraphExport = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, export);
    assert_eq!(parsed.metadata.unwrap().tool, "layer-canvas");
}
