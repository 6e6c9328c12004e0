//! Cascades over the checked-in basin model.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::model_fixtures::read_fixture;
use hydronet::document::DocumentModel;
use hydronet::entity::SlotPosition;
use serde_json::json;

fn basin() -> DocumentModel {
    DocumentModel::from_value(read_fixture("valid", "basin.json")).unwrap()
}

#[test]
fn renaming_reservoir_updates_every_node_reference() {
    let mut model = basin();
    let changes = model.nodes_mut().rename("reservoir", "main_reservoir").unwrap();

    let root = model.root();
    assert_eq!(root["parameters"]["reservoir_cost"]["storage_node"], "main_reservoir");
    assert_eq!(root["recorders"]["storage_rec"]["node"], "main_reservoir");
    assert_eq!(root["nodes"][5]["storage_nodes"], json!(["main_reservoir"]));
    assert_eq!(
        root["edges"],
        json!([
            ["catchment", "main_reservoir"],
            ["main_reservoir", "works"],
            ["works", "town"],
            ["main_reservoir", "spill"]
        ])
    );
    // Renamed + 3 references + 3 edges
    assert_eq!(changes.len(), 7);
    assert_eq!(model.log().entries().len(), 7);
    assert_eq!(model.nodes().is_used("reservoir"), 0);
}

#[test]
fn renaming_a_node_leaves_unscoped_strings() {
    let mut model = basin();
    model.nodes_mut().rename("catchment", "upland").unwrap();

    let root = model.root();
    assert_eq!(root["edges"][0], json!(["upland", "reservoir"]));
    assert_eq!(root["parameters"]["inflow"]["column"], "catchment");
    assert_eq!(root["nodes"][0]["type"], "catchment");
}

#[test]
fn renaming_a_table_follows_table_keys_only() {
    let mut model = basin();
    model.tables_mut().rename("flows", "inflows").unwrap();

    assert!(model.tables().exists("inflows"));
    assert_eq!(model.root()["parameters"]["inflow"]["table"], "inflows");
    assert_eq!(model.root()["tables"]["inflows"]["url"], "flows.csv");
}

#[test]
fn renaming_a_parameter_rewrites_node_fields() {
    let mut model = basin();
    model.parameters_mut().rename("demand", "town_demand").unwrap();

    assert_eq!(model.root()["nodes"][3]["max_flow"], "town_demand");
    assert_eq!(
        model.parameters().names().get_index(4).copied(),
        Some("town_demand")
    );
    assert_eq!(model.parameters().is_used("town_demand"), 1);
}

#[test]
fn deleting_reservoir_drops_its_edges_and_orphans_the_rest() {
    let mut model = basin();
    let changes = model.nodes_mut().delete("reservoir");
    assert_eq!(changes.len(), 4);
    assert_eq!(
        model.root()["edges"],
        json!([["works", "town"]])
    );
    assert_eq!(
        model.nodes().orphans(),
        Some(vec!["catchment".to_string(), "spill".to_string()])
    );
}

#[test]
fn editing_through_the_form_keeps_schematic_position() {
    let mut model = basin();
    model
        .nodes_mut()
        .update(
            "reservoir",
            json!({"name": "reservoir", "type": "storage", "max_volume": 2500, "initial_volume": 1500}),
        )
        .unwrap();

    let reservoir = model.nodes().get("reservoir").unwrap();
    assert_eq!(reservoir["max_volume"], 2500);
    assert_eq!(reservoir["position"]["schematic"], json!([50, 20]));
    assert_eq!(reservoir["position"]["node_style"], "round");
    assert!(reservoir.get("cost").is_none());
}

#[test]
fn edge_slots_on_the_basin() {
    let mut model = basin();
    model
        .edges_mut()
        .set_slot("reservoir", "spill", SlotPosition::Target, &json!("overflow"));
    assert_eq!(
        model.root()["edges"][3],
        json!(["reservoir", "spill", null, "overflow"])
    );
    model
        .edges_mut()
        .set_slot("reservoir", "spill", SlotPosition::Target, &json!(null));
    assert_eq!(model.root()["edges"][3], json!(["reservoir", "spill"]));
    assert_eq!(model.log().entries().len(), 2);
}
