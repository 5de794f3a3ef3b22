use fake_hierarchy::FakeHierarchy;
use hierarchy_core::export::{ExportIssue, export_hierarchy};
use hierarchy_core::lookup::LookupFile;
use hierarchy_core::model::NodeKind::{Asset, FunctionalLocation, InspectionPoint};

mod fake_hierarchy;

fn two_rooms() -> FakeHierarchy {
    FakeHierarchy::new()
        .with_child("S1", "F1", "Server Room", FunctionalLocation)
        .with_child("S1", "F2", "Hot Room", FunctionalLocation)
        .with_child("F1", "A1", "Rack 1", Asset)
        .with_child("F1", "A2", "Rack 2", Asset)
        .with_child("A1", "P1", "Temperature", InspectionPoint)
        .with_child("A1", "P2", "Gas", InspectionPoint)
        .with_child("A2", "P3", "Humidity", InspectionPoint)
        .with_child("F2", "A3", "Boiler", Asset)
}

#[tokio::test]
async fn test_export_records_every_level() {
    let mut client = two_rooms();

    let report = export_hierarchy(&mut client, "S1").await;

    assert!(report.is_complete(), "unexpected issues: {:?}", report.issues);

    let table = serde_json::to_value(&report.table).unwrap();
    assert_eq!(
        table,
        serde_json::json!({
            "server_room": {
                "rack_1": {
                    "__location_id__": "F1",
                    "__asset_id__": "A1",
                    "temperature": "P1",
                    "gas": "P2"
                },
                "rack_2": {
                    "__location_id__": "F1",
                    "__asset_id__": "A2",
                    "humidity": "P3"
                }
            },
            "hot_room": {
                "boiler": {
                    "__location_id__": "F2",
                    "__asset_id__": "A3"
                }
            }
        })
    );
}

#[tokio::test]
async fn test_export_descends_before_next_sibling() {
    let mut client = two_rooms();

    export_hierarchy(&mut client, "S1").await;

    assert_eq!(
        client.fetches,
        vec!["S1", "F1", "A1", "P1", "P2", "A2", "P3", "F2", "A3"]
    );
}

#[tokio::test]
async fn test_export_of_leaf_root_is_empty() {
    let mut client = FakeHierarchy::new();

    let report = export_hierarchy(&mut client, "S1").await;

    assert!(report.is_complete());
    assert!(report.table.is_empty());
    assert_eq!(client.fetches, vec!["S1"]);
}

#[tokio::test]
async fn test_export_keeps_functional_location_without_assets() {
    let mut client =
        FakeHierarchy::new().with_child("S1", "F1", "Empty Room", FunctionalLocation);

    let report = export_hierarchy(&mut client, "S1").await;

    let assets = report.table.functional_location("empty_room").unwrap();
    assert!(assets.is_empty());
    assert_eq!(report.table.location_id("empty_room"), None);
}

#[tokio::test]
async fn test_export_continues_after_fetch_failure() {
    let mut client = two_rooms().failing_fetch("A1");

    let report = export_hierarchy(&mut client, "S1").await;

    assert_eq!(report.issues.len(), 1);
    match &report.issues[0] {
        ExportIssue::FetchFailed { node_id, .. } => assert_eq!(node_id, "A1"),
        other => panic!("expected a fetch failure, got {other:?}"),
    }

    // The asset itself was recorded by its parent, only its points are missing.
    let rack_1 = report.table.asset("server_room", "rack_1").unwrap();
    assert_eq!(rack_1.len(), 2);

    // Siblings and the rest of the tree are still exported.
    assert!(report.table.contains_asset("server_room", "rack_2"));
    assert!(report.table.contains_asset("hot_room", "boiler"));
    assert_eq!(
        report.table.asset("server_room", "rack_2").unwrap()["humidity"],
        "P3"
    );
}

#[tokio::test]
async fn test_export_with_failing_root_is_empty() {
    let mut client = two_rooms().failing_fetch("S1");

    let report = export_hierarchy(&mut client, "S1").await;

    assert!(report.table.is_empty());
    assert!(!report.is_complete());
    assert_eq!(client.fetches, vec!["S1"]);
}

#[tokio::test]
async fn test_export_reports_orphans_instead_of_empty_keys() {
    let mut client = FakeHierarchy::new()
        .with_child("S1", "A0", "Loose Pump", Asset)
        .with_child("A0", "P0", "Vibration", InspectionPoint)
        .with_child("S1", "F1", "Server Room", FunctionalLocation)
        .with_child("F1", "P9", "Door Sensor", InspectionPoint);

    let report = export_hierarchy(&mut client, "S1").await;

    let orphans: Vec<_> = report
        .issues
        .iter()
        .map(|issue| match issue {
            ExportIssue::Orphaned { id, missing, .. } => (id.as_str(), *missing),
            other => panic!("expected only orphans, got {other:?}"),
        })
        .collect();

    assert_eq!(
        orphans,
        vec![
            ("A0", "functional location"),
            ("P0", "functional location"),
            ("P9", "asset"),
        ]
    );

    assert!(report.table.functional_location("").is_none());
    assert_eq!(report.table.len(), 1);
    assert!(report.table.functional_location("server_room").unwrap().is_empty());
}

#[tokio::test]
async fn test_export_context_accumulates_across_siblings() {
    // A point listed right after an asset sibling belongs to that asset.
    let mut client = FakeHierarchy::new()
        .with_child("S1", "F1", "Server Room", FunctionalLocation)
        .with_child("F1", "A1", "Rack 1", Asset)
        .with_child("F1", "P1", "Door Sensor", InspectionPoint);

    let report = export_hierarchy(&mut client, "S1").await;

    assert!(report.is_complete());
    assert_eq!(
        report.table.asset("server_room", "rack_1").unwrap()["door_sensor"],
        "P1"
    );
}

#[tokio::test]
async fn test_exported_table_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = LookupFile::new(dir.path().join("config.json"));
    let mut client = two_rooms();

    let report = export_hierarchy(&mut client, "S1").await;
    file.save(&report.table).unwrap();

    assert_eq!(file.load().unwrap(), report.table);
}
