use hierarchy_core::client::{HierarchyApi, HierarchyClient, RemoteCallError};
use hierarchy_core::grpc::pb::{self, hierarchy_server::HierarchyServer};
use hierarchy_core::model::{Criticality, NewNode, NodeAttributes, NodeKind, ValueType};
use hierarchy_service_impl::HierarchyServiceImpl;


fn wire_node(id: &str, label: &str, kind: &str) -> pb::Node {
    pb::Node {
        id: id.to_string(),
        label: label.to_string(),
        r#type: kind.to_string(),
        sub_type: kind.to_string(),
        parent_id: "A1".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_health_check() {
    let mut client = HierarchyClient::from_service(HierarchyServer::new(
        HierarchyServiceImpl::default(),
    ));

    client.health_check().await.unwrap();
}

#[tokio::test]
async fn test_list_children_maps_wire_nodes() {
    let gas = pb::Node {
        inspection_point: Some(pb::InspectionPoint {
            value_type: pb::ValueType::Numeric as i32,
            numeric_unit: "Ohm".to_string(),
        }),
        ..wire_node("P1", "Gas", "inspection_point")
    };
    let pump = pb::Node {
        asset_node: Some(pb::AssetNode {
            criticality: "criticality_a".to_string(),
        }),
        ..wire_node("A2", "Pump", "asset")
    };
    let service = HierarchyServiceImpl::default().with_children("A1", vec![gas, pump]);
    let mut client = HierarchyClient::from_service(HierarchyServer::new(service));

    let children = client.list_children("A1").await.unwrap();

    assert_eq!(children.len(), 2);

    assert_eq!(children[0].id, "P1");
    assert_eq!(children[0].parent_id, "A1");
    assert_eq!(children[0].label, "Gas");
    assert_eq!(children[0].kind, NodeKind::InspectionPoint);
    assert_eq!(
        children[0].attributes,
        NodeAttributes::InspectionPoint {
            value_type: ValueType::Numeric,
            unit: "Ohm".to_string(),
        }
    );

    assert_eq!(children[1].kind, NodeKind::Asset);
    assert_eq!(
        children[1].attributes,
        NodeAttributes::Asset {
            criticality: Some(Criticality::A)
        }
    );
}

#[tokio::test]
async fn test_list_children_of_unknown_node_is_a_status_error() {
    let mut client = HierarchyClient::from_service(HierarchyServer::new(
        HierarchyServiceImpl::default(),
    ));

    match client.list_children("X1").await {
        Err(RemoteCallError::Status(status)) => {
            assert_eq!(status.code(), tonic::Code::NotFound);
            assert_eq!(status.message(), "node X1 not found");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_inspection_point_sends_every_field() {
    let service = HierarchyServiceImpl::default();
    let saved = service.saved.clone();
    let mut client = HierarchyClient::from_service(HierarchyServer::new(service));

    let node = NewNode::inspection_point("Pressure", "hPa", ValueType::Numeric);
    let id = client.create_node(node, "A1", "system-user").await.unwrap();

    assert_eq!(id, "N1");

    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);

    let input = &saved[0];
    assert_eq!(input.parent_id, "A1");
    assert_eq!(input.user_id, "system-user");

    let node = input.node.as_ref().unwrap();
    assert_eq!(node.label, "Pressure");
    assert_eq!(node.r#type, "inspection_point");
    assert_eq!(node.sub_type, "inspection_point");
    assert!(node.id.is_empty());
    assert!(node.asset_node.is_none());

    let point = node.inspection_point.as_ref().unwrap();
    assert_eq!(point.numeric_unit, "hPa");
    assert_eq!(point.value_type, 0);
}

#[tokio::test]
async fn test_create_asset_sends_criticality() {
    let service = HierarchyServiceImpl::default();
    let saved = service.saved.clone();
    let mut client = HierarchyClient::from_service(HierarchyServer::new(service));

    let node = NewNode::asset("Rack 1", Criticality::C);
    client.create_node(node, "F1", "system-user").await.unwrap();

    let saved = saved.lock().unwrap();
    let node = saved[0].node.as_ref().unwrap();
    assert_eq!(saved[0].parent_id, "F1");
    assert_eq!(node.r#type, "asset");
    assert_eq!(node.sub_type, "asset");
    assert_eq!(
        node.asset_node.as_ref().unwrap().criticality,
        "criticality_c"
    );
    assert!(node.inspection_point.is_none());
}

#[tokio::test]
async fn test_create_node_with_empty_id_is_an_error() {
    let mut client = HierarchyClient::from_service(HierarchyServer::new(
        HierarchyServiceImpl::default(),
    ));

    let node = NewNode::functional_location("Nameless");
    let result = client.create_node(node, "S1", "system-user").await;

    assert!(matches!(
        result,
        Err(RemoteCallError::EmptyResponse("SaveNode"))
    ));
}
