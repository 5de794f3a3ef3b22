//! # Hierarchy Model
//!
//! Domain representation of the nodes exchanged with the hierarchy service.
//!
//! The wire messages in [`crate::grpc::pb`] carry the node type as free-form strings and
//! the type-specific attributes as optional sub-messages. This module turns them into
//! typed values ([`Node`], [`NodeKind`], [`NodeAttributes`]) and back, so the exporter and
//! the seeder never deal with raw tags.
use crate::grpc::pb;
use std::fmt;

/// The type tag of a node in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Site,
    FunctionalLocation,
    Asset,
    InspectionPoint,
    /// Any type tag these tools do not know about.
    Other(String),
}

impl NodeKind {
    /// Returns the wire tag of this kind (e.g. `functional_location`).
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Site => "site",
            NodeKind::FunctionalLocation => "functional_location",
            NodeKind::Asset => "asset",
            NodeKind::InspectionPoint => "inspection_point",
            NodeKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "site" => NodeKind::Site,
            "functional_location" => NodeKind::FunctionalLocation,
            "asset" => NodeKind::Asset,
            "inspection_point" => NodeKind::InspectionPoint,
            other => NodeKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criticality of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Criticality {
    A,
    B,
    #[default]
    C,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::A => "criticality_a",
            Criticality::B => "criticality_b",
            Criticality::C => "criticality_c",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "criticality_a" => Some(Criticality::A),
            "criticality_b" => Some(Criticality::B),
            "criticality_c" => Some(Criticality::C),
            _ => None,
        }
    }
}

/// How the measurements of an inspection point are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    Numeric,
    SingleChoice,
    MultiChoice,
}

impl ValueType {
    /// The numeric code of this value type on the wire.
    pub fn code(&self) -> i32 {
        pb::ValueType::from(*self) as i32
    }
}

impl From<ValueType> for pb::ValueType {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Numeric => pb::ValueType::Numeric,
            ValueType::SingleChoice => pb::ValueType::SingleChoice,
            ValueType::MultiChoice => pb::ValueType::MultiChoice,
        }
    }
}

impl From<pb::ValueType> for ValueType {
    fn from(value: pb::ValueType) -> Self {
        match value {
            pb::ValueType::Numeric => ValueType::Numeric,
            pb::ValueType::SingleChoice => ValueType::SingleChoice,
            pb::ValueType::MultiChoice => ValueType::MultiChoice,
        }
    }
}

/// Type-specific attributes of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeAttributes {
    #[default]
    None,
    Asset {
        /// `None` when the service returned a tag these tools do not know.
        criticality: Option<Criticality>,
    },
    InspectionPoint {
        value_type: ValueType,
        unit: String,
    },
}

/// A node as returned by the hierarchy service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub parent_id: String,
    pub label: String,
    pub kind: NodeKind,
    pub attributes: NodeAttributes,
}

/// A node to be created under some parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub label: String,
    pub kind: NodeKind,
    pub attributes: NodeAttributes,
}

impl NewNode {
    pub fn functional_location(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::FunctionalLocation,
            attributes: NodeAttributes::None,
        }
    }

    pub fn asset(label: impl Into<String>, criticality: Criticality) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Asset,
            attributes: NodeAttributes::Asset {
                criticality: Some(criticality),
            },
        }
    }

    pub fn inspection_point(
        label: impl Into<String>,
        unit: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::InspectionPoint,
            attributes: NodeAttributes::InspectionPoint {
                value_type,
                unit: unit.into(),
            },
        }
    }
}

impl From<pb::Node> for Node {
    fn from(node: pb::Node) -> Self {
        let kind = NodeKind::from(node.r#type.as_str());

        let attributes = match (&kind, node.asset_node, node.inspection_point) {
            (NodeKind::Asset, Some(asset), _) => NodeAttributes::Asset {
                criticality: Criticality::parse(&asset.criticality),
            },
            (NodeKind::InspectionPoint, _, Some(point)) => NodeAttributes::InspectionPoint {
                value_type: ValueType::from(point.value_type()),
                unit: point.numeric_unit,
            },
            _ => NodeAttributes::None,
        };

        Self {
            id: node.id,
            parent_id: node.parent_id,
            label: node.label,
            kind,
            attributes,
        }
    }
}

impl From<NewNode> for pb::Node {
    fn from(node: NewNode) -> Self {
        let tag = node.kind.as_str().to_string();

        let (asset_node, inspection_point) = match node.attributes {
            NodeAttributes::None => (None, None),
            NodeAttributes::Asset { criticality } => (
                Some(pb::AssetNode {
                    criticality: criticality.unwrap_or_default().as_str().to_string(),
                }),
                None,
            ),
            NodeAttributes::InspectionPoint { value_type, unit } => (
                None,
                Some(pb::InspectionPoint {
                    value_type: value_type.code(),
                    numeric_unit: unit,
                }),
            ),
        };

        pb::Node {
            label: node.label,
            sub_type: tag.clone(),
            r#type: tag,
            asset_node,
            inspection_point,
            ..Default::default()
        }
    }
}
