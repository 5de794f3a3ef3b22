#![allow(dead_code)]

use hierarchy_core::client::{HierarchyApi, RemoteCallError};
use hierarchy_core::model::{NewNode, Node, NodeAttributes, NodeKind};
use std::collections::{HashMap, HashSet};

// An in-memory hierarchy service. Children are returned in insertion order and every call
// is recorded. Created ids are `F<n>`, `A<n>` and `P<n>` per kind; chosen calls can fail.
#[derive(Default)]
pub struct FakeHierarchy {
    children: HashMap<String, Vec<Node>>,
    failing_fetches: HashSet<String>,
    failing_creates: HashSet<String>,
    issued: HashMap<char, usize>,
    pub fetches: Vec<String>,
    pub creates: Vec<CreateCall>,
}

#[derive(Debug, Clone)]
pub struct CreateCall {
    pub node: NewNode,
    pub parent_id: String,
    pub actor_id: String,
    pub result: Option<String>,
}

impl FakeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_child(mut self, parent_id: &str, id: &str, label: &str, kind: NodeKind) -> Self {
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(Node {
                id: id.to_string(),
                parent_id: parent_id.to_string(),
                label: label.to_string(),
                kind,
                attributes: NodeAttributes::None,
            });
        self
    }

    pub fn failing_fetch(mut self, node_id: &str) -> Self {
        self.failing_fetches.insert(node_id.to_string());
        self
    }

    pub fn failing_create(mut self, label: &str) -> Self {
        self.failing_creates.insert(label.to_string());
        self
    }

    pub fn created_labels(&self) -> Vec<&str> {
        self.creates
            .iter()
            .filter(|c| c.result.is_some())
            .map(|c| c.node.label.as_str())
            .collect()
    }
}

impl HierarchyApi for FakeHierarchy {
    async fn list_children(&mut self, node_id: &str) -> Result<Vec<Node>, RemoteCallError> {
        self.fetches.push(node_id.to_string());

        if self.failing_fetches.contains(node_id) {
            return Err(tonic::Status::unavailable("service unavailable").into());
        }

        Ok(self.children.get(node_id).cloned().unwrap_or_default())
    }

    async fn create_node(
        &mut self,
        node: NewNode,
        parent_id: &str,
        actor_id: &str,
    ) -> Result<String, RemoteCallError> {
        let result = if self.failing_creates.contains(&node.label) {
            None
        } else {
            let prefix = match node.kind {
                NodeKind::FunctionalLocation => 'F',
                NodeKind::Asset => 'A',
                NodeKind::InspectionPoint => 'P',
                _ => 'N',
            };
            let count = self.issued.entry(prefix).or_default();
            *count += 1;
            Some(format!("{prefix}{count}"))
        };

        self.creates.push(CreateCall {
            node,
            parent_id: parent_id.to_string(),
            actor_id: actor_id.to_string(),
            result: result.clone(),
        });

        result.ok_or_else(|| tonic::Status::internal("save failed").into())
    }
}
