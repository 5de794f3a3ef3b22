//! # Hierarchy Export
//!
//! Walks the hierarchy below a root node and flattens it into a [`LookupTable`].
//!
//! The walk is a depth-first pre-order traversal: the children of a node are listed, and
//! each child is recorded and fully descended into before its next sibling is looked at.
//! Every call to the service is awaited before the next one is made.
//!
//! While walking, a context of "current functional location" and "current asset" is
//! carried down the tree and accumulated across siblings:
//!
//! * A **functional location** opens a new entry and becomes the current functional
//!   location (the current asset is cleared).
//! * An **asset** is recorded under the current functional location together with the id
//!   of the node it was listed under, and becomes the current asset.
//! * **Anything else** is recorded as a point of the current asset.
//!
//! ## Partial results
//!
//! The export never stops halfway. A failed listing is reported as
//! [`ExportIssue::FetchFailed`] and the subtree below that node is treated as empty. A node
//! that shows up before the ancestors it needs (an asset outside any functional location,
//! a point outside any asset) is not recorded and is reported as [`ExportIssue::Orphaned`];
//! its subtree is still visited.
use crate::{
    client::{HierarchyApi, RemoteCallError},
    lookup::{LookupTable, normalize},
    model::{Node, NodeKind},
};
use std::collections::VecDeque;

/// Something that prevented part of the hierarchy from being exported.
#[derive(Debug, thiserror::Error)]
pub enum ExportIssue {
    #[error("Failed to list the children of node '{node_id}': {source}")]
    FetchFailed {
        node_id: String,
        #[source]
        source: RemoteCallError,
    },
    #[error("{kind} '{label}' ({id}) has no enclosing {missing}, it was not recorded")]
    Orphaned {
        id: String,
        label: String,
        kind: NodeKind,
        missing: &'static str,
    },
}

/// The result of an export: the table built so far and everything that went wrong.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub table: LookupTable,
    pub issues: Vec<ExportIssue>,
}

impl ExportReport {
    /// Returns `true` when the whole hierarchy made it into the table.
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Exports every descendant of `root_id` into a new [`LookupTable`].
pub async fn export_hierarchy<C>(client: &mut C, root_id: &str) -> ExportReport
where
    C: HierarchyApi,
{
    LookupBuilder::default().walk(client, root_id).await
}

/// The normalized names of the enclosing functional location and asset.
#[derive(Debug, Clone, Default)]
struct Context {
    functional_location: Option<String>,
    asset: Option<String>,
}

/// The children of one node that are still to be visited.
struct Frame {
    parent_id: String,
    children: VecDeque<Node>,
    context: Context,
}

/// Accumulates one traversal. Consumed by [`LookupBuilder::walk`].
#[derive(Debug, Default)]
struct LookupBuilder {
    table: LookupTable,
    issues: Vec<ExportIssue>,
}

impl LookupBuilder {
    async fn walk<C: HierarchyApi>(mut self, client: &mut C, root_id: &str) -> ExportReport {
        let mut stack = Vec::new();

        if let Some(frame) = self.fetch(client, root_id, Context::default()).await {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.children.pop_front() else {
                stack.pop();
                continue;
            };

            let parent_id = frame.parent_id.clone();
            self.record(&child, &parent_id, &mut frame.context);
            let context = frame.context.clone();

            if let Some(frame) = self.fetch(client, &child.id, context).await {
                stack.push(frame);
            }
        }

        ExportReport {
            table: self.table,
            issues: self.issues,
        }
    }

    async fn fetch<C: HierarchyApi>(
        &mut self,
        client: &mut C,
        node_id: &str,
        context: Context,
    ) -> Option<Frame> {
        match client.list_children(node_id).await {
            Ok(children) => Some(Frame {
                parent_id: node_id.to_string(),
                children: children.into(),
                context,
            }),
            Err(source) => {
                tracing::warn!(node_id, error = %source, "failed to list child nodes");
                self.issues.push(ExportIssue::FetchFailed {
                    node_id: node_id.to_string(),
                    source,
                });
                None
            }
        }
    }

    fn record(&mut self, node: &Node, parent_id: &str, context: &mut Context) {
        tracing::debug!(
            id = %node.id,
            label = %node.label,
            kind = %node.kind,
            "found child node"
        );

        let key = normalize(&node.label);

        match (&node.kind, &context.functional_location, &context.asset) {
            (NodeKind::FunctionalLocation, _, _) => {
                self.table.insert_functional_location(key.clone());
                context.functional_location = Some(key);
                context.asset = None;
            }
            (NodeKind::Asset, Some(location), _) => {
                self.table
                    .insert_asset(location, key.clone(), parent_id, node.id.clone());
                context.asset = Some(key);
            }
            (NodeKind::Asset, None, _) => self.orphan(node, "functional location"),
            (_, Some(location), Some(asset)) => {
                self.table
                    .insert_point(location, asset, key, node.id.clone());
            }
            (_, None, _) => self.orphan(node, "functional location"),
            (_, Some(_), None) => self.orphan(node, "asset"),
        }
    }

    fn orphan(&mut self, node: &Node, missing: &'static str) {
        tracing::warn!(id = %node.id, label = %node.label, missing, "skipping orphaned node");
        self.issues.push(ExportIssue::Orphaned {
            id: node.id.clone(),
            label: node.label.clone(),
            kind: node.kind.clone(),
            missing,
        });
    }
}
