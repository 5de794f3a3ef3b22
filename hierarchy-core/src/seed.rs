//! # Hierarchy Seeding
//!
//! Makes sure a functional location, an asset and the fixed set of
//! [`INSPECTION_POINTS`] exist under a site, creating only what the [`LookupTable`] does
//! not already know about. The table itself is never modified.
//!
//! Creation is not transactional: a failed inspection point does not stop the remaining
//! ones, so an asset may end up with fewer than four points. A failed functional location
//! or asset stops the run, since nothing can be created under it.
use crate::{
    client::{HierarchyApi, RemoteCallError},
    lookup::{LookupTable, normalize},
    model::{Criticality, NewNode, NodeKind, ValueType},
};

/// An inspection point created under every new asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointTemplate {
    pub label: &'static str,
    pub unit: &'static str,
    pub value_type: ValueType,
}

/// The inspection points of a new asset, in creation order.
pub const INSPECTION_POINTS: [PointTemplate; 4] = [
    PointTemplate {
        label: "Gas",
        unit: "Ohm",
        value_type: ValueType::Numeric,
    },
    PointTemplate {
        label: "Pressure",
        unit: "hPa",
        value_type: ValueType::Numeric,
    },
    PointTemplate {
        label: "Humidity",
        unit: "%",
        value_type: ValueType::Numeric,
    },
    PointTemplate {
        label: "Temperature",
        unit: "C",
        value_type: ValueType::Numeric,
    },
];

/// Criticality given to new assets.
pub const DEFAULT_CRITICALITY: Criticality = Criticality::C;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRequest {
    /// Display name of the functional location, e.g. `Server Room`.
    pub functional_location: String,
    /// Display name of the asset, e.g. `Rack 1`.
    pub asset: String,
    pub site_id: String,
    pub actor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNode {
    pub id: String,
    pub parent_id: String,
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to create {kind} '{label}' under '{parent_id}': {source}")]
pub struct CreateFailure {
    pub label: String,
    pub kind: NodeKind,
    pub parent_id: String,
    #[source]
    pub source: RemoteCallError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The asset was created, possibly with some of its points missing.
    Seeded,
    /// The asset was already in the lookup table; nothing was created for it.
    AssetAlreadyExists,
    /// The functional location or the asset could not be created.
    Aborted,
}

#[derive(Debug)]
pub struct SeedReport {
    pub functional_location_key: String,
    pub asset_key: String,
    /// Id of the functional location, known or created.
    pub location_id: Option<String>,
    /// Id of the asset when it was created by this run.
    pub asset_id: Option<String>,
    /// Every node created, in creation order.
    pub created: Vec<CreatedNode>,
    pub failures: Vec<CreateFailure>,
    pub outcome: SeedOutcome,
}

impl SeedReport {
    fn new(functional_location_key: String, asset_key: String) -> Self {
        Self {
            functional_location_key,
            asset_key,
            location_id: None,
            asset_id: None,
            created: Vec::new(),
            failures: Vec::new(),
            outcome: SeedOutcome::Aborted,
        }
    }

    /// Returns `true` when every node that had to be created was created.
    pub fn is_complete(&self) -> bool {
        self.outcome != SeedOutcome::Aborted && self.failures.is_empty()
    }

    /// Records the nodes created by this run in `table`, so that seeding again against it
    /// creates nothing.
    pub fn reflect_into(&self, table: &mut LookupTable) {
        let (Some(location_id), Some(asset_id)) = (&self.location_id, &self.asset_id) else {
            return;
        };

        table.insert_asset(
            &self.functional_location_key,
            self.asset_key.clone(),
            location_id.clone(),
            asset_id.clone(),
        );

        for point in self
            .created
            .iter()
            .filter(|node| node.kind == NodeKind::InspectionPoint)
        {
            table.insert_point(
                &self.functional_location_key,
                &self.asset_key,
                normalize(&point.label),
                point.id.clone(),
            );
        }
    }
}

/// Creates whatever part of `request` is missing from `table`.
pub async fn seed_hierarchy<C>(
    client: &mut C,
    table: &LookupTable,
    request: &SeedRequest,
) -> SeedReport
where
    C: HierarchyApi,
{
    let location_key = normalize(&request.functional_location);
    let asset_key = normalize(&request.asset);
    let mut seeder = Seeder {
        client,
        actor_id: &request.actor_id,
        report: SeedReport::new(location_key, asset_key),
    };

    let known_location_id = table
        .location_id(&seeder.report.functional_location_key)
        .map(str::to_string);

    if table.contains_asset(
        &seeder.report.functional_location_key,
        &seeder.report.asset_key,
    ) {
        tracing::info!(
            asset = %request.asset,
            functional_location = %request.functional_location,
            "asset already exists"
        );
        seeder.report.location_id = known_location_id;
        seeder.report.outcome = SeedOutcome::AssetAlreadyExists;
        return seeder.report;
    }

    let location_id = match known_location_id {
        Some(id) => id,
        None => {
            let node = NewNode::functional_location(&request.functional_location);
            match seeder.create(node, &request.site_id).await {
                Some(id) => id,
                None => return seeder.report,
            }
        }
    };
    seeder.report.location_id = Some(location_id.clone());

    let node = NewNode::asset(&request.asset, DEFAULT_CRITICALITY);
    let Some(asset_id) = seeder.create(node, &location_id).await else {
        return seeder.report;
    };
    seeder.report.asset_id = Some(asset_id.clone());

    for point in INSPECTION_POINTS {
        let node = NewNode::inspection_point(point.label, point.unit, point.value_type);
        seeder.create(node, &asset_id).await;
    }

    seeder.report.outcome = SeedOutcome::Seeded;
    seeder.report
}

struct Seeder<'a, C> {
    client: &'a mut C,
    actor_id: &'a str,
    report: SeedReport,
}

impl<C: HierarchyApi> Seeder<'_, C> {
    /// Creates one node, recording the outcome in the report.
    async fn create(&mut self, node: NewNode, parent_id: &str) -> Option<String> {
        let label = node.label.clone();
        let kind = node.kind.clone();

        match self.client.create_node(node, parent_id, self.actor_id).await {
            Ok(id) => {
                tracing::info!(%id, %label, %kind, parent_id, "created node");
                self.report.created.push(CreatedNode {
                    id: id.clone(),
                    parent_id: parent_id.to_string(),
                    label,
                    kind,
                });
                Some(id)
            }
            Err(source) => {
                tracing::error!(%label, %kind, parent_id, error = %source, "failed to create node");
                self.report.failures.push(CreateFailure {
                    label,
                    kind,
                    parent_id: parent_id.to_string(),
                    source,
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_points_match_the_fixed_table() {
        let points: Vec<_> = INSPECTION_POINTS
            .iter()
            .map(|p| (p.label, p.unit, p.value_type.code()))
            .collect();

        assert_eq!(
            points,
            vec![
                ("Gas", "Ohm", 0),
                ("Pressure", "hPa", 0),
                ("Humidity", "%", 0),
                ("Temperature", "C", 0),
            ]
        );
    }

    #[test]
    fn aborted_report_reflects_nothing() {
        let report = SeedReport::new("server_room".to_string(), "rack_1".to_string());
        let mut table = LookupTable::new();

        report.reflect_into(&mut table);

        assert!(table.is_empty());
        assert!(!report.is_complete());
    }
}
