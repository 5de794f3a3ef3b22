use crate::hostname::HostNameError;
use colored::*;
use hierarchy_core::{
    client::ClientConnectError,
    config::ConfigError,
    export::ExportReport,
    lookup::{LookupFileError, LookupTable, points},
    seed::{SeedOutcome, SeedReport, SeedRequest},
};
use std::path::Path;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// The result of an export together with where it was written.
pub struct ExportSummary<'a> {
    pub report: &'a ExportReport,
    pub path: &'a Path,
}

pub struct SeedSummary<'a> {
    pub report: &'a SeedReport,
    pub request: &'a SeedRequest,
}

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<ClientConnectError> for FormattedString {
    fn from(err: ClientConnectError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

impl From<ConfigError> for FormattedString {
    fn from(err: ConfigError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Configuration Error:".red().bold(),
            err
        ))
    }
}

impl From<LookupFileError> for FormattedString {
    fn from(err: LookupFileError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Lookup File Error:".red().bold(), err))
    }
}

impl From<HostNameError> for FormattedString {
    fn from(err: HostNameError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Invalid Host Name:".red().bold(), err))
    }
}

impl From<ExportSummary<'_>> for FormattedString {
    fn from(ExportSummary { report, path }: ExportSummary<'_>) -> Self {
        let (assets, points) = count(&report.table);

        let mut out = format!(
            "{} {} functional locations, {} assets and {} points to {}",
            "Exported".green().bold(),
            report.table.len(),
            assets,
            points,
            path.display().to_string().cyan()
        );

        if !report.is_complete() {
            out.push_str(&format!(
                "\n\n{}\n",
                format!("{} part(s) of the hierarchy were skipped:", report.issues.len())
                    .yellow()
                    .bold()
            ));
            for issue in &report.issues {
                out.push_str(&format!("  - {issue}\n"));
            }
        }

        FormattedString(out.trim_end().to_string())
    }
}

impl From<SeedSummary<'_>> for FormattedString {
    fn from(SeedSummary { report, request }: SeedSummary<'_>) -> Self {
        let mut out = String::new();

        for node in &report.created {
            out.push_str(&format!(
                "{} {} '{}' ({}) under {}\n",
                "+".green().bold(),
                node.kind,
                node.label.green(),
                node.id,
                node.parent_id
            ));
        }

        for failure in &report.failures {
            out.push_str(&format!("{} {failure}\n", "x".red().bold()));
        }

        let status = match report.outcome {
            SeedOutcome::Seeded if report.failures.is_empty() => format!(
                "Asset \"{}\" created under \"{}\"",
                request.asset, request.functional_location
            )
            .green()
            .bold(),
            SeedOutcome::Seeded => format!(
                "Asset \"{}\" created under \"{}\" with missing inspection points",
                request.asset, request.functional_location
            )
            .yellow()
            .bold(),
            SeedOutcome::AssetAlreadyExists => format!(
                "Asset \"{}\" does already exist under \"{}\"",
                request.asset, request.functional_location
            )
            .yellow(),
            SeedOutcome::Aborted => "Seeding aborted".red().bold(),
        };

        out.push_str(&status.to_string());
        FormattedString(out)
    }
}

fn count(table: &LookupTable) -> (usize, usize) {
    table
        .functional_locations()
        .flat_map(|(_, assets)| assets.values())
        .fold((0, 0), |(assets, total), entry| {
            (assets + 1, total + points(entry).count())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_assets_and_points_without_reserved_keys() {
        let mut table = LookupTable::new();
        table.insert_asset("server_room", "rack_1", "F1", "A1");
        table.insert_point("server_room", "rack_1", "gas", "P1");
        table.insert_point("server_room", "rack_1", "pressure", "P2");
        table.insert_asset("hot_room", "boiler", "F2", "A2");
        table.insert_functional_location("empty_room");

        assert_eq!(count(&table), (2, 2));
    }
}
