//! # Hierarchy Seeder
//!
//! 1. **Configuration**: Parses the flags, loads the settings and works out the functional
//!    location and asset names (from the flags, or from the host name).
//! 2. **Lookup**: Reads the lookup file written by `export-hierarchy`.
//! 3. **Connection**: Connects to the hierarchy service and checks its health.
//! 4. **Seeding**: Creates whatever the lookup file does not know about and prints what
//!    was created. The lookup file is left untouched.
use clap::Parser;
use hierarchy_cli::{
    EXIT_PARTIAL,
    cli::SeedCli,
    formatter::{FormattedString, SeedSummary},
    hostname, logging,
    session::{connect_or_exit, settings_or_exit},
};
use hierarchy_core::{
    lookup::LookupFile,
    seed::{SeedRequest, seed_hierarchy},
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = SeedCli::parse();
    logging::init(args.common.verbose);

    let settings = settings_or_exit(args.settings());
    let actor_id = match settings.actor_id() {
        Ok(id) => id.to_string(),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    let (functional_location, asset) = match (args.functional_location, args.asset) {
        (Some(location), Some(asset)) => (location, asset),
        (location, asset) => match hostname::names_from_local_host() {
            Ok((host_location, host_asset)) => {
                tracing::info!(
                    functional_location = %host_location,
                    asset = %host_asset,
                    "derived names from the host name"
                );
                (
                    location.unwrap_or(host_location),
                    asset.unwrap_or(host_asset),
                )
            }
            Err(err) => {
                eprintln!("{}", FormattedString::from(err));
                process::exit(1);
            }
        },
    };

    let request = SeedRequest {
        functional_location,
        asset,
        site_id: settings.site_id.clone(),
        actor_id,
    };

    let table = LookupFile::new(&settings.lookup_file).load_or_default();
    tracing::debug!(
        functional_locations = table.len(),
        "loaded lookup table"
    );

    let mut client = connect_or_exit(&settings).await;
    let report = seed_hierarchy(&mut client, &table, &request).await;

    println!(
        "{}",
        FormattedString::from(SeedSummary {
            report: &report,
            request: &request,
        })
    );

    if !report.is_complete() {
        process::exit(EXIT_PARTIAL);
    }
}
