//! # Hierarchy Exporter
//!
//! 1. **Configuration**: Parses the flags and loads the settings.
//! 2. **Connection**: Connects to the hierarchy service and checks its health.
//! 3. **Traversal**: Walks every node below the root (the site by default).
//! 4. **Output**: Writes the lookup table and prints a summary with anything skipped.
use clap::Parser;
use hierarchy_cli::{
    EXIT_PARTIAL,
    cli::ExportCli,
    formatter::{ExportSummary, FormattedString},
    logging,
    session::{connect_or_exit, settings_or_exit},
};
use hierarchy_core::{export::export_hierarchy, lookup::LookupFile};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = ExportCli::parse();
    logging::init(args.common.verbose);

    let settings = settings_or_exit(args.common.settings());
    let root_id = args.root_id.unwrap_or_else(|| settings.site_id.clone());

    tracing::info!(
        %root_id,
        lookup_file = %settings.lookup_file.display(),
        "exporting hierarchy"
    );

    let mut client = connect_or_exit(&settings).await;
    let report = export_hierarchy(&mut client, &root_id).await;
    drop(client);

    let file = LookupFile::new(&settings.lookup_file);
    if let Err(err) = file.save(&report.table) {
        eprintln!("{}", FormattedString::from(err));
        process::exit(1);
    }

    println!(
        "{}",
        FormattedString::from(ExportSummary {
            report: &report,
            path: file.path(),
        })
    );

    if !report.is_complete() {
        process::exit(EXIT_PARTIAL);
    }
}
