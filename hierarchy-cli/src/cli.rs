//! # CLI
//!
//! This module defines the command-line interface of both tools using `clap`.
//!
//! Every flag is optional: values not given on the command line come from the settings
//! file, and from the built-in defaults when the settings file does not set them either.
use clap::{ArgAction, Args, Parser};
use hierarchy_core::config::{ConfigError, Settings};
use std::path::PathBuf;

/// Flags shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to a JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host name of the hierarchy service
    #[arg(long)]
    pub host: Option<String>,

    /// Port of the hierarchy service
    #[arg(long)]
    pub port: Option<u16>,

    /// Connect without TLS (local test servers only)
    #[arg(long)]
    pub plaintext: bool,

    /// Site id in the hierarchy
    #[arg(long, visible_alias = "uuid")]
    pub site_id: Option<String>,

    /// Path of the lookup file
    #[arg(long)]
    pub lookup_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Loads the settings and applies the command-line overrides on top.
    ///
    /// Relative paths coming from the settings file (or the defaults) are resolved against
    /// the directory of the executable; paths given on the command line are used as is.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::load(self.config.as_deref())?;
        settings.resolve_paths_from_executable()?;
        self.apply(&mut settings);
        Ok(settings)
    }

    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if self.plaintext {
            settings.server.plaintext = true;
        }
        if let Some(site_id) = &self.site_id {
            settings.site_id = site_id.clone();
        }
        if let Some(lookup_file) = &self.lookup_file {
            settings.lookup_file = lookup_file.clone();
        }
    }
}

/// Walks the hierarchy below a node and writes the lookup file.
#[derive(Parser, Debug)]
#[command(name = "export-hierarchy", version)]
pub struct ExportCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Node to start from (defaults to the site id)
    #[arg(long)]
    pub root_id: Option<String>,
}

/// Creates a functional location, an asset and its inspection points when the lookup file
/// does not know them yet.
///
/// When the names are not given they are derived from the host name: `server_room-rack_1`
/// seeds the functional location `Server Room` and the asset `Rack 1`.
#[derive(Parser, Debug)]
#[command(name = "seed-hierarchy", version)]
pub struct SeedCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Name of the functional location (e.g. "Server Room")
    #[arg(long, value_parser = parse_name)]
    pub functional_location: Option<String>,

    /// Name of the asset (e.g. "Rack 1")
    #[arg(long, value_parser = parse_name)]
    pub asset: Option<String>,

    /// Id of the account new nodes are attributed to
    #[arg(long)]
    pub actor_id: Option<String>,
}

impl SeedCli {
    /// The settings with the actor id override applied.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = self.common.settings()?;
        if let Some(actor_id) = &self.actor_id {
            settings.actor_id = Some(actor_id.clone());
        }
        Ok(settings)
    }
}

fn parse_name(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    Ok(value.to_string())
}
