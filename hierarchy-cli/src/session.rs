//! Startup steps shared by both tools. Any failure here is fatal: the error is printed
//! and the process exits with status 1.
use crate::formatter::FormattedString;
use hierarchy_core::{
    client::HierarchyClient,
    config::{ConfigError, Settings},
};
use std::process;

pub fn settings_or_exit(settings: Result<Settings, ConfigError>) -> Settings {
    match settings {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

pub async fn connect_or_exit(settings: &Settings) -> HierarchyClient {
    match HierarchyClient::connect(&settings.server).await {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}
