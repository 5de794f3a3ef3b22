//! # Settings
//!
//! Everything the tools used to hardcode: where the service lives, which certificates to
//! present, the site to work on, the actor creating nodes and where the lookup file is.
//!
//! Settings are read from a JSON file. Any field missing from the file keeps its default.
//! Paths that are not absolute are resolved against the directory of the running
//! executable, which is where the certificates and the lookup file are shipped.
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "grpc.hierarchy.enlight.skf.com";
pub const DEFAULT_PORT: u16 = 50051;
pub const DEFAULT_SITE_ID: &str = "fb98275e-330c-4b46-8dfa-785c3ddf2d8a";
pub const DEFAULT_LOOKUP_FILE: &str = "config.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': '{source}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file '{path}': '{source}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No actor id configured; set 'actor_id' in the settings file or pass --actor-id")]
    MissingActorId,
    #[error("Could not determine the directory of the running executable: '{0}'")]
    ExecutableDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ConnectionSettings,
    /// Identifier attributed as the creator of new nodes.
    pub actor_id: Option<String>,
    pub site_id: String,
    pub lookup_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ConnectionSettings::default(),
            actor_id: None,
            site_id: DEFAULT_SITE_ID.to_string(),
            lookup_file: PathBuf::from(DEFAULT_LOOKUP_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    /// Connect without TLS. Only meant for local test servers.
    pub plaintext: bool,
    pub tls: TlsSettings,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            plaintext: false,
            tls: TlsSettings::default(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ConnectionSettings {
    pub fn uri(&self) -> String {
        let scheme = if self.plaintext { "http" } else { "https" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Mutual TLS material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    pub ca_cert: PathBuf,
    pub client_cert: PathBuf,
    pub client_key: PathBuf,
    /// Server name to verify; defaults to the host.
    pub domain_name: Option<String>,
}

impl Default for TlsSettings {
    fn default() -> Self {
        let certs = Path::new("certs").join("hierarchy");
        Self {
            ca_cert: certs.join("ca.crt"),
            client_cert: certs.join("client.crt"),
            client_key: certs.join("client.key"),
            domain_name: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or from the user's config directory when no path is
    /// given and a settings file exists there. Falls back to defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_settings_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let settings =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;

        Ok(settings)
    }

    /// Resolves every relative path against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let tls = &mut self.server.tls;
        for path in [
            &mut self.lookup_file,
            &mut tls.ca_cert,
            &mut tls.client_cert,
            &mut tls.client_key,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Resolves every relative path against the directory of the running executable.
    pub fn resolve_paths_from_executable(&mut self) -> Result<(), ConfigError> {
        let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        self.resolve_paths(dir);
        Ok(())
    }

    pub fn actor_id(&self) -> Result<&str, ConfigError> {
        self.actor_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingActorId)
    }
}

fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "skf", "enlight-hierarchy")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "actor_id": "user-1", "server": { "host": "localhost", "plaintext": true } }"#,
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();

        assert_eq!(settings.actor_id().unwrap(), "user-1");
        assert_eq!(settings.server.host, "localhost");
        assert_eq!(settings.server.port, DEFAULT_PORT);
        assert_eq!(settings.server.uri(), "http://localhost:50051");
        assert_eq!(settings.site_id, DEFAULT_SITE_ID);
        assert_eq!(settings.server.tls, TlsSettings::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "server": { "port": "not a number" } }"#).unwrap();

        let err = Settings::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn blank_actor_id_is_missing() {
        let settings = Settings {
            actor_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(settings.actor_id(), Err(ConfigError::MissingActorId)));
        assert!(matches!(
            Settings::default().actor_id(),
            Err(ConfigError::MissingActorId)
        ));
    }

    #[test]
    fn relative_paths_are_resolved_against_base() {
        let mut settings = Settings {
            lookup_file: PathBuf::from("/var/lib/hierarchy/config.json"),
            ..Default::default()
        };
        settings.resolve_paths(Path::new("/opt/tools"));

        assert_eq!(
            settings.lookup_file,
            PathBuf::from("/var/lib/hierarchy/config.json")
        );
        assert_eq!(
            settings.server.tls.ca_cert,
            PathBuf::from("/opt/tools/certs/hierarchy/ca.crt")
        );
        assert_eq!(
            settings.server.tls.client_key,
            PathBuf::from("/opt/tools/certs/hierarchy/client.key")
        );
    }
}
