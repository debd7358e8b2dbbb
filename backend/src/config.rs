//! Server configuration.
//!
//! Resolved from CLI flags, then environment (a `.env` file is loaded by
//! the binary), then defaults.

use std::env;
use std::path::PathBuf;

use crate::history::HISTORY_SUBDIR;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default data directory (history records, exports).
pub const DEFAULT_DATA_DIR: &str = ".auditlog";

/// Default upload limit: 16 MB.
pub const DEFAULT_MAX_UPLOAD: usize = 16 * 1024 * 1024;

/// Runtime configuration of the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Built frontend (`dist/`) served for non-API paths.
    pub static_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub google_token: Option<String>,
}

/// Values given on the command line; `None` falls through to env/defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ServerConfig {
    /// Resolve the configuration from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, env_var)
    }

    /// Resolve with an explicit variable lookup.
    pub fn resolve_with(overrides: ConfigOverrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = overrides
            .port
            .or_else(|| lookup("AUDITLOG_PORT").and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT);

        let data_dir = overrides
            .data_dir
            .or_else(|| lookup("AUDITLOG_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let export_dir = overrides
            .export_dir
            .or_else(|| lookup("AUDITLOG_EXPORT_DIR").map(PathBuf::from))
            .unwrap_or_else(|| data_dir.join("exports"));

        let static_dir = overrides
            .static_dir
            .or_else(|| lookup("AUDITLOG_STATIC_DIR").map(PathBuf::from));

        let max_upload_bytes = lookup("AUDITLOG_MAX_UPLOAD")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD);

        Self {
            port,
            data_dir,
            export_dir,
            static_dir,
            max_upload_bytes,
            google_token: lookup("GOOGLE_ACCESS_TOKEN"),
        }
    }

    /// Directory holding the export history records.
    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join(HISTORY_SUBDIR)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::resolve_with(ConfigOverrides::default(), |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.export_dir, PathBuf::from(".auditlog/exports"));
        assert_eq!(config.history_dir(), PathBuf::from(".auditlog/history"));
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.google_token.is_none());
    }

    #[test]
    fn test_env_then_overrides() {
        let env: HashMap<&str, &str> = [
            ("AUDITLOG_PORT", "8080"),
            ("AUDITLOG_DATA_DIR", "/var/lib/auditlog"),
            ("AUDITLOG_MAX_UPLOAD", "1024"),
            ("GOOGLE_ACCESS_TOKEN", "ya29.token"),
        ]
        .into_iter()
        .collect();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let config = ServerConfig::resolve_with(ConfigOverrides::default(), lookup);
        assert_eq!(config.port, 8080);
        assert_eq!(config.export_dir, PathBuf::from("/var/lib/auditlog/exports"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.google_token.as_deref(), Some("ya29.token"));

        let overrides = ConfigOverrides { port: Some(9000), ..Default::default() };
        let config = ServerConfig::resolve_with(overrides, lookup);
        assert_eq!(config.port, 9000);
    }
}
