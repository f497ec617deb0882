//! Service configuration
//!
//! Every setting can come from a command-line flag or from the matching
//! environment variable; `main` loads a `.env` file first if present.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use clap::{ArgAction, Parser};
use gematria_core::reconcile::DEFAULT_CHUNK_SIZE;
use gematria_core_types::Sensitive;

/// Values accepted as "on" for boolean environment switches
const TRUTHY: [&str; 5] = ["1", "true", "yes", "y", "on"];

/// Parse a boolean switch; anything outside the truthy set is false
pub fn parse_truthy(value: &str) -> Result<bool, Infallible> {
    Ok(TRUTHY.contains(&value.trim().to_ascii_lowercase().as_str()))
}

fn parse_sensitive(value: &str) -> Result<Sensitive<String>, Infallible> {
    Ok(Sensitive::new(value.trim().to_string()))
}

/// Gematria HTTP service
#[derive(Parser, Debug, Clone)]
#[command(name = "gematria-api")]
#[command(about = "HTTP service for computing and storing gematria values", long_about = None)]
pub struct ApiConfig {
    /// SQLite database path or sqlite:// URL
    #[arg(
        long = "database",
        env = "DATABASE_URL",
        default_value = "gematria.db",
        value_parser = parse_sensitive
    )]
    pub database_url: Sensitive<String>,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Create the entries table at startup if it is missing
    #[arg(
        long,
        env = "AUTO_CREATE_TABLES",
        value_parser = parse_truthy,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub auto_create_tables: bool,

    /// Expose /debug/db
    #[arg(
        long,
        env = "DEBUG",
        value_parser = parse_truthy,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub debug: bool,

    /// Log output format: pretty or json
    #[arg(long, env = "GEMATRIA_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Rows per transaction for bulk upserts
    #[arg(long, env = "BULK_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub bulk_chunk_size: usize,
}

impl ApiConfig {
    /// Address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ApiConfig {
        let mut argv = vec!["gematria-api"];
        argv.extend_from_slice(args);
        ApiConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_truthy_values() {
        for v in ["1", "true", "YES", " y ", "On"] {
            assert!(parse_truthy(v).unwrap(), "{} should be truthy", v);
        }
        for v in ["0", "false", "no", "", "enabled"] {
            assert!(!parse_truthy(v).unwrap(), "{} should be falsy", v);
        }
    }

    #[test]
    fn test_flags_override() {
        let config = parse(&[
            "--database",
            "sqlite:///tmp/g.db",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--auto-create-tables",
            "--debug",
            "yes",
            "--bulk-chunk-size",
            "50",
        ]);

        assert_eq!(config.database_url.expose(), "sqlite:///tmp/g.db");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert!(config.auto_create_tables);
        assert!(config.debug);
        assert_eq!(config.bulk_chunk_size, 50);
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let config = parse(&["--database", "/srv/secret-name.db"]);
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-name"));
    }
}
