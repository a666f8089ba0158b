use crate::result::Result;

use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_LEADERBOARD_SIZE: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,

    /// `None` keeps every game in process memory.
    pub db_connection_url: Option<String>,
    pub db_max_connections: u32,

    pub assets_dir: String,
    pub leaderboard_size: i64,
}

impl Config {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server_host, self.server_port);

        return Ok(addr
            .parse()
            .with_context(|| format!("Invalid listen address: {addr}"))?);
    }
}

/// Builds the config from a variable lookup, normally `std::env::var` after
/// `.env` has been loaded.
pub fn build<F>(var: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| var(key).filter(|value| !value.trim().is_empty());

    let server_host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
    let server_port = parse_or(get("SERVER_PORT"), "SERVER_PORT", DEFAULT_SERVER_PORT)?;

    let db_connection_url = get("DATABASE_URL");
    let db_max_connections = parse_or(
        get("DB_MAX_CONNECTIONS"),
        "DB_MAX_CONNECTIONS",
        DEFAULT_DB_MAX_CONNECTIONS,
    )?;

    let assets_dir = get("ASSETS_DIR").unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string());
    let leaderboard_size = parse_or(
        get("LEADERBOARD_SIZE"),
        "LEADERBOARD_SIZE",
        DEFAULT_LEADERBOARD_SIZE,
    )?;

    if leaderboard_size < 1 {
        return Err(anyhow::anyhow!("LEADERBOARD_SIZE must be positive, got {leaderboard_size}").into());
    }

    return Ok(Config {
        server_host,
        server_port,

        db_connection_url,
        db_max_connections,

        assets_dir,
        leaderboard_size,
    });
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    return Ok(raw
        .trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))?);
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn build_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        return build(|key| vars.get(key).cloned());
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = build_from(&[]).unwrap();

        assert_eq!(cfg.server_host, "0.0.0.0");
        assert_eq!(cfg.server_port, 3000);
        assert_eq!(cfg.db_connection_url, None);
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.assets_dir, "assets");
        assert_eq!(cfg.leaderboard_size, 10);
    }

    #[test]
    fn reads_overrides() {
        let cfg = build_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/guess"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("LEADERBOARD_SIZE", "25"),
        ])
        .unwrap();

        assert_eq!(cfg.server_port, 8080);
        assert_eq!(
            cfg.db_connection_url.as_deref(),
            Some("postgres://localhost/guess")
        );
        assert_eq!(cfg.db_max_connections, 12);
        assert_eq!(cfg.leaderboard_size, 25);
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let cfg = build_from(&[("DATABASE_URL", "  ")]).unwrap();

        assert!(cfg.db_connection_url.is_none());
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(build_from(&[("SERVER_PORT", "http")]).is_err());
        assert!(build_from(&[("SERVER_PORT", "70000")]).is_err());
        assert!(build_from(&[("LEADERBOARD_SIZE", "0")]).is_err());
    }
}
