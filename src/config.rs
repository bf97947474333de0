use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub enable_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite://movies.db?mode=rwc".to_string(),
            db_max_connections: 5,
            db_acquire_timeout: Duration::from_secs(8),
            enable_sample_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.db_max_connections)
            .max(1);

        let db_acquire_timeout = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.db_acquire_timeout);

        let enable_sample_data = std::env::var("ENABLE_SAMPLE_DATA")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.enable_sample_data);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            db_max_connections,
            db_acquire_timeout,
            enable_sample_data,
        })
    }
}
