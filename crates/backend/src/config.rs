use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_PORT: u16 = 3000;

/// Runtime settings for the dashboard host, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// Built frontend bundle (`index.html` and `assets/`).
    pub dist_dir: PathBuf,
    /// Hand-maintained files served under `/static`.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        Ok(Config {
            port,
            dist_dir: lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string()).into(),
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| "assets".to_string())
                .into(),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}
