use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("INBOX_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var("INBOX_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("INBOX_PORT must be a port number")?;
        let data_file: PathBuf = var("INBOX_DATA_FILE")
            .unwrap_or_else(|| "messages.json".into())
            .into();
        let static_dir = var("INBOX_STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let max_body_bytes = match var("INBOX_MAX_BODY_BYTES") {
            Some(raw) => raw
                .parse()
                .context("INBOX_MAX_BODY_BYTES must be a byte count")?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            host,
            port,
            data_file,
            static_dir,
            max_body_bytes,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
