use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

pub const DEFAULT_PAGE_SIZE: usize = 50;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_file_size: default_max_file_size(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("Invalid BIND_ADDR: {}", addr))?;
        }

        if let Some(size) = lookup("MAX_FILE_SIZE") {
            config.max_file_size = size
                .parse()
                .with_context(|| format!("Invalid MAX_FILE_SIZE: {}", size))?;
        }

        if let Some(size) = lookup("PAGE_SIZE") {
            config.page_size = size
                .parse()
                .with_context(|| format!("Invalid PAGE_SIZE: {}", size))?;
        }

        if config.page_size == 0 {
            anyhow::bail!("PAGE_SIZE must be greater than zero");
        }

        Ok(config)
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::new()?;
    tracing::info!(
        "Config loaded: bind_addr={}, max_file_size={}, page_size={}",
        config.bind_addr,
        config.max_file_size,
        config.page_size
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("PAGE_SIZE", "25"),
            ("MAX_FILE_SIZE", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.max_file_size, 1024);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Config::from_lookup(lookup(&[("PAGE_SIZE", "0")])).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Config::from_lookup(lookup(&[("MAX_FILE_SIZE", "ten")])).is_err());
    }
}
