//! Configuration loading and parsing
//!
//! Optional `config.toml` with network settings and extra subtype labels.
//! Values set here take precedence over the command-line defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::Path;

/// Application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    /// Extra subtype labels merged into the built-in registry
    #[serde(default)]
    pub subtypes: Vec<SubtypeEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Multicast group address to join
    pub address: Option<IpAddr>,
    /// Port to listen on
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubtypeEntry {
    /// Message kind code (1 = one-node, 2 = two-nodes, 3 = many-nodes)
    pub kind: u8,
    /// Subtype code within the kind
    pub code: u8,
    /// Human-readable label
    pub label: String,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [network]
            address = "224.1.1.1"
            port = 10000

            [[subtypes]]
            kind = 1
            code = 7
            label = "node reboot"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.network.address, Some("224.1.1.1".parse().unwrap()));
        assert_eq!(config.network.port, Some(10000));
        assert_eq!(config.subtypes.len(), 1);
        assert_eq!(config.subtypes[0].label, "node reboot");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.network.address.is_none());
        assert!(config.subtypes.is_empty());
    }
}
