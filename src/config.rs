//! Startup configuration (§6, §10): CLI flags via `clap`, optionally layered
//! on top of a YAML file via `serde` + `serde_yaml_ng`, matching the
//! teacher's existing dependency on both crates. Validated once at startup;
//! a validation failure is a fatal `UpfError::Config` before any socket
//! opens (§7).

use crate::error::UpfError;
use clap::Parser;
use network_interface::{NetworkInterface, NetworkInterfaceConfig};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

fn default_pfcp_port() -> u16 {
    8805
}

fn default_gtpu_port() -> u16 {
    2152
}

fn default_n6_device() -> String {
    "upf0".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_session_capacity() -> usize {
    10_000
}

fn default_shutdown_grace_ms() -> u64 {
    250
}

/// Either a literal address or the name of an interface to resolve it from
/// (§6: "bound to the N4 interface" / "bound to the N3 address").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BindAddress {
    Literal(IpAddr),
    Interface(String),
}

impl BindAddress {
    pub fn resolve(&self) -> Result<IpAddr, UpfError> {
        match self {
            BindAddress::Literal(addr) => Ok(*addr),
            BindAddress::Interface(name) => resolve_interface(name),
        }
    }
}

fn resolve_interface(name: &str) -> Result<IpAddr, UpfError> {
    let interfaces = NetworkInterface::show()
        .map_err(|e| UpfError::Config(format!("failed to enumerate network interfaces: {e}")))?;
    let iface = interfaces
        .iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| UpfError::Config(format!("interface {name} not found")))?;
    iface
        .addr
        .iter()
        .find_map(|addr| match addr {
            network_interface::Addr::V4(v4) => Some(IpAddr::V4(v4.ip)),
            network_interface::Addr::V6(_) => None,
        })
        .ok_or_else(|| UpfError::Config(format!("no IPv4 address found for interface {name}")))
}

/// Configuration loaded from CLI flags and, optionally, a YAML file. CLI
/// flags always win: the file only fills in values the caller didn't pass.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_pfcp_port")]
    pub pfcp_port: u16,
    pub n4_address: BindAddress,
    #[serde(default = "default_gtpu_port")]
    pub gtpu_port: u16,
    pub n3_address: BindAddress,
    pub n9_address: BindAddress,
    #[serde(default = "default_n6_device")]
    pub n6_device: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_session_capacity")]
    pub session_capacity: usize,
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
    pub nat_public_ip: IpAddr,
}

impl Config {
    pub fn validate(&self) -> Result<(), UpfError> {
        if self.workers < 1 {
            return Err(UpfError::Config("workers must be >= 1".to_string()));
        }
        if self.queue_capacity < 1 {
            return Err(UpfError::Config("queue_capacity must be >= 1".to_string()));
        }
        if self.session_capacity < 1 {
            return Err(UpfError::Config("session_capacity must be >= 1".to_string()));
        }
        if self.pfcp_port == 0 || self.gtpu_port == 0 {
            return Err(UpfError::Config("ports must be nonzero".to_string()));
        }
        if self.n6_device.trim().is_empty() {
            return Err(UpfError::Config("n6_device must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Command-line entry point. Every field is optional here; anything left
/// unset falls back to `--config-file`'s YAML, then the field's default.
#[derive(Parser, Debug)]
#[command(author, version, about = "5G User Plane Function control and data plane")]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    #[arg(long)]
    pub n4_address: Option<String>,
    #[arg(long)]
    pub n3_address: Option<String>,
    #[arg(long)]
    pub n9_address: Option<String>,
    #[arg(long)]
    pub n6_device: Option<String>,
    #[arg(long)]
    pub workers: Option<usize>,
    #[arg(long)]
    pub queue_capacity: Option<usize>,
    #[arg(long)]
    pub nat_public_ip: Option<IpAddr>,
}

/// Minimal on-disk shape: every field optional, since CLI flags can supply
/// the rest. Mirrors `Config` field-for-field but without defaults baked in
/// (those live on `Config` itself, applied at merge time).
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pfcp_port: Option<u16>,
    n4_address: Option<BindAddress>,
    gtpu_port: Option<u16>,
    n3_address: Option<BindAddress>,
    n9_address: Option<BindAddress>,
    n6_device: Option<String>,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
    session_capacity: Option<usize>,
    shutdown_grace_ms: Option<u64>,
    nat_public_ip: Option<IpAddr>,
}

fn load_file(path: &Path) -> Result<FileConfig, UpfError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| UpfError::Config(format!("failed to read {}: {e}", path.display())))?;
    serde_yaml_ng::from_str(&text)
        .map_err(|e| UpfError::Config(format!("failed to parse {}: {e}", path.display())))
}

fn parse_bind(value: &str) -> BindAddress {
    match value.parse::<IpAddr>() {
        Ok(addr) => BindAddress::Literal(addr),
        Err(_) => BindAddress::Interface(value.to_string()),
    }
}

/// Merges `cli` over an optional YAML file, applying defaults for anything
/// still unset, then validates the result.
pub fn load(cli: Cli) -> Result<Config, UpfError> {
    let file = match &cli.config_file {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };

    let n4_address = cli
        .n4_address
        .map(|v| parse_bind(&v))
        .or(file.n4_address)
        .ok_or_else(|| UpfError::Config("n4_address is required (CLI or config file)".to_string()))?;
    let n3_address = cli
        .n3_address
        .map(|v| parse_bind(&v))
        .or(file.n3_address)
        .ok_or_else(|| UpfError::Config("n3_address is required (CLI or config file)".to_string()))?;
    let n9_address = cli
        .n9_address
        .map(|v| parse_bind(&v))
        .or(file.n9_address)
        .ok_or_else(|| UpfError::Config("n9_address is required (CLI or config file)".to_string()))?;
    let nat_public_ip = cli
        .nat_public_ip
        .or(file.nat_public_ip)
        .ok_or_else(|| UpfError::Config("nat_public_ip is required (CLI or config file)".to_string()))?;

    let config = Config {
        pfcp_port: file.pfcp_port.unwrap_or_else(default_pfcp_port),
        n4_address,
        gtpu_port: file.gtpu_port.unwrap_or_else(default_gtpu_port),
        n3_address,
        n9_address,
        n6_device: cli.n6_device.or(file.n6_device).unwrap_or_else(default_n6_device),
        workers: cli.workers.or(file.workers).unwrap_or_else(default_workers),
        queue_capacity: cli
            .queue_capacity
            .or(file.queue_capacity)
            .unwrap_or_else(default_queue_capacity),
        session_capacity: file.session_capacity.unwrap_or_else(default_session_capacity),
        shutdown_grace_ms: file.shutdown_grace_ms.unwrap_or_else(default_shutdown_grace_ms),
        nat_public_ip,
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli_with_file(path: PathBuf) -> Cli {
        Cli {
            config_file: Some(path),
            n4_address: None,
            n3_address: None,
            n9_address: None,
            n6_device: None,
            workers: None,
            queue_capacity: None,
            nat_public_ip: None,
        }
    }

    #[test]
    fn rejects_zero_workers() {
        let config = Config {
            pfcp_port: 8805,
            n4_address: BindAddress::Literal("127.0.0.1".parse().unwrap()),
            gtpu_port: 2152,
            n3_address: BindAddress::Literal("127.0.0.1".parse().unwrap()),
            n9_address: BindAddress::Literal("127.0.0.1".parse().unwrap()),
            n6_device: "upf0".to_string(),
            workers: 0,
            queue_capacity: 1024,
            session_capacity: 10_000,
            shutdown_grace_ms: 250,
            nat_public_ip: "192.0.2.1".parse().unwrap(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_and_merges_cli_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "n4_address: 10.0.0.1\nn3_address: 10.0.0.2\nn9_address: 10.0.0.3\nnat_public_ip: 192.0.2.1\nworkers: 2\n"
        )
        .unwrap();

        let mut cli = cli_with_file(file.path().to_path_buf());
        cli.workers = Some(8);

        let config = load(cli).unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.queue_capacity, default_queue_capacity());
    }

    #[test]
    fn missing_required_address_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "n4_address: 10.0.0.1\n").unwrap();
        let cli = cli_with_file(file.path().to_path_buf());
        assert!(load(cli).is_err());
    }
}
