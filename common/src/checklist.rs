//! # Checklist Loading
//!
//! Reads the YAML file describing which services to check:
//!
//! ```yaml
//! web:
//!   Public:
//!     hostname: www.example.com
//!     IP: 93.184.216.34
//!     valid-port: 80,443
//!     block-port: 22
//!   Private:
//!     IP: 10.0.0.5
//!     valid-port: 22
//! ```
//!
//! Services keep the order in which they are declared.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::ConfigError;
use crate::network::ports;
use crate::network::target::{Role, Service, Target};

pub const DEFAULT_CHECKLIST: &str = "checklist.yaml";

#[derive(Debug, Default, Deserialize)]
struct RawService {
    #[serde(rename = "Public")]
    public: Option<RawEndpoint>,
    #[serde(rename = "Private")]
    private: Option<RawEndpoint>,
    #[serde(rename = "Internal")]
    internal: Option<RawEndpoint>,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    hostname: Option<String>,
    #[serde(rename = "IP")]
    ip: Option<String>,
    #[serde(rename = "valid-port")]
    valid_port: Option<PortField>,
    #[serde(rename = "block-port")]
    block_port: Option<PortField>,
}

/// YAML turns `valid-port: 22` into a number and `valid-port: 22,80` into a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortField {
    Number(u64),
    Text(String),
}

impl PortField {
    fn as_spec(&self) -> String {
        match self {
            PortField::Number(n) => n.to_string(),
            PortField::Text(s) => s.clone(),
        }
    }
}

/// Every service declared in a checklist file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    services: Vec<Service>,
}

impl Checklist {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded checklist from {}", path.display());
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let mapping = match serde_yaml::from_str::<Value>(text)? {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => return Err(ConfigError::NotAMapping),
        };

        let mut services = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = service_name(key)?;
            services.push(build_service(name, value)?);
        }

        Ok(Self { services })
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.name == name)
    }

    /// Picks services from a comma-separated list of names, in the order requested.
    pub fn select(&self, names: &str) -> Result<Vec<Service>, ConfigError> {
        names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownService(name.to_string()))
            })
            .collect()
    }

    pub fn into_services(self) -> Vec<Service> {
        self.services
    }
}

fn service_name(key: Value) -> Result<String, ConfigError> {
    match key {
        Value::String(name) => Ok(name),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConfigError::NotAMapping),
    }
}

fn build_service(name: String, value: Value) -> Result<Service, ConfigError> {
    let raw: RawService = match value {
        Value::Null => RawService::default(),
        other => serde_yaml::from_value(other).map_err(|e| ConfigError::InvalidService {
            service: name.clone(),
            reason: e.to_string(),
        })?,
    };

    let internal = match (raw.private, raw.internal) {
        (Some(_), Some(_)) => return Err(ConfigError::DuplicateRole { service: name }),
        (Some(private), None) => Some(("Private", private)),
        (None, Some(internal)) => Some(("Internal", internal)),
        (None, None) => None,
    };

    let mut service = Service::new(name.clone());
    if let Some(endpoint) = raw.public {
        service = service.with_target(build_target(&name, Role::Public, "Public", endpoint)?);
    }
    if let Some((key, endpoint)) = internal {
        service = service.with_target(build_target(&name, Role::Internal, key, endpoint)?);
    }
    Ok(service)
}

fn build_target(
    service: &str,
    role: Role,
    key: &str,
    raw: RawEndpoint,
) -> Result<Target, ConfigError> {
    let ip_text = raw.ip.ok_or_else(|| ConfigError::MissingIp {
        service: service.to_string(),
        key: key.to_string(),
    })?;
    let ip: IpAddr = ip_text.trim().parse().map_err(|_| ConfigError::InvalidIp {
        service: service.to_string(),
        value: ip_text.clone(),
    })?;

    let allowed = match &raw.valid_port {
        Some(field) => ports::parse_ports(&field.as_spec())?,
        None => Default::default(),
    };
    let blocked = match &raw.block_port {
        Some(field) => ports::parse_ports(&field.as_spec())?,
        None => Default::default(),
    };

    let mut target = Target::new(service, role, ip)
        .with_allowed(allowed)
        .with_blocked(blocked);
    target.hostname = raw.hostname.filter(|h| !h.trim().is_empty());
    Ok(target)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
