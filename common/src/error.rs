use std::path::PathBuf;

/// Fatal problems with the checklist or the requested selection.
///
/// Every variant aborts the run before any probe is sent.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid port specification '{token}' in \"{spec}\"")]
    InvalidPortSpec { spec: String, token: String },

    /// `key` is the endpoint key as written in the checklist (`Public`, `Private` or `Internal`).
    #[error("{service}: please specify IP address for the {key} endpoint")]
    MissingIp { service: String, key: String },

    #[error("{service}: '{value}' is not a valid IP address")]
    InvalidIp { service: String, value: String },

    #[error("service '{0}' not found in the checklist")]
    UnknownService(String),

    #[error("{service}: 'Private' and 'Internal' both describe the internal endpoint")]
    DuplicateRole { service: String },

    #[error("{service}: {reason}")]
    InvalidService { service: String, reason: String },

    #[error("checklist must map service names to endpoint definitions")]
    NotAMapping,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed checklist: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
