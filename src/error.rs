use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to encode search handoff: {0}")]
    HandoffEncode(#[source] serde_json::Error),

    #[error("session storage failure for key {key}: {source}")]
    Storage {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("navigation to {path} failed: {source}")]
    Navigation {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("install prompt failed: {0}")]
    InstallPrompt(#[source] anyhow::Error),
}
