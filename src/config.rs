use crate::error::ConfigError;
use std::time::Duration;

/// Views that render search results in place
pub const DEFAULT_IN_PLACE_PATHS: [&str; 4] =
    ["/", "/bookmarks", "/my-properties", "/recently-removed-bookmarks"];

/// Session storage key carrying filters across one navigation
pub const DEFAULT_HANDOFF_KEY: &str = "rentapp_search_filters";

/// Runtime configuration for the shell
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub log_level: String,
    pub handoff_key: String,
    pub handoff_ttl: Duration,
    pub results_path: String,
    pub in_place_paths: Vec<String>,
    pub install_settle: Duration,
    /// Page to drive with headless Chrome; the in-memory shell is used when absent
    pub browser_url: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            handoff_key: DEFAULT_HANDOFF_KEY.to_string(),
            handoff_ttl: Duration::from_secs(60),
            results_path: "/".to_string(),
            in_place_paths: DEFAULT_IN_PLACE_PATHS.iter().map(|p| p.to_string()).collect(),
            install_settle: Duration::from_millis(3000),
            browser_url: None,
        }
    }
}

impl ShellConfig {
    /// Load configuration, reading a `.env` file first when one exists
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from the process environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        build_config(|key| std::env::var(key))
    }
}

fn build_config<F>(lookup: F) -> Result<ShellConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ShellConfig::default();

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let results_path = lookup("RENTAPP_RESULTS_PATH").unwrap_or(defaults.results_path);
    if !results_path.starts_with('/') {
        return Err(ConfigError::InvalidEnvVar {
            var: "RENTAPP_RESULTS_PATH".to_string(),
            reason: format!("expected an absolute path, got {results_path:?}"),
        });
    }

    let in_place_paths = match lookup("RENTAPP_IN_PLACE_PATHS") {
        Ok(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => defaults.in_place_paths,
    };

    let handoff_key = lookup("RENTAPP_HANDOFF_KEY").unwrap_or(defaults.handoff_key);
    if handoff_key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "RENTAPP_HANDOFF_KEY".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(ShellConfig {
        log_level: lookup("RENTAPP_LOG_LEVEL").unwrap_or(defaults.log_level),
        handoff_key,
        handoff_ttl: Duration::from_secs(parse_u64("RENTAPP_HANDOFF_TTL_SECS", 60)?),
        results_path,
        in_place_paths,
        install_settle: Duration::from_millis(parse_u64("RENTAPP_INSTALL_SETTLE_MS", 3000)?),
        browser_url: lookup("RENTAPP_BROWSER_URL").ok().filter(|url| !url.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let map = HashMap::new();
        let config = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.in_place_paths.len(), 4);
    }

    #[test]
    fn overrides_are_applied() {
        let mut map = HashMap::new();
        map.insert("RENTAPP_IN_PLACE_PATHS", "/, /bookmarks ,");
        map.insert("RENTAPP_HANDOFF_TTL_SECS", "5");
        map.insert("RENTAPP_INSTALL_SETTLE_MS", "250");
        map.insert("RENTAPP_BROWSER_URL", "http://localhost:3000");
        let config = build_config(lookup_from_map(&map)).unwrap();

        assert_eq!(config.in_place_paths, vec!["/", "/bookmarks"]);
        assert_eq!(config.handoff_ttl, Duration::from_secs(5));
        assert_eq!(config.install_settle, Duration::from_millis(250));
        assert_eq!(config.browser_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn invalid_number_is_rejected() {
        let mut map = HashMap::new();
        map.insert("RENTAPP_HANDOFF_TTL_SECS", "soon");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RENTAPP_HANDOFF_TTL_SECS"),
            "got: {result:?}"
        );
    }

    #[test]
    fn relative_results_path_is_rejected() {
        let mut map = HashMap::new();
        map.insert("RENTAPP_RESULTS_PATH", "listings");
        assert!(build_config(lookup_from_map(&map)).is_err());
    }
}
