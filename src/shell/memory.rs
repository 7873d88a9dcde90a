use crate::shell::traits::{DisplayMode, DisplayProbe, PageShell};
use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

/// In-process shell keeping the current path and session storage in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryShell {
    path: String,
    session: HashMap<String, String>,
    history: Vec<String>,
    writes: usize,
}

impl MemoryShell {
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    /// Paths navigated to, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of session storage writes so far
    pub fn session_writes(&self) -> usize {
        self.writes
    }

    pub fn peek_session(&self, key: &str) -> Option<&str> {
        self.session.get(key).map(String::as_str)
    }
}

impl PageShell for MemoryShell {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&mut self, path: &str) -> Result<()> {
        debug!("Navigating {} -> {}", self.path, path);
        self.path = path.to_string();
        self.history.push(path.to_string());
        Ok(())
    }

    fn store_session(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.session.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn take_session(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.session.remove(key))
    }
}

/// Probe answering from fixed values
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    pub display_modes: Vec<DisplayMode>,
    pub legacy_standalone: bool,
    pub referrer: Option<String>,
}

impl StaticProbe {
    /// Plain browser tab
    pub fn browser_tab() -> Self {
        Self::default()
    }

    pub fn standalone() -> Self {
        Self {
            display_modes: vec![DisplayMode::Standalone],
            ..Self::default()
        }
    }
}

impl DisplayProbe for StaticProbe {
    fn matches_display_mode(&self, mode: DisplayMode) -> bool {
        self.display_modes.contains(&mode)
    }

    fn legacy_standalone(&self) -> bool {
        self.legacy_standalone
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }
}
