use anyhow::Result;

/// The page the shell is currently showing, plus its session storage.
///
/// Implemented by the in-memory shell used in tests and by the headless
/// Chrome shell driving a real page.
pub trait PageShell {
    /// Path of the active view, e.g. `/bookmarks`
    fn current_path(&self) -> String;

    /// Navigate to another view of the application
    fn navigate(&mut self, path: &str) -> Result<()>;

    /// Write a value to session storage, replacing any previous value
    fn store_session(&mut self, key: &str, value: &str) -> Result<()>;

    /// Read a value from session storage and remove it
    fn take_session(&mut self, key: &str) -> Result<Option<String>>;
}

/// Display modes an installed web app can run in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Standalone,
    Fullscreen,
    MinimalUi,
}

impl DisplayMode {
    pub const INSTALLED: [DisplayMode; 3] = [
        DisplayMode::Standalone,
        DisplayMode::Fullscreen,
        DisplayMode::MinimalUi,
    ];

    /// Media query matching this display mode
    pub fn media_query(&self) -> &'static str {
        match self {
            DisplayMode::Standalone => "(display-mode: standalone)",
            DisplayMode::Fullscreen => "(display-mode: fullscreen)",
            DisplayMode::MinimalUi => "(display-mode: minimal-ui)",
        }
    }
}

/// Environment checks revealing whether the app already runs installed
pub trait DisplayProbe {
    fn matches_display_mode(&self, mode: DisplayMode) -> bool;

    /// Legacy `navigator.standalone` flag set by iOS home-screen apps
    fn legacy_standalone(&self) -> bool;

    fn referrer(&self) -> Option<String>;

    /// Whether any check reports an installed shell
    fn is_installed(&self) -> bool {
        DisplayMode::INSTALLED
            .iter()
            .any(|mode| self.matches_display_mode(*mode))
            || self.legacy_standalone()
            || self
                .referrer()
                .map(|r| r.starts_with("android-app://"))
                .unwrap_or(false)
    }
}
