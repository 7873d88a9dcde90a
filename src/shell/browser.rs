use crate::shell::traits::{DisplayMode, DisplayProbe, PageShell};
use anyhow::{bail, Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Shell driving the deployed application in headless Chrome
pub struct BrowserShell {
    // Keeps the Chrome process alive for as long as the tab is used
    _browser: Browser,
    tab: Arc<Tab>,
    base_url: String,
}

impl BrowserShell {
    /// Launch headless Chrome and open `base_url` at `start_path`
    pub fn launch(base_url: &str, start_path: &str) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open tab")?;

        let mut shell = Self {
            _browser: browser,
            tab,
            base_url: base_url.trim_end_matches('/').to_string(),
        };
        shell.navigate(start_path)?;

        Ok(shell)
    }

    fn eval(&self, script: &str) -> Result<Option<Value>> {
        let result = self
            .tab
            .evaluate(script, false)
            .with_context(|| format!("Failed to evaluate script: {script}"))?;
        Ok(result.value)
    }

    fn eval_bool(&self, script: &str) -> bool {
        match self.eval(script) {
            Ok(Some(Value::Bool(b))) => b,
            Ok(other) => {
                debug!("Non-boolean result {:?} for {}", other, script);
                false
            }
            Err(e) => {
                warn!("Probe failed: {:#}", e);
                false
            }
        }
    }
}

/// Path component of an application page URL
fn path_of(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("Failed to parse page URL {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url.path().to_string()),
        scheme => bail!("{raw} is not an application page ({scheme} scheme)"),
    }
}

/// Quote a string as a JavaScript literal
fn js_string(s: &str) -> Result<String> {
    serde_json::to_string(s).context("Failed to quote script argument")
}

impl PageShell for BrowserShell {
    fn current_path(&self) -> String {
        let url = self.tab.get_url();
        match path_of(&url) {
            Ok(path) => path,
            Err(e) => {
                // The raw URL matches no view, so searches hand off from here.
                warn!("{:#}", e);
                url
            }
        }
    }

    fn navigate(&mut self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Navigating to {}", url);

        self.tab.navigate_to(&url)?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }

    fn store_session(&mut self, key: &str, value: &str) -> Result<()> {
        let script = format!(
            "sessionStorage.setItem({}, {})",
            js_string(key)?,
            js_string(value)?
        );
        self.eval(&script)?;
        Ok(())
    }

    fn take_session(&mut self, key: &str) -> Result<Option<String>> {
        let key = js_string(key)?;
        let script = format!(
            "(() => {{ const v = sessionStorage.getItem({key}); sessionStorage.removeItem({key}); return v; }})()"
        );
        match self.eval(&script)? {
            Some(Value::String(s)) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

impl DisplayProbe for BrowserShell {
    fn matches_display_mode(&self, mode: DisplayMode) -> bool {
        self.eval_bool(&format!(
            "window.matchMedia('{}').matches",
            mode.media_query()
        ))
    }

    fn legacy_standalone(&self) -> bool {
        self.eval_bool("window.navigator.standalone === true")
    }

    fn referrer(&self) -> Option<String> {
        match self.eval("document.referrer") {
            Ok(Some(Value::String(r))) if !r.is_empty() => Some(r),
            _ => None,
        }
    }
}
