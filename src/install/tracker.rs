use crate::error::ShellError;
use crate::install::traits::{DeferredPrompt, InstallOutcome, InstallSignal};
use crate::shell::DisplayProbe;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// No signal seen yet
    Unknown,
    /// No install offer arrived within the settle window
    NotInstallable,
    /// A prompt is stashed and can be shown
    Installable,
    Installed,
    /// The stashed prompt was shown and discarded
    Consumed,
}

/// Tracks whether the app can offer installation or is already installed
pub struct InstallTracker {
    state: InstallState,
    stashed: Option<Box<dyn DeferredPrompt>>,
    signals: Option<mpsc::UnboundedReceiver<InstallSignal>>,
}

impl InstallTracker {
    /// Probe the environment once and register for lifecycle signals
    pub fn new(probe: &dyn DisplayProbe, signals: mpsc::UnboundedReceiver<InstallSignal>) -> Self {
        let state = if probe.is_installed() {
            InstallState::Installed
        } else {
            InstallState::Unknown
        };
        info!("Install tracker started in state {:?}", state);

        Self {
            state,
            stashed: None,
            signals: Some(signals),
        }
    }

    pub fn state(&self) -> InstallState {
        self.state
    }

    /// Whether an install button should be offered
    pub fn can_offer_install(&self) -> bool {
        self.stashed.is_some()
    }

    pub fn is_installed(&self) -> bool {
        self.state == InstallState::Installed
    }

    pub fn is_listening(&self) -> bool {
        self.signals.is_some()
    }

    pub fn handle(&mut self, signal: InstallSignal) {
        match signal {
            InstallSignal::OfferAvailable(offer) => {
                if self.state == InstallState::Installed {
                    debug!("Ignoring install offer, app already installed");
                    return;
                }
                info!("Install offer available");
                self.stashed = Some(offer.defer());
                self.state = InstallState::Installable;
            }
            InstallSignal::Installed => {
                info!("App installed");
                self.stashed = None;
                self.state = InstallState::Installed;
            }
        }
    }

    /// Apply every signal already queued, returning how many were handled
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let Some(rx) = self.signals.as_mut() else {
                break;
            };
            match rx.try_recv() {
                Ok(signal) => {
                    self.handle(signal);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Install signal source went away");
                    self.signals = None;
                    break;
                }
            }
        }
        handled
    }

    /// Wait up to `window` for the first signal.
    ///
    /// When nothing arrives and the state is still unknown, the environment
    /// is taken not to support installation. A later offer still counts.
    pub async fn await_offer(&mut self, window: Duration) {
        if self.state != InstallState::Unknown {
            self.pump();
            return;
        }
        let Some(rx) = self.signals.as_mut() else {
            self.state = InstallState::NotInstallable;
            return;
        };

        match tokio::time::timeout(window, rx.recv()).await {
            Ok(Some(signal)) => {
                self.handle(signal);
                self.pump();
            }
            Ok(None) => {
                debug!("Install signal source went away");
                self.signals = None;
                self.state = InstallState::NotInstallable;
            }
            Err(_) => {
                info!(
                    "No install offer within {:?}; environment may not support installation",
                    window
                );
                self.state = InstallState::NotInstallable;
            }
        }
    }

    /// Show the stashed prompt and report whether the user accepted.
    ///
    /// Without a stashed prompt this returns `Ok(false)` right away. The
    /// prompt is discarded before waiting, whatever the outcome.
    pub async fn request_install(&mut self) -> Result<bool, ShellError> {
        let Some(mut prompt) = self.stashed.take() else {
            debug!("Install prompt not available");
            return Ok(false);
        };
        self.state = InstallState::Consumed;

        let outcome = prompt.prompt().await.map_err(ShellError::InstallPrompt)?;
        match outcome {
            InstallOutcome::Accepted => {
                info!("User accepted the install prompt");
                Ok(true)
            }
            InstallOutcome::Dismissed => {
                info!("User dismissed the install prompt");
                Ok(false)
            }
        }
    }

    /// Deregister from lifecycle signals
    pub fn teardown(&mut self) {
        self.signals = None;
    }
}
