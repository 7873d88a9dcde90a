use anyhow::Result;
use async_trait::async_trait;

/// The user's answer to an install prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// An install offer announced by the environment.
///
/// Deferring it is the explicit act of keeping the environment's own install
/// UI hidden; what comes back is the capability to show the prompt later.
pub trait InstallOffer: Send {
    fn defer(self: Box<Self>) -> Box<dyn DeferredPrompt>;
}

/// A prompt kept back from an install offer. Shown at most once.
#[async_trait]
pub trait DeferredPrompt: Send {
    /// Show the prompt and wait for the user's decision
    async fn prompt(&mut self) -> Result<InstallOutcome>;
}

/// Lifecycle signals delivered to a registered tracker
pub enum InstallSignal {
    OfferAvailable(Box<dyn InstallOffer>),
    Installed,
}

impl std::fmt::Debug for InstallSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallSignal::OfferAvailable(_) => f.write_str("OfferAvailable"),
            InstallSignal::Installed => f.write_str("Installed"),
        }
    }
}
