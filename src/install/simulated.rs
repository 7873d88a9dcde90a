use crate::install::traits::{DeferredPrompt, InstallOffer, InstallOutcome, InstallSignal};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

#[derive(Debug, Default)]
struct Counters {
    suppressed: AtomicUsize,
    shown: AtomicUsize,
}

/// In-process install environment.
///
/// Emits lifecycle signals to one registered tracker and lets the caller
/// play the user by settling each prompt through a [`PendingDecision`].
pub struct SimulatedEnvironment {
    tx: mpsc::UnboundedSender<InstallSignal>,
    counters: Arc<Counters>,
}

impl SimulatedEnvironment {
    /// Create the environment and the receiver a tracker registers with
    pub fn new() -> (Self, mpsc::UnboundedReceiver<InstallSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let env = Self {
            tx,
            counters: Arc::new(Counters::default()),
        };
        (env, rx)
    }

    /// Announce that the app can be installed.
    ///
    /// Returns `None` when no tracker is registered anymore.
    pub fn offer_install(&self) -> Option<PendingDecision> {
        let (decision_tx, decision_rx) = oneshot::channel();
        let offer = SimulatedOffer {
            decision: decision_rx,
            counters: Arc::clone(&self.counters),
        };

        match self.tx.send(InstallSignal::OfferAvailable(Box::new(offer))) {
            Ok(()) => Some(PendingDecision { tx: decision_tx }),
            Err(_) => {
                debug!("Install offer dropped, no tracker registered");
                None
            }
        }
    }

    /// Announce that installation finished
    pub fn complete_install(&self) -> bool {
        self.tx.send(InstallSignal::Installed).is_ok()
    }

    pub fn is_listening(&self) -> bool {
        !self.tx.is_closed()
    }

    /// How many offers had their native prompt suppressed
    pub fn suppressed_prompts(&self) -> usize {
        self.counters.suppressed.load(Ordering::SeqCst)
    }

    /// How many deferred prompts were shown to the user
    pub fn prompts_shown(&self) -> usize {
        self.counters.shown.load(Ordering::SeqCst)
    }
}

/// The user's side of one install prompt
#[derive(Debug)]
pub struct PendingDecision {
    tx: oneshot::Sender<InstallOutcome>,
}

impl PendingDecision {
    /// Settle the prompt. Returns `false` if the prompt is gone.
    pub fn decide(self, outcome: InstallOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

struct SimulatedOffer {
    decision: oneshot::Receiver<InstallOutcome>,
    counters: Arc<Counters>,
}

impl InstallOffer for SimulatedOffer {
    fn defer(self: Box<Self>) -> Box<dyn DeferredPrompt> {
        self.counters.suppressed.fetch_add(1, Ordering::SeqCst);
        Box::new(SimulatedPrompt {
            decision: Some(self.decision),
            counters: self.counters,
        })
    }
}

struct SimulatedPrompt {
    decision: Option<oneshot::Receiver<InstallOutcome>>,
    counters: Arc<Counters>,
}

#[async_trait]
impl DeferredPrompt for SimulatedPrompt {
    async fn prompt(&mut self) -> Result<InstallOutcome> {
        let decision = self.decision.take().context("install prompt already shown")?;
        self.counters.shown.fetch_add(1, Ordering::SeqCst);
        decision.await.context("install prompt closed without a decision")
    }
}
