use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::models::SearchFilters;
use crate::search::handoff::HandoffSlot;
use crate::shell::PageShell;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, warn};

/// Name of the process-wide search event
pub const SEARCH_EVENT: &str = "rentappSearch";

/// Broadcast channel for submitted search filters.
///
/// Listeners registered in the current view receive every published payload.
/// Publishing with nobody listening is not an error.
#[derive(Debug, Clone)]
pub struct SearchBus {
    tx: broadcast::Sender<SearchFilters>,
}

impl SearchBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchFilters> {
        self.tx.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Deliver `filters` to every listener, returning how many received it
    pub fn publish(&self, filters: SearchFilters) -> usize {
        match self.tx.send(filters) {
            Ok(n) => {
                debug!("{} delivered to {} listener(s)", SEARCH_EVENT, n);
                n
            }
            Err(_) => {
                debug!("{} published with no listeners", SEARCH_EVENT);
                0
            }
        }
    }
}

impl Default for SearchBus {
    fn default() -> Self {
        Self::new()
    }
}

/// How submitted filters reached a results view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The active view renders results; filters were broadcast to it
    InPlace { listeners: usize },
    /// Filters were parked in the handoff slot and the shell navigated away
    Handoff { destination: String },
}

/// Routes submitted filters to the view that can render them
#[derive(Debug, Clone)]
pub struct SearchDispatcher {
    bus: SearchBus,
    slot: HandoffSlot,
    in_place_paths: Vec<String>,
    results_path: String,
}

impl SearchDispatcher {
    pub fn new(
        bus: SearchBus,
        slot: HandoffSlot,
        in_place_paths: Vec<String>,
        results_path: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            slot,
            in_place_paths,
            results_path: results_path.into(),
        }
    }

    pub fn from_config(config: &ShellConfig, bus: SearchBus) -> Self {
        Self::new(
            bus,
            HandoffSlot::new(config.handoff_key.clone(), config.handoff_ttl),
            config.in_place_paths.clone(),
            config.results_path.clone(),
        )
    }

    pub fn bus(&self) -> &SearchBus {
        &self.bus
    }

    pub fn slot(&self) -> &HandoffSlot {
        &self.slot
    }

    pub fn results_path(&self) -> &str {
        &self.results_path
    }

    /// Whether the view at `path` renders search results itself
    pub fn renders_in_place(&self, path: &str) -> bool {
        self.in_place_paths.iter().any(|p| p == path)
    }

    /// Broadcast in place, or hand off to the results view.
    ///
    /// The handoff goes through the session slot only; the results view picks
    /// it up when it mounts, so no timed broadcast follows the navigation.
    pub fn deliver(
        &self,
        filters: SearchFilters,
        shell: &mut dyn PageShell,
    ) -> Result<Delivery, ShellError> {
        let path = shell.current_path();

        if self.renders_in_place(&path) {
            let listeners = self.bus.publish(filters);
            info!("Search applied in place on {}", path);
            return Ok(Delivery::InPlace { listeners });
        }

        self.slot.write(shell, &filters)?;
        shell
            .navigate(&self.results_path)
            .map_err(|source| ShellError::Navigation {
                path: self.results_path.clone(),
                source,
            })?;
        info!("Search handed off from {} to {}", path, self.results_path);

        Ok(Delivery::Handoff {
            destination: self.results_path.clone(),
        })
    }
}

/// A mounted view listing search results
pub struct ResultsView {
    path: String,
    listener: broadcast::Receiver<SearchFilters>,
    active: SearchFilters,
}

impl ResultsView {
    /// Register for search events, then consume any pending handoff
    pub fn mount(
        dispatcher: &SearchDispatcher,
        shell: &mut dyn PageShell,
    ) -> Result<Self, ShellError> {
        let listener = dispatcher.bus().subscribe();
        let path = shell.current_path();

        let active = match dispatcher.slot().take(shell)? {
            Some(filters) => {
                info!(
                    "Applying handed-off search on {} ({} filter(s))",
                    path,
                    filters.defined_fields()
                );
                filters
            }
            None => SearchFilters::default(),
        };

        Ok(Self {
            path,
            listener,
            active,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Filters the view currently shows results for
    pub fn active(&self) -> &SearchFilters {
        &self.active
    }

    /// Apply broadcasts received since the last poll; the newest one wins
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.listener.try_recv() {
                Ok(filters) => {
                    self.active = filters;
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Results view on {} skipped {} search event(s)", self.path, skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }
}
