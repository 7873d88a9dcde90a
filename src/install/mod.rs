pub mod simulated;
pub mod tracker;
pub mod traits;

pub use simulated::{PendingDecision, SimulatedEnvironment};
pub use tracker::{InstallState, InstallTracker};
pub use traits::{DeferredPrompt, InstallOffer, InstallOutcome, InstallSignal};
