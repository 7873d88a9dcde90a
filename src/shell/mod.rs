pub mod browser;
pub mod memory;
pub mod traits;

pub use browser::BrowserShell;
pub use memory::{MemoryShell, StaticProbe};
pub use traits::{DisplayMode, DisplayProbe, PageShell};
