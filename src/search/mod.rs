pub mod dispatch;
pub mod form;
pub mod handoff;
pub mod overlay;
pub mod price;

pub use dispatch::{Delivery, ResultsView, SearchBus, SearchDispatcher, SEARCH_EVENT};
pub use form::{FilterField, ProfileSelector, SearchForm, WardSelection, WardSelector};
pub use handoff::HandoffSlot;
pub use overlay::{search_heading, SearchOverlay};
pub use price::{format_thousands, PriceInput};
