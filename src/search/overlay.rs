use crate::error::ShellError;
use crate::models::SearchFilters;
use crate::search::dispatch::{Delivery, SearchDispatcher};
use crate::search::form::SearchForm;
use crate::shell::PageShell;
use tracing::{debug, info};

/// Title of the search overlay for the view it was opened from
pub fn search_heading(path: &str) -> &'static str {
    match path {
        "/bookmarks" => "Search My Bookmarks",
        "/my-properties" => "Search My Properties",
        "/recently-removed-bookmarks" => "Search Removed Bookmarks",
        _ => "Search Properties",
    }
}

/// The search popup. A fresh form is created each time it opens.
#[derive(Debug, Default)]
pub struct SearchOverlay {
    form: Option<SearchForm>,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        debug!("Opening search overlay");
        self.form = Some(SearchForm::new());
    }

    pub fn close(&mut self) {
        self.form = None;
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&SearchForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut SearchForm> {
        self.form.as_mut()
    }

    /// Deliver the current criteria and close. `None` when the overlay is closed.
    pub fn submit(
        &mut self,
        dispatcher: &SearchDispatcher,
        shell: &mut dyn PageShell,
    ) -> Result<Option<Delivery>, ShellError> {
        let Some(form) = self.form.as_ref() else {
            return Ok(None);
        };

        let filters = form.filters();
        info!("Submitting search with {} filter(s)", filters.defined_fields());

        let delivery = dispatcher.deliver(filters, shell)?;
        self.close();
        Ok(Some(delivery))
    }

    /// Reset every field and deliver an empty search.
    ///
    /// The overlay stays open when the active view renders results in place.
    pub fn clear(
        &mut self,
        dispatcher: &SearchDispatcher,
        shell: &mut dyn PageShell,
    ) -> Result<Option<Delivery>, ShellError> {
        let Some(form) = self.form.as_mut() else {
            return Ok(None);
        };
        form.reset();

        let delivery = dispatcher.deliver(SearchFilters::default(), shell)?;
        if matches!(delivery, Delivery::Handoff { .. }) {
            self.close();
        }
        Ok(Some(delivery))
    }
}
