use crate::error::ShellError;
use crate::models::SearchFilters;
use crate::shell::PageShell;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

/// Session storage slot carrying filters across exactly one navigation.
///
/// The slot holds the serialized filters object. The write time goes under a
/// companion `<key>_at` entry; the receiving view reads and clears both when
/// it mounts, dropping entries older than the TTL. An entry without a write
/// time is accepted.
#[derive(Debug, Clone)]
pub struct HandoffSlot {
    key: String,
    stamp_key: String,
    ttl: Duration,
}

impl HandoffSlot {
    pub fn new(key: impl Into<String>, ttl: Duration) -> Self {
        let key = key.into();
        Self {
            stamp_key: format!("{key}_at"),
            key,
            ttl,
        }
    }

    fn storage_error(key: &str) -> impl FnOnce(anyhow::Error) -> ShellError + '_ {
        move |source| ShellError::Storage {
            key: key.to_string(),
            source,
        }
    }

    pub fn write(&self, shell: &mut dyn PageShell, filters: &SearchFilters) -> Result<(), ShellError> {
        let json = serde_json::to_string(filters).map_err(ShellError::HandoffEncode)?;

        shell
            .store_session(&self.key, &json)
            .map_err(Self::storage_error(&self.key))?;
        shell
            .store_session(&self.stamp_key, &Utc::now().to_rfc3339())
            .map_err(Self::storage_error(&self.stamp_key))?;
        debug!("Stored search handoff under {}", self.key);
        Ok(())
    }

    /// Read and clear the slot
    pub fn take(&self, shell: &mut dyn PageShell) -> Result<Option<SearchFilters>, ShellError> {
        self.take_at(shell, Utc::now())
    }

    fn take_at(
        &self,
        shell: &mut dyn PageShell,
        now: DateTime<Utc>,
    ) -> Result<Option<SearchFilters>, ShellError> {
        let raw = shell
            .take_session(&self.key)
            .map_err(Self::storage_error(&self.key))?;
        let stamp = shell
            .take_session(&self.stamp_key)
            .map_err(Self::storage_error(&self.stamp_key))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let filters: SearchFilters = match serde_json::from_str(&raw) {
            Ok(filters) => filters,
            Err(e) => {
                warn!("Discarding malformed search handoff: {}", e);
                return Ok(None);
            }
        };

        let stored_at = stamp.and_then(|s| match DateTime::parse_from_rfc3339(&s) {
            Ok(t) => Some(t.with_timezone(&Utc)),
            Err(e) => {
                warn!("Ignoring unreadable handoff timestamp {:?}: {}", s, e);
                None
            }
        });

        // A negative age means the clock moved backwards; keep the entry.
        if let Some(age) = stored_at.and_then(|t| (now - t).to_std().ok()) {
            if age > self.ttl {
                warn!("Discarding search handoff stored {}s ago", age.as_secs());
                return Ok(None);
            }
        }

        Ok(Some(filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use crate::shell::MemoryShell;

    fn slot() -> HandoffSlot {
        HandoffSlot::new("rentapp_search_filters", Duration::from_secs(60))
    }

    #[test]
    fn take_returns_written_filters_once() {
        let mut shell = MemoryShell::at("/about");
        let filters = SearchFilters {
            region: Some(Region::Mwanza),
            ..SearchFilters::default()
        };
        slot().write(&mut shell, &filters).unwrap();

        assert_eq!(slot().take(&mut shell).unwrap(), Some(filters));
        assert_eq!(slot().take(&mut shell).unwrap(), None);
    }

    #[test]
    fn write_overwrites_previous_entry() {
        let mut shell = MemoryShell::at("/about");
        slot()
            .write(
                &mut shell,
                &SearchFilters {
                    min_price: Some(1),
                    ..SearchFilters::default()
                },
            )
            .unwrap();
        slot().write(&mut shell, &SearchFilters::default()).unwrap();

        assert_eq!(slot().take(&mut shell).unwrap(), Some(SearchFilters::default()));
    }

    #[test]
    fn stale_entry_is_discarded() {
        let mut shell = MemoryShell::at("/about");
        slot().write(&mut shell, &SearchFilters::default()).unwrap();

        let later = Utc::now() + chrono::Duration::seconds(120);
        assert_eq!(slot().take_at(&mut shell, later).unwrap(), None);
        assert!(shell.peek_session("rentapp_search_filters").is_none());
        assert!(shell.peek_session("rentapp_search_filters_at").is_none());
    }

    #[test]
    fn slot_holds_the_bare_filters_object() {
        let mut shell = MemoryShell::at("/contact");
        let filters = SearchFilters {
            region: Some(Region::Arusha),
            ..SearchFilters::default()
        };
        slot().write(&mut shell, &filters).unwrap();

        assert_eq!(
            shell.peek_session("rentapp_search_filters"),
            Some(r#"{"region":"arusha"}"#)
        );
        let stamp = shell.peek_session("rentapp_search_filters_at").unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn entry_without_timestamp_is_accepted() {
        let mut shell = MemoryShell::at("/");
        shell
            .store_session("rentapp_search_filters", r#"{"region":"arusha","minPrice":500000}"#)
            .unwrap();

        let filters = slot().take(&mut shell).unwrap().unwrap();
        assert_eq!(filters.region, Some(Region::Arusha));
        assert_eq!(filters.min_price, Some(500_000));
        assert!(shell.peek_session("rentapp_search_filters").is_none());
    }

    #[test]
    fn malformed_entry_is_discarded() {
        let mut shell = MemoryShell::at("/");
        shell
            .store_session("rentapp_search_filters", "{not json")
            .unwrap();
        assert_eq!(slot().take(&mut shell).unwrap(), None);
    }
}
