/// Lookup of property categories and their profiles (sub-types).
///
/// The taxonomy is owned by the listing side of the application; the search
/// overlay only reads it.
pub trait PropertyTaxonomy: Send + Sync {
    /// Top-level categories in selector order
    fn categories(&self) -> Vec<String>;

    /// Profiles of a category, `None` when the category is unknown
    fn children(&self, category: &str) -> Option<Vec<String>>;

    fn is_category(&self, category: &str) -> bool {
        self.children(category).is_some()
    }

    fn has_children(&self, category: &str) -> bool {
        self.children(category)
            .map(|children| !children.is_empty())
            .unwrap_or(false)
    }
}

/// Taxonomy backed by a fixed table
#[derive(Debug, Clone)]
pub struct StaticTaxonomy {
    entries: Vec<(String, Vec<String>)>,
}

impl StaticTaxonomy {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }
}

impl Default for StaticTaxonomy {
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("Apartment", &["Studio", "1 Bedroom", "2 Bedrooms", "3+ Bedrooms"]),
            ("House", &["Bungalow", "Maisonette", "Villa", "Townhouse"]),
            ("Room", &["Single Room", "Master Room", "Shared Room"]),
            ("Commercial", &["Office", "Shop", "Warehouse", "Hall"]),
            ("Land", &[]),
        ];
        Self::new(
            table
                .iter()
                .map(|(category, children)| {
                    (
                        category.to_string(),
                        children.iter().map(|c| c.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl PropertyTaxonomy for StaticTaxonomy {
    fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|(category, _)| category.clone()).collect()
    }

    fn children(&self, category: &str) -> Option<Vec<String>> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, children)| children.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_taxonomy_lookups() {
        let taxonomy = StaticTaxonomy::default();
        assert!(taxonomy.categories().contains(&"House".to_string()));
        assert!(taxonomy.has_children("Apartment"));
        assert!(taxonomy.is_category("Land"));
        assert!(!taxonomy.has_children("Land"));
        assert!(!taxonomy.is_category("Castle"));
    }
}
