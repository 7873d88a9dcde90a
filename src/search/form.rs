use crate::catalog::{PropertyTaxonomy, WardCatalog, WardOption, OTHER_WARD_SLUG};
use crate::models::{PropertyStatus, Region, SearchFilters};
use crate::search::price::PriceInput;
use tracing::debug;

/// Form fields addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    PropertyType,
    Profile,
    Status,
    Region,
    Ward,
    MinPrice,
    MaxPrice,
}

/// What the ward selector should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WardSelector {
    /// No region chosen yet
    SelectRegionFirst,
    /// The region has no catalog entry
    Unavailable,
    Options(Vec<WardOption>),
}

/// What the profile selector should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelector {
    SelectTypeFirst,
    NoProfiles,
    Options(Vec<String>),
}

/// Result of picking an entry in the ward selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WardSelection {
    Selected(String),
    /// The placeholder entry was picked
    Cleared,
    /// The `Other` sentinel was picked; a custom ward name is being asked for
    PromptOpened,
    Declined,
}

/// In-progress search criteria of the search overlay.
///
/// Dependent fields are kept consistent on every update: changing the
/// property type clears the profile, changing the region clears the ward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    property_type: Option<String>,
    profile: Option<String>,
    status: Option<PropertyStatus>,
    region: Option<Region>,
    ward: Option<String>,
    min_price: PriceInput,
    max_price: PriceInput,
    // Text of the custom ward prompt while it is open
    ward_prompt: Option<String>,
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one field from selector or input text
    pub fn set_field(
        &mut self,
        field: FilterField,
        value: &str,
        taxonomy: &dyn PropertyTaxonomy,
        catalog: &WardCatalog,
    ) -> bool {
        match field {
            FilterField::PropertyType => self.set_property_type(value, taxonomy),
            FilterField::Profile => self.set_profile(value, taxonomy),
            FilterField::Status => self.set_status(value),
            FilterField::Region => self.set_region(value),
            FilterField::Ward => !matches!(self.select_ward(value, catalog), WardSelection::Declined),
            FilterField::MinPrice => {
                self.set_min_price(value);
                true
            }
            FilterField::MaxPrice => {
                self.set_max_price(value);
                true
            }
        }
    }

    pub fn set_property_type(&mut self, value: &str, taxonomy: &dyn PropertyTaxonomy) -> bool {
        let next = match non_empty(value) {
            Some(category) if taxonomy.is_category(category) => Some(category.to_string()),
            Some(category) => {
                debug!("Unknown property type {:?}", category);
                return false;
            }
            None => None,
        };

        if next != self.property_type {
            self.property_type = next;
            self.profile = None;
        }
        true
    }

    pub fn set_profile(&mut self, value: &str, taxonomy: &dyn PropertyTaxonomy) -> bool {
        let Some(profile) = non_empty(value) else {
            self.profile = None;
            return true;
        };
        let Some(category) = self.property_type.as_deref() else {
            debug!("Profile {:?} chosen before a property type", profile);
            return false;
        };

        let valid = taxonomy
            .children(category)
            .map(|children| children.iter().any(|c| c == profile))
            .unwrap_or(false);
        if !valid {
            debug!("{:?} is not a profile of {:?}", profile, category);
            return false;
        }

        self.profile = Some(profile.to_string());
        true
    }

    pub fn set_status(&mut self, value: &str) -> bool {
        match non_empty(value).map(str::parse::<PropertyStatus>) {
            None => self.status = None,
            Some(Ok(status)) => self.status = Some(status),
            Some(Err(e)) => {
                debug!("{}", e);
                return false;
            }
        }
        true
    }

    pub fn set_region(&mut self, value: &str) -> bool {
        let next = match non_empty(value).map(str::parse::<Region>) {
            None => None,
            Some(Ok(region)) => Some(region),
            Some(Err(e)) => {
                debug!("{}", e);
                return false;
            }
        };

        if next != self.region {
            self.region = next;
            self.ward = None;
            self.ward_prompt = None;
        }
        true
    }

    /// Pick an entry of the ward selector
    pub fn select_ward(&mut self, value: &str, catalog: &WardCatalog) -> WardSelection {
        let Some(region) = self.region else {
            debug!("Ward chosen before a region");
            return WardSelection::Declined;
        };

        if catalog.wards(region).is_none() {
            debug!("No wards listed for {}", region);
            return WardSelection::Declined;
        }

        match non_empty(value) {
            None => {
                self.ward = None;
                WardSelection::Cleared
            }
            Some(OTHER_WARD_SLUG) => {
                self.ward = None;
                self.ward_prompt = Some(String::new());
                WardSelection::PromptOpened
            }
            Some(slug) if catalog.contains_slug(region, slug) => {
                self.ward = Some(slug.to_string());
                self.ward_prompt = None;
                WardSelection::Selected(slug.to_string())
            }
            Some(slug) => {
                debug!("{:?} is not a ward of {}", slug, region);
                WardSelection::Declined
            }
        }
    }

    pub fn is_ward_prompt_open(&self) -> bool {
        self.ward_prompt.is_some()
    }

    pub fn ward_prompt_text(&self) -> Option<&str> {
        self.ward_prompt.as_deref()
    }

    /// Type into the custom ward prompt
    pub fn edit_custom_ward(&mut self, text: &str) {
        if let Some(prompt) = self.ward_prompt.as_mut() {
            *prompt = text.to_string();
        }
    }

    /// Add the typed ward to the catalog and select it.
    ///
    /// Declined, leaving the prompt open, when the name is blank or the
    /// region has no catalog entry.
    pub fn confirm_custom_ward(&mut self, catalog: &mut WardCatalog) -> Option<String> {
        let region = self.region?;
        let name = self.ward_prompt.as_deref()?;

        let slug = catalog.add_custom(region, name)?;
        self.ward = Some(slug.clone());
        self.ward_prompt = None;
        Some(slug)
    }

    /// Close the prompt, leaving no ward selected
    pub fn cancel_custom_ward(&mut self) {
        self.ward_prompt = None;
        self.ward = None;
    }

    pub fn set_min_price(&mut self, raw: &str) {
        self.min_price.set(raw);
    }

    pub fn set_max_price(&mut self, raw: &str) {
        self.max_price.set(raw);
    }

    pub fn property_type(&self) -> Option<&str> {
        self.property_type.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn status(&self) -> Option<PropertyStatus> {
        self.status
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn ward(&self) -> Option<&str> {
        self.ward.as_deref()
    }

    pub fn min_price(&self) -> &PriceInput {
        &self.min_price
    }

    pub fn max_price(&self) -> &PriceInput {
        &self.max_price
    }

    pub fn ward_selector(&self, catalog: &WardCatalog) -> WardSelector {
        match self.region {
            None => WardSelector::SelectRegionFirst,
            Some(region) => catalog
                .options(region)
                .map(WardSelector::Options)
                .unwrap_or(WardSelector::Unavailable),
        }
    }

    pub fn profile_selector(&self, taxonomy: &dyn PropertyTaxonomy) -> ProfileSelector {
        match self.property_type.as_deref().and_then(|t| taxonomy.children(t)) {
            None => ProfileSelector::SelectTypeFirst,
            Some(children) if children.is_empty() => ProfileSelector::NoProfiles,
            Some(children) => ProfileSelector::Options(children),
        }
    }

    /// Current criteria as a payload, unset fields omitted
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            property_type: self.property_type.clone(),
            profile: self.profile.clone(),
            status: self.status,
            region: self.region,
            ward: self.ward.clone(),
            min_price: self.min_price.value(),
            max_price: self.max_price.value(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StaticTaxonomy, OTHER_WARD};

    fn fixtures() -> (StaticTaxonomy, WardCatalog) {
        (StaticTaxonomy::default(), WardCatalog::with_defaults())
    }

    #[test]
    fn changing_property_type_clears_profile() {
        let (taxonomy, _) = fixtures();
        let mut form = SearchForm::new();
        assert!(form.set_property_type("Apartment", &taxonomy));
        assert!(form.set_profile("Studio", &taxonomy));
        assert_eq!(form.profile(), Some("Studio"));

        assert!(form.set_property_type("House", &taxonomy));
        assert_eq!(form.property_type(), Some("House"));
        assert_eq!(form.profile(), None);
    }

    #[test]
    fn reselecting_same_property_type_keeps_profile() {
        let (taxonomy, _) = fixtures();
        let mut form = SearchForm::new();
        form.set_property_type("House", &taxonomy);
        form.set_profile("Villa", &taxonomy);
        form.set_property_type("House", &taxonomy);
        assert_eq!(form.profile(), Some("Villa"));
    }

    #[test]
    fn profile_requires_matching_parent() {
        let (taxonomy, _) = fixtures();
        let mut form = SearchForm::new();
        assert!(!form.set_profile("Studio", &taxonomy));

        form.set_property_type("House", &taxonomy);
        assert!(!form.set_profile("Studio", &taxonomy));
        assert_eq!(form.profile(), None);
        assert!(!form.set_property_type("Castle", &taxonomy));
        assert_eq!(form.property_type(), Some("House"));
    }

    #[test]
    fn changing_region_clears_ward() {
        let (_, catalog) = fixtures();
        let mut form = SearchForm::new();
        form.set_region("dar-es-salaam");
        assert_eq!(
            form.select_ward("oyster-bay", &catalog),
            WardSelection::Selected("oyster-bay".into())
        );

        form.set_region("dodoma");
        assert_eq!(form.ward(), None);
        assert_eq!(form.region(), Some(Region::Dodoma));
    }

    #[test]
    fn ward_requires_region_and_known_slug() {
        let (_, catalog) = fixtures();
        let mut form = SearchForm::new();
        assert_eq!(form.select_ward("kawe", &catalog), WardSelection::Declined);
        assert_eq!(form.ward_selector(&catalog), WardSelector::SelectRegionFirst);

        form.set_region("mara");
        assert_eq!(form.select_ward("kawe", &catalog), WardSelection::Declined);
        assert_eq!(form.ward(), None);
    }

    #[test]
    fn region_without_catalog_entry_shows_placeholder() {
        let catalog = WardCatalog::empty();
        let mut form = SearchForm::new();
        form.set_region("arusha");
        assert_eq!(form.ward_selector(&catalog), WardSelector::Unavailable);
    }

    #[test]
    fn region_without_catalog_entry_declines_other() {
        let catalog = WardCatalog::empty();
        let mut form = SearchForm::new();
        form.set_region("arusha");

        assert_eq!(form.select_ward("other", &catalog), WardSelection::Declined);
        assert!(!form.is_ward_prompt_open());
        assert_eq!(form.ward(), None);
    }

    #[test]
    fn other_opens_prompt_and_confirm_adds_custom_ward() {
        let (_, mut catalog) = fixtures();
        let mut form = SearchForm::new();
        form.set_region("arusha");

        assert_eq!(form.select_ward("other", &catalog), WardSelection::PromptOpened);
        assert!(form.is_ward_prompt_open());
        assert_eq!(form.ward(), None);

        form.edit_custom_ward("Kisongo West");
        assert_eq!(form.confirm_custom_ward(&mut catalog).as_deref(), Some("kisongo-west"));
        assert!(!form.is_ward_prompt_open());
        assert_eq!(form.ward(), Some("kisongo-west"));

        let wards = catalog.wards(Region::Arusha).unwrap();
        let idx = wards.iter().position(|w| w == "Kisongo West").unwrap();
        assert_eq!(wards[idx + 1], OTHER_WARD);
    }

    #[test]
    fn blank_custom_ward_is_declined() {
        let (_, mut catalog) = fixtures();
        let mut form = SearchForm::new();
        form.set_region("arusha");
        form.select_ward("other", &catalog);
        form.edit_custom_ward("   ");

        assert_eq!(form.confirm_custom_ward(&mut catalog), None);
        assert!(form.is_ward_prompt_open());
    }

    #[test]
    fn cancel_closes_prompt_with_nothing_selected() {
        let (_, catalog) = fixtures();
        let mut form = SearchForm::new();
        form.set_region("arusha");
        form.select_ward("other", &catalog);
        form.edit_custom_ward("Half typed");
        form.cancel_custom_ward();

        assert!(!form.is_ward_prompt_open());
        assert_eq!(form.ward(), None);
        assert_eq!(form.ward_prompt_text(), None);
    }

    #[test]
    fn profile_selector_states() {
        let (taxonomy, _) = fixtures();
        let mut form = SearchForm::new();
        assert_eq!(form.profile_selector(&taxonomy), ProfileSelector::SelectTypeFirst);
        form.set_property_type("Land", &taxonomy);
        assert_eq!(form.profile_selector(&taxonomy), ProfileSelector::NoProfiles);
        form.set_property_type("Room", &taxonomy);
        assert!(matches!(form.profile_selector(&taxonomy), ProfileSelector::Options(ref o) if o.len() == 3));
    }

    #[test]
    fn filters_omit_unset_fields() {
        let (taxonomy, catalog) = fixtures();
        let mut form = SearchForm::new();
        form.set_field(FilterField::Status, "occupied", &taxonomy, &catalog);
        form.set_field(FilterField::MinPrice, "1000000", &taxonomy, &catalog);

        assert_eq!(form.min_price().display(), "1,000,000");
        let filters = form.filters();
        assert_eq!(filters.min_price, Some(1_000_000));
        assert_eq!(filters.status, Some(PropertyStatus::Occupied));
        assert_eq!(filters.defined_fields(), 2);
    }
}
