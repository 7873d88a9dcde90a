use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Occupancy status a listing can be filtered by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Occupied,
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PropertyStatus::Available),
            "occupied" => Ok(PropertyStatus::Occupied),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Administrative regions listings are grouped under.
///
/// Serialized as its slug; [`Region::slug`] is the only slug table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "String", try_from = "String")]
pub enum Region {
    Arusha,
    DarEsSalaam,
    Dodoma,
    Geita,
    Iringa,
    Kagera,
    Katavi,
    Kigoma,
    Kilimanjaro,
    Lindi,
    Manyara,
    Mara,
    Mbeya,
    Morogoro,
    Mtwara,
    Mwanza,
    Njombe,
    Pwani,
    Rukwa,
    Ruvuma,
    Shinyanga,
    Simiyu,
    Singida,
    Songwe,
    Tabora,
    Tanga,
    UngujaNorth,
    UngujaSouth,
    UrbanWest,
    Other,
}

impl Region {
    /// Every region in selector order
    pub const ALL: [Region; 30] = [
        Region::Arusha,
        Region::DarEsSalaam,
        Region::Dodoma,
        Region::Geita,
        Region::Iringa,
        Region::Kagera,
        Region::Katavi,
        Region::Kigoma,
        Region::Kilimanjaro,
        Region::Lindi,
        Region::Manyara,
        Region::Mara,
        Region::Mbeya,
        Region::Morogoro,
        Region::Mtwara,
        Region::Mwanza,
        Region::Njombe,
        Region::Pwani,
        Region::Rukwa,
        Region::Ruvuma,
        Region::Shinyanga,
        Region::Simiyu,
        Region::Singida,
        Region::Songwe,
        Region::Tabora,
        Region::Tanga,
        Region::UngujaNorth,
        Region::UngujaSouth,
        Region::UrbanWest,
        Region::Other,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Region::Arusha => "arusha",
            Region::DarEsSalaam => "dar-es-salaam",
            Region::Dodoma => "dodoma",
            Region::Geita => "geita",
            Region::Iringa => "iringa",
            Region::Kagera => "kagera",
            Region::Katavi => "katavi",
            Region::Kigoma => "kigoma",
            Region::Kilimanjaro => "kilimanjaro",
            Region::Lindi => "lindi",
            Region::Manyara => "manyara",
            Region::Mara => "mara",
            Region::Mbeya => "mbeya",
            Region::Morogoro => "morogoro",
            Region::Mtwara => "mtwara",
            Region::Mwanza => "mwanza",
            Region::Njombe => "njombe",
            Region::Pwani => "pwani",
            Region::Rukwa => "rukwa",
            Region::Ruvuma => "ruvuma",
            Region::Shinyanga => "shinyanga",
            Region::Simiyu => "simiyu",
            Region::Singida => "singida",
            Region::Songwe => "songwe",
            Region::Tabora => "tabora",
            Region::Tanga => "tanga",
            Region::UngujaNorth => "unguja-north",
            Region::UngujaSouth => "unguja-south",
            Region::UrbanWest => "urban-west",
            Region::Other => "other",
        }
    }

    /// Human readable name shown in the region selector
    pub fn label(&self) -> &'static str {
        match self {
            Region::DarEsSalaam => "Dar es Salaam",
            Region::UngujaNorth => "Unguja North",
            Region::UngujaSouth => "Unguja South",
            Region::UrbanWest => "Urban West",
            Region::Arusha => "Arusha",
            Region::Dodoma => "Dodoma",
            Region::Geita => "Geita",
            Region::Iringa => "Iringa",
            Region::Kagera => "Kagera",
            Region::Katavi => "Katavi",
            Region::Kigoma => "Kigoma",
            Region::Kilimanjaro => "Kilimanjaro",
            Region::Lindi => "Lindi",
            Region::Manyara => "Manyara",
            Region::Mara => "Mara",
            Region::Mbeya => "Mbeya",
            Region::Morogoro => "Morogoro",
            Region::Mtwara => "Mtwara",
            Region::Mwanza => "Mwanza",
            Region::Njombe => "Njombe",
            Region::Pwani => "Pwani",
            Region::Rukwa => "Rukwa",
            Region::Ruvuma => "Ruvuma",
            Region::Shinyanga => "Shinyanga",
            Region::Simiyu => "Simiyu",
            Region::Singida => "Singida",
            Region::Songwe => "Songwe",
            Region::Tabora => "Tabora",
            Region::Tanga => "Tanga",
            Region::Other => "Other",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.slug() == s)
            .ok_or_else(|| format!("unknown region: {s}"))
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.slug().to_string()
    }
}

impl TryFrom<String> for Region {
    type Error = String;

    fn try_from(slug: String) -> Result<Self, Self::Error> {
        slug.parse()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Search criteria broadcast to result views.
///
/// Every field is optional; an absent field means "no constraint" and is
/// omitted from the serialized payload rather than sent as an empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
}

impl SearchFilters {
    /// Number of constrained fields
    pub fn defined_fields(&self) -> usize {
        [
            self.property_type.is_some(),
            self.profile.is_some(),
            self.status.is_some(),
            self.region.is_some(),
            self.ward.is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
        ]
        .iter()
        .filter(|defined| **defined)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.defined_fields() == 0
    }
}
