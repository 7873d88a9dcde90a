use crate::models::Region;
use std::collections::BTreeMap;
use tracing::debug;

/// Display name of the sentinel entry closing every region's ward list
pub const OTHER_WARD: &str = "Other";

/// Slug of [`OTHER_WARD`]; selecting it asks for a custom ward name
pub const OTHER_WARD_SLUG: &str = "other";

/// Turn a ward display name into its selector value ("Mto wa Mbu" -> "mto-wa-mbu")
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// One option of the ward selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardOption {
    pub label: String,
    pub value: String,
}

/// Wards known for each region.
///
/// The catalog is owned by whoever runs the search overlay and handed to the
/// form by reference. Custom wards added through the form stay in it for as
/// long as the owner keeps it alive.
#[derive(Debug, Clone, Default)]
pub struct WardCatalog {
    wards: BTreeMap<Region, Vec<String>>,
}

impl WardCatalog {
    /// Catalog without any region entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog seeded with the ward lists used by the listing pages
    pub fn with_defaults() -> Self {
        let mut catalog = Self::empty();
        for (region, wards) in DEFAULT_WARDS {
            catalog.insert(*region, wards.iter().map(|w| w.to_string()).collect());
        }
        catalog
    }

    /// Replace a region's ward list. The `Other` sentinel is appended when missing.
    pub fn insert(&mut self, region: Region, mut wards: Vec<String>) {
        if wards.last().map(String::as_str) != Some(OTHER_WARD) {
            wards.retain(|w| w != OTHER_WARD);
            wards.push(OTHER_WARD.to_string());
        }
        self.wards.insert(region, wards);
    }

    pub fn wards(&self, region: Region) -> Option<&[String]> {
        self.wards.get(&region).map(Vec::as_slice)
    }

    /// Selector options for a region, `None` when the region has no entry
    pub fn options(&self, region: Region) -> Option<Vec<WardOption>> {
        self.wards(region).map(|wards| {
            wards
                .iter()
                .map(|label| WardOption {
                    label: label.clone(),
                    value: slugify(label),
                })
                .collect()
        })
    }

    /// Whether `slug` names one of the region's wards (the sentinel included)
    pub fn contains_slug(&self, region: Region, slug: &str) -> bool {
        self.wards(region)
            .map(|wards| wards.iter().any(|w| slugify(w) == slug))
            .unwrap_or(false)
    }

    /// Add a user-entered ward just before the region's `Other` sentinel.
    ///
    /// Returns the slug of the ward, or `None` when the trimmed name is empty
    /// or the region has no catalog entry. A name already present is not
    /// duplicated but its slug is still returned.
    pub fn add_custom(&mut self, region: Region, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let wards = self.wards.get_mut(&region)?;
        let slug = slugify(name);

        if wards.iter().any(|w| slugify(w) == slug) {
            debug!("Ward '{}' already listed for {}", name, region);
            return Some(slug);
        }

        wards.retain(|w| w != OTHER_WARD);
        wards.push(name.to_string());
        wards.push(OTHER_WARD.to_string());
        debug!("Added custom ward '{}' to {}", name, region);

        Some(slug)
    }
}

const DEFAULT_WARDS: &[(Region, &[&str])] = &[
    (
        Region::Arusha,
        &[
            "Arusha Central", "Arusha North", "Arusha South", "Engaruka", "Karatu", "Kimandolu",
            "Kisongo", "Longido", "Makuyuni", "Mbuguni", "Meru", "Monduli", "Mto wa Mbu",
            "Ngaramtoni", "Ngorongoro", "Sakina", "Tengeru", "Themi", "Unga Limited", "Usa River",
            "Other",
        ],
    ),
    (
        Region::DarEsSalaam,
        &[
            "Buguruni", "Chang'ombe", "Ilala", "Kawe", "Kariakoo", "Kigamboni", "Kijitonyama",
            "Kinondoni", "Kivukoni", "Mbagala", "Mbagala Kuu", "Mbagala Rangi Tatu", "Masaki",
            "Mbezi", "Mchikichini", "Mikocheni", "Msasani", "Mtoni", "Oyster Bay", "Sinza",
            "Tabata", "Tandika", "Temeke", "Ubungo", "Other",
        ],
    ),
    (
        Region::Dodoma,
        &[
            "Bahi", "Chamwino", "Chemba", "Dodoma Central", "Dodoma Urban", "Hombolo", "Kigwe",
            "Kikombo", "Kisese", "Kongwa", "Makutupora", "Mlali", "Mpwapwa", "Mvumi", "Ntyuka",
            "Other",
        ],
    ),
    (
        Region::Geita,
        &[
            "Bukombe", "Chato", "Geita", "Geita Town", "Kakubilo", "Katoro", "Mabale", "Mbogwe",
            "Nyakabale", "Nyang'hwale", "Other",
        ],
    ),
    (
        Region::Iringa,
        &[
            "Iringa Central", "Iringa North", "Iringa Urban", "Kilolo", "Kiponzelo", "Mafinga",
            "Mlowa", "Mufindi", "Other",
        ],
    ),
    (
        Region::Kagera,
        &[
            "Biharamulo", "Bukoba", "Bukoba Urban", "Kanyigo", "Karagwe", "Kashasha", "Kyerwa",
            "Missenyi", "Muleba", "Ngara", "Other",
        ],
    ),
    (
        Region::Katavi,
        &["Karema", "Mlele", "Mpanda", "Mpanda Town", "Mpanda Urban", "Other"],
    ),
    (
        Region::Kigoma,
        &[
            "Buhigwe", "Kakonko", "Kasulu", "Kibondo", "Kigoma", "Kigoma Urban", "Uvinza", "Other",
        ],
    ),
    (
        Region::Kilimanjaro,
        &[
            "Hai", "Mawenzi", "Moshi", "Moshi Urban", "Mwanga", "Rombo", "Same", "Shirimatunda",
            "Siha", "Other",
        ],
    ),
    (
        Region::Lindi,
        &[
            "Kilwa", "Kilwa Kivinje", "Kilwa Masoko", "Lindi", "Lindi Urban", "Liwale",
            "Nachingwea", "Ruangwa", "Other",
        ],
    ),
    (
        Region::Manyara,
        &[
            "Babati", "Babati Urban", "Dareda", "Hanang", "Kiteto", "Mbulu", "Simanjiro", "Other",
        ],
    ),
    (
        Region::Mara,
        &[
            "Bunda", "Butiama", "Musoma", "Musoma Urban", "Rorya", "Serengeti", "Tarime", "Other",
        ],
    ),
    (
        Region::Mbeya,
        &[
            "Busokelo", "Chunya", "Ileje", "Kyela", "Mbarali", "Mbeya", "Mbeya Urban", "Mbozi",
            "Momba", "Rungwe", "Other",
        ],
    ),
    (
        Region::Morogoro,
        &[
            "Gairo", "Kilombero", "Kilosa", "Malinyi", "Morogoro", "Morogoro Urban", "Mvomero",
            "Ulanga", "Other",
        ],
    ),
    (
        Region::Mtwara,
        &[
            "Masasi", "Masasi Urban", "Mtwara", "Mtwara Urban", "Nanyumbu", "Newala",
            "Tandahimba", "Other",
        ],
    ),
    (
        Region::Mwanza,
        &[
            "Ilemela", "Kwimba", "Magu", "Misungwi", "Mwanza Urban", "Nyamagana", "Sengerema",
            "Ukerewe", "Other",
        ],
    ),
    (
        Region::Njombe,
        &[
            "Ludewa", "Makambako", "Makete", "Njombe", "Njombe Urban", "Wanging'ombe", "Other",
        ],
    ),
    (
        Region::Pwani,
        &[
            "Bagamoyo", "Chalinze", "Kibaha", "Kibaha Urban", "Kisarawe", "Mafia", "Mkuranga",
            "Rufiji", "Other",
        ],
    ),
    (
        Region::Rukwa,
        &["Kalambo", "Nkasi", "Sumbawanga", "Sumbawanga Urban", "Other"],
    ),
    (
        Region::Ruvuma,
        &["Mbinga", "Songea", "Songea Urban", "Tunduru", "Other"],
    ),
    (
        Region::Shinyanga,
        &[
            "Kahama", "Kahama Urban", "Kishapu", "Msalala", "Shinyanga", "Shinyanga Urban",
            "Other",
        ],
    ),
    (
        Region::Simiyu,
        &["Bariadi", "Busega", "Itilima", "Maswa", "Meatu", "Other"],
    ),
    (
        Region::Singida,
        &[
            "Ikungi", "Iramba", "Manyoni", "Mkalama", "Singida", "Singida Urban", "Other",
        ],
    ),
    (
        Region::Songwe,
        &["Ileje", "Mbozi", "Momba", "Songwe", "Other"],
    ),
    (
        Region::Tabora,
        &[
            "Igunga", "Kaliua", "Nzega", "Sikonge", "Tabora", "Tabora Urban", "Urambo", "Uyui",
            "Other",
        ],
    ),
    (
        Region::Tanga,
        &[
            "Handeni", "Handeni Urban", "Kilindi", "Korogwe", "Korogwe Urban", "Lushoto",
            "Mkinga", "Muheza", "Pangani", "Tanga", "Tanga Urban", "Other",
        ],
    ),
    (
        Region::UngujaNorth,
        &["Kaskazini A", "Kaskazini B", "Mkokotoni", "Nungwi", "Other"],
    ),
    (
        Region::UngujaSouth,
        &["Kizimkazi", "Kusini", "Kusini Unguja", "Makunduchi", "Other"],
    ),
    (
        Region::UrbanWest,
        &["Magharibi", "Malindi", "Mjini", "Stone Town", "Other"],
    ),
    (Region::Other, &["Other"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Mto wa Mbu"), "mto-wa-mbu");
        assert_eq!(slugify("  Kisongo   West "), "kisongo-west");
        assert_eq!(slugify("Chang'ombe"), "chang'ombe");
    }

    #[test]
    fn every_region_has_a_default_list_ending_in_other() {
        let catalog = WardCatalog::with_defaults();
        for region in Region::ALL {
            let wards = catalog.wards(region).expect("region missing from defaults");
            assert_eq!(wards.last().map(String::as_str), Some(OTHER_WARD));
        }
    }

    #[test]
    fn custom_ward_lands_before_other() {
        let mut catalog = WardCatalog::with_defaults();
        let slug = catalog.add_custom(Region::Arusha, "Kisongo West").unwrap();
        assert_eq!(slug, "kisongo-west");

        let wards = catalog.wards(Region::Arusha).unwrap();
        let n = wards.len();
        assert_eq!(wards[n - 2], "Kisongo West");
        assert_eq!(wards[n - 1], OTHER_WARD);
        assert!(catalog.contains_slug(Region::Arusha, "kisongo-west"));
        assert!(!catalog.contains_slug(Region::Dodoma, "kisongo-west"));
    }

    #[test]
    fn custom_ward_is_not_duplicated() {
        let mut catalog = WardCatalog::with_defaults();
        let before = catalog.wards(Region::Geita).unwrap().len();
        assert_eq!(catalog.add_custom(Region::Geita, "katoro").as_deref(), Some("katoro"));
        assert_eq!(catalog.wards(Region::Geita).unwrap().len(), before);
    }

    #[test]
    fn custom_ward_declined_for_blank_name_or_missing_region() {
        let mut catalog = WardCatalog::with_defaults();
        assert_eq!(catalog.add_custom(Region::Arusha, "   "), None);

        let mut empty = WardCatalog::empty();
        assert_eq!(empty.add_custom(Region::Arusha, "Kisongo West"), None);
        assert!(empty.options(Region::Arusha).is_none());
    }

    #[test]
    fn insert_appends_missing_sentinel() {
        let mut catalog = WardCatalog::empty();
        catalog.insert(Region::Mara, vec!["Other".into(), "Bunda".into()]);
        assert_eq!(catalog.wards(Region::Mara).unwrap(), ["Bunda", "Other"]);
    }
}
