pub mod taxonomy;
pub mod wards;

pub use taxonomy::{PropertyTaxonomy, StaticTaxonomy};
pub use wards::{slugify, WardCatalog, WardOption, OTHER_WARD, OTHER_WARD_SLUG};
