pub mod catalog;
pub mod models;
pub mod query;
pub mod selection;
pub mod viewport;
pub mod wizard;

pub use catalog::{Catalog, CatalogError, CatalogProvider};
pub use models::{Branch, LatLng, Locale, LocalizedText, Location};
