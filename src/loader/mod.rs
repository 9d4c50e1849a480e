//! Card catalog loading

pub mod catalog;

pub use catalog::{CardCatalog, CardTemplate, CatalogLoader};
