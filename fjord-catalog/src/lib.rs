pub mod models;
pub mod dataset;

pub use models::{Booking, Cabin, Excursion, Locale, Port, Ship, VoyageProduct};
pub use dataset::{CatalogError, Dataset, DatasetSummary};
