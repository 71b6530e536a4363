use std::sync::Arc;
use chrono::{DateTime, Utc};

use fjord_core::BookingResolver;
use fjord_store::{load_dataset, Config, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<BookingResolver>,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(resolver: BookingResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            loaded_at: Utc::now(),
        }
    }

    /// Load the dataset and build the resolver from configured tables
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let dataset = load_dataset(&config.data)?;
        let resolver = BookingResolver::new(
            Arc::new(dataset),
            config.matching.ship_alias_table(),
            config.matching.port_name_table(),
            config.site.links(),
        );
        Ok(Self::new(resolver))
    }
}
