use std::collections::{BTreeMap, BTreeSet, HashSet};
use serde::{Deserialize, Serialize};

use crate::models::{Booking, Cabin, Excursion, Locale, Port, Ship, VoyageProduct};

/// Immutable bundle of the reference collections a lookup runs against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub bookings: Vec<Booking>,
    pub ships: Vec<Ship>,
    pub cabins: Vec<Cabin>,
    pub ports: Vec<Port>,
    pub voyage_products: Vec<VoyageProduct>,
    #[serde(default)]
    pub excursions: Vec<Excursion>,
    #[serde(default)]
    pub locales: Vec<Locale>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate booking id: {0}")]
    DuplicateBookingId(String),
}

/// Headline numbers for the explorer overview
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub ships: usize,
    pub cabins: usize,
    pub excursions: usize,
    pub ports: usize,
    pub voyage_products: usize,
    pub locales: usize,
    pub bookings: usize,
    pub cabin_categories: usize,
    pub ships_with_content: usize,
    pub excursion_types: Vec<String>,
    pub voyage_categories: Vec<String>,
    pub ships_by_code: BTreeMap<String, String>,
}

impl Dataset {
    /// Booking ids are the only keys the lookup relies on being unique.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.bookings.len());
        for booking in &self.bookings {
            if !seen.insert(booking.booking_id.as_str()) {
                return Err(CatalogError::DuplicateBookingId(booking.booking_id.clone()));
            }
        }
        Ok(())
    }

    pub fn find_booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.booking_id == booking_id)
    }

    pub fn find_ship(&self, brm_code: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.brm_code == brm_code)
    }

    /// Ship codes in dataset order
    pub fn ship_codes(&self) -> Vec<&str> {
        self.ships.iter().map(|s| s.brm_code.as_str()).collect()
    }

    pub fn cabins_for_ship(&self, brm_code: &str) -> Vec<&Cabin> {
        self.cabins
            .iter()
            .filter(|c| c.ship_brm_code == brm_code)
            .collect()
    }

    /// Cabins keyed by ship code, input order kept within each group
    pub fn cabins_by_ship(&self) -> BTreeMap<&str, Vec<&Cabin>> {
        let mut groups: BTreeMap<&str, Vec<&Cabin>> = BTreeMap::new();
        for cabin in &self.cabins {
            groups.entry(cabin.ship_brm_code.as_str()).or_default().push(cabin);
        }
        groups
    }

    pub fn summary(&self) -> DatasetSummary {
        let cabin_categories: HashSet<&str> = self
            .cabins
            .iter()
            .map(|c| c.cabin_category.as_str())
            .collect();

        let excursion_types: BTreeSet<&str> = self
            .excursions
            .iter()
            .map(|e| e.excursion_type.as_str())
            .filter(|t| !t.is_empty())
            .collect();

        let voyage_categories: BTreeSet<&str> = self
            .voyage_products
            .iter()
            .map(|v| v.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();

        DatasetSummary {
            ships: self.ships.len(),
            cabins: self.cabins.len(),
            excursions: self.excursions.len(),
            ports: self.ports.len(),
            voyage_products: self.voyage_products.len(),
            locales: self.locales.len(),
            bookings: self.bookings.len(),
            cabin_categories: cabin_categories.len(),
            ships_with_content: self.ships.iter().filter(|s| s.has_content()).count(),
            excursion_types: excursion_types.into_iter().map(String::from).collect(),
            voyage_categories: voyage_categories.into_iter().map(String::from).collect(),
            ships_by_code: self
                .ships
                .iter()
                .map(|s| (s.brm_code.clone(), s.ship_name.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(code: &str, name: &str, content: &str) -> Ship {
        Ship {
            brm_code: code.to_string(),
            ship_name: name.to_string(),
            has_contentful_content: content.to_string(),
            ..Default::default()
        }
    }

    fn cabin(ship: &str, code: &str, category: &str) -> Cabin {
        Cabin {
            ship_brm_code: ship.to_string(),
            cabin_code: code.to_string(),
            cabin_category: category.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Dataset {
        Dataset {
            ships: vec![
                ship("NK", "MS Nordkapp", "True"),
                ship("WW", "MS Midnatsol", "False"),
            ],
            cabins: vec![
                cabin("NK", "K3", "Polar Inside"),
                cabin("WW", "K3", "Polar Inside"),
                cabin("NK", "U2", "Arctic Superior"),
            ],
            excursions: vec![
                Excursion { excursion_type: "Hiking".into(), ..Default::default() },
                Excursion { excursion_type: "Boat".into(), ..Default::default() },
                Excursion { excursion_type: "Hiking".into(), ..Default::default() },
                Excursion::default(),
            ],
            voyage_products: vec![
                VoyageProduct { category: "Expedition".into(), ..Default::default() },
                VoyageProduct { category: "Coastal".into(), ..Default::default() },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_booking_id_rejected() {
        let booking = Booking { booking_id: "B1".into(), ..Default::default() };
        let dataset = Dataset {
            bookings: vec![booking.clone(), booking],
            ..Default::default()
        };
        match dataset.validate() {
            Err(CatalogError::DuplicateBookingId(id)) => assert_eq!(id, "B1"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.ships, 2);
        assert_eq!(summary.cabins, 3);
        assert_eq!(summary.cabin_categories, 2);
        assert_eq!(summary.ships_with_content, 1);
        assert_eq!(summary.excursion_types, vec!["Boat", "Hiking"]);
        assert_eq!(summary.voyage_categories, vec!["Coastal", "Expedition"]);
        assert_eq!(summary.ships_by_code.get("WW").map(String::as_str), Some("MS Midnatsol"));
    }

    #[test]
    fn test_cabins_by_ship_keeps_order() {
        let dataset = sample();
        let groups = dataset.cabins_by_ship();
        assert_eq!(groups.len(), 2);
        let nk: Vec<&str> = groups["NK"].iter().map(|c| c.cabin_code.as_str()).collect();
        assert_eq!(nk, vec!["K3", "U2"]);
        assert_eq!(dataset.cabins_for_ship("WW").len(), 1);
        assert!(dataset.cabins_for_ship("XX").is_empty());
    }
}
