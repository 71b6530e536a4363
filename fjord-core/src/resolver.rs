use std::sync::Arc;
use tracing::{debug, info};

use fjord_catalog::{Booking, Dataset, Port, Ship};

use crate::card::{EntityKind, LookupCard, MatchStatus};
use crate::links::SiteLinks;
use crate::tables::{PortNameTable, ShipAliasTable};

/// Cross-references a booking against the CMS reference data.
///
/// Every lookup is a pure function of the booking id and the dataset the
/// resolver was built with. Unmatched entities become `NotFound` or `Warning`
/// cards, never errors.
#[derive(Debug, Clone)]
pub struct BookingResolver {
    dataset: Arc<Dataset>,
    ship_aliases: ShipAliasTable,
    port_names: PortNameTable,
    links: SiteLinks,
}

impl BookingResolver {
    pub fn new(
        dataset: Arc<Dataset>,
        ship_aliases: ShipAliasTable,
        port_names: PortNameTable,
        links: SiteLinks,
    ) -> Self {
        Self {
            dataset,
            ship_aliases,
            port_names,
            links,
        }
    }

    pub fn with_defaults(dataset: Arc<Dataset>) -> Self {
        Self::new(
            dataset,
            ShipAliasTable::default(),
            PortNameTable::default(),
            SiteLinks::default(),
        )
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Resolve a booking id into an ordered list of cards.
    /// Blank input yields no cards.
    pub fn resolve(&self, booking_id: &str) -> Vec<LookupCard> {
        let booking_id = booking_id.trim();
        if booking_id.is_empty() {
            return Vec::new();
        }

        let Some(booking) = self.dataset.find_booking(booking_id) else {
            info!(booking_id, "Booking not found");
            return vec![LookupCard::new(
                EntityKind::Booking,
                MatchStatus::NotFound,
                "Not Found",
                format!("ID: {}", booking_id),
            )
            .with_note(Some(
                "No booking found with that ID. Try one of the quick pick buttons above, or click Random."
                    .to_string(),
            ))];
        };

        let mut cards = vec![self.booking_card(booking)];

        let ship = self.dataset.find_ship(&booking.ship_code);
        cards.push(self.ship_card(&booking.ship_code, ship));

        if !booking.cabin_category.is_empty() {
            cards.push(self.cabin_card(booking, ship));
        }

        for (kind, code) in port_codes(booking) {
            cards.push(self.port_card(kind, code));
        }

        if !booking.sailing_code.is_empty() {
            cards.push(self.voyage_card(&booking.sailing_code));
        }

        info!(
            booking_id,
            cards = cards.len(),
            not_found = cards.iter().filter(|c| c.status == MatchStatus::NotFound).count(),
            warnings = cards.iter().filter(|c| c.status == MatchStatus::Warning).count(),
            "Booking resolved"
        );

        cards
    }

    fn booking_card(&self, booking: &Booking) -> LookupCard {
        LookupCard::new(
            EntityKind::Booking,
            MatchStatus::Found,
            booking.status.as_str(),
            booking.sailing_description.as_str(),
        )
        .code_field("Booking ID", booking.booking_id.as_str())
        .field("Status", booking.status.as_str())
        .code_field("Ship Code", booking.ship_code.as_str())
        .code_field("Sailing Code", booking.sailing_code.as_str())
        .field("Destination", booking.destination.as_str())
        .code_field("Route", booking.route())
        .field("Nights", booking.cruise_nights.as_str())
        .code_field(
            "Cabin",
            format!("{} ({})", booking.cabin_category, booking.cabin_code),
        )
        .with_note(booking.flight_summary())
    }

    fn ship_card(&self, ship_code: &str, ship: Option<&Ship>) -> LookupCard {
        let Some(ship) = ship else {
            debug!(ship_code, "No ship with this code");
            return LookupCard::new(
                EntityKind::Ship,
                MatchStatus::NotFound,
                "No Match",
                format!("Code: {}", ship_code),
            )
            .with_note(Some(format!(
                "No ship found in Contentful with code \"{}\". Valid codes: {}",
                ship_code,
                self.dataset.ship_codes().join(", ")
            )));
        };

        let has_content = ship.has_content();
        let contentful_id = if ship.contentful_id.is_empty() {
            "---"
        } else {
            ship.contentful_id.as_str()
        };

        let card = LookupCard::new(
            EntityKind::Ship,
            if has_content { MatchStatus::Found } else { MatchStatus::Warning },
            if has_content { "Content Available" } else { "No CMS Content" },
            ship.ship_name.as_str(),
        )
        .code_field("BRM Code", ship_code)
        .code_field("Contentful ID", contentful_id)
        .code_field("Slug", ship.slug.as_str())
        .field("Has Content", if has_content { "Yes" } else { "No" });

        if has_content {
            card.with_note(Some(format!(
                "Ship page exists in Contentful. Use slug \"{}\" or ID \"{}\" to fetch content.",
                ship.slug, ship.contentful_id
            )))
            .with_url(self.links.ship(&ship.slug))
        } else {
            card.with_note(Some(
                "This ship has no content in Contentful. Travel documents will be missing ship details."
                    .to_string(),
            ))
        }
    }

    fn cabin_card(&self, booking: &Booking, ship: Option<&Ship>) -> LookupCard {
        let cabin_code = booking.cabin_category.as_str();
        let Some(ship) = ship else {
            return LookupCard::new(
                EntityKind::Cabin,
                MatchStatus::Warning,
                "Partial",
                format!("Code: {}", cabin_code),
            )
            .with_note(Some(
                "Ship not found in Contentful, so cabin lookup cannot be completed (cabins are ship-specific)."
                    .to_string(),
            ));
        };

        // Booking cabin_category ("K3") is the CMS cabin_code; the CMS
        // cabin_category is a display name such as "Polar Inside".
        let ship_code = booking.ship_code.as_str();
        let cabin_ship_code = self.ship_aliases.resolve(ship_code);
        let aliased = self.ship_aliases.is_aliased(ship_code);
        let matches: Vec<_> = self
            .dataset
            .cabins
            .iter()
            .filter(|c| c.ship_brm_code == cabin_ship_code && c.cabin_code == cabin_code)
            .collect();

        debug!(
            ship_code,
            cabin_ship_code,
            cabin_code,
            matches = matches.len(),
            "Cabin candidates"
        );

        let Some(cabin) = matches.first() else {
            return LookupCard::new(
                EntityKind::Cabin,
                MatchStatus::NotFound,
                "No Match",
                format!("Code {} on {}", cabin_code, ship.ship_name),
            )
            .with_note(Some(format!(
                "No cabin with code \"{}\" found on ship \"{}\" in Contentful. The booking code may use a different format than the CMS.",
                cabin_code, ship_code
            )));
        };

        let ship_label = if aliased {
            format!("{} (via {} - same ship, renamed)", ship.ship_name, cabin.ship_name)
        } else {
            cabin.ship_name.clone()
        };

        let mut notes = Vec::new();
        if matches.len() > 1 {
            notes.push(format!(
                "{} cabin variants matching code {} on this ship. Showing first match.",
                matches.len(),
                cabin_code
            ));
        } else if !cabin.cabin_description.is_empty() {
            notes.push(cabin.cabin_description.clone());
        }
        if aliased {
            notes.push(format!(
                "Cabin data taken from {} ({}) - same ship, renamed.",
                cabin.ship_name, cabin_ship_code
            ));
        }
        let note = if notes.is_empty() { None } else { Some(notes.join(" ")) };

        LookupCard::new(
            EntityKind::Cabin,
            MatchStatus::Found,
            "Content Available",
            cabin.cabin_name.as_str(),
        )
        .code_field("Booking Code", cabin_code)
        .code_field("Contentful Code", cabin.cabin_code.as_str())
        .field("Category", cabin.cabin_category.as_str())
        .field("Ship", ship_label)
        .field("Bed Type", cabin.bed_type.as_str())
        .field("Window", cabin.window_type.as_str())
        .field("Size", cabin.size_label())
        .field("Balcony", if cabin.has_balcony() { "Yes" } else { "No" })
        .with_note(note)
    }

    fn port_card(&self, kind: EntityKind, code: &str) -> LookupCard {
        let Some((port, exact)) = self.find_port(code) else {
            debug!(port_code = code, "No port match");
            return LookupCard::new(kind, MatchStatus::Warning, "No Direct Match", format!("Code: {}", code))
                .code_field("Booking Code", code)
                .with_note(Some(format!(
                    "No Contentful port found for code \"{}\". A mapping may be needed.",
                    code
                )));
        };

        let note = if exact {
            format!(
                "Port code \"{}\" matched directly to Contentful port \"{}\".",
                code, port.port_name
            )
        } else {
            "Matched by name heuristic. Verify this is the correct port.".to_string()
        };

        LookupCard::new(
            kind,
            MatchStatus::Found,
            if exact { "Exact Match" } else { "Likely Match" },
            port.port_name.as_str(),
        )
        .code_field("Booking Code", code)
        .code_field("Port Code", port.port_code.as_deref().unwrap_or("---"))
        .field("Port Name", port.port_name.as_str())
        .code_field("Slug", if port.slug.is_empty() { "---" } else { port.slug.as_str() })
        .code_field("Contentful ID", port.contentful_id.as_str())
        .with_note(Some(note))
        .with_url(self.links.port(&port.slug))
    }

    /// Exact `port_code` first, then the first port whose name contains the
    /// city name mapped for the code. The flag is true for exact matches.
    fn find_port(&self, code: &str) -> Option<(&Port, bool)> {
        let ports = &self.dataset.ports;
        if let Some(port) = ports.iter().find(|p| p.port_code.as_deref() == Some(code)) {
            return Some((port, true));
        }

        let needle = self.port_names.name_for(code).to_lowercase();
        ports
            .iter()
            .find(|p| p.port_name.to_lowercase().contains(&needle))
            .map(|port| (port, false))
    }

    fn voyage_card(&self, sailing_code: &str) -> LookupCard {
        // Sailing codes ("NK260920") do not share the CMS product code format;
        // only the two-letter ship prefix is comparable.
        let ship_prefix: String = sailing_code.chars().take(2).collect();
        let products = &self.dataset.voyage_products;
        let candidates = products
            .iter()
            .filter(|v| !v.product_code.is_empty() && v.product_code.starts_with(&ship_prefix))
            .count();

        debug!(sailing_code, ship_prefix = %ship_prefix, candidates, "Voyage candidates");

        if candidates == 0 {
            return LookupCard::new(
                EntityKind::Voyage,
                MatchStatus::NotFound,
                "No Match",
                format!("Sailing: {}", sailing_code),
            )
            .code_field("Sailing Code", sailing_code)
            .with_note(Some(
                "No voyage products found matching this sailing code. This is a known integration gap - sailing codes in booking data use a different format than Contentful voyage product codes."
                    .to_string(),
            ));
        }

        match products.iter().find(|v| v.product_code == sailing_code) {
            Some(exact) => {
                let title = if exact.title.is_empty() {
                    exact.product_code.as_str()
                } else {
                    exact.title.as_str()
                };
                LookupCard::new(EntityKind::Voyage, MatchStatus::Found, "Exact Match", title)
                    .code_field("Sailing Code", sailing_code)
                    .code_field("Product Code", exact.product_code.as_str())
                    .field("Category", exact.category.as_str())
                    .code_field("Contentful ID", exact.contentful_id.as_str())
            }
            None => LookupCard::new(
                EntityKind::Voyage,
                MatchStatus::Warning,
                "No Exact Match",
                format!("Sailing: {}", sailing_code),
            )
            .code_field("Sailing Code", sailing_code)
            .code_field("Ship Prefix", ship_prefix.as_str())
            .field(
                "Similar Voyages",
                format!("{} products for ship {}", candidates, ship_prefix),
            )
            .with_note(Some(format!(
                "Sailing code \"{}\" does not directly match any Contentful voyage product code. Voyage codes in Contentful use a different format. {} products exist for ship prefix \"{}\" but the code structures differ.",
                sailing_code, candidates, ship_prefix
            ))),
        }
    }
}

/// Departure then arrival, skipping blanks and an arrival equal to departure
fn port_codes(booking: &Booking) -> Vec<(EntityKind, &str)> {
    let mut codes = Vec::with_capacity(2);
    if !booking.departure_port.is_empty() {
        codes.push((EntityKind::DeparturePort, booking.departure_port.as_str()));
    }
    if !booking.arrival_port.is_empty() && booking.arrival_port != booking.departure_port {
        codes.push((EntityKind::ArrivalPort, booking.arrival_port.as_str()));
    }
    codes
}
