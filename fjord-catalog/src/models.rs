use serde::{Deserialize, Deserializer, Serialize};

/// Text value the CMS export uses for boolean `true`.
pub const TRUE_TEXT: &str = "True";

/// A customer reservation as exported by the booking system
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Booking {
    pub booking_id: String,
    pub status: String,
    pub ship_code: String,
    pub sailing_code: String,
    pub sailing_description: String,
    pub destination: String,
    pub departure_port: String,
    pub arrival_port: String,
    pub cruise_nights: String,
    pub cabin_category: String,
    pub cabin_code: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub flight_out_desc: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub flight_out_from: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub flight_out_to: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub flight_in_desc: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub flight_in_from: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub flight_in_to: Option<String>,
}

impl Booking {
    /// Route as shown to agents, e.g. `BGO → KKN`
    pub fn route(&self) -> String {
        format!("{} → {}", self.departure_port, self.arrival_port)
    }

    /// Outbound flight, followed by the inbound one when both are present.
    /// Inbound alone is not reported.
    pub fn flight_summary(&self) -> Option<String> {
        let outbound = self.flight_out_desc.as_deref()?;
        let mut summary = format!(
            "Outbound: {} ({} → {})",
            outbound,
            self.flight_out_from.as_deref().unwrap_or_default(),
            self.flight_out_to.as_deref().unwrap_or_default(),
        );
        if let Some(inbound) = self.flight_in_desc.as_deref() {
            summary.push_str(&format!(
                " | Inbound: {} ({} → {})",
                inbound,
                self.flight_in_from.as_deref().unwrap_or_default(),
                self.flight_in_to.as_deref().unwrap_or_default(),
            ));
        }
        Some(summary)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Ship {
    pub brm_code: String,
    pub ship_name: String,
    pub contentful_id: String,
    pub slug: String,
    pub has_contentful_content: String,
}

impl Ship {
    pub fn has_content(&self) -> bool {
        self.has_contentful_content == TRUE_TEXT
    }
}

/// Cabin variant on a ship. `(ship_brm_code, cabin_code)` is not unique.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Cabin {
    pub ship_brm_code: String,
    pub ship_name: String,
    pub cabin_code: String,
    pub cabin_name: String,
    pub cabin_category: String,
    pub bed_type: String,
    pub window_type: String,
    pub size_from: String,
    pub size_to: String,
    pub has_balcony: String,
    pub cabin_description: String,
}

impl Cabin {
    pub fn has_balcony(&self) -> bool {
        self.has_balcony == TRUE_TEXT
    }

    /// `12 m²`, or `12-15 m²` when the upper bound differs
    pub fn size_label(&self) -> String {
        if !self.size_to.is_empty() && self.size_to != self.size_from {
            format!("{}-{} m\u{00B2}", self.size_from, self.size_to)
        } else {
            format!("{} m\u{00B2}", self.size_from)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Port {
    #[serde(deserialize_with = "empty_as_none")]
    pub port_code: Option<String>,
    pub port_name: String,
    pub slug: String,
    pub contentful_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VoyageProduct {
    pub product_code: String,
    pub title: String,
    pub category: String,
    pub contentful_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Excursion {
    pub name: String,
    #[serde(rename = "type")]
    pub excursion_type: String,
    pub contentful_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Locale {
    pub code: String,
    pub name: String,
}

/// Exports write missing values as empty cells; treat those as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
