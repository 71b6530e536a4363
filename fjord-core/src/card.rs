use serde::{Deserialize, Serialize};
use std::fmt;

/// Which reference entity a card reports on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Booking,
    Ship,
    Cabin,
    DeparturePort,
    ArrivalPort,
    Voyage,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Booking => "Booking",
            EntityKind::Ship => "Ship",
            EntityKind::Cabin => "Cabin",
            EntityKind::DeparturePort => "Departure Port",
            EntityKind::ArrivalPort => "Arrival Port",
            EntityKind::Voyage => "Voyage",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving one entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    /// Confident match
    Found,
    /// Partial, heuristic or blocked match
    Warning,
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardField {
    pub label: String,
    pub value: String,
    /// Codes and identifiers render in a monospace font
    pub monospace: bool,
}

/// One diagnostic result of a booking lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupCard {
    pub entity: EntityKind,
    pub status: MatchStatus,
    pub status_label: String,
    pub title: String,
    pub fields: Vec<CardField>,
    pub note: Option<String>,
    pub url: Option<String>,
}

impl LookupCard {
    pub fn new(
        entity: EntityKind,
        status: MatchStatus,
        status_label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            status,
            status_label: status_label.into(),
            title: title.into(),
            fields: Vec::new(),
            note: None,
            url: None,
        }
    }

    pub fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push(CardField {
            label: label.to_string(),
            value: value.into(),
            monospace: false,
        });
        self
    }

    pub fn code_field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push(CardField {
            label: label.to_string(),
            value: value.into(),
            monospace: true,
        });
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Value of the first field with the given label
    pub fn field_value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serialization() {
        let card = LookupCard::new(EntityKind::ArrivalPort, MatchStatus::NotFound, "No Match", "Code: XYZ")
            .code_field("Booking Code", "XYZ");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["entity"], "arrival_port");
        assert_eq!(json["status"], "not-found");
        assert_eq!(json["fields"][0]["monospace"], true);
        assert!(json["note"].is_null());
    }

    #[test]
    fn test_entity_labels() {
        assert_eq!(EntityKind::DeparturePort.to_string(), "Departure Port");
        assert_eq!(EntityKind::Voyage.label(), "Voyage");
    }
}
