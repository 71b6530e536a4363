use std::collections::HashMap;

/// Booking ship codes whose cabin inventory is published under another code.
///
/// The default maps MS Maud (`MS`) to MS Midnatsol (`WW`): the same vessel,
/// renamed, with cabins still filed under the old code.
#[derive(Debug, Clone)]
pub struct ShipAliasTable {
    aliases: HashMap<String, String>,
}

impl ShipAliasTable {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// Cabin-data code for a booking ship code
    pub fn resolve<'a>(&'a self, ship_code: &'a str) -> &'a str {
        self.aliases
            .get(ship_code)
            .map(String::as_str)
            .unwrap_or(ship_code)
    }

    pub fn is_aliased(&self, ship_code: &str) -> bool {
        self.aliases.contains_key(ship_code)
    }

    /// Merge entries over the current ones
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.aliases.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for ShipAliasTable {
    fn default() -> Self {
        Self::new(HashMap::from([("MS".to_string(), "WW".to_string())]))
    }
}

/// Three-letter port codes mapped to the city name used for name matching
#[derive(Debug, Clone)]
pub struct PortNameTable {
    names: HashMap<String, String>,
}

const DEFAULT_PORT_NAMES: &[(&str, &str)] = &[
    ("BGO", "Bergen"),
    ("TOS", "Troms"),
    ("HAM", "Hamburg"),
    ("HFT", "Hammerfest"),
    ("SVJ", "Svolvær"),
    ("AES", "Ålesund"),
    ("TRD", "Trondheim"),
    ("BOO", "Bodø"),
    ("KKN", "Kirkenes"),
    ("LYR", "Longyearbyen"),
    ("OSL", "Oslo"),
    ("DOV", "Dover"),
    ("LIS", "Lisbon"),
    ("REK", "Reykjavik"),
    ("CPH", "Copenhagen"),
];

impl PortNameTable {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// City name for a code, or the code itself when unmapped
    pub fn name_for<'a>(&'a self, port_code: &'a str) -> &'a str {
        self.names
            .get(port_code)
            .map(String::as_str)
            .unwrap_or(port_code)
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.names.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for PortNameTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_PORT_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ship_alias() {
        let aliases = ShipAliasTable::default();
        assert_eq!(aliases.resolve("MS"), "WW");
        assert_eq!(aliases.resolve("NK"), "NK");
        assert!(aliases.is_aliased("MS"));
        assert!(!aliases.is_aliased("WW"));
    }

    #[test]
    fn test_port_name_fallback_to_code() {
        let names = PortNameTable::default();
        assert_eq!(names.len(), 15);
        assert_eq!(names.name_for("BGO"), "Bergen");
        assert_eq!(names.name_for("XYZ"), "XYZ");
    }

    #[test]
    fn test_extend_overrides_defaults() {
        let mut names = PortNameTable::default();
        names.extend([
            ("TOS".to_string(), "Tromsø".to_string()),
            ("ISA".to_string(), "Isafjordur".to_string()),
        ]);
        assert_eq!(names.name_for("TOS"), "Tromsø");
        assert_eq!(names.name_for("ISA"), "Isafjordur");

        let mut aliases = ShipAliasTable::empty();
        assert!(aliases.is_empty());
        aliases.extend([("FN".to_string(), "FR".to_string())]);
        assert_eq!(aliases.resolve("FN"), "FR");
        assert_eq!(aliases.len(), 1);
    }
}
