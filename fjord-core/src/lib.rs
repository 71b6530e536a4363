pub mod card;
pub mod tables;
pub mod links;
pub mod resolver;

pub use card::{CardField, EntityKind, LookupCard, MatchStatus};
pub use tables::{PortNameTable, ShipAliasTable};
pub use links::SiteLinks;
pub use resolver::BookingResolver;
