pub mod models;
pub mod parser;
pub mod tier;
pub mod times;
pub mod filters;
pub mod grouping;
pub mod listing;
pub mod source;

pub use models::{Deal, Tier, VenueGroup, DEFAULT_FEATURE_PRIORITY};
pub use parser::parse_deals;
pub use tier::{resolve_feature_tier, InvalidExpirationPolicy, TierResolver};
pub use times::{is_late_night, parse_start_time, UNKNOWN_START};
pub use filters::{filter_deals, DrinkFilter, FilterState};
pub use grouping::{build_venue_groups, build_venue_groups_with};
pub use listing::{build_listing, Listing, Neighborhood, VenueCard, DealCard};
pub use source::{DealSource, SourceError, SourceResult};
