use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority assigned to deals whose sheet row leaves `Feature Priority` blank
pub const DEFAULT_FEATURE_PRIORITY: i32 = 999;

/// One recurring happy-hour offer at a venue, as read from the sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deal {
    pub venue: String,
    pub city: String,
    pub day: String,
    pub deal_type: String,
    pub time: String,
    pub deal_description: String,
    pub url: String,

    // Drink categories
    pub beer: bool,
    pub wine: bool,
    pub cocktail: bool,
    pub margarita: bool,

    // Neighborhoods
    pub nobo: bool,
    pub sobo: bool,
    pub downtown: bool,
    pub lesbo: bool,
    pub thehill: bool,
    pub central: bool,

    pub latenight: bool,
    pub taco_tuesday: bool,
    pub show_ad_card: bool,
    pub coffee: bool,

    // Paid promotion
    pub feature_tier: String,
    pub feature_expiration: String,
    pub feature_priority: i32,
}

impl Default for Deal {
    fn default() -> Self {
        Self {
            venue: String::new(),
            city: String::new(),
            day: String::new(),
            deal_type: String::new(),
            time: String::new(),
            deal_description: String::new(),
            url: String::new(),
            beer: false,
            wine: false,
            cocktail: false,
            margarita: false,
            nobo: false,
            sobo: false,
            downtown: false,
            lesbo: false,
            thehill: false,
            central: false,
            latenight: false,
            taco_tuesday: false,
            show_ad_card: false,
            coffee: false,
            feature_tier: String::new(),
            feature_expiration: String::new(),
            feature_priority: DEFAULT_FEATURE_PRIORITY,
        }
    }
}

impl Deal {
    /// Grouping identity: exact, case-sensitive `(venue, city)`
    pub fn venue_key(&self) -> (&str, &str) {
        (&self.venue, &self.city)
    }
}

/// Paid promotion level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Premium,
    Hot,
    Basic,
}

/// Sort rank used when no tier is active
pub const NO_TIER_RANK: u8 = 4;

impl Tier {
    /// Parse a raw sheet value, ignoring case and surrounding whitespace
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "premium" => Some(Tier::Premium),
            "hot" => Some(Tier::Hot),
            "basic" => Some(Tier::Basic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Premium => "premium",
            Tier::Hot => "hot",
            Tier::Basic => "basic",
        }
    }

    /// Lower ranks sort first
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Premium => 1,
            Tier::Hot => 2,
            Tier::Basic => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of an optional tier; an absent tier ranks after every real one.
pub fn tier_rank(tier: Option<Tier>) -> u8 {
    tier.map(|t| t.rank()).unwrap_or(NO_TIER_RANK)
}

/// All currently matching deals for one venue, borrowed from the parsed snapshot
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VenueGroup<'a> {
    pub venue: &'a str,
    pub city: &'a str,
    pub deals: Vec<&'a Deal>,
}

impl<'a> VenueGroup<'a> {
    pub fn new(venue: &'a str, city: &'a str) -> Self {
        Self {
            venue,
            city,
            deals: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_is_case_insensitive() {
        assert_eq!(Tier::parse("Premium"), Some(Tier::Premium));
        assert_eq!(Tier::parse(" HOT "), Some(Tier::Hot));
        assert_eq!(Tier::parse("basic"), Some(Tier::Basic));
        assert_eq!(Tier::parse("gold"), None);
        assert_eq!(Tier::parse(""), None);
    }

    #[test]
    fn test_tier_rank_ordering() {
        assert!(tier_rank(Some(Tier::Premium)) < tier_rank(Some(Tier::Hot)));
        assert!(tier_rank(Some(Tier::Hot)) < tier_rank(Some(Tier::Basic)));
        assert!(tier_rank(Some(Tier::Basic)) < tier_rank(None));
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&Tier::Hot).expect("serialize tier");
        assert_eq!(json, "\"hot\"");
    }

    #[test]
    fn test_default_deal_priority() {
        assert_eq!(Deal::default().feature_priority, DEFAULT_FEATURE_PRIORITY);
    }
}
