use crate::models::{Deal, Tier};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a promotion whose expiration cell is not a date
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvalidExpirationPolicy {
    /// Treat the promotion as having no expiration
    #[default]
    KeepTier,
    /// Treat the promotion as already expired
    Expire,
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    // two-digit years first so "25" is never read as year 25
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Parse an expiration cell as a calendar date
pub fn parse_expiration(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Resolves the active promotion tier of a deal as of a fixed day
#[derive(Debug, Clone, Copy)]
pub struct TierResolver {
    today: NaiveDate,
    invalid_expiration: InvalidExpirationPolicy,
}

impl TierResolver {
    pub fn new(today: NaiveDate, invalid_expiration: InvalidExpirationPolicy) -> Self {
        Self {
            today,
            invalid_expiration,
        }
    }

    /// Resolver for the local calendar date
    pub fn today(invalid_expiration: InvalidExpirationPolicy) -> Self {
        Self::new(Local::now().date_naive(), invalid_expiration)
    }

    /// Active tier of `deal`, or `None` when unset, unknown or expired.
    ///
    /// A promotion stays live through the whole of its expiration day.
    pub fn resolve(&self, deal: &Deal) -> Option<Tier> {
        let tier = Tier::parse(&deal.feature_tier)?;

        let expiration = deal.feature_expiration.trim();
        if expiration.is_empty() {
            return Some(tier);
        }

        match parse_expiration(expiration) {
            Some(date) if self.today > date => None,
            Some(_) => Some(tier),
            None => {
                warn!(
                    venue = %deal.venue,
                    expiration,
                    policy = ?self.invalid_expiration,
                    "Unparseable feature expiration"
                );
                match self.invalid_expiration {
                    InvalidExpirationPolicy::KeepTier => Some(tier),
                    InvalidExpirationPolicy::Expire => None,
                }
            }
        }
    }

    /// Best (lowest-ranked) active tier among `deals`
    pub fn best_of<'a, I>(&self, deals: I) -> Option<Tier>
    where
        I: IntoIterator<Item = &'a Deal>,
    {
        deals
            .into_iter()
            .filter_map(|deal| self.resolve(deal))
            .min_by_key(|tier| tier.rank())
    }
}

impl Default for TierResolver {
    fn default() -> Self {
        Self::today(InvalidExpirationPolicy::default())
    }
}

/// Active tier of a deal as of the local date, keeping tiers with invalid expirations
pub fn resolve_feature_tier(deal: &Deal) -> Option<Tier> {
    TierResolver::default().resolve(deal)
}
