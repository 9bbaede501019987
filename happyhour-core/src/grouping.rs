use crate::models::{tier_rank, Deal, VenueGroup, DEFAULT_FEATURE_PRIORITY};
use crate::tier::TierResolver;
use crate::times::{parse_start_time, UNKNOWN_START};
use std::collections::HashMap;

/// Bucket deals by exact `(venue, city)`, keeping first-seen venue order
pub fn group_by_venue<'a>(deals: &[&'a Deal]) -> Vec<VenueGroup<'a>> {
    let mut index: HashMap<(&'a str, &'a str), usize> = HashMap::new();
    let mut groups: Vec<VenueGroup<'a>> = Vec::new();

    for &deal in deals {
        let slot = *index.entry(deal.venue_key()).or_insert_with(|| {
            groups.push(VenueGroup::new(&deal.venue, &deal.city));
            groups.len() - 1
        });
        groups[slot].deals.push(deal);
    }

    groups
}

/// Order each venue's deals by start time, earliest first
pub fn sort_venue_deals(groups: &mut [VenueGroup<'_>]) {
    for group in groups.iter_mut() {
        group.deals.sort_by_cached_key(|deal| parse_start_time(&deal.time));
    }
}

/// Sort key for a venue: best tier, then lowest feature priority, then
/// the start time of its first deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VenueRank {
    pub tier_rank: u8,
    pub feature_priority: i32,
    pub first_start: u32,
}

impl VenueRank {
    pub fn of(group: &VenueGroup<'_>, resolver: &TierResolver) -> Self {
        let best_tier = resolver.best_of(group.deals.iter().copied());
        let feature_priority = group
            .deals
            .iter()
            .map(|deal| deal.feature_priority)
            .fold(DEFAULT_FEATURE_PRIORITY, i32::min);
        let first_start = group
            .deals
            .first()
            .map(|deal| parse_start_time(&deal.time))
            .unwrap_or(UNKNOWN_START);

        Self {
            tier_rank: tier_rank(best_tier),
            feature_priority,
            first_start,
        }
    }
}

/// Order venues by [`VenueRank`]. Stable, so ties keep their input order.
pub fn sort_venues(groups: &mut [VenueGroup<'_>], resolver: &TierResolver) {
    groups.sort_by_cached_key(|group| VenueRank::of(group, resolver));
}

/// Group, sort within each venue, then sort venues
pub fn build_venue_groups_with<'a>(deals: &[&'a Deal], resolver: &TierResolver) -> Vec<VenueGroup<'a>> {
    let mut groups = group_by_venue(deals);
    sort_venue_deals(&mut groups);
    sort_venues(&mut groups, resolver);
    groups
}

/// [`build_venue_groups_with`] using today's local date for tier expiry
pub fn build_venue_groups<'a>(deals: &[&'a Deal]) -> Vec<VenueGroup<'a>> {
    build_venue_groups_with(deals, &TierResolver::default())
}
