use crate::filters::FilterState;
use crate::grouping::build_venue_groups_with;
use crate::models::{Deal, Tier, VenueGroup};
use crate::tier::TierResolver;
use crate::times::{parse_start_time, UNKNOWN_START};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Boulder neighborhood a venue is tagged with
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Neighborhood {
    #[serde(rename = "NoBo")]
    NoBo,
    #[serde(rename = "SoBo")]
    SoBo,
    #[serde(rename = "Downtown")]
    Downtown,
    #[serde(rename = "LesBo")]
    LesBo,
    #[serde(rename = "The Hill")]
    TheHill,
    #[serde(rename = "Central")]
    Central,
}

impl Neighborhood {
    /// First flagged neighborhood, checked in sheet column order
    pub fn of(deal: &Deal) -> Option<Self> {
        [
            (deal.nobo, Neighborhood::NoBo),
            (deal.sobo, Neighborhood::SoBo),
            (deal.downtown, Neighborhood::Downtown),
            (deal.lesbo, Neighborhood::LesBo),
            (deal.thehill, Neighborhood::TheHill),
            (deal.central, Neighborhood::Central),
        ]
        .into_iter()
        .find_map(|(flag, hood)| flag.then_some(hood))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Neighborhood::NoBo => "NoBo",
            Neighborhood::SoBo => "SoBo",
            Neighborhood::Downtown => "Downtown",
            Neighborhood::LesBo => "LesBo",
            Neighborhood::TheHill => "The Hill",
            Neighborhood::Central => "Central",
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DealCard<'a> {
    #[serde(flatten)]
    pub deal: &'a Deal,
    pub tier: Option<Tier>,
    /// Minutes since midnight, absent when the time text can't be read
    pub start_minutes: Option<u32>,
    /// Badge shown on the card; the flattened deal keeps the raw sheet flag
    pub show_taco_tuesday: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueCard<'a> {
    pub venue: &'a str,
    pub city: &'a str,
    pub tier: Option<Tier>,
    pub neighborhood: Option<Neighborhood>,
    pub deals: Vec<DealCard<'a>>,
}

/// Everything a renderer needs for one view of the listing
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    pub selected_day: String,
    pub venue_count: usize,
    pub show_ad_card: bool,
    pub show_coffee_card: bool,
    pub venues: Vec<VenueCard<'a>>,
}

fn venue_card<'a>(group: VenueGroup<'a>, selected_day: &str, resolver: &TierResolver) -> VenueCard<'a> {
    let neighborhood = group.deals.first().and_then(|deal| Neighborhood::of(deal));

    let deals: Vec<DealCard<'a>> = group
        .deals
        .into_iter()
        .map(|deal| {
            let start = parse_start_time(&deal.time);
            DealCard {
                deal,
                tier: resolver.resolve(deal),
                start_minutes: (start != UNKNOWN_START).then_some(start),
                show_taco_tuesday: deal.taco_tuesday
                    && (deal.day == "Tuesday" || selected_day == "Tuesday"),
            }
        })
        .collect();

    let tier = deals
        .iter()
        .filter_map(|card| card.tier)
        .min_by_key(|tier| tier.rank());

    VenueCard {
        venue: group.venue,
        city: group.city,
        tier,
        neighborhood,
        deals,
    }
}

/// Filter, group and sort `deals` for `filter`, wrapped with display hints.
///
/// Ad and coffee card flags look at the whole snapshot, not only the
/// deals that survive the filter.
pub fn build_listing<'a>(deals: &'a [Deal], filter: &FilterState, resolver: &TierResolver) -> Listing<'a> {
    let filtered = filter.apply(deals);
    let groups = build_venue_groups_with(&filtered, resolver);

    debug!(
        total = deals.len(),
        matched = filtered.len(),
        venues = groups.len(),
        day = %filter.selected_day,
        "Built listing"
    );

    let venues: Vec<VenueCard<'a>> = groups
        .into_iter()
        .map(|group| venue_card(group, &filter.selected_day, resolver))
        .collect();

    Listing {
        selected_day: filter.selected_day.clone(),
        venue_count: venues.len(),
        show_ad_card: deals.iter().any(|d| d.show_ad_card),
        show_coffee_card: deals.iter().any(|d| d.coffee),
        venues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::DrinkFilter;
    use crate::parser::parse_deals;
    use crate::tier::InvalidExpirationPolicy;
    use chrono::NaiveDate;

    const SHEET: &str = "\
Venue,City,Day,Deal Type,Time,Deal Description,Beer,Wine,NoBo,Downtown,TheHill,Taco Tuesday,Feature Tier,Feature Expiration,Feature Priority,Show Ad Card,Coffee
Tap House,Boulder,Tuesday,Drink,4pm-6pm,$5 pints,x,,,x,,,,,,,
Tap House,Boulder,Daily,Food,2pm-4pm,Half off wings,,,,x,,,,,,,
Rio,Boulder,Weekdays,Food,3pm-6pm,Tacos,,,x,,,x,hot,,2,x,
Sink,Boulder,Daily,Drink,9pm-close,Wells,x,x,,,x,,premium,2025-01-01,1,,
Wine Bar,Boulder,Monday,Drink,5pm-7pm,Glasses,,x,,,,,basic,,,,x
";

    fn resolver() -> TierResolver {
        TierResolver::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            InvalidExpirationPolicy::KeepTier,
        )
    }

    #[test]
    fn test_tuesday_listing() {
        let deals = parse_deals(SHEET);
        assert_eq!(deals.len(), 5);

        let listing = build_listing(&deals, &FilterState::for_day("Tuesday"), &resolver());

        let venues: Vec<&str> = listing.venues.iter().map(|v| v.venue).collect();
        // Rio is hot; Sink's premium expired but its priority still beats Tap House
        assert_eq!(venues, vec!["Rio", "Sink", "Tap House"]);
        assert_eq!(listing.venue_count, 3);
        assert!(listing.show_ad_card);
        assert!(listing.show_coffee_card);

        let rio = &listing.venues[0];
        assert_eq!(rio.tier, Some(Tier::Hot));
        assert_eq!(rio.neighborhood, Some(Neighborhood::NoBo));
        assert!(rio.deals[0].show_taco_tuesday);

        let sink = &listing.venues[1];
        assert_eq!(sink.tier, None);
        assert_eq!(sink.neighborhood, Some(Neighborhood::TheHill));

        let tap = &listing.venues[2];
        assert_eq!(tap.tier, None);
        assert_eq!(tap.neighborhood, Some(Neighborhood::Downtown));
        let starts: Vec<Option<u32>> = tap.deals.iter().map(|d| d.start_minutes).collect();
        assert_eq!(starts, vec![Some(14 * 60), Some(16 * 60)]);
    }

    #[test]
    fn test_taco_tuesday_badge_needs_tuesday() {
        let deals = parse_deals(SHEET);
        let listing = build_listing(&deals, &FilterState::for_day("Wednesday"), &resolver());
        let rio = listing.venues.iter().find(|v| v.venue == "Rio").unwrap();
        assert!(!rio.deals[0].show_taco_tuesday);
        assert!(rio.deals[0].deal.taco_tuesday);
    }

    #[test]
    fn test_deal_card_keys_are_unique() {
        let deals = parse_deals(SHEET);
        let listing = build_listing(&deals, &FilterState::for_day("Wednesday"), &resolver());

        for card in listing.venues.iter().flat_map(|v| v.deals.iter()) {
            let json = serde_json::to_string(card).unwrap();
            for key in ["\"taco_tuesday\":", "\"show_taco_tuesday\":", "\"tier\":", "\"venue\":"] {
                assert_eq!(json.matches(key).count(), 1, "{} repeated in {}", key, json);
            }
        }

        let rio = &listing.venues.iter().find(|v| v.venue == "Rio").unwrap().deals[0];
        let json = serde_json::to_string(rio).unwrap();
        assert!(json.contains("\"taco_tuesday\":true"));
        assert!(json.contains("\"show_taco_tuesday\":false"));
    }

    #[test]
    fn test_late_night_drink_listing() {
        let deals = parse_deals(SHEET);
        let filter = FilterState::for_day("Monday")
            .with_deal_type("Drink")
            .with_drink(DrinkFilter::Wine)
            .late_night(true);

        let listing = build_listing(&deals, &filter, &resolver());
        let venues: Vec<&str> = listing.venues.iter().map(|v| v.venue).collect();
        assert_eq!(venues, vec!["Sink"]);
        // card flags still reflect the whole sheet
        assert!(listing.show_ad_card);
    }

    #[test]
    fn test_listing_serializes_flat_deals() {
        let deals = parse_deals(SHEET);
        let listing = build_listing(&deals, &FilterState::for_day("Monday"), &resolver());
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["venues"][0]["venue"], "Rio");
        assert_eq!(json["venues"][0]["tier"], "hot");

        let wine_bar = &json["venues"][1];
        assert_eq!(wine_bar["venue"], "Wine Bar");
        assert_eq!(wine_bar["tier"], "basic");
        assert_eq!(wine_bar["deals"][0]["deal_description"], "Glasses");
        assert_eq!(wine_bar["deals"][0]["tier"], "basic");
        assert_eq!(wine_bar["deals"][0]["start_minutes"], 17 * 60);
        assert_eq!(json["selected_day"], "Monday");
    }

    #[test]
    fn test_neighborhood_precedence() {
        let deal = Deal {
            venue: "X".to_string(),
            sobo: true,
            central: true,
            ..Deal::default()
        };
        assert_eq!(Neighborhood::of(&deal), Some(Neighborhood::SoBo));
        assert_eq!(Neighborhood::of(&Deal::default()), None);
        assert_eq!(Neighborhood::TheHill.to_string(), "The Hill");
    }
}
