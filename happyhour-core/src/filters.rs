use crate::models::Deal;
use crate::times::is_late_night;
use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};

/// Day names as shown in the day picker, Sunday first
pub const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];
const WEEKEND: [&str; 2] = ["saturday", "sunday"];

/// Value meaning "no restriction" for the type and drink filters
pub const ALL: &str = "all";

/// Drink sub-filter, only consulted when browsing drink deals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DrinkFilter {
    #[default]
    All,
    Beer,
    Wine,
    Cocktail,
    Margarita,
}

impl From<String> for DrinkFilter {
    fn from(raw: String) -> Self {
        DrinkFilter::parse(&raw)
    }
}

impl DrinkFilter {
    /// Unrecognised values mean no restriction
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beer" => DrinkFilter::Beer,
            "wine" => DrinkFilter::Wine,
            "cocktail" => DrinkFilter::Cocktail,
            "margarita" => DrinkFilter::Margarita,
            _ => DrinkFilter::All,
        }
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        match self {
            DrinkFilter::All => true,
            DrinkFilter::Beer => deal.beer,
            DrinkFilter::Wine => deal.wine,
            DrinkFilter::Cocktail => deal.cocktail,
            DrinkFilter::Margarita => deal.margarita,
        }
    }
}

/// The listing's current selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub selected_day: String,
    pub deal_type: String,
    pub drink: DrinkFilter,
    pub late_night_only: bool,
}

impl FilterState {
    /// Everything on `day`, no other restriction
    pub fn for_day(day: impl Into<String>) -> Self {
        Self {
            selected_day: day.into(),
            deal_type: ALL.to_string(),
            drink: DrinkFilter::All,
            late_night_only: false,
        }
    }

    /// Everything on the local weekday
    pub fn for_today() -> Self {
        Self::for_day(today_name())
    }

    pub fn with_deal_type(mut self, deal_type: impl Into<String>) -> Self {
        self.deal_type = deal_type.into();
        self
    }

    pub fn with_drink(mut self, drink: DrinkFilter) -> Self {
        self.drink = drink;
        self
    }

    pub fn late_night(mut self, late_night_only: bool) -> Self {
        self.late_night_only = late_night_only;
        self
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        if !matches_day(deal, &self.selected_day) {
            return false;
        }

        if self.deal_type != ALL && deal.deal_type != self.deal_type {
            return false;
        }

        if self.late_night_only && !is_late_night(&deal.time) {
            return false;
        }

        if self.deal_type == "Drink" && !self.drink.matches(deal) {
            return false;
        }

        true
    }

    /// Deals matching every active criterion, in input order
    pub fn apply<'a>(&self, deals: &'a [Deal]) -> Vec<&'a Deal> {
        deals.iter().filter(|deal| self.matches(deal)).collect()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::for_today()
    }
}

/// Name of the local weekday, as used in the sheet's `Day` column
pub fn today_name() -> &'static str {
    day_name(Local::now().weekday())
}

pub fn day_name(weekday: Weekday) -> &'static str {
    DAYS[weekday.num_days_from_sunday() as usize]
}

/// Literal day match, or one of the `daily` / `weekdays` / `weekends` specials
pub fn matches_day(deal: &Deal, selected_day: &str) -> bool {
    if deal.day == selected_day {
        return true;
    }

    let selected = selected_day.to_lowercase();
    match deal.day.to_lowercase().as_str() {
        "daily" => true,
        "weekdays" => WEEKDAYS.contains(&selected.as_str()),
        "weekends" => WEEKEND.contains(&selected.as_str()),
        _ => false,
    }
}

/// Filter deals by day, type, drink category and late-night window
pub fn filter_deals<'a>(
    deals: &'a [Deal],
    selected_day: &str,
    deal_type: &str,
    drink_filter: &str,
    late_night_only: bool,
) -> Vec<&'a Deal> {
    FilterState {
        selected_day: selected_day.to_string(),
        deal_type: deal_type.to_string(),
        drink: DrinkFilter::parse(drink_filter),
        late_night_only,
    }
    .apply(deals)
}
