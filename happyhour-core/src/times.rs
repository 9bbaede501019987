use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Sort position for deals whose time cannot be read; after any real time of day
pub const UNKNOWN_START: u32 = 9999;

/// 8pm, in minutes since midnight
pub const LATE_NIGHT_START: u32 = 20 * 60;

static START_TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)(?::(\d+))?\s*(am|pm)?").unwrap());

// start sep [end], e.g. "4pm-9pm", "4 - 6 PM", "9:30pm to close"
static TIME_RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+)(?::(\d+))?\s*(am|pm)?(?:\s*(?:-|–|—|to)\s*|\s+)(?:(\d+)(?::(\d+))?\s*(am|pm)?)?",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("am") {
            Some(Meridiem::Am)
        } else if raw.eq_ignore_ascii_case("pm") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }
}

/// A clock reading as written in the sheet, meridiem optional
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Option<Meridiem>,
}

impl ClockTime {
    /// Minutes since midnight; a missing meridiem reads as pm
    pub fn minutes(&self) -> Option<u32> {
        to_minutes(self.hour, self.minute, Some(self.meridiem.unwrap_or(Meridiem::Pm)))
    }

    /// Minutes since midnight, taking the hour as-is when no meridiem is written
    pub fn minutes_as_written(&self) -> Option<u32> {
        to_minutes(self.hour, self.minute, self.meridiem)
    }

    fn from_captures(caps: &Captures<'_>, hour: usize, minute: usize, meridiem: usize) -> Option<Self> {
        let hour = caps.get(hour)?.as_str().parse().ok()?;
        let minute = match caps.get(minute) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let meridiem = caps.get(meridiem).and_then(|m| Meridiem::parse(m.as_str()));
        Some(Self {
            hour,
            minute,
            meridiem,
        })
    }
}

fn to_minutes(hour: u32, minute: u32, meridiem: Option<Meridiem>) -> Option<u32> {
    let hour = match (meridiem, hour) {
        (Some(Meridiem::Pm), h) if h != 12 => h.checked_add(12)?,
        (Some(Meridiem::Am), 12) => 0,
        (_, h) => h,
    };
    hour.checked_mul(60)?.checked_add(minute)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: Option<ClockTime>,
}

/// First `hour[:minute][am|pm]` in the string as minutes since midnight,
/// or [`UNKNOWN_START`] when there is none.
pub fn parse_start_time(time: &str) -> u32 {
    START_TIME_PATTERN
        .captures(time)
        .and_then(|caps| ClockTime::from_captures(&caps, 1, 2, 3))
        .and_then(|clock| clock.minutes())
        .unwrap_or(UNKNOWN_START)
}

/// Read a start and optional end time from a free-text range.
///
/// A separator after the start is required, so a lone "9pm" is not a range.
pub fn parse_time_range(time: &str) -> Option<TimeRange> {
    let caps = TIME_RANGE_PATTERN.captures(time)?;
    let start = ClockTime::from_captures(&caps, 1, 2, 3)?;
    let end = if caps.get(4).is_some() {
        Some(ClockTime::from_captures(&caps, 4, 5, 6)?)
    } else {
        None
    };
    Some(TimeRange { start, end })
}

/// Whether a deal's time window starts at or after 8pm, or runs past 8pm.
///
/// The string must carry a pm marker somewhere and read as a range. A start
/// without a meridiem reads as pm and a start marked am never qualifies; an
/// end without a meridiem is taken as written, so "4pm-11" ends at 11:00.
pub fn is_late_night(time: &str) -> bool {
    if !time.to_lowercase().contains("pm") {
        return false;
    }

    let Some(range) = parse_time_range(time) else {
        return false;
    };

    if range.start.meridiem == Some(Meridiem::Am) {
        return false;
    }

    if range.start.minutes().is_some_and(|start| start >= LATE_NIGHT_START) {
        return true;
    }

    range
        .end
        .and_then(|end| end.minutes_as_written())
        .is_some_and(|end| end > LATE_NIGHT_START)
}
