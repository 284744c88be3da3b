use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the university's dining locations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Campus {
    #[serde(rename = "cde")]
    DrieEiken,
    #[default]
    #[serde(rename = "cmi")]
    Middelheim,
    #[serde(rename = "cst")]
    Stad,
}

impl Campus {
    pub const ALL: [Campus; 3] = [Campus::DrieEiken, Campus::Middelheim, Campus::Stad];

    /// Canonical three-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Campus::DrieEiken => "cde",
            Campus::Middelheim => "cmi",
            Campus::Stad => "cst",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Campus::DrieEiken => "Campus Drie Eiken",
            Campus::Middelheim => "Campus Middelheim",
            Campus::Stad => "Stadscampus",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown campus code '{0}' (expected one of cde, cmi, cst)")]
pub struct ParseCampusError(pub String);

impl FromStr for Campus {
    type Err = ParseCampusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Campus::ALL
            .into_iter()
            .find(|campus| campus.code() == code)
            .ok_or_else(|| ParseCampusError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Yesterday,
    Today,
    Tomorrow,
}

impl RelativeDay {
    pub fn offset_days(self) -> i64 {
        match self {
            RelativeDay::Yesterday => -1,
            RelativeDay::Today => 0,
            RelativeDay::Tomorrow => 1,
        }
    }
}

/// A date as written by the user, before it is pinned to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpec {
    Calendar(NaiveDate),
    Weekday(Weekday),
    Relative(RelativeDay),
}

impl DateSpec {
    /// Pins the spec to a calendar date relative to `clock`.
    ///
    /// Weekdays resolve to their next occurrence counting today: a day still
    /// ahead in the current Monday-based week stays in this week, an earlier
    /// one rolls into the next week. Returns `None` only when the result
    /// falls outside chrono's supported range.
    pub fn resolve(&self, clock: &ReferenceClock) -> Option<NaiveDate> {
        let today = clock.today();
        match *self {
            DateSpec::Calendar(date) => Some(date),
            DateSpec::Weekday(target) => {
                let current = i64::from(today.weekday().num_days_from_monday());
                let wanted = i64::from(target.num_days_from_monday());
                let ahead = (wanted - current).rem_euclid(7);
                today.checked_add_days(Days::new(ahead as u64))
            }
            DateSpec::Relative(day) => match day.offset_days() {
                n if n < 0 => today.checked_sub_days(Days::new(n.unsigned_abs())),
                n => today.checked_add_days(Days::new(n as u64)),
            },
        }
    }
}

/// The "now" relative date expressions are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    now: NaiveDateTime,
}

impl ReferenceClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Midnight of the given date.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN))
    }

    /// Local wall-clock time in `tz` at the given instant.
    pub fn from_utc(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self::new(instant.with_timezone(&tz).naive_local())
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

/// A fully resolved request, ready for menu lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub campus: Campus,
    pub date: NaiveDate,
}

impl Query {
    pub fn new(campus: Campus, date: NaiveDate) -> Self {
        Self { campus, date }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.campus, self.date.format("%A %d %B"))
    }
}

/// Why no query could be built from a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    #[error("'{phrase}' matches campus aliases of both {first} and {second}")]
    AmbiguousCampus {
        phrase: String,
        first: Campus,
        second: Campus,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    NotAddressed,
    AddressedDefault,
    AddressedWithPhrase(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoAction,
    Query(Query),
    Failure(ResolutionFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub is_direct: bool,
    pub from_bot: bool,
}

impl InboundMessage {
    /// A message posted in a shared channel.
    pub fn channel(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_direct: false,
            from_bot: false,
        }
    }

    pub fn direct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_direct: true,
            from_bot: false,
        }
    }

    pub fn sent_by_bot(mut self) -> Self {
        self.from_bot = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Soup,
    Vegetarian,
    Meat,
    Grill,
    Pasta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub kind: MenuKind,
    pub name: String,
    pub price_student: f64,
    pub price_staff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMenu {
    pub campus: Campus,
    pub date: NaiveDate,
    pub items: Vec<MenuItem>,
}

impl DailyMenu {
    pub fn query(&self) -> Query {
        Query::new(self.campus, self.date)
    }
}
