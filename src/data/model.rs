use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, stored in the source file as `class` (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode the raw `class` value. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric class value (0 or 1).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name, e.g. `CCAFS LC-40`.
    pub launch_site: String,
    /// Payload mass in kilograms (finite, non-negative).
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Booster version category, e.g. `FT` or `B5`.
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, immutable table of launch records in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn new(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch site names, sorted ascending.
    pub fn distinct_sites(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.launch_site.as_str()).collect()
    }

    /// Distinct booster version categories, sorted ascending.
    pub fn distinct_booster_categories(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .map(|r| r.booster_category.as_str())
            .collect()
    }

    /// Minimum and maximum observed payload mass, `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        let mut masses = self.records.iter().map(|r| r.payload_mass_kg);
        let first = masses.next()?;
        Some(masses.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }

    /// Number of successful launches across the whole table.
    pub fn success_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Reserved selector value meaning "do not filter by site".
pub const ALL_SITES: &str = "ALL";

/// Value of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Interpret a raw dropdown value; only the exact `ALL` sentinel means all sites.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    /// The raw dropdown value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES,
            SiteSelector::Site(name) => name,
        }
    }

    /// The concrete site name, `None` for the ALL sentinel.
    pub fn site(&self) -> Option<&str> {
        match self {
            SiteSelector::All => None,
            SiteSelector::Site(name) => Some(name),
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for SiteSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// The aggregation itself places no bounds on either end; an inverted range
/// simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

// ---------------------------------------------------------------------------
// Rgb – toolkit-independent chart colour
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour attached to chart-ready tables; serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Success slices: `#2ca02c`.
    pub const SUCCESS_GREEN: Rgb = Rgb(0x2c, 0xa0, 0x2c);
    /// Failure slices: `#d62728`.
    pub const FAILURE_RED: Rgb = Rgb(0xd6, 0x27, 0x28);

    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Rgb::SUCCESS_GREEN,
            Outcome::Failure => Rgb::FAILURE_RED,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
