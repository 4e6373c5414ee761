use std::fmt;

use serde::{Deserialize, Serialize};

/// Effort estimate drawn from the fixed planning scale.
///
/// `NA` is a real member of the scale, not an absent value: it serializes
/// as `N/A` and counts as zero in every sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Points {
    Na,
    One,
    Two,
    Three,
    Five,
    Eight,
    Thirteen,
    TwentyOne,
}

impl Points {
    pub const ALL: &[Points] = &[
        Points::Na,
        Points::One,
        Points::Two,
        Points::Three,
        Points::Five,
        Points::Eight,
        Points::Thirteen,
        Points::TwentyOne,
    ];

    /// Label as it appears on disk and in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Points::Na => "N/A",
            Points::One => "1",
            Points::Two => "2",
            Points::Three => "3",
            Points::Five => "5",
            Points::Eight => "8",
            Points::Thirteen => "13",
            Points::TwentyOne => "21",
        }
    }

    /// Numeric value used by the aggregator. `N/A` counts as 0.
    pub fn value(&self) -> u32 {
        match self {
            Points::Na => 0,
            Points::One => 1,
            Points::Two => 2,
            Points::Three => 3,
            Points::Five => 5,
            Points::Eight => 8,
            Points::Thirteen => 13,
            Points::TwentyOne => 21,
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim() {
            "N/A" | "n/a" | "NA" | "" => Some(Points::Na),
            "1" => Some(Points::One),
            "2" => Some(Points::Two),
            "3" => Some(Points::Three),
            "5" => Some(Points::Five),
            "8" => Some(Points::Eight),
            "13" => Some(Points::Thirteen),
            "21" => Some(Points::TwentyOne),
            _ => None,
        }
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
