//! Terrain adaptation ("mood") ranks.

use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Battlefield terrain.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Street,
    Outdoor,
    Indoor,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::Street, Terrain::Outdoor, Terrain::Indoor];
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terrain::Street => f.write_str("Street"),
            Terrain::Outdoor => f.write_str("Outdoor"),
            Terrain::Indoor => f.write_str("Indoor"),
        }
    }
}

/// Discrete adaptation rank, ordered worst to best.
///
/// # Examples
///
/// ```rust
/// use kivostat::MoodRank;
///
/// assert_eq!(MoodRank::classify(3.0), MoodRank::A);
/// assert_eq!(MoodRank::classify(0.0), MoodRank::D);
/// assert_eq!(MoodRank::classify(5.0), MoodRank::SS);
/// assert!(MoodRank::S > MoodRank::B);
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoodRank {
    D,
    C,
    B,
    A,
    S,
    SS,
}

impl MoodRank {
    /// Map a raw adaptation scalar onto a rank, assuming a 0..=5 scale.
    pub fn classify(value: StatValue) -> Self {
        if value >= 5.0 {
            MoodRank::SS
        } else if value >= 4.0 {
            MoodRank::S
        } else if value >= 3.0 {
            MoodRank::A
        } else if value >= 2.0 {
            MoodRank::B
        } else if value >= 1.0 {
            MoodRank::C
        } else {
            MoodRank::D
        }
    }

    /// Whether the rank counts as a good fit (A or better).
    pub fn is_favorable(self) -> bool {
        self >= MoodRank::A
    }

    /// Face shown next to the rank.
    pub fn icon(self) -> &'static str {
        match self {
            MoodRank::SS => "🤩",
            MoodRank::S => "😁",
            MoodRank::A => "🙂",
            MoodRank::B => "😐",
            MoodRank::C => "🙁",
            MoodRank::D => "😨",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodRank::D => "D",
            MoodRank::C => "C",
            MoodRank::B => "B",
            MoodRank::A => "A",
            MoodRank::S => "S",
            MoodRank::SS => "SS",
        }
    }
}

impl fmt::Display for MoodRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-function form of [`MoodRank::classify`].
pub fn classify(value: StatValue) -> MoodRank {
    MoodRank::classify(value)
}
