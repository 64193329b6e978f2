//! Team synergy scoring.
//!
//! A heuristic score built from four independent checks: attack-type
//! unity, a tank, a healer or supporter, and terrain fit. Teams with
//! fewer than four occupants are not scored.

use crate::roster::{AttackType, Student};
use crate::team::Team;
use crate::terrain::{MoodRank, Terrain};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupants needed before a team is scored.
pub const MIN_SCORED_MEMBERS: usize = 4;

/// Nominal maximum shown next to a score. The terrain check can push a
/// score past it.
pub const DISPLAY_MAX_SCORE: u32 = 60;

pub const UNITY_POINTS: u32 = 30;
pub const PARTIAL_UNITY_POINTS: u32 = 15;
pub const TANK_POINTS: u32 = 10;
pub const SUSTAIN_POINTS: u32 = 10;
pub const TERRAIN_POINTS: u32 = 15;

const EXCELLENT_THRESHOLD: u32 = 45;
const SOLID_THRESHOLD: u32 = 30;

const TANK_ROLE: &str = "Tanker";
const SUSTAIN_ROLES: [&str; 2] = ["Healer", "Supporter"];

const INSUFFICIENT_MEMBERS: &str = "Add more students to see synergy analysis.";

/// Score band of a synergy report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynergyBand {
    Excellent,
    Solid,
    WorkInProgress,
}

impl SynergyBand {
    pub fn from_score(score: u32) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            SynergyBand::Excellent
        } else if score >= SOLID_THRESHOLD {
            SynergyBand::Solid
        } else {
            SynergyBand::WorkInProgress
        }
    }

    /// Prefix placed before the description fragments.
    pub fn prefix(self) -> &'static str {
        match self {
            SynergyBand::Excellent => "Excellent Team! ",
            SynergyBand::Solid => "Solid Team. ",
            SynergyBand::WorkInProgress => "Work in progress. ",
        }
    }

    /// Display color for the score.
    pub fn color(self) -> &'static str {
        match self {
            SynergyBand::Excellent => "#4CAF50",
            SynergyBand::Solid => "#FFC107",
            SynergyBand::WorkInProgress => "#F44336",
        }
    }
}

impl fmt::Display for SynergyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynergyBand::Excellent => f.write_str("Excellent"),
            SynergyBand::Solid => f.write_str("Solid"),
            SynergyBand::WorkInProgress => f.write_str("Work in progress"),
        }
    }
}

/// Result of scoring a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyReport {
    pub score: u32,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl SynergyReport {
    pub fn band(&self) -> SynergyBand {
        SynergyBand::from_score(self.score)
    }

    fn insufficient() -> Self {
        Self {
            score: 0,
            description: INSUFFICIENT_MEMBERS.to_string(),
            recommendations: Vec::new(),
        }
    }
}

/// Key used for the dominant attack type in descriptions.
fn type_key(attack: AttackType) -> &'static str {
    match attack {
        AttackType::Explosion => "explosion",
        AttackType::Pierce => "pierce",
        AttackType::Mystic => "mystic",
        AttackType::Sonic => "sonic",
        AttackType::Normal => "normal",
    }
}

/// The typed attack with the most members; the earliest type wins ties.
fn dominant_attack_type(members: &[&Student]) -> (AttackType, usize) {
    AttackType::TYPED
        .iter()
        .map(|&attack| {
            let count = members.iter().filter(|s| s.bullet_type == attack).count();
            (attack, count)
        })
        .fold((AttackType::TYPED[0], 0), |best, current| {
            if current.1 > best.1 {
                current
            } else {
                best
            }
        })
}

/// Score a team on a terrain.
///
/// # Examples
///
/// ```rust
/// use kivostat::{AttackType, Student, SynergyBand, Team, Terrain};
/// use kivostat::synergy::score;
///
/// let dps = Student { bullet_type: AttackType::Pierce, ..Default::default() };
/// let tank = Student { tactic_role: "Tanker".into(), ..dps.clone() };
/// let healer = Student { tactic_role: "Healer".into(), ..dps.clone() };
///
/// let mut team = Team::standard();
/// team.assign(0, &tank).unwrap();
/// team.assign(1, &dps).unwrap();
/// team.assign(2, &dps).unwrap();
/// team.assign(3, &healer).unwrap();
///
/// let report = score(&team, Terrain::Street);
/// assert_eq!(report.score, 50);
/// assert_eq!(report.band(), SynergyBand::Excellent);
/// ```
pub fn score(team: &Team<'_>, terrain: Terrain) -> SynergyReport {
    let members: Vec<&Student> = team.occupants().collect();
    let total = members.len();
    if total < MIN_SCORED_MEMBERS {
        return SynergyReport::insufficient();
    }

    let mut points = 0;
    let mut description = String::new();
    let mut recommendations = Vec::new();

    let (dominant, max_count) = dominant_attack_type(&members);
    let key = type_key(dominant);
    if max_count + 1 >= total {
        points += UNITY_POINTS;
        description.push_str(&format!("Strong {} team composition.", key));
    } else if max_count + 2 >= total {
        points += PARTIAL_UNITY_POINTS;
        description.push_str(&format!("Decent {} focus, but somewhat mixed.", key));
        recommendations.push(format!(
            "Try to unify Attack Type to {} for better effectiveness.",
            key
        ));
    } else {
        description.push_str("Mixed Attack Types (Rainbow team).");
        recommendations.push("Focus on one Attack Type for better buffer synergy.".to_string());
    }

    if members.iter().any(|s| s.tactic_role == TANK_ROLE) {
        points += TANK_POINTS;
    } else {
        recommendations.push("Add a Tank to protect your Strikers.".to_string());
    }

    if members
        .iter()
        .any(|s| SUSTAIN_ROLES.contains(&s.tactic_role.as_str()))
    {
        points += SUSTAIN_POINTS;
    } else {
        recommendations.push("Consider a Healer or Buffer for sustainability/damage.".to_string());
    }

    let good_terrain = members
        .iter()
        .filter(|s| MoodRank::classify(s.adaptation(terrain)).is_favorable())
        .count();
    if good_terrain + 1 >= total {
        points += TERRAIN_POINTS;
        description.push_str(" Great terrain adaptation!");
    } else if good_terrain * 2 < total {
        recommendations.push(format!("Many students have bad mood in {} warfare.", terrain));
    }

    let band = SynergyBand::from_score(points);
    SynergyReport {
        score: points,
        description: format!("{}{}", band.prefix(), description),
        recommendations,
    }
}
