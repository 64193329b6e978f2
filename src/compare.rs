//! Side-by-side comparison of two students.

use crate::damage::{project_damage, DamageProjection};
use crate::numeric::{clamp_comparison_level, clamp_skill_level, StatValue};
use crate::roster::Student;
use crate::source::interpolate;
use crate::stat::StatKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Level a comparison slot starts at.
pub const DEFAULT_COMPARISON_LEVEL: u32 = 80;

/// Skill level a comparison slot starts at.
pub const DEFAULT_COMPARISON_SKILL_LEVEL: u32 = 7;

/// Displayed stats with the bar maximum used for each.
pub const COMPARED_STATS: [(StatKind, StatValue); 9] = [
    (StatKind::MaxHp, 50000.0),
    (StatKind::AttackPower, 10000.0),
    (StatKind::DefensePower, 500.0),
    (StatKind::HealPower, 10000.0),
    (StatKind::AccuracyPoint, 3000.0),
    (StatKind::CriticalPoint, 1000.0),
    (StatKind::CriticalDamageRate, 30000.0),
    (StatKind::DodgePoint, 1000.0),
    (StatKind::Range, 1500.0),
];

/// Which side of a comparison is larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Left,
    Right,
    Tie,
}

/// Difference between two values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatDiff {
    /// `left - right`.
    pub delta: StatValue,
    /// `|delta|` relative to the larger value, in percent.
    pub percent: StatValue,
    pub winner: Winner,
}

/// Compare two values.
///
/// Equal values short-circuit to a tie before any division.
///
/// # Examples
///
/// ```rust
/// use kivostat::compare::{diff, Winner};
///
/// let d = diff(10.0, 5.0);
/// assert_eq!((d.delta, d.percent, d.winner), (5.0, 50.0, Winner::Left));
/// assert_eq!(diff(0.0, 0.0).winner, Winner::Tie);
/// ```
pub fn diff(left: StatValue, right: StatValue) -> StatDiff {
    if left == right {
        return StatDiff {
            delta: 0.0,
            percent: 0.0,
            winner: Winner::Tie,
        };
    }

    let delta = left - right;
    StatDiff {
        delta,
        percent: (delta / left.max(right) * 100.0).abs(),
        winner: if delta > 0.0 { Winner::Left } else { Winner::Right },
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSlot<'a> {
    student: Option<&'a Student>,
    level: u32,
    skill_level: u32,
}

impl Default for ComparisonSlot<'_> {
    fn default() -> Self {
        Self {
            student: None,
            level: DEFAULT_COMPARISON_LEVEL,
            skill_level: DEFAULT_COMPARISON_SKILL_LEVEL,
        }
    }
}

impl<'a> ComparisonSlot<'a> {
    pub fn new(student: &'a Student) -> Self {
        Self {
            student: Some(student),
            ..Self::default()
        }
    }

    /// Level, clamped to the comparison cap.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = clamp_comparison_level(level);
        self
    }

    pub fn with_skill_level(mut self, skill_level: u32) -> Self {
        self.skill_level = clamp_skill_level(skill_level);
        self
    }

    pub fn set_student(&mut self, student: Option<&'a Student>) {
        self.student = student;
    }

    pub fn student(&self) -> Option<&'a Student> {
        self.student
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn skill_level(&self) -> u32 {
        self.skill_level
    }

    /// A stat as shown in the comparison: level-interpolated when the
    /// record has a level curve, raw otherwise.
    fn displayed(&self, student: &Student, stat: StatKind) -> StatValue {
        match student.level_curve(stat) {
            Some((l1, l100)) => interpolate(l1, l100, self.level),
            None => student.base_value(stat),
        }
    }
}

/// One compared stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub stat: StatKind,
    pub left: StatValue,
    pub right: StatValue,
    /// Value drawn as a full bar.
    pub max_display: StatValue,
    pub diff: StatDiff,
}

impl StatRow {
    /// Bar lengths as percentages of `max_display`.
    pub fn bar_widths(&self) -> (StatValue, StatValue) {
        (
            self.left / self.max_display * 100.0,
            self.right / self.max_display * 100.0,
        )
    }
}

/// Full comparison of two occupied slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub rows: Vec<StatRow>,
    pub left_damage: DamageProjection,
    pub right_damage: DamageProjection,
}

impl Comparison {
    pub fn row(&self, stat: StatKind) -> Option<&StatRow> {
        self.rows.iter().find(|row| row.stat == stat)
    }

    /// Difference between the two average-damage projections.
    pub fn damage_diff(&self) -> StatDiff {
        diff(self.left_damage.average, self.right_damage.average)
    }
}

/// Compare two slots. `None` unless both hold a student.
pub fn compare(left: &ComparisonSlot<'_>, right: &ComparisonSlot<'_>) -> Option<Comparison> {
    let (a, b) = (left.student?, right.student?);

    let rows = COMPARED_STATS
        .iter()
        .map(|&(stat, max_display)| {
            let l = left.displayed(a, stat);
            let r = right.displayed(b, stat);
            StatRow {
                stat,
                left: l,
                right: r,
                max_display,
                diff: diff(l, r),
            }
        })
        .collect();

    Some(Comparison {
        rows,
        left_damage: project_damage(a, left.level, left.skill_level),
        right_damage: project_damage(b, right.level, right.skill_level),
    })
}

/// Urgency of an upgrade suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("high"),
            Priority::Medium => f.write_str("medium"),
            Priority::Low => f.write_str("low"),
        }
    }
}

/// An upgrade suggestion for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradePriority {
    pub category: &'static str,
    pub reason: &'static str,
    pub priority: Priority,
}

impl UpgradePriority {
    const fn new(category: &'static str, reason: &'static str, priority: Priority) -> Self {
        Self {
            category,
            reason,
            priority,
        }
    }
}

/// Role-driven upgrade suggestions, most role-specific first.
pub fn upgrade_priorities(student: &Student) -> Vec<UpgradePriority> {
    let role = student.tactic_role.as_str();
    let mut priorities = Vec::new();

    if matches!(role, "DamageDealer" | "Attacker") {
        priorities.push(UpgradePriority::new(
            "Attack",
            "Primary damage dealer - maximize ATK",
            Priority::High,
        ));
        priorities.push(UpgradePriority::new(
            "Critical",
            "Crit stats boost damage output",
            Priority::Medium,
        ));
    }

    if matches!(role, "Tanker" | "Tank") {
        priorities.push(UpgradePriority::new(
            "HP",
            "Tank role - maximize survivability",
            Priority::High,
        ));
        priorities.push(UpgradePriority::new(
            "Defense",
            "Reduce incoming damage",
            Priority::High,
        ));
    }

    if matches!(role, "Healer" | "Support") {
        priorities.push(UpgradePriority::new(
            "Heal Power",
            "Support role - maximize healing",
            Priority::High,
        ));
        priorities.push(UpgradePriority::new(
            "HP",
            "Survivability to keep healing",
            Priority::Medium,
        ));
    }

    priorities.push(UpgradePriority::new(
        "Skills",
        "EX and Passive skills scale with levels",
        if role == "DamageDealer" {
            Priority::High
        } else {
            Priority::Medium
        },
    ));
    priorities.push(UpgradePriority::new(
        "Equipment",
        "Equipment provides significant stat boosts",
        Priority::Medium,
    ));

    priorities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(atk100: StatValue, role: &str) -> Student {
        Student {
            tactic_role: role.to_string(),
            max_hp1: 1000.0,
            max_hp100: 10900.0,
            attack_power1: 100.0,
            attack_power100: atk100,
            critical_point: 200.0,
            critical_damage_rate: 20000.0,
            range: 750.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_diff_right_wins() {
        let d = diff(5.0, 10.0);
        assert_eq!(d.delta, -5.0);
        assert_eq!(d.percent, 50.0);
        assert_eq!(d.winner, Winner::Right);
    }

    #[test]
    fn test_diff_tie_short_circuits() {
        let d = diff(0.0, 0.0);
        assert_eq!(d.percent, 0.0);
        assert!(!d.percent.is_nan());
    }

    #[test]
    fn test_slot_defaults_and_cap() {
        let slot = ComparisonSlot::default();
        assert_eq!((slot.level(), slot.skill_level()), (80, 7));
        assert!(slot.student().is_none());

        let s = student(1000.0, "");
        let slot = ComparisonSlot::new(&s).with_level(100).with_skill_level(0);
        assert_eq!(slot.level(), 90);
        assert_eq!(slot.skill_level(), 1);
    }

    #[test]
    fn test_compare_requires_both_students() {
        let s = student(1000.0, "");
        let mut left = ComparisonSlot::new(&s);
        let right = ComparisonSlot::default();
        assert!(compare(&left, &right).is_none());
        left.set_student(None);
        assert!(compare(&left, &ComparisonSlot::new(&s)).is_none());
    }

    #[test]
    fn test_compare_rows() {
        let a = student(1090.0, "");
        let b = student(595.0, "");
        let left = ComparisonSlot::new(&a).with_level(12);
        let right = ComparisonSlot::new(&b).with_level(12);
        let cmp = compare(&left, &right).unwrap();

        assert_eq!(cmp.rows.len(), COMPARED_STATS.len());

        // 1000 + 9900 * 11 / 99
        let hp = cmp.row(StatKind::MaxHp).unwrap();
        assert_eq!(hp.left, 2100.0);
        assert_eq!(hp.diff.winner, Winner::Tie);
        assert_eq!(hp.bar_widths().0, 2100.0 / 50000.0 * 100.0);

        // 100 + 990 * 11 / 99 vs 100 + 495 * 11 / 99
        let atk = cmp.row(StatKind::AttackPower).unwrap();
        assert_eq!((atk.left, atk.right), (210.0, 155.0));
        assert_eq!(atk.diff.winner, Winner::Left);

        let range = cmp.row(StatKind::Range).unwrap();
        assert_eq!((range.left, range.max_display), (750.0, 1500.0));

        assert_eq!(cmp.left_damage.base, 210.0);
        assert_eq!(cmp.damage_diff().winner, Winner::Left);
    }

    #[test]
    fn test_upgrade_priorities_by_role() {
        let dps = upgrade_priorities(&student(1.0, "DamageDealer"));
        let categories: Vec<_> = dps.iter().map(|p| p.category).collect();
        assert_eq!(categories, vec!["Attack", "Critical", "Skills", "Equipment"]);
        assert_eq!(dps[2].priority, Priority::High);

        let attacker = upgrade_priorities(&student(1.0, "Attacker"));
        assert_eq!(attacker[2].priority, Priority::Medium);

        let tank = upgrade_priorities(&student(1.0, "Tank"));
        assert_eq!(tank[0].reason, "Tank role - maximize survivability");
        assert_eq!(tank[1].priority, Priority::High);

        let healer = upgrade_priorities(&student(1.0, "Healer"));
        assert_eq!(healer[0].category, "Heal Power");
        assert_eq!(healer[1].priority, Priority::Medium);

        let other = upgrade_priorities(&student(1.0, "Supporter"));
        assert_eq!(other.len(), 2);
        assert_eq!(other[0].category, "Skills");
    }
}
