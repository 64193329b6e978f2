//! Damage projection.
//!
//! A rough per-hit estimate from attack, critical rate and critical
//! damage, scaled by skill level. There is no mitigation, buff or
//! multi-hit model behind these numbers.

use crate::numeric::{clamp_skill_level, round_half_up, StatValue};
use crate::roster::Student;
use crate::source::interpolate;
use serde::{Deserialize, Serialize};

/// Damage gained per skill level above 1.
pub const SKILL_LEVEL_STEP: StatValue = 0.1;

/// Projected damage figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageProjection {
    pub base: StatValue,
    pub average: StatValue,
    pub critical: StatValue,
}

/// `1 + (skill_level - 1) * 0.1`.
pub fn skill_multiplier(skill_level: u32) -> StatValue {
    1.0 + StatValue::from(skill_level.saturating_sub(1)) * SKILL_LEVEL_STEP
}

impl DamageProjection {
    /// Project from already-derived stats.
    ///
    /// `critical_point` is a percentage (50 means 50%) and
    /// `critical_damage_rate` is in hundredths (20000 means ×200).
    pub fn from_stats(
        attack: StatValue,
        critical_point: StatValue,
        critical_damage_rate: StatValue,
        skill_level: u32,
    ) -> Self {
        let crit_rate = critical_point / 100.0;
        let crit_mult = critical_damage_rate / 100.0;
        let skill = skill_multiplier(skill_level);

        Self {
            base: round_half_up(attack),
            average: round_half_up(attack * (1.0 + crit_rate * (crit_mult - 1.0)) * skill),
            critical: round_half_up(attack * crit_mult * skill),
        }
    }
}

/// Project a student's damage at a level and skill level.
///
/// # Examples
///
/// ```rust
/// use kivostat::{project_damage, Student};
///
/// let student = Student {
///     attack_power1: 100.0,
///     attack_power100: 1000.0,
///     critical_point: 50.0,
///     critical_damage_rate: 20000.0,
///     ..Default::default()
/// };
/// let projection = project_damage(&student, 100, 1);
/// assert_eq!(projection.base, 1000.0);
/// assert_eq!(projection.average, 100500.0); // 1000 * (1 + 0.5 * 199)
/// assert_eq!(projection.critical, 200000.0);
/// ```
pub fn project_damage(student: &Student, level: u32, skill_level: u32) -> DamageProjection {
    let attack = interpolate(student.attack_power1, student.attack_power100, level);
    DamageProjection::from_stats(
        attack,
        student.critical_point,
        student.critical_damage_rate,
        clamp_skill_level(skill_level),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striker() -> Student {
        Student {
            attack_power1: 100.0,
            attack_power100: 1000.0,
            critical_point: 20.0,
            critical_damage_rate: 15000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_skill_multiplier() {
        assert_eq!(skill_multiplier(1), 1.0);
        assert!((skill_multiplier(10) - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_projection_at_level_one() {
        let p = project_damage(&striker(), 1, 1);
        assert_eq!(p.base, 100.0);
        // 100 * (1 + 0.2 * 149)
        assert_eq!(p.average, 3080.0);
        assert_eq!(p.critical, 15000.0);
    }

    #[test]
    fn test_projection_scales_with_skill_level() {
        let p = project_damage(&striker(), 100, 6);
        // skill multiplier 1.5
        assert_eq!(p.base, 1000.0);
        assert_eq!(p.critical, 225000.0);
        assert_eq!(p.average, 46200.0);
    }

    #[test]
    fn test_zero_crit_rate_keeps_base() {
        let student = Student {
            critical_point: 0.0,
            ..striker()
        };
        let p = project_damage(&student, 100, 1);
        assert_eq!(p.average, 1000.0);
    }
}
