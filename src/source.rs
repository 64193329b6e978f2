//! Stat sources module.
//!
//! Sources produce base values for stats. Multiple sources for the same
//! stat are summed together (additive). Sources are stateless and
//! deterministic - the same context always produces the same value.

use crate::context::StatContext;
use crate::numeric::{clamp_level, round_half_up, StatValue, MAX_LEVEL, MIN_LEVEL};
use crate::roster::Student;
use crate::stat::StatKind;

/// Linear interpolation between a level-1 and a level-100 value.
///
/// Levels 1 and 100 return their endpoint exactly; anything between is
/// rounded. Levels outside `[1, 100]` are clamped first.
///
/// # Examples
///
/// ```rust
/// use kivostat::interpolate;
///
/// assert_eq!(interpolate(100.0, 1000.0, 1), 100.0);
/// assert_eq!(interpolate(100.0, 1000.0, 100), 1000.0);
/// assert_eq!(interpolate(100.0, 1000.0, 50), 545.0);
/// ```
pub fn interpolate(level1_value: StatValue, level100_value: StatValue, level: u32) -> StatValue {
    let level = clamp_level(level);
    if level == MIN_LEVEL {
        return level1_value;
    }
    if level == MAX_LEVEL {
        return level100_value;
    }
    let ratio = StatValue::from(level - 1) / StatValue::from(MAX_LEVEL - 1);
    round_half_up(level1_value + (level100_value - level1_value) * ratio)
}

/// Trait for stat sources that produce base values.
pub trait StatSource: Send + Sync {
    /// The base value contributed by this source.
    fn get_value(&self, stat: StatKind, context: &StatContext) -> StatValue;

    /// Label shown in a resolved stat's breakdown.
    fn description(&self) -> String;
}

/// A constant source that always returns the same value.
#[derive(Debug, Clone)]
pub struct ConstantSource(pub StatValue);

impl StatSource for ConstantSource {
    fn get_value(&self, _stat: StatKind, _context: &StatContext) -> StatValue {
        self.0
    }

    fn description(&self) -> String {
        "Base".to_string()
    }
}

/// A stat that grows with character level.
///
/// # Examples
///
/// ```rust
/// use kivostat::source::{LevelCurveSource, StatSource};
/// use kivostat::{StatContext, StatKind};
///
/// let source = LevelCurveSource::new(100.0, 1000.0);
/// let context = StatContext::new().with_level(100);
/// assert_eq!(source.get_value(StatKind::AttackPower, &context), 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCurveSource {
    level1: StatValue,
    level100: StatValue,
}

impl LevelCurveSource {
    pub fn new(level1: StatValue, level100: StatValue) -> Self {
        Self { level1, level100 }
    }

    /// The curve for a student's stat, if that stat grows with level.
    pub fn for_student(student: &Student, stat: StatKind) -> Option<Self> {
        student
            .level_curve(stat)
            .map(|(level1, level100)| Self::new(level1, level100))
    }
}

impl StatSource for LevelCurveSource {
    fn get_value(&self, _stat: StatKind, context: &StatContext) -> StatValue {
        interpolate(self.level1, self.level100, context.level())
    }

    fn description(&self) -> String {
        format!("Level curve {}..{}", self.level1, self.level100)
    }
}

/// A stat that grows with weapon level instead of character level.
///
/// The weapon curve runs from `base * start_ratio` at weapon level 1 to
/// `base * end_ratio` at weapon level 100.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponCurveSource {
    base: StatValue,
    start_ratio: StatValue,
    end_ratio: StatValue,
}

impl WeaponCurveSource {
    pub fn new(base: StatValue, start_ratio: StatValue, end_ratio: StatValue) -> Self {
        Self {
            base,
            start_ratio,
            end_ratio,
        }
    }
}

impl StatSource for WeaponCurveSource {
    fn get_value(&self, _stat: StatKind, context: &StatContext) -> StatValue {
        interpolate(
            self.base * self.start_ratio,
            self.base * self.end_ratio,
            context.weapon_level(),
        )
    }

    fn description(&self) -> String {
        format!("Weapon curve ×{}..×{}", self.start_ratio, self.end_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints_are_exact() {
        assert_eq!(interpolate(123.4, 987.6, 1), 123.4);
        assert_eq!(interpolate(123.4, 987.6, 100), 987.6);
    }

    #[test]
    fn test_interpolate_midpoints_round() {
        // 1000 + 9000 * 1/99 = 1090.909...
        assert_eq!(interpolate(1000.0, 10000.0, 2), 1091.0);
        // 1000 + 9000 * 79/99 = 8181.81...
        assert_eq!(interpolate(1000.0, 10000.0, 80), 8182.0);
    }

    #[test]
    fn test_constant_source() {
        let source = ConstantSource(100.0);
        let context = StatContext::new().with_level(55);
        assert_eq!(source.get_value(StatKind::Range, &context), 100.0);
    }

    #[test]
    fn test_level_curve_source_for_student() {
        let student = Student {
            max_hp1: 1000.0,
            max_hp100: 10000.0,
            ..Default::default()
        };
        let source = LevelCurveSource::for_student(&student, StatKind::MaxHp).unwrap();
        let context = StatContext::new().with_level(100);
        assert_eq!(source.get_value(StatKind::MaxHp, &context), 10000.0);
        assert!(LevelCurveSource::for_student(&student, StatKind::Range).is_none());
    }

    #[test]
    fn test_weapon_curve_source() {
        let source = WeaponCurveSource::new(100.0, 1.0, 1.5);
        let context = StatContext::new();
        assert_eq!(source.get_value(StatKind::StabilityPoint, &context), 100.0);
        let context = context.with_weapon_level(100);
        assert_eq!(source.get_value(StatKind::StabilityPoint, &context), 150.0);
    }
}
