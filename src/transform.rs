//! Stat transforms module.
//!
//! Transforms modify stat values after sources are collected.
//! Transforms can read other stats (dependencies) and must declare
//! them explicitly via `depends_on()`.

use crate::context::StatContext;
use crate::damage::DamageProjection;
use crate::error::RosterError;
use crate::numeric::{clamp_bond_level, round_half_up, StatValue};
use crate::stat::StatKind;
use std::collections::HashMap;

/// Bond bonus per bond level above 1.
pub const BOND_STEP: StatValue = 0.005;

/// Apply the bond multiplier `1 + (bond_level - 1) * 0.005`, rounded.
///
/// Callers only apply this to HP, attack and healing; defense is never
/// bond-adjusted.
///
/// # Examples
///
/// ```rust
/// use kivostat::apply_bond;
///
/// assert_eq!(apply_bond(10000.0, 1), 10000.0);
/// assert_eq!(apply_bond(10000.0, 21), 11000.0);
/// ```
pub fn apply_bond(base_stat: StatValue, bond_level: u32) -> StatValue {
    let multiplier = 1.0 + StatValue::from(bond_level.saturating_sub(1)) * BOND_STEP;
    round_half_up(base_stat * multiplier)
}

/// Phase for transform application order.
///
/// Transforms are applied in phase order; within a phase, in
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransformPhase {
    /// Percentage bond bonus on the level-interpolated value.
    Bond,
    /// Flat equipment bonuses.
    Equipment,
    /// Values computed from other stats.
    Projection,
}

/// Trait for stat transforms.
pub trait StatTransform: Send + Sync {
    /// Stats that must be resolved before this transform runs.
    fn depends_on(&self) -> Vec<StatKind> {
        Vec::new()
    }

    fn phase(&self) -> TransformPhase;

    fn apply(
        &self,
        input: StatValue,
        dependencies: &HashMap<StatKind, StatValue>,
        context: &StatContext,
    ) -> Result<StatValue, RosterError>;

    fn description(&self) -> String;
}

/// Bond-level percentage bonus.
#[derive(Debug, Clone, Default)]
pub struct BondTransform;

impl StatTransform for BondTransform {
    fn phase(&self) -> TransformPhase {
        TransformPhase::Bond
    }

    fn apply(
        &self,
        input: StatValue,
        _dependencies: &HashMap<StatKind, StatValue>,
        context: &StatContext,
    ) -> Result<StatValue, RosterError> {
        Ok(apply_bond(input, clamp_bond_level(context.bond_level())))
    }

    fn description(&self) -> String {
        "Bond".to_string()
    }
}

/// Flat equipment bonus.
#[derive(Debug, Clone)]
pub struct EquipmentTransform {
    bonus: StatValue,
}

impl EquipmentTransform {
    pub fn new(bonus: StatValue) -> Self {
        Self { bonus }
    }

    pub fn bonus(&self) -> StatValue {
        self.bonus
    }
}

impl StatTransform for EquipmentTransform {
    fn phase(&self) -> TransformPhase {
        TransformPhase::Equipment
    }

    fn apply(
        &self,
        input: StatValue,
        _dependencies: &HashMap<StatKind, StatValue>,
        _context: &StatContext,
    ) -> Result<StatValue, RosterError> {
        Ok(input + self.bonus)
    }

    fn description(&self) -> String {
        format!("Equipment +{}", self.bonus)
    }
}

/// Replaces the input with one figure of a [`DamageProjection`].
#[derive(Debug, Clone)]
pub struct ProjectionTransform {
    output: StatKind,
}

impl ProjectionTransform {
    /// `output` must be one of the derived damage stats.
    pub fn new(output: StatKind) -> Self {
        Self { output }
    }
}

impl StatTransform for ProjectionTransform {
    fn depends_on(&self) -> Vec<StatKind> {
        vec![
            StatKind::AttackPower,
            StatKind::CriticalPoint,
            StatKind::CriticalDamageRate,
        ]
    }

    fn phase(&self) -> TransformPhase {
        TransformPhase::Projection
    }

    fn apply(
        &self,
        input: StatValue,
        dependencies: &HashMap<StatKind, StatValue>,
        context: &StatContext,
    ) -> Result<StatValue, RosterError> {
        let read = |stat: StatKind| {
            dependencies
                .get(&stat)
                .copied()
                .ok_or(RosterError::MissingDependency(stat))
        };
        let projection = DamageProjection::from_stats(
            read(StatKind::AttackPower)?,
            read(StatKind::CriticalPoint)?,
            read(StatKind::CriticalDamageRate)?,
            context.skill_level(),
        );

        Ok(match self.output {
            StatKind::BaseDamage => projection.base,
            StatKind::AverageDamage => projection.average,
            StatKind::CriticalDamage => projection.critical,
            _ => input,
        })
    }

    fn description(&self) -> String {
        format!("Projection ({})", self.output.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bond() {
        assert_eq!(apply_bond(1234.0, 1), 1234.0);
        // 1000 * 1.245 = 1245
        assert_eq!(apply_bond(1000.0, 50), 1245.0);
        // 333 * 1.01 = 336.33
        assert_eq!(apply_bond(333.0, 3), 336.0);
    }

    #[test]
    fn test_bond_transform_reads_context() {
        let transform = BondTransform;
        let deps = HashMap::new();
        let context = StatContext::new().with_bond_level(21);
        assert_eq!(transform.apply(2000.0, &deps, &context).unwrap(), 2200.0);
    }

    #[test]
    fn test_equipment_transform() {
        let transform = EquipmentTransform::new(120.0);
        let deps = HashMap::new();
        let context = StatContext::new();
        assert_eq!(transform.apply(1000.0, &deps, &context).unwrap(), 1120.0);
        assert_eq!(transform.description(), "Equipment +120");
    }

    #[test]
    fn test_projection_transform() {
        let transform = ProjectionTransform::new(StatKind::CriticalDamage);
        let mut deps = HashMap::new();
        deps.insert(StatKind::AttackPower, 1000.0);
        deps.insert(StatKind::CriticalPoint, 50.0);
        deps.insert(StatKind::CriticalDamageRate, 20000.0);
        let context = StatContext::new();
        assert_eq!(transform.apply(0.0, &deps, &context).unwrap(), 200000.0);
        assert_eq!(transform.depends_on().len(), 3);
    }

    #[test]
    fn test_projection_transform_missing_dependency() {
        let transform = ProjectionTransform::new(StatKind::AverageDamage);
        let deps = HashMap::new();
        let context = StatContext::new();
        assert_eq!(
            transform.apply(0.0, &deps, &context),
            Err(RosterError::MissingDependency(StatKind::AttackPower))
        );
    }

    #[test]
    fn test_transform_phase_ordering() {
        assert!(TransformPhase::Bond < TransformPhase::Equipment);
        assert!(TransformPhase::Equipment < TransformPhase::Projection);
    }
}
