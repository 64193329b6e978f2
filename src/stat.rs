//! Stat identifier module.
//!
//! Provides the `StatKind` type, a closed set of the stats a student
//! record carries plus the damage projection stats derived from them.
//! The serialized names match the upstream dataset's field prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a stat on a student's stat sheet.
///
/// # Examples
///
/// ```rust
/// use kivostat::StatKind;
///
/// let hp: StatKind = "MaxHP".parse().unwrap();
/// assert_eq!(hp, StatKind::MaxHp);
/// assert_eq!(hp.as_str(), "MaxHP");
/// assert!(hp.is_bond_scaled());
/// assert!(!StatKind::DefensePower.is_bond_scaled());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "MaxHP")]
    MaxHp,
    AttackPower,
    DefensePower,
    HealPower,
    AccuracyPoint,
    CriticalPoint,
    CriticalDamageRate,
    DodgePoint,
    Range,
    StabilityPoint,
    /// Level-interpolated attack used as the projection base.
    BaseDamage,
    /// Crit-weighted average hit.
    AverageDamage,
    /// Hit value when a critical lands.
    CriticalDamage,
}

impl StatKind {
    /// Every stat read directly from a student record.
    pub const RECORD: [StatKind; 10] = [
        StatKind::MaxHp,
        StatKind::AttackPower,
        StatKind::DefensePower,
        StatKind::HealPower,
        StatKind::AccuracyPoint,
        StatKind::CriticalPoint,
        StatKind::CriticalDamageRate,
        StatKind::DodgePoint,
        StatKind::Range,
        StatKind::StabilityPoint,
    ];

    /// Stats computed from other stats.
    pub const DERIVED: [StatKind; 3] = [
        StatKind::BaseDamage,
        StatKind::AverageDamage,
        StatKind::CriticalDamage,
    ];

    /// Dataset name of this stat.
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::MaxHp => "MaxHP",
            StatKind::AttackPower => "AttackPower",
            StatKind::DefensePower => "DefensePower",
            StatKind::HealPower => "HealPower",
            StatKind::AccuracyPoint => "AccuracyPoint",
            StatKind::CriticalPoint => "CriticalPoint",
            StatKind::CriticalDamageRate => "CriticalDamageRate",
            StatKind::DodgePoint => "DodgePoint",
            StatKind::Range => "Range",
            StatKind::StabilityPoint => "StabilityPoint",
            StatKind::BaseDamage => "BaseDamage",
            StatKind::AverageDamage => "AverageDamage",
            StatKind::CriticalDamage => "CriticalDamage",
        }
    }

    /// Short label used in comparison rows.
    pub fn label(self) -> &'static str {
        match self {
            StatKind::MaxHp => "HP",
            StatKind::AttackPower => "ATK",
            StatKind::DefensePower => "DEF",
            StatKind::HealPower => "HEAL",
            StatKind::AccuracyPoint => "Accuracy",
            StatKind::CriticalPoint => "Critical",
            StatKind::CriticalDamageRate => "Crit DMG",
            StatKind::DodgePoint => "Dodge",
            StatKind::Range => "Range",
            StatKind::StabilityPoint => "Stability",
            StatKind::BaseDamage => "Base Damage",
            StatKind::AverageDamage => "Avg Damage",
            StatKind::CriticalDamage => "Crit Damage",
        }
    }

    /// Whether bond level scales this stat. Defense never does.
    pub fn is_bond_scaled(self) -> bool {
        matches!(
            self,
            StatKind::MaxHp | StatKind::AttackPower | StatKind::HealPower
        )
    }

    /// Whether this stat grows with character level.
    pub fn has_level_curve(self) -> bool {
        matches!(
            self,
            StatKind::MaxHp | StatKind::AttackPower | StatKind::DefensePower | StatKind::HealPower
        )
    }

    /// Whether this stat is computed from other stats.
    pub fn is_derived(self) -> bool {
        Self::DERIVED.contains(&self)
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::RECORD
            .iter()
            .chain(Self::DERIVED.iter())
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_kind_parse() {
        assert_eq!("AttackPower".parse::<StatKind>(), Ok(StatKind::AttackPower));
        assert_eq!("MaxHP".parse::<StatKind>(), Ok(StatKind::MaxHp));
        assert!("Hat".parse::<StatKind>().is_err());
    }

    #[test]
    fn test_bond_scaling_excludes_defense() {
        let scaled: Vec<_> = StatKind::RECORD
            .iter()
            .copied()
            .filter(|k| k.is_bond_scaled())
            .collect();
        assert_eq!(
            scaled,
            vec![StatKind::MaxHp, StatKind::AttackPower, StatKind::HealPower]
        );
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&StatKind::MaxHp).unwrap();
        assert_eq!(json, "\"MaxHP\"");
        let back: StatKind = serde_json::from_str("\"CriticalDamageRate\"").unwrap();
        assert_eq!(back, StatKind::CriticalDamageRate);
        assert_eq!(StatKind::CriticalDamageRate.to_string(), "CriticalDamageRate");
    }

    #[test]
    fn test_derived_flags() {
        assert!(StatKind::AverageDamage.is_derived());
        assert!(!StatKind::Range.is_derived());
        assert!(StatKind::DefensePower.has_level_curve());
        assert!(!StatKind::Range.has_level_curve());
    }
}
