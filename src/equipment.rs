//! Equipment tiers and the stats they raise.
//!
//! Each of the nine equipment slot types raises exactly one stat by a
//! flat amount looked up from a per-tier table.

use crate::numeric::{clamp_tier, StatValue, MAX_TIER};
use crate::stat::StatKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat bonus per tier. Index 0 is a sentinel; tiers are 1-based.
pub const TIER_BONUS: [StatValue; 10] = [
    0.0, 50.0, 120.0, 200.0, 300.0, 420.0, 560.0, 720.0, 900.0, 1100.0,
];

/// Bonus for a tier. Tiers outside the table contribute nothing.
///
/// # Examples
///
/// ```rust
/// use kivostat::equipment::tier_bonus;
///
/// assert_eq!(tier_bonus(1), 50.0);
/// assert_eq!(tier_bonus(9), 1100.0);
/// assert_eq!(tier_bonus(12), 0.0);
/// ```
pub fn tier_bonus(tier: u32) -> StatValue {
    TIER_BONUS.get(tier as usize).copied().unwrap_or(0.0)
}

/// Equipment slot type.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Hat,
    Gloves,
    Shoes,
    Bag,
    Badge,
    Hairpin,
    Charm,
    Watch,
    Necklace,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 9] = [
        EquipmentSlot::Hat,
        EquipmentSlot::Gloves,
        EquipmentSlot::Shoes,
        EquipmentSlot::Bag,
        EquipmentSlot::Badge,
        EquipmentSlot::Hairpin,
        EquipmentSlot::Charm,
        EquipmentSlot::Watch,
        EquipmentSlot::Necklace,
    ];

    /// The stat this slot raises.
    pub fn target_stat(self) -> StatKind {
        match self {
            EquipmentSlot::Hat => StatKind::MaxHp,
            EquipmentSlot::Gloves => StatKind::AttackPower,
            EquipmentSlot::Shoes => StatKind::HealPower,
            EquipmentSlot::Bag => StatKind::DefensePower,
            EquipmentSlot::Badge => StatKind::CriticalPoint,
            EquipmentSlot::Hairpin => StatKind::CriticalDamageRate,
            EquipmentSlot::Charm => StatKind::AccuracyPoint,
            EquipmentSlot::Watch => StatKind::DodgePoint,
            EquipmentSlot::Necklace => StatKind::Range,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentSlot::Hat => "Hat",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Shoes => "Shoes",
            EquipmentSlot::Bag => "Bag",
            EquipmentSlot::Badge => "Badge",
            EquipmentSlot::Hairpin => "Hairpin",
            EquipmentSlot::Charm => "Charm",
            EquipmentSlot::Watch => "Watch",
            EquipmentSlot::Necklace => "Necklace",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentSlot {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or(())
    }
}

/// The stat a dataset slot identifier raises.
///
/// Slot names map through [`EquipmentSlot::target_stat`]; a bare stat
/// name is accepted as targeting itself. Anything else raises nothing.
pub fn slot_target(identifier: &str) -> Option<StatKind> {
    identifier
        .parse::<EquipmentSlot>()
        .map(EquipmentSlot::target_stat)
        .or_else(|_| identifier.parse::<StatKind>())
        .ok()
        .filter(|stat| !stat.is_derived())
}

/// Sum of tier bonuses from the slots that raise `target`.
///
/// `tiers` is aligned with `slot_types` by index. A missing or zero tier
/// counts as tier 1.
pub fn accumulated_bonus<S: AsRef<str>>(
    slot_types: &[S],
    tiers: &[u32],
    target: StatKind,
) -> StatValue {
    slot_types
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot_target(slot.as_ref()) == Some(target))
        .map(|(index, _)| {
            let tier = match tiers.get(index) {
                Some(&tier) if tier > 0 => tier,
                _ => 1,
            };
            tier_bonus(tier)
        })
        .sum()
}

/// `base_stat` plus the tier bonuses from every slot raising `target`.
///
/// # Examples
///
/// ```rust
/// use kivostat::{equipment_bonus, StatKind};
///
/// let slots = ["Hat", "Gloves", "Watch"];
/// assert_eq!(equipment_bonus(&slots, &[3, 1, 1], StatKind::MaxHp, 10000.0), 10200.0);
/// assert_eq!(equipment_bonus(&slots, &[3, 1, 1], StatKind::Range, 650.0), 650.0);
/// ```
pub fn equipment_bonus<S: AsRef<str>>(
    slot_types: &[S],
    tiers: &[u32],
    target: StatKind,
    base_stat: StatValue,
) -> StatValue {
    base_stat + accumulated_bonus(slot_types, tiers, target)
}

/// Bonus gain from raising one slot from its current to its target tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeGain {
    pub slot: String,
    pub target: Option<StatKind>,
    pub current: StatValue,
    pub potential: StatValue,
}

impl UpgradeGain {
    pub fn delta(&self) -> StatValue {
        self.potential - self.current
    }
}

/// Per-slot current and target tiers for one student.
///
/// # Examples
///
/// ```rust
/// use kivostat::EquipmentAssignment;
///
/// let assignment = EquipmentAssignment::new(3);
/// let gains = assignment.upgrade_gains(&["Hat", "Gloves", "Watch"]);
/// assert_eq!(gains[0].current, 50.0);
/// assert_eq!(gains[0].potential, 1100.0);
/// assert_eq!(gains[0].delta(), 1050.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentAssignment {
    current: Vec<u32>,
    potential: Vec<u32>,
}

impl EquipmentAssignment {
    /// Every slot at tier 1 with a tier-9 target.
    pub fn new(slots: usize) -> Self {
        Self {
            current: vec![1; slots],
            potential: vec![MAX_TIER; slots],
        }
    }

    pub fn set_current(&mut self, index: usize, tier: u32) {
        if let Some(slot) = self.current.get_mut(index) {
            *slot = clamp_tier(tier);
        }
    }

    pub fn set_potential(&mut self, index: usize, tier: u32) {
        if let Some(slot) = self.potential.get_mut(index) {
            *slot = clamp_tier(tier);
        }
    }

    pub fn current(&self) -> &[u32] {
        &self.current
    }

    pub fn potential(&self) -> &[u32] {
        &self.potential
    }

    /// Current and potential bonus for each slot, in slot order.
    pub fn upgrade_gains<S: AsRef<str>>(&self, slot_types: &[S]) -> Vec<UpgradeGain> {
        slot_types
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let current = self.current.get(index).copied().unwrap_or(1);
                let potential = self.potential.get(index).copied().unwrap_or(MAX_TIER);
                UpgradeGain {
                    slot: slot.as_ref().to_string(),
                    target: slot_target(slot.as_ref()),
                    current: tier_bonus(current.max(1)),
                    potential: tier_bonus(potential),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_mapping_covers_each_stat_once() {
        let mut targets: Vec<_> = EquipmentSlot::ALL.iter().map(|s| s.target_stat()).collect();
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), 9);
    }

    #[test]
    fn test_slot_target_accepts_stat_names() {
        assert_eq!(slot_target("Badge"), Some(StatKind::CriticalPoint));
        assert_eq!(slot_target("AttackPower"), Some(StatKind::AttackPower));
        assert_eq!(slot_target("Cape"), None);
    }

    #[test]
    fn test_all_tier_one_adds_fifty_per_matching_slot() {
        let slots = ["Hat", "Hat", "Shoes"];
        assert_eq!(equipment_bonus(&slots, &[1, 1, 1], StatKind::MaxHp, 0.0), 100.0);
        assert_eq!(equipment_bonus(&slots, &[1, 1, 1], StatKind::HealPower, 0.0), 50.0);
    }

    #[test]
    fn test_missing_and_unknown_tiers() {
        let slots = ["Gloves", "Gloves", "Gloves"];
        // third tier missing -> tier 1; zero -> tier 1; out of table -> 0
        assert_eq!(
            equipment_bonus(&slots, &[0, 42], StatKind::AttackPower, 1000.0),
            1000.0 + 50.0 + 0.0 + 50.0
        );
    }

    #[test]
    fn test_assignment_setters_clamp() {
        let mut assignment = EquipmentAssignment::new(2);
        assignment.set_current(0, 15);
        assignment.set_potential(1, 0);
        assignment.set_current(5, 3);
        assert_eq!(assignment.current(), &[9, 1]);
        assert_eq!(assignment.potential(), &[9, 1]);
    }

    #[test]
    fn test_upgrade_gains() {
        let mut assignment = EquipmentAssignment::new(3);
        assignment.set_current(1, 4);
        assignment.set_potential(1, 6);
        let gains = assignment.upgrade_gains(&["Hat", "Badge", "Mystery"]);
        assert_eq!(gains[1].target, Some(StatKind::CriticalPoint));
        assert_eq!(gains[1].current, 300.0);
        assert_eq!(gains[1].delta(), 560.0 - 300.0);
        assert_eq!(gains[2].target, None);
    }
}
