//! Team formation and squad-wide stat aggregation.
//!
//! A team is a fixed row of slots, each restricted to one squad
//! category. Main-squad occupants contribute their level-100 stats in
//! full; every support occupant grants each main-squad member a share
//! of its own level-100 stats.

use crate::error::RosterError;
use crate::numeric::StatValue;
use crate::roster::{ArmorType, AttackType, SquadType, Student};
use crate::terrain::{MoodRank, Terrain};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Share of a support member's HP and attack granted per main member.
pub const SUPPORT_HP_ATTACK_SHARE: StatValue = 0.1;

/// Share of a support member's defense and healing granted per main member.
pub const SUPPORT_DEFENSE_HEAL_SHARE: StatValue = 0.05;

/// Main-squad slots in the standard formation.
pub const STANDARD_MAIN_SLOTS: usize = 4;

/// Support slots in the standard formation.
pub const STANDARD_SUPPORT_SLOTS: usize = 2;

/// HP, attack, defense and healing totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTotals {
    pub hp: StatValue,
    pub attack: StatValue,
    pub defense: StatValue,
    pub healing: StatValue,
}

impl StatTotals {
    /// A student's level-100 reference stats.
    pub fn reference(student: &Student) -> Self {
        Self {
            hp: student.max_hp100,
            attack: student.attack_power100,
            defense: student.defense_power100,
            healing: student.heal_power100,
        }
    }

    /// What one support member grants each main member.
    pub fn support_share(student: &Student) -> Self {
        Self {
            hp: student.max_hp100 * SUPPORT_HP_ATTACK_SHARE,
            attack: student.attack_power100 * SUPPORT_HP_ATTACK_SHARE,
            defense: student.defense_power100 * SUPPORT_DEFENSE_HEAL_SHARE,
            healing: student.heal_power100 * SUPPORT_DEFENSE_HEAL_SHARE,
        }
    }
}

impl Add for StatTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            hp: self.hp + other.hp,
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            healing: self.healing + other.healing,
        }
    }
}

impl Mul<StatValue> for StatTotals {
    type Output = Self;

    fn mul(self, factor: StatValue) -> Self {
        Self {
            hp: self.hp * factor,
            attack: self.attack * factor,
            defense: self.defense * factor,
            healing: self.healing * factor,
        }
    }
}

impl std::iter::Sum for StatTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Aggregated team stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Sum of main members' level-100 stats.
    pub primary: StatTotals,
    /// Sum of the support shares; granted once per main member.
    pub support_bonus: StatTotals,
    /// `primary + support_bonus * max(main members, 1)`.
    pub total: StatTotals,
}

/// One formation slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamSlot<'a> {
    squad_type: SquadType,
    student: Option<&'a Student>,
}

impl<'a> TeamSlot<'a> {
    pub fn new(squad_type: SquadType) -> Self {
        Self {
            squad_type,
            student: None,
        }
    }

    pub fn squad_type(&self) -> SquadType {
        self.squad_type
    }

    pub fn student(&self) -> Option<&'a Student> {
        self.student
    }

    pub fn is_occupied(&self) -> bool {
        self.student.is_some()
    }
}

/// A fixed formation of slots borrowing students from a roster.
///
/// # Examples
///
/// ```rust
/// use kivostat::{SquadType, Student, Team};
///
/// let striker = Student { max_hp100: 1000.0, ..Default::default() };
/// let special = Student {
///     squad_type: SquadType::Support,
///     max_hp100: 1000.0,
///     ..Default::default()
/// };
///
/// let mut team = Team::standard();
/// team.assign(0, &striker).unwrap();
/// team.assign(1, &striker).unwrap();
/// team.assign(4, &special).unwrap();
/// assert!(team.assign(5, &striker).is_err());
///
/// assert_eq!(team.aggregate().total.hp, 2000.0 + 100.0 * 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Team<'a> {
    slots: Vec<TeamSlot<'a>>,
}

impl<'a> Team<'a> {
    /// A formation with the given slot categories, all empty.
    pub fn with_layout(layout: &[SquadType]) -> Self {
        Self {
            slots: layout.iter().map(|&squad| TeamSlot::new(squad)).collect(),
        }
    }

    /// Four main slots followed by two support slots.
    pub fn standard() -> Self {
        let layout: Vec<SquadType> = std::iter::repeat(SquadType::Main)
            .take(STANDARD_MAIN_SLOTS)
            .chain(std::iter::repeat(SquadType::Support).take(STANDARD_SUPPORT_SLOTS))
            .collect();
        Self::with_layout(&layout)
    }

    pub fn slots(&self) -> &[TeamSlot<'a>] {
        &self.slots
    }

    /// Put a student into a slot, replacing any occupant.
    ///
    /// Rejected when the student's squad category differs from the slot's.
    pub fn assign(&mut self, index: usize, student: &'a Student) -> Result<(), RosterError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RosterError::SlotOutOfRange { index, len })?;

        if slot.squad_type != student.squad_type {
            debug!(
                "Rejected {} for slot {}: {} slot, {} student",
                student.name, index, slot.squad_type, student.squad_type
            );
            return Err(RosterError::SquadMismatch {
                slot: index,
                expected: slot.squad_type,
                found: student.squad_type,
            });
        }

        slot.student = Some(student);
        Ok(())
    }

    /// Empty a slot, returning its previous occupant.
    pub fn clear(&mut self, index: usize) -> Result<Option<&'a Student>, RosterError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .map(|slot| slot.student.take())
            .ok_or(RosterError::SlotOutOfRange { index, len })
    }

    /// Occupants in slot order.
    pub fn occupants(&self) -> impl Iterator<Item = &'a Student> + '_ {
        self.slots.iter().filter_map(|slot| slot.student)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupants().count()
    }

    fn occupants_of(&self, squad: SquadType) -> impl Iterator<Item = &'a Student> + '_ {
        self.slots
            .iter()
            .filter(move |slot| slot.squad_type == squad)
            .filter_map(|slot| slot.student)
    }

    /// Primary totals, support bonus and final totals.
    pub fn aggregate(&self) -> TeamStats {
        let primary: StatTotals = self
            .occupants_of(SquadType::Main)
            .map(StatTotals::reference)
            .sum();
        let support_bonus: StatTotals = self
            .occupants_of(SquadType::Support)
            .map(StatTotals::support_share)
            .sum();
        let main_count = self.occupants_of(SquadType::Main).count().max(1);

        TeamStats {
            primary,
            support_bonus,
            total: primary + support_bonus * main_count as StatValue,
        }
    }

    /// Occupant count per attack type, largest first.
    pub fn attack_type_counts(&self) -> Vec<(AttackType, usize)> {
        tally(self.occupants().map(|s| s.bullet_type))
    }

    /// Occupant count per armor type, largest first.
    pub fn armor_type_counts(&self) -> Vec<(ArmorType, usize)> {
        tally(self.occupants().map(|s| s.armor_type))
    }

    /// Occupant count per school, largest first.
    pub fn school_counts(&self) -> Vec<(String, usize)> {
        tally(self.occupants().map(|s| s.school.clone()))
    }

    /// Each occupant with its mood rank on a terrain.
    pub fn moods(&self, terrain: Terrain) -> Vec<(&'a Student, MoodRank)> {
        self.occupants()
            .map(|s| (s, MoodRank::classify(s.adaptation(terrain))))
            .collect()
    }
}

impl Default for Team<'_> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Count occurrences, ordered by count descending; ties keep first-seen order.
fn tally<K: PartialEq>(items: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(key, _)| *key == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_student(hp: StatValue, bullet: AttackType) -> Student {
        Student {
            squad_type: SquadType::Main,
            bullet_type: bullet,
            max_hp100: hp,
            attack_power100: 500.0,
            defense_power100: 100.0,
            heal_power100: 2000.0,
            ..Default::default()
        }
    }

    fn support_student() -> Student {
        Student {
            squad_type: SquadType::Support,
            max_hp100: 1000.0,
            attack_power100: 800.0,
            defense_power100: 200.0,
            heal_power100: 4000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_layout() {
        let team = Team::standard();
        let squads: Vec<_> = team.slots().iter().map(|s| s.squad_type()).collect();
        assert_eq!(squads.len(), 6);
        assert_eq!(squads[3], SquadType::Main);
        assert_eq!(squads[4], SquadType::Support);
        assert!(team.slots().iter().all(|s| !s.is_occupied()));
    }

    #[test]
    fn test_four_main_no_support() {
        let s = main_student(1000.0, AttackType::Explosion);
        let mut team = Team::standard();
        for i in 0..4 {
            team.assign(i, &s).unwrap();
        }
        let stats = team.aggregate();
        assert_eq!(stats.total.hp, 4000.0);
        assert_eq!(stats.support_bonus, StatTotals::default());
    }

    #[test]
    fn test_support_bonus_scales_with_main_count() {
        let main = main_student(5000.0, AttackType::Pierce);
        let support = support_student();
        let mut team = Team::standard();
        team.assign(0, &main).unwrap();
        team.assign(1, &main).unwrap();
        team.assign(4, &support).unwrap();

        let stats = team.aggregate();
        assert_eq!(stats.primary.hp, 10000.0);
        assert_eq!(stats.support_bonus.hp, 100.0);
        assert_eq!(stats.support_bonus.defense, 10.0);
        assert_eq!(stats.support_bonus.healing, 200.0);
        assert_eq!(stats.total.hp, 10000.0 + 100.0 * 2.0);
        assert_eq!(stats.total.healing, 4000.0 + 200.0 * 2.0);
    }

    #[test]
    fn test_support_only_counts_once() {
        let support = support_student();
        let mut team = Team::standard();
        team.assign(5, &support).unwrap();
        let stats = team.aggregate();
        assert_eq!(stats.total.hp, 100.0);
    }

    #[test]
    fn test_assignment_rules() {
        let main = main_student(1.0, AttackType::Mystic);
        let support = support_student();
        let mut team = Team::standard();

        assert_eq!(
            team.assign(0, &support),
            Err(RosterError::SquadMismatch {
                slot: 0,
                expected: SquadType::Main,
                found: SquadType::Support,
            })
        );
        assert_eq!(
            team.assign(6, &main),
            Err(RosterError::SlotOutOfRange { index: 6, len: 6 })
        );

        team.assign(0, &main).unwrap();
        assert_eq!(team.occupied_count(), 1);
        assert_eq!(team.clear(0).unwrap(), Some(&main));
        assert_eq!(team.clear(0).unwrap(), None);
        assert!(team.clear(9).is_err());
    }

    #[test]
    fn test_type_tallies_sorted_desc() {
        let a = main_student(1.0, AttackType::Mystic);
        let b = main_student(1.0, AttackType::Sonic);
        let mut team = Team::standard();
        team.assign(0, &a).unwrap();
        team.assign(1, &b).unwrap();
        team.assign(2, &b).unwrap();

        assert_eq!(
            team.attack_type_counts(),
            vec![(AttackType::Sonic, 2), (AttackType::Mystic, 1)]
        );
        assert_eq!(team.armor_type_counts(), vec![(ArmorType::Light, 3)]);
    }

    #[test]
    fn test_school_counts_and_moods() {
        let mut a = main_student(1.0, AttackType::Pierce);
        a.school = "Abydos".into();
        a.outdoor_battle_adaptation = 4.0;
        let mut b = a.clone();
        b.school = "Gehenna".into();
        b.outdoor_battle_adaptation = 1.0;

        let mut team = Team::standard();
        team.assign(0, &b).unwrap();
        team.assign(1, &a).unwrap();
        team.assign(2, &a).unwrap();

        assert_eq!(
            team.school_counts(),
            vec![("Abydos".to_string(), 2), ("Gehenna".to_string(), 1)]
        );
        let ranks: Vec<_> = team.moods(Terrain::Outdoor).into_iter().map(|(_, r)| r).collect();
        assert_eq!(ranks, vec![MoodRank::C, MoodRank::S, MoodRank::S]);
    }
}
