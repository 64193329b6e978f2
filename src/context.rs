//! Parameters chosen by the user for a stat derivation.
//!
//! The `StatContext` carries the slider values a view holds (level,
//! bond level, skill level, weapon level) into sources and transforms.
//! Every setter clamps to the parameter's valid range.

use crate::numeric::{
    clamp_bond_level, clamp_level, clamp_skill_level, clamp_weapon_level, MIN_LEVEL,
};
use serde::{Deserialize, Serialize};

/// User-chosen derivation parameters.
///
/// # Examples
///
/// ```rust
/// use kivostat::StatContext;
///
/// let context = StatContext::new().with_level(80).with_bond_level(99);
/// assert_eq!(context.level(), 80);
/// assert_eq!(context.bond_level(), 50); // clamped
/// assert_eq!(context.skill_level(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatContext {
    level: u32,
    bond_level: u32,
    skill_level: u32,
    weapon_level: u32,
}

impl Default for StatContext {
    fn default() -> Self {
        Self {
            level: MIN_LEVEL,
            bond_level: MIN_LEVEL,
            skill_level: MIN_LEVEL,
            weapon_level: MIN_LEVEL,
        }
    }
}

impl StatContext {
    /// Level 1, bond 1, skill 1, weapon 1.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = clamp_level(level);
        self
    }

    pub fn with_bond_level(mut self, bond_level: u32) -> Self {
        self.bond_level = clamp_bond_level(bond_level);
        self
    }

    pub fn with_skill_level(mut self, skill_level: u32) -> Self {
        self.skill_level = clamp_skill_level(skill_level);
        self
    }

    pub fn with_weapon_level(mut self, weapon_level: u32) -> Self {
        self.weapon_level = clamp_weapon_level(weapon_level);
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bond_level(&self) -> u32 {
        self.bond_level
    }

    pub fn skill_level(&self) -> u32 {
        self.skill_level
    }

    pub fn weapon_level(&self) -> u32 {
        self.weapon_level
    }
}
