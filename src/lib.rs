//! # kivostat - Stat Derivation and Team Synergy for Roster Planning
//!
//! Turns raw student records into the numbers a roster planner shows:
//! - **Level-scaled** stats from level-1/level-100 reference pairs
//! - **Bond and equipment** bonuses layered on top
//! - **Damage projection** from attack and critical stats
//! - **Skill text** rendered at a skill level
//! - **Team** aggregation, synergy scoring and terrain moods
//! - **Comparison** of two students stat by stat
//!
//! ## Core Concepts
//!
//! ### Stat Pipeline
//!
//! Per-student stats flow through a pipeline:
//!
//! ```text
//! [StatSource] → [StatTransform] → [ResolvedStat]
//! ```
//!
//! 1. **Sources** produce base values (level curves, flat record values)
//! 2. **Transforms** modify values in phase order: bond, equipment, projection
//! 3. **ResolvedStat** contains the final value with full breakdown
//!
//! A `StatSheet` orders stats through a dependency graph, so the damage
//! projection always sees the final attack and critical values.
//!
//! ### Pure Helpers
//!
//! Every step of the sheet is also available as a total function:
//! [`interpolate`], [`apply_bond`], [`equipment_bonus`], [`project_damage`],
//! [`render_skill_text`], [`MoodRank::classify`] and [`compare::diff`].
//!
//! ## Example
//!
//! ```rust
//! use kivostat::*;
//!
//! let student = Student {
//!     attack_power1: 100.0,
//!     attack_power100: 1000.0,
//!     critical_point: 50.0,
//!     critical_damage_rate: 20000.0,
//!     ..Default::default()
//! };
//!
//! assert_eq!(interpolate(100.0, 1000.0, 50), 545.0);
//!
//! let mut sheet = StatSheet::for_student(&student, StatContext::new().with_level(100), None);
//! let damage = sheet.damage_projection().unwrap();
//! assert_eq!(damage, project_damage(&student, 100, 1));
//! ```
//!
//! ## Modules
//!
//! - [`roster`] - Student records and roster loading
//! - [`stat`] - Stat kinds
//! - [`source`] - Stat sources (produce base values)
//! - [`transform`] - Stat transforms (bond, equipment, projection)
//! - [`sheet`] - Per-student stat sheet and weapon stats
//! - [`resolved`] - Resolved stat results
//! - [`context`] - Level, bond, skill and weapon settings
//! - [`graph`] - Dependency graph management
//! - [`equipment`] - Equipment tiers and slots
//! - [`damage`] - Damage projection
//! - [`skill_text`] - Skill description rendering
//! - [`team`] - Team formation and aggregation
//! - [`terrain`] - Terrain mood ranks
//! - [`synergy`] - Team synergy scoring
//! - [`compare`] - Two-student comparison
//! - [`error`] - Error types

pub mod compare;
pub mod context;
pub mod damage;
pub mod equipment;
pub mod error;
pub mod graph;
pub mod numeric;
pub mod resolved;
pub mod roster;
pub mod sheet;
pub mod skill_text;
pub mod source;
pub mod stat;
pub mod synergy;
pub mod team;
pub mod terrain;
pub mod transform;

// Re-export main types for convenience
pub use context::StatContext;
pub use error::RosterError;
pub use resolved::ResolvedStat;
pub use roster::{
    ArmorType, AttackType, ParamValue, Position, Roster, SkillBlock, SkillKind, Skills,
    SquadType, Student,
};
pub use sheet::{weapon_stats, StatSheet, WeaponStats};
pub use stat::StatKind;

// Re-export common sources and transforms
pub use source::{interpolate, ConstantSource, LevelCurveSource, StatSource};
pub use transform::{apply_bond, StatTransform, TransformPhase};

pub use numeric::StatValue;

pub use compare::{compare, ComparisonSlot, StatDiff, Winner};
pub use damage::{project_damage, DamageProjection};
pub use equipment::{equipment_bonus, EquipmentAssignment, EquipmentSlot};
pub use skill_text::render_skill_text;
pub use synergy::{SynergyBand, SynergyReport};
pub use team::{StatTotals, Team, TeamSlot, TeamStats};
pub use terrain::{MoodRank, Terrain};
