//! Numeric helpers and parameter bounds.
//!
//! All derived numbers are `f64`. Rounding follows the half-up rule used
//! by the planner's display layer (halves round toward positive infinity),
//! which differs from [`f64::round`] for negative halves.

/// Type alias for stat values.
pub type StatValue = f64;

/// Lowest level any level-like parameter can take.
pub const MIN_LEVEL: u32 = 1;

/// Maximum character level in the detail view.
pub const MAX_LEVEL: u32 = 100;

/// Maximum character level in the comparison view.
pub const MAX_COMPARISON_LEVEL: u32 = 90;

/// Maximum skill level.
pub const MAX_SKILL_LEVEL: u32 = 10;

/// Maximum bond level.
pub const MAX_BOND_LEVEL: u32 = 50;

/// Maximum weapon level.
pub const MAX_WEAPON_LEVEL: u32 = 100;

/// Lowest equipment tier shown to users.
pub const MIN_TIER: u32 = 1;

/// Highest equipment tier.
pub const MAX_TIER: u32 = 9;

/// Round to the nearest integer, halves toward positive infinity.
///
/// # Examples
///
/// ```rust
/// use kivostat::numeric::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(1.49), 1.0);
/// ```
pub fn round_half_up(value: StatValue) -> StatValue {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Clamp a character level to `[1, 100]`.
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Clamp a character level to the comparison view's `[1, 90]`.
pub fn clamp_comparison_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_COMPARISON_LEVEL)
}

/// Clamp a skill level to `[1, 10]`.
pub fn clamp_skill_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_SKILL_LEVEL)
}

/// Clamp a bond level to `[1, 50]`.
pub fn clamp_bond_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_BOND_LEVEL)
}

/// Clamp a weapon level to `[1, 100]`.
pub fn clamp_weapon_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_WEAPON_LEVEL)
}

/// Clamp an equipment tier to `[1, 9]`.
pub fn clamp_tier(tier: u32) -> u32 {
    tier.clamp(MIN_TIER, MAX_TIER)
}
