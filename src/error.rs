//! Error types.
//!
//! The derivation functions are total and never fail. Errors only arise
//! at the roster boundary, when mutating a team, and when resolving a
//! stat sheet whose dependency graph is malformed.

use crate::roster::SquadType;
use crate::stat::StatKind;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[StatKind]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors produced by the roster, team and stat sheet APIs.
///
/// # Examples
///
/// ```rust
/// use kivostat::{RosterError, SquadType};
///
/// let err = RosterError::SquadMismatch {
///     slot: 4,
///     expected: SquadType::Support,
///     found: SquadType::Main,
/// };
/// assert_eq!(err.to_string(), "Slot 4 accepts Support students, got Main");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterError {
    /// A student was offered to a slot of the other squad category.
    #[error("Slot {slot} accepts {expected} students, got {found}")]
    SquadMismatch {
        slot: usize,
        expected: SquadType,
        found: SquadType,
    },

    /// A slot index beyond the formation.
    #[error("Slot index {index} out of range for {len} slots")]
    SlotOutOfRange { index: usize, len: usize },

    /// The roster document could not be decoded.
    #[error("Invalid roster data: {0}")]
    InvalidData(String),

    /// A dependency cycle among stat sheet transforms.
    ///
    /// The path ends with the stat it started from.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<StatKind> },

    /// A transform read a stat that was not resolved before it.
    #[error("Missing dependency: {0}")]
    MissingDependency(StatKind),

    /// A stat with no source or transform registered on the sheet.
    #[error("Stat not registered: {0}")]
    UnregisteredStat(StatKind),
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RosterError::MissingDependency(StatKind::AttackPower);
        assert!(err.to_string().contains("AttackPower"));

        let err = RosterError::UnregisteredStat(StatKind::Range);
        assert_eq!(err.to_string(), "Stat not registered: Range");

        let err = RosterError::SlotOutOfRange { index: 7, len: 6 };
        assert_eq!(err.to_string(), "Slot index 7 out of range for 6 slots");
    }

    #[test]
    fn test_cycle_error_display() {
        let err = RosterError::Cycle {
            path: vec![
                StatKind::AverageDamage,
                StatKind::AttackPower,
                StatKind::AverageDamage,
            ],
        };
        assert_eq!(
            err.to_string(),
            "Cycle detected: AverageDamage -> AttackPower -> AverageDamage"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: RosterError = json_err.into();
        assert!(matches!(err, RosterError::InvalidData(_)));
    }
}
