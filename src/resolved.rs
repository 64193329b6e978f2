//! Resolved stat results module.

use crate::numeric::StatValue;
use crate::stat::StatKind;
use serde::{Deserialize, Serialize};

/// A resolved stat value with the steps that produced it.
///
/// # Examples
///
/// ```rust
/// use kivostat::{ResolvedStat, StatKind};
///
/// let mut resolved = ResolvedStat::new(StatKind::MaxHp, 11300.0);
/// resolved.add_source("Level curve", 10000.0);
/// resolved.add_transform("Bond", 11000.0);
/// resolved.add_transform("Equipment +300", 11300.0);
///
/// assert_eq!(resolved.base(), 10000.0);
/// assert_eq!(resolved.transforms.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedStat {
    pub stat: StatKind,

    pub value: StatValue,

    /// `(source_description, value)` in registration order.
    pub sources: Vec<(String, StatValue)>,

    /// `(transform_description, value_after_transform)` in application order.
    pub transforms: Vec<(String, StatValue)>,
}

impl ResolvedStat {
    pub fn new(stat: StatKind, value: StatValue) -> Self {
        Self {
            stat,
            value,
            sources: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn add_source(&mut self, description: impl Into<String>, value: StatValue) {
        self.sources.push((description.into(), value));
    }

    pub fn add_transform(&mut self, description: impl Into<String>, value: StatValue) {
        self.transforms.push((description.into(), value));
    }

    /// Sum of source contributions, before any transform.
    pub fn base(&self) -> StatValue {
        self.sources.iter().map(|(_, value)| value).sum()
    }
}
