//! Stat sheet module.
//!
//! A `StatSheet` is the per-student derivation pipeline: level curves
//! and record values are registered as sources, bond and equipment
//! bonuses as transforms, and the damage projection as transforms that
//! read the finished attack and critical stats. Stats are resolved in
//! dependency order and cached until the context changes.

use crate::context::StatContext;
use crate::damage::DamageProjection;
use crate::equipment::{accumulated_bonus, EquipmentAssignment};
use crate::error::RosterError;
use crate::graph::StatGraph;
use crate::numeric::StatValue;
use crate::resolved::ResolvedStat;
use crate::roster::Student;
use crate::source::{ConstantSource, LevelCurveSource, StatSource, WeaponCurveSource};
use crate::stat::StatKind;
use crate::transform::{BondTransform, EquipmentTransform, ProjectionTransform, StatTransform};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-student stat derivation.
///
/// # Examples
///
/// ```rust
/// use kivostat::{EquipmentAssignment, StatContext, StatKind, StatSheet, Student};
///
/// let student = Student {
///     max_hp1: 1000.0,
///     max_hp100: 10000.0,
///     equipment: vec!["Hat".into(), "Gloves".into(), "Watch".into()],
///     ..Default::default()
/// };
/// let mut equipment = EquipmentAssignment::new(3);
/// equipment.set_current(0, 2);
///
/// let context = StatContext::new().with_level(100).with_bond_level(21);
/// let mut sheet = StatSheet::for_student(&student, context, Some(&equipment));
///
/// // 10000 * 1.1 (bond) + 120 (tier 2 hat)
/// assert_eq!(sheet.resolve(StatKind::MaxHp).unwrap().value, 11120.0);
/// ```
pub struct StatSheet {
    context: StatContext,

    /// Multiple sources per stat (additive).
    sources: HashMap<StatKind, Vec<Box<dyn StatSource>>>,

    /// Transform chain per stat.
    transforms: HashMap<StatKind, Vec<Box<dyn StatTransform>>>,

    cache: HashMap<StatKind, ResolvedStat>,
}

impl StatSheet {
    /// An empty sheet.
    pub fn new(context: StatContext) -> Self {
        Self {
            context,
            sources: HashMap::new(),
            transforms: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// The full sheet for a student: level curves with bond on HP, ATK
    /// and healing, flat record values, equipment bonuses from the
    /// current tiers, and the damage projection.
    pub fn for_student(
        student: &Student,
        context: StatContext,
        equipment: Option<&EquipmentAssignment>,
    ) -> Self {
        let mut sheet = Self::new(context);

        for stat in StatKind::RECORD {
            match LevelCurveSource::for_student(student, stat) {
                Some(curve) => sheet.register_source(stat, Box::new(curve)),
                None => {
                    sheet.register_source(stat, Box::new(ConstantSource(student.base_value(stat))))
                }
            }

            if stat.is_bond_scaled() {
                sheet.register_transform(stat, Box::new(BondTransform));
            }

            if let Some(assignment) = equipment {
                let bonus = accumulated_bonus(&student.equipment, assignment.current(), stat);
                if bonus > 0.0 {
                    sheet.register_transform(stat, Box::new(EquipmentTransform::new(bonus)));
                }
            }
        }

        for stat in StatKind::DERIVED {
            sheet.register_transform(stat, Box::new(ProjectionTransform::new(stat)));
        }

        sheet
    }

    pub fn context(&self) -> &StatContext {
        &self.context
    }

    /// Replace the context. Invalidates every cached stat.
    pub fn set_context(&mut self, context: StatContext) {
        if self.context != context {
            self.context = context;
            self.cache.clear();
        }
    }

    /// Register a source. Multiple sources for one stat are summed.
    pub fn register_source(&mut self, stat: StatKind, source: Box<dyn StatSource>) {
        self.sources.entry(stat).or_default().push(source);
        self.cache.clear();
    }

    /// Register a transform. Transforms run in phase order, then in
    /// registration order.
    pub fn register_transform(&mut self, stat: StatKind, transform: Box<dyn StatTransform>) {
        self.transforms.entry(stat).or_default().push(transform);
        self.cache.clear();
    }

    /// Resolve one stat and everything it depends on.
    pub fn resolve(&mut self, stat: StatKind) -> Result<ResolvedStat, RosterError> {
        if let Some(cached) = self.cache.get(&stat) {
            return Ok(cached.clone());
        }

        self.resolve_pending()?;

        self.cache
            .get(&stat)
            .cloned()
            .ok_or(RosterError::UnregisteredStat(stat))
    }

    /// Resolve every registered stat.
    pub fn resolve_all(&mut self) -> Result<BTreeMap<StatKind, ResolvedStat>, RosterError> {
        self.resolve_pending()?;
        Ok(self
            .cache
            .iter()
            .map(|(stat, resolved)| (*stat, resolved.clone()))
            .collect())
    }

    /// Resolved value of a stat.
    pub fn value(&mut self, stat: StatKind) -> Result<StatValue, RosterError> {
        self.resolve(stat).map(|resolved| resolved.value)
    }

    /// The damage projection from this sheet's finished stats.
    pub fn damage_projection(&mut self) -> Result<DamageProjection, RosterError> {
        Ok(DamageProjection {
            base: self.value(StatKind::BaseDamage)?,
            average: self.value(StatKind::AverageDamage)?,
            critical: self.value(StatKind::CriticalDamage)?,
        })
    }

    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    fn build_graph(&self) -> StatGraph {
        let mut graph = StatGraph::new();

        for stat in self.sources.keys().chain(self.transforms.keys()) {
            graph.add_node(*stat);
        }

        for (stat, transforms) in &self.transforms {
            for transform in transforms {
                for dep in transform.depends_on() {
                    graph.add_edge(*stat, dep);
                }
            }
        }

        graph
    }

    fn resolve_pending(&mut self) -> Result<(), RosterError> {
        let order = self.build_graph().topological_sort()?;

        for stat in order {
            if self.cache.contains_key(&stat) {
                continue;
            }
            let resolved = self.resolve_stat_internal(stat)?;
            debug!(
                "Resolved {} = {} ({} sources, {} transforms)",
                stat,
                resolved.value,
                resolved.sources.len(),
                resolved.transforms.len()
            );
            self.cache.insert(stat, resolved);
        }

        Ok(())
    }

    fn resolve_stat_internal(&self, stat: StatKind) -> Result<ResolvedStat, RosterError> {
        let mut resolved = ResolvedStat::new(stat, 0.0);

        let mut base_value = 0.0;
        if let Some(sources) = self.sources.get(&stat) {
            for source in sources {
                let value = source.get_value(stat, &self.context);
                base_value += value;
                resolved.add_source(source.description(), value);
            }
        }

        let mut current_value = base_value;
        if let Some(transforms) = self.transforms.get(&stat) {
            let mut ordered: Vec<&dyn StatTransform> =
                transforms.iter().map(|t| t.as_ref()).collect();
            ordered.sort_by_key(|t| t.phase());

            for transform in ordered {
                let mut dependencies = HashMap::new();
                for dep in transform.depends_on() {
                    let dep_value = self
                        .cache
                        .get(&dep)
                        .map(|r| r.value)
                        .ok_or(RosterError::MissingDependency(dep))?;
                    dependencies.insert(dep, dep_value);
                }

                let new_value = transform.apply(current_value, &dependencies, &self.context)?;
                resolved.add_transform(transform.description(), new_value);
                current_value = new_value;
            }
        }

        resolved.value = current_value;
        Ok(resolved)
    }
}

/// Weapon stats at a weapon level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub stability: StatValue,
    pub accuracy: StatValue,
    pub critical: StatValue,
}

impl WeaponStats {
    /// Stability grows to 1.5× its record value at weapon level 100;
    /// accuracy and critical grow from 0.8× to their record values.
    pub fn for_student(student: &Student, context: &StatContext) -> Self {
        let curve = |stat: StatKind, start: StatValue, end: StatValue| {
            WeaponCurveSource::new(student.base_value(stat), start, end).get_value(stat, context)
        };

        Self {
            stability: curve(StatKind::StabilityPoint, 1.0, 1.5),
            accuracy: curve(StatKind::AccuracyPoint, 0.8, 1.0),
            critical: curve(StatKind::CriticalPoint, 0.8, 1.0),
        }
    }
}

/// Weapon stats at a weapon level, clamped to `[1, 100]`.
pub fn weapon_stats(student: &Student, weapon_level: u32) -> WeaponStats {
    WeaponStats::for_student(student, &StatContext::new().with_weapon_level(weapon_level))
}
