//! Student records and the roster they are loaded into.
//!
//! A `Student` mirrors one entry of the upstream dataset (a JSON object
//! keyed by student id). Records are read-only once loaded; every other
//! module borrows them.

use crate::error::RosterError;
use crate::numeric::StatValue;
use crate::stat::StatKind;
use crate::terrain::Terrain;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Squad category of a student or team slot.
///
/// `Main` is the primary (striker) squad.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadType {
    #[default]
    Main,
    Support,
}

impl fmt::Display for SquadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquadType::Main => f.write_str("Main"),
            SquadType::Support => f.write_str("Support"),
        }
    }
}

/// Attack (bullet) type.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackType {
    #[default]
    Explosion,
    Pierce,
    Mystic,
    Sonic,
    /// Untyped attacks; never counted toward attack-type unity.
    Normal,
}

impl AttackType {
    /// The four typed attacks, in tally order.
    pub const TYPED: [AttackType; 4] = [
        AttackType::Explosion,
        AttackType::Pierce,
        AttackType::Mystic,
        AttackType::Sonic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttackType::Explosion => "Explosion",
            AttackType::Pierce => "Pierce",
            AttackType::Mystic => "Mystic",
            AttackType::Sonic => "Sonic",
            AttackType::Normal => "Normal",
        }
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Armor type.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorType {
    #[default]
    #[serde(rename = "LightArmor")]
    Light,
    #[serde(rename = "HeavyArmor")]
    Heavy,
    #[serde(rename = "SpecialArmor")]
    Special,
    #[serde(rename = "ElasticArmor")]
    Elastic,
}

impl ArmorType {
    pub const ALL: [ArmorType; 4] = [
        ArmorType::Light,
        ArmorType::Heavy,
        ArmorType::Special,
        ArmorType::Elastic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArmorType::Light => "Light",
            ArmorType::Heavy => "Heavy",
            ArmorType::Special => "Special",
            ArmorType::Elastic => "Elastic",
        }
    }
}

impl fmt::Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Battlefield position.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Front,
    #[default]
    Middle,
    Back,
}

/// A skill parameter cell. The dataset mixes numbers and preformatted text,
/// and leaves some cells `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    Absent,
}

impl ParamValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Absent => Ok(()),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Number(f64::from(n))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

/// One named skill: display name, description template and its
/// level-indexed parameter table (outer index = placeholder slot,
/// inner index = skill level).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub parameters: Option<Vec<Vec<ParamValue>>>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Which skill slot a block occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    Normal,
    Ex,
    Passive,
    WeaponPassive,
    Public,
}

/// The optional skill blocks of a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Skills {
    #[serde(default)]
    pub normal: Option<SkillBlock>,
    #[serde(default)]
    pub ex: Option<SkillBlock>,
    #[serde(default)]
    pub passive: Option<SkillBlock>,
    #[serde(default)]
    pub weapon_passive: Option<SkillBlock>,
    #[serde(default)]
    pub public: Option<SkillBlock>,
}

impl Skills {
    /// Present skill blocks in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, &SkillBlock)> {
        [
            (SkillKind::Normal, self.normal.as_ref()),
            (SkillKind::Ex, self.ex.as_ref()),
            (SkillKind::Passive, self.passive.as_ref()),
            (SkillKind::WeaponPassive, self.weapon_passive.as_ref()),
            (SkillKind::Public, self.public.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, block)| block.map(|b| (kind, b)))
    }

    pub fn get(&self, kind: SkillKind) -> Option<&SkillBlock> {
        match kind {
            SkillKind::Normal => self.normal.as_ref(),
            SkillKind::Ex => self.ex.as_ref(),
            SkillKind::Passive => self.passive.as_ref(),
            SkillKind::WeaponPassive => self.weapon_passive.as_ref(),
            SkillKind::Public => self.public.as_ref(),
        }
    }
}

/// A playable character record as supplied by the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub school: String,
    /// Per-region release flags; index 1 is the global server.
    #[serde(default)]
    pub is_released: Vec<bool>,
    pub squad_type: SquadType,
    /// Free-form tactical role, e.g. "Tanker", "Healer", "DamageDealer".
    #[serde(default)]
    pub tactic_role: String,
    #[serde(default)]
    pub position: Position,
    pub bullet_type: AttackType,
    pub armor_type: ArmorType,

    #[serde(rename = "MaxHP1")]
    pub max_hp1: StatValue,
    #[serde(rename = "MaxHP100")]
    pub max_hp100: StatValue,
    pub attack_power1: StatValue,
    pub attack_power100: StatValue,
    pub defense_power1: StatValue,
    pub defense_power100: StatValue,
    pub heal_power1: StatValue,
    pub heal_power100: StatValue,

    #[serde(default)]
    pub accuracy_point: StatValue,
    #[serde(default)]
    pub critical_point: StatValue,
    #[serde(default)]
    pub critical_damage_rate: StatValue,
    #[serde(default)]
    pub dodge_point: StatValue,
    #[serde(default)]
    pub range: StatValue,
    #[serde(default)]
    pub ammo_count: StatValue,
    #[serde(default)]
    pub stability_point: StatValue,

    #[serde(default)]
    pub street_battle_adaptation: StatValue,
    #[serde(default)]
    pub outdoor_battle_adaptation: StatValue,
    #[serde(default)]
    pub indoor_battle_adaptation: StatValue,

    /// Equipment slot type names, in slot order.
    #[serde(default)]
    pub equipment: Vec<String>,

    #[serde(default)]
    pub skills: Option<Skills>,
}

impl Student {
    /// The `(level 1, level 100)` pair for a stat that grows with level.
    pub fn level_curve(&self, stat: StatKind) -> Option<(StatValue, StatValue)> {
        match stat {
            StatKind::MaxHp => Some((self.max_hp1, self.max_hp100)),
            StatKind::AttackPower => Some((self.attack_power1, self.attack_power100)),
            StatKind::DefensePower => Some((self.defense_power1, self.defense_power100)),
            StatKind::HealPower => Some((self.heal_power1, self.heal_power100)),
            _ => None,
        }
    }

    /// The raw record value of a stat. Level-curve stats report their
    /// level-100 reference value; derived stats report zero.
    pub fn base_value(&self, stat: StatKind) -> StatValue {
        match stat {
            StatKind::MaxHp => self.max_hp100,
            StatKind::AttackPower => self.attack_power100,
            StatKind::DefensePower => self.defense_power100,
            StatKind::HealPower => self.heal_power100,
            StatKind::AccuracyPoint => self.accuracy_point,
            StatKind::CriticalPoint => self.critical_point,
            StatKind::CriticalDamageRate => self.critical_damage_rate,
            StatKind::DodgePoint => self.dodge_point,
            StatKind::Range => self.range,
            StatKind::StabilityPoint => self.stability_point,
            StatKind::BaseDamage | StatKind::AverageDamage | StatKind::CriticalDamage => 0.0,
        }
    }

    /// The terrain-adaptation scalar for a terrain.
    pub fn adaptation(&self, terrain: Terrain) -> StatValue {
        match terrain {
            Terrain::Street => self.street_battle_adaptation,
            Terrain::Outdoor => self.outdoor_battle_adaptation,
            Terrain::Indoor => self.indoor_battle_adaptation,
        }
    }

    /// Whether the record is released on the global server.
    pub fn is_globally_released(&self) -> bool {
        self.is_released.get(1).copied().unwrap_or(false)
    }

    /// Case-insensitive substring match on name, school or tactical role.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        [&self.name, &self.school, &self.tactic_role]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// The loaded set of students for a session.
///
/// # Examples
///
/// ```rust
/// use kivostat::Roster;
///
/// let json = r#"{
///     "10000": {
///         "Id": 10000, "Name": "Aru", "School": "Gehenna", "IsReleased": [true, true],
///         "SquadType": "Main", "TacticRole": "DamageDealer", "BulletType": "Explosion",
///         "ArmorType": "LightArmor", "MaxHP1": 2000, "MaxHP100": 20000,
///         "AttackPower1": 200, "AttackPower100": 2000, "DefensePower1": 20,
///         "DefensePower100": 200, "HealPower1": 500, "HealPower100": 5000
///     }
/// }"#;
///
/// let roster = Roster::from_json_str(json).unwrap();
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster.get(10000).unwrap().name, "Aru");
/// assert_eq!(roster.search("gehenna").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Build a roster from already-decoded records, sorted by id.
    pub fn new(mut students: Vec<Student>) -> Self {
        students.sort_by_key(|s| s.id);
        Self { students }
    }

    /// Decode the dataset document (an object keyed by student id).
    ///
    /// Only globally released students are kept. Records that fail to
    /// decode are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, RosterError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let entries = document
            .as_object()
            .ok_or_else(|| RosterError::InvalidData("expected an object keyed by id".into()))?;

        let mut students = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match serde_json::from_value::<Student>(value.clone()) {
                Ok(student) if student.is_globally_released() => students.push(student),
                Ok(_) => {}
                Err(err) => warn!("Skipping student record {}: {}", key, err),
            }
        }

        info!(
            "Loaded {} released students from {} records",
            students.len(),
            entries.len()
        );
        Ok(Self::new(students))
    }

    pub fn get(&self, id: u32) -> Option<&Student> {
        self.students
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|idx| &self.students[idx])
    }

    /// Students whose name, school or role contains `query`.
    pub fn search(&self, query: &str) -> Vec<&Student> {
        self.students.iter().filter(|s| s.matches(query)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, released: bool) -> serde_json::Value {
        serde_json::json!({
            "Id": id,
            "Name": name,
            "School": "Trinity",
            "IsReleased": [true, released, false],
            "SquadType": "Support",
            "TacticRole": "Healer",
            "Position": "Back",
            "BulletType": "Mystic",
            "ArmorType": "ElasticArmor",
            "MaxHP1": 1500, "MaxHP100": 15000,
            "AttackPower1": 100, "AttackPower100": 1000,
            "DefensePower1": 10, "DefensePower100": 100,
            "HealPower1": 800, "HealPower100": 8000,
            "CriticalPoint": 100, "CriticalDamageRate": 20000,
            "StreetBattleAdaptation": 2, "OutdoorBattleAdaptation": 3,
            "IndoorBattleAdaptation": 4,
            "Equipment": ["Hat", "Hairpin", "Watch"],
            "Skills": {
                "Ex": {
                    "Name": "Blessing",
                    "Desc": "Heals <?1> HP",
                    "Parameters": [["120%", "150%"]]
                },
                "Normal": { "Icon": "COMMON_SKILLICON_NORMAL" }
            }
        })
    }

    #[test]
    fn test_decode_student() {
        let student: Student = serde_json::from_value(record(1, "Serina", true)).unwrap();
        assert_eq!(student.squad_type, SquadType::Support);
        assert_eq!(student.bullet_type, AttackType::Mystic);
        assert_eq!(student.armor_type, ArmorType::Elastic);
        assert_eq!(student.position, Position::Back);
        assert_eq!(student.max_hp100, 15000.0);
        assert_eq!(student.adaptation(Terrain::Indoor), 4.0);
        assert_eq!(student.equipment, vec!["Hat", "Hairpin", "Watch"]);

        let skills = student.skills.as_ref().unwrap();
        let ex = skills.get(SkillKind::Ex).unwrap();
        assert_eq!(ex.parameters.as_ref().unwrap()[0][1], ParamValue::from("150%"));
        assert!(skills.passive.is_none());
        let kinds: Vec<_> = skills.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![SkillKind::Normal, SkillKind::Ex]);
    }

    #[test]
    fn test_roster_filters_unreleased_and_sorts() {
        let doc = serde_json::json!({
            "30": record(30, "Hanae", true),
            "10": record(10, "Serina", true),
            "20": record(20, "Unreleased", false),
        });
        let roster = Roster::from_json_str(&doc.to_string()).unwrap();
        let ids: Vec<_> = roster.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10, 30]);
        assert!(roster.get(20).is_none());
    }

    #[test]
    fn test_null_parameter_cell_keeps_student() {
        let mut value = record(10, "Serina", true);
        value["Skills"]["Ex"]["Parameters"] = serde_json::json!([["10%", null, "30%"]]);
        let doc = serde_json::json!({ "10": value });

        let roster = Roster::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(roster.len(), 1);
        let ex = roster.get(10).and_then(|s| s.skills.as_ref()).and_then(|s| s.get(SkillKind::Ex));
        let row = &ex.unwrap().parameters.as_ref().unwrap()[0];
        assert_eq!(row[1], ParamValue::Absent);
        assert_eq!(ex.unwrap().render(2), "Heals 30% HP");
    }

    #[test]
    fn test_roster_skips_malformed_records() {
        let doc = serde_json::json!({
            "10": record(10, "Serina", true),
            "11": { "Id": 11, "Name": "Broken" },
        });
        let roster = Roster::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_roster_rejects_non_object() {
        assert!(matches!(
            Roster::from_json_str("[1, 2, 3]"),
            Err(RosterError::InvalidData(_))
        ));
        assert!(Roster::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let serina: Student = serde_json::from_value(record(10, "Serina", true)).unwrap();
        let roster = Roster::new(vec![serina]);
        assert_eq!(roster.search("").len(), 1);
        assert_eq!(roster.search("SERI").len(), 1);
        assert_eq!(roster.search("heal").len(), 1);
        assert_eq!(roster.search("trin").len(), 1);
        assert!(roster.search("gehenna").is_empty());
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from(3).to_string(), "3");
        assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
        assert_eq!(ParamValue::from("25%").to_string(), "25%");
    }
}
