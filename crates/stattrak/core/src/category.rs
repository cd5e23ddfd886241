//! Classification of objects into tracked categories.

use strum::IntoEnumIterator;

/// Categories of objects that carry statistics.
///
/// Membership is decided by the host's material name (`DIAMOND_SWORD`,
/// `IRON_BOOTS`, ...). Categories overlap: an axe is both a weapon and a tool.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    /// Tracks kills.
    Weapon,
    /// Tracks blocks mined.
    Tool,
    /// Tracks damage taken.
    Armor,
}

const WEAPON_SUFFIXES: &[&str] = &["_SWORD", "_AXE"];
const WEAPON_EXACT: &[&str] = &["BOW", "CROSSBOW"];
const TOOL_SUFFIXES: &[&str] = &["_PICKAXE", "_AXE", "_SHOVEL", "_HOE"];
const ARMOR_SUFFIXES: &[&str] = &["_HELMET", "_CHESTPLATE", "_LEGGINGS", "_BOOTS"];

impl ItemCategory {
    /// Returns true if `material` belongs to this category.
    ///
    /// Material names compare case-insensitively.
    pub fn matches(self, material: &str) -> bool {
        let material = material.to_ascii_uppercase();
        let has_suffix = |suffixes: &[&str]| suffixes.iter().any(|s| material.ends_with(s));

        match self {
            Self::Weapon => has_suffix(WEAPON_SUFFIXES) || WEAPON_EXACT.contains(&material.as_str()),
            Self::Tool => has_suffix(TOOL_SUFFIXES),
            Self::Armor => has_suffix(ARMOR_SUFFIXES),
        }
    }

    /// All categories `material` belongs to.
    pub fn of(material: &str) -> impl Iterator<Item = ItemCategory> + '_ {
        Self::iter().filter(move |category| category.matches(material))
    }
}
