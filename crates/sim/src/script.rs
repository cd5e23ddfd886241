//! Occurrence scripts replayed against in-memory items.
//!
//! A script names a set of item slots and a list of occurrences referring to
//! those slots:
//!
//! ```json
//! {
//!   "items": {
//!     "hand": { "material": "DIAMOND_SWORD", "lore": ["§d StatTrak™ Kills: 3"] },
//!     "head": { "material": "IRON_HELMET" }
//!   },
//!   "occurrences": [
//!     { "type": "entity_died", "entity": "6f1c...", "weapon": "hand" },
//!     { "type": "entity_damaged", "amount": 3.0, "armor": ["head"] }
//!   ]
//! }
//! ```
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use runtime::{BlockPos, EventRouter, Occurrence, RouteOutcome};
use serde::Deserialize;
use stattrak_core::{Item, LoreHolder};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub items: BTreeMap<String, Item>,
    #[serde(default)]
    pub occurrences: Vec<ScriptedOccurrence>,
}

/// Occurrence with objects referenced by slot name.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedOccurrence {
    EntityDied {
        entity: Uuid,
        #[serde(default)]
        weapon: Option<String>,
    },
    BlockBroken {
        position: BlockPos,
        tool: String,
    },
    EntityDamaged {
        #[serde(default = "Uuid::nil")]
        victim: Uuid,
        amount: f64,
        #[serde(default)]
        armor: Vec<String>,
    },
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        let script: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse script {}", path.display()))?;
        script.validate()?;
        Ok(script)
    }

    /// Checks that every slot an occurrence refers to exists and that no
    /// armor slot is listed twice.
    pub fn validate(&self) -> Result<()> {
        for (step, occurrence) in self.occurrences.iter().enumerate() {
            if let ScriptedOccurrence::EntityDamaged { armor, .. } = occurrence {
                let mut seen = BTreeSet::new();
                if let Some(repeated) = armor.iter().find(|slot| !seen.insert(*slot)) {
                    bail!("occurrence {step} wears item slot {repeated:?} twice");
                }
            }

            let slots: Vec<&String> = match occurrence {
                ScriptedOccurrence::EntityDied { weapon, .. } => weapon.iter().collect(),
                ScriptedOccurrence::BlockBroken { tool, .. } => vec![tool],
                ScriptedOccurrence::EntityDamaged { armor, .. } => armor.iter().collect(),
            };
            if let Some(missing) = slots.into_iter().find(|slot| !self.items.contains_key(*slot)) {
                bail!("occurrence {step} refers to unknown item slot {missing:?}");
            }
        }
        Ok(())
    }

    /// Routes every occurrence in order, returning the outcome of each.
    pub fn replay(&mut self, router: &EventRouter) -> Result<Vec<RouteOutcome>> {
        let occurrences = self.occurrences.clone();
        let mut outcomes = Vec::with_capacity(occurrences.len());

        for (step, scripted) in occurrences.into_iter().enumerate() {
            let outcome = match scripted {
                ScriptedOccurrence::EntityDied { entity, weapon } => {
                    let weapon = match weapon {
                        Some(slot) => Some(slot_mut(&mut self.items, &slot)?),
                        None => None,
                    };
                    router.route(Occurrence::EntityDied { entity, weapon })
                }
                ScriptedOccurrence::BlockBroken { position, tool } => {
                    let tool = slot_mut(&mut self.items, &tool)?;
                    router.route(Occurrence::BlockBroken { position, tool })
                }
                ScriptedOccurrence::EntityDamaged {
                    victim,
                    amount,
                    armor,
                } => {
                    let mut worn: BTreeMap<&String, &mut Item> = self
                        .items
                        .iter_mut()
                        .filter(|(slot, _)| armor.contains(*slot))
                        .collect();
                    let armor = armor
                        .iter()
                        .map(|slot| {
                            worn.remove(&slot)
                                .map(|item| item as &mut dyn LoreHolder)
                                .with_context(|| format!("item slot {slot:?} is unknown or worn twice"))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    router.route(Occurrence::EntityDamaged {
                        victim,
                        amount,
                        armor,
                    })
                }
            };

            info!(step, ?outcome, "Replayed occurrence");
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

fn slot_mut<'a>(items: &'a mut BTreeMap<String, Item>, slot: &str) -> Result<&'a mut dyn LoreHolder> {
    items
        .get_mut(slot)
        .map(|item| item as &mut dyn LoreHolder)
        .with_context(|| format!("unknown item slot {slot:?}"))
}
