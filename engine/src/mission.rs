// ═══════════════════════════════════════════════════════════════════════
// Missions — the player's secret victory condition
// ═══════════════════════════════════════════════════════════════════════

use crate::registry::Registry;
use crate::types::*;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mission {
    /// Leave the target faction without any territory.
    EliminateFaction { target: Faction },
    /// Hold at least `target` territories at once.
    ConquerCount { target: usize },
}

impl std::fmt::Display for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mission::EliminateFaction { target } => {
                write!(f, "Destroy the {} army", target)
            }
            Mission::ConquerCount { target } => {
                write!(f, "Control at least {} territories", target)
            }
        }
    }
}

/// Pick one of the two mission kinds with equal odds.
///
/// An elimination target is drawn from the non-player factions present
/// on the map. A map with no opponents always yields ConquerCount.
pub fn assign_random_mission(
    rng: &mut impl Rng,
    registry: &Registry,
    player: &Faction,
    conquer_target: usize,
) -> Mission {
    let opponents: Vec<Faction> = registry.factions()
        .into_iter()
        .filter(|f| f != player)
        .collect();

    let mission = if rng.gen_bool(0.5) {
        match opponents.choose(rng) {
            Some(target) => Mission::EliminateFaction { target: target.clone() },
            None => Mission::ConquerCount { target: conquer_target },
        }
    } else {
        Mission::ConquerCount { target: conquer_target }
    };

    debug!("assigned mission: {}", mission);
    mission
}

/// Whether the mission is fulfilled by the current map. Read-only.
pub fn is_mission_complete(registry: &Registry, mission: &Mission, player: &Faction) -> bool {
    match mission {
        Mission::ConquerCount { target } => registry.count_owned_by(player) >= *target,
        Mission::EliminateFaction { target } => registry.count_owned_by(target) == 0,
    }
}
