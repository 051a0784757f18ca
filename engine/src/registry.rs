// ═══════════════════════════════════════════════════════════════════════
// Territory Registry — the fixed-length map state
//
// A plain state container. Nothing here checks game rules; the
// validator and the battle resolver own those. The length is fixed at
// construction and indices stay valid for the whole session.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    territories: Vec<Territory>,
}

impl Registry {
    /// Wrap already-validated territories. See `setup::build_registry`
    /// for the checked constructor.
    pub fn from_territories(territories: Vec<Territory>) -> Self {
        Registry { territories }
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Territory> {
        self.territories.get(index)
    }

    /// Ordered snapshot for display.
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn territory(&self, index: usize) -> &Territory {
        &self.territories[index]
    }

    pub fn territory_mut(&mut self, index: usize) -> &mut Territory {
        &mut self.territories[index]
    }

    pub fn set_owner(&mut self, index: usize, owner: Faction) {
        self.territories[index].owner = owner;
    }

    pub fn set_troops(&mut self, index: usize, troops: u32) {
        self.territories[index].troops = troops;
    }

    pub fn count_owned_by(&self, faction: &Faction) -> usize {
        self.territories.iter().filter(|t| t.is_owned_by(faction)).count()
    }

    pub fn total_troops_of(&self, faction: &Faction) -> u32 {
        self.territories.iter()
            .filter(|t| t.is_owned_by(faction))
            .map(|t| t.troops)
            .sum()
    }

    /// Distinct owning factions, in order of first appearance.
    pub fn factions(&self) -> Vec<Faction> {
        let mut seen: Vec<Faction> = Vec::new();
        for t in &self.territories {
            if !seen.contains(&t.owner) {
                seen.push(t.owner.clone());
            }
        }
        seen
    }
}
