// ═══════════════════════════════════════════════════════════════════════
// Game setup — map configuration and registry construction
//
// The reference map is built in. Other maps are read from JSON:
//
//   {
//     "player_faction": "Blue",
//     "conquer_target": 3,
//     "rules": { "ties": "defender", "failed_attack": "no_cost" },
//     "territories": [ { "name": "Alaska", "owner": "Blue", "troops": 5 }, ... ]
//   }
// ═══════════════════════════════════════════════════════════════════════

use crate::error::SetupError;
use crate::registry::Registry;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting values for a single territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritorySetup {
    pub name: String,
    pub owner: String,
    pub troops: u32,
}

impl TerritorySetup {
    pub fn new(name: &str, owner: &str, troops: u32) -> Self {
        TerritorySetup {
            name: name.to_string(),
            owner: owner.to_string(),
            troops,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_player_faction")]
    pub player_faction: String,
    #[serde(default = "default_conquer_target")]
    pub conquer_target: usize,
    #[serde(default)]
    pub rules: BattleRules,
    pub territories: Vec<TerritorySetup>,
}

fn default_player_faction() -> String {
    PLAYER_FACTION.to_string()
}

fn default_conquer_target() -> usize {
    DEFAULT_CONQUER_TARGET
}

impl Default for GameConfig {
    /// The reference five-territory map. The player starts with two.
    fn default() -> Self {
        GameConfig {
            player_faction: default_player_faction(),
            conquer_target: DEFAULT_CONQUER_TARGET,
            rules: BattleRules::default(),
            territories: vec![
                TerritorySetup::new("America", "Blue", 5),
                TerritorySetup::new("Brasil", "Blue", 3),
                TerritorySetup::new("Europa", "Green", 3),
                TerritorySetup::new("Asia", "Red", 4),
                TerritorySetup::new("Africa", "Green", 2),
            ],
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn player(&self) -> Faction {
        Faction::new(self.player_faction.trim())
    }

    /// Check every territory and the mission target, then build the registry.
    pub fn build_registry(&self) -> Result<Registry, SetupError> {
        let registry = build_registry(&self.territories)?;
        check_label(&self.player_faction, "player")?;
        let player = self.player();
        if registry.count_owned_by(&player) == 0 {
            return Err(SetupError::PlayerHasNoTerritory { player: player.to_string() });
        }
        if self.conquer_target == 0 || self.conquer_target > registry.len() {
            return Err(SetupError::UnreachableTarget {
                target: self.conquer_target,
                territories: registry.len(),
            });
        }
        Ok(registry)
    }
}

/// Validate starting values and build a registry from them.
pub fn build_registry(setups: &[TerritorySetup]) -> Result<Registry, SetupError> {
    if setups.is_empty() {
        return Err(SetupError::NoTerritories);
    }

    let mut territories = Vec::with_capacity(setups.len());
    for (index, s) in setups.iter().enumerate() {
        let name = s.name.trim();
        if name.is_empty() {
            return Err(SetupError::EmptyName { index });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SetupError::NameTooLong { name: name.to_string(), max: MAX_NAME_LEN });
        }
        check_label(&s.owner, name)?;
        if s.troops == 0 {
            return Err(SetupError::NoTroops { name: name.to_string() });
        }
        territories.push(Territory::new(name, s.owner.trim(), s.troops));
    }

    Ok(Registry::from_territories(territories))
}

fn check_label(label: &str, territory: &str) -> Result<(), SetupError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(SetupError::EmptyFaction { name: territory.to_string() });
    }
    if label.chars().count() > MAX_FACTION_LEN {
        return Err(SetupError::FactionTooLong { faction: label.to_string(), max: MAX_FACTION_LEN });
    }
    Ok(())
}
