// ═══════════════════════════════════════════════════════════════════════
// Core types — factions, territories, rules and session state
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

// ── Constants ──────────────────────────────────────────────────────────

/// Number of territories in the reference map.
pub const DEFAULT_TERRITORY_COUNT: usize = 5;

/// Longest accepted territory name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Longest accepted faction label, in characters.
pub const MAX_FACTION_LEN: usize = 20;

/// Faction controlled by the human player in the reference map.
pub const PLAYER_FACTION: &str = "Blue";

/// Territories the player must hold to complete a ConquerCount mission.
pub const DEFAULT_CONQUER_TARGET: usize = 3;

/// Faces on each battle die.
pub const DIE_SIDES: u8 = 6;

/// An attacker must keep one troop at home, so it needs at least two.
pub const MIN_ATTACKING_TROOPS: u32 = 2;

// ── Faction ────────────────────────────────────────────────────────────

/// A side in the game, identified by its army color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faction(pub String);

impl Faction {
    pub fn new(label: impl Into<String>) -> Self {
        Faction(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Faction {
    fn from(label: &str) -> Self {
        Faction(label.to_string())
    }
}

impl From<String> for Faction {
    fn from(label: String) -> Self {
        Faction(label)
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Territory ──────────────────────────────────────────────────────────

/// A named map unit with an owning faction and a troop count.
/// Outside of `battle::resolve_battle`, `troops` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub owner: Faction,
    pub troops: u32,
}

impl Territory {
    pub fn new(name: impl Into<String>, owner: impl Into<Faction>, troops: u32) -> Self {
        Territory {
            name: name.into(),
            owner: owner.into(),
            troops,
        }
    }

    pub fn is_owned_by(&self, faction: &Faction) -> bool {
        &self.owner == faction
    }
}

// ── Battle rules ───────────────────────────────────────────────────────

/// Who takes the round when both dice show the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Attacker needs a strictly higher roll.
    #[default]
    Defender,
    /// Attacker wins on `attack >= defense`.
    Attacker,
}

/// What a repelled attack costs the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedAttack {
    #[default]
    NoCost,
    AttackerLosesTroop,
}

/// The dice rules in force for a whole session. Never changed mid-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleRules {
    #[serde(default)]
    pub ties: TieBreak,
    #[serde(default)]
    pub failed_attack: FailedAttack,
}

impl BattleRules {
    /// Whether an attack roll beats a defense roll under these rules.
    pub fn attacker_wins(&self, attack_roll: u8, defense_roll: u8) -> bool {
        match self.ties {
            TieBreak::Defender => attack_roll > defense_roll,
            TieBreak::Attacker => attack_roll >= defense_roll,
        }
    }
}

// ── Session state ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Won,
    Aborted,
}

impl SessionState {
    pub fn is_finished(self) -> bool {
        self != SessionState::InProgress
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Won => write!(f, "won"),
            SessionState::Aborted => write!(f, "aborted"),
        }
    }
}
