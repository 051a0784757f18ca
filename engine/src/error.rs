// ═══════════════════════════════════════════════════════════════════════
// Errors — rejected attack commands and failed game setup
// ═══════════════════════════════════════════════════════════════════════

use thiserror::Error;

/// Why an attack command was refused. The registry is never touched
/// when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackError {
    #[error("territory number out of range")]
    IndexOutOfRange,

    #[error("a territory cannot attack itself")]
    SelfAttack,

    #[error("you can only attack from your own territories")]
    NotOwnedByPlayer,

    #[error("you cannot attack a territory of your own army")]
    FriendlyFire,

    #[error("you need at least 2 troops to attack")]
    InsufficientTroops,

    #[error("the game is over")]
    SessionOver,
}

/// Fatal problems building the registry. No session exists afterwards.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("the map has no territories")]
    NoTerritories,

    #[error("territory {index} has an empty name")]
    EmptyName { index: usize },

    #[error("territory name '{name}' is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    #[error("territory '{name}' has an empty army color")]
    EmptyFaction { name: String },

    #[error("army color '{faction}' is longer than {max} characters")]
    FactionTooLong { faction: String, max: usize },

    #[error("territory '{name}' must start with at least 1 troop")]
    NoTroops { name: String },

    #[error("the {player} army holds no territory on this map")]
    PlayerHasNoTerritory { player: String },

    #[error("mission target of {target} territories is unreachable on a map of {territories}")]
    UnreachableTarget { target: usize, territories: usize },

    #[error("could not read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid map file: {0}")]
    Json(#[from] serde_json::Error),
}
