// ═══════════════════════════════════════════════════════════════════════
// Battle resolution — one round of dice between two territories
//
// The attack die is always rolled before the defense die. Seeded tests
// depend on that order.
// ═══════════════════════════════════════════════════════════════════════

use crate::dice::DiceRoller;
use crate::registry::Registry;
use crate::types::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What happened in one battle round, for narration by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub attacker: usize,
    pub defender: usize,
    pub attack_roll: u8,
    pub defense_roll: u8,
    /// Defender lost a troop (the attacker won the round).
    pub defender_lost: bool,
    /// Attacker paid a troop for a repelled attack.
    pub attacker_lost: bool,
    pub territory_conquered: bool,
    /// Set only when `territory_conquered` is true.
    pub new_owner: Option<Faction>,
}

impl BattleOutcome {
    pub fn attacker_won(&self) -> bool {
        self.defender_lost
    }
}

/// Resolve one battle round and apply it to the registry.
///
/// Callers must run `validate::validate_attack` first: this assumes both
/// indices are in range, the owners differ and the attacker has at least
/// two troops. Only the two named records are mutated.
pub fn resolve_battle(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    dice: &mut impl DiceRoller,
    rules: &BattleRules,
) -> BattleOutcome {
    let attack_roll = dice.roll();
    let defense_roll = dice.roll();

    debug!(
        "battle: {} ({} troops) rolls {} vs {} ({} troops) rolls {}",
        registry.territory(attacker).name, registry.territory(attacker).troops, attack_roll,
        registry.territory(defender).name, registry.territory(defender).troops, defense_roll,
    );

    let mut outcome = BattleOutcome {
        attacker,
        defender,
        attack_roll,
        defense_roll,
        defender_lost: false,
        attacker_lost: false,
        territory_conquered: false,
        new_owner: None,
    };

    if rules.attacker_wins(attack_roll, defense_roll) {
        outcome.defender_lost = true;
        let def = registry.territory_mut(defender);
        def.troops = def.troops.saturating_sub(1);

        if def.troops == 0 {
            conquer(registry, attacker, defender);
            outcome.territory_conquered = true;
            outcome.new_owner = Some(registry.territory(defender).owner.clone());
        }
    } else if rules.failed_attack == FailedAttack::AttackerLosesTroop {
        let att = registry.territory_mut(attacker);
        // validation guarantees at least 2, so the attacker keeps one
        if att.troops > 1 {
            att.troops -= 1;
            outcome.attacker_lost = true;
        }
    }

    outcome
}

/// Hand an emptied territory to the attacker, moving one troop in.
fn conquer(registry: &mut Registry, attacker: usize, defender: usize) {
    let new_owner = registry.territory(attacker).owner.clone();
    info!(
        "{} conquered by {}",
        registry.territory(defender).name, new_owner
    );
    registry.set_owner(defender, new_owner);
    registry.set_troops(defender, 1);
    let att = registry.territory_mut(attacker);
    att.troops = att.troops.saturating_sub(1);
}
