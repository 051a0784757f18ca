// ═══════════════════════════════════════════════════════════════════════
// Attack validation — preconditions checked before any dice are rolled
// ═══════════════════════════════════════════════════════════════════════

use crate::error::AttackError;
use crate::registry::Registry;
use crate::types::*;

/// Check whether `attacker` may attack `defender` (0-based indices).
///
/// Checks run in a fixed order and the first failure is reported:
/// range, self-attack, player ownership, friendly fire, troop count.
/// Passing `None` as the player faction skips the ownership check.
pub fn validate_attack(
    registry: &Registry,
    attacker: usize,
    defender: usize,
    player: Option<&Faction>,
) -> Result<(), AttackError> {
    let (Some(att), Some(def)) = (registry.get(attacker), registry.get(defender)) else {
        return Err(AttackError::IndexOutOfRange);
    };

    if attacker == defender {
        return Err(AttackError::SelfAttack);
    }

    if let Some(player) = player {
        if !att.is_owned_by(player) {
            return Err(AttackError::NotOwnedByPlayer);
        }
    }

    if att.owner == def.owner {
        return Err(AttackError::FriendlyFire);
    }

    if att.troops < MIN_ATTACKING_TROOPS {
        return Err(AttackError::InsufficientTroops);
    }

    Ok(())
}

/// All `(attacker, defender)` index pairs that would pass validation.
pub fn legal_attacks(registry: &Registry, player: Option<&Faction>) -> Vec<(usize, usize)> {
    let n = registry.len();
    (0..n)
        .flat_map(|a| (0..n).map(move |d| (a, d)))
        .filter(|&(a, d)| validate_attack(registry, a, d, player).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue() -> Faction {
        Faction::from("Blue")
    }

    fn sample() -> Registry {
        Registry::from_territories(vec![
            Territory::new("Alaska", "Blue", 5),
            Territory::new("Brasil", "Blue", 1),
            Territory::new("Europa", "Green", 3),
            Territory::new("Asia", "Red", 4),
        ])
    }

    #[test]
    fn test_valid_attack() {
        assert_eq!(validate_attack(&sample(), 0, 2, Some(&blue())), Ok(()));
    }

    #[test]
    fn test_range_checked_first() {
        let reg = sample();
        assert_eq!(validate_attack(&reg, 4, 4, Some(&blue())), Err(AttackError::IndexOutOfRange));
        assert_eq!(validate_attack(&reg, 0, 9, Some(&blue())), Err(AttackError::IndexOutOfRange));
    }

    #[test]
    fn test_self_attack_before_ownership() {
        // Europa is not the player's, but self-attack is reported first
        assert_eq!(validate_attack(&sample(), 2, 2, Some(&blue())), Err(AttackError::SelfAttack));
    }

    #[test]
    fn test_ownership_before_friendly_fire() {
        let reg = sample();
        assert_eq!(validate_attack(&reg, 2, 3, Some(&blue())), Err(AttackError::NotOwnedByPlayer));
        assert_eq!(validate_attack(&reg, 0, 1, Some(&blue())), Err(AttackError::FriendlyFire));
    }

    #[test]
    fn test_friendly_fire_before_troops() {
        // Brasil has 1 troop and targets its own side
        assert_eq!(validate_attack(&sample(), 1, 0, Some(&blue())), Err(AttackError::FriendlyFire));
        assert_eq!(
            validate_attack(&sample(), 1, 2, Some(&blue())),
            Err(AttackError::InsufficientTroops)
        );
    }

    #[test]
    fn test_no_player_faction_allows_any_attacker() {
        let reg = sample();
        assert_eq!(validate_attack(&reg, 2, 3, None), Ok(()));
        assert_eq!(validate_attack(&reg, 2, 3, Some(&blue())), Err(AttackError::NotOwnedByPlayer));
    }

    #[test]
    fn test_legal_attacks_for_player() {
        let pairs = legal_attacks(&sample(), Some(&blue()));
        assert_eq!(pairs, vec![(0, 2), (0, 3)]);
    }
}
