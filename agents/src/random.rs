// ═══════════════════════════════════════════════════════════════════════
// Random Commander — attacks with a random legal pair every turn.
// Baseline for headless simulation and for soak-testing the engine.
// ═══════════════════════════════════════════════════════════════════════

use crate::commander::Commander;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use war_engine::registry::Registry;
use war_engine::session::{Command, SessionSnapshot};
use war_engine::validate::legal_attacks;

pub struct RandomCommander {
    rng: ChaCha8Rng,
    /// Chance of checking the mission instead of attacking.
    status_rate: f64,
}

impl RandomCommander {
    pub fn new(seed: u64) -> Self {
        RandomCommander {
            rng: ChaCha8Rng::seed_from_u64(seed),
            status_rate: 0.0,
        }
    }

    pub fn with_status_rate(mut self, rate: f64) -> Self {
        self.status_rate = rate.clamp(0.0, 1.0);
        self
    }
}

impl Commander for RandomCommander {
    fn name(&self) -> &str { "Random" }

    fn next_command(&mut self, view: &SessionSnapshot) -> Command {
        if self.status_rate > 0.0 && self.rng.gen_bool(self.status_rate) {
            return Command::MissionStatus;
        }

        let registry = Registry::from_territories(view.territories.clone());
        let pairs = legal_attacks(&registry, Some(&view.player));
        match pairs.choose(&mut self.rng) {
            // 1-based, as a person would type them
            Some(&(a, d)) => Command::Attack { attacker: a + 1, defender: d + 1 },
            None => Command::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use war_engine::{GameConfig, GameSession};

    #[test]
    fn test_random_commander_only_issues_legal_attacks() {
        let mut session = GameSession::new(&GameConfig::default(), 1).unwrap();
        let mut commander = RandomCommander::new(1);
        for _ in 0..50 {
            if session.state().is_finished() {
                break;
            }
            match commander.next_command(&session.snapshot()) {
                Command::Attack { attacker, defender } => {
                    assert!(session.submit_attack(attacker, defender).is_ok());
                }
                Command::Quit => break,
                Command::MissionStatus => panic!("mission checks are off by default"),
            }
        }
    }

    #[test]
    fn test_status_rate_mixes_in_mission_checks() {
        let session = GameSession::new(&GameConfig::default(), 4).unwrap();
        let view = session.snapshot();

        // out-of-range rates are clamped
        let mut always = RandomCommander::new(4).with_status_rate(7.0);
        assert_eq!(always.next_command(&view), Command::MissionStatus);

        let mut sometimes = RandomCommander::new(4).with_status_rate(0.5);
        let issued: Vec<Command> = (0..100).map(|_| sometimes.next_command(&view)).collect();
        assert!(issued.contains(&Command::MissionStatus));
        assert!(issued.iter().any(|c| matches!(c, Command::Attack { .. })));
    }

    #[test]
    fn test_quits_without_legal_attacks() {
        let config = GameConfig::from_json(r#"{
            "territories": [
                { "name": "America", "owner": "Blue", "troops": 1 },
                { "name": "Europa", "owner": "Green", "troops": 3 }
            ],
            "conquer_target": 2
        }"#).unwrap();
        let session = GameSession::new(&config, 3).unwrap();
        let mut commander = RandomCommander::new(3);
        assert_eq!(commander.next_command(&session.snapshot()), Command::Quit);
    }
}
