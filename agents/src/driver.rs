// ═══════════════════════════════════════════════════════════════════════
// Session driver — runs a complete headless game with one commander
// ═══════════════════════════════════════════════════════════════════════

use crate::commander::Commander;
use log::debug;
use serde::Serialize;
use war_engine::dice::DiceRoller;
use war_engine::mission::Mission;
use war_engine::session::{CommandResult, GameSession};
use war_engine::types::*;

/// Summary of a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub commander: String,
    pub final_state: SessionState,
    pub mission: Mission,
    pub commands: usize,
    pub battles: u32,
    pub conquests: u32,
    pub rejected: u32,
    pub territories_held: usize,
    pub final_map: Vec<Territory>,
}

/// Feed commands from `commander` until the session ends.
/// `max_commands` guards against a commander that never quits.
pub fn run_session<D: DiceRoller>(
    session: &mut GameSession<D>,
    commander: &mut dyn Commander,
    max_commands: usize,
) -> Result<SessionResult, String> {
    let mut commands = 0;
    let mut conquests = 0;
    let mut rejected = 0;

    // a mission can already be fulfilled on the starting map
    session.check_victory();

    while !session.state().is_finished() {
        if commands >= max_commands {
            return Err(format!(
                "Session exceeded {} commands without finishing ({} battles)",
                max_commands, session.battles_fought()
            ));
        }

        let command = commander.next_command(&session.snapshot());
        let result = session.execute(command);
        commands += 1;

        match &result {
            CommandResult::Battle(outcome) if outcome.territory_conquered => conquests += 1,
            CommandResult::Rejected(e) => {
                debug!("{} command rejected: {}", commander.name(), e);
                rejected += 1;
            }
            _ => {}
        }
        commander.observe(&result);
    }

    Ok(SessionResult {
        commander: commander.name().to_string(),
        final_state: session.state(),
        mission: session.mission().clone(),
        commands,
        battles: session.battles_fought(),
        conquests,
        rejected,
        territories_held: session.registry().count_owned_by(session.player()),
        final_map: session.registry().territories().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RandomCommander, ScriptedCommander};
    use war_engine::registry::Registry;
    use war_engine::session::Command;
    use war_engine::{GameConfig, LoadedDice};

    fn scripted_session(rolls: &[u8]) -> GameSession<LoadedDice> {
        let registry = Registry::from_territories(vec![
            Territory::new("America", "Blue", 5),
            Territory::new("Brasil", "Blue", 3),
            Territory::new("Europa", "Green", 1),
            Territory::new("Asia", "Red", 4),
        ]);
        GameSession::with_mission(
            registry,
            Faction::from("Blue"),
            Mission::ConquerCount { target: 3 },
            BattleRules::default(),
            LoadedDice::new(rolls.iter().copied()),
        )
    }

    #[test]
    fn test_scripted_run_to_victory() {
        let mut session = scripted_session(&[6, 1]);
        let mut commander = ScriptedCommander::new([
            Command::Attack { attacker: 3, defender: 1 },
            Command::MissionStatus,
            Command::Attack { attacker: 1, defender: 3 },
            Command::Attack { attacker: 2, defender: 4 },
        ]);
        let result = run_session(&mut session, &mut commander, 100).unwrap();
        assert_eq!(result.final_state, SessionState::Won);
        assert_eq!(result.commands, 3);
        assert_eq!(result.rejected, 1);
        assert_eq!(result.conquests, 1);
        assert_eq!(result.territories_held, 3);
        assert_eq!(commander.remaining(), 1);
    }

    #[test]
    fn test_script_exhausted_aborts() {
        let mut session = scripted_session(&[]);
        let mut commander = ScriptedCommander::new(Vec::new());
        let result = run_session(&mut session, &mut commander, 100).unwrap();
        assert_eq!(result.final_state, SessionState::Aborted);
        assert_eq!(result.battles, 0);
    }

    #[test]
    fn test_command_limit() {
        let mut session = scripted_session(&[]);
        let mut commander = ScriptedCommander::new(vec![Command::MissionStatus; 10]);
        assert!(run_session(&mut session, &mut commander, 5).is_err());
    }

    #[test]
    fn test_mission_checks_do_not_count_as_battles() {
        let config = GameConfig::default();
        let (mut commands, mut battles) = (0, 0);
        for seed in 0..10 {
            let mut session = GameSession::new(&config, seed).unwrap();
            let mut commander = RandomCommander::new(seed).with_status_rate(0.5);
            let result = run_session(&mut session, &mut commander, 10_000).unwrap();
            assert!(result.final_state.is_finished());
            assert_eq!(result.rejected, 0);
            commands += result.commands;
            battles += result.battles as usize;
        }
        assert!(commands > battles);
    }

    #[test]
    fn test_random_games_finish() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let mut session = GameSession::new(&config, seed).unwrap();
            let mut commander = RandomCommander::new(seed);
            let result = run_session(&mut session, &mut commander, 10_000).unwrap();
            assert!(result.final_state.is_finished());
            assert!(result.final_map.iter().all(|t| t.troops >= 1));
        }
    }
}
