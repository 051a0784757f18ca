// ═══════════════════════════════════════════════════════════════════════
// Game Session — orchestrates attacks, battles and the mission check
//
// Architecture:
//   The session is a pure state machine. It never does I/O. The shell
//   (interactive prompt, scripted commander, random commander) feeds it
//   commands and renders what comes back.
//
// Flow per attack command:
//   1. session over?           → AttackError::SessionOver
//   2. validate_attack()       → AttackError, registry untouched
//   3. resolve_battle()        → BattleOutcome, registry mutated
//   4. is_mission_complete()   → state becomes Won
// ═══════════════════════════════════════════════════════════════════════

use crate::battle::{resolve_battle, BattleOutcome};
use crate::dice::{DiceRoller, SeededDice};
use crate::error::{AttackError, SetupError};
use crate::mission::{assign_random_mission, is_mission_complete, Mission};
use crate::registry::Registry;
use crate::setup::GameConfig;
use crate::types::*;
use crate::validate::validate_attack;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Commands the shell can send to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Attack using 1-based territory numbers, as shown to the user.
    Attack { attacker: usize, defender: usize },
    MissionStatus,
    Quit,
}

/// What a command did, for the shell to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Battle(BattleOutcome),
    Rejected(AttackError),
    Mission(MissionStatus),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionStatus {
    pub mission: Mission,
    pub complete: bool,
}

/// Everything the shell needs to draw a turn. Plain data, no engine handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub player: Faction,
    pub mission: Mission,
    pub mission_complete: bool,
    pub battles_fought: u32,
    pub territories: Vec<Territory>,
}

#[derive(Debug, Clone)]
pub struct GameSession<D: DiceRoller = SeededDice> {
    registry: Registry,
    player: Faction,
    mission: Mission,
    rules: BattleRules,
    dice: D,
    state: SessionState,
    battles_fought: u32,
}

impl GameSession<SeededDice> {
    /// Build the map from `config`, draw a mission and seed the dice.
    /// Mission assignment and dice share one ChaCha8 stream, so the
    /// whole game is reproducible from `seed`.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, SetupError> {
        let registry = config.build_registry()?;
        let player = config.player();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mission = assign_random_mission(&mut rng, &registry, &player, config.conquer_target);
        info!(
            "new session: {} territories, player {}, seed {}",
            registry.len(), player, seed
        );
        Ok(GameSession::with_mission(
            registry,
            player,
            mission,
            config.rules,
            SeededDice::from_rng(rng),
        ))
    }
}

impl<D: DiceRoller> GameSession<D> {
    /// Start a session with a known mission and dice source.
    pub fn with_mission(
        registry: Registry,
        player: Faction,
        mission: Mission,
        rules: BattleRules,
        dice: D,
    ) -> Self {
        GameSession {
            registry,
            player,
            mission,
            rules,
            dice,
            state: SessionState::InProgress,
            battles_fought: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn player(&self) -> &Faction {
        &self.player
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn battles_fought(&self) -> u32 {
        self.battles_fought
    }

    /// Attack with 1-based territory numbers.
    pub fn submit_attack(
        &mut self,
        attacker_id: usize,
        defender_id: usize,
    ) -> Result<BattleOutcome, AttackError> {
        if self.state.is_finished() {
            return Err(AttackError::SessionOver);
        }
        let ids = (attacker_id.checked_sub(1), defender_id.checked_sub(1));
        let (Some(attacker), Some(defender)) = ids else {
            return Err(AttackError::IndexOutOfRange);
        };
        self.attack(attacker, defender)
    }

    /// Attack with 0-based registry indices.
    pub fn attack(
        &mut self,
        attacker: usize,
        defender: usize,
    ) -> Result<BattleOutcome, AttackError> {
        if self.state.is_finished() {
            return Err(AttackError::SessionOver);
        }
        validate_attack(&self.registry, attacker, defender, Some(&self.player))?;

        let outcome =
            resolve_battle(&mut self.registry, attacker, defender, &mut self.dice, &self.rules);
        self.battles_fought += 1;
        self.check_victory();
        Ok(outcome)
    }

    /// Apply one shell command.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        match command {
            Command::Attack { attacker, defender } => match self.submit_attack(attacker, defender) {
                Ok(outcome) => CommandResult::Battle(outcome),
                Err(e) => CommandResult::Rejected(e),
            },
            Command::MissionStatus => CommandResult::Mission(self.query_mission_status()),
            Command::Quit => {
                self.request_quit();
                CommandResult::Quit
            }
        }
    }

    pub fn query_mission_status(&self) -> MissionStatus {
        MissionStatus {
            mission: self.mission.clone(),
            complete: is_mission_complete(&self.registry, &self.mission, &self.player),
        }
    }

    /// Re-evaluate the mission and move to Won if it is fulfilled.
    /// Runs after every battle; the shell may also call it right after
    /// setup to catch a mission that starts out complete.
    pub fn check_victory(&mut self) -> SessionState {
        if self.state == SessionState::InProgress
            && is_mission_complete(&self.registry, &self.mission, &self.player)
        {
            info!("mission complete: {}", self.mission);
            self.state = SessionState::Won;
        }
        self.state
    }

    /// End the game at the player's request. A won game stays won.
    pub fn request_quit(&mut self) {
        if self.state == SessionState::InProgress {
            info!("player quit after {} battles", self.battles_fought);
            self.state = SessionState::Aborted;
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            player: self.player.clone(),
            mission: self.mission.clone(),
            mission_complete: self.query_mission_status().complete,
            battles_fought: self.battles_fought,
            territories: self.registry.territories().to_vec(),
        }
    }
}
