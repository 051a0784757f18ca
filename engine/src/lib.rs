pub mod types;
pub mod error;
pub mod registry;
pub mod dice;
pub mod validate;
pub mod battle;
pub mod mission;
pub mod setup;
pub mod session;


pub use types::*;
pub use error::{AttackError, SetupError};
pub use registry::Registry;
pub use dice::{DiceRoller, LoadedDice, SeededDice};
pub use battle::BattleOutcome;
pub use mission::Mission;
pub use setup::GameConfig;
pub use session::{Command, CommandResult, GameSession, MissionStatus, SessionSnapshot};
