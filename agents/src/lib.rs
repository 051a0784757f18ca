pub mod commander;
pub mod random;
pub mod scripted;
pub mod driver;

pub use commander::Commander;
pub use random::RandomCommander;
pub use scripted::ScriptedCommander;
pub use driver::{run_session, SessionResult};
