// ═══════════════════════════════════════════════════════════════════════
// Commander trait — anything that issues commands to a session
//
// Commanders only receive a `SessionSnapshot`, never the session itself,
// so they cannot touch the map or the dice directly. The interactive
// shell in the runner is the human counterpart of these.
// ═══════════════════════════════════════════════════════════════════════

use war_engine::session::{Command, CommandResult, SessionSnapshot};

pub trait Commander: Send {
    /// Human-readable name, e.g. "Random".
    fn name(&self) -> &str;

    /// Next command to submit given the current snapshot.
    fn next_command(&mut self, view: &SessionSnapshot) -> Command;

    /// Called with the result of every command. Default ignores it.
    fn observe(&mut self, _result: &CommandResult) {}
}
