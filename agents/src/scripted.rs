// ═══════════════════════════════════════════════════════════════════════
// Scripted Commander — replays a fixed list of commands, then quits.
// ═══════════════════════════════════════════════════════════════════════

use crate::commander::Commander;
use std::collections::VecDeque;
use war_engine::session::{Command, SessionSnapshot};

pub struct ScriptedCommander {
    script: VecDeque<Command>,
}

impl ScriptedCommander {
    pub fn new(script: impl IntoIterator<Item = Command>) -> Self {
        ScriptedCommander {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Commander for ScriptedCommander {
    fn name(&self) -> &str { "Scripted" }

    fn next_command(&mut self, _view: &SessionSnapshot) -> Command {
        self.script.pop_front().unwrap_or(Command::Quit)
    }
}
