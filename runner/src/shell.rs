// ═══════════════════════════════════════════════════════════════════════
// Interactive shell — terminal prompt around a GameSession
//
// Reads menu choices and territory numbers line by line, hands them to
// the engine, and prints what comes back. Generic over reader/writer so
// it can be driven from a script as well as a terminal.
// ═══════════════════════════════════════════════════════════════════════

use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;
use war_engine::battle::BattleOutcome;
use war_engine::dice::DiceRoller;
use war_engine::error::AttackError;
use war_engine::session::{Command, CommandResult, GameSession, MissionStatus};
use war_engine::types::*;

pub fn print_map(out: &mut impl Write, territories: &[Territory]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===================================================")?;
    writeln!(out, "                  CURRENT MAP")?;
    writeln!(out, "===================================================")?;
    writeln!(out, "ID | {:<20} | {:<15} | Troops", "Territory", "Army")?;
    writeln!(out, "---------------------------------------------------")?;
    for (i, t) in territories.iter().enumerate() {
        writeln!(out, "{:<2} | {:<20} | {:<15} | {}", i + 1, t.name, t.owner.as_str(), t.troops)?;
    }
    writeln!(out, "===================================================")
}

/// `before` is the map as it stood when the attack was ordered.
fn print_battle(
    out: &mut impl Write,
    before: &[Territory],
    outcome: &BattleOutcome,
) -> io::Result<()> {
    let attacker = &before[outcome.attacker];
    let defender = &before[outcome.defender];
    writeln!(out)?;
    writeln!(
        out,
        ">>> Battle: {} ({} troops) attacks {} ({} troops) <<<",
        attacker.name, attacker.troops, defender.name, defender.troops
    )?;
    writeln!(out, "Attack rolled:  {}", outcome.attack_roll)?;
    writeln!(out, "Defense rolled: {}", outcome.defense_roll)?;
    if outcome.defender_lost {
        writeln!(out, "ATTACK WINS! The defender lost 1 troop.")?;
    } else if outcome.attacker_lost {
        writeln!(out, "DEFENSE WINS! The attacker lost 1 troop.")?;
    } else {
        writeln!(out, "DEFENSE WINS! The attack failed.")?;
    }
    if let Some(owner) = &outcome.new_owner {
        writeln!(out, "!!! {} CONQUERED BY {} !!!", defender.name, owner)?;
    }
    Ok(())
}

fn print_mission(out: &mut impl Write, status: &MissionStatus) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Your mission: {}", status.mission)?;
    if status.complete {
        writeln!(out, "Status: COMPLETE")
    } else {
        writeln!(out, "Status: not yet complete")
    }
}

/// Prompt and read one trimmed line. `None` on end of input.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    text: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// What the player typed for a territory number.
#[derive(Debug, PartialEq, Eq)]
enum TerritoryInput {
    Number(usize),
    TooLarge,
    NotANumber,
}

fn parse_territory(text: &str) -> TerritoryInput {
    match text.parse::<usize>() {
        Ok(n) => TerritoryInput::Number(n),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => TerritoryInput::TooLarge,
        Err(_) => TerritoryInput::NotANumber,
    }
}

fn prompt_number(
    input: &mut impl BufRead,
    out: &mut impl Write,
    text: &str,
) -> io::Result<Option<TerritoryInput>> {
    Ok(prompt(input, out, text)?.map(|s| parse_territory(&s)))
}

/// Run the menu loop until the player quits, wins, or input ends.
pub fn run_interactive<D: DiceRoller>(
    session: &mut GameSession<D>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<SessionState> {
    writeln!(out, "Welcome to WAR!")?;
    writeln!(out, "You command the {} army.", session.player())?;
    print_mission(out, &session.query_mission_status())?;

    session.check_victory();

    while !session.state().is_finished() {
        print_map(out, session.registry().territories())?;
        writeln!(out)?;
        writeln!(out, "Choose your action:")?;
        writeln!(out, "1. Attack")?;
        writeln!(out, "2. Check mission")?;
        writeln!(out, "0. Quit")?;

        let Some(choice) = prompt(input, out, "Option: ")? else {
            session.request_quit();
            break;
        };

        let command = match choice.as_str() {
            "1" => {
                let n = session.registry().len();
                let attack_prompt = format!("Attacking territory (1 to {}): ", n);
                let Some(attacker) = prompt_number(input, out, &attack_prompt)? else {
                    session.request_quit();
                    break;
                };
                let defend_prompt = format!("Defending territory (1 to {}): ", n);
                let Some(defender) = prompt_number(input, out, &defend_prompt)? else {
                    session.request_quit();
                    break;
                };
                match (attacker, defender) {
                    (TerritoryInput::Number(attacker), TerritoryInput::Number(defender)) => {
                        Command::Attack { attacker, defender }
                    }
                    (TerritoryInput::NotANumber, _) | (_, TerritoryInput::NotANumber) => {
                        writeln!(out, "\nError: please enter a territory number.")?;
                        continue;
                    }
                    _ => {
                        writeln!(out, "\nError: {}", AttackError::IndexOutOfRange)?;
                        continue;
                    }
                }
            }
            "2" => Command::MissionStatus,
            "0" => Command::Quit,
            _ => {
                writeln!(out, "\nInvalid option! Try again.")?;
                continue;
            }
        };

        let before = session.registry().territories().to_vec();
        match session.execute(command) {
            CommandResult::Battle(outcome) => print_battle(out, &before, &outcome)?,
            CommandResult::Rejected(e) => writeln!(out, "\nError: {}", e)?,
            CommandResult::Mission(status) => print_mission(out, &status)?,
            CommandResult::Quit => writeln!(out, "\nLeaving the game. Thanks for playing!")?,
        }
    }

    if session.state() == SessionState::Won {
        print_map(out, session.registry().territories())?;
        writeln!(out, "\nMISSION COMPLETE: {}", session.mission())?;
        writeln!(out, "You won after {} battles!", session.battles_fought())?;
    }
    Ok(session.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use war_engine::mission::Mission;
    use war_engine::registry::Registry;
    use war_engine::LoadedDice;

    fn session(rolls: &[u8]) -> GameSession<LoadedDice> {
        GameSession::with_mission(
            Registry::from_territories(vec![
                Territory::new("America", "Blue", 5),
                Territory::new("Brasil", "Blue", 3),
                Territory::new("Europa", "Green", 1),
            ]),
            Faction::from("Blue"),
            Mission::ConquerCount { target: 3 },
            BattleRules::default(),
            LoadedDice::new(rolls.iter().copied()),
        )
    }

    fn play(session: &mut GameSession<LoadedDice>, script: &str) -> (SessionState, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let state = run_interactive(session, &mut input, &mut out).unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_attack_to_victory() {
        let mut s = session(&[6, 1]);
        let (state, text) = play(&mut s, "9\n1\n1\n1\n1\n1\n3\n");
        assert_eq!(state, SessionState::Won);
        assert!(text.contains("Invalid option"));
        assert!(text.contains("cannot attack itself"));
        assert!(text.contains("America (5 troops) attacks Europa (1 troops)"));
        assert!(text.contains("Europa CONQUERED BY Blue"));
        assert!(text.contains("MISSION COMPLETE"));
    }

    #[test]
    fn test_quit_and_eof() {
        let mut s = session(&[]);
        let (state, text) = play(&mut s, "2\n0\n");
        assert_eq!(state, SessionState::Aborted);
        assert!(text.contains("Control at least 3 territories"));

        let mut s = session(&[]);
        let (state, _) = play(&mut s, "1\n");
        assert_eq!(state, SessionState::Aborted);
    }

    #[test]
    fn test_non_numeric_territory() {
        let mut s = session(&[]);
        let (_, text) = play(&mut s, "1\nabc\n3\n0\n");
        assert!(text.contains("please enter a territory number"));
        assert_eq!(s.battles_fought(), 0);
    }

    #[test]
    fn test_oversized_territory_number_is_out_of_range() {
        assert_eq!(parse_territory("3"), TerritoryInput::Number(3));
        assert_eq!(parse_territory("99999999999999999999"), TerritoryInput::TooLarge);
        assert_eq!(parse_territory("-1"), TerritoryInput::NotANumber);

        let mut s = session(&[]);
        let (_, text) = play(&mut s, "1\n99999999999999999999\n3\n0\n");
        assert!(text.contains("territory number out of range"));
        assert!(!text.contains("please enter a territory number"));
        assert_eq!(s.battles_fought(), 0);
    }
}
