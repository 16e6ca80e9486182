//! Simple interactive CLI mode
//!
//! Line-based play without the TUI. Reads commands from any `BufRead` and
//! writes to any `Write`, so the whole loop can be driven from a script.

use crate::catalog::Catalog;
use crate::core::{GuessOutcome, MAX_LIVES, MAX_SELECTED, Session};
use crate::output::{write_found_groups, write_session};
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    NewGame,
    Help,
    Board,
    Deselect,
    Submit,
    /// One or more comma-separated words to toggle
    Toggle(Vec<String>),
    Empty,
}

impl Command {
    /// Parse a line
    ///
    /// A line naming a puzzle word toggles that word even when it spells a
    /// command. A leading `/` always reads the rest as a command.
    fn parse(line: &str, catalog: &Catalog) -> Self {
        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix('/') {
            return Self::keyword(command.trim()).unwrap_or(Self::Help);
        }
        if catalog.resolve(trimmed).is_some() {
            return Self::Toggle(vec![trimmed.to_string()]);
        }

        Self::keyword(trimmed).unwrap_or_else(|| {
            Self::Toggle(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        })
    }

    fn keyword(text: &str) -> Option<Self> {
        let command = match text.to_lowercase().as_str() {
            "" => Self::Empty,
            "quit" | "q" | "exit" => Self::Quit,
            "new" | "n" => Self::NewGame,
            "help" | "h" | "?" => Self::Help,
            "board" | "b" => Self::Board,
            "deselect" | "d" | "clear" => Self::Deselect,
            "submit" | "s" => Self::Submit,
            _ => return None,
        };
        Some(command)
    }
}

/// Run the simple interactive CLI mode
///
/// Returns when the player quits or the input ends.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║                 Connections - Simple Mode                    ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝")?;
    writeln!(out, "\nCreate four groups of four!")?;
    write_help(&mut out)?;
    write_session(&mut out, session)?;

    loop {
        if session.is_over() {
            write_game_over(&mut out, session)?;

            let Some(answer) = prompt(&mut input, &mut out, "Play again? (yes/no)")? else {
                return Ok(());
            };
            if matches!(answer.to_lowercase().as_str(), "yes" | "y") {
                session.reset();
                writeln!(out, "\n🔄 New game started!")?;
                write_session(&mut out, session)?;
                continue;
            }
            writeln!(out, "\n👋 Thanks for playing!\n")?;
            return Ok(());
        }

        let Some(line) = prompt(&mut input, &mut out, "Word(s) or command")? else {
            return Ok(());
        };

        match Command::parse(&line, session.catalog()) {
            Command::Empty => {}
            Command::Quit => {
                writeln!(out, "\n👋 Thanks for playing!\n")?;
                return Ok(());
            }
            Command::NewGame => {
                session.reset();
                writeln!(out, "\n🔄 New game started!")?;
                write_session(&mut out, session)?;
            }
            Command::Help => write_help(&mut out)?,
            Command::Board => write_session(&mut out, session)?,
            Command::Deselect => {
                session.deselect_all();
                writeln!(out, "Selection cleared.")?;
            }
            Command::Submit => submit(session, &mut out)?,
            Command::Toggle(words) => {
                for word in &words {
                    if !session.toggle_select(word) {
                        let reason = match session.catalog().group_of(word) {
                            None => "is not on the board",
                            Some(group) if session.found_group_indices().contains(&group) => {
                                "has already been found"
                            }
                            Some(_) => "can't be added, four words are already selected",
                        };
                        writeln!(out, "{}", format!("'{word}' {reason}").yellow())?;
                    }
                }
                write_selection(&mut out, session)?;
            }
        }
    }
}

fn submit<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    if session.selected().len() != MAX_SELECTED {
        writeln!(
            out,
            "{}",
            format!("Select {MAX_SELECTED} words before submitting.").yellow()
        )?;
        return Ok(());
    }

    if session.is_already_guessed() {
        writeln!(out, "{}", "Already guessed!".yellow())?;
        return Ok(());
    }

    match session.submit_guess() {
        Some(GuessOutcome::Correct {
            group_index,
            is_final,
        }) => {
            if let Some(group) = session.catalog().group(group_index) {
                writeln!(
                    out,
                    "\n✨ {} {}",
                    "Correct!".green().bold(),
                    group.category().bright_white().bold()
                )?;
            }
            if !is_final {
                write_session(out, session)?;
            }
        }
        Some(GuessOutcome::Incorrect { one_away, .. }) => {
            if one_away {
                writeln!(out, "{}", "One away...".bright_yellow().bold())?;
            } else {
                writeln!(out, "{}", "Incorrect.".red().bold())?;
            }
            if session.is_playing() {
                write_session(out, session)?;
            }
        }
        None => {}
    }
    Ok(())
}

fn write_selection<W: Write>(out: &mut W, session: &Session) -> Result<()> {
    let mut words: Vec<&str> = session.selected().iter().map(String::as_str).collect();
    words.sort_unstable();
    writeln!(
        out,
        "Selected {}/{MAX_SELECTED}: {}",
        words.len(),
        words.join(", ").bright_white().bold()
    )?;
    Ok(())
}

fn write_game_over<W: Write>(out: &mut W, session: &Session) -> Result<()> {
    writeln!(out, "\n{}", "═".repeat(62).bright_cyan())?;
    if session.is_won() {
        writeln!(out, "{}", "  🎉 Congratulations! 🎉".bright_green().bold())?;
        writeln!(
            out,
            "  You found all the connections with {} of {MAX_LIVES} mistakes used.",
            session.mistakes_made()
        )?;
    } else {
        writeln!(out, "{}", "  Game Over".bright_red().bold())?;
        writeln!(out, "  Coal for you!")?;
    }
    writeln!(out, "{}\n", "═".repeat(62).bright_cyan())?;
    write_found_groups(out, session)?;
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\nType a word to select or deselect it (several: 'PYRY, SIPSU').")?;
    writeln!(
        out,
        "Commands: 's' submit, 'd' deselect all, 'b' board, 'n' new game, 'h' help, 'q' quit"
    )?;
    writeln!(out, "Prefix a command with '/' if a puzzle word has the same name.")?;
    Ok(())
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "\n{text}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::letter_puzzle;
    use crate::core::{Group, GroupColor};
    use std::io::Cursor;

    fn play(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run_simple(session, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        let catalog = letter_puzzle();
        assert_eq!(Command::parse("  Q ", &catalog), Command::Quit);
        assert_eq!(Command::parse("submit", &catalog), Command::Submit);
        assert_eq!(Command::parse("", &catalog), Command::Empty);
        assert_eq!(Command::parse("/D", &catalog), Command::Deselect);
        assert_eq!(Command::parse("/what", &catalog), Command::Help);
        assert_eq!(
            Command::parse("pyry, petteri punakuono ,", &catalog),
            Command::Toggle(vec!["pyry".into(), "petteri punakuono".into()])
        );
    }

    #[test]
    fn correct_group_from_script() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let output = play(&mut session, "a1, a2, a3\na4\ns\nq\n");

        assert!(output.contains("Correct!"));
        assert!(output.contains("GROUP A"));
        assert_eq!(session.found_group_indices(), &[0]);
        assert!(session.selected().is_empty());
    }

    #[test]
    fn one_away_and_repeat_guess() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let output = play(&mut session, "a1,a2,a3,b1\ns\ns\nq\n");

        assert!(output.contains("One away..."));
        assert!(output.contains("Already guessed!"));
        // The repeat was refused before reaching the session
        assert_eq!(session.lives_remaining(), MAX_LIVES - 1);
    }

    #[test]
    fn rejects_unknown_and_found_words() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let output = play(&mut session, "zebra\na1,a2,a3,a4\ns\na1\nsubmit\nq\n");

        assert!(output.contains("'zebra' is not on the board"));
        assert!(output.contains("'a1' has already been found"));
        assert!(output.contains("Select 4 words before submitting."));
    }

    fn keyword_puzzle() -> Catalog {
        let groups = [
            ("COMMANDS", ["CLEAR", "BOARD", "HELP", "EXIT"]),
            ("LETTERS", ["N", "S", "D", "Q"]),
            ("PUNCTUATION", ["A, B", "DOT", "DASH", "COLON"]),
            ("OTHER", ["new", "submit", "quit", "deselect"]),
        ];
        Catalog::new(
            groups
                .into_iter()
                .map(|(category, words)| {
                    Group::new(category, words, GroupColor::new(GroupColor::BLUE))
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn puzzle_words_take_precedence_over_commands() {
        let catalog = keyword_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        play(&mut session, "clear\nboard\nhelp\na, b\n");

        assert_eq!(session.selected().len(), 4);
        for word in ["CLEAR", "BOARD", "HELP", "A, B"] {
            assert!(session.is_selected(word), "{word} not selected");
        }
    }

    #[test]
    fn keyword_named_puzzle_can_be_won() {
        let catalog = keyword_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let script = "clear\nboard\nhelp\nexit\n/submit\n\
                      n\ns\nd\nq\n/s\n\
                      a, b\ndot, dash, colon\n/submit\n\
                      new, submit, quit, deselect\n/ submit\n";
        let output = play(&mut session, script);

        assert!(session.is_won());
        assert!(output.contains("with 0 of 5 mistakes used"));
    }

    #[test]
    fn found_word_is_reported_as_found_even_with_full_selection() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let output = play(&mut session, "a1,a2,a3,a4\ns\nb1,b2,b3,c1\na2\nq\n");

        assert!(output.contains("'a2' has already been found"));
        assert!(!output.contains("four words are already selected"));
    }

    #[test]
    fn losing_then_declining_replay() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let mut script = String::new();
        for guess in ["a1,b1,c1,d1", "a2,b2,c2,d2", "a3,b3,c3,d3", "a4,b4,c4,d4", "a1,a2,b3,b4"] {
            script.push_str(&format!("d\n{guess}\ns\n"));
        }
        script.push_str("no\n");

        let output = play(&mut session, &script);

        assert!(output.contains("Game Over"));
        assert!(output.contains("Thanks for playing!"));
        assert_eq!(session.lives_remaining(), 0);
        assert_eq!(session.found_group_indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn winning_then_replaying() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        let script = "a1,a2,a3,a4\ns\nb1,b2,b3,b4\ns\nc1,c2,c3,c4\ns\nd1,d2,d3,d4\ns\ny\nq\n";
        let output = play(&mut session, script);

        assert!(output.contains("Congratulations!"));
        assert!(output.contains("New game started!"));
        assert!(session.is_playing());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 1);

        play(&mut session, "a1\n");
        assert!(session.is_selected("a1"));
    }
}
