//! Display functions for line-mode play and command results

use super::formatters::{group_band, lives_dots};
use crate::catalog::Catalog;
use crate::core::{MAX_LIVES, MAX_SELECTED, Session};
use colored::Colorize;
use std::io::{self, Write};

/// Words per board row
const BOARD_COLUMNS: usize = 4;

/// Write every found group as a colored band
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_found_groups<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    for group in session.found_groups() {
        let (category, words) = group_band(group);
        writeln!(out, "  {category}")?;
        writeln!(out, "  {words}")?;
    }
    Ok(())
}

/// Write the remaining words in rows, selected words highlighted
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_board<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    let remaining: Vec<&str> = session
        .remaining_words()
        .map(|entry| entry.word.as_str())
        .collect();
    let width = remaining.iter().map(|w| w.chars().count()).max().unwrap_or(0) + 2;

    for row in remaining.chunks(BOARD_COLUMNS) {
        let mut line = String::from(" ");
        for &word in row {
            let cell = format!("{word:^width$}");
            if session.is_selected(word) {
                line.push_str(&format!(" {}", cell.black().on_bright_white().bold()));
            } else {
                line.push_str(&format!(" {}", cell.bright_white().on_black()));
            }
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Write the selection count and remaining mistakes
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_status<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(
        out,
        "  Selected {}/{MAX_SELECTED}   Mistakes remaining: {}",
        session.selected().len(),
        lives_dots(session.lives_remaining(), MAX_LIVES).bright_red()
    )
}

/// Write found groups, board and status
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_session<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out)?;
    write_found_groups(out, session)?;
    if session.is_playing() {
        write_board(out, session)?;
    }
    writeln!(out)?;
    write_status(out, session)
}

/// Print a summary of a puzzle, optionally with every group revealed
pub fn print_catalog(catalog: &Catalog, reveal: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "{} {} groups, {} words",
        "Puzzle OK:".green().bold(),
        catalog.groups().len(),
        catalog.word_count()
    );
    println!("{}", "─".repeat(60).cyan());

    if reveal {
        for (index, group) in catalog.groups().iter().enumerate() {
            let (category, words) = group_band(group);
            println!("\n  {}. {category}", index + 1);
            println!("     {words}");
        }
    } else {
        println!("\nRun with --reveal to show the groups (spoilers!)");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::letter_puzzle;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn board_lists_remaining_words_in_rows() {
        let catalog = letter_puzzle();
        let session = Session::seeded(&catalog, 3);

        let text = render(|out| write_board(out, &session));

        assert_eq!(text.lines().count(), 4);
        for entry in session.board() {
            assert!(text.contains(&entry.word));
        }
    }

    #[test]
    fn found_groups_replace_board_rows() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 3);
        for word in ["b1", "b2", "b3", "b4"] {
            session.toggle_select(word);
        }
        session.submit_guess();

        let board = render(|out| write_board(out, &session));
        let groups = render(|out| write_found_groups(out, &session));

        assert_eq!(board.lines().count(), 3);
        assert!(!board.contains("b1"));
        assert!(groups.contains("GROUP B"));
        assert!(groups.contains("b1, b2, b3, b4"));
    }

    #[test]
    fn status_shows_selection_and_lives() {
        let catalog = letter_puzzle();
        let mut session = Session::seeded(&catalog, 3);
        session.toggle_select("a1");
        session.toggle_select("c2");

        let text = render(|out| write_status(out, &session));

        assert!(text.contains("Selected 2/4"));
        assert!(text.contains("●●●●●"));
    }
}
