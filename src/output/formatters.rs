//! Formatting utilities for terminal output

use crate::core::{Group, GroupColor};
use colored::{ColoredString, Colorize};

/// Fallback when a group color token can't be decoded
const NEUTRAL_RGB: (u8, u8, u8) = (0xbb, 0xbb, 0xbb);

/// RGB for a group color, falling back to a neutral grey
#[must_use]
pub fn group_rgb(color: &GroupColor) -> (u8, u8, u8) {
    color.rgb().unwrap_or(NEUTRAL_RGB)
}

/// Lives as filled and hollow dots, e.g. `●●●○○`
///
/// # Examples
/// ```
/// use connections::output::formatters::lives_dots;
///
/// assert_eq!(lives_dots(3, 5), "●●●○○");
/// ```
#[must_use]
pub fn lives_dots(lives: u8, max: u8) -> String {
    let lives = lives.min(max);
    format!(
        "{}{}",
        "●".repeat(usize::from(lives)),
        "○".repeat(usize::from(max - lives))
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One found group as a colored band: category on the first line, words below
#[must_use]
pub fn group_band(group: &Group) -> (ColoredString, ColoredString) {
    let (r, g, b) = group_rgb(group.color());
    let category = format!(" {} ", group.category())
        .black()
        .bold()
        .on_truecolor(r, g, b);
    let words = format!(" {} ", group.words().join(", "))
        .black()
        .on_truecolor(r, g, b);
    (category, words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_dots_full_and_empty() {
        assert_eq!(lives_dots(5, 5), "●●●●●");
        assert_eq!(lives_dots(0, 5), "○○○○○");
    }

    #[test]
    fn lives_dots_clamps_to_max() {
        assert_eq!(lives_dots(9, 3), "●●●");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn group_rgb_falls_back_to_neutral() {
        assert_eq!(group_rgb(&GroupColor::new("not a color")), NEUTRAL_RGB);
        assert_eq!(
            group_rgb(&GroupColor::new(GroupColor::PURPLE)),
            (0xba, 0x81, 0xc5)
        );
    }

    #[test]
    fn group_band_contains_text() {
        let group = Group::new("BIRDS", ["owl", "jay", "wren", "crow"], GroupColor::new("#ffffff"));
        let (category, words) = group_band(&group);

        assert!(category.to_string().contains("BIRDS"));
        assert!(words.to_string().contains("owl, jay, wren, crow"));
    }
}
