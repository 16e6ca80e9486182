//! TUI application state and logic
//!
//! The app wraps one [`Session`] and owns everything the session doesn't:
//! cursor position, the message log, and the transient feedback (toast,
//! shake, snow). Feedback is cleared by timers that remember the session
//! generation they were scheduled in; a timer that outlives a reset is
//! dropped without touching the new game.

use crate::core::{GuessOutcome, MAX_SELECTED, Session};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Columns in the word grid
pub const GRID_COLUMNS: usize = 4;

pub const TOAST_DURATION: Duration = Duration::from_millis(2000);
pub const SHAKE_DURATION: Duration = Duration::from_millis(2000);
pub const SNOW_DURATION: Duration = Duration::from_millis(4500);

const SNOWFLAKE_COUNT: usize = 40;

/// Redraw interval while an animation is running
const ANIMATION_FRAME: Duration = Duration::from_millis(50);
/// Longest wait for input when nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state
pub struct App<'a> {
    pub session: Session<'a>,
    pub cursor: usize,
    pub messages: Vec<Message>,
    pub toast: Option<String>,
    pub shaking: bool,
    pub snow: Option<Snowfall>,
    pub timers: Vec<FeedbackTimer>,
    pub stats: Statistics,
    pub should_quit: bool,
    effects_rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Toast,
    Shake,
    Snow,
}

/// A pending "clear this feedback" callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTimer {
    pub kind: FeedbackKind,
    pub deadline: Instant,
    /// Session generation the timer belongs to
    pub generation: u64,
}

/// Falling snow shown after a correct guess
#[derive(Debug, Clone)]
pub struct Snowfall {
    pub started: Instant,
    pub flakes: Vec<Snowflake>,
}

#[derive(Debug, Clone, Copy)]
pub struct Snowflake {
    /// Horizontal position as a fraction of the width
    pub left: f64,
    /// Seconds before the flake starts falling
    pub delay: f64,
    /// Seconds to fall the full height
    pub duration: f64,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(session: Session<'a>) -> Self {
        Self {
            session,
            cursor: 0,
            messages: vec![
                Message {
                    text: "Create four groups of four!".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Arrows move, Space selects, Enter submits".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            toast: None,
            shaking: false,
            snow: None,
            timers: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            effects_rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.session.remaining_words().count()
    }

    /// The word under the cursor
    #[must_use]
    pub fn cursor_word(&self) -> Option<&str> {
        self.session
            .remaining_words()
            .nth(self.cursor)
            .map(|entry| entry.word.as_str())
    }

    /// Move the cursor within the grid, clamping at the edges
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let count = self.remaining_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }

        let columns = GRID_COLUMNS as isize;
        let rows = count.div_ceil(GRID_COLUMNS) as isize;
        let row = (self.cursor / GRID_COLUMNS) as isize;
        let col = (self.cursor % GRID_COLUMNS) as isize;

        let new_row = (row + dy).clamp(0, rows - 1);
        let new_col = (col + dx).clamp(0, columns - 1);
        let index = (new_row * columns + new_col) as usize;

        self.cursor = index.min(count - 1);
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.remaining_count().saturating_sub(1));
    }

    pub fn toggle_at_cursor(&mut self) {
        let Some(word) = self.cursor_word().map(str::to_string) else {
            return;
        };

        if !self.session.toggle_select(&word)
            && self.session.selected().len() >= MAX_SELECTED
            && !self.session.is_input_locked()
        {
            self.add_message("Four words already selected", MessageStyle::Error);
        }
    }

    pub fn deselect_all(&mut self) {
        if !self.shaking {
            self.session.deselect_all();
        }
    }

    pub fn submit(&mut self, now: Instant) {
        if self.session.is_input_locked() {
            return;
        }
        if !self.session.can_submit() {
            if self.session.is_already_guessed() {
                self.add_message("Already guessed!", MessageStyle::Error);
            }
            return;
        }

        let Some(outcome) = self.session.submit_guess() else {
            return;
        };

        match outcome {
            GuessOutcome::Correct {
                group_index,
                is_final,
            } => {
                let category = self
                    .session
                    .catalog()
                    .group(group_index)
                    .map_or_else(String::new, |g| g.category().to_string());
                self.add_message(&format!("Correct! {category}"), MessageStyle::Success);

                if is_final {
                    self.finish_game();
                    self.add_message(
                        "🎉 You found all the connections! Press 'n' to play again.",
                        MessageStyle::Success,
                    );
                } else {
                    self.start_snow(now);
                }
                self.clamp_cursor();
            }
            GuessOutcome::Incorrect { one_away, .. } => {
                if one_away {
                    self.toast = Some("One away...".to_string());
                    self.schedule(FeedbackKind::Toast, now + TOAST_DURATION);
                }

                self.shaking = true;
                self.session.set_input_locked(true);
                self.schedule(FeedbackKind::Shake, now + SHAKE_DURATION);

                if self.session.is_over() {
                    self.finish_game();
                    self.add_message(
                        "Game over! Coal for you. Press 'n' to play again.",
                        MessageStyle::Error,
                    );
                } else {
                    self.add_message("Incorrect", MessageStyle::Error);
                }
            }
        }
    }

    pub fn new_game(&mut self) {
        self.session.reset();
        self.cursor = 0;
        self.toast = None;
        self.shaking = false;
        self.snow = None;
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
    }

    fn finish_game(&mut self) {
        self.stats.total_games += 1;
        if self.session.is_won() {
            self.stats.games_won += 1;
        }
    }

    fn start_snow(&mut self, now: Instant) {
        let rng = &mut self.effects_rng;
        let flakes = (0..SNOWFLAKE_COUNT)
            .map(|_| Snowflake {
                left: rng.random::<f64>(),
                delay: rng.random::<f64>() * 2.0,
                duration: 2.0 + rng.random::<f64>() * 2.0,
            })
            .collect();

        self.snow = Some(Snowfall {
            started: now,
            flakes,
        });
        self.schedule(FeedbackKind::Snow, now + SNOW_DURATION);
    }

    fn schedule(&mut self, kind: FeedbackKind, deadline: Instant) {
        self.timers.push(FeedbackTimer {
            kind,
            deadline,
            generation: self.session.generation(),
        });
    }

    /// Fire every timer that has expired by `now`
    ///
    /// Timers from an earlier session generation are discarded unapplied.
    pub fn tick(&mut self, now: Instant) {
        let generation = self.session.generation();
        let (expired, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;

        for timer in expired {
            if timer.generation != generation {
                tracing::debug!(kind = ?timer.kind, "dropping stale feedback timer");
                continue;
            }

            match timer.kind {
                FeedbackKind::Toast => self.toast = None,
                FeedbackKind::Shake => {
                    self.shaking = false;
                    self.session.set_input_locked(false);
                }
                FeedbackKind::Snow => self.snow = None,
            }
        }
    }

    /// How long the event loop may block waiting for input
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.snow.is_some() || self.shaking {
            return ANIMATION_FRAME;
        }

        self.timers
            .iter()
            .map(|t| t.deadline.saturating_duration_since(now))
            .min()
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') => self.new_game(),
            _ if self.session.is_over() => {
                // Only quit and new game once the game has ended
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Char(' ') => self.toggle_at_cursor(),
            KeyCode::Enter => self.submit(now),
            KeyCode::Char('d') | KeyCode::Esc => self.deselect_all(),
            _ => {}
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 8 messages
        if self.messages.len() > 8 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    report_exit(res)
}

/// Log a failed event loop and hand the error back to the caller
fn report_exit(res: Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!(error = %err, "TUI exited with an error");
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::catalog::tests::letter_puzzle;
    use crate::core::MAX_LIVES;

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn select_words(app: &mut App, words: &[&str]) {
        for word in words {
            assert!(app.session.toggle_select(word));
        }
    }

    #[test]
    fn cursor_moves_within_grid() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        press(&mut app, KeyCode::Left, now);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Right, now);
        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.cursor, GRID_COLUMNS + 1);

        for _ in 0..10 {
            press(&mut app, KeyCode::Char('j'), now);
            press(&mut app, KeyCode::Char('l'), now);
        }
        assert_eq!(app.cursor, 15);
    }

    #[test]
    fn space_toggles_word_under_cursor() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();
        let word = app.cursor_word().unwrap().to_string();

        press(&mut app, KeyCode::Char(' '), now);
        assert!(app.session.is_selected(&word));
        press(&mut app, KeyCode::Char(' '), now);
        assert!(!app.session.is_selected(&word));
    }

    #[test]
    fn correct_guess_starts_snow() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        select_words(&mut app, &["a1", "a2", "a3", "a4"]);
        press(&mut app, KeyCode::Enter, now);

        assert_eq!(app.session.found_group_indices(), &[0]);
        assert!(app.snow.is_some());
        assert!(app.cursor < app.remaining_count());

        app.tick(now + SNOW_DURATION);
        assert!(app.snow.is_none());
    }

    #[test]
    fn one_away_shows_toast_and_locks_input() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        select_words(&mut app, &["a1", "a2", "a3", "b1"]);
        press(&mut app, KeyCode::Enter, now);

        assert_eq!(app.toast.as_deref(), Some("One away..."));
        assert!(app.shaking);
        assert!(app.session.is_input_locked());
        assert_eq!(app.session.lives_remaining(), MAX_LIVES - 1);

        // Locked: deselect and toggles are ignored until the shake ends
        press(&mut app, KeyCode::Char('d'), now);
        assert_eq!(app.session.selected().len(), 4);

        app.tick(now + SHAKE_DURATION);
        assert!(app.toast.is_none());
        assert!(!app.shaking);
        assert!(!app.session.is_input_locked());
    }

    #[test]
    fn plain_incorrect_guess_has_no_toast() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        select_words(&mut app, &["a1", "a2", "b1", "b2"]);
        press(&mut app, KeyCode::Enter, now);

        assert!(app.toast.is_none());
        assert!(app.shaking);
    }

    #[test]
    fn repeated_combination_is_not_submitted() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        select_words(&mut app, &["a1", "a2", "b1", "b2"]);
        press(&mut app, KeyCode::Enter, now);
        app.tick(now + SHAKE_DURATION);
        press(&mut app, KeyCode::Enter, now + SHAKE_DURATION);

        assert_eq!(app.session.lives_remaining(), MAX_LIVES - 1);
        assert_eq!(
            app.messages.last().map(|m| m.text.as_str()),
            Some("Already guessed!")
        );
    }

    #[test]
    fn stale_timers_do_not_touch_new_game() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let t0 = Instant::now();

        select_words(&mut app, &["a1", "a2", "a3", "b1"]);
        press(&mut app, KeyCode::Enter, t0);
        press(&mut app, KeyCode::Char('n'), t0);
        assert!(app.toast.is_none());
        assert!(!app.session.is_input_locked());

        // Same near miss in the new game, one second later
        let t1 = t0 + Duration::from_secs(1);
        select_words(&mut app, &["a1", "a2", "a3", "b1"]);
        press(&mut app, KeyCode::Enter, t1);
        assert!(app.toast.is_some());

        // The first game's timers expire here but must not clear anything
        app.tick(t0 + TOAST_DURATION + Duration::from_millis(100));
        assert!(app.toast.is_some());
        assert!(app.shaking);
        assert!(app.session.is_input_locked());

        app.tick(t1 + TOAST_DURATION);
        assert!(app.toast.is_none());
        assert!(!app.shaking);
        assert!(app.timers.is_empty());
    }

    #[test]
    fn finished_games_are_counted() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        for prefix in ["a", "b", "c", "d"] {
            for n in 1..=4 {
                app.session.toggle_select(&format!("{prefix}{n}"));
            }
            press(&mut app, KeyCode::Enter, now);
        }

        assert!(app.session.is_won());
        assert_eq!(app.stats.total_games, 1);
        assert_eq!(app.stats.games_won, 1);

        // Moves are ignored once the game is over, 'n' starts again
        press(&mut app, KeyCode::Right, now);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('n'), now);
        assert!(app.session.is_playing());
        assert_eq!(app.remaining_count(), 16);
    }

    #[test]
    fn poll_timeout_tracks_next_deadline() {
        let catalog = Catalog::default_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));
        let now = Instant::now();

        assert_eq!(app.poll_timeout(now), IDLE_POLL);

        app.timers.push(FeedbackTimer {
            kind: FeedbackKind::Toast,
            deadline: now + Duration::from_millis(100),
            generation: app.session.generation(),
        });
        assert_eq!(app.poll_timeout(now), Duration::from_millis(100));
    }

    #[test]
    fn event_loop_errors_reach_the_caller() {
        let res = report_exit(Err(anyhow::anyhow!("terminal went away")));
        assert_eq!(res.unwrap_err().to_string(), "terminal went away");
        assert!(report_exit(Ok(())).is_ok());
    }

    #[test]
    fn quit_keys() {
        let catalog = letter_puzzle();
        let mut app = App::new(Session::seeded(&catalog, 1));

        app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit);
    }
}
