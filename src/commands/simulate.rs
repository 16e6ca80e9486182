//! Self-play simulation
//!
//! Plays many games with a random player and reports how the puzzle holds up:
//! how often blind guessing wins, how many groups it stumbles on, how often the
//! "one away" hint fires. Games run in parallel, each fully determined by its
//! own seed.

use crate::catalog::Catalog;
use crate::core::{GuessOutcome, MAX_LIVES, MAX_SELECTED, NUM_GROUPS, Session};
use crate::output::formatters::create_progress_bar;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::IndexedRandom;
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Attempts at drawing a not-yet-submitted combination before giving up
const MAX_DRAWS: usize = 64;

/// Configuration for a simulation run
pub struct SimulationConfig {
    pub games: usize,
    pub seed: u64,
    pub show_progress: bool,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(games: usize, seed: u64) -> Self {
        Self {
            games,
            seed,
            show_progress: true,
        }
    }
}

/// Result of a single simulated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub won: bool,
    /// Groups found by the player, not counting ones revealed on a loss
    pub groups_found: usize,
    pub guesses: usize,
    pub one_away_hints: usize,
    pub lives_left: u8,
}

/// Statistics over all simulated games
#[derive(Debug)]
pub struct SimulationStatistics {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_guesses: usize,
    pub one_away_hints: usize,
    /// `groups_found_distribution[n]` = games where the player found `n` groups
    pub groups_found_distribution: [usize; NUM_GROUPS + 1],
    pub average_lives_on_win: f64,
    pub total_time: Duration,
}

impl SimulationStatistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    #[must_use]
    pub fn average_guesses(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_guesses as f64 / self.games as f64
        }
    }

    fn from_records(records: &[GameRecord], total_time: Duration) -> Self {
        let wins = records.iter().filter(|r| r.won).count();
        let mut groups_found_distribution = [0; NUM_GROUPS + 1];
        for record in records {
            groups_found_distribution[record.groups_found.min(NUM_GROUPS)] += 1;
        }

        let lives_on_win: usize = records
            .iter()
            .filter(|r| r.won)
            .map(|r| usize::from(r.lives_left))
            .sum();

        Self {
            games: records.len(),
            wins,
            losses: records.len() - wins,
            total_guesses: records.iter().map(|r| r.guesses).sum(),
            one_away_hints: records.iter().map(|r| r.one_away_hints).sum(),
            groups_found_distribution,
            average_lives_on_win: if wins > 0 {
                lives_on_win as f64 / wins as f64
            } else {
                0.0
            },
            total_time,
        }
    }
}

/// Play one game to the end, picking four random remaining words each turn
///
/// The player never knowingly resubmits a combination. The board order and
/// the player's picks are both derived from `seed`.
#[must_use]
pub fn play_random_game(catalog: &Catalog, seed: u64) -> GameRecord {
    let mut session = Session::seeded(catalog, seed);
    let mut player_rng = StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));

    let mut record = GameRecord {
        won: false,
        groups_found: 0,
        guesses: 0,
        one_away_hints: 0,
        lives_left: MAX_LIVES,
    };

    while session.is_playing() {
        let remaining: Vec<String> = session.remaining_words().map(|e| e.word.clone()).collect();

        for _ in 0..MAX_DRAWS {
            session.deselect_all();
            for word in remaining.choose_multiple(&mut player_rng, MAX_SELECTED) {
                session.toggle_select(word);
            }
            if !session.is_already_guessed() {
                break;
            }
        }

        let Some(outcome) = session.submit_guess() else {
            break;
        };
        record.guesses += 1;

        match outcome {
            GuessOutcome::Correct { is_final, .. } => {
                record.groups_found += 1;
                record.won = is_final;
            }
            GuessOutcome::Incorrect { one_away, .. } => {
                record.one_away_hints += usize::from(one_away);
            }
        }
    }

    record.lives_left = session.lives_remaining();
    record
}

/// Run `config.games` random games in parallel
///
/// # Panics
///
/// Panics if the progress bar template is invalid (it is a constant).
pub fn run_simulation(catalog: &Catalog, config: &SimulationConfig) -> SimulationStatistics {
    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap()
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    tracing::info!(games = config.games, seed = config.seed, "starting simulation");
    let start = Instant::now();

    let records: Vec<GameRecord> = (0..config.games)
        .into_par_iter()
        .map(|i| {
            let record = play_random_game(catalog, config.seed.wrapping_add(i as u64));
            pb.inc(1);
            record
        })
        .collect();

    pb.finish_with_message("Complete!");

    let stats = SimulationStatistics::from_records(&records, start.elapsed());
    tracing::info!(
        wins = stats.wins,
        losses = stats.losses,
        elapsed_ms = stats.total_time.as_millis() as u64,
        "simulation finished"
    );
    stats
}

/// Print simulation statistics
pub fn print_simulation_statistics(stats: &SimulationStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Simulation Results (random player) ");
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Overall".bright_cyan().bold());
    println!("  Games played:        {}", stats.games);
    println!(
        "  Won:                 {} {}",
        stats.wins,
        format!("({:.1}%)", stats.win_rate() * 100.0).green()
    );
    println!("  Lost:                {}", stats.losses);
    println!(
        "  Average guesses:     {}",
        format!("{:.2}", stats.average_guesses()).bright_yellow().bold()
    );
    if stats.wins > 0 {
        println!(
            "  Lives left on win:   {:.2} of {MAX_LIVES}",
            stats.average_lives_on_win
        );
    }
    println!("  \"One away\" hints:    {}", stats.one_away_hints);
    println!(
        "  Total time:          {:.2}s",
        stats.total_time.as_secs_f64()
    );

    println!("\n📈 {}", "Groups Found By Player".bright_cyan().bold());
    let max_count = stats
        .groups_found_distribution
        .iter()
        .copied()
        .max()
        .unwrap_or(0);
    for (groups, &count) in stats.groups_found_distribution.iter().enumerate() {
        let percentage = if stats.games > 0 {
            count as f64 / stats.games as f64 * 100.0
        } else {
            0.0
        };
        let bar = create_progress_bar(count as f64, max_count as f64, 40);
        println!("  {groups} groups: {} {count:6} ({percentage:5.1}%)", bar.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::letter_puzzle;

    #[test]
    fn random_game_terminates_consistently() {
        let catalog = letter_puzzle();

        for seed in 0..50 {
            let record = play_random_game(&catalog, seed);

            assert!(record.guesses >= 1);
            assert!(record.groups_found <= NUM_GROUPS);
            if record.won {
                assert_eq!(record.groups_found, NUM_GROUPS);
                assert!(record.lives_left >= 1);
            } else {
                assert_eq!(record.lives_left, 0);
            }
            assert_eq!(
                record.guesses,
                record.groups_found + usize::from(MAX_LIVES - record.lives_left)
            );
        }
    }

    #[test]
    fn random_game_is_reproducible() {
        let catalog = letter_puzzle();
        assert_eq!(play_random_game(&catalog, 11), play_random_game(&catalog, 11));
    }

    #[test]
    fn simulation_aggregates_records() {
        let catalog = letter_puzzle();
        let mut config = SimulationConfig::new(200, 1);
        config.show_progress = false;

        let stats = run_simulation(&catalog, &config);

        assert_eq!(stats.games, 200);
        assert_eq!(stats.wins + stats.losses, 200);
        assert_eq!(stats.groups_found_distribution.iter().sum::<usize>(), 200);
        assert_eq!(stats.groups_found_distribution[NUM_GROUPS], stats.wins);
        assert!(stats.win_rate() >= 0.0 && stats.win_rate() <= 1.0);
        assert!(stats.average_guesses() >= NUM_GROUPS as f64);
    }

    #[test]
    fn simulation_is_deterministic_for_a_seed() {
        let catalog = letter_puzzle();
        let mut config = SimulationConfig::new(64, 5);
        config.show_progress = false;

        let a = run_simulation(&catalog, &config);
        let b = run_simulation(&catalog, &config);

        assert_eq!(a.wins, b.wins);
        assert_eq!(a.total_guesses, b.total_guesses);
        assert_eq!(a.groups_found_distribution, b.groups_found_distribution);
    }

    #[test]
    fn empty_simulation() {
        let catalog = letter_puzzle();
        let mut config = SimulationConfig::new(0, 0);
        config.show_progress = false;

        let stats = run_simulation(&catalog, &config);
        assert_eq!(stats.games, 0);
        assert!((stats.win_rate() - 0.0).abs() < f64::EPSILON);
    }
}
