//! An engine for the board game 'Power 4' (Connect Four) with a bot opponent
//!
//! A [`Match`](game::Match) holds the grid, whose turn it is, the winner and
//! the players' details. The [`Bot`](bot::Bot) plays at three strengths: a
//! random beginner, a greedy amateur, and an expert using minimax search
//! with alpha-beta pruning.
//!
//! # Basic Usage
//!
//! ```
//! use power4::{bot::Difficulty, game::{Match, Mode}, random};
//!
//! let mut game = Match::create("Ada", "", Mode::Solo, Difficulty::Expert, "red", "yellow");
//! let mut rng = random::seeded(1);
//!
//! // the human drops into the center column and the bot answers
//! assert!(game.play_turn(3, &mut rng));
//! assert_eq!(game.grid().piece_count(), 2);
//! assert_eq!(game.name(power4::board::Player::Two), "Bot");
//! ```

use static_assertions::*;
pub use anyhow;

pub mod arena;

pub mod board;

pub mod bot;

pub mod display;

pub mod game;

pub mod random;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned pieces needed to win
pub const CONNECT: usize = 4;

/// The number of plies the expert bot searches ahead
pub const SEARCH_DEPTH: usize = 4;

// a line must fit on the board in every direction
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
const_assert!(SEARCH_DEPTH > 0);
