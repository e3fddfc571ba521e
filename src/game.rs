use anyhow::{anyhow, Error, Result};
use log::debug;

use std::fmt;
use std::str::FromStr;

use crate::{
    board::{Grid, Player},
    bot::{Bot, Difficulty},
    random::RandomSource,
    WIDTH,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    /// Two people share the board
    Duel,
    /// Player two is controlled by the bot
    Solo,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duel" | "two" => Ok(Mode::Duel),
            "solo" | "bot" => Ok(Mode::Solo),
            other => Err(anyhow!("unknown mode '{}', expected duel or solo", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Duel => f.write_str("duel"),
            Mode::Solo => f.write_str("solo"),
        }
    }
}

/// Where a match stands, derived from the grid and the recorded winner
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    InProgress,
    Won(Player),
    /// The board filled up without a line; no winner is ever recorded
    NoMovesLeft,
}

/// One game of Power 4, from the empty board to its end
///
/// A `Match` is never reset: starting over means building a new one,
/// see [`Match::rematch`].
#[derive(Clone, Debug)]
pub struct Match {
    grid: Grid,
    current_player: Player,
    winner: Option<Player>,
    player_names: [String; 2],
    player_tokens: [String; 2],
    mode: Mode,
    ai_difficulty: Difficulty,
}

impl Default for Match {
    fn default() -> Self {
        Self::create("", "", Mode::Duel, Difficulty::Beginner, "", "")
    }
}

impl Match {
    /// Starts a fresh match on an empty grid with player one to move
    ///
    /// Empty names fall back to "Player 1" / "Player 2" in a duel, and to
    /// "Player" / "Bot" against the computer.
    pub fn create(
        name1: &str,
        name2: &str,
        mode: Mode,
        difficulty: Difficulty,
        token1: &str,
        token2: &str,
    ) -> Self {
        let (default1, default2) = match mode {
            Mode::Duel => ("Player 1", "Player 2"),
            Mode::Solo => ("Player", "Bot"),
        };
        let name_or = |name: &str, default: &str| {
            let name = name.trim();
            if name.is_empty() {
                default.to_string()
            } else {
                name.to_string()
            }
        };

        Self {
            grid: Grid::new(),
            current_player: Player::One,
            winner: None,
            player_names: [name_or(name1, default1), name_or(name2, default2)],
            player_tokens: [token1.to_string(), token2.to_string()],
            mode,
            ai_difficulty: difficulty,
        }
    }

    /// A new match between the same players, with the same settings
    pub fn rematch(&self) -> Self {
        Self::create(
            &self.player_names[0],
            &self.player_names[1],
            self.mode,
            self.ai_difficulty,
            &self.player_tokens[0],
            &self.player_tokens[1],
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn player_names(&self) -> &[String; 2] {
        &self.player_names
    }

    pub fn name(&self, player: Player) -> &str {
        &self.player_names[player.index()]
    }

    pub fn player_tokens(&self) -> &[String; 2] {
        &self.player_tokens
    }

    pub fn token(&self, player: Player) -> &str {
        &self.player_tokens[player.index()]
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.ai_difficulty
    }

    pub fn valid_moves(&self) -> Vec<usize> {
        self.grid.valid_moves()
    }

    pub fn status(&self) -> Status {
        match self.winner {
            Some(player) => Status::Won(player),
            None if self.grid.is_full() => Status::NoMovesLeft,
            None => Status::InProgress,
        }
    }

    /// Whether the player to move is the bot
    pub fn is_bot_turn(&self) -> bool {
        self.mode == Mode::Solo && self.winner.is_none() && self.current_player == Player::Two
    }

    /// Drops the current player's piece into zero-indexed `column`
    ///
    /// Returns whether the move was accepted; a refused move leaves the
    /// match untouched.
    pub fn apply_move(&mut self, column: usize) -> bool {
        match self.play_checked(column) {
            Ok(_) => true,
            Err(err) => {
                debug!("move refused: {}", err);
                false
            }
        }
    }

    /// Like [`Match::apply_move`], but explains why a move is refused
    pub fn play_checked(&mut self, column: usize) -> Result<Status> {
        if column >= WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                WIDTH - 1
            ));
        }
        if let Some(winner) = self.winner {
            return Err(anyhow!("Invalid move, the game is over ({} won)", winner));
        }
        let mover = self.current_player;
        let row = self
            .grid
            .drop_piece(column, mover)
            .ok_or_else(|| anyhow!("Invalid move, column {} full", column))?;

        if self.grid.is_winning_cell(row, column) {
            self.winner = Some(mover);
        }
        // the turn passes even on the winning move
        self.current_player = mover.other();

        debug!("{} played column {} (row {})", mover, column, row);
        Ok(self.status())
    }

    /// Chooses the bot's column for the current position, or `None` when
    /// no legal move is left
    ///
    /// The bot always plays slot two; the match is not modified.
    pub fn bot_select_move<R: RandomSource>(&self, rng: &mut R) -> Option<usize> {
        Bot::new(self.ai_difficulty, Player::Two).choose(&self.grid, rng)
    }

    /// Submits a human move and, in solo mode, answers it with the bot's
    ///
    /// Returns whether the human move was accepted.
    pub fn play_turn<R: RandomSource>(&mut self, column: usize, rng: &mut R) -> bool {
        let accepted = self.apply_move(column);
        if accepted && self.is_bot_turn() {
            if let Some(reply) = self.bot_select_move(rng) {
                self.apply_move(reply);
            }
        }
        accepted
    }

    /// Counts the pieces of `player` on the grid
    pub fn pieces(&self, player: Player) -> usize {
        self.grid
            .rows()
            .iter()
            .flatten()
            .filter(|&&cell| cell == player.cell())
            .count()
    }
}
