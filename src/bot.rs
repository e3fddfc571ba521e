//! A computer opponent with three strengths of play

use anyhow::{anyhow, Error};
use log::{debug, trace};

use std::fmt;
use std::str::FromStr;

use crate::{
    board::{Grid, Player, DIRECTIONS},
    random::RandomSource,
    CONNECT, HEIGHT, SEARCH_DEPTH, WIDTH,
};

/// Score of a position where the side to evaluate has (or concedes) an
/// immediate win
pub const WIN_SCORE: i32 = 1_000_000;

/// Window weights for the static evaluation, by number of own pieces
const FOUR_WEIGHT: i32 = 100_000;
const THREE_WEIGHT: i32 = 1_000;
const TWO_WEIGHT: i32 = 50;

/// Returns the columns ordered from the middle outwards, left before right,
/// as the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (1 - i % 2) * (i / 2) - (i % 2) * (i / 2 + 1);
        i += 1;
    }
    move_order
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    /// Plays a uniformly random legal column
    Beginner,
    /// Wins if it can, blocks if it must, otherwise prefers the center
    Amateur,
    /// Minimax search with alpha-beta pruning
    Expert,
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "debutant" => Ok(Difficulty::Beginner),
            "amateur" => Ok(Difficulty::Amateur),
            "expert" => Ok(Difficulty::Expert),
            other => Err(anyhow!(
                "unknown difficulty '{}', expected beginner, amateur or expert",
                other
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Amateur => "amateur",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// Scores a grid from `side`'s point of view
///
/// Every run of `CONNECT` cells along each axis is inspected; runs holding
/// pieces of only one player are rewarded (or penalised, for the opponent)
/// by how many of that player's pieces they contain. Positive favors `side`.
pub fn evaluate(grid: &Grid, side: Player) -> i32 {
    let mut score = 0;
    for row in 0..HEIGHT as isize {
        for column in 0..WIDTH as isize {
            for &(dr, dc) in DIRECTIONS.iter() {
                let end_row = row + dr * (CONNECT as isize - 1);
                let end_column = column + dc * (CONNECT as isize - 1);
                if end_row < 0
                    || end_row >= HEIGHT as isize
                    || end_column < 0
                    || end_column >= WIDTH as isize
                {
                    continue;
                }

                let (mut own, mut other, mut empty) = (0, 0, 0);
                for k in 0..CONNECT as isize {
                    let cell = grid.cell((row + dr * k) as usize, (column + dc * k) as usize);
                    match cell.owner() {
                        Some(player) if player == side => own += 1,
                        Some(_) => other += 1,
                        None => empty += 1,
                    }
                }
                score += window_score(own, other, empty);
            }
        }
    }
    score
}

fn window_score(own: usize, other: usize, empty: usize) -> i32 {
    match (own, other, empty) {
        (4, 0, 0) => FOUR_WEIGHT,
        (3, 0, 1) => THREE_WEIGHT,
        (2, 0, 2) => TWO_WEIGHT,
        (0, 4, 0) => -FOUR_WEIGHT,
        (0, 3, 1) => -THREE_WEIGHT,
        (0, 2, 2) => -TWO_WEIGHT,
        _ => 0,
    }
}

/// Picks moves for one side of the board
///
/// # Notes
/// The expert search never touches the caller's grid: every ply is explored
/// on a copy. Scores are always from the bot's side, so the search maximises
/// on the bot's plies and minimises on the opponent's.
#[derive(Clone, Debug)]
pub struct Bot {
    difficulty: Difficulty,
    side: Player,

    /// The number of nodes searched by this `Bot` so far (for diagnostics only)
    pub node_count: usize,
}

impl Bot {
    pub fn new(difficulty: Difficulty, side: Player) -> Self {
        Self {
            difficulty,
            side,
            node_count: 0,
        }
    }

    /// Chooses a legal column for the bot's side, or `None` if the grid has
    /// no legal move left
    pub fn choose<R: RandomSource>(&mut self, grid: &Grid, rng: &mut R) -> Option<usize> {
        let moves = grid.valid_moves();
        if moves.is_empty() {
            return None;
        }

        let column = match self.difficulty {
            Difficulty::Beginner => rng.choose(&moves),
            Difficulty::Amateur => self.greedy(grid, &moves, rng),
            Difficulty::Expert => {
                let (score, column) =
                    self.minimax(grid, SEARCH_DEPTH, i32::MIN, i32::MAX, true);
                trace!("search score {} after {} nodes", score, self.node_count);
                // fallback, the search only ever returns no column at a leaf
                column.or_else(|| rng.choose(&moves))
            }
        };
        debug!(
            "{} bot ({}) picks column {:?}",
            self.difficulty, self.side, column
        );
        column
    }

    /// Win now, else block, else center, else random
    fn greedy<R: RandomSource>(&self, grid: &Grid, moves: &[usize], rng: &mut R) -> Option<usize> {
        let opponent = self.side.other();

        if let Some(&column) = moves.iter().find(|&&c| grid.wins_with(c, self.side)) {
            return Some(column);
        }
        if let Some(&column) = moves.iter().find(|&&c| grid.wins_with(c, opponent)) {
            return Some(column);
        }
        let center = WIDTH / 2;
        if moves.contains(&center) {
            return Some(center);
        }
        rng.choose(moves)
    }

    /// Performs depth-limited minimax with alpha-beta pruning
    ///
    /// Returns the score of the position for the bot's side and the column
    /// that achieves it. Before any recursion every legal column is tested,
    /// left to right, for an immediate win by the bot and then by the
    /// opponent; the first hit is returned as `±WIN_SCORE` regardless of
    /// whose turn it is or how deep the node sits.
    pub fn minimax(
        &mut self,
        grid: &Grid,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<usize>) {
        self.node_count += 1;

        let me = self.side;
        let opponent = me.other();
        let moves = grid.valid_moves();

        for &column in moves.iter() {
            if grid.wins_with(column, me) {
                return (WIN_SCORE, Some(column));
            }
            if grid.wins_with(column, opponent) {
                return (-WIN_SCORE, Some(column));
            }
        }

        if depth == 0 || moves.is_empty() {
            return (evaluate(grid, me), None);
        }

        let mover = if maximizing { me } else { opponent };
        let mut best_column = moves[0];
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for &column in move_order().iter() {
            if !grid.playable(column) {
                continue;
            }
            let mut next = *grid;
            next.drop_piece(column, mover);
            let (score, _) = self.minimax(&next, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > value {
                    value = score;
                    best_column = column;
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_column = column;
                }
                beta = beta.min(value);
            }
            // the other side will never let play reach this branch
            if alpha >= beta {
                break;
            }
        }

        (value, Some(best_column))
    }
}
