use anyhow::{anyhow, Result};

use std::fmt;

use crate::{CONNECT, HEIGHT, WIDTH};

/// One of the two seats at the table
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The player who moves after this one
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based slot index, used for the per-player name and token pairs
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }
}

/// The four line axes, each walked together with its negation
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A 6x7 playing grid
///
/// Row 0 is the top of the board and row `HEIGHT - 1` the bottom; pieces
/// fall to the lowest empty row of their column. The grid is `Copy`, so
/// search code works on private copies and never aliases a live match.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a grid by playing a string of one-indexed column digits,
    /// alternating players starting with player one
    ///
    /// Fails on unparseable characters, full columns, or moves played after
    /// the position is already won.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut grid = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let column = column - 1;
                    let row = grid
                        .drop_piece(column, player)
                        .ok_or_else(|| anyhow!("Invalid move, column {} full", column + 1))?;
                    if grid.is_winning_cell(row, column) {
                        // only the final move may complete a line
                        if grid.piece_count() != moves.as_ref().chars().count() {
                            return Err(anyhow!("Invalid position, game is over"));
                        }
                    }
                    player = player.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(grid)
    }

    /// Builds a grid from `HEIGHT` rows of text, top row first, using
    /// `X` for player one, `O` for player two and `.` for empty cells
    ///
    /// No gravity check is made; this is meant for composing positions.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        if rows.len() != HEIGHT {
            return Err(anyhow!("expected {} rows, found {}", HEIGHT, rows.len()));
        }
        let mut grid = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != WIDTH {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    WIDTH
                ));
            }
            for (column, symbol) in symbols.into_iter().enumerate() {
                grid.cells[row][column] = match symbol {
                    'X' | 'x' | '1' => Cell::PlayerOne,
                    'O' | 'o' | '2' => Cell::PlayerTwo,
                    '.' | '_' => Cell::Empty,
                    other => return Err(anyhow!("could not parse '{}' as a cell", other)),
                };
            }
        }
        Ok(grid)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn rows(&self) -> &[[Cell; WIDTH]; HEIGHT] {
        &self.cells
    }

    /// A column accepts a piece while its top cell is empty
    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    /// Playable columns, left to right; empty once the board is full
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.playable(column))
    }

    /// Drops a piece into `column`, returning the row it landed on, or
    /// `None` if the column is out of range or full
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Option<usize> {
        if column >= WIDTH {
            return None;
        }
        let row = (0..HEIGHT)
            .rev()
            .find(|&row| self.cells[row][column].is_empty())?;
        self.cells[row][column] = player.cell();
        Some(row)
    }

    /// Whether dropping `player`'s piece into `column` would complete a line,
    /// judged on a copy of this grid
    pub fn wins_with(&self, column: usize, player: Player) -> bool {
        let mut next = *self;
        match next.drop_piece(column, player) {
            Some(row) => next.is_winning_cell(row, column),
            None => false,
        }
    }

    /// Checks whether the piece at (`row`, `column`) is part of a line of at
    /// least `CONNECT` same-owner cells along any axis
    pub fn is_winning_cell(&self, row: usize, column: usize) -> bool {
        let player = match self.cells[row][column].owner() {
            Some(player) => player,
            None => return false,
        };
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.count_direction(row, column, dr, dc, player)
                + self.count_direction(row, column, -dr, -dc, player)
                >= CONNECT
        })
    }

    fn count_direction(&self, row: usize, column: usize, dr: isize, dc: isize, player: Player) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize, column as isize);
        loop {
            r += dr;
            c += dc;
            if r < 0
                || r >= HEIGHT as isize
                || c < 0
                || c >= WIDTH as isize
                || self.cells[r as usize][c as usize] != player.cell()
            {
                break;
            }
            count += 1;
        }
        count
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        let footer: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", footer)
    }
}
