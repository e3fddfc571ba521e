//! Terminal rendering of a match

use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::{
    board::{Cell, Player},
    game::{Match, Status},
    WIDTH,
};

/// Maps a player's token choice to a terminal colour, falling back to the
/// classic red and yellow
pub fn token_color(token: &str, player: Player) -> Color {
    match token.trim().to_lowercase().as_str() {
        "red" => Color::Red,
        "yellow" => Color::Yellow,
        "green" => Color::Green,
        "blue" => Color::Cyan,
        "magenta" | "pink" | "purple" => Color::Magenta,
        "white" => Color::White,
        _ => match player {
            Player::One => Color::Red,
            Player::Two => Color::Yellow,
        },
    }
}

/// Draws the grid, column numbers (one-indexed) and a status line
pub fn draw(game: &Match) -> Result<()> {
    let mut stdout = stdout();
    let colors = [
        token_color(game.token(Player::One), Player::One),
        token_color(game.token(Player::Two), Player::Two),
    ];

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in game.grid().rows().iter() {
        for cell in row.iter() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Cell::PlayerOne => colors[0],
                        Cell::PlayerTwo => colors[1],
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let line = match game.status() {
        Status::InProgress => {
            let player = game.current_player();
            format!(
                "{} to move [{}] pieces on board: {} / {}\n",
                game.name(player),
                game.mode(),
                game.pieces(Player::One),
                game.pieces(Player::Two)
            )
        }
        Status::Won(player) => format!("{} wins!\n", game.name(player)),
        Status::NoMovesLeft => "The board is full, no winner.\n".to_string(),
    };
    stdout.queue(PrintStyledContent(style(line)))?;
    stdout.flush()?;
    Ok(())
}
