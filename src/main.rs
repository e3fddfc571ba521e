use anyhow::Result;
use log::info;

use std::io::{stdin, stdout, Stdin, Write};
use std::str::FromStr;

use power4::{
    board::Player,
    bot::Difficulty,
    display,
    game::{Match, Mode, Status},
    random,
};

fn ask(stdin: &Stdin, question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin.read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// Repeats the question until the answer parses
fn ask_parsed<T>(stdin: &Stdin, question: &str) -> Result<T>
where
    T: FromStr<Err = anyhow::Error>,
{
    loop {
        match ask(stdin, question)?.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(err) => println!("{}", err),
        }
    }
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        match ask(stdin, question)?.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn setup(stdin: &Stdin) -> Result<Match> {
    let mode: Mode = ask_parsed(stdin, "Game mode, solo or duel: ")?;
    let name1 = ask(stdin, "Name of player 1 (blank for default): ")?;
    let (name2, difficulty) = match mode {
        Mode::Solo => (
            String::new(),
            ask_parsed(stdin, "Bot difficulty, beginner, amateur or expert: ")?,
        ),
        Mode::Duel => (
            ask(stdin, "Name of player 2 (blank for default): ")?,
            Difficulty::Beginner,
        ),
    };
    let token1 = ask(stdin, "Token colour for player 1 (red, yellow, green, blue, ...): ")?;
    let token2 = ask(stdin, "Token colour for player 2: ")?;

    Ok(Match::create(&name1, &name2, mode, difficulty, &token1, &token2))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stdin = stdin();
    let mut rng = random::from_entropy();

    println!("Welcome to Power 4\n");

    let mut game = setup(&stdin)?;
    info!(
        "new {} match: {} vs {}",
        game.mode(),
        game.name(Player::One),
        game.name(Player::Two)
    );

    // game loop
    loop {
        display::draw(&game)?;

        match game.status() {
            Status::InProgress => {
                if game.is_bot_turn() {
                    println!("{} is thinking...", game.name(Player::Two));
                    stdout().flush().expect("Failed to flush to stdout!");
                    match game.bot_select_move(&mut rng) {
                        Some(column) => {
                            println!("{} plays column {}", game.name(Player::Two), column + 1);
                            game.apply_move(column);
                        }
                        None => println!("No move left for the bot"),
                    }
                    continue;
                }

                let input = ask(&stdin, "Move input (1-7, q to quit) > ")?;
                if input.eq_ignore_ascii_case("q") {
                    break;
                }
                let column = match input.parse::<usize>() {
                    Ok(column @ 1..=power4::WIDTH) => column - 1,
                    _ => {
                        println!("Invalid column: {}", input);
                        continue;
                    }
                };
                if let Err(err) = game.play_checked(column) {
                    println!("{}", err);
                }
            }

            // end states
            Status::Won(_) | Status::NoMovesLeft => {
                info!("match over: {:?}", game.status());
                if ask_yes_no(&stdin, "Play again? y/n: ")? {
                    game = game.rematch();
                } else {
                    break;
                }
            }
        }
    }
    Ok(())
}
