//! Bot-versus-bot games, for comparing difficulty tiers

use log::debug;

use crate::{
    board::Player,
    bot::{Bot, Difficulty},
    game::{Match, Mode, Status},
    random,
};

/// Final result of one arena game, by tier rather than seat
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Won(Difficulty),
    NoMovesLeft,
}

/// Plays one full game between two tiers and returns the finished match
///
/// `first` takes player one's seat. The game is reproducible from `seed`.
pub fn play_game(first: Difficulty, second: Difficulty, seed: u64) -> Match {
    let mut rng = random::seeded(seed);
    let mut bots = [Bot::new(first, Player::One), Bot::new(second, Player::Two)];
    let mut game = Match::create(
        &first.to_string(),
        &second.to_string(),
        Mode::Duel,
        second,
        "",
        "",
    );

    while game.status() == Status::InProgress {
        let bot = &mut bots[game.current_player().index()];
        match bot.choose(game.grid(), &mut rng) {
            Some(column) => {
                game.apply_move(column);
            }
            None => break,
        }
    }
    debug!(
        "arena game {} ({} vs {}) ended: {:?} after {} + {} nodes",
        seed,
        first,
        second,
        game.status(),
        bots[0].node_count,
        bots[1].node_count
    );
    game
}

/// Plays one game and reports which tier won
///
/// Tiers swap seats on odd game numbers so neither always moves first.
pub fn play_round(a: Difficulty, b: Difficulty, seed: u64) -> Outcome {
    let (first, second) = if seed % 2 == 0 { (a, b) } else { (b, a) };
    let game = play_game(first, second, seed);
    match game.status() {
        Status::Won(Player::One) => Outcome::Won(first),
        Status::Won(Player::Two) => Outcome::Won(second),
        _ => Outcome::NoMovesLeft,
    }
}

/// Running totals over many rounds between tiers `a` and `b`
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Tally {
    pub a_wins: usize,
    pub b_wins: usize,
    pub exhausted: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome, a: Difficulty, b: Difficulty) {
        match outcome {
            // identical tiers: credit by seat is meaningless, count under `a`
            Outcome::Won(tier) if tier == a => self.a_wins += 1,
            Outcome::Won(tier) if tier == b => self.b_wins += 1,
            Outcome::Won(_) => {}
            Outcome::NoMovesLeft => self.exhausted += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.a_wins + self.b_wins + self.exhausted
    }
}
