#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::{Cell, Grid, Player};
    use crate::bot::{evaluate, Bot, Difficulty, WIN_SCORE};
    use crate::game::{Match, Mode, Status};
    use crate::random::{self, FixedSequence, RandomSource};
    use crate::{HEIGHT, SEARCH_DEPTH, WIDTH};

    fn lowest_empty_row(grid: &Grid, column: usize) -> Option<usize> {
        (0..HEIGHT).rev().find(|&row| grid.cell(row, column).is_empty())
    }

    fn swap_players(grid: &Grid) -> Result<Grid> {
        let text: String = grid
            .to_string()
            .chars()
            .map(|c| match c {
                'X' => 'O',
                'O' => 'X',
                other => other,
            })
            .collect();
        let rows: Vec<&str> = text.lines().take(HEIGHT).collect();
        Grid::from_rows(&rows)
    }

    /// Plays `moves` random legal moves (fewer if the game ends first)
    fn random_position(seed: u64, moves: usize) -> Match {
        let mut rng = random::seeded(seed);
        let mut game = Match::default();
        for _ in 0..moves {
            if game.status() != Status::InProgress {
                break;
            }
            let column = rng.choose(&game.valid_moves()).unwrap();
            assert!(game.apply_move(column));
        }
        game
    }

    #[test]
    pub fn vertical_win() {
        let mut game = Match::default();
        for &column in [3, 4, 3, 4, 3, 4].iter() {
            assert!(game.apply_move(column));
            assert_eq!(game.winner(), None);
        }
        assert!(game.apply_move(3));
        assert_eq!(game.winner(), Some(Player::One));
        assert_eq!(game.grid().cell(2, 3), Cell::PlayerOne);
    }

    #[test]
    pub fn horizontal_win_on_bottom_row() {
        let mut game = Match::default();
        // player two stacks three in column 0, which is not a win
        for &column in [0, 0, 1, 0, 2, 0].iter() {
            assert!(game.apply_move(column));
        }
        assert_eq!(game.winner(), None);
        assert!(game.apply_move(3));
        assert_eq!(game.winner(), Some(Player::One));
        assert_eq!(game.status(), Status::Won(Player::One));
    }

    #[test]
    pub fn rising_diagonal_win() -> Result<()> {
        let grid = Grid::from_rows(&[
            ".......",
            ".......",
            ".......",
            "..XO...",
            ".XOO...",
            "XOOX...",
        ])?;
        assert!(grid.wins_with(3, Player::One));
        // the same cell only gives player two a run of three
        assert!(!grid.wins_with(3, Player::Two));
        Ok(())
    }

    #[test]
    pub fn falling_diagonal_win() -> Result<()> {
        let grid = Grid::from_rows(&[
            ".......",
            ".......",
            ".......",
            "...OX..",
            "...OOX.",
            "...XOOX",
        ])?;
        assert!(grid.wins_with(3, Player::One));
        assert!(!grid.wins_with(3, Player::Two));
        Ok(())
    }

    #[test]
    pub fn three_in_a_row_is_not_a_win() {
        let mut game = Match::default();
        // horizontal three for player one, vertical pair for player two
        for &column in [0, 0, 1, 1, 2].iter() {
            assert!(game.apply_move(column));
        }
        assert_eq!(game.winner(), None);

        let mut game = Match::default();
        for &column in [5, 6, 5, 6, 5].iter() {
            assert!(game.apply_move(column));
        }
        assert_eq!(game.winner(), None);
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    pub fn pieces_land_lowest_and_count_up() {
        for seed in 0..20 {
            let mut rng = random::seeded(seed);
            let mut game = Match::default();
            let mut count = 0;

            while game.status() == Status::InProgress {
                // probe a random column, full or not
                let column = rng.index(WIDTH);
                let before = game.clone();
                let mover = game.current_player();

                match lowest_empty_row(game.grid(), column) {
                    Some(row) => {
                        assert!(game.apply_move(column));
                        count += 1;
                        assert_eq!(game.grid().cell(row, column), mover.cell());
                        assert_eq!(game.current_player(), mover.other());
                    }
                    None => {
                        assert!(!game.apply_move(column));
                        assert_eq!(game.grid(), before.grid());
                        assert_eq!(game.current_player(), mover);
                    }
                }
                assert_eq!(game.grid().piece_count(), count);
                assert!(count <= WIDTH * HEIGHT);
            }

            // nothing is accepted once the game is over
            let finished = game.clone();
            for column in 0..WIDTH {
                assert!(!game.apply_move(column));
            }
            assert_eq!(game.grid(), finished.grid());
        }
    }

    #[test]
    pub fn full_board_has_no_moves_and_no_winner() -> Result<()> {
        // columns of alternating pairs never line up four
        let grid = Grid::from_rows(&[
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
        ])?;
        assert!(grid.valid_moves().is_empty());
        assert!(grid.is_full());

        let mut rng = FixedSequence::new(vec![3]);
        for &difficulty in [Difficulty::Beginner, Difficulty::Amateur, Difficulty::Expert].iter() {
            assert_eq!(Bot::new(difficulty, Player::Two).choose(&grid, &mut rng), None);
        }
        Ok(())
    }

    #[test]
    pub fn evaluation_is_antisymmetric() -> Result<()> {
        for seed in 0..30 {
            let game = random_position(seed, (seed as usize) % 25 + 1);
            let grid = game.grid();
            let swapped = swap_players(grid)?;

            let score = evaluate(grid, Player::Two);
            assert_eq!(evaluate(&swapped, Player::Two), -score);
            assert_eq!(evaluate(grid, Player::One), -score);
        }
        Ok(())
    }

    #[test]
    pub fn beginner_takes_the_only_column() -> Result<()> {
        let grid = Grid::from_rows(&[
            "XOXOXO.",
            "XOXOXO.",
            "OXOXOX.",
            "OXOXOX.",
            "XOXOXO.",
            "XOXOXO.",
        ])?;
        let mut bot = Bot::new(Difficulty::Beginner, Player::Two);
        for value in 0..10 {
            let mut fixed = FixedSequence::new(vec![value]);
            assert_eq!(bot.choose(&grid, &mut fixed), Some(6));
            let mut seeded = random::seeded(value as u64);
            assert_eq!(bot.choose(&grid, &mut seeded), Some(6));
        }
        Ok(())
    }

    #[test]
    pub fn beginner_follows_the_random_source() {
        let grid = Grid::new();
        let mut bot = Bot::new(Difficulty::Beginner, Player::Two);
        let mut fixed = FixedSequence::new(vec![4, 0, 6]);
        assert_eq!(bot.choose(&grid, &mut fixed), Some(4));
        assert_eq!(bot.choose(&grid, &mut fixed), Some(0));
        assert_eq!(bot.choose(&grid, &mut fixed), Some(6));
    }

    #[test]
    pub fn amateur_prefers_winning_over_blocking() -> Result<()> {
        // player one threatens column 3 on the bottom row,
        // player two can complete column 6 vertically
        let grid = Grid::from_moves("1727376")?;
        assert!(grid.wins_with(3, Player::One));
        assert!(grid.wins_with(6, Player::Two));

        let mut rng = FixedSequence::new(vec![0]);
        let mut bot = Bot::new(Difficulty::Amateur, Player::Two);
        assert_eq!(bot.choose(&grid, &mut rng), Some(6));
        Ok(())
    }

    #[test]
    pub fn amateur_blocks_then_centers_then_randoms() -> Result<()> {
        let mut rng = FixedSequence::new(vec![1]);
        let mut bot = Bot::new(Difficulty::Amateur, Player::Two);

        let threat = Grid::from_moves("11223")?;
        assert_eq!(bot.choose(&threat, &mut rng), Some(3));

        assert_eq!(bot.choose(&Grid::new(), &mut rng), Some(3));

        // center column full, nothing to win or block: second legal column
        let blocked_center = Grid::from_moves("444444")?;
        assert_eq!(bot.choose(&blocked_center, &mut rng), Some(1));
        Ok(())
    }

    #[test]
    pub fn expert_blocks_open_three() -> Result<()> {
        let mut game = Match::create("", "", Mode::Solo, Difficulty::Expert, "", "");
        for &column in [0, 0, 1, 1, 2].iter() {
            assert!(game.apply_move(column));
        }
        let before = game.clone();
        let mut rng = FixedSequence::new(vec![0]);

        assert_eq!(game.bot_select_move(&mut rng), Some(3));
        // the search worked on copies
        assert_eq!(game.grid(), before.grid());
        assert_eq!(game.current_player(), Player::Two);
        Ok(())
    }

    #[test]
    pub fn expert_shortcut_scans_columns_left_to_right() -> Result<()> {
        // the threat in column 3 is met before the win in column 6
        let grid = Grid::from_moves("1727376")?;
        let mut bot = Bot::new(Difficulty::Expert, Player::Two);
        let (score, column) = bot.minimax(&grid, SEARCH_DEPTH, i32::MIN, i32::MAX, true);
        assert_eq!((score, column), (-WIN_SCORE, Some(3)));
        assert_eq!(bot.node_count, 1);
        Ok(())
    }

    #[test]
    pub fn search_avoids_handing_over_a_win() -> Result<()> {
        // player one holds three on the second row, waiting on column 3;
        // dropping into the empty column 3 would let them complete it
        let grid = Grid::from_moves("3112273")?;
        assert!(!grid.wins_with(3, Player::One));

        let mut bot = Bot::new(Difficulty::Expert, Player::Two);
        let (score, column) = bot.minimax(&grid, 1, i32::MIN, i32::MAX, true);
        let column = column.unwrap();
        assert_ne!(column, 3);
        assert!(score > -WIN_SCORE);

        let mut next = grid;
        next.drop_piece(column, Player::Two);
        for reply in next.valid_moves() {
            assert!(!next.wins_with(reply, Player::One), "column {} loses", column);
        }
        Ok(())
    }

    #[test]
    pub fn shortcut_scores_reachable_threats_as_lost() -> Result<()> {
        // player one can fill column 3 themselves, and the immediate-win
        // shortcut scores every line reaching that as lost
        let grid = Grid::from_moves("3112273")?;
        let mut bot = Bot::new(Difficulty::Expert, Player::Two);
        let (score, _) = bot.minimax(&grid, 2, i32::MIN, i32::MAX, true);
        assert_eq!(score, -WIN_SCORE);
        Ok(())
    }

    #[test]
    pub fn expert_takes_an_immediate_win() -> Result<()> {
        // player two stacked three in column 7 while player one scattered
        let grid = Grid::from_moves("1727571")?;
        let mut rng = FixedSequence::new(vec![0]);
        let column = Bot::new(Difficulty::Expert, Player::Two).choose(&grid, &mut rng);
        assert_eq!(column, Some(6));
        Ok(())
    }

    #[test]
    pub fn solo_match_plays_to_the_end() {
        for seed in 0..3 {
            let mut rng = random::seeded(seed);
            let mut human = random::seeded(seed + 100);
            let mut game = Match::create("", "", Mode::Solo, Difficulty::Expert, "", "");

            while game.status() == Status::InProgress {
                assert_eq!(game.current_player(), Player::One);
                let column = human.choose(&game.valid_moves()).unwrap();
                let pieces = game.grid().piece_count();
                assert!(game.play_turn(column, &mut rng));

                let added = game.grid().piece_count() - pieces;
                match game.status() {
                    Status::InProgress => assert_eq!(added, 2),
                    _ => assert!(added == 1 || added == 2),
                }
            }
            assert!(!game.play_turn(0, &mut rng));
        }
    }
}
