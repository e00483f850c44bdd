//! Random self-play demo
//!
//! Seeds a standard board and alternates uniformly random moves until
//! neither side can play or the ply cap is reached, printing the board
//! after every move.

use checkers::rules::attempt_random_move;
use checkers::{Board, Color, DEFAULT_BOARD_SIZE};

fn main() {
    let mut board = Board::with_initial_setup(DEFAULT_BOARD_SIZE);
    let mut rng = rand::rng();
    let mut turn = Color::Dark;
    let mut idle = 0;

    println!("{board}");
    for ply in 1..=200 {
        match attempt_random_move(&mut board, turn, turn.forward(), &mut rng) {
            Ok(Some(applied)) => {
                idle = 0;
                println!(
                    "{}. {:?}: ({}, {}) -> ({}, {}){}{}",
                    ply,
                    turn,
                    applied.from.row,
                    applied.from.col,
                    applied.to.row,
                    applied.to.col,
                    match applied.removed.len() {
                        0 => String::new(),
                        n => format!(", capturing {n}"),
                    },
                    if applied.made_king { ", crowned" } else { "" },
                );
                println!("{board}");
            }
            Ok(None) => {
                idle += 1;
                if idle == 2 {
                    println!("neither side has a legal move");
                    break;
                }
            }
            Err(err) => {
                eprintln!("engine error: {err}");
                break;
            }
        }
        turn = turn.opponent();
    }
}
