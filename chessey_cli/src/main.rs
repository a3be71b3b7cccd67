use std::time::Instant;

use chessey_core::{
    board::{Color, State},
    history::Game,
    move_gen::MoveOptionList,
    perft::{divide, perft},
};
use clap::Parser;
use log::info;

/// Replays a chess game written in Standard Algebraic Notation and lists
/// the pieces and the moves available in the resulting position.
#[derive(Parser, Debug)]
struct Args {
    /// Moves played so far.
    ///
    /// Half-moves are separated by spaces and move pairs by semicolons, e.g.
    /// `e4 e5; Nf3 Nc6; Bb5`. The last pair may hold a single half-move.
    #[arg(default_value = "")]
    history: String,

    /// Starting position of the board.
    ///
    /// Expects either the string "startpos" or a valid position in
    /// Forsyth-Edwards Notation (FEN). The history is replayed on top of
    /// this position.
    #[arg(short, long, default_value = "startpos", value_parser = parse_position)]
    position: State,

    /// Count the leaves of the legal move tree to this depth instead of
    /// listing moves.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    perft: Option<u8>,

    /// Run perft in divide mode.
    ///
    /// Lists each possible move in the current position along with the
    /// number of nodes found under that move. This is useful for debugging
    /// errors by identifying the exact sequence of moves under which they
    /// occur.
    #[arg(long, requires = "perft")]
    divide: bool,
}

fn parse_position(s: &str) -> Result<State, String> {
    if s == "startpos" {
        Ok(State::initial())
    } else {
        State::try_parse_fen(s).map_err(|e| {
            format!("Expected `startpos` or a valid FEN string. FEN parsing error: {e}")
        })
    }
}

fn print_pieces(state: &State, color: Color) {
    let pieces = state
        .board()
        .pieces_of(color)
        .map(|(piece, square)| format!("{}{square}", piece.piece_type().as_uppercase_char()))
        .collect::<Vec<_>>();

    println!("{color} pieces: {}", pieces.join(" "));
}

fn print_game(game: &Game) {
    let state = &game.state;

    println!("{}", state.board());
    println!("{}", state.fen());
    println!();

    print_pieces(state, Color::White);
    print_pieces(state, Color::Black);
    println!();

    match game.available_moves() {
        MoveOptionList::Checkmate => println!("Checkmate, {} wins", state.to_move().flip()),
        MoveOptionList::Stalemate => println!("Stalemate"),
        MoveOptionList::Moves(moves) => {
            let moves = moves.iter().map(|m| m.to_string()).collect::<Vec<_>>();
            println!("{} to move ({}): {}", state.to_move(), moves.len(), moves.join(" "));
        }
    }
}

fn run_perft(state: &State, depth: usize) {
    for depth in 1..=depth {
        let start_time = Instant::now();

        let nodes = perft(state, depth);

        println!(
            "Depth: {depth}\tNodes: {nodes}\tTime taken: {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
    }
}

fn run_divide(state: &State, depth: usize) {
    let mut total_nodes = 0;
    for (m, nodes) in divide(state, depth) {
        total_nodes += nodes;
        println!("{}: {nodes}", state.get_san(m));
    }

    println!();
    println!("Nodes searched: {total_nodes}");
}

fn main() -> Result<(), String> {
    env_logger::init();

    let Args {
        history,
        position,
        perft,
        divide,
    } = Args::parse();

    let game = Game::replay(position, &history).map_err(|e| e.to_string())?;
    info!("position after history: {}", game.state.fen());

    match perft {
        Some(depth) if divide => run_divide(&game.state, depth as _),
        Some(depth) => run_perft(&game.state, depth as _),
        None => print_game(&game),
    }

    Ok(())
}
