//! Blokus Rules Engine
//!
//! Command-line front end for inspecting the piece library and watching the
//! rules engine play a short scripted opening.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blokus::{Cell, Game, PieceLibrary, BOARD_SIZE, MAX_CELLS};

/// Inspects the polyomino library and the placement rules.
#[derive(Parser)]
#[command(name = "blokus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print every piece in the library.
    Pieces {
        /// Largest piece size to enumerate (1 to 6).
        #[arg(long, default_value_t = MAX_CELLS)]
        max_cells: usize,
    },
    /// Play a scripted opening and print the board.
    Demo,
}

/// One scripted move: template id, orientation steps, and target position.
struct ScriptedMove {
    template_id: usize,
    clockwise_turns: usize,
    position: Cell,
}

/// Index of the last row and column.
const LAST: i32 = BOARD_SIZE - 1;

/// Each player drops the monomino into their corner, then player 0 extends
/// diagonally with the L-tromino and player 1 tries an illegal placement.
const OPENING: [ScriptedMove; 6] = [
    ScriptedMove {
        template_id: 0,
        clockwise_turns: 0,
        position: (0, 0),
    },
    ScriptedMove {
        template_id: 0,
        clockwise_turns: 0,
        position: (0, LAST),
    },
    ScriptedMove {
        template_id: 0,
        clockwise_turns: 0,
        position: (LAST, LAST),
    },
    ScriptedMove {
        template_id: 0,
        clockwise_turns: 0,
        position: (LAST, 0),
    },
    ScriptedMove {
        template_id: 3,
        clockwise_turns: 0,
        position: (1, 1),
    },
    ScriptedMove {
        template_id: 1,
        clockwise_turns: 1,
        position: (10, 10),
    },
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Pieces { max_cells }) => run_pieces(max_cells),
        Some(Command::Demo) => run_demo(),
        None => run_pieces(MAX_CELLS),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to build piece library: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Builds the library and prints every piece.
fn run_pieces(max_cells: usize) -> Result<(), blokus::LibraryError> {
    let library = PieceLibrary::build(max_cells)?;
    print!("{}", library.format());
    Ok(())
}

/// Plays the scripted opening, reporting each move, then prints the board.
fn run_demo() -> Result<(), blokus::LibraryError> {
    let library = Arc::new(PieceLibrary::standard()?);
    let (game, log) = play_opening(library);

    for line in log {
        println!("{}", line);
    }
    println!();
    print!("{}", game.board().format_board());
    Ok(())
}

/// Runs the scripted moves; a rejected move passes the turn.
fn play_opening(library: Arc<PieceLibrary>) -> (Game, Vec<String>) {
    let mut game = Game::new(library);
    let mut log = Vec::new();

    for step in &OPENING {
        let player = game.active_turn().player();
        let mut turn = game.turn();
        if !turn.select_template(step.template_id) {
            log.push(format!(
                "Player {}: piece {} already played",
                player, step.template_id
            ));
            game.pass_turn();
            continue;
        }
        for _ in 0..step.clockwise_turns {
            turn.rotate_cw();
        }
        turn.move_to(step.position);

        match game.take_turn() {
            Ok(placement) => log.push(format!(
                "Player {} placed piece {} on {:?}",
                placement.player, placement.template_id, placement.cells
            )),
            Err(e) => {
                log.push(format!("Player {} rejected: {}", player, e));
                game.pass_turn();
            }
        }
    }

    (game, log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_snapshot() {
        let library = Arc::new(PieceLibrary::standard().unwrap());
        let (game, log) = play_opening(library);

        let mut output = log.join("\n");
        output.push_str("\n\n");
        output.push_str(&game.board().format_board());

        insta::assert_snapshot!(output, @r"
        Player 0 placed piece 0 on [(0, 0)]
        Player 1 placed piece 0 on [(0, 19)]
        Player 2 placed piece 0 on [(19, 19)]
        Player 3 placed piece 0 on [(19, 0)]
        Player 0 placed piece 3 on [(1, 1), (2, 1), (2, 2)]
        Player 1 rejected: Piece does not touch a corner of player 1's territory

        0..................1
        .0..................
        .00.................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        ....................
        3..................2
        ");
    }

    #[test]
    fn test_opening_leaves_players_in_turn_order() {
        let library = Arc::new(PieceLibrary::standard().unwrap());
        let (game, _) = play_opening(library);
        assert_eq!(game.history().len(), 5);
        assert_eq!(game.active_turn().player(), 2);
    }
}
