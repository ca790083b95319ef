//! # crossword
//!
//! Fills crossword grids from a word list. A grid is a text file where `_`
//! marks an open cell and any other character a block; every run of two or
//! more open cells across or down is a slot that needs a word.
//!
//! The solver first drops words of the wrong length from every slot, then
//! enforces arc consistency between crossing slots and finally runs a
//! backtracking search. The heuristics are selectable:
//!
//! -   `--variable-selection`: `mrv` (fewest remaining words, most crossings
//!     on ties) or `fixed` (slot order).
//! -   `--value-ordering`: `lcv` (words that rule out the fewest neighbor
//!     candidates first) or `domain` (word list order).
//! -   `--propagator`: `ac3` (work queue of arcs) or `sweep` (repeated passes
//!     over every arc).
//!
//! ## Usage
//!
//! ```sh
//! # Solve a grid with a word list
//! crossword data/structure0.txt data/words0.txt
//!
//! # Same, writing the filled grid to a file
//! crossword file --structure data/structure0.txt --words data/words0.txt --output out.txt
//!
//! # An inline puzzle
//! crossword text --structure "#___#\n#_##_\n#_##_\n#_##_\n#____" --words "six seven nine five"
//!
//! # Every structure* file in a directory
//! crossword dir --path data --words data/words1.txt
//!
//! # Shell completions
//! crossword completions bash
//! ```
//!
//! `--debug` raises the log level and prints the parsed grid, `RUST_LOG`
//! overrides the level entirely. `--stats false` and `--verify false` turn off
//! the statistics table and the verification of the fill.

use crate::command_line::cli::{
    Cli, Commands, print_completions, solve_dir, solve_files, solve_text,
};
use clap::Parser;
use crossword_csp::logging::init_logger;
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        print_completions(shell);
        return ExitCode::SUCCESS;
    }

    init_logger(cli.common().debug);

    let result = match &cli.command {
        Some(Commands::File {
            structure,
            words,
            output,
            common,
        }) => solve_files(structure, words, output.as_deref(), common),
        Some(Commands::Text {
            structure,
            words,
            common,
        }) => solve_text(structure, words, common),
        Some(Commands::Dir {
            path,
            words,
            common,
        }) => solve_dir(path, words, common),
        Some(Commands::Completions { .. }) => Ok(()),
        None => match (&cli.structure, &cli.words) {
            (Some(structure), Some(words)) => solve_files(structure, words, None, &cli.common),
            _ => Err("Nothing to solve: pass a structure file and a word list".to_string()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
