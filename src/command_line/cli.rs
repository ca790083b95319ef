#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use crossword_csp::crossword::{Crossword, LetterGrid};
use crossword_csp::csp::backtracking::Backtracking;
use crossword_csp::csp::propagation::PropagatorType;
use crossword_csp::csp::puzzle::Puzzle;
use crossword_csp::csp::solver::{DynamicConfig, Solution, SolutionStats, Solver};
use crossword_csp::csp::value_ordering::ValueOrderingType;
use crossword_csp::csp::variable_selection::VariableSelectionType;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

const MIB: f64 = 1024.0 * 1024.0;

/// Command-line interface of the crossword filler.
#[derive(Parser, Debug)]
#[command(
    name = "crossword",
    version,
    about = "Fills crossword grids from a word list",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// Structure file to solve when no subcommand is given. `_` marks an
    /// open cell, anything else a block.
    #[arg(requires = "words")]
    pub structure: Option<PathBuf>,

    /// Word list, one word per line.
    pub words: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a structure file with a word list file.
    File {
        #[arg(long)]
        structure: PathBuf,

        #[arg(long)]
        words: PathBuf,

        /// Write the filled grid to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle given inline.
    Text {
        /// Grid rows separated by newlines or a literal `\n`, e.g. "#___#\n#_##_".
        #[arg(long)]
        structure: String,

        /// Words separated by whitespace or commas.
        #[arg(long)]
        words: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every file whose name starts with `structure` below a directory.
    Dir {
        #[arg(long)]
        path: PathBuf,

        /// Word list shared by every grid.
        #[arg(long)]
        words: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every solving command.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Log at debug level and print the parsed grid.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check a found fill against the grid and word list.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print every slot with its word.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    #[arg(long, default_value_t = VariableSelectionType::Mrv)]
    pub(crate) variable_selection: VariableSelectionType,

    #[arg(long, default_value_t = ValueOrderingType::Lcv)]
    pub(crate) value_ordering: ValueOrderingType,

    #[arg(long, default_value_t = PropagatorType::Ac3)]
    pub(crate) propagator: PropagatorType,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            variable_selection: VariableSelectionType::default(),
            value_ordering: ValueOrderingType::default(),
            propagator: PropagatorType::default(),
        }
    }
}

impl Cli {
    /// The options that apply to whatever the command line asked for.
    pub(crate) fn common(&self) -> &CommonOptions {
        match &self.command {
            Some(
                Commands::File { common, .. }
                | Commands::Text { common, .. }
                | Commands::Dir { common, .. },
            ) => common,
            Some(Commands::Completions { .. }) | None => &self.common,
        }
    }
}

/// Builds a solver with the strategies chosen on the command line.
///
/// # Errors
///
/// If the crossword is malformed.
pub(crate) fn get_solver(
    common: &CommonOptions,
    crossword: &Crossword,
) -> Result<Backtracking<DynamicConfig>, String> {
    Backtracking::<DynamicConfig>::from_parts(
        crossword,
        common.variable_selection.to_impl(),
        common.value_ordering.to_impl(),
        common.propagator.to_impl(),
    )
    .map_err(|e| e.to_string())
}

/// Solves `crossword` and times the search.
///
/// # Errors
///
/// If the crossword is malformed.
pub(crate) fn solve(
    crossword: &Crossword,
    common: &CommonOptions,
) -> Result<(Option<Solution>, Duration, SolutionStats), String> {
    let mut solver = get_solver(common, crossword)?;

    let time = Instant::now();
    let solution = solver.solve();
    let elapsed = time.elapsed();

    log::debug!("search finished in {elapsed:?}");

    Ok((solution, elapsed, solver.stats()))
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Checks a found fill against the crossword.
///
/// # Errors
///
/// Describes the first violated constraint.
pub(crate) fn verify_solution(crossword: &Crossword, solution: Option<&Solution>) -> Result<(), String> {
    let Some(solution) = solution else {
        return Ok(());
    };

    solution
        .verify(crossword)
        .map_err(|e| format!("Solution failed verification: {e}"))?;
    println!("Verified: true");
    Ok(())
}

/// Solves a parsed crossword, then prints the verification result,
/// statistics and the filled grid.
///
/// # Errors
///
/// If the crossword is malformed, the fill fails verification, or the grid
/// cannot be written to `output`.
pub(crate) fn solve_and_report(
    crossword: &Crossword,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
    output: Option<&Path>,
) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("Parsed grid:\n{crossword}");
    }

    let (solution, elapsed, solver_stats) = solve(crossword, common)?;

    if common.verify {
        verify_solution(crossword, solution.as_ref())?;
    }

    if common.stats {
        print_stats(parse_time, elapsed, crossword, &solver_stats, memory_usage());
    }

    let Some(solution) = solution else {
        println!("No solution.");
        return Ok(());
    };

    if common.print_solution {
        println!("{solution}");
    }

    let grid = LetterGrid::new(crossword, &solution);
    println!("{grid}");

    if let Some(path) = output {
        std::fs::write(path, grid.to_string())
            .map_err(|e| format!("Unable to write {}: {e}", path.display()))?;
        println!("Grid written to: {}", path.display());
    }

    Ok(())
}

/// Reads a crossword from disk and solves it.
///
/// # Errors
///
/// See [`solve_and_report`]; also fails if either file cannot be read.
pub(crate) fn solve_files(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = Instant::now();
    let crossword = Crossword::from_files(structure, words).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_and_report(&crossword, common, Some(structure), parse_time, output)
}

/// Turns inline command line text into the file formats the parser reads.
pub(crate) fn parse_text_input(structure: &str, words: &str) -> (String, String) {
    let structure = structure.replace("\\n", "\n");
    let words = words
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (structure, words)
}

/// Solves a crossword given inline.
///
/// # Errors
///
/// See [`solve_and_report`]; also fails on an empty grid or word list.
pub(crate) fn solve_text(structure: &str, words: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let (structure, words) = parse_text_input(structure, words);
    let crossword = Crossword::new(&structure, &words).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_and_report(&crossword, common, None, parse_time, None)
}

/// Solves every structure file below `path` against one word list.
///
/// Files are visited in file name order. Anything whose name does not start
/// with `structure` is skipped.
///
/// # Errors
///
/// If `path` is not a directory, or any grid fails to load or verify.
pub(crate) fn solve_dir(path: &Path, words: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    let mut solved = 0;
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }

        let is_structure = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("structure"));
        if !is_structure {
            log::debug!("skipping {}", file_path.display());
            continue;
        }

        solve_files(file_path, words, None, common)?;
        solved += 1;
    }

    log::info!("solved {solved} grids below {}", path.display());
    Ok(())
}

/// Writes a completion script for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

/// Prints a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a statistic line together with its rate per second.
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    crossword: &Crossword,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let crossings = (0..crossword.variables().len())
        .map(|x| crossword.neighbors(x).len())
        .sum::<usize>()
        / 2;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Grid", format!("{}x{}", crossword.width(), crossword.height()));
    stat_line("Variables", crossword.variables().len());
    stat_line("Crossings", crossings);
    stat_line("Words", crossword.words().len());

    println!("========================[ Search Statistics ]========================");
    stat_line("Pruned by length", s.node_pruned);
    stat_line("Pruned by arc consistency", s.arc_pruned);
    stat_line_with_rate("Revisions", s.revisions, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Consistency checks", s.consistency_checks, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Max depth", s.max_depth);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURE: &str = "#___#\n#_##_\n#_##_\n#_##_\n#____\n";
    const WORDS: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";

    #[test]
    fn test_parse_positional() {
        let cli = Cli::try_parse_from(["crossword", "s.txt", "w.txt"]).unwrap();

        assert_eq!(cli.structure, Some(PathBuf::from("s.txt")));
        assert_eq!(cli.words, Some(PathBuf::from("w.txt")));
        assert!(cli.command.is_none());
        assert!(cli.common().verify);
        assert_eq!(cli.common().propagator, PropagatorType::Ac3);
    }

    #[test]
    fn test_structure_requires_words() {
        assert!(Cli::try_parse_from(["crossword", "s.txt"]).is_err());
    }

    #[test]
    fn test_parse_file_command() {
        let cli = Cli::try_parse_from([
            "crossword",
            "file",
            "--structure",
            "s.txt",
            "--words",
            "w.txt",
            "--output",
            "out.txt",
            "--verify",
            "false",
            "--variable-selection",
            "fixed",
            "--value-ordering",
            "domain",
            "--propagator",
            "sweep",
        ])
        .unwrap();

        let Some(Commands::File { output, .. }) = &cli.command else {
            panic!("expected the file command");
        };
        assert_eq!(output.as_deref(), Some(Path::new("out.txt")));

        let common = cli.common();
        assert!(!common.verify);
        assert!(common.stats);
        assert_eq!(common.variable_selection, VariableSelectionType::Fixed);
        assert_eq!(common.value_ordering, ValueOrderingType::Domain);
        assert_eq!(common.propagator, PropagatorType::Sweep);
    }

    #[test]
    fn test_parse_text_input() {
        let (structure, words) = parse_text_input("#_\\n__", "cat dog,\nCOW");

        assert_eq!(structure, "#_\n__");
        assert_eq!(words, "cat\ndog\nCOW");
    }

    #[test]
    fn test_solve() {
        let crossword = Crossword::new(STRUCTURE, WORDS).unwrap();

        let (solution, _, stats) = solve(&crossword, &CommonOptions::default()).unwrap();

        let solution = solution.unwrap();
        assert_eq!(verify_solution(&crossword, Some(&solution)), Ok(()));
        assert_eq!(solution.word(0), Some("SEVEN"));
        assert!(stats.node_pruned > 0);
    }

    #[test]
    fn test_verify_rejects_bad_fill() {
        let crossword = Crossword::new(STRUCTURE, WORDS).unwrap();
        let bad = Solution::new(
            crossword
                .variables()
                .iter()
                .map(|v| (*v, "X".repeat(v.length)))
                .collect(),
        );

        assert!(verify_solution(&crossword, Some(&bad)).is_err());
        assert_eq!(verify_solution(&crossword, None), Ok(()));
    }

    #[test]
    fn test_solve_dir_rejects_files() {
        let result = solve_dir(Path::new("Cargo.toml"), Path::new("w.txt"), &CommonOptions::default());
        assert!(result.is_err());
    }
}
