//! End to end tests for the crossword solver: grids parsed from text or the
//! files under `data/`, solved through the public API.

use crossword_csp::crossword::{Crossword, LetterGrid};
use crossword_csp::csp::backtracking::Backtracking;
use crossword_csp::csp::propagation::PropagatorType;
use crossword_csp::csp::puzzle::Puzzle;
use crossword_csp::csp::solver::{DynamicConfig, Solver, solve};
use crossword_csp::csp::value_ordering::ValueOrderingType;
use crossword_csp::csp::variable::{Direction, Overlap, VarId, Variable};
use crossword_csp::csp::variable_selection::VariableSelectionType;

/// Two slots of length three sharing their first cell, built by hand.
struct Corner {
    variables: Vec<Variable>,
    words: Vec<String>,
}

impl Corner {
    fn new(words: &[&str]) -> Self {
        Self {
            variables: vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 0, Direction::Down, 3),
            ],
            words: words.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Puzzle for Corner {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn width(&self) -> usize {
        3
    }

    fn height(&self) -> usize {
        3
    }

    fn words(&self) -> &[String] {
        &self.words
    }

    fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        (x != y).then_some(Overlap::new(0, 0))
    }
}

fn all_configs() -> Vec<(VariableSelectionType, ValueOrderingType, PropagatorType)> {
    let mut configs = Vec::new();
    for selection in [VariableSelectionType::Mrv, VariableSelectionType::Fixed] {
        for ordering in [ValueOrderingType::Lcv, ValueOrderingType::Domain] {
            for propagator in [PropagatorType::Ac3, PropagatorType::Sweep] {
                configs.push((selection, ordering, propagator));
            }
        }
    }
    configs
}

fn dynamic_solver<P: Puzzle + ?Sized>(
    puzzle: &P,
    (selection, ordering, propagator): (VariableSelectionType, ValueOrderingType, PropagatorType),
) -> Backtracking<DynamicConfig> {
    Backtracking::<DynamicConfig>::from_parts(
        puzzle,
        selection.to_impl(),
        ordering.to_impl(),
        propagator.to_impl(),
    )
    .unwrap()
}

#[test]
fn test_corner_fills_with_distinct_words() {
    let puzzle = Corner::new(&["CAT", "COW"]);

    let solution = solve(&puzzle).unwrap().unwrap();

    let mut words = vec![solution[0].to_string(), solution[1].to_string()];
    words.sort();
    assert_eq!(words, vec!["CAT", "COW"]);
    assert_eq!(solution.verify(&puzzle), Ok(()));
}

#[test]
fn test_corner_never_reuses_a_word() {
    for config in all_configs() {
        let puzzle = Corner::new(&["CAT", "COW"]);
        let mut solver = dynamic_solver(&puzzle, config);

        let solution = solver.solve().unwrap();

        assert_ne!(&solution[0], &solution[1], "{config:?}");
    }
}

#[test]
fn test_corner_without_a_shared_letter() {
    // Each word supports itself on the shared cell, so only the search
    // rules the fill out.
    let puzzle = Corner::new(&["CAT", "DOG"]);
    let mut solver: Backtracking = Solver::new(&puzzle).unwrap();

    assert_eq!(solver.solve(), None);

    let stats = solver.stats();
    assert_eq!(stats.decisions, stats.backtracks);
    assert_eq!(stats.arc_pruned, 0);
}

#[test]
fn test_arc_consistency_proves_no_solution() {
    let crossword = Crossword::from_files("data/structure2.txt", "data/words0.txt").unwrap();
    let mut solver: Backtracking = Solver::new(&crossword).unwrap();

    assert_eq!(solver.solve(), None);
    assert!(solver.domains.any_empty());

    let stats = solver.stats();
    assert_eq!(stats.decisions, 0);
    assert_eq!(stats.node_pruned, 13);
}

#[test]
fn test_isolated_slot_takes_any_word() {
    let crossword = Crossword::new("____\n", "word\ncode\n").unwrap();

    let solution = solve(&crossword).unwrap().unwrap();

    assert_eq!(solution.len(), 1);
    assert!(["WORD", "CODE"].contains(&&solution[0]));
}

#[test]
fn test_fixture_has_unique_fill() {
    let crossword = Crossword::from_files("data/structure0.txt", "data/words0.txt").unwrap();

    for config in all_configs() {
        let solution = dynamic_solver(&crossword, config).solve().unwrap();

        assert_eq!(solution.verify(&crossword), Ok(()), "{config:?}");
        assert_eq!(
            solution.word_for(&Variable::new(0, 1, Direction::Down, 5)),
            Some("SEVEN")
        );
        assert_eq!(
            solution.word_for(&Variable::new(0, 1, Direction::Across, 3)),
            Some("SIX")
        );
        assert_eq!(
            solution.word_for(&Variable::new(1, 4, Direction::Down, 4)),
            Some("FIVE")
        );
        assert_eq!(
            solution.word_for(&Variable::new(4, 1, Direction::Across, 4)),
            Some("NINE")
        );
    }
}

#[test]
fn test_rendered_fixture() {
    let crossword = Crossword::from_files("data/structure0.txt", "data/words0.txt").unwrap();
    let solution = solve(&crossword).unwrap().unwrap();

    let grid = LetterGrid::new(&crossword, &solution);

    assert_eq!(grid.to_string(), "█SIX█\n█E██F\n█V██I\n█E██V\n█NINE\n");
}

#[test]
fn test_larger_grid_every_strategy() {
    let crossword = Crossword::from_files("data/structure1.txt", "data/words1.txt").unwrap();
    assert_eq!(crossword.variables().len(), 6);

    for config in all_configs() {
        let mut solver = dynamic_solver(&crossword, config);
        let solution = solver.solve().unwrap();

        assert_eq!(solution.verify(&crossword), Ok(()), "{config:?}");
        let stats = solver.stats();
        assert!(stats.max_depth <= crossword.variables().len());
        assert!(stats.decisions >= crossword.variables().len());
    }
}

#[test]
fn test_propagators_reach_the_same_domains() {
    let crossword = Crossword::from_files("data/structure1.txt", "data/words1.txt").unwrap();

    let mut ac3 = dynamic_solver(
        &crossword,
        (VariableSelectionType::Mrv, ValueOrderingType::Lcv, PropagatorType::Ac3),
    );
    let mut sweep = dynamic_solver(
        &crossword,
        (VariableSelectionType::Mrv, ValueOrderingType::Lcv, PropagatorType::Sweep),
    );

    for solver in [&mut ac3, &mut sweep] {
        solver.enforce_node_consistency();
        assert!(solver.enforce_arc_consistency(None));
    }

    assert_eq!(ac3.domains, sweep.domains);
    assert_eq!(ac3.stats().arc_pruned, sweep.stats().arc_pruned);
}

#[test]
fn test_pruning_only_shrinks_domains() {
    let crossword = Crossword::from_files("data/structure1.txt", "data/words1.txt").unwrap();
    let mut solver: Backtracking = Solver::new(&crossword).unwrap();

    let full = solver.domains.clone();
    solver.enforce_node_consistency();
    let after_node = solver.domains.clone();
    solver.enforce_arc_consistency(None);

    for var in 0..crossword.variables().len() {
        let length = crossword.variables()[var].length;
        assert!(after_node.iter(var).all(|w| full.contains(var, w)));
        assert!(solver.domains.iter(var).all(|w| after_node.contains(var, w)));
        assert!(
            solver
                .domains
                .iter(var)
                .all(|w| solver.dictionary.word_len(w) == length)
        );
    }
}

#[test]
fn test_solving_is_deterministic() {
    let crossword = Crossword::from_files("data/structure1.txt", "data/words1.txt").unwrap();

    let first = solve(&crossword).unwrap();
    let second = solve(&crossword).unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_missing_words_file() {
    let result = Crossword::from_files("data/structure0.txt", "data/missing.txt");
    let error = result.unwrap_err().to_string();

    assert!(error.contains("missing.txt"), "{error}");
}
