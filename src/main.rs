use std::{process::ExitCode, str::FromStr, time::Instant};

use clap::Parser;
use log::info;
use rand::{rngs::SmallRng, SeedableRng};

use eight_puzzle::{solve_with, Error, Heuristic, PuzzleState, SolverConfig, Strategy};

/// Solve the 8-puzzle with breadth-first, depth-first, iterative-deepening or
/// A* search.
///
/// States are nine digits in row-major order with 0 as the blank, e.g.
/// `312045678` or `"3 1 2 / 0 4 5 / 6 7 8"`.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Initial state; required unless --random is given
    #[clap(short, long, required_unless_present = "random")]
    initial: Option<PuzzleState>,

    /// Start from a random solvable state instead of --initial
    #[clap(short, long, conflicts_with = "initial")]
    random: bool,

    /// Seed for --random
    #[clap(long, requires = "random")]
    seed: Option<u64>,

    #[clap(short, long, default_value = "012345678")]
    goal: PuzzleState,

    /// bfs, dfs, ids, astar or all
    #[clap(short, long, default_value = "all")]
    strategy: Selection,

    /// Heuristic for A*: manhattan or euclidean
    #[clap(long, default_value = "manhattan")]
    heuristic: Heuristic,

    /// Give up after this many node expansions
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Largest depth limit tried by iterative deepening
    #[clap(long, default_value_t = SolverConfig::default().depth_ceiling)]
    depth_ceiling: usize,

    /// Print every state along the solution
    #[clap(long)]
    show_path: bool,
}

/// Which strategies a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    One(Strategy),
    All,
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Selection, Error> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::One)
        }
    }
}

#[auto_enums::auto_enum(Iterator)]
fn selected(selection: Selection) -> impl Iterator<Item = Strategy> {
    match selection {
        Selection::One(s) => std::iter::once(s),
        Selection::All => Strategy::ALL.into_iter(),
    }
}

fn run(args: Args) -> Result<(), Error> {
    let initial = match args.initial {
        Some(state) => state,
        None => {
            let mut rng = match args.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            PuzzleState::random_solvable(&mut rng, &args.goal)
        }
    };
    initial.ensure_solvable_to(&args.goal)?;

    println!("Initial:");
    println!("{}", initial);
    println!("----");
    println!("Goal:");
    println!("{}", args.goal);
    println!("----");

    for strategy in selected(args.strategy) {
        let config = SolverConfig {
            strategy,
            heuristic: Some(args.heuristic),
            max_expansions: args.max_expansions,
            depth_ceiling: args.depth_ceiling,
        };

        info!("running {}", strategy);
        let started = Instant::now();
        let result = solve_with(&config, &initial, &args.goal);
        let elapsed = started.elapsed();

        match strategy {
            Strategy::AStar => println!("{} ({}):", strategy, args.heuristic),
            _ => println!("{}:", strategy),
        }

        if result.is_solved() {
            println!("Found a solution in {} moves.", result.cost);
            println!(
                "Expanded {} nodes, search depth {}, took {:.3?}.",
                result.nodes_expanded, result.depth, elapsed
            );
            if result.move_path.len() <= 64 {
                let moves: Vec<String> = result.move_path.iter().map(|m| m.to_string()).collect();
                println!("Moves: {}", moves.join(" "));
            }
            if args.show_path {
                for state in &result.state_path {
                    println!();
                    println!("{}", state);
                }
            }
        } else if result.budget_exhausted {
            println!(
                "Gave up after {} expansions ({:.3?}).",
                result.nodes_expanded, elapsed
            );
        } else {
            println!(
                "No solution found after {} expansions ({:.3?}).",
                result.nodes_expanded, elapsed
            );
        }
        println!("----");
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
