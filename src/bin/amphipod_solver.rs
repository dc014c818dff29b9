use amphipod_solver::solver::{Outcome, Search, SearchConfig};
use amphipod_solver::state::State;
use amphipod_solver::topology::Topology;
use amphipod_solver::utils::{depth_of_rows, state_from_str_array, unfold_rows};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the burrow drawing (rooms two or four cells deep)
    burrow_file: PathBuf,

    /// Insert the two extra room rows below the first room row before solving
    #[clap(short, long)]
    unfold: bool,

    /// Give up after expanding this many states
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Give up after this many seconds
    #[clap(long)]
    deadline_secs: Option<u64>,

    /// Print every move of the solution with the burrow after it
    #[clap(short, long)]
    show_path: bool,

    /// Log search progress
    #[clap(short, long)]
    verbose: bool,
}

fn read_burrow_rows(path: &PathBuf, unfold: bool) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let rows: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if unfold {
        Ok(unfold_rows(&rows))
    } else {
        Ok(rows.iter().map(|row| row.to_string()).collect())
    }
}

fn solve_rows<const P: usize>(
    topology: &Topology,
    rows: &[&str],
    config: SearchConfig,
    show_path: bool,
) -> Result<(), String> {
    let initial: State<P> = state_from_str_array(topology, rows)
        .map_err(|e| format!("Invalid burrow layout: {}", e))?;
    println!("Initial burrow:\n{}", topology.render(&initial));

    let mut search = Search::new(topology, config);
    let outcome = search
        .run(initial)
        .map_err(|e| format!("Search abandoned: {}", e))?;

    match outcome {
        Outcome::Solved(solution) => {
            println!("Minimal cost: {}", solution.cost);
            println!("States expanded: {}", solution.expansions);
            if show_path {
                println!("\nMoves ({}):", solution.moves.len());
                let mut state = initial;
                for (i, step) in solution.moves.iter().enumerate() {
                    state = state.with_move(step.pod.id, step.to);
                    println!(
                        "  Move {}: {} (pod {}) cell {} -> cell {}, cost {}",
                        i + 1,
                        step.pod.kind.to_char(),
                        step.pod.id,
                        step.from,
                        step.to,
                        step.cost
                    );
                    println!("{}", topology.render(&state));
                }
            }
        }
        Outcome::Unsolvable { expansions } => {
            println!("No solution exists ({} states expanded).", expansions);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    let rows = read_burrow_rows(&args.burrow_file, args.unfold).unwrap_or_else(|e| {
        eprintln!("{}: {}", args.burrow_file.display(), e);
        process::exit(1);
    });
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();

    let mut config = SearchConfig::default();
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    if let Some(secs) = args.deadline_secs {
        config = config.with_deadline(Duration::from_secs(secs));
    }

    let result = match depth_of_rows(&rows) {
        Some(2) => solve_rows::<8>(Topology::folded(), &rows, config, args.show_path),
        Some(4) => solve_rows::<16>(Topology::unfolded(), &rows, config, args.show_path),
        Some(depth) => Err(format!("Unsupported room depth {} (expected 2 or 4)", depth)),
        None => Err("Burrow drawing is too short".to_string()),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
