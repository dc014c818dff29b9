use amphipod_solver::scramble::shuffled_rooms;
use amphipod_solver::solver::{Outcome, Search, SearchConfig};
use amphipod_solver::state::State;
use amphipod_solver::topology::Topology;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve seeded random folded burrows and report statistics", long_about = None)]
struct Args {
    /// Number of random burrows to solve
    #[clap(short, long, default_value_t = 20)]
    count: u64,

    /// Seed of the first burrow; burrow `i` uses `seed + i`
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Skip a burrow after expanding this many states
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Log search progress
    #[clap(short, long)]
    verbose: bool,
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

    let burrow = Topology::folded();
    let mut config = SearchConfig::default();
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }

    println!("Solving {} random burrows...", args.count);

    let mut costs = Vec::new();
    let mut expansions = Vec::new();
    let mut unsolvable = 0;
    let mut abandoned = 0;

    for i in 0..args.count {
        let seed = args.seed + i;
        let mut rng = SmallRng::seed_from_u64(seed);
        let initial: State<8> = match shuffled_rooms(burrow, &mut rng) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("Seed {}: {}", seed, e);
                continue;
            }
        };

        let mut search = Search::new(burrow, config.clone());
        match search.run(initial) {
            Ok(Outcome::Solved(solution)) => {
                println!(
                    "  Seed: {:<6} Cost: {:<8} Moves: {:<4} Expanded: {}",
                    seed,
                    solution.cost,
                    solution.moves.len(),
                    solution.expansions
                );
                costs.push(solution.cost);
                expansions.push(solution.expansions);
            }
            Ok(Outcome::Unsolvable { expansions }) => {
                println!("  Seed: {:<6} unsolvable after {} expansions", seed, expansions);
                unsolvable += 1;
            }
            Err(e) => {
                println!("  Seed: {:<6} {}", seed, e);
                abandoned += 1;
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Solved: {}, unsolvable: {}, abandoned: {}", costs.len(), unsolvable, abandoned);
    if costs.is_empty() {
        return;
    }

    let avg_cost = costs.iter().map(|&c| c as f64).sum::<f64>() / costs.len() as f64;
    let avg_expansions = expansions.iter().sum::<usize>() as f64 / expansions.len() as f64;
    println!("Average cost: {:.2}", avg_cost);
    println!("Average expansions: {:.2}", avg_expansions);
    println!(
        "Cost range: {} - {}",
        costs.iter().min().copied().unwrap_or_default(),
        costs.iter().max().copied().unwrap_or_default()
    );
}
