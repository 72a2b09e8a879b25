use crate::patterns::{builtin, BUILTIN_NAMES};
use crate::rle;
use crate::util::{print_board, print_stats};
use anyhow::Result;
use clap::Args;
use steplife::{GcPolicy, Universe, UniverseConfig};

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// Path to an RLE pattern file, or one of the built-in patterns:
    /// blinker, block, glider, r-pentomino, weekender, siesta
    pattern: String,

    /// How many generations to advance
    #[arg(short, long, default_value_t = 100)]
    generations: u64,

    /// Where to place the pattern's top-left corner
    #[arg(short = 'x', long, default_value_t = 0)]
    origin_x: i64,

    /// Where to place the pattern's top-left corner
    #[arg(short = 'y', long, default_value_t = 0)]
    origin_y: i64,

    /// Run the garbage collector every N generations instead of by node count
    #[arg(long)]
    gc_generations: Option<u64>,

    /// Node-count threshold for the garbage collector
    #[arg(long)]
    gc_nodes: Option<usize>,

    /// Maximum memory (in MiB) for the node store
    #[arg(short, long, default_value_t = 256)]
    mem_limit_mib: u32,

    /// Always print live coordinates instead of rendering the board
    #[arg(short, long)]
    list: bool,
}

pub(super) fn run(args: RunArgs) -> Result<()> {
    let mut config = UniverseConfig {
        mem_limit_mib: args.mem_limit_mib,
        ..UniverseConfig::default()
    };
    if let Some(n) = args.gc_generations {
        config.gc_policy = GcPolicy::EveryGenerations(n);
    } else if let Some(t) = args.gc_nodes {
        config.gc_policy = GcPolicy::NodeThreshold(t);
    }

    let cells = match builtin(&args.pattern) {
        Some(cells) => cells
            .into_iter()
            .map(|(x, y)| (x + args.origin_x, y + args.origin_y))
            .collect(),
        None => rle::read_file(&args.pattern, args.origin_x, args.origin_y)?,
    };
    if cells.is_empty() {
        println!(
            "Pattern {} has no live cells (built-ins: {})",
            args.pattern, BUILTIN_NAMES
        );
        return Ok(());
    }

    let mut universe = Universe::with_config(config);
    universe.set_cells_alive(cells)?;

    let timer = std::time::Instant::now();
    for _ in 0..args.generations {
        universe.step()?;
    }
    println!(
        "Advanced {} generations in {:.3} secs",
        args.generations,
        timer.elapsed().as_secs_f64()
    );

    print_stats(&universe);
    if args.list {
        for (x, y) in universe.display_list() {
            println!("({}, {})", x, y);
        }
    } else {
        print_board(&universe);
    }
    Ok(())
}
