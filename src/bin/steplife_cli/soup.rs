use crate::util::print_stats;
use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use steplife::{Universe, UniverseConfig};

#[derive(Args, Debug)]
pub(super) struct SoupArgs {
    /// Side length of the random square, centered on the origin
    #[arg(short, long, default_value_t = 64)]
    size: u32,

    /// Probability that a cell starts alive
    #[arg(short, long, default_value_t = 0.3)]
    density: f64,

    /// Seed for the random number generator; seeds from the OS if absent
    #[arg(long)]
    seed: Option<u64>,

    /// How many generations to advance
    #[arg(short, long, default_value_t = 1000)]
    generations: u64,

    /// Maximum memory (in MiB) for the node store
    #[arg(short, long, default_value_t = 256)]
    mem_limit_mib: u32,
}

pub(super) fn run(args: SoupArgs) -> Result<()> {
    let mut rng = if let Some(seed) = args.seed {
        rand_chacha::ChaCha8Rng::seed_from_u64(seed)
    } else {
        rand_chacha::ChaCha8Rng::from_os_rng()
    };

    let half = i64::from(args.size) / 2;
    let mut cells = vec![];
    for y in -half..half {
        for x in -half..half {
            if rng.random_bool(args.density) {
                cells.push((x, y));
            }
        }
    }
    println!(
        "Soup: {} live cells in a {}x{} square",
        cells.len(),
        args.size,
        args.size
    );

    let mut universe = Universe::with_config(UniverseConfig {
        mem_limit_mib: args.mem_limit_mib,
        ..UniverseConfig::default()
    });
    universe.set_cells_alive(cells)?;

    let timer = std::time::Instant::now();
    for _ in 0..args.generations {
        universe.step()?;
    }
    let elapsed = timer.elapsed().as_secs_f64();
    println!(
        "Advanced {} generations in {:.3} secs ({:.0} gens/sec)",
        args.generations,
        elapsed,
        args.generations as f64 / elapsed
    );
    print_stats(&universe);
    Ok(())
}
