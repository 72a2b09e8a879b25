use ahash::AHashSet as HashSet;
use num_bigint::BigInt;
use num_format::{CustomFormat, Grouping, ToFormattedString};
use steplife::Universe;

/// Largest bounding-box side that still gets a console render; anything
/// bigger falls back to a coordinate listing.
const RENDER_SIZE_MAX: i64 = 128;

/// How many coordinates to print before truncating the listing.
const PRINT_CELLS_MAX: usize = 256;

pub(super) fn print_stats(universe: &Universe) {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .unwrap();
    println!(
        "Generation {} | population {} | level {}",
        universe.generation().to_formatted_string(&fmt),
        universe.population().to_formatted_string(&fmt),
        universe.level(),
    );
    println!(
        "Nodes: {} live, {} created all-time, {:.1} MiB",
        universe.node_count().to_formatted_string(&fmt),
        universe.nodes_created().to_formatted_string(&fmt),
        universe.bytes_total() as f64 / (1 << 20) as f64,
    );
}

/// Renders the board to the console when it is small enough, otherwise
/// prints the live coordinates.
pub(super) fn print_board(universe: &Universe) {
    let list = universe.display_list();
    if list.is_empty() {
        println!("(empty board)");
        return;
    }

    let (mut min_x, mut min_y) = (list[0].0.clone(), list[0].1.clone());
    let (mut max_x, mut max_y) = (min_x.clone(), min_y.clone());
    for (x, y) in &list {
        if *x < min_x {
            min_x = x.clone();
        } else if *x > max_x {
            max_x = x.clone();
        }
        if *y < min_y {
            min_y = y.clone();
        } else if *y > max_y {
            max_y = y.clone();
        }
    }
    println!("Bounding box ({}, {}) to ({}, {})", min_x, min_y, max_x, max_y);

    let too_wide = &max_x - &min_x >= BigInt::from(RENDER_SIZE_MAX)
        || &max_y - &min_y >= BigInt::from(RENDER_SIZE_MAX);
    if too_wide {
        for (i, (x, y)) in list.iter().enumerate() {
            if i == PRINT_CELLS_MAX {
                println!("\n... and {} more cells", list.len() - PRINT_CELLS_MAX);
                return;
            }
            print!("({}, {}) ", x, y);
        }
        println!();
        return;
    }

    let alive: HashSet<(BigInt, BigInt)> = list.into_iter().collect();
    let mut y = min_y;
    while y <= max_y {
        let mut row = String::new();
        let mut x = min_x.clone();
        while x <= max_x {
            row.push(if alive.contains(&(x.clone(), y.clone())) {
                '*'
            } else {
                '_'
            });
            x += 1;
        }
        println!("{}", row);
        y += 1;
    }
}
