use clap::Parser;
use probe_hash::HashTable;
use probe_hash::StrategyKind;
use probe_hash::TableError;
use probe_hash::key_hasher::DefaultKeyHasher;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 's', long = "size", default_value_t = 1009)]
    size: usize,

    /// Fraction of the table to fill before reporting.
    #[arg(short = 'f', long = "fill", default_value_t = 0.9)]
    fill: f64,

    /// Fraction of inserted keys deleted again, leaving tombstones behind.
    #[arg(short = 'd', long = "delete", default_value_t = 0.1)]
    delete: f64,

    #[arg(long = "seed", default_value_t = 0x5eed)]
    seed: u64,
}

fn print_histogram(hist: &[usize]) {
    let max = hist.iter().copied().max().unwrap_or(0);
    if max == 0 {
        println!("probe histogram: empty");
        return;
    }

    let max_bar = 60usize;
    for (comparisons, &count) in hist.iter().enumerate().skip(1) {
        let width = (count * max_bar).div_ceil(max);
        println!("{comparisons:>3} | {} ({count})", "█".repeat(width));
    }
}

fn main() {
    let args = Args::parse();
    let target = ((args.size as f64) * args.fill) as usize;

    for strategy in StrategyKind::ALL {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        let mut table: HashTable<u64, u64, _> =
            HashTable::new(args.size, strategy, DefaultKeyHasher::default())
                .expect("size must be non-zero");

        let mut inserted = Vec::with_capacity(target);
        let mut num_failures = 0;
        while inserted.len() < target && num_failures < args.size {
            let key = rng.random::<u64>();
            match table.insert(key, key) {
                Ok(_) => inserted.push(key),
                Err(TableError::TableFull { .. }) => num_failures += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        let deletes = (inserted.len() as f64 * args.delete) as usize;
        for key in inserted.iter().take(deletes) {
            table.delete(key).expect("inserted key must be present");
        }

        println!("\n{}", table.stats());
        print_histogram(&table.probe_histogram());
        println!(
            "Failed inserts: {} ({:.02}% of attempts)",
            num_failures,
            num_failures as f64 / (inserted.len() + num_failures) as f64 * 100.0
        );
    }
}
