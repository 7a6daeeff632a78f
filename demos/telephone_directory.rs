use clap::Parser;
use probe_hash::Directory;
use probe_hash::HashTable;
use probe_hash::SlotView;
use probe_hash::StrategyKind;
use probe_hash::key_hasher::CharSum;

const SAMPLE: [(&str, u64); 7] = [
    ("Alice", 1234567890),
    ("Bob", 9876543210),
    ("Charlie", 5551234567),
    ("David", 6667778888),
    ("Eve", 1112223333),
    ("Frank", 4445556666),
    ("Grace", 7778889999),
];

#[derive(Parser, Debug)]
struct Args {
    /// Slots per table.
    #[arg(short = 's', long = "size", default_value_t = 10)]
    size: usize,

    /// Names to look up in every table.
    #[arg(long = "search", default_values_t = ["Charlie".to_string(), "Zoe".to_string()])]
    search: Vec<String>,

    /// Name to delete before the lookups.
    #[arg(short = 'd', long = "delete")]
    delete: Option<String>,

    /// Strategy whose table is shown in full; all are shown when omitted.
    #[arg(long = "show")]
    show: Option<StrategyKind>,
}

fn display(table: &HashTable<String, u64, CharSum>) {
    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("HASH TABLE ({})", table.strategy());
    println!("{rule}");
    println!("Index\tContent");
    println!("{}", "-".repeat(50));

    for (index, slot) in table.snapshot() {
        let content = match slot {
            SlotView::Empty => "-".to_string(),
            SlotView::Tombstone => "<deleted>".to_string(),
            SlotView::Occupied { key, value } => format!("{key}: {value}"),
            SlotView::Chain(chain) if chain.is_empty() => "-".to_string(),
            SlotView::Chain(chain) => chain
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect::<Vec<_>>()
                .join(" -> "),
        };
        println!("{index}\t{content}");
    }
    println!("{rule}");
}

fn compare(directory: &Directory<String, u64, CharSum>, name: &str) {
    let rule = "=".repeat(60);
    println!("\nSearching for '{name}'...");
    println!("{rule}");
    println!("COMPARISON OF COLLISION HANDLING METHODS");
    println!("{rule}");
    println!("Method\t\t\tResult\t\tComparisons");
    println!("{}", "-".repeat(60));
    for row in directory.compare(name) {
        let status = if row.found { "Found" } else { "Not found" };
        println!("{:<20}\t{status:<10}\t{}", row.strategy, row.comparisons);
    }
    println!("{rule}");
}

fn main() -> Result<(), probe_hash::TableError> {
    let args = Args::parse();

    println!("{}", "=".repeat(60));
    println!("TELEPHONE DIRECTORY DEMONSTRATION");
    println!("{}", "=".repeat(60));

    let mut directory = Directory::new(args.size, CharSum)?;

    println!("Inserting sample data...");
    for (name, number) in SAMPLE {
        for (strategy, result) in directory.insert(name.to_string(), number) {
            if let Err(e) = result {
                println!("Failed to insert {name} using {strategy}: {e}");
            }
        }
    }

    if let Some(name) = &args.delete {
        for (strategy, result) in directory.delete(name.as_str()) {
            match result {
                Ok(number) => println!("Deleted {name}: {number} from {strategy}"),
                Err(e) => println!("Could not delete {name} from {strategy}: {e}"),
            }
        }
    }

    match args.show {
        Some(strategy) => display(directory.table(strategy)),
        None => directory.tables().for_each(display),
    }

    for name in &args.search {
        compare(&directory, name);
    }

    for stats in directory.stats_all() {
        println!("\n{stats}");
    }

    Ok(())
}
