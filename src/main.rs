// Entry point and high-level CLI flow.
//
// One render is a single linear pass: cached load -> normalize ->
// partition -> summarize -> print metrics and tables -> export artifacts.
// Only the raw load is memoized; everything after it is recomputed per
// render from the immutable snapshot.
mod loader;
mod normalize;
mod output;
mod reports;
mod types;
mod util;

use std::io::{self, Write};
use types::{RAMBLER_STYLE, TWO_STORY_STYLE};

const SOURCE_PATH: &str = "Sold And Stats.csv";
const EXPORT_PATH: &str = "real_estate_analysis.csv";
const SUMMARY_PATH: &str = "summary.json";

fn print_banner() {
    println!("Bonney Lake Real Estate Analysis: Rambler vs 2-Story Homes\n");
    println!("Data Collection Criteria:");
    println!("- Square Footage: 1,800 - 2,200 sq ft");
    println!("- Time Frame: Sold within last 720 days");
    println!("- Location: Bonney Lake (98391)");
    println!("- Home Types: Single Story (Rambler) and Two Story homes only");
    println!("Analysis based on MLS data pulled October 2024\n");
    println!(
        "Important Note: this analysis represents typical rambler vs 2-story\n\
         sales in the area. Premium or luxury properties (large lots, desirable\n\
         sub-communities, detached garages or high-end finishes) may command\n\
         different premiums than shown here. Use as a general market reference\n\
         only, not for specific property valuations.\n"
    );
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the menu after generating a report.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the CSV (memoized) and print row diagnostics.
fn handle_load() {
    match loader::load_cached(SOURCE_PATH) {
        Ok(raw) => {
            let table = normalize::normalize_table(&raw);
            let subsets = reports::partition_by_style(&table, &[RAMBLER_STYLE, TWO_STORY_STYLE]);
            println!(
                "Processing dataset... ({} rows loaded: {} ramblers, {} two-story)",
                util::format_int(table.len() as i64),
                util::format_int(subsets[0].len() as i64),
                util::format_int(subsets[1].len() as i64)
            );
            let dirty = table
                .iter()
                .filter(|r| r.selling_price.is_none() || r.square_footage.is_none())
                .count();
            if dirty > 0 {
                println!(
                    "Note: {} rows have an unparsable price or square footage; they stay in the table but are excluded from averages.",
                    util::format_int(dirty as i64)
                );
            }
            println!();
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: run the full comparison and write the artifacts.
///
/// This function is intentionally side-effectful:
/// - prints the comparison metrics and both tables,
/// - writes the filtered table as CSV,
/// - and writes a JSON summary.
fn handle_generate_report() {
    let raw = match loader::load_cached(SOURCE_PATH) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
            return;
        }
    };
    let table = normalize::normalize_table(&raw);
    let subsets = reports::partition_by_style(&table, &[RAMBLER_STYLE, TWO_STORY_STYLE]);
    let rambler_stats = reports::summarize(&subsets[0]);
    let two_story_stats = reports::summarize(&subsets[1]);
    let premium = reports::premium_pct(&rambler_stats, &two_story_stats);

    println!("Generating report...\n");
    println!("Rambler vs 2-Story Comparison");
    println!("({} vs {})\n", RAMBLER_STYLE, TWO_STORY_STYLE);
    output::preview_table_rows(&reports::comparison_rows(&rambler_stats, &two_story_stats), 2);

    match premium {
        Some(p) => println!("Rambler Premium: {}%\n", util::format_number(p, 1)),
        None => println!("Rambler Premium: undefined (no usable two-story average to compare against)\n"),
    }

    let sorted = reports::sorted_by_price_desc(&subsets);
    println!("Sold Listings (by Selling Price, descending)\n");
    output::preview_table_rows(&reports::listing_rows(&sorted), 10);

    let filtered = reports::filtered_in_order(&table, &[RAMBLER_STYLE, TWO_STORY_STYLE]);
    if let Err(e) = output::write_csv(EXPORT_PATH, &reports::export_rows(&filtered)) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full filtered table exported to {})", EXPORT_PATH);

    let summary = reports::analysis_summary(&rambler_stats, &two_story_stats, premium);
    if let Err(e) = output::write_json(SUMMARY_PATH, &summary) {
        eprintln!("Write error: {}", e);
    }
    println!("(Summary stats exported to {})\n", SUMMARY_PATH);
}

fn main() {
    print_banner();
    loop {
        println!("Select an option:");
        println!("[1] Load the file");
        println!("[2] Generate report");
        println!("[3] Refresh data\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_report();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => {
                loader::invalidate_cache();
                println!("Cache cleared, reloading from disk.");
                handle_load();
            }
            _ => {
                println!("Invalid choice. Please enter 1, 2, or 3.\n");
            }
        }
    }
}
