//! Prints the home page of the dashboard for a feed on disk or on the web.
//!
//! cargo run --example home_summary -- ./public/data
//! cargo run --example home_summary -- https://example.org/data/

use shanghai_tourist::{Dashboard, DashboardError, HomeView};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    let location = env::args().nth(1).unwrap_or_else(|| "data".to_string());

    let home = if location.starts_with("http://") || location.starts_with("https://") {
        Dashboard::with_base_url(&location)?.home_view().call().await
    } else {
        Dashboard::with_data_dir(PathBuf::from(&location))
            .await?
            .home_view()
            .call()
            .await
    };

    print_home(&home);
    Ok(())
}

fn print_home(home: &HomeView) {
    if home.is_empty() {
        println!("No daily data available.");
        return;
    }

    let dates: Vec<String> = home.dates.iter().map(|d| d.to_string()).collect();
    println!("Loaded days: {}", dates.join(", "));

    if let Some(summary) = &home.summary {
        println!("\n--- {} ---", summary.date);
        println!("Sites:    {}", summary.total_sites);
        println!("Open:     {}", summary.open_sites);
        println!("Visitors: {}", summary.total_visitors);
        if let Some(updated) = summary.last_updated {
            println!("Updated:  {}", updated.format("%Y-%m-%d %H:%M"));
        }
    }

    println!("\n--- Districts ---");
    for district in &home.district_stats {
        println!(
            "{:<10} sites {:>3}  open {:>3}  visitors {:>7}",
            district.name, district.total_sites, district.open_sites, district.total_visitors
        );
    }

    println!("\n--- Busiest open sites ---");
    for (rank, site) in home.top_sites.iter().enumerate() {
        println!(
            "{:>2}. {} ({}) {} visitors, {}",
            rank + 1,
            site.name,
            site.district_label(),
            site.visitor_count,
            site.comfort_label()
        );
    }
}
