//! Prints the detail page of one site as JSON.
//!
//! cargo run --example site_detail -- ./public/data 474

use shanghai_tourist::{Dashboard, Navigator, Route, View};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| "data".to_string());
    let code = args.next().unwrap_or_else(|| "474".to_string());

    let dashboard = Dashboard::with_data_dir(PathBuf::from(data_dir)).await?;
    let navigator = Navigator::new(dashboard);

    let route = Route::parse(&format!("/spot/{}", code)).ok_or("invalid site code")?;
    let view = navigator.navigate(route).await.ok_or("navigation superseded")?;

    match view.as_ref() {
        View::Site(detail) => {
            println!("{}", serde_json::to_string_pretty(detail)?);
            let total = detail.comfort_total();
            for share in &detail.comfort_distribution {
                println!("{}: {:.1}%", share.label, share.percent(total));
            }
        }
        View::SiteUnavailable { code } => println!("No data for site {}", code),
        other => println!("Unexpected view: {:?}", other),
    }
    Ok(())
}
