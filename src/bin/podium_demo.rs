//! Prints a podium prediction and the actual classification for one race.
//!
//! Usage: `podium_demo <season> [round]`

use anyhow::Context;
use podium_predictor::{config::PredictorConfig, predict_podium, F1DataSource, JolpicaClient};
use podium_predictor::request::DEFAULT_ROUND;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let season = args.next().context("usage: podium_demo <season> [round]")?;
    let round = match args.next() {
        Some(r) => r.parse::<u32>().with_context(|| format!("round must be a number, got {r:?}"))?,
        None => DEFAULT_ROUND,
    };

    let cfg = PredictorConfig::load_default()?;
    let client = JolpicaClient::new(&cfg)?;

    let prediction = predict_podium(&client, &season, round).await;
    println!(
        "{} round {} ({}) - predicted podium [{:?}]",
        season,
        round,
        prediction.race_name.as_deref().unwrap_or("unknown race"),
        prediction.origin
    );
    for p in &prediction.podium {
        println!(
            "  P{}  {:<22} {:<18} score {:>8.1}",
            p.position.as_u8(),
            p.driver.name,
            p.driver.team,
            p.score
        );
    }

    match client.race_results(&season, round).await {
        Ok(info) => {
            println!("actual classification:");
            for r in info.results.iter().take(3) {
                println!("  P{}  {}", r.position, r.driver.name);
            }
        }
        Err(e) if e.is_not_found() => println!("no classification yet"),
        Err(e) => println!("classification unavailable: {e}"),
    }

    Ok(())
}
