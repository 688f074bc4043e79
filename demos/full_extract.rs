use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use pickem_scraper::job::load;
use pickem_scraper::{
    CsvSink, ExtractConfig, ExtractJob, Geocode, GeocodeMapsClient, JsonSink, League,
    NoGeocoding, PickemClient, DEFAULT_WEEKS,
};

/// Scrape one league season from ESPN and write JSON and CSV tables
#[derive(Parser, Debug)]
#[command(name = "full_extract", about)]
struct Args {
    /// League to scrape; MLB and NBA need --game-ids
    #[arg(long, default_value = "CFB")]
    league: League,

    /// Season year
    #[arg(long)]
    year: i32,

    /// Number of schedule weeks to scrape
    #[arg(long, default_value_t = DEFAULT_WEEKS)]
    weeks: u32,

    /// Directory the tables are written to
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Pause between page requests, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Scrape these game ids instead of the weekly schedule
    #[arg(long, value_delimiter = ',')]
    game_ids: Vec<String>,

    /// geocode.maps.co API key; venues stay unlocated without one
    #[arg(long, env = "GEOCODE_API_KEY")]
    geocode_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> pickem_scraper::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let today = chrono::Local::now().date_naive();
    let config = ExtractConfig::new(args.league, args.year, today)
        .with_weeks(args.weeks)
        .with_request_delay(Duration::from_millis(args.delay_ms));

    match args.geocode_api_key.clone() {
        Some(key) => extract(config, GeocodeMapsClient::new(key), &args).await,
        None => extract(config, NoGeocoding, &args).await,
    }
}

async fn extract<G: Geocode>(
    config: ExtractConfig,
    geocode: G,
    args: &Args,
) -> pickem_scraper::Result<()> {
    let job = ExtractJob::new(PickemClient::new(), geocode, config);

    let mut json = JsonSink::new(args.output.join("json"));
    let dataset = if args.game_ids.is_empty() {
        job.run(&mut json).await?
    } else {
        job.run_from_ids(&args.game_ids, &mut json).await?
    };
    load(&dataset, &mut CsvSink::new(args.output.join("csv")))?;

    info!(
        games = dataset.games.len(),
        teams = dataset.teams.len(),
        locations = dataset.locations.len(),
        output = %args.output.display(),
        "extract finished"
    );
    Ok(())
}
