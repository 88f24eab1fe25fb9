mod config;
mod domain;
mod infrastructure;
mod services;

use std::io::{self, Write};

use config::Config;
use infrastructure::auth::AuthCodeFlow;
use infrastructure::charts::{ChartClient, extract_track_titles};
use infrastructure::spotify::SpotifyClient;
use services::playlist_service::PlaylistService;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let date = prompt_for_date()?;

    let http = reqwest::Client::new();

    let charts = ChartClient::new(http.clone());
    let page = charts.fetch_chart(&date).await?;
    let titles = extract_track_titles(&page);
    if titles.is_empty() {
        tracing::warn!("No track titles found on the chart page; the playlist will be empty");
    } else {
        tracing::info!("Found {} chart entries", titles.len());
    }

    let auth = AuthCodeFlow::new(http, &config);
    let spotify = SpotifyClient::connect(&auth).await?;

    let service = PlaylistService::new(spotify);
    let summary = service.build(&date, titles).await?;

    println!("Created playlist {summary}");
    Ok(())
}

fn prompt_for_date() -> Result<String, io::Error> {
    print!("Which week do you want to travel back to? (YYYY-MM-DD): ");
    io::stdout().flush()?;

    let mut date = String::new();
    io::stdin().read_line(&mut date)?;
    Ok(date.trim().to_owned())
}
