use clap::{Parser, Subcommand};
use sgweather_core::config::request_timeout_from_env;
use sgweather_core::{ClientConfig, Metric, Settings, WeatherClient};

use crate::{render, serve};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sgweather", version, about = "Singapore real-time weather service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Complete weather overview across all sources.
    Weather,

    /// Rainfall summary, a specific station, or "all".
    Rainfall {
        /// Station id, name, alias, or "all"; omit for the summary.
        station: Vec<String>,
    },

    /// Wind speed summary, a specific station, or "all".
    WindSpeed {
        station: Vec<String>,
    },

    /// Wind direction summary, a specific station, or "all".
    WindDirection {
        station: Vec<String>,
    },

    /// Combined wind speed and direction view.
    Wind {
        station: Vec<String>,
    },

    /// Merged directory of all monitoring stations.
    Stations,

    /// Run the keep-alive HTTP endpoint for process monitors.
    Serve,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve => serve::run(Settings::from_env()?).await?,
            Command::Weather => {
                let snapshot = client()?.fetch_all().await;
                print_report(&render::weather_overview(&snapshot));
            }
            Command::Rainfall { station } => {
                metric_command(&client()?, Metric::Rainfall, &station).await;
            }
            Command::WindSpeed { station } => {
                metric_command(&client()?, Metric::WindSpeed, &station).await;
            }
            Command::WindDirection { station } => {
                metric_command(&client()?, Metric::WindDirection, &station).await;
            }
            Command::Wind { station } => {
                let query = join_query(&station);
                let client = client()?;
                let (speed, direction) = tokio::join!(
                    client.fetch(Metric::WindSpeed),
                    client.fetch(Metric::WindDirection)
                );
                print_report(&render::wind_report(
                    speed.as_ref(),
                    direction.as_ref(),
                    query.as_deref(),
                ));
            }
            Command::Stations => {
                let snapshot = client()?.fetch_all().await;
                print_report(&render::stations_list(&snapshot));
            }
        }

        Ok(())
    }
}

fn client() -> anyhow::Result<WeatherClient> {
    let config = ClientConfig::default().with_timeout(request_timeout_from_env());
    Ok(WeatherClient::new(config)?)
}

async fn metric_command(client: &WeatherClient, metric: Metric, station: &[String]) {
    let query = join_query(station);
    match client.fetch(metric).await {
        Some(data) => print_report(&render::metric_report(metric, &data, query.as_deref())),
        None => println!("{}", render::source_unavailable(metric)),
    }
}

/// Join multi-word station queries into one token, e.g.
/// `rainfall pasir ris` → "pasir ris".
fn join_query(args: &[String]) -> Option<String> {
    let joined = args.join(" ").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

/// Print a report in chunks below the chat message limit.
fn print_report(report: &str) {
    for chunk in render::split_message(report, render::MAX_MESSAGE_LENGTH) {
        println!("{chunk}");
    }
}
