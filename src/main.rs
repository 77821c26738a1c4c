use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use clothing_advisor::{
    AdvisorConfig, AdvisoryService, ClothingAdvisor, McpServer, OpenMeteoClient, telemetry, web,
};

/// Current weather and what to wear for any city
#[derive(Parser, Debug)]
#[command(name = "clothing-advisor", version, about)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging; also report which strategy produced a recommendation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web form and JSON API
    Serve {
        /// Address to bind (overrides the config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides the config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the tool server for AI assistants on stdin/stdout
    Mcp,

    /// Print the current weather for a city
    Weather {
        city: String,
    },

    /// Print the current weather and a clothing recommendation for a city
    Recommend {
        city: String,

        /// Planned activity, echoed in the output
        #[arg(long, default_value = "general outdoor activities")]
        activity: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AdvisorConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose)?;

    let weather = OpenMeteoClient::new(&config.weather)?;
    let advisor = ClothingAdvisor::from_config(&config.generative)?;
    let service = Arc::new(AdvisoryService::new(Arc::new(weather), advisor));

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(&config.server, service).await?;
        }
        Command::Mcp => {
            McpServer::new(service).run_stdio().await?;
        }
        Command::Weather { city } => {
            let weather = service.current_weather(&city).await?;
            print_json(&json!({
                "city": weather.city,
                "coordinates": weather.location.coordinates(),
                "weather": weather.weather,
            }))?;
        }
        Command::Recommend { city, activity } => {
            let advice = service.advise(&city).await?;
            if cli.verbose {
                info!("Recommendation produced by the {} strategy", advice.source);
            }
            let mut output = json!({
                "city": advice.weather.city,
                "coordinates": advice.weather.location.coordinates(),
                "weather": advice.weather.weather,
                "clothing": advice.clothing,
                "activity": activity,
            });
            if cli.verbose {
                output["source"] = json!(advice.source);
            }
            print_json(&output)?;
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to encode output")?
    );
    Ok(())
}
