use clap::{Parser, Subcommand};
use health_aggregator::health::{AggregateStatus, AggregatedHealth};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "health-cli")]
#[command(about = "Query a running health aggregator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8082")]
    url: String,

    /// Request timeout in seconds.
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the aggregated health document
    Status,
    /// One line per target
    Targets,
    /// Exit 0 only when every target is up (for container health checks)
    Check,
    /// Print the aggregator's service identity
    Identity,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()?;
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let health = fetch_health(&client, base).await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Commands::Targets => {
            let health = fetch_health(&client, base).await?;
            for bot in &health.bots {
                let state = if bot.is_up() { "UP" } else { "DOWN" };
                let detail = bot
                    .error
                    .as_deref()
                    .or(bot.uptime.as_deref())
                    .unwrap_or("-");
                println!("{:<6} {:<24} {}", state, bot.bot, detail);
            }
            println!("{}/{} up at {}", health.up, health.total, health.checked_at);
        }
        Commands::Check => {
            let health = fetch_health(&client, base).await?;
            return Ok(check_exit_code(&health));
        }
        Commands::Identity => {
            let res = client.get(format!("{}/", base)).send().await?;
            let body: serde_json::Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// `/health` answers 503 with a full body when degraded, so the status code is not an error here.
async fn fetch_health(
    client: &reqwest::Client,
    base: &str,
) -> Result<AggregatedHealth, Box<dyn std::error::Error>> {
    let res = client.get(format!("{}/health", base)).send().await?;
    let status = res.status().as_u16();
    let body = res.text().await?;
    Ok(decode_health(status, &body)?)
}

fn decode_health(status: u16, body: &str) -> Result<AggregatedHealth, String> {
    serde_json::from_str(body).map_err(|e| format!("unexpected response (HTTP {}): {}", status, e))
}

/// Success only when every target is up.
fn check_exit_code(health: &AggregatedHealth) -> ExitCode {
    match health.status {
        AggregateStatus::Ok => ExitCode::SUCCESS,
        _ => {
            eprintln!("{} of {} targets down", health.down, health.total);
            ExitCode::FAILURE
        }
    }
}
