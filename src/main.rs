use clap::{Parser, Subcommand};
use geonews::config::Config;
use geonews::location::search_route;
use geonews::server::{self, SearchResponse};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// geonews — region news with coordinates
///
/// Searches local news for a region and category, extracts the place each
/// article is about, and attaches coordinates.
///
/// Examples:
///   geonews serve --port 5000
///   geonews search 성동구 맛집
///   geonews route 서울역 강남역
#[derive(Parser)]
#[command(name = "geonews", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, short = 'p', default_value_t = 5000)]
        port: u16,
    },
    /// Search once and print the enriched articles as JSON.
    Search { region: String, category: String },
    /// Geocode two places and print the transit route JSON.
    Route { origin: String, destination: String },
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = cli.config.build_state();

    match cli.command {
        Command::Serve { host, port } => {
            if let Err(e) = server::start(state, &host, port).await {
                error!(%host, port, error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Search { region, category } => {
            let news = state.pipeline.search(&region, &category).await;
            print_json(&SearchResponse { region, category, news });
        }
        Command::Route { origin, destination } => {
            let outcome = tokio::task::spawn_blocking(move || {
                search_route(state.pipeline.geocoder(), state.transit.as_ref(), &origin, &destination)
            })
            .await;
            match outcome {
                Ok(Ok(route)) => print_json(&route),
                Ok(Err(e)) => {
                    error!(error = %e, "route search failed");
                    std::process::exit(1);
                }
                Err(e) => {
                    error!(error = %e, "route task failed");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!(error = %e, "could not serialize output");
            std::process::exit(1);
        }
    }
}
