use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use restaurant_reservations::{
    BookingRow, Config, Reader, ReservationError,
    config::ConfigError,
    response::{BookingsResponse, ErrorResponse, RestaurantsResponse},
    schema::create_tables,
};
use sea_orm::DbErr;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug, Parser)]
#[command(version, about = "Restaurant reservation record keeper")]
struct Cli {
    #[arg(global = true, short = 'v', long, help = "Show debug messages")]
    verbose: bool,

    #[arg(
        global = true,
        short = 'u',
        long,
        env = "DATABASE_URL",
        help = "Database URL, e.g. sqlite://reservations.db?mode=rwc"
    )]
    database_url: Option<String>,

    #[arg(
        global = true,
        long,
        env = "DATABASE_MAX_CONNECTIONS",
        help = "Maximum number of pooled connections"
    )]
    max_connections: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the tables and indexes if they are missing
    Init,
    /// Seed the canonical restaurants when needed, then list every restaurant
    Restaurants,
    /// List bookings with their restaurant, table and customer
    Bookings {
        #[arg(long, help = "Print a plain text table instead of JSON")]
        table: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to open reservation store: {0}")]
    Store(#[from] DbErr),
    #[error(transparent)]
    Listing(#[from] ReservationError),
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn response(&self) -> ErrorResponse {
        match self {
            Self::Listing(err) => err.into(),
            other => ErrorResponse {
                error: other.to_string(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            let body = serde_json::to_string_pretty(&err.response())
                .unwrap_or_else(|_| err.to_string());
            println!("{body}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    if verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let filter_layer = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("restaurant_reservations=info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let mut config = Config::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(max_connections) = cli.max_connections {
        config.max_connections = max_connections;
    }

    let db = config.connect().await?;
    create_tables(&db).await?;

    let output = match cli.command {
        Commands::Init => String::new(),
        Commands::Restaurants => {
            let restaurants = Reader::list_restaurants(&db).await?;
            serde_json::to_string_pretty(&RestaurantsResponse { restaurants })?
        }
        Commands::Bookings { table: false } => {
            let bookings = Reader::list_bookings(&db).await?;
            serde_json::to_string_pretty(&BookingsResponse { bookings })?
        }
        Commands::Bookings { table: true } => {
            let rows: Vec<_> = Reader::list_bookings(&db)
                .await?
                .iter()
                .map(|booking| booking.display())
                .collect();
            render_table(&rows)
        }
    };

    db.close().await?;
    Ok(output)
}

fn render_table(rows: &[BookingRow]) -> String {
    if rows.is_empty() {
        return "No bookings found".to_owned();
    }

    let cells: Vec<_> = rows.iter().map(BookingRow::cells).collect();
    let mut widths = BookingRow::HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![render_line(BookingRow::HEADERS.into_iter(), &widths)];
    out.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        out.push(render_line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_owned()
}
