/// GZ Player - command-line front end
use clap::{Parser, Subcommand};
use gz_cli::{commands, GzConfig, PlayOptions};
use gz_core::TrackId;
use gz_playback::format_time;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gz")]
#[command(about = "GZ Player catalog browser and simulated playback", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./gz.toml if present)
    #[arg(short, long, global = true, env = "GZ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    List {
        /// Only tracks whose title or artist contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// Only favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Toggle a track's favorite flag
    Favorite {
        /// Track id
        id: String,
    },
    /// Show catalog size, favorites and the saved session
    Status,
    /// Play through the catalog on a simulated clock
    Play {
        /// Start with this track instead of resuming the saved session
        #[arg(long)]
        id: Option<String>,
        /// Simulated length of every track in seconds
        #[arg(long, default_value_t = 30.0)]
        track_secs: f64,
        /// Stop after this many tracks have finished
        #[arg(long, default_value_t = 3)]
        tracks: usize,
        /// Enable shuffle
        #[arg(long)]
        shuffle: bool,
        /// Enable repeat-one
        #[arg(long)]
        repeat_one: bool,
        /// Wall-clock milliseconds per simulated second
        #[arg(long, default_value_t = 50)]
        tick_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gz=info,gz_cli=info,gz_playback=info,gz_catalog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = GzConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::List { query, favorites } => {
            list(&config, query.as_deref(), favorites).await?;
        }
        Commands::Favorite { id } => {
            favorite(&config, &id).await?;
        }
        Commands::Status => {
            status(&config).await?;
        }
        Commands::Play {
            id,
            track_secs,
            tracks,
            shuffle,
            repeat_one,
            tick_ms,
        } => {
            let options = PlayOptions {
                id: id.map(TrackId::new),
                track_secs,
                tracks,
                shuffle,
                repeat_one,
                tick: Duration::from_millis(tick_ms),
            };
            play(&config, options).await?;
        }
    }

    Ok(())
}

async fn list(config: &GzConfig, query: Option<&str>, favorites: bool) -> anyhow::Result<()> {
    let rows = commands::list(config, query, favorites).await?;

    if rows.is_empty() {
        println!("No tracks");
        return Ok(());
    }

    for row in rows {
        println!(
            "{} {} {:<12} {} — {}",
            if row.last_played { "▶" } else { " " },
            if row.favorite { "♥" } else { "♡" },
            row.id,
            row.title,
            row.artist
        );
    }

    Ok(())
}

async fn favorite(config: &GzConfig, id: &str) -> anyhow::Result<()> {
    let (track, favorite) = commands::favorite(config, id).await?;

    if favorite {
        println!("♥ Added {} — {}", track.title, track.artist);
    } else {
        println!("♡ Removed {} — {}", track.title, track.artist);
    }

    Ok(())
}

async fn status(config: &GzConfig) -> anyhow::Result<()> {
    let report = commands::status(config).await?;

    println!("Tracks:    {}", report.tracks);
    println!("Favorites: {}", report.favorites);
    println!("Mode:      {}", report.mode_label);
    match report.last_played {
        Some((track, position)) => println!(
            "Last:      {} — {} at {}",
            track.title,
            track.artist,
            format_time(position)
        ),
        None => println!("Last:      -"),
    }

    Ok(())
}

async fn play(config: &GzConfig, options: PlayOptions) -> anyhow::Result<()> {
    let summary = commands::play(config, options).await?;
    tracing::info!(
        started = summary.started.len(),
        completed = summary.completed,
        "Playback finished"
    );
    Ok(())
}
