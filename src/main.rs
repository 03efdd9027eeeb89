//! Soul Contest CLI
//!
//! Command-line interface for the contest scoreboard:
//! - Interactive console (staff registration, dashboard)
//! - One-shot dashboard from a replayed entries CSV
//! - Activity catalog
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand};
use soul_contest::app::{render_activities, render_board, AppState, Console, OutputFormat};
use soul_contest::config::{generate_default_config, Config};
use soul_contest::import::EntryImporter;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(name = "soul-contest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Team contest scoreboard")]
#[command(long_about = concat!(
    "Soul Contest tracks participants, point-earning activities, and staff-verified entries.\n",
    "Teams and individuals are ranked by total points."
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive console (default)
    Console,

    /// Print the dashboard
    Board {
        /// Entries CSV to replay before printing
        #[arg(short, long)]
        replay: Option<PathBuf>,
        /// Date format used in the CSV (strftime)
        #[arg(long, default_value = "%Y-%m-%d")]
        date_format: String,
    },

    /// List contest activities
    Activities,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default().context("loading default config")?,
    };

    soul_contest::logging::init(&config.logging)?;

    tracing::info!("Soul Contest v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.roster.clone())
        .with_notice_ttl(Duration::from_secs(config.board.notice_ttl_secs));
    let mut console = Console::new(state, config.board.top_n, cli.format);

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => run_console(&mut console, &config).await?,

        Commands::Board {
            replay,
            date_format,
        } => {
            if let Some(path) = replay {
                let result = EntryImporter::new()
                    .with_date_format(&date_format)
                    .import(&path)
                    .with_context(|| format!("reading entries from {:?}", path))?;

                for error in result.errors.iter().take(10) {
                    eprintln!("{}", error);
                }

                let summary = console.replay(result.drafts, Instant::now());
                for rejected in summary.rejected.iter().take(10) {
                    eprintln!("{}", rejected);
                }
                eprintln!(
                    "Replayed {} entries ({} rejected, {} malformed rows)",
                    summary.accepted,
                    summary.rejected.len(),
                    result.rows_failed
                );
            }

            print!(
                "{}",
                render_board(console.state().standings(), config.board.top_n, cli.format)?
            );
        }

        Commands::Activities => {
            print!("{}", render_activities(&config.roster, cli.format)?);
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

async fn run_console(console: &mut Console, config: &Config) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if interactive {
        let banner = format!(
            "{} ({})\nType 'help' for commands, 'staff' for staff access.\n",
            config.contest.title, config.contest.duration_label
        );
        stdout.write_all(banner.as_bytes()).await?;
    }

    loop {
        if interactive {
            let prompt = if console.state().session().is_staff() {
                "staff> "
            } else {
                "> "
            };
            stdout.write_all(prompt.as_bytes()).await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match console.handle_line(&line, Instant::now()) {
            Ok(reply) => {
                if !reply.output.is_empty() {
                    stdout.write_all(reply.output.as_bytes()).await?;
                    if !reply.output.ends_with('\n') {
                        stdout.write_all(b"\n").await?;
                    }
                }
                if reply.quit {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Console command failed");
                stdout.write_all(format!("Error: {}\n", e).as_bytes()).await?;
            }
        }
    }

    stdout.flush().await?;
    tracing::info!(
        entries = console.state().store().len(),
        "Console closed"
    );
    Ok(())
}
