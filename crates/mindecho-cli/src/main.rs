//! MindEcho CLI - emotion analysis, chat and mood logging from the terminal
//!
//! Mood entries go to the same SQLite file the server uses when it runs with
//! `storage = "sqlite"`.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use log::info;
use mindecho_core::chat::{respond, ChatRequest};
use mindecho_core::emotion::text::analyze_text_emotion;
use mindecho_core::media::decode_image_bytes;
use mindecho_core::mood::{MoodLabel, MoodRepository, NewMood, SqliteMoodStore};
use mindecho_core::report::{ImageReport, VoiceReport};
use mindecho_core::wellness::wellness_score;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};

const RECENT_MOODS_FOR_CHAT: usize = 5;

#[derive(Parser)]
#[command(
    name = "mindecho-cli",
    about = "MindEcho wellness companion on the command line",
    version
)]
struct Cli {
    /// Mood database (SQLite)
    #[arg(long, global = true, env = "MINDECHO_DB_PATH")]
    db: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single-modality classifier
    Analyze {
        #[command(subcommand)]
        target: AnalyzeTarget,
    },

    /// Send one chat message and print the reply
    Chat {
        message: String,

        /// Fixed seed for reproducible replies
        #[arg(long, env = "MINDECHO_SEED")]
        seed: Option<u64>,

        /// Print the full analysis alongside the reply
        #[arg(long)]
        verbose: bool,
    },

    /// Log and inspect moods
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum AnalyzeTarget {
    /// Classify a piece of text
    Text {
        text: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Classify a raw audio recording
    Voice { file: PathBuf },
    /// Classify an image file (png, jpeg, gif, webp, bmp)
    Image { file: PathBuf },
}

#[derive(Subcommand)]
enum MoodAction {
    /// Record a mood
    Add {
        /// One of: great, good, okay, bad, terrible, happy, sad, anxious, calm, angry, stressed
        mood: String,

        /// 1-5, defaults to the mood's scale value
        #[arg(short, long)]
        intensity: Option<u8>,

        #[arg(short, long)]
        note: Option<String>,
    },
    /// Show recent moods, newest first
    List {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Wellness score over the last week
    Score,
    /// Show every accepted mood label
    Labels,
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindecho")
        .join("mood.db")
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn open_store(db: Option<&Path>) -> Result<SqliteMoodStore> {
    let path = db.map(Path::to_path_buf).unwrap_or_else(default_db_path);
    info!("[cli] Mood database {:?}", path);
    SqliteMoodStore::open(&path).with_context(|| format!("opening {}", path.display()))
}

fn print<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let db = cli.db.as_deref();

    match cli.command {
        Commands::Analyze { target } => match target {
            AnalyzeTarget::Text { text, seed } => {
                print(&analyze_text_emotion(&text, &mut rng_from(seed)), cli.compact)?;
            }
            AnalyzeTarget::Voice { file } => {
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                print(&VoiceReport::analyze(&bytes), cli.compact)?;
            }
            AnalyzeTarget::Image { file } => {
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let image = decode_image_bytes(&bytes)
                    .with_context(|| format!("decoding {}", file.display()))?;
                print(&ImageReport::analyze(&image.rgba), cli.compact)?;
            }
        },

        Commands::Chat {
            message,
            seed,
            verbose,
        } => {
            let store = open_store(db)?;
            let recent = store.list_recent(RECENT_MOODS_FOR_CHAT)?;
            let request = ChatRequest {
                message,
                ..ChatRequest::default()
            };
            let turn = respond(&request, &recent, &mut rng_from(seed))?;
            if verbose {
                print(&turn, cli.compact)?;
            } else {
                println!("{}", turn.reply);
            }
        }

        Commands::Mood { action } => match action {
            MoodAction::Add {
                mood,
                intensity,
                note,
            } => {
                let store = open_store(db)?;
                let entry = NewMood {
                    mood,
                    intensity,
                    note,
                }
                .into_entry()?;
                print(&store.append(entry)?, cli.compact)?;
            }
            MoodAction::List { limit } => {
                let store = open_store(db)?;
                let mut entries = store.list_recent(limit)?;
                entries.reverse();
                for e in &entries {
                    let note = if e.note.is_empty() {
                        String::new()
                    } else {
                        format!("  {}", e.note)
                    };
                    println!(
                        "{}  {:<9} {}{}",
                        e.timestamp.format("%Y-%m-%d %H:%M"),
                        e.mood,
                        e.intensity,
                        note
                    );
                }
            }
            MoodAction::Score => {
                let store = open_store(db)?;
                print(&wellness_score(&store.list_all()?, Utc::now()), cli.compact)?;
            }
            MoodAction::Labels => {
                for label in MoodLabel::ALL {
                    println!("{:<9} scale {}", label, label.scale());
                }
            }
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "mindecho-cli", &mut std::io::stdout());
        }
    }

    Ok(())
}
