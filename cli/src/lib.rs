use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use slidesmith_core::auth::{User, UserStore};
use slidesmith_core::deck_file::{export_deck, read_deck, write_deck};
use slidesmith_core::{Config, DeckSession};
use slidesmith_protocol::{Event, Op, Submission};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slidesmith")]
#[command(about = "AI-assisted presentation builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the text model (e.g., gemini-2.5-flash)
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the deck editor, optionally on a saved deck
    Edit {
        /// Deck JSON file
        file: Option<PathBuf>,
    },
    /// Generate a deck from a topic and save it as JSON
    Generate {
        topic: String,
        /// Output file (defaults to a name derived from the deck title)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Page through a saved deck
    Preview { file: PathBuf },
    /// Export a saved deck as a printable document, one slide per page
    Export {
        file: PathBuf,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in with email and password, or with a provider profile
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        /// Sign in as a provider profile instead of with a password
        #[arg(long, requires = "name")]
        profile: bool,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        picture: Option<String>,
    },
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(model) = &cli.model {
        config.text_model = model.clone();
    }
    init_tracing(&config, cli.debug)?;

    match cli.command {
        Some(Commands::Edit { file }) => edit(&config, file).await,
        Some(Commands::Generate { topic, output }) => generate(&config, &topic, output).await,
        Some(Commands::Preview { file }) => slidesmith_tui::run_preview(read_deck(&file).await?).await,
        Some(Commands::Export { file, output }) => {
            let out_dir = output.unwrap_or_else(|| config.export_dir.clone());
            export(&file, &out_dir).await
        }
        Some(Commands::Signup {
            name,
            email,
            password,
        }) => {
            let password = password_or_prompt(password)?;
            let user = users(&config)?.sign_up(&name, &email, &password)?;
            println!("Welcome, {}!", user.name);
            Ok(())
        }
        Some(Commands::Login {
            email,
            password,
            profile,
            name,
            picture,
        }) => {
            let store = users(&config)?;
            let user = if profile {
                let name = name.unwrap_or_default();
                store.log_in_with_profile(&name, &email, picture.as_deref())?
            } else {
                store.log_in(&email, &password_or_prompt(password)?)?
            };
            println!("Signed in as {} <{}>", user.name, user.email);
            Ok(())
        }
        Some(Commands::Logout) => {
            users(&config)?.log_out()?;
            println!("Signed out");
            Ok(())
        }
        Some(Commands::Whoami) => {
            match users(&config)?.current_user()? {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        None => edit(&config, None).await,
    }
}

/// Log to a file; the terminal belongs to the TUI.
fn init_tracing(config: &Config, debug: bool) -> Result<()> {
    use tracing_subscriber::prelude::*;

    let filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    let path = config.log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn users(config: &Config) -> Result<UserStore> {
    Ok(UserStore::open(&config.data_dir)?)
}

fn signed_in(config: &Config) -> Result<User> {
    match users(config)?.current_user()? {
        Some(user) => Ok(user),
        None => bail!("Sign in first: slidesmith login --email <EMAIL>"),
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn edit(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let user = signed_in(config)?;
    let mut session = DeckSession::from_config(config)?;
    if let Some(path) = &file {
        let presentation = read_deck(path).await?;
        session.submit_with_id(Submission::new(Op::Load { presentation }));
    }
    let app = slidesmith_tui::App::new(session, Some(user), config.export_dir.clone())
        .with_save_path(file)
        .with_user_store(users(config)?);
    let app = slidesmith_tui::run_interactive(app).await?;
    if app.user().is_none() {
        println!("Signed out");
    }
    Ok(())
}

async fn generate(config: &Config, topic: &str, output: Option<PathBuf>) -> Result<()> {
    let mut session = DeckSession::from_config(config)?;
    for event in session.submit_with_id(Submission::new(Op::Generate {
        topic: topic.to_string(),
    })) {
        if let Event::Notice { message } = event {
            bail!(message);
        }
    }
    println!("Generating a presentation about {topic}...");
    match session.next_event().await {
        Some(Event::PresentationReady { .. }) => {}
        Some(Event::Error { message }) => bail!(message),
        other => bail!("generation did not finish: {other:?}"),
    }
    let Some(presentation) = session.presentation() else {
        bail!("No presentation was produced");
    };
    let path = output.unwrap_or_else(|| {
        config.export_dir.join(slidesmith_core::export::export_file_name(
            &presentation.title,
            "json",
        ))
    });
    write_deck(&path, &presentation).await?;
    println!(
        "{} ({} slides) saved to {}",
        presentation.title,
        presentation.len(),
        path.display()
    );
    Ok(())
}

async fn export(file: &Path, out_dir: &Path) -> Result<()> {
    let path = export_deck(file, out_dir)
        .await
        .with_context(|| format!("exporting {}", file.display()))?;
    println!("Exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use slidesmith_common::{Slide, SlideBody, StyledText};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["slidesmith", "--debug", "generate", "Solar power", "-o", "deck.json"]);
        assert!(cli.debug);
        match cli.command {
            Some(Commands::Generate { topic, output }) => {
                assert_eq!(topic, "Solar power");
                assert_eq!(output, Some(PathBuf::from("deck.json")));
            }
            _ => panic!("expected generate"),
        }

        let cli = Cli::parse_from(["slidesmith"]);
        assert!(cli.command.is_none());

        assert!(Cli::try_parse_from(["slidesmith", "login", "--email", "a@b.c", "--profile"]).is_err());
    }

    #[tokio::test]
    async fn test_export_command_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("deck.json");
        let slide = |id: &str| Slide {
            id: id.to_string(),
            title: StyledText::title(format!("Slide {id}")),
            body: SlideBody::Content {
                content: vec![StyledText::bullet("Point")],
            },
            image_prompt: "A lake".to_string(),
            image_url: "https://picsum.photos/seed/lake/1280/720".to_string(),
        };
        let deck = slidesmith_common::Presentation::new("Two slides", vec![slide("a"), slide("b")]);
        std::fs::write(&deck_path, deck.to_json_pretty().unwrap()).unwrap();
        export(&deck_path, dir.path()).await.unwrap();
        assert!(dir.path().join("Two_slides.html").exists());
    }
}
