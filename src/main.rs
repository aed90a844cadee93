//! snipx CLI - LLM-powered code snippet extraction
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use dialoguer::Confirm;
use snipx::{clipboard, export, input, logging, render, ui};
use snipx::session::EMPTY_INPUT_MESSAGE;
use snipx::{Config, GeminiClient, Session, SnippetGroup, SnippetRef, View};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "snipx")]
#[command(author, version, about = "Extract reusable code snippets from source files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze source code and extract snippets
    Extract {
        /// Source file ("-" for stdin). Opens $EDITOR when omitted and stdin is a terminal
        file: Option<PathBuf>,
        /// Save the results as Markdown to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Save the results as Markdown to the configured path
        #[arg(long)]
        save: bool,
        /// Print the validated JSON instead of formatted snippets
        #[arg(long)]
        json: bool,
        /// Browse the results in the terminal UI
        #[arg(long)]
        tui: bool,
        /// Copy one snippet's code to the clipboard (e.g. 2.1)
        #[arg(long, value_name = "GROUP.SNIPPET")]
        copy: Option<SnippetRef>,
        /// Overwrite an existing Markdown file without asking
        #[arg(long)]
        force: bool,
    },
    /// Convert a saved JSON result into Markdown
    Export {
        /// JSON produced by `snipx extract --json`
        input: PathBuf,
        /// Output path (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Write a default config to ~/.config/snipx/snipx.toml
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Extract {
            file,
            output,
            save,
            json,
            tui,
            copy,
            force,
        } => {
            let config = Config::load()?;
            let source = input::Source::detect(file);
            let code = source.read()?;

            let mut session = Session::new(code);
            if !session.has_code() {
                render::print(&View::Failed(EMPTY_INPUT_MESSAGE))?;
                return Ok(ExitCode::FAILURE);
            }

            let client = GeminiClient::from_config(&config)?;
            if !json {
                render::print(&View::Loading)?;
            }
            session.analyze(&client).await;

            match session.view() {
                view if view.is_failure() => {
                    render::print(&view)?;
                    return Ok(ExitCode::FAILURE);
                }
                _ if json => {
                    let groups = session.groups.as_deref().unwrap_or_default();
                    println!("{}", serde_json::to_string_pretty(groups)?);
                }
                _ if tui => {}
                view => render::print(&view)?,
            }
            let groups = session.groups.take().unwrap_or_default();

            if let Some(id) = copy {
                let snippet = id
                    .resolve(&groups)
                    .with_context(|| format!("no snippet {}", id))?;
                clipboard::copy_and_hold(snippet, clipboard::DEFAULT_HOLD)?;
                eprintln!("{} {}", "Copied".green(), id);
            }

            let markdown_path = output.or_else(|| save.then(|| config.output.markdown_path.clone()));
            if let Some(path) = markdown_path {
                save_markdown(&path, &groups, force)?;
            }

            if tui {
                ui::run(&groups, config.output.markdown_path.clone())?;
            }
        }
        Commands::Export {
            input,
            output,
            force,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let groups = snipx::snippet::parse_groups(&text)?;
            let path = match output {
                Some(path) => path,
                None => Config::load()?.output.markdown_path,
            };
            save_markdown(&path, &groups, force)?;
        }
        Commands::Init { force } => {
            let path = Config::user_config_path().ok_or(snipx::config::ConfigError::NoHomeDir)?;
            Config::default().write_to(&path, force)?;
            println!("Wrote {}", path.display());
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "snipx", &mut std::io::stdout());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Save the Markdown export, asking before overwriting when interactive
fn save_markdown(path: &Path, groups: &[SnippetGroup], force: bool) -> anyhow::Result<()> {
    if export::to_markdown(groups).is_none() {
        eprintln!("{}", "Nothing to export.".yellow());
        return Ok(());
    }

    let mut overwrite = force;
    if path.exists() && !force && atty::is(atty::Stream::Stdin) {
        overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            return Ok(());
        }
    }

    export::save(path, groups, overwrite)?;
    eprintln!("{} {}", "Saved to".green(), path.display());
    Ok(())
}
