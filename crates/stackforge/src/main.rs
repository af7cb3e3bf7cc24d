//! Stackforge CLI - Project scaffolding for database-backed services

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use stackforge_core::tui::CreateArgs;
use stackforge_core::{ScaffoldError, StackVariant};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "stackforge")]
#[command(about = "CLI for scaffolding backend services on a supported database stack")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
    /// List the stack variants and the files each one generates
    List,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Stack variant to generate (graph, relational-codegen, relational-cache)
    #[arg(long)]
    pub variant: Option<StackVariant>,

    /// Directory the project is created in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Generator configuration file (overrides STACKFORGE_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            variant: args.variant,
            directory: args.directory,
            config: args.config,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = match args.command {
        Some(Command::Create(create_args)) => create(create_args.into()).await,
        Some(Command::List) => list(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => create(CreateArgs::default()).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}

async fn create(args: CreateArgs) -> Result<()> {
    let result = stackforge_core::run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

fn list() -> Result<()> {
    let catalog = stackforge_core::templates::verified().map_err(ScaffoldError::from)?;
    stackforge_core::templates::print_catalog(catalog);
    println!();
    println!("{}", format!("stackforge {}", CLI_VERSION).dimmed());
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ScaffoldError>()
        .map(ScaffoldError::exit_code)
        .unwrap_or(1)
}
