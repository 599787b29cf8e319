use std::path::Path;
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use ghc::commands;
use ghc::error::GhcError;
use ghc::ui;

#[derive(Parser)]
#[command(
    name = "ghc",
    about = "Bind a project directory to a GitHub repository and publish tagged releases",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration and lock file
    Init,

    /// Bind the project to a remote repository URL
    Bind {
        /// Repository URL (https://github.com/... or git@github.com:...)
        url: String,
    },

    /// Show the current binding and release configuration
    Status,

    /// Create, list, or check out release tags
    Tag(TagArgs),

    /// Build, commit, push and tag a release
    #[command(visible_alias = "release")]
    Publish {
        /// Version to publish (defaults to the configured version)
        version: Option<String>,
    },
}

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
struct TagArgs {
    #[command(subcommand)]
    action: Option<TagAction>,

    /// Version to tag (creates and pushes the tag)
    version: Option<String>,
}

#[derive(Subcommand)]
enum TagAction {
    /// List all tags
    List,

    /// Check out the revision a tag points to
    Checkout {
        /// Tag version to check out
        version: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let project = std::env::current_dir()?;

    if let Err(e) = run(&cli.command, &project) {
        ui::display_error(&e.to_string());
        process::exit(1);
    }

    Ok(())
}

fn run(command: &Commands, project: &Path) -> ghc::Result<()> {
    match command {
        Commands::Init => commands::init(project),
        Commands::Bind { url } => commands::bind(project, url),
        Commands::Status => commands::status(project),
        Commands::Tag(args) => match (&args.action, &args.version) {
            (Some(TagAction::List), _) => commands::tag_list(project),
            (Some(TagAction::Checkout { version }), _) => {
                commands::tag_checkout(project, version)
            }
            (None, Some(version)) => commands::tag_create(project, version),
            (None, None) => Err(GhcError::invalid_input(
                "expected a tag version, `list`, or `checkout <version>`",
            )),
        },
        Commands::Publish { version } => commands::publish(project, version.as_deref()),
    }
}
