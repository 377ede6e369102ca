use anyhow::Result;
use clap::{Parser, Subcommand};
use ghrepo::commands::push::FileMapping;
use ghrepo::{commands::*, config::Config, constants, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghrepo")]
#[command(about = "Read files and archives from GitHub repositories and commit changes to them")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// GitHub token (overrides the config file and GITHUB_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log every API request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a GitHub blob URL into owner, repository and path
    ParseUrl {
        /// URL such as https://github.com/owner/repo/blob/main/src/lib.rs
        url: String,
    },

    /// Download a single file
    Get {
        owner: String,
        repo: String,
        /// Path of the file inside the repository
        path: String,

        /// Branch, tag or commit SHA (default branch if omitted)
        #[arg(long = "ref", default_value = "")]
        reference: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download the repository as a tarball
    Archive {
        owner: String,
        repo: String,

        /// Branch, tag or commit SHA (default branch if omitted)
        #[arg(long = "ref", default_value = "")]
        reference: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the blob SHA of a file
    Sha {
        owner: String,
        repo: String,
        path: String,

        /// Branch, tag or commit SHA (default branch if omitted)
        #[arg(long = "ref", default_value = "")]
        reference: String,
    },

    /// Commit local files to a branch in a single commit
    Push {
        owner: String,
        repo: String,

        /// Files as LOCAL=REMOTE, or PATH to use the same path
        #[arg(required = true)]
        files: Vec<FileMapping>,

        /// Branch to update
        #[arg(short, long)]
        branch: String,

        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Delete folders by removing their .gitkeep placeholder on main
    RmDirs {
        owner: String,
        repo: String,

        /// Folders relative to the repository root
        #[arg(required = true)]
        folders: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load_config(&cli.config, cli.token)?;
    tracing::debug!(
        api_base = %config.api_base,
        authenticated = config.token.is_some(),
        "loaded configuration"
    );

    let context = CommandContext::new(config.github_client()?);
    execute_command(cli.command, &context).await
}

async fn execute_command(command: Commands, context: &CommandContext) -> Result<()> {
    match command {
        Commands::ParseUrl { url } => ParseUrlCommand { url }.execute(context).await,
        Commands::Get {
            owner,
            repo,
            path,
            reference,
            output,
        } => {
            GetCommand {
                owner,
                repo,
                path,
                reference,
                output,
            }
            .execute(context)
            .await
        }
        Commands::Archive {
            owner,
            repo,
            reference,
            output,
        } => {
            ArchiveCommand {
                owner,
                repo,
                reference,
                output,
            }
            .execute(context)
            .await
        }
        Commands::Sha {
            owner,
            repo,
            path,
            reference,
        } => {
            ShaCommand {
                owner,
                repo,
                path,
                reference,
            }
            .execute(context)
            .await
        }
        Commands::Push {
            owner,
            repo,
            files,
            branch,
            message,
        } => {
            PushCommand {
                owner,
                repo,
                branch,
                message,
                files,
            }
            .execute(context)
            .await
        }
        Commands::RmDirs {
            owner,
            repo,
            folders,
        } => {
            RmDirsCommand {
                owner,
                repo,
                folders,
            }
            .execute(context)
            .await
        }
    }
}
