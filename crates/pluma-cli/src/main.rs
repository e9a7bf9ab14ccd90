//! Pluma CLI
//!
//! Command-line interface for Pluma - local-first writing and journaling.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pluma_core::{Config, Genre, Store, StoryStatus};

mod commands;
mod editor;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "pluma")]
#[command(about = "Pluma - Local-first writing and journaling")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stories
    Story {
        #[command(subcommand)]
        command: StoryCommands,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Manage stored images
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Publish a story to the community feed
    Publish {
        /// Story ID (full ID or prefix)
        id: String,
        /// Publish without attaching your display name
        #[arg(long)]
        anonymous: bool,
    },
    /// Remove a story from the community feed
    Retract {
        /// Story ID (full ID or prefix)
        id: String,
    },
    /// Browse the community feed
    Feed {
        #[command(subcommand)]
        command: Option<FeedCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show library status
    Status,
}

#[derive(Subcommand)]
enum StoryCommands {
    /// Create a new story
    #[command(alias = "add")]
    Create {
        /// Story title
        title: String,
        /// Folder to file it under (ID or prefix)
        #[arg(short, long)]
        folder: Option<String>,
    },
    /// List stories and folders
    #[command(alias = "ls")]
    List {
        /// Folder to list (root level if omitted)
        #[arg(short, long)]
        folder: Option<String>,
        /// Filter by name (case-insensitive substring)
        #[arg(long)]
        query: Option<String>,
        /// Filter by genre
        #[arg(short, long)]
        genre: Option<Genre>,
        /// List every story, ignoring folders
        #[arg(long)]
        all: bool,
    },
    /// Show story details
    Show {
        /// Story ID (full ID or prefix)
        id: String,
    },
    /// Edit story metadata
    Edit {
        /// Story ID (full ID or prefix)
        id: String,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New synopsis
        #[arg(short, long)]
        synopsis: Option<String>,
        /// New status (draft, in-progress, finished)
        #[arg(long)]
        status: Option<StoryStatus>,
    },
    /// Open a page's content in your editor
    Write {
        /// Story ID (full ID or prefix)
        id: String,
        /// Page number (first page if omitted)
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Append a new page
    AddPage {
        /// Story ID (full ID or prefix)
        id: String,
        /// Page title
        title: String,
    },
    /// Add or remove genre tags
    Genre {
        /// Story ID (full ID or prefix)
        id: String,
        /// Genres to add
        #[arg(short, long)]
        add: Vec<Genre>,
        /// Genres to remove
        #[arg(short, long)]
        remove: Vec<Genre>,
    },
    /// Delete a story
    #[command(alias = "rm")]
    Delete {
        /// Story ID (full ID or prefix)
        id: String,
    },
    /// Move a story into a folder (or to the root)
    #[command(alias = "mv")]
    Move {
        /// Story ID (full ID or prefix)
        id: String,
        /// Target folder (root level if omitted)
        #[arg(short, long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
enum FolderCommands {
    /// Create a new folder
    #[command(alias = "add")]
    Create {
        /// Folder name
        name: String,
        /// Parent folder (ID or prefix)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// List all folders
    #[command(alias = "ls")]
    List,
    /// Delete a folder (its stories move to the root)
    #[command(alias = "rm")]
    Delete {
        /// Folder ID (full ID or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum ImageCommands {
    /// Store an image from a file
    Add {
        /// Path to the image file
        path: std::path::PathBuf,
        /// Display name (file name if omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List stored images
    #[command(alias = "ls")]
    List,
    /// Remove a stored image
    #[command(alias = "rm")]
    Delete {
        /// Image ID (full ID or prefix)
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum FeedCommands {
    /// Fetch and print the feed (default)
    #[command(alias = "ls")]
    List,
    /// Watch the feed for changes
    Watch,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, remote_path, display_name)
        key: String,
        /// Configuration value (empty clears optional keys)
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the store
    match &cli.command {
        Commands::Config { command } => {
            return handle_config_command(command.clone(), &output);
        }
        Commands::Feed { command } => {
            let config = Config::load()?;
            return match command.clone() {
                Some(FeedCommands::Watch) => commands::feed::watch(&config, &output).await,
                Some(FeedCommands::List) | None => commands::feed::list(&config, &output).await,
            };
        }
        _ => {}
    }

    let mut store = Store::open()?;

    // Mutating commands persist the snapshot once, after the handler runs
    let is_write = matches!(
        &cli.command,
        Commands::Story {
            command: StoryCommands::Create { .. }
                | StoryCommands::Edit { .. }
                | StoryCommands::Write { .. }
                | StoryCommands::AddPage { .. }
                | StoryCommands::Genre { .. }
                | StoryCommands::Delete { .. }
                | StoryCommands::Move { .. }
        } | Commands::Folder {
            command: FolderCommands::Create { .. } | FolderCommands::Delete { .. }
        } | Commands::Image {
            command: ImageCommands::Add { .. } | ImageCommands::Delete { .. }
        } | Commands::Publish { .. }
            | Commands::Retract { .. }
    );

    let result = match cli.command {
        Commands::Story { command } => handle_story_command(command, &mut store, &output),
        Commands::Folder { command } => handle_folder_command(command, &mut store, &output),
        Commands::Image { command } => handle_image_command(command, &mut store, &output),
        Commands::Publish { id, anonymous } => {
            commands::publish::publish(&mut store, id, anonymous, &output).await
        }
        Commands::Retract { id } => commands::publish::retract(&mut store, id, &output).await,
        Commands::Feed { .. } => unreachable!(),   // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&store, &output),
    };

    if is_write && result.is_ok() {
        store.save();
    }

    result
}

fn handle_story_command(
    command: StoryCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        StoryCommands::Create { title, folder } => {
            commands::story::create(store, title, folder, output)
        }
        StoryCommands::List {
            folder,
            query,
            genre,
            all,
        } => commands::story::list(store, folder, query, genre, all, output),
        StoryCommands::Show { id } => commands::story::show(store, id, output),
        StoryCommands::Edit {
            id,
            title,
            synopsis,
            status,
        } => commands::story::edit(store, id, title, synopsis, status, output),
        StoryCommands::Write { id, page } => commands::story::write(store, id, page, output),
        StoryCommands::AddPage { id, title } => {
            commands::story::add_page(store, id, title, output)
        }
        StoryCommands::Genre { id, add, remove } => {
            commands::story::genre(store, id, add, remove, output)
        }
        StoryCommands::Delete { id } => commands::story::delete(store, id, output),
        StoryCommands::Move { id, to } => commands::story::mv(store, id, to, output),
    }
}

fn handle_folder_command(
    command: FolderCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        FolderCommands::Create { name, parent } => {
            commands::folder::create(store, name, parent, output)
        }
        FolderCommands::List => commands::folder::list(store, output),
        FolderCommands::Delete { id } => commands::folder::delete(store, id, output),
    }
}

fn handle_image_command(command: ImageCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        ImageCommands::Add { path, name } => commands::image::add(store, path, name, output),
        ImageCommands::List => commands::image::list(store, output),
        ImageCommands::Delete { id } => commands::image::delete(store, id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    let mut config = Config::load()?;
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(&config, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(&mut config, key, value, output)
        }
    }
}
