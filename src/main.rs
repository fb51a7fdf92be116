//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Project listings and post pages from markdown content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new content item
    New {
        /// Post type to create (case-studies, blog-post, ...)
        #[arg(short = 't', long = "type")]
        post_type: Option<String>,

        /// Title of the new item
        title: String,
    },

    /// Generate site data
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List content records in display order
    List {
        /// Post type to list (all types when omitted)
        post_type: Option<String>,
    },

    /// Print the view-model of one post as JSON
    Show {
        /// Slug of the post (`/blog-post/hello-world/`)
        slug: String,

        /// Route the page is served at, when it differs from the slug
        #[arg(short, long)]
        route: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { post_type, title } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::new::run(&site, &title, post_type.as_deref())?;
        }

        Commands::Generate { watch } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating site data...");

            let report = site.generate()?;
            if report.is_clean() {
                println!("Generated successfully!");
            } else {
                println!(
                    "Generated with {} failed page(s): {}",
                    report.failed.len(),
                    report.failed.join(", ")
                );
            }

            if watch {
                folio::commands::generate::watch(&site).await?;
            }
        }

        Commands::List { post_type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, post_type.as_deref())?;
        }

        Commands::Show { slug, route } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &slug, route.as_deref())?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
