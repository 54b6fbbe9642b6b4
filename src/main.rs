//! CLI entry point for blog-sidebar

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_sidebar::commands::sidebar::SidebarOptions;
use blog_sidebar::sidebar::Variant;

#[derive(Parser)]
#[command(name = "blog-sidebar")]
#[command(version)]
#[command(about = "A static blog generator with category-filtered post sidebars", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category of the post (repeatable)
        #[arg(short = 'C', long = "category")]
        categories: Vec<String>,

        /// File name for the new post, without extension
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Render the post sidebar for a route
    Sidebar {
        /// Route of the page the sidebar is shown on
        #[arg(short, long, default_value = "/")]
        route: String,

        /// Category to select
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Page to show (mobile)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Sidebar variant (desktop, mobile)
        #[arg(short, long, default_value = "desktop")]
        variant: Variant,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "blog_sidebar=debug,info"
    } else {
        "blog_sidebar=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blog_sidebar::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            categories,
            path,
        } => {
            let blog = blog_sidebar::Blog::new(&base_dir)?;
            let file =
                blog_sidebar::commands::new::create_post(&blog, &title, &categories, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let blog = blog_sidebar::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");

            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                blog_sidebar::commands::generate::watch(&blog).await?;
            }
        }

        Commands::Server { port, ip, r#static } => {
            tracing::info!("Generating static files...");
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_sidebar::server::start(&base_dir, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let blog = blog_sidebar::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = blog_sidebar::Blog::new(&base_dir)?;
            blog_sidebar::commands::list::run(&blog, &r#type)?;
        }

        Commands::Sidebar {
            route,
            category,
            page,
            variant,
        } => {
            let blog = blog_sidebar::Blog::new(&base_dir)?;
            let options = SidebarOptions {
                route,
                category,
                page,
                variant,
            };
            blog_sidebar::commands::sidebar::run(&blog, &options)?;
        }
    }

    Ok(())
}
