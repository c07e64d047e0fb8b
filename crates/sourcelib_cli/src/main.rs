//! `sourcelib` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and resolve the corpus root and engine configuration.
//! - Print reports produced by `sourcelib_core` to stdout.
//!
//! # Invariants
//! - Exit code is 0 whenever a report was produced, even if it is empty.
//! - Exit code is 1 on configuration, IO or lookup errors.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use sourcelib_core::{
    core_version, default_log_level, format_listing_line, init_logging, load_config,
    render_stats, suggest_tags, EngineConfig, FsSourceRepository, LibraryService, ReportView,
    SourceFilter, DEFAULT_TEACH_LIMIT,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sourcelib")]
#[command(about = "Connections, clusters and conflicts across summarized sources")]
#[command(version)]
struct Cli {
    /// Directory holding `<slug>/summary.md` sources
    #[arg(long, global = true, env = "SOURCELIB_ROOT", default_value = "life/source")]
    root: PathBuf,

    /// JSON file overriding vocabularies and thresholds
    #[arg(long, global = true, env = "SOURCELIB_CONFIG")]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "SOURCELIB_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the connection graph, clusters or orphans
    Connections(ConnectionsArgs),

    /// Detect sources with opposite sentiment about shared entities
    Conflicts {
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },

    /// List sources, newest first
    List(ListArgs),

    /// Library statistics
    Stats,

    /// Suggest tags for free text
    SuggestTags {
        /// Text to scan for known keywords
        text: String,
    },

    /// Show sources sharing at least two tags with a source
    Related {
        /// Slug of the source to compare against
        slug: String,
    },

    /// Brief what the library knows about a topic
    Teach {
        /// Words to look for; a source matches on any of them
        topic: String,

        /// Maximum number of sources, oldest first
        #[arg(long, default_value_t = DEFAULT_TEACH_LIMIT)]
        limit: usize,

        /// Print the briefing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ConnectionsArgs {
    /// Only list topic clusters
    #[arg(long, conflicts_with = "orphans")]
    clusters: bool,

    /// Only list sources without any connection
    #[arg(long)]
    orphans: bool,

    /// Print the full graph as JSON
    #[arg(long, conflicts_with_all = ["clusters", "orphans"])]
    json: bool,
}

impl ConnectionsArgs {
    fn view(&self) -> ReportView {
        if self.clusters {
            ReportView::Clusters
        } else if self.orphans {
            ReportView::Orphans
        } else {
            ReportView::Graph
        }
    }
}

#[derive(Args)]
struct ListArgs {
    /// Only sources of this type
    #[arg(long = "type")]
    kind: Option<String>,

    /// Only sources carrying this tag
    #[arg(long)]
    tag: Option<String>,

    /// Prefix each line with its freshness tier
    #[arg(long)]
    decay: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={} root={}",
        core_version(),
        cli.root.display()
    );

    let config = match cli.config.as_ref() {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from `{}`", path.display()))?,
        None => EngineConfig::default(),
    };
    let service = LibraryService::new(FsSourceRepository::new(&cli.root), config);

    match cli.command {
        Commands::Connections(args) if args.json => println!("{}", service.connections_json()?),
        Commands::Connections(args) => print!("{}", service.connections_report(args.view())?),
        Commands::Conflicts { json: true } => println!("{}", service.conflicts_json()?),
        Commands::Conflicts { json: false } => print!("{}", service.conflicts_report()?),
        Commands::List(args) => {
            let filter = SourceFilter {
                kind: args.kind,
                tag: args.tag,
                with_freshness: args.decay,
            };
            let today = chrono::Local::now().date_naive();
            for item in service.list(&filter, today)? {
                println!("{}", format_listing_line(&item));
            }
        }
        Commands::Stats => print!("{}", render_stats(&service.stats()?)),
        Commands::SuggestTags { text } => println!("{}", suggest_tags(&text).join(", ")),
        Commands::Related { slug } => {
            let related = service.related(&slug)?;
            if related.is_empty() {
                println!("No related sources.");
            }
            for record in related {
                println!("  {} - {}", record.slug, record.title);
            }
        }
        Commands::Teach { topic, limit, json: true } => {
            println!("{}", service.teach_json(&topic, limit)?)
        }
        Commands::Teach { topic, limit, json: false } => {
            print!("{}", service.teach_report(&topic, limit)?)
        }
    }
    Ok(())
}
