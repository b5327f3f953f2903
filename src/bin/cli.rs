use clap::{Args, Parser, Subcommand};
use knowledge_clustering::app::{self, ClusterJob};
use knowledge_clustering::document::anchor::DEFAULT_SPACE;
use knowledge_clustering::{ClusterConfig, Language};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knowledge")]
#[command(version, about = "Automated notion clustering for the knowledge LaTeX package", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options of the default `cluster` command
    #[command(flatten)]
    cluster: ClusterArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Define, as comments in the knowledge files, every undefined knowledge of the diagnose file
    Cluster(ClusterArgs),

    /// Warn when a knowledge is introduced too far from an anchor point
    #[command(visible_alias = "AP")]
    Anchor {
        /// Your TeX file
        #[arg(short, long = "tex")]
        tex: PathBuf,

        /// Number of characters tolerated between an anchor point and the introduction of a knowledge
        #[arg(short, long, default_value_t = DEFAULT_SPACE)]
        space: usize,

        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args)]
struct ClusterArgs {
    /// Knowledge file (repeatable); new knowledges go to the last one.
    /// Defaults to every .kl file under the current directory
    #[arg(short = 'k', long = "knowledge")]
    knowledge: Vec<PathBuf>,

    /// Diagnose file produced by LaTeX; defaults to the unique .diagnose file under the current directory
    #[arg(short, long)]
    diagnose: Option<PathBuf>,

    /// Language of the TeX document
    #[arg(short, long, value_enum)]
    lang: Option<Language>,

    /// Print the scopes and their inferred meanings
    #[arg(short = 'S', long)]
    scope: bool,

    /// Print every new knowledge
    #[arg(short = 'P', long = "print")]
    print: bool,

    /// Configuration file (.ini or .yaml); defaults to the bundled one of the language
    #[arg(short, long = "config-file")]
    config_file: Option<PathBuf>,

    /// Maximal distance for merging a knowledge into a bag
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Write new synonyms uncommented
    #[arg(long)]
    nocomment: bool,

    /// Print the clustering report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cluster(args: ClusterArgs) -> anyhow::Result<()> {
    let mut config = match &args.config_file {
        Some(path) => ClusterConfig::from_file(path, args.lang)?,
        None => ClusterConfig::new(args.lang.unwrap_or_default()),
    };
    if let Some(alpha) = args.alpha {
        config = config.with_alpha(alpha)?;
    }

    let mut job = ClusterJob::discover(".", args.knowledge, args.diagnose, config)?;
    job.nocomment = args.nocomment;

    let outcome = app::run_cluster(&job)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if args.scope {
        println!("{}", outcome.scopes);
    }
    if outcome.report.assignments.is_empty() && outcome.report.skipped.is_empty() {
        return Ok(());
    }
    println!("{}\n", outcome.report.summary());
    println!("{}", outcome.changes_message(args.print));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Cluster(args)) => {
            init_tracing(args.verbose);
            cluster(args)
        }
        None => {
            init_tracing(cli.cluster.verbose);
            cluster(cli.cluster)
        }
        Some(Commands::Anchor {
            tex,
            space,
            verbose,
        }) => {
            init_tracing(verbose);
            for warning in app::run_anchor(&tex, space)? {
                println!("{}", warning);
            }
            Ok(())
        }
    }
}
