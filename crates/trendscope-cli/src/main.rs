mod classify;
mod gate;
mod output;
mod trends;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::classify::ScorerKind;
use crate::gate::Mode;

#[derive(Debug, Parser)]
#[command(name = "trendscope")]
#[command(about = "Instagram post classification and trend ranking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify the posts of a scraped profile dump
    Classify {
        /// Profile dump: a JSON array of records or `{ "posts": [...] }`
        #[arg(long)]
        input: PathBuf,

        /// Where to write the classified posts
        #[arg(long)]
        output: PathBuf,

        /// Output tier; `basic` hides key comments and insights
        #[arg(long, value_enum, default_value_t = Mode::Basic)]
        mode: Mode,

        /// Sentiment scorer to use
        #[arg(long, value_enum, default_value_t = ScorerKind::Lexicon)]
        scorer: ScorerKind,

        /// How many posts to score at once (overrides the configured value)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Build a ranked trend report for one business category
    Trends {
        /// Category preset name, e.g. `restaurant`
        #[arg(long)]
        category: String,

        /// Hashtag to search; repeat to search several. Replaces the preset list.
        #[arg(long = "hashtag")]
        hashtags: Vec<String>,

        /// Maximum number of items in the report
        #[arg(long)]
        max_items: Option<usize>,

        /// Only keep posts published within this many hours
        #[arg(long)]
        max_hours: Option<i64>,

        /// Maximum number of collected candidates before filtering
        #[arg(long)]
        max_candidates: Option<usize>,

        /// Read `<hashtag>.json` dumps from this directory instead of the scraper API
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Report path (defaults to `<data dir>/<category>/trends_<category>_<timestamp>.json`)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the resolved run plan without querying anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the category hashtag presets
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = trendscope_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Classify {
            input,
            output,
            mode,
            scorer,
            concurrency,
        } => {
            classify::run_classify(
                &config,
                &classify::ClassifyArgs {
                    input,
                    output,
                    mode,
                    scorer,
                    concurrency,
                },
            )
            .await?;
        }
        Commands::Trends {
            category,
            hashtags,
            max_items,
            max_hours,
            max_candidates,
            source_dir,
            output,
            dry_run,
        } => {
            trends::run_trends_command(
                &config,
                trends::TrendsArgs {
                    category,
                    hashtags,
                    max_items,
                    max_hours,
                    max_candidates,
                    source_dir,
                    output,
                    dry_run,
                },
            )
            .await?;
        }
        Commands::Categories => trends::list_categories(&config)?,
    }

    Ok(())
}
