use anyhow::Context;
use clap::{Parser, Subcommand};
use pathwise_core::Result;
use pathwise_similarity::{
    raw_profile_from_value, Outcome, RawProfile, Recommender, SkillPolicy, DEFAULT_TOP_K,
};
use pathwise_storage::ArtifactStore;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Course and career recommendations from subject scores
#[derive(Parser, Debug)]
#[command(name = "pathwise")]
#[command(about = "Course and career recommendations from subject scores", long_about = None)]
struct Args {
    /// Path to the artifact directory
    #[arg(short, long, default_value = "./artifacts")]
    artifacts: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank courses by similarity to the profile, with explanations
    Recommend {
        /// Profile JSON file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        profile: String,

        /// Number of courses to return
        #[arg(long)]
        top_n: Option<usize>,

        /// How top skills are picked: strengths or alignment
        #[arg(long)]
        skill_policy: Option<SkillPolicy>,
    },

    /// Predict the best-fit course with the classifier
    Predict {
        /// Profile JSON file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        profile: String,

        /// Number of most probable courses listed alongside the best one
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Recommendations and prediction side by side
    Advise {
        /// Profile JSON file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        profile: String,

        /// Number of courses to return
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// List the feature schema and subject categories
    Features,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Results go to stdout, logs to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Pathwise v{}", env!("CARGO_PKG_VERSION"));
    info!("Artifact directory: {:?}", args.artifacts);

    let mut store = ArtifactStore::open(&args.artifacts)
        .with_context(|| format!("failed to open artifacts at {:?}", args.artifacts))?;

    if let Command::Recommend {
        skill_policy: Some(policy),
        ..
    } = &args.command
    {
        store.manifest_mut().recommend.skill_policy = *policy;
    }

    let context = store.load().context("failed to load artifacts")?;
    let recommender = Recommender::new(context);

    let outcome = execute(args.command, &recommender)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one command; request failures become an error outcome
fn execute(command: Command, recommender: &Recommender) -> anyhow::Result<Outcome<Value>> {
    let result = match command {
        Command::Recommend { profile, top_n, .. } => {
            let top_n = top_n.unwrap_or_else(|| recommender.default_top_n());
            read_profile(&profile)?.and_then(|raw| to_json(recommender.recommend(&raw, top_n)))
        }
        Command::Predict { profile, top_k } => {
            read_profile(&profile)?.and_then(|raw| to_json(recommender.predict(&raw, top_k)))
        }
        Command::Advise { profile, top_n } => {
            let top_n = top_n.unwrap_or_else(|| recommender.default_top_n());
            read_profile(&profile)?.and_then(|raw| to_json(recommender.advise(&raw, top_n)))
        }
        Command::Features => to_json(Ok(recommender.catalog())),
    };
    Ok(Outcome::from(result))
}

fn to_json<T: Serialize>(result: Result<T>) -> Result<Value> {
    Ok(serde_json::to_value(result?)?)
}

/// Read a profile document; unreadable input aborts, a bad shape is a request failure
fn read_profile(source: &str) -> anyhow::Result<Result<RawProfile>> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read profile from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read profile {}", source))?
    };

    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("profile {} is not valid JSON", source))?;
    debug!(source, "Profile read");

    Ok(raw_profile_from_value(value))
}
