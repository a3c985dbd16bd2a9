use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use trivia_quiz::config::{DEFAULT_API_URL, DEFAULT_TIME_LIMIT_SECS};
use trivia_quiz::{Quiz, QuizConfig, SourceConfig, logging};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question service URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Skip the network and play the built-in questions
    #[arg(long)]
    offline: bool,

    /// Seconds to wait for the question service
    #[arg(long, default_value_t = 10)]
    request_timeout: u64,

    /// Seconds allowed per question
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    time_limit: u32,

    /// Milliseconds the answer feedback stays on screen
    #[arg(long, default_value_t = 1500)]
    feedback_ms: u64,

    /// Seed for shuffling and level assignment
    #[arg(long)]
    seed: Option<u64>,

    /// File to write logs to (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("Error setting up logging: {}", e);
        std::process::exit(1);
    }

    let config = QuizConfig {
        time_limit_secs: args.time_limit,
        feedback_delay: Duration::from_millis(args.feedback_ms),
    };
    let source = SourceConfig {
        api_url: args.api_url,
        offline: args.offline,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    let mut quiz = Quiz::new(config, source);
    if let Some(seed) = args.seed {
        quiz = quiz.with_seed(seed);
    }

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
