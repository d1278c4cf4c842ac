/*
[INPUT]:  CLI arguments, optional YAML configuration file, OS shutdown signals
[OUTPUT]: One analysis driven to a terminal state, summary printed
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use redditpulse_adapter::{AnalysisRequest, PulseClient, SortType, TaskStatus, TimeFilter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use redditpulse_tracker::{SessionStore, TaskClient, TrackerConfig};

#[derive(Parser, Debug)]
#[command(name = "redditpulse-tracker", version, about = "Submit a Reddit sentiment analysis and follow it to completion")]
struct Cli {
    /// Search query to analyze
    query: String,
    /// Number of posts to analyze (10-1000)
    #[arg(long, default_value_t = 100)]
    limit: u32,
    /// Restrict to a subreddit; repeatable
    #[arg(long = "subreddit", value_name = "NAME")]
    subreddits: Vec<String>,
    /// Time window: all, day, week, month, year
    #[arg(long = "time-filter", value_name = "WINDOW", default_value = "week")]
    time_filter: String,
    /// Sort order: relevance, hot, top, new
    #[arg(long = "sort", value_name = "ORDER", default_value = "relevance")]
    sort_type: String,
    /// Analysis service base URL; overrides the config file
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Print the recent analysis history after completion
    #[arg(long = "history")]
    show_history: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(&args)?;
    info!(base_url = %config.base_url, "starting redditpulse-tracker");

    let api = PulseClient::with_config_and_base_url(config.client_config(), &config.base_url)
        .context("create api client")?;
    let session = Arc::new(SessionStore::new());
    let client = Arc::new(TaskClient::with_poll_interval(
        api,
        session.clone(),
        config.poll_interval(),
    ));

    setup_signal_handler(client.clone());

    let request = build_request(&args)?;
    let task_id = client
        .submit(request)
        .await
        .context("submit analysis request")?;
    info!(task_id = %task_id, "analysis accepted; polling");

    wait_for_terminal(&session, &task_id, config.poll_interval()).await;

    let snapshot = session.snapshot();
    if let Some(error) = &snapshot.error {
        return Err(anyhow!("{error}"));
    }
    match snapshot.result {
        Some(result) => {
            println!("Analysis complete: {}", result.query);
            println!("  task id:   {}", result.task_id);
            println!("  posts:     {}", result.total_posts);
            println!("  comments:  {}", result.total_comments);
            println!("  duration:  {:.1}s", result.analysis_duration);
        }
        None => println!("Polling stopped before a result arrived."),
    }

    if args.show_history {
        let history = client.get_history().await.context("fetch history")?;
        println!("Recent analyses:");
        for entry in history {
            println!(
                "  {}  {:40}  {} posts",
                entry.created_at.format("%Y-%m-%d %H:%M"),
                entry.query,
                entry.total_posts
            );
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(args: &Cli) -> Result<TrackerConfig> {
    let mut config = match &args.config_path {
        Some(path) => {
            let path_str = path.to_str().context("config path must be valid utf-8")?;
            TrackerConfig::from_file(path_str).context("load config")?
        }
        None => TrackerConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

fn build_request(args: &Cli) -> Result<AnalysisRequest> {
    let time_filter = parse_time_filter(&args.time_filter)?;
    let sort_type = parse_sort_type(&args.sort_type)?;
    let subreddits = if args.subreddits.is_empty() {
        None
    } else {
        Some(args.subreddits.clone())
    };
    Ok(AnalysisRequest {
        query: args.query.clone(),
        limit: args.limit,
        subreddits,
        time_filter,
        sort_type,
    })
}

fn parse_time_filter(value: &str) -> Result<TimeFilter> {
    match value {
        "all" => Ok(TimeFilter::All),
        "day" => Ok(TimeFilter::Day),
        "week" => Ok(TimeFilter::Week),
        "month" => Ok(TimeFilter::Month),
        "year" => Ok(TimeFilter::Year),
        other => Err(anyhow!("unknown time filter: {other}")),
    }
}

fn parse_sort_type(value: &str) -> Result<SortType> {
    match value {
        "relevance" => Ok(SortType::Relevance),
        "hot" => Ok(SortType::Hot),
        "top" => Ok(SortType::Top),
        "new" => Ok(SortType::New),
        other => Err(anyhow!("unknown sort order: {other}")),
    }
}

/// Block until the session reaches a terminal outcome for this task, or the
/// task slot is cleared by cancellation.
async fn wait_for_terminal(session: &SessionStore, task_id: &str, interval: Duration) {
    loop {
        tokio::time::sleep(interval / 2).await;
        let snapshot = session.snapshot();
        let Some(task) = snapshot.task else {
            return;
        };
        if task.id != task_id {
            return;
        }
        match task.status {
            TaskStatus::Completed => {
                // The result write trails the completed status by one fetch.
                if snapshot.result.is_some() || snapshot.error.is_some() {
                    return;
                }
            }
            TaskStatus::Failed => return,
            TaskStatus::Pending | TaskStatus::Processing => {
                info!(
                    task_id = %task.id,
                    status = ?task.status,
                    progress = task.progress,
                    "polling"
                );
            }
        }
    }
}

fn setup_signal_handler(client: Arc<TaskClient>) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT; cancelling polling");
        client.clear_current_analysis();
    });
}
