mod cli;
mod config;
mod cost;
mod error;
mod files;
mod review;
mod timeline;
mod ui;
mod wizard;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command, PriorityArg};
use config::AxonConfig;
use cost::StakingCostCalculator;
use files::{FileProvider, LocalFileProvider};
use review::{JsonReviewQueue, ReviewSource, SampleReviewQueue};
use timeline::{
    EventSource, JsonEventSource, SampleEventSource, StatusFilter, TimelineEventFilter,
};
use wizard::{
    Advance, CATEGORIES, CancelToken, PriorityTier, ReviewerCount, SimulatedSink,
    SubmissionWizard,
};

/// Campos do assistente recebidos pela linha de comando.
struct SubmitArgs {
    title: String,
    abstract_text: String,
    keywords: String,
    category: String,
    file: Option<PathBuf>,
    reviewers: Option<u8>,
    priority: Option<PriorityArg>,
    author: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AxonConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Submit {
            title,
            abstract_text,
            keywords,
            category,
            file,
            reviewers,
            priority,
            author,
        } => {
            let args = SubmitArgs {
                title,
                abstract_text,
                keywords,
                category,
                file,
                reviewers,
                priority,
                author,
            };
            run_submit(&config, args).await
        }
        Command::Cost {
            reviewers,
            priority,
        } => run_cost(reviewers, priority),
        Command::Timeline { query, status } => run_timeline(&config, &query, status),
        Command::Queue => run_queue(&config),
    }
}

fn event_source(config: &AxonConfig) -> Box<dyn EventSource> {
    match &config.events_path {
        Some(path) => Box::new(JsonEventSource::new(path)),
        None => Box::new(SampleEventSource),
    }
}

fn review_source(config: &AxonConfig) -> Box<dyn ReviewSource> {
    match &config.reviews_path {
        Some(path) => Box::new(JsonReviewQueue::new(path)),
        None => Box::new(SampleReviewQueue),
    }
}

fn advance_or_bail(wizard: &mut SubmissionWizard) -> Result<()> {
    let step = wizard.step();
    match wizard.advance() {
        Advance::Moved(_) | Advance::AtFinalStep => {
            ui::print_progress(wizard);
            Ok(())
        }
        Advance::Blocked(gaps) => {
            ui::print_gaps(step, &gaps);
            bail!("submission stopped at step {}", step.index());
        }
    }
}

async fn run_submit(config: &AxonConfig, args: SubmitArgs) -> Result<()> {
    if !args.category.is_empty() && !CATEGORIES.contains(&args.category.as_str()) {
        bail!(
            "unknown research category `{}`; expected one of: {}",
            args.category,
            CATEGORIES.join(", ")
        );
    }

    let mut wizard = SubmissionWizard::new(config.new_draft(), config.submit_timeout());
    ui::print_progress(&wizard);

    // Manuscript info
    wizard.set_title(args.title);
    wizard.set_abstract(args.abstract_text);
    wizard.set_keywords(args.keywords);
    wizard.set_category(args.category);
    advance_or_bail(&mut wizard)?;

    // File upload
    if let Some(path) = &args.file {
        let file = LocalFileProvider.select(path)?;
        wizard.attach_file(file);
    }
    advance_or_bail(&mut wizard)?;

    // Review settings
    if let Some(count) = args.reviewers {
        wizard.set_reviewer_count(ReviewerCount::new(count)?);
    }
    if let Some(priority) = args.priority {
        wizard.set_priority(priority.into());
    }
    ui::print_cost_options();
    println!("  Total Staking Cost: {} AXON", wizard.staking_cost());
    advance_or_bail(&mut wizard)?;

    // Confirmation
    ui::print_confirmation(&wizard);

    let sink = SimulatedSink::new(config.simulated_latency());
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let progress = ui::SubmitProgress::start(wizard.staking_cost());
    let result = wizard.submit(&sink, &cancel).await;
    interrupt.abort();

    let receipt = match result {
        Ok(receipt) => {
            progress.succeeded(&receipt);
            receipt
        }
        Err(err) => {
            progress.failed(wizard.submit_state());
            if cancel.is_cancelled() {
                warn!("submission interrupted");
            }
            return Err(err.into());
        }
    };

    // Hand off to the timeline with the new submission at the head.
    let mut events = event_source(config).events()?;
    let id = timeline::record_submission(&mut events, args.author, &receipt);
    info!(id, events = events.len(), "showing timeline");
    println!();
    ui::print_timeline(&events.iter().collect::<Vec<_>>());
    Ok(())
}

fn run_cost(reviewers: Option<u8>, priority: PriorityArg) -> Result<()> {
    let tier: PriorityTier = priority.into();
    match reviewers {
        Some(count) => {
            let count = ReviewerCount::new(count)?;
            println!(
                "{count} reviewers, {tier}: {} AXON",
                StakingCostCalculator::cost(count, tier)
            );
        }
        None => {
            for count in ReviewerCount::all() {
                println!(
                    "{count} reviewers, {tier}: {} AXON",
                    StakingCostCalculator::cost(count, tier)
                );
            }
        }
    }
    Ok(())
}

fn run_timeline(config: &AxonConfig, query: &str, status: StatusFilter) -> Result<()> {
    let events = event_source(config).events()?;
    let filter = TimelineEventFilter::new(query, status);
    ui::print_timeline(&filter.apply(&events));
    Ok(())
}

fn run_queue(config: &AxonConfig) -> Result<()> {
    let reviews = review_source(config).reviews()?;
    println!("Review Queue ({} assigned)", reviews.len());
    for item in &reviews {
        println!();
        ui::print_review(item);
    }
    Ok(())
}
