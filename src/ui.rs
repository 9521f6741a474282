//! Interface de terminal do Axon — spinners e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de submissão e `console` para
//! estilização com cores. Todas as funções apenas renderizam modelos já
//! calculados pelo núcleo.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cost::StakingCostCalculator;
use crate::review::{ColorBand, EmphasisBand, ReviewItem, priority_treatment, status_treatment};
use crate::timeline::{EventKind, EventTone, TimelineEvent};
use crate::wizard::{
    Step, StepBadge, SubmissionReceipt, SubmissionWizard, SubmitState, ValidationGap,
};

fn band_style(band: ColorBand) -> Style {
    match band {
        ColorBand::Amber => Style::new().yellow(),
        ColorBand::Blue => Style::new().blue(),
        ColorBand::Green => Style::new().green(),
        ColorBand::Red => Style::new().red(),
    }
}

fn emphasis_marker(band: EmphasisBand) -> String {
    match band {
        EmphasisBand::Critical => Style::new().red().bold().apply_to("▌").to_string(),
        EmphasisBand::Elevated => Style::new().yellow().apply_to("▌").to_string(),
        EmphasisBand::Routine => Style::new().green().dim().apply_to("▌").to_string(),
    }
}

fn tone_icon(tone: EventTone) -> String {
    match tone {
        EventTone::Neutral => "•".to_string(),
        EventTone::Positive => Style::new().green().apply_to("✓").to_string(),
        EventTone::Info => Style::new().blue().apply_to("→").to_string(),
        EventTone::Negative => Style::new().red().apply_to("✗").to_string(),
    }
}

/// Indicador visual para a submissão em andamento.
///
/// Exibe um spinner enquanto o destino de submissão responde e uma
/// mensagem colorida para sucesso (verde) ou falha (vermelho).
pub struct SubmitProgress {
    // Spinner do indicatif.
    pb: ProgressBar,
    green: Style,
    red: Style,
}

impl SubmitProgress {
    /// Inicia o spinner com o valor em staking.
    pub fn start(stake: u32) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Submitting to Blockchain... staking {stake} AXON"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    pub fn succeeded(&self, receipt: &SubmissionReceipt) {
        self.pb.finish_and_clear();
        println!(
            "  {} Submitted \"{}\" ({}), {} AXON staked",
            self.green.apply_to("✓"),
            receipt.title,
            receipt.submission_id,
            receipt.stake
        );
    }

    /// Encerra o spinner mostrando o estado em que a submissão ficou.
    pub fn failed(&self, state: &SubmitState) {
        self.pb.finish_and_clear();
        match state {
            SubmitState::Failed(err) => {
                println!("  {} Submission failed: {err}", self.red.apply_to("✗"))
            }
            other => println!("  {} Submission stopped ({other})", self.red.apply_to("✗")),
        }
        if state.accepts_submit() {
            println!("    Your draft is kept at the confirmation step.");
        }
    }
}

/// Cabeçalho de progresso do assistente: `n/4 steps` e os quatro selos.
pub fn print_progress(wizard: &SubmissionWizard) {
    let current = wizard.step();
    println!(
        "Submission Progress  {}/4 steps ({}%)",
        current.index(),
        wizard.progress_percent()
    );
    let badges: Vec<String> = Step::ALL
        .iter()
        .map(|step| {
            let style = match step.badge(current) {
                StepBadge::Completed => Style::new().green(),
                StepBadge::Current => Style::new().blue().bold(),
                StepBadge::Upcoming => Style::new().dim(),
            };
            style.apply_to(step.label()).to_string()
        })
        .collect();
    println!("  {}", badges.join("  ›  "));
}

pub fn print_gaps(step: Step, gaps: &[ValidationGap]) {
    let red = Style::new().red();
    println!("{} cannot continue past {}:", red.apply_to("✗"), step.label());
    for gap in gaps {
        println!("    - {gap}");
    }
}

/// Opções de revisores com o custo de cada uma no nível padrão.
pub fn print_cost_options() {
    for (count, cost) in StakingCostCalculator::option_preview() {
        println!("  {count} reviewers ({cost} AXON tokens)");
    }
}

/// Resumo do passo de confirmação.
pub fn print_confirmation(wizard: &SubmissionWizard) {
    let draft = wizard.draft();
    let bold = Style::new().bold();
    let (min_days, max_days) = draft.priority.turnaround_days();

    println!("{}", bold.apply_to("Manuscript Details"));
    println!("  Title:    {}", draft.title);
    println!("  Category: {}", draft.category);
    println!("  Keywords: {}", draft.keywords);
    if let Some(file) = &draft.file {
        println!("  File:     {} ({})", file.name, file.display_size());
    }
    println!("{}", bold.apply_to("Review Configuration"));
    println!("  Reviewers: {}", draft.reviewer_count);
    println!("  Priority:  {} ({min_days}-{max_days} days)", draft.priority);
    println!("  Tokens to Stake: {} AXON", wizard.staking_cost());
    println!(
        "{} By submitting, you agree to stake {} AXON tokens.",
        Style::new().yellow().apply_to("!"),
        wizard.staking_cost()
    );
}

pub fn print_event(event: &TimelineEvent) {
    let status = band_style(event.status.treatment()).apply_to(event.status.label());
    println!(
        "{} {}  [{}]",
        tone_icon(event.kind.tone()),
        Style::new().bold().apply_to(&event.title),
        status
    );
    println!(
        "    {}  {}",
        Style::new().dim().apply_to(event.kind.type_name()),
        event.timestamp.format("%B %-d, %Y %H:%M")
    );

    match &event.kind {
        EventKind::Submission {
            author,
            reviewers,
            due_date,
            ..
        } => {
            println!("    Author: {author}  Reviewers: {reviewers}");
            if let Some(due) = due_date {
                println!("    Due: {}", due.format("%Y-%m-%d"));
            }
        }
        EventKind::ReviewCompleted { reviewer, rating, .. } => {
            println!("    Reviewer: {reviewer}");
            if let Some(rating) = rating {
                println!("    Rating: {rating}/5.0");
            }
        }
        EventKind::SubmissionAccepted {
            author,
            final_rating,
            ..
        } => {
            println!("    Author: {author}");
            if let Some(rating) = final_rating {
                println!("    Final rating: {rating}/5.0");
            }
        }
        EventKind::ReviewAssignment {
            assigned_to,
            deadline,
            ..
        } => {
            println!("    Assigned to: {assigned_to}");
            if let Some(deadline) = deadline {
                println!("    Deadline: {}", deadline.format("%Y-%m-%d"));
            }
        }
        EventKind::SubmissionRejected { author, reason, .. } => {
            println!("    Author: {author}");
            if let Some(reason) = reason {
                println!("    {}", Style::new().red().apply_to(format!("Reason: {reason}")));
            }
        }
    }
    println!("    {}", event.kind.tokens());
}

/// Lista de eventos filtrados, ou o estado vazio explícito.
pub fn print_timeline(events: &[&TimelineEvent]) {
    if events.is_empty() {
        println!("No activities found");
        println!("{}", Style::new().dim().apply_to("Try adjusting your search or filter criteria"));
        return;
    }
    for event in events {
        print_event(event);
        println!();
    }
}

pub fn print_review(item: &ReviewItem) {
    let status = band_style(status_treatment(item.status)).apply_to(item.status.label());
    println!(
        "{} {}  [{}] [{}]",
        emphasis_marker(priority_treatment(item.priority)),
        Style::new().bold().apply_to(&item.title),
        status,
        item.field
    );
    println!("  Authors: {}", item.authors.join(", "));
    println!(
        "  Submitted: {}  Due: {}  Stake: {} AXON",
        item.submitted_date, item.due_date, item.stake_amount
    );
    match item.status.action() {
        Some(action) => println!("  ID: {}  → {action}", item.id),
        None => println!("  ID: {}", item.id),
    }
}
