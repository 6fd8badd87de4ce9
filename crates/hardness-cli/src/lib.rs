// crates/hardness-cli/src/lib.rs
//! Command-line front end for the hardness pipeline. Thin by design: all
//! behavior lives in the library crates, the CLI wires arguments, the
//! environment, and terminal prompts together.

pub mod args;
pub mod config;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use dialoguer::{Confirm, Password};
use hardness_core::context::{AccountChange, SessionContext};
use hardness_core::error::ConfigError;
use hardness_core::types::{FeedbackRecord, FeedbackType};
use hardness_engines::client::ReasoningClient;
use hardness_engines::runner::StageRunner;
use hardness_engines::stages::{PriorOutputs, STAGES};
use hardness_storage::{FeedbackStore, RecordOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::fs;

use args::{AdminCommand, Command, HardnessArgs};

pub async fn run() -> Result<()> {
    let args = HardnessArgs::parse();
    match args.command {
        Command::Analyze {
            account,
            industry,
            problem,
            problem_file,
            raw,
        } => analyze(&account, industry.as_deref(), problem, problem_file, raw).await,
        Command::Stage {
            name,
            problem,
            vocabulary_file,
            current_system_file,
            endpoint,
            raw,
        } => {
            run_single_stage(
                &name,
                &problem,
                vocabulary_file,
                current_system_file,
                endpoint,
                raw,
            )
            .await
        }
        Command::Stages => {
            list_stages();
            Ok(())
        }
        Command::Feedback {
            employee_id,
            name,
            email,
            feedback_type,
            comment,
            off_definitions,
            suggestions,
            account,
            industry,
            problem,
            agent,
        } => record_feedback(
            employee_id,
            name,
            email,
            &feedback_type,
            comment,
            off_definitions,
            suggestions,
            account,
            industry,
            problem,
            agent,
        ),
        Command::Admin { command } => admin(command),
    }
}

async fn analyze(
    account: &str,
    industry: Option<&str>,
    problem: Option<String>,
    problem_file: Option<String>,
    raw: bool,
) -> Result<()> {
    let problem_text = match (problem, problem_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("reading problem statement from {}", path))?,
        (None, None) => bail!("provide --problem or --problem-file"),
    };

    let mut ctx = match SessionContext::new().select_account(account)? {
        AccountChange::Applied(ctx) => ctx,
        AccountChange::NeedsConfirmation(ctx) => {
            if Confirm::new()
                .with_prompt("Changing the account discards the saved problem. Continue?")
                .default(false)
                .interact()?
            {
                ctx.confirm_account_change()
            } else {
                bail!("account change cancelled");
            }
        }
    };

    if let Some(industry) = industry {
        if ctx.industry_locked() {
            warn!(
                "'{}' has a fixed industry '{}'; ignoring --industry {}",
                account,
                ctx.working().industry,
                industry
            );
        } else {
            ctx = ctx.select_industry(industry)?;
        }
    } else if !ctx.industry_locked() {
        bail!("account '{}' has no fixed industry; pass --industry", account);
    }

    let ctx = ctx.set_problem(&problem_text).commit()?;
    let context = ctx.saved();

    println!("Account:  {}", context.account);
    println!("Industry: {}", context.industry);
    println!();

    let runner = StageRunner::new(ReasoningClient::new(config::auth_token()));
    let bar = ProgressBar::new(STAGES.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let progress = bar.clone();
    let result = runner
        .run_chain(&context.problem, move |index, _total, description| {
            progress.set_position(index as u64);
            progress.set_message(description.to_string());
        })
        .await?;
    bar.finish_and_clear();

    for output in &result.outputs {
        println!("## {}", output.stage_name);
        if output.failed {
            println!("(failed) {}", output.normalized_html);
        } else if raw {
            println!("{}", output.raw_text);
        } else {
            println!("{}", output.normalized_html);
        }
        println!();
    }

    println!("## Dimension scores");
    let lines = result.board.summary_lines();
    if lines.is_empty() {
        println!("(no question scores were recovered)");
    } else {
        println!("{}", lines);
    }
    match result.assessment.score {
        Some(score) => println!("Overall: {:.2} / 5", score),
        None => println!("Overall: unavailable"),
    }
    println!("Hardness: {}", result.assessment.classification.label());

    let failed = result.failed_stages();
    if !failed.is_empty() {
        warn!("Stages failed: {}", failed.join(", "));
    }
    Ok(())
}

async fn run_single_stage(
    name: &str,
    problem: &str,
    vocabulary_file: Option<String>,
    current_system_file: Option<String>,
    endpoint: Option<String>,
    raw: bool,
) -> Result<()> {
    let mut priors = PriorOutputs::new();
    if let Some(path) = vocabulary_file {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading vocabulary output from {}", path))?;
        priors.insert("vocabulary".to_string(), text);
    }
    if let Some(path) = current_system_file {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading current-system output from {}", path))?;
        priors.insert("current_system".to_string(), text);
    }

    let mut runner = StageRunner::new(ReasoningClient::new(config::auth_token()));
    if let Some(endpoint) = endpoint {
        runner.override_endpoint(name, &endpoint);
    }

    let output = runner.run_stage(name, problem, &priors).await?;
    if output.failed {
        bail!("stage '{}' failed: {}", name, output.normalized_html);
    }
    if raw {
        println!("{}", output.raw_text);
    } else {
        println!("{}", output.normalized_html);
    }
    Ok(())
}

fn list_stages() {
    for stage in STAGES {
        let dimension = stage
            .dimension
            .map(|d| format!(" [{}]", d.label()))
            .unwrap_or_default();
        println!("{:<18} {}{}", stage.name, stage.description, dimension);
    }
}

#[allow(clippy::too_many_arguments)]
fn record_feedback(
    employee_id: String,
    name: String,
    email: String,
    feedback_type: &str,
    comment: String,
    off_definitions: String,
    suggestions: String,
    account: String,
    industry: String,
    problem: String,
    agent: String,
) -> Result<()> {
    let feedback_type = FeedbackType::parse(feedback_type).ok_or_else(|| {
        ConfigError::InvalidValue {
            parameter: "feedback-type".to_string(),
            value: feedback_type.to_string(),
            expected: "positive, content_issue or suggestion".to_string(),
        }
    })?;
    let feedback = if comment.trim().is_empty() {
        feedback_type.description().to_string()
    } else {
        comment
    };

    let record = FeedbackRecord {
        timestamp: FeedbackRecord::timestamp_now(),
        employee_id,
        name,
        email,
        feedback,
        feedback_type,
        off_definitions,
        suggestions,
        account,
        industry,
        problem_statement: problem,
        agent,
    };

    let store = FeedbackStore::new(config::feedback_path());
    match store.record(&record) {
        RecordOutcome::Persisted => {
            println!("Feedback recorded in {}", store.path().display());
        }
        RecordOutcome::Memory => {
            println!(
                "Feedback file {} is not writable; feedback kept in memory for this session",
                store.path().display()
            );
        }
    }
    Ok(())
}

fn admin(command: AdminCommand) -> Result<()> {
    let expected = config::admin_password()?;
    let entered = Password::new()
        .with_prompt("Admin password")
        .interact()
        .context("reading admin password")?;
    if entered != expected {
        bail!("incorrect admin password");
    }

    let store = FeedbackStore::new(config::feedback_path());
    match command {
        AdminCommand::List {
            agent,
            feedback_type,
        } => {
            let mut table = store.load_all()?;
            if let Some(agent) = agent {
                table = table.filter("Agent", &agent);
            }
            if let Some(raw) = feedback_type {
                let parsed = FeedbackType::parse(&raw)
                    .ok_or_else(|| anyhow!("unknown feedback type '{}'", raw))?;
                table = table.filter("FeedbackType", &parsed.to_string());
            }
            println!("{} feedback row(s)", table.rows.len());
            for row in &table.rows {
                println!(
                    "{} | {} | {} | {}",
                    table.value(row, "Timestamp").unwrap_or(""),
                    table.value(row, "Agent").unwrap_or(""),
                    table.value(row, "FeedbackType").unwrap_or(""),
                    table.value(row, "Feedback").unwrap_or("")
                );
            }
        }
        AdminCommand::Export { output } => {
            let path = output.unwrap_or_else(|| {
                format!(
                    "feedback_export_{}.csv",
                    chrono::Local::now().format("%Y-%m-%d")
                )
            });
            let table = store.load_all()?;
            fs::write(&path, table.to_csv()).with_context(|| format!("writing {}", path))?;
            println!("Exported {} row(s) to {}", table.rows.len(), path);
        }
        AdminCommand::Reset { yes } => {
            if !yes
                && !Confirm::new()
                    .with_prompt("Delete ALL feedback rows?")
                    .default(false)
                    .interact()?
            {
                println!("Reset cancelled");
                return Ok(());
            }
            store.reset()?;
            println!("Feedback store reset");
        }
    }
    Ok(())
}
