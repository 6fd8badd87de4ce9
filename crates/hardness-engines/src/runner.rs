// crates/hardness-engines/src/runner.rs
//! Sequential execution of the reasoning chain.
//!
//! Stage failures are recorded, never propagated: a failed stage yields a
//! `StageOutput::failed` and later stages run with that prior treated as an
//! empty string. Question scores are parsed from each response as it lands,
//! so the score board is complete as soon as Q12 finishes.

use crate::client::ReasoningClient;
use crate::stages::{find_stage, PriorOutputs, StageConfig, DIMENSION_SCORES_KEY, STAGES};
use anyhow::Result;
use hardness_core::renderer;
use hardness_core::scoring::{self, HardnessAssessment, ScoreBoard};
use hardness_core::types::StageOutput;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Everything one full chain run produces.
pub struct ChainResult {
    /// Stage outputs in chain order, failed stages included.
    pub outputs: Vec<StageOutput>,
    pub board: ScoreBoard,
    pub assessment: HardnessAssessment,
}

impl ChainResult {
    pub fn output(&self, stage_name: &str) -> Option<&StageOutput> {
        self.outputs.iter().find(|o| o.stage_name == stage_name)
    }

    pub fn failed_stages(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .filter(|o| o.failed)
            .map(|o| o.stage_name.as_str())
            .collect()
    }
}

pub struct StageRunner {
    client: ReasoningClient,
    /// Per-stage endpoint overrides, for pointing a stage at a test server.
    endpoint_overrides: HashMap<String, String>,
}

impl StageRunner {
    pub fn new(client: ReasoningClient) -> Self {
        StageRunner {
            client,
            endpoint_overrides: HashMap::new(),
        }
    }

    pub fn override_endpoint(&mut self, stage_name: &str, endpoint: &str) {
        self.endpoint_overrides
            .insert(stage_name.to_string(), endpoint.to_string());
    }

    fn endpoint_for(&self, stage: &StageConfig) -> String {
        self.endpoint_overrides
            .get(stage.name)
            .cloned()
            .unwrap_or_else(|| stage.endpoint.to_string())
    }

    /// Run a single stage against earlier outputs. Transport and API errors
    /// become a failed `StageOutput` carrying the error text.
    pub async fn run_stage(
        &self,
        stage_name: &str,
        problem: &str,
        priors: &PriorOutputs,
    ) -> Result<StageOutput> {
        let stage = find_stage(stage_name)?;
        let prompt = stage.prompt(problem, priors);
        debug!(
            "Running stage '{}' with a {}-char prompt",
            stage.name,
            prompt.len()
        );

        match self.client.call(&self.endpoint_for(stage), &prompt).await {
            Ok(raw_text) => {
                let html = renderer::render(&raw_text, stage.labels);
                info!("Stage '{}' completed ({} chars)", stage.name, raw_text.len());
                Ok(StageOutput::completed(stage.name, raw_text, html))
            }
            Err(e) => {
                warn!("Stage '{}' failed: {}", stage.name, e);
                Ok(StageOutput::failed(stage.name, e.to_string()))
            }
        }
    }

    /// Run every stage in chain order. `progress` is invoked before each
    /// stage with (index, stage count, stage description).
    pub async fn run_chain<F>(&self, problem: &str, mut progress: F) -> Result<ChainResult>
    where
        F: FnMut(usize, usize, &str),
    {
        let mut priors = PriorOutputs::new();
        let mut outputs = Vec::with_capacity(STAGES.len());
        let mut board = ScoreBoard::default();
        let mut summary_text = String::new();

        for (index, stage) in STAGES.iter().enumerate() {
            progress(index, STAGES.len(), stage.description);

            if stage.name == "hardness_summary" {
                priors.insert(DIMENSION_SCORES_KEY.to_string(), board.summary_lines());
            }

            let output = self.run_stage(stage.name, problem, &priors).await?;
            if !output.failed {
                if stage.scored {
                    match scoring::extract_score(&output.raw_text) {
                        Some(score) => board.record(stage.name, score)?,
                        None => warn!("No score found in '{}' response", stage.name),
                    }
                }
                if stage.name == "hardness_summary" {
                    summary_text = output.raw_text.clone();
                }
                priors.insert(stage.name.to_string(), output.raw_text.clone());
            }
            outputs.push(output);
        }

        let assessment = scoring::assess(&summary_text, &board);
        Ok(ChainResult {
            outputs,
            board,
            assessment,
        })
    }
}
