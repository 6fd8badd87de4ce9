// crates/hardness-engines/src/stages.rs
//! The stage catalog: one entry per reasoning call, with its endpoint,
//! dimension membership, prompt template, and renderer label keywords.
//!
//! Stages form a strict forward dependency chain:
//! vocabulary -> current_system -> Q1..Q12 -> hardness_summary.
//! A template reads earlier outputs from the prior-output map; a missing
//! prior output is an empty string, never an error, so a stage can still be
//! run (degraded) when an earlier one failed.

use hardness_core::error::ConfigError;
use hardness_core::scoring::Dimension;
use std::collections::HashMap;

/// Raw text of previously completed stages, keyed by stage name.
pub type PriorOutputs = HashMap<String, String>;

/// Synthetic key the runner fills with completed dimension score lines
/// before the summary stage runs.
pub const DIMENSION_SCORES_KEY: &str = "dimension_scores";

pub struct StageConfig {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub description: &'static str,
    pub dimension: Option<Dimension>,
    /// Whether the response is expected to carry a 0-5 question score.
    pub scored: bool,
    /// Keywords the renderer bolds for this stage's output.
    pub labels: &'static [&'static str],
    template: fn(&str, &PriorOutputs) -> String,
}

impl StageConfig {
    pub fn prompt(&self, problem: &str, outputs: &PriorOutputs) -> String {
        (self.template)(problem, outputs)
    }
}

fn prior<'a>(outputs: &'a PriorOutputs, name: &str) -> &'a str {
    outputs.get(name).map(String::as_str).unwrap_or("")
}

fn question_prompt(problem: &str, outputs: &PriorOutputs, question: &str) -> String {
    format!(
        "Problem statement - {}\n\n\
         Context from vocabulary:\n{}\n\n\
         Context from current system:\n{}\n\n\
         {} Provide detailed analysis, score 0\u{2013}5, and justification.",
        problem,
        prior(outputs, "vocabulary"),
        prior(outputs, "current_system"),
        question
    )
}

const DIMENSION_LABELS: &[&str] = &["Analysis", "Score", "Justification", "Key Takeaway"];

macro_rules! question_stage {
    ($name:literal, $agency_id:literal, $dimension:expr, $question:literal) => {
        StageConfig {
            name: $name,
            endpoint: concat!(
                "https://eoc.mu-sigma.com/talos-engine/agency/reasoning_api",
                "?society_id=1757657318406&agency_id=",
                $agency_id,
                "&level=1"
            ),
            description: $question,
            dimension: Some($dimension),
            scored: true,
            labels: DIMENSION_LABELS,
            template: |problem, outputs| question_prompt(problem, outputs, $question),
        }
    };
}

/// All stages in chain order.
pub static STAGES: &[StageConfig] = &[
    StageConfig {
        name: "vocabulary",
        endpoint: concat!(
            "https://eoc.mu-sigma.com/talos-engine/agency/reasoning_api",
            "?society_id=1757657318406&agency_id=1758548233201&level=1"
        ),
        description: "Vocabulary extraction",
        dimension: None,
        scored: false,
        labels: &[],
        template: |problem, _outputs| {
            format!(
                "{}\n\nExtract the vocabulary from this problem statement.",
                problem
            )
        },
    },
    StageConfig {
        name: "current_system",
        endpoint: concat!(
            "https://eoc.mu-sigma.com/talos-engine/agency/reasoning_api",
            "?society_id=1757657318406&agency_id=1758549095254&level=1"
        ),
        description: "Current system in place",
        dimension: None,
        scored: false,
        labels: &["Current System", "Inputs", "Outputs", "Pain Points"],
        template: |problem, outputs| {
            format!(
                "Problem statement - {}\n\n\
                 Context from vocabulary:\n{}\n\n\
                 Describe the current system, inputs, outputs, and pain points in detail \
                 with clear sections.",
                problem,
                prior(outputs, "vocabulary")
            )
        },
    },
    question_stage!(
        "Q1",
        "1758555344231",
        Dimension::Volatility,
        "What is the frequency and pace of change in the key inputs driving the business?"
    ),
    question_stage!(
        "Q2",
        "1758549615986",
        Dimension::Volatility,
        "To what extent are these changes cyclical and predictable versus sporadic and unpredictable?"
    ),
    question_stage!(
        "Q3",
        "1758614550482",
        Dimension::Volatility,
        "How resilient is the current system in absorbing these changes without requiring significant rework or disruption?"
    ),
    question_stage!(
        "Q4",
        "1758614809984",
        Dimension::Ambiguity,
        "To what extent do stakeholders share a common understanding and goals about the problem?"
    ),
    question_stage!(
        "Q5",
        "1758615038050",
        Dimension::Ambiguity,
        "Are there significant conflicts or tradeoffs between stakeholders or system elements?"
    ),
    question_stage!(
        "Q6",
        "1758615386880",
        Dimension::Ambiguity,
        "How clear is the problem definition and scope?"
    ),
    question_stage!(
        "Q7",
        "1758615822743",
        Dimension::Interconnectedness,
        "How many distinct subsystems, teams, or data sources does the problem span?"
    ),
    question_stage!(
        "Q8",
        "1758616104917",
        Dimension::Interconnectedness,
        "To what degree do changes in one part of the system ripple into others?"
    ),
    question_stage!(
        "Q9",
        "1758616498305",
        Dimension::Interconnectedness,
        "How much coordination across stakeholders is required to implement a change?"
    ),
    question_stage!(
        "Q10",
        "1758617140479",
        Dimension::Uncertainty,
        "Are there hidden or latent dependencies that could affect outcomes? What is the risk/impact if this problem remains unresolved?"
    ),
    question_stage!(
        "Q11",
        "1758618137301",
        Dimension::Uncertainty,
        "How urgent is it to address this problem?"
    ),
    question_stage!(
        "Q12",
        "1758619317968",
        Dimension::Uncertainty,
        "How well does solving this problem align with organizational strategy or goals?"
    ),
    StageConfig {
        name: "hardness_summary",
        endpoint: concat!(
            "https://eoc.mu-sigma.com/talos-engine/agency/reasoning_api",
            "?society_id=1757657318406&agency_id=1758619658634&level=1"
        ),
        description: "Hardness level, summary & key takeaways",
        dimension: None,
        scored: false,
        labels: &[
            "Overall Difficulty Score",
            "Hardness Level",
            "SME Justification",
            "Summary",
            "Key Takeaways",
        ],
        template: |problem, outputs| {
            format!(
                "Problem statement - {}\n\n\
                 Context from vocabulary:\n{}\n\n\
                 Context from current system:\n{}\n\n\
                 Volatility Analysis:\n{}\n\n\
                 Ambiguity Analysis:\n{}\n\n\
                 Interconnectedness Analysis:\n{}\n\n\
                 Uncertainty Analysis:\n{}\n\n\
                 Dimension scores so far:\n{}\n\n\
                 Based on the comprehensive analysis of the business problem, provide a \
                 hardness assessment with the following sections IN THIS EXACT FORMAT:\n\n\
                 Overall Difficulty Score\n\
                 [Provide a single numerical score between 0-5 based on your assessment of \
                 the problem complexity]\n\n\
                 Hardness Level\n\
                 [Easy: 0-3.0, Moderate: 3.1-4.0, or Hard: 4.1-5.0]\n\n\
                 SME Justification\n\
                 [Provide detailed justification analyzing the problem across multiple \
                 dimensions - complexity, ambiguity, interconnectedness, and uncertainty]\n\n\
                 Summary\n\
                 [Provide a concise summary of the overall assessment in 2-3 sentences]\n\n\
                 Key Takeaways\n\
                 [Provide 3-5 bullet points with actionable insights]\n\n\
                 IMPORTANT: Make sure each section is clearly labeled with its header as \
                 shown above. Provide actual scores and analysis, not placeholders.",
                problem,
                prior(outputs, "vocabulary"),
                prior(outputs, "current_system"),
                prior(outputs, "Q1"),
                prior(outputs, "Q4"),
                prior(outputs, "Q7"),
                prior(outputs, "Q10"),
                prior(outputs, DIMENSION_SCORES_KEY),
            )
        },
    },
];

/// Look up a stage by name, failing fast with a visible configuration error
/// when it does not exist. No call is attempted for an unknown stage.
pub fn find_stage(name: &str) -> Result<&'static StageConfig, ConfigError> {
    STAGES
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ConfigError::UnknownStage(name.to_string()))
}

pub fn stage_names() -> Vec<&'static str> {
    STAGES.iter().map(|s| s.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT_BASE: &str =
        "https://eoc.mu-sigma.com/talos-engine/agency/reasoning_api?society_id=1757657318406";

    #[test]
    fn test_catalog_covers_the_full_chain() {
        let names = stage_names();
        assert_eq!(names.first(), Some(&"vocabulary"));
        assert_eq!(names[1], "current_system");
        assert_eq!(names.last(), Some(&"hardness_summary"));
        assert_eq!(names.len(), 15);
        for dimension in Dimension::ALL {
            for question in dimension.questions() {
                assert!(names.contains(&question), "missing {}", question);
            }
        }
    }

    #[test]
    fn test_unique_names_and_endpoints() {
        let names = stage_names();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());

        let mut endpoints: Vec<&str> = STAGES.iter().map(|s| s.endpoint).collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), STAGES.len());
        for endpoint in endpoints {
            assert!(endpoint.starts_with(ENDPOINT_BASE), "{}", endpoint);
        }
    }

    #[test]
    fn test_missing_prior_output_degrades_to_empty() {
        let stage = find_stage("Q1").unwrap();
        let prompt = stage.prompt("demand is unpredictable", &PriorOutputs::new());
        assert!(prompt.contains("Problem statement - demand is unpredictable"));
        assert!(prompt.contains("Context from vocabulary:\n\n"));
    }

    #[test]
    fn test_prior_outputs_are_embedded() {
        let stage = find_stage("Q4").unwrap();
        let mut outputs = PriorOutputs::new();
        outputs.insert("vocabulary".to_string(), "Demand: orders per day".to_string());
        outputs.insert("current_system".to_string(), "Manual spreadsheets".to_string());
        let prompt = stage.prompt("staffing", &outputs);
        assert!(prompt.contains("Demand: orders per day"));
        assert!(prompt.contains("Manual spreadsheets"));
    }

    #[test]
    fn test_summary_prompt_embeds_dimension_scores() {
        let stage = find_stage("hardness_summary").unwrap();
        let mut outputs = PriorOutputs::new();
        outputs.insert(
            DIMENSION_SCORES_KEY.to_string(),
            "Volatility: 3.67".to_string(),
        );
        let prompt = stage.prompt("staffing", &outputs);
        assert!(prompt.contains("Volatility: 3.67"));
        assert!(prompt.contains("IN THIS EXACT FORMAT"));
    }

    #[test]
    fn test_unknown_stage_fails_fast() {
        assert!(find_stage("Q13").is_err());
    }

    #[test]
    fn test_scored_stages_carry_their_dimension() {
        for stage in STAGES {
            assert_eq!(stage.scored, stage.dimension.is_some());
            if let Some(dimension) = stage.dimension {
                assert!(dimension.questions().contains(&stage.name));
            }
        }
    }
}
