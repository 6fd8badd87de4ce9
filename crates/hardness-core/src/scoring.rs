// crates/hardness-core/src/scoring.rs
//! Dimension score aggregation and hardness classification.
//!
//! Each dimension is answered by three scored questions. A dimension moves
//! NotStarted -> InProgress -> Completed(score) and is Completed only when
//! all three question scores are present; its score is their arithmetic
//! mean. The overall score prefers a number the model itself reported in
//! the summary text and falls back to the mean of completed dimensions.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four grouped analytical concerns, three questions each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Volatility,
    Ambiguity,
    Interconnectedness,
    Uncertainty,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Volatility,
        Dimension::Ambiguity,
        Dimension::Interconnectedness,
        Dimension::Uncertainty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Volatility => "Volatility",
            Dimension::Ambiguity => "Ambiguity",
            Dimension::Interconnectedness => "Interconnectedness",
            Dimension::Uncertainty => "Uncertainty",
        }
    }

    /// The three question stages composing this dimension.
    pub fn questions(&self) -> [&'static str; 3] {
        match self {
            Dimension::Volatility => ["Q1", "Q2", "Q3"],
            Dimension::Ambiguity => ["Q4", "Q5", "Q6"],
            Dimension::Interconnectedness => ["Q7", "Q8", "Q9"],
            Dimension::Uncertainty => ["Q10", "Q11", "Q12"],
        }
    }

    pub fn for_question(question: &str) -> Option<Dimension> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.questions().contains(&question))
    }
}

/// Progress of one dimension's three questions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionState {
    NotStarted,
    InProgress,
    Completed(f64),
}

/// Collected per-question scores across all dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    question_scores: BTreeMap<String, f64>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        ScoreBoard::default()
    }

    pub fn record(&mut self, question: &str, score: f64) -> Result<()> {
        if Dimension::for_question(question).is_none() {
            return Err(anyhow!("'{}' is not a scored question", question));
        }
        if !(0.0..=5.0).contains(&score) {
            return Err(anyhow!("score {} out of range 0-5", score));
        }
        self.question_scores.insert(question.to_string(), score);
        Ok(())
    }

    pub fn question_score(&self, question: &str) -> Option<f64> {
        self.question_scores.get(question).copied()
    }

    pub fn dimension_state(&self, dimension: Dimension) -> DimensionState {
        let questions = dimension.questions();
        let present: Vec<f64> = questions
            .iter()
            .filter_map(|q| self.question_score(q))
            .collect();
        match present.len() {
            0 => DimensionState::NotStarted,
            n if n == questions.len() => {
                DimensionState::Completed(present.iter().sum::<f64>() / questions.len() as f64)
            }
            _ => DimensionState::InProgress,
        }
    }

    pub fn dimension_score(&self, dimension: Dimension) -> Option<f64> {
        match self.dimension_state(dimension) {
            DimensionState::Completed(score) => Some(score),
            _ => None,
        }
    }

    /// Mean of the completed dimensions. Incomplete dimensions contribute
    /// nothing.
    pub fn overall_score(&self) -> Option<f64> {
        let completed: Vec<f64> = Dimension::ALL
            .into_iter()
            .filter_map(|d| self.dimension_score(d))
            .collect();
        if completed.is_empty() {
            None
        } else {
            Some(completed.iter().sum::<f64>() / completed.len() as f64)
        }
    }

    /// One line per completed dimension, for embedding in the summary
    /// stage's prompt.
    pub fn summary_lines(&self) -> String {
        Dimension::ALL
            .into_iter()
            .filter_map(|d| {
                self.dimension_score(d)
                    .map(|s| format!("{}: {:.2}", d.label(), s))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Final hardness classification buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardnessClass {
    Hard,
    Moderate,
    NotHard,
    Unknown,
}

impl HardnessClass {
    pub fn label(&self) -> &'static str {
        match self {
            HardnessClass::Hard => "HARD",
            HardnessClass::Moderate => "MODERATE",
            HardnessClass::NotHard => "NOT HARD",
            HardnessClass::Unknown => "UNKNOWN",
        }
    }
}

/// The composite assessment for the final rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardnessAssessment {
    pub score: Option<f64>,
    pub classification: HardnessClass,
}

// Labeled score patterns, probed in order; the first pattern whose first
// match parses to an in-range [0,5] number wins. There is deliberately no
// "any number anywhere" fallback: it could silently pick up a list index or
// year fragment.
static SCORE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)overall\s+difficulty\s+score\s*[:\-]?\s*(\d+(?:\.\d+)?)",
        r"(?i)\bscore\s*[:\-]?\s*(\d+(?:\.\d+)?)",
        r"(?i)(\d+(?:\.\d+)?)\s*/\s*5\b",
        r"(?i)(\d+(?:\.\d+)?)\s*out\s+of\s*5\b",
        r"(?is)hardness\s+level\W*?(\d+(?:\.\d+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static HARD_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(hard|difficult|complex|challenging)\b").unwrap());
static MODERATE_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(moderate|medium|average)\b").unwrap());
static EASY_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(easy|simple|straightforward)\b").unwrap());

/// Extract a model-reported hardness score from summary text.
pub fn extract_score(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    for pattern in SCORE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(score) = caps[1].parse::<f64>() {
                if (0.0..=5.0).contains(&score) {
                    return Some(score);
                }
            }
        }
    }
    None
}

/// Keyword scan, highest severity first. Word-bounded so "hardness" does
/// not register as "hard".
pub fn classify_keywords(text: &str) -> Option<HardnessClass> {
    if HARD_KEYWORDS.is_match(text) {
        Some(HardnessClass::Hard)
    } else if MODERATE_KEYWORDS.is_match(text) {
        Some(HardnessClass::Moderate)
    } else if EASY_KEYWORDS.is_match(text) {
        Some(HardnessClass::NotHard)
    } else {
        None
    }
}

/// Pure numeric thresholds: Easy 0-3.0, Moderate 3.1-4.0, Hard 4.1-5.0.
pub fn classify_score(score: f64) -> HardnessClass {
    if score <= 3.0 {
        HardnessClass::NotHard
    } else if score <= 4.0 {
        HardnessClass::Moderate
    } else {
        HardnessClass::Hard
    }
}

/// Combine the summary text and the collected question scores into the
/// final assessment. Keyword classification wins over thresholds; the
/// model-reported score wins over the dimension mean.
pub fn assess(summary_text: &str, board: &ScoreBoard) -> HardnessAssessment {
    let score = extract_score(summary_text).or_else(|| board.overall_score());
    let classification = classify_keywords(summary_text)
        .or_else(|| score.map(classify_score))
        .unwrap_or(HardnessClass::Unknown);
    HardnessAssessment {
        score,
        classification,
    }
}
