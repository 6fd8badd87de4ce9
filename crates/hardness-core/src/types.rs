// crates/hardness-core/src/types.rs
use chrono::Local;
use serde::{Deserialize, Serialize};

pub const SELECT_ACCOUNT: &str = "Select Account";
pub const SELECT_INDUSTRY: &str = "Select Industry";

/// The account/industry/problem triple that seeds every stage's prompt
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BusinessContext {
    pub account: String,
    pub industry: String,
    pub problem: String,
}

impl Default for BusinessContext {
    fn default() -> Self {
        BusinessContext {
            account: SELECT_ACCOUNT.to_string(),
            industry: SELECT_INDUSTRY.to_string(),
            problem: String::new(),
        }
    }
}

impl BusinessContext {
    /// A context is complete when an account and industry are selected and
    /// the problem statement is non-empty.
    pub fn is_complete(&self) -> bool {
        self.account != SELECT_ACCOUNT
            && self.industry != SELECT_INDUSTRY
            && !self.problem.trim().is_empty()
    }
}

/// The result of one remote reasoning call
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StageOutput {
    pub stage_name: String,
    pub raw_text: String,
    pub normalized_html: String,
    pub failed: bool,
}

impl StageOutput {
    pub fn completed(stage_name: &str, raw_text: String, normalized_html: String) -> Self {
        StageOutput {
            stage_name: stage_name.to_string(),
            raw_text,
            normalized_html,
            failed: false,
        }
    }

    /// A failed stage keeps its error message where the analysis would be,
    /// so the flow can continue and the user can retry just that stage.
    pub fn failed(stage_name: &str, message: String) -> Self {
        StageOutput {
            stage_name: stage_name.to_string(),
            raw_text: String::new(),
            normalized_html: message,
            failed: true,
        }
    }
}

/// Feedback category chosen by the user
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Positive,
    ContentIssue,
    Suggestion,
}

impl FeedbackType {
    /// The sentence shown to (and stored for) the user, carried over from
    /// the feedback form's fixed options.
    pub fn description(&self) -> &'static str {
        match self {
            FeedbackType::Positive => "I have read it, found it useful, thanks.",
            FeedbackType::ContentIssue => "I have read it, found some definitions to be off.",
            FeedbackType::Suggestion => {
                "The widget seems interesting, but I have some suggestions on the features."
            }
        }
    }

    pub fn parse(s: &str) -> Option<FeedbackType> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Some(FeedbackType::Positive),
            "content-issue" | "content_issue" => Some(FeedbackType::ContentIssue),
            "suggestion" => Some(FeedbackType::Suggestion),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackType::Positive => write!(f, "positive"),
            FeedbackType::ContentIssue => write!(f, "content_issue"),
            FeedbackType::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// One appended feedback row. Append-only; rows are never mutated or
/// deleted except by the admin reset.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeedbackRecord {
    pub timestamp: String,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub feedback_type: FeedbackType,
    pub off_definitions: String,
    pub suggestions: String,
    pub account: String,
    pub industry: String,
    pub problem_statement: String,
    pub agent: String,
}

impl FeedbackRecord {
    pub fn timestamp_now() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_incomplete() {
        let ctx = BusinessContext::default();
        assert!(!ctx.is_complete());
        assert_eq!(ctx.account, SELECT_ACCOUNT);
        assert_eq!(ctx.industry, SELECT_INDUSTRY);
    }

    #[test]
    fn test_whitespace_problem_is_incomplete() {
        let ctx = BusinessContext {
            account: "Walmart".to_string(),
            industry: "Retail".to_string(),
            problem: "   \n".to_string(),
        };
        assert!(!ctx.is_complete());
    }

    #[test]
    fn test_feedback_type_parse_roundtrip() {
        for ft in [
            FeedbackType::Positive,
            FeedbackType::ContentIssue,
            FeedbackType::Suggestion,
        ] {
            assert_eq!(FeedbackType::parse(&ft.to_string()), Some(ft));
        }
        assert_eq!(FeedbackType::parse("other"), None);
    }
}
