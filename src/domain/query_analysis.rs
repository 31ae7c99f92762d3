use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Specific,
    Broad,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Broad => "broad",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Specific => "Specific",
            Self::Broad => "Broad",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Retrieval sizing recommendation for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnalysis {
    pub top_k: usize,
    pub is_broad: bool,
    pub complexity_score: f64,
    pub query_type: QueryType,
    pub reasoning: String,
}

impl QueryAnalysis {
    pub(crate) fn describe(query_type: QueryType, signals: &[&str]) -> String {
        if signals.is_empty() {
            format!("{} question", query_type.label())
        } else {
            format!("{} question ({})", query_type.label(), signals.join(", "))
        }
    }
}
