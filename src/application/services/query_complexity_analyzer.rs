use crate::domain::{DEFAULT_MAX_TOP_K, DEFAULT_MIN_TOP_K, QueryAnalysis, QueryType};
use crate::infrastructure::observability::sanitize_query;

/// Open-ended interrogatives and imperatives.
const BROAD_KEYWORDS: &[&str] = &[
    "what",
    "how",
    "why",
    "explain",
    "describe",
    "discuss",
    "overview",
    "summary",
    "all",
    "any",
    "everything",
    "comprehensive",
    "tell me about",
    "what are",
    "how do",
    "why do",
    "explain how",
];

/// Targeted questions. Only trusted when no broad keyword matched.
const SPECIFIC_KEYWORDS: &[&str] = &[
    "when", "where", "who", "which", "does", "is", "can", "will", "how many", "how much",
    "what is", "name", "define",
];

const MULTI_SUBJECT_MARKERS: &[&str] = &[" and ", " or ", ","];

const BROAD_WEIGHT: f64 = 0.4;
const SPECIFIC_WEIGHT: f64 = -0.2;
const MULTI_SUBJECT_WEIGHT: f64 = 0.3;
const LONG_QUERY_WEIGHT: f64 = 0.2;
const LONG_QUERY_WORDS: usize = 8;
const BROAD_THRESHOLD: f64 = 0.4;

/// Scores how exploratory a query is and maps the score onto a `top_k`
/// between the configured bounds.
#[derive(Debug, Clone)]
pub struct QueryComplexityAnalyzer {
    min_top_k: usize,
    max_top_k: usize,
}

impl QueryComplexityAnalyzer {
    pub fn new(min_top_k: usize, max_top_k: usize) -> Self {
        Self {
            min_top_k: min_top_k.min(max_top_k),
            max_top_k: max_top_k.max(min_top_k),
        }
    }

    pub fn min_top_k(&self) -> usize {
        self.min_top_k
    }

    pub fn max_top_k(&self) -> usize {
        self.max_top_k
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let query_lower = query.trim().to_lowercase();

        let has_broad_keyword = contains_any(&query_lower, BROAD_KEYWORDS);
        let has_specific_keyword = contains_any(&query_lower, SPECIFIC_KEYWORDS);
        let has_multiple_subjects = contains_any(&query_lower, MULTI_SUBJECT_MARKERS);
        let is_long_query = query.split_whitespace().count() > LONG_QUERY_WORDS;

        let mut score = 0.0;
        if has_broad_keyword {
            score += BROAD_WEIGHT;
        }
        if has_specific_keyword && !has_broad_keyword {
            score += SPECIFIC_WEIGHT;
        }
        if has_multiple_subjects {
            score += MULTI_SUBJECT_WEIGHT;
        }
        if is_long_query {
            score += LONG_QUERY_WEIGHT;
        }

        // Reported with two decimals; top_k is derived from the rounded value.
        let complexity_score = (score.clamp(0.0, 1.0) * 100.0).round() / 100.0;
        let is_broad = complexity_score >= BROAD_THRESHOLD;
        let query_type = if is_broad {
            QueryType::Broad
        } else {
            QueryType::Specific
        };

        let span = (self.max_top_k - self.min_top_k) as f64;
        let top_k = (self.min_top_k as f64 + complexity_score * span).round() as usize;
        let top_k = top_k.clamp(self.min_top_k, self.max_top_k);

        let mut signals = Vec::new();
        if has_broad_keyword {
            signals.push("broad keyword detected");
        }
        if has_specific_keyword {
            signals.push("specific keyword detected");
        }
        if has_multiple_subjects {
            signals.push("multiple subjects");
        }
        if is_long_query {
            signals.push("long query");
        }

        tracing::debug!(
            query = %sanitize_query(query),
            complexity_score,
            top_k,
            query_type = %query_type,
            "Query analyzed"
        );

        QueryAnalysis {
            top_k,
            is_broad,
            complexity_score,
            query_type,
            reasoning: QueryAnalysis::describe(query_type, &signals),
        }
    }
}

impl Default for QueryComplexityAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOP_K, DEFAULT_MAX_TOP_K)
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
