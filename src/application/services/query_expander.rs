use crate::domain::{DEFAULT_MAX_QUERY_VARIANTS, ExpansionMethod};
use crate::infrastructure::observability::sanitize_query;

/// Term to synonyms, scanned in order.
const SEMANTIC_VARIANTS: &[(&str, &[&str])] = &[
    (
        "challenge",
        &["problem", "issue", "obstacle", "difficulty", "risk", "concern"],
    ),
    (
        "solution",
        &["fix", "resolution", "answer", "approach", "remedy", "workaround"],
    ),
    ("benefit", &["advantage", "pro", "positive", "gain", "value"]),
    (
        "drawback",
        &["disadvantage", "con", "negative", "downside", "limitation"],
    ),
    ("cost", &["budget", "expense", "price", "funding", "investment"]),
    (
        "method",
        &["approach", "technique", "way", "process", "procedure"],
    ),
    (
        "result",
        &["outcome", "consequence", "effect", "impact", "finding"],
    ),
    (
        "reason",
        &["cause", "factor", "rationale", "explanation", "motivation"],
    ),
];

/// Generates lexical variants of a query from a synonym table.
#[derive(Debug, Clone)]
pub struct QueryExpander {
    max_variants: usize,
}

impl QueryExpander {
    pub fn new(max_variants: usize) -> Self {
        Self {
            max_variants: max_variants.max(1),
        }
    }

    pub fn max_variants(&self) -> usize {
        self.max_variants
    }

    /// Returns the original query first, followed by distinct variants.
    pub fn expand(&self, query: &str, method: ExpansionMethod) -> Vec<String> {
        match method {
            ExpansionMethod::Keyword => self.expand_keyword(query),
            ExpansionMethod::Llm => {
                tracing::warn!(
                    query = %sanitize_query(query),
                    "LLM query expansion is not implemented, using keyword expansion"
                );
                self.expand_keyword(query)
            }
        }
    }

    fn expand_keyword(&self, query: &str) -> Vec<String> {
        let mut variants = vec![query.to_string()];
        let mut seen = vec![query.to_lowercase()];
        let query_lower = query.to_lowercase();
        let capitalize = query.chars().next().is_some_and(char::is_uppercase);

        for (term, synonyms) in SEMANTIC_VARIANTS {
            if !query_lower.contains(term) {
                continue;
            }

            for synonym in *synonyms {
                if variants.len() >= self.max_variants {
                    return variants;
                }

                let variant = query_lower.replace(term, synonym);
                if seen.contains(&variant) {
                    continue;
                }

                seen.push(variant.clone());
                variants.push(if capitalize {
                    capitalize_first(&variant)
                } else {
                    variant
                });
            }
        }

        variants
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_VARIANTS)
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
