use std::collections::HashMap;

use crate::application::ports::ScoredPassage;
use crate::domain::{QueryAnalysis, RetrievalConfig};
use crate::infrastructure::observability::sanitize_query;

use super::{QueryComplexityAnalyzer, QueryExpander};

/// Decides how wide to search and with which query variants, ahead of an
/// external similarity search.
pub struct RetrievalPlanner {
    config: RetrievalConfig,
    analyzer: QueryComplexityAnalyzer,
    expander: QueryExpander,
}

impl RetrievalPlanner {
    pub fn new(config: RetrievalConfig) -> Self {
        let analyzer = QueryComplexityAnalyzer::new(config.min_top_k, config.max_top_k);
        let expander = QueryExpander::new(config.max_query_variants);

        Self {
            config,
            analyzer,
            expander,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn plan(&self, query: &str) -> RetrievalPlan {
        let analysis = self.analyzer.analyze(query);

        let top_k = if self.config.enable_adaptive_top_k {
            analysis.top_k
        } else {
            self.config.default_top_k
        };

        let queries = if self.config.enable_query_expansion {
            self.expander.expand(query, self.config.expansion_method)
        } else {
            vec![query.to_string()]
        };

        tracing::info!(
            query = %sanitize_query(query),
            top_k,
            variants = queries.len(),
            reasoning = %analysis.reasoning,
            "Retrieval planned"
        );

        RetrievalPlan {
            analysis,
            top_k,
            queries,
        }
    }

    /// Combines per-variant search results: one entry per distinct passage
    /// text with its best score, highest first, at most `top_k`.
    pub fn merge_results(
        &self,
        results: Vec<Vec<ScoredPassage>>,
        top_k: usize,
    ) -> Vec<ScoredPassage> {
        let mut best: HashMap<String, (usize, f32)> = HashMap::new();
        let mut order = 0;

        for passage in results.into_iter().flatten() {
            order += 1;
            best.entry(passage.text)
                .and_modify(|(_, score)| {
                    if passage.score > *score {
                        *score = passage.score;
                    }
                })
                .or_insert((order, passage.score));
        }

        let mut merged: Vec<(String, usize, f32)> = best
            .into_iter()
            .map(|(text, (first_seen, score))| (text, first_seen, score))
            .collect();

        merged.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.1.cmp(&b.1)));
        merged.truncate(top_k);

        merged
            .into_iter()
            .map(|(text, _, score)| ScoredPassage { text, score })
            .collect()
    }
}

impl Default for RetrievalPlanner {
    fn default() -> Self {
        Self::new(RetrievalConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct RetrievalPlan {
    pub analysis: QueryAnalysis,
    pub top_k: usize,
    pub queries: Vec<String>,
}
