mod query_complexity_analyzer;
mod query_expander;
mod retrieval_planner;

pub use query_complexity_analyzer::QueryComplexityAnalyzer;
pub use query_expander::QueryExpander;
pub use retrieval_planner::{RetrievalPlan, RetrievalPlanner};
