//! 业务能力层（Services）
//!
//! 只处理单道题目、单份代码，不持有会话状态

pub mod harness;
pub mod heuristics;
pub mod hints;
pub mod outcome_writer;
pub mod scoring;
pub mod test_case_parser;
pub mod validator;
pub mod verdict_builder;

pub use harness::build_harness;
pub use heuristics::{HeuristicRule, RuleRegistry};
pub use hints::hints_for;
pub use outcome_writer::OutcomeWriter;
pub use scoring::{score_band, summarize_scores, PerformanceSummary, ScoreBand};
pub use test_case_parser::parse_test_cases;
pub use validator::validate_code;
