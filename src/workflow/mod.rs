pub mod grading_flow;
pub mod quiz_session;
pub mod session_ctx;

pub use grading_flow::{GradeReport, GradingFlow};
pub use quiz_session::{QuizPhase, QuizSession};
pub use session_ctx::SessionCtx;
