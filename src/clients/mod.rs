pub mod judge_client;

pub use judge_client::{CodeJudge, JudgeClient, JudgeResponse, JudgeStatus, JudgeSubmission};
