//! 计分
//!
//! 选择题每题 10 分；编程题通过时 20 分起，每多尝试一次扣 2 分，最低 5 分

use crate::models::attempt::QuizAttempt;

pub const MCQ_POINTS: u32 = 10;
pub const CODING_MAX_POINTS: u32 = 20;
pub const CODING_MIN_POINTS: u32 = 5;
const CODING_ATTEMPT_PENALTY: u32 = 2;

/// 默认证书门槛（百分制）
pub const DEFAULT_CERTIFICATE_THRESHOLD: u32 = 80;

/// 单道编程题得分
///
/// 尝试次数为 0 时按 1 次计算；未通过得 0 分
pub fn coding_question_score(attempt_count: u32, passed: bool) -> u32 {
    if !passed {
        return 0;
    }
    let extra_attempts = attempt_count.max(1) - 1;
    CODING_MAX_POINTS
        .saturating_sub(CODING_ATTEMPT_PENALTY.saturating_mul(extra_attempts))
        .max(CODING_MIN_POINTS)
}

/// 百分制得分（四舍五入），满分为 0 时得 0
pub fn score_percent(attempt: &QuizAttempt) -> u32 {
    let mcq_earned: u32 = attempt
        .mcq
        .iter()
        .filter(|m| m.correct)
        .map(|_| MCQ_POINTS)
        .sum();
    let coding_earned: u32 = attempt
        .coding
        .iter()
        .map(|s| coding_question_score(s.attempt_count, s.passed))
        .sum();

    let max = MCQ_POINTS * attempt.mcq.len() as u32 + CODING_MAX_POINTS * attempt.coding.len() as u32;
    if max == 0 {
        return 0;
    }

    let earned = mcq_earned + coding_earned;
    (100.0 * f64::from(earned) / f64::from(max)).round() as u32
}

pub fn certificate_eligible(score_percent: u32, threshold: u32) -> bool {
    score_percent >= threshold
}

/// 一组测验成绩的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSummary {
    pub average: u32,
    pub highest: u32,
    pub lowest: u32,
    pub completed: usize,
}

/// 统计成绩，没有成绩时返回 None
pub fn summarize_scores(scores: &[u32]) -> Option<PerformanceSummary> {
    let highest = *scores.iter().max()?;
    let lowest = *scores.iter().min()?;
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let average = (total as f64 / scores.len() as f64).round() as u32;

    Some(PerformanceSummary {
        average,
        highest,
        lowest,
        completed: scores.len(),
    })
}

/// 成绩等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Pass,
    NeedsWork,
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ScoreBand::Excellent => "优秀",
            ScoreBand::Good => "良好",
            ScoreBand::Pass => "及格",
            ScoreBand::NeedsWork => "需努力",
        };
        write!(f, "{}", label)
    }
}

pub fn score_band(score_percent: u32) -> ScoreBand {
    match score_percent {
        90.. => ScoreBand::Excellent,
        80..=89 => ScoreBand::Good,
        70..=79 => ScoreBand::Pass,
        _ => ScoreBand::NeedsWork,
    }
}
