//! 测验会话 - 流程层
//!
//! 管理一次测验的作答状态：当前题目、选择题答案、编程题尝试次数和最近一次评测结果。
//!
//! 阶段顺序：选择题 → 编程题 → 完成
//! - 选择题随时可以进入下一题
//! - 编程题只有最近一次评测通过后才能进入下一题
//! - 同一道编程题同时只能有一个评测在进行，评测进行中不能进入下一题

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::config::GradingMode;
use crate::error::GradingError;
use crate::models::attempt::{McqSubmission, QuizAttempt, Submission};
use crate::models::catalog::QuestionCatalog;
use crate::models::outcome::QuizOutcome;
use crate::models::question::{CodingQuestion, McqQuestion, Question};
use crate::models::verdict::TestVerdict;
use crate::services::hints::hints_for;
use crate::services::scoring::{certificate_eligible, score_percent, DEFAULT_CERTIFICATE_THRESHOLD};
use crate::workflow::grading_flow::GradingFlow;
use crate::workflow::session_ctx::SessionCtx;

/// 测验阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    MultipleChoice,
    Coding,
    Completed,
}

struct SessionState {
    phase: QuizPhase,
    index: usize,
    attempt: QuizAttempt,
    /// 最近一次评测结果及其所属题目
    latest_verdict: Option<(u32, TestVerdict)>,
    in_flight: HashSet<u32>,
    /// 远程评测失败过一次后，本次测验剩余部分都使用启发式评测
    remote_disabled: bool,
}

/// 测验会话
pub struct QuizSession {
    ctx: SessionCtx,
    flow: Arc<GradingFlow>,
    mcq: Vec<McqQuestion>,
    coding: Vec<CodingQuestion>,
    certificate_threshold: u32,
    state: Mutex<SessionState>,
}

/// 评测结束时清理进行中标记（评测被取消时也会执行）
struct InFlightGuard<'a> {
    session: &'a QuizSession,
    question_id: u32,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.state().in_flight.remove(&self.question_id);
    }
}

impl QuizSession {
    /// 开始一次新的测验
    pub fn start(ctx: SessionCtx, catalog: &QuestionCatalog, flow: Arc<GradingFlow>) -> Self {
        let mcq = catalog.mcq_for(ctx.language);
        let coding = catalog.coding_for(ctx.language);

        let mut attempt = QuizAttempt::new(ctx.language);
        attempt.mcq = mcq
            .iter()
            .map(|q| McqSubmission {
                question_id: q.id,
                option_id: None,
                correct: false,
            })
            .collect();
        attempt.coding = coding.iter().map(|q| Submission::new(q.id)).collect();

        let phase = if !mcq.is_empty() {
            QuizPhase::MultipleChoice
        } else if !coding.is_empty() {
            QuizPhase::Coding
        } else {
            QuizPhase::Completed
        };

        info!(
            "{} 📝 开始测验: {} 道选择题, {} 道编程题",
            ctx,
            mcq.len(),
            coding.len()
        );

        Self {
            ctx,
            flow,
            mcq,
            coding,
            certificate_threshold: DEFAULT_CERTIFICATE_THRESHOLD,
            state: Mutex::new(SessionState {
                phase,
                index: 0,
                attempt,
                latest_verdict: None,
                in_flight: HashSet::new(),
                remote_disabled: false,
            }),
        }
    }

    /// 设置证书门槛
    pub fn with_certificate_threshold(mut self, threshold: u32) -> Self {
        self.certificate_threshold = threshold;
        self
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ctx(&self) -> &SessionCtx {
        &self.ctx
    }

    pub fn phase(&self) -> QuizPhase {
        self.state().phase
    }

    /// 当前题目，测验结束后返回 None
    pub fn current_question(&self) -> Option<Question> {
        let state = self.state();
        match state.phase {
            QuizPhase::MultipleChoice => self.mcq.get(state.index).cloned().map(Question::from),
            QuizPhase::Coding => self.coding.get(state.index).cloned().map(Question::from),
            QuizPhase::Completed => None,
        }
    }

    /// 作答情况快照
    pub fn attempt(&self) -> QuizAttempt {
        self.state().attempt.clone()
    }

    pub fn latest_verdict(&self) -> Option<TestVerdict> {
        self.state().latest_verdict.as_ref().map(|(_, v)| v.clone())
    }

    /// 当前编程题的提示
    pub fn hints(&self) -> &'static [&'static str] {
        let state = self.state();
        match state.phase {
            QuizPhase::Coding => self
                .coding
                .get(state.index)
                .map(hints_for)
                .unwrap_or_default(),
            _ => &[],
        }
    }

    /// 选择选项，返回是否正确
    pub fn select_option(&self, question_id: u32, option_id: &str) -> Result<bool, GradingError> {
        let mut state = self.state();
        let question = match state.phase {
            QuizPhase::Completed => return Err(GradingError::QuizCompleted),
            QuizPhase::MultipleChoice => self
                .mcq
                .get(state.index)
                .filter(|q| q.id == question_id)
                .ok_or(GradingError::NotCurrentQuestion { question_id })?,
            QuizPhase::Coding => return Err(GradingError::NotCurrentQuestion { question_id }),
        };

        let correct = question.is_correct(option_id);
        let index = state.index;
        if let Some(submission) = state.attempt.mcq.get_mut(index) {
            submission.option_id = Some(option_id.to_string());
            submission.correct = correct;
        }

        debug!("{} 选择题 #{} 选择 {}", self.ctx, question_id, option_id);
        Ok(correct)
    }

    /// 修改代码，会清除最近一次评测结果
    pub fn update_code(&self, question_id: u32, source_text: &str) -> Result<(), GradingError> {
        let mut state = self.state();
        let index = self.current_coding_index(&state, question_id)?;

        if let Some(submission) = state.attempt.coding.get_mut(index) {
            submission.source_text = source_text.to_string();
            submission.passed = false;
        }
        state.latest_verdict = None;
        Ok(())
    }

    /// 运行测试
    ///
    /// 无论代码是否通过校验，尝试次数都会加一
    pub async fn run_tests(&self, question_id: u32, source_text: &str) -> Result<TestVerdict, GradingError> {
        let (question, remote_disabled) = {
            let mut state = self.state();
            let index = self.current_coding_index(&state, question_id)?;

            if !state.in_flight.insert(question_id) {
                return Err(GradingError::AlreadyInFlight { question_id });
            }

            if let Some(submission) = state.attempt.coding.get_mut(index) {
                submission.source_text = source_text.to_string();
                submission.attempt_count += 1;
            }

            (self.coding[index].clone(), state.remote_disabled)
        };
        let _guard = InFlightGuard {
            session: self,
            question_id,
        };

        let verdict = if remote_disabled {
            self.flow.grade_heuristic(source_text, &question)
        } else {
            let report = self.flow.grade_detailed(source_text, &question).await;
            if self.flow.mode() == GradingMode::Remote && report.graded_by == GradingMode::Heuristic {
                warn!("{} 远程评测不可用，本次测验剩余题目使用启发式评测", self.ctx);
                self.state().remote_disabled = true;
            }
            report.verdict
        };

        let mut state = self.state();
        let still_current = self.current_coding_index(&state, question_id).is_ok();
        if let Some(submission) = state
            .attempt
            .coding
            .iter_mut()
            .find(|s| s.question_id == question_id)
        {
            submission.passed = verdict.passed;
            info!(
                "{} 编程题 #{} 第 {} 次运行测试: {}",
                self.ctx,
                question_id,
                submission.attempt_count,
                if verdict.passed { "✅ 通过" } else { "❌ 未通过" }
            );
        }
        // 已经离开该题时不覆盖当前题目的评测结果
        if still_current {
            state.latest_verdict = Some((question_id, verdict.clone()));
        }

        Ok(verdict)
    }

    /// 进入下一题，返回进入后的阶段
    pub fn next_question(&self) -> Result<QuizPhase, GradingError> {
        let mut state = self.state();
        match state.phase {
            QuizPhase::Completed => return Err(GradingError::QuizCompleted),
            QuizPhase::MultipleChoice => {
                if state.index + 1 < self.mcq.len() {
                    state.index += 1;
                } else if !self.coding.is_empty() {
                    state.phase = QuizPhase::Coding;
                    state.index = 0;
                } else {
                    state.phase = QuizPhase::Completed;
                }
            }
            QuizPhase::Coding => {
                let question_id = self.coding.get(state.index).map(|q| q.id).unwrap_or_default();
                if state.in_flight.contains(&question_id) {
                    return Err(GradingError::AlreadyInFlight { question_id });
                }
                let passed = state
                    .latest_verdict
                    .as_ref()
                    .is_some_and(|(id, v)| *id == question_id && v.passed);
                if !passed {
                    return Err(GradingError::NotPassed { question_id });
                }
                if state.index + 1 < self.coding.len() {
                    state.index += 1;
                } else {
                    state.phase = QuizPhase::Completed;
                }
            }
        }

        state.latest_verdict = None;
        Ok(state.phase)
    }

    /// 进度百分比：选择题占前 50%，编程题占后 50%
    pub fn progress_percent(&self) -> u32 {
        let state = self.state();
        let position = (state.index + 1) as f64;
        let percent = match state.phase {
            QuizPhase::MultipleChoice => position / self.mcq.len() as f64 * 50.0,
            QuizPhase::Coding => 50.0 + position / self.coding.len() as f64 * 50.0,
            QuizPhase::Completed => 100.0,
        };
        percent.round() as u32
    }

    /// 结束测验并计算结果
    ///
    /// 可以在任意阶段调用，未完成的题目按当前状态计分
    pub fn complete(&self) -> QuizOutcome {
        let mut state = self.state();
        state.phase = QuizPhase::Completed;
        state.latest_verdict = None;

        let score = score_percent(&state.attempt);
        let outcome = QuizOutcome {
            student_id: self.ctx.student_id.clone(),
            student_name: self.ctx.student_name.clone(),
            language: self.ctx.language,
            quiz_name: QuizOutcome::quiz_name_for(self.ctx.language),
            score_percent: score,
            completed_on: chrono::Local::now().date_naive(),
            certificate_eligible: certificate_eligible(score, self.certificate_threshold),
        };

        info!("{} 🏁 测验完成: {}", self.ctx, outcome);
        outcome
    }

    fn current_coding_index(&self, state: &SessionState, question_id: u32) -> Result<usize, GradingError> {
        match state.phase {
            QuizPhase::Completed => Err(GradingError::QuizCompleted),
            QuizPhase::MultipleChoice => Err(GradingError::NotCurrentQuestion { question_id }),
            QuizPhase::Coding => self
                .coding
                .get(state.index)
                .filter(|q| q.id == question_id)
                .map(|_| state.index)
                .ok_or(GradingError::NotCurrentQuestion { question_id }),
        }
    }
}
