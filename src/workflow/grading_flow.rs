//! 代码评测流程 - 流程层
//!
//! 核心职责：定义"一份代码"的完整评测流程
//!
//! 流程顺序：
//! 1. 启发式模式：校验 → 规则匹配 → 合成结果
//! 2. 远程模式：生成测试驱动 → 提交评测服务 → 解释响应
//! 3. 远程模式任何失败（网络、超时、状态码、响应格式）都回退到启发式模式

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clients::judge_client::{CodeJudge, JudgeClient, JudgeSubmission};
use crate::config::{Config, GradingMode};
use crate::error::{AppResult, GradingError, JudgeError};
use crate::models::catalog::QuestionCatalog;
use crate::models::question::CodingQuestion;
use crate::models::verdict::TestVerdict;
use crate::services::harness::build_harness;
use crate::services::heuristics::RuleRegistry;
use crate::services::test_case_parser::parse_test_cases;
use crate::services::validator::validate_code;
use crate::services::verdict_builder;

/// 一次评测的结果以及实际使用的评测方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub verdict: TestVerdict,
    pub graded_by: GradingMode,
}

/// 代码评测流程
///
/// - 不持有会话状态，同一个实例可以被多个会话共享
/// - 远程评测失败时不向上返回错误，而是给出启发式结果
pub struct GradingFlow {
    mode: GradingMode,
    rules: RuleRegistry,
    judge: Option<Arc<dyn CodeJudge>>,
    timeout: Duration,
}

impl GradingFlow {
    /// 创建启发式评测流程
    pub fn heuristic() -> Self {
        Self {
            mode: GradingMode::Heuristic,
            rules: RuleRegistry::with_builtin_rules(),
            judge: None,
            timeout: Duration::from_millis(Config::default().judge_timeout_ms),
        }
    }

    /// 创建远程评测流程
    ///
    /// 题库中存在没有评测 ID 的语言时拒绝创建
    pub fn remote(
        judge: Arc<dyn CodeJudge>,
        catalog: &QuestionCatalog,
        timeout: Duration,
    ) -> Result<Self, GradingError> {
        if let Some(language) = catalog
            .languages()
            .into_iter()
            .find(|lang| lang.judge_id().is_none())
        {
            return Err(GradingError::UnsupportedLanguage(language));
        }

        Ok(Self {
            mode: GradingMode::Remote,
            rules: RuleRegistry::with_builtin_rules(),
            judge: Some(judge),
            timeout,
        })
    }

    /// 根据配置创建评测流程
    pub fn from_config(config: &Config, catalog: &QuestionCatalog) -> AppResult<Self> {
        match config.grading_mode {
            GradingMode::Heuristic => Ok(Self::heuristic()),
            GradingMode::Remote => {
                let client = JudgeClient::new(config)?;
                let flow = Self::remote(
                    Arc::new(client),
                    catalog,
                    Duration::from_millis(config.judge_timeout_ms),
                )?;
                Ok(flow)
            }
        }
    }

    /// 替换启发式规则注册表
    pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    pub fn mode(&self) -> GradingMode {
        self.mode
    }

    /// 评测代码
    pub async fn grade(&self, source_text: &str, question: &CodingQuestion) -> TestVerdict {
        self.grade_detailed(source_text, question).await.verdict
    }

    /// 评测代码，同时返回实际使用的评测方式
    pub async fn grade_detailed(&self, source_text: &str, question: &CodingQuestion) -> GradeReport {
        let judge = match (&self.mode, &self.judge) {
            (GradingMode::Remote, Some(judge)) => judge,
            _ => return self.heuristic_report(source_text, question),
        };

        match self.grade_remote(judge.as_ref(), source_text, question).await {
            Ok(verdict) => GradeReport {
                verdict,
                graded_by: GradingMode::Remote,
            },
            Err(e) => {
                warn!(
                    "⚠️ 远程评测失败 [{} #{}]: {}，回退到启发式评测",
                    question.language, question.id, e
                );
                self.heuristic_report(source_text, question)
            }
        }
    }

    /// 启发式评测
    pub fn grade_heuristic(&self, source_text: &str, question: &CodingQuestion) -> TestVerdict {
        let report = validate_code(source_text, question.language);
        if !report.is_valid {
            debug!(
                "代码校验未通过 [{} #{}]: {:?}",
                question.language, question.id, report.errors
            );
            return verdict_builder::validation_failed(&report);
        }

        let passed = self.rules.grade(source_text, question);
        let test_cases = parse_test_cases(&question.test_cases);
        verdict_builder::synthesize(&report, passed, &test_cases)
    }

    fn heuristic_report(&self, source_text: &str, question: &CodingQuestion) -> GradeReport {
        GradeReport {
            verdict: self.grade_heuristic(source_text, question),
            graded_by: GradingMode::Heuristic,
        }
    }

    async fn grade_remote(
        &self,
        judge: &dyn CodeJudge,
        source_text: &str,
        question: &CodingQuestion,
    ) -> Result<TestVerdict, JudgeError> {
        let test_cases = parse_test_cases(&question.test_cases);
        let full_code = build_harness(source_text, question.language, &test_cases);
        let submission = JudgeSubmission::new(full_code, question.language)?;

        info!(
            "🌐 提交远程评测 [{} #{}] ({} 个测试用例)",
            question.language,
            question.id,
            test_cases.len()
        );

        let response = tokio::time::timeout(self.timeout, judge.submit(&submission))
            .await
            .map_err(|_| JudgeError::Timeout {
                endpoint: "submissions".to_string(),
                timeout_ms: timeout_millis(self.timeout),
            })??;

        Ok(verdict_builder::interpret_judge_response(&response, &test_cases))
    }
}

/// 超时毫秒数，超出 u64 范围时取最大值
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
