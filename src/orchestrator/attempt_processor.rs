//! 单份作答回放器 - 编排层
//!
//! ## 职责
//!
//! 把一份作答脚本按顺序回放到 `QuizSession`：
//!
//! 1. **选择题**：依次选择脚本中的答案（未作答的题直接跳过）
//! 2. **编程题**：依次"运行测试"，通过后进入下一题；全部提交都未通过时提前结束
//! 3. **结束测验**：计算成绩，写入输出日志

use crate::config::Config;
use crate::models::attempt::AttemptScript;
use crate::models::catalog::QuestionCatalog;
use crate::models::outcome::QuizOutcome;
use crate::models::question::Question;
use crate::services::scoring::score_band;
use crate::services::OutcomeWriter;
use crate::utils::truncate_text;
use crate::workflow::{GradingFlow, QuizPhase, QuizSession, SessionCtx};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 回放单份作答
///
/// # 参数
/// - `script`: 作答脚本
/// - `attempt_index`: 作答序号（用于日志）
/// - `catalog`: 题库
/// - `flow`: 评测流程（各会话共享）
/// - `config`: 配置
///
/// # 返回
/// 返回测验结果
pub async fn process_attempt(
    script: AttemptScript,
    attempt_index: usize,
    catalog: &QuestionCatalog,
    flow: Arc<GradingFlow>,
    config: &Config,
) -> Result<QuizOutcome> {
    catalog
        .ensure_language(script.language)
        .with_context(|| format!("[作答 {}] 无法开始测验", attempt_index))?;

    let ctx = SessionCtx::new(
        script.student_id.clone(),
        script.student_name.clone(),
        script.language,
    );
    let session = QuizSession::start(ctx, catalog, flow)
        .with_certificate_threshold(config.certificate_threshold);

    replay_mcq(&session, &script)?;
    replay_coding(&session, &script, config.verbose_logging).await?;

    let outcome = session.complete();
    info!(
        "[作答 {}] {} 🎯 得分 {}% ({})",
        attempt_index,
        session.ctx(),
        outcome.score_percent,
        score_band(outcome.score_percent)
    );

    OutcomeWriter::with_path(&config.output_log_file)
        .write(&outcome)
        .with_context(|| format!("[作答 {}] 写入测验结果失败", attempt_index))?;

    Ok(outcome)
}

fn replay_mcq(session: &QuizSession, script: &AttemptScript) -> Result<()> {
    while session.phase() == QuizPhase::MultipleChoice {
        if let Some(Question::MultipleChoice(question)) = session.current_question() {
            match script.answer_for(question.id) {
                Some(option_id) => {
                    let correct = session.select_option(question.id, option_id)?;
                    debug!(
                        "{} 选择题 #{}: {} {}",
                        session.ctx(),
                        question.id,
                        option_id,
                        if correct { "✓" } else { "✗" }
                    );
                }
                None => debug!("{} 选择题 #{} 未作答", session.ctx(), question.id),
            }
        }
        session.next_question()?;
    }
    Ok(())
}

async fn replay_coding(session: &QuizSession, script: &AttemptScript, verbose: bool) -> Result<()> {
    while session.phase() == QuizPhase::Coding {
        let question = match session.current_question() {
            Some(Question::Coding(question)) => question,
            _ => break,
        };

        let mut passed = false;
        for source_text in script.submissions_for(question.id) {
            if verbose {
                debug!(
                    "{} 编程题 #{} 提交代码: {}",
                    session.ctx(),
                    question.id,
                    truncate_text(source_text, 80)
                );
            }

            let verdict = session.run_tests(question.id, source_text).await?;
            if verbose {
                debug!("{}", verdict);
            }
            if verdict.passed {
                passed = true;
                break;
            }
        }

        if !passed {
            warn!(
                "{} ⚠️ 编程题 #{} 没有通过的提交，提前结束测验",
                session.ctx(),
                question.id
            );
            return Ok(());
        }
        session.next_question()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempt::CodingScript;
    use crate::models::language::Language;
    use std::collections::BTreeMap;

    fn config(name: &str) -> Config {
        let path = std::env::temp_dir().join(format!("quiz_grader_{}_{}.txt", name, std::process::id()));
        Config {
            output_log_file: path.to_string_lossy().to_string(),
            ..Config::default()
        }
    }

    fn script(language: Language) -> AttemptScript {
        AttemptScript {
            student_id: "s-9".to_string(),
            student_name: "Grace".to_string(),
            language,
            mcq_answers: BTreeMap::new(),
            coding: Vec::new(),
            file_path: None,
        }
    }

    #[tokio::test]
    async fn replays_full_javascript_attempt() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let mut script = script(Language::JavaScript);
        for q in catalog.mcq_for(Language::JavaScript) {
            script.mcq_answers.insert(q.id.to_string(), q.correct_option_id.clone());
        }
        script.coding = vec![
            CodingScript {
                question_id: 1,
                submissions: vec!["function sum(a, b) {\n  return a + b;\n}".to_string()],
            },
            CodingScript {
                question_id: 2,
                submissions: vec![
                    "function isPalindrome(s) { return true; }".to_string(),
                    "function isPalindrome(s) {\n  return s === s.split('').reverse().join('');\n}".to_string(),
                ],
            },
        ];

        let config = config("replay_js");
        let outcome = process_attempt(script, 1, &catalog, Arc::new(GradingFlow::heuristic()), &config)
            .await
            .unwrap();

        // (30 + 20 + 18) / 70
        assert_eq!(outcome.score_percent, 97);
        assert!(outcome.certificate_eligible);
        assert_eq!(outcome.quiz_name, "JavaScript Quiz");
        let _ = std::fs::remove_file(&config.output_log_file);
    }

    #[tokio::test]
    async fn stops_at_first_unsolved_coding_question() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let mut script = script(Language::Java);
        script.coding = vec![CodingScript {
            question_id: 5,
            submissions: vec!["public class Solution { }".to_string()],
        }];

        let config = config("replay_java");
        let outcome = process_attempt(script, 2, &catalog, Arc::new(GradingFlow::heuristic()), &config)
            .await
            .unwrap();

        assert_eq!(outcome.score_percent, 0);
        assert!(!outcome.certificate_eligible);
        let _ = std::fs::remove_file(&config.output_log_file);
    }

    #[tokio::test]
    async fn language_without_questions_is_an_error() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let config = config("replay_cpp");
        let result = process_attempt(script(Language::Cpp), 3, &catalog, Arc::new(GradingFlow::heuristic()), &config).await;
        assert!(result.is_err());
    }
}
