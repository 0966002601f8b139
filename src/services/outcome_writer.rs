//! 测验结果写入服务 - 业务能力层
//!
//! 只负责把完成的测验追加到输出日志，不关心流程

use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::outcome::QuizOutcome;

/// 测验结果写入服务
pub struct OutcomeWriter {
    file_path: String,
}

impl OutcomeWriter {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    /// 追加一条测验完成记录
    pub fn write(&self, outcome: &QuizOutcome) -> AppResult<()> {
        debug!(
            "写入测验结果: 学生 {} | {} | {}%",
            outcome.student_id, outcome.quiz_name, outcome.score_percent
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .map_err(|e| AppError::file_write_failed(&self.file_path, e))?;

        let line = format!(
            "学生 {} ({}) | {} | 得分 {}% | 证书 {} | {}\n",
            outcome.student_id,
            outcome.student_name,
            outcome.quiz_name,
            outcome.score_percent,
            if outcome.certificate_eligible { "是" } else { "否" },
            outcome.certificate_date()
        );

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.file_path, e))?;

        Ok(())
    }
}
