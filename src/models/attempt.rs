use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::language::Language;

/// 选择题作答记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqSubmission {
    pub question_id: u32,
    pub option_id: Option<String>,
    pub correct: bool,
}

/// 编程题提交记录
///
/// `attempt_count` 在一次测验中只增不减
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub question_id: u32,
    pub source_text: String,
    pub attempt_count: u32,
    /// 最近一次评测是否通过
    pub passed: bool,
}

impl Submission {
    pub fn new(question_id: u32) -> Self {
        Self {
            question_id,
            source_text: String::new(),
            attempt_count: 0,
            passed: false,
        }
    }
}

/// 一次测验的完整作答情况（每道题一条记录，未作答的题也在其中）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub language: Language,
    pub mcq: Vec<McqSubmission>,
    pub coding: Vec<Submission>,
}

impl QuizAttempt {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            mcq: Vec::new(),
            coding: Vec::new(),
        }
    }

    /// 百分制得分
    pub fn score_percent(&self) -> u32 {
        crate::services::scoring::score_percent(self)
    }
}

/// 作答回放脚本（TOML）
///
/// 每个 `submissions` 元素对应一次"运行测试"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptScript {
    pub student_id: String,
    pub student_name: String,
    pub language: Language,
    /// 题目 ID（字符串形式） -> 选项 ID
    #[serde(default)]
    pub mcq_answers: BTreeMap<String, String>,
    #[serde(default)]
    pub coding: Vec<CodingScript>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl AttemptScript {
    /// 获取某道选择题的答案
    pub fn answer_for(&self, question_id: u32) -> Option<&str> {
        self.mcq_answers
            .get(&question_id.to_string())
            .map(String::as_str)
    }

    /// 获取某道编程题的全部提交
    pub fn submissions_for(&self, question_id: u32) -> &[String] {
        self.coding
            .iter()
            .find(|c| c.question_id == question_id)
            .map(|c| c.submissions.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodingScript {
    pub question_id: u32,
    #[serde(default)]
    pub submissions: Vec<String>,
}
