use serde::{Deserialize, Serialize};

use crate::models::language::Language;

/// 选择题选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqOption {
    pub id: String,
    pub text: String,
}

/// 选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqQuestion {
    pub id: u32,
    pub language: Language,
    pub text: String,
    pub options: Vec<McqOption>,
    #[serde(rename = "correct_answer", alias = "correct_option_id")]
    pub correct_option_id: String,
}

impl McqQuestion {
    /// 判断所选选项是否正确
    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_option_id == option_id
    }
}

/// 编程题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingQuestion {
    pub id: u32,
    pub language: Language,
    pub text: String,
    pub starter_code: String,
    /// 测试用例描述文本（每行一个用例）
    pub test_cases: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_solution: Option<String>,
}

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    Coding,
}

/// 题目（选择题或编程题）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    MultipleChoice(McqQuestion),
    Coding(CodingQuestion),
}

impl Question {
    pub fn id(&self) -> u32 {
        match self {
            Question::MultipleChoice(q) => q.id,
            Question::Coding(q) => q.id,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Question::MultipleChoice(q) => q.language,
            Question::Coding(q) => q.language,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultipleChoice(_) => QuestionKind::MultipleChoice,
            Question::Coding(_) => QuestionKind::Coding,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.text,
            Question::Coding(q) => &q.text,
        }
    }
}

impl From<McqQuestion> for Question {
    fn from(q: McqQuestion) -> Self {
        Question::MultipleChoice(q)
    }
}

impl From<CodingQuestion> for Question {
    fn from(q: CodingQuestion) -> Self {
        Question::Coding(q)
    }
}

impl std::fmt::Display for CodingQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} #{}] {}",
            self.language,
            self.id,
            crate::utils::truncate_text(&self.text, 60)
        )
    }
}
