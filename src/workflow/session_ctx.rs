//! 会话上下文
//!
//! 封装"我正在为哪位学生评测哪门语言的测验"这一信息

use std::fmt::Display;

use crate::models::language::Language;

/// 会话上下文
///
/// 评测引擎本身无状态，会话身份通过这个值显式传递
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCtx {
    pub student_id: String,
    pub student_name: String,
    pub language: Language,
}

impl SessionCtx {
    pub fn new(student_id: impl Into<String>, student_name: impl Into<String>, language: Language) -> Self {
        Self {
            student_id: student_id.into(),
            student_name: student_name.into(),
            language,
        }
    }
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[学生 ID#{} 姓名#{} 语言#{}]",
            self.student_id, self.student_name, self.language
        )
    }
}
