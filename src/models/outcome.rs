use chrono::NaiveDate;
use std::fmt::Display;

use crate::models::language::Language;

/// 测验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub student_id: String,
    pub student_name: String,
    pub language: Language,
    /// 测验名称，例如 "Python Quiz"
    pub quiz_name: String,
    pub score_percent: u32,
    pub completed_on: NaiveDate,
    pub certificate_eligible: bool,
}

impl QuizOutcome {
    pub fn quiz_name_for(language: Language) -> String {
        format!("{} Quiz", language.name())
    }

    /// 证书上显示的日期，例如 "October 16, 2026"
    pub fn certificate_date(&self) -> String {
        self.completed_on.format("%B %-d, %Y").to_string()
    }
}

impl Display for QuizOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}% | {}",
            self.student_name,
            self.quiz_name,
            self.score_percent,
            if self.certificate_eligible {
                "可获得证书"
            } else {
                "未达证书门槛"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_name_and_date() {
        let outcome = QuizOutcome {
            student_id: "s-1".to_string(),
            student_name: "Ada".to_string(),
            language: Language::CSharp,
            quiz_name: QuizOutcome::quiz_name_for(Language::CSharp),
            score_percent: 94,
            completed_on: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            certificate_eligible: true,
        };
        assert_eq!(outcome.quiz_name, "C# Quiz");
        assert_eq!(outcome.certificate_date(), "March 5, 2026");
        assert_eq!(outcome.to_string(), "Ada | C# Quiz | 94% | 可获得证书");
    }
}
