//! 题库
//!
//! 只读的静态题目集合，会话开始时加载一次

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{AppError, AppResult, CatalogError};
use crate::models::language::Language;
use crate::models::question::{CodingQuestion, McqQuestion, Question, QuestionKind};

/// 内置题库文件内容
const BUILTIN_CATALOG: &str = include_str!("../../catalog/questions.toml");

/// 单个题库文件（TOML）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub mcq: Vec<McqQuestion>,
    #[serde(default)]
    pub coding: Vec<CodingQuestion>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionSet {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// 题库：合并多个题库文件后的完整题目集合
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    mcq: Vec<McqQuestion>,
    coding: Vec<CodingQuestion>,
}

impl QuestionCatalog {
    /// 加载内置题库
    pub fn builtin() -> AppResult<Self> {
        let set: QuestionSet = toml::from_str(BUILTIN_CATALOG)
            .map_err(|e| AppError::toml_parse_failed("catalog/questions.toml", e))?;
        Self::from_sets(vec![set])
    }

    /// 合并多个题库文件，检查 ID 唯一性和选择题答案
    pub fn from_sets(sets: Vec<QuestionSet>) -> AppResult<Self> {
        let mut catalog = Self::default();
        let mut seen_mcq = HashSet::new();
        let mut seen_coding = HashSet::new();

        for set in sets {
            for q in set.mcq {
                if !seen_mcq.insert((q.language, q.id)) {
                    return Err(CatalogError::DuplicateQuestion {
                        language: q.language,
                        kind: "选择",
                        id: q.id,
                    }
                    .into());
                }
                if !q.options.iter().any(|o| o.id == q.correct_option_id) {
                    return Err(CatalogError::UnknownAnswer {
                        language: q.language,
                        id: q.id,
                        answer: q.correct_option_id.clone(),
                    }
                    .into());
                }
                catalog.mcq.push(q);
            }
            for q in set.coding {
                if !seen_coding.insert((q.language, q.id)) {
                    return Err(CatalogError::DuplicateQuestion {
                        language: q.language,
                        kind: "编程",
                        id: q.id,
                    }
                    .into());
                }
                catalog.coding.push(q);
            }
        }

        Ok(catalog)
    }

    /// 某语言的选择题（保持文件中的顺序）
    pub fn mcq_for(&self, language: Language) -> Vec<McqQuestion> {
        self.mcq
            .iter()
            .filter(|q| q.language == language)
            .cloned()
            .collect()
    }

    /// 某语言的编程题（保持文件中的顺序）
    pub fn coding_for(&self, language: Language) -> Vec<CodingQuestion> {
        self.coding
            .iter()
            .filter(|q| q.language == language)
            .cloned()
            .collect()
    }

    /// 按语言、类型和 ID 查找题目
    pub fn find(&self, language: Language, kind: QuestionKind, id: u32) -> Option<Question> {
        match kind {
            QuestionKind::MultipleChoice => self
                .mcq
                .iter()
                .find(|q| q.language == language && q.id == id)
                .cloned()
                .map(Question::from),
            QuestionKind::Coding => self
                .coding
                .iter()
                .find(|q| q.language == language && q.id == id)
                .cloned()
                .map(Question::from),
        }
    }

    /// 题库中出现的全部语言（按首次出现顺序）
    pub fn languages(&self) -> Vec<Language> {
        let mut languages = Vec::new();
        let all = self
            .mcq
            .iter()
            .map(|q| q.language)
            .chain(self.coding.iter().map(|q| q.language));
        for lang in all {
            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }
        languages
    }

    /// 确认某语言至少有一道题
    pub fn ensure_language(&self, language: Language) -> Result<(), CatalogError> {
        if self.languages().contains(&language) {
            Ok(())
        } else {
            Err(CatalogError::EmptyLanguage(language))
        }
    }

    pub fn len(&self) -> usize {
        self.mcq.len() + self.coding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::McqOption;

    fn mcq(id: u32, answer: &str) -> McqQuestion {
        McqQuestion {
            id,
            language: Language::Python,
            text: "q".to_string(),
            options: vec![
                McqOption {
                    id: "a".to_string(),
                    text: "A".to_string(),
                },
                McqOption {
                    id: "b".to_string(),
                    text: "B".to_string(),
                },
            ],
            correct_option_id: answer.to_string(),
        }
    }

    #[test]
    fn builtin_catalog_has_all_questions() {
        let catalog = QuestionCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 20);
        for lang in [
            Language::JavaScript,
            Language::Python,
            Language::Java,
            Language::CSharp,
        ] {
            assert_eq!(catalog.mcq_for(lang).len(), 3, "{}", lang);
            assert_eq!(catalog.coding_for(lang).len(), 2, "{}", lang);
        }
        assert!(catalog.coding_for(Language::Cpp).is_empty());
    }

    #[test]
    fn builtin_multiline_strings_are_trimmed() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let sum = catalog.coding_for(Language::JavaScript).remove(0);
        assert!(sum.starter_code.starts_with("function sum(a, b) {"));
        assert_eq!(sum.test_cases, "sum(1, 2) === 3\nsum(-1, 1) === 0");

        let reverse = catalog.coding_for(Language::CSharp).remove(0);
        assert!(reverse.test_cases.ends_with("returns \"#C\""));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let set = QuestionSet {
            mcq: vec![mcq(1, "a"), mcq(1, "b")],
            ..Default::default()
        };
        let err = QuestionCatalog::from_sets(vec![set]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::DuplicateQuestion { id: 1, .. })
        ));
    }

    #[test]
    fn unknown_answer_is_rejected() {
        let set = QuestionSet {
            mcq: vec![mcq(1, "z")],
            ..Default::default()
        };
        assert!(QuestionCatalog::from_sets(vec![set]).is_err());
    }

    #[test]
    fn find_by_kind() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let q = catalog
            .find(Language::Java, QuestionKind::Coding, 5)
            .unwrap();
        assert_eq!(q.kind(), QuestionKind::Coding);
        assert!(q.text().contains("largest"));
        assert!(catalog
            .find(Language::Java, QuestionKind::Coding, 1)
            .is_none());
        assert!(catalog.ensure_language(Language::TypeScript).is_err());
    }
}
