//! 启发式评测 - 业务能力层
//!
//! 静态启发式模式：不编译、不运行代码，只通过文本特征近似判断代码是否
//! 实现了题目要求的算法。存在误判（两个方向都有），这是纯客户端、
//! 无执行环境评测的已知代价。
//!
//! 规则按 `(语言, 题目ID)` 注册，新增题目只需注册新规则，不需要改动分发逻辑。

pub mod rules;

use std::collections::HashMap;
use tracing::debug;

use crate::models::language::Language;
use crate::models::question::CodingQuestion;

pub use rules::{MinLengthRule, PredicateRule};

/// 单条启发式规则
pub trait HeuristicRule: Send + Sync {
    /// 规则名称（用于日志）
    fn name(&self) -> &'static str;

    /// 判断代码是否满足规则
    fn matches(&self, source_text: &str) -> bool;
}

/// 规则注册表
pub struct RuleRegistry {
    rules: HashMap<(Language, u32), Box<dyn HeuristicRule>>,
    fallback: Box<dyn HeuristicRule>,
}

impl RuleRegistry {
    /// 创建空注册表（只有兜底规则）
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: Box::new(MinLengthRule::default()),
        }
    }

    /// 创建包含内置题目规则的注册表
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::empty();
        registry
            .register(
                Language::JavaScript,
                1,
                PredicateRule::new("js-sum", rules::js_sum),
            )
            .register(
                Language::JavaScript,
                2,
                PredicateRule::new("js-is-palindrome", rules::js_is_palindrome),
            )
            .register(
                Language::Python,
                3,
                PredicateRule::new("py-is-prime", rules::py_is_prime),
            )
            .register(
                Language::Python,
                4,
                PredicateRule::new("py-factorial", rules::py_factorial),
            )
            .register(
                Language::Java,
                5,
                PredicateRule::new("java-find-max", rules::java_find_max),
            )
            .register(
                Language::Java,
                6,
                PredicateRule::new(
                    "java-contains-only-digits",
                    rules::java_contains_only_digits,
                ),
            )
            .register(
                Language::CSharp,
                7,
                PredicateRule::new("csharp-reverse-string", rules::csharp_reverse_string),
            )
            .register(
                Language::CSharp,
                8,
                PredicateRule::new("csharp-find-even-numbers", rules::csharp_find_even_numbers),
            );
        registry
    }

    /// 注册规则，同一 key 的旧规则会被替换
    pub fn register(
        &mut self,
        language: Language,
        question_id: u32,
        rule: impl HeuristicRule + 'static,
    ) -> &mut Self {
        self.rules.insert((language, question_id), Box::new(rule));
        self
    }

    /// 替换兜底规则
    pub fn with_fallback(mut self, rule: impl HeuristicRule + 'static) -> Self {
        self.fallback = Box::new(rule);
        self
    }

    /// 查找规则，找不到时返回兜底规则
    pub fn rule_for(&self, language: Language, question_id: u32) -> &dyn HeuristicRule {
        self.rules
            .get(&(language, question_id))
            .map(|rule| rule.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    /// 对编程题进行启发式评测
    pub fn grade(&self, source_text: &str, question: &CodingQuestion) -> bool {
        let rule = self.rule_for(question.language, question.id);
        let passed = rule.matches(source_text);
        debug!(
            "启发式评测 [{} #{}] 规则: {} -> {}",
            question.language,
            question.id,
            rule.name(),
            if passed { "通过" } else { "未通过" }
        );
        passed
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtin_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coding(language: Language, id: u32) -> CodingQuestion {
        CodingQuestion {
            id,
            language,
            text: String::new(),
            starter_code: String::new(),
            test_cases: String::new(),
            sample_solution: None,
        }
    }

    struct AlwaysPass;

    impl HeuristicRule for AlwaysPass {
        fn name(&self) -> &'static str {
            "always-pass"
        }

        fn matches(&self, _source_text: &str) -> bool {
            true
        }
    }

    #[test]
    fn builtin_registry_covers_catalog_questions() {
        let registry = RuleRegistry::with_builtin_rules();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.rule_for(Language::JavaScript, 1).name(), "js-sum");
        assert_eq!(
            registry.rule_for(Language::CSharp, 8).name(),
            "csharp-find-even-numbers"
        );
    }

    #[test]
    fn rules_are_keyed_by_language_and_id() {
        let registry = RuleRegistry::with_builtin_rules();
        // 题目 1 只在 JavaScript 下有规则
        assert_eq!(registry.rule_for(Language::Python, 1).name(), "min-length");
        assert_eq!(registry.rule_for(Language::Java, 99).name(), "min-length");
    }

    #[test]
    fn unknown_question_uses_length_threshold() {
        let registry = RuleRegistry::with_builtin_rules();
        let question = coding(Language::Java, 42);
        assert!(!registry.grade("short", &question));
        assert!(registry.grade(&"x".repeat(80), &question));
    }

    #[test]
    fn custom_rules_can_be_registered() {
        let mut registry = RuleRegistry::empty();
        registry.register(Language::Cpp, 1, AlwaysPass);
        assert!(registry.grade("", &coding(Language::Cpp, 1)));

        let registry = RuleRegistry::empty().with_fallback(AlwaysPass);
        assert!(registry.grade("", &coding(Language::C, 7)));
    }

    #[test]
    fn grading_is_deterministic() {
        let registry = RuleRegistry::with_builtin_rules();
        let question = coding(Language::JavaScript, 1);
        let code = "function sum(a, b) { return a + b; }";
        let first = registry.grade(code, &question);
        for _ in 0..5 {
            assert_eq!(registry.grade(code, &question), first);
        }
    }
}
