//! 内置启发式规则
//!
//! 每条规则只看代码文本，不执行代码。规则命中不代表代码一定正确，
//! 未命中也不代表一定错误。

use regex::Regex;
use std::sync::OnceLock;

use super::HeuristicRule;

/// 用函数指针实现的命名规则
pub struct PredicateRule {
    name: &'static str,
    predicate: fn(&str) -> bool,
}

impl PredicateRule {
    pub const fn new(name: &'static str, predicate: fn(&str) -> bool) -> Self {
        Self { name, predicate }
    }
}

impl HeuristicRule for PredicateRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, source_text: &str) -> bool {
        (self.predicate)(source_text)
    }
}

/// 兜底规则：代码长度超过阈值即视为通过
pub struct MinLengthRule {
    pub min_chars: usize,
}

impl Default for MinLengthRule {
    fn default() -> Self {
        Self { min_chars: 50 }
    }
}

impl HeuristicRule for MinLengthRule {
    fn name(&self) -> &'static str {
        "min-length"
    }

    fn matches(&self, source_text: &str) -> bool {
        source_text.chars().count() > self.min_chars
    }
}

fn has(code: &str, token: &str) -> bool {
    code.contains(token)
}

fn return_then_addition() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"return\s*\(?.*\+.*\)?").ok())
        .as_ref()
}

// ========== JavaScript ==========

pub fn js_sum(code: &str) -> bool {
    let basics = has(code, "function sum") && has(code, "return") && has(code, "+");
    let correct_logic = has(code, "return a + b")
        || has(code, "return (a + b)")
        || return_then_addition().is_some_and(|re| re.is_match(code));
    basics && correct_logic
}

pub fn js_is_palindrome(code: &str) -> bool {
    let reverse_logic = has(code, "reverse()") || (has(code, "split") && has(code, "join"));
    let loop_logic = (has(code, "for") || has(code, "while")) && has(code, "length");
    has(code, "function isPalindrome") && has(code, "return") && (reverse_logic || loop_logic)
}

// ========== Python ==========

pub fn py_is_prime(code: &str) -> bool {
    let range_check =
        has(code, "range") && has(code, "for") && (has(code, "%") || has(code, "mod"));
    let math_approach = has(code, "sqrt") || has(code, "**0.5");
    has(code, "def is_prime") && has(code, "return") && (range_check || math_approach)
}

pub fn py_factorial(code: &str) -> bool {
    let recursion = has(code, "factorial(") && has(code, "return");
    let iteration = has(code, "for") && (has(code, "*=") || has(code, "result *"));
    has(code, "def factorial") && has(code, "return") && (recursion || iteration)
}

// ========== Java ==========

pub fn java_find_max(code: &str) -> bool {
    let loop_and_compare = has(code, "for") && (has(code, ">") || has(code, "Math.max"));
    has(code, "findMax") && has(code, "return") && loop_and_compare
}

pub fn java_contains_only_digits(code: &str) -> bool {
    let char_check =
        has(code, "charAt") && (has(code, "isDigit") || (has(code, "0") && has(code, "9")));
    let regex_check = has(code, "matches") || has(code, "Pattern");
    has(code, "containsOnlyDigits") && has(code, "return") && (char_check || regex_check)
}

// ========== C# ==========

pub fn csharp_reverse_string(code: &str) -> bool {
    let manual =
        has(code, "char") && has(code, "for") && (has(code, "temp") || has(code, "swap"));
    let builtin = has(code, "ToCharArray")
        && (has(code, "Array.Reverse") || has(code, "new string"));
    has(code, "ReverseString") && has(code, "return") && (manual || builtin)
}

pub fn csharp_find_even_numbers(code: &str) -> bool {
    let loop_impl = has(code, "foreach") && has(code, "%") && has(code, "Add");
    let linq_impl = has(code, "Where") || has(code, "Select") || has(code, "=>");
    has(code, "FindEvenNumbers") && has(code, "return") && (loop_impl || linq_impl)
}
