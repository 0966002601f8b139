//! 测试用例描述解析
//!
//! 每行一个用例，支持三种写法：
//! - `sum(1, 2) === 3`
//! - `is_prime(7) == True`
//! - `findMax(new int[]{1, 3}) returns 3`
//!
//! 无法识别的行直接跳过，不报错

use regex::Regex;
use std::sync::OnceLock;

use crate::models::verdict::TestCase;

const STRICT_MARKER: &str = "===";
const RETURNS_MARKER: &str = " returns ";

fn loose_equality() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.+)\s*==\s*(.+)").ok()).as_ref()
}

/// 解析测试用例描述文本
///
/// 纯函数：相同输入总是得到相同输出
pub fn parse_test_cases(text: &str) -> Vec<TestCase> {
    text.trim().lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<TestCase> {
    if let Some((input, expected)) = line.split_once(STRICT_MARKER) {
        // 只取第一段期望值，`a === b === c` 中的 c 被丢弃
        let expected = expected.split(STRICT_MARKER).next().unwrap_or_default();
        return Some(TestCase::new(input.trim(), expected.trim()));
    }

    if let Some(caps) = loose_equality().and_then(|re| re.captures(line)) {
        return Some(TestCase::new(caps[1].trim(), caps[2].trim()));
    }

    line.split_once(RETURNS_MARKER)
        .map(|(input, expected)| TestCase::new(input.trim(), expected.trim()))
        .filter(|case| !case.input.is_empty() && !case.expected.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_equality_lines() {
        let cases = parse_test_cases("sum(1, 2) === 3\nsum(-1, 1) === 0");
        assert_eq!(
            cases,
            vec![TestCase::new("sum(1, 2)", "3"), TestCase::new("sum(-1, 1)", "0")]
        );
    }

    #[test]
    fn parses_loose_equality_lines() {
        let cases = parse_test_cases("is_prime(7) == True\nis_prime(4) == False");
        assert_eq!(cases[0], TestCase::new("is_prime(7)", "True"));
        assert_eq!(cases[1], TestCase::new("is_prime(4)", "False"));
    }

    #[test]
    fn parses_returns_lines() {
        let cases = parse_test_cases(
            "ReverseString(\"hello\") returns \"olleh\"\nFindEvenNumbers(new List<int>{7, 9, 11}) returns []",
        );
        assert_eq!(cases[0], TestCase::new("ReverseString(\"hello\")", "\"olleh\""));
        assert_eq!(
            cases[1],
            TestCase::new("FindEvenNumbers(new List<int>{7, 9, 11})", "[]")
        );
    }

    #[test]
    fn skips_unrecognised_lines() {
        let cases = parse_test_cases("  \n// just a comment\nsum(2, 2) === 4\n\n");
        assert_eq!(cases, vec![TestCase::new("sum(2, 2)", "4")]);
        assert!(parse_test_cases("").is_empty());
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "a(1) === 1\nb(2) == 2\nc(3) returns 3\nnoise";
        assert_eq!(parse_test_cases(text), parse_test_cases(text));
    }
}
