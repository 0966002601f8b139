//! 评测结果合成
//!
//! 把校验结果、启发式结论或远程评测响应统一转换为 `TestVerdict`

use crate::clients::judge_client::JudgeResponse;
use crate::models::verdict::{TestCase, TestVerdict, ValidationReport};

pub const SYNTAX_ISSUES: &str = "There are syntax issues with your code:";
pub const ALL_PASSED: &str = "Great job! Your solution passed all test cases.";
pub const NOT_ALL_PASSED: &str = "Your code didn't pass all test cases.";
pub const COMPILE_ERROR: &str = "There appears to be a syntax error in your code.";
pub const REVIEW_LOGIC: &str = "Review your logic and try again.";

const TEST_CASE_MARKER: &str = "Test case";
const ALL_TESTS_PASSED_MARKER: &str = "All tests passed";
const ACCEPTED_STATUS: &str = "Accepted";

/// 校验未通过时的评测结果
pub fn validation_failed(report: &ValidationReport) -> TestVerdict {
    TestVerdict::new(false, SYNTAX_ISSUES, report.errors.clone())
}

/// 启发式评测结果
///
/// 只有一个总体结论，会被原样套用到每一行测试用例上，
/// 各用例并没有被单独评测
pub fn synthesize(
    report: &ValidationReport,
    passed: bool,
    test_cases: &[TestCase],
) -> TestVerdict {
    if !report.is_valid {
        return validation_failed(report);
    }

    let status = if passed { "Passed" } else { "Failed" };
    let details = (1..=test_cases.len())
        .map(|i| format!("{} {}: {}", TEST_CASE_MARKER, i, status))
        .collect();

    let message = if passed { ALL_PASSED } else { NOT_ALL_PASSED };
    TestVerdict::new(passed, message, details)
}

/// 解释远程评测服务的响应
///
/// 测试用例明细来自 stdout 中包含 "Test case" 的行，不做结构化解析
pub fn interpret_judge_response(response: &JudgeResponse, test_cases: &[TestCase]) -> TestVerdict {
    let stdout = response.stdout.as_deref().unwrap_or_default();
    let details: Vec<String> = stdout
        .lines()
        .filter(|line| line.contains(TEST_CASE_MARKER))
        .map(|line| line.trim().to_string())
        .collect();

    let accepted = response.status_description() == Some(ACCEPTED_STATUS)
        || stdout.contains(ALL_TESTS_PASSED_MARKER);

    let output = response
        .stdout
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| response.stderr.clone());
    let expected = if test_cases.is_empty() {
        None
    } else {
        Some(
            test_cases
                .iter()
                .map(|c| c.expected.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };

    if accepted {
        return TestVerdict::new(true, ALL_PASSED, details).with_output(output, expected);
    }

    let has_compile_output = response
        .compile_output
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    let message = if has_compile_output {
        COMPILE_ERROR
    } else {
        NOT_ALL_PASSED
    };
    let details = if details.is_empty() {
        vec![REVIEW_LOGIC.to_string()]
    } else {
        details
    };

    TestVerdict::new(false, message, details).with_output(output, expected)
}
