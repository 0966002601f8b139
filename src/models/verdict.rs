use serde::{Deserialize, Serialize};

/// 单个测试用例（输入表达式 + 期望值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

/// 代码校验结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// 评测结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVerdict {
    pub passed: bool,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
    /// 远程评测的原始输出
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// 远程评测的期望值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl TestVerdict {
    pub fn new(passed: bool, message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            passed,
            message: message.into(),
            details,
            output: None,
            expected: None,
        }
    }

    pub fn with_output(mut self, output: Option<String>, expected: Option<String>) -> Self {
        self.output = output;
        self.expected = expected;
        self
    }
}

impl std::fmt::Display for TestVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.passed { "✓" } else { "✗" };
        write!(f, "{} {}", mark, self.message)?;
        for line in &self.details {
            write!(f, "\n  - {}", line)?;
        }
        Ok(())
    }
}
