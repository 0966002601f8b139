//! 测试驱动代码生成
//!
//! 远程评测前，把每个测试用例转换成目标语言的断言代码追加到学生代码之后。
//! 每个用例输出一行 `Test case N: Passed/Failed`，全部通过后输出
//! `All tests passed successfully!`，失败时以非零码退出。

use regex::Regex;
use std::sync::OnceLock;

use crate::models::language::Language;
use crate::models::verdict::TestCase;

const ALL_PASSED_LINE: &str = "All tests passed successfully!";

const PYTHON_CASE: &str = r#"
# Test case {n}
try:
    test_result = {input}
    expected = {expected}
    assert str(test_result) == str(expected), f"Test case {n} failed"
    print(f"Test case {n}: Passed")
except Exception as e:
    print(f"Test case {n}: Failed")
    exit(1)
"#;

const JAVASCRIPT_CASE: &str = r#"
// Test case {n}
try {
  const testResult = {input};
  const expected = {expected};
  if (JSON.stringify(testResult) !== JSON.stringify(expected)) {
    console.error(`Test case {n}: Failed`);
    process.exit(1);
  }
  console.log(`Test case {n}: Passed`);
} catch (e) {
  console.error(`Test case {n}: Failed`);
  process.exit(1);
}"#;

const JAVA_CASE: &str = r#"
        // Test case {n}
        try {
            Object testResult = {class}.{input};
            Object expected = {expected};
            if (!render(testResult).equals(render(expected))) {
                System.out.println("Test case {n}: Failed");
                System.exit(1);
            }
            System.out.println("Test case {n}: Passed");
        } catch (Exception e) {
            System.out.println("Test case {n}: Failed");
            System.exit(1);
        }"#;

const JAVA_ENTRY_CLASS: &str = "Main";

const JAVA_RUNNER: &str = r#"
public class Main {
    private static String render(Object value) {
        if (value instanceof int[]) {
            return java.util.Arrays.toString((int[]) value);
        }
        if (value instanceof Object[]) {
            return java.util.Arrays.toString((Object[]) value);
        }
        return String.valueOf(value);
    }

    public static void main(String[] args) {{cases}
        System.out.println("All tests passed successfully!");
    }
}
"#;

const CSHARP_PRELUDE: &str = "using System;
using System.Collections;
using System.Collections.Generic;
using System.Linq;
";

const CSHARP_CASE: &str = r#"
        // Test case {n}
        try
        {
            object testResult = {class}.{input};
            object expected = {expected};
            if (Render(testResult) != Render(expected))
            {
                Console.WriteLine("Test case {n}: Failed");
                Environment.Exit(1);
            }
            Console.WriteLine("Test case {n}: Passed");
        }
        catch (Exception)
        {
            Console.WriteLine("Test case {n}: Failed");
            Environment.Exit(1);
        }"#;

const CSHARP_RUNNER: &str = r#"
public static class TestRunner
{
    private static string Render(object value)
    {
        if (value == null) return "null";
        if (value is bool b) return b ? "true" : "false";
        if (value is string s) return s;
        if (value is IEnumerable items)
        {
            var parts = new List<string>();
            foreach (var item in items) parts.Add(Render(item));
            return "[" + string.Join(", ", parts) + "]";
        }
        return value.ToString();
    }

    public static void Main()
    {{cases}
        Console.WriteLine("All tests passed successfully!");
    }
}
"#;

fn class_name_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"class\s+([A-Za-z_][A-Za-z0-9_]*)").ok())
        .as_ref()
}

/// 找到学生代码中的类名，找不到时使用模板默认的 `Solution`
fn solution_class(source_text: &str) -> String {
    class_name_pattern()
        .and_then(|re| re.captures(source_text))
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "Solution".to_string())
}

/// Java 入口类固定为 Main，学生类同名时改名为 `Solution`，避免与测试驱动冲突
fn rename_main_class(source_text: &str) -> (String, String) {
    let class = solution_class(source_text);
    if class != JAVA_ENTRY_CLASS {
        return (source_text.to_string(), class);
    }
    match main_ident_pattern() {
        Some(re) => (
            re.replace_all(source_text, "Solution").into_owned(),
            "Solution".to_string(),
        ),
        None => (source_text.to_string(), class),
    }
}

fn main_ident_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bMain\b").ok()).as_ref()
}

/// Java / C# 中 `[2, 4]` 这样的列表期望值不是合法表达式，转为字符串比较
fn typed_expected(expected: &str) -> String {
    let trimmed = expected.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        format!("\"{}\"", trimmed.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        trimmed.to_string()
    }
}

fn render_case(template: &str, n: usize, case: &TestCase, class: &str, expected: &str) -> String {
    template
        .replace("{n}", &n.to_string())
        .replace("{class}", class)
        .replace("{expected}", expected)
        .replace("{input}", &case.input)
}

/// 生成带测试驱动的完整代码
///
/// # 参数
/// - `source_text`: 学生代码
/// - `language`: 题目语言
/// - `test_cases`: 解析后的测试用例
///
/// # 返回
/// 返回可直接提交给评测服务的代码；没有对应驱动模板的语言原样返回
pub fn build_harness(source_text: &str, language: Language, test_cases: &[TestCase]) -> String {
    match language {
        Language::Python => {
            let tests = test_cases
                .iter()
                .enumerate()
                .map(|(i, c)| render_case(PYTHON_CASE, i + 1, c, "", &c.expected))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{}\n\n# Running tests\n{}\nprint(\"{}\")",
                source_text, tests, ALL_PASSED_LINE
            )
        }
        Language::JavaScript => {
            let tests = test_cases
                .iter()
                .enumerate()
                .map(|(i, c)| render_case(JAVASCRIPT_CASE, i + 1, c, "", &c.expected))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{}\n\n// Running tests\n{}\nconsole.log(\"{}\")",
                source_text, tests, ALL_PASSED_LINE
            )
        }
        Language::Java => {
            let (source_text, class) = rename_main_class(source_text);
            let cases: String = test_cases
                .iter()
                .enumerate()
                .map(|(i, c)| render_case(JAVA_CASE, i + 1, c, &class, &typed_expected(&c.expected)))
                .collect();
            // 评测服务以 Main 作为入口类，学生代码中的 public 类需降级
            let source = source_text.replace("public class", "class");
            format!("{}\n{}", source, JAVA_RUNNER.replace("{cases}", &cases))
        }
        Language::CSharp => {
            let class = solution_class(source_text);
            let cases: String = test_cases
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    render_case(CSHARP_CASE, i + 1, c, &class, &typed_expected(&c.expected))
                })
                .collect();
            format!(
                "{}\n{}\n{}",
                CSHARP_PRELUDE,
                source_text,
                CSHARP_RUNNER.replace("{cases}", &cases)
            )
        }
        Language::Cpp | Language::C | Language::TypeScript => source_text.to_string(),
    }
}
