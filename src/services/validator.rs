//! 代码校验服务 - 业务能力层
//!
//! 只做文本层面的存在性检查，在启发式评测之前拦截明显不可能通过的代码

use crate::models::language::Language;
use crate::models::verdict::ValidationReport;

pub const MISSING_FUNCTION: &str = "Your code must include a function definition.";
pub const MISSING_RETURN: &str = "Your function must return a value.";
pub const MISSING_PUBLIC_CLASS: &str = "Your code must include a public class definition.";
pub const MISSING_RETURN_OR_VOID: &str = "Your method must return a value or be declared void.";

/// 按语言校验代码
///
/// # 参数
/// - `source_text`: 学生提交的代码
/// - `language`: 题目语言
///
/// # 返回
/// 返回校验报告，`errors` 按检查顺序排列
pub fn validate_code(source_text: &str, language: Language) -> ValidationReport {
    let mut errors = Vec::new();

    match language {
        Language::JavaScript => {
            if !source_text.contains("function") {
                errors.push(MISSING_FUNCTION.to_string());
            }
            if !source_text.contains("return") {
                errors.push(MISSING_RETURN.to_string());
            }
        }
        Language::Python => {
            if !source_text.contains("def") {
                errors.push(MISSING_FUNCTION.to_string());
            }
            if !source_text.contains("return") {
                errors.push(MISSING_RETURN.to_string());
            }
        }
        Language::Java | Language::CSharp => {
            if !source_text.contains("public") || !source_text.contains("class") {
                errors.push(MISSING_PUBLIC_CLASS.to_string());
            }
            if !source_text.contains("return") && !source_text.contains("void") {
                errors.push(MISSING_RETURN_OR_VOID.to_string());
            }
        }
        // 预留语言没有校验规则
        Language::Cpp | Language::C | Language::TypeScript => {}
    }

    ValidationReport::from_errors(errors)
}
