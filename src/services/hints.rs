//! 编程题提示

use crate::models::language::Language;
use crate::models::question::CodingQuestion;

const JAVA_FIND_MAX: &[&str] = &[
    "Initialize max with the first element of the array",
    "Loop through the array starting from index 1",
    "Compare each element with max and update if necessary",
    "Remember to check for edge cases like empty arrays",
];

const JAVA_CONTAINS_ONLY_DIGITS: &[&str] = &[
    "Use a for loop to iterate through each character",
    "Java has the Character.isDigit() method to check if a char is a digit",
    "Return false as soon as you find a non-digit character",
    "If you get through the entire string, return true",
];

const CSHARP_REVERSE_STRING: &[&str] = &[
    "Convert the string to a character array using ToCharArray()",
    "Use a two-pointer approach (one at the start, one at the end)",
    "Swap characters as the pointers move toward each other",
    "Create a new string from the final char array",
];

const CSHARP_FIND_EVEN_NUMBERS: &[&str] = &[
    "Create a new List<int> to store your results",
    "Iterate through the input list using a foreach loop",
    "Check if each number is even using the modulo operator (% 2 == 0)",
    "Add even numbers to your result list",
];

const JAVASCRIPT_GENERAL: &[&str] = &[
    "Make sure your function is defined correctly",
    "Check for edge cases in your logic",
    "Use console.log to debug your code",
];

const PYTHON_GENERAL: &[&str] = &[
    "Ensure your function is defined with 'def'",
    "Check for indentation errors",
    "Use print statements to debug your code",
];

const DEFAULT_HINTS: &[&str] = &[
    "Break down the problem into smaller steps",
    "Think about the input and expected output",
    "Consider edge cases",
];

/// 获取编程题的提示列表
///
/// Java / C# 按题目给出具体提示，JavaScript / Python 给出语言通用提示，
/// 其余情况返回通用解题提示
pub fn hints_for(question: &CodingQuestion) -> &'static [&'static str] {
    match (question.language, question.id) {
        (Language::Java, 5) => JAVA_FIND_MAX,
        (Language::Java, 6) => JAVA_CONTAINS_ONLY_DIGITS,
        (Language::CSharp, 7) => CSHARP_REVERSE_STRING,
        (Language::CSharp, 8) => CSHARP_FIND_EVEN_NUMBERS,
        (Language::JavaScript, _) => JAVASCRIPT_GENERAL,
        (Language::Python, _) => PYTHON_GENERAL,
        _ => DEFAULT_HINTS,
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

    #[test]
    fn question_specific_hints() {
        assert_eq!(hints_for(&coding(Language::Java, 5))[0], "Initialize max with the first element of the array");
        assert_eq!(hints_for(&coding(Language::CSharp, 8)).len(), 4);
    }

    #[test]
    fn language_and_default_hints() {
        assert_eq!(hints_for(&coding(Language::Python, 99)), PYTHON_GENERAL);
        assert_eq!(hints_for(&coding(Language::JavaScript, 1)), JAVASCRIPT_GENERAL);
        // Java 其他题目没有专门提示
        assert_eq!(hints_for(&coding(Language::Java, 9)), DEFAULT_HINTS);
        assert_eq!(hints_for(&coding(Language::TypeScript, 1)), DEFAULT_HINTS);
    }
}
