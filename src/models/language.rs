use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Judge0 语言 ID 表（按语言标识查找）
static JUDGE_LANGUAGE_IDS: phf::Map<&'static str, u32> = phf_map! {
    "javascript" => 63,
    "python" => 71,
    "java" => 62,
    "csharp" => 51,
    "cpp" => 54,
    "c" => 50,
    "typescript" => 74,
};

/// 编程语言枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
    CSharp,
    /// 预留，题库中暂无题目
    Cpp,
    /// 预留，题库中暂无题目
    C,
    /// 预留，题库中暂无题目
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::CSharp,
        Language::Cpp,
        Language::C,
        Language::TypeScript,
    ];

    /// 获取语言标识（题库文件与 Judge0 映射表使用的 key）
    pub fn slug(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::TypeScript => "typescript",
        }
    }

    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::TypeScript => "TypeScript",
        }
    }

    /// 获取 Judge0 语言 ID，未配置映射时返回 None
    pub fn judge_id(self) -> Option<u32> {
        JUDGE_LANGUAGE_IDS.get(self.slug()).copied()
    }

    /// 从标识解析语言（精确匹配）
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.slug() == s)
    }

    /// 宽松解析：支持标识、显示名称和常见别名
    pub fn find(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(lang) = Self::from_slug(&lower) {
            return Some(lang);
        }

        match lower.as_str() {
            "js" | "node" => Some(Language::JavaScript),
            "py" | "python3" => Some(Language::Python),
            "c#" | "cs" => Some(Language::CSharp),
            "c++" => Some(Language::Cpp),
            "ts" => Some(Language::TypeScript),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
