use thiserror::Error;

use crate::models::language::Language;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 远程评测服务错误
    #[error("评测服务错误: {0}")]
    Judge(#[from] JudgeError),
    /// 评测流程错误
    #[error("评测错误: {0}")]
    Grading(#[from] GradingError),
    /// 题库错误
    #[error("题库错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 远程评测服务错误
#[derive(Debug, Error)]
pub enum JudgeError {
    /// 网络请求失败
    #[error("评测请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求超时
    #[error("评测请求超时 ({endpoint}), 超时时间: {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
    /// 返回非成功状态码
    #[error("评测服务返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应解析失败
    #[error("评测响应解析失败: {source}")]
    MalformedResponse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 语言没有对应的评测 ID
    #[error("语言 {0} 不支持远程评测")]
    UnsupportedLanguage(Language),
}

/// 评测流程错误
#[derive(Debug, Error)]
pub enum GradingError {
    /// 远程模式下题库包含无法映射的语言
    #[error("语言 {0} 没有配置评测 ID，无法使用远程评测")]
    UnsupportedLanguage(Language),
    /// 同一道题已有评测在进行中
    #[error("题目 {question_id} 正在评测中，请等待结果")]
    AlreadyInFlight { question_id: u32 },
    /// 当前不在编程题阶段或题目不存在
    #[error("题目 {question_id} 不是当前编程题")]
    NotCurrentQuestion { question_id: u32 },
    /// 编程题最近一次评测未通过，不能进入下一题
    #[error("题目 {question_id} 尚未通过测试，不能进入下一题")]
    NotPassed { question_id: u32 },
    /// 测验已结束
    #[error("测验已结束")]
    QuizCompleted,
}

/// 题库错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 题目 ID 重复
    #[error("{language} 题库中 {kind} 题目 ID {id} 重复")]
    DuplicateQuestion {
        language: Language,
        kind: &'static str,
        id: u32,
    },
    /// 选择题答案不在选项中
    #[error("{language} 选择题 {id} 的正确答案 {answer} 不在选项中")]
    UnknownAnswer {
        language: Language,
        id: u32,
        answer: String,
    },
    /// 语言没有任何题目
    #[error("题库中没有 {0} 的题目")]
    EmptyLanguage(Language),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Judge(JudgeError::MalformedResponse {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        if err.is_decode() {
            JudgeError::MalformedResponse {
                source: Box::new(err),
            }
        } else if let Some(status) = err.status() {
            JudgeError::BadStatus {
                endpoint,
                status: status.as_u16(),
            }
        } else {
            JudgeError::RequestFailed {
                endpoint,
                source: Box::new(err),
            }
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 TOML 解析错误（带文件路径）
    pub fn toml_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
