use std::str::FromStr;

use crate::error::ConfigError;

/// 评测模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradingMode {
    /// 本地静态启发式评测
    #[default]
    Heuristic,
    /// 远程评测服务（失败时回退到启发式）
    Remote,
}

impl FromStr for GradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" | "local" => Ok(GradingMode::Heuristic),
            "remote" | "judge" => Ok(GradingMode::Remote),
            other => Err(format!("未知评测模式: {}", other)),
        }
    }
}

impl std::fmt::Display for GradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradingMode::Heuristic => write!(f, "heuristic"),
            GradingMode::Remote => write!(f, "remote"),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 评测模式
    pub grading_mode: GradingMode,
    // --- 远程评测配置 ---
    pub judge_api_base_url: String,
    pub judge_api_host: String,
    pub judge_api_key: String,
    /// 远程评测超时（毫秒），超时后回退到启发式评测
    pub judge_timeout_ms: u64,
    /// 题库 TOML 目录
    pub catalog_folder: String,
    /// 作答回放脚本目录
    pub attempts_folder: String,
    /// 同时回放的作答数量
    pub max_concurrent_attempts: usize,
    /// 证书门槛（百分制）
    pub certificate_threshold: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grading_mode: GradingMode::Heuristic,
            judge_api_base_url: "https://judge0-ce.p.rapidapi.com".to_string(),
            judge_api_host: "judge0-ce.p.rapidapi.com".to_string(),
            judge_api_key: String::new(),
            judge_timeout_ms: 10_000,
            catalog_folder: "catalog".to_string(),
            attempts_folder: "attempts".to_string(),
            max_concurrent_attempts: 8,
            certificate_threshold: 80,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            grading_mode: std::env::var("GRADING_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.grading_mode),
            judge_api_base_url: std::env::var("JUDGE_API_BASE_URL").unwrap_or(default.judge_api_base_url),
            judge_api_host: std::env::var("JUDGE_API_HOST").unwrap_or(default.judge_api_host),
            judge_api_key: std::env::var("JUDGE_API_KEY").unwrap_or(default.judge_api_key),
            judge_timeout_ms: std::env::var("JUDGE_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.judge_timeout_ms),
            catalog_folder: std::env::var("CATALOG_FOLDER").unwrap_or(default.catalog_folder),
            attempts_folder: std::env::var("ATTEMPTS_FOLDER").unwrap_or(default.attempts_folder),
            max_concurrent_attempts: std::env::var("MAX_CONCURRENT_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_attempts),
            certificate_threshold: std::env::var("CERTIFICATE_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.certificate_threshold),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 从环境变量读取配置，值无法解析时报错
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            grading_mode: parse_env("GRADING_MODE", "heuristic|remote", default.grading_mode)?,
            judge_api_base_url: std::env::var("JUDGE_API_BASE_URL").unwrap_or(default.judge_api_base_url),
            judge_api_host: std::env::var("JUDGE_API_HOST").unwrap_or(default.judge_api_host),
            judge_api_key: std::env::var("JUDGE_API_KEY").unwrap_or(default.judge_api_key),
            judge_timeout_ms: parse_env("JUDGE_TIMEOUT_MS", "u64", default.judge_timeout_ms)?,
            catalog_folder: std::env::var("CATALOG_FOLDER").unwrap_or(default.catalog_folder),
            attempts_folder: std::env::var("ATTEMPTS_FOLDER").unwrap_or(default.attempts_folder),
            max_concurrent_attempts: parse_env("MAX_CONCURRENT_ATTEMPTS", "usize", default.max_concurrent_attempts)?,
            certificate_threshold: parse_env("CERTIFICATE_THRESHOLD", "u32", default.certificate_threshold)?,
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool", default.verbose_logging)?,
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        })
    }
}

fn parse_env<T: FromStr>(var_name: &str, expected_type: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: expected_type.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
