/// 远程评测 API 客户端
///
/// 封装所有与 Judge0 兼容评测服务的调用逻辑
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, JudgeError};
use crate::models::language::Language;

const SUBMISSIONS_ENDPOINT: &str = "submissions/?base64_encoded=false&wait=true";

/// 提交给评测服务的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeSubmission {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

impl JudgeSubmission {
    /// 构建提交请求，语言没有评测 ID 时直接拒绝
    pub fn new(source_code: String, language: Language) -> Result<Self, JudgeError> {
        let language_id = language
            .judge_id()
            .ok_or(JudgeError::UnsupportedLanguage(language))?;
        Ok(Self {
            source_code,
            language_id,
            stdin: String::new(),
        })
    }
}

/// 评测状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeStatus {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub description: String,
}

/// 评测服务响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeResponse {
    #[serde(default)]
    pub status: Option<JudgeStatus>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<u64>,
}

impl JudgeResponse {
    pub fn status_description(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.description.as_str())
    }
}

/// 远程代码评测能力
#[async_trait]
pub trait CodeJudge: Send + Sync {
    /// 提交代码并等待评测结果
    async fn submit(&self, submission: &JudgeSubmission) -> Result<JudgeResponse, JudgeError>;
}

/// Judge0 客户端
pub struct JudgeClient {
    http: Client,
    base_url: String,
    api_host: String,
    api_key: String,
    timeout_ms: u64,
}

impl JudgeClient {
    /// 创建新的评测客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.judge_timeout_ms))
            .build()
            .map_err(|e| AppError::Judge(e.into()))?;

        Ok(Self {
            http,
            base_url: config.judge_api_base_url.trim_end_matches('/').to_string(),
            api_host: config.judge_api_host.clone(),
            api_key: config.judge_api_key.clone(),
            timeout_ms: config.judge_timeout_ms,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, SUBMISSIONS_ENDPOINT)
    }
}

#[async_trait]
impl CodeJudge for JudgeClient {
    async fn submit(&self, submission: &JudgeSubmission) -> Result<JudgeResponse, JudgeError> {
        let endpoint = self.endpoint();
        debug!(
            "提交代码到评测服务: {} (language_id: {}, 代码长度: {})",
            endpoint,
            submission.language_id,
            submission.source_code.len()
        );

        let response = self
            .http
            .post(&endpoint)
            .header("X-RapidAPI-Host", &self.api_host)
            .header("X-RapidAPI-Key", &self.api_key)
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    JudgeError::Timeout {
                        endpoint: endpoint.clone(),
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    JudgeError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("评测服务返回错误状态: {}", status);
            return Err(JudgeError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(JudgeError::from)?;
        let parsed: JudgeResponse =
            serde_json::from_str(&body).map_err(|e| JudgeError::MalformedResponse {
                source: Box::new(e),
            })?;

        debug!("评测结果状态: {:?}", parsed.status_description());
        Ok(parsed)
    }
}
