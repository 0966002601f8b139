//! 批量作答回放器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量作答的回放和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化日志文件、加载题库、创建评测流程
//! 2. **批量加载**：扫描并加载所有作答脚本（`Vec<AttemptScript>`）
//! 3. **并发控制**：使用 Semaphore 限制同时回放的作答数量
//! 4. **全局统计**：汇总所有测验结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单份作答的细节，委托 attempt_processor
//! - **共享只读资源**：题库和评测流程通过 Arc 在任务间共享，会话状态各自独立

use crate::config::Config;
use crate::models::attempt::AttemptScript;
use crate::models::catalog::QuestionCatalog;
use crate::models::outcome::QuizOutcome;
use crate::orchestrator::attempt_processor;
use crate::services::scoring::{summarize_scores, PerformanceSummary};
use crate::utils::logging::{init_log_file, log_attempts_loaded, log_startup, print_final_stats};
use crate::workflow::GradingFlow;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    catalog: Arc<QuestionCatalog>,
    flow: Arc<GradingFlow>,
}

/// 回放统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub outcomes: Vec<QuizOutcome>,
}

impl ProcessingStats {
    pub fn summary(&self) -> Option<PerformanceSummary> {
        let scores: Vec<u32> = self.outcomes.iter().map(|o| o.score_percent).collect();
        summarize_scores(&scores)
    }
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let catalog = Self::load_catalog(&config).await?;
        info!(
            "✓ 题库加载完成: {} 道题目, 语言: {:?}",
            catalog.len(),
            catalog.languages()
        );

        let flow = GradingFlow::from_config(&config, &catalog).context("创建评测流程失败")?;

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            flow: Arc::new(flow),
        })
    }

    /// 题库目录不存在时使用内置题库
    async fn load_catalog(config: &Config) -> Result<QuestionCatalog> {
        if Path::new(&config.catalog_folder).is_dir() {
            info!("\n📁 正在加载题库: {}", config.catalog_folder);
            crate::models::load_catalog(&config.catalog_folder)
                .await
                .with_context(|| format!("加载题库失败: {}", config.catalog_folder))
        } else {
            warn!(
                "⚠️ 题库目录 {} 不存在，使用内置题库",
                config.catalog_folder
            );
            QuestionCatalog::builtin().context("加载内置题库失败")
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let all_attempts = self.load_attempts().await?;

        if all_attempts.is_empty() {
            warn!("⚠️ 没有找到待回放的作答脚本，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_attempts_loaded(all_attempts.len(), self.config.max_concurrent_attempts);

        let stats = self.process_all_attempts(all_attempts).await?;

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.summary(),
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 加载作答脚本
    async fn load_attempts(&self) -> Result<Vec<AttemptScript>> {
        info!("\n📁 正在扫描作答脚本: {}", self.config.attempts_folder);
        let scripts = crate::models::load_all_attempt_scripts(&self.config.attempts_folder).await?;
        Ok(scripts)
    }

    /// 并发回放所有作答
    async fn process_all_attempts(&self, all_attempts: Vec<AttemptScript>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_attempts.max(1)));
        let mut handles = Vec::new();
        let mut stats = ProcessingStats {
            total: all_attempts.len(),
            ..Default::default()
        };

        for (idx, script) in all_attempts.into_iter().enumerate() {
            let attempt_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let catalog = self.catalog.clone();
            let flow = self.flow.clone();
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result =
                    attempt_processor::process_attempt(script, attempt_index, &catalog, flow, &config)
                        .await;
                if let Err(e) = &result {
                    error!("[作答 {}] ❌ 回放过程中发生错误: {:#}", attempt_index, e);
                }
                result
            });
            handles.push((attempt_index, handle));
        }

        let (indices, handles): (Vec<usize>, Vec<_>) = handles.into_iter().unzip();
        let results = join_all(handles).await;

        for (attempt_index, result) in indices.into_iter().zip(results) {
            match result {
                Ok(Ok(outcome)) => {
                    stats.success += 1;
                    stats.outcomes.push(outcome);
                }
                Ok(Err(_)) => {
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("[作答 {}] 任务执行失败: {}", attempt_index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}
