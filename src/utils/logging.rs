/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, GradingMode};
use crate::error::{AppError, AppResult};
use crate::services::scoring::PerformanceSummary;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，未设置时默认 info，详细模式下为 debug。
/// 重复初始化（例如测试中）会被忽略
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n测验评测日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .map_err(|e| AppError::file_write_failed(log_file_path, e))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测验作答回放模式");
    match config.grading_mode {
        GradingMode::Heuristic => info!("🧮 评测模式: 本地启发式"),
        GradingMode::Remote => info!(
            "🌐 评测模式: 远程评测 ({}), 超时 {}ms",
            config.judge_api_base_url, config.judge_timeout_ms
        ),
    }
    info!("📊 最大并发数: {}", config.max_concurrent_attempts);
    info!("🎓 证书门槛: {}%", config.certificate_threshold);
    info!("{}", "=".repeat(60));
}

/// 记录作答脚本加载信息
pub fn log_attempts_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 份待回放的作答", total);
    info!("📋 最多同时回放 {} 份\n", max_concurrent);
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `summary`: 成绩统计（没有完成的测验时为 None）
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    summary: Option<PerformanceSummary>,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    if let Some(summary) = summary {
        info!(
            "📈 平均分: {}% | 最高: {}% | 最低: {}% | 完成: {}",
            summary.average, summary.highest, summary.lowest, summary.completed
        );
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
