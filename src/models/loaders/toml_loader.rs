use crate::error::{AppError, AppResult, FileError};
use crate::models::attempt::AttemptScript;
use crate::models::catalog::{QuestionCatalog, QuestionSet};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 读取并解析单个 TOML 文件
async fn load_toml<T: DeserializeOwned>(toml_file_path: &Path) -> AppResult<T> {
    let path_str = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))
}

/// 列出文件夹中的所有 TOML 文件（按文件名排序）
async fn list_toml_files(folder_path: &str) -> AppResult<Vec<PathBuf>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }

    toml_files.sort();
    Ok(toml_files)
}

/// 从 TOML 文件加载题库文件
pub async fn load_question_set(toml_file_path: &Path) -> AppResult<QuestionSet> {
    let set: QuestionSet = load_toml(toml_file_path).await?;
    Ok(set.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹加载全部题库文件并合并
///
/// 题库是静态配置，任何一个文件解析失败都直接返回错误
pub async fn load_catalog(folder_path: &str) -> AppResult<QuestionCatalog> {
    let mut sets = Vec::new();

    for path in list_toml_files(folder_path).await? {
        tracing::info!(
            "正在加载题库: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        let set = load_question_set(&path).await?;
        tracing::info!(
            "成功加载 {} 道选择题, {} 道编程题",
            set.mcq.len(),
            set.coding.len()
        );
        sets.push(set);
    }

    QuestionCatalog::from_sets(sets)
}

/// 从 TOML 文件加载作答回放脚本
pub async fn load_attempt_script(toml_file_path: &Path) -> AppResult<AttemptScript> {
    let mut script: AttemptScript = load_toml(toml_file_path).await?;
    script.file_path = Some(toml_file_path.to_string_lossy().to_string());
    Ok(script)
}

/// 从文件夹加载所有作答回放脚本
///
/// 单个脚本解析失败只记录警告并跳过
pub async fn load_all_attempt_scripts(folder_path: &str) -> AppResult<Vec<AttemptScript>> {
    let mut scripts = Vec::new();

    for path in list_toml_files(folder_path).await? {
        match load_attempt_script(&path).await {
            Ok(script) => {
                tracing::info!(
                    "成功加载作答脚本: {} ({}, {} 道编程题)",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    script.language,
                    script.coding.len()
                );
                scripts.push(script);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(scripts)
}
