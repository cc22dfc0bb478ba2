use crate::models::quiz::QuizDraft;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载试卷草稿
pub async fn load_toml_to_quiz_draft(toml_file_path: &Path) -> Result<QuizDraft> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let draft: QuizDraft = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    Ok(draft)
}

/// 从文件夹中加载所有 TOML 试卷草稿
///
/// 文件按文件名排序后加载，保证导入顺序（即试卷编号）稳定。
/// 单个文件解析失败只记录警告，不影响其他文件。
pub async fn load_all_toml_drafts(folder_path: &str) -> Result<Vec<QuizDraft>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut drafts = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_quiz_draft(&path).await {
            Ok(draft) => {
                tracing::info!("成功加载 {} 个题目", draft.questions.len());
                drafts.push(draft);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(drafts)
}
