/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;
use crate::models::attempt::AttemptOutcome;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 本地测验管理");
    info!("📁 数据目录: {}", config.data_dir);
    if let Some(seed) = config.rng_seed {
        info!("🎲 固定随机种子: {}", seed);
    }
    info!("{}", "=".repeat(60));
}

/// 记录一次作答的统计信息
///
/// # 参数
/// - `outcome`: 已提交的作答
pub fn log_attempt_summary(outcome: &AttemptOutcome) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📊 {} - 学生 {}",
        truncate_text(&outcome.quiz_title, 40),
        outcome.student_id
    );
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 得分: {}/{}", outcome.score, outcome.total);
    info!(
        "❔ 未作答: {}",
        outcome.total.saturating_sub(outcome.answers.answered_count())
    );
    info!("{}", "─".repeat(60));
}

/// 把毫秒时间戳格式化为本地时间
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| millis.to_string())
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
