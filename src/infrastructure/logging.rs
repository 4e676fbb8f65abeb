//! 日志系统配置模块
//! 支持结构化日志、日志级别配置和文件输出

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::LoggingConfig;

/// 初始化日志系统
///
/// 启用文件日志时返回 guard，调用方需持有直到进程退出
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    // 设置日志级别过滤器
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // 根据配置选择日志格式
    if config.format == "json" {
        init_json_logging(filter, config)
    } else {
        init_text_logging(filter, config)
    }
}

/// 初始化JSON格式日志（结构化日志）
fn init_json_logging(
    filter: EnvFilter,
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    if config.enable_file_logging {
        let (appender, guard) = file_appender(config)?;
        let file_layer = fmt::layer().json().with_writer(appender);
        let stdout_layer = fmt::layer().json();

        Registry::default()
            .with(filter)
            .with(file_layer)
            .with(stdout_layer)
            .init();
        Ok(Some(guard))
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json())
            .init();
        Ok(None)
    }
}

/// 初始化文本格式日志
fn init_text_logging(
    filter: EnvFilter,
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    if config.enable_file_logging {
        let (appender, guard) = file_appender(config)?;
        let file_layer = fmt::layer().with_ansi(false).with_writer(appender);
        let stdout_layer = fmt::layer();

        Registry::default()
            .with(filter)
            .with(file_layer)
            .with(stdout_layer)
            .init();
        Ok(Some(guard))
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer())
            .init();
        Ok(None)
    }
}

fn file_appender(
    config: &LoggingConfig,
) -> Result<(non_blocking::NonBlocking, WorkerGuard), Box<dyn std::error::Error>> {
    let log_dir = config
        .log_file_path
        .as_ref()
        .and_then(|p| Path::new(p).parent().map(Path::to_path_buf))
        .unwrap_or_else(|| Path::new("./logs").to_path_buf());

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "walletcore.log");
    let (appender, guard) = non_blocking(file_appender);
    Ok((appender, guard))
}
