//! YApi MCP 服务器
//!
//! 将 YApi 接口文档平台的 REST 接口暴露为一组 MCP 工具，支持多种传输协议。

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod server;
pub mod tools;
pub mod yapi;

/// 重新导出常用类型
pub use crate::error::{Error, Result};
pub use crate::server::YapiMcpServer;
pub use crate::yapi::YApiService;

/// 服务器版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 服务器名称
pub const NAME: &str = "yapi-mcp";

/// 根据配置初始化日志系统
///
/// 控制台日志写入 stderr，避免污染 Stdio 传输使用的 stdout。
///
/// # Errors
/// 日志系统初始化失败时返回错误
pub fn init_logging_with_config(config: &crate::config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match config.level.to_lowercase().as_str() {
        l @ ("trace" | "debug" | "warn" | "error") => l.to_string(),
        _ => "info".to_string(),
    };
    let filter = EnvFilter::new(level);

    // 文件日志：按天滚动，目录不存在时先创建
    let file_layer = if config.enable_file {
        if let Some(file_path) = &config.file_path {
            let path = std::path::Path::new(file_path);
            let log_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let log_file_name = path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("yapi-mcp.log"));

            std::fs::create_dir_all(log_dir).map_err(|e| {
                error::Error::Initialization(format!("创建日志目录失败: {e}"))
            })?;

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_ansi(false)
                    .compact(),
            )
        } else {
            None
        }
    } else {
        None
    };

    // 没有任何输出目标时退回控制台日志
    let console_layer = (config.enable_console || file_layer.is_none()).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| error::Error::Initialization(e.to_string()))?;

    Ok(())
}
