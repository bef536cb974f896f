//! 服务器模块
//!
//! 提供 MCP 服务器的实现，支持多种传输协议。

pub mod handler;
pub mod transport;

use crate::config::AppConfig;
use crate::error::Result;
use crate::tools::ToolRegistry;
use crate::yapi::YApiService;
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities,
    ServerCapabilitiesTools,
};
use std::sync::Arc;

/// YApi MCP 服务器
#[derive(Clone)]
pub struct YapiMcpServer {
    config: AppConfig,
    service: Arc<YApiService>,
    tool_registry: Arc<ToolRegistry>,
}

impl YapiMcpServer {
    /// 创建新的服务器实例
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        // 适配器构造一次，所有工具共享
        let service = Arc::new(YApiService::new(&config.yapi));
        let tool_registry = Arc::new(crate::tools::create_default_registry(&service));

        Ok(Self {
            config,
            service,
            tool_registry,
        })
    }

    /// 获取服务器配置
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 YApi 服务适配器
    #[must_use]
    pub fn service(&self) -> &Arc<YApiService> {
        &self.service
    }

    /// 获取工具注册器
    #[must_use]
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// 获取服务器信息
    #[must_use]
    pub fn server_info(&self) -> InitializeResult {
        InitializeResult {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                title: Some("YApi MCP Server".to_string()),
                description: self.config.server.description.clone(),
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                resources: None,
                prompts: None,
                experimental: None,
                completions: None,
                logging: None,
                tasks: None,
            },
            protocol_version: ProtocolVersion::V2025_11_25.into(),
            instructions: Some(
                "使用此服务器查询 YApi 接口文档。通常先调用 search_projects 通过关键词定位接口，再调用 get_api_desc 获取接口详细信息。"
                    .to_string(),
            ),
            meta: None,
        }
    }

    /// 运行 Stdio 服务器
    pub async fn run_stdio(&self) -> Result<()> {
        transport::run_stdio_server(self).await
    }

    /// 运行 HTTP 服务器
    pub async fn run_http(&self) -> Result<()> {
        transport::run_http_server(self).await
    }

    /// 运行 SSE 服务器
    pub async fn run_sse(&self) -> Result<()> {
        transport::run_sse_server(self).await
    }
}
