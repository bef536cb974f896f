//! ServerHandler 实现
//!
//! 把 MCP 协议请求桥接到工具注册表。工具目录在启动时固定，
//! 资源与提示两类请求不在本服务器的能力范围内。

use crate::server::YapiMcpServer;
use async_trait::async_trait;
use rust_mcp_sdk::{
    mcp_server::ServerHandler,
    schema::{
        CallToolError, CallToolResult, CallToolRequestParams, GetPromptRequestParams,
        GetPromptResult, ListPromptsResult, ListResourcesResult, ListToolsResult,
        PaginatedRequestParams, ReadResourceRequestParams, ReadResourceResult, RpcError,
    },
    McpServer,
};
use std::sync::Arc;

/// 把工具注册表暴露给 MCP 运行时的处理器
pub struct YapiMcpHandler {
    server: Arc<YapiMcpServer>,
}

impl YapiMcpHandler {
    /// 创建新的处理器
    #[must_use]
    pub fn new(server: Arc<YapiMcpServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl ServerHandler for YapiMcpHandler {
    async fn handle_list_tools_request(
        &self,
        _request: Option<PaginatedRequestParams>,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: self.server.tool_registry().get_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        // arguments 缺省等价于空参数，统一转成 Value 交给注册表
        let arguments = params
            .arguments
            .map_or_else(|| serde_json::Value::Null, serde_json::Value::Object);

        self.server
            .tool_registry()
            .execute_tool(&params.name, arguments)
            .await
    }

    async fn handle_list_resources_request(
        &self,
        _request: Option<PaginatedRequestParams>,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> std::result::Result<ListResourcesResult, RpcError> {
        Ok(ListResourcesResult {
            resources: vec![],
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_read_resource_request(
        &self,
        _params: ReadResourceRequestParams,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> std::result::Result<ReadResourceResult, RpcError> {
        Err(RpcError::invalid_request().with_message("本服务器不提供资源".to_string()))
    }

    async fn handle_list_prompts_request(
        &self,
        _request: Option<PaginatedRequestParams>,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> std::result::Result<ListPromptsResult, RpcError> {
        Ok(ListPromptsResult {
            prompts: vec![],
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_get_prompt_request(
        &self,
        _params: GetPromptRequestParams,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> std::result::Result<GetPromptResult, RpcError> {
        Err(RpcError::invalid_request().with_message("本服务器不提供提示".to_string()))
    }
}
