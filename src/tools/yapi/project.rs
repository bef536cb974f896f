//! 项目查询工具
#![allow(missing_docs)]

use crate::tools::yapi::{pretty, reshape_cat_menu, reshape_project_info, reshape_search};
use crate::tools::Tool;
use crate::yapi::YApiService;
use async_trait::async_trait;
use rust_mcp_sdk::macros;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 获取项目信息工具参数
#[macros::mcp_tool(
    name = "get_project_info",
    title = "获取项目信息",
    description = "获取YApi项目的基本信息",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectInfoTool {
    /// 项目 ID
    #[json_schema(title = "项目ID", description = "项目ID")]
    pub project_id: String,
}

/// 获取项目信息工具实现
pub struct GetProjectInfoToolImpl {
    service: Arc<YApiService>,
}

impl GetProjectInfoToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetProjectInfoToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetProjectInfoTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: GetProjectInfoTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments(
                "get_project_info",
                Some(format!("参数解析失败: {e}")),
            )
        })?;

        match self
            .service
            .get_project_info(Some(&params.project_id))
            .await
        {
            Ok(info) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_project_info(&info)).into(),
            ])),
            Err(e) => {
                tracing::error!("获取项目信息时出错: {}", e);
                Ok(CallToolResult::text_content(vec![
                    format!("获取项目信息出错: {e}").into(),
                ]))
            }
        }
    }
}

/// 获取菜单列表工具参数
#[macros::mcp_tool(
    name = "get_cat_menu",
    title = "获取菜单列表",
    description = "获取YApi项目的菜单列表",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCatMenuTool {
    /// 项目 ID
    #[json_schema(title = "项目ID", description = "项目ID")]
    pub project_id: String,
}

/// 获取菜单列表工具实现
pub struct GetCatMenuToolImpl {
    service: Arc<YApiService>,
}

impl GetCatMenuToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetCatMenuToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetCatMenuTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: GetCatMenuTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments("get_cat_menu", Some(format!("参数解析失败: {e}")))
        })?;

        match self.service.get_cat_menu(&params.project_id).await {
            Ok(categories) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_cat_menu(&categories)).into(),
            ])),
            Err(e) => {
                tracing::error!("获取项目 {} 菜单列表时出错: {}", params.project_id, e);
                Ok(CallToolResult::text_content(vec![
                    format!("获取菜单列表出错: {e}").into(),
                ]))
            }
        }
    }
}

/// 搜索项目工具参数
#[macros::mcp_tool(
    name = "search_projects",
    title = "搜索项目和接口",
    description = "搜索YApi项目，通常作为工作流的第一步，通过 api path 获取到实际接口 id，再调用 get_api_desc 获取接口详细信息",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
pub struct SearchProjectsTool {
    /// 搜索关键词
    #[json_schema(title = "搜索关键词", description = "搜索API关键词")]
    pub q: String,
}

/// 搜索项目工具实现
pub struct SearchProjectsToolImpl {
    service: Arc<YApiService>,
}

impl SearchProjectsToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SearchProjectsToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        SearchProjectsTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: SearchProjectsTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments(
                "search_projects",
                Some(format!("参数解析失败: {e}")),
            )
        })?;

        match self.service.search_projects(&params.q).await {
            Ok(data) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_search(&data)).into(),
            ])),
            Err(e) => {
                tracing::error!("搜索YApi项目时出错: {}", e);
                Ok(CallToolResult::text_content(vec![
                    format!("搜索YApi项目出错: {e}").into(),
                ]))
            }
        }
    }
}
