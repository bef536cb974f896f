//! 接口查询工具
#![allow(missing_docs)]

use crate::tools::yapi::{
    pretty, reshape_cat_interface_page, reshape_interface_detail, reshape_interface_menu,
    reshape_interface_page,
};
use crate::tools::Tool;
use crate::yapi::YApiService;
use async_trait::async_trait;
use rust_mcp_sdk::macros;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 获取接口详情工具参数
#[macros::mcp_tool(
    name = "get_api_desc",
    title = "获取接口详情",
    description = "获取YApi中特定接口的详细信息",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetApiDescTool {
    /// YApi 接口的 ID
    #[json_schema(title = "接口ID", description = "YApi接口的ID")]
    pub api_id: String,
}

/// 获取接口详情工具实现
pub struct GetApiDescToolImpl {
    service: Arc<YApiService>,
}

impl GetApiDescToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetApiDescToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetApiDescTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: GetApiDescTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments("get_api_desc", Some(format!("参数解析失败: {e}")))
        })?;

        match self.service.get_api_interface(&params.api_id).await {
            Ok(detail) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_interface_detail(&detail)).into(),
            ])),
            Err(e) => {
                tracing::error!("获取API接口 {} 时出错: {}", params.api_id, e);
                Ok(CallToolResult::text_content(vec![
                    format!("获取API接口出错: {e}").into(),
                ]))
            }
        }
    }
}

/// 获取分类下接口列表工具参数
#[macros::mcp_tool(
    name = "get_cat_interface_list",
    title = "获取分类接口列表",
    description = "获取YApi中某个分类下的接口列表",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCatInterfaceListTool {
    /// 分类 ID
    #[json_schema(title = "分类ID", description = "分类ID")]
    pub cat_id: String,

    /// 页码，默认为 1
    #[json_schema(title = "页码", description = "页码，默认为1", default = 1)]
    pub page: Option<u32>,

    /// 每页数量，默认为 10
    #[json_schema(title = "每页数量", description = "每页数量，默认为10", default = 10)]
    pub limit: Option<u32>,
}

/// 获取分类下接口列表工具实现
pub struct GetCatInterfaceListToolImpl {
    service: Arc<YApiService>,
}

impl GetCatInterfaceListToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetCatInterfaceListToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetCatInterfaceListTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: GetCatInterfaceListTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments(
                "get_cat_interface_list",
                Some(format!("参数解析失败: {e}")),
            )
        })?;

        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(10);

        match self
            .service
            .get_interface_list_by_cat(&params.cat_id, page, limit)
            .await
        {
            Ok(result) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_cat_interface_page(&result)).into(),
            ])),
            Err(e) => {
                tracing::error!("获取分类 {} 接口列表时出错: {}", params.cat_id, e);
                Ok(CallToolResult::text_content(vec![
                    format!("获取分类接口列表出错: {e}").into(),
                ]))
            }
        }
    }
}

/// 获取项目接口列表工具参数
#[macros::mcp_tool(
    name = "get_interface_list",
    title = "获取接口列表",
    description = "获取YApi项目的接口列表数据",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetInterfaceListTool {
    /// 项目 ID
    #[json_schema(title = "项目ID", description = "项目ID")]
    pub project_id: String,

    /// 页码，默认为 1
    #[json_schema(title = "页码", description = "页码，默认为1", default = 1)]
    pub page: Option<u32>,

    /// 每页数量，默认为 10
    #[json_schema(title = "每页数量", description = "每页数量，默认为10", default = 10)]
    pub limit: Option<u32>,
}

/// 获取项目接口列表工具实现
pub struct GetInterfaceListToolImpl {
    service: Arc<YApiService>,
}

impl GetInterfaceListToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetInterfaceListToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetInterfaceListTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: GetInterfaceListTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments(
                "get_interface_list",
                Some(format!("参数解析失败: {e}")),
            )
        })?;

        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(10);

        match self
            .service
            .get_interface_list(&params.project_id, page, limit)
            .await
        {
            Ok(result) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_interface_page(&result)).into(),
            ])),
            Err(e) => {
                tracing::error!("获取项目 {} 接口列表时出错: {}", params.project_id, e);
                Ok(CallToolResult::text_content(vec![
                    format!("获取接口列表出错: {e}").into(),
                ]))
            }
        }
    }
}

/// 获取接口菜单列表工具参数
#[macros::mcp_tool(
    name = "get_interface_menu",
    title = "获取接口菜单",
    description = "获取YApi项目的接口菜单列表（包含分类及其下的接口）",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetInterfaceMenuTool {
    /// 项目 ID
    #[json_schema(title = "项目ID", description = "项目ID")]
    pub project_id: String,
}

/// 获取接口菜单列表工具实现
pub struct GetInterfaceMenuToolImpl {
    service: Arc<YApiService>,
}

impl GetInterfaceMenuToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetInterfaceMenuToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetInterfaceMenuTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: GetInterfaceMenuTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments(
                "get_interface_menu",
                Some(format!("参数解析失败: {e}")),
            )
        })?;

        match self.service.get_interface_menu(&params.project_id).await {
            Ok(menus) => Ok(CallToolResult::text_content(vec![
                pretty(&reshape_interface_menu(&menus)).into(),
            ])),
            Err(e) => {
                tracing::error!("获取项目 {} 接口菜单列表时出错: {}", params.project_id, e);
                Ok(CallToolResult::text_content(vec![
                    format!("获取接口菜单列表出错: {e}").into(),
                ]))
            }
        }
    }
}
