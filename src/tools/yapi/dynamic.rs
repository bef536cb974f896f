//! 动态调用工具
//!
//! `call_yapi` 在调用时用名称选择目标方法，而不是在目录中固定。
#![allow(missing_docs)]

use crate::tools::yapi::pretty;
use crate::tools::Tool;
use crate::yapi::{YApiService, YapiEndpoint};
use async_trait::async_trait;
use rust_mcp_sdk::macros;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 动态调用工具参数
#[macros::mcp_tool(
    name = "call_yapi",
    title = "调用YApi接口",
    description = "调用YApi的任意接口",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, macros::JsonSchema)]
pub struct CallYapiTool {
    /// YApi 接口名称，如 getApiInterface
    #[json_schema(title = "接口名称", description = "YApi接口名称，如 getApiInterface")]
    pub endpoint: String,

    /// 接口所需的参数，按目标方法的形参顺序提供
    #[json_schema(
        title = "接口参数",
        description = "接口所需的参数，取值按提供顺序依次传给目标方法"
    )]
    pub params: serde_json::Value,
}

/// 动态调用工具实现
pub struct CallYapiToolImpl {
    service: Arc<YApiService>,
}

impl CallYapiToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<YApiService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CallYapiToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        CallYapiTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let params: CallYapiTool = serde_json::from_value(arguments).map_err(|e| {
            CallToolError::invalid_arguments("call_yapi", Some(format!("参数解析失败: {e}")))
        })?;

        // 未知方法名在发起任何网络调用之前拒绝，以带内文本返回
        let Ok(endpoint) = params.endpoint.parse::<YapiEndpoint>() else {
            return Ok(CallToolResult::text_content(vec![
                format!("错误: 未找到API {}", params.endpoint).into(),
            ]));
        };

        let Some(map) = params.params.as_object() else {
            return Err(CallToolError::invalid_arguments(
                "call_yapi",
                Some("params 必须是对象".to_string()),
            ));
        };

        // serde_json 的 preserve_order 保证取值顺序即调用方的插入顺序
        let args: Vec<serde_json::Value> = map.values().cloned().collect();

        match self.service.dispatch(endpoint, &args).await {
            Ok(result) => Ok(CallToolResult::text_content(vec![pretty(&result).into()])),
            Err(e) => {
                tracing::error!("调用YApi接口 {} 出错: {}", params.endpoint, e);
                Ok(CallToolResult::text_content(vec![
                    format!("调用YApi接口出错: {e}").into(),
                ]))
            }
        }
    }
}
