//! YApi 上游数据模型
//!
//! 所有实体均为请求级的一次性快照：由一次 HTTP 响应构造，经重组后即丢弃，
//! 不跨调用持久化。YApi 的 id 字段可能是数字也可能是字符串，统一用
//! `serde_json::Value` 宽松接收。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// YApi 响应信封
///
/// 每个上游响应都是 `{ errcode, errmsg, data }`，errcode 为 0 表示成功；
/// 非 0 时 data 必须被忽略，errmsg（或操作默认文案）作为错误文本。
#[derive(Debug, Clone, Deserialize)]
pub struct YapiResponse<T> {
    /// 状态码，0 表示成功
    pub errcode: i64,

    /// 状态消息
    #[serde(default)]
    pub errmsg: String,

    /// 载荷，仅在 errcode 为 0 时有意义
    pub data: Option<T>,
}

impl<T> YapiResponse<T> {
    /// 信封归一化：成功返回 data，失败返回携带 errmsg 的逻辑错误
    ///
    /// 上游未给出 errmsg 时使用操作相关的默认文案 `fallback`。
    pub fn into_data(self, fallback: &str) -> Result<T> {
        if self.errcode != 0 {
            let message = if self.errmsg.is_empty() {
                fallback.to_string()
            } else {
                self.errmsg
            };
            return Err(Error::UpstreamLogical(message));
        }

        self.data
            .ok_or_else(|| Error::Parse(format!("{fallback}: 响应缺少 data 字段")))
    }
}

/// 接口详情
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiInterface {
    /// 接口 ID
    #[serde(rename = "_id", default)]
    pub id: Value,

    /// 接口名称
    #[serde(default)]
    pub title: String,

    /// 接口路径
    #[serde(default)]
    pub path: String,

    /// 请求方式
    #[serde(default)]
    pub method: String,

    /// URL 参数
    #[serde(default)]
    pub req_params: Vec<Value>,

    /// 表单参数
    #[serde(default)]
    pub req_body_form: Vec<Value>,

    /// 请求头
    #[serde(default)]
    pub req_headers: Vec<Value>,

    /// 查询参数
    #[serde(default)]
    pub req_query: Vec<Value>,

    /// 请求体类型
    #[serde(default)]
    pub req_body_type: String,

    /// 响应体类型
    #[serde(default)]
    pub res_body_type: String,

    /// 响应体内容
    #[serde(default)]
    pub res_body: String,

    /// 接口描述
    #[serde(default)]
    pub desc: String,

    /// 接口文档（markdown）
    #[serde(default)]
    pub markdown: String,
}

/// 项目基本信息
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectInfo {
    /// 项目 ID
    #[serde(rename = "_id", default)]
    pub id: Value,

    /// 项目名称
    #[serde(default)]
    pub name: String,

    /// 接口基本路径
    #[serde(default)]
    pub basepath: String,

    /// 项目描述
    #[serde(default)]
    pub desc: String,

    /// 分类列表（部分接口不返回）
    #[serde(default)]
    pub cat: Option<Vec<Category>>,
}

/// 接口分类
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Category {
    /// 分类 ID
    #[serde(rename = "_id", default)]
    pub id: Value,

    /// 分类名称
    #[serde(default)]
    pub name: String,

    /// 分类描述
    #[serde(default)]
    pub desc: String,
}

/// 接口列表项
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiListItem {
    /// 接口 ID
    #[serde(rename = "_id", default)]
    pub id: Value,

    /// 接口名称
    #[serde(default)]
    pub title: String,

    /// 接口路径
    #[serde(default)]
    pub path: String,

    /// 请求方式
    #[serde(default)]
    pub method: String,

    /// 接口类型（部分列表接口不返回）
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// 所属项目 ID
    #[serde(rename = "projectId", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Value>,

    /// 所属项目 ID 的 snake_case 备用字段
    #[serde(rename = "project_id", default, skip_serializing_if = "Option::is_none")]
    pub project_id_alt: Option<Value>,
}

impl ApiListItem {
    /// 接口类型缺失时回退到请求方式
    #[must_use]
    pub fn type_or_method(&self) -> &str {
        self.item_type.as_deref().unwrap_or(&self.method)
    }

    /// `projectId` 缺失时回退到 `project_id`
    #[must_use]
    pub fn effective_project_id(&self) -> Value {
        self.project_id
            .clone()
            .or_else(|| self.project_id_alt.clone())
            .unwrap_or(Value::Null)
    }
}

/// 分页接口列表
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterfaceList {
    /// 当前页数量
    #[serde(default)]
    pub count: i64,

    /// 总数
    #[serde(default)]
    pub total: i64,

    /// 接口列表
    #[serde(default)]
    pub list: Vec<ApiListItem>,
}

/// 分类及其下属接口组成的菜单
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiMenu {
    /// 分类 ID
    #[serde(rename = "_id", default)]
    pub id: Value,

    /// 分类名称
    #[serde(default)]
    pub name: String,

    /// 分类描述
    #[serde(default)]
    pub desc: String,

    /// 分类下的接口列表
    #[serde(default)]
    pub list: Vec<ApiListItem>,
}

/// 搜索结果：匹配的项目与匹配的接口相互独立
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchData {
    /// 匹配的项目
    #[serde(default)]
    pub project: Vec<ProjectInfo>,

    /// 匹配的接口
    #[serde(rename = "interface", default)]
    pub interfaces: Vec<ApiListItem>,
}
