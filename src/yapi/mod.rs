//! YApi 服务适配器
//!
//! 与上游 YApi 服务器的唯一联系点：持有 base URL、token 与 cookie，
//! 每个上游端点对应一个方法。适配器除三个配置字段外无任何可变状态，
//! 并发调用之间互不影响。每次方法调用恰好发起一次出站请求，不重试。

pub mod dispatch;
pub mod models;

pub use dispatch::YapiEndpoint;

use crate::config::YapiConfig;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// YApi 服务适配器
pub struct YApiService {
    client: reqwest::Client,
    base_url: String,
    token: String,
    cookie: String,
}

impl YApiService {
    /// 根据上游配置创建适配器
    #[must_use]
    pub fn new(config: &YapiConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(format!("YapiMcp/{}", crate::VERSION))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            cookie: config.cookie.clone(),
        }
    }

    /// 共享的底层 HTTP 调用：单次 GET + 信封解析
    ///
    /// token 非空时附加为查询参数；cookie 无条件作为请求头发送。
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<models::YapiResponse<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("调用 {}", url);

        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        if !self.token.is_empty() {
            query.push(("token", self.token.as_str()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .header("Cookie", &self.cookie)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // 非 2xx：尽力从响应体提取 errmsg
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("errmsg")
                        .and_then(|m| m.as_str())
                        .map(ToString::to_string)
                })
                .unwrap_or_else(|| "未知错误".to_string());
            return Err(Error::UpstreamHttp {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<models::YapiResponse<T>>()
            .await
            .map_err(|e| Error::Parse(format!("解析 {endpoint} 响应失败: {e}")))
    }

    /// 获取接口详情
    ///
    /// 路径: `/api/interface/get`，参数: id (必填)
    pub async fn get_api_interface(&self, id: &str) -> Result<models::ApiInterface> {
        let response = self
            .request("/api/interface/get", &[("id", id.to_string())])
            .await?;
        response.into_data("获取API接口失败")
    }

    /// 获取项目基本信息
    ///
    /// 路径: `/api/project/get`，参数: `project_id` (选填，缺省时由上游按
    /// token 推断项目)
    pub async fn get_project_info(
        &self,
        project_id: Option<&str>,
    ) -> Result<models::ProjectInfo> {
        let mut params = Vec::new();
        if let Some(pid) = project_id {
            params.push(("project_id", pid.to_string()));
        }
        let response = self.request("/api/project/get", &params).await?;
        response.into_data("获取项目信息失败")
    }

    /// 获取菜单列表
    ///
    /// 路径: `/api/interface/getCatMenu`，参数: `project_id` (必填)
    pub async fn get_cat_menu(&self, project_id: &str) -> Result<Vec<models::Category>> {
        let response = self
            .request(
                "/api/interface/getCatMenu",
                &[("project_id", project_id.to_string())],
            )
            .await?;
        response.into_data("获取菜单列表失败")
    }

    /// 获取某个分类下接口列表
    ///
    /// 路径: `/api/interface/list_cat`，参数: catid (必填), page (选填，默认1),
    /// limit (选填，默认10)
    pub async fn get_interface_list_by_cat(
        &self,
        catid: &str,
        page: u32,
        limit: u32,
    ) -> Result<models::InterfaceList> {
        let response = self
            .request(
                "/api/interface/list_cat",
                &[
                    ("catid", catid.to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        response.into_data("获取分类接口列表失败")
    }

    /// 获取接口列表数据
    ///
    /// 路径: `/api/interface/list`，参数: `project_id` (必填), page, limit
    pub async fn get_interface_list(
        &self,
        project_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<models::InterfaceList> {
        let response = self
            .request(
                "/api/interface/list",
                &[
                    ("project_id", project_id.to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        response.into_data("获取接口列表失败")
    }

    /// 获取接口菜单列表（分类及其下属接口）
    ///
    /// 路径: `/api/interface/list_menu`，参数: `project_id` (必填)
    pub async fn get_interface_menu(&self, project_id: &str) -> Result<Vec<models::ApiMenu>> {
        let response = self
            .request(
                "/api/interface/list_menu",
                &[("project_id", project_id.to_string())],
            )
            .await?;
        response.into_data("获取接口菜单列表失败")
    }

    /// 搜索项目和接口
    ///
    /// 路径: `/api/project/search`，参数: q (必填，搜索关键词)
    pub async fn search_projects(&self, q: &str) -> Result<models::SearchData> {
        let response = self
            .request("/api/project/search", &[("q", q.to_string())])
            .await?;
        response.into_data("搜索项目和接口失败")
    }
}
