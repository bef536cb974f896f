//! 集成测试
//!
//! 用 axum 起一个本地 YApi 存根服务器，返回固定的响应信封，
//! 对全部八个工具走一遍完整的 调用 → 适配器 → 重组 → 文本 流程。

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use rust_mcp_sdk::schema::{CallToolResult, ContentBlock};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use yapi_mcp::config::YapiConfig;
use yapi_mcp::tools::create_default_registry;
use yapi_mcp::YApiService;

const TOKEN: &str = "test-token";
const COOKIE: &str = "_yapi_token=abc; _yapi_uid=1";

// ============================================================================
// YApi 存根服务器
// ============================================================================

/// 公共错误触发器：取值 "404" 触发 errcode 非 0，"500" 触发 HTTP 500
fn error_branch(value: Option<&str>) -> Option<(StatusCode, Json<Value>)> {
    match value {
        Some("404") => Some((
            StatusCode::OK,
            Json(json!({"errcode": 40400, "errmsg": "记录不存在"})),
        )),
        Some("500") => Some((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"errmsg": "服务器内部错误"})),
        )),
        _ => None,
    }
}

/// 接口详情：要求 token 查询参数；特殊 id 触发错误分支
async fn interface_get(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if q.get("token").map(String::as_str) != Some(TOKEN) {
        return (
            StatusCode::OK,
            Json(json!({"errcode": 300, "errmsg": "缺少token"})),
        );
    }

    match q.get("id").map(String::as_str) {
        Some("404") => (
            StatusCode::OK,
            Json(json!({"errcode": 40022, "errmsg": "接口不存在"})),
        ),
        Some("500") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"errmsg": "服务器内部错误"})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({"errcode": 0, "errmsg": "成功", "data": {
                "_id": 1001,
                "title": "创建用户",
                "path": "/user/create",
                "method": "POST",
                "req_params": [],
                "req_body_form": [],
                "req_headers": [{"name": "Content-Type", "value": "application/json"}],
                "req_query": [],
                "req_body_type": "json",
                "res_body_type": "json",
                "res_body": "{\"code\":0,\"data\":{}}",
                "desc": "创建一个新用户",
                "markdown": "## 创建用户"
            }})),
        ),
    }
}

/// 项目信息：project_id 选填，回显到项目名称里
async fn project_get(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if let Some(resp) = error_branch(q.get("project_id").map(String::as_str)) {
        return resp;
    }

    let name = match q.get("project_id") {
        Some(pid) => format!("项目{pid}"),
        None => "默认项目".to_string(),
    };

    (
        StatusCode::OK,
        Json(json!({"errcode": 0, "errmsg": "成功", "data": {
            "_id": 11,
            "name": name,
            "basepath": "/api",
            "desc": "演示项目",
            "cat": [{"_id": 71, "name": "用户模块", "desc": "用户相关接口"}]
        }})),
    )
}

async fn cat_menu(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if let Some(resp) = error_branch(q.get("project_id").map(String::as_str)) {
        return resp;
    }

    (
        StatusCode::OK,
        Json(json!({"errcode": 0, "errmsg": "成功", "data": [
            {"_id": 71, "name": "用户模块", "desc": "用户相关接口"},
            {"_id": 72, "name": "订单模块", "desc": "订单相关接口"}
        ]})),
    )
}

/// 分类接口列表：把收到的分页参数回显进列表项标题，便于断言
async fn interface_list_cat(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if let Some(resp) = error_branch(q.get("catid").map(String::as_str)) {
        return resp;
    }

    let title = format!(
        "cat={} page={} limit={}",
        q.get("catid").cloned().unwrap_or_default(),
        q.get("page").cloned().unwrap_or_default(),
        q.get("limit").cloned().unwrap_or_default(),
    );

    (
        StatusCode::OK,
        Json(json!({"errcode": 0, "errmsg": "成功", "data": {
            "count": 1,
            "total": 1,
            "list": [{"_id": 501, "title": title, "type": "static", "projectId": 11}]
        }})),
    )
}

/// 项目接口列表：回显分页参数；不返回 type 和 projectId，用于验证回退
async fn interface_list(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if let Some(resp) = error_branch(q.get("project_id").map(String::as_str)) {
        return resp;
    }

    let title = format!(
        "project={} page={} limit={}",
        q.get("project_id").cloned().unwrap_or_default(),
        q.get("page").cloned().unwrap_or_default(),
        q.get("limit").cloned().unwrap_or_default(),
    );

    (
        StatusCode::OK,
        Json(json!({"errcode": 0, "errmsg": "成功", "data": {
            "count": 1,
            "total": 25,
            "list": [{"_id": 502, "title": title, "path": "/user/list", "method": "GET", "project_id": 42}]
        }})),
    )
}

async fn interface_list_menu(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if let Some(resp) = error_branch(q.get("project_id").map(String::as_str)) {
        return resp;
    }

    (
        StatusCode::OK,
        Json(json!({"errcode": 0, "errmsg": "成功", "data": [
            {"_id": 71, "name": "用户模块", "desc": "用户相关接口", "list": [
                {"_id": 1001, "title": "创建用户", "path": "/user/create", "method": "POST"}
            ]}
        ]})),
    )
}

/// 搜索：校验 Cookie 请求头随调用发送；特殊关键词触发 HTTP 错误
async fn project_search(
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if headers.get("cookie").and_then(|v| v.to_str().ok()) != Some(COOKIE) {
        return (
            StatusCode::OK,
            Json(json!({"errcode": 401, "errmsg": "缺少Cookie"})),
        );
    }

    if let Some(resp) = error_branch(q.get("q").map(String::as_str)) {
        return resp;
    }

    (
        StatusCode::OK,
        Json(json!({"errcode": 0, "errmsg": "成功", "data": {
            "project": [{"_id": 11, "name": "用户中心", "basepath": "/api", "desc": ""}],
            "interface": [{"_id": 1001, "title": "创建用户", "projectId": 11}]
        }})),
    )
}

/// 启动存根服务器，返回 base URL
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/api/interface/get", get(interface_get))
        .route("/api/project/get", get(project_get))
        .route("/api/interface/getCatMenu", get(cat_menu))
        .route("/api/interface/list_cat", get(interface_list_cat))
        .route("/api/interface/list", get(interface_list))
        .route("/api/interface/list_menu", get(interface_list_menu))
        .route("/api/project/search", get(project_search));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定存根端口失败");
    let addr = listener.local_addr().expect("获取存根地址失败");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("存根服务器退出");
    });

    format!("http://{addr}")
}

fn service_at(base_url: &str) -> Arc<YApiService> {
    Arc::new(YApiService::new(&YapiConfig {
        base_url: base_url.to_string(),
        token: TOKEN.to_string(),
        cookie: COOKIE.to_string(),
    }))
}

fn first_text(result: &CallToolResult) -> String {
    match result.content.first() {
        Some(ContentBlock::TextContent(text_content)) => text_content.text.clone(),
        other => panic!("期望文本内容，实际为: {other:?}"),
    }
}

// ============================================================================
// 固定工具测试
// ============================================================================

/// 接口详情成功路径：重命名分组里的值与存根返回一致
#[tokio::test]
async fn test_get_api_desc_success() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_api_desc", json!({"apiId": "1001"}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("基本信息"));
    assert!(text.contains("创建用户"));
    assert!(text.contains("/user/create"));
    assert!(text.contains("POST"));
    assert!(text.contains("响应内容处理要求"));
}

/// errcode 非 0：错误文本包含上游的 errmsg
#[tokio::test]
async fn test_get_api_desc_upstream_logical_error() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_api_desc", json!({"apiId": "404"}))
        .await
        .expect("错误应当以带内文本返回");

    let text = first_text(&result);
    assert!(text.contains("获取API接口出错"));
    assert!(text.contains("接口不存在"));
}

/// 非 2xx：处理器不抛出，错误以带内文本返回
#[tokio::test]
async fn test_get_api_desc_http_error_stays_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_api_desc", json!({"apiId": "500"}))
        .await
        .expect("错误应当以带内文本返回");

    let text = first_text(&result);
    assert!(text.contains("500"));
    assert!(text.contains("服务器内部错误"));
}

/// token 为空时不附加查询参数，存根因此拒绝
#[tokio::test]
async fn test_token_appended_only_when_configured() {
    let base_url = spawn_stub().await;
    let service = Arc::new(YApiService::new(&YapiConfig {
        base_url: base_url.clone(),
        token: String::new(),
        cookie: COOKIE.to_string(),
    }));
    let registry = create_default_registry(&service);

    let result = registry
        .execute_tool("get_api_desc", json!({"apiId": "1001"}))
        .await
        .expect("错误应当以带内文本返回");
    assert!(first_text(&result).contains("缺少token"));

    // 配置了 token 的服务则成功（存根校验 token 参数）
    let registry = create_default_registry(&service_at(&base_url));
    let result = registry
        .execute_tool("get_api_desc", json!({"apiId": "1001"}))
        .await
        .expect("工具执行失败");
    assert!(first_text(&result).contains("创建用户"));
}

/// 项目信息：projectId 传给上游，分类被重组为三元组
#[tokio::test]
async fn test_get_project_info() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_project_info", json!({"projectId": "11"}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("项目11"));
    assert!(text.contains("分类列表"));
    assert!(text.contains("用户模块"));
}

/// 菜单列表
#[tokio::test]
async fn test_get_cat_menu() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_cat_menu", json!({"projectId": "11"}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("用户模块"));
    assert!(text.contains("订单模块"));
}

/// 分页默认值：省略 page/limit 时上游收到 page=1、limit=10
#[tokio::test]
async fn test_get_cat_interface_list_pagination_defaults() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_cat_interface_list", json!({"catId": "7"}))
        .await
        .expect("工具执行失败");

    assert!(first_text(&result).contains("cat=7 page=1 limit=10"));
}

/// 显式分页参数原样透传
#[tokio::test]
async fn test_get_cat_interface_list_explicit_paging() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool(
            "get_cat_interface_list",
            json!({"catId": "7", "page": 3, "limit": 20}),
        )
        .await
        .expect("工具执行失败");

    assert!(first_text(&result).contains("cat=7 page=3 limit=20"));
}

/// 项目接口列表：分页默认值 + 类型/项目 ID 回退
#[tokio::test]
async fn test_get_interface_list_defaults_and_fallbacks() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_interface_list", json!({"projectId": "42"}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("project=42 page=1 limit=10"));
    // type 缺失回退到请求方式
    assert!(text.contains("\"接口类型\": \"GET\""));
    // projectId 缺失回退到 snake_case 的 project_id
    assert!(text.contains("\"项目ID\": 42"));
}

/// 接口菜单：分类及其下属接口
#[tokio::test]
async fn test_get_interface_menu() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_interface_menu", json!({"projectId": "11"}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("用户模块"));
    assert!(text.contains("/user/create"));
}

/// 搜索：项目与接口两个独立列表；Cookie 请求头由存根校验
#[tokio::test]
async fn test_search_projects() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("search_projects", json!({"q": "用户"}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(!text.contains("缺少Cookie"));
    assert!(text.contains("项目列表"));
    assert!(text.contains("用户中心"));
    assert!(text.contains("接口列表"));
    assert!(text.contains("创建用户"));
}

// ============================================================================
// 各工具错误分支测试
// ============================================================================

/// 项目信息：errcode 非 0 与 HTTP 错误都以带内文本返回
#[tokio::test]
async fn test_get_project_info_errors_stay_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_project_info", json!({"projectId": "404"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取项目信息出错"));
    assert!(text.contains("记录不存在"));

    let result = registry
        .execute_tool("get_project_info", json!({"projectId": "500"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取项目信息出错"));
    assert!(text.contains("服务器内部错误"));
}

/// 菜单列表：两类错误都以带内文本返回
#[tokio::test]
async fn test_get_cat_menu_errors_stay_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_cat_menu", json!({"projectId": "404"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取菜单列表出错"));
    assert!(text.contains("记录不存在"));

    let result = registry
        .execute_tool("get_cat_menu", json!({"projectId": "500"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取菜单列表出错"));
    assert!(text.contains("服务器内部错误"));
}

/// 分类接口列表：两类错误都以带内文本返回
#[tokio::test]
async fn test_get_cat_interface_list_errors_stay_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_cat_interface_list", json!({"catId": "404"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取分类接口列表出错"));
    assert!(text.contains("记录不存在"));

    let result = registry
        .execute_tool("get_cat_interface_list", json!({"catId": "500"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取分类接口列表出错"));
    assert!(text.contains("服务器内部错误"));
}

/// 项目接口列表：两类错误都以带内文本返回
#[tokio::test]
async fn test_get_interface_list_errors_stay_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_interface_list", json!({"projectId": "404"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取接口列表出错"));
    assert!(text.contains("记录不存在"));

    let result = registry
        .execute_tool("get_interface_list", json!({"projectId": "500"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取接口列表出错"));
    assert!(text.contains("服务器内部错误"));
}

/// 接口菜单：两类错误都以带内文本返回
#[tokio::test]
async fn test_get_interface_menu_errors_stay_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("get_interface_menu", json!({"projectId": "404"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取接口菜单列表出错"));
    assert!(text.contains("记录不存在"));

    let result = registry
        .execute_tool("get_interface_menu", json!({"projectId": "500"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("获取接口菜单列表出错"));
    assert!(text.contains("服务器内部错误"));
}

/// 搜索：缺少 Cookie 的逻辑错误与 HTTP 错误都以带内文本返回
#[tokio::test]
async fn test_search_projects_errors_stay_in_band() {
    let base_url = spawn_stub().await;

    // Cookie 不匹配时存根返回 errcode 非 0
    let service = Arc::new(YApiService::new(&YapiConfig {
        base_url: base_url.clone(),
        token: TOKEN.to_string(),
        cookie: "wrong".to_string(),
    }));
    let registry = create_default_registry(&service);
    let result = registry
        .execute_tool("search_projects", json!({"q": "用户"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("搜索YApi项目出错"));
    assert!(text.contains("缺少Cookie"));

    let registry = create_default_registry(&service_at(&base_url));
    let result = registry
        .execute_tool("search_projects", json!({"q": "500"}))
        .await
        .expect("错误应当以带内文本返回");
    let text = first_text(&result);
    assert!(text.contains("搜索YApi项目出错"));
    assert!(text.contains("服务器内部错误"));
}

// ============================================================================
// 动态调用测试
// ============================================================================

/// call_yapi + getProjectInfo（无参数）等价于无 project_id 的项目信息查询
#[tokio::test]
async fn test_call_yapi_get_project_info_without_params() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool("call_yapi", json!({"endpoint": "getProjectInfo", "params": {}}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("默认项目"));
}

/// 未知方法名：返回"未找到"文本，不发起任何网络调用
#[tokio::test]
async fn test_call_yapi_unknown_endpoint() {
    // base_url 指向未监听的端口，若发起网络调用会得到传输错误而非"未找到"
    let registry = create_default_registry(&service_at("http://127.0.0.1:9"));

    let result = registry
        .execute_tool("call_yapi", json!({"endpoint": "doesNotExist", "params": {}}))
        .await
        .expect("工具执行失败");

    let text = first_text(&result);
    assert!(text.contains("错误: 未找到API doesNotExist"));
}

/// 位置参数按 params 映射的插入顺序转发
#[tokio::test]
async fn test_call_yapi_positional_order() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool(
            "call_yapi",
            json!({"endpoint": "getInterfaceList", "params": {"projectId": "42", "page": 2, "limit": 5}}),
        )
        .await
        .expect("工具执行失败");

    // 存根把收到的参数回显进标题：("42", 2, 5) 按此顺序到达
    assert!(first_text(&result).contains("project=42 page=2 limit=5"));
}

/// 动态调用的分页位置缺省时取 1/10
#[tokio::test]
async fn test_call_yapi_pagination_defaults() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool(
            "call_yapi",
            json!({"endpoint": "getInterfaceList", "params": {"projectId": "42"}}),
        )
        .await
        .expect("工具执行失败");

    assert!(first_text(&result).contains("project=42 page=1 limit=10"));
}

/// 动态调用的委托错误同样以带内文本返回
#[tokio::test]
async fn test_call_yapi_delegate_error_in_band() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let result = registry
        .execute_tool(
            "call_yapi",
            json!({"endpoint": "getApiInterface", "params": {"id": "404"}}),
        )
        .await
        .expect("错误应当以带内文本返回");

    let text = first_text(&result);
    assert!(text.contains("调用YApi接口出错"));
    assert!(text.contains("接口不存在"));
}

// ============================================================================
// 注册表与幂等性测试
// ============================================================================

/// 注册表固定为八个工具
#[tokio::test]
async fn test_registry_contains_eight_tools() {
    let registry = create_default_registry(&service_at("http://127.0.0.1:9"));
    let tools = registry.get_tools();
    assert_eq!(tools.len(), 8);

    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    for expected in [
        "get_api_desc",
        "get_project_info",
        "get_cat_menu",
        "get_cat_interface_list",
        "get_interface_list",
        "get_interface_menu",
        "search_projects",
        "call_yapi",
    ] {
        assert!(names.contains(&expected), "缺少工具: {expected}");
    }
}

/// 未注册的工具名返回协议级错误
#[tokio::test]
async fn test_unknown_tool_is_rejected() {
    let registry = create_default_registry(&service_at("http://127.0.0.1:9"));
    let result = registry.execute_tool("no_such_tool", json!({})).await;
    assert!(result.is_err());
}

/// 幂等性：对幂等存根重复同一调用，输出字节级一致
#[tokio::test]
async fn test_repeated_calls_yield_identical_output() {
    let base_url = spawn_stub().await;
    let registry = create_default_registry(&service_at(&base_url));

    let first = registry
        .execute_tool("get_api_desc", json!({"apiId": "1001"}))
        .await
        .expect("工具执行失败");
    let second = registry
        .execute_tool("get_api_desc", json!({"apiId": "1001"}))
        .await
        .expect("工具执行失败");

    assert_eq!(first_text(&first), first_text(&second));
}
