//! YApi 工具集
//!
//! 固定目录中的每个工具将适配器返回的原始数据重组为面向展示的结构
//! （字段重命名为中文标签并按 基本信息/请求参数/响应信息 等分组），
//! 再序列化为文本返回。重组是纯函数，不做任何 I/O。

pub mod dynamic;
pub mod interface;
pub mod project;

use crate::yapi::models::{ApiInterface, ApiListItem, ApiMenu, Category, InterfaceList, ProjectInfo, SearchData};
use serde_json::{json, Value};

/// res_body 中嵌套通用响应信封时的处理提示，随接口详情一并返回
const RES_BODY_HINT: &str = "如果响应内容中包含了resultCode, errCode等通用响应类型，则只取内容中的 data 当默认成功后的返回数据，忽略掉通用响应类型";

/// 接口详情 → 基本信息 / 请求参数 / 响应信息 / 其他信息
#[must_use]
pub fn reshape_interface_detail(detail: &ApiInterface) -> Value {
    json!({
        "基本信息": {
            "接口ID": detail.id,
            "接口名称": detail.title,
            "接口路径": detail.path,
            "请求方式": detail.method,
            "接口描述": detail.desc,
        },
        "请求参数": {
            "URL参数": detail.req_params,
            "查询参数": detail.req_query,
            "请求头": detail.req_headers,
            "请求体类型": detail.req_body_type,
            "表单参数": detail.req_body_form,
        },
        "响应信息": {
            "响应类型": detail.res_body_type,
            "响应内容": detail.res_body,
            "响应内容处理要求": RES_BODY_HINT,
        },
        "其他信息": {
            "接口文档": detail.markdown,
        },
    })
}

/// 项目信息重组；分类存在时附带 ID/名称/描述 三元组列表
#[must_use]
pub fn reshape_project_info(info: &ProjectInfo) -> Value {
    let mut value = json!({
        "项目ID": info.id,
        "项目名称": info.name,
        "项目描述": info.desc,
    });

    if let Some(cats) = &info.cat {
        value["分类列表"] = cats.iter().map(reshape_category).collect();
    }

    value
}

/// 分类 → ID/名称/描述 三元组
#[must_use]
pub fn reshape_category(category: &Category) -> Value {
    json!({
        "分类ID": category.id,
        "分类名称": category.name,
        "分类描述": category.desc,
    })
}

/// 分类菜单重组
#[must_use]
pub fn reshape_cat_menu(categories: &[Category]) -> Value {
    categories.iter().map(reshape_category).collect()
}

/// 分类下的接口列表页重组
///
/// type 与 projectId 为选填，缺失时整个键省略而不是输出 null。
#[must_use]
pub fn reshape_cat_interface_page(result: &InterfaceList) -> Value {
    json!({
        "总数": result.total,
        "当前页数量": result.count,
        "接口列表": result.list.iter().map(|item| {
            let mut entry = json!({
                "接口ID": item.id,
                "接口名称": item.title,
            });
            if let Some(item_type) = &item.item_type {
                entry["接口类型"] = json!(item_type);
            }
            if let Some(project_id) = &item.project_id {
                entry["项目ID"] = project_id.clone();
            }
            entry
        }).collect::<Value>(),
    })
}

/// 项目下的接口列表页重组
///
/// 接口类型缺失时回退到请求方式，projectId 缺失时回退到 snake_case 字段。
#[must_use]
pub fn reshape_interface_page(result: &InterfaceList) -> Value {
    json!({
        "总数": result.total,
        "当前页数量": result.count,
        "接口列表": result.list.iter().map(|item| json!({
            "接口ID": item.id,
            "接口名称": item.title,
            "接口类型": item.type_or_method(),
            "接口路径": item.path,
            "项目ID": item.effective_project_id(),
        })).collect::<Value>(),
    })
}

/// 接口菜单重组：分类及其下属接口
#[must_use]
pub fn reshape_interface_menu(menus: &[ApiMenu]) -> Value {
    menus
        .iter()
        .map(|menu| {
            json!({
                "分类ID": menu.id,
                "分类名称": menu.name,
                "分类描述": menu.desc,
                "接口列表": menu.list.iter().map(|item| json!({
                    "接口ID": item.id,
                    "接口名称": item.title,
                    "接口路径": item.path,
                    "请求方式": item.method,
                })).collect::<Value>(),
            })
        })
        .collect()
}

/// 搜索结果重组：项目列表与接口列表相互独立
#[must_use]
pub fn reshape_search(data: &SearchData) -> Value {
    json!({
        "项目列表": data.project.iter().map(|project| json!({
            "项目ID": project.id,
            "项目名称": project.name,
        })).collect::<Value>(),
        "接口列表": data.interfaces.iter().map(reshape_search_item).collect::<Value>(),
    })
}

fn reshape_search_item(item: &ApiListItem) -> Value {
    json!({
        "接口ID": item.id,
        "接口标题": item.title,
        "项目id": item.effective_project_id(),
    })
}

/// 序列化为带缩进的 JSON 文本
#[must_use]
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
