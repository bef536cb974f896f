//! 按名称动态调用适配器方法
//!
//! `call_yapi` 工具在运行时用字符串选择目标方法。这里不做反射：
//! 方法集合表示为封闭枚举，启动后即固定，未知名称在发起任何
//! 网络调用之前就被拒绝。

use crate::error::{Error, Result};
use crate::yapi::YApiService;
use serde_json::Value;

/// 适配器方法的封闭枚举，键为原始的 camelCase 方法名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YapiEndpoint {
    /// 获取接口详情
    GetApiInterface,
    /// 获取项目基本信息
    GetProjectInfo,
    /// 获取菜单列表
    GetCatMenu,
    /// 获取某个分类下接口列表
    GetInterfaceListByCat,
    /// 获取接口列表数据
    GetInterfaceList,
    /// 获取接口菜单列表
    GetInterfaceMenu,
    /// 搜索项目和接口
    SearchProjects,
}

impl std::str::FromStr for YapiEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "getApiInterface" => Ok(YapiEndpoint::GetApiInterface),
            "getProjectInfo" => Ok(YapiEndpoint::GetProjectInfo),
            "getCatMenu" => Ok(YapiEndpoint::GetCatMenu),
            "getInterfaceListByCat" => Ok(YapiEndpoint::GetInterfaceListByCat),
            "getInterfaceList" => Ok(YapiEndpoint::GetInterfaceList),
            "getInterfaceMenu" => Ok(YapiEndpoint::GetInterfaceMenu),
            "searchProjects" => Ok(YapiEndpoint::SearchProjects),
            _ => Err(Error::DispatchNotFound(s.to_string())),
        }
    }
}

impl std::fmt::Display for YapiEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            YapiEndpoint::GetApiInterface => "getApiInterface",
            YapiEndpoint::GetProjectInfo => "getProjectInfo",
            YapiEndpoint::GetCatMenu => "getCatMenu",
            YapiEndpoint::GetInterfaceListByCat => "getInterfaceListByCat",
            YapiEndpoint::GetInterfaceList => "getInterfaceList",
            YapiEndpoint::GetInterfaceMenu => "getInterfaceMenu",
            YapiEndpoint::SearchProjects => "searchProjects",
        };
        write!(f, "{name}")
    }
}

/// 取第 `index` 个位置参数并转为字符串，数字按字面转换
fn arg_str(args: &[Value], index: usize, name: &str) -> Result<String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(Error::Parse(format!("参数 {name} 类型无效: {other}"))),
        None => Err(Error::Parse(format!("缺少参数 {name}"))),
    }
}

/// 选填字符串参数，缺省或为 null 时返回 None
fn arg_opt_str(args: &[Value], index: usize, name: &str) -> Result<Option<String>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => arg_str(args, index, name).map(Some),
    }
}

/// 选填数字参数，缺省或为 null 时取默认值
fn arg_u32_or(args: &[Value], index: usize, name: &str, default: u32) -> Result<u32> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| Error::Parse(format!("参数 {name} 不是有效的正整数: {n}"))),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| Error::Parse(format!("参数 {name} 不是有效的正整数: {s}"))),
        Some(other) => Err(Error::Parse(format!("参数 {name} 类型无效: {other}"))),
    }
}

impl YApiService {
    /// 按位置参数调用指定端点，返回未经重组的原始结果
    ///
    /// 参数按调用方提供 params 映射的插入顺序依次对应目标方法的形参，
    /// 与既有调用方依赖的按位置传参行为保持一致；page/limit 位置缺省时
    /// 分别取 1 和 10。
    pub async fn dispatch(&self, endpoint: YapiEndpoint, args: &[Value]) -> Result<Value> {
        let result = match endpoint {
            YapiEndpoint::GetApiInterface => {
                let id = arg_str(args, 0, "id")?;
                serde_json::to_value(self.get_api_interface(&id).await?)?
            }
            YapiEndpoint::GetProjectInfo => {
                let project_id = arg_opt_str(args, 0, "project_id")?;
                serde_json::to_value(self.get_project_info(project_id.as_deref()).await?)?
            }
            YapiEndpoint::GetCatMenu => {
                let project_id = arg_str(args, 0, "project_id")?;
                serde_json::to_value(self.get_cat_menu(&project_id).await?)?
            }
            YapiEndpoint::GetInterfaceListByCat => {
                let catid = arg_str(args, 0, "catid")?;
                let page = arg_u32_or(args, 1, "page", 1)?;
                let limit = arg_u32_or(args, 2, "limit", 10)?;
                serde_json::to_value(self.get_interface_list_by_cat(&catid, page, limit).await?)?
            }
            YapiEndpoint::GetInterfaceList => {
                let project_id = arg_str(args, 0, "project_id")?;
                let page = arg_u32_or(args, 1, "page", 1)?;
                let limit = arg_u32_or(args, 2, "limit", 10)?;
                serde_json::to_value(self.get_interface_list(&project_id, page, limit).await?)?
            }
            YapiEndpoint::GetInterfaceMenu => {
                let project_id = arg_str(args, 0, "project_id")?;
                serde_json::to_value(self.get_interface_menu(&project_id).await?)?
            }
            YapiEndpoint::SearchProjects => {
                let q = arg_str(args, 0, "q")?;
                serde_json::to_value(self.search_projects(&q).await?)?
            }
        };

        Ok(result)
    }
}
