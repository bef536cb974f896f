//! 配置模块

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 应用程序配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,

    /// YApi 上游配置
    pub yapi: YapiConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 服务器名称
    pub name: String,

    /// 服务器版本
    pub version: String,

    /// 服务器描述
    pub description: Option<String>,

    /// 主机地址
    pub host: String,

    /// 端口
    pub port: u16,

    /// 传输模式
    pub transport_mode: String,
}

/// YApi 上游配置
///
/// 适配器的全部状态：base URL、token、cookie，进程启动时读取一次。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YapiConfig {
    /// YApi 服务器地址，例如 `http://yapi.example.com`
    pub base_url: String,

    /// 项目 token，非空时作为 token 查询参数附加到每次调用
    pub token: String,

    /// Cookie 字符串，无条件随每次调用发送
    pub cookie: String,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,

    /// 日志文件路径
    pub file_path: Option<String>,

    /// 是否启用控制台日志
    pub enable_console: bool,

    /// 是否启用文件日志
    pub enable_file: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            description: Some("YApi 接口文档 MCP 服务器".to_string()),
            host: "127.0.0.1".to_string(),
            port: 3388,
            transport_mode: "stdio".to_string(),
        }
    }
}

impl Default for YapiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            token: String::new(),
            cookie: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: Some("./logs/yapi-mcp.log".to_string()),
            enable_console: true,
            enable_file: false,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    ///
    /// # Errors
    ///
    /// 如果文件不存在、无法读取或格式无效，返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::Error> {
        let content = fs::read_to_string(path)
            .map_err(|e| crate::error::Error::Config(format!("读取配置文件失败: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::Error::Config(format!("解析配置文件失败: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    ///
    /// # Errors
    ///
    /// 如果无法序列化配置、创建目录或写入文件，返回错误
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::error::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::Error::Config(format!("序列化配置失败: {e}")))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .map_err(|e| crate::error::Error::Config(format!("创建目录失败: {e}")))?;
        }

        fs::write(path, content)
            .map_err(|e| crate::error::Error::Config(format!("写入配置文件失败: {e}")))?;

        Ok(())
    }

    /// 验证配置
    ///
    /// # Errors
    ///
    /// 如果配置无效（如空主机名、无效端口等），返回错误
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.server.host.is_empty() {
            return Err(crate::error::Error::Config("服务器主机不能为空".to_string()));
        }

        if self.server.port == 0 {
            return Err(crate::error::Error::Config("服务器端口不能为0".to_string()));
        }

        let valid_modes = ["stdio", "http", "sse"];
        if !valid_modes.contains(&self.server.transport_mode.as_str()) {
            return Err(crate::error::Error::Config(format!(
                "无效的传输模式: {}，有效值: {:?}",
                self.server.transport_mode, valid_modes
            )));
        }

        if self.yapi.base_url.is_empty() {
            return Err(crate::error::Error::Config("YApi 服务器地址不能为空".to_string()));
        }

        // base_url 必须是合法 URL，末尾斜杠会导致拼接出双斜杠路径
        let url = url::Url::parse(&self.yapi.base_url)
            .map_err(|e| crate::error::Error::Config(format!("无效的 YApi 服务器地址: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(crate::error::Error::Config(format!(
                "YApi 服务器地址必须是 http/https: {}",
                self.yapi.base_url
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(crate::error::Error::Config(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    /// 从环境变量加载配置
    ///
    /// # Errors
    ///
    /// 如果环境变量格式无效或配置验证失败，返回错误
    pub fn from_env() -> Result<Self, crate::error::Error> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("YAPI_BASE_URL") {
            config.yapi.base_url = base_url;
        }

        if let Ok(token) = std::env::var("YAPI_TOKEN") {
            config.yapi.token = token;
        }

        if let Ok(cookie) = std::env::var("YAPI_COOKIE") {
            config.yapi.cookie = cookie;
        }

        if let Ok(host) = std::env::var("YAPI_MCP_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("YAPI_MCP_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| crate::error::Error::Config(format!("无效的端口: {e}")))?;
        }

        if let Ok(mode) = std::env::var("YAPI_MCP_TRANSPORT_MODE") {
            config.server.transport_mode = mode;
        }

        if let Ok(level) = std::env::var("YAPI_MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }
}
