//! 错误处理模块

use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 初始化错误
    #[error("初始化失败: {0}")]
    Initialization(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 网络调用本身未能完成（DNS、连接拒绝等）
    #[error("与YApi服务器通信失败: {0}")]
    Transport(String),

    /// HTTP 层返回非 2xx 状态码，并携带可解析的错误信息
    #[error("YApi HTTP 错误 {status}: {message}")]
    UpstreamHttp {
        /// HTTP 状态码
        status: u16,
        /// 上游返回的 errmsg（或默认文案）
        message: String,
    },

    /// HTTP 调用成功（2xx），但响应信封的 errcode 非 0
    #[error("{0}")]
    UpstreamLogical(String),

    /// 动态调用的方法名在适配器上不存在
    #[error("未找到API {0}")]
    DispatchNotFound(String),

    /// 解析错误
    #[error("解析失败: {0}")]
    Parse(String),

    /// MCP 协议错误
    #[error("MCP 协议错误: {0}")]
    Mcp(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// URL 解析错误
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),

    /// Reqwest 错误
    #[error("HTTP 客户端错误: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
