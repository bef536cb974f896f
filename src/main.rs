//! YApi MCP 服务器主程序

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use yapi_mcp::config::AppConfig;
use yapi_mcp::server::transport::{self, TransportMode};
use yapi_mcp::YapiMcpServer;

#[derive(Parser)]
#[command(name = "yapi-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "YApi 接口文档 MCP 服务器", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// 启用调试日志
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动服务器
    Serve {
        /// 传输模式 [stdio, http, sse]
        #[arg(short, long)]
        mode: Option<String>,

        /// 监听主机
        #[arg(long)]
        host: Option<String>,

        /// 监听端口
        #[arg(short, long)]
        port: Option<u16>,

        /// YApi 服务器地址
        #[arg(long, env = "YAPI_BASE_URL")]
        base_url: Option<String>,

        /// YApi 项目 token
        #[arg(long, env = "YAPI_TOKEN")]
        token: Option<String>,

        /// YApi Cookie
        #[arg(long, env = "YAPI_COOKIE")]
        cookie: Option<String>,
    },

    /// 生成配置文件
    Config {
        /// 输出文件路径
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },

    /// 本地执行单个工具（调试用）
    Test {
        /// 工具名称，如 get_api_desc、search_projects
        #[arg(short, long)]
        tool: String,

        /// JSON 格式的工具参数
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// 显示版本信息
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            mode,
            host,
            port,
            base_url,
            token,
            cookie,
        } => {
            serve_command(
                &cli.config,
                cli.debug,
                mode,
                host,
                port,
                base_url,
                token,
                cookie,
            )
            .await?;
        }
        Commands::Config { output, force } => {
            config_command(&output, force)?;
        }
        Commands::Test { tool, args } => {
            test_command(&cli.config, &tool, &args).await?;
        }
        Commands::Version => {
            version_command();
        }
    }

    Ok(())
}

/// 启动服务器命令
#[allow(clippy::too_many_arguments)]
async fn serve_command(
    config_path: &PathBuf,
    debug: bool,
    mode: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    base_url: Option<String>,
    token: Option<String>,
    cookie: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;

    // 仅当命令行参数（或对应环境变量）显式提供时，才覆盖配置文件
    if let Some(m) = mode {
        config.server.transport_mode = m;
    }
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }
    if let Some(u) = base_url {
        config.yapi.base_url = u;
    }
    if let Some(t) = token {
        config.yapi.token = t;
    }
    if let Some(c) = cookie {
        config.yapi.cookie = c;
    }

    if debug {
        config.logging.level = "debug".to_string();
    }

    config
        .validate()
        .map_err(|e| format!("配置验证失败: {e}"))?;

    yapi_mcp::init_logging_with_config(&config.logging)
        .map_err(|e| format!("初始化日志系统失败: {e}"))?;

    tracing::info!("启动 YApi MCP 服务器 v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("YApi 上游: {}", config.yapi.base_url);

    let transport_mode: TransportMode = config.server.transport_mode.parse()?;
    let server = YapiMcpServer::new(config).map_err(|e| format!("创建服务器失败: {e}"))?;

    transport::run_server_with_mode(&server, transport_mode)
        .await
        .map_err(|e| format!("服务器启动失败: {e}"))?;

    Ok(())
}

/// 加载配置：配置文件存在时读取文件，否则用环境变量补全默认配置
fn load_config(config_path: &PathBuf) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if config_path.exists() {
        Ok(AppConfig::from_file(config_path).map_err(|e| format!("加载配置文件失败: {e}"))?)
    } else {
        Ok(AppConfig::from_env().map_err(|e| format!("加载环境变量配置失败: {e}"))?)
    }
}

/// 生成配置文件命令
fn config_command(output: &PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!("配置文件已存在: {}，使用 --force 覆盖", output.display()).into());
    }

    let config = AppConfig::default();
    config
        .save_to_file(output)
        .map_err(|e| format!("保存配置文件失败: {e}"))?;

    println!("配置文件已生成: {}", output.display());
    println!("请填写 [yapi] 段中的 base_url、token 和 cookie。");

    Ok(())
}

/// 测试工具命令：在本地注册表上执行一次指定工具
async fn test_command(
    config_path: &PathBuf,
    tool: &str,
    args: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    let service = Arc::new(yapi_mcp::YApiService::new(&config.yapi));
    let registry = yapi_mcp::tools::create_default_registry(&service);

    let arguments: serde_json::Value =
        serde_json::from_str(args).map_err(|e| format!("解析工具参数失败: {e}"))?;

    println!("执行工具: {tool}");
    match registry.execute_tool(tool, arguments).await {
        Ok(result) => {
            for content in &result.content {
                match content {
                    rust_mcp_sdk::schema::ContentBlock::TextContent(text_content) => {
                        println!("{}", text_content.text);
                    }
                    other => {
                        println!("非文本内容: {other:?}");
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("工具执行失败: {e}");
        }
    }

    Ok(())
}

/// 版本命令
fn version_command() {
    println!("YApi MCP 服务器 v{}", env!("CARGO_PKG_VERSION"));
    println!("构建时间: {}", env!("BUILD_TIMESTAMP"));
    println!("Git 提交: {}", env!("GIT_COMMIT"));
}
