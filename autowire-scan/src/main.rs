//! # 自动装配扫描工具
//!
//! 读取扫描配置与类型目录清单，解析命令行给出的源文件，并将扫描报告以 JSON
//! 输出到标准输出。日志写到标准错误。

use anyhow::Context;
use clap::Parser;
use di_abstractions::ComponentScanner;
use infrastructure_composition::{init_logging, parse_log_level, AutowireScanner, LoggingConfig};
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "autowire-scan")]
#[command(about = "扫描源文件并列出可自动装配的组件")]
struct Args {
    /// 扫描配置文件路径（TOML）
    #[arg(short, long)]
    settings: PathBuf,

    /// 类型目录清单路径（JSON）
    #[arg(short, long)]
    catalog: PathBuf,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 待扫描的源文件
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    let mut logging = LoggingConfig::default()
        .with_level(parse_log_level(&args.log_level))
        .with_stderr();
    logging.json_format = args.json_logs;
    init_logging(&logging)?;

    let scanner = AutowireScanner::from_files(&args.settings, &args.catalog).with_context(|| {
        format!(
            "无法加载扫描配置 {} 或类型目录 {}",
            args.settings.display(),
            args.catalog.display()
        )
    })?;
    info!("扫描标记: {}", scanner.settings().marker_capability);

    let report = scanner.scan(&args.files).await?;

    let output = serde_json::to_string_pretty(&report).context("扫描报告序列化失败")?;
    println!("{}", output);
    Ok(())
}
