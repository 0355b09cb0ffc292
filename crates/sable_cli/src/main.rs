use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sable_diagnostics::{ColorMode, DiagnosticSink};
use sable_driver::{DriverConfig, OutputFormat, Session};

/// 未指定文件时使用的演示源码
const DEMO_SOURCE: &str = "int a = 123;\nfloat b = a * 1.5;\nc = 99999999999999999999; @\n";
const DEMO_FILENAME: &str = "<demo>";

#[derive(Parser)]
#[command(name = "sablec")]
#[command(about = "Sable 词法检查器 - 精确定位，清晰报告", version)]
struct Cli {
    /// 颜色输出
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, global = true)]
    color: ColorArg,

    /// 诊断输出格式
    #[arg(long, value_enum, default_value_t = FormatArg::Plain, global = true)]
    format: FormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 输出词法单元序列
    Lex {
        /// 输入文件 (默认: 内置演示源码)
        files: Vec<PathBuf>,
    },

    /// 检查词法错误
    Check {
        /// 输入文件 (默认: 内置演示源码)
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Plain,
    Fancy,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Fancy => OutputFormat::Fancy,
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// 仅在设置了 RUST_LOG 时启用日志输出
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = DriverConfig {
        color: cli.color.into(),
        format: cli.format.into(),
    };
    let is_tty = io::stderr().is_terminal();
    colored::control::set_override(config.color.should_use_colors(is_tty));

    match cli.command {
        Commands::Lex { files } => cmd_lex(config, &files, is_tty)?,
        Commands::Check { files } => cmd_check(config, &files, is_tty)?,
    }

    Ok(())
}

/// 读取全部输入；没有输入时注册演示源码
///
/// 读取失败的文件不会中止运行，而是作为诊断收进返回的收集器。
fn load(config: DriverConfig, files: &[PathBuf]) -> (Session, DiagnosticSink) {
    let mut session = Session::new(config);
    let mut failures = DiagnosticSink::new();

    if files.is_empty() {
        session.add_source(DEMO_SOURCE, DEMO_FILENAME);
    }
    for file in files {
        if let Err(error) = session.add_file(file) {
            tracing::warn!(%error, "skipping unreadable source");
            failures.add(error.to_diagnostic());
        }
    }
    tracing::info!(
        sources = session.sources().len(),
        failed = failures.len(),
        "loaded sources"
    );

    (session, failures)
}

/// 输出诊断；有错误时以状态码 1 退出
fn finish(session: &Session, sink: &DiagnosticSink, is_tty: bool) -> Result<()> {
    session.emit(sink, io::stderr().lock(), is_tty)?;

    if sink.has_errors() {
        eprintln!("❌ 发现 {} 个错误", sink.error_count());
        std::process::exit(1);
    }
    Ok(())
}

/// 词法命令
fn cmd_lex(config: DriverConfig, files: &[PathBuf], is_tty: bool) -> Result<()> {
    let (session, failures) = load(config, files);

    for (id, source) in session.sources().iter() {
        for token in session.tokens(id)? {
            println!(
                "{} '{}' {}:{}..{}",
                token.kind,
                token.lexeme,
                source.filename(),
                token.location.start,
                token.location.stop
            );
        }
    }

    finish(&session, &failures, is_tty)
}

/// 检查命令
fn cmd_check(config: DriverConfig, files: &[PathBuf], is_tty: bool) -> Result<()> {
    let (session, mut sink) = load(config, files);
    println!("🔍 检查 {} 个源文件 ...", session.sources().len());

    sink.extend(session.check_all().into_diagnostics());
    finish(&session, &sink, is_tty)?;

    println!("✅ 无错误");
    Ok(())
}
