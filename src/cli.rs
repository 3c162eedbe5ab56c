//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 子命令即运行模式 (`encode` / `decode` / `inspect`)，位宽在解析阶段即被限制在 1..=8。

use clap::{Args, Parser, Subcommand};
use log::Level;
use std::path::PathBuf;

/// 一款基于可变位宽 LSB 隐写术的命令行工具，用于在 BMP 图像的像素数据中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于可变位宽 LSB 隐写术的命令行工具，用于在 BMP 图像的像素数据中隐藏或恢复任意文件。\n每个像素字节的低 1 到 8 位可被用于承载秘密数据。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v: info, -vv: debug, -vvv: trace)。
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 根据 `-v` 出现的次数决定日志级别，默认只输出警告。
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::Warn,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

/// 可用的子命令：encode (隐藏)、decode (恢复) 和 inspect (查看容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将任意文件隐藏到 BMP 图像的像素数据中。
    Encode(EncodeArgs),

    /// 从经过隐写的 BMP 图像中恢复隐藏的文件。
    Decode(DecodeArgs),

    /// 显示 BMP 图像的像素区域及各位宽下可隐藏的最大字节数。
    Inspect(InspectArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// 用作载体的 BMP 图像路径。
    #[arg(short, long)]
    pub picture: PathBuf,

    /// 要隐藏的秘密文件路径。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 结果图像的输出路径，默认为载体同目录下的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 每个像素字节使用的低位数 (1-8)，省略时按图像与秘密文件大小之比自动选择。
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: Option<u8>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// 已隐藏数据的 BMP 图像路径。
    #[arg(short, long)]
    pub picture: PathBuf,

    /// 编码时使用的位数 (1-8)，无法从图像中推断，必须给出。
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 恢复出的文件的输出路径，默认为载体同目录下的 `recovered_<文件名>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'inspect' 命令所需的参数。
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// 要查看的 BMP 图像路径。
    #[arg(short, long)]
    pub picture: PathBuf,
}
