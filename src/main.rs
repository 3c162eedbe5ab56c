use clap::Parser;

use bmp_steg::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_encode, handle_inspect},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令（`encode`、`decode` 或 `inspect`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    simple_logger::init_with_level(cli.log_level())?;

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Encode(args) => handle_encode(args),
        Commands::Decode(args) => handle_decode(args),
        Commands::Inspect(args) => handle_inspect(args),
    }
}
