//! # 命令处理逻辑模块
//!
//! 包含处理 `encode`、`decode` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责解析默认输出路径、防止意外覆盖、调用隐写流水线以及向用户报告结果。

use crate::cli::{DecodeArgs, EncodeArgs, InspectArgs};
use crate::host::{locate, max_payload_len};
use crate::pipeline;
use crate::width::BitWidth;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责确定输出路径、校验位宽、调用隐写流水线，并打印像素偏移量、
/// 秘密数据长度和所用位宽等信息。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取载体图像或秘密文件，或载体文件头不合法。
/// * 图像在所选位宽下没有足够的空间隐藏秘密文件。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_encode_output(&args.picture));
    ensure_writable(&output, args.force)?;

    let width = args.bits.map(BitWidth::try_from).transpose()?;

    print_info("Picture file", &args.picture.to_string_lossy());
    print_info("Secret file", &args.secret.to_string_lossy());
    print_info("Output file", &output.to_string_lossy());

    let report = pipeline::encode(&args.picture, &args.secret, &output, width).with_context(|| {
        format!(
            "Failed to hide '{}' in '{}'",
            args.secret.to_string_lossy().red().bold(),
            args.picture.to_string_lossy().red().bold()
        )
    })?;

    print_info("Pixel array offset", &report.region.offset.to_string());
    print_info("Secret length", &report.payload_len.to_string());
    if report.auto_width {
        print_info(
            "Detected bit width",
            &format!(
                "{} (pixel region {} bytes)",
                report.width, report.region.len
            ),
        );
    } else {
        print_info("Bit width", &report.width.to_string());
    }
    print_info(
        "Modified pixel bytes",
        &format!(
            "{} ({} left untouched)",
            report.modified_bytes, report.leftover_bytes
        ),
    );

    println!(
        "The secret has been successfully hidden and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取图像文件，或文件头不合法。
/// * 像素数据在读完声明长度之前耗尽 (通常是位宽错误或图像未经隐写)。
/// * 无法写入到目标文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_decode_output(&args.picture));
    ensure_writable(&output, args.force)?;

    let width = BitWidth::try_from(args.bits)?;

    print_info("Picture file", &args.picture.to_string_lossy());
    print_info("Output file", &output.to_string_lossy());
    print_info("Bit width", &width.to_string());

    let report = pipeline::decode(&args.picture, &output, width).with_context(|| {
        format!(
            "Failed to recover a secret from '{}' at bit width {}. \nThe image may not contain a hidden file or was encoded with another bit width.",
            args.picture.to_string_lossy().red().bold(),
            width.to_string().red().bold()
        )
    })?;

    print_info("Pixel array offset", &report.region.offset.to_string());
    print_info("Secret length", &report.payload_len.to_string());

    println!(
        "The secret has been successfully recovered and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Inspect' 命令：显示像素区域位置，以及每种位宽下最多可隐藏的字节数。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let picture = fs::read(&args.picture).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.picture.to_string_lossy().red().bold()
        )
    })?;
    let region = locate(&picture).with_context(|| {
        format!(
            "'{}' does not look like a BMP image",
            args.picture.to_string_lossy().red().bold()
        )
    })?;

    print_info("Picture file", &args.picture.to_string_lossy());
    print_info("Pixel array offset", &region.offset.to_string());
    print_info("Pixel region length", &region.len.to_string());

    for width in BitWidth::all() {
        let capacity = max_payload_len(region.len as u64, width);
        println!(
            "\t {} bit(s): up to {} bytes",
            width.to_string().cyan(),
            capacity.to_string().green().bold()
        );
    }
    Ok(())
}

/// 默认的隐写结果路径：载体同目录下的 `doctored_<文件名>`。
pub fn default_encode_output(picture: &Path) -> PathBuf {
    let name = picture
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out.bmp".to_string());
    picture.with_file_name(format!("doctored_{name}"))
}

/// 默认的恢复结果路径：载体同目录下的 `recovered_<文件名主干>.bin`。
pub fn default_decode_output(picture: &Path) -> PathBuf {
    let stem = picture
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    picture.with_file_name(format!("recovered_{stem}.bin"))
}

fn ensure_writable(output: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !output.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        output.to_string_lossy().red().bold()
    );
    Ok(())
}

fn print_info(label: &str, value: &str) {
    println!("\t {}: {}", label, value.bold());
}
