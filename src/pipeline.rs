//! # 隐写流水线模块
//!
//! 串联各个核心步骤：定位像素区域、为秘密数据加上长度前缀、检查容量、
//! 运行位打包编解码，并原样复制文件头与未被触碰的剩余像素字节。
//!
//! 文件输出先写入目标目录下的临时文件，成功后再原子地重命名为目标路径；
//! 任一步骤失败时临时文件随之删除，目标路径上不会留下半成品。

use crate::codec::{decode_stream, encode_stream};
use crate::error::Result;
use crate::frame::{framed, framed_len};
use crate::host::{PixelRegion, check_capacity, locate};
use crate::width::BitWidth;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// 一次编码的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeReport {
    pub region: PixelRegion,
    pub width: BitWidth,
    /// 位宽是否由图像与秘密数据大小之比自动推算。
    pub auto_width: bool,
    pub payload_len: usize,
    /// 写入了秘密比特的像素字节数。
    pub modified_bytes: usize,
    /// 原样复制的剩余像素字节数。
    pub leftover_bytes: usize,
}

/// 一次解码的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    pub region: PixelRegion,
    pub width: BitWidth,
    pub payload_len: usize,
}

/// 将 `payload` 隐藏进 `host`，结果写入 `out`。
///
/// 输出为：文件头 ++ 编码后的像素字节 ++ 剩余的原始像素字节，总长度与 `host` 相同。
/// `width` 为 `None` 时按 [`BitWidth::auto`] 推算。
///
/// # Errors
///
/// * `MalformedHost`: 宿主文件头不合法。
/// * `InsufficientCapacity`: 像素区域容纳不下带前缀的秘密数据。
/// * `Io`: 写入 `out` 失败。
pub fn encode_into<W: Write>(
    host: &[u8],
    payload: &[u8],
    width: Option<BitWidth>,
    out: &mut W,
) -> Result<EncodeReport> {
    let region = locate(host)?;
    info!("pixel array starts at offset {}", region.offset);

    let total = framed_len(payload.len());
    let (width, auto_width) = match width {
        Some(width) => (width, false),
        None => {
            let width = BitWidth::auto(region.len as u64, total);
            info!(
                "detected pixel / frame size of {} / {total} bytes, using bit width {width}",
                region.len
            );
            (width, true)
        }
    };

    check_capacity(region.len as u64, total, width)?;
    let frame = framed(payload)?;

    out.write_all(&host[..region.offset])?;

    let mut pixels = host[region.offset..].iter().copied();
    let mut embedder = encode_stream(pixels.by_ref(), frame, width);
    for byte in embedder.by_ref() {
        out.write_all(&[byte])?;
    }
    let modified_bytes = embedder.finish()?;
    debug!("frame exhausted after {modified_bytes} pixel bytes");

    let leftover = &host[region.offset + modified_bytes..];
    out.write_all(leftover)?;
    debug!("appended {} leftover pixel bytes", leftover.len());

    Ok(EncodeReport {
        region,
        width,
        auto_width,
        payload_len: payload.len(),
        modified_bytes,
        leftover_bytes: leftover.len(),
    })
}

/// [`encode_into`] 的内存版本，返回完整的输出图像字节。
pub fn encode_bytes(
    host: &[u8],
    payload: &[u8],
    width: Option<BitWidth>,
) -> Result<(Vec<u8>, EncodeReport)> {
    let mut out = Vec::with_capacity(host.len());
    let report = encode_into(host, payload, width, &mut out)?;
    Ok((out, report))
}

/// 从经过隐写的 `host` 中恢复秘密数据。
///
/// 解码无法从图像本身推断位宽，必须显式给出；位宽错误通常表现为
/// `TruncatedStream` 或得到无意义的数据。
pub fn decode_bytes(host: &[u8], width: BitWidth) -> Result<(Vec<u8>, DecodeReport)> {
    let region = locate(host)?;
    info!("pixel array starts at offset {}", region.offset);

    let payload = decode_stream(&host[region.offset..], width)?;
    let report = DecodeReport {
        region,
        width,
        payload_len: payload.len(),
    };
    Ok((payload, report))
}

/// 读取宿主图像与秘密文件，将隐写结果写入 `out_path`。
pub fn encode(
    host_path: &Path,
    payload_path: &Path,
    out_path: &Path,
    width: Option<BitWidth>,
) -> Result<EncodeReport> {
    let host = fs::read(host_path)?;
    let payload = fs::read(payload_path)?;
    info!("secret length: {}", payload.len());

    write_atomically(out_path, |writer| {
        encode_into(&host, &payload, width, writer)
    })
}

/// 读取经过隐写的图像，将恢复出的秘密数据写入 `out_path`。
pub fn decode(host_path: &Path, out_path: &Path, width: BitWidth) -> Result<DecodeReport> {
    let host = fs::read(host_path)?;
    let (payload, report) = decode_bytes(&host, width)?;
    info!("secret length: {}", payload.len());

    write_atomically(out_path, |writer| {
        writer.write_all(&payload)?;
        Ok(report)
    })
}

/// 通过同目录临时文件写出 `out_path`，仅在 `write` 成功并刷新后才替换目标。
fn write_atomically<T>(
    out_path: &Path,
    write: impl FnOnce(&mut BufWriter<&mut File>) -> Result<T>,
) -> Result<T> {
    let dir = out_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    debug!("staging output in {}", temp.path().display());

    let value = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let value = write(&mut writer)?;
        writer.flush()?;
        value
    };
    temp.as_file().sync_all()?;

    temp.persist(out_path).map_err(|err| err.error)?;
    Ok(value)
}
