//! # 宿主图像定位模块
//!
//! 解析 BMP 文件头中记录的像素数组偏移量，确定可被修改的像素区域，
//! 并在写入之前检查该区域能否容纳给定位宽下的秘密数据。

use crate::constants::{LENGTH_PREFIX_BYTES, MIN_HEADER_SIZE, PIXEL_OFFSET_FIELD};
use crate::error::{Result, StegoError};
use crate::width::BitWidth;

/// 宿主图像中的像素区域：`[offset, offset + len)`。
/// `[0, offset)` 为原样复制的文件头。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub offset: usize,
    pub len: usize,
}

impl PixelRegion {
    /// 像素区域结束位置 (即宿主文件长度)。
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// 从宿主图像字节中定位像素区域。
///
/// # Errors
///
/// 当文件短于 14 字节，或记录的偏移量超过文件长度时返回 `MalformedHost`。
pub fn locate(host: &[u8]) -> Result<PixelRegion> {
    if host.len() < MIN_HEADER_SIZE {
        return Err(StegoError::MalformedHost(format!(
            "file is {} bytes, a header needs at least {MIN_HEADER_SIZE}",
            host.len()
        )));
    }

    let mut field = [0u8; 4];
    field.copy_from_slice(&host[PIXEL_OFFSET_FIELD..MIN_HEADER_SIZE]);
    let offset = u32::from_le_bytes(field) as usize;

    if offset > host.len() {
        return Err(StegoError::MalformedHost(format!(
            "pixel array offset {offset} exceeds file size {}",
            host.len()
        )));
    }

    Ok(PixelRegion {
        offset,
        len: host.len() - offset,
    })
}

/// 检查 `pixel_len` 个像素字节能否以 `width` 位宽承载 `framed_len` 字节 (含长度前缀)。
///
/// 需要的像素字节数向上取整，因此恰好处在边界上时接受，多出一位即拒绝。
pub fn check_capacity(pixel_len: u64, framed_len: u64, width: BitWidth) -> Result<()> {
    let required_bits = framed_len.saturating_mul(8);
    let available_bits = pixel_len.saturating_mul(width.get() as u64);

    if required_bits > available_bits {
        return Err(StegoError::InsufficientCapacity {
            required_bits,
            available_bits,
        });
    }
    Ok(())
}

/// 在给定位宽下，像素区域最多能隐藏的秘密数据字节数 (不含长度前缀)。
pub fn max_payload_len(pixel_len: u64, width: BitWidth) -> u64 {
    (pixel_len.saturating_mul(width.get() as u64) / 8).saturating_sub(LENGTH_PREFIX_BYTES as u64)
}
