//! 长度前缀封帧：`[长度: 4 字节大端序][秘密数据]`。

use crate::constants::LENGTH_PREFIX_BYTES;
use crate::error::{Result, StegoError};

/// 将秘密数据长度编码为 4 字节大端序前缀。
pub fn frame(payload_len: u32) -> [u8; LENGTH_PREFIX_BYTES] {
    payload_len.to_be_bytes()
}

/// `frame` 的逆操作。
pub fn unframe(prefix: [u8; LENGTH_PREFIX_BYTES]) -> u32 {
    u32::from_be_bytes(prefix)
}

/// 带前缀后的总字节数。
pub fn framed_len(payload_len: usize) -> u64 {
    payload_len as u64 + LENGTH_PREFIX_BYTES as u64
}

/// 惰性地产出完整数据帧的字节，不在内存或磁盘上拼接副本。
///
/// # Errors
///
/// 秘密数据超过 `u32::MAX` 字节时无法编码长度，返回 `InsufficientCapacity`。
pub fn framed(payload: &[u8]) -> Result<impl Iterator<Item = u8> + '_> {
    let len = u32::try_from(payload.len()).map_err(|_| StegoError::InsufficientCapacity {
        required_bits: framed_len(payload.len()).saturating_mul(8),
        available_bits: framed_len(u32::MAX as usize).saturating_mul(8),
    })?;
    Ok(frame(len).into_iter().chain(payload.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn prefix_is_big_endian() {
        assert_eq!(frame(2), [0, 0, 0, 2]);
        assert_eq!(frame(0x0102_0304), [1, 2, 3, 4]);
    }

    #[test]
    fn unframe_inverts_frame() {
        for n in [0, 1, 255, 256, 65_535, u32::MAX - 1, u32::MAX] {
            assert_eq!(unframe(frame(n)), n);
        }
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let n: u32 = rng.random();
            assert_eq!(unframe(frame(n)), n);
        }
    }

    #[test]
    fn framed_prepends_length() {
        let bytes: Vec<u8> = framed(b"hi").unwrap().collect();
        assert_eq!(bytes, vec![0, 0, 0, 2, b'h', b'i']);
        assert_eq!(framed_len(2), 6);
    }

    #[test]
    fn empty_payload_is_prefix_only() {
        let bytes: Vec<u8> = framed(&[]).unwrap().collect();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
    }
}
