//! # 位宽模块
//!
//! `BitWidth` 表示每个像素字节中被秘密数据占用的低位数量，取值范围 1..=8。

use crate::constants::{MAX_BIT_WIDTH, MIN_BIT_WIDTH};
use crate::error::StegoError;
use std::fmt;

/// 经过校验的位宽，保证位于 `[1, 8]` 区间内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitWidth(u8);

impl BitWidth {
    /// 所有合法位宽，从小到大。
    pub fn all() -> impl Iterator<Item = BitWidth> {
        (MIN_BIT_WIDTH..=MAX_BIT_WIDTH).map(BitWidth)
    }

    /// 根据像素区域长度和带前缀的秘密数据长度自动选择位宽。
    ///
    /// 结果为 `ceil(framed_len * 8 / pixel_len)`，并限制在 `[1, 8]` 内，
    /// 即能通过容量检查的最小位宽。若图像连 8 位都装不下，返回 8，
    /// 交由随后的容量检查报告错误。
    pub fn auto(pixel_len: u64, framed_len: u64) -> BitWidth {
        if pixel_len == 0 {
            return BitWidth(MAX_BIT_WIDTH);
        }
        let needed = (framed_len.saturating_mul(8)).div_ceil(pixel_len);
        let clamped = needed.clamp(MIN_BIT_WIDTH as u64, MAX_BIT_WIDTH as u64);
        BitWidth(clamped as u8)
    }

    /// 位宽的数值。
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&value) {
            Ok(BitWidth(value))
        } else {
            Err(StegoError::Usage(format!(
                "bit width must be between {MIN_BIT_WIDTH} and {MAX_BIT_WIDTH}, got {value}"
            )))
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::check_capacity;

    #[test]
    fn rejects_out_of_range_values() {
        assert!(BitWidth::try_from(0).is_err());
        assert!(BitWidth::try_from(9).is_err());
        assert_eq!(BitWidth::try_from(3).map(BitWidth::get).ok(), Some(3));
    }

    #[test]
    fn auto_rounds_up() {
        // 32 像素字节, 6 字节帧: 48 / 32 = 1.5 -> 2
        assert_eq!(BitWidth::auto(32, 6).get(), 2);
        // 足够大的图像只需 1 位
        assert_eq!(BitWidth::auto(10_000, 6).get(), 1);
        // 恰好整除时不额外进位
        assert_eq!(BitWidth::auto(48, 6).get(), 1);
        assert_eq!(BitWidth::auto(12, 6).get(), 4);
    }

    #[test]
    fn auto_saturates_at_eight() {
        assert_eq!(BitWidth::auto(1, 100).get(), 8);
        assert_eq!(BitWidth::auto(0, 4).get(), 8);
    }

    #[test]
    fn auto_width_always_passes_capacity_when_possible() {
        for pixel_len in 1..200u64 {
            for framed_len in 4..60u64 {
                let width = BitWidth::auto(pixel_len, framed_len);
                let fits_at_max = framed_len * 8 <= pixel_len * 8;
                if fits_at_max {
                    assert!(check_capacity(pixel_len, framed_len, width).is_ok());
                    // 更小的位宽必定不够
                    if width.get() > 1 {
                        let smaller = BitWidth::try_from(width.get() - 1).unwrap();
                        assert!(check_capacity(pixel_len, framed_len, smaller).is_err());
                    }
                }
            }
        }
    }
}
