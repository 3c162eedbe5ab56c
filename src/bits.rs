//! 单个比特的读写。位索引 0 表示最低有效位。

/// 返回 `byte` 第 `index` 位 (0..=7) 的值。
#[inline]
pub fn read_bit(byte: u8, index: u8) -> bool {
    byte & (1 << index) != 0
}

/// 返回将 `byte` 第 `index` 位设置为 `value` 后的新字节，其余位保持不变。
#[inline]
pub fn write_bit(byte: u8, index: u8, value: bool) -> u8 {
    let cleared = byte & !(1 << index);
    if value { cleared | (1 << index) } else { cleared }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_bit_is_lsb_first() {
        assert!(read_bit(0b0000_0001, 0));
        assert!(!read_bit(0b0000_0001, 1));
        assert!(read_bit(0b1000_0000, 7));
    }

    #[test]
    fn write_then_read_every_byte_and_index() {
        for byte in 0..=u8::MAX {
            for index in 0..8 {
                for value in [false, true] {
                    let written = write_bit(byte, index, value);
                    assert_eq!(read_bit(written, index), value);
                    // 其余位不受影响
                    let mask = !(1u8 << index);
                    assert_eq!(written & mask, byte & mask);
                }
            }
        }
    }
}
