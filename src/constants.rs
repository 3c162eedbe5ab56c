/// BMP 文件头中像素数组偏移量字段的起始位置 (字节)。
/// 该字段为小端序的 `u32`。
pub const PIXEL_OFFSET_FIELD: usize = 10;

/// 读取像素数组偏移量所需的最小文件头长度 (字节)。
pub const MIN_HEADER_SIZE: usize = PIXEL_OFFSET_FIELD + 4;

/// 隐写数据流开头的长度前缀所占字节数。
/// 长度以大端序 `u32` 存储，随后才是真正的秘密数据。
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// 每个像素字节允许使用的最小位数。
pub const MIN_BIT_WIDTH: u8 = 1;

/// 每个像素字节允许使用的最大位数。
pub const MAX_BIT_WIDTH: u8 = 8;
