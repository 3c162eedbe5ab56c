//! # 错误类型模块
//!
//! 定义隐写核心 (定位、封帧、编解码、流水线) 可能返回的全部错误。

use std::io;
use thiserror::Error;

/// 隐写核心操作的结果类型别名。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 解码时数据流耗尽所处的阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 读取 4 字节长度前缀时。
    LengthPrefix,
    /// 读取秘密数据本体时。
    Payload,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthPrefix => write!(f, "length prefix"),
            Self::Payload => write!(f, "payload"),
        }
    }
}

/// 隐写过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum StegoError {
    /// 宿主图像头部过短，或像素偏移量超出文件大小。
    #[error("Malformed host image: {0}")]
    MalformedHost(String),

    /// 像素区域容纳不下带长度前缀的秘密数据。
    #[error(
        "Insufficient capacity: need {required_bits} bits, the pixel region offers {available_bits} bits"
    )]
    InsufficientCapacity {
        required_bits: u64,
        available_bits: u64,
    },

    /// 解码时像素字节在读完前缀或声明长度之前就已耗尽。
    #[error("Truncated stream while reading the {stage}: decoded {decoded} of {expected} bytes")]
    TruncatedStream {
        stage: Stage,
        decoded: u64,
        expected: u64,
    },

    /// 非法的调用参数 (例如位宽越界)。
    #[error("Usage error: {0}")]
    Usage(String),

    /// 底层文件读写失败。
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
