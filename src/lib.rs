//! # bmp_steg 库
//!
//! 本库包含可变位宽 LSB 隐写工具的核心逻辑：
//! 单比特读写 (`bits`)、位宽 (`width`)、像素区域定位 (`host`)、
//! 长度前缀封帧 (`frame`)、位打包编解码 (`codec`) 以及串联它们的流水线 (`pipeline`)。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod frame;
pub mod handler;
pub mod host;
pub mod pipeline;
pub mod width;

pub use error::{Result, StegoError};
pub use width::BitWidth;
