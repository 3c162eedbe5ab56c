//! # 位打包编解码模块
//!
//! 将数据帧的比特流按给定位宽写入像素字节的低位，或从中读回。
//!
//! 编码与解码各自维护一个独立的模计数器：
//! * 编码端的 `secret_bit_offset` 以 8 为模，记录当前秘密字节已写出的位数；
//! * 解码端的 `encoded_byte_bit_offset` 以位宽为模，记录当前像素字节已读取的位数。
//!
//! 当位宽不能整除 8 (如 3、5、6、7) 时，一个像素字节会跨越两个秘密字节，
//! 反之亦然，因此两个计数器以不同速率前进，绝不能合并。

use crate::bits::{read_bit, write_bit};
use crate::constants::LENGTH_PREFIX_BYTES;
use crate::error::{Result, Stage, StegoError};
use crate::frame::{framed_len, unframe};
use crate::host::check_capacity;
use crate::width::BitWidth;
use log::{debug, trace};

/// 惰性编码器：每次迭代消耗一个像素字节并产出写入秘密比特后的新字节。
///
/// 数据帧的比特全部写完后迭代立即结束，不再从 `host` 中读取任何字节，
/// 调用方可继续从同一个迭代器中取出剩余的原始像素字节。
pub struct Embedder<H, F> {
    host: H,
    frame: F,
    current: Option<u8>,
    secret_bit_offset: u8,
    width: BitWidth,
    emitted: usize,
    bits_written: u64,
}

impl<H, F> Embedder<H, F>
where
    H: Iterator<Item = u8>,
    F: Iterator<Item = u8>,
{
    pub fn new<T>(host: H, frame: T, width: BitWidth) -> Self
    where
        T: IntoIterator<Item = u8, IntoIter = F>,
    {
        let mut frame = frame.into_iter();
        let current = frame.next();
        Self {
            host,
            frame,
            current,
            secret_bit_offset: 0,
            width,
            emitted: 0,
            bits_written: 0,
        }
    }

    /// 已产出 (即已修改) 的像素字节数。
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// 结束编码，返回被修改的像素字节数。
    ///
    /// # Errors
    ///
    /// 若像素字节先于数据帧耗尽，返回 `InsufficientCapacity`。
    /// 正常流程中容量已预先检查，出现该错误意味着不变量被破坏。
    pub fn finish(self) -> Result<usize> {
        if self.current.is_none() {
            return Ok(self.emitted);
        }

        let remaining_bits = (8 - self.secret_bit_offset) as u64 + self.frame.count() as u64 * 8;
        Err(StegoError::InsufficientCapacity {
            required_bits: self.bits_written + remaining_bits,
            available_bits: self.emitted as u64 * self.width.get() as u64,
        })
    }
}

impl<H, F> Iterator for Embedder<H, F>
where
    H: Iterator<Item = u8>,
    F: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let mut secret = self.current?;
        let mut byte = self.host.next()?;

        for index in 0..self.width.get() {
            byte = write_bit(byte, index, read_bit(secret, self.secret_bit_offset));
            self.bits_written += 1;
            self.secret_bit_offset += 1;

            if self.secret_bit_offset == 8 {
                self.secret_bit_offset = 0;
                self.current = self.frame.next();
                match self.current {
                    Some(next) => secret = next,
                    // 帧已写完，本字节剩余低位保持原样
                    None => break,
                }
            }
        }

        self.emitted += 1;
        Some(byte)
    }
}

/// 惰性解码器：每 8 个比特拼成一个输出字节，每个像素字节贡献 `width` 个比特。
pub struct Extractor<H> {
    host: H,
    current: Option<u8>,
    encoded_byte_bit_offset: u8,
    width: BitWidth,
    consumed: usize,
}

impl<H> Extractor<H>
where
    H: Iterator<Item = u8>,
{
    pub fn new(host: H, width: BitWidth) -> Self {
        Self {
            host,
            current: None,
            encoded_byte_bit_offset: 0,
            width,
            consumed: 0,
        }
    }

    /// 已读取 (全部或部分) 的像素字节数。
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// 组装下一个输出字节。像素字节在凑齐 8 位之前耗尽时返回 `None`。
    pub fn next_byte(&mut self) -> Option<u8> {
        let mut out = 0u8;

        for position in 0..8 {
            let byte = match self.current {
                Some(byte) => byte,
                None => {
                    let byte = self.host.next()?;
                    self.current = Some(byte);
                    self.consumed += 1;
                    byte
                }
            };

            out = write_bit(out, position, read_bit(byte, self.encoded_byte_bit_offset));
            self.encoded_byte_bit_offset += 1;

            if self.encoded_byte_bit_offset == self.width.get() {
                self.encoded_byte_bit_offset = 0;
                self.current = None;
            }
        }

        Some(out)
    }
}

impl<H> Iterator for Extractor<H>
where
    H: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.next_byte()
    }
}

/// 将数据帧按 `width` 位宽写入 `pixels`，返回产出的像素字节惰性序列。
///
/// 传入 `iter.by_ref()` 即可在编码结束后从 `iter` 中继续取出未被触碰的像素字节。
pub fn encode_stream<H, F>(pixels: H, frame: F, width: BitWidth) -> Embedder<H::IntoIter, F::IntoIter>
where
    H: IntoIterator<Item = u8>,
    F: IntoIterator<Item = u8>,
{
    Embedder::new(pixels.into_iter(), frame, width)
}

/// 从像素字节中解出长度前缀及其声明长度的秘密数据。
///
/// # Errors
///
/// * 像素字节不足以读出 4 字节前缀时返回 `TruncatedStream` (`Stage::LengthPrefix`)。
/// * 声明长度超出像素区域在该位宽下的容量，或读取中途耗尽时返回
///   `TruncatedStream` (`Stage::Payload`)。
pub fn decode_stream(pixels: &[u8], width: BitWidth) -> Result<Vec<u8>> {
    let mut extractor = Extractor::new(pixels.iter().copied(), width);

    let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
    for (decoded, slot) in prefix.iter_mut().enumerate() {
        *slot = extractor
            .next_byte()
            .ok_or(StegoError::TruncatedStream {
                stage: Stage::LengthPrefix,
                decoded: decoded as u64,
                expected: LENGTH_PREFIX_BYTES as u64,
            })?;
    }

    let declared = unframe(prefix) as u64;
    debug!("declared payload length: {declared} bytes");

    if check_capacity(pixels.len() as u64, framed_len(declared as usize), width).is_err() {
        return Err(StegoError::TruncatedStream {
            stage: Stage::Payload,
            decoded: 0,
            expected: declared,
        });
    }

    let mut payload = Vec::with_capacity(declared as usize);
    while (payload.len() as u64) < declared {
        match extractor.next_byte() {
            Some(byte) => payload.push(byte),
            None => {
                return Err(StegoError::TruncatedStream {
                    stage: Stage::Payload,
                    decoded: payload.len() as u64,
                    expected: declared,
                });
            }
        }
    }

    trace!("consumed {} pixel bytes while decoding", extractor.consumed());
    Ok(payload)
}
