/// Bounds-checked little-endian cursor over raw account bytes.
///
/// Every read checks the remaining length first and fails with
/// `MalformedAccountData` instead of slicing out of bounds.
use crate::errors::{SwapError, SwapResult};
use solana_sdk::pubkey::Pubkey;

pub struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
    /// Account label used in error messages
    label: &'a str,
}

impl<'a> AccountReader<'a> {
    pub fn new(data: &'a [u8], label: &'a str) -> Self {
        Self {
            data,
            offset: 0,
            label,
        }
    }

    /// Fails unless the buffer holds at least `len` bytes in total
    pub fn require_len(&self, len: usize) -> SwapResult<()> {
        if self.data.len() < len {
            return Err(SwapError::malformed(
                self.label,
                format!("expected at least {} bytes, got {}", len, self.data.len()),
            ));
        }
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn take(&mut self, len: usize, what: &str) -> SwapResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(SwapError::malformed(
                self.label,
                format!(
                    "insufficient data for {} at offset {} ({} bytes left)",
                    what,
                    self.offset,
                    self.remaining()
                ),
            ));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Skip a reserved / padding region
    pub fn skip(&mut self, len: usize) -> SwapResult<()> {
        self.take(len, "padding").map(|_| ())
    }

    pub fn read_u8(&mut self) -> SwapResult<u8> {
        Ok(self.take(1, "u8")?[0])
    }

    pub fn read_u64(&mut self) -> SwapResult<u64> {
        let bytes = self.take(8, "u64")?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_u128(&mut self) -> SwapResult<u128> {
        let bytes = self.take(16, "u128")?;
        let mut buf = [0u8; 16];
        buf.copy_from_slice(bytes);
        Ok(u128::from_le_bytes(buf))
    }

    pub fn read_pubkey(&mut self) -> SwapResult<Pubkey> {
        let bytes = self.take(32, "pubkey")?;
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        Ok(Pubkey::new_from_array(buf))
    }

    pub fn read_bytes<const N: usize>(&mut self) -> SwapResult<[u8; N]> {
        let bytes = self.take(N, "byte array")?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }
}
