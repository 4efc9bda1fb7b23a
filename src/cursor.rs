// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Provide the forward-only read cursor threaded through flatwire decoders.
// Author: Lukas Bower

//! Forward-only read position over a borrowed byte buffer.
//!
//! Every decoder takes `&mut Cursor` and advances it past the field it
//! consumed, so several values written back-to-back can be read in order with
//! one cursor. A failed read leaves the position unchanged.

use crate::error::CodecError;

/// Read position into a caller-owned buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the current offset and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether every byte of the buffer has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Skip `n` bytes.
    pub fn advance(&mut self, n: usize) -> Result<(), CodecError> {
        self.take(n).map(|_| ())
    }

    /// Borrow the next `n` bytes and move past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(CodecError::Truncated {
                needed: n,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }

    /// Read a fixed-width field into an array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Borrow everything from the current offset to the end and move to the end.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let start = self.pos;
        self.pos = self.buf.len();
        &self.buf[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_advances_and_reports_remaining() {
        let data = [1u8, 2, 3, 4, 5];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.take(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.take_array::<2>().unwrap(), [3, 4]);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn overlong_read_fails_without_moving() {
        let data = [9u8, 8, 7];
        let mut cursor = Cursor::new(&data);
        cursor.advance(1).unwrap();
        assert_eq!(
            cursor.take(4),
            Err(CodecError::Truncated {
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.advance(3).unwrap_err().kind(), crate::ErrorKind::Truncated);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn take_rest_consumes_tail() {
        let data = [1u8, 2, 3];
        let mut cursor = Cursor::new(&data);
        cursor.advance(1).unwrap();
        assert_eq!(cursor.take_rest(), &[2, 3]);
        assert!(cursor.is_exhausted());
        assert!(cursor.take_rest().is_empty());
        assert_eq!(cursor.position(), 3);
    }
}
