// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Join independently encoded fields into one message buffer.
// Author: Lukas Bower

//! Null-tolerant buffer concatenation.

/// Concatenate buffers in order, treating `None` as an empty buffer.
///
/// ```
/// let joined = flatwire::concat([Some(&[1u8, 2][..]), None, Some(&[3u8][..])]);
/// assert_eq!(joined, vec![1, 2, 3]);
/// ```
pub fn concat<'a, I>(buffers: I) -> Vec<u8>
where
    I: IntoIterator<Item = Option<&'a [u8]>>,
    I::IntoIter: Clone,
{
    let buffers = buffers.into_iter();
    let total = buffers.clone().flatten().map(<[u8]>::len).sum();
    let mut out = Vec::with_capacity(total);
    for buffer in buffers.flatten() {
        out.extend_from_slice(buffer);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_contributes_nothing() {
        let a = [1u8, 2];
        let b = [3u8];
        let with_gap = concat([Some(&a[..]), None, Some(&b[..])]);
        let without_gap = concat([Some(&a[..]), Some(&b[..])]);
        assert_eq!(with_gap, vec![1, 2, 3]);
        assert_eq!(with_gap, without_gap);
    }

    #[test]
    fn empty_input_yields_empty_buffer() {
        assert!(concat(core::iter::empty::<Option<&[u8]>>()).is_empty());
        assert!(concat([None::<&[u8]>, None]).is_empty());
    }

    #[test]
    fn accepts_owned_field_buffers() {
        let fields = [vec![0u8, 0, 0, 5], vec![], vec![1]];
        let joined = concat(fields.iter().map(|f| Some(f.as_slice())));
        assert_eq!(joined, vec![0, 0, 0, 5, 1]);
    }
}
