// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Readable length-counted text encoding for lists and its byte framing.
// Author: Lukas Bower

//! Readable list encoding.
//!
//! A list renders as `<count><pre>` followed by `<len><pre><text><post>` for
//! each element, or `-1<pre><post>` for an absent element. Lengths count
//! characters, not bytes. The separator is only searched for while reading a
//! length field; element text is sliced by its declared length, so `pre` and
//! `post` may appear inside elements freely.
//!
//! The byte form renders the text with a single-character `pre` and no
//! `post`, then frames it like any other string. Only that outer frame
//! length counts bytes.

use chrono::{DateTime, Utc};
use log::debug;

use crate::cursor::Cursor;
use crate::enums::Ordinal;
use crate::error::CodecError;
use crate::frame::{decode_string_bounded, encode_str};

const NULL_ELEMENT: i64 = -1;

/// Element type with a canonical text form for the readable list encoding.
pub trait ListElement: Sized {
    /// Render the canonical text of `self`.
    fn to_text(&self) -> String;

    /// Parse canonical text back into a value.
    fn from_text(text: &str) -> Option<Self>;
}

macro_rules! impl_list_element_via_parse {
    ($($ty:ty),*) => {
        $(
            impl ListElement for $ty {
                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

// Float `Display` is the shortest text that parses back to the same value.
impl_list_element_via_parse!(bool, i8, i16, i32, i64, f32, f64, String);

/// Dates travel as epoch milliseconds.
impl ListElement for DateTime<Utc> {
    fn to_text(&self) -> String {
        self.timestamp_millis().to_string()
    }

    fn from_text(text: &str) -> Option<Self> {
        text.parse().ok().and_then(DateTime::from_timestamp_millis)
    }
}

/// Render a list of optional strings in the readable encoding.
///
/// `pre` must be non-empty; `post` defaults to the empty string.
///
/// ```
/// let text = flatwire::to_readable_string(&[Some("a"), Some("bb")], "|", None).unwrap();
/// assert_eq!(text, "2|1|a2|bb");
/// ```
pub fn to_readable_string<S: AsRef<str>>(
    list: &[Option<S>],
    pre: &str,
    post: Option<&str>,
) -> Result<String, CodecError> {
    check_pre(pre)?;
    let post = post.unwrap_or("");
    let mut out = String::new();
    out.push_str(&list.len().to_string());
    out.push_str(pre);
    for element in list {
        match element {
            Some(text) => {
                let text = text.as_ref();
                out.push_str(&text.chars().count().to_string());
                out.push_str(pre);
                out.push_str(text);
            }
            None => {
                out.push_str(&NULL_ELEMENT.to_string());
                out.push_str(pre);
            }
        }
        out.push_str(post);
    }
    Ok(out)
}

/// Parse text produced by [`to_readable_string`] with the same separators.
pub fn from_readable_string(
    text: &str,
    pre: &str,
    post: Option<&str>,
) -> Result<Vec<Option<String>>, CodecError> {
    let elements = parse_elements(text, pre, post.unwrap_or(""), usize::MAX)?;
    Ok(elements
        .into_iter()
        .map(|element| element.map(|(_, raw)| raw.to_owned()))
        .collect())
}

/// Render a typed list in the readable encoding.
pub fn typed_to_readable_string<T: ListElement>(
    list: &[Option<T>],
    pre: &str,
    post: Option<&str>,
) -> Result<String, CodecError> {
    to_readable_string(&to_texts(list), pre, post)
}

/// Parse a typed list rendered by [`typed_to_readable_string`].
pub fn typed_from_readable_string<T: ListElement>(
    text: &str,
    pre: &str,
    post: Option<&str>,
) -> Result<Vec<Option<T>>, CodecError> {
    let elements = parse_elements(text, pre, post.unwrap_or(""), usize::MAX)?;
    from_texts(elements)
}

/// Encode a list of optional strings as a string-framed readable text.
pub fn encode_list<S: AsRef<str>>(
    list: &[Option<S>],
    separator: char,
) -> Result<Vec<u8>, CodecError> {
    let mut buf = [0u8; 4];
    let text = to_readable_string(list, separator.encode_utf8(&mut buf), None)?;
    encode_str(Some(&text))
}

/// Decode a list written by [`encode_list`] with the same separator.
pub fn decode_list(
    cursor: &mut Cursor<'_>,
    separator: char,
) -> Result<Vec<Option<String>>, CodecError> {
    decode_list_bounded(cursor, separator, usize::MAX, usize::MAX)
}

/// Encode a typed list as a string-framed readable text.
pub fn encode_typed_list<T: ListElement>(
    list: &[Option<T>],
    separator: char,
) -> Result<Vec<u8>, CodecError> {
    encode_list(&to_texts(list), separator)
}

/// Decode a typed list written by [`encode_typed_list`].
pub fn decode_typed_list<T: ListElement>(
    cursor: &mut Cursor<'_>,
    separator: char,
) -> Result<Vec<Option<T>>, CodecError> {
    decode_typed_list_bounded(cursor, separator, usize::MAX, usize::MAX)
}

/// Encode a list of enum variants as their decimal ordinals.
pub fn encode_enum_list<E: Ordinal>(
    list: &[Option<E>],
    separator: char,
) -> Result<Vec<u8>, CodecError> {
    let ordinals = to_ordinals(list)?;
    encode_typed_list(&ordinals, separator)
}

/// Decode an enum list written by [`encode_enum_list`].
///
/// An ordinal without a variant fails with [`CodecError::UnknownVariant`] so
/// it cannot be confused with an absent element.
pub fn decode_enum_list<E: Ordinal>(
    cursor: &mut Cursor<'_>,
    separator: char,
) -> Result<Vec<Option<E>>, CodecError> {
    let ordinals = decode_typed_list::<i32>(cursor, separator)?;
    from_ordinals(ordinals)
}

pub(crate) fn decode_list_bounded(
    cursor: &mut Cursor<'_>,
    separator: char,
    max_frame: usize,
    max_len: usize,
) -> Result<Vec<Option<String>>, CodecError> {
    let Some(text) = decode_string_bounded(cursor, max_frame)? else {
        debug!("null list frame decoded as an empty list");
        return Ok(Vec::new());
    };
    let mut buf = [0u8; 4];
    let elements = parse_elements(&text, separator.encode_utf8(&mut buf), "", max_len)?;
    Ok(elements
        .into_iter()
        .map(|element| element.map(|(_, raw)| raw.to_owned()))
        .collect())
}

pub(crate) fn decode_typed_list_bounded<T: ListElement>(
    cursor: &mut Cursor<'_>,
    separator: char,
    max_frame: usize,
    max_len: usize,
) -> Result<Vec<Option<T>>, CodecError> {
    let Some(text) = decode_string_bounded(cursor, max_frame)? else {
        debug!("null list frame decoded as an empty list");
        return Ok(Vec::new());
    };
    let mut buf = [0u8; 4];
    let elements = parse_elements(&text, separator.encode_utf8(&mut buf), "", max_len)?;
    from_texts(elements)
}

pub(crate) fn to_ordinals<E: Ordinal>(list: &[Option<E>]) -> Result<Vec<Option<i32>>, CodecError> {
    list.iter()
        .map(|element| match element {
            Some(variant) => variant.ordinal().map(Some).ok_or(CodecError::UnlistedVariant),
            None => Ok(None),
        })
        .collect()
}

pub(crate) fn from_ordinals<E: Ordinal>(
    ordinals: Vec<Option<i32>>,
) -> Result<Vec<Option<E>>, CodecError> {
    ordinals
        .into_iter()
        .map(|element| {
            element
                .map(|ordinal| E::from_ordinal(ordinal).ok_or(CodecError::UnknownVariant(ordinal)))
                .transpose()
        })
        .collect()
}

fn to_texts<T: ListElement>(list: &[Option<T>]) -> Vec<Option<String>> {
    list.iter()
        .map(|element| element.as_ref().map(ListElement::to_text))
        .collect()
}

fn from_texts<T: ListElement>(
    elements: Vec<Option<(usize, &str)>>,
) -> Result<Vec<Option<T>>, CodecError> {
    elements
        .into_iter()
        .map(|element| {
            element
                .map(|(offset, raw)| {
                    T::from_text(raw)
                        .ok_or_else(|| CodecError::parse(offset, "element text does not parse"))
                })
                .transpose()
        })
        .collect()
}

fn check_pre(pre: &str) -> Result<(), CodecError> {
    if pre.is_empty() {
        return Err(CodecError::InvalidArgument("list separator cannot be empty"));
    }
    Ok(())
}

/// Split readable list text into elements tagged with the offset of their
/// length field.
fn parse_elements<'t>(
    text: &'t str,
    pre: &str,
    post: &str,
    max_len: usize,
) -> Result<Vec<Option<(usize, &'t str)>>, CodecError> {
    check_pre(pre)?;
    let (count, mut pos) = read_number(text, 0, pre, "element count is not an integer")?;
    let count =
        usize::try_from(count).map_err(|_| CodecError::parse(0, "negative element count"))?;
    if count > max_len {
        return Err(CodecError::ListTooLong {
            declared: count,
            max: max_len,
        });
    }

    // Every element takes at least one byte, so the text length caps the
    // allocation regardless of the declared count.
    let mut elements = Vec::with_capacity(count.min(text.len()));
    while elements.len() < count {
        let field = pos;
        let (len, next) = read_number(text, field, pre, "element length is not an integer")?;
        pos = next;
        if len == NULL_ELEMENT {
            elements.push(None);
        } else {
            let len = usize::try_from(len)
                .map_err(|_| CodecError::parse(field, "negative element length"))?;
            let element = take_chars(&text[pos..], len)
                .ok_or_else(|| CodecError::parse(field, "element runs past end of input"))?;
            pos += element.len();
            elements.push(Some((field, element)));
        }
        if !text[pos..].starts_with(post) {
            return Err(CodecError::parse(pos, "missing element terminator"));
        }
        pos += post.len();
    }
    if pos != text.len() {
        return Err(CodecError::parse(pos, "unexpected text after last element"));
    }
    Ok(elements)
}

/// Leading `count` characters of `text`, or `None` if it is shorter.
fn take_chars(text: &str, count: usize) -> Option<&str> {
    let end = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .nth(count)?;
    Some(&text[..end])
}

/// Parse the integer between `from` and the next `pre`, returning it with the
/// offset just past that separator.
fn read_number(
    text: &str,
    from: usize,
    pre: &str,
    reason: &'static str,
) -> Result<(i64, usize), CodecError> {
    let rest = &text[from..];
    let end = rest
        .find(pre)
        .ok_or_else(|| CodecError::parse(from, "missing separator"))?;
    let value = rest[..end]
        .parse()
        .map_err(|_| CodecError::parse(from, reason))?;
    Ok((value, from + end + pre.len()))
}
