// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Provide the flatwire value codec for persistence and messaging paths.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Flat byte and readable text encodings for primitive values.
//!
//! Each encoder returns an independent buffer; buffers are joined with
//! [`concat`] in write order and read back with one [`Cursor`] in the same
//! order. Nothing on the wire names a field's type, so the decode sequence
//! must mirror the encode sequence exactly.
//!
//! ```
//! use flatwire::{concat, decode_i32, decode_opt_i64, decode_string, encode_i32,
//!     encode_opt_i64, encode_str, Cursor};
//!
//! let a = encode_i32(5);
//! let b = encode_opt_i64(None);
//! let c = encode_str(Some("ab")).unwrap();
//! let message = concat([Some(&a[..]), Some(&b[..]), Some(&c[..])]);
//!
//! let mut cursor = Cursor::new(&message);
//! assert_eq!(decode_i32(&mut cursor).unwrap(), 5);
//! assert_eq!(decode_opt_i64(&mut cursor).unwrap(), None);
//! assert_eq!(decode_string(&mut cursor).unwrap().as_deref(), Some("ab"));
//! assert!(cursor.is_exhausted());
//! ```

mod codec;
mod concat;
mod config;
mod cursor;
mod enums;
mod error;
mod frame;
mod list;
mod numeric;
mod object;

pub use codec::Codec;
pub use concat::concat;
pub use config::{CodecConfig, DEFAULT_LIST_SEPARATOR, DEFAULT_MAX_FRAME_LEN, DEFAULT_MAX_LIST_LEN};
pub use cursor::Cursor;
pub use enums::{decode_enum, decode_enum_strict, encode_enum, Ordinal};
pub use error::{CodecError, ErrorKind};
pub use frame::{decode_bytes, decode_rest, decode_string, encode_bytes, encode_str};
pub use list::{
    decode_enum_list, decode_list, decode_typed_list, encode_enum_list, encode_list,
    encode_typed_list, from_readable_string, to_readable_string, typed_from_readable_string,
    typed_to_readable_string, ListElement,
};
pub use numeric::*;
pub use object::{
    decode_object, encode_object, object_from_text, object_to_text, JsonObjectCodec, ObjectCodec,
};
