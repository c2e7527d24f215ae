//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Helpers for showing raw bytes and for resolving backslash escapes.

/// Renders a byte for display, writing non-printable bytes as `\xNN`.
///
/// # Examples
///
/// ```
/// use vtscan_escapecodec::utility::printable_byte;
///
/// assert_eq!(printable_byte(b'a'), "a");
/// assert_eq!(printable_byte(0x1b), "\\x1b");
/// ```
pub fn printable_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        char::from(byte).to_string()
    } else {
        format!("\\x{:02x}", byte)
    }
}

/// Renders every byte of `bytes` with [`printable_byte`].
pub fn printable_bytes(bytes: &[u8]) -> String {
    bytes.iter().copied().map(printable_byte).collect()
}

/// Resolves C-style backslash escapes into the bytes they denote.
///
/// Supports `\a \b \f \n \r \t \v \' \" \? \\`, `\xHH` with exactly two hex digits and
/// `\0oo` with exactly two octal digits. An unrecognized escape, or a numeric escape
/// whose digits are invalid, is dropped. An escape cut off by the end of input ends
/// processing.
///
/// # Examples
///
/// ```
/// use vtscan_escapecodec::utility::unescape;
///
/// assert_eq!(unescape(r"\x1b[1mhi\n"), b"\x1b[1mhi\n");
/// ```
pub fn unescape(str: &str) -> Vec<u8> {
    let bytes = str.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            result.push(bytes[i]);
            i += 1;
            continue;
        }

        let Some(&kind) = bytes.get(i + 1) else {
            break;
        };
        i += 2;

        let simple = match kind {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0B),
            b'\'' | b'"' | b'?' | b'\\' => Some(kind),
            _ => None,
        };
        if let Some(byte) = simple {
            result.push(byte);
            continue;
        }

        let radix = match kind {
            b'x' => 16,
            b'0' => 8,
            _ => continue,
        };
        let Some(digits) = bytes.get(i..i + 2) else {
            break;
        };
        i += 2;
        if let Some(byte) = std::str::from_utf8(digits)
            .ok()
            .and_then(|digits| u8::from_str_radix(digits, radix).ok())
        {
            result.push(byte);
        }
    }

    result
}
