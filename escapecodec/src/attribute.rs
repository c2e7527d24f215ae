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

use crate::consts::{CSI_INTRODUCER, CUSTOM_LEAD, ESC, PARAMETER_SEPARATOR, PRIVATE_MODE_LEAD};
use crate::scanner::scan;
use crate::utility::printable_bytes;
use crate::EscapeError;
use bytes::{BufMut, Bytes};
use vtscan_attrtext::Cell;

/// The parsed form of one control byte or escape sequence.
///
/// `escape` holds the exact bytes of the sequence (`"\x1b[3;4H"`, `"\n"`), including
/// any non-UTF-8 payload of the custom form, and `param1`/`param2` hold its numeric arguments, defaulting to `0` when the form
/// carries none.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct EscapeAttribute {
    /// The raw bytes of the escape
    pub escape: Bytes,
    /// First numeric argument
    pub param1: u32,
    /// Second numeric argument
    pub param2: u32,
}

impl EscapeAttribute {
    /// Creates an attribute without numeric arguments.
    pub fn new<B: Into<Bytes>>(escape: B) -> Self {
        EscapeAttribute {
            escape: escape.into(),
            param1: 0,
            param2: 0,
        }
    }

    /// Creates an attribute with both numeric arguments.
    pub fn with_params<B: Into<Bytes>>(escape: B, param1: u32, param2: u32) -> Self {
        EscapeAttribute {
            escape: escape.into(),
            param1,
            param2,
        }
    }

    /// Creates the attribute for a single control byte.
    pub fn control(byte: u8) -> Self {
        EscapeAttribute::new(Bytes::copy_from_slice(&[byte]))
    }

    /// Classifies the attribute by the shape of its escape text.
    pub fn kind(&self) -> EscapeKind {
        match &self.escape[..] {
            [] => EscapeKind::Unknown,
            [byte] if *byte != ESC => EscapeKind::Control,
            [ESC, CSI_INTRODUCER, body @ ..] => match body {
                [CUSTOM_LEAD, ..] => EscapeKind::Custom,
                [PRIVATE_MODE_LEAD, ..] => EscapeKind::PrivateMode,
                [_] => EscapeKind::Simple,
                _ if body.contains(&PARAMETER_SEPARATOR) => EscapeKind::DualParameter,
                [first, ..] if first.is_ascii_digit() => EscapeKind::SingleParameter,
                _ => EscapeKind::Unknown,
            },
            _ => EscapeKind::Unknown,
        }
    }

    /// The last byte of the escape text.
    pub fn final_byte(&self) -> Option<u8> {
        self.escape.last().copied()
    }

    /// Returns `true` for a Select Graphic Rendition sequence (`ESC [ ... m`).
    pub fn is_sgr(&self) -> bool {
        matches!(
            self.kind(),
            EscapeKind::Simple | EscapeKind::SingleParameter | EscapeKind::DualParameter
        ) && self.final_byte() == Some(b'm')
    }

    /// Writes the escape text to `dst`, returning the number of bytes written.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> usize {
        dst.put_slice(&self.escape);
        self.escape.len()
    }
}

impl std::str::FromStr for EscapeAttribute {
    type Err = EscapeError;

    /// Parses text holding exactly one control byte or recognized escape sequence.
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let report = scan(str.as_bytes());
        let mut cells = report.text.cells();
        match (cells.next(), cells.next(), report.truncated_at) {
            (Some(Cell::Marker(attribute)), None, None) => Ok(attribute.clone()),
            _ => Err(EscapeError::InvalidEscape {
                escape: printable_bytes(str.as_bytes()),
            }),
        }
    }
}

impl std::fmt::Display for EscapeAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            printable_bytes(&self.escape),
            self.param1,
            self.param2
        )
    }
}

/// The recognized shapes of an [`EscapeAttribute`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EscapeKind {
    /// A single control byte (`\n`, `\t`, BEL, ...)
    Control,
    /// `ESC [ <final>`
    Simple,
    /// `ESC [ i @ <payload> @`
    Custom,
    /// `ESC [ ? <n> <l|h>`
    PrivateMode,
    /// `ESC [ <n> <final>`
    SingleParameter,
    /// `ESC [ <n> ; <m> <final>`
    DualParameter,
    /// Anything else, including the empty default attribute
    Unknown,
}
