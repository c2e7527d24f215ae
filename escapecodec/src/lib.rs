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

//! Scans terminal control and escape sequences out of a raw byte stream.
//!
//! Bytes are accumulated in an [`EscapeStream`] and flushed into an
//! [`AttributedText`] whose marker cells carry an [`EscapeAttribute`] for every
//! control byte or recognized `ESC [` sequence. [`EscapeCodec`] adapts the stream to
//! `tokio_util`'s codec traits for framed I/O.

mod attribute;
mod codec;
mod config;
mod consts;
mod result;
mod scanner;
mod stream;
pub mod utility;

pub use self::attribute::{EscapeAttribute, EscapeKind};
pub use self::codec::EscapeCodec;
pub use self::config::{EscapeConfig, TruncatedSequence};
pub use self::consts::MAX_SEQUENCE_LENGTH;
pub use self::result::{EscapeError, EscapeResult};
pub use self::stream::{EscapeStream, EscapedText};
pub use vtscan_attrtext::{AttrTextError, AttrTextResult, AttributedText, Cell, Segment};
