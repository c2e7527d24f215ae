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

use crate::attribute::EscapeAttribute;
use crate::config::{EscapeConfig, TruncatedSequence};
use crate::scanner::scan;
use bytes::{Buf, BufMut, BytesMut};
use tracing::{instrument, trace, warn};
use vtscan_attrtext::AttributedText;

/// Attributed text produced by scanning escape sequences.
pub type EscapedText = AttributedText<EscapeAttribute>;

/// An accumulation buffer that is drained into [`EscapedText`].
///
/// Producers append raw bytes as they arrive; [`flush`](Self::flush) performs a single
/// forward pass over everything buffered and returns the parsed text. Printable bytes
/// become plain cells. Control bytes and recognized escape sequences become marker
/// cells carrying an [`EscapeAttribute`].
///
/// Parsing never fails. Unrecognized sequences are skipped and the scan resumes after
/// them. How a sequence cut off by the end of the buffer is handled depends on
/// [`EscapeConfig::truncated`]: by default it is discarded together with the rest of
/// the buffer.
///
/// # Examples
///
/// ```
/// use vtscan_escapecodec::{EscapeAttribute, EscapeStream, Segment};
///
/// let mut stream = EscapeStream::new();
/// stream.append(b"\x1b[1;31mred");
///
/// let text = stream.flush();
/// assert!(stream.is_empty());
/// assert_eq!(text.to_plain_string(), "red");
/// assert_eq!(
///     text.attribute_at(0).unwrap(),
///     &EscapeAttribute::with_params("\x1b[1;31m", 1, 31)
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct EscapeStream {
    config: EscapeConfig,
    buffer: BytesMut,
}

impl EscapeStream {
    /// Creates an empty stream that discards truncated sequences.
    pub fn new() -> Self {
        Self::with_config(EscapeConfig::default())
    }

    /// Creates an empty stream with the given configuration.
    pub fn with_config(config: EscapeConfig) -> Self {
        EscapeStream {
            config,
            buffer: BytesMut::new(),
        }
    }

    /// Scans `bytes` in one call, with default configuration.
    pub fn scan(bytes: &[u8]) -> EscapedText {
        let mut stream = EscapeStream::new();
        stream.append(bytes);
        stream.flush()
    }

    /// The active configuration.
    pub fn config(&self) -> &EscapeConfig {
        &self.config
    }

    /// Appends raw bytes to the buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Appends a single raw byte to the buffer.
    pub fn push(&mut self, byte: u8) {
        self.buffer.put_u8(byte);
    }

    /// The bytes awaiting the next flush.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of bytes awaiting the next flush.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops everything buffered, including a retained partial sequence.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Parses the buffered bytes and resets the buffer.
    ///
    /// The result is fully built before the buffer is touched. Afterwards the buffer is
    /// empty, unless the configuration retains a truncated trailing sequence, in which
    /// case only that sequence remains.
    #[instrument(skip_all, fields(buffered = self.buffer.len()))]
    pub fn flush(&mut self) -> EscapedText {
        let report = scan(&self.buffer);

        match (report.truncated_at, self.config.truncated) {
            (Some(offset), TruncatedSequence::Retain) => {
                let tail = self.buffer.len() - offset;
                if tail > self.config.max_sequence_length {
                    warn!(
                        length = tail,
                        max = self.config.max_sequence_length,
                        "Discarding over-long incomplete escape sequence"
                    );
                    self.buffer.clear();
                } else {
                    trace!(length = tail, "Retaining incomplete escape sequence");
                    self.buffer.advance(offset);
                }
            }
            (Some(offset), TruncatedSequence::Discard) => {
                trace!(
                    length = self.buffer.len() - offset,
                    "Discarding incomplete escape sequence"
                );
                self.buffer.clear();
            }
            (None, _) => self.buffer.clear(),
        }

        report.text
    }
}

impl std::fmt::Write for EscapeStream {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.append(s.as_bytes());
        Ok(())
    }
}

impl Extend<u8> for EscapeStream {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.buffer.extend(iter);
    }
}
