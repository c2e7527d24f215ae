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
use crate::config::EscapeConfig;
use crate::stream::{EscapeStream, EscapedText};
use crate::{EscapeError, EscapeResult};
use tokio_util::bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, instrument};
use vtscan_attrtext::Cell;

/// Codec turning a byte stream into [`EscapedText`] chunks and back.
///
/// Decoding drains every available byte through an [`EscapeStream`] that retains
/// sequences split across reads, so `ESC [ 3` arriving in one read and `1 m` in the
/// next still yields a single attribute. At end of stream any incomplete sequence is
/// discarded.
///
/// Encoding writes each attribute's escape text followed by the byte of the cell it
/// decorates. For input made only of printable bytes, control bytes and recognized
/// sequences, decoding then encoding reproduces the original bytes.
#[derive(Debug)]
pub struct EscapeCodec {
    stream: EscapeStream,
}

impl EscapeCodec {
    /// Creates a codec that retains sequences split across reads.
    pub fn new() -> Self {
        Self::with_config(EscapeConfig::streaming())
    }

    /// Creates a codec with the given stream configuration.
    pub fn with_config(config: EscapeConfig) -> Self {
        EscapeCodec {
            stream: EscapeStream::with_config(config),
        }
    }

    /// Get a reference to the inner stream
    pub fn stream(&self) -> &EscapeStream {
        &self.stream
    }
}

impl Default for EscapeCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for EscapeCodec {
    type Item = EscapedText;
    type Error = EscapeError;

    #[instrument(skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> EscapeResult<Option<Self::Item>> {
        if src.is_empty() {
            return Ok(None);
        }
        self.stream.append(&src.split());
        let text = self.stream.flush();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> EscapeResult<Option<Self::Item>> {
        if let Some(text) = self.decode(src)? {
            return Ok(Some(text));
        }
        if !self.stream.is_empty() {
            debug!(
                length = self.stream.len(),
                "Discarding incomplete escape sequence at end of stream"
            );
            self.stream.clear();
        }
        Ok(None)
    }
}

impl Encoder<&EscapeAttribute> for EscapeCodec {
    type Error = EscapeError;

    fn encode(&mut self, item: &EscapeAttribute, dst: &mut BytesMut) -> EscapeResult<()> {
        item.encode(dst);
        Ok(())
    }
}

impl Encoder<&EscapedText> for EscapeCodec {
    type Error = EscapeError;

    fn encode(&mut self, item: &EscapedText, dst: &mut BytesMut) -> EscapeResult<()> {
        dst.reserve(item.len());
        for cell in item.cells() {
            match cell {
                Cell::Char { byte, attribute } => {
                    if let Some(attribute) = attribute {
                        attribute.encode(dst);
                    }
                    dst.put_u8(*byte);
                }
                Cell::Marker(attribute) => {
                    attribute.encode(dst);
                }
            }
        }
        Ok(())
    }
}
