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

use crate::consts::MAX_SEQUENCE_LENGTH;

/// Scanner configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscapeConfig {
    /// What a flush does with an escape sequence cut off by the end of the buffer
    pub truncated: TruncatedSequence,
    /// Longest incomplete sequence that may be retained between flushes
    pub max_sequence_length: usize,
}

impl EscapeConfig {
    /// Drop any incomplete trailing sequence on every flush.
    pub fn discarding() -> EscapeConfig {
        EscapeConfig {
            truncated: TruncatedSequence::Discard,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Keep an incomplete trailing sequence buffered for the next flush.
    pub fn streaming() -> EscapeConfig {
        EscapeConfig {
            truncated: TruncatedSequence::Retain,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Set the handling of truncated sequences
    pub fn with_truncated(mut self, truncated: TruncatedSequence) -> Self {
        self.truncated = truncated;
        self
    }

    /// Set the longest incomplete sequence that may be retained
    pub fn with_max_sequence_length(mut self, max: usize) -> Self {
        self.max_sequence_length = max;
        self
    }
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self::discarding()
    }
}

/// Handling of an escape sequence that is still incomplete when the buffer ends.
///
/// A buffer of `b"red \x1b[3"` ends in the middle of a sequence. With `Discard` the
/// bytes `\x1b[3` are lost when the flush clears the buffer; with `Retain` they stay
/// buffered and are scanned again, together with whatever arrives next, on the
/// following flush.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TruncatedSequence {
    /// Drop the incomplete tail; the buffer is always empty after a flush.
    #[default]
    Discard,
    /// Keep the incomplete tail for the next flush.
    Retain,
}
