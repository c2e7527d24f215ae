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

//! Error types for the escapecodec crate.
//!
//! Scanning itself never fails: malformed input degrades to dropped bytes. Errors are
//! reserved for I/O surfaced through the codec and for strict attribute construction.

/// Result type alias for operations that may fail with an [`EscapeError`].
pub type EscapeResult<T> = Result<T, EscapeError>;

/// Errors that can occur when working with escape streams.
#[derive(Debug, thiserror::Error)]
pub enum EscapeError {
    /// IO Error
    #[error("IOError {0}")]
    IoError(#[from] std::io::Error),

    /// Text that does not form exactly one recognized escape sequence.
    ///
    /// Returned when parsing an [`EscapeAttribute`](crate::EscapeAttribute) from a string.
    #[error("Invalid escape sequence '{escape}'")]
    InvalidEscape {
        /// Printable form of the rejected text
        escape: String,
    },
}
