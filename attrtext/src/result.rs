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

//! Error types for the attrtext crate.

/// Result type alias for operations that may fail with an [`AttrTextError`].
pub type AttrTextResult<T> = Result<T, AttrTextError>;

/// Errors raised by position based queries on an
/// [`AttributedText`](crate::AttributedText).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttrTextError {
    /// The requested position lies past the end of the text.
    #[error("Index {index} out of bounds for attributed text of length {len}")]
    IndexOutOfBounds {
        /// The requested position
        index: usize,
        /// The number of cells in the text
        len: usize,
    },

    /// The cell at the requested position carries no attribute.
    #[error("Cell at index {index} has no attribute")]
    NoAttribute {
        /// The requested position
        index: usize,
    },
}
