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

use bytes::Bytes;

/// A contiguous classified run produced by
/// [`AttributedText::split_by_attributes`](crate::AttributedText::split_by_attributes).
///
/// Plain cells are collapsed into a single `Text` segment. Each decorated cell yields an
/// `Attribute` segment immediately followed by a `Text` segment holding that cell's
/// single byte, or an empty `Text` segment when the cell is a marker. Markers carry no
/// byte, so unlike a zero-byte placeholder cell they never add a `\0` to the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<A> {
    /// Plain text bytes
    Text(Bytes),
    /// An attribute decorating the text segment that follows it
    Attribute(A),
}

impl<A> Segment<A> {
    /// Returns `true` if this segment holds an attribute.
    pub fn is_attribute(&self) -> bool {
        matches!(self, Segment::Attribute(_))
    }

    /// The attribute, if this is an attribute segment.
    pub fn attribute(&self) -> Option<&A> {
        match self {
            Segment::Attribute(attribute) => Some(attribute),
            Segment::Text(_) => None,
        }
    }

    /// The text bytes, if this is a text segment.
    pub fn text(&self) -> Option<&[u8]> {
        match self {
            Segment::Text(text) => Some(text),
            Segment::Attribute(_) => None,
        }
    }
}

impl<A: std::fmt::Display> std::fmt::Display for Segment<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Text(text) => f.write_str(&String::from_utf8_lossy(text)),
            Segment::Attribute(attribute) => attribute.fmt(f),
        }
    }
}
