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

/// A single position in an [`AttributedText`](crate::AttributedText).
///
/// A cell is either a character byte, optionally decorated with one attribute, or a
/// marker. Markers stand in for directives that have no visible character of their
/// own (a line feed, a cursor movement): they always carry an attribute and render
/// as nothing in the plain-text conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell<A> {
    /// A character byte with an optional attribute.
    Char {
        /// The character value
        byte: u8,
        /// The attribute attached to this character, if any
        attribute: Option<A>,
    },
    /// An attribute with no visible character.
    Marker(A),
}

impl<A> Cell<A> {
    /// Creates an undecorated character cell.
    pub fn plain(byte: u8) -> Self {
        Cell::Char {
            byte,
            attribute: None,
        }
    }

    /// Creates a character cell carrying `attribute`.
    pub fn attributed(byte: u8, attribute: A) -> Self {
        Cell::Char {
            byte,
            attribute: Some(attribute),
        }
    }

    /// The character byte, or `None` for a marker.
    pub fn byte(&self) -> Option<u8> {
        match self {
            Cell::Char { byte, .. } => Some(*byte),
            Cell::Marker(_) => None,
        }
    }

    /// The attribute carried by this cell, if any.
    pub fn attribute(&self) -> Option<&A> {
        match self {
            Cell::Char { attribute, .. } => attribute.as_ref(),
            Cell::Marker(attribute) => Some(attribute),
        }
    }

    /// Returns `true` if an attribute is attached to this cell.
    pub fn has_attribute(&self) -> bool {
        self.attribute().is_some()
    }

    /// Returns `true` if this cell is a marker.
    pub fn is_marker(&self) -> bool {
        matches!(self, Cell::Marker(_))
    }

    /// Attaches `attribute` if the cell is an undecorated character.
    ///
    /// Returns the attribute back when the cell already carries one.
    pub(crate) fn try_attach(&mut self, attribute: A) -> Result<(), A> {
        match self {
            Cell::Char {
                attribute: slot @ None,
                ..
            } => {
                *slot = Some(attribute);
                Ok(())
            }
            _ => Err(attribute),
        }
    }
}
