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

use crate::{AttrTextError, AttrTextResult, Cell, Segment};
use bytes::{Bytes, BytesMut};
use std::ops::Range;
use tracing::{debug, trace};

/// Iterator over the cells of an [`AttributedText`].
pub type Cells<'a, A> = std::slice::Iter<'a, Cell<A>>;

/// Text whose characters may each carry an attribute of type `A`.
///
/// `AttributedText` is an ordered sequence of [`Cell`]s. Insertion order is significant
/// and preserved by every operation. Cells are only ever appended; the single exception
/// is the attribute queue, which decorates the next appended character in place.
///
/// # Attribute Queue
///
/// An attribute can be queued with [`queue_attribute`](Self::queue_attribute) before the
/// character it belongs to has arrived. The next call to [`append`](Self::append) (or
/// any of its variants) offers the queued attribute to the *first* appended cell. The
/// queue is cleared only when the attribute is actually attached; an empty append, or
/// one whose first cell is already decorated, leaves it pending.
///
/// ```rust
/// use vtscan_attrtext::{AttributedText, Segment};
///
/// let mut text = AttributedText::from("hi");
/// text.queue_attribute(5);
/// text.append(b"5");
///
/// let segments = text.split_by_attributes();
/// assert_eq!(segments[0], Segment::Text("hi".into()));
/// assert_eq!(segments[1], Segment::Attribute(5));
/// assert_eq!(segments[2], Segment::Text("5".into()));
/// ```
///
/// # Plain Text
///
/// The plain-text rendering ([`to_plain_bytes`](Self::to_plain_bytes) and `Display`)
/// keeps every character byte in order and skips marker cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributedText<A> {
    cells: Vec<Cell<A>>,
    pending: Option<A>,
}

impl<A> AttributedText<A> {
    /// Creates an empty text with no pending attribute.
    pub fn new() -> Self {
        AttributedText {
            cells: Vec::new(),
            pending: None,
        }
    }

    /// Creates an empty text with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        AttributedText {
            cells: Vec::with_capacity(capacity),
            pending: None,
        }
    }

    /// Number of cells, markers included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the text holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Removes every cell and drops any pending attribute.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.pending = None;
    }

    /// Appends a single plain character, offering it the queued attribute.
    pub fn push(&mut self, byte: u8) {
        self.append(&[byte]);
    }

    /// Appends a run of plain characters.
    ///
    /// If an attribute is queued it is attached to the first appended cell. An empty
    /// run leaves the queue untouched.
    pub fn append(&mut self, bytes: &[u8]) {
        let start = self.cells.len();
        self.cells.extend(bytes.iter().copied().map(Cell::plain));
        self.apply_queue(start);
    }

    /// Appends the bytes of `str` as plain characters.
    pub fn append_str(&mut self, str: &str) {
        self.append(str.as_bytes());
    }

    /// Appends a character carrying `attribute`, bypassing the queue.
    pub fn push_with_attribute(&mut self, byte: u8, attribute: A) {
        self.cells.push(Cell::attributed(byte, attribute));
    }

    /// Appends a marker cell carrying `attribute`.
    ///
    /// Markers never receive a queued attribute and leave the queue untouched.
    pub fn push_marker(&mut self, attribute: A) {
        self.cells.push(Cell::Marker(attribute));
    }

    /// Sets the pending attribute for the next appended character.
    ///
    /// The queue holds at most one attribute. A previously queued attribute that has
    /// not yet been attached is replaced and handed back to the caller.
    pub fn queue_attribute(&mut self, attribute: A) -> Option<A> {
        let displaced = self.pending.replace(attribute);
        if displaced.is_some() {
            debug!("Queued attribute replaced before it was attached");
        }
        displaced
    }

    /// The attribute waiting for the next appended character, if any.
    pub fn pending_attribute(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    /// Removes and returns the pending attribute.
    pub fn take_pending_attribute(&mut self) -> Option<A> {
        self.pending.take()
    }

    /// Returns the attribute of the cell at `index`.
    ///
    /// Fails with [`AttrTextError::IndexOutOfBounds`] past the end of the text and with
    /// [`AttrTextError::NoAttribute`] when the cell is undecorated.
    pub fn attribute_at(&self, index: usize) -> AttrTextResult<&A> {
        let cell = self.cells.get(index).ok_or(AttrTextError::IndexOutOfBounds {
            index,
            len: self.cells.len(),
        })?;
        cell.attribute().ok_or(AttrTextError::NoAttribute { index })
    }

    /// The cell at `index`.
    pub fn cell(&self, index: usize) -> Option<&Cell<A>> {
        self.cells.get(index)
    }

    /// Iterates over the cells in order.
    pub fn cells(&self) -> Cells<'_, A> {
        self.cells.iter()
    }

    /// The character byte at `index`; `None` past the end or for a marker.
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.cells.get(index).and_then(Cell::byte)
    }

    /// Position of the first character cell holding `byte`.
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        self.cells.iter().position(|cell| cell.byte() == Some(byte))
    }

    /// Position of the last character cell holding `byte`.
    pub fn rfind_byte(&self, byte: u8) -> Option<usize> {
        self.cells.iter().rposition(|cell| cell.byte() == Some(byte))
    }

    /// The plain-text rendering: every character byte in order, markers skipped.
    pub fn to_plain_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.cells.len());
        buf.extend(self.cells.iter().filter_map(Cell::byte));
        buf.freeze()
    }

    /// The plain-text rendering as a string, replacing invalid UTF-8.
    pub fn to_plain_string(&self) -> String {
        String::from_utf8_lossy(&self.to_plain_bytes()).into_owned()
    }

    fn apply_queue(&mut self, start: usize) {
        let Some(attribute) = self.pending.take() else {
            return;
        };
        match self.cells.get_mut(start) {
            Some(cell) => match cell.try_attach(attribute) {
                Ok(()) => trace!(index = start, "Attached queued attribute"),
                Err(attribute) => self.pending = Some(attribute),
            },
            None => self.pending = Some(attribute),
        }
    }
}

impl<A: Clone> AttributedText<A> {
    /// Appends the cells of `other`, offering the queued attribute to the first of them.
    pub fn append_text(&mut self, other: &AttributedText<A>) {
        let start = self.cells.len();
        self.cells.extend_from_slice(&other.cells);
        self.apply_queue(start);
    }

    /// Copies the cells in `range` into a new text with an empty queue.
    pub fn slice(&self, range: Range<usize>) -> AttrTextResult<AttributedText<A>> {
        let len = self.cells.len();
        let cells = self
            .cells
            .get(range.clone())
            .ok_or(AttrTextError::IndexOutOfBounds {
                index: range.end.max(range.start),
                len,
            })?;
        Ok(AttributedText {
            cells: cells.to_vec(),
            pending: None,
        })
    }

    /// Decomposes the text into alternating plain-text and attribute segments.
    ///
    /// Consecutive undecorated cells are collapsed into one [`Segment::Text`]. A
    /// decorated cell flushes the pending run, then yields [`Segment::Attribute`]
    /// followed by a `Text` segment holding its byte (empty for a marker). Concatenating
    /// every text segment in order reproduces [`to_plain_bytes`](Self::to_plain_bytes).
    pub fn split_by_attributes(&self) -> Vec<Segment<A>> {
        let mut segments = Vec::new();
        let mut run = BytesMut::new();

        for cell in &self.cells {
            match cell {
                Cell::Char {
                    byte,
                    attribute: None,
                } => run.extend_from_slice(&[*byte]),
                Cell::Char {
                    byte,
                    attribute: Some(attribute),
                } => {
                    if !run.is_empty() {
                        segments.push(Segment::Text(run.split().freeze()));
                    }
                    segments.push(Segment::Attribute(attribute.clone()));
                    segments.push(Segment::Text(Bytes::copy_from_slice(&[*byte])));
                }
                Cell::Marker(attribute) => {
                    if !run.is_empty() {
                        segments.push(Segment::Text(run.split().freeze()));
                    }
                    segments.push(Segment::Attribute(attribute.clone()));
                    segments.push(Segment::Text(Bytes::new()));
                }
            }
        }

        if !run.is_empty() {
            segments.push(Segment::Text(run.freeze()));
        }

        segments
    }
}

impl<A: std::fmt::Display> AttributedText<A> {
    /// Lists every cell with its attribute, for diagnostics.
    ///
    /// Characters are quoted (`'h'`), markers are shown as `<marker>`, and attributes
    /// follow their cell in parentheses.
    pub fn to_debug_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let mut part = match cell.byte() {
                Some(byte) => format!("{:?}", byte as char),
                None => String::from("<marker>"),
            };
            if let Some(attribute) = cell.attribute() {
                part.push_str(&format!(" ({})", attribute));
            }
            parts.push(part);
        }
        parts.join(" ")
    }
}

impl<A> Default for AttributedText<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> From<&[u8]> for AttributedText<A> {
    fn from(bytes: &[u8]) -> Self {
        let mut text = AttributedText::with_capacity(bytes.len());
        text.append(bytes);
        text
    }
}

impl<A> From<&str> for AttributedText<A> {
    fn from(str: &str) -> Self {
        AttributedText::from(str.as_bytes())
    }
}

impl<A> FromIterator<Cell<A>> for AttributedText<A> {
    fn from_iter<I: IntoIterator<Item = Cell<A>>>(iter: I) -> Self {
        AttributedText {
            cells: iter.into_iter().collect(),
            pending: None,
        }
    }
}

impl<A> Extend<u8> for AttributedText<A> {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let start = self.cells.len();
        self.cells.extend(iter.into_iter().map(Cell::plain));
        self.apply_queue(start);
    }
}

impl<'a, A> IntoIterator for &'a AttributedText<A> {
    type Item = &'a Cell<A>;
    type IntoIter = Cells<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl<A> std::fmt::Display for AttributedText<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_segment(str: &str) -> Segment<i32> {
        Segment::Text(Bytes::copy_from_slice(str.as_bytes()))
    }

    // ============================================================================
    // Append Tests
    // ============================================================================

    #[test]
    fn test_empty() {
        let text: AttributedText<i32> = AttributedText::new();
        assert!(text.is_empty());
        assert_eq!(text.len(), 0);
        assert!(text.split_by_attributes().is_empty());
        assert_eq!(text.to_plain_string(), "");
    }

    #[test]
    fn test_append_plain() {
        let mut text: AttributedText<i32> = AttributedText::new();
        text.append(b"hello");
        text.push(b'!');
        assert_eq!(text.len(), 6);
        assert_eq!(text.to_plain_string(), "hello!");
        assert!(text.cells().all(|cell| !cell.has_attribute()));
    }

    #[test]
    fn test_push_with_attribute_bypasses_queue() {
        let mut text = AttributedText::new();
        text.queue_attribute(1);
        text.push_with_attribute(b'a', 2);
        assert_eq!(text.attribute_at(0), Ok(&2));
        assert_eq!(text.pending_attribute(), Some(&1));
    }

    #[test]
    fn test_push_marker_leaves_queue() {
        let mut text = AttributedText::new();
        text.queue_attribute(1);
        text.push_marker(9);
        assert_eq!(text.pending_attribute(), Some(&1));
        assert_eq!(text.byte_at(0), None);
        assert_eq!(text.attribute_at(0), Ok(&9));
    }

    // ============================================================================
    // Attribute Queue Tests
    // ============================================================================

    #[test]
    fn test_queue_attaches_to_first_cell_only() {
        let mut text = AttributedText::new();
        text.queue_attribute(7);
        text.append(b"xy");
        assert_eq!(text.attribute_at(0), Ok(&7));
        assert_eq!(text.attribute_at(1), Err(AttrTextError::NoAttribute { index: 1 }));
        assert_eq!(text.pending_attribute(), None);
    }

    #[test]
    fn test_queue_survives_empty_append() {
        let mut text = AttributedText::new();
        text.queue_attribute(7);
        text.append(b"");
        assert_eq!(text.pending_attribute(), Some(&7));
        text.push(b'z');
        assert_eq!(text.attribute_at(0), Ok(&7));
        assert_eq!(text.pending_attribute(), None);
    }

    #[test]
    fn test_queue_survives_decorated_first_cell() {
        let mut other = AttributedText::new();
        other.push_with_attribute(b'a', 1);
        other.push(b'b');

        let mut text = AttributedText::new();
        text.queue_attribute(2);
        text.append_text(&other);
        assert_eq!(text.attribute_at(0), Ok(&1));
        assert_eq!(text.pending_attribute(), Some(&2));

        text.append(b"c");
        assert_eq!(text.attribute_at(2), Ok(&2));
    }

    #[test]
    fn test_queue_replacement_returns_displaced() {
        let mut text = AttributedText::new();
        assert_eq!(text.queue_attribute(1), None);
        assert_eq!(text.queue_attribute(2), Some(1));
        text.push(b'q');
        assert_eq!(text.attribute_at(0), Ok(&2));
    }

    #[test]
    fn test_clear_drops_queue() {
        let mut text = AttributedText::from("abc");
        text.queue_attribute(3);
        text.clear();
        assert!(text.is_empty());
        assert_eq!(text.take_pending_attribute(), None);
    }

    #[test]
    fn test_extend_applies_queue() {
        let mut text = AttributedText::new();
        text.queue_attribute(4);
        text.extend(b"ok".iter().copied());
        assert_eq!(text.attribute_at(0), Ok(&4));
        assert_eq!(text.to_plain_string(), "ok");
    }

    // ============================================================================
    // Query Tests
    // ============================================================================

    #[test]
    fn test_attribute_at_out_of_bounds() {
        let text: AttributedText<i32> = AttributedText::from("ab");
        assert_eq!(
            text.attribute_at(5),
            Err(AttrTextError::IndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_find_skips_markers() {
        let mut text = AttributedText::from("abca");
        text.push_marker(0);
        assert_eq!(text.find_byte(b'a'), Some(0));
        assert_eq!(text.rfind_byte(b'a'), Some(3));
        assert_eq!(text.find_byte(b'z'), None);
    }

    #[test]
    fn test_slice() {
        let mut text = AttributedText::from("ab");
        text.push_with_attribute(b'c', 1);
        text.append(b"de");

        let slice = text.slice(1..4).unwrap();
        assert_eq!(slice.to_plain_string(), "bcd");
        assert_eq!(slice.attribute_at(1), Ok(&1));

        assert_eq!(
            text.slice(2..9),
            Err(AttrTextError::IndexOutOfBounds { index: 9, len: 5 })
        );
    }

    // ============================================================================
    // Segmentation Tests
    // ============================================================================

    #[test]
    fn test_split_plain_only() {
        let text = AttributedText::from("hello");
        assert_eq!(text.split_by_attributes(), vec![text_segment("hello")]);
    }

    #[test]
    fn test_split_queued_attribute() {
        let mut text = AttributedText::from("hi");
        text.queue_attribute(5);
        text.append(b"5");
        assert_eq!(
            text.split_by_attributes(),
            vec![text_segment("hi"), Segment::Attribute(5), text_segment("5")]
        );
    }

    #[test]
    fn test_split_marker_yields_empty_text() {
        let mut text = AttributedText::from("a");
        text.push_marker(1);
        text.append(b"b");
        assert_eq!(
            text.split_by_attributes(),
            vec![
                text_segment("a"),
                Segment::Attribute(1),
                text_segment(""),
                text_segment("b"),
            ]
        );
    }

    #[test]
    fn test_split_adjacent_attributes() {
        let mut text = AttributedText::new();
        text.push_with_attribute(b'x', 1);
        text.push_with_attribute(b'y', 2);
        assert_eq!(
            text.split_by_attributes(),
            vec![
                Segment::Attribute(1),
                text_segment("x"),
                Segment::Attribute(2),
                text_segment("y"),
            ]
        );
    }

    #[test]
    fn test_split_concatenates_to_plain() {
        let mut text = AttributedText::from("one ");
        text.push_marker(1);
        text.push_with_attribute(b'2', 2);
        text.append(b" three");

        let joined: Vec<u8> = text
            .split_by_attributes()
            .iter()
            .filter_map(Segment::text)
            .flatten()
            .copied()
            .collect();
        assert_eq!(joined, text.to_plain_bytes());
        assert_eq!(text.to_string(), "one 2 three");
    }

    #[test]
    fn test_debug_string() {
        let mut text = AttributedText::from("hi");
        text.push_with_attribute(b'5', 5);
        text.push_marker(6);
        assert_eq!(text.to_debug_string(), "'h' 'i' '5' (5) <marker> (6)");
    }
}
