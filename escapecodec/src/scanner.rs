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
use crate::consts::{
    CONTROL_BYTES, CSI_INTRODUCER, CUSTOM_DELIMITER, CUSTOM_LEAD, DUAL_PARAMETER_FINAL_BYTES, ESC,
    PARAMETER_SEPARATOR, PRIVATE_MODE_FINAL_BYTES, PRIVATE_MODE_LEAD, SIMPLE_FINAL_BYTES,
    SINGLE_PARAMETER_FINAL_BYTES,
};
use bytes::Bytes;
use tracing::trace;
use vtscan_attrtext::AttributedText;

/// Outcome of a single forward pass over a byte slice.
#[derive(Debug)]
pub(crate) struct ScanReport {
    /// Everything recognized before the pass stopped
    pub text: AttributedText<EscapeAttribute>,
    /// Offset of the ESC opening a sequence cut off by the end of input
    pub truncated_at: Option<usize>,
}

/// Result of trying to recognize one escape sequence.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// A complete sequence; scanning resumes at `next`.
    Matched {
        attribute: EscapeAttribute,
        next: usize,
    },
    /// Not a recognized sequence; bytes before `next` are skipped.
    Abandoned { next: usize },
    /// Input ended before the sequence could be classified.
    Truncated,
}

/// Scans `input` once from the start, classifying every byte.
///
/// Printable bytes (0x20-0x7E) become plain cells, members of
/// [`CONTROL_BYTES`](crate::consts::CONTROL_BYTES) and recognized escape sequences
/// become marker cells. Any other byte is dropped. Scanning stops at a sequence that
/// the end of input cuts off, reporting where it started.
pub(crate) fn scan(input: &[u8]) -> ScanReport {
    let mut text = AttributedText::with_capacity(input.len());
    let mut index = 0;

    while index < input.len() {
        let byte = input[index];
        if is_printable(byte) {
            let end = input[index..]
                .iter()
                .position(|byte| !is_printable(*byte))
                .map_or(input.len(), |offset| index + offset);
            text.append(&input[index..end]);
            index = end;
        } else if CONTROL_BYTES.contains(&byte) {
            text.push_marker(EscapeAttribute::control(byte));
            index += 1;
        } else if byte == ESC {
            match scan_escape(input, index) {
                Step::Matched { attribute, next } => {
                    text.push_marker(attribute);
                    index = next;
                }
                Step::Abandoned { next } => {
                    trace!(
                        offset = index,
                        skipped = next - index,
                        "Abandoned unrecognized escape sequence"
                    );
                    index = next;
                }
                Step::Truncated => {
                    trace!(offset = index, "Escape sequence truncated by end of input");
                    return ScanReport {
                        text,
                        truncated_at: Some(index),
                    };
                }
            }
        } else {
            trace!(offset = index, byte, "Dropped unclassified byte");
            index += 1;
        }
    }

    ScanReport {
        text,
        truncated_at: None,
    }
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// Length of the run of ASCII digits starting at `from`.
fn digit_run(input: &[u8], from: usize) -> usize {
    input
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Parses an all-digit run, saturating on overflow.
fn parse_digits(digits: &[u8]) -> u32 {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(u32::MAX)
}

fn escape_text(input: &[u8], start: usize, end: usize) -> Bytes {
    Bytes::copy_from_slice(&input[start..end])
}

/// Recognizes the sequence opened by the ESC at `start`.
///
/// When an attempt is abandoned every byte examined up to and including the offending
/// one is skipped.
fn scan_escape(input: &[u8], start: usize) -> Step {
    let Some(&introducer) = input.get(start + 1) else {
        return Step::Truncated;
    };
    if introducer != CSI_INTRODUCER {
        return Step::Abandoned { next: start + 2 };
    }

    let body = start + 2;
    let Some(&lead) = input.get(body) else {
        return Step::Truncated;
    };

    if SIMPLE_FINAL_BYTES.contains(&lead) {
        Step::Matched {
            attribute: EscapeAttribute::new(escape_text(input, start, body + 1)),
            next: body + 1,
        }
    } else if lead == CUSTOM_LEAD {
        scan_custom(input, start, body)
    } else if lead == PRIVATE_MODE_LEAD {
        scan_private_mode(input, start, body)
    } else {
        scan_parameters(input, start, body)
    }
}

/// `ESC [ i @ <payload> @` with a non-empty payload.
fn scan_custom(input: &[u8], start: usize, body: usize) -> Step {
    let Some(&opening) = input.get(body + 1) else {
        return Step::Truncated;
    };
    if opening != CUSTOM_DELIMITER {
        return Step::Abandoned { next: body + 2 };
    }

    let payload = body + 2;
    let Some(length) = input[payload..]
        .iter()
        .position(|byte| *byte == CUSTOM_DELIMITER)
    else {
        return Step::Truncated;
    };
    if length == 0 {
        return Step::Abandoned { next: payload + 1 };
    }

    let end = payload + length + 1;
    Step::Matched {
        attribute: EscapeAttribute::new(escape_text(input, start, end)),
        next: end,
    }
}

/// `ESC [ ? <n> <l|h>` with a non-empty digit run.
fn scan_private_mode(input: &[u8], start: usize, body: usize) -> Step {
    let digits = body + 1;
    let length = digit_run(input, digits);
    let terminator = digits + length;
    let Some(&final_byte) = input.get(terminator) else {
        return Step::Truncated;
    };
    if length == 0 {
        return Step::Abandoned {
            next: terminator + 1,
        };
    }
    if !PRIVATE_MODE_FINAL_BYTES.contains(&final_byte) {
        return Step::Abandoned {
            next: terminator + 1,
        };
    }

    Step::Matched {
        attribute: EscapeAttribute::with_params(
            escape_text(input, start, terminator + 1),
            parse_digits(&input[digits..terminator]),
            0,
        ),
        next: terminator + 1,
    }
}

/// `ESC [ <n> <final>` or `ESC [ <n> ; <m> <final>`.
fn scan_parameters(input: &[u8], start: usize, body: usize) -> Step {
    let first_length = digit_run(input, body);
    let separator = body + first_length;
    let Some(&after_first) = input.get(separator) else {
        return Step::Truncated;
    };
    if first_length == 0 {
        return Step::Abandoned { next: body + 1 };
    }
    let param1 = parse_digits(&input[body..separator]);

    if SINGLE_PARAMETER_FINAL_BYTES.contains(&after_first) {
        return Step::Matched {
            attribute: EscapeAttribute::with_params(
                escape_text(input, start, separator + 1),
                param1,
                0,
            ),
            next: separator + 1,
        };
    }
    if after_first != PARAMETER_SEPARATOR {
        return Step::Abandoned {
            next: separator + 1,
        };
    }

    let second = separator + 1;
    let second_length = digit_run(input, second);
    let terminator = second + second_length;
    let Some(&final_byte) = input.get(terminator) else {
        return Step::Truncated;
    };
    if second_length == 0 || !DUAL_PARAMETER_FINAL_BYTES.contains(&final_byte) {
        return Step::Abandoned {
            next: terminator + 1,
        };
    }

    Step::Matched {
        attribute: EscapeAttribute::with_params(
            escape_text(input, start, terminator + 1),
            param1,
            parse_digits(&input[second..terminator]),
        ),
        next: terminator + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtscan_attrtext::Cell;

    fn markers(report: &ScanReport) -> Vec<EscapeAttribute> {
        report
            .text
            .cells()
            .filter_map(|cell| match cell {
                Cell::Marker(attribute) => Some(attribute.clone()),
                Cell::Char { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_printable_run() {
        let report = scan(b"hello world");
        assert_eq!(report.text.to_plain_string(), "hello world");
        assert_eq!(report.truncated_at, None);
    }

    #[test]
    fn test_control_bytes_become_markers() {
        let report = scan(b"a\n\r\t\x08\x7f\x07\x05b");
        assert_eq!(report.text.len(), 9);
        assert_eq!(report.text.to_plain_string(), "ab");
        let escapes: Vec<Bytes> = markers(&report).into_iter().map(|a| a.escape).collect();
        assert_eq!(escapes, vec!["\n", "\r", "\t", "\x08", "\x7f", "\x07", "\x05"]);
    }

    #[test]
    fn test_unclassified_bytes_dropped() {
        let report = scan(b"a\x00\x01\x80\xffb");
        assert_eq!(report.text.len(), 2);
        assert_eq!(report.text.to_plain_string(), "ab");
    }

    #[test]
    fn test_simple_final_bytes() {
        for &final_byte in SIMPLE_FINAL_BYTES {
            let input = [ESC, b'[', final_byte];
            let report = scan(&input);
            assert_eq!(
                markers(&report),
                vec![EscapeAttribute::new(input.to_vec())]
            );
        }
    }

    #[test]
    fn test_single_parameter() {
        let report = scan(b"\x1b[12m");
        assert_eq!(
            markers(&report),
            vec![EscapeAttribute::with_params("\x1b[12m", 12, 0)]
        );

        let report = scan(b"\x1b[6n");
        assert_eq!(
            markers(&report),
            vec![EscapeAttribute::with_params("\x1b[6n", 6, 0)]
        );
    }

    #[test]
    fn test_dual_parameter() {
        let report = scan(b"\x1b[3;4H\x1b[10;20f\x1b[1;31m");
        assert_eq!(
            markers(&report),
            vec![
                EscapeAttribute::with_params("\x1b[3;4H", 3, 4),
                EscapeAttribute::with_params("\x1b[10;20f", 10, 20),
                EscapeAttribute::with_params("\x1b[1;31m", 1, 31),
            ]
        );
    }

    #[test]
    fn test_private_mode() {
        let report = scan(b"\x1b[?25l\x1b[?1049h");
        assert_eq!(
            markers(&report),
            vec![
                EscapeAttribute::with_params("\x1b[?25l", 25, 0),
                EscapeAttribute::with_params("\x1b[?1049h", 1049, 0),
            ]
        );
    }

    #[test]
    fn test_custom_form_consumes_payload() {
        let report = scan(b"\x1b[i@42@x");
        assert_eq!(markers(&report), vec![EscapeAttribute::new("\x1b[i@42@")]);
        assert_eq!(report.text.to_plain_string(), "x");
    }

    #[test]
    fn test_custom_form_keeps_raw_payload() {
        let report = scan(b"\x1b[i@\x80\xff\x1b@");
        assert_eq!(
            markers(&report),
            vec![EscapeAttribute::new(&b"\x1b[i@\x80\xff\x1b@"[..])]
        );
        assert_eq!(markers(&report)[0].to_string(), "\\x1b[i@\\x80\\xff\\x1b@ (0, 0)");
    }

    #[test]
    fn test_custom_form_empty_payload() {
        let report = scan(b"\x1b[i@@x");
        assert!(markers(&report).is_empty());
        assert_eq!(report.text.to_plain_string(), "x");
    }

    #[test]
    fn test_custom_form_missing_opening() {
        let report = scan(b"\x1b[iXy");
        assert!(markers(&report).is_empty());
        assert_eq!(report.text.to_plain_string(), "y");
    }

    #[test]
    fn test_missing_introducer_skips_next_byte() {
        let report = scan(b"\x1bAhello");
        assert_eq!(report.text.to_plain_string(), "hello");
        assert!(markers(&report).is_empty());
    }

    #[test]
    fn test_unrecognized_lead_skipped() {
        let report = scan(b"\x1b[Zok");
        assert_eq!(report.text.to_plain_string(), "ok");
    }

    #[test]
    fn test_bad_terminators_abandoned() {
        assert_eq!(scan(b"\x1b[12Xok").text.to_plain_string(), "ok");
        assert_eq!(scan(b"\x1b[1;2Xok").text.to_plain_string(), "ok");
        assert_eq!(scan(b"\x1b[?25Xok").text.to_plain_string(), "ok");
    }

    #[test]
    fn test_empty_digit_runs_abandoned() {
        assert_eq!(scan(b"\x1b[?lok").text.to_plain_string(), "ok");
        assert_eq!(scan(b"\x1b[1;Hok").text.to_plain_string(), "ok");
    }

    #[test]
    fn test_truncated_sequences() {
        for input in [
            &b"ab\x1b"[..],
            b"ab\x1b[",
            b"ab\x1b[12",
            b"ab\x1b[1;2",
            b"ab\x1b[1;",
            b"ab\x1b[?25",
            b"ab\x1b[i",
            b"ab\x1b[i@payload",
        ] {
            let report = scan(input);
            assert_eq!(report.truncated_at, Some(2), "input {:?}", input);
            assert_eq!(report.text.to_plain_string(), "ab");
        }
    }

    #[test]
    fn test_parameter_overflow_saturates() {
        let report = scan(b"\x1b[99999999999A");
        assert_eq!(markers(&report)[0].param1, u32::MAX);
    }

    #[test]
    fn test_mixed_content() {
        let report = scan(b"Hello\x1b[1mWorld\x1b[0m\n");
        assert_eq!(report.text.to_plain_string(), "HelloWorld");
        assert_eq!(markers(&report).len(), 3);
        assert_eq!(report.text.len(), 13);
    }

    #[test]
    fn test_step_positions() {
        assert_eq!(
            scan_escape(b"\x1b[A!", 0),
            Step::Matched {
                attribute: EscapeAttribute::new("\x1b[A"),
                next: 3,
            }
        );
        assert_eq!(scan_escape(b"\x1b[12Q!", 0), Step::Abandoned { next: 5 });
        assert_eq!(scan_escape(b"\x1b[", 0), Step::Truncated);
    }
}
