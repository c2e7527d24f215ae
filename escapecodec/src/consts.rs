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

/// Escape (ESC) byte opening every multi-byte sequence.
pub const ESC: u8 = 0x1B;

/// Byte following ESC in a Control Sequence Introducer.
pub const CSI_INTRODUCER: u8 = b'[';

/// Single control bytes that become marker cells: LF, CR, HT, BS, DEL, BEL and ENQ.
pub const CONTROL_BYTES: &[u8] = b"\n\r\t\x08\x7f\x07\x05";

/// Final bytes that complete a two byte `ESC [ <final>` sequence.
pub const SIMPLE_FINAL_BYTES: &[u8] = b"ABCDEFGJKSTmsu";

/// Final bytes of the `ESC [ <n> <final>` single parameter form.
pub const SINGLE_PARAMETER_FINAL_BYTES: &[u8] = b"ABCDEFGJKSTnm";

/// Final bytes of the `ESC [ <n> ; <m> <final>` dual parameter form.
pub const DUAL_PARAMETER_FINAL_BYTES: &[u8] = b"Hfm";

/// Final bytes of the `ESC [ ? <n> <final>` private mode form.
pub const PRIVATE_MODE_FINAL_BYTES: &[u8] = b"lh";

/// Lead byte of the `ESC [ i @ <payload> @` custom form.
pub const CUSTOM_LEAD: u8 = b'i';

/// Delimiter surrounding the payload of the custom form.
pub const CUSTOM_DELIMITER: u8 = b'@';

/// Lead byte of the private mode form.
pub const PRIVATE_MODE_LEAD: u8 = b'?';

/// Separator between the two parameters of the dual parameter form.
pub const PARAMETER_SEPARATOR: u8 = b';';

/// Maximum length of an incomplete escape sequence kept between flushes.
///
/// Only consulted when truncated sequences are retained. A longer tail is discarded
/// so a stream that never completes its sequence cannot grow the buffer without bound.
pub const MAX_SEQUENCE_LENGTH: usize = 256;
