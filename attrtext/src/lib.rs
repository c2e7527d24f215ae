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

//! Ordered character cells that may each carry one attribute.
//!
//! [`AttributedText`] is the container produced by escape scanners: plain bytes are
//! stored as they arrive, and any cell may be decorated with an attribute describing
//! the directive that preceded it. The container is generic over the attribute type
//! and can be decomposed into alternating text and attribute [`Segment`]s.

mod cell;
mod result;
mod segment;
mod text;

pub use self::cell::Cell;
pub use self::result::{AttrTextError, AttrTextResult};
pub use self::segment::Segment;
pub use self::text::{AttributedText, Cells};
