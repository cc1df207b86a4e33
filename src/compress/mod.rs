//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Figx.
//! The Figx project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Figx Compression Module
//!
//! Canonicalizes exported scene graphs down to the attributes that carry
//! meaning for layout. A compressed node has the same tree shape as its
//! input; only attributes are removed or, for paints, rewritten.
//!
//! ## Elision Rules
//!
//! Applied per attribute, in order:
//!
//! 1. `null` values
//! 2. computed geometry and UI session state, plus grid track/gap fields on
//!    frames that are not native grids and grid cell fields on nodes whose
//!    parent is not one
//! 3. identity `relativeTransform` matrices
//! 4. critical attributes (`id`, `type`, `name`, `children`, `x`, `y`,
//!    `width`, `height`) are always kept
//! 5. empty arrays and objects
//! 6. values equal to the node type's default
//! 7. nested objects are compressed recursively and kept when non-empty
//! 8. `fills`, `strokes` and `effects` entries go through paint compression
//!
//! Compression is idempotent: compressing a compressed tree is a no-op.
//!
//! ## Submodules
//!
//! - [`compressor`]: the attribute elision engine
//! - [`paint`]: paint entry compression and color conversion
//! - [`document`]: the serialized compression output

pub mod compressor;
pub mod document;
pub mod paint;

pub use compressor::{is_identity_transform, values_equal, FxCompressor};
pub use document::{FxCompressedDocument, FxDocumentMetadata};
pub use paint::{color_to_hex, compress_paint, rgb_to_hex};
