//! # IES Override Engine
//!
//! Prefix-based field rewriting for IES photometric files.
//!
//! An IES file is line oriented; header lines carry bracketed tags such as
//! `[MANUFAC]` or `[LUMCAT]`. The engine takes the lines of one file plus an
//! ordered tag -> directive mapping and decides, line by line, whether to keep,
//! replace or drop it. It does not parse photometric data.
//!
//! ## Architecture
//!
//! ```text
//! raw bytes
//!     │
//!     ├──> decode_text (UTF-8, then fallback encoding)
//!     │
//!     ├──> split_lines
//!     │
//!     ├──> OverrideEngine::apply
//!     │    ├─> first tag (mapping order) prefixing the line wins
//!     │    ├─> REMOVE drops, KEEP passes, anything else replaces
//!     │    └─> rename tag value captured as rename key
//!     │
//!     └──> output_name + "\n"-joined contents
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ies_engine::{apply_overrides, OverrideMapping};
//!
//! let overrides = OverrideMapping::from_cells([
//!     ("[MANUFAC]", "LEDFLEX"),
//!     ("[TEST]", "REMOVE"),
//!     ("[LUMCAT]", "C01181523"),
//! ]);
//!
//! let (lines, rename_key) =
//!     apply_overrides(&["[MANUFAC] OLD\n", "[TEST] x\n", "[OTHER] y\n"], &overrides);
//!
//! assert_eq!(lines, vec!["[MANUFAC] LEDFLEX\n", "[OTHER] y\n"]);
//! assert_eq!(rename_key, None);
//! ```

mod decode;
mod directive;
mod engine;
mod error;
mod naming;
mod overrides;

pub use decode::{decode_text, split_lines, FallbackEncoding};
pub use directive::{Directive, KEEP, REMOVE};
pub use engine::{
    apply_overrides, EngineConfig, FileRewrite, OverrideEngine, Rewrite, RewriteStats,
};
pub use error::{EngineError, Result};
pub use naming::{output_name, DEFAULT_RENAME_SUFFIX, DEFAULT_RENAME_TAG};
pub use overrides::OverrideMapping;
