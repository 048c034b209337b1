//! bracewise - line-oriented Go/C++/Java transpiler
//!
//! # Overview
//! Translates Go and C++ sources to Java, and Java sources to C++, one line
//! at a time. Declarations are recognized structurally, nesting is tracked
//! by brace depth, and statements are rewritten with ordered rule tables.
//! Constructs with no target equivalent become inert placeholder comments;
//! a file is never rejected.

pub mod declarations;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod pairs;
pub mod path_map;
pub mod rules;
pub mod scope;
pub mod session;
pub mod statements;
pub mod unsupported_features;

use std::path::{Path, PathBuf};

pub use error::{Result, TranspileError};
pub use pairs::{Direction, Language, LanguagePair, UnitTranslation};
pub use session::{SessionConfig, SessionReport, TranslationSession};

/// Translate one in-memory file with the first pair of `direction` that
/// accepts its extension. Output paths are relative to an empty root.
///
/// Returns `None` when no pair handles the file.
pub fn transpile_source(
    rel_path: &Path,
    text: &str,
    direction: Direction,
    namespace: &str,
) -> Option<UnitTranslation> {
    let pair = direction.pairs().into_iter().find(|p| p.accepts(rel_path))?;
    let mapper = path_map::PathMapper::new(PathBuf::new(), namespace);
    let guard = unsupported_features::UnsupportedConstructGuard::default();
    let unit = pairs::SourceUnit::new(rel_path, text);
    Some(pair.translate(&unit, &mapper, &guard))
}

/// Translate a whole source tree
pub fn transpile_dir(config: SessionConfig) -> Result<SessionReport> {
    Ok(TranslationSession::new(config)?.run())
}
