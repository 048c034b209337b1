//! Language pairs - one translation strategy per direction
//!
//! A session selects its pairs once from the [`Direction`] and then routes
//! each file to the first pair that accepts its extension.

pub mod cpp_java;
pub mod go_java;
pub mod java_cpp;

use crate::diagnostics::Diagnostics;
use crate::emitter::Target;
use crate::path_map::PathMapper;
use crate::scope::Observed;
use crate::unsupported_features::UnsupportedConstructGuard;
use clap::ValueEnum;
use serde::Serialize;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

pub use cpp_java::CppToJava;
pub use go_java::GoToJava;
pub use java_cpp::JavaToCpp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Cpp,
    Java,
}

impl Language {
    pub const CPP_EXTENSIONS: [&'static str; 6] = ["cpp", "cc", "cxx", "h", "hpp", "hxx"];

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "go" => Some(Language::Go),
            "java" => Some(Language::Java),
            e if Self::CPP_EXTENSIONS.contains(&e) => Some(Language::Cpp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }
}

/// Which pairs a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Go and C++ to Java
    #[value(alias = "c2j", alias = "go2java")]
    Forward,
    /// Java to C++
    #[value(alias = "j2c")]
    Reverse,
    /// Every pair, chosen by file extension
    #[default]
    Auto,
}

impl Direction {
    pub fn pairs(self) -> Vec<Box<dyn LanguagePair>> {
        match self {
            Direction::Forward => vec![Box::new(GoToJava), Box::new(CppToJava)],
            Direction::Reverse => vec![Box::new(JavaToCpp)],
            Direction::Auto => vec![Box::new(GoToJava), Box::new(CppToJava), Box::new(JavaToCpp)],
        }
    }
}

/// One source file handed to a pair
#[derive(Debug, Clone, Copy)]
pub struct SourceUnit<'a> {
    /// Path relative to the source root
    pub rel_path: &'a Path,
    pub text: &'a str,
}

impl<'a> SourceUnit<'a> {
    pub fn new(rel_path: &'a Path, text: &'a str) -> Self {
        Self { rel_path, text }
    }

    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.text.lines()
    }
}

/// Per-file counters, folded by the session with `+=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    pub files_converted: usize,
    pub structs_found: usize,
    pub functions_found: usize,
    pub classes_found: usize,
}

impl AddAssign for TranslationStats {
    fn add_assign(&mut self, other: Self) {
        self.files_converted += other.files_converted;
        self.structs_found += other.structs_found;
        self.functions_found += other.functions_found;
        self.classes_found += other.classes_found;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Result of translating one file
#[derive(Debug, Clone, Serialize)]
pub struct UnitTranslation {
    pub outputs: Vec<OutputFile>,
    pub stats: TranslationStats,
    pub diagnostics: Diagnostics,
}

/// Where the lines of the current declaration go, and the depth their
/// indentation is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Route {
    pub target: Target,
    pub base: usize,
    pub anchor: usize,
}

impl Route {
    pub const FILE: Route = Route {
        target: Target::File,
        base: 1,
        anchor: 0,
    };

    pub fn new(target: Target, base: usize, anchor: usize) -> Self {
        Self {
            target,
            base,
            anchor,
        }
    }

    /// Output level of a line observed by the scope tracker. Leading closers
    /// count against the line itself, so `}` lines up with its opener.
    pub fn level(&self, observed: &Observed) -> usize {
        let depth = observed
            .depth_before
            .saturating_sub(observed.braces.leading_closes);
        self.base + depth.saturating_sub(self.anchor)
    }
}

/// A translation strategy for one direction
pub trait LanguagePair {
    fn name(&self) -> &'static str;

    fn source(&self) -> Language;

    fn target(&self) -> Language;

    fn accepts(&self, path: &Path) -> bool {
        Language::from_path(path) == Some(self.source())
    }

    /// Translate one file. Never fails: constructs that cannot be translated
    /// are annotated in the output and reported as diagnostics.
    fn translate(
        &self,
        unit: &SourceUnit<'_>,
        mapper: &PathMapper,
        guard: &UnsupportedConstructGuard,
    ) -> UnitTranslation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path(Path::new("a/b.go")), Some(Language::Go));
        assert_eq!(Language::from_path(Path::new("x.hpp")), Some(Language::Cpp));
        assert_eq!(Language::from_path(Path::new("X.java")), Some(Language::Java));
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_direction_pairs() {
        let names = |d: Direction| d.pairs().iter().map(|p| p.name()).collect::<Vec<_>>();
        assert_eq!(names(Direction::Forward), vec!["go-java", "cpp-java"]);
        assert_eq!(names(Direction::Reverse), vec!["java-cpp"]);
        assert_eq!(names(Direction::Auto).len(), 3);
    }

    #[test]
    fn test_direction_aliases() {
        assert_eq!(Direction::from_str("c2j", true), Ok(Direction::Forward));
        assert_eq!(Direction::from_str("go2java", true), Ok(Direction::Forward));
        assert_eq!(Direction::from_str("j2c", true), Ok(Direction::Reverse));
        assert_eq!(Direction::from_str("auto", true), Ok(Direction::Auto));
    }

    #[test]
    fn test_stats_fold() {
        let mut total = TranslationStats::default();
        total += TranslationStats {
            files_converted: 1,
            structs_found: 2,
            functions_found: 3,
            classes_found: 0,
        };
        total += TranslationStats {
            files_converted: 1,
            classes_found: 4,
            ..TranslationStats::default()
        };
        assert_eq!(total.files_converted, 2);
        assert_eq!(total.structs_found, 2);
        assert_eq!(total.functions_found, 3);
        assert_eq!(total.classes_found, 4);
    }
}
