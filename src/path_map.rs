//! Destination paths, namespaces and type names for translated files

use std::path::{Component, Path, PathBuf};

/// Where a Java translation goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaTarget {
    pub dir: PathBuf,
    pub package: String,
    pub type_name: String,
    pub file: PathBuf,
}

/// Where a C++ translation goes (source plus paired header)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppTarget {
    pub dir: PathBuf,
    pub stem: String,
    pub source: PathBuf,
    pub header: PathBuf,
}

impl JavaTarget {
    /// `package x.y;` plus a blank line; nothing for the default package
    pub fn package_lines(&self) -> Vec<String> {
        if self.package.is_empty() {
            Vec::new()
        } else {
            vec![format!("package {};", self.package), String::new()]
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathMapper {
    dest_root: PathBuf,
    namespace: String,
}

impl PathMapper {
    /// `namespace` may be dotted (`com.example`); every segment is sanitized
    pub fn new(dest_root: impl Into<PathBuf>, namespace: &str) -> Self {
        let namespace = namespace
            .split('.')
            .filter(|s| !s.is_empty())
            .map(sanitize_segment)
            .collect::<Vec<_>>()
            .join(".");
        Self {
            dest_root: dest_root.into(),
            namespace,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn java_target(&self, rel: &Path) -> JavaTarget {
        let segments = dir_segments(rel);
        let mut dir = self.dest_root.clone();
        for part in self.namespace.split('.').filter(|s| !s.is_empty()) {
            dir.push(part);
        }
        for part in &segments {
            dir.push(part);
        }

        let package = std::iter::once(self.namespace.as_str())
            .chain(segments.iter().map(String::as_str))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        let type_name = type_name(&file_stem(rel));
        let file = dir.join(format!("{type_name}.java"));
        JavaTarget {
            dir,
            package,
            type_name,
            file,
        }
    }

    pub fn cpp_target(&self, rel: &Path) -> CppTarget {
        let mut dir = self.dest_root.clone();
        for part in dir_segments(rel) {
            dir.push(part);
        }
        let stem = file_stem(rel);
        CppTarget {
            source: dir.join(format!("{stem}.cpp")),
            header: dir.join(format!("{stem}.h")),
            dir,
            stem,
        }
    }
}

fn file_stem(rel: &Path) -> String {
    rel.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sanitized directory segments of a relative file path
fn dir_segments(rel: &Path) -> Vec<String> {
    rel.parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(sanitize_segment(&part.to_string_lossy())),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// PascalCase type name from a file stem: `http_server` → `HttpServer`
pub fn type_name(stem: &str) -> String {
    let mut name: String = stem
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if name.is_empty() {
        return "Unnamed".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Namespace segment: identifier characters kept, everything else `_`
pub fn sanitize_segment(segment: &str) -> String {
    let mut out: String = segment
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
