//! Diagnostics - per-file translation notes and their output formats

use serde::Serialize;
use std::path::Path;

/// Diagnostic codes
pub mod codes {
    pub const MULTI_RETURN: &str = "BW-MULTI-RETURN";
    pub const UNSUPPORTED: &str = "BW-UNSUPPORTED";
    pub const POINTER_STRIPPED: &str = "BW-POINTER-STRIPPED";
    pub const IO_ERROR: &str = "BW-IO-ERROR";
    pub const DECODE_ERROR: &str = "BW-DECODE-ERROR";
    pub const OUTPUT_COLLISION: &str = "BW-OUTPUT-COLLISION";
    pub const UNCLOSED_SCOPE: &str = "BW-UNCLOSED-SCOPE";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub span: DiagnosticSpan,
    pub phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Diagnostic {
    /// Attach structured detail, serialized under `meta`
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Diagnostics {
    pub diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn add(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Number of diagnostics carrying `code`
    pub fn count(&self, code: &str) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }

    /// Attach `file` to every diagnostic that has none yet
    pub fn set_file(&mut self, file: &Path) {
        let name = file.display().to_string();
        for diag in &mut self.diagnostics {
            if diag.span.file.is_none() {
                diag.span.file = Some(name.clone());
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn span_for_line(file: Option<&Path>, line: usize) -> DiagnosticSpan {
    DiagnosticSpan {
        file: file.map(|p| p.display().to_string()),
        line,
    }
}

fn diag(
    code: &str,
    severity: DiagnosticSeverity,
    message: String,
    line: usize,
    phase: &str,
) -> Diagnostic {
    Diagnostic {
        code: code.to_string(),
        message,
        severity,
        span: span_for_line(None, line),
        phase: phase.to_string(),
        meta: None,
    }
}

pub fn info_diag(code: &str, message: String, line: usize, phase: &str) -> Diagnostic {
    diag(code, DiagnosticSeverity::Info, message, line, phase)
}

pub fn warning_diag(code: &str, message: String, line: usize, phase: &str) -> Diagnostic {
    diag(code, DiagnosticSeverity::Warning, message, line, phase)
}

pub fn error_diag(code: &str, message: String, line: usize, phase: &str) -> Diagnostic {
    diag(code, DiagnosticSeverity::Error, message, line, phase)
}

/// Session-level failure as a diagnostic on `file`
pub fn from_error(err: &crate::error::TranspileError, file: &Path) -> Diagnostics {
    use crate::error::TranspileError;
    let code = match err {
        TranspileError::Decode { .. } => codes::DECODE_ERROR,
        TranspileError::Io { .. }
        | TranspileError::SourceRootMissing(_)
        | TranspileError::Report { .. } => codes::IO_ERROR,
    };
    let mut diags = Diagnostics::new();
    let mut d = error_diag(code, format!("{err}"), 1, "session");
    d.span.file = Some(file.display().to_string());
    diags.add(d);
    diags
}
