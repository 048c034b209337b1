//! Emitter module - indented output assembly
//!
//! Translated lines are re-indented from scope depth rather than copied from
//! the source, so output indentation is uniform regardless of input style.
//! [`JavaUnitWriter`] additionally routes lines into nested class bodies,
//! since members may be declared away from their type (Go receivers,
//! out-of-class C++ definitions).

#[cfg(test)]
mod tests;

const INDENT: &str = "    ";

/// `text` indented by `level` units; blank text stays empty
pub fn indent_line(level: usize, text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("{}{}", INDENT.repeat(level), text.trim_start())
    }
}

/// Line buffer with a current indent level
#[derive(Debug, Default)]
pub struct CodeWriter {
    indent: usize,
    lines: Vec<String>,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.indent
    }

    /// Line at the current level
    pub fn line(&mut self, text: &str) {
        self.lines.push(indent_line(self.indent, text));
    }

    /// Line at an explicit level
    pub fn line_at(&mut self, level: usize, text: &str) {
        self.lines.push(indent_line(level, text));
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace a line already written
    pub fn patch(&mut self, index: usize, f: impl FnOnce(&str) -> String) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = f(line);
        }
    }

    /// Lines of another writer, appended as already indented
    pub fn append(&mut self, other: CodeWriter) {
        self.lines.extend(other.lines);
    }

    /// Joined output with a trailing newline
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Where a Java output line goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Body of the file-level class
    File,
    /// Body of the nested class with this index
    Class(usize),
}

#[derive(Debug)]
enum Segment {
    Line(String),
    Class(usize),
}

#[derive(Debug, Default)]
struct NestedClass {
    name: String,
    header: Option<String>,
    body: Vec<String>,
    footer: Option<String>,
}

/// A Java compilation unit: one public file class holding the translated
/// top-level code, with nested classes placed where first referenced
#[derive(Debug, Default)]
pub struct JavaUnitWriter {
    segments: Vec<Segment>,
    classes: Vec<NestedClass>,
    file_header: Option<String>,
}

impl JavaUnitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of a nested class, creating it at the current position
    pub fn class(&mut self, name: &str) -> usize {
        if let Some(index) = self.find_class(name) {
            return index;
        }
        self.classes.push(NestedClass {
            name: name.to_string(),
            ..NestedClass::default()
        });
        let index = self.classes.len() - 1;
        self.segments.push(Segment::Class(index));
        index
    }

    pub fn find_class(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.name == name)
    }

    /// Header line of a nested class (`public static class X {`)
    pub fn set_header(&mut self, index: usize, level: usize, text: &str) {
        if let Some(class) = self.classes.get_mut(index) {
            class.header = Some(indent_line(level, text));
        }
    }

    pub fn set_footer(&mut self, index: usize, level: usize, text: &str) {
        if let Some(class) = self.classes.get_mut(index) {
            class.footer = Some(indent_line(level, text));
        }
    }

    pub fn patch_header(&mut self, index: usize, f: impl FnOnce(&str) -> String) {
        if let Some(header) = self.classes.get_mut(index).and_then(|c| c.header.as_mut()) {
            *header = f(header);
        }
    }

    /// Header of the file class itself, replacing `public class <type> {`
    pub fn set_file_header(&mut self, text: &str) {
        self.file_header = Some(text.trim().to_string());
    }

    pub fn patch_file_header(&mut self, type_name: &str, f: impl FnOnce(&str) -> String) {
        let current = self
            .file_header
            .take()
            .unwrap_or_else(|| format!("public class {type_name} {{"));
        self.file_header = Some(f(&current));
    }

    pub fn push(&mut self, target: Target, level: usize, text: &str) {
        self.push_line(target, indent_line(level, text));
    }

    /// Line kept exactly as written (continuation of a multi-line literal)
    pub fn push_verbatim(&mut self, target: Target, text: &str) {
        self.push_line(target, text.to_string());
    }

    fn push_line(&mut self, target: Target, line: String) {
        match target {
            Target::File => self.segments.push(Segment::Line(line)),
            Target::Class(index) => {
                if let Some(class) = self.classes.get_mut(index) {
                    class.body.push(line);
                }
            }
        }
    }

    /// Assemble `preamble`, the file class `type_name` and its contents
    pub fn finish(self, preamble: &[String], type_name: &str) -> String {
        let mut out = CodeWriter::new();
        out.lines.extend(preamble.iter().cloned());
        let header = self
            .file_header
            .unwrap_or_else(|| format!("public class {type_name} {{"));
        out.line(&header);
        let mut classes: Vec<Option<NestedClass>> = self.classes.into_iter().map(Some).collect();
        for segment in self.segments {
            match segment {
                Segment::Line(line) => out.lines.push(line),
                Segment::Class(index) => {
                    let Some(class) = classes.get_mut(index).and_then(Option::take) else {
                        continue;
                    };
                    let header = class.header.unwrap_or_else(|| {
                        indent_line(1, &format!("public static class {} {{", class.name))
                    });
                    out.lines.push(header);
                    out.lines.extend(class.body);
                    out.lines.push(class.footer.unwrap_or_else(|| indent_line(1, "}")));
                }
            }
        }
        out.line("}");
        out.finish()
    }
}
