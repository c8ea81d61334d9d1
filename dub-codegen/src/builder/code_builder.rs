//! Code builder utility for generating properly indented code.

use super::Indent;

/// Line-oriented writer for C++ sources. Every `push_` method returns
/// `&mut Self` so calls chain inside loops and closures.
///
/// ```
/// use dub_codegen::CodeBuilder;
///
/// let mut b = CodeBuilder::cpp();
/// b.push_block("int main() {", "}", |b| {
///     b.push_line("return 0;");
/// });
///
/// assert_eq!(b.build(), "int main() {\n  return 0;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation (C++ default).
    pub fn cpp() -> Self {
        Self::new(Indent::Cpp)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add every line of a multi-line string with current indentation.
    pub fn push_lines(&mut self, s: &str) -> &mut Self {
        for line in s.lines() {
            if line.is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    pub fn push_block<F>(&mut self, header: &str, close: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header).push_indent();
        f(&mut *self);
        self.push_dedent().push_line(close)
    }

    /// Add a C-style block comment, one ` * ` line per entry.
    pub fn push_block_comment(&mut self, lines: &[&str]) -> &mut Self {
        match lines {
            [] => self,
            [single] => self.push_line(&format!("/** {} */", single)),
            [first, rest @ ..] => {
                self.push_line(&format!("/** {}", first));
                for line in rest {
                    self.push_line(&format!(" * {}", line));
                }
                self.push_line(" */")
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::cpp()
    }
}
