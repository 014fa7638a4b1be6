//! Indented text accumulation for emitted source.

/// Indentation unit of emitted code.
pub const INDENT: &str = "    ";

/// Accumulates emitted lines at the current nesting depth.
///
/// Every line is prefixed with one [`INDENT`] per open block, so wrapping the
/// whole output in a module only changes the depth the emitters start at.
#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    depth: usize,
}

impl CodeWriter {
    /// Creates an empty writer at depth zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Writes one line at the current depth. Empty lines carry no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Writes several lines at the current depth.
    pub fn lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            self.line(line);
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Writes `header {` and enters the block.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Leaves the current block and writes its closing brace.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}
