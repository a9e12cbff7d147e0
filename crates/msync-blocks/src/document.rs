//! Line-sequence view of a text document

/// A text document held as an ordered sequence of lines.
///
/// Lines are split on `\n` only, so a `\r` stays attached to its line and
/// the document renders back byte-for-byte. Whether the source ended with a
/// newline is remembered separately. An empty source has no lines at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl LineDocument {
    pub fn parse(source: &str) -> Self {
        if source.is_empty() {
            return Self::default();
        }
        let (body, trailing_newline) = match source.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (source, false),
        };
        Self {
            lines: body.split('\n').map(str::to_string).collect(),
            trailing_newline,
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Insert `line` so that it ends up at `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, line: impl Into<String>) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, line.into());
    }

    /// Replace the line at `index`, returning the previous text.
    pub fn replace(&mut self, index: usize, line: impl Into<String>) -> Option<String> {
        let slot = self.lines.get_mut(index)?;
        Some(std::mem::replace(slot, line.into()))
    }
}
