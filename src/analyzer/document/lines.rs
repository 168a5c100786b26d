//! Line document model for Dockerfiles.

/// An ordered sequence of text lines, addressed 1-indexed.
///
/// Lines are split on `\n`; a trailing `\r` is removed. A trailing newline
/// does not create an extra empty line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDocument {
    lines: Vec<String>,
}

impl LineDocument {
    pub fn from_text(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Line `n` (1-indexed).
    pub fn line(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate `(line_number, text)` pairs.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    /// Non-blank lines that are not `#` comments, with their numbers.
    pub fn instructions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.numbered().filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
    }

    /// Whether any line in `start..start + width` (1-indexed, clamped to the
    /// document) satisfies `pred`.
    pub fn any_in_window<F>(&self, start: usize, width: usize, pred: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        let first = start.max(1) - 1;
        self.lines
            .iter()
            .skip(first)
            .take(width)
            .any(|line| pred(line))
    }
}
