//! ATX heading scanning over Markdown-like text.
//!
//! A heading of level `size` is recognised by the literal marker
//! `"\n" + "#" * size + " "`. Levels are scanned independently, so a search
//! for level 1 never matches a `## ` line and vice versa.

/// Headings are scanned from level 1 down to this level.
pub const MAX_HEADING_LEVEL: usize = 4;

/// A heading found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Byte offset of the `#` run.
    pub marker: usize,
    /// Byte offset of the first character of the caption.
    pub offset: usize,
    /// Heading level, 1 being the most prominent.
    pub size: usize,
    /// Caption text, trimmed.
    pub caption: &'a str,
}

/// The marker that opens a heading of the given level.
pub fn heading_marker(size: usize) -> String {
    format!("\n{} ", "#".repeat(size))
}

/// Whether a heading of level `size` occurs at or after `start`.
pub fn has_heading(text: &str, size: usize, start: usize) -> bool {
    find_heading(text, size, start).is_some()
}

/// Finds the first heading of level `size` whose marker starts at or after
/// `start`, returning the offset of its `#` run. A `start` inside a multi-byte
/// character moves forward to the next character boundary.
///
/// # Example
///
/// ```rust
/// use citeloc_core::heading::find_heading;
///
/// let text = "intro\n# Title\nbody";
/// assert_eq!(find_heading(text, 1, 0), Some(6));
/// assert_eq!(find_heading(text, 2, 0), None);
/// ```
pub fn find_heading(text: &str, size: usize, start: usize) -> Option<usize> {
    if size == 0 {
        return None;
    }

    let mut start = start;
    while start < text.len() && !text.is_char_boundary(start) {
        start += 1;
    }

    let marker = heading_marker(size);
    text.get(start..)?
        .find(&marker)
        .map(|index| start + index + 1)
}

/// Returns the caption of the heading whose `#` run starts at `heading_offset`:
/// the text after the marker up to the next newline, trimmed.
pub fn caption_at(text: &str, heading_offset: usize) -> &str {
    let Some(rest) = text.get(heading_offset..) else {
        return "";
    };
    let rest = rest.trim_start_matches('#');
    let line = rest.split('\n').next().unwrap_or_default();
    line.trim()
}

/// Iterates over every heading of one level, in document order.
pub fn headings(text: &str, size: usize) -> Headings<'_> {
    Headings { text, size, start: 0 }
}

/// Every heading of levels `1..=max_level`, level by level, each level in
/// document order.
pub fn scan(text: &str, max_level: usize) -> Vec<Heading<'_>> {
    (1..=max_level).flat_map(|size| headings(text, size)).collect()
}

/// Iterator returned by [`headings`].
#[derive(Debug, Clone)]
pub struct Headings<'a> {
    text: &'a str,
    size: usize,
    start: usize,
}

impl<'a> Iterator for Headings<'a> {
    type Item = Heading<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let marker = find_heading(self.text, self.size, self.start)?;
        let caption_start = marker + self.size + 1;
        // The caption's trailing newline may open the next heading.
        self.start = caption_start;

        let caption = caption_at(self.text, marker);
        let offset = self.text[caption_start..]
            .find(|c: char| !c.is_whitespace() || c == '\n')
            .map_or(self.text.len(), |skip| caption_start + skip);

        Some(Heading { marker, offset, size: self.size, caption })
    }
}
