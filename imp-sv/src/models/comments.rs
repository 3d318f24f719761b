//! Comments.

/// Default banner border character.
pub const BANNER_BORDER: char = '-';
/// Default banner border length.
pub const BANNER_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// text`
    Line,
    /// A line comment framed by two border lines.
    Banner { border: char, width: usize },
    /// `/* text */`
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub style: CommentStyle,
}

impl Comment {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CommentStyle::Line,
        }
    }

    pub fn banner(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CommentStyle::Banner {
                border: BANNER_BORDER,
                width: BANNER_WIDTH,
            },
        }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CommentStyle::Block,
        }
    }

    /// Change the border of a banner; other styles are left alone.
    pub fn with_border(mut self, border: char, width: usize) -> Self {
        if let CommentStyle::Banner { .. } = self.style {
            self.style = CommentStyle::Banner { border, width };
        }
        self
    }

    /// Lines of text, at least one.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let empty = self.text.is_empty().then_some("");
        self.text.lines().chain(empty)
    }
}
