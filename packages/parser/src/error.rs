use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed markup at {pos}: {message} (near {fragment:?})")]
    MalformedMarkup {
        pos: usize,
        message: String,
        fragment: String,
    },

    #[error("Unexpected end of input at {pos}")]
    UnexpectedEof { pos: usize },

    #[error("Missing root element: expected <mjml>")]
    MissingRoot,
}

impl ParseError {
    /// Build a malformed-markup error carrying a fragment of the offending text.
    pub fn malformed(pos: usize, message: impl Into<String>, source: &str) -> Self {
        Self::MalformedMarkup {
            pos,
            message: message.into(),
            fragment: fragment_at(source, pos),
        }
    }

    pub fn unexpected_eof(pos: usize) -> Self {
        Self::UnexpectedEof { pos }
    }
}

/// Up to 40 characters of source following `pos`, for error messages.
fn fragment_at(source: &str, pos: usize) -> String {
    let start = pos.min(source.len());
    // Clamp to a char boundary so slicing cannot panic on multibyte input.
    let mut begin = start;
    while begin > 0 && !source.is_char_boundary(begin) {
        begin -= 1;
    }
    source[begin..].chars().take(40).collect()
}
