//! Line terminators of a host document.
//!
//! The engine always builds inserted text with `\n`. A host whose document uses CRLF
//! converts that text before committing it, so a duplicate never mixes terminators.

use std::borrow::Cow;

/// Newline sequence a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    /// CRLF as soon as `text` contains one `\r\n`, LF otherwise.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// The terminator itself.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Rewrite every `\n` of LF-separated `text` to this terminator.
    pub fn convert(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Crlf if text.contains('\n') => Cow::Owned(text.replace('\n', self.as_str())),
            _ => Cow::Borrowed(text),
        }
    }
}
