//! Splits a version string into its segments
//!
//! Each segment is read as `separator letters digits pattern` where every
//! part may be empty:
//!
//! - separator: run of punctuation other than `*` (valid are `.`, `-`, `_`)
//! - letters: run of alphabetic characters, a single `-` may join two runs
//!   ("release-candidate", "pre-alpha")
//! - digits: run of ASCII digits
//! - pattern: `*` or `*!`

use crate::error::VersionError;
use crate::version::segment::VersionSegment;

/// Raw parts of a single segment, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SegmentTokens<'a> {
    pub separator: &'a str,
    pub letters: &'a str,
    pub digits: &'a str,
    pub pattern: &'a str,
}

impl SegmentTokens<'_> {
    fn is_empty(&self) -> bool {
        self.separator.is_empty()
            && self.letters.is_empty()
            && self.digits.is_empty()
            && self.pattern.is_empty()
    }
}

struct CharReader<'a> {
    input: &'a str,
    index: usize,
}

impl<'a> CharReader<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, index: 0 }
    }

    fn has_next(&self) -> bool {
        self.index < self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.index..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.index..].chars().nth(1)
    }

    fn advance(&mut self, c: char) {
        self.index += c.len_utf8();
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.index;
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.advance(c);
        }
        &self.input[start..self.index]
    }

    fn read_separator(&mut self) -> &'a str {
        self.read_while(is_separator_char)
    }

    fn read_letters(&mut self) -> &'a str {
        let start = self.index;
        while let Some(c) = self.peek() {
            let joins_letters = c == '-'
                && self.index > start
                && self.peek_second().is_some_and(char::is_alphabetic);
            if !c.is_alphabetic() && !joins_letters {
                break;
            }
            self.advance(c);
        }
        &self.input[start..self.index]
    }

    fn read_digits(&mut self) -> &'a str {
        self.read_while(|c| c.is_ascii_digit())
    }

    fn read_pattern(&mut self) -> &'a str {
        let start = self.index;
        if self.peek() == Some('*') {
            self.advance('*');
            if self.peek() == Some('!') {
                self.advance('!');
            }
        }
        &self.input[start..self.index]
    }

    fn read_segment(&mut self) -> SegmentTokens<'a> {
        SegmentTokens {
            separator: self.read_separator(),
            letters: self.read_letters(),
            digits: self.read_digits(),
            pattern: self.read_pattern(),
        }
    }
}

fn is_separator_char(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control() && c != '*'
}

/// Splits the given version into its raw segment tokens.
///
/// Fails if some character can not be assigned to any part (e.g. whitespace).
pub(crate) fn tokenize(version: &str) -> Result<Vec<SegmentTokens<'_>>, VersionError> {
    let mut reader = CharReader::new(version);
    let mut tokens = Vec::new();
    while reader.has_next() {
        let segment = reader.read_segment();
        if segment.is_empty() {
            return Err(VersionError::Unparsable(version.to_string()));
        }
        tokens.push(segment);
    }
    Ok(tokens)
}

/// Parses the given version into its segments.
pub(crate) fn parse_segments(version: &str) -> Result<Vec<VersionSegment>, VersionError> {
    tokenize(version)?
        .into_iter()
        .map(|tokens| {
            VersionSegment::new(
                tokens.separator,
                tokens.letters,
                tokens.digits,
                tokens.pattern,
            )
        })
        .collect()
}
