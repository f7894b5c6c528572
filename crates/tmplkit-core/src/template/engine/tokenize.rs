//! Tokenization for template engine
//!
//! Splits template text into fragments with a forward-only state machine.
//! Every byte of the input belongs to exactly one fragment, so joining the
//! `raw` text of all fragments gives back the original template.

use serde::Serialize;

use crate::template::error::TemplateError;

/// Keyword that closes the innermost open block
pub(crate) const END_KEYWORD: &str = "end";

/// Fragment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Literal text outside of any tag
    Text,
    /// `{{ name }}`
    Variable,
    /// `{% command args %}`
    OpenBlock,
    /// `{% end %}`
    CloseBlock,
}

/// A classified span of template text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment<'a> {
    /// Fragment classification
    pub kind: FragmentKind,
    /// Exact source text, delimiters included
    pub raw: &'a str,
    /// Absolute byte offset of the fragment in the template
    pub start: usize,
    /// Line number where the fragment starts (for error messages)
    pub line: usize,
}

impl<'a> Fragment<'a> {
    /// Text between the delimiters, trimmed. Text fragments return their raw text.
    pub fn inner(&self) -> &'a str {
        match self.kind {
            FragmentKind::Text => self.raw,
            _ => self.raw[2..self.raw.len() - 2].trim(),
        }
    }

    /// First whitespace-delimited word of a block tag
    pub fn command(&self) -> Option<&'a str> {
        match self.kind {
            FragmentKind::OpenBlock | FragmentKind::CloseBlock => {
                self.inner().split_whitespace().next()
            }
            _ => None,
        }
    }

    /// Everything after the command word of a block tag, trimmed
    pub fn arguments(&self) -> &'a str {
        let inner = self.inner();
        match self.command() {
            Some(command) => inner[command.len()..].trim(),
            None => "",
        }
    }

    /// Byte offset just past the end of the fragment
    pub fn end(&self) -> usize {
        self.start + self.raw.len()
    }
}

/// Which pair of delimiters opened the current tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `{{ ... }}`
    Variable,
    /// `{% ... %}`
    Block,
}

impl Delimiter {
    /// Classify the byte following a `{`
    fn from_opener(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Delimiter::Variable),
            b'%' => Some(Delimiter::Block),
            _ => None,
        }
    }

    /// First byte of the closing pair; the second is always `}`
    fn closer(self) -> u8 {
        match self {
            Delimiter::Variable => b'}',
            Delimiter::Block => b'%',
        }
    }
}

/// Tokenization state machine
///
/// ```text
/// Text ──{──> SeenLBrace ──{ or %──> InTag ──} or %──> SeenCloser ──}──> [Yield] → Text
///   ^             │                    ^                    │
///   └── other ────┘                    └────── other ───────┘
/// ```
///
/// Input that ends in `InTag` or `SeenCloser` is an unterminated tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Scanning literal text
    Text,
    /// Seen `{`, the next byte decides whether a tag starts
    SeenLBrace {
        /// Position of the `{`
        open: usize,
        /// Line of the `{`
        line: usize,
    },
    /// Inside a tag, scanning for the closing pair
    InTag {
        /// Position of the opening delimiter
        open: usize,
        /// Line of the opening delimiter
        line: usize,
        /// Delimiter pair in use
        delim: Delimiter,
    },
    /// Seen the first byte of the closing pair
    SeenCloser {
        /// Position of the opening delimiter
        open: usize,
        /// Line of the opening delimiter
        line: usize,
        /// Delimiter pair in use
        delim: Delimiter,
    },
}

/// Lazy iterator over the fragments of a template
///
/// Cloning a `Tokenizer` gives an independent cursor, and [`tokenize`] can be
/// called again on the same text to restart from the beginning. After the
/// first error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    /// Current byte position
    pos: usize,
    /// Line number at `pos`
    line: usize,
    /// Start of the text run that has not been emitted yet
    text_start: usize,
    /// Line number at `text_start`
    text_line: usize,
    state: ScanState,
    /// Tag found right after a text run, emitted on the next call
    pending: Option<Fragment<'a>>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer over template text
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            text_start: 0,
            text_line: 1,
            state: ScanState::Text,
            pending: None,
            done: false,
        }
    }

    fn text_fragment(&self, end: usize) -> Option<Fragment<'a>> {
        (end > self.text_start).then(|| Fragment {
            kind: FragmentKind::Text,
            raw: &self.source[self.text_start..end],
            start: self.text_start,
            line: self.text_line,
        })
    }

    fn tag_fragment(&self, open: usize, end: usize, line: usize, delim: Delimiter) -> Fragment<'a> {
        let raw = &self.source[open..end];
        let kind = match delim {
            Delimiter::Variable => FragmentKind::Variable,
            Delimiter::Block => {
                let inner = raw[2..raw.len() - 2].trim();
                if inner.split_whitespace().next() == Some(END_KEYWORD) {
                    FragmentKind::CloseBlock
                } else {
                    FragmentKind::OpenBlock
                }
            }
        };
        Fragment {
            kind,
            raw,
            start: open,
            line,
        }
    }

    /// Handle end of input
    fn finish(&mut self) -> Option<Result<Fragment<'a>, TemplateError>> {
        self.done = true;
        match self.state {
            ScanState::Text | ScanState::SeenLBrace { .. } => {
                self.text_fragment(self.source.len()).map(Ok)
            }
            ScanState::InTag { open, line, delim } | ScanState::SeenCloser { open, line, delim } => {
                let closing = match delim {
                    Delimiter::Variable => "}}",
                    Delimiter::Block => "%}",
                };
                Some(Err(TemplateError::syntax(
                    format!("unterminated tag, expected '{}'", closing),
                    excerpt(&self.source[open..]),
                    line,
                )))
            }
        }
    }

    /// Completes a tag whose closing pair ends at `self.pos`
    fn close_tag(&mut self, open: usize, line: usize, delim: Delimiter) -> Fragment<'a> {
        let tag = self.tag_fragment(open, self.pos, line, delim);
        let text = self.text_fragment(open);
        self.text_start = self.pos;
        self.text_line = self.line;
        self.state = ScanState::Text;

        log::trace!("fragment {:?} at line {}", tag.kind, tag.line);
        match text {
            Some(text) => {
                self.pending = Some(tag);
                text
            }
            None => tag,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Fragment<'a>, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(fragment) = self.pending.take() {
            return Some(Ok(fragment));
        }
        if self.done {
            return None;
        }

        let bytes = self.source.as_bytes();
        loop {
            if self.pos >= bytes.len() {
                return self.finish();
            }
            let byte = bytes[self.pos];

            match self.state {
                ScanState::Text => {
                    if byte == b'{' {
                        self.state = ScanState::SeenLBrace {
                            open: self.pos,
                            line: self.line,
                        };
                    } else if byte == b'\n' {
                        self.line += 1;
                    }
                    self.pos += 1;
                }
                ScanState::SeenLBrace { open, line } => match Delimiter::from_opener(byte) {
                    Some(delim) => {
                        self.state = ScanState::InTag { open, line, delim };
                        self.pos += 1;
                    }
                    // Single `{`, reprocess this byte as text
                    None => self.state = ScanState::Text,
                },
                ScanState::InTag { open, line, delim } => {
                    if byte == delim.closer() {
                        self.state = ScanState::SeenCloser { open, line, delim };
                    } else if byte == b'\n' {
                        self.line += 1;
                    }
                    self.pos += 1;
                }
                ScanState::SeenCloser { open, line, delim } => {
                    if byte == b'}' {
                        self.pos += 1;
                        return Some(Ok(self.close_tag(open, line, delim)));
                    }
                    // Not a closing pair, reprocess this byte inside the tag
                    self.state = ScanState::InTag { open, line, delim };
                }
            }
        }
    }
}

/// Tokenize template text into a lazy fragment sequence
pub fn tokenize(source: &str) -> Tokenizer<'_> {
    Tokenizer::new(source)
}

/// First line of `text`, shortened for error messages
fn excerpt(text: &str) -> &str {
    const MAX_CHARS: usize = 40;
    let line = text.lines().next().unwrap_or(text);
    match line.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
