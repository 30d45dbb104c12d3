//! Tokenizer for the GNU make depfile dialect.
//!
//! Handles backslash line continuations (`\n` and `\r\n`), escaped spaces
//! (`\ `), escaped hashes (`\#`), doubled dollars (`$$`), comments, and
//! Windows drive letters (a `:` not followed by whitespace belongs to the path).

use crate::error::DepfileError;
use crate::normalize::normalize_path;
use crate::DepfileEntry;

/// Parses depfile text into its rules.
///
/// Empty input (or input containing only comments and blank lines) yields an
/// empty vector. Every path is lexically normalized with [`normalize_path`].
pub fn parse(content: &str) -> Result<Vec<DepfileEntry>, DepfileError> {
    let mut lexer = Lexer {
        source: content.as_bytes(),
        pos: 0,
        line: 1,
        entries: Vec::new(),
        current: DepfileEntry::default(),
        seen_colon: false,
    };
    lexer.run()?;
    Ok(lexer.entries)
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    line: usize,
    entries: Vec<DepfileEntry>,
    current: DepfileEntry,
    seen_colon: bool,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), DepfileError> {
        loop {
            self.skip_blanks();
            let Some(c) = self.peek() else {
                self.finish_rule()?;
                return Ok(());
            };
            match c {
                b'\n' => {
                    self.pos += 1;
                    self.finish_rule()?;
                    self.line += 1;
                }
                b'#' => self.skip_comment(),
                b':' if is_separator(self.peek_at(1)) => {
                    self.pos += 1;
                    self.colon()?;
                }
                _ => {
                    let (token, ends_rule_list) = self.next_token();
                    if !token.is_empty() {
                        let token = normalize_path(&token);
                        if self.seen_colon {
                            self.current.paths.push(token);
                        } else {
                            self.current.rules.push(token);
                        }
                    }
                    if ends_rule_list {
                        self.colon()?;
                    }
                }
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    /// Length of a backslash continuation starting at the current position,
    /// or 0 if there is none.
    fn continuation_len(&self) -> usize {
        match (self.peek(), self.peek_at(1), self.peek_at(2)) {
            (Some(b'\\'), Some(b'\n'), _) => 2,
            (Some(b'\\'), Some(b'\r'), Some(b'\n')) => 3,
            _ => 0,
        }
    }

    fn skip_blanks(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => self.pos += 1,
                Some(b'\\') => {
                    let len = self.continuation_len();
                    if len == 0 {
                        return;
                    }
                    self.pos += len;
                    self.line += 1;
                }
                _ => return,
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                return;
            }
            self.pos += 1;
        }
    }

    /// Reads one path token. The flag is set when the token was terminated
    /// by the rule separator `:`.
    fn next_token(&mut self) -> (String, bool) {
        let mut buf = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\r' | b'\n' => break,
                b'\\' => {
                    if self.continuation_len() > 0 {
                        break;
                    }
                    match self.peek_at(1) {
                        Some(b' ') => {
                            buf.push(b' ');
                            self.pos += 2;
                        }
                        Some(b'#') => {
                            buf.push(b'#');
                            self.pos += 2;
                        }
                        Some(b'\\') if self.peek_at(2) == Some(b' ') => {
                            buf.push(b'\\');
                            self.pos += 2;
                        }
                        _ => {
                            buf.push(b'\\');
                            self.pos += 1;
                        }
                    }
                }
                b'$' if self.peek_at(1) == Some(b'$') => {
                    buf.push(b'$');
                    self.pos += 2;
                }
                b':' if is_separator(self.peek_at(1)) => {
                    self.pos += 1;
                    return (bytes_to_string(buf), true);
                }
                _ => {
                    buf.push(c);
                    self.pos += 1;
                }
            }
        }
        (bytes_to_string(buf), false)
    }

    fn colon(&mut self) -> Result<(), DepfileError> {
        if self.seen_colon {
            return Err(DepfileError::UnexpectedColon { line: self.line });
        }
        if self.current.rules.is_empty() {
            return Err(DepfileError::MissingTarget { line: self.line });
        }
        self.seen_colon = true;
        Ok(())
    }

    fn finish_rule(&mut self) -> Result<(), DepfileError> {
        if !self.seen_colon {
            if self.current.rules.is_empty() {
                return Ok(());
            }
            return Err(DepfileError::MissingColon { line: self.line });
        }
        self.entries.push(std::mem::take(&mut self.current));
        self.seen_colon = false;
        Ok(())
    }
}

fn is_separator(c: Option<u8>) -> bool {
    matches!(c, None | Some(b' ' | b'\t' | b'\r' | b'\n'))
}

// Only ASCII bytes are ever dropped or inserted, so valid UTF-8 input stays valid.
fn bytes_to_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
