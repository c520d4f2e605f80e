//! Shell-style tokenizer
//!
//! Splits table-identifier commands (`create_table`, `drop_table`, `info`) into
//! words. Whitespace separates words outside quotes. Single quotes keep their
//! content verbatim. Inside double quotes a backslash escapes only `"` and `\`.
//! Outside quotes a backslash escapes any character. Quoted and unquoted pieces
//! next to each other join into one word.

use crate::error::{Error, Result};

/// Shell-style lexer
pub struct Lexer {
    /// Input characters
    input: Vec<char>,
    /// Current position in input
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Split the entire input into words
    pub fn tokenize(&mut self) -> Result<Vec<String>> {
        let mut words = Vec::new();
        while let Some(word) = self.next_word()? {
            words.push(word);
        }
        Ok(words)
    }

    /// Read the next word, `None` at end of input
    fn next_word(&mut self) -> Result<Option<String>> {
        self.skip_whitespace();
        if self.is_at_end() {
            return Ok(None);
        }

        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                break;
            }
            self.advance();
            match ch {
                '\'' => self.read_single_quoted(&mut word)?,
                '"' => self.read_double_quoted(&mut word)?,
                '\\' => match self.peek() {
                    Some(escaped) => {
                        self.advance();
                        word.push(escaped);
                    }
                    None => return Err(Error::syntax("no character after escape")),
                },
                _ => word.push(ch),
            }
        }

        Ok(Some(word))
    }

    fn read_single_quoted(&mut self, word: &mut String) -> Result<()> {
        let start = self.position - 1;
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\'' {
                return Ok(());
            }
            word.push(ch);
        }
        Err(unterminated(start))
    }

    fn read_double_quoted(&mut self, word: &mut String) -> Result<()> {
        let start = self.position - 1;
        while let Some(ch) = self.peek() {
            self.advance();
            match ch {
                '"' => return Ok(()),
                '\\' => match self.peek() {
                    Some(next @ ('"' | '\\')) => {
                        self.advance();
                        word.push(next);
                    }
                    _ => word.push('\\'),
                },
                _ => word.push(ch),
            }
        }
        Err(unterminated(start))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

fn unterminated(position: usize) -> Error {
    Error::syntax(format!("no closing quotation for quote at position {}", position))
}

/// Tokenize `input` shell-style
pub fn split_words(input: &str) -> Result<Vec<String>> {
    Lexer::new(input).tokenize()
}
