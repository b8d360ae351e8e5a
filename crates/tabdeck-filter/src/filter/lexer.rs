//! Lexer (tokenizer) for filter expressions.
//!
//! Splits a filter string on whitespace while keeping quoted text and
//! `/regex/` literals intact. The lexer never fails: an unterminated quote
//! or regex simply runs to the end of the input, and the parser decides
//! what the resulting token means.

use std::iter::Peekable;
use std::str::CharIndices;

/// Flag letters allowed after a closing regex slash.
pub(crate) const REGEX_FLAGS: &str = "gimuy";

/// A raw token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, quotes and slashes included.
    pub text: String,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Quoted(char),
    Regex,
}

/// Lexer for tokenizing filter expressions.
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    state: State,
    /// The character consumed just before the current one.
    previous: Option<char>,
    current: String,
    start: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            state: State::Plain,
            previous: None,
            current: String::new(),
            start: 0,
            tokens: Vec::new(),
        }
    }

    /// Consumes the input and returns its tokens in order.
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some((position, c)) = self.chars.next() {
            match self.state {
                State::Quoted(quote) => {
                    self.current.push(c);
                    if c == quote {
                        self.state = State::Plain;
                    }
                }
                State::Regex => {
                    self.current.push(c);
                    if c == '/' && self.previous != Some('\\') {
                        self.read_flags();
                        self.state = State::Plain;
                        continue;
                    }
                }
                State::Plain if c.is_whitespace() => self.finish_token(),
                State::Plain => {
                    if self.current.is_empty() {
                        self.start = position;
                    }
                    match c {
                        '"' | '\'' => self.state = State::Quoted(c),
                        '/' if self.at_regex_start() => self.state = State::Regex,
                        _ => {}
                    }
                    self.current.push(c);
                }
            }
            self.previous = Some(c);
        }

        self.finish_token();
        self.tokens
    }

    /// A `/` opens a regex at the start of the input, after whitespace, after
    /// a field's `:`, or right after a token's leading `-`.
    fn at_regex_start(&self) -> bool {
        match self.previous {
            None => true,
            Some(p) if p.is_whitespace() || p == ':' => true,
            Some('-') => self.current == "-",
            Some(_) => false,
        }
    }

    /// Reads regex flag letters following a closing slash.
    fn read_flags(&mut self) {
        self.previous = Some('/');
        while let Some(&(_, c)) = self.chars.peek() {
            if !REGEX_FLAGS.contains(c) {
                break;
            }
            self.current.push(c);
            self.previous = Some(c);
            self.chars.next();
        }
    }

    /// Emits the current token, if it holds anything but whitespace.
    fn finish_token(&mut self) {
        let text = self.current.trim_end();
        if !text.is_empty() {
            self.tokens.push(Token {
                text: text.to_string(),
                position: self.start,
            });
        }
        self.current.clear();
    }
}
