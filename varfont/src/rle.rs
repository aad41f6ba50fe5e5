// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run-length coding of packed column bytes.
//!
//! The stream is a sequence of tokens, each introduced by a control byte:
//!
//! - `0x01..=0x7F`: a repeat token. The next byte is repeated that many times.
//! - `0x81..=0xFF`: a literal token. The low 7 bits give the number of bytes
//!   that follow verbatim.
//!
//! A control byte of `0x00` or `0x80` is never produced.
//!
//! The encoder makes one forward pass and only ever looks back at its pending
//! group of at most [`MAX_RUN`] bytes, so the decoder on the display side gets
//! away with a byte counter and a repeat flag.

use alloc::vec::Vec;

use crate::{Error, ErrorKind};

/// Longest run a single token can describe.
pub const MAX_RUN: usize = 127;

const LITERAL_FLAG: u8 = 0x80;

/// One decoded run-length token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `value` repeated `len` times.
    Repeat {
        /// Number of repetitions, in `1..=127`.
        len: u8,
        /// The repeated byte.
        value: u8,
    },
    /// Bytes copied verbatim, between 1 and 127 of them.
    Literal(&'a [u8]),
}

impl Token<'_> {
    /// Number of bytes this token expands to.
    pub fn decoded_len(&self) -> usize {
        match self {
            Token::Repeat { len, .. } => usize::from(*len),
            Token::Literal(bytes) => bytes.len(),
        }
    }

    /// Number of bytes this token occupies in the encoded stream.
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::Repeat { .. } => 2,
            Token::Literal(bytes) => 1 + bytes.len(),
        }
    }
}

/// Encodes `data` into a token stream.
///
/// Empty input produces an empty stream.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut encoder = Encoder::new();
    for &byte in data {
        encoder.push(byte);
    }
    encoder.finish()
}

/// Streaming run-length encoder.
///
/// Bytes accumulate in a pending group until the encoder can tell whether
/// the group is a run of one value (emitted as a repeat token) or a mix of
/// values (emitted as a literal token).
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    group: Vec<u8>,
    /// The group holds more than one distinct value.
    mixed: bool,
    out: Vec<u8>,
}

impl Encoder {
    /// Creates an encoder with an empty output.
    pub fn new() -> Self {
        Self {
            group: Vec::with_capacity(MAX_RUN),
            mixed: false,
            out: Vec::new(),
        }
    }

    /// Feeds one byte.
    pub fn push(&mut self, byte: u8) {
        if self.group.len() < 2 {
            self.append(byte);
        } else if self.group.last() == Some(&byte) {
            if self.mixed {
                // The matching pair seeds a new run, the rest goes out verbatim.
                let literal_len = self.group.len() - 1;
                emit_literal(&mut self.out, &self.group[..literal_len]);
                self.group.clear();
                self.group.extend([byte, byte]);
                self.mixed = false;
            } else {
                self.append(byte);
            }
        } else if self.mixed {
            self.append(byte);
        } else {
            self.flush();
            self.append(byte);
        }

        if self.group.len() == MAX_RUN {
            self.flush();
        }
    }

    /// Flushes the pending group and returns the encoded stream.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.out
    }

    fn append(&mut self, byte: u8) {
        if self.group.first().is_some_and(|&first| first != byte) {
            self.mixed = true;
        }
        self.group.push(byte);
    }

    fn flush(&mut self) {
        if self.group.is_empty() {
            return;
        }
        if self.mixed {
            emit_literal(&mut self.out, &self.group);
        } else {
            emit_repeat(&mut self.out, self.group.len(), self.group[0]);
        }
        self.group.clear();
        self.mixed = false;
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the pending group never exceeds MAX_RUN bytes"
)]
fn emit_repeat(out: &mut Vec<u8>, len: usize, value: u8) {
    debug_assert!((1..=MAX_RUN).contains(&len), "repeat length {len}");
    out.extend([len as u8, value]);
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the pending group never exceeds MAX_RUN bytes"
)]
fn emit_literal(out: &mut Vec<u8>, bytes: &[u8]) {
    debug_assert!((1..=MAX_RUN).contains(&bytes.len()), "literal length");
    out.push(LITERAL_FLAG | bytes.len() as u8);
    out.extend_from_slice(bytes);
}

/// Iterates over the tokens of an encoded stream.
///
/// Yields an error and stops at the first malformed token.
pub fn tokens(data: &[u8]) -> Tokens<'_> {
    Tokens { data, pos: 0 }
}

/// Iterator returned by [`tokens`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Offset of the next control byte in the stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn fail(&mut self, err: Error) -> Option<Result<Token<'a>, Error>> {
        self.pos = self.data.len();
        Some(Err(err))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let &control = self.data.get(start)?;
        let len = usize::from(control & !LITERAL_FLAG);
        if len == 0 {
            return self.fail(Error::new(ErrorKind::InvalidToken, None, start));
        }
        if control & LITERAL_FLAG != 0 {
            let end = start + 1 + len;
            let Some(bytes) = self.data.get(start + 1..end) else {
                return self.fail(Error::truncated(self.data.len()));
            };
            self.pos = end;
            Some(Ok(Token::Literal(bytes)))
        } else {
            let Some(&value) = self.data.get(start + 1) else {
                return self.fail(Error::truncated(self.data.len()));
            };
            self.pos = start + 2;
            Some(Ok(Token::Repeat {
                len: control,
                value,
            }))
        }
    }
}

/// Decodes tokens until exactly `len` bytes have been produced.
///
/// This mirrors the display driver, which stops reading as soon as a glyph
/// is complete: trailing tokens are ignored and an overlong final token is
/// cut short.
pub fn decode(data: &[u8], len: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(len);
    if len == 0 {
        return Ok(out);
    }
    for token in tokens(data) {
        expand(token?, &mut out);
        if out.len() >= len {
            out.truncate(len);
            return Ok(out);
        }
    }
    Err(Error::truncated(data.len()))
}

/// Decodes every token in `data`.
pub fn decode_all(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    for token in tokens(data) {
        expand(token?, &mut out);
    }
    Ok(out)
}

fn expand(token: Token<'_>, out: &mut Vec<u8>) {
    match token {
        Token::Repeat { len, value } => out.resize(out.len() + usize::from(len), value),
        Token::Literal(bytes) => out.extend_from_slice(bytes),
    }
}
