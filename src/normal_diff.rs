//! A parser for two-way diffs in normal format.
//!
//! The aim of this module is to produce ranges that refer to the original
//! input bytes. Captured lines are never copied: each one is a byte range
//! into the buffer the subsidiary diff program wrote. This keeps the parser
//! binary-safe; line content may contain NUL bytes or any other byte value.

use core::ops::Range;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Add,
    Change,
    Delete,
}

/// One hunk of a two-way diff. Side 0 holds the changed file, side 1 the
/// file it was compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Inclusive low line number per side. An empty range is represented
    /// as `lo == hi + 1`, positioned where lines would be inserted.
    pub lo: [usize; 2],
    /// Inclusive high line number per side.
    pub hi: [usize; 2],
    /// Captured lines per side, as byte ranges into the input. A range
    /// includes the terminating newline unless the source line had none.
    pub lines: [Vec<Range<usize>>; 2],
}

#[derive(Debug)]
pub struct ParseError<'a> {
    input: &'a [u8],
    pos: usize,
    expected: &'static str,
}

impl<'a> ParseError<'a> {
    fn new(parser: &Parser<'a>, expected: &'static str) -> Self {
        Self {
            input: parser.input,
            pos: parser.pos,
            expected,
        }
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rest = &self.input[self.pos.min(self.input.len())..];
        let line = rest.split(|&b| b == b'\n').next().unwrap_or(rest);
        write!(
            f,
            "expected {} at {:?}",
            self.expected,
            String::from_utf8_lossy(line)
        )
    }
}

impl std::error::Error for ParseError<'_> {}

pub struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    keep_newlines: bool,
    notes: Vec<Range<usize>>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            keep_newlines: false,
            notes: Vec::new(),
        }
    }

    /// When set, a captured line that the diff flagged as having no final
    /// newline keeps the newline the diff printed for it, and the flag
    /// line itself is recorded as a note (see [`Parser::notes`]). By
    /// default the newline is stripped from the captured range instead.
    ///
    /// Editor scripts cannot express a missing final newline, so ed-style
    /// output wants the newline kept and the note surfaced to the user.
    pub fn keep_incomplete_newlines(mut self, keep: bool) -> Self {
        self.keep_newlines = keep;
        self
    }

    /// Parses the whole input as a sequence of normal-format diff blocks.
    ///
    /// The returned line ranges refer to the original input bytes.
    ///
    /// # Example
    ///
    /// ```
    /// let input = b"2c2\n< foo\n---\n> bar\n";
    ///
    /// let blocks = mergu::normal_diff::Parser::new(input).parse_blocks().unwrap();
    /// assert_eq!(blocks[0].lo, [2, 2]);
    /// assert_eq!(blocks[0].lines[1], vec![16..20]); // "bar\n"
    /// ```
    pub fn parse_blocks(&mut self) -> Result<Vec<Block>, ParseError<'a>> {
        let mut blocks = vec![];

        if self.input.is_empty() {
            return Ok(blocks);
        }

        if self.input.last() != Some(&b'\n') {
            self.pos = self.input.len();
            return Err(ParseError::new(self, "*final newline*"));
        }

        while self.pos < self.input.len() {
            blocks.push(self.parse_block()?);
        }

        Ok(blocks)
    }

    /// Flag lines (`\ No newline at end of file`) recorded while parsing
    /// with [`Parser::keep_incomplete_newlines`] enabled, as byte ranges
    /// including their terminating newline.
    pub fn notes(&self) -> &[Range<usize>] {
        &self.notes
    }

    fn parse_block(&mut self) -> Result<Block, ParseError<'a>> {
        let (mut lo, mut hi) = ([0; 2], [0; 2]);

        (lo[0], hi[0]) = self.parse_range()?;
        self.skip_blanks();
        let kind = match self.peek_byte() {
            Some(b'a') => BlockKind::Add,
            Some(b'c') => BlockKind::Change,
            Some(b'd') => BlockKind::Delete,
            _ => return Err(ParseError::new(self, "'a', 'c' or 'd'")),
        };
        self.pos += 1;
        (lo[1], hi[1]) = self.parse_range()?;
        self.skip_blanks();
        self.read(b"\n")?;

        // Empty-range convention: an add has no lines on side 0, a delete
        // none on side 1. The control line names the insertion point, so
        // bumping lo leaves lo == hi + 1.
        match kind {
            BlockKind::Add => lo[0] += 1,
            BlockKind::Delete => lo[1] += 1,
            BlockKind::Change => (),
        }
        for side in 0..2 {
            // Line numbers count from 1; a 0 can only appear as an add or
            // delete insertion point, which the bump has already raised.
            if lo[side] == 0 || lo[side] > hi[side] + 1 {
                return Err(ParseError::new(self, "*ascending range*"));
            }
        }

        let lines_old = match kind {
            BlockKind::Add => vec![],
            _ => self.parse_side(b'<', hi[0] + 1 - lo[0])?,
        };
        if kind == BlockKind::Change {
            self.read(b"---\n")?;
        }
        let lines_new = match kind {
            BlockKind::Delete => vec![],
            _ => self.parse_side(b'>', hi[1] + 1 - lo[1])?,
        };

        Ok(Block {
            kind,
            lo,
            hi,
            lines: [lines_old, lines_new],
        })
    }

    fn parse_side(&mut self, marker: u8, count: usize) -> Result<Vec<Range<usize>>, ParseError<'a>> {
        let mut lines = vec![];

        for _ in 0..count {
            if self.peek_byte() != Some(marker) {
                return Err(ParseError::new(
                    self,
                    if marker == b'<' { "'< '" } else { "'> '" },
                ));
            }
            self.pos += 1;
            self.read(b" ")?;
            lines.push(self.read_through_newline()?);

            // A following backslash line means the line above had no
            // newline in the source file.
            if self.peek_byte() == Some(b'\\') {
                let flag = self.read_through_newline()?;
                if self.keep_newlines {
                    self.notes.push(flag);
                } else if let Some(line) = lines.last_mut() {
                    line.end -= 1;
                }
            }
        }

        Ok(lines)
    }

    fn parse_range(&mut self) -> Result<(usize, usize), ParseError<'a>> {
        self.skip_blanks();
        let lo = self.read_number()?;
        self.skip_blanks();
        let hi = if self.peek_byte() == Some(b',') {
            self.pos += 1;
            self.read_number()?
        } else {
            lo
        };
        Ok((lo, hi))
    }

    fn read_number(&mut self) -> Result<usize, ParseError<'a>> {
        let start = self.pos;
        let mut value: usize = 0;

        while let Some(digit) = self.peek_byte().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(usize::from(digit - b'0')))
                .ok_or_else(|| ParseError::new(self, "*number*"))?;
            self.pos += 1;
        }

        if self.pos == start {
            return Err(ParseError::new(self, "*number*"));
        }
        // Keep enough headroom for the range arithmetic downstream.
        if value > usize::MAX / 4 {
            return Err(ParseError::new(self, "*number*"));
        }
        Ok(value)
    }

    fn read_through_newline(&mut self) -> Result<Range<usize>, ParseError<'a>> {
        let start = self.pos;

        while let Some(byte) = self.peek_byte() {
            self.pos += 1;
            if byte == b'\n' {
                return Ok(start..self.pos);
            }
        }

        Err(ParseError::new(self, "*newline*"))
    }

    fn read(&mut self, expected: &'static [u8]) -> Result<(), ParseError<'a>> {
        if !self.input[self.pos..].starts_with(expected) {
            return Err(ParseError::new(
                self,
                match expected {
                    b"\n" => "*newline*",
                    b"---\n" => "'---'",
                    _ => "' '",
                },
            ));
        }
        self.pos += expected.len();
        Ok(())
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek_byte(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }
}
