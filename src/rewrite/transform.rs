//! Line-oriented pattern stripping over raw bytes.
use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use regex::bytes::Regex;

/// Remove every non-overlapping match of `pattern` from `line`.
///
/// Borrows `line` unchanged when nothing matches. Works on raw bytes, so
/// lines in any encoding pass through.
///
/// # Examples
///
/// ```
/// use nightrover::rewrite::{default_pattern, strip_line};
///
/// let pattern = default_pattern();
/// assert_eq!(&strip_line(&pattern, br#"video_3d = "full_frame" other="x""#)[..], br#"other="x""#);
/// assert_eq!(&strip_line(&pattern, b"caf\xe9")[..], b"caf\xe9");
/// ```
#[must_use]
pub fn strip_line<'a>(pattern: &Regex, line: &'a [u8]) -> Cow<'a, [u8]> {
    pattern.replace_all(line, &b""[..])
}

/// Copy `input` to `output` line by line, stripping `pattern` from each line.
///
/// The substitution sees the line content only; the terminator each line was
/// read with (`\n`, `\r\n`, or nothing on an unterminated last line) is written
/// back verbatim, so the output has exactly as many lines as the input.
///
/// # Errors
///
/// Returns the first read or write error. Output written before the error is
/// left in place.
pub fn transform<R: BufRead, W: Write>(mut input: R, pattern: &Regex, mut output: W) -> io::Result<()> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        let (content, ending) = split_line_ending(&line);
        output.write_all(&strip_line(pattern, content))?;
        output.write_all(ending)?;
    }
}

/// Split a line returned by [`BufRead::read_until`] into content and terminator.
fn split_line_ending(line: &[u8]) -> (&[u8], &[u8]) {
    if let Some(content) = line.strip_suffix(b"\r\n") {
        (content, &b"\r\n"[..])
    } else if let Some(content) = line.strip_suffix(b"\n") {
        (content, &b"\n"[..])
    } else {
        (line, &b""[..])
    }
}
