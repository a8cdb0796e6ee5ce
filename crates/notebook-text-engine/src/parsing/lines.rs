/// A single line of the input document, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef<'a> {
    /// Zero-based line number.
    pub number: usize,
    pub text: &'a str,
}

/// Iterator over the lines of a document. See [`split_lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
    number: usize,
}

/// Splits `text` on `\r\n`, `\r` or `\n`.
///
/// The record count is preserved: `n` terminators always produce `n + 1`
/// lines, so a trailing newline yields a trailing empty line and the empty
/// string yields a single empty line.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines {
        rest: Some(text),
        number: 0,
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let number = self.number;
        self.number += 1;

        match rest.find(['\r', '\n']) {
            Some(idx) => {
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&rest[idx + terminator..]);
                Some(LineRef {
                    number,
                    text: &rest[..idx],
                })
            }
            None => {
                self.rest = None;
                Some(LineRef { number, text: rest })
            }
        }
    }
}
