//! Comment and literal stripping.

use super::StructuralError;

/// Scanner state while walking the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Literal(char),
}

/// Removes comments and the contents of string/char literals.
///
/// The result keeps every line break of the input, so line numbers computed
/// on the sanitized text match the original file:
///
/// - `// ...` is dropped up to (not including) the next line break.
/// - `/* ... */` is dropped, but line breaks inside it are kept.
/// - `"..."` and `'...'` keep their delimiters; everything between them is
///   dropped. A backslash escapes the following character, whatever it is.
///   Line breaks inside a literal are kept, including the one of a
///   backslash-newline continuation.
///
/// # Errors
///
/// Returns [`StructuralError::UnterminatedComment`] or
/// [`StructuralError::UnterminatedLiteral`] when a block comment or literal
/// is still open at the end of the input.
///
/// # Example
///
/// ```
/// use cstyle_core::syntax::sanitize;
///
/// let clean = sanitize("puts(\"{\"); // }\n").unwrap();
/// assert_eq!(clean, "puts(\"\"); \n");
/// ```
pub fn sanitize(text: &str) -> Result<String, StructuralError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            State::Code => match (c, next) {
                ('/', Some('/')) => {
                    state = State::LineComment;
                    i += 2;
                }
                ('/', Some('*')) => {
                    state = State::BlockComment;
                    i += 2;
                }
                ('"' | '\'', _) => {
                    out.push(c);
                    state = State::Literal(c);
                    i += 1;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            },
            State::LineComment => {
                if c == '\n' {
                    // the break itself goes through the code path
                    state = State::Code;
                } else {
                    i += 1;
                }
            }
            State::BlockComment => {
                if c == '*' && next == Some('/') {
                    state = State::Code;
                    i += 2;
                } else {
                    if c == '\n' {
                        out.push('\n');
                    }
                    i += 1;
                }
            }
            State::Literal(quote) => {
                if c == '\\' {
                    if next == Some('\n') {
                        out.push('\n');
                    }
                    i += 2;
                } else if c == quote {
                    out.push(quote);
                    state = State::Code;
                    i += 1;
                } else {
                    if c == '\n' {
                        out.push('\n');
                    }
                    i += 1;
                }
            }
        }
    }

    match state {
        State::Code | State::LineComment => Ok(out),
        State::BlockComment => Err(StructuralError::UnterminatedComment),
        State::Literal(quote) => Err(StructuralError::UnterminatedLiteral { quote }),
    }
}
