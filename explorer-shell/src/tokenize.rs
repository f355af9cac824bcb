//! Splits a command line into arguments.
//!
//! Whitespace separates arguments; single quotes keep their content literally,
//! double quotes allow `\"` and `\\`, and a backslash outside quotes escapes
//! the next character.

#[derive(Debug, PartialEq, Eq)]
pub enum TokenizeError {
    UnterminatedQuote(char),
    TrailingEscape,
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedQuote(quote) => write!(f, "unterminated {quote} quote"),
            Self::TrailingEscape => write!(f, "line ends with a dangling backslash"),
        }
    }
}

pub fn split_line(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            '\'' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(TokenizeError::UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(TokenizeError::UnterminatedQuote('"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(TokenizeError::UnterminatedQuote('"')),
                    }
                }
            }
            '\\' => match chars.next() {
                Some(c) => {
                    in_arg = true;
                    current.push(c);
                }
                None => return Err(TokenizeError::TrailingEscape),
            },
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }

    if in_arg {
        args.push(current);
    }
    Ok(args)
}
