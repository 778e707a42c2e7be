//! Positional message templates.
//!
//! Templates use `{}` for the next argument and `{N}` for the argument at
//! index `N`. `{{` and `}}` produce literal braces. The two placeholder
//! styles cannot be mixed within one template.

use std::fmt::{self, Write as _};

use thiserror::Error;

/// Failure to format a message template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("placeholder {index} has no argument ({provided} provided)")]
    MissingArgument { index: usize, provided: usize },

    #[error("{unused} argument(s) not used by the template")]
    UnusedArguments { unused: usize },

    #[error("unclosed placeholder at byte {position}")]
    UnclosedPlaceholder { position: usize },

    #[error("unmatched '}}' at byte {position}")]
    UnmatchedBrace { position: usize },

    #[error("invalid placeholder '{{{text}}}'")]
    InvalidPlaceholder { text: String },

    #[error("cannot mix automatic and explicit argument indices")]
    MixedIndexing,

    #[error("argument {index} failed to format")]
    ArgumentFormat { index: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Indexing {
    Unknown,
    Automatic,
    Explicit,
}

/// Substitute `args` into `template`.
///
/// # Errors
///
/// Returns a [`TemplateError`] if a placeholder is malformed, refers to a
/// missing argument, or if some argument is never referenced.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; args.len()];
    let mut next = 0;
    let mut indexing = Indexing::Unknown;
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|&(_, c)| c == '{').is_some() => out.push('{'),
            '}' if chars.next_if(|&(_, c)| c == '}').is_some() => out.push('}'),
            '}' => return Err(TemplateError::UnmatchedBrace { position }),
            '{' => {
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => text.push(c),
                        None => return Err(TemplateError::UnclosedPlaceholder { position }),
                    }
                }

                let index = if text.is_empty() {
                    if indexing == Indexing::Explicit {
                        return Err(TemplateError::MixedIndexing);
                    }
                    indexing = Indexing::Automatic;
                    next += 1;
                    next - 1
                } else {
                    if indexing == Indexing::Automatic {
                        return Err(TemplateError::MixedIndexing);
                    }
                    indexing = Indexing::Explicit;
                    text.parse::<usize>()
                        .map_err(|_| TemplateError::InvalidPlaceholder { text })?
                };

                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    provided: args.len(),
                })?;
                used[index] = true;
                write!(out, "{arg}").map_err(|_| TemplateError::ArgumentFormat { index })?;
            }
            c => out.push(c),
        }
    }

    let unused = used.iter().filter(|used| !**used).count();
    if unused > 0 {
        return Err(TemplateError::UnusedArguments { unused });
    }

    Ok(out)
}
