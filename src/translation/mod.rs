use std::borrow::Cow;

mod parsers;
mod scanner;

use parsers::{
    is_block_comment_end, is_block_comment_start, is_line_comment_start, matches_tag,
    try_start_dollar_quote,
};
pub(crate) use scanner::scan_outside_literals;
use scanner::{State, scan_digits};

use crate::error::SqlFacadeError;
use crate::types::RowValues;

/// Target placeholder style for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// MySQL positional `?`.
    Mysql,
    /// SQL Server named `@P1`.
    Mssql,
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

impl PlaceholderStyle {
    fn render(self, index: usize) -> String {
        match self {
            PlaceholderStyle::Mysql => "?".to_string(),
            PlaceholderStyle::Mssql => format!("@P{index}"),
            PlaceholderStyle::Postgres => format!("${index}"),
            PlaceholderStyle::Sqlite => format!("?{index}"),
        }
    }
}

/// SQL rewritten for one backend, plus how to line up parameters with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated<'a> {
    pub sql: Cow<'a, str>,
    /// Zero-based parameter index for each positional `?`, when it differs from `0..n`.
    param_order: Option<Vec<usize>>,
}

impl<'a> Translated<'a> {
    fn untouched(sql: &'a str) -> Self {
        Self {
            sql: Cow::Borrowed(sql),
            param_order: None,
        }
    }

    #[must_use]
    pub fn param_order(&self) -> Option<&[usize]> {
        self.param_order.as_deref()
    }

    /// Arrange caller parameters in the order the translated SQL consumes them.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ParameterError` if a placeholder refers past the end of `params`.
    pub fn arrange<'p>(
        &self,
        params: &'p [RowValues],
    ) -> Result<Cow<'p, [RowValues]>, SqlFacadeError> {
        let Some(order) = &self.param_order else {
            return Ok(Cow::Borrowed(params));
        };
        order
            .iter()
            .map(|&i| {
                params.get(i).cloned().ok_or_else(|| {
                    SqlFacadeError::ParameterError(format!(
                        "placeholder {} has no matching parameter ({} supplied)",
                        i + 1,
                        params.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Cow::Owned)
    }
}

/// Rewrite `?`, `?N`, and `$N` placeholders into the style `target` expects.
///
/// Bare `?` placeholders are numbered left to right. Quoted strings and identifiers, comments,
/// and dollar-quoted blocks are skipped by a lightweight state machine; it may still miss edge
/// cases in complex SQL (PostgreSQL's `?` JSON operators, for one), so leave translation off for
/// such statements.
///
/// ```rust
/// use sql_facade::translation::{PlaceholderStyle, translate_placeholders};
///
/// let t = translate_placeholders("SELECT * FROM t WHERE a = ? AND b = ?", PlaceholderStyle::Mssql, true);
/// assert_eq!(t.sql, "SELECT * FROM t WHERE a = @P1 AND b = @P2");
/// ```
#[must_use]
pub fn translate_placeholders(sql: &str, target: PlaceholderStyle, enabled: bool) -> Translated<'_> {
    if !enabled {
        return Translated::untouched(sql);
    }

    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut order: Vec<usize> = Vec::new();
    let mut next_bare = 0;
    let mut state = State::Normal;
    let mut idx = 0;

    let mut emit = |out: &mut Option<String>, start: usize, end: usize, index: usize| {
        if target == PlaceholderStyle::Mysql {
            order.push(index - 1);
        }
        let rendered = target.render(index);
        if sql[start..end] == rendered {
            return;
        }
        let buf = out.get_or_insert_with(|| String::with_capacity(sql.len() + 8));
        buf.push_str(&sql[copied..start]);
        buf.push_str(&rendered);
        copied = end;
    };

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                b'[' if target == PlaceholderStyle::Mssql => state = State::Bracketed,
                b'#' if target == PlaceholderStyle::Mysql => state = State::LineComment,
                _ if is_line_comment_start(bytes, idx) => {
                    state = State::LineComment;
                    idx += 1;
                }
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment(1);
                    idx += 1;
                }
                b'$' => {
                    if let Some((tag, close)) = try_start_dollar_quote(bytes, idx) {
                        state = State::DollarQuoted(tag);
                        idx = close;
                    } else if let Some((end, n)) = numbered(bytes, idx + 1) {
                        emit(&mut out, idx, end, n);
                        idx = end;
                        continue;
                    }
                }
                b'?' => {
                    if let Some((end, n)) = numbered(bytes, idx + 1) {
                        emit(&mut out, idx, end, n);
                        idx = end;
                    } else {
                        next_bare += 1;
                        emit(&mut out, idx, idx + 1, next_bare);
                        idx += 1;
                    }
                    continue;
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\\' && target == PlaceholderStyle::Mysql {
                    idx += 1;
                } else if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'\\' && target == PlaceholderStyle::Mysql {
                    idx += 1;
                } else if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Backticked => {
                if b == b'`' {
                    if bytes.get(idx + 1) == Some(&b'`') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Bracketed => {
                if b == b']' {
                    if bytes.get(idx + 1) == Some(&b']') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && matches_tag(bytes, idx, tag) {
                    let tag_len = tag.len();
                    state = State::Normal;
                    idx += tag_len + 1;
                }
            }
        }
        idx += 1;
    }

    let sql = match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    };
    let in_order = order.iter().enumerate().all(|(pos, &i)| pos == i);
    Translated {
        sql,
        param_order: (!in_order).then_some(order),
    }
}

/// Parse a 1-based placeholder number starting at `start`.
fn numbered(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let (end, digits) = scan_digits(bytes, start)?;
    let n: usize = digits.parse().ok()?;
    (n > 0).then_some((end, n))
}
