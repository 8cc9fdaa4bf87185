use super::PlaceholderStyle;
use super::parsers::{
    is_block_comment_end, is_block_comment_start, is_line_comment_start, matches_tag,
    try_start_dollar_quote,
};

#[derive(Clone)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backticked,
    Bracketed,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

pub(super) fn scan_digits(bytes: &[u8], start: usize) -> Option<(usize, &str)> {
    let mut idx = start;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == start {
        None
    } else {
        std::str::from_utf8(&bytes[start..idx])
            .ok()
            .map(|digits| (idx, digits))
    }
}

/// Copy of `sql` with quoted strings, quoted identifiers, comments, and dollar-quoted blocks
/// blanked to spaces, so keyword searches only see statement text.
///
/// Quoting follows the backend behind `style`: backslash escapes and `#` comments for MySQL,
/// `[...]` identifiers for SQL Server and SQLite.
pub(crate) fn scan_outside_literals(sql: &str, style: PlaceholderStyle) -> String {
    let bytes = sql.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let start = idx;
        let b = bytes[idx];
        let code = match state {
            State::Normal => match b {
                b'\'' => {
                    state = State::SingleQuoted;
                    false
                }
                b'"' => {
                    state = State::DoubleQuoted;
                    false
                }
                b'`' => {
                    state = State::Backticked;
                    false
                }
                b'[' if matches!(style, PlaceholderStyle::Mssql | PlaceholderStyle::Sqlite) => {
                    state = State::Bracketed;
                    false
                }
                b'#' if style == PlaceholderStyle::Mysql => {
                    state = State::LineComment;
                    false
                }
                _ if is_line_comment_start(bytes, idx) => {
                    state = State::LineComment;
                    idx += 1;
                    false
                }
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment(1);
                    idx += 1;
                    false
                }
                b'$' => match try_start_dollar_quote(bytes, idx) {
                    Some((tag, close)) => {
                        state = State::DollarQuoted(tag);
                        idx = close;
                        false
                    }
                    None => true,
                },
                _ => true,
            },
            State::SingleQuoted | State::DoubleQuoted => {
                let quote = if matches!(state, State::SingleQuoted) { b'\'' } else { b'"' };
                if b == b'\\' && style == PlaceholderStyle::Mysql {
                    idx += 1;
                } else if b == quote {
                    if bytes.get(idx + 1) == Some(&quote) {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
                false
            }
            State::Backticked | State::Bracketed => {
                let close = if matches!(state, State::Backticked) { b'`' } else { b']' };
                if b == close {
                    if bytes.get(idx + 1) == Some(&close) {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
                false
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                    true
                } else {
                    false
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
                false
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && matches_tag(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
                false
            }
        };
        let end = (idx + 1).min(bytes.len());
        if code {
            out.extend_from_slice(&bytes[start..end]);
        } else {
            out.resize(out.len() + (end - start), b' ');
        }
        idx = end;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_literals_and_comments_but_keeps_length() {
        let sql = "INSERT INTO t (a) VALUES ('returning x') -- returning\n/* output inserted. */";
        let masked = scan_outside_literals(sql, PlaceholderStyle::Sqlite);
        assert_eq!(masked.len(), sql.len());
        assert!(masked.starts_with("INSERT INTO t (a) VALUES ("));
        assert!(!masked.to_ascii_lowercase().contains("returning"));
        assert!(!masked.to_ascii_lowercase().contains("output"));
    }

    #[test]
    fn quoting_follows_the_backend() {
        let sql = r"SELECT 'it\'s', [a] FROM t # note";
        let mysql = scan_outside_literals(sql, PlaceholderStyle::Mysql);
        assert!(mysql.contains("[a] FROM t"));
        assert!(!mysql.contains("note"));

        let mssql = scan_outside_literals("SELECT [returning], $$x$$ FROM t", PlaceholderStyle::Mssql);
        assert!(mssql.ends_with("FROM t"));
        assert!(!mssql.contains("returning"));
        assert!(!mssql.contains('x'));
    }

    #[test]
    fn multibyte_text_inside_quotes_is_blanked_whole() {
        let masked = scan_outside_literals("SELECT 'héllo' AS g", PlaceholderStyle::Postgres);
        assert!(masked.starts_with("SELECT "));
        assert!(masked.ends_with(" AS g"));
        assert!(!masked.contains('h'));
    }
}
