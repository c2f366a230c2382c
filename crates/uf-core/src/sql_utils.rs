//! SQL text utilities: identifier quoting and statement splitting.
//!
//! Quoting prevents injection when the journal table name is spliced into
//! dynamic SQL. Splitting turns a script body into individually executable
//! statement batches using the target dialect's `;` separator convention.

/// Quote a SQL identifier to prevent injection.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use uf_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("schema_versions"), r#""schema_versions""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a schema-qualified name from its parts.
///
/// # Examples
/// ```
/// use uf_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("upflow", "schema_versions"), r#""upflow"."schema_versions""#);
/// ```
pub fn quote_qualified(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

#[derive(Clone, Copy, PartialEq)]
enum SplitState {
    Normal,
    SingleQuote,
    DoubleQuote,
    LineComment,
    BlockComment,
}

/// Split a script body into `;`-terminated statement batches.
///
/// Separator semicolons are recognized only outside single-quoted literals,
/// double-quoted identifiers, `--` line comments, and `/* */` block comments.
/// Quote escaping by doubling (`''`, `""`) is honored. Comments are kept as
/// part of the statement they precede. Batches containing nothing but
/// whitespace and comments are dropped; a trailing batch without a `;` is
/// kept.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut has_content = false;
    let mut state = SplitState::Normal;

    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            SplitState::Normal => match c {
                ';' => {
                    if has_content {
                        statements.push(current.trim().to_string());
                    }
                    current.clear();
                    has_content = false;
                }
                '\'' => {
                    state = SplitState::SingleQuote;
                    has_content = true;
                    current.push(c);
                }
                '"' => {
                    state = SplitState::DoubleQuote;
                    has_content = true;
                    current.push(c);
                }
                '-' if chars.peek() == Some(&'-') => {
                    state = SplitState::LineComment;
                    current.push(c);
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = SplitState::BlockComment;
                    current.push(c);
                }
                _ => {
                    if !c.is_whitespace() {
                        has_content = true;
                    }
                    current.push(c);
                }
            },
            SplitState::SingleQuote => {
                current.push(c);
                if c == '\'' {
                    if chars.peek() == Some(&'\'') {
                        // escaped quote, stay inside the literal
                        current.push('\'');
                        chars.next();
                    } else {
                        state = SplitState::Normal;
                    }
                }
            }
            SplitState::DoubleQuote => {
                current.push(c);
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        state = SplitState::Normal;
                    }
                }
            }
            SplitState::LineComment => {
                current.push(c);
                if c == '\n' {
                    state = SplitState::Normal;
                }
            }
            SplitState::BlockComment => {
                current.push(c);
                if c == '*' && chars.peek() == Some(&'/') {
                    current.push('/');
                    chars.next();
                    state = SplitState::Normal;
                }
            }
        }
    }

    if has_content {
        statements.push(current.trim().to_string());
    }

    statements
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
