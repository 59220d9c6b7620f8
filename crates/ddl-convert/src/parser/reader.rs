//! Token-level statement reader.

use sqlparser::tokenizer::Token;

use super::statement::{
    ColumnComment, ColumnDef, CreateTable, Ident, ObjectName, SpecToken, Statement, TableComment,
};
use crate::core::schema::RawColumnType;

/// Words between `CREATE` and `TABLE` that do not change the table shape.
const CREATE_MODIFIERS: &[&str] = &["OR", "REPLACE", "GLOBAL", "LOCAL", "TEMPORARY", "TEMP", "PRIVATE"];

/// Words that open a table-level element rather than a column.
const CONSTRAINT_STARTS: &[&str] = &[
    "CONSTRAINT",
    "PRIMARY",
    "UNIQUE",
    "FOREIGN",
    "CHECK",
    "KEY",
    "INDEX",
    "FULLTEXT",
    "SPATIAL",
    "SUPPLEMENTAL",
    "PERIOD",
];

/// Words that extend a type name (`DOUBLE PRECISION`, `WITH TIME ZONE`).
const TYPE_CONTINUATIONS: &[&str] = &[
    "PRECISION", "VARYING", "WITH", "WITHOUT", "LOCAL", "TIME", "ZONE", "UNSIGNED", "ZEROFILL",
    "RAW", "TO", "YEAR", "MONTH", "DAY", "SECOND",
];

type ReadResult<T> = std::result::Result<T, String>;

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn rest(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| is_keyword(t, keyword))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_any_keyword(&mut self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.eat_keyword(k))
    }

    /// Consume a keyword sequence only if all of it is present.
    fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let matches = keywords
            .iter()
            .enumerate()
            .all(|(i, k)| self.tokens.get(self.pos + i).is_some_and(|t| is_keyword(t, k)));
        if matches {
            self.pos += keywords.len();
        }
        matches
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume tokens up to the `)` closing an already consumed `(`.
    fn take_group(&mut self) -> &'a [Token] {
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(token) = self.next() {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return &self.tokens[start..self.pos - 1];
                    }
                }
                _ => {}
            }
        }
        &self.tokens[start..]
    }
}

fn is_keyword(token: &Token, keyword: &str) -> bool {
    matches!(token, Token::Word(w) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(keyword))
}

fn as_ident(token: &Token) -> Option<Ident> {
    match token {
        Token::Word(w) => Some(Ident {
            value: w.value.clone(),
            quoted: w.quote_style.is_some(),
        }),
        Token::DoubleQuotedString(s) => Some(Ident::quoted(s.clone())),
        _ => None,
    }
}

fn as_literal(token: &Token) -> Option<String> {
    match token {
        Token::SingleQuotedString(s)
        | Token::NationalStringLiteral(s)
        | Token::EscapedStringLiteral(s) => Some(s.clone()),
        _ => None,
    }
}

fn spec_token(token: &Token) -> SpecToken {
    if let Some(text) = as_literal(token) {
        return SpecToken::Literal(text);
    }
    match token {
        Token::Word(w) => SpecToken::Word(Ident {
            value: w.value.clone(),
            quoted: w.quote_style.is_some(),
        }),
        Token::DoubleQuotedString(s) => SpecToken::Literal(s.clone()),
        Token::Number(n, _) => SpecToken::Number(n.clone()),
        other => SpecToken::Symbol(other.to_string()),
    }
}

fn check_balanced(tokens: &[Token]) -> ReadResult<()> {
    let mut depth: i64 = 0;
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth < 0 {
                    return Err("unbalanced parentheses: unexpected ')'".to_string());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced parentheses: {} unclosed '('", depth));
    }
    Ok(())
}

/// Split at commas outside nested parentheses.
fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

fn read_object_name(cursor: &mut Cursor<'_>) -> Option<ObjectName> {
    let first = cursor.peek().and_then(as_ident)?;
    cursor.next();

    let mut parts = vec![first];
    while cursor.peek() == Some(&Token::Period) {
        cursor.next();
        match cursor.peek().and_then(as_ident) {
            Some(part) => {
                cursor.next();
                parts.push(part);
            }
            None => break,
        }
    }
    Some(ObjectName(parts))
}

/// Read one statement from its significant (non-whitespace) tokens.
pub(super) fn read_statement(tokens: &[Token], sql: &str) -> ReadResult<Statement> {
    let mut cursor = Cursor::new(tokens);
    if cursor.eat_keyword("CREATE") {
        read_create(&mut cursor, sql)
    } else if cursor.eat_keyword("COMMENT") {
        read_comment(&mut cursor)
    } else {
        Ok(Statement::Other)
    }
}

fn read_create(cursor: &mut Cursor<'_>, sql: &str) -> ReadResult<Statement> {
    while cursor.eat_any_keyword(CREATE_MODIFIERS) {}
    if !cursor.eat_keyword("TABLE") {
        return Ok(Statement::Other);
    }

    check_balanced(cursor.rest())?;
    cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);

    let name = read_object_name(cursor).ok_or_else(|| match cursor.peek() {
        Some(token) => format!("CREATE TABLE without a table name (found '{}')", token),
        None => "CREATE TABLE without a table name".to_string(),
    })?;

    let mut columns = Vec::new();
    if cursor.eat(&Token::LParen) {
        for element in split_top_level(cursor.take_group()) {
            if let Some(column) = read_element(element)? {
                columns.push(column);
            }
        }
    }

    Ok(Statement::CreateTable(CreateTable {
        name,
        columns,
        comment: table_option_comment(cursor.rest()),
        sql: sql.to_string(),
    }))
}

fn read_element(tokens: &[Token]) -> ReadResult<Option<ColumnDef>> {
    let Some(first) = tokens.first() else {
        return Err("empty table element".to_string());
    };
    if CONSTRAINT_STARTS.iter().any(|k| is_keyword(first, k)) {
        return Ok(None);
    }

    let name = as_ident(first).ok_or_else(|| format!("expected column name, found '{}'", first))?;
    let mut cursor = Cursor::new(&tokens[1..]);

    let mut type_name = match cursor.next() {
        Some(Token::Word(w)) => w.value.clone(),
        Some(other) => {
            return Err(format!(
                "expected a type for column {}, found '{}'",
                name, other
            ))
        }
        None => return Err(format!("column {} has no type", name)),
    };

    let mut arguments: Option<Vec<String>> = None;
    loop {
        match cursor.peek() {
            Some(Token::Word(w))
                if w.quote_style.is_none()
                    && TYPE_CONTINUATIONS
                        .iter()
                        .any(|k| w.value.eq_ignore_ascii_case(k)) =>
            {
                type_name.push(' ');
                type_name.push_str(&w.value);
                cursor.next();
            }
            Some(Token::LParen) => {
                cursor.next();
                let group = cursor.take_group();
                // INTERVAL DAY(2) TO SECOND(6): only the first group counts
                if arguments.is_none() {
                    arguments = Some(split_top_level(group).into_iter().map(render_argument).collect());
                }
            }
            _ => break,
        }
    }

    Ok(Some(ColumnDef {
        name,
        data_type: RawColumnType::new(type_name, arguments.unwrap_or_default()),
        specs: cursor.rest().iter().map(spec_token).collect(),
    }))
}

fn render_argument(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            Token::Word(w) => w.value.clone(),
            Token::Number(n, _) => n.clone(),
            other => match as_literal(other) {
                Some(text) => format!("'{}'", text.replace('\'', "''")),
                None => other.to_string(),
            },
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `COMMENT [=] '...'` among the table options; the last one wins.
fn table_option_comment(tokens: &[Token]) -> Option<String> {
    let mut comment = None;
    let mut depth = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            token if depth == 0 && is_keyword(token, "COMMENT") => {
                let mut j = i + 1;
                if tokens.get(j) == Some(&Token::Eq) {
                    j += 1;
                }
                if let Some(text) = tokens.get(j).and_then(as_literal) {
                    comment = Some(text);
                    i = j;
                }
            }
            _ => {}
        }
        i += 1;
    }
    comment
}

fn read_comment(cursor: &mut Cursor<'_>) -> ReadResult<Statement> {
    if !cursor.eat_keyword("ON") {
        return Ok(Statement::Other);
    }

    let on_column = if cursor.eat_keyword("COLUMN") {
        true
    } else if cursor.eat_keyword("TABLE") {
        false
    } else {
        return Ok(Statement::Other);
    };
    let kind = if on_column { "COLUMN" } else { "TABLE" };

    let target = read_object_name(cursor)
        .ok_or_else(|| format!("COMMENT ON {} without a target", kind))?;
    if on_column && target.len() < 2 {
        return Err(format!(
            "COMMENT ON COLUMN target '{}' must be table.column",
            target
        ));
    }

    if !cursor.eat_keyword("IS") {
        return Err(format!("COMMENT ON {} {} requires IS '<text>'", kind, target));
    }
    let text = cursor
        .next()
        .and_then(as_literal)
        .ok_or_else(|| format!("COMMENT ON {} {} requires IS '<text>'", kind, target))?;

    Ok(if on_column {
        Statement::ColumnComment(ColumnComment { target, text })
    } else {
        Statement::TableComment(TableComment { target, text })
    })
}
