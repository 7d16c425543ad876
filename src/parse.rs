use std::{iter::Peekable, vec::IntoIter};

use anyhow::{bail, Result};
use regex::Regex;
use tracing::debug;

use crate::{HashSet, Value};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Token<'input> {
    Open,
    Close,
    Comma,
    Int(i64),
    Word(&'input str),
}

fn tokenize(source: &str) -> Vec<Token<'_>> {
    let regex_token = Regex::new(r"\{|\}|,|[^{},\s]+").unwrap();
    let regex_integer = Regex::new(r"^-?[0-9]+$").unwrap();

    regex_token
        .find_iter(source)
        .map(|m| match m.as_str() {
            "{" => Token::Open,
            "}" => Token::Close,
            "," => Token::Comma,
            atom => {
                // out of i64 range stays a word
                match atom.parse::<i64>() {
                    Ok(n) if regex_integer.is_match(atom) => Token::Int(n),
                    _ => Token::Word(atom),
                }
            }
        })
        .collect()
}

type Tokens<'input> = Peekable<IntoIter<Token<'input>>>;

const MAX_NESTING: usize = 256;

///
/// Reads a set literal such as `{0, 1, {a, b}}`.
///
/// The outermost braces may be left off: `0, 1` reads the same as `{0, 1}`.
/// Bare words that look like integers become [`Value::Int`], anything else
/// [`Value::Str`]. Sets nested deeper than 256 levels are rejected.
pub fn parse_set(source: &str) -> Result<HashSet<Value>> {
    let tokens = tokenize(source);
    debug!(tokens = tokens.len(), "parsing set literal");

    let wrapped = tokens.first() == Some(&Token::Open)
        && matching_close(&tokens) == Some(tokens.len() - 1);
    let mut tokens = tokens.into_iter().peekable();
    if wrapped {
        tokens.next();
        let set = parse_items(&mut tokens, Some(Token::Close), 0)?;
        tokens.next();
        return Ok(set);
    }
    parse_items(&mut tokens, None, 0)
}

fn matching_close(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Open => depth += 1,
            Token::Close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_items(
    tokens: &mut Tokens,
    end: Option<Token>,
    depth: usize,
) -> Result<HashSet<Value>> {
    let mut set = HashSet::new();
    if tokens.peek().copied() == end {
        return Ok(set);
    }
    loop {
        set.add(parse_item(tokens, depth)?);
        let next = tokens.peek().copied();
        if next == end {
            return Ok(set);
        }
        match next {
            Some(Token::Comma) => {
                tokens.next();
            }
            Some(Token::Close) => bail!("unbalanced '}}'"),
            Some(Token::Open) | Some(Token::Int(_)) | Some(Token::Word(_)) => {
                bail!("expected ',' between elements")
            }
            None => bail!("missing '}}'"),
        }
    }
}

fn parse_item(tokens: &mut Tokens, depth: usize) -> Result<Value> {
    match tokens.next() {
        Some(Token::Int(n)) => Ok(Value::Int(n)),
        Some(Token::Word(word)) => Ok(Value::Str(word.to_string())),
        Some(Token::Open) => {
            if depth >= MAX_NESTING {
                bail!("set literal nested too deeply");
            }
            let set = parse_items(tokens, Some(Token::Close), depth + 1)?;
            tokens.next();
            Ok(Value::Set(set))
        }
        Some(Token::Comma) => bail!("empty element before ','"),
        Some(Token::Close) => bail!("empty element before '}}'"),
        None => bail!("expected an element"),
    }
}
