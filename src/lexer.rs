// ABOUTME: Lexer turning Scheme source text into a token stream

use crate::error::SchemeError;
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_while, take_while1},
    character::complete::{char, digit1, multispace1, none_of, one_of},
    combinator::{map, opt, recognize, value},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    HashParen,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Character(char),
    String(String),
    Symbol(String),
}

/// A token paired with its byte offset in the source, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken {
    pub token: Token,
    pub pos: usize,
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n')(input)?;
    Ok((input, ()))
}

fn skip_ws_and_comments(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), line_comment)))).parse(input)
}

fn lex_float(input: &str) -> IResult<&str, Token> {
    map(
        recognize((
            opt(char('-')),
            alt((
                recognize((digit1, char('.'), opt(digit1))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| Token::Float(s.parse().expect("lexer guaranteed valid float syntax")),
    )
    .parse(input)
}

fn lex_integer(input: &str) -> IResult<&str, Token> {
    map(recognize((opt(char('-')), digit1)), |s: &str| {
        Token::Integer(s.parse().expect("lexer guaranteed valid integer syntax"))
    })
    .parse(input)
}

fn lex_boolean(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Boolean(true), tag("#t")),
        value(Token::Boolean(false), tag("#f")),
    ))
    .parse(input)
}

fn lex_character(input: &str) -> IResult<&str, Token> {
    let (input, _) = tag("#\\")(input)?;
    alt((
        value(Token::Character(' '), tag("space")),
        value(Token::Character('\n'), tag("newline")),
        value(Token::Character('\t'), tag("tab")),
        map(nom::character::complete::anychar, Token::Character),
    ))
    .parse(input)
}

const SYMBOL_EXTRA: &str = "!$%&*+./:<=>?@^_~-";

fn lex_symbol(input: &str) -> IResult<&str, Token> {
    let symbol_char = |c: char| c.is_alphanumeric() || SYMBOL_EXTRA.contains(c);
    map(
        recognize((
            one_of("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!$%&*+./:<=>?@^_~-"),
            take_while(symbol_char),
        )),
        |s: &str| Token::Symbol(s.to_string()),
    )
    .parse(input)
}

fn lex_string(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('"')(input)?;
    if let Ok((input, _)) = char::<_, nom::error::Error<_>>('"')(input) {
        return Ok((input, Token::String(String::new())));
    }
    let (input, content) = escaped_transform(
        none_of("\"\\"),
        '\\',
        alt((
            value("\"", tag("\"")),
            value("\\", tag("\\")),
            value("\n", tag("n")),
            value("\t", tag("t")),
        )),
    )
    .parse(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Token::String(content)))
}

fn lex_punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Quote, char('\'')),
        value(Token::Quasiquote, char('`')),
        // ,@ must win over , by longest match.
        value(Token::UnquoteSplicing, tag(",@")),
        value(Token::Unquote, char(',')),
        value(Token::HashParen, tag("#(")),
    ))
    .parse(input)
}

fn lex_token(input: &str) -> IResult<&str, Token> {
    alt((
        lex_punctuation,
        lex_boolean,
        lex_character,
        lex_string,
        lex_float,
        lex_integer,
        lex_symbol,
    ))
    .parse(input)
}

/// Converts source text into a flat token stream, skipping whitespace and
/// `;` comments. Reader-macro desugaring (`'`, `` ` ``, `,`, `,@`) happens
/// one stage later, in the reader: the lexer only reports the punctuation.
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken>, SchemeError> {
    let mut tokens = Vec::new();
    let mut remaining = source;
    let mut consumed = 0usize;

    loop {
        let (after_ws, _) = skip_ws_and_comments(remaining)
            .map_err(|_| SchemeError::syntax("lexer failed while skipping whitespace"))?;
        consumed += remaining.len() - after_ws.len();
        remaining = after_ws;

        if remaining.is_empty() {
            return Ok(tokens);
        }

        match preceded(skip_ws_and_comments, lex_token).parse(remaining) {
            Ok((rest, token)) => {
                tokens.push(PositionedToken {
                    token,
                    pos: consumed,
                });
                consumed += remaining.len() - rest.len();
                remaining = rest;
            }
            Err(_) => {
                let bad = remaining.chars().next().unwrap_or(' ');
                return Err(SchemeError::syntax(format!(
                    "unexpected character '{bad}' at position {consumed}"
                )));
            }
        }
    }
}
