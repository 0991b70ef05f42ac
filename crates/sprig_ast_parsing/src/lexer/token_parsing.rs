use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while, take_while1};
use nom::character::complete::{anychar, char, one_of, satisfy};
use nom::combinator::{consumed, eof, map, opt, recognize};
use nom::error::{context, VerboseError};
use nom::multi::many0_count;
use nom::sequence::{delimited, pair, tuple};
use nom::IResult;
use sprig_tokens::token::TokenKind;

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// A token as scanned from the front of the remaining input
#[derive(Debug, PartialEq)]
pub(super) struct Scanned<'a> {
    /// whitespace and comments skipped before the token
    pub separators: &'a str,
    /// every character consumed for the token
    pub text: &'a str,
    pub kind: TokenKind,
    pub spelling: &'a str,
}

/// Skips separators, then scans exactly one token.
///
/// Every input produces a token: at the end of input this is [TokenKind::EndOfText], and
/// anything no rule accepts becomes a one character [TokenKind::Error].
pub(super) fn parse_token(src: &str) -> Result<Scanned> {
    context(
        "token",
        map(
            pair(recognize(parse_separators), consumed(_parse_token)),
            |(separators, (text, (kind, spelling)))| Scanned {
                separators,
                text,
                kind,
                spelling,
            },
        ),
    )(src)
}

fn _parse_token(src: &str) -> Result<(TokenKind, &str)> {
    alt((
        parse_end_of_text,
        parse_word,
        parse_integer_literal,
        parse_char_literal,
        parse_operator,
        parse_is,
        parse_punctuation,
        parse_unrecognized,
    ))(src)
}

/// Maps a parser to a token of `kind`, spelled as everything the parser consumed
fn spelled<'a, O, P>(
    kind: TokenKind,
    parser: P,
) -> impl FnMut(&'a str) -> Result<'a, (TokenKind, &'a str)>
where
    P: nom::Parser<&'a str, O, VerboseError<&'a str>>,
{
    map(recognize(parser), move |spelling| (kind, spelling))
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_graphic(c: char) -> bool {
    is_letter(c) || is_digit(c) || matches!(c, '.' | ',' | '?' | '!' | ' ')
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn parse_separators(src: &str) -> Result<usize> {
    context(
        "separators",
        many0_count(alt((
            context("whitespace", take_while1(is_blank)),
            context(
                "line comment",
                recognize(pair(char('!'), take_till(|c| c == '\n'))),
            ),
        ))),
    )(src)
}

fn parse_end_of_text(src: &str) -> Result<(TokenKind, &str)> {
    context("end of text", spelled(TokenKind::EndOfText, eof))(src)
}

/// `$`? letter (letter | digit)* `$`?
fn recognize_identifier(src: &str) -> Result<&str> {
    recognize(tuple((
        opt(char('$')),
        satisfy(is_letter),
        take_while(|c| is_letter(c) || is_digit(c)),
        opt(char('$')),
    )))(src)
}

fn parse_word(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "word",
        map(recognize_identifier, |spelling: &str| {
            (
                TokenKind::keyword(spelling).unwrap_or(TokenKind::Identifier),
                spelling,
            )
        }),
    )(src)
}

fn parse_integer_literal(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "integer literal",
        spelled(
            TokenKind::IntLiteral,
            pair(satisfy(is_digit), take_while(|c| is_digit(c) || c == ',')),
        ),
    )(src)
}

fn parse_char_literal(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "char literal",
        alt((
            map(
                delimited(char('\''), recognize(satisfy(is_graphic)), char('\'')),
                |c| (TokenKind::CharLiteral, c),
            ),
            // an opening quote that isn't followed by a valid literal keeps what was consumed
            spelled(TokenKind::Error, pair(char('\''), opt(satisfy(is_graphic)))),
        )),
    )(src)
}

fn parse_operator(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "operator",
        alt((
            spelled(TokenKind::Becomes, tag("<-")),
            spelled(TokenKind::Operator, one_of("<+-*/>=\\")),
        )),
    )(src)
}

fn parse_is(src: &str) -> Result<(TokenKind, &str)> {
    context("is", spelled(TokenKind::Is, char('~')))(src)
}

fn parse_punctuation(src: &str) -> Result<(TokenKind, &str)> {
    context(
        "punctuation",
        alt((
            spelled(TokenKind::Colon, char(':')),
            spelled(TokenKind::Semicolon, char(';')),
            spelled(TokenKind::LeftBracket, char('(')),
            spelled(TokenKind::RightBracket, char(')')),
            spelled(TokenKind::LeftSquareBracket, char('[')),
            spelled(TokenKind::RightSquareBracket, char(']')),
        )),
    )(src)
}

fn parse_unrecognized(src: &str) -> Result<(TokenKind, &str)> {
    context("unrecognized", spelled(TokenKind::Error, anychar))(src)
}
