//! Logos lexers for the markup dialect.
//!
//! Two token sets: `ContentToken` lexes text content between tags and the
//! `<`/`</`/`<!--` openers; `TagToken` lexes names, `=`, quoted values and the
//! `>`/`/>` closers inside a tag. The reader switches between them with
//! `Lexer::morph`.

use logos::{Lexer, Logos, Skip};

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum ContentToken<'src> {
    #[token("<!--", lex_comment)]
    Comment(&'src str),

    #[token("<!", lex_declaration)]
    Declaration,

    #[token("<?", lex_processing_instruction)]
    ProcessingInstruction,

    #[token("</")]
    CloseTagOpen,

    #[token("<")]
    TagOpen,

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TagToken<'src> {
    #[regex(r"[a-zA-Z][a-zA-Z0-9:._-]*", |lex| lex.slice())]
    Name(&'src str),

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, trim_quotes)]
    #[regex(r#"'[^']*'"#, trim_quotes)]
    Quoted(&'src str),

    #[token("/>")]
    SelfClose,

    #[token(">")]
    Close,
}

/// Consume comment body up to and including `-->`.
fn lex_comment<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> Option<&'src str> {
    let rest = lex.remainder();
    let end = rest.find("-->")?;
    lex.bump(end + 3);
    Some(&rest[..end])
}

/// Skip `<!doctype ...>`-style declarations.
fn lex_declaration<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> Skip {
    let rest = lex.remainder();
    match rest.find('>') {
        Some(end) => lex.bump(end + 1),
        None => lex.bump(rest.len()),
    }
    Skip
}

/// Skip `<?xml ...?>` processing instructions.
fn lex_processing_instruction<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> Skip {
    let rest = lex.remainder();
    match rest.find("?>") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(rest.len()),
    }
    Skip
}

fn trim_quotes<'src>(lex: &mut Lexer<'src, TagToken<'src>>) -> &'src str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}
