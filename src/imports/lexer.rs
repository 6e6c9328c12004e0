//! Logos-based tokenizer for Python sources.
//!
//! Only what is needed to read class headers is distinguished; everything
//! else collapses into [`PyToken::Other`]. Strings and comments are consumed
//! whole so a `class` inside them is never seen.

use logos::Logos;

/// A token with its kind and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: PyToken,
    pub text: &'a str,
}

/// Tokenize a Python source. `Err` carries the byte offset of the first
/// character that cannot start any token (e.g. an unterminated string).
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, usize> {
    let mut lexer = PyToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
            }),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\f\r\n]+|\\\r?\n|#[^\n]*)")]
pub enum PyToken {
    #[token("class")]
    Class,

    #[regex(r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    Ident,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[\[\{]")]
    LBracket,

    #[regex(r"[\]\}]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("=")]
    Assign,

    #[regex(r#""""([^"]|"[^"]|""[^"])*("|"")?""""#)]
    #[regex(r"'''([^']|'[^']|''[^'])*('|'')?'''")]
    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    Str,

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9A-Za-z_]*)?")]
    Number,

    #[regex(r"[+\-*/%@&|^~<>!;]=?")]
    #[token("==")]
    #[token("**")]
    #[token("//")]
    #[token("->")]
    #[token(":=")]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<PyToken> {
        tokenize(input)
            .expect("should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn class_header_tokens() {
        assert_eq!(
            kinds("class A(pywr.Parameter):"),
            vec![
                PyToken::Class,
                PyToken::Ident,
                PyToken::LParen,
                PyToken::Ident,
                PyToken::Dot,
                PyToken::Ident,
                PyToken::RParen,
                PyToken::Colon,
            ]
        );
    }

    #[test]
    fn strings_and_comments_hide_class_keyword() {
        let input = "x = 'class A(B):'\n# class C(D):\ny = \"\"\"\nclass E(F):\n\"\"\"\n";
        assert!(!kinds(input).contains(&PyToken::Class));
    }

    #[test]
    fn triple_quoted_string_may_end_with_quotes() {
        let input = r#"x = """He said "hi""""
class A(B):
    y = '''it's''''
"#;
        let kinds = kinds(input);
        assert_eq!(kinds.iter().filter(|k| **k == PyToken::Str).count(), 2);
        assert!(kinds.contains(&PyToken::Class));
    }

    #[test]
    fn identifier_prefix_is_not_keyword() {
        assert_eq!(kinds("classes"), vec![PyToken::Ident]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(tokenize("x = 'abc\n").is_err());
    }
}
