use std::{fmt, str::FromStr};

use logos::{Lexer, Logos};

use crate::{Error, Result};

/// A parsed dictionary path of the form
/// `<NAMESPACE>ELEMENT(+ELEMENT)*(@ATTRIBUTE)?`.
///
/// ```rust
/// # use cbor_xml_dictionary::DictionaryPath;
/// let path = DictionaryPath::parse("<urn:ns>outer+inner@id").unwrap();
/// assert_eq!(path.namespace(), "urn:ns");
/// assert_eq!(path.elements(), ["outer", "inner"]);
/// assert_eq!(path.attribute(), Some("id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryPath {
    namespace: String,
    elements: Vec<String>,
    attribute: Option<String>,
}

impl DictionaryPath {
    /// Parses `src`, failing with `PathSyntax` if it does not match the path
    /// grammar.
    pub fn parse(src: &str) -> Result<Self> {
        let mut lexer = Token::lexer(src);

        let namespace = match next_token(&mut lexer, src)? {
            Some(Token::Namespace(namespace)) => namespace,
            _ => return Err(syntax_error(src)),
        };

        let mut elements = vec![expect_name(&mut lexer, src)?];
        let mut attribute = None;
        while let Some(token) = next_token(&mut lexer, src)? {
            match token {
                Token::Plus => elements.push(expect_name(&mut lexer, src)?),
                Token::Attribute(name) => {
                    attribute = Some(name);
                    break;
                }
                _ => return Err(syntax_error(src)),
            }
        }

        if lexer.next().is_some() {
            return Err(syntax_error(src));
        }

        Ok(Self {
            namespace,
            elements,
            attribute,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Element names, outermost first. Never empty.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

impl FromStr for DictionaryPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DictionaryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>{}", self.namespace, self.elements.join("+"))?;
        if let Some(attribute) = &self.attribute {
            write!(f, "@{attribute}")?;
        }
        Ok(())
    }
}

//
// === Private Functions ===
//

fn syntax_error(src: &str) -> Error {
    Error::PathSyntax(format!("Cannot evaluate dictionary path: {src}"))
}

fn next_token(lexer: &mut Lexer<'_, Token>, src: &str) -> Result<Option<Token>> {
    match lexer.next() {
        Some(Ok(token)) => Ok(Some(token)),
        Some(Err(())) => Err(syntax_error(src)),
        None => Ok(None),
    }
}

fn expect_name(lexer: &mut Lexer<'_, Token>, src: &str) -> Result<String> {
    match next_token(lexer, src)? {
        Some(Token::Name(name)) => Ok(name),
        _ => Err(syntax_error(src)),
    }
}

#[derive(Debug, Logos)]
#[rustfmt::skip]
enum Token {
    /// Namespace URI between angle brackets.
    #[regex(r"<[^<>]+>", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Namespace(String),

    /// Element name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.\-]*", |lex| lex.slice().to_string())]
    Name(String),

    #[token("+")]
    Plus,

    /// Attribute name, prefixed by `@`.
    #[regex(r"@[a-zA-Z_:][a-zA-Z0-9_:.\-]*", |lex| lex.slice()[1..].to_string())]
    Attribute(String),
}
