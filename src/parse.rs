use std::io::BufRead;

use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::{Attribute, Element, NameToken, Namespace, ParseError};

pub type Result<T> = std::result::Result<T, ParseError>;

/// Shape of a definition line. Groups: line type, XML name, CBOR type, CBOR
/// value, trailing brace(s).
static DEFINITION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([aent])'(.+)'\[([A-Za-z]+)\((.*)\)\]\s*(\{|\{\s*\})?$").unwrap()
});

const BLOCK_END: &str = "}";

/// Parses a complete dictionary description held in a string.
///
/// ```rust
/// # use cbor_xml_dictionary::{parse_description, NameToken};
/// let namespaces = parse_description(
///     "n'urn:example'[uint(1)] {\n  t'item'[uint(0)]\n}\n",
/// ).unwrap();
/// assert_eq!(namespaces.len(), 1);
/// let item = namespaces[0].lookup_element("item").unwrap();
/// assert_eq!(item.cbor_name(), &NameToken::unsigned(0));
/// ```
pub fn parse_description(src: &str) -> Result<Vec<Namespace>> {
    DescriptionParser::new(src.as_bytes()).parse()
}

/// Recursive-descent reader for the dictionary description language.
///
/// Every non-blank line is one definition or a block terminator:
///
/// ```text
/// n'NAME'[TYPE(VALUE)] {     namespace
/// t'NAME'[TYPE(VALUE)] {     element
/// a'NAME'[TYPE(VALUE)] {     attribute
/// e'NAME'[TYPE(VALUE)]       enum value
/// }                          end of block
/// ```
pub struct DescriptionParser<R> {
    lines: Lines<R>,
}

impl<R: BufRead> DescriptionParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
        }
    }

    /// Reads the whole input and returns the namespaces it defines, in
    /// order of appearance.
    pub fn parse(mut self) -> Result<Vec<Namespace>> {
        let mut namespaces = Vec::new();
        while let Some(line) = self.next_line()? {
            let definition = line.expect_definition(LineKind::Namespace, "top level")?;
            namespaces.push(self.parse_namespace(definition)?);
        }
        Ok(namespaces)
    }

    fn parse_namespace(&mut self, definition: Definition) -> Result<Namespace> {
        let mut namespace = Namespace::new(definition.name.clone(), definition.token()?)
            .map_err(|_| ParseError::MalformedLine(definition.line))?;

        if definition.opens_block {
            while let Some(nested) = self.expect_block_line()? {
                let nested = nested.expect_kind(LineKind::Element, "namespace block")?;
                namespace.add_element(self.parse_element(nested)?);
            }
        }

        Ok(namespace)
    }

    fn parse_element(&mut self, definition: Definition) -> Result<Element> {
        let token = definition.token()?;
        let line = definition.line;
        let malformed = move |_: crate::Error| ParseError::MalformedLine(line);

        if !definition.opens_block {
            return Element::simple(definition.name.clone(), token).map_err(malformed);
        }

        let mut attributes = Vec::new();
        let mut nested_elements = Vec::new();
        let mut enum_values = Vec::new();

        while let Some(nested) = self.expect_block_line()? {
            let kind = nested.kind;
            match kind {
                LineKind::Attribute => attributes.push(self.parse_attribute(nested)?),
                LineKind::EnumValue => enum_values.push(nested.enum_value()?),
                LineKind::Element => nested_elements.push(self.parse_element(nested)?),
                LineKind::Namespace => return Err(nested.illegal_in("element block")),
            }
        }

        if !nested_elements.is_empty() && !enum_values.is_empty() {
            return Err(ParseError::StructuralConflict(definition.name, line));
        }

        let mut element = if !nested_elements.is_empty() {
            let mut element = Element::complex(definition.name.clone(), token).map_err(malformed)?;
            for nested in nested_elements {
                element.add_nested_element(nested).map_err(malformed)?;
            }
            element
        } else if !enum_values.is_empty() {
            let mut element =
                Element::enum_value(definition.name.clone(), token).map_err(malformed)?;
            for (xml_value, cbor_value) in enum_values {
                element.add_enum_value(xml_value, cbor_value).map_err(malformed)?;
            }
            element
        } else {
            Element::simple(definition.name.clone(), token).map_err(malformed)?
        };

        for attribute in attributes {
            element.add_attribute(attribute);
        }

        Ok(element)
    }

    fn parse_attribute(&mut self, definition: Definition) -> Result<Attribute> {
        let token = definition.token()?;
        let line = definition.line;
        let malformed = move |_: crate::Error| ParseError::MalformedLine(line);

        if !definition.opens_block {
            return Attribute::simple(definition.name.clone(), token).map_err(malformed);
        }

        let mut enum_values = Vec::new();
        while let Some(nested) = self.expect_block_line()? {
            let nested = nested.expect_kind(LineKind::EnumValue, "attribute block")?;
            enum_values.push(nested.enum_value()?);
        }

        if enum_values.is_empty() {
            return Attribute::simple(definition.name.clone(), token).map_err(malformed);
        }

        let mut attribute =
            Attribute::enum_value(definition.name.clone(), token).map_err(malformed)?;
        for (xml_value, cbor_value) in enum_values {
            attribute.add_enum_value(xml_value, cbor_value).map_err(malformed)?;
        }
        Ok(attribute)
    }

    fn next_line(&mut self) -> Result<Option<Line>> {
        match self.lines.next_line()? {
            Some((line, text)) => Line::classify(&text, line).map(Some),
            None => Ok(None),
        }
    }

    /// The next definition inside a block, or `None` once the block's
    /// closing brace is read. End of input here is an error.
    fn expect_block_line(&mut self) -> Result<Option<Definition>> {
        match self.next_line()? {
            Some(Line::Definition(definition)) => Ok(Some(definition)),
            Some(Line::BlockEnd(_)) => Ok(None),
            None => Err(ParseError::UnexpectedEof(self.lines.line_number())),
        }
    }
}

/// Source of trimmed, non-blank description lines.
struct Lines<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    /// The next non-blank line, trimmed, with its 1-based line number.
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            self.buffer.clear();
            let read = self.reader.read_line(&mut self.buffer).map_err(ParseError::Read)?;
            if read == 0 {
                debug!(line = self.line_number, "reached end of description");
                return Ok(None);
            }
            self.line_number += 1;
            let text = self.buffer.trim();
            if !text.is_empty() {
                debug!(line = self.line_number, source = text, "description line");
                return Ok(Some((self.line_number, text.to_string())));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Namespace,
    Element,
    Attribute,
    EnumValue,
}

impl LineKind {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "n" => Some(Self::Namespace),
            "t" => Some(Self::Element),
            "a" => Some(Self::Attribute),
            "e" => Some(Self::EnumValue),
            _ => None,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Namespace => "n",
            Self::Element => "t",
            Self::Attribute => "a",
            Self::EnumValue => "e",
        }
    }
}

enum Line {
    Definition(Definition),
    BlockEnd(usize),
}

impl Line {
    fn classify(text: &str, line: usize) -> Result<Self> {
        if text == BLOCK_END {
            return Ok(Self::BlockEnd(line));
        }

        let captures = DEFINITION_LINE
            .captures(text)
            .ok_or(ParseError::MalformedLine(line))?;
        let group = |i: usize| captures.get(i).map_or("", |m| m.as_str());

        let kind = LineKind::from_prefix(group(1)).ok_or(ParseError::MalformedLine(line))?;
        let name = group(2);
        if name.trim().is_empty() {
            return Err(ParseError::MalformedLine(line));
        }

        Ok(Self::Definition(Definition {
            kind,
            name: name.to_string(),
            cbor_type: group(3).to_string(),
            cbor_value: group(4).to_string(),
            opens_block: group(5) == "{",
            line,
        }))
    }

    fn expect_definition(self, kind: LineKind, context: &'static str) -> Result<Definition> {
        match self {
            Self::Definition(definition) => definition.expect_kind(kind, context),
            Self::BlockEnd(line) => Err(ParseError::IllegalLineType {
                kind: BLOCK_END.to_string(),
                context,
                line,
            }),
        }
    }
}

struct Definition {
    kind: LineKind,
    name: String,
    cbor_type: String,
    cbor_value: String,
    opens_block: bool,
    line: usize,
}

impl Definition {
    fn expect_kind(self, kind: LineKind, context: &'static str) -> Result<Self> {
        if self.kind == kind {
            Ok(self)
        } else {
            Err(self.illegal_in(context))
        }
    }

    fn illegal_in(&self, context: &'static str) -> ParseError {
        ParseError::IllegalLineType {
            kind: self.kind.prefix().to_string(),
            context,
            line: self.line,
        }
    }

    fn token(&self) -> Result<NameToken> {
        let cbor_type = CborType::from_keyword(&self.cbor_type)
            .ok_or_else(|| ParseError::UnknownCborType(self.cbor_type.clone(), self.line))?;
        cbor_type.token(&self.cbor_value, self.line)
    }

    /// An `e` line as an `(xml value, cbor value)` pair. Enum values never
    /// open a block.
    fn enum_value(self) -> Result<(String, NameToken)> {
        if self.opens_block {
            return Err(ParseError::MalformedLine(self.line));
        }
        let token = self.token()?;
        Ok((self.name, token))
    }
}

/// The CBOR type keyword of a definition line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
#[rustfmt::skip]
enum CborType {
    #[token("uint")]
    Uint,

    #[token("negint")]
    NegInt,

    #[token("double")]
    Double,

    #[token("bytestr")]
    ByteStr,

    #[token("unistr")]
    UniStr,

    #[token("bool")]
    Bool,
}

impl CborType {
    fn from_keyword(keyword: &str) -> Option<Self> {
        let mut lexer = Self::lexer(keyword);
        match lexer.next() {
            Some(Ok(cbor_type)) if lexer.remainder().is_empty() => Some(cbor_type),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Uint => "uint",
            Self::NegInt => "negint",
            Self::Double => "double",
            Self::ByteStr => "bytestr",
            Self::UniStr => "unistr",
            Self::Bool => "bool",
        }
    }

    fn token(self, value: &str, line: usize) -> Result<NameToken> {
        let invalid = || ParseError::InvalidCborValue {
            cbor_type: self.keyword(),
            value: value.to_string(),
            line,
        };

        if value.trim().is_empty() {
            return Err(invalid());
        }

        match self {
            Self::Uint => value.parse::<u64>().map(NameToken::unsigned).map_err(|_| invalid()),
            Self::NegInt => match value.parse::<i64>() {
                Ok(v) if v < 0 => Ok(NameToken::negative(v)),
                _ => Err(invalid()),
            },
            Self::Double => {
                let v = value.parse::<f64>().map_err(|_| invalid())?;
                if v.is_finite() && v.fract() == 0.0 {
                    warn!(line, value, "integral double is encoded as an integer");
                }
                Ok(NameToken::double(v))
            }
            Self::ByteStr => hex::decode(value).map(NameToken::byte_string).map_err(|_| invalid()),
            Self::UniStr => Ok(NameToken::unicode_string(value)),
            Self::Bool => {
                if value.eq_ignore_ascii_case("true") {
                    Ok(NameToken::bool(true))
                } else if value.eq_ignore_ascii_case("false") {
                    Ok(NameToken::bool(false))
                } else {
                    Err(invalid())
                }
            }
        }
    }
}
