//! # CBOR XML Dictionary
//!
//! This crate maps XML namespace, element, attribute and enumeration names to
//! compact binary names ("CBOR names") and back, for encoders and decoders
//! that write XML-like documents as
//! [CBOR](https://datatracker.ietf.org/doc/html/rfc8949).
//!
//! A [`Dictionary`] holds [`Namespace`]s, which hold [`Element`]s, which hold
//! [`Attribute`]s, nested elements, or enumerated values. Every level can be
//! searched forward (XML name to [`NameToken`]) while encoding, and in
//! reverse (token to XML name) while decoding. A [`DictionaryPath`] reaches
//! any element or attribute in a single call.
//!
//! ## Description Format
//!
//! Dictionaries are usually loaded from a line-oriented description:
//!
//! ```text
//! n'http://example.org/ns'[uint(1)] {
//!     t'access-request'[uint(0)] {
//!         a'name'[uint(0)] {
//!             e'first'[uint(0)]
//!             e'second'[uint(1)]
//!         }
//!         t'nested'[unistr(n)]
//!     }
//! }
//! ```
//!
//! | Line           | Defines                                   | Block may contain |
//! | -------------- | ----------------------------------------- | ----------------- |
//! | `n'NAME'[..]`  | Namespace                                 | `t`               |
//! | `t'NAME'[..]`  | Element (simple, enum-valued, or complex) | `a`, `e`, `t`     |
//! | `a'NAME'[..]`  | Attribute (simple or enum-valued)         | `e`               |
//! | `e'NAME'[..]`  | Enumerated value                          | no block          |
//!
//! | CBOR Type | Example(s)                              |
//! | --------- | --------------------------------------- |
//! | `uint`    | `[uint(0)]`<br>`[uint(42)]`             |
//! | `negint`  | `[negint(-1)]`                          |
//! | `double`  | `[double(1.11)]`                        |
//! | `bytestr` | `[bytestr(ADFCB3)]`                     |
//! | `unistr`  | `[unistr(opmeta)]`                      |
//! | `bool`    | `[bool(true)]`<br>`[bool(FALSE)]`       |
//!
//! ## Usage
//!
//! ```rust
//! # use cbor_xml_dictionary::{Dictionary, NameToken};
//! let mut dictionary = Dictionary::new();
//! dictionary.extend_dictionary(
//!     "n'urn:example'[uint(1)] {\n t'item'[uint(0)] {\n a'id'[uint(3)]\n }\n}\n".as_bytes(),
//! ).unwrap();
//!
//! let attribute = dictionary.find_attribute_by_path("<urn:example>item@id").unwrap().unwrap();
//! assert_eq!(attribute.cbor_name(), &NameToken::unsigned(3));
//!
//! let namespace = dictionary.reverse_lookup_namespace(&NameToken::unsigned(1)).unwrap();
//! assert_eq!(namespace.xml_name(), "urn:example");
//! ```
//!
//! Collisions (two entries claiming the same XML name or the same CBOR name
//! within one container) never fail: the newer entry wins and a warning is
//! emitted through [`tracing`](https://docs.rs/tracing).

mod error;
pub use error::{Error, ParseError, Result};

mod token;
pub use token::{NameToken, TokenValue};

mod bimap;

mod attribute;
pub use attribute::{Attribute, AttributeKind, EnumValues};

mod element;
pub use element::{Element, ElementKind, NestedElements};

mod namespace;
pub use namespace::Namespace;

mod path;
pub use path::DictionaryPath;

mod parse;
pub use parse::{DescriptionParser, Result as ParseResult, parse_description};

mod dictionary;
pub use dictionary::Dictionary;

mod registry;
pub use registry::DictionaryRegistry;
