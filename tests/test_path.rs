use cbor_xml_dictionary::{Dictionary, DictionaryPath, Error, NameToken};
use indoc::indoc;

fn dictionary() -> Dictionary {
    let src = indoc! {r#"
        n'N'[uint(1)] {
            t'A'[uint(0)] {
                a'name'[uint(0)] {
                    e'v1'[uint(0)]
                    e'v2'[uint(1)]
                }
                t'B'[uint(0)] {
                    t'C'[uint(4)]
                }
            }
            t'S'[uint(1)] {
                a'id'[uint(2)]
            }
        }
    "#};
    let mut dictionary = Dictionary::new();
    dictionary.extend_dictionary(src.as_bytes()).unwrap();
    dictionary
}

#[test]
fn test_parse_path() {
    let src = "<http://www.trustedcomputinggroup.org/2010/IFMAP/2>access-request";
    let path = DictionaryPath::parse(src).unwrap();
    assert_eq!(path.namespace(), "http://www.trustedcomputinggroup.org/2010/IFMAP/2");
    assert_eq!(path.elements(), ["access-request"]);
    assert_eq!(path.attribute(), None);

    let path: DictionaryPath = "<N>A+B+C@some-attr".parse().unwrap();
    assert_eq!(path.namespace(), "N");
    assert_eq!(path.elements(), ["A", "B", "C"]);
    assert_eq!(path.attribute(), Some("some-attr"));
}

#[test]
fn test_path_display() {
    for src in ["<N>A", "<N>A+B", "<urn:x>a.b+c_d@x:y"] {
        let path = DictionaryPath::parse(src).unwrap();
        assert_eq!(path.to_string(), src);
    }
}

#[test]
fn test_invalid_paths() {
    let cases = [
        "",
        "N>A",
        "<N>",
        "<>A",
        "<N>1A",
        "<N>A+",
        "<N>A++B",
        "<N>A@",
        "<N>A@x@y",
        "<N>A@x+B",
        "<N> A",
        "<N>A ",
        "<N><M>A",
    ];
    for src in cases {
        match DictionaryPath::parse(src) {
            Err(Error::PathSyntax(_)) => {}
            other => panic!("expected a path syntax error for {src:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_find_element() {
    let dictionary = dictionary();

    let a = dictionary.find_element_by_path("<N>A").unwrap().unwrap();
    assert_eq!(a.cbor_name(), &NameToken::unsigned(0));
    assert!(a.is_complex_element());

    let b = dictionary.find_element_by_path("<N>A+B").unwrap().unwrap();
    assert_eq!(b.xml_name(), "B");

    let c = dictionary.find_element_by_path("<N>A+B+C").unwrap().unwrap();
    assert_eq!(c.cbor_name(), &NameToken::unsigned(4));
}

#[test]
fn test_find_element_missing() {
    let dictionary = dictionary();
    assert!(dictionary.find_element_by_path("<missing>A").unwrap().is_none());
    assert!(dictionary.find_element_by_path("<N>X").unwrap().is_none());
    assert!(dictionary.find_element_by_path("<N>A+X").unwrap().is_none());
    assert!(dictionary.find_element_by_path("<N>X+B").unwrap().is_none());
    // S is not complex, so nothing can be nested in it.
    assert!(dictionary.find_element_by_path("<N>S+A").unwrap().is_none());
}

#[test]
fn test_find_element_ignores_attribute_segment() {
    let dictionary = dictionary();
    let a = dictionary.find_element_by_path("<N>A@name").unwrap().unwrap();
    assert_eq!(a.xml_name(), "A");
}

#[test]
fn test_find_element_bad_syntax() {
    let dictionary = dictionary();
    assert!(matches!(dictionary.find_element_by_path("N>A"), Err(Error::PathSyntax(_))));
    assert!(matches!(dictionary.find_element_by_path(""), Err(Error::PathSyntax(_))));
}

#[test]
fn test_find_attribute() {
    let dictionary = dictionary();

    let name = dictionary.find_attribute_by_path("<N>A@name").unwrap().unwrap();
    assert!(name.is_enum_value_attribute());
    assert_eq!(name.lookup_enum_value("v1"), Some(NameToken::unsigned(0)));
    assert_eq!(name.lookup_enum_value("v2"), Some(NameToken::unsigned(1)));

    let id = dictionary.find_attribute_by_path("<N>S@id").unwrap().unwrap();
    assert_eq!(id.cbor_name(), &NameToken::unsigned(2));
    assert!(!id.is_enum_value_attribute());
}

#[test]
fn test_find_attribute_missing() {
    let dictionary = dictionary();
    assert!(dictionary.find_attribute_by_path("<N>A+B@x").unwrap().is_none());
    assert!(dictionary.find_attribute_by_path("<N>A@x").unwrap().is_none());
    assert!(dictionary.find_attribute_by_path("<missing>A@name").unwrap().is_none());
}

#[test]
fn test_find_attribute_without_attribute_segment() {
    let dictionary = dictionary();
    assert!(matches!(dictionary.find_attribute_by_path("<N>A"), Err(Error::PathSyntax(_))));
    // An unresolved element wins over the missing segment.
    assert!(dictionary.find_attribute_by_path("<missing>A").unwrap().is_none());
}
