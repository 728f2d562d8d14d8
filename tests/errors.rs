use std::io;

use json_ledger::options::MAX_DEPTH_CEILING;
use json_ledger::{
    parse, parse_file, parse_str, parse_str_with_options, Error, LexError, ParseError,
    ParseOptions, TokenKind,
};
use rstest::rstest;

#[rstest]
#[case(r#"{"a":"x"#, LexError::UnterminatedString { line: 1 })]
#[case(r#"{"a":tru}"#, LexError::MalformedBoolean { line: 1 })]
#[case(r#"{"a":nulL}"#, LexError::MalformedNull { line: 1 })]
#[case("{\n\"a\": @}", LexError::UnknownLiteral { byte: b'@', line: 2 })]
#[case("{\"a\":'x'}", LexError::UnknownLiteral { byte: b'\'', line: 1 })]
fn test_lex_errors(#[case] input: &str, #[case] expected: LexError) {
    match parse_str(input) {
        Err(Error::Lex(err)) => assert_eq!(err, expected),
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[rstest]
#[case("\"top\"", ParseError::InvalidStart { kind: TokenKind::String, line: 1 })]
#[case("42", ParseError::InvalidStart { kind: TokenKind::Number, line: 1 })]
#[case("{\"a\":1\n]", ParseError::ExpectedObjectClose { kind: TokenKind::ArrayClose, line: 2 })]
#[case("[1,\n2,\n}", ParseError::ExpectedArrayClose { kind: TokenKind::ObjectClose, line: 3 })]
#[case(r#"{"a" 1}"#, ParseError::ExpectedColon { kind: TokenKind::Number, line: 1 })]
#[case(r#"{"a"::1}"#, ParseError::IllegalValueToken { kind: TokenKind::Colon, line: 1 })]
#[case(r#"{"a":1-}"#, ParseError::InvalidNumberLiteral { text: "1-".to_owned(), line: 1 })]
fn test_parse_errors(#[case] input: &str, #[case] expected: ParseError) {
    match parse_str(input) {
        Err(Error::Parse(err)) => assert_eq!(err, expected),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[rstest]
fn test_strict_rejects_missing_comma() {
    let opts = ParseOptions::new().with_strict(true);
    let err = parse_str_with_options(r#"{"a":1 "b":2}"#, &opts).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::ExpectedComma {
            kind: TokenKind::String,
            ..
        })
    ));
    assert_eq!(err.line(), Some(1));
}

#[rstest]
fn test_missing_file_is_source_error() {
    let err = parse_file("/definitely/not/here.json").unwrap_err();
    match err {
        Error::Source(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::NotFound),
        other => panic!("expected source error, got {other:?}"),
    }
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[rstest]
fn test_read_failure_is_source_error() {
    let err = parse(FailingReader).unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert_eq!(err.line(), None);
}

#[rstest]
fn test_error_messages_name_the_token() {
    let err = parse_str(r#"{"a":]"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "illegal token for value: arrayClose on line 1"
    );
}

#[rstest]
fn test_depth_limit_is_reported() {
    let opts = ParseOptions::new().with_max_depth(3);
    let err = parse_str_with_options("[[[[1]]]]", &opts).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::DepthLimitExceeded { max: 3 })
    ));
}

#[rstest]
fn test_depth_limit_is_capped() {
    let input = format!("{}1{}", "[".repeat(5000), "]".repeat(5000));
    let opts = ParseOptions::new().with_max_depth(usize::MAX);
    let err = parse_str_with_options(&input, &opts).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::DepthLimitExceeded { max: MAX_DEPTH_CEILING })
    ));

    let mut raw = ParseOptions::new();
    raw.max_depth = usize::MAX;
    assert!(parse_str_with_options(&input, &raw).is_err());

    let deepest = format!("{}{}", "[".repeat(MAX_DEPTH_CEILING), "]".repeat(MAX_DEPTH_CEILING));
    let bundle = parse_str_with_options(&deepest, &opts).unwrap();
    assert_eq!(bundle.release().arrays, MAX_DEPTH_CEILING);
}
