pub mod bundle;
pub mod error;
pub mod ledger;
pub mod lex;
pub mod options;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod parse;
pub mod value;

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use crate::bundle::Bundle;
pub use crate::error::{Error, LexError, ParseError};
pub use crate::ledger::{AllocId, AllocKind, Ledger, LedgerEntry, ReleaseReport};
pub use crate::lex::{tokenize, Token, TokenKind};
pub use crate::options::ParseOptions;
pub use crate::value::{Object, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse<R: Read>(reader: R) -> Result<Bundle> {
    parse_with_options(reader, &ParseOptions::default())
}

pub fn parse_with_options<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Bundle> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_slice_with_options(&buf, options)
}

pub fn parse_str(input: &str) -> Result<Bundle> {
    parse_slice_with_options(input.as_bytes(), &ParseOptions::default())
}

pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Bundle> {
    parse_slice_with_options(input.as_bytes(), options)
}

pub fn parse_slice(input: &[u8]) -> Result<Bundle> {
    parse_slice_with_options(input, &ParseOptions::default())
}

pub fn parse_slice_with_options(input: &[u8], options: &ParseOptions) -> Result<Bundle> {
    let tokens = lex::tokenize(input)?;
    let (root, ledger) = parse::parse_tokens(tokens, options)?;
    Ok(Bundle::new(root, ledger))
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Bundle> {
    parse_file_with_options(path, &ParseOptions::default())
}

pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Bundle> {
    let file = File::open(path.as_ref())?;
    parse_with_options(file, options)
}
