use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("couldn't parse number: {0:?}")]
    InvalidNumberSyntax(String),
    #[error("couldn't parse data size: {0:?}")]
    InvalidDataSizeSyntax(String),
}
