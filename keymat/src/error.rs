use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The key-encoding layer rejected the input. Seed input is reduced to
    /// its two-letter prefix before it is stored here.
    #[error("invalid key encoding for {input:?}: {source}")]
    InvalidKeyEncoding {
        input: String,
        #[source]
        source: nkeys::error::Error,
    },
    #[error("public key handle has no seed")]
    MissingSeed,
    #[error("key error: {0}")]
    Key(#[source] nkeys::error::Error),
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}
