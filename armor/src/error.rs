use thiserror::Error;

/// Errors that can occur when strictly parsing a delimited block.
///
/// Lenient extraction through `extract_token` never fails; these only come
/// from `Armor::from_str` and `parse_many`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No `-----BEGIN <LABEL> <KIND>-----` line was found
    #[error("missing a BEGIN marker")]
    MissingBeginMarker,

    /// The input ended, or another block began, before the END line
    #[error("missing an END marker")]
    MissingEndMarker,

    /// Nothing between the BEGIN and END lines
    #[error("missing payload")]
    MissingPayload,

    /// BEGIN and END name different blocks (e.g. BEGIN USER JWT, END ACCOUNT JWT)
    #[error("END marker {found:?} doesn't match BEGIN marker {expected:?}")]
    LabelMismatch { expected: String, found: String },

    /// The marker kind is none of `PRIVATE KEY`, `PUB KEY` or `JWT`
    #[error("invalid block kind: {0:?}")]
    InvalidKind(String),

    /// The line is not a BEGIN or END marker
    #[error("invalid boundary")]
    InvalidBoundary,
}
