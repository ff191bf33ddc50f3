//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. It is implemented by the nkspec crates for every textual form they
//! know how to interpret.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - Performs the actual conversion
//! 2. `DecodableFrom<T>` - Marker trait constraining valid conversions
//!
//! Only conversions that a crate explicitly opts into compile.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use nkspec::decoder::{Decoder, DecodableFrom};
//!
//! struct Token(String);
//!
//! #[derive(Debug)]
//! struct TokenError;
//!
//! // 1. Mark the destination type as decodable from the source type
//! impl DecodableFrom<&str> for Token {}
//!
//! // 2. Implement the decoder on the source type
//! impl Decoder<&str, Token> for &str {
//!     type Error = TokenError;
//!
//!     fn decode(&self) -> Result<Token, Self::Error> {
//!         if self.is_empty() {
//!             return Err(TokenError);
//!         }
//!         Ok(Token(self.to_string()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type; the destination must implement
/// `DecodableFrom<T>`.
///
/// # Type Parameters
///
/// * `T` - The source type (usually `Self`)
/// * `D` - The destination type that can be decoded from `T`
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid textual form of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// It has no methods. Without it any type could claim to decode into any
/// other; requiring an explicit `impl DecodableFrom<T> for D {}` keeps the
/// set of conversions closed.
pub trait DecodableFrom<T> {}

#[cfg(test)]
mod tests {
    use super::{DecodableFrom, Decoder};
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Upper(String);

    impl DecodableFrom<&str> for Upper {}

    impl Decoder<&str, Upper> for &str {
        type Error = ();

        fn decode(&self) -> Result<Upper, Self::Error> {
            if self.is_empty() {
                return Err(());
            }
            Ok(Upper(self.to_uppercase()))
        }
    }

    #[rstest(input, expected, case("operator", Some("OPERATOR")), case("", None))]
    fn test_decode(input: &str, expected: Option<&str>) {
        let got: Result<Upper, ()> = input.decode();
        assert_eq!(expected.map(|s| Upper(s.to_string())), got.ok());
    }
}
