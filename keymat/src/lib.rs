//! Recognizing and decoding nkeys.
//!
//! Command arguments often accept either a key or a path to a file holding
//! one. [`looks_like_nkey`] tells the two apart by shape alone, and
//! [`parse_nkey`] decodes a key into a [`KeyHandle`].
//!
//! | shape       | length   | prefix          |
//! |-------------|----------|-----------------|
//! | seed        | 58, 109  | `S` + category  |
//! | public key  | 56       | category        |

pub mod error;

use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use error::Error;
use nkeys::KeyPair;
use nkspec::decoder::{DecodableFrom, Decoder};
use zeroize::Zeroizing;

const SEED_PREFIX: char = 'S';
const SEED_LENGTHS: [usize; 2] = [58, 109];
const PUBLIC_KEY_LENGTH: usize = 56;

/// The kind of entity a key belongs to, named by its one-byte prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Operator,
    Account,
    User,
    Server,
    Cluster,
}

impl Category {
    pub fn prefix(self) -> u8 {
        match self {
            Category::Operator => b'O',
            Category::Account => b'A',
            Category::User => b'U',
            Category::Server => b'N',
            Category::Cluster => b'C',
        }
    }

    pub fn from_prefix(prefix: u8) -> Option<Category> {
        match prefix {
            b'O' => Some(Category::Operator),
            b'A' => Some(Category::Account),
            b'U' => Some(Category::User),
            b'N' => Some(Category::Server),
            b'C' => Some(Category::Cluster),
            _ => None,
        }
    }

    /// Shorthand for [`looks_like_nkey`] with this category's prefix.
    pub fn looks_like(self, s: &str) -> bool {
        looks_like_nkey(s, self.prefix())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Operator => "operator",
            Category::Account => "account",
            Category::User => "user",
            Category::Server => "server",
            Category::Cluster => "cluster",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "operator" => Ok(Category::Operator),
            "account" => Ok(Category::Account),
            "user" => Ok(Category::User),
            "server" => Ok(Category::Server),
            "cluster" => Ok(Category::Cluster),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Reports whether `s` is shaped like a seed or public key whose category
/// prefix is `prefix`.
///
/// Only length and prefix are checked; the encoding is not validated. Any
/// string containing a path separator is rejected so a key file path is
/// never mistaken for a key.
pub fn looks_like_nkey(s: &str, prefix: u8) -> bool {
    if s.contains(std::path::is_separator) {
        tracing::debug!(len = s.len(), "key candidate contains a path separator");
        return false;
    }

    let category = char::from(prefix);
    let mut chars = s.chars();
    if SEED_LENGTHS.contains(&s.len()) {
        return chars.next() == Some(SEED_PREFIX) && chars.next() == Some(category);
    }
    if s.len() == PUBLIC_KEY_LENGTH {
        return chars.next() == Some(category);
    }
    false
}

/// Decodes a seed (text starting with `S`) or a public key.
///
/// # Errors
///
/// [`Error::InvalidKeyEncoding`] when the key-encoding layer rejects the
/// text. For seeds only the first two characters are kept in the error.
pub fn parse_nkey(s: &str) -> Result<KeyHandle, Error> {
    if s.starts_with(SEED_PREFIX) {
        KeyPair::from_seed(s)
            .map(KeyHandle::Seed)
            .map_err(|source| Error::InvalidKeyEncoding {
                input: redact(s),
                source,
            })
    } else {
        KeyPair::from_public_key(s)
            .map(KeyHandle::Public)
            .map_err(|source| Error::InvalidKeyEncoding {
                input: s.to_string(),
                source,
            })
    }
}

fn redact(seed: &str) -> String {
    let prefix: String = seed.chars().take(2).collect();
    format!("{prefix}...")
}

/// A decoded key.
///
/// A `Seed` handle can sign and derive its public key; a `Public` handle can
/// only verify. The caller owns the handle and should drop it as soon as the
/// key is no longer needed.
pub enum KeyHandle {
    Seed(KeyPair),
    Public(KeyPair),
}

impl KeyHandle {
    pub fn is_seed(&self) -> bool {
        matches!(self, KeyHandle::Seed(_))
    }

    pub fn public_key(&self) -> String {
        self.key_pair().public_key()
    }

    /// The encoded seed, cleared from memory when the returned value drops.
    pub fn seed(&self) -> Result<Zeroizing<String>, Error> {
        match self {
            KeyHandle::Seed(kp) => kp.seed().map(Zeroizing::new).map_err(Error::Key),
            KeyHandle::Public(_) => Err(Error::MissingSeed),
        }
    }

    /// Category taken from the public key prefix.
    pub fn category(&self) -> Option<Category> {
        self.public_key()
            .bytes()
            .next()
            .and_then(Category::from_prefix)
    }

    pub fn key_pair(&self) -> &KeyPair {
        match self {
            KeyHandle::Seed(kp) | KeyHandle::Public(kp) => kp,
        }
    }

    pub fn into_key_pair(self) -> KeyPair {
        match self {
            KeyHandle::Seed(kp) | KeyHandle::Public(kp) => kp,
        }
    }
}

// Never prints the seed.
impl Debug for KeyHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let variant = if self.is_seed() { "Seed" } else { "Public" };
        f.debug_tuple(variant).field(&self.public_key()).finish()
    }
}

impl DecodableFrom<&str> for KeyHandle {}

impl Decoder<&str, KeyHandle> for &str {
    type Error = Error;

    fn decode(&self) -> Result<KeyHandle, Self::Error> {
        parse_nkey(self)
    }
}

#[cfg(test)]
mod tests {
    use nkeys::KeyPair;
    use nkspec::decoder::Decoder;
    use rstest::rstest;
    use std::str::FromStr;

    use crate::error::Error;
    use crate::{Category, KeyHandle, looks_like_nkey, parse_nkey};

    fn shaped(prefix: &str, len: usize) -> String {
        format!("{prefix}{}", "A".repeat(len - prefix.len()))
    }

    #[rstest(
        input,
        prefix,
        expected,
        case(shaped("U", 56), b'U', true),
        case(shaped("SU", 58), b'U', true),
        case(shaped("SU", 109), b'U', true),
        case(shaped("U", 57), b'U', false),
        case(shaped("SU", 56), b'U', false),
        case(shaped("U", 58), b'U', false),
        case(shaped("A", 56), b'U', false),
        case(shaped("SA", 58), b'U', false),
        case(shaped("O", 56), b'O', true),
        case(format!("U{}/", "A".repeat(54)), b'U', false),
        case(format!("SU{}/", "A".repeat(55)), b'U', false),
        case(String::new(), b'U', false)
    )]
    fn test_looks_like_nkey(input: String, prefix: u8, expected: bool) {
        assert_eq!(expected, looks_like_nkey(&input, prefix));
    }

    #[test]
    fn test_looks_like_generated_keys() {
        let user = KeyPair::new_user();
        let public = user.public_key();
        let seed = user.seed().unwrap();

        assert!(Category::User.looks_like(&public));
        assert!(Category::User.looks_like(&seed));
        assert!(!Category::Account.looks_like(&public));
        assert!(!Category::Account.looks_like(&seed));
    }

    #[test]
    fn test_parse_seed() {
        let operator = KeyPair::new_operator();
        let seed = operator.seed().unwrap();

        let handle = parse_nkey(&seed).unwrap();
        assert!(handle.is_seed());
        assert_eq!(operator.public_key(), handle.public_key());
        assert_eq!(seed, handle.seed().unwrap().as_str());
        assert_eq!(Some(Category::Operator), handle.category());
    }

    #[test]
    fn test_parse_public_key() {
        let account = KeyPair::new_account();
        let public = account.public_key();

        let handle: KeyHandle = public.as_str().decode().unwrap();
        assert!(!handle.is_seed());
        assert_eq!(public, handle.public_key());
        assert_eq!(Some(Category::Account), handle.category());
        assert!(matches!(handle.seed(), Err(Error::MissingSeed)));
        assert_eq!(public, handle.into_key_pair().public_key());
    }

    #[test]
    fn test_debug_hides_seed() {
        let user = KeyPair::new_user();
        let seed = user.seed().unwrap();
        let handle = parse_nkey(&seed).unwrap();

        let printed = format!("{handle:?}");
        assert!(printed.starts_with("Seed("));
        assert!(printed.contains(&user.public_key()));
        assert!(!printed.contains(&seed));
    }

    #[rstest(
        input,
        expected_input,
        case("SUNOTAREALSEED", "SU..."),
        case("S", "S..."),
        case("UNOTAREALKEY", "UNOTAREALKEY")
    )]
    fn test_parse_nkey_with_error(input: &str, expected_input: &str) {
        match parse_nkey(input) {
            Err(Error::InvalidKeyEncoding { input, .. }) => assert_eq!(expected_input, input),
            other => panic!("expected InvalidKeyEncoding, got {other:?}"),
        }
    }

    #[rstest(
        input,
        expected,
        case("operator", Category::Operator),
        case("Account", Category::Account),
        case("USER", Category::User),
        case("server", Category::Server),
        case("cluster", Category::Cluster)
    )]
    fn test_category_from_str(input: &str, expected: Category) {
        let got = Category::from_str(input).unwrap();
        assert_eq!(expected, got);
        assert_eq!(input.to_lowercase(), got.to_string());
        assert_eq!(Some(got), Category::from_prefix(got.prefix()));
    }

    #[test]
    fn test_category_from_str_with_error() {
        assert!(matches!(
            Category::from_str("signer"),
            Err(Error::UnknownCategory(s)) if s == "signer"
        ));
        assert_eq!(None, Category::from_prefix(b'S'));
    }
}
