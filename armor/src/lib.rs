pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use error::Error;
use nkspec::decoder::{DecodableFrom, Decoder};
use regex::Regex;

const PRIVATE_KEY_KIND: &str = "PRIVATE KEY";
const PUB_KEY_KIND: &str = "PUB KEY";
const JWT_KIND: &str = "JWT";

const SECRET_WARNING: &str = "\
************************* IMPORTANT *************************
Your options generated NKEYs which can be used to create
entities or prove identity.

Generated keys printed below are sensitive and should be
treated as secrets to prevent unauthorized access.

The private key is not saved by the tool. Please save
it now as it will be required by the user to connect to NATS.
The public key is saved and uniquely identifies the user.

";

const SECRET_RULE: &str = "*************************************************************";

/// What a delimited block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A seed
    PrivateKey,
    /// A public key
    PubKey,
    /// A signed token
    Jwt,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::PrivateKey => write!(f, "{}", PRIVATE_KEY_KIND),
            Kind::PubKey => write!(f, "{}", PUB_KEY_KIND),
            Kind::Jwt => write!(f, "{}", JWT_KIND),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIVATE_KEY_KIND => Ok(Kind::PrivateKey),
            PUB_KEY_KIND => Ok(Kind::PubKey),
            JWT_KIND => Ok(Kind::Jwt),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Begin,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Boundary {
    edge: Edge,
    label: String,
    kind: Kind,
}

impl Boundary {
    fn parse(line: &str) -> Result<Boundary, Error> {
        let re = Regex::new(
            r"^-+(?P<edge>BEGIN|END) (?P<label>.*) (?P<kind>PRIVATE KEY|PUB KEY|JWT)-+$",
        )
        .map_err(|_| Error::InvalidBoundary)?;
        let captured = re.captures(line.trim()).ok_or(Error::InvalidBoundary)?;
        let edge = match captured.name("edge").map(|m| m.as_str()) {
            Some("BEGIN") => Edge::Begin,
            Some("END") => Edge::End,
            _ => return Err(Error::InvalidBoundary),
        };
        let label = captured
            .name("label")
            .ok_or(Error::InvalidBoundary)?
            .as_str()
            .to_string();
        let kind = captured
            .name("kind")
            .ok_or(Error::InvalidBoundary)
            .map(|m| Kind::from_str(m.as_str()))??;
        Ok(Boundary { edge, label, kind })
    }

    fn name(&self) -> String {
        format!("{} {}", self.label, self.kind)
    }
}

/// A labeled block of key or token text.
///
/// The `Display` form is the exchange format written by `format_keys` and
/// `format_jwt`:
///
/// ```text
/// -----BEGIN OPERATOR JWT-----
/// eyJ0eXAiOiJKV1QiLCJhbGciOiJlZDI1NTE5LW5rZXkifQ...
/// ------END OPERATOR JWT------
/// ```
///
/// END markers carry six dashes on each side, BEGIN markers five. Readers
/// written against this format depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Armor {
    label: String,
    kind: Kind,
    payload: String,
}

impl Armor {
    /// Builds a block. The label is uppercased.
    pub fn new(label: &str, kind: Kind, payload: impl Into<String>) -> Self {
        Armor {
            label: label.to_uppercase(),
            kind,
            payload: payload.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl Display for Armor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "-----BEGIN {} {}-----", self.label, self.kind)?;
        writeln!(f, "{}", self.payload)?;
        write!(f, "------END {} {}------", self.label, self.kind)
    }
}

/// Renders generated key material for display.
///
/// A private key is preceded by a warning that the tool does not keep it.
/// `None` and empty strings are both treated as absent.
pub fn format_keys(label: &str, public_key: Option<&str>, private_key: Option<&str>) -> Vec<u8> {
    let mut output = String::new();

    if let Some(private_key) = private_key.filter(|k| !k.is_empty()) {
        output.push_str(SECRET_WARNING);
        output.push_str(&format!(
            "{}\n\n",
            Armor::new(label, Kind::PrivateKey, private_key)
        ));
        output.push_str(&format!("{}\n\n", SECRET_RULE));
    }

    if let Some(public_key) = public_key.filter(|k| !k.is_empty()) {
        output.push_str(&format!("{}\n\n", Armor::new(label, Kind::PubKey, public_key)));
    }

    output.push('\n');
    output.into_bytes()
}

/// Renders a signed token for display.
pub fn format_jwt(label: &str, jwt: &str) -> Vec<u8> {
    format!("{}\n\n", Armor::new(label, Kind::Jwt, jwt)).into_bytes()
}

/// Recovers the payload of a delimited block, or returns `s` unchanged when
/// it holds none.
///
/// Whitespace is removed and dash runs are collapsed before matching, so
/// hand-edited blocks with wrapped payloads or uneven markers still extract.
/// When the text holds several blocks, the payload of the last one is
/// returned.
pub fn extract_token(s: &str) -> String {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    let (Ok(dashes), Ok(block)) = (
        Regex::new(r"-+"),
        Regex::new(r"(-BEGIN.+(?:JWT|KEY)-)(?P<token>.+)(-END.+(?:JWT|KEY)-)"),
    ) else {
        return s.to_string();
    };
    let compact = dashes.replace_all(&compact, "-");

    match block.captures(&compact).and_then(|c| c.name("token")) {
        Some(token) => token.as_str().to_string(),
        None => {
            tracing::trace!("no delimited block found, passing input through");
            s.to_string()
        }
    }
}

/// Reads the next block from `lines`, skipping any text before it.
///
/// Returns `Ok(None)` when no BEGIN marker remains.
fn next_block<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<Option<Armor>, Error> {
    let begin = loop {
        match lines.next() {
            Some(line) => {
                if let Ok(boundary) = Boundary::parse(line) {
                    if boundary.edge == Edge::Begin {
                        break boundary;
                    }
                    return Err(Error::MissingBeginMarker);
                }
                // explanatory text outside a block is ignored
            }
            None => return Ok(None),
        }
    };

    let mut payload = String::new();
    loop {
        match lines.next() {
            Some(line) => match Boundary::parse(line) {
                Ok(end) if end.edge == Edge::End => {
                    if end.label != begin.label || end.kind != begin.kind {
                        return Err(Error::LabelMismatch {
                            expected: begin.name(),
                            found: end.name(),
                        });
                    }
                    break;
                }
                Ok(_) => return Err(Error::MissingEndMarker),
                Err(_) => payload.push_str(line.trim()),
            },
            None => return Err(Error::MissingEndMarker),
        }
    }

    if payload.is_empty() {
        return Err(Error::MissingPayload);
    }

    Ok(Some(Armor {
        label: begin.label,
        kind: begin.kind,
        payload,
    }))
}

/// Parses every block in `s`, in order.
///
/// `format_keys` output holds a private and a public block; this returns
/// both.
pub fn parse_many(s: &str) -> Result<Vec<Armor>, Error> {
    let mut lines = s.lines();
    let mut blocks = Vec::new();
    while let Some(block) = next_block(&mut lines)? {
        blocks.push(block);
    }

    if blocks.is_empty() {
        return Err(Error::MissingBeginMarker);
    }

    Ok(blocks)
}

impl FromStr for Armor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        next_block(&mut s.lines())?.ok_or(Error::MissingBeginMarker)
    }
}

impl DecodableFrom<String> for Armor {}

impl Decoder<String, Armor> for String {
    type Error = Error;

    fn decode(&self) -> Result<Armor, Self::Error> {
        Armor::from_str(self)
    }
}

impl DecodableFrom<&str> for Armor {}

impl Decoder<&str, Armor> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Armor, Self::Error> {
        Armor::from_str(self)
    }
}
