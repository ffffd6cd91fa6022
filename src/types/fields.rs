//! Field codecs for values whose wire form differs from their logical form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// A filesystem path carried on the wire as standard base64.
///
/// Deserializing decodes the base64 text and requires UTF-8; serializing
/// re-encodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Base64Path(pub String);

impl Base64Path {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The wire form of the path.
    pub fn encoded(&self) -> String {
        STANDARD.encode(self.0.as_bytes())
    }

    /// Decode a wire string into a plain path.
    pub fn decode(encoded: &str) -> Result<Self, String> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| format!("invalid base64 path {encoded:?}: {e}"))?;
        String::from_utf8(bytes)
            .map(Self)
            .map_err(|e| format!("base64 path is not valid UTF-8: {e}"))
    }
}

impl Deref for Base64Path {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Base64Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Base64Path {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Base64Path {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for Base64Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded())
    }
}

impl<'de> Deserialize<'de> for Base64Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::decode(&encoded).map_err(de::Error::custom)
    }
}

/// USB ports bound to a virtual machine.
///
/// The upstream sends `""` when nothing is bound and a list of port names
/// otherwise. Any other shape is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindUsbPorts(pub Vec<String>);

impl BindUsbPorts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for BindUsbPorts {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for BindUsbPorts {
    fn from(ports: Vec<String>) -> Self {
        Self(ports)
    }
}

impl Serialize for BindUsbPorts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BindUsbPorts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            List(Vec<String>),
        }

        match Wire::deserialize(deserializer).map_err(|_| {
            de::Error::custom("bind_usb_ports must be an empty string or a list of strings")
        })? {
            Wire::Text(s) if s.is_empty() => Ok(Self::default()),
            Wire::Text(s) => Err(de::Error::invalid_value(
                de::Unexpected::Str(&s),
                &"an empty string or a list of strings",
            )),
            Wire::List(ports) => Ok(Self(ports)),
        }
    }
}
