use super::lan::LanInterfaceHost;
use serde::{Deserialize, Serialize};

/// Writable fields of a static DHCP lease.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpStaticLeasePayload {
    pub mac: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpStaticLeaseInfo {
    pub id: String,
    pub mac: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<LanInterfaceHost>,
}
