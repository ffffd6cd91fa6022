use super::lan::LanInterfaceHost;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpProtocol {
    Tcp,
    Udp,
}

/// Writable fields of a port forwarding rule.
///
/// Every field is optional so the same shape serves creation and partial
/// updates. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortForwardingRulePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_proto: Option<IpProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_port_start: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_port_end: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lan_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lan_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortForwardingRule {
    pub id: i64,
    #[serde(flatten)]
    pub payload: PortForwardingRulePayload,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<LanInterfaceHost>,
}
