use serde::{Deserialize, Serialize};

/// A LAN interface as listed by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanInterface {
    pub name: String,
    #[serde(default)]
    pub host_count: u32,
}

/// Layer 2 identity of a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Ident {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostName {
    pub name: String,
    #[serde(default)]
    pub source: String,
}

/// Layer 3 (IP) connectivity of a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L3Connectivity {
    pub addr: String,
    /// `ipv4` or `ipv6`.
    #[serde(default)]
    pub af: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub reachable: bool,
    #[serde(default)]
    pub last_activity: i64,
    #[serde(default)]
    pub last_time_reachable: i64,
}

/// A host seen on a LAN interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanInterfaceHost {
    pub id: String,
    #[serde(default)]
    pub primary_name: String,
    #[serde(default)]
    pub host_type: String,
    #[serde(default)]
    pub primary_name_manual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2ident: Option<L2Ident>,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub persistent: bool,
    #[serde(default)]
    pub reachable: bool,
    #[serde(default)]
    pub last_time_reachable: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub last_activity: i64,
    #[serde(default)]
    pub first_activity: i64,
    #[serde(default)]
    pub names: Vec<HostName>,
    #[serde(default)]
    pub l3connectivities: Vec<L3Connectivity>,
    #[serde(default)]
    pub interface: String,
}
