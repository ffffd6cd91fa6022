//! Virtual machine and virtual disk types.

use super::fields::{Base64Path, BindUsbPorts};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host capacity for virtual machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachinesInfo {
    #[serde(default)]
    pub usb_used: bool,
    #[serde(default)]
    pub sata_used: bool,
    #[serde(default)]
    pub sata_ports: Vec<String>,
    #[serde(default)]
    pub used_memory: u64,
    #[serde(default)]
    pub usb_ports: Vec<String>,
    #[serde(default)]
    pub used_cpus: u32,
    pub total_memory: u64,
    pub total_cpus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachineDistribution {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub os: VirtualMachineOs,
    pub url: String,
    pub name: String,
}

/// Guest operating system. Unknown names are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VirtualMachineOs {
    #[default]
    Unknown,
    Fedora,
    Debian,
    Ubuntu,
    FreeBsd,
    CentOs,
    Jeedom,
    Homebridge,
    Other(String),
}

impl VirtualMachineOs {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "unknown",
            Self::Fedora => "fedora",
            Self::Debian => "debian",
            Self::Ubuntu => "ubuntu",
            Self::FreeBsd => "freebsd",
            Self::CentOs => "centos",
            Self::Jeedom => "jeedom",
            Self::Homebridge => "homebridge",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for VirtualMachineOs {
    fn from(s: String) -> Self {
        match s.as_str() {
            "unknown" | "" => Self::Unknown,
            "fedora" => Self::Fedora,
            "debian" => Self::Debian,
            "ubuntu" => Self::Ubuntu,
            "freebsd" => Self::FreeBsd,
            "centos" => Self::CentOs,
            "jeedom" => Self::Jeedom,
            "homebridge" => Self::Homebridge,
            _ => Self::Other(s),
        }
    }
}

impl From<VirtualMachineOs> for String {
    fn from(os: VirtualMachineOs) -> Self {
        match os {
            VirtualMachineOs::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for VirtualMachineOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskType {
    #[default]
    Qcow2,
    Raw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VirtualMachineStatus {
    #[default]
    Stopped,
    Running,
    Starting,
    Stopping,
    #[serde(other)]
    Unknown,
}

/// Writable fields of a virtual machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachinePayload {
    pub name: String,
    #[serde(default)]
    pub disk_path: Base64Path,
    #[serde(default)]
    pub disk_type: DiskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cd_path: Option<Base64Path>,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub os: VirtualMachineOs,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub enable_screen: bool,
    #[serde(default)]
    pub bind_usb_ports: BindUsbPorts,
    #[serde(default)]
    pub enable_cloudinit: bool,
    #[serde(default)]
    pub cloudinit_userdata: String,
    #[serde(default)]
    pub cloudinit_hostname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: i64,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub status: VirtualMachineStatus,
    #[serde(flatten)]
    pub payload: VirtualMachinePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDiskInfo {
    #[serde(rename = "type", default)]
    pub disk_type: DiskType,
    #[serde(default)]
    pub actual_size: u64,
    pub virtual_size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VirtualDiskTaskType {
    Create,
    Resize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDiskTask {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: VirtualDiskTaskType,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDiskCreatePayload {
    pub disk_path: Base64Path,
    pub size: u64,
    pub disk_type: DiskType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDiskResizePayload {
    pub disk_path: Base64Path,
    pub size: u64,
    /// Must be set to shrink a disk; growing does not require it.
    #[serde(default)]
    pub shrink_allow: bool,
}
