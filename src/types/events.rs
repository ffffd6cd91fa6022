//! Event stream types.

use super::vm::VirtualMachineStatus;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An event to subscribe to, rendered on the wire as `source_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventDescription {
    pub source: String,
    pub name: String,
}

impl EventDescription {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }

    pub fn vm_state_changed() -> Self {
        Self::new("vm", "state_changed")
    }

    pub fn vm_disk_task_done() -> Self {
        Self::new("vm", "disk_task_done")
    }

    pub fn lan_host_reachable() -> Self {
        Self::new("lan_host", "l3addr_reachable")
    }

    pub fn lan_host_unreachable() -> Self {
        Self::new("lan_host", "l3addr_unreachable")
    }
}

impl fmt::Display for EventDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.source, self.name)
    }
}

/// A notification received on the event socket.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub source: String,
    pub name: String,
    pub result: Value,
}

impl Event {
    pub fn description(&self) -> EventDescription {
        EventDescription::new(self.source.clone(), self.name.clone())
    }

    pub fn is(&self, description: &EventDescription) -> bool {
        self.source == description.source && self.name == description.name
    }

    /// Decode the notification payload into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.result.clone())
    }
}

/// Payload of `vm_state_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachineStateChange {
    pub id: i64,
    pub status: VirtualMachineStatus,
}

/// Outgoing frame on the event socket.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterFrame {
    pub action: &'static str,
    pub events: Vec<String>,
}

/// Incoming frame on the event socket.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IncomingFrame {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn description_wire_name() {
        assert_eq!(EventDescription::vm_state_changed().to_string(), "vm_state_changed");
        assert_eq!(EventDescription::vm_disk_task_done().to_string(), "vm_disk_task_done");
    }

    #[test]
    fn state_change_payload() {
        let event = Event {
            source: "vm".into(),
            name: "state_changed".into(),
            result: json!({"id": 3, "status": "running"}),
        };
        assert!(event.is(&EventDescription::vm_state_changed()));
        let change: VirtualMachineStateChange = event.decode().unwrap();
        assert_eq!(change.status, VirtualMachineStatus::Running);
    }
}
