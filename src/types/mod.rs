//! 类型模块：路由器管理接口的数据结构。
//!
//! # Types Module
//!
//! Strongly-typed request and response shapes for every resource family.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`fields`] | Field codecs ([`Base64Path`], [`BindUsbPorts`]) |
//! | [`port_forwarding`] | Port forwarding rules |
//! | [`dhcp`] | Static DHCP leases |
//! | [`lan`] | LAN browser interfaces and hosts |
//! | [`vm`] | Virtual machines and virtual disks |
//! | [`fs`] | Filesystem info, tasks and downloads |
//! | [`downloads`] | Download manager |
//! | [`uploads`] | Uploads |
//! | [`events`] | Event stream |
//! | [`system`] | API version discovery, shared task id |

pub mod dhcp;
pub mod downloads;
pub mod events;
pub mod fields;
pub mod fs;
pub mod lan;
pub mod port_forwarding;
pub mod system;
pub mod uploads;
pub mod vm;

pub use dhcp::{DhcpStaticLeaseInfo, DhcpStaticLeasePayload};
pub use downloads::{DownloadRequest, DownloadStatus, DownloadTask, DownloadTaskUpdate, IoPriority};
pub use events::{Event, EventDescription, VirtualMachineStateChange};
pub use fields::{Base64Path, BindUsbPorts};
pub use fs::{
    ConflictMode, ExtractPayload, File, FileInfo, FileSystemTask, FileSystemTaskState,
    FileSystemTaskType, FileSystemTaskUpdate, FileTransferPayload, FileType, HashPayload, HashType,
};
pub use lan::{HostName, L2Ident, L3Connectivity, LanInterface, LanInterfaceHost};
pub use port_forwarding::{IpProtocol, PortForwardingRule, PortForwardingRulePayload};
pub use system::{ApiVersion, TaskId};
pub use uploads::{Upload, UploadStartPayload, UploadStatus};
pub use vm::{
    DiskType, VirtualDiskCreatePayload, VirtualDiskInfo, VirtualDiskResizePayload,
    VirtualDiskTask, VirtualDiskTaskType, VirtualMachine, VirtualMachineDistribution,
    VirtualMachineOs, VirtualMachinePayload, VirtualMachineStatus, VirtualMachinesInfo,
};
