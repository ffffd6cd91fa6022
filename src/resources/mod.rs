//! 资源接口：按资源族扩展 [`Client`](crate::Client) 的方法。
//!
//! Resource facades. Each submodule adds `impl Client` methods for one
//! resource family; all of them go through the shared dispatcher.

mod dhcp;
mod disks;
mod downloads;
mod fs;
mod lan;
mod port_forwarding;
mod uploads;
mod vm;

pub use uploads::FileUpload;

use crate::types::fields::Base64Path;

/// Wire form of a path used as a URL segment.
pub(crate) fn encode_path(path: &str) -> String {
    Base64Path::new(path).encoded()
}
