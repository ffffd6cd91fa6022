use crate::client::{ApiRequest, Client};
use crate::types::{LanInterface, LanInterfaceHost};
use crate::Result;

impl Client {
    pub async fn list_lan_interfaces(&self) -> Result<Vec<LanInterface>> {
        let interfaces: Option<Vec<LanInterface>> =
            self.execute(ApiRequest::get("lan/browser/interfaces/")).await?;
        Ok(interfaces.unwrap_or_default())
    }

    /// Hosts seen on `interface` (e.g. `pub`).
    pub async fn get_lan_interface(&self, interface: &str) -> Result<Vec<LanInterfaceHost>> {
        let hosts: Option<Vec<LanInterfaceHost>> = self
            .execute(ApiRequest::get(format!("lan/browser/{interface}/")))
            .await?;
        Ok(hosts.unwrap_or_default())
    }

    pub async fn get_lan_interface_host(
        &self,
        interface: &str,
        host_id: &str,
    ) -> Result<LanInterfaceHost> {
        self.execute(ApiRequest::get(format!("lan/browser/{interface}/{host_id}/")))
            .await
    }
}
