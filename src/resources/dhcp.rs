use crate::client::{ApiRequest, Client};
use crate::types::{DhcpStaticLeaseInfo, DhcpStaticLeasePayload, LanInterfaceHost};
use crate::Result;

impl Client {
    pub async fn list_dhcp_static_leases(&self) -> Result<Vec<DhcpStaticLeaseInfo>> {
        let leases: Option<Vec<DhcpStaticLeaseInfo>> =
            self.execute(ApiRequest::get("dhcp/static_lease/")).await?;
        Ok(leases.unwrap_or_default())
    }

    pub async fn get_dhcp_static_lease(&self, id: &str) -> Result<DhcpStaticLeaseInfo> {
        self.execute(ApiRequest::get(format!("dhcp/static_lease/{id}")))
            .await
    }

    pub async fn create_dhcp_static_lease(
        &self,
        payload: &DhcpStaticLeasePayload,
    ) -> Result<LanInterfaceHost> {
        self.execute(ApiRequest::post("dhcp/static_lease/").with_json(payload)?)
            .await
    }

    pub async fn update_dhcp_static_lease(
        &self,
        id: &str,
        payload: &DhcpStaticLeasePayload,
    ) -> Result<LanInterfaceHost> {
        self.execute(ApiRequest::put(format!("dhcp/static_lease/{id}")).with_json(payload)?)
            .await
    }

    pub async fn delete_dhcp_static_lease(&self, id: &str) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("dhcp/static_lease/{id}")))
            .await
    }
}
