use crate::client::{ApiRequest, Client};
use crate::types::{
    VirtualMachine, VirtualMachineDistribution, VirtualMachinePayload, VirtualMachinesInfo,
};
use crate::Result;

impl Client {
    pub async fn get_virtual_machine_info(&self) -> Result<VirtualMachinesInfo> {
        self.execute(ApiRequest::get("vm/info/")).await
    }

    pub async fn get_virtual_machine_distributions(
        &self,
    ) -> Result<Vec<VirtualMachineDistribution>> {
        let distros: Option<Vec<VirtualMachineDistribution>> =
            self.execute(ApiRequest::get("vm/distros/")).await?;
        Ok(distros.unwrap_or_default())
    }

    pub async fn list_virtual_machines(&self) -> Result<Vec<VirtualMachine>> {
        let machines: Option<Vec<VirtualMachine>> = self.execute(ApiRequest::get("vm/")).await?;
        Ok(machines.unwrap_or_default())
    }

    pub async fn create_virtual_machine(
        &self,
        payload: &VirtualMachinePayload,
    ) -> Result<VirtualMachine> {
        self.execute(ApiRequest::post("vm/").with_json(payload)?).await
    }

    pub async fn get_virtual_machine(&self, id: i64) -> Result<VirtualMachine> {
        self.execute(ApiRequest::get(format!("vm/{id}"))).await
    }

    pub async fn update_virtual_machine(
        &self,
        id: i64,
        payload: &VirtualMachinePayload,
    ) -> Result<VirtualMachine> {
        self.execute(ApiRequest::put(format!("vm/{id}")).with_json(payload)?)
            .await
    }

    pub async fn delete_virtual_machine(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("vm/{id}"))).await
    }

    pub async fn start_virtual_machine(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::post(format!("vm/{id}/start"))).await
    }

    /// Ask the guest to shut down (ACPI power button).
    pub async fn stop_virtual_machine(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::post(format!("vm/{id}/powerbutton")))
            .await
    }

    /// Force the machine off.
    pub async fn kill_virtual_machine(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::post(format!("vm/{id}/stop"))).await
    }
}
