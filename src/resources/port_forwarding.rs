use crate::client::{ApiRequest, Client};
use crate::types::{PortForwardingRule, PortForwardingRulePayload};
use crate::Result;

impl Client {
    pub async fn list_port_forwarding_rules(&self) -> Result<Vec<PortForwardingRule>> {
        let rules: Option<Vec<PortForwardingRule>> =
            self.execute(ApiRequest::get("fw/redir/")).await?;
        Ok(rules.unwrap_or_default())
    }

    /// Fails with [`Error::NotFound`](crate::Error::NotFound) for an unknown id.
    pub async fn get_port_forwarding_rule(&self, id: i64) -> Result<PortForwardingRule> {
        self.execute(ApiRequest::get(format!("fw/redir/{id}"))).await
    }

    pub async fn create_port_forwarding_rule(
        &self,
        payload: &PortForwardingRulePayload,
    ) -> Result<PortForwardingRule> {
        self.execute(ApiRequest::post("fw/redir/").with_json(payload)?)
            .await
    }

    /// Only the fields set in `payload` are changed.
    pub async fn update_port_forwarding_rule(
        &self,
        id: i64,
        payload: &PortForwardingRulePayload,
    ) -> Result<PortForwardingRule> {
        self.execute(ApiRequest::put(format!("fw/redir/{id}")).with_json(payload)?)
            .await
    }

    pub async fn delete_port_forwarding_rule(&self, id: i64) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("fw/redir/{id}"))).await
    }
}
