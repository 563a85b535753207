use serde::Serialize;

/// A PIN credential mapping a guest terminal to its tenant.
#[derive(Debug, Clone, Serialize)]
pub struct OperatorAccess {
    pub id: String,
    pub pin: String,
    pub label: String,
    pub tenant_id: String,
}
