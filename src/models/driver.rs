use serde::Serialize;
use uuid::Uuid;

/// One flat record per driver, keyed by an opaque identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub fleet_number: String,
    pub registration: String,
    pub company: String,
    pub tenant_id: Option<String>,
}

/// Fields captured by the registration form.
#[derive(Debug, Clone, Default)]
pub struct NewDriver {
    pub name: String,
    pub fleet_number: String,
    pub registration: String,
    pub company: String,
}

/// Fields that can be changed on an existing driver.
#[derive(Debug, Clone, Default)]
pub struct DriverUpdate {
    pub name: Option<String>,
    pub fleet_number: Option<String>,
    pub registration: Option<String>,
    pub company: Option<String>,
}

impl Driver {
    pub fn new(input: NewDriver, tenant_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            fleet_number: input.fleet_number.trim().to_string(),
            registration: input.registration.trim().to_string(),
            company: input.company.trim().to_string(),
            tenant_id,
        }
    }

    /// First eight characters of the id, enough to reference a driver on the CLI.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl DriverUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.fleet_number.is_none()
            && self.registration.is_none()
            && self.company.is_none()
    }

    pub fn apply(&self, driver: &mut Driver) {
        if let Some(v) = &self.name {
            driver.name = v.trim().to_string();
        }
        if let Some(v) = &self.fleet_number {
            driver.fleet_number = v.trim().to_string();
        }
        if let Some(v) = &self.registration {
            driver.registration = v.trim().to_string();
        }
        if let Some(v) = &self.company {
            driver.company = v.trim().to_string();
        }
    }
}
