use serde::{Deserialize, Serialize};

/// Guest login obtained with a tenant PIN.
///
/// Field names follow the object the browser terminal kept in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSession {
    pub authenticated: bool,
    pub label: String,
    pub tenant_id: String,
    pub login_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Session {
    /// Full visibility across tenants.
    Admin {
        user: String,
        #[serde(rename = "loginTime")]
        login_time: i64,
    },
    Guest(GuestSession),
}

/// Which rows a session may read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Tenant(String),
}

impl Scope {
    /// Tenant id to bind in `(?N IS NULL OR tenant_id = ?N)` filters
    /// and to stamp on created rows.
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Scope::All => None,
            Scope::Tenant(t) => Some(t.as_str()),
        }
    }
}

impl Session {
    pub fn scope(&self) -> Scope {
        match self {
            Session::Admin { .. } => Scope::All,
            Session::Guest(g) => Scope::Tenant(g.tenant_id.clone()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin { .. })
    }

    pub fn label(&self) -> &str {
        match self {
            Session::Admin { user, .. } => user,
            Session::Guest(g) => &g.label,
        }
    }

    pub fn login_time(&self) -> i64 {
        match self {
            Session::Admin { login_time, .. } => *login_time,
            Session::Guest(g) => g.login_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_session_keeps_browser_field_names() {
        let s = Session::Guest(GuestSession {
            authenticated: true,
            label: "Terminal Principal".into(),
            tenant_id: "t-1".into(),
            login_time: 1_700_000_000_000,
        });
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"kind\":\"guest\""));
        assert!(json.contains("\"tenantId\":\"t-1\""));
        assert!(json.contains("\"loginTime\":1700000000000"));

        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scope(), Scope::Tenant("t-1".into()));
    }

    #[test]
    fn admin_sees_everything() {
        let s = Session::Admin {
            user: "root".into(),
            login_time: 0,
        };
        assert!(s.is_admin());
        assert_eq!(s.scope().tenant_id(), None);
    }
}
