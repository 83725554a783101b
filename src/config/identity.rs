use crate::domain::ports::{Identifiers, IdentityProvider};

pub const ORCID_ID_VAR: &str = "CONFIG_ORCID_ID";
pub const MEDIUM_ID_VAR: &str = "CONFIG_MEDIUM_ID";

/// Reads the upstream identifiers from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvIdentity;

impl IdentityProvider for EnvIdentity {
    fn identifiers(&self) -> Identifiers {
        Identifiers {
            orcid_id: read_var(ORCID_ID_VAR),
            medium_id: read_var(MEDIUM_ID_VAR),
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identifiers: Identifiers,
}

impl StaticIdentity {
    pub fn new(orcid_id: Option<&str>, medium_id: Option<&str>) -> Self {
        Self {
            identifiers: Identifiers {
                orcid_id: orcid_id.map(str::to_string),
                medium_id: medium_id.map(str::to_string),
            },
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn identifiers(&self) -> Identifiers {
        self.identifiers.clone()
    }
}
