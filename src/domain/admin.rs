use serde::{Deserialize, Serialize};

pub const ADMIN_RIGHTS: u32 = 1 << 16;

/// One row of the host's administrator directory. Groups appear here too,
/// usually without a personal email address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminEntry {
    /// Login identifier.
    pub user: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rights: u32,
    #[serde(default)]
    pub group: bool,
}

impl AdminEntry {
    pub fn has_admin_rights(&self) -> bool {
        self.rights & ADMIN_RIGHTS != 0
    }

    /// Returns the entry as a mail recipient if it has an email address and
    /// admin privilege.
    pub fn to_contact(&self) -> Option<AdminContact> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        if !self.has_admin_rights() {
            return None;
        }
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.user.as_str());
        Some(AdminContact {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContact {
    pub name: String,
    pub email: String,
}
