use std::fmt;

use serde::{Deserialize, Serialize};

/// A named role flag granted to a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create, edit, and publish activities.
    Editor,
    /// Everything an editor may do, plus deleting records.
    Admin,
}

impl Role {
    /// Parses the role name stored in the `user_roles` table.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

#[mutants::skip]
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub roles: Vec<Role>,
}

impl UserSession {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Editors and admins may manage activities.
    pub fn can_manage_content(&self) -> bool {
        self.has_role(Role::Editor) || self.has_role(Role::Admin)
    }

    /// Only admins may delete.
    pub fn can_delete(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Why access to the admin surface was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Silakan masuk terlebih dahulu")]
    NotSignedIn,
    #[error("Akun ini tidak memiliki akses pengelola konten")]
    MissingRole,
}

/// Returns the session if it may manage content.
pub fn authorize_content(session: Option<&UserSession>) -> Result<&UserSession, AccessDenied> {
    let session = session.ok_or(AccessDenied::NotSignedIn)?;
    if session.can_manage_content() {
        Ok(session)
    } else {
        Err(AccessDenied::MissingRole)
    }
}
