use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::db::models::auth::AuthUser;
use crate::error::AppError;

/// Who is asking. Anonymous requests carry no context at all.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl RequestContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_editor(&self) -> bool {
        self.role.at_least(UserRole::Editor)
    }

    pub fn require_role(&self, required: UserRole) -> Result<(), AppError> {
        if self.role.at_least(required) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "This action requires the {} role",
                required
            )))
        }
    }

    /// Owners may touch their own records; admins may touch anyone's.
    pub fn require_owner_or_admin(&self, owner: Uuid) -> Result<(), AppError> {
        if self.user_id == owner || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("You can only modify your own records"))
        }
    }
}

impl From<&AuthUser> for RequestContext {
    fn from(user: &AuthUser) -> Self {
        Self::new(user.id, user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_checks() {
        let member = RequestContext::new(Uuid::new_v4(), UserRole::Member);
        let editor = RequestContext::new(Uuid::new_v4(), UserRole::Editor);
        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin);

        assert!(member.require_role(UserRole::Editor).is_err());
        assert!(editor.require_role(UserRole::Editor).is_ok());
        assert!(editor.require_role(UserRole::Admin).is_err());
        assert!(admin.require_role(UserRole::Editor).is_ok());
    }

    #[test]
    fn ownership_checks() {
        let owner = Uuid::new_v4();
        let member = RequestContext::new(owner, UserRole::Member);
        let other = RequestContext::new(Uuid::new_v4(), UserRole::Editor);
        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin);

        assert!(member.require_owner_or_admin(owner).is_ok());
        assert!(other.require_owner_or_admin(owner).is_err());
        assert!(admin.require_owner_or_admin(owner).is_ok());
    }
}
