use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::portfolio::Portfolio,
    db::models::profile::{
        MemberSummary, Profile, ProfileChanges, ProfileDetail, UpdateProfileRequest,
    },
    db::repositories::{portfolio::PortfolioRepo, profiles::ProfilesRepo, users::UsersRepo},
    error::AppError,
    services::context::RequestContext,
    validation::{normalize_optional, profile::validate_update_profile},
};

pub struct ProfilesService;

/// Public profiles are visible to everyone; private ones only to their
/// owner and to admins.
pub fn can_view_profile(profile: &Profile, viewer: Option<&RequestContext>) -> bool {
    profile.is_public
        || viewer.is_some_and(|ctx| ctx.user_id == profile.user_id || ctx.is_admin())
}

impl ProfilesService {
    pub fn list_public(conn: &mut PgConnection) -> Result<Vec<MemberSummary>, AppError> {
        Ok(ProfilesRepo::list_public_members(conn)?)
    }

    pub fn get(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        user_id: Uuid,
    ) -> Result<ProfileDetail, AppError> {
        let profile = Self::visible_profile(conn, viewer, user_id)?;
        let user = UsersRepo::find_by_id(conn, user_id)?
            .ok_or_else(|| AppError::not_found("Profile"))?;
        let portfolio = PortfolioRepo::load(conn, user_id)?;

        Ok(ProfileDetail {
            user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            profile,
            portfolio,
        })
    }

    pub fn portfolio(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        user_id: Uuid,
    ) -> Result<Portfolio, AppError> {
        Self::visible_profile(conn, viewer, user_id)?;
        Ok(PortfolioRepo::load(conn, user_id)?)
    }

    pub fn update_own(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<Profile, AppError> {
        validate_update_profile(&req)?;

        let changes = ProfileChanges {
            title: normalize_optional(req.title),
            bio: normalize_optional(req.bio),
            avatar_url: normalize_optional(req.avatar_url),
            website_url: normalize_optional(req.website_url),
            orcid_id: normalize_optional(req.orcid_id).map(|o| o.to_uppercase()),
            research_interests: req
                .research_interests
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            is_public: req.is_public,
            updated_at: Utc::now(),
        };

        // Accounts created before profiles existed get one on first edit.
        ProfilesRepo::insert_default(conn, ctx.user_id)?;
        Ok(ProfilesRepo::replace(conn, ctx.user_id, &changes)?)
    }

    /// Hidden profiles answer 404 rather than 403 so their existence is not revealed.
    fn visible_profile(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        user_id: Uuid,
    ) -> Result<Profile, AppError> {
        match ProfilesRepo::find(conn, user_id)? {
            Some(profile) if can_view_profile(&profile, viewer) => Ok(profile),
            _ => Err(AppError::not_found("Profile")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::UserRole;

    fn profile(owner: Uuid, is_public: bool) -> Profile {
        Profile {
            user_id: owner,
            title: None,
            bio: None,
            avatar_url: None,
            website_url: None,
            orcid_id: None,
            research_interests: vec![],
            is_public,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn private_profiles_are_visible_to_owner_and_admin_only() {
        let owner = Uuid::new_v4();
        let hidden = profile(owner, false);

        assert!(!can_view_profile(&hidden, None));
        assert!(can_view_profile(&hidden, Some(&RequestContext::new(owner, UserRole::Member))));
        assert!(can_view_profile(
            &hidden,
            Some(&RequestContext::new(Uuid::new_v4(), UserRole::Admin))
        ));
        assert!(!can_view_profile(
            &hidden,
            Some(&RequestContext::new(Uuid::new_v4(), UserRole::Editor))
        ));
    }

    #[test]
    fn public_profiles_are_visible_to_anyone() {
        assert!(can_view_profile(&profile(Uuid::new_v4(), true), None));
    }
}
