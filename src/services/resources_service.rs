use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::api::error_codes,
    db::models::booking::ResourceBooking,
    db::models::resource::{
        AvailabilityQuery, NewResource, Resource, ResourceListQuery, ResourceReplace,
        ResourceRequest,
    },
    db::repositories::{bookings::BookingsRepo, resources::ResourcesRepo},
    error::AppError,
    services::context::RequestContext,
    validation::{booking::validate_query_range, normalize_optional, resource::validate_resource},
};

pub struct ResourcesService;

impl ResourcesService {
    /// Inactive resources are only listed for admins.
    pub fn list(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        query: &ResourceListQuery,
    ) -> Result<Vec<Resource>, AppError> {
        let include_inactive = viewer.is_some_and(RequestContext::is_admin);
        Ok(ResourcesRepo::list(conn, query.category, include_inactive)?)
    }

    pub fn get(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        resource_id: Uuid,
    ) -> Result<Resource, AppError> {
        match ResourcesRepo::find_by_id(conn, resource_id)? {
            Some(resource)
                if resource.is_active || viewer.is_some_and(RequestContext::is_admin) =>
            {
                Ok(resource)
            }
            _ => Err(AppError::not_found("Resource")),
        }
    }

    pub fn availability(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        resource_id: Uuid,
        query: &AvailabilityQuery,
    ) -> Result<Vec<ResourceBooking>, AppError> {
        validate_query_range(query.from, query.to)?;
        Self::get(conn, viewer, resource_id)?;
        Ok(BookingsRepo::list_blocking_in_range(
            conn,
            resource_id,
            query.from,
            query.to,
        )?)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: ResourceRequest,
    ) -> Result<Resource, AppError> {
        ctx.require_role(UserRole::Admin)?;
        validate_resource(&req.name, req.location.as_deref())?;

        let new_resource = NewResource {
            name: req.name.trim().to_string(),
            description: normalize_optional(req.description),
            category: req.category,
            location: normalize_optional(req.location),
            requires_approval: req.requires_approval,
            is_active: req.is_active,
        };
        let resource = ResourcesRepo::insert(conn, &new_resource)?;
        tracing::info!(resource_id = %resource.id, name = %resource.name, "Resource created");
        Ok(resource)
    }

    pub fn replace(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        resource_id: Uuid,
        req: ResourceRequest,
    ) -> Result<Resource, AppError> {
        ctx.require_role(UserRole::Admin)?;
        if ResourcesRepo::find_by_id(conn, resource_id)?.is_none() {
            return Err(AppError::not_found("Resource"));
        }
        validate_resource(&req.name, req.location.as_deref())?;

        let replacement = ResourceReplace {
            name: req.name.trim().to_string(),
            description: normalize_optional(req.description),
            category: req.category,
            location: normalize_optional(req.location),
            requires_approval: req.requires_approval,
            is_active: req.is_active,
            updated_at: Utc::now(),
        };
        Ok(ResourcesRepo::replace(conn, resource_id, &replacement)?)
    }

    /// Refused while pending or approved bookings still lie ahead.
    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        resource_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_role(UserRole::Admin)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if ResourcesRepo::lock_by_id(conn, resource_id)?.is_none() {
                return Err(AppError::not_found("Resource"));
            }
            if BookingsRepo::has_upcoming_blocking(conn, resource_id, Utc::now())? {
                return Err(AppError::conflict_with_code(
                    "Resource has upcoming bookings; cancel them or deactivate the resource",
                    None,
                    error_codes::RESOURCE_IN_USE,
                ));
            }
            ResourcesRepo::delete_by_id(conn, resource_id)?;
            Ok(())
        })?;

        tracing::info!(resource_id = %resource_id, actor = %ctx.user_id, "Resource deleted");
        Ok(())
    }
}
