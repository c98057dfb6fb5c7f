use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::api::{Page, PageParams, error_codes},
    db::models::project::{
        NewProject, Project, ProjectChanges, ProjectListQuery, ProjectPatch, ProjectReplace,
        ProjectRequest,
    },
    db::repositories::projects::ProjectsRepo,
    error::AppError,
    services::context::RequestContext,
    validation::{
        normalize_optional,
        project::{resolve_slug, validate_project, validate_slug},
    },
};

pub struct ProjectsService;

fn slug_taken() -> AppError {
    AppError::conflict_with_code(
        "A project with this slug already exists",
        Some("slug".to_string()),
        error_codes::PROJECT_SLUG_EXISTS,
    )
}

impl ProjectsService {
    pub fn list(
        conn: &mut PgConnection,
        query: &ProjectListQuery,
    ) -> Result<Page<Project>, AppError> {
        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };
        let (items, total) = ProjectsRepo::list(conn, query, &params)?;
        Ok(Page {
            items,
            total,
            params,
        })
    }

    pub fn get(conn: &mut PgConnection, project_id: Uuid) -> Result<Project, AppError> {
        ProjectsRepo::find_by_id(conn, project_id)?.ok_or_else(|| AppError::not_found("Project"))
    }

    pub fn get_by_slug(conn: &mut PgConnection, slug: &str) -> Result<Project, AppError> {
        ProjectsRepo::find_by_slug(conn, slug)?.ok_or_else(|| AppError::not_found("Project"))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: ProjectRequest,
    ) -> Result<Project, AppError> {
        ctx.require_role(UserRole::Editor)?;
        validate_project(&req.title, req.start_date, req.end_date, req.url.as_deref())?;

        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        if ProjectsRepo::exists_slug(conn, &slug, None)? {
            return Err(slug_taken());
        }

        let new_project = NewProject {
            title: req.title.trim().to_string(),
            slug,
            summary: normalize_optional(req.summary),
            description: normalize_optional(req.description),
            status: req.status,
            start_date: req.start_date,
            end_date: req.end_date,
            url: normalize_optional(req.url),
            lead_id: req.lead_id,
            is_featured: req.is_featured,
        };

        let project = ProjectsRepo::insert(conn, &new_project)?;
        tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    pub fn replace(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        req: ProjectRequest,
    ) -> Result<Project, AppError> {
        ctx.require_role(UserRole::Editor)?;
        Self::get(conn, project_id)?;
        validate_project(&req.title, req.start_date, req.end_date, req.url.as_deref())?;

        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        if ProjectsRepo::exists_slug(conn, &slug, Some(project_id))? {
            return Err(slug_taken());
        }

        let replacement = ProjectReplace {
            title: req.title.trim().to_string(),
            slug,
            summary: normalize_optional(req.summary),
            description: normalize_optional(req.description),
            status: req.status,
            start_date: req.start_date,
            end_date: req.end_date,
            url: normalize_optional(req.url),
            lead_id: req.lead_id,
            is_featured: req.is_featured,
            updated_at: Utc::now(),
        };
        Ok(ProjectsRepo::replace(conn, project_id, &replacement)?)
    }

    pub fn patch(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Project, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let current = Self::get(conn, project_id)?;

        validate_project(
            patch.title.as_deref().unwrap_or(&current.title),
            patch.start_date.or(current.start_date),
            patch.end_date.or(current.end_date),
            patch.url.as_deref().or(current.url.as_deref()),
        )?;

        let slug = normalize_optional(patch.slug);
        if let Some(ref new_slug) = slug {
            validate_slug(new_slug)?;
            if ProjectsRepo::exists_slug(conn, new_slug, Some(project_id))? {
                return Err(slug_taken());
            }
        }

        let changes = ProjectChanges {
            title: patch.title.map(|t| t.trim().to_string()),
            slug,
            summary: normalize_optional(patch.summary),
            description: normalize_optional(patch.description),
            status: patch.status,
            start_date: patch.start_date,
            end_date: patch.end_date,
            url: normalize_optional(patch.url),
            lead_id: patch.lead_id,
            is_featured: patch.is_featured,
            updated_at: Utc::now(),
        };
        Ok(ProjectsRepo::update(conn, project_id, &changes)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_role(UserRole::Editor)?;
        if ProjectsRepo::delete_by_id(conn, project_id)? == 0 {
            return Err(AppError::not_found("Project"));
        }
        Ok(())
    }
}
