use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::api::{Page, PageParams},
    db::models::publication::{
        NewPublication, Publication, PublicationChanges, PublicationPatch, PublicationQuery,
        PublicationReplace, PublicationRequest,
    },
    db::repositories::publications::PublicationsRepo,
    error::AppError,
    services::context::RequestContext,
    validation::{
        normalize_optional,
        publication::{clean_authors, validate_publication},
    },
};

pub struct PublicationsService;

impl PublicationsService {
    pub fn list(
        conn: &mut PgConnection,
        query: &PublicationQuery,
    ) -> Result<Page<Publication>, AppError> {
        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };
        let (items, total) = PublicationsRepo::list(conn, query, &params)?;
        Ok(Page {
            items,
            total,
            params,
        })
    }

    pub fn get(conn: &mut PgConnection, publication_id: Uuid) -> Result<Publication, AppError> {
        PublicationsRepo::find_by_id(conn, publication_id)?
            .ok_or_else(|| AppError::not_found("Publication"))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: PublicationRequest,
    ) -> Result<Publication, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let authors = clean_authors(req.authors);
        validate_publication(
            &req.title,
            &authors,
            req.year,
            req.doi.as_deref(),
            req.url.as_deref(),
        )?;

        let new_publication = NewPublication {
            title: req.title.trim().to_string(),
            authors,
            venue: normalize_optional(req.venue),
            year: req.year,
            publication_type: req.publication_type,
            doi: normalize_optional(req.doi),
            url: normalize_optional(req.url),
            abstract_text: normalize_optional(req.abstract_text),
            is_featured: req.is_featured,
            created_by: ctx.user_id,
        };

        let publication = PublicationsRepo::insert(conn, &new_publication)?;
        tracing::info!(
            publication_id = %publication.id,
            actor = %ctx.user_id,
            "Publication created"
        );
        Ok(publication)
    }

    pub fn replace(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        publication_id: Uuid,
        req: PublicationRequest,
    ) -> Result<Publication, AppError> {
        ctx.require_role(UserRole::Editor)?;
        Self::get(conn, publication_id)?;

        let authors = clean_authors(req.authors);
        validate_publication(
            &req.title,
            &authors,
            req.year,
            req.doi.as_deref(),
            req.url.as_deref(),
        )?;

        let replacement = PublicationReplace {
            title: req.title.trim().to_string(),
            authors,
            venue: normalize_optional(req.venue),
            year: req.year,
            publication_type: req.publication_type,
            doi: normalize_optional(req.doi),
            url: normalize_optional(req.url),
            abstract_text: normalize_optional(req.abstract_text),
            is_featured: req.is_featured,
            updated_at: Utc::now(),
        };
        Ok(PublicationsRepo::replace(conn, publication_id, &replacement)?)
    }

    /// Fields left out of the body keep their stored values.
    pub fn patch(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        publication_id: Uuid,
        patch: PublicationPatch,
    ) -> Result<Publication, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let current = Self::get(conn, publication_id)?;

        let authors = patch.authors.map(clean_authors);
        let title = patch.title.as_deref().unwrap_or(&current.title);
        let doi = patch.doi.as_deref().or(current.doi.as_deref());
        let url = patch.url.as_deref().or(current.url.as_deref());
        validate_publication(
            title,
            authors.as_deref().unwrap_or(&current.authors),
            patch.year.unwrap_or(current.year),
            doi,
            url,
        )?;

        let changes = PublicationChanges {
            title: patch.title.map(|t| t.trim().to_string()),
            authors,
            venue: normalize_optional(patch.venue),
            year: patch.year,
            publication_type: patch.publication_type,
            doi: normalize_optional(patch.doi),
            url: normalize_optional(patch.url),
            abstract_text: normalize_optional(patch.abstract_text),
            is_featured: patch.is_featured,
            updated_at: Utc::now(),
        };
        Ok(PublicationsRepo::update(conn, publication_id, &changes)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        publication_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_role(UserRole::Editor)?;
        if PublicationsRepo::delete_by_id(conn, publication_id)? == 0 {
            return Err(AppError::not_found("Publication"));
        }
        tracing::info!(
            publication_id = %publication_id,
            actor = %ctx.user_id,
            "Publication deleted"
        );
        Ok(())
    }
}
