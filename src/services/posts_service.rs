use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{PostStatus, UserRole},
    db::models::api::{Page, PageParams, error_codes},
    db::models::post::{
        NewPost, Post, PostChanges, PostListQuery, PostPatch, PostReplace, PostRequest,
    },
    db::repositories::posts::{PostFilter, PostsRepo},
    error::AppError,
    services::context::RequestContext,
    utils::excerpt_from,
    validation::{
        normalize_optional,
        post::{normalize_tags, validate_post},
        project::{resolve_slug, validate_slug},
    },
};

pub const EXCERPT_LEN: usize = 200;

pub struct PostsService;

fn slug_taken() -> AppError {
    AppError::conflict_with_code(
        "A post with this slug already exists",
        Some("slug".to_string()),
        error_codes::POST_SLUG_EXISTS,
    )
}

fn is_editor(viewer: Option<&RequestContext>) -> bool {
    viewer.is_some_and(RequestContext::is_editor)
}

/// Status filter applied to a listing. Only editors may look past published posts.
pub fn listing_status(
    viewer: Option<&RequestContext>,
    requested: Option<PostStatus>,
) -> Option<PostStatus> {
    if is_editor(viewer) {
        requested
    } else {
        Some(PostStatus::Published)
    }
}

pub fn can_view_post(post: &Post, viewer: Option<&RequestContext>) -> bool {
    post.status == PostStatus::Published || is_editor(viewer)
}

/// The first move to `published` stamps the time; later edits keep it.
pub fn published_at_for(
    status: PostStatus,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status, current) {
        (PostStatus::Published, None) => Some(now),
        (_, existing) => existing,
    }
}

fn excerpt_or_derived(excerpt: Option<String>, content: &str) -> Option<String> {
    normalize_optional(excerpt).or_else(|| {
        let derived = excerpt_from(content, EXCERPT_LEN);
        (!derived.is_empty()).then_some(derived)
    })
}

impl PostsService {
    pub fn list(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        query: &PostListQuery,
    ) -> Result<Page<Post>, AppError> {
        let params = PageParams {
            page: query.page,
            per_page: query.per_page,
        };
        let filter = PostFilter {
            status: listing_status(viewer, query.status),
            tag: query.tag.clone(),
            search: query.search.clone(),
        };
        let (items, total) = PostsRepo::list(conn, &filter, &params)?;
        Ok(Page {
            items,
            total,
            params,
        })
    }

    pub fn get(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        post_id: Uuid,
    ) -> Result<Post, AppError> {
        match PostsRepo::find_by_id(conn, post_id)? {
            Some(post) if can_view_post(&post, viewer) => Ok(post),
            _ => Err(AppError::not_found("Post")),
        }
    }

    pub fn get_by_slug(
        conn: &mut PgConnection,
        viewer: Option<&RequestContext>,
        slug: &str,
    ) -> Result<Post, AppError> {
        match PostsRepo::find_by_slug(conn, slug)? {
            Some(post) if can_view_post(&post, viewer) => Ok(post),
            _ => Err(AppError::not_found("Post")),
        }
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: PostRequest,
    ) -> Result<Post, AppError> {
        ctx.require_role(UserRole::Editor)?;
        validate_post(&req.title, &req.content, req.cover_image_url.as_deref())?;
        let tags = normalize_tags(req.tags)?;

        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        if PostsRepo::exists_slug(conn, &slug, None)? {
            return Err(slug_taken());
        }

        let new_post = NewPost {
            title: req.title.trim().to_string(),
            slug,
            excerpt: excerpt_or_derived(req.excerpt, &req.content),
            content: req.content,
            cover_image_url: normalize_optional(req.cover_image_url),
            tags,
            status: req.status,
            published_at: published_at_for(req.status, None, Utc::now()),
            author_id: ctx.user_id,
        };

        let post = PostsRepo::insert(conn, &new_post)?;
        tracing::info!(post_id = %post.id, status = %post.status, "Post created");
        Ok(post)
    }

    pub fn replace(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        post_id: Uuid,
        req: PostRequest,
    ) -> Result<Post, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let current =
            PostsRepo::find_by_id(conn, post_id)?.ok_or_else(|| AppError::not_found("Post"))?;
        validate_post(&req.title, &req.content, req.cover_image_url.as_deref())?;
        let tags = normalize_tags(req.tags)?;

        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        if PostsRepo::exists_slug(conn, &slug, Some(post_id))? {
            return Err(slug_taken());
        }

        let now = Utc::now();
        let replacement = PostReplace {
            title: req.title.trim().to_string(),
            slug,
            excerpt: excerpt_or_derived(req.excerpt, &req.content),
            content: req.content,
            cover_image_url: normalize_optional(req.cover_image_url),
            tags,
            status: req.status,
            published_at: published_at_for(req.status, current.published_at, now),
            updated_at: now,
        };
        Ok(PostsRepo::replace(conn, post_id, &replacement)?)
    }

    pub fn patch(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        post_id: Uuid,
        patch: PostPatch,
    ) -> Result<Post, AppError> {
        ctx.require_role(UserRole::Editor)?;
        let current =
            PostsRepo::find_by_id(conn, post_id)?.ok_or_else(|| AppError::not_found("Post"))?;

        let content = patch.content.as_deref().unwrap_or(&current.content);
        validate_post(
            patch.title.as_deref().unwrap_or(&current.title),
            content,
            patch.cover_image_url.as_deref().or(current.cover_image_url.as_deref()),
        )?;

        let slug = normalize_optional(patch.slug);
        if let Some(ref new_slug) = slug {
            validate_slug(new_slug)?;
            if PostsRepo::exists_slug(conn, new_slug, Some(post_id))? {
                return Err(slug_taken());
            }
        }

        let tags = patch.tags.map(normalize_tags).transpose()?;
        let excerpt = match normalize_optional(patch.excerpt) {
            Some(excerpt) => Some(excerpt),
            None if current.excerpt.is_none() => excerpt_or_derived(None, content),
            None => None,
        };

        let now = Utc::now();
        let status = patch.status.unwrap_or(current.status);
        let published_at = match published_at_for(status, current.published_at, now) {
            stamped if stamped != current.published_at => stamped,
            _ => None,
        };

        let changes = PostChanges {
            title: patch.title.map(|t| t.trim().to_string()),
            slug,
            excerpt,
            content: patch.content,
            cover_image_url: normalize_optional(patch.cover_image_url),
            tags,
            status: patch.status,
            published_at,
            updated_at: now,
        };
        Ok(PostsRepo::update(conn, post_id, &changes)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        post_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_role(UserRole::Editor)?;
        if PostsRepo::delete_by_id(conn, post_id)? == 0 {
            return Err(AppError::not_found("Post"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn anonymous_and_members_only_list_published() {
        let member = RequestContext::new(Uuid::new_v4(), UserRole::Member);
        let editor = RequestContext::new(Uuid::new_v4(), UserRole::Editor);

        assert_eq!(listing_status(None, Some(PostStatus::Draft)), Some(PostStatus::Published));
        assert_eq!(listing_status(Some(&member), None), Some(PostStatus::Published));
        assert_eq!(listing_status(Some(&editor), Some(PostStatus::Draft)), Some(PostStatus::Draft));
        assert_eq!(listing_status(Some(&editor), None), None);
    }

    #[test]
    fn publishing_stamps_once() {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        assert_eq!(published_at_for(PostStatus::Draft, None, first), None);
        assert_eq!(published_at_for(PostStatus::Published, None, first), Some(first));
        assert_eq!(published_at_for(PostStatus::Published, Some(first), later), Some(first));
        assert_eq!(published_at_for(PostStatus::Archived, Some(first), later), Some(first));
    }

    #[test]
    fn explicit_excerpt_wins() {
        assert_eq!(
            excerpt_or_derived(Some(" Short ".into()), "<p>Body</p>"),
            Some("Short".to_string())
        );
        assert_eq!(excerpt_or_derived(None, "<p>Body</p>"), Some("Body".to_string()));
        assert_eq!(excerpt_or_derived(None, "<br/>"), None);
    }
}
