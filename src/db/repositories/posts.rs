use diesel::pg::Pg;
use diesel::prelude::*;

use super::like_pattern;
use crate::db::enums::PostStatus;
use crate::db::models::api::PageParams;
use crate::db::models::post::{NewPost, Post, PostChanges, PostReplace};
use crate::schema::posts;

pub struct PostsRepo;

/// Filters for the news listing after visibility has been resolved.
#[derive(Debug, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl PostsRepo {
    fn filtered(filter: &PostFilter) -> posts::BoxedQuery<'static, Pg> {
        use crate::schema::posts::dsl::*;

        let mut boxed = posts.into_boxed();
        if let Some(s) = filter.status {
            boxed = boxed.filter(status.eq(s));
        }
        if let Some(t) = filter.tag.as_deref().filter(|t| !t.trim().is_empty()) {
            boxed = boxed.filter(tags.contains(vec![t.trim().to_lowercase()]));
        }
        if let Some(term) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            boxed = boxed.filter(title.ilike(like_pattern(term)));
        }
        boxed
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &PostFilter,
        params: &PageParams,
    ) -> Result<(Vec<Post>, i64), diesel::result::Error> {
        use crate::schema::posts::dsl::*;

        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((published_at.desc().nulls_last(), created_at.desc()))
            .limit(params.per_page())
            .offset(params.offset())
            .select(Post::as_select())
            .load(conn)?;
        Ok((items, total))
    }

    pub fn exists_slug(
        conn: &mut PgConnection,
        target_slug: &str,
        excluding: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::posts::dsl::*;
        match excluding {
            Some(own_id) => diesel::select(diesel::dsl::exists(
                posts.filter(slug.eq(target_slug)).filter(id.ne(own_id)),
            ))
            .get_result(conn),
            None => diesel::select(diesel::dsl::exists(posts.filter(slug.eq(target_slug))))
                .get_result(conn),
        }
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        post_id: uuid::Uuid,
    ) -> Result<Option<Post>, diesel::result::Error> {
        posts::table
            .find(post_id)
            .select(Post::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_slug(
        conn: &mut PgConnection,
        target_slug: &str,
    ) -> Result<Option<Post>, diesel::result::Error> {
        posts::table
            .filter(posts::slug.eq(target_slug))
            .select(Post::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_post: &NewPost,
    ) -> Result<Post, diesel::result::Error> {
        diesel::insert_into(posts::table)
            .values(new_post)
            .returning(Post::as_returning())
            .get_result(conn)
    }

    pub fn replace(
        conn: &mut PgConnection,
        post_id: uuid::Uuid,
        replacement: &PostReplace,
    ) -> Result<Post, diesel::result::Error> {
        diesel::update(posts::table.find(post_id))
            .set(replacement)
            .returning(Post::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        post_id: uuid::Uuid,
        changes: &PostChanges,
    ) -> Result<Post, diesel::result::Error> {
        diesel::update(posts::table.find(post_id))
            .set(changes)
            .returning(Post::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        post_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(posts::table.find(post_id)).execute(conn)
    }
}
