use diesel::pg::Pg;
use diesel::prelude::*;

use super::like_pattern;
use crate::db::models::api::PageParams;
use crate::db::models::publication::{
    NewPublication, Publication, PublicationChanges, PublicationQuery, PublicationReplace,
};
use crate::schema::publications;

pub struct PublicationsRepo;

impl PublicationsRepo {
    fn filtered(query: &PublicationQuery) -> publications::BoxedQuery<'static, Pg> {
        use crate::schema::publications::dsl::*;

        let mut boxed = publications.into_boxed();
        if let Some(y) = query.year {
            boxed = boxed.filter(year.eq(y));
        }
        if let Some(kind) = query.publication_type {
            boxed = boxed.filter(publication_type.eq(kind));
        }
        if let Some(featured) = query.featured {
            boxed = boxed.filter(is_featured.eq(featured));
        }
        if let Some(term) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(term);
            boxed = boxed.filter(
                title
                    .ilike(pattern.clone())
                    .or(venue.ilike(pattern).assume_not_null()),
            );
        }
        boxed
    }

    pub fn list(
        conn: &mut PgConnection,
        query: &PublicationQuery,
        params: &PageParams,
    ) -> Result<(Vec<Publication>, i64), diesel::result::Error> {
        use crate::schema::publications::dsl::*;

        let total = Self::filtered(query).count().get_result::<i64>(conn)?;
        let items = Self::filtered(query)
            .order((year.desc(), created_at.desc()))
            .limit(params.per_page())
            .offset(params.offset())
            .select(Publication::as_select())
            .load(conn)?;
        Ok((items, total))
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        publication_id: uuid::Uuid,
    ) -> Result<Option<Publication>, diesel::result::Error> {
        publications::table
            .find(publication_id)
            .select(Publication::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_publication: &NewPublication,
    ) -> Result<Publication, diesel::result::Error> {
        diesel::insert_into(publications::table)
            .values(new_publication)
            .returning(Publication::as_returning())
            .get_result(conn)
    }

    pub fn replace(
        conn: &mut PgConnection,
        publication_id: uuid::Uuid,
        replacement: &PublicationReplace,
    ) -> Result<Publication, diesel::result::Error> {
        diesel::update(publications::table.find(publication_id))
            .set(replacement)
            .returning(Publication::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        publication_id: uuid::Uuid,
        changes: &PublicationChanges,
    ) -> Result<Publication, diesel::result::Error> {
        diesel::update(publications::table.find(publication_id))
            .set(changes)
            .returning(Publication::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        publication_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(publications::table.find(publication_id)).execute(conn)
    }
}
