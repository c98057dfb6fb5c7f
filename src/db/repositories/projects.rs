use diesel::pg::Pg;
use diesel::prelude::*;

use super::like_pattern;
use crate::db::models::api::PageParams;
use crate::db::models::project::{
    NewProject, Project, ProjectChanges, ProjectListQuery, ProjectReplace,
};
use crate::schema::projects;

pub struct ProjectsRepo;

impl ProjectsRepo {
    fn filtered(query: &ProjectListQuery) -> projects::BoxedQuery<'static, Pg> {
        use crate::schema::projects::dsl::*;

        let mut boxed = projects.into_boxed();
        if let Some(s) = query.status {
            boxed = boxed.filter(status.eq(s));
        }
        if let Some(featured) = query.featured {
            boxed = boxed.filter(is_featured.eq(featured));
        }
        if let Some(term) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            boxed = boxed.filter(title.ilike(like_pattern(term)));
        }
        boxed
    }

    pub fn list(
        conn: &mut PgConnection,
        query: &ProjectListQuery,
        params: &PageParams,
    ) -> Result<(Vec<Project>, i64), diesel::result::Error> {
        use crate::schema::projects::dsl::*;

        let total = Self::filtered(query).count().get_result::<i64>(conn)?;
        let items = Self::filtered(query)
            .order((is_featured.desc(), created_at.desc()))
            .limit(params.per_page())
            .offset(params.offset())
            .select(Project::as_select())
            .load(conn)?;
        Ok((items, total))
    }

    pub fn exists_slug(
        conn: &mut PgConnection,
        target_slug: &str,
        excluding: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        match excluding {
            Some(own_id) => diesel::select(diesel::dsl::exists(
                projects.filter(slug.eq(target_slug)).filter(id.ne(own_id)),
            ))
            .get_result(conn),
            None => diesel::select(diesel::dsl::exists(projects.filter(slug.eq(target_slug))))
                .get_result(conn),
        }
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<Option<Project>, diesel::result::Error> {
        projects::table
            .find(project_id)
            .select(Project::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_slug(
        conn: &mut PgConnection,
        target_slug: &str,
    ) -> Result<Option<Project>, diesel::result::Error> {
        projects::table
            .filter(projects::slug.eq(target_slug))
            .select(Project::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_project: &NewProject,
    ) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(projects::table)
            .values(new_project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn replace(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
        replacement: &ProjectReplace,
    ) -> Result<Project, diesel::result::Error> {
        diesel::update(projects::table.find(project_id))
            .set(replacement)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
        changes: &ProjectChanges,
    ) -> Result<Project, diesel::result::Error> {
        diesel::update(projects::table.find(project_id))
            .set(changes)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(projects::table.find(project_id)).execute(conn)
    }
}
