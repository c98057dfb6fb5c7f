use diesel::prelude::*;

use crate::db::enums::ResourceCategory;
use crate::db::models::resource::{NewResource, Resource, ResourceReplace};
use crate::schema::resources;

pub struct ResourcesRepo;

impl ResourcesRepo {
    pub fn list(
        conn: &mut PgConnection,
        category_filter: Option<ResourceCategory>,
        include_inactive: bool,
    ) -> Result<Vec<Resource>, diesel::result::Error> {
        use crate::schema::resources::dsl::*;

        let mut query = resources.into_boxed();
        if let Some(c) = category_filter {
            query = query.filter(category.eq(c));
        }
        if !include_inactive {
            query = query.filter(is_active.eq(true));
        }
        query
            .order(name.asc())
            .select(Resource::as_select())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        resource_id: uuid::Uuid,
    ) -> Result<Option<Resource>, diesel::result::Error> {
        resources::table
            .find(resource_id)
            .select(Resource::as_select())
            .first(conn)
            .optional()
    }

    /// Loads the resource row with `FOR UPDATE` so that booking checks on the
    /// same resource run one at a time. Must be called inside a transaction.
    pub fn lock_by_id(
        conn: &mut PgConnection,
        resource_id: uuid::Uuid,
    ) -> Result<Option<Resource>, diesel::result::Error> {
        resources::table
            .find(resource_id)
            .select(Resource::as_select())
            .for_update()
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_resource: &NewResource,
    ) -> Result<Resource, diesel::result::Error> {
        diesel::insert_into(resources::table)
            .values(new_resource)
            .returning(Resource::as_returning())
            .get_result(conn)
    }

    pub fn replace(
        conn: &mut PgConnection,
        resource_id: uuid::Uuid,
        replacement: &ResourceReplace,
    ) -> Result<Resource, diesel::result::Error> {
        diesel::update(resources::table.find(resource_id))
            .set(replacement)
            .returning(Resource::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        resource_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(resources::table.find(resource_id)).execute(conn)
    }
}
