use diesel::prelude::*;

use crate::db::models::portfolio::*;
use crate::schema::{awards, educations, experiences, languages, skills};

/// The five portfolio tables share one shape: owned by `user_id`, created
/// from an input struct, replaced wholesale on update.
macro_rules! section_repo {
    ($repo:ident, $table:ident, $model:ty, $input:ty, $order:expr) => {
        pub struct $repo;

        impl $repo {
            pub fn list_by_user(
                conn: &mut PgConnection,
                owner: uuid::Uuid,
            ) -> Result<Vec<$model>, diesel::result::Error> {
                $table::table
                    .filter($table::user_id.eq(owner))
                    .order($order)
                    .select(<$model>::as_select())
                    .load(conn)
            }

            pub fn find_by_id(
                conn: &mut PgConnection,
                entry_id: uuid::Uuid,
            ) -> Result<Option<$model>, diesel::result::Error> {
                $table::table
                    .find(entry_id)
                    .select(<$model>::as_select())
                    .first(conn)
                    .optional()
            }

            pub fn insert(
                conn: &mut PgConnection,
                owner: uuid::Uuid,
                input: &$input,
            ) -> Result<$model, diesel::result::Error> {
                diesel::insert_into($table::table)
                    .values((input, $table::user_id.eq(owner)))
                    .returning(<$model>::as_returning())
                    .get_result(conn)
            }

            pub fn replace(
                conn: &mut PgConnection,
                entry_id: uuid::Uuid,
                input: &$input,
            ) -> Result<$model, diesel::result::Error> {
                diesel::update($table::table.find(entry_id))
                    .set(input)
                    .returning(<$model>::as_returning())
                    .get_result(conn)
            }

            pub fn delete_by_id(
                conn: &mut PgConnection,
                entry_id: uuid::Uuid,
            ) -> Result<usize, diesel::result::Error> {
                diesel::delete($table::table.find(entry_id)).execute(conn)
            }
        }
    };
}

section_repo!(
    EducationsRepo,
    educations,
    Education,
    EducationInput,
    educations::start_date.desc()
);
section_repo!(
    AwardsRepo,
    awards,
    Award,
    AwardInput,
    awards::awarded_on.desc()
);
section_repo!(
    ExperiencesRepo,
    experiences,
    Experience,
    ExperienceInput,
    experiences::start_date.desc()
);
section_repo!(SkillsRepo, skills, Skill, SkillInput, skills::name.asc());
section_repo!(
    LanguagesRepo,
    languages,
    Language,
    LanguageInput,
    languages::name.asc()
);

pub struct PortfolioRepo;

impl PortfolioRepo {
    pub fn load(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
    ) -> Result<Portfolio, diesel::result::Error> {
        Ok(Portfolio {
            educations: EducationsRepo::list_by_user(conn, owner)?,
            awards: AwardsRepo::list_by_user(conn, owner)?,
            experiences: ExperiencesRepo::list_by_user(conn, owner)?,
            skills: SkillsRepo::list_by_user(conn, owner)?,
            languages: LanguagesRepo::list_by_user(conn, owner)?,
        })
    }
}
