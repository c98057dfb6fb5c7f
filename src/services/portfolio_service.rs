use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::portfolio::*,
    db::repositories::portfolio::{
        AwardsRepo, EducationsRepo, ExperiencesRepo, LanguagesRepo, SkillsRepo,
    },
    error::AppError,
    services::context::RequestContext,
    validation::portfolio::{
        validate_award, validate_education, validate_experience, validate_language,
        validate_skill,
    },
};

/// Create/replace/delete for one portfolio section. Entries belong to the
/// member who created them; admins may edit anyone's.
macro_rules! section_service {
    ($service:ident, $repo:ident, $model:ty, $input:ty, $validate:path, $label:literal) => {
        pub struct $service;

        impl $service {
            pub fn create(
                conn: &mut PgConnection,
                ctx: &RequestContext,
                input: &$input,
            ) -> Result<$model, AppError> {
                $validate(input)?;
                Ok($repo::insert(conn, ctx.user_id, input)?)
            }

            pub fn replace(
                conn: &mut PgConnection,
                ctx: &RequestContext,
                entry_id: Uuid,
                input: &$input,
            ) -> Result<$model, AppError> {
                let entry = $repo::find_by_id(conn, entry_id)?
                    .ok_or_else(|| AppError::not_found($label))?;
                ctx.require_owner_or_admin(entry.user_id)?;
                $validate(input)?;
                Ok($repo::replace(conn, entry_id, input)?)
            }

            pub fn delete(
                conn: &mut PgConnection,
                ctx: &RequestContext,
                entry_id: Uuid,
            ) -> Result<(), AppError> {
                let entry = $repo::find_by_id(conn, entry_id)?
                    .ok_or_else(|| AppError::not_found($label))?;
                ctx.require_owner_or_admin(entry.user_id)?;
                $repo::delete_by_id(conn, entry_id)?;
                Ok(())
            }
        }
    };
}

section_service!(
    EducationsService,
    EducationsRepo,
    Education,
    EducationInput,
    validate_education,
    "Education"
);
section_service!(AwardsService, AwardsRepo, Award, AwardInput, validate_award, "Award");
section_service!(
    ExperiencesService,
    ExperiencesRepo,
    Experience,
    ExperienceInput,
    validate_experience,
    "Experience"
);
section_service!(SkillsService, SkillsRepo, Skill, SkillInput, validate_skill, "Skill");
section_service!(
    LanguagesService,
    LanguagesRepo,
    Language,
    LanguageInput,
    validate_language,
    "Language"
);
