use axum::http::StatusCode;
use lab_portal::db::enums::UserRole;
use lab_portal::services::context::RequestContext;
use uuid::Uuid;

#[test]
fn role_hierarchy() {
    assert!(UserRole::Admin.at_least(UserRole::Editor));
    assert!(UserRole::Editor.at_least(UserRole::Member));
    assert!(!UserRole::Member.at_least(UserRole::Editor));
}

#[test]
fn editors_cannot_act_as_admins() {
    let editor = RequestContext::new(Uuid::new_v4(), UserRole::Editor);
    assert!(editor.is_editor());
    assert!(editor.require_role(UserRole::Editor).is_ok());

    let err = editor.require_role(UserRole::Admin).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
}

#[test]
fn ownership_checks() {
    let owner = Uuid::new_v4();
    let member = RequestContext::new(owner, UserRole::Member);
    let stranger = RequestContext::new(Uuid::new_v4(), UserRole::Member);
    let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin);

    assert!(member.require_owner_or_admin(owner).is_ok());
    assert!(stranger.require_owner_or_admin(owner).is_err());
    assert!(admin.require_owner_or_admin(owner).is_ok());
}

#[test]
fn roles_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&UserRole::Editor).unwrap(), "\"editor\"");
    assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
    assert!("root".parse::<UserRole>().is_err());
}
