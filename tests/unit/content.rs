use lab_portal::utils::{excerpt_from, slugify};
use lab_portal::validation::post::normalize_tags;
use lab_portal::validation::project::resolve_slug;
use lab_portal::validation::publication::{clean_authors, validate_doi, validate_publication};

#[test]
fn slugs_from_titles() {
    assert_eq!(slugify("Graph Neural Networks for Proteins"), "graph-neural-networks-for-proteins");
    assert_eq!(resolve_slug(None, "Open Lab Day 2025").unwrap(), "open-lab-day-2025");
    assert_eq!(resolve_slug(Some("custom-slug"), "Ignored").unwrap(), "custom-slug");
    assert!(resolve_slug(None, "???").is_err());
}

#[test]
fn excerpts_cut_on_word_boundaries() {
    let content = "<p>The lab received a new <b>confocal microscope</b> this week.</p>";
    assert_eq!(
        excerpt_from(content, 200),
        "The lab received a new confocal microscope this week."
    );

    let short = excerpt_from(content, 20);
    assert!(short.ends_with('…'));
    assert!(short.chars().count() <= 20);
    assert!(!short.contains('<'));
}

#[test]
fn publication_rules() {
    let authors = vec!["A. Lovelace".to_string()];
    let doi = Some("10.1000/xyz123");
    assert!(validate_publication("On Engines", &authors, 2020, doi, None).is_ok());
    assert!(validate_publication("On Engines", &[], 2020, None, None).is_err());
    assert!(validate_publication("On Engines", &authors, 1850, None, None).is_err());
    assert!(validate_publication("On Engines", &authors, 2020, None, Some("not a url")).is_err());

    assert!(validate_doi("10.1145/3368089.3409741").is_ok());
    assert!(validate_doi("doi:10.1145/1").is_err());
    assert!(validate_doi("10.1145/").is_err());

    assert_eq!(
        clean_authors(vec![" Ada ".into(), "".into(), "Grace".into()]),
        vec!["Ada".to_string(), "Grace".to_string()]
    );
}

#[test]
fn tags_are_deduplicated() {
    let tags = normalize_tags(vec!["AI".into(), " ai ".into(), "Robotics".into()]).unwrap();
    assert_eq!(tags, vec!["ai".to_string(), "robotics".to_string()]);
}
