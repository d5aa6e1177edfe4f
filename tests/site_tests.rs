// Host-side tests for routing, page metadata, CTA targets and the contact form.

#![allow(dead_code)]
mod motion {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod capability {
        include!("../src/core/capability.rs");
    }
    pub mod lifecycle {
        include!("../src/core/lifecycle.rs");
    }
    pub mod site {
        include!("../src/core/site.rs");
    }
    pub mod contact {
        include!("../src/core/contact.rs");
    }
}

use motion::contact::*;
use motion::lifecycle::Subsystem;
use motion::site::*;

#[test]
fn routes_parse_with_aliases() {
    assert_eq!(Route::from_path("/"), Route::Home);
    assert_eq!(Route::from_path(""), Route::Home);
    assert_eq!(Route::from_path("/index.html"), Route::Home);
    assert_eq!(Route::from_path("/programs/"), Route::Programs);
    assert_eq!(Route::from_path("/team"), Route::About);
    assert_eq!(Route::from_path("/about.html"), Route::About);
    assert_eq!(Route::from_path("/privacy-policy"), Route::Privacy);
    assert_eq!(Route::from_path("/terms-of-service"), Route::Terms);
    assert_eq!(Route::from_path("/contact/index.html"), Route::Contact);
    assert_eq!(Route::from_path("/nowhere"), Route::Home);
}

#[test]
fn route_paths_round_trip() {
    for r in Route::ALL {
        assert_eq!(Route::from_path(r.path()), r);
    }
}

#[test]
fn only_home_runs_hero_loader_and_fluid() {
    for r in Route::ALL {
        let subs = r.subsystems();
        let home = r == Route::Home;
        assert_eq!(subs.contains(&Subsystem::Hero), home, "{:?}", r);
        assert_eq!(subs.contains(&Subsystem::Loader), home, "{:?}", r);
        assert_eq!(subs.contains(&Subsystem::Fluid), home, "{:?}", r);
        assert!(subs.contains(&Subsystem::Cursor));
    }
    assert!(Route::Contact.subsystems().contains(&Subsystem::ContactForm));
}

#[test]
fn meta_titles_carry_site_name() {
    let config = SiteConfig::default();
    assert_eq!(Route::Home.meta(&config).title, config.title);
    for r in Route::ALL {
        let m = r.meta(&config);
        assert!(m.title.contains(config.title));
        assert_eq!(m.image, config.social_image);
        assert!(!m.description.is_empty());
    }
}

#[test]
fn cta_always_opens_new_context() {
    let config = SiteConfig::default();
    let t = cta_target(&config);
    assert!(t.new_context);
    assert_eq!(t.url, config.form_url);
    // Same answer regardless of how often or when it is asked.
    assert_eq!(cta_target(&config), t);
}

#[test]
fn form_url_override_requires_http() {
    let base = SiteConfig::default();
    let custom = base.clone().with_form_url(Some(" https://example.org/apply "));
    assert_eq!(custom.form_url, "https://example.org/apply");
    let rejected = base.clone().with_form_url(Some("javascript:alert(1)"));
    assert_eq!(rejected.form_url, base.form_url);
    let none = base.clone().with_form_url(None);
    assert_eq!(none.form_url, base.form_url);
}

#[test]
fn social_links_resolve() {
    let config = SiteConfig::default();
    for s in [Social::Instagram, Social::LinkedIn, Social::YouTube] {
        assert!(config.social_url(s).unwrap().starts_with("https://"));
    }
    assert_eq!(Social::from_key(" LinkedIn "), Some(Social::LinkedIn));
    assert_eq!(Social::from_key("myspace"), None);
}

fn valid_fields() -> ContactFields {
    ContactFields {
        parent_name: "Dana Reyes".into(),
        student_name: "Sam Reyes".into(),
        email: "dana@example.com".into(),
        phone: "(555) 123-4567".into(),
        grade: "10th".into(),
        interests: vec!["Research".into(), "  ".into()],
    }
}

#[test]
fn valid_submission_normalizes() {
    let s = valid_fields().validate().unwrap();
    assert_eq!(s.phone, "5551234567");
    assert_eq!(s.grade, "10th");
    assert_eq!(s.interests, vec!["Research".to_string()]);
}

#[test]
fn missing_fields_are_named() {
    let f = ContactFields {
        student_name: "   ".into(),
        ..valid_fields()
    };
    let e = f.validate().unwrap_err();
    assert_eq!(e, ContactError::Missing("student_name"));
    assert_eq!(e.field(), "student_name");
}

#[test]
fn bad_email_phone_and_grade_rejected() {
    let email = ContactFields {
        email: "dana@@example".into(),
        ..valid_fields()
    };
    assert_eq!(email.validate().unwrap_err(), ContactError::InvalidEmail);

    let phone = ContactFields {
        phone: "12-34".into(),
        ..valid_fields()
    };
    assert_eq!(phone.validate().unwrap_err().field(), "phone");

    let grade = ContactFields {
        grade: "kindergarten".into(),
        ..valid_fields()
    };
    assert!(matches!(
        grade.validate().unwrap_err(),
        ContactError::UnknownGrade(_)
    ));
}

#[test]
fn grade_match_is_case_insensitive() {
    let f = ContactFields {
        grade: "gap YEAR".into(),
        ..valid_fields()
    };
    assert_eq!(f.validate().unwrap().grade, "Gap year");
}

#[test]
fn log_sink_counts_submissions() {
    let mut sink = LogSink::default();
    let s = valid_fields().validate().unwrap();
    sink.submit(&s).unwrap();
    sink.submit(&s).unwrap();
    assert_eq!(sink.submitted, 2);
    assert!(!CONFIRMATION_MESSAGE.is_empty());
}
