use search_query::types::*;
use search_query::QueryError;

#[test]
fn classify_known_labels() {
    assert_eq!(ContentDomain::classify("text"), ContentDomain::Text);
    assert_eq!(ContentDomain::classify("image"), ContentDomain::Image);
    assert_eq!(ContentDomain::classify("audio"), ContentDomain::Audio);
    assert_eq!(ContentDomain::classify("video"), ContentDomain::Video);
    assert_eq!(ContentDomain::classify("app"), ContentDomain::App);
}

#[test]
fn classify_unknown_falls_back_to_text() {
    assert_eq!(ContentDomain::classify("unknown"), ContentDomain::Text);
    assert_eq!(ContentDomain::classify(""), ContentDomain::Text);
    // labels are matched exactly
    assert_eq!(ContentDomain::classify("VIDEO"), ContentDomain::Text);
}

#[test]
fn content_domain_codes() {
    for code in 0..5u8 {
        let domain = ContentDomain::from_code(code).unwrap();
        assert_eq!(domain.code(), code);
        assert_eq!(ContentDomain::classify(domain.label()), domain);
    }
    assert_eq!(ContentDomain::from_code(5), None);
}

#[test]
fn search_scope_codes() {
    assert_eq!(SearchScope::Local.code(), 0);
    assert_eq!(SearchScope::GlobalAll.code(), 4);
    for code in 0..5u8 {
        assert_eq!(SearchScope::from_code(code).unwrap().code(), code);
    }
    assert_eq!(SearchScope::from_code(9), None);
}

#[test]
fn search_scope_kinds() {
    assert!(SearchScope::GroupDht.is_group());
    assert!(SearchScope::GroupAll.is_group());
    assert!(!SearchScope::Local.is_group());
    assert!(SearchScope::GlobalDht.is_global());
    assert!(!SearchScope::GroupAll.is_global());
}

#[test]
fn empty_constraint_requires_absence() {
    let c = Constraint::EMPTY;
    assert!(c.admits(&[false; CONSTRAINT_WIDTH]));
    assert!(!c.admits(&[false, true, false, false]));
    assert_eq!(c.to_string(), "0000");
}

#[test]
fn catch_all_admits_everything() {
    let c = Constraint::CATCH_ALL;
    assert!(c.is_catch_all());
    assert!(c.admits(&[true; CONSTRAINT_WIDTH]));
    assert!(c.admits(&[false; CONSTRAINT_WIDTH]));
    assert_eq!(c.to_string(), "____");
    assert_eq!(Constraint::default(), c);
}

#[test]
fn constraint_positional_flags() {
    let c = Constraint::CATCH_ALL
        .with_flag(0, ConstraintFlag::Present)
        .with_flag(2, ConstraintFlag::Absent);
    assert_eq!(c.flag(0), Some(ConstraintFlag::Present));
    assert_eq!(c.flag(1), Some(ConstraintFlag::Any));
    assert_eq!(c.flag(2), Some(ConstraintFlag::Absent));
    assert_eq!(c.flag(CONSTRAINT_WIDTH), None);
    assert!(c.admits(&[true, false, false, true]));
    assert!(!c.admits(&[false, false, false, true]));
    assert!(!c.admits(&[true, false, true, true]));
    assert_eq!(c.to_string(), "1_0_");
}

#[test]
fn constraint_with_flag_out_of_range_is_ignored() {
    let c = Constraint::EMPTY.with_flag(10, ConstraintFlag::Present);
    assert_eq!(c, Constraint::EMPTY);
}

#[test]
fn constraint_parse() {
    let c: Constraint = "1_0_".parse().unwrap();
    assert_eq!(
        c.flags(),
        &[
            ConstraintFlag::Present,
            ConstraintFlag::Any,
            ConstraintFlag::Absent,
            ConstraintFlag::Any
        ]
    );
    assert_eq!("____".parse::<Constraint>().unwrap(), Constraint::CATCH_ALL);
    assert_eq!("0000".parse::<Constraint>().unwrap(), Constraint::EMPTY);
}

#[test]
fn constraint_parse_rejects_bad_input() {
    for bad in ["", "000", "00000", "0x00"] {
        assert_eq!(
            bad.parse::<Constraint>().unwrap_err(),
            QueryError::InvalidConstraint(bad.to_string())
        );
    }
}
