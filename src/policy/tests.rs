//! Reporting policy tests

use super::*;

#[test]
fn test_level_ordering() {
    assert!(DetailLevel::Unknown < DetailLevel::None);
    assert!(DetailLevel::None < DetailLevel::Synthetic);
    assert!(DetailLevel::Synthetic < DetailLevel::Subchain);
    assert!(DetailLevel::Subchain < DetailLevel::Monitor);
    assert!(DetailLevel::Monitor < DetailLevel::All);

    // Smart orders above Monitor so smart-stored masters reject shadows
    assert!(DetailLevel::Smart >= DetailLevel::Monitor);
}

#[test]
fn test_level_token_parsing() {
    assert_eq!(DetailLevel::from_name("synthetic"), Some(DetailLevel::Synthetic));
    assert_eq!(DetailLevel::from_name("SMART"), Some(DetailLevel::Smart));
    assert_eq!(DetailLevel::from_name("verbose"), None);

    assert_eq!(DetailLevel::from_ordinal(5), Some(DetailLevel::All));
    assert_eq!(DetailLevel::from_ordinal(42), None);
}

#[test]
fn test_resolve_first_match_wins() {
    let mut policy = ReportingPolicy::new();
    policy.add_rule("demux*", DetailLevel::All).unwrap();
    policy.add_rule("demux0", DetailLevel::None).unwrap();

    // Both patterns match; the earlier rule wins
    assert_eq!(policy.resolve("demux0"), DetailLevel::All);
    assert_eq!(policy.resolve("parser0"), DetailLevel::Unknown);
}

#[test]
fn test_pad_rules_outrank_element_rules() {
    let mut policy = ReportingPolicy::new();
    policy.add_rule("elementA*", DetailLevel::Synthetic).unwrap();
    // Registered later, but pad-level rules are inserted at the front
    policy.add_rule("elementA__padX", DetailLevel::All).unwrap();

    assert_eq!(policy.resolve("elementA__padX"), DetailLevel::All);
    assert_eq!(policy.resolve("elementA__padY"), DetailLevel::Synthetic);
    assert_eq!(policy.resolve("elementA"), DetailLevel::Synthetic);
}

#[test]
fn test_parse_config_default_and_rules() {
    let mut policy = ReportingPolicy::new();
    policy.parse_config("monitor,demux*:all");

    assert_eq!(policy.default_level(), DetailLevel::Monitor);
    assert_eq!(policy.resolve("demux0"), DetailLevel::All);
    assert_eq!(policy.resolve("sink0"), DetailLevel::Unknown);
}

#[test]
fn test_parse_config_last_default_wins() {
    let mut policy = ReportingPolicy::new();
    policy.parse_config("none,smart");
    assert_eq!(policy.default_level(), DetailLevel::Smart);
}

#[test]
fn test_parse_config_rewrites_double_colons() {
    let mut policy = ReportingPolicy::new();
    policy.parse_config("elementA::padX:all,elementA*:synthetic");

    // `::` becomes `__`, which also makes the rule a front-priority one
    assert_eq!(policy.resolve("elementA__padX"), DetailLevel::All);
    assert_eq!(policy.resolve("elementA0"), DetailLevel::Synthetic);
}

#[test]
fn test_parse_config_integer_ordinals() {
    let mut policy = ReportingPolicy::new();
    policy.parse_config("2,src*:5");

    assert_eq!(policy.default_level(), DetailLevel::Synthetic);
    assert_eq!(policy.resolve("src0"), DetailLevel::All);
}

#[test]
fn test_parse_config_drops_malformed_tokens() {
    let mut policy = ReportingPolicy::new();
    policy.parse_config("bogus,demux*:notalevel,99,sink*:monitor");

    // Only the valid rule survives; the default is untouched
    assert_eq!(policy.default_level(), DetailLevel::Synthetic);
    assert_eq!(policy.rules().len(), 1);
    assert_eq!(policy.resolve("sink0"), DetailLevel::Monitor);
    assert_eq!(policy.resolve("demux0"), DetailLevel::Unknown);
}

#[test]
fn test_parse_config_whitespace_tolerant() {
    let mut policy = ReportingPolicy::new();
    policy.parse_config("src*: all , monitor ");

    assert_eq!(policy.resolve("src0"), DetailLevel::All);
    assert_eq!(policy.default_level(), DetailLevel::Monitor);
}
