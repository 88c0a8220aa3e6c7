use super::common::*;
use crate::earnings::definition::RuleSetDocument;
use crate::earnings::domain::EarningsRecord;
use crate::earnings::rules::{EarnRule, Rule, RuleConfigError};

fn document(json: &str) -> RuleSetDocument {
    serde_json::from_str(json).expect("document parses")
}

fn build_all(document: RuleSetDocument) -> Result<Vec<Rule>, RuleConfigError> {
    let categories = document.fare_earn_categories.clone();
    document
        .rules
        .into_iter()
        .map(|definition| definition.build(&categories))
        .collect()
}

#[test]
fn rate_strings_expand_against_declared_categories() {
    let rules = build_all(document(
        r#"{
            "fare_earn_categories": ["discount_economy", "economy", "business"],
            "rules": [{
                "kind": "distance",
                "name": "network",
                "url": "https://example.test/network",
                "bands": [
                    { "min_distance": 0, "max_distance": 600,
                      "earnings": { "points": "400 800 1,200", "credits": "10 20 40" } },
                    { "min_distance": 600,
                      "earnings": { "points": "- 1,600 2,400", "credits": "- 40 80" } }
                ]
            }]
        }"#,
    ))
    .expect("rules build");

    let Rule::Distance(rule) = &rules[0] else {
        panic!("expected distance rule, got {}", rules[0].kind());
    };
    let short = rule.band_for(300.0).expect("short band");
    assert_eq!(short.earnings["business"], EarningsRecord::new(1200, 40));
    let long = rule.band_for(3000.0).expect("long band");
    assert_eq!(long.earnings["discount_economy"], EarningsRecord::default());
    assert_eq!(long.earnings["economy"], EarningsRecord::new(1600, 40));
}

#[test]
fn builds_every_rule_kind() {
    let rules = build_all(document(
        r#"{
            "fare_earn_categories": ["economy", "business"],
            "rules": [
                { "kind": "intra_country", "name": "domestic", "country": "Australia",
                  "bands": [{ "min_distance": 0, "earnings": { "economy": { "qantas_points": 800, "status_credits": 20 } } }] },
                { "kind": "fare_class", "name": "partner",
                  "fare_classes": { "business": { "qantas_points": 1000, "status_credits": 40, "calculation_notes": "flat" } } },
                { "kind": "geographical", "name": "trans-tasman",
                  "origin": { "country": ["Australia"] },
                  "destination": { "country": { "New Zealand": { "points": "1,200 2,400", "credits": "20 40" } } } }
            ]
        }"#,
    ))
    .expect("rules build");

    let kinds: Vec<_> = rules.iter().map(Rule::kind).collect();
    assert_eq!(kinds, vec!["intra_country", "fare_class", "geographical"]);
    assert_eq!(rules[0].rule_url(), "");

    let geo = FixedGeography::new(1340.0);
    let result = rules[2]
        .calculate(&geo, &segment(akl(), syd()), "business")
        .expect("trans-tasman calculation");
    assert_eq!(result.notes, "Australia to New Zealand");
    assert_eq!(result.earnings(), EarningsRecord::new(2400, 40));

    assert!(rules[0].applies(&geo, &segment(syd(), mel()), "economy"));
    assert!(!rules[0].applies(&geo, &segment(syd(), akl()), "economy"));
}

#[test]
fn definitions_report_their_rule_names() {
    let document = document(
        r#"{ "rules": [
            { "kind": "fare_class", "name": "partner",
              "fare_classes": { "business": { "qantas_points": 1, "status_credits": 1, "calculation_notes": "" } } },
            { "kind": "distance", "name": "network",
              "bands": [{ "min_distance": 0, "earnings": { "economy": { "qantas_points": 1, "status_credits": 1 } } }] }
        ] }"#,
    );

    let names: Vec<_> = document.rules.iter().map(|rule| rule.name()).collect();
    assert_eq!(names, vec!["partner", "network"]);
}

#[test]
fn destination_tables_keep_document_order() {
    let rules = build_all(document(
        r#"{
            "fare_earn_categories": ["economy"],
            "rules": [{
                "kind": "geographical",
                "name": "australia-to-europe",
                "origin": { "country": ["Australia"] },
                "destination": { "region": {
                    "uk_and_ireland": { "points": "5,500", "credits": "95" },
                    "europe": { "points": "5,000", "credits": "90" }
                } }
            }]
        }"#,
    ))
    .expect("rules build");
    let geo = FixedGeography {
        distance: 0.0,
        regions: region_table().with_region("uk_and_ireland", Some("UK and Ireland"), ["LHR"]),
    };

    let result = rules[0]
        .calculate(&geo, &segment(mel(), lhr()), "economy")
        .expect("calculation");

    assert_eq!(result.notes, "Australia to UK and Ireland");
    assert_eq!(result.earnings(), EarningsRecord::new(5500, 95));
}

#[test]
fn unknown_location_kind_is_named_in_the_error() {
    let error = serde_json::from_str::<RuleSetDocument>(
        r#"{ "rules": [{ "kind": "geographical", "name": "bad",
              "origin": { "continent": ["Oceania"] },
              "destination": { "airport": { "LAX": { "economy": { "qantas_points": 1, "status_credits": 1 } } } } }] }"#,
    )
    .expect_err("unknown location kind");

    assert!(error.to_string().contains("continent"), "{error}");
}

#[test]
fn unknown_rule_kind_is_rejected() {
    let error = serde_json::from_str::<RuleSetDocument>(
        r#"{ "rules": [{ "kind": "segment_count", "name": "bad" }] }"#,
    )
    .expect_err("unknown rule kind");

    assert!(error.to_string().contains("segment_count"), "{error}");
}

#[test]
fn rate_strings_require_categories() {
    let error = build_all(document(
        r#"{ "rules": [{ "kind": "distance", "name": "uncategorised",
              "bands": [{ "min_distance": 0, "earnings": { "points": "100", "credits": "1" } }] }] }"#,
    ))
    .expect_err("categories required");

    assert_eq!(
        error,
        RuleConfigError::MissingFareEarnCategories {
            rule: "uncategorised".to_string()
        }
    );
}

#[test]
fn blank_rule_name_is_rejected() {
    let error = build_all(document(
        r#"{ "rules": [{ "kind": "fare_class", "name": " ",
              "fare_classes": { "economy": { "qantas_points": 1, "status_credits": 1, "calculation_notes": "" } } }] }"#,
    ))
    .expect_err("blank name");

    assert_eq!(error, RuleConfigError::EmptyName);
}
