use std::sync::Arc;
use std::thread;

use flight_earn::earnings::{
    load_region_table, AirportDirectory, CalculationResult, EarnRule, Geography, RuleSet,
    Segment, StaticGeography,
};

struct Fixture {
    rules: RuleSet,
    airports: AirportDirectory,
    geography: StaticGeography,
}

fn fixture() -> Fixture {
    let rules = RuleSet::from_json_str(include_str!("../../../config/rules.json"))
        .expect("sample rules load");
    let airports =
        AirportDirectory::from_reader(&include_bytes!("../../../config/airports.csv")[..])
            .expect("sample airports load");
    let regions = load_region_table(&include_bytes!("../../../config/regions.json")[..])
        .expect("sample regions load");

    Fixture {
        rules,
        airports,
        geography: StaticGeography::new(regions),
    }
}

impl Fixture {
    fn segment(&self, from: &str, to: &str) -> Segment {
        Segment::new(
            self.airports.get(from).expect("known origin").clone(),
            self.airports.get(to).expect("known destination").clone(),
        )
    }

    fn first_match(&self, from: &str, to: &str, category: &str) -> Option<CalculationResult> {
        let segment = self.segment(from, to);
        self.rules
            .rules()
            .iter()
            .find(|rule| rule.applies(&self.geography, &segment, category))
            .map(|rule| {
                rule.calculate(&self.geography, &segment, category)
                    .expect("applicable rule calculates")
            })
    }
}

#[test]
fn sample_data_loads() {
    let fixture = fixture();

    assert_eq!(fixture.rules.len(), 5);
    assert_eq!(fixture.rules.fare_earn_categories().len(), 4);
    assert_eq!(fixture.airports.len(), 15);
    assert!(fixture.airports.get("syd").is_some());
    assert!(fixture.rules.get("Partner flat earn").is_some());
}

#[test]
fn domestic_segment_earns_by_distance_band() {
    let fixture = fixture();

    let result = fixture
        .first_match("SYD", "MEL", "economy")
        .expect("domestic rule applies");

    assert_eq!(result.rule, "Australian domestic");
    assert_eq!(result.rule_url, "https://rules.example/earn/domestic");
    assert_eq!((result.qantas_points, result.status_credits), (1000, 20));
    assert!(result.notes.ends_with("within the 0 - 600 mile band"), "{}", result.notes);

    let transcontinental = fixture
        .first_match("PER", "SYD", "business")
        .expect("domestic rule applies");
    assert_eq!(transcontinental.qantas_points, 3200);
    assert!(transcontinental.notes.contains("1200 and over"));
}

#[test]
fn europe_rule_is_direction_agnostic() {
    let fixture = fixture();

    let outbound = fixture
        .first_match("MEL", "LHR", "business")
        .expect("europe rule applies");
    let inbound = fixture
        .first_match("LHR", "MEL", "business")
        .expect("europe rule applies in reverse");

    assert_eq!(outbound.notes, "Australia to Europe");
    assert_eq!(outbound, inbound);
    assert_eq!((outbound.qantas_points, outbound.status_credits), (12_000, 200));
}

#[test]
fn airport_pair_rule_matches_before_distance() {
    let fixture = fixture();

    let result = fixture
        .first_match("LAX", "SYD", "flexible_economy")
        .expect("syd-lax rule applies");

    assert_eq!(result.rule, "Sydney to Los Angeles");
    assert_eq!(result.notes, "SYD airport to LAX airport");
    assert_eq!(result.qantas_points, 6000);
}

#[test]
fn fallback_distance_rule_covers_other_international_flying() {
    let fixture = fixture();

    let result = fixture
        .first_match("AKL", "SIN", "economy")
        .expect("international rule applies");
    assert_eq!(result.rule, "International distance");
    assert_eq!((result.qantas_points, result.status_credits), (3000, 50));

    let placeholder = fixture
        .first_match("AKL", "SIN", "discount_economy")
        .expect("placeholder rates still apply");
    assert_eq!((placeholder.qantas_points, placeholder.status_credits), (0, 0));
}

#[test]
fn partner_rule_only_covers_business() {
    let fixture = fixture();
    let segment = fixture.segment("NAN", "LAX");
    let partner = fixture.rules.get("Partner flat earn").expect("partner rule");

    assert!(partner.applies(&fixture.geography, &segment, "business"));
    assert!(!partner.applies(&fixture.geography, &segment, "economy"));
    assert!(partner.applies(&fixture.geography, &segment.reversed(), "business"));
}

#[test]
fn region_lookup_uses_lowercase_codes() {
    let fixture = fixture();

    assert!(fixture.geography.is_in_region("lhr", "europe"));
    assert!(!fixture.geography.is_in_region("syd", "europe"));
    assert_eq!(fixture.geography.region_display("pacific_islands"), None);
}

#[test]
fn rule_set_is_shareable_across_threads() {
    let fixture = Arc::new(fixture());

    let handles: Vec<_> = ["SYD", "BNE", "ADL", "CBR"]
        .into_iter()
        .map(|origin| {
            let fixture = Arc::clone(&fixture);
            thread::spawn(move || fixture.first_match(origin, "MEL", "economy"))
        })
        .collect();

    for handle in handles {
        let result = handle
            .join()
            .expect("worker finished")
            .expect("domestic rule applies");
        assert_eq!(result.rule, "Australian domestic");
    }
}
