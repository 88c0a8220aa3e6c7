use crate::cli::{RatesArgs, SegmentArgs};
use flight_earn::config::AppConfig;
use flight_earn::earnings::{
    load_region_table_from_path, parse_earning_rates, AirportDirectory, CalculationResult,
    EarnRule, RuleSet, Segment, StaticGeography,
};
use flight_earn::error::AppError;
use flight_earn::telemetry;
use serde::Serialize;
use tracing::{debug, info};

struct LoadedData {
    rules: RuleSet,
    airports: AirportDirectory,
    geography: StaticGeography,
}

fn load_data() -> Result<LoadedData, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let rules = RuleSet::from_path(&config.data.rules_path)?;
    let airports = AirportDirectory::from_path(&config.data.airports_path)?;
    let regions = load_region_table_from_path(&config.data.regions_path)?;

    info!(?config.environment, rules = rules.len(), "earning rules ready");

    Ok(LoadedData {
        rules,
        airports,
        geography: StaticGeography::new(regions),
    })
}

#[derive(Debug, Serialize)]
struct RuleVerdict<'a> {
    rule: &'a str,
    kind: &'static str,
    applies: bool,
}

#[derive(Debug, Serialize)]
struct SegmentReport<'a> {
    from: &'a str,
    to: &'a str,
    verdicts: Vec<RuleVerdict<'a>>,
    result: CalculationResult,
}

pub(crate) fn evaluate_segment(args: SegmentArgs) -> Result<(), AppError> {
    let data = load_data()?;

    let from = data
        .airports
        .get(&args.from)
        .ok_or_else(|| AppError::UnknownAirport(args.from.clone()))?;
    let to = data
        .airports
        .get(&args.to)
        .ok_or_else(|| AppError::UnknownAirport(args.to.clone()))?;
    let segment = Segment::new(from.clone(), to.clone());

    let verdicts: Vec<RuleVerdict<'_>> = data
        .rules
        .rules()
        .iter()
        .map(|rule| RuleVerdict {
            rule: rule.name(),
            kind: rule.kind(),
            applies: rule.applies(&data.geography, &segment, &args.category),
        })
        .collect();

    let selected = data
        .rules
        .rules()
        .iter()
        .zip(&verdicts)
        .find(|(_, verdict)| verdict.applies)
        .map(|(rule, _)| rule)
        .ok_or_else(|| AppError::NoApplicableRule {
            segment: format!("{} - {}", from.iata, to.iata),
            category: args.category.clone(),
        })?;
    debug!(rule = selected.name(), "selected first applicable rule");

    let result = selected.calculate(&data.geography, &segment, &args.category)?;

    let report = SegmentReport {
        from: &from.iata,
        to: &to.iata,
        verdicts,
        result,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_segment_report(&report);
    }

    Ok(())
}

fn render_segment_report(report: &SegmentReport<'_>) {
    println!("Segment {} - {}", report.from, report.to);
    println!("Rules:");
    for verdict in &report.verdicts {
        let marker = if verdict.applies { "applies" } else { "-" };
        println!("  [{:<7}] {} ({})", marker, verdict.rule, verdict.kind);
    }
    println!();
    println!("Fare-earn category: {}", report.result.fare_earn_category);
    println!("Rule: {} <{}>", report.result.rule, report.result.rule_url);
    println!("Notes: {}", report.result.notes);
    println!("Qantas Points: {}", report.result.qantas_points);
    println!("Status Credits: {}", report.result.status_credits);
}

pub(crate) fn parse_rates(args: RatesArgs) -> Result<(), AppError> {
    let table = parse_earning_rates(&args.points, &args.credits, &args.labels);

    println!("{:<16} {:>10} {:>8}", "Fare class", "Points", "Credits");
    for label in &args.labels {
        if let Some(record) = table.get(label) {
            println!(
                "{:<16} {:>10} {:>8}",
                label, record.qantas_points, record.status_credits
            );
        }
    }

    Ok(())
}

pub(crate) fn list_rules() -> Result<(), AppError> {
    let data = load_data()?;

    println!(
        "Fare-earn categories: {}",
        data.rules.fare_earn_categories().join(", ")
    );
    for (index, rule) in data.rules.rules().iter().enumerate() {
        println!(
            "{:>2}. {:<14} {} <{}>",
            index + 1,
            rule.kind(),
            rule.name(),
            rule.rule_url()
        );
    }

    Ok(())
}
