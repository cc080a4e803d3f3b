use clap::Args;
use credit_odds::error::AppError;
use credit_odds::estimator::{
    rule_table, AnswerSet, ApprovalEstimate, Estimator, FactorKey, ProductType, RuleTable,
    ScoreStatus,
};
use std::fmt::Write as _;

#[derive(Args, Debug)]
pub(crate) struct FactorsArgs {
    /// Product key (credit-card, personal-loan, car-loan, home-loan)
    #[arg(long, default_value = "credit-card")]
    pub(crate) product: String,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Product key (credit-card, personal-loan, car-loan, home-loan)
    #[arg(long)]
    pub(crate) product: String,
    /// Answer as factorKey=value, repeatable
    #[arg(long = "answer", value_name = "KEY=VALUE")]
    pub(crate) answers: Vec<String>,
    /// Print the estimate as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_products() -> Result<(), AppError> {
    print!("{}", format_products());
    Ok(())
}

pub(crate) fn run_factors(args: FactorsArgs) -> Result<(), AppError> {
    print!("{}", format_factors(rule_table(&args.product)));
    Ok(())
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let answers = parse_answers(&args.answers)?;
    let estimate = Estimator::new().estimate_key(&args.product, &answers);

    if args.json {
        let json = serde_json::to_string_pretty(&estimate)
            .map_err(|err| AppError::Input(err.to_string()))?;
        println!("{json}");
    } else {
        print!("{}", format_estimate(&estimate));
    }
    Ok(())
}

pub(crate) fn parse_answers(pairs: &[String]) -> Result<AnswerSet, AppError> {
    let mut answers = AnswerSet::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| AppError::Input(format!("expected KEY=VALUE, got '{pair}'")))?;
        let key = key
            .parse::<FactorKey>()
            .map_err(|err| AppError::Input(err.to_string()))?;
        answers.record(key, value.trim());
    }
    Ok(answers)
}

pub(crate) fn format_products() -> String {
    let mut out = String::from("Supported products\n");
    for product in ProductType::ordered() {
        let table = RuleTable::for_product(product);
        let _ = writeln!(
            out,
            "- {} ({}): {} factors, {} points available",
            product.label(),
            product.key(),
            table.len(),
            table.max_points()
        );
    }
    out
}

pub(crate) fn format_factors(table: &RuleTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} factors", table.product.label());
    for (index, factor) in table.factors.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} [{}] (up to {} points)",
            index + 1,
            factor.label,
            factor.key,
            factor.max_points()
        );
        let _ = writeln!(out, "   {}", factor.description);
        for option in factor.options {
            let _ = writeln!(
                out,
                "   - {} = {} ({} pts)",
                option.value, option.label, option.points
            );
        }
    }
    out
}

pub(crate) fn format_estimate(estimate: &ApprovalEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}% ({})",
        estimate.product.label(),
        estimate.percentage,
        estimate.feedback.title
    );
    let _ = writeln!(out, "{}", estimate.feedback.message);
    let _ = writeln!(
        out,
        "Points: {}/{}",
        estimate.outcome.total_points, estimate.outcome.max_points
    );

    match &estimate.outcome.status {
        ScoreStatus::Complete => {}
        ScoreStatus::Incomplete {
            missing,
            unrecognized,
        } => {
            if !missing.is_empty() {
                let _ = writeln!(out, "Unanswered: {}", join_keys(missing));
            }
            if !unrecognized.is_empty() {
                let _ = writeln!(out, "Unrecognized answers: {}", join_keys(unrecognized));
            }
        }
        ScoreStatus::Degenerate => {
            let _ = writeln!(out, "Rule table awards no points");
        }
        ScoreStatus::Failed { reason } => {
            let _ = writeln!(out, "Scoring failed: {reason}");
        }
    }

    out
}

fn join_keys(keys: &[FactorKey]) -> String {
    keys.iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
