use crate::quiz::{run_quiz, QuizArgs};
use crate::render::{run_estimate, run_factors, run_products, EstimateArgs, FactorsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_odds::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Odds",
    about = "Estimate the likelihood of credit card and loan approval",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the supported product types
    Products,
    /// Show the scored factors and options for a product
    Factors(FactorsArgs),
    /// Score a set of answers in one shot
    Estimate(EstimateArgs),
    /// Walk through the questionnaire interactively
    Quiz(QuizArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Products => run_products(),
        Command::Factors(args) => run_factors(args),
        Command::Estimate(args) => run_estimate(args),
        Command::Quiz(args) => run_quiz(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["credit-odds"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn estimate_collects_repeated_answers() {
        let cli = Cli::try_parse_from([
            "credit-odds",
            "estimate",
            "--product",
            "home-loan",
            "--answer",
            "age=22-35",
            "--answer",
            "dti=<30",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(args.product, "home-loan");
                assert_eq!(args.answers, vec!["age=22-35", "dti=<30"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
