use crate::render::format_estimate;
use clap::Args;
use credit_odds::error::AppError;
use credit_odds::estimator::{ApprovalEstimate, FlowState, ProductType, QuestionnaireFlow};
use std::io::{self, BufRead, Write};

#[derive(Args, Debug, Default)]
pub(crate) struct QuizArgs {
    /// Skip product selection and start with this product
    #[arg(long)]
    pub(crate) product: Option<String>,
}

pub(crate) fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let mut flow = QuestionnaireFlow::new();
    if let Some(product) = args.product.as_deref() {
        flow.select_product_key(product)?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    drive(&mut flow, stdin.lock(), stdout.lock())?;
    Ok(())
}

enum Command {
    Choose(usize),
    Continue,
    Back,
    Restart,
    Quit,
    Other(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Command::Continue,
        "b" | "back" => Command::Back,
        "r" | "restart" => Command::Restart,
        "q" | "quit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(choice) if choice > 0 => Command::Choose(choice - 1),
            _ => Command::Other(trimmed.to_string()),
        },
    }
}

/// Runs the questionnaire over line-oriented input until the user quits or
/// the input ends. Returns the estimate shown last, if any.
pub(crate) fn drive<R, W>(
    flow: &mut QuestionnaireFlow,
    mut input: R,
    mut output: W,
) -> Result<Option<ApprovalEstimate>, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();

    loop {
        render_screen(flow, &mut output)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let outcome = match (flow.state(), parse_command(&line)) {
            (_, Command::Quit) => break,
            (_, Command::Restart) => {
                flow.restart();
                Ok(())
            }
            (_, Command::Back) => flow.back().map(drop),
            (FlowState::ProductSelection, Command::Choose(index)) => {
                match ProductType::ordered().get(index) {
                    Some(product) => flow.select_product(*product).map(drop),
                    None => {
                        writeln!(output, "Pick a number between 1 and 4.")?;
                        Ok(())
                    }
                }
            }
            (FlowState::ProductSelection, Command::Other(key)) => match key.parse::<ProductType>() {
                Ok(product) => flow.select_product(product).map(drop),
                Err(err) => {
                    writeln!(output, "{err}")?;
                    Ok(())
                }
            },
            (FlowState::AnsweringFactor(_), Command::Choose(index)) => {
                let value = flow
                    .current_factor()
                    .and_then(|factor| factor.options.get(index))
                    .map(|option| option.value);
                match value {
                    Some(value) => flow.select_option(value).and_then(|_| flow.next()).map(drop),
                    None => {
                        writeln!(output, "No option numbered {}.", index + 1)?;
                        Ok(())
                    }
                }
            }
            (FlowState::AnsweringFactor(_), Command::Continue) => flow.next().map(drop),
            (FlowState::AnsweringFactor(_), Command::Other(value)) => {
                flow.select_option(&value).and_then(|_| flow.next()).map(drop)
            }
            _ => Ok(()),
        };

        if let Err(err) = outcome {
            writeln!(output, "{err}")?;
        }
    }

    Ok(flow.estimate().cloned())
}

fn render_screen<W: Write>(flow: &QuestionnaireFlow, output: &mut W) -> io::Result<()> {
    match flow.state() {
        FlowState::ProductSelection => {
            writeln!(output, "\nWhich product are you applying for?")?;
            for (index, product) in ProductType::ordered().iter().enumerate() {
                writeln!(output, "  {}. {}", index + 1, product.label())?;
            }
            write!(output, "Choose 1-4 or [q]uit: ")
        }
        FlowState::AnsweringFactor(_) => {
            let Some(factor) = flow.current_factor() else {
                return Ok(());
            };
            let progress = flow.progress();
            let selected = flow.current_answer();

            writeln!(
                output,
                "\nStep {}/{}: {}",
                progress.step, progress.total, factor.label
            )?;
            writeln!(output, "{}", factor.description)?;
            for (index, option) in factor.options.iter().enumerate() {
                let marker = if selected == Some(option.value) { "*" } else { " " };
                writeln!(output, " {marker}{}. {}", index + 1, option.label)?;
            }
            write!(output, "Choose an option, [b]ack, [r]estart or [q]uit: ")
        }
        FlowState::Results => {
            if let Some(estimate) = flow.estimate() {
                write!(output, "\n{}", format_estimate(estimate))?;
            }
            write!(output, "[b]ack to change an answer, [r]estart or [q]uit: ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_odds::estimator::Tier;
    use std::io::Cursor;

    fn run_script(flow: &mut QuestionnaireFlow, script: &str) -> (Option<ApprovalEstimate>, String) {
        let mut output = Vec::new();
        let estimate = drive(flow, Cursor::new(script.to_string()), &mut output).expect("quiz runs");
        (estimate, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn answering_every_factor_shows_the_results() {
        let mut flow = QuestionnaireFlow::new();
        let script = "1\n3\n1\n5\n1\n1\n1\n5\n1\nq\n";

        let (estimate, transcript) = run_script(&mut flow, script);

        let estimate = estimate.expect("estimate produced");
        assert_eq!(estimate.product, ProductType::CreditCard);
        assert_eq!(estimate.percentage, 99);
        assert_eq!(estimate.tier, Tier::Excellent);
        assert!(transcript.contains("Step 8/8"));
        assert!(transcript.contains("Excellent chance of approval"));
    }

    #[test]
    fn invalid_choices_are_reported_without_moving() {
        let mut flow = QuestionnaireFlow::new();
        flow.select_product(ProductType::HomeLoan).expect("selects");

        let (estimate, transcript) = run_script(&mut flow, "\n42\nnope\n");

        assert!(estimate.is_none());
        assert_eq!(flow.state(), FlowState::AnsweringFactor(0));
        assert!(transcript.contains("needs an answer"));
        assert!(transcript.contains("No option numbered 42"));
        assert!(transcript.contains("'nope' is not an option"));
    }

    #[test]
    fn back_and_restart_commands_move_the_flow() {
        let mut flow = QuestionnaireFlow::new();

        let (_, transcript) = run_script(&mut flow, "car-loan\n3\nb\nb\n");

        assert_eq!(flow.state(), FlowState::ProductSelection);
        assert!(transcript.contains("Step 2/8"));

        run_script(&mut flow, "2\nr\n");
        assert_eq!(flow.state(), FlowState::ProductSelection);
        assert!(flow.answers().is_empty());
    }
}
