use serde::Serialize;

use super::domain::{AnswerSet, Factor, FactorKey, FactorOption, ProductType};
use super::rules::RuleTable;
use super::{ApprovalEstimate, Estimator};

/// Position of the questionnaire wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    ProductSelection,
    AnsweringFactor(usize),
    Results,
}

impl FlowState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProductSelection => "product_selection",
            Self::AnsweringFactor(_) => "answering_factor",
            Self::Results => "results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("cannot {action} during {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("factor {0} needs an answer before moving on")]
    AnswerRequired(FactorKey),
    #[error("'{value}' is not an option for factor {factor}")]
    UnknownOption { factor: FactorKey, value: String },
    #[error("rule table for {0} defines no factors")]
    EmptyRuleTable(ProductType),
}

/// Step counters for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowProgress {
    /// 1-based position of the current factor, 0 outside the answering phase.
    pub step: usize,
    pub total: usize,
    pub answered: usize,
}

/// Single-session wizard: pick a product, answer each factor in table order,
/// then read the estimate.
///
/// Forward moves are gated on the current factor having an answer, so the
/// answer set is always complete by the time [`FlowState::Results`] is reached.
/// Rejected transitions return a [`FlowError`] and leave the flow untouched.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireFlow {
    estimator: Estimator,
    state: FlowState,
    table: Option<&'static RuleTable>,
    answers: AnswerSet,
    estimate: Option<ApprovalEstimate>,
}

impl QuestionnaireFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_estimator(estimator: Estimator) -> Self {
        Self {
            estimator,
            ..Self::default()
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn product(&self) -> Option<ProductType> {
        self.table.map(|table| table.product)
    }

    pub fn table(&self) -> Option<&'static RuleTable> {
        self.table
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn estimate(&self) -> Option<&ApprovalEstimate> {
        self.estimate.as_ref()
    }

    pub fn current_factor(&self) -> Option<&'static Factor> {
        match (self.state, self.table) {
            (FlowState::AnsweringFactor(index), Some(table)) => table.factors.get(index),
            _ => None,
        }
    }

    /// Answer already recorded for the current factor.
    pub fn current_answer(&self) -> Option<&str> {
        self.current_factor()
            .and_then(|factor| self.answers.get(factor.key))
    }

    pub fn progress(&self) -> FlowProgress {
        let total = self.table.map(RuleTable::len).unwrap_or(0);
        let answered = self
            .table
            .map(|table| total - self.answers.missing_for(table).len())
            .unwrap_or(0);
        let step = match self.state {
            FlowState::AnsweringFactor(index) => index + 1,
            _ => 0,
        };

        FlowProgress {
            step,
            total,
            answered,
        }
    }

    pub fn select_product(&mut self, product: ProductType) -> Result<FlowState, FlowError> {
        self.select_table(RuleTable::for_product(product))
    }

    /// Lenient variant: unknown keys select the credit card table.
    pub fn select_product_key(&mut self, product_key: &str) -> Result<FlowState, FlowError> {
        self.select_product(ProductType::resolve(product_key))
    }

    /// Starts the questionnaire over `table` with an empty answer set.
    pub fn select_table(&mut self, table: &'static RuleTable) -> Result<FlowState, FlowError> {
        if self.state != FlowState::ProductSelection {
            return Err(self.invalid("select a product"));
        }
        if table.is_empty() {
            return Err(FlowError::EmptyRuleTable(table.product));
        }

        self.table = Some(table);
        self.answers.clear();
        self.estimate = None;
        self.state = FlowState::AnsweringFactor(0);
        tracing::debug!(product = %table.product, factors = table.len(), "questionnaire started");
        Ok(self.state)
    }

    /// Records `value` for the current factor, replacing any earlier answer.
    pub fn select_option(&mut self, value: &str) -> Result<&'static FactorOption, FlowError> {
        let factor = self
            .current_factor()
            .ok_or_else(|| self.invalid("answer a factor"))?;
        let option = factor.option(value).ok_or_else(|| FlowError::UnknownOption {
            factor: factor.key,
            value: value.to_string(),
        })?;

        self.answers.record(factor.key, option.value);
        Ok(option)
    }

    pub fn can_advance(&self) -> bool {
        self.current_answer().is_some()
    }

    pub fn next(&mut self) -> Result<FlowState, FlowError> {
        let (index, table) = match (self.state, self.table) {
            (FlowState::AnsweringFactor(index), Some(table)) => (index, table),
            _ => return Err(self.invalid("advance")),
        };

        if !self.can_advance() {
            return Err(FlowError::AnswerRequired(table.factors[index].key));
        }

        if index + 1 < table.len() {
            self.state = FlowState::AnsweringFactor(index + 1);
        } else {
            let estimate = self.estimator.estimate_with(table, &self.answers);
            tracing::info!(
                product = %table.product,
                percentage = estimate.percentage,
                tier = estimate.tier.label(),
                "questionnaire completed"
            );
            self.estimate = Some(estimate);
            self.state = FlowState::Results;
        }

        Ok(self.state)
    }

    /// Steps back one screen. Leaving the results drops the stale estimate;
    /// leaving the first factor returns to product selection.
    pub fn back(&mut self) -> Result<FlowState, FlowError> {
        self.state = match (self.state, self.table) {
            (FlowState::AnsweringFactor(0), _) => FlowState::ProductSelection,
            (FlowState::AnsweringFactor(index), _) => FlowState::AnsweringFactor(index - 1),
            (FlowState::Results, Some(table)) => {
                self.estimate = None;
                FlowState::AnsweringFactor(table.len() - 1)
            }
            _ => return Err(self.invalid("go back")),
        };
        Ok(self.state)
    }

    /// Returns to product selection from any state, discarding everything.
    pub fn restart(&mut self) -> FlowState {
        self.table = None;
        self.answers.clear();
        self.estimate = None;
        self.state = FlowState::ProductSelection;
        self.state
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            state: self.state.label(),
        }
    }
}
