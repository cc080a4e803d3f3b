//! Approval-likelihood estimator.
//!
//! Rule tables declare the scored factors per product type, the
//! [`ScoreEngine`] normalizes the selected option weights into a percentage,
//! the [`FeedbackClassifier`] turns the percentage into a tier with wording,
//! and [`QuestionnaireFlow`] walks a user through one factor at a time.

pub mod domain;
pub mod feedback;
pub mod flow;
pub mod router;
pub mod rules;
pub mod scoring;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerSet, Factor, FactorKey, FactorOption, Feedback, ProductType, Tier, UnknownFactorKey,
    UnknownProductType,
};
pub use feedback::FeedbackClassifier;
pub use flow::{FlowError, FlowProgress, FlowState, QuestionnaireFlow};
pub use router::estimator_router;
pub use rules::{rule_table, RuleTable, RuleTableError};
pub use scoring::{ScoreComponent, ScoreEngine, ScoreOutcome, ScoreStatus, PERCENTAGE_CAP};
pub use session::{
    QuestionnaireService, QuestionnaireServiceError, RepositoryError, SessionId, SessionRecord,
    SessionRepository, SessionView,
};

use serde::Serialize;

/// Scores answers against a rule table and attaches tiered feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Estimator {
    engine: ScoreEngine,
    classifier: FeedbackClassifier,
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate(&self, product: ProductType, answers: &AnswerSet) -> ApprovalEstimate {
        self.estimate_with(RuleTable::for_product(product), answers)
    }

    /// Lenient variant keyed by the raw product string.
    pub fn estimate_key(&self, product_key: &str, answers: &AnswerSet) -> ApprovalEstimate {
        self.estimate_with(rule_table(product_key), answers)
    }

    pub fn estimate_with(&self, table: &RuleTable, answers: &AnswerSet) -> ApprovalEstimate {
        let outcome = self.engine.score(table, answers);
        let (tier, feedback) = self.classifier.classify(outcome.percentage, table.product);

        tracing::debug!(
            product = %table.product,
            percentage = outcome.percentage,
            tier = tier.label(),
            complete = outcome.is_complete(),
            "approval estimate computed"
        );

        ApprovalEstimate {
            product: table.product,
            percentage: outcome.percentage,
            tier,
            feedback,
            outcome,
        }
    }
}

/// Percentage, tier and wording shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalEstimate {
    pub product: ProductType,
    pub percentage: u8,
    pub tier: Tier,
    pub feedback: Feedback,
    pub outcome: ScoreOutcome,
}
