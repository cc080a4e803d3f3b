use serde::Serialize;

use super::domain::{AnswerSet, FactorKey, ProductType};
use super::rules::RuleTable;

/// Highest percentage ever reported. A perfect profile still shows 99%.
pub const PERCENTAGE_CAP: u8 = 99;

/// Points earned by a single factor, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: FactorKey,
    pub selected: Option<String>,
    pub points: u16,
    pub max_points: u16,
}

/// How trustworthy a percentage is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Every factor had a recognized answer.
    Complete,
    /// Some factors scored zero because they were unanswered or unrecognized.
    Incomplete {
        missing: Vec<FactorKey>,
        unrecognized: Vec<FactorKey>,
    },
    /// The table had no points to award.
    Degenerate,
    /// Scoring failed and the result was forced to zero.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub product: ProductType,
    pub percentage: u8,
    pub total_points: u32,
    pub max_points: u32,
    pub status: ScoreStatus,
    pub components: Vec<ScoreComponent>,
}

impl ScoreOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, ScoreStatus::Complete)
    }

    fn failed(product: ProductType, error: &ScoreError) -> Self {
        Self {
            product,
            percentage: 0,
            total_points: 0,
            max_points: 0,
            status: ScoreStatus::Failed {
                reason: error.to_string(),
            },
            components: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ScoreError {
    #[error("point total overflowed at factor {0}")]
    Overflow(FactorKey),
}

/// Stateless engine normalizing selected option weights into a percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Never fails: missing or unknown answers score zero, and any internal
    /// failure yields a 0% outcome tagged [`ScoreStatus::Failed`].
    pub fn score(&self, table: &RuleTable, answers: &AnswerSet) -> ScoreOutcome {
        match try_score(table, answers) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(product = %table.product, %err, "approval scoring failed, reporting 0%");
                ScoreOutcome::failed(table.product, &err)
            }
        }
    }
}

fn try_score(table: &RuleTable, answers: &AnswerSet) -> Result<ScoreOutcome, ScoreError> {
    let mut components = Vec::with_capacity(table.len());
    let mut total_points: u32 = 0;
    let mut max_points: u32 = 0;
    let mut missing = Vec::new();
    let mut unrecognized = Vec::new();

    for factor in table.factors {
        let selected = answers.get(factor.key);
        let points = match selected {
            Some(value) => match factor.option(value) {
                Some(option) => option.points,
                None => {
                    unrecognized.push(factor.key);
                    0
                }
            },
            None => {
                missing.push(factor.key);
                0
            }
        };
        let ceiling = factor.max_points();

        total_points = total_points
            .checked_add(u32::from(points))
            .ok_or(ScoreError::Overflow(factor.key))?;
        max_points = max_points
            .checked_add(u32::from(ceiling))
            .ok_or(ScoreError::Overflow(factor.key))?;

        components.push(ScoreComponent {
            factor: factor.key,
            selected: selected.map(str::to_string),
            points,
            max_points: ceiling,
        });
    }

    let status = if max_points == 0 {
        ScoreStatus::Degenerate
    } else if missing.is_empty() && unrecognized.is_empty() {
        ScoreStatus::Complete
    } else {
        ScoreStatus::Incomplete {
            missing,
            unrecognized,
        }
    };

    Ok(ScoreOutcome {
        product: table.product,
        percentage: normalize(total_points, max_points),
        total_points,
        max_points,
        status,
        components,
    })
}

/// `round(100 * total / max)` with halves rounded up, capped at [`PERCENTAGE_CAP`].
/// A zero ceiling yields zero.
pub fn normalize(total_points: u32, max_points: u32) -> u8 {
    if max_points == 0 {
        return 0;
    }

    let total = u64::from(total_points);
    let max = u64::from(max_points);
    let rounded = (200 * total + max) / (2 * max);
    rounded.min(u64::from(PERCENTAGE_CAP)) as u8
}
