mod car_loan;
mod credit_card;
mod home_loan;
mod personal_loan;

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{Factor, FactorKey, FactorOption, ProductType};

const fn choice(label: &'static str, value: &'static str, points: u16) -> FactorOption {
    FactorOption {
        label,
        value,
        points,
    }
}

/// Ordered factor definitions for one product type. Order drives question
/// presentation and is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    pub product: ProductType,
    pub factors: &'static [Factor],
}

impl RuleTable {
    pub const fn new(product: ProductType, factors: &'static [Factor]) -> Self {
        Self { product, factors }
    }

    pub fn for_product(product: ProductType) -> &'static RuleTable {
        match product {
            ProductType::CreditCard => &credit_card::TABLE,
            ProductType::PersonalLoan => &personal_loan::TABLE,
            ProductType::CarLoan => &car_loan::TABLE,
            ProductType::HomeLoan => &home_loan::TABLE,
        }
    }

    pub fn factor(&self, key: FactorKey) -> Option<&'static Factor> {
        self.factors.iter().find(|factor| factor.key == key)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Sum of every factor ceiling.
    pub fn max_points(&self) -> u32 {
        self.factors
            .iter()
            .map(|factor| u32::from(factor.max_points()))
            .sum()
    }

    pub fn validate(&self) -> Result<(), RuleTableError> {
        if self.factors.is_empty() {
            return Err(RuleTableError::NoFactors(self.product));
        }

        let mut keys = BTreeSet::new();
        for factor in self.factors {
            if !keys.insert(factor.key) {
                return Err(RuleTableError::DuplicateFactor {
                    product: self.product,
                    factor: factor.key,
                });
            }

            if factor.options.is_empty() {
                return Err(RuleTableError::NoOptions {
                    product: self.product,
                    factor: factor.key,
                });
            }

            let mut values = BTreeSet::new();
            for option in factor.options {
                if !values.insert(option.value) {
                    return Err(RuleTableError::DuplicateOption {
                        product: self.product,
                        factor: factor.key,
                        value: option.value,
                    });
                }
            }

            if factor.max_points() == 0 {
                return Err(RuleTableError::ZeroCeiling {
                    product: self.product,
                    factor: factor.key,
                });
            }
        }

        Ok(())
    }
}

/// Lenient registry lookup by product key. Unknown keys get the credit card table.
pub fn rule_table(key: &str) -> &'static RuleTable {
    RuleTable::for_product(ProductType::resolve(key))
}

/// Structural problems detected in a rule table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleTableError {
    #[error("rule table for {0} defines no factors")]
    NoFactors(ProductType),
    #[error("rule table for {product} repeats factor {factor}")]
    DuplicateFactor {
        product: ProductType,
        factor: FactorKey,
    },
    #[error("factor {factor} in {product} has no options")]
    NoOptions {
        product: ProductType,
        factor: FactorKey,
    },
    #[error("factor {factor} in {product} repeats option value '{value}'")]
    DuplicateOption {
        product: ProductType,
        factor: FactorKey,
        value: &'static str,
    },
    #[error("factor {factor} in {product} has no option worth any points")]
    ZeroCeiling {
        product: ProductType,
        factor: FactorKey,
    },
}
