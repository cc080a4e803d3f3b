use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::rules::RuleTable;

/// Financial products the estimator can score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    CreditCard,
    PersonalLoan,
    CarLoan,
    HomeLoan,
}

impl ProductType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::CreditCard,
            Self::PersonalLoan,
            Self::CarLoan,
            Self::HomeLoan,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::PersonalLoan => "personal-loan",
            Self::CarLoan => "car-loan",
            Self::HomeLoan => "home-loan",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PersonalLoan => "Personal Loan",
            Self::CarLoan => "Car Loan",
            Self::HomeLoan => "Home Loan",
        }
    }

    /// Lenient lookup used by the public surfaces. Unknown keys resolve to the
    /// credit card product rather than failing.
    pub fn resolve(key: &str) -> Self {
        match key.parse::<Self>() {
            Ok(product) => product,
            Err(err) => {
                tracing::warn!(%err, "falling back to credit card rule table");
                Self::CreditCard
            }
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ordered()
            .into_iter()
            .find(|product| product.key() == normalized)
            .ok_or_else(|| UnknownProductType(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product type '{0}'")]
pub struct UnknownProductType(pub String);

/// Scored dimensions. Each rule table uses a subset of these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactorKey {
    Age,
    Employment,
    MonthlyIncome,
    CreditHistory,
    ExistingCreditLimit,
    MonthlyLoanRepayment,
    Savings,
    Dti,
    SecurityMethod,
    SecuredAssetValue,
}

impl FactorKey {
    pub const ALL: [Self; 10] = [
        Self::Age,
        Self::Employment,
        Self::MonthlyIncome,
        Self::CreditHistory,
        Self::ExistingCreditLimit,
        Self::MonthlyLoanRepayment,
        Self::Savings,
        Self::Dti,
        Self::SecurityMethod,
        Self::SecuredAssetValue,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Employment => "employment",
            Self::MonthlyIncome => "monthlyIncome",
            Self::CreditHistory => "creditHistory",
            Self::ExistingCreditLimit => "existingCreditLimit",
            Self::MonthlyLoanRepayment => "monthlyLoanRepayment",
            Self::Savings => "savings",
            Self::Dti => "dti",
            Self::SecurityMethod => "securityMethod",
            Self::SecuredAssetValue => "securedAssetValue",
        }
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorKey {
    type Err = UnknownFactorKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == trimmed)
            .ok_or_else(|| UnknownFactorKey(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown factor key '{0}'")]
pub struct UnknownFactorKey(pub String);

/// One selectable answer for a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorOption {
    pub label: &'static str,
    pub value: &'static str,
    pub points: u16,
}

/// One scored question within a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Factor {
    pub key: FactorKey,
    pub label: &'static str,
    pub description: &'static str,
    pub options: &'static [FactorOption],
}

impl Factor {
    /// Ceiling used for normalization: the largest option weight.
    pub fn max_points(&self) -> u16 {
        self.options
            .iter()
            .map(|option| option.points)
            .max()
            .unwrap_or(0)
    }

    pub fn option(&self, value: &str) -> Option<&'static FactorOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Answers collected during one questionnaire session, keyed by factor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<FactorKey, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer. Blank values clear the factor instead.
    pub fn record(&mut self, key: FactorKey, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    pub fn get(&self, key: FactorKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn remove(&mut self, key: FactorKey) -> Option<String> {
        self.0.remove(&key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Factors of `table` that have no recorded answer, in table order.
    pub fn missing_for(&self, table: &RuleTable) -> Vec<FactorKey> {
        table
            .factors
            .iter()
            .filter(|factor| self.get(factor.key).is_none())
            .map(|factor| factor.key)
            .collect()
    }

    pub fn is_complete_for(&self, table: &RuleTable) -> bool {
        self.missing_for(table).is_empty()
    }
}

/// Goes through [`AnswerSet::record`] so blank values stay unset.
impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<FactorKey, String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl FromIterator<(FactorKey, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (FactorKey, String)>>(iter: I) -> Self {
        let mut answers = Self::new();
        for (key, value) in iter {
            answers.record(key, value);
        }
        answers
    }
}

/// Qualitative bucket derived from the approval percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

/// Tier- and product-specific wording shown with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub title: &'static str,
    pub message: &'static str,
}
