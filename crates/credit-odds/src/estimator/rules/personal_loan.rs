use super::{choice, RuleTable};
use crate::estimator::domain::{Factor, FactorKey, ProductType};

pub(super) static TABLE: RuleTable = RuleTable {
    product: ProductType::PersonalLoan,
    factors: &[
        Factor {
            key: FactorKey::Age,
            label: "How old are you?",
            description: "Lenders require the loan to be repaid before retirement, so older applicants face shorter terms.",
            options: &[
                choice("Under 20", "<20", 0),
                choice("20-21", "20-21", 6),
                choice("22-35", "22-35", 15),
                choice("36-45", "36-45", 15),
                choice("46-55", "46-55", 10),
                choice("56-60", "56-60", 5),
                choice("Over 60", "60+", 1),
            ],
        },
        Factor {
            key: FactorKey::Employment,
            label: "What is your employment type?",
            description: "Personal loans are unsecured by default, so lenders lean heavily on the stability of your income source.",
            options: &[
                choice("Government / state enterprise", "public", 20),
                choice("Private company employee", "private", 15),
                choice("Business owner", "business", 10),
                choice("Freelancer / self-employed", "freelance", 6),
                choice("Not currently employed", "unemployed", 0),
            ],
        },
        Factor {
            key: FactorKey::MonthlyIncome,
            label: "What is your monthly income?",
            description: "Loan size is usually capped at a multiple of monthly income, and most lenders require at least 15,000.",
            options: &[
                choice("Below 15,000", "<15000", 0),
                choice("15,000 - 29,999", "15000-29999", 6),
                choice("30,000 - 49,999", "30000-49999", 10),
                choice("50,000 - 99,999", "50000-99999", 15),
                choice("100,000 or more", "100000+", 20),
            ],
        },
        Factor {
            key: FactorKey::CreditHistory,
            label: "How would you describe your credit history?",
            description: "A clean repayment record is the main evidence an unsecured lender has that you will repay.",
            options: &[
                choice("Excellent - always paid on time", "excellent", 20),
                choice("Good - occasional late payment, since settled", "good", 14),
                choice("No credit history yet", "none", 6),
                choice("Fair - late payments in the past 12 months", "fair", 4),
                choice("Poor - defaults or restructured debt", "poor", 0),
            ],
        },
        Factor {
            key: FactorKey::ExistingCreditLimit,
            label: "What is your total existing credit card limit?",
            description: "Unused card limits count toward your total unsecured exposure.",
            options: &[
                choice("No existing cards", "none", 10),
                choice("Below 100,000", "<100000", 7),
                choice("100,000 - 299,999", "100000-299999", 4),
                choice("300,000 or more", "300000+", 1),
            ],
        },
        Factor {
            key: FactorKey::MonthlyLoanRepayment,
            label: "How much do you repay on loans each month?",
            description: "Every existing instalment competes with the new loan for the same monthly income.",
            options: &[
                choice("No loan repayments", "none", 10),
                choice("Below 10,000", "<10000", 7),
                choice("10,000 - 29,999", "10000-29999", 3),
                choice("30,000 or more", "30000+", 0),
            ],
        },
        Factor {
            key: FactorKey::Savings,
            label: "How much do you hold in savings and deposits?",
            description: "Savings provide a buffer if your income is interrupted during the loan term.",
            options: &[
                choice("No savings", "none", 0),
                choice("Below 50,000", "<50000", 2),
                choice("50,000 - 199,999", "50000-199999", 5),
                choice("200,000 - 499,999", "200000-499999", 8),
                choice("500,000 or more", "500000+", 10),
            ],
        },
        Factor {
            key: FactorKey::Dti,
            label: "What share of your income goes to debt repayments?",
            description: "Debt-to-income ratio (DTI) after adding the new instalment. Most lenders decline above 50%.",
            options: &[
                choice("Below 30%", "<30", 15),
                choice("30% - 40%", "30-40", 10),
                choice("41% - 50%", "41-50", 4),
                choice("Above 50%", ">50", 0),
            ],
        },
        Factor {
            key: FactorKey::SecurityMethod,
            label: "Can you secure the loan?",
            description: "Pledging a deposit, an asset, or a guarantor reduces the lender's loss if you default and can offset a weaker profile.",
            options: &[
                choice("No, unsecured", "none", 2),
                choice("Guarantor", "guarantor", 6),
                choice("Property or vehicle as collateral", "collateral", 8),
                choice("Pledged savings / fixed deposit", "deposit", 10),
            ],
        },
        Factor {
            key: FactorKey::SecuredAssetValue,
            label: "What is the value of the pledged security?",
            description: "Security worth more than the requested amount gives the lender the most comfort.",
            options: &[
                choice("No security pledged", "none", 0),
                choice("Below 100,000", "<100000", 3),
                choice("100,000 - 499,999", "100000-499999", 6),
                choice("500,000 - 999,999", "500000-999999", 8),
                choice("1,000,000 or more", "1000000+", 10),
            ],
        },
    ],
};
