use super::{choice, RuleTable};
use crate::estimator::domain::{Factor, FactorKey, ProductType};

pub(super) static TABLE: RuleTable = RuleTable {
    product: ProductType::HomeLoan,
    factors: &[
        Factor {
            key: FactorKey::Age,
            label: "How old are you?",
            description: "Mortgage terms of up to 30 years must end before age 65-70, so younger applicants qualify for longer terms and lower instalments.",
            options: &[
                choice("Under 20", "<20", 0),
                choice("20-21", "20-21", 5),
                choice("22-35", "22-35", 15),
                choice("36-45", "36-45", 12),
                choice("46-55", "46-55", 7),
                choice("56-60", "56-60", 3),
                choice("Over 60", "60+", 1),
            ],
        },
        Factor {
            key: FactorKey::Employment,
            label: "What is your employment type?",
            description: "Banks look for long, stable employment over a mortgage's lifetime. Self-employed applicants usually need two years of statements.",
            options: &[
                choice("Government / state enterprise", "public", 20),
                choice("Private company employee", "private", 16),
                choice("Business owner", "business", 12),
                choice("Freelancer / self-employed", "freelance", 7),
                choice("Not currently employed", "unemployed", 0),
            ],
        },
        Factor {
            key: FactorKey::MonthlyIncome,
            label: "What is your monthly income?",
            description: "Income sets the maximum loan amount; banks typically lend around 40-60 times monthly income.",
            options: &[
                choice("Below 15,000", "<15000", 0),
                choice("15,000 - 29,999", "15000-29999", 8),
                choice("30,000 - 49,999", "30000-49999", 14),
                choice("50,000 - 99,999", "50000-99999", 20),
                choice("100,000 or more", "100000+", 25),
            ],
        },
        Factor {
            key: FactorKey::CreditHistory,
            label: "How would you describe your credit history?",
            description: "Mortgage underwriting reviews your full bureau record; any recent delinquency can lead to a decline.",
            options: &[
                choice("Excellent - always paid on time", "excellent", 20),
                choice("Good - occasional late payment, since settled", "good", 14),
                choice("No credit history yet", "none", 8),
                choice("Fair - late payments in the past 12 months", "fair", 4),
                choice("Poor - defaults or restructured debt", "poor", 0),
            ],
        },
        Factor {
            key: FactorKey::ExistingCreditLimit,
            label: "What is your total existing credit card limit?",
            description: "Banks may count a share of unused card limits as potential debt when sizing a mortgage.",
            options: &[
                choice("No existing cards", "none", 8),
                choice("Below 100,000", "<100000", 6),
                choice("100,000 - 299,999", "100000-299999", 4),
                choice("300,000 or more", "300000+", 1),
            ],
        },
        Factor {
            key: FactorKey::MonthlyLoanRepayment,
            label: "How much do you repay on loans each month?",
            description: "Car and personal loan instalments directly reduce the mortgage amount a bank will approve.",
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
            description: "Savings cover the down payment, transfer fees and insurance, and show the bank you can handle unexpected costs.",
            options: &[
                choice("No savings", "none", 0),
                choice("Below 50,000", "<50000", 3),
                choice("50,000 - 199,999", "50000-199999", 7),
                choice("200,000 - 499,999", "200000-499999", 11),
                choice("500,000 or more", "500000+", 15),
            ],
        },
        Factor {
            key: FactorKey::Dti,
            label: "What share of your income goes to debt repayments?",
            description: "Debt-to-income ratio (DTI) including the new mortgage instalment. It is the single most important affordability test for home loans.",
            options: &[
                choice("Below 30%", "<30", 20),
                choice("30% - 40%", "30-40", 13),
                choice("41% - 50%", "41-50", 5),
                choice("Above 50%", ">50", 0),
            ],
        },
    ],
};
