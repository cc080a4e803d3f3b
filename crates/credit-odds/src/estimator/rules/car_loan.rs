use super::{choice, RuleTable};
use crate::estimator::domain::{Factor, FactorKey, ProductType};

pub(super) static TABLE: RuleTable = RuleTable {
    product: ProductType::CarLoan,
    factors: &[
        Factor {
            key: FactorKey::Age,
            label: "How old are you?",
            description: "Hire-purchase terms run up to seven years and must end before the lender's maximum age.",
            options: &[
                choice("Under 20", "<20", 0),
                choice("20-21", "20-21", 8),
                choice("22-35", "22-35", 15),
                choice("36-45", "36-45", 15),
                choice("46-55", "46-55", 12),
                choice("56-60", "56-60", 6),
                choice("Over 60", "60+", 2),
            ],
        },
        Factor {
            key: FactorKey::Employment,
            label: "What is your employment type?",
            description: "Finance companies check that your job will outlast the contract. Salaried staff need at least a year with their employer.",
            options: &[
                choice("Government / state enterprise", "public", 20),
                choice("Private company employee", "private", 16),
                choice("Business owner", "business", 14),
                choice("Freelancer / self-employed", "freelance", 8),
                choice("Not currently employed", "unemployed", 0),
            ],
        },
        Factor {
            key: FactorKey::MonthlyIncome,
            label: "What is your monthly income?",
            description: "The car instalment should stay comfortably within your monthly income.",
            options: &[
                choice("Below 15,000", "<15000", 2),
                choice("15,000 - 29,999", "15000-29999", 8),
                choice("30,000 - 49,999", "30000-49999", 12),
                choice("50,000 - 99,999", "50000-99999", 16),
                choice("100,000 or more", "100000+", 20),
            ],
        },
        Factor {
            key: FactorKey::CreditHistory,
            label: "How would you describe your credit history?",
            description: "Late payments on previous hire-purchase or card accounts weigh heavily on vehicle finance decisions.",
            options: &[
                choice("Excellent - always paid on time", "excellent", 25),
                choice("Good - occasional late payment, since settled", "good", 18),
                choice("No credit history yet", "none", 10),
                choice("Fair - late payments in the past 12 months", "fair", 6),
                choice("Poor - defaults or restructured debt", "poor", 0),
            ],
        },
        Factor {
            key: FactorKey::ExistingCreditLimit,
            label: "What is your total existing credit card limit?",
            description: "High unsecured limits signal capacity to borrow more and reduce the headroom for a car instalment.",
            options: &[
                choice("No existing cards", "none", 10),
                choice("Below 100,000", "<100000", 8),
                choice("100,000 - 299,999", "100000-299999", 5),
                choice("300,000 or more", "300000+", 2),
            ],
        },
        Factor {
            key: FactorKey::MonthlyLoanRepayment,
            label: "How much do you repay on loans each month?",
            description: "Existing loans, including another vehicle, reduce what you can afford each month.",
            options: &[
                choice("No loan repayments", "none", 10),
                choice("Below 10,000", "<10000", 7),
                choice("10,000 - 29,999", "10000-29999", 4),
                choice("30,000 or more", "30000+", 1),
            ],
        },
        Factor {
            key: FactorKey::Savings,
            label: "How much do you hold in savings and deposits?",
            description: "Savings can fund a larger down payment, which lowers the amount financed.",
            options: &[
                choice("No savings", "none", 0),
                choice("Below 50,000", "<50000", 3),
                choice("50,000 - 199,999", "50000-199999", 6),
                choice("200,000 - 499,999", "200000-499999", 8),
                choice("500,000 or more", "500000+", 10),
            ],
        },
        Factor {
            key: FactorKey::Dti,
            label: "What share of your income goes to debt repayments?",
            description: "Debt-to-income ratio (DTI) including the new car instalment. Keep it under 40% where possible.",
            options: &[
                choice("Below 30%", "<30", 10),
                choice("30% - 40%", "30-40", 7),
                choice("41% - 50%", "41-50", 3),
                choice("Above 50%", ">50", 0),
            ],
        },
    ],
};
