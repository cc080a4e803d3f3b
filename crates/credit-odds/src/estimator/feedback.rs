use super::domain::{Feedback, ProductType, Tier};

pub const EXCELLENT_THRESHOLD: u8 = 80;
pub const GOOD_THRESHOLD: u8 = 60;
pub const MODERATE_THRESHOLD: u8 = 40;

impl Tier {
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            Self::Good
        } else if percentage >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Maps a percentage to a tier and product-specific wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackClassifier;

impl FeedbackClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, percentage: u8, product: ProductType) -> (Tier, Feedback) {
        let tier = Tier::from_percentage(percentage);
        (tier, feedback_for(tier, product))
    }

    /// Same as [`classify`](Self::classify) for a raw product key; unknown
    /// keys get the credit card wording.
    pub fn classify_key(&self, percentage: u8, product_key: &str) -> (Tier, Feedback) {
        self.classify(percentage, ProductType::resolve(product_key))
    }
}

pub fn feedback_for(tier: Tier, product: ProductType) -> Feedback {
    match (product, tier) {
        (ProductType::CreditCard, Tier::Excellent) => Feedback {
            title: "Excellent chance of approval",
            message: "Your profile matches what card issuers look for. You are likely to be approved, possibly with a premium card and a higher credit limit.",
        },
        (ProductType::CreditCard, Tier::Good) => Feedback {
            title: "Good chance of approval",
            message: "You meet the main requirements of most issuers. Compare cards whose minimum income you clear comfortably to improve your odds.",
        },
        (ProductType::CreditCard, Tier::Moderate) => Feedback {
            title: "Moderate chance of approval",
            message: "Approval is possible but not assured. Paying down existing balances, lowering your debt-to-income ratio and building savings will strengthen your financial profile.",
        },
        (ProductType::CreditCard, Tier::Low) => Feedback {
            title: "Low chance of approval",
            message: "Your profile needs substantial improvement before applying. Consider a secured card backed by a deposit, or a supplementary card on a family member's account, while you build your credit history.",
        },
        (ProductType::PersonalLoan, Tier::Excellent) => Feedback {
            title: "Excellent chance of approval",
            message: "Lenders should view you as a low-risk borrower. You are well placed to negotiate a lower interest rate or a larger loan amount.",
        },
        (ProductType::PersonalLoan, Tier::Good) => Feedback {
            title: "Good chance of approval",
            message: "You are likely to qualify with most lenders. Keeping the requested amount within your repayment capacity will help secure better terms.",
        },
        (ProductType::PersonalLoan, Tier::Moderate) => Feedback {
            title: "Moderate chance of approval",
            message: "Approval may depend on the amount you request. Reducing existing debt, raising your savings or offering security would improve your financial profile.",
        },
        (ProductType::PersonalLoan, Tier::Low) => Feedback {
            title: "Low chance of approval",
            message: "An unsecured application is unlikely to succeed right now. Consider adding a guarantor, pledging a deposit or collateral, or improving your credit history and debt levels before applying.",
        },
        (ProductType::CarLoan, Tier::Excellent) => Feedback {
            title: "Excellent chance of approval",
            message: "Finance companies should approve you readily. You may qualify for promotional rates and a low down payment.",
        },
        (ProductType::CarLoan, Tier::Good) => Feedback {
            title: "Good chance of approval",
            message: "You are likely to be approved. A larger down payment or a shorter term can help you secure a better rate.",
        },
        (ProductType::CarLoan, Tier::Moderate) => Feedback {
            title: "Moderate chance of approval",
            message: "Approval is possible with the right terms. Increasing your down payment, choosing a less expensive car or reducing existing instalments will improve your financial profile.",
        },
        (ProductType::CarLoan, Tier::Low) => Feedback {
            title: "Low chance of approval",
            message: "Vehicle finance will be difficult to obtain at this stage. Consider applying with a co-borrower or guarantor, saving for a substantially larger down payment, or improving your credit record first.",
        },
        (ProductType::HomeLoan, Tier::Excellent) => Feedback {
            title: "Excellent chance of approval",
            message: "Banks should consider you a strong mortgage applicant. You are in a good position to compare offers and negotiate rates and fees.",
        },
        (ProductType::HomeLoan, Tier::Good) => Feedback {
            title: "Good chance of approval",
            message: "You are likely to qualify for a home loan. Keep your debt-to-income ratio stable and avoid new borrowing until the loan is approved.",
        },
        (ProductType::HomeLoan, Tier::Moderate) => Feedback {
            title: "Moderate chance of approval",
            message: "You may be approved for a smaller amount than you need. Building savings for a larger down payment and reducing other debts will strengthen your financial profile.",
        },
        (ProductType::HomeLoan, Tier::Low) => Feedback {
            title: "Low chance of approval",
            message: "A mortgage application is unlikely to succeed right now. Consider a joint application with a co-borrower, a lower-priced property, or substantially reducing debt and growing savings before applying.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_at_the_lower_edge() {
        assert_eq!(Tier::from_percentage(99), Tier::Excellent);
        assert_eq!(Tier::from_percentage(80), Tier::Excellent);
        assert_eq!(Tier::from_percentage(79), Tier::Good);
        assert_eq!(Tier::from_percentage(60), Tier::Good);
        assert_eq!(Tier::from_percentage(59), Tier::Moderate);
        assert_eq!(Tier::from_percentage(40), Tier::Moderate);
        assert_eq!(Tier::from_percentage(39), Tier::Low);
        assert_eq!(Tier::from_percentage(0), Tier::Low);
    }

    #[test]
    fn classifier_is_total_over_all_products_and_percentages() {
        let classifier = FeedbackClassifier::new();
        for product in ProductType::ordered() {
            for percentage in 0..=99u8 {
                let (tier, feedback) = classifier.classify(percentage, product);
                assert_eq!(tier, Tier::from_percentage(percentage));
                assert!(!feedback.title.is_empty());
                assert!(!feedback.message.is_empty());
            }
        }
    }

    #[test]
    fn wording_differs_per_product() {
        let classifier = FeedbackClassifier::new();
        let (_, card) = classifier.classify(20, ProductType::CreditCard);
        let (_, home) = classifier.classify(20, ProductType::HomeLoan);
        assert_eq!(card.title, home.title);
        assert_ne!(card.message, home.message);
    }

    #[test]
    fn low_tier_suggests_alternate_strategies() {
        let (_, personal) = FeedbackClassifier::new().classify(10, ProductType::PersonalLoan);
        assert!(personal.message.contains("guarantor"));
        let (_, car) = FeedbackClassifier::new().classify(10, ProductType::CarLoan);
        assert!(car.message.contains("co-borrower"));
    }

    #[test]
    fn unknown_product_key_uses_credit_card_wording() {
        let classifier = FeedbackClassifier::new();
        assert_eq!(
            classifier.classify_key(65, "pet-insurance"),
            classifier.classify(65, ProductType::CreditCard)
        );
    }
}
