//! Budgeting tips chosen from how spending is split between categories.

use crate::dashboard::aggregation::CategoryTotals;

/// A budgeting tip shown below the expense table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// Entertainment is more than 20% of all spending.
    ReduceEntertainment,
    /// Food is more than 30% of all spending.
    PlanMeals,
    /// Shopping is more than 25% of all spending.
    DelayPurchases,
    /// Always shown.
    ReviewSubscriptions,
    /// Always shown.
    SetMonthlyBudget,
}

impl Suggestion {
    /// The text displayed to the user.
    pub fn text(self) -> &'static str {
        match self {
            Suggestion::ReduceEntertainment => {
                "Consider reducing entertainment expenses. Look for free or low-cost alternatives for leisure activities."
            }
            Suggestion::PlanMeals => {
                "Try meal planning and cooking at home more often to reduce food expenses."
            }
            Suggestion::DelayPurchases => {
                "Consider implementing a 24-hour waiting period before making non-essential purchases."
            }
            Suggestion::ReviewSubscriptions => {
                "Review your monthly subscriptions and cancel any that you don't use regularly."
            }
            Suggestion::SetMonthlyBudget => {
                "Set up a monthly budget and track your progress towards your financial goals."
            }
        }
    }
}

/// A suggestion that applies when a category's share of the grand total
/// is strictly greater than `percent`.
struct ShareRule {
    category: &'static str,
    percent: i64,
    suggestion: Suggestion,
}

const SHARE_RULES: [ShareRule; 3] = [
    ShareRule {
        category: "entertainment",
        percent: 20,
        suggestion: Suggestion::ReduceEntertainment,
    },
    ShareRule {
        category: "food",
        percent: 30,
        suggestion: Suggestion::PlanMeals,
    },
    ShareRule {
        category: "shopping",
        percent: 25,
        suggestion: Suggestion::DelayPurchases,
    },
];

const GENERAL_SUGGESTIONS: [Suggestion; 2] = [
    Suggestion::ReviewSubscriptions,
    Suggestion::SetMonthlyBudget,
];

impl ShareRule {
    fn applies(&self, totals: &CategoryTotals, grand_total: f64) -> bool {
        match totals.get(self.category) {
            // Compared in whole cents so a share exactly on the boundary never fires.
            Some(amount) => {
                let amount_cents = to_cents(amount);
                amount_cents > 0 && amount_cents * 100 > to_cents(grand_total) * self.percent
            }
            None => false,
        }
    }
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Get the suggestions for the given totals, in display order.
///
/// The category rules are checked first in a fixed order, followed by the
/// general suggestions which always apply.
pub fn evaluate_suggestions(totals: &CategoryTotals, grand_total: f64) -> Vec<Suggestion> {
    SHARE_RULES
        .iter()
        .filter(|rule| rule.applies(totals, grand_total))
        .map(|rule| rule.suggestion)
        .chain(GENERAL_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dashboard::aggregation::{category_totals, grand_total},
        expense::Expense,
    };

    use super::{Suggestion, evaluate_suggestions};

    fn suggestions_for(items: &[(f64, &str)]) -> Vec<Suggestion> {
        let expenses: Vec<_> = items
            .iter()
            .map(|(amount, category)| {
                Expense::build(*amount, category, "", date!(2024 - 01 - 01)).with_id(None)
            })
            .collect();

        evaluate_suggestions(&category_totals(&expenses), grand_total(&expenses))
    }

    #[test]
    fn empty_list_only_has_general_suggestions() {
        assert_eq!(
            suggestions_for(&[]),
            vec![
                Suggestion::ReviewSubscriptions,
                Suggestion::SetMonthlyBudget
            ]
        );
    }

    #[test]
    fn food_and_entertainment_scenario() {
        let got = suggestions_for(&[(100.0, "food"), (50.0, "entertainment")]);

        assert_eq!(
            got,
            vec![
                Suggestion::ReduceEntertainment,
                Suggestion::PlanMeals,
                Suggestion::ReviewSubscriptions,
                Suggestion::SetMonthlyBudget
            ]
        );
    }

    #[test]
    fn entertainment_at_exactly_twenty_percent_does_not_fire() {
        let got = suggestions_for(&[(20.0, "entertainment"), (80.0, "bills")]);

        assert!(!got.contains(&Suggestion::ReduceEntertainment));
    }

    #[test]
    fn entertainment_just_above_twenty_percent_fires() {
        let got = suggestions_for(&[(20.01, "entertainment"), (79.99, "bills")]);

        assert!(got.contains(&Suggestion::ReduceEntertainment));
    }

    #[test]
    fn entertainment_with_cents_at_exactly_twenty_percent_does_not_fire() {
        let got = suggestions_for(&[(0.47, "entertainment"), (1.88, "bills")]);

        assert!(!got.contains(&Suggestion::ReduceEntertainment));
    }

    #[test]
    fn food_with_cents_at_exactly_thirty_percent_does_not_fire() {
        let got = suggestions_for(&[(3.57, "food"), (8.33, "bills")]);

        assert!(!got.contains(&Suggestion::PlanMeals));
    }

    #[test]
    fn shopping_with_cents_at_exactly_twenty_five_percent_does_not_fire() {
        let got = suggestions_for(&[(0.29, "shopping"), (0.87, "bills")]);

        assert!(!got.contains(&Suggestion::DelayPurchases));
    }

    #[test]
    fn one_cent_over_each_boundary_fires() {
        let entertainment = suggestions_for(&[(0.48, "entertainment"), (1.87, "bills")]);
        let food = suggestions_for(&[(3.58, "food"), (8.32, "bills")]);
        let shopping = suggestions_for(&[(0.30, "shopping"), (0.86, "bills")]);

        assert!(entertainment.contains(&Suggestion::ReduceEntertainment));
        assert!(food.contains(&Suggestion::PlanMeals));
        assert!(shopping.contains(&Suggestion::DelayPurchases));
    }

    #[test]
    fn food_at_exactly_thirty_percent_does_not_fire() {
        let got = suggestions_for(&[(30.0, "food"), (70.0, "bills")]);

        assert!(!got.contains(&Suggestion::PlanMeals));
    }

    #[test]
    fn shopping_at_exactly_twenty_five_percent_does_not_fire() {
        let got = suggestions_for(&[(25.0, "shopping"), (75.0, "bills")]);

        assert!(!got.contains(&Suggestion::DelayPurchases));
    }

    #[test]
    fn shopping_above_twenty_five_percent_fires() {
        let got = suggestions_for(&[(26.0, "shopping"), (74.0, "bills")]);

        assert_eq!(
            got,
            vec![
                Suggestion::DelayPurchases,
                Suggestion::ReviewSubscriptions,
                Suggestion::SetMonthlyBudget
            ]
        );
    }

    #[test]
    fn missing_category_never_fires() {
        let got = suggestions_for(&[(100.0, "bills")]);

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn general_suggestions_always_come_last() {
        let got = suggestions_for(&[(10.0, "shopping")]);

        assert_eq!(
            &got[got.len() - 2..],
            &[
                Suggestion::ReviewSubscriptions,
                Suggestion::SetMonthlyBudget
            ]
        );
    }

    #[test]
    fn texts_match_display_copy() {
        assert_eq!(
            Suggestion::PlanMeals.text(),
            "Try meal planning and cooking at home more often to reduce food expenses."
        );
        assert_eq!(
            Suggestion::ReviewSubscriptions.text(),
            "Review your monthly subscriptions and cancel any that you don't use regularly."
        );
    }
}
