//! Expense aggregation for the total display, chart and suggestions.
//!
//! Everything here is a pure function over a slice of expenses and is re-run
//! in full on every render.

use std::collections::HashMap;

use crate::expense::Expense;

/// Summed amounts per category label.
///
/// Categories are kept in the order they first appear in the input. Categories
/// that do not appear in the input are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    totals: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&position) => self.totals[position].1 += amount,
            None => {
                self.index.insert(category.to_owned(), self.totals.len());
                self.totals.push((category.to_owned(), amount));
            }
        }
    }

    /// The total for `category`, or `None` if no expense has that category.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index
            .get(category)
            .map(|&position| self.totals[position].1)
    }

    /// Iterate over `(category, total)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
    }

    /// The number of distinct categories.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether there are no categories, i.e. the input was empty.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sum the amounts of `expenses` per category in a single pass.
pub fn category_totals(expenses: &[Expense]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for expense in expenses {
        totals.add(&expense.category, expense.amount);
    }

    totals
}

/// The sum of all amounts in `expenses`, zero for an empty slice.
pub fn grand_total(expenses: &[Expense]) -> f64 {
    // `Iterator::sum` starts from -0.0, which would print as "-0.00".
    expenses
        .iter()
        .fold(0.0, |total, expense| total + expense.amount)
}
