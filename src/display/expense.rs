//! Expense display formatting

use crate::models::{Expense, Money};

/// Format expenses as a table with a total row
pub fn format_expense_list(expenses: &[&Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let category_width = expenses
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = format!(
        "{:<16}  {:<category_width$}  {:>14}  {}\n",
        "Date",
        "Category",
        "Amount",
        "ID",
        category_width = category_width,
    );
    output.push_str(&format!(
        "{:-<16}  {:-<category_width$}  {:->14}  {:-<16}\n",
        "",
        "",
        "",
        "",
        category_width = category_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<16}  {:<category_width$}  {:>14}  {}\n",
            expense
                .date
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            expense.category,
            expense.amount.to_string(),
            expense.id.short(),
            category_width = category_width,
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "{:<16}  {:<category_width$}  {:>14}\n",
        "TOTAL",
        "",
        total.to_string(),
        category_width = category_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_empty() {
        assert_eq!(format_expense_list(&[]), "No expenses recorded.\n");
    }

    #[test]
    fn test_list_with_total() {
        let a = Expense::new(Money::from_rupees(150), "Food", Utc::now());
        let b = Expense::new(Money::from_paise(4275), "Transportation", Utc::now());

        let output = format_expense_list(&[&a, &b]);
        assert!(output.contains("Transportation"));
        assert!(output.contains("₹42.75"));
        assert!(output.lines().last().unwrap().contains("₹192.75"));
    }
}
