//! Weekly spending report
//!
//! Aggregates one member's expenses over the seven local calendar days ending
//! with today: per-category totals, per-day totals and the grand total.

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use crate::display::format_bar;
use crate::models::{CategorySet, FamilyMember, Money};

/// Number of calendar days covered, including today
pub const WINDOW_DAYS: u64 = 7;

/// Spending over the last seven days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyReport {
    pub member_name: String,
    /// First day in the window (`today - 6`)
    pub start_date: NaiveDate,
    /// Last day in the window (today)
    pub end_date: NaiveDate,
    /// Totals for categories with at least one expense in the window
    pub by_category: BTreeMap<String, Money>,
    /// One entry per day in the window, oldest first; quiet days are zero
    pub daily_totals: Vec<(NaiveDate, Money)>,
    pub total: Money,
    pub expense_count: usize,
}

impl WeeklyReport {
    pub fn generate(member: &FamilyMember, today: NaiveDate) -> Self {
        let start_date = today
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);

        let mut by_day: BTreeMap<NaiveDate, Money> = start_date
            .iter_days()
            .take_while(|d| *d <= today)
            .map(|d| (d, Money::zero()))
            .collect();

        let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut total = Money::zero();
        let mut expense_count = 0;

        for expense in &member.expenses {
            let Some(day_total) = by_day.get_mut(&expense.local_date()) else {
                continue;
            };
            *day_total += expense.amount;
            *by_category.entry(expense.category.clone()).or_default() += expense.amount;
            total += expense.amount;
            expense_count += 1;
        }

        Self {
            member_name: member.name.clone(),
            start_date,
            end_date: today,
            by_category,
            daily_totals: by_day.into_iter().collect(),
            total,
            expense_count,
        }
    }

    /// Category rows in the ledger's category order, then any no longer listed
    pub fn category_rows<'a>(&'a self, categories: &CategorySet) -> Vec<(&'a str, Money)> {
        let mut rows: Vec<(&str, Money)> = self
            .by_category
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        rows.sort_by_key(|(name, _)| categories.position(name).unwrap_or(usize::MAX));
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, categories: &CategorySet) -> String {
        let mut output = format!(
            "Weekly Report: {} ({} to {})\n",
            self.member_name, self.start_date, self.end_date
        );
        output.push_str(&"=".repeat(48));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses in the last 7 days.\n");
            return output;
        }

        output.push_str(&format!("{:<30} {:>16}\n", "Category", "Amount"));
        output.push_str(&"-".repeat(48));
        output.push('\n');
        for (name, amount) in self.category_rows(categories) {
            output.push_str(&format!("{:<30} {:>16}\n", name, amount.to_string()));
        }

        output.push_str(&format!("\n{:<30} {:>16}\n", "Day", "Spent"));
        output.push_str(&"-".repeat(48));
        output.push('\n');
        let busiest = self
            .daily_totals
            .iter()
            .map(|(_, amount)| *amount)
            .max()
            .unwrap_or_default();
        for (day, amount) in &self.daily_totals {
            output.push_str(&format!(
                "{:<11} {:<18} {:>16}\n",
                day.format("%a %d %b").to_string(),
                format_bar(*amount, busiest, 18),
                amount.to_string()
            ));
        }

        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>16}\n",
            format!("TOTAL ({} expenses)", self.expense_count),
            self.total.to_string()
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn at_noon(days_ago: u64) -> DateTime<Utc> {
        let day = today() - Days::new(days_ago);
        Local
            .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
            .unwrap()
            .with_timezone(&Utc)
    }

    fn member_with(expenses: &[(i64, &str, u64)]) -> FamilyMember {
        let mut member = FamilyMember::new("Asha");
        member.set_budget(10_000.0, 30, at_noon(20)).unwrap();
        for (rupees, category, days_ago) in expenses {
            member.expenses.push(Expense::new(
                Money::from_rupees(*rupees),
                *category,
                at_noon(*days_ago),
            ));
        }
        member
    }

    #[test]
    fn test_window_bounds() {
        let report = WeeklyReport::generate(&member_with(&[]), today());
        assert_eq!(report.start_date, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(report.end_date, today());
        assert_eq!(report.daily_totals.len(), 7);
        assert!(report.is_empty());
    }

    #[test]
    fn test_includes_recent_excludes_old() {
        let member = member_with(&[(100, "Food", 1), (200, "Utilities", 3), (300, "Food", 8)]);
        let report = WeeklyReport::generate(&member, today());

        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.by_category["Food"], Money::from_rupees(100));
        assert_eq!(report.by_category["Utilities"], Money::from_rupees(200));
        assert_eq!(report.total, Money::from_rupees(300));
        assert_eq!(report.expense_count, 2);
    }

    #[test]
    fn test_window_edges() {
        let member = member_with(&[(10, "Food", 0), (20, "Food", 6), (40, "Food", 7)]);
        let report = WeeklyReport::generate(&member, today());
        assert_eq!(report.total, Money::from_rupees(30));
    }

    #[test]
    fn test_future_expenses_excluded() {
        let mut member = member_with(&[(10, "Food", 0)]);
        let tomorrow = Local
            .from_local_datetime(
                &(today() + Days::new(1)).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            )
            .unwrap()
            .with_timezone(&Utc);
        member
            .expenses
            .push(Expense::new(Money::from_rupees(99), "Food", tomorrow));

        let report = WeeklyReport::generate(&member, today());
        assert_eq!(report.total, Money::from_rupees(10));
    }

    #[test]
    fn test_daily_totals() {
        let member = member_with(&[(10, "Food", 2), (15, "Other", 2), (5, "Food", 0)]);
        let report = WeeklyReport::generate(&member, today());

        let totals: Vec<Money> = report.daily_totals.iter().map(|(_, m)| *m).collect();
        assert_eq!(
            totals,
            vec![
                Money::zero(),
                Money::zero(),
                Money::zero(),
                Money::zero(),
                Money::from_rupees(25),
                Money::zero(),
                Money::from_rupees(5),
            ]
        );
    }

    #[test]
    fn test_category_rows_follow_category_order() {
        let member = member_with(&[(1, "Other", 0), (2, "Food", 0), (3, "Retired", 0)]);
        let report = WeeklyReport::generate(&member, today());

        let names: Vec<&str> = report
            .category_rows(&CategorySet::defaults())
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["Food", "Other", "Retired"]);
    }

    #[test]
    fn test_format_terminal() {
        let member = member_with(&[(150, "Food", 1)]);
        let text = WeeklyReport::generate(&member, today()).format_terminal(&CategorySet::defaults());
        assert!(text.contains("Food"));
        assert!(text.contains("₹150.00"));
        assert!(text.contains("TOTAL (1 expenses)"));
    }
}
