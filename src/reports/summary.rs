//! Per-member spending summary
//!
//! The figures shown next to a member's budget: what is left, what went out
//! today, the current no-spend streak and how many days of spending the
//! remaining balance still covers.
//!
//! Every calculation takes `today` as a local calendar date so results do not
//! depend on the wall clock.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{Budget, FamilyMember, Money};

/// Sum of the member's expenses dated `today` (local time)
pub fn spent_today(member: &FamilyMember, today: NaiveDate) -> Money {
    member
        .expenses
        .iter()
        .filter(|e| e.local_date() == today)
        .map(|e| e.amount)
        .sum()
}

/// Consecutive days, ending with today, on which nothing was spent
///
/// Counting stops at the most recent day with an expense and never goes back
/// past the day the budget started. Without a budget the streak is zero.
pub fn days_without_spending(member: &FamilyMember, today: NaiveDate) -> u32 {
    let Budget::Active(envelope) = &member.budget else {
        return 0;
    };
    let first_day = envelope
        .start_date
        .with_timezone(&chrono::Local)
        .date_naive();

    let spending_days: BTreeSet<NaiveDate> = member
        .expenses
        .iter()
        .map(|e| e.local_date())
        .filter(|d| *d <= today)
        .collect();

    let mut streak = 0;
    let mut day = today;
    while day >= first_day && !spending_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Days of spending at the daily limit that the remaining balance still covers
///
/// Computed as `ceil(remaining * timeframe / starting_balance)` in whole paise,
/// so it agrees with `remaining / daily_limit` without rounding drift.
pub fn days_needed(member: &FamilyMember) -> Option<u64> {
    let envelope = member.budget.envelope()?;
    let remaining = member.remaining_balance().paise();
    if remaining <= 0 {
        return Some(0);
    }

    let numerator = i128::from(remaining) * i128::from(envelope.timeframe_days);
    let denominator = i128::from(envelope.starting_balance.paise());
    let days = (numerator + denominator - 1) / denominator;
    Some(u64::try_from(days).unwrap_or(u64::MAX))
}

/// Today's spending and the (display) limit it passed, if it passed it
pub fn over_daily_limit(member: &FamilyMember, today: NaiveDate) -> Option<(Money, Money)> {
    let envelope = member.budget.envelope()?;
    let spent = spent_today(member, today);
    envelope
        .exceeds_daily_limit(spent)
        .then(|| (spent, envelope.daily_limit()))
}

/// Snapshot of one member's budget position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingSummary {
    pub member_name: String,
    pub budget: Budget,
    pub total_spent: Money,
    pub remaining: Money,
    pub spent_today: Money,
    pub days_without_spending: u32,
    pub days_needed: Option<u64>,
    pub expense_count: usize,
}

impl SpendingSummary {
    pub fn generate(member: &FamilyMember, today: NaiveDate) -> Self {
        Self {
            member_name: member.name.clone(),
            budget: member.budget.clone(),
            total_spent: member.total_spent(),
            remaining: member.remaining_balance(),
            spent_today: spent_today(member, today),
            days_without_spending: days_without_spending(member, today),
            days_needed: days_needed(member),
            expense_count: member.expenses.len(),
        }
    }

    pub fn daily_limit(&self) -> Option<Money> {
        self.budget.daily_limit()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = format!("Spending Summary: {}\n", self.member_name);
        output.push_str(&"=".repeat(48));
        output.push('\n');

        let Budget::Active(envelope) = &self.budget else {
            output.push_str("No budget set. Use `budget budget set <BALANCE>` to start one.\n");
            output.push_str(&format!("{:<24} {:>22}\n", "Expenses recorded:", self.expense_count));
            return output;
        };

        let rows = [
            ("Total budget:", envelope.starting_balance.to_string()),
            ("Timeframe:", format!("{} days", envelope.timeframe_days)),
            ("Daily limit:", envelope.daily_limit().to_string()),
            ("Spent so far:", self.total_spent.to_string()),
            ("Remaining balance:", self.remaining.to_string()),
            ("Spent today:", self.spent_today.to_string()),
            (
                "Days without spending:",
                self.days_without_spending.to_string(),
            ),
            (
                "Days needed:",
                self.days_needed.map(|d| d.to_string()).unwrap_or_default(),
            ),
            ("Expenses recorded:", self.expense_count.to_string()),
        ];
        for (label, value) in rows {
            output.push_str(&format!("{:<24} {:>22}\n", label, value));
        }

        if envelope.exceeds_daily_limit(self.spent_today) {
            output.push_str(&format!(
                "\nWarning: today's spending ({}) is over the daily limit ({})\n",
                self.spent_today,
                envelope.daily_limit()
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, FamilyMember};
    use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

    fn noon(day: NaiveDate) -> DateTime<Utc> {
        Local
            .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
            .unwrap()
            .with_timezone(&Utc)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn days_ago(n: u64) -> NaiveDate {
        today() - chrono::Days::new(n)
    }

    /// Member with a budget that started `started` days before `today()`
    fn member(balance: f64, days: i64, started: u64) -> FamilyMember {
        let mut member = FamilyMember::new("Asha");
        member
            .set_budget(balance, days, noon(days_ago(started)))
            .unwrap();
        member
    }

    fn spend(member: &mut FamilyMember, rupees: i64, day: NaiveDate) {
        member
            .expenses
            .push(Expense::new(Money::from_rupees(rupees), "Food", noon(day)));
    }

    #[test]
    fn test_spent_today() {
        let mut m = member(3000.0, 30, 5);
        spend(&mut m, 40, today());
        spend(&mut m, 60, today());
        spend(&mut m, 500, days_ago(1));

        assert_eq!(spent_today(&m, today()), Money::from_rupees(100));
    }

    #[test]
    fn test_streak_counts_back_to_last_expense() {
        let mut m = member(3000.0, 30, 10);
        spend(&mut m, 50, days_ago(3));

        // today, 1 and 2 days ago
        assert_eq!(days_without_spending(&m, today()), 3);
    }

    #[test]
    fn test_streak_is_zero_after_spending_today() {
        let mut m = member(3000.0, 30, 10);
        spend(&mut m, 50, today());
        assert_eq!(days_without_spending(&m, today()), 0);
    }

    #[test]
    fn test_streak_stops_at_budget_start() {
        let m = member(3000.0, 30, 4);
        // start day through today inclusive
        assert_eq!(days_without_spending(&m, today()), 5);

        let fresh = member(3000.0, 30, 0);
        assert_eq!(days_without_spending(&fresh, today()), 1);
    }

    #[test]
    fn test_streak_ignores_future_expenses() {
        let mut m = member(3000.0, 30, 2);
        spend(&mut m, 50, today() + chrono::Days::new(1));
        assert_eq!(days_without_spending(&m, today()), 3);
    }

    #[test]
    fn test_streak_without_budget() {
        let m = FamilyMember::new("Ravi");
        assert_eq!(days_without_spending(&m, today()), 0);
    }

    #[test]
    fn test_days_needed() {
        let mut m = member(3000.0, 30, 0);
        assert_eq!(days_needed(&m), Some(30));

        spend(&mut m, 150, today());
        // 2850 / 100 = 28.5 -> 29
        assert_eq!(days_needed(&m), Some(29));

        spend(&mut m, 2850, today());
        assert_eq!(days_needed(&m), Some(0));

        assert_eq!(days_needed(&FamilyMember::new("Ravi")), None);
    }

    #[test]
    fn test_days_needed_with_uneven_daily_limit() {
        let m = member(1000.0, 3, 0);
        assert_eq!(days_needed(&m), Some(3));
    }

    #[test]
    fn test_over_daily_limit() {
        let mut m = member(3000.0, 30, 0);
        spend(&mut m, 100, today());
        assert_eq!(over_daily_limit(&m, today()), None);

        spend(&mut m, 50, today());
        assert_eq!(
            over_daily_limit(&m, today()),
            Some((Money::from_rupees(150), Money::from_rupees(100)))
        );
    }

    #[test]
    fn test_over_daily_limit_compares_exactly() {
        // 1000 / 7 = 142.857..., shown as 142.86
        let mut m = member(1000.0, 7, 0);
        m.expenses
            .push(Expense::new(Money::from_paise(14285), "Food", noon(today())));
        assert_eq!(over_daily_limit(&m, today()), None);

        m.expenses
            .push(Expense::new(Money::from_paise(1), "Food", noon(today())));
        assert_eq!(
            over_daily_limit(&m, today()),
            Some((Money::from_paise(14286), Money::from_paise(14286)))
        );
        assert!(SpendingSummary::generate(&m, today())
            .format_terminal()
            .contains("over the daily limit"));
    }

    #[test]
    fn test_summary() {
        let mut m = member(3000.0, 30, 3);
        spend(&mut m, 150, days_ago(2));

        let summary = SpendingSummary::generate(&m, today());
        assert_eq!(summary.remaining, Money::from_rupees(2850));
        assert_eq!(summary.spent_today, Money::zero());
        assert_eq!(summary.days_without_spending, 2);
        assert_eq!(summary.days_needed, Some(29));
        assert_eq!(summary.daily_limit(), Some(Money::from_rupees(100)));

        let text = summary.format_terminal();
        assert!(text.contains("Asha"));
        assert!(text.contains("₹2,850.00"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_summary_without_budget() {
        let summary = SpendingSummary::generate(&FamilyMember::new("Ravi"), today());
        assert_eq!(summary.days_needed, None);
        assert!(summary.format_terminal().contains("No budget set"));
    }
}
