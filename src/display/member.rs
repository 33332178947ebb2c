//! Family member display formatting

use crate::models::{Budget, FamilyMember, MemberId};

/// Format the member list as a table, marking the selected member
pub fn format_member_list(members: &[FamilyMember], current: Option<&MemberId>) -> String {
    if members.is_empty() {
        return "No family members yet.\n\nAdd one with 'budget member add <NAME>'.\n".to_string();
    }

    let name_width = members
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = format!(
        "  {:<name_width$}  {:<15}  {:>14}  {:>14}\n",
        "Name",
        "ID",
        "Budget",
        "Remaining",
        name_width = name_width,
    );
    output.push_str(&format!(
        "  {:-<name_width$}  {:-<15}  {:->14}  {:->14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for member in members {
        let marker = if current == Some(&member.id) { "*" } else { " " };
        let (budget, remaining) = match &member.budget {
            Budget::NoBudget => ("-".to_string(), "-".to_string()),
            Budget::Active(e) => (
                e.starting_balance.to_string(),
                member.remaining_balance().to_string(),
            ),
        };
        output.push_str(&format!(
            "{} {:<name_width$}  {:<15}  {:>14}  {:>14}\n",
            marker,
            member.name,
            member.id.short(),
            budget,
            remaining,
            name_width = name_width,
        ));
    }

    output
}

/// Format a member's budget details
pub fn format_member_details(member: &FamilyMember) -> String {
    let mut output = format!("Family member: {}\n", member.name);
    output.push_str(&format!("  ID:             {}\n", member.id));

    match &member.budget {
        Budget::NoBudget => output.push_str("  Budget:         not set\n"),
        Budget::Active(envelope) => {
            output.push_str(&format!("  Total budget:   {}\n", envelope.starting_balance));
            output.push_str(&format!("  Timeframe:      {} days\n", envelope.timeframe_days));
            output.push_str(&format!("  Daily limit:    {}\n", envelope.daily_limit()));
            output.push_str(&format!(
                "  Started:        {}\n",
                envelope
                    .start_date
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
            ));
            output.push_str(&format!("  Spent:          {}\n", member.total_spent()));
            output.push_str(&format!("  Remaining:      {}\n", member.remaining_balance()));
        }
    }
    output.push_str(&format!("  Expenses:       {}\n", member.expenses.len()));

    output
}
