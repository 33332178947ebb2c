//! Family member CLI commands

use clap::Subcommand;

use crate::display::{format_member_details, format_member_list};
use crate::error::BudgetResult;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Add a family member and select them
    Add {
        /// Member name
        name: String,
    },

    /// List family members (* marks the selected one)
    #[command(alias = "ls")]
    List,

    /// Select the member that later commands act on
    Select {
        /// Member name or ID
        member: String,
    },

    /// Show the selected member's budget details
    Show,
}

/// Handle a member command
pub fn handle_member_command(storage: &mut Storage, cmd: MemberCommands) -> BudgetResult<()> {
    let mut service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name } => {
            let member = service.add(&name)?;
            println!("Added family member: {} ({})", member.name, member.id.short());
            println!("{} is now selected.", member.name);
        }

        MemberCommands::List => {
            let current = service.current().ok().map(|m| m.id.clone());
            print!("{}", format_member_list(service.list(), current.as_ref()));
        }

        MemberCommands::Select { member } => {
            let member = service.select(&member)?;
            println!("Selected: {}", member.name);
            println!("  Budget: {}", member.budget);
        }

        MemberCommands::Show => {
            print!("{}", format_member_details(service.current()?));
        }
    }

    Ok(())
}
