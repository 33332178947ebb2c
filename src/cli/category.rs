//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::BudgetResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List expense categories
    #[command(alias = "ls")]
    List,

    /// Add an expense category
    Add {
        /// Category name
        name: String,
    },

    /// Write the category list to disk
    Save,
}

/// Handle a category command
pub fn handle_category_command(storage: &mut Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let mut service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => print!("{}", format_category_list(service.list())),

        CategoryCommands::Add { name } => {
            let name = service.add(&name)?;
            println!("Added category: {}", name);
        }

        CategoryCommands::Save => {
            service.save()?;
            println!("Saved {} categories.", service.list().len());
        }
    }

    Ok(())
}
