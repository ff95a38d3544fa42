use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use expense_tracker::{
    DEFAULT_CURRENCY_SYMBOL, ExpenseId, ExpenseRequest, ExpenseTracker, LocalStore,
};

/// Record and review expenses kept in a local JSON file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON file holding the expenses.
    #[arg(long, default_value = "expenses.json")]
    store: PathBuf,

    /// The symbol printed in front of amounts, e.g. "$" or "₹".
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the expenses, category totals, grand total and suggestions.
    Show,

    /// Record a new expense.
    Add {
        /// How much money was spent.
        #[arg(long)]
        amount: String,

        /// A short label such as "food" or "transport".
        #[arg(long)]
        category: String,

        /// What the money was spent on.
        #[arg(long)]
        description: String,

        /// When the money was spent as YYYY-MM-DD. Defaults to today (UTC).
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete the expense with the given ID.
    Delete {
        /// The ID shown next to the expense by `show`.
        id: ExpenseId,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut tracker = ExpenseTracker::load(LocalStore::open(&args.store)?)?;

    match args.command.unwrap_or(Command::Show) {
        Command::Show => {}
        Command::Add {
            amount,
            category,
            description,
            date,
        } => {
            let date = date.unwrap_or_else(|| OffsetDateTime::now_utc().date().to_string());
            let new_expense =
                ExpenseRequest::from_text(&amount, &category, &description, &date).validate()?;
            let expense = tracker.add(new_expense)?;

            match expense.id {
                Some(id) => println!("Added expense #{id}.\n"),
                None => println!("Added expense.\n"),
            }
        }
        Command::Delete { id } => match tracker.remove(id)? {
            0 => println!("No expense with ID {id}.\n"),
            _ => println!("Deleted expense #{id}.\n"),
        },
    }

    print!("{}", tracker.render().to_text(&args.currency_symbol));

    Ok(())
}
