//! CLI tool to add and list employees in a file-backed roster.
//!
//! Usage:
//!   hrnet add --first-name Ada --last-name Lovelace ... --state CA
//!   hrnet list [--search TEXT] [--sort COLUMN] [--desc] [--page N]
//!   hrnet states
//!
//! The collection is stored as `<data-dir>/<storage_key>.json`.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use hrnet::{
    AppConfig, COLUMNS, DurableRoster, EmployeeForm, Field, FileStorage, Roster, STATES,
    SortDirection, TablePage, TableQuery, load_config,
};
use tracing_subscriber::EnvFilter;

/// Add and list employees.
#[derive(Parser)]
#[command(name = "hrnet")]
struct Cli {
    /// Directory holding the stored collection
    #[arg(long, default_value = ".hrnet")]
    data_dir: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log storage activity on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create one employee
    Add(AddArgs),
    /// Show stored employees as a table
    List(ListArgs),
    /// Show the selectable state codes
    States,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    date_of_birth: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    start_date: String,
    /// Sales, Marketing, Engineering or HR
    #[arg(long)]
    department: String,
    #[arg(long)]
    street: String,
    #[arg(long)]
    city: String,
    /// Two-letter code (see `hrnet states`)
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
}

impl AddArgs {
    fn values(&self) -> [(Field, &str); 9] {
        [
            (Field::FirstName, self.first_name.as_str()),
            (Field::LastName, self.last_name.as_str()),
            (Field::DateOfBirth, self.date_of_birth.as_str()),
            (Field::StartDate, self.start_date.as_str()),
            (Field::Department, self.department.as_str()),
            (Field::Street, self.street.as_str()),
            (Field::City, self.city.as_str()),
            (Field::State, self.state.as_str()),
            (Field::ZipCode, self.zip_code.as_str()),
        ]
    }
}

#[derive(Args)]
struct ListArgs {
    /// Only rows containing every word
    #[arg(short, long)]
    search: Option<String>,

    /// Column to sort by (title or key, e.g. "last-name")
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page (10, 25, 50 or 100)
    #[arg(long)]
    page_size: Option<usize>,
}

/// Log filter used when `RUST_LOG` is unset.
fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    let storage = FileStorage::new(&cli.data_dir);
    let mut roster = DurableRoster::new(storage, config.storage_key.as_str());

    match cli.command {
        Command::Add(args) => add(&args, &config, &mut roster),
        Command::List(args) => list(&args, &config, &roster),
        Command::States => {
            for s in STATES {
                println!("{}  {}", s.abbreviation, s.name);
            }
        }
    }
}

fn add(args: &AddArgs, config: &AppConfig, roster: &mut DurableRoster<FileStorage>) {
    let mut form = EmployeeForm::new(config.dates_required);
    for (field, value) in args.values() {
        form.edit(field, value);
    }
    match form.submit(roster) {
        Ok(employee) => {
            println!(
                "Saved employee {} {} (id {})",
                employee.first_name,
                employee.last_name,
                employee.id.unwrap_or_default()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn list(args: &ListArgs, config: &AppConfig, roster: &DurableRoster<FileStorage>) {
    let mut query = TableQuery::new(args.page_size.unwrap_or(config.page_size));
    if let Some(search) = &args.search {
        query.set_search(search.as_str());
    }
    if let Some(name) = &args.sort {
        let Some(column) = hrnet::table::column_index(name) else {
            eprintln!("Error: unknown column '{name}'");
            process::exit(1);
        };
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        query.set_sort(column, direction);
    }
    query.set_page(args.page.saturating_sub(1));

    let page = query.project(&roster.records());
    if page.total == 0 {
        println!("No employees found.");
        return;
    }
    print_table(&page);
    println!();
    println!("{} (page {} of {})", page.summary(), page.page + 1, page.page_count);
}

fn print_table(page: &TablePage) {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.title.len()).collect();
    for row in &page.rows {
        for (w, cell) in widths.iter_mut().zip(&row.cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(COLUMNS.iter().map(|c| c.title).collect()));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in &page.rows {
        println!("{}", line(row.cells.iter().map(String::as_str).collect()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_shows_published_events() {
        assert_eq!(default_level(false), "info");
        assert_eq!(default_level(true), "debug");
    }

    #[test]
    fn test_verbose_flag_parses() {
        let cli = Cli::try_parse_from(["hrnet", "--verbose", "states"]).unwrap();
        assert!(cli.verbose);
    }
}
