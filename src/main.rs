use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use terp_sheet::config::PAGE_SIZE;
use terp_sheet::normalize::HEADER_SCAN_ROWS;
use terp_sheet::schema::ColumnValue;
use terp_sheet::Board;
use terp_sheet::Category;
use terp_sheet::Column;
use terp_sheet::Config;
use terp_sheet::Criteria;
use terp_sheet::Direction;
use terp_sheet::Row;
use terp_sheet::Status;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terp_sheet", about = "Browse cannabis lab results from an .xlsx or .ods export")]
struct Cli {
    /// Workbook to load
    file: PathBuf,

    /// Category to show (Flower, Vape, Concentrate)
    #[arg(short, long, default_value = "Flower")]
    category: Category,

    /// Only products whose name contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Column to sort by, e.g. "THC", "Total Terpenes" or a terpene name
    #[arg(long)]
    sort: Option<Column>,

    /// Sort high to low
    #[arg(long, requires = "sort", conflicts_with = "ascending")]
    descending: bool,

    /// Sort low to high
    #[arg(long, requires = "sort")]
    ascending: bool,

    /// Pages to print
    #[arg(short = 'n', long, default_value_t = 1, conflicts_with = "all")]
    pages: usize,

    /// Print every matching row
    #[arg(long)]
    all: bool,

    /// Rows per page
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,

    /// Leading rows searched for the column header
    #[arg(long, default_value_t = HEADER_SCAN_ROWS)]
    scan_rows: usize,

    /// Only read sheets matching this glob pattern (repeatable)
    #[arg(long = "sheet")]
    sheets: Vec<String>,

    /// Fail on error cells such as #DIV/0! instead of reading them as empty
    #[arg(long)]
    strict_errors: bool,

    /// Print rows as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let criteria = Criteria {
            error_as_null: !self.strict_errors,
            ..Criteria::default()
        }
        .with_sheet_patterns(self.sheets.as_slice())
        .context("Invalid sheet pattern")?;
        Ok(Config {
            criteria,
            header_scan_rows: self.scan_rows,
            page_size: self.page_size,
        })
    }

    fn direction(&self) -> Option<Direction> {
        if self.ascending {
            Some(Direction::Ascending)
        } else if self.descending {
            Some(Direction::Descending)
        } else {
            None
        }
    }
}

#[derive(Serialize)]
struct Output<'a> {
    status: Status,
    rows: Vec<&'a Row>,
    has_more: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let mut board = Board::new(cli.config()?);
    let bytes = std::fs::read(&cli.file).with_context(|| format!("Failed to read {}", cli.file.display()))?;
    board
        .load(bytes)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    board.select_category(cli.category);
    if let Some(search) = &cli.search {
        board.set_search(search);
    }
    if let Some(column) = cli.sort {
        board.sort_by(column);
        let current = board.spec().sort.map(|sort| sort.direction);
        if cli.direction().is_some() && cli.direction() != current {
            board.sort_by(column);
        }
    }

    let mut pages = 0;
    while board.view().has_more() && (cli.all || pages < cli.pages) {
        board.next_page();
        pages += 1;
    }

    let status = board.status();
    let rows: Vec<&Row> = board.view().visible().iter().map(|row| row.as_ref()).collect();
    if cli.json {
        let output = Output {
            status,
            rows,
            has_more: board.view().has_more(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", status);
        print_table(&board, &rows);
        if board.view().has_more() {
            println!("... {} more", board.view().len() - rows.len());
        }
    }
    Ok(())
}

fn print_table(board: &Board, rows: &[&Row]) {
    let columns = Column::all();
    let header: Vec<String> = columns
        .iter()
        .map(|column| match board.sort_indicator(*column) {
            Some(indicator) => format!("{} {}", column.label(), indicator),
            None => column.label().to_owned(),
        })
        .collect();
    println!("{}", header.join("\t"));
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| match row.value(*column) {
                ColumnValue::Text(text) => text.to_owned(),
                ColumnValue::Number(number) => fmt_pct(number),
            })
            .collect();
        println!("{}", cells.join("\t"));
    }
}

/// Two decimals and a percent sign; zero prints as nothing.
fn fmt_pct(number: f64) -> String {
    if number == 0.0 {
        String::new()
    } else {
        format!("{:.2}%", number)
    }
}
