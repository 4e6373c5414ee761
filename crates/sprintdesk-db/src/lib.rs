pub mod codec;
pub mod table;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use sprintdesk_core::history::HistoryEntry;
use sprintdesk_core::request::Request;
use sprintdesk_core::sprint::Sprint;

pub use table::Table;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed file: {0}")]
    Csv(#[from] csv::Error),

    #[error("{table}, row {row}, column {column}: cannot decode {value:?}")]
    Decode {
        table: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// CSV-backed storage for the three tables. Every load reads the whole
/// file; every save rewrites it. No locking: concurrent writers race and
/// the last one wins.
#[derive(Debug, Clone)]
pub struct Db {
    dir: PathBuf,
}

impl Db {
    pub fn open(dir: &Path) -> Result<Self, DbError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn open_default() -> Result<Self, DbError> {
        Self::open(&default_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Load a table coerced to exactly `expected` columns. A missing file
    /// yields an empty table; a malformed file is an error.
    pub fn load_table(&self, name: &str, expected: &[&str]) -> Result<Table, DbError> {
        let path = self.path(name);
        let file = match std::fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{name}: no backing file, starting empty");
                return Ok(Table::empty(expected));
            }
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        let raw = Table { columns, rows };
        Ok(raw.conform(expected))
    }

    /// Overwrite the backing file with the table's full contents, rows in
    /// order.
    pub fn save_table(&self, table: &Table, name: &str) -> Result<(), DbError> {
        let path = self.path(name);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        debug!("{name}: wrote {} rows", table.rows.len());
        Ok(())
    }

    pub fn load_sprints(&self) -> Result<Vec<Sprint>, DbError> {
        let table = self.load_table(codec::SPRINTS_FILE, codec::SPRINT_COLUMNS)?;
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| codec::row_to_sprint(row, idx))
            .collect()
    }

    pub fn save_sprints(&self, sprints: &[Sprint]) -> Result<(), DbError> {
        let mut table = Table::empty(codec::SPRINT_COLUMNS);
        for sprint in sprints {
            table.push_row(codec::sprint_to_row(sprint));
        }
        self.save_table(&table, codec::SPRINTS_FILE)
    }

    pub fn load_requests(&self) -> Result<Vec<Request>, DbError> {
        let table = self.load_table(codec::REQUESTS_FILE, codec::REQUEST_COLUMNS)?;
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| codec::row_to_request(row, idx))
            .collect()
    }

    pub fn save_requests(&self, requests: &[Request]) -> Result<(), DbError> {
        let mut table = Table::empty(codec::REQUEST_COLUMNS);
        for request in requests {
            table.push_row(codec::request_to_row(request));
        }
        self.save_table(&table, codec::REQUESTS_FILE)
    }

    pub fn load_history(&self) -> Result<Vec<HistoryEntry>, DbError> {
        let table = self.load_table(codec::HISTORY_FILE, codec::HISTORY_COLUMNS)?;
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| codec::row_to_history(row, idx))
            .collect()
    }

    pub fn save_history(&self, history: &[HistoryEntry]) -> Result<(), DbError> {
        let mut table = Table::empty(codec::HISTORY_COLUMNS);
        for entry in history {
            table.push_row(codec::history_to_row(entry));
        }
        self.save_table(&table, codec::HISTORY_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("sprintdesk")
}
