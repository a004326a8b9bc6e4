//! Raw tabular input: a header row plus string cells, before any column matching.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported JSON layout: {0}")]
    JsonLayout(&'static str),
    #[error("invalid delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("file has no header row")]
    MissingHeader,
}

impl PartialEq for TableError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Json(_), Self::Json(_)) => true,
            (Self::JsonLayout(left), Self::JsonLayout(right)) => left == right,
            (Self::Csv(_), Self::Csv(_)) => true,
            (Self::MissingHeader, Self::MissingHeader) => true,
            _ => false,
        }
    }
}

impl Eq for TableError {}

/// Supported on-disk layouts, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    /// Field delimiter byte, `b','` or `b'\t'`.
    Delimited(u8),
}

impl TableFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Delimited(b',')),
            "tsv" | "tab" => Some(Self::Delimited(b'\t')),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    /// Every row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn parse(text: &str, format: TableFormat) -> Result<Self, TableError> {
        match format {
            TableFormat::Json => Self::from_json_str(text),
            TableFormat::Delimited(delimiter) => Self::from_delimited_str(text, delimiter),
        }
    }

    /// Accepts either an array of row objects or `{"columns": [...], "rows": [[...]]}`.
    pub fn from_json_str(text: &str) -> Result<Self, TableError> {
        let value: Value = serde_json::from_str(text)?;

        match value {
            Value::Array(records) => from_records(records),
            Value::Object(mut object) => {
                let columns = match object.remove("columns") {
                    Some(Value::Array(columns)) => columns.iter().map(cell_text).collect(),
                    _ => return Err(TableError::JsonLayout("missing \"columns\" array")),
                };
                let rows = match object.remove("rows") {
                    Some(Value::Array(rows)) => rows,
                    _ => return Err(TableError::JsonLayout("missing \"rows\" array")),
                };
                from_columns_and_rows(columns, rows)
            }
            _ => Err(TableError::JsonLayout(
                "expected an array of rows or an object with columns and rows",
            )),
        }
    }

    /// Header record first; blank records are skipped and short rows are padded.
    pub fn from_delimited_str(text: &str, delimiter: u8) -> Result<Self, TableError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if columns.iter().all(|column| column.trim().is_empty()) {
            return Err(TableError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cells = record.iter().map(str::to_string).collect();
            rows.push(fit_width(cells, columns.len()));
        }

        Ok(Self { columns, rows })
    }

    /// Cell at `row`/`column`, empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn from_records(records: Vec<Value>) -> Result<Table, TableError> {
    let mut columns: Vec<String> = Vec::new();

    for record in &records {
        let Value::Object(object) = record else {
            return Err(TableError::JsonLayout("every row must be an object"));
        };
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Table { columns, rows })
}

fn from_columns_and_rows(columns: Vec<String>, rows: Vec<Value>) -> Result<Table, TableError> {
    let mut parsed = Vec::with_capacity(rows.len());

    for row in rows {
        let Value::Array(cells) = row else {
            return Err(TableError::JsonLayout("every row must be an array of cells"));
        };
        let cells = cells.iter().map(cell_text).collect();
        parsed.push(fit_width(cells, columns.len()));
    }

    Ok(Table {
        columns,
        rows: parsed,
    })
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

fn fit_width(mut cells: Vec<String>, width: usize) -> Vec<String> {
    cells.resize(width, String::new());
    cells
}
