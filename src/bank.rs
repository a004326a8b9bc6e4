use std::fs;
use std::path::Path;

use crate::element::{Element, Field};
use crate::table::{Table, TableError, TableFormat};

/// Accepted header spellings for the name column, compared after trim + lowercase.
pub const NAME_CANDIDATES: &[&str] = &["name", "中文", "名稱", "chinese", "cn"];
/// Accepted header spellings for the English column.
pub const ENGLISH_CANDIDATES: &[&str] = &["english", "英文", "term", "英文名", "en", "english term"];
/// Accepted header spellings for the symbol column.
pub const SYMBOL_CANDIDATES: &[&str] = &[
    "symbol",
    "符號",
    "元素符號",
    "符號symbol",
    "abbrev",
    "代號",
    "符號/代號",
];

pub fn candidates_for(field: Field) -> &'static [&'static str] {
    match field {
        Field::Name => NAME_CANDIDATES,
        Field::English => ENGLISH_CANDIDATES,
        Field::Symbol => SYMBOL_CANDIDATES,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BankLoadError {
    #[error("failed to read question bank at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse question bank at {path}: {source}")]
    ParseError { path: String, source: TableError },
    #[error("unsupported question bank format at {path} (expected .json, .csv or .tsv)")]
    UnsupportedFormat { path: String },
    #[error("{}", missing_columns_message(.columns, .missing))]
    MissingColumns {
        columns: Vec<String>,
        missing: Vec<Field>,
    },
    #[error("question bank is empty after dropping incomplete rows (columns: {columns:?})")]
    Empty { columns: Vec<String> },
}

impl PartialEq for BankLoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ReadError { path: left, .. }, Self::ReadError { path: right, .. }) => {
                left == right
            }
            (
                Self::ParseError {
                    path: left,
                    source: left_source,
                },
                Self::ParseError {
                    path: right,
                    source: right_source,
                },
            ) => left == right && left_source == right_source,
            (Self::UnsupportedFormat { path: left }, Self::UnsupportedFormat { path: right }) => {
                left == right
            }
            (
                Self::MissingColumns {
                    columns: left_columns,
                    missing: left_missing,
                },
                Self::MissingColumns {
                    columns: right_columns,
                    missing: right_missing,
                },
            ) => left_columns == right_columns && left_missing == right_missing,
            (Self::Empty { columns: left }, Self::Empty { columns: right }) => left == right,
            _ => false,
        }
    }
}

impl Eq for BankLoadError {}

fn missing_columns_message(columns: &[String], missing: &[Field]) -> String {
    let missing: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    let mut lines = vec![
        format!("required columns not found: {}", missing.join(", ")),
        format!("columns in file: {:?}", columns),
    ];
    for field in Field::ALL {
        lines.push(format!("{} column candidates: {:?}", field, candidates_for(field)));
    }
    lines.push("rename the headers to one of the candidates (e.g. Name / English / Symbol)".to_string());
    lines.join("\n")
}

/// Column positions resolved for each required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub name: usize,
    pub english: usize,
    pub symbol: usize,
}

impl ColumnMapping {
    /// Matches headers against the candidate lists; earlier candidates take priority.
    pub fn resolve(columns: &[String]) -> Result<Self, BankLoadError> {
        let normalized: Vec<String> = columns
            .iter()
            .map(|column| column.trim().to_lowercase())
            .collect();

        let pick = |field: Field| {
            candidates_for(field)
                .iter()
                .find_map(|candidate| normalized.iter().position(|column| column == candidate))
        };

        match (pick(Field::Name), pick(Field::English), pick(Field::Symbol)) {
            (Some(name), Some(english), Some(symbol)) => Ok(Self {
                name,
                english,
                symbol,
            }),
            (name, english, symbol) => {
                let missing = [
                    (Field::Name, name),
                    (Field::English, english),
                    (Field::Symbol, symbol),
                ]
                .into_iter()
                .filter(|(_, position)| position.is_none())
                .map(|(field, _)| field)
                .collect();

                Err(BankLoadError::MissingColumns {
                    columns: columns.to_vec(),
                    missing,
                })
            }
        }
    }
}

/// Immutable list of element records questions are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    elements: Vec<Element>,
    columns: Vec<String>,
}

impl QuestionBank {
    /// Wraps already validated records, e.g. the built-in demo set.
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            columns: Field::ALL.iter().map(|field| field.label().to_string()).collect(),
        }
    }

    /// Loads a `.json`, `.csv` or `.tsv` file.
    ///
    /// # Errors
    /// Any [`BankLoadError`] is fatal: callers must not start a quiz without a bank.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let format = path
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(TableFormat::from_extension)
            .ok_or_else(|| BankLoadError::UnsupportedFormat {
                path: display.clone(),
            })?;

        let text = fs::read_to_string(path).map_err(|source| BankLoadError::ReadError {
            path: display.clone(),
            source,
        })?;

        let table = Table::parse(&text, format).map_err(|source| BankLoadError::ParseError {
            path: display.clone(),
            source,
        })?;

        let bank = Self::from_table(table)?;
        log::info!(
            "loaded {} elements from {} (columns: {:?})",
            bank.len(),
            display,
            bank.columns
        );
        Ok(bank)
    }

    /// Maps columns and keeps only rows with all three fields present.
    pub fn from_table(table: Table) -> Result<Self, BankLoadError> {
        let mapping = ColumnMapping::resolve(&table.columns)?;

        let mut elements = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;

        for row in 0..table.rows.len() {
            match Element::new(
                table.cell(row, mapping.name),
                table.cell(row, mapping.english),
                table.cell(row, mapping.symbol),
            ) {
                Ok(element) => elements.push(element),
                Err(error) => {
                    dropped += 1;
                    log::debug!("dropping row {}: {}", row + 1, error);
                }
            }
        }

        if dropped > 0 {
            log::debug!("dropped {} incomplete rows", dropped);
        }

        if elements.is_empty() {
            return Err(BankLoadError::Empty {
                columns: table.columns,
            });
        }

        Ok(Self {
            elements,
            columns: table.columns,
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Header names as they appeared in the source file.
    pub fn raw_columns(&self) -> &[String] {
        &self.columns
    }

    /// Finds the record an option string came from, matching any field case-insensitively.
    pub fn find_by_any_field(&self, value: &str) -> Option<&Element> {
        let needle = value.trim().to_lowercase();
        self.elements.iter().find(|element| {
            Field::ALL
                .iter()
                .any(|field| element.field(*field).to_lowercase() == needle)
        })
    }

    /// `English (Symbol / Name)` for a known option, or the option itself.
    pub fn describe_option(&self, option: &str) -> String {
        self.find_by_any_field(option)
            .map(Element::review_label)
            .unwrap_or_else(|| option.trim().to_string())
    }
}
