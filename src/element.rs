use std::fmt;

/// One of the three columns every element record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Local-language name, e.g. `氫`.
    Name,
    /// English term. Doubles as the record's identity key.
    English,
    /// Chemical symbol, e.g. `H`.
    Symbol,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::English, Field::Symbol];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::English => "English",
            Field::Symbol => "Symbol",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ElementError {
    #[error("{0} must not be empty")]
    EmptyField(Field),
}

/// A validated element record. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Element {
    name: String,
    english: String,
    symbol: String,
}

impl Element {
    /// Builds a record from raw cell text, trimming every field.
    ///
    /// # Errors
    /// Returns [`ElementError::EmptyField`] for the first field that is blank after trimming.
    pub fn new(
        name: impl AsRef<str>,
        english: impl AsRef<str>,
        symbol: impl AsRef<str>,
    ) -> Result<Self, ElementError> {
        let name = required(name.as_ref(), Field::Name)?;
        let english = required(english.as_ref(), Field::English)?;
        let symbol = required(symbol.as_ref(), Field::Symbol)?;

        Ok(Self {
            name,
            english,
            symbol,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::English => &self.english,
            Field::Symbol => &self.symbol,
        }
    }

    /// Key used to track which records were already asked.
    pub fn key(&self) -> &str {
        &self.english
    }

    /// `English (Symbol / Name)`, the form used when reviewing offered options.
    pub fn review_label(&self) -> String {
        format!("{} ({} / {})", self.english, self.symbol, self.name)
    }
}

fn required(value: &str, field: Field) -> Result<String, ElementError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ElementError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.name, self.english, self.symbol)
    }
}
