use thiserror::Error;

/// Errors raised while loading, rendering or exporting claims.
///
/// Per-cell problems (an unparsable date, an error cell in the workbook) are
/// never reported here; they degrade to empty values during loading.
#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook '{path}': {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to parse CSV '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("workbook '{0}' has no worksheets")]
    NoWorksheet(String),

    #[error("'{0}' has no header row")]
    EmptySheet(String),

    #[error("required column '{0}' not found in header row")]
    MissingColumn(String),

    #[error("unsupported file extension: {0}")]
    UnsupportedFormat(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("export failed: {0}")]
    Export(String),
}
