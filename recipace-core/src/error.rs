use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("Failed to read parameter file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid parameter definitions: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Parameter {0} has no options")]
    NoOptions(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid option {value:?} for parameter {name}")]
    InvalidOption { name: String, value: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write document archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),
}
