use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmiCalcError {
    #[error("Invalid loan specification ({field}): {reason}")]
    InvalidLoanSpecification { field: String, reason: String },

    #[error("Unknown bank reference '{reference}' (known: {})", known.join(", "))]
    UnknownBankReference { reference: String, known: Vec<String> },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EmiCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        EmiCalcError::InvalidLoanSpecification {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EmiCalcError {
    fn from(e: serde_json::Error) -> Self {
        EmiCalcError::SerializationError(e.to_string())
    }
}
