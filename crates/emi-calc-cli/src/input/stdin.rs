use emi_calc_core::LoanSpecification;
use std::io::{self, Read};

/// Loan specification piped on stdin, or None when stdin is a terminal or empty.
pub fn read_spec() -> Result<Option<LoanSpecification>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_spec(&buffer)
}

fn parse_spec(piped: &str) -> Result<Option<LoanSpecification>, Box<dyn std::error::Error>> {
    let trimmed = piped.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let spec = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse loan specification from stdin: {e}"))?;
    log::debug!("read loan specification from stdin");
    Ok(Some(spec))
}
