//! Token parsing for the flux-mode text formats
//!
//! Pure functions with no I/O; readers in the `ltcs` crate feed them
//! individual lines.

use crate::LtcsError;

/// Split a line of numeric fields on tabs, spaces and line endings
pub fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(['\t', ' ', '\n', '\r']).filter(|s| !s.is_empty())
}

/// Split a line of reaction names; double quotes also separate fields
pub fn split_names(line: &str) -> impl Iterator<Item = &str> {
    line.split(['"', '\t', ' ', '\n', '\r'])
        .filter(|s| !s.is_empty())
}

/// Parse one flux value
pub fn parse_flux(token: &str) -> Result<f64, LtcsError> {
    token.parse::<f64>().map_err(|_| LtcsError::InvalidToken)
}

/// Parse a reversibility flag: `1` reversible, `0` irreversible
pub fn parse_reversibility_flag(token: &str) -> Result<bool, LtcsError> {
    match token {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(LtcsError::InvalidToken),
    }
}

/// Parse a `yes`/`no` switch (case-insensitive)
pub fn parse_switch(value: &str) -> Result<bool, LtcsError> {
    if value.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(LtcsError::InvalidSwitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_split_fields() {
        let fields: Vec<&str> = split_fields("0.4\t0  -0.24\r\n").collect();
        assert_eq!(fields, vec!["0.4", "0", "-0.24"]);
        assert_eq!(split_fields("   \n").count(), 0);
    }

    #[test]
    fn test_split_names() {
        let names: Vec<&str> = split_names("\"R1\" \"R_2\"\t\"EX_glc\"\n").collect();
        assert_eq!(names, vec!["R1", "R_2", "EX_glc"]);
    }

    #[test]
    fn test_parse_flux() {
        assert_eq!(parse_flux("0.5"), Ok(0.5));
        assert_eq!(parse_flux("-1e-3"), Ok(-1e-3));
        assert_eq!(parse_flux("abc"), Err(LtcsError::InvalidToken));
    }

    #[test]
    fn test_parse_reversibility_flag() {
        assert_eq!(parse_reversibility_flag("1"), Ok(true));
        assert_eq!(parse_reversibility_flag("0"), Ok(false));
        assert_eq!(parse_reversibility_flag("2"), Err(LtcsError::InvalidToken));
        assert_eq!(parse_reversibility_flag(""), Err(LtcsError::InvalidToken));
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("yes"), Ok(true));
        assert_eq!(parse_switch("NO"), Ok(false));
        assert_eq!(parse_switch("maybe"), Err(LtcsError::InvalidSwitch));
    }
}
