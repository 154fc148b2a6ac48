//! Multiplicity bound parsing and check 6 (spec §4.5): bounds are parsed
//! honoring hex/bin/oct/decimal bases and the `*` (unbounded) sentinel,
//! sharing the same base-prefix convention as the lexer's integer literals
//! (`lexer::Lexer::scan_number`) rather than a separate parsing scheme.

use crate::ast::MultiplicityBounds;
use crate::parser::ErrorCode;

use super::{error, Diagnostic};

/// Parses one bound lexeme to its integer value. `None` only for malformed
/// text the parser's own recovery already flagged (an empty string from a
/// failed `parse_bound`) — never for well-formed input. The `-` prefix is
/// accepted for robustness though the current grammar never lexes a signed
/// bound literal.
pub fn parse_bound_value(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if rest.is_empty() {
        return None;
    }
    let value = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()?
    } else if let Some(oct) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        i64::from_str_radix(oct, 8).ok()?
    } else {
        rest.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}

pub(super) fn check_bounds(mb: &MultiplicityBounds, diags: &mut Vec<Diagnostic>) {
    let lower_text = mb.lower.as_deref().unwrap_or("0");
    let lower_span = mb.lower_span.unwrap_or(mb.upper_span);
    let Some(lower) = parse_bound_value(lower_text) else {
        return;
    };

    if lower < 0 {
        diags.push(
            error(format!("Multiplicity lower bound ({lower}) cannot be negative"), lower_span)
                .with_code(ErrorCode::NegativeLowerBound),
        );
    }

    if mb.upper == "*" {
        return;
    }
    let Some(upper) = parse_bound_value(&mb.upper) else {
        return;
    };
    if lower > upper {
        diags.push(
            error(
                format!("Lower bound ({lower}) cannot be greater than upper bound ({upper})"),
                lower_span.to(mb.upper_span),
            )
            .with_code(ErrorCode::MultiplicityBoundsInverted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_base() {
        assert_eq!(parse_bound_value("10"), Some(10));
        assert_eq!(parse_bound_value("0x1F"), Some(31));
        assert_eq!(parse_bound_value("0b101"), Some(5));
        assert_eq!(parse_bound_value("0o17"), Some(15));
    }

    #[test]
    fn rejects_empty_text() {
        assert_eq!(parse_bound_value(""), None);
    }
}
