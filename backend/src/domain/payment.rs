//! Tender amount parsing for the payment inputs.

use shared::{PaymentBreakdown, PaymentMethod};

use crate::domain::errors::ValidationError;

/// Parse a typed tender amount.
///
/// Blank or unparseable text becomes 0. A leading number followed by junk
/// (`"120abc"`) keeps the number, the way lenient float inputs behave.
/// Non-finite results become 0.
pub fn parse_tender_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| numeric_prefix(trimmed).parse::<f64>().ok())
        .unwrap_or(0.0);

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Longest prefix of the form `[+-]digits[.digits][(e|E)[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let skip_digits = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mantissa_start = end;
    end = skip_digits(end);
    if end < bytes.len() && bytes[end] == b'.' {
        end = skip_digits(end + 1);
    }

    // An exponent only counts after a mantissa digit and with digits of its own
    let has_mantissa = bytes[mantissa_start..end].iter().any(u8::is_ascii_digit);
    if has_mantissa && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_end = skip_digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Reject negative tenders before anything is sent
pub fn validate_payment(payment: &PaymentBreakdown) -> Result<(), ValidationError> {
    for method in PaymentMethod::ALL {
        if payment.get(method) < 0.0 {
            return Err(ValidationError::NegativeTender(method));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tender_amount() {
        assert_eq!(parse_tender_amount("250"), 250.0);
        assert_eq!(parse_tender_amount(" 99.5 "), 99.5);
        assert_eq!(parse_tender_amount(""), 0.0);
        assert_eq!(parse_tender_amount("abc"), 0.0);
        assert_eq!(parse_tender_amount("120abc"), 120.0);
        assert_eq!(parse_tender_amount(".5"), 0.5);
        assert_eq!(parse_tender_amount("-40"), -40.0);
        assert_eq!(parse_tender_amount("inf"), 0.0);
        assert_eq!(parse_tender_amount("NaN"), 0.0);
    }

    #[test]
    fn test_exponent_prefix_kept() {
        assert_eq!(parse_tender_amount("1e3abc"), 1000.0);
        assert_eq!(parse_tender_amount("2.5E-1 rupees"), 0.25);
        assert_eq!(parse_tender_amount("4e+2x"), 400.0);
        assert_eq!(parse_tender_amount("7e"), 7.0);
        assert_eq!(parse_tender_amount("7e-"), 7.0);
        assert_eq!(parse_tender_amount("e5"), 0.0);
        assert_eq!(parse_tender_amount("1e999x"), 0.0);
    }

    #[test]
    fn test_negative_tender_rejected() {
        let mut payment = PaymentBreakdown::default();
        assert_eq!(validate_payment(&payment), Ok(()));

        payment.gpay = -1.0;
        assert_eq!(
            validate_payment(&payment),
            Err(ValidationError::NegativeTender(PaymentMethod::Gpay))
        );
    }
}
