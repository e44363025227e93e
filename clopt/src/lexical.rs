//! Literal grammars for option values.
//!
//! These predicates decide what the parser accepts. Numeric conversion only
//! runs after a predicate has said yes, so a conversion failure can only
//! mean overflow. Trailing blanks are ignored everywhere.

fn trimmed(s: &str) -> &str {
    s.trim_end_matches(' ')
}

/// Number of ASCII digits at the start of `bytes`.
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn skip_sign(bytes: &[u8]) -> &[u8] {
    match bytes.first() {
        Some(b'+') | Some(b'-') => &bytes[1..],
        _ => bytes,
    }
}

/// Is `s` one of `T`, `F`, `TRUE`, `FALSE`, `.TRUE.`, `.FALSE.` (any case)?
pub fn is_logical(s: &str) -> bool {
    parse_logical(s).is_some()
}

/// Value of a logical literal, `None` if `s` is not one.
pub fn parse_logical(s: &str) -> Option<bool> {
    let s = trimmed(s);
    const TRUE: [&str; 3] = ["T", "TRUE", ".TRUE."];
    const FALSE: [&str; 3] = ["F", "FALSE", ".FALSE."];
    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(s)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(s)) {
        Some(false)
    } else {
        None
    }
}

/// Optional sign followed by one or more decimal digits.
pub fn is_integer(s: &str) -> bool {
    let digits = skip_sign(trimmed(s).as_bytes());
    !digits.is_empty() && digit_run(digits) == digits.len()
}

/// `[+-]? (D+ | D* '.' D+ | D+ '.' D*) ([Ee] [+-]? D+)?`
pub fn is_real(s: &str) -> bool {
    let mut rest = skip_sign(trimmed(s).as_bytes());

    let int_digits = digit_run(rest);
    rest = &rest[int_digits..];

    let mut frac_digits = 0;
    if rest.first() == Some(&b'.') {
        rest = &rest[1..];
        frac_digits = digit_run(rest);
        rest = &rest[frac_digits..];
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if let Some(b'E') | Some(b'e') = rest.first() {
        let exponent = skip_sign(&rest[1..]);
        let exp_digits = digit_run(exponent);
        return exp_digits > 0 && exp_digits == exponent.len();
    }
    rest.is_empty()
}

/// Convert an accepted integer literal. `None` means overflow.
pub(crate) fn to_integer(s: &str) -> Option<i64> {
    trimmed(s).parse().ok()
}

/// Convert an accepted real literal. `None` means the value is not finite.
pub(crate) fn to_real(s: &str) -> Option<f64> {
    trimmed(s).parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_literals() {
        for s in ["T", "t", "TRUE", "True", ".TRUE.", ".true.", "T  "] {
            assert_eq!(parse_logical(s), Some(true), "{s:?}");
        }
        for s in ["F", "f", "FALSE", "false", ".FALSE.", ".False."] {
            assert_eq!(parse_logical(s), Some(false), "{s:?}");
        }
        for s in ["", "yes", "1", "0", ".T.", "TRUE.", " T", "truee"] {
            assert!(!is_logical(s), "{s:?}");
        }
    }

    #[test]
    fn integer_literals() {
        for s in ["0", "42", "+7", "-13", "007", "12   "] {
            assert!(is_integer(s), "{s:?}");
        }
        for s in ["", "+", "-", "1.0", "1e3", "--1", "+-1", " 1", "1 2", "0x10", "١"] {
            assert!(!is_integer(s), "{s:?}");
        }
    }

    #[test]
    fn real_literals() {
        for s in [
            "1", "-1", "+1", "1.", ".5", "-.5", "3.25", "1e5", "1E+5", "2.5e-3", ".5E1", "7.e2",
            "3.5  ",
        ] {
            assert!(is_real(s), "{s:?}");
        }
        for s in [
            "", ".", "-", "+.", "e5", ".e5", "1e", "1e+", "1.2.3", "1e5.0", "--1", "1,5", "inf",
            "NaN", " 1",
        ] {
            assert!(!is_real(s), "{s:?}");
        }
    }

    #[test]
    fn every_integer_is_a_real() {
        for s in ["0", "-42", "+9000"] {
            assert!(is_integer(s) && is_real(s));
        }
    }

    #[test]
    fn accepted_literals_convert() {
        assert_eq!(to_integer("-13"), Some(-13));
        assert_eq!(to_integer("+7  "), Some(7));
        assert_eq!(to_real("7.e2"), Some(700.0));
        assert_eq!(to_real(".5"), Some(0.5));
        assert_eq!(to_real("+2.5e-3"), Some(0.0025));
    }

    #[test]
    fn conversion_reports_overflow() {
        let huge = "9".repeat(40);
        assert!(is_integer(&huge));
        assert_eq!(to_integer(&huge), None);
        assert!(is_real("1e999"));
        assert_eq!(to_real("1e999"), None);
    }

    #[test]
    fn integer_rendering_round_trips() {
        for s in ["0", "-5", "123456789", "+77"] {
            let v = to_integer(s).unwrap();
            assert_eq!(to_integer(&v.to_string()), Some(v));
        }
    }
}
