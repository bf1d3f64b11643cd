//! String helpers for LaTeX output and generated file names.

/// Separator line framing every generated section.
pub const SEPARATOR: &str =
    "%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%";

/// Makes free text from the database safe for LaTeX.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'β' | 'ß' => out.push_str("ss"),
            // dotless i carrying a combining acute accent
            'ı' if chars.next_if_eq(&'\u{301}').is_some() => out.push('i'),
            '_' => out.push_str("\\_"),
            '^' => out.push_str("\\^"),
            other => out.push(other),
        }
    }
    out
}

pub fn escape_underscore(text: &str) -> String {
    text.replace('_', "\\_")
}

pub fn escape_percent(text: &str) -> String {
    text.replace('%', "\\%")
}

/// Turns a database name into a file-name component.
pub fn file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            ' ' | '/' => out.push('_'),
            '%' => out.push_str("perct"),
            '.' => {}
            'Ü' => out.push_str("UE"),
            other => out.push(other),
        }
    }
    out
}

/// Formats a coefficient with nine fractional digits and a signed,
/// two-digit exponent, e.g. `1.500000000e-03`.
pub fn scientific(value: f64) -> String {
    let formatted = format!("{:.9e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// Formats a plain number, keeping one decimal for integral values.
pub fn number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Splits a CamelCase name into words: `SaturatedLiquidDensity` becomes
/// `Saturated Liquid Density`.
pub fn camel_words(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_replaces_special_characters() {
        assert_eq!(escape("Stra\u{df}e_1^2"), "Strasse\\_1\\^2");
        assert_eq!(escape("Bet\u{3b2}"), "Betss");
        assert_eq!(escape("Garc\u{131}\u{301}a"), "Garcia");
    }

    #[test]
    fn file_stem_is_path_safe() {
        assert_eq!(file_stem("silica gel/LiCl 10%"), "silica_gel_LiCl_10perct");
        assert_eq!(file_stem("R-134a"), "R-134a");
        assert_eq!(file_stem("Maxsorb III."), "Maxsorb_III");
        assert_eq!(file_stem("\u{dc}bersicht"), "UEbersicht");
    }

    #[test]
    fn scientific_matches_two_digit_exponent_form() {
        assert_eq!(scientific(1.5e-3), "1.500000000e-03");
        assert_eq!(scientific(4599200.0), "4.599200000e+06");
        assert_eq!(scientific(0.0), "0.000000000e+00");
        assert_eq!(scientific(-2.5e120), "-2.500000000e+120");
    }

    #[test]
    fn number_keeps_a_decimal_for_integral_values() {
        assert_eq!(number(300.0), "300.0");
        assert_eq!(number(273.15), "273.15");
    }

    #[test]
    fn camel_words_splits_on_capitals() {
        assert_eq!(camel_words("SaturatedLiquidDensity"), "Saturated Liquid Density");
        assert_eq!(camel_words("VaporPressure"), "Vapor Pressure");
    }

    #[test]
    fn separator_has_79_characters() {
        assert_eq!(SEPARATOR.len(), 79);
        assert!(SEPARATOR.chars().all(|c| c == '%'));
    }
}
