//! Human readable rendering of rates.
//!
//! Numbers are printed the way Venezuelan quotes are usually written: `.`
//! between groups of thousands and `,` before the decimals.

/// Separator pair used when rendering a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Separators {
    pub group: char,
    pub decimal: char,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            group: '.',
            decimal: ',',
        }
    }
}

/// Renders `v` with the default separators, e.g. `1234567.89` as `1.234.567,89`.
pub fn dotf(v: f64) -> String {
    format_with(v, Separators::default())
}

/// Renders `v` grouping the integer digits in threes.
///
/// The digits are those of the shortest representation that round-trips to
/// `v`; nothing is rounded or padded.
pub fn format_with(v: f64, sep: Separators) -> String {
    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    let v = v.abs();
    if !v.is_finite() {
        out.push_str(&v.to_string());
        return out;
    }

    let rendered = v.to_string();
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut pos = int_part.len() % 3;
    if pos != 0 {
        out.push_str(&int_part[..pos]);
    }
    while pos < int_part.len() {
        if pos != 0 {
            out.push(sep.group);
        }
        out.push_str(&int_part[pos..pos + 3]);
        pos += 3;
    }

    if let Some(frac_part) = frac_part {
        out.push(sep.decimal);
        out.push_str(frac_part);
    }
    out
}
