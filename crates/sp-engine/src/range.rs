//! Number-range expressions ("1-5, 10, 15-18")

use std::collections::BTreeSet;

/// Parse a comma-separated list of numbers and inclusive `start-end` ranges.
///
/// Never fails. A single token that is not a number yields one `None`
/// entry; a range with an unparseable bound contributes nothing. Numbers
/// are read leniently from their leading digits, so `"3rd"` reads as 3.
/// No de-duplication is done.
pub fn parse_number_range(expr: &str) -> Vec<Option<i64>> {
    let mut result = Vec::new();

    for part in expr.split(',').map(str::trim) {
        if part.contains('-') {
            let mut bounds = part.split('-').map(parse_leading_int);
            let start = bounds.next().flatten();
            let end = bounds.next().flatten();
            if let (Some(start), Some(end)) = (start, end) {
                result.extend((start..=end).map(Some));
            }
        } else {
            result.push(parse_leading_int(part));
        }
    }

    result
}

/// Membership set of every valid positive number across `exprs`
pub fn number_set<I, S>(exprs: I) -> BTreeSet<u32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    exprs
        .into_iter()
        .flat_map(|expr| parse_number_range(expr.as_ref()))
        .flatten()
        .filter_map(|n| u32::try_from(n).ok())
        .collect()
}

/// Read an optionally signed integer from the leading digits of `s`
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
