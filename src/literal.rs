//! Go literal helpers: string quoting, tag unquoting and duration defaults.

/// Quotes text as a Go interpreted string literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && u32::from(c) <= 0xFFFF => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c if c.is_control() => out.push_str(&format!("\\U{:08x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decodes the body of a Go string literal, either raw (backquoted) or
/// interpreted (double-quoted). Returns `None` for malformed literals.
pub fn unquote(literal: &str) -> Option<String> {
    if let Some(body) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        // Carriage returns are discarded from raw strings.
        return Some(body.replace('\r', ""));
    }

    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = match chars.next()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            '\\' => '\\',
            '"' => '"',
            'x' => char::from(u8::from_str_radix(&take(&mut chars, 2)?, 16).ok()?),
            'u' => char::from_u32(u32::from_str_radix(&take(&mut chars, 4)?, 16).ok()?)?,
            'U' => char::from_u32(u32::from_str_radix(&take(&mut chars, 8)?, 16).ok()?)?,
            first @ '0'..='7' => {
                let rest = take(&mut chars, 2)?;
                let value = u32::from_str_radix(&format!("{first}{rest}"), 8).ok()?;
                char::from(u8::try_from(value).ok()?)
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

fn take(chars: &mut std::str::Chars<'_>, count: usize) -> Option<String> {
    let taken: String = chars.by_ref().take(count).collect();
    (taken.chars().count() == count).then_some(taken)
}

struct DurationUnit {
    suffix: &'static str,
    nanos: u128,
    constant: &'static str,
}

/// Longer suffixes come first so `ms` is not read as `m`.
const DURATION_UNITS: [DurationUnit; 8] = [
    DurationUnit { suffix: "ns", nanos: 1, constant: "Nanosecond" },
    DurationUnit { suffix: "us", nanos: 1_000, constant: "Microsecond" },
    DurationUnit { suffix: "\u{b5}s", nanos: 1_000, constant: "Microsecond" },
    DurationUnit { suffix: "\u{3bc}s", nanos: 1_000, constant: "Microsecond" },
    DurationUnit { suffix: "ms", nanos: 1_000_000, constant: "Millisecond" },
    DurationUnit { suffix: "s", nanos: 1_000_000_000, constant: "Second" },
    DurationUnit { suffix: "m", nanos: 60_000_000_000, constant: "Minute" },
    DurationUnit { suffix: "h", nanos: 3_600_000_000_000, constant: "Hour" },
];

/// Renders Go duration text (`30s`, `1h30m`, `1.5s`) as a `time` expression.
///
/// A single whole-number term keeps its unit (`30*time.Second`); anything
/// else is written out in nanoseconds (`time.Duration(5400000000000)`).
/// Returns `None` when the text is not a valid Go duration or overflows.
pub fn duration_literal(text: &str) -> Option<String> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    if body == "0" {
        return Some("time.Duration(0)".to_string());
    }
    if body.is_empty() {
        return None;
    }

    let mut rest = body;
    let mut total: u128 = 0;
    let mut terms = Vec::new();
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let unit = DURATION_UNITS
            .iter()
            .find(|unit| after.starts_with(unit.suffix))?;
        rest = &after[unit.suffix.len()..];

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().ok()?
        };
        total = total.checked_add(whole_value.checked_mul(unit.nanos)?)?;
        total = total.checked_add(fraction_nanos(fraction, unit.nanos)?)?;
        terms.push((whole_value, fraction, unit));
    }

    if total > i64::MAX as u128 {
        return None;
    }

    match terms.as_slice() {
        [(whole, "", unit)] => Some(format!("{sign}{whole}*time.{}", unit.constant)),
        _ => Some(format!("time.Duration({sign}{total})")),
    }
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Nanoseconds contributed by the fractional digits of a term, truncated.
fn fraction_nanos(fraction: &str, unit_nanos: u128) -> Option<u128> {
    // Digits past nanosecond precision of an hour cannot change the result.
    let digits = fraction.get(..fraction.len().min(18)).unwrap_or(fraction);
    if digits.is_empty() {
        return Some(0);
    }
    let value = digits.parse::<u128>().ok()?;
    let scale = 10u128.checked_pow(u32::try_from(digits.len()).ok()?)?;
    Some(value * unit_nanos / scale)
}
