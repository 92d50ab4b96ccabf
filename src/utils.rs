// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Amount, DecimalFormat};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM` into `(year, month)`.
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((first.year(), first.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_amount(s: &str) -> Result<Amount> {
    Ok(Amount::parse(s)?)
}

/// Round, group the integer part in threes and join with the configured
/// separators. Midpoints round away from zero.
pub fn format_number(amount: Decimal, fmt: &DecimalFormat) -> String {
    let places = if fmt.show_decimals {
        fmt.decimal_places
    } else {
        0
    };
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.*}", places as usize, rounded);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    // "-0.00" after rounding a tiny negative
    let sign = if rounded.is_zero() { "" } else { sign };

    let mut out = String::with_capacity(fixed.len() + 8);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part, &fmt.thousands_separator));
    if let Some(frac) = frac_part {
        out.push_str(&fmt.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// Same as [`format_number`] for raw text; anything non-numeric shows as `"0"`.
pub fn format_number_str(raw: &str, fmt: &DecimalFormat) -> String {
    match raw.trim().parse::<Decimal>() {
        Ok(d) => format_number(d, fmt),
        Err(_) => "0".to_string(),
    }
}

/// Symbol directly in front of the number, e.g. `$1,234.50`.
pub fn format_currency(amount: Decimal, symbol: &str, fmt: &DecimalFormat) -> String {
    format!("{}{}", symbol, format_number(amount, fmt))
}

fn group_thousands(digits: &str, sep: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
