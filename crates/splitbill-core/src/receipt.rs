//! # Receipt Line Parser
//!
//! Turns raw OCR text into candidate line items.
//!
//! ## Pipeline (per line, no cross-line state)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "  Coffee 3 50  "                                                      │
//! │       │ trim                                                            │
//! │       ▼                                                                 │
//! │  "Coffee 3 50"                                                          │
//! │       │ repair_split_decimal   (decimal point misread as whitespace)    │
//! │       ▼                                                                 │
//! │  "Coffee 3.50"                                                          │
//! │       │ split_trailing_price   (<name><whitespace><digits[.,]dd>)       │
//! │       ▼                                                                 │
//! │  ("Coffee", "3.50")                                                     │
//! │       │ parse_price_token                                               │
//! │       ▼                                                                 │
//! │  LineItem { name: "Coffee", unit_price: $3.50, quantity: 1 }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines that do not fit the shape are dropped, never reported as errors.
//! Headers, subtotal labels and OCR noise all simply vanish; a human reviews
//! the candidates before they are used.
//!
//! The parser does not stitch lines together, align columns or strip
//! currency symbols: `"Total $12.50"` is not an item line.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::LineItem;

// =============================================================================
// Options
// =============================================================================

/// Tuning knobs for the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rewrite `"7 99"` at the end of a line to `"7.99"` before matching.
    pub repair_split_decimals: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            repair_split_decimals: true,
        }
    }
}

// =============================================================================
// Scan Report
// =============================================================================

/// Why a non-blank line did not become an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The line does not end in `<whitespace><digits>[.,]<two digits>`.
    NoTrailingPrice,
    /// A price with nothing in front of it.
    MissingName,
    /// The price token has the right shape but is too large to represent.
    PriceOutOfRange,
}

/// A dropped line, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkippedLine {
    /// 1-based position in the raw text.
    pub line_number: usize,
    /// The line after trimming (and repair, if enabled).
    pub text: String,
    pub reason: SkipReason,
}

/// Full result of scanning a receipt: the candidates plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptScan {
    pub items: Vec<LineItem>,
    pub skipped: Vec<SkippedLine>,
}

// =============================================================================
// Entry Points
// =============================================================================

/// Parses raw OCR text into candidate items, in input order.
///
/// Never fails. Empty or fully unstructured input yields an empty vector,
/// which callers treat as "no pre-fill available".
///
/// ## Example
/// ```rust
/// use splitbill_core::{parse_receipt, Money};
///
/// let items = parse_receipt("CAFE LUNA\nCoffee 3 50\nSubtotal\nBagel 2.25");
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].name, "Coffee");
/// assert_eq!(items[0].unit_price, Money::from_cents(350));
/// assert_eq!(items[1].quantity, 1);
/// ```
pub fn parse_receipt(raw_text: &str) -> Vec<LineItem> {
    scan_receipt(raw_text, &ParseOptions::default()).items
}

/// Parses raw OCR text and also reports every non-blank line that was
/// dropped, and why.
pub fn scan_receipt(raw_text: &str, options: &ParseOptions) -> ReceiptScan {
    let mut scan = ReceiptScan::default();

    for (idx, raw_line) in receipt_lines(raw_text).enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match read_line(line, options) {
            Ok(item) => scan.items.push(item),
            Err((text, reason)) => {
                debug!(line_number = idx + 1, ?reason, line = %text, "Dropping receipt line");
                scan.skipped.push(SkippedLine {
                    line_number: idx + 1,
                    text: text.into_owned(),
                    reason,
                });
            }
        }
    }

    debug!(
        items = scan.items.len(),
        skipped = scan.skipped.len(),
        "Receipt scanned"
    );
    scan
}

/// Parses a single line. Returns `None` for anything that is not an item.
pub fn parse_line(line: &str, options: &ParseOptions) -> Option<LineItem> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    read_line(line, options).ok()
}

fn read_line<'a>(
    line: &'a str,
    options: &ParseOptions,
) -> Result<LineItem, (Cow<'a, str>, SkipReason)> {
    let line = if options.repair_split_decimals {
        repair_split_decimal(line)
    } else {
        Cow::Borrowed(line)
    };

    let outcome = match split_trailing_price(&line) {
        None if is_price_token(&line) => Err(SkipReason::MissingName),
        None => Err(SkipReason::NoTrailingPrice),
        Some((name, token)) => parse_price_token(token)
            .map(|price| LineItem::new(name, price))
            .ok_or(SkipReason::PriceOutOfRange),
    };

    outcome.map_err(|reason| (line, reason))
}

/// Splits OCR text into lines.
///
/// Breaks on `\n`, `\r`, `\r\n` (one break), vertical tab, form feed, the
/// `\x1c`-`\x1e` separators, NEL and the Unicode line and paragraph
/// separators. Scanners emit bare `\r` often enough that `str::lines` is not
/// enough.
fn receipt_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.char_indices().find(|(_, c)| is_line_break(*c)) {
            Some((idx, c)) => {
                let mut next = idx + c.len_utf8();
                if c == '\r' && current[next..].starts_with('\n') {
                    next += 1;
                }
                rest = Some(&current[next..]);
                Some(&current[..idx])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

// =============================================================================
// Stage 1: Decimal Repair
// =============================================================================

/// Collapses the whitespace in a trailing `"<digit><whitespace><dd>"` group
/// into a decimal point.
///
/// Thermal-receipt fonts often lose the decimal point, so `"7.99"` comes
/// back from OCR as `"7 99"`. Only the whitespace run directly in front of
/// the final two digits is touched, and only when a digit precedes it, so
/// names such as `"2% Milk"` or `"Table 12"` are left alone.
///
/// Repairing an already repaired line is a no-op.
///
/// ## Example
/// ```rust
/// use splitbill_core::receipt::repair_split_decimal;
///
/// assert_eq!(repair_split_decimal("Coffee 3 50"), "Coffee 3.50");
/// assert_eq!(repair_split_decimal("Coffee 3.50"), "Coffee 3.50");
/// assert_eq!(repair_split_decimal("Room 5 12 99"), "Room 5 12.99");
/// assert_eq!(repair_split_decimal("Item 12 345"), "Item 12 345");
/// ```
pub fn repair_split_decimal(line: &str) -> Cow<'_, str> {
    let mut chars = line.char_indices().rev();

    let ends_in_two_digits = matches!(
        (chars.next(), chars.next()),
        (Some((_, ones)), Some((_, tens))) if ones.is_ascii_digit() && tens.is_ascii_digit()
    );
    if !ends_in_two_digits {
        return Cow::Borrowed(line);
    }
    // Both trailing digits are ASCII, so the group starts two bytes from the end.
    let digits_start = line.len() - 2;

    let mut run_start = None;
    let mut preceding = None;
    for (idx, c) in chars {
        if c.is_whitespace() {
            run_start = Some(idx);
        } else {
            preceding = Some(c);
            break;
        }
    }

    match (run_start, preceding) {
        (Some(start), Some(c)) if c.is_ascii_digit() => {
            Cow::Owned(format!("{}.{}", &line[..start], &line[digits_start..]))
        }
        _ => Cow::Borrowed(line),
    }
}

// =============================================================================
// Stage 2: Trailing Price Matcher
// =============================================================================

/// Splits a line into `(name, price_token)` when it ends in a price token
/// separated from the rest by whitespace.
///
/// The name is trimmed. Returns `None` if there is no whitespace or the last
/// whitespace-separated token is not a price token.
///
/// ## Example
/// ```rust
/// use splitbill_core::receipt::split_trailing_price;
///
/// assert_eq!(split_trailing_price("Big  Mac   5.99"), Some(("Big  Mac", "5.99")));
/// assert_eq!(split_trailing_price("Subtotal"), None);
/// assert_eq!(split_trailing_price("Total $5.99"), None);
/// ```
pub fn split_trailing_price(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let (ws_idx, ws) = line.char_indices().rev().find(|(_, c)| c.is_whitespace())?;

    let token = &line[ws_idx + ws.len_utf8()..];
    price_token_parts(token)?;

    Some((line[..ws_idx].trim(), token))
}

/// Returns true if `token` is one or more digits, `.` or `,`, and exactly
/// two digits.
pub fn is_price_token(token: &str) -> bool {
    price_token_parts(token).is_some()
}

/// Converts a price token to money, normalizing `,` to `.`.
///
/// Returns `None` for tokens of the wrong shape and for amounts too large to
/// represent.
///
/// ## Example
/// ```rust
/// use splitbill_core::receipt::parse_price_token;
/// use splitbill_core::Money;
///
/// assert_eq!(parse_price_token("7,99"), Some(Money::from_cents(799)));
/// assert_eq!(parse_price_token("7.9"), None);
/// ```
pub fn parse_price_token(token: &str) -> Option<Money> {
    let (major, minor) = price_token_parts(token)?;
    Money::checked_from_digits(major, minor)
}

fn price_token_parts(token: &str) -> Option<(&str, &str)> {
    let (major, minor) = token.rsplit_once(['.', ','])?;

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if major.is_empty() || minor.len() != 2 || !all_digits(major) || !all_digits(minor) {
        return None;
    }

    Some((major, minor))
}

// =============================================================================
// Unit Tests
// =============================================================================
