//! Text and JSON output.
//!
//! Everything here returns a `String`; the commands decide where it goes.

use std::fmt::Write as _;

use serde::Serialize;
use splitbill_core::{
    BillItem, ConfirmedBill, LineItem, Money, ParticipantShare, SkipReason, SkippedLine,
    SplitResult,
};

const PERSON_HEADER: &str = "Person";
const OWED_HEADER: &str = "Owed";
const PERCENT_HEADER: &str = "% of Bill";

/// Numbered candidate list for `splitbill parse`.
pub fn candidates(items: &[LineItem], symbol: &str) -> String {
    if items.is_empty() {
        return "No items found; nothing to pre-fill.\n".to_string();
    }

    let mut out = format!("Found {} item(s):\n", items.len());
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{:>4}. {}", idx + 1, item.label_with(symbol));
    }
    out
}

/// Lines the parser dropped, with the reason.
pub fn skipped(lines: &[SkippedLine]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut out = format!("Skipped {} line(s):\n", lines.len());
    for line in lines {
        let _ = writeln!(
            out,
            "  line {}: {:?} ({})",
            line.line_number,
            line.text,
            skip_reason(line.reason)
        );
    }
    out
}

fn skip_reason(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoTrailingPrice => "no trailing price",
        SkipReason::MissingName => "price without a name",
        SkipReason::PriceOutOfRange => "price too large",
    }
}

/// The split as a person would read it.
///
/// ```text
/// Items:
///   Pizza — $10.00 ×1 = $10.00   shared by Alice, Bob
///   Soda — $2.00 ×2 = $4.00      shared by Alice
///
/// Total bill: $14.00
///
/// Person    Owed  % of Bill
/// Alice    $9.00      64.3%
/// Bob      $5.00      35.7%
/// ```
pub fn split_report(bill: &ConfirmedBill, split: &SplitResult, symbol: &str) -> String {
    let mut out = String::new();

    if !bill.items().is_empty() {
        let labels: Vec<String> = bill
            .items()
            .iter()
            .map(|entry| entry.item.label_with(symbol))
            .collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        out.push_str("Items:\n");
        for (label, entry) in labels.iter().zip(bill.items()) {
            let sharers = if entry.shared_by.is_empty() {
                "unassigned".to_string()
            } else {
                format!("shared by {}", entry.shared_by.join(", "))
            };
            let _ = writeln!(out, "  {:<width$}   {}", label, sharers, width = width);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Total bill: {}", split.total.format_with(symbol));
    out.push('\n');
    out.push_str(&share_table(&split.shares, symbol));

    let unallocated = split.unallocated();
    if !unallocated.is_zero() {
        let _ = writeln!(
            out,
            "\n{} of the bill is not assigned to anyone.",
            unallocated.format_with(symbol)
        );
    }
    out
}

fn share_table(shares: &[ParticipantShare], symbol: &str) -> String {
    if shares.is_empty() {
        return "(no participants)\n".to_string();
    }

    let rows: Vec<(&str, String, String)> = shares
        .iter()
        .map(|s| {
            (
                s.name.as_str(),
                s.owed.format_with(symbol),
                s.percentage.to_string(),
            )
        })
        .collect();

    let name_width = column_width(PERSON_HEADER, rows.iter().map(|r| r.0));
    let owed_width = column_width(OWED_HEADER, rows.iter().map(|r| r.1.as_str()));
    let pct_width = column_width(PERCENT_HEADER, rows.iter().map(|r| r.2.as_str()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<nw$}  {:>ow$}  {:>pw$}",
        PERSON_HEADER,
        OWED_HEADER,
        PERCENT_HEADER,
        nw = name_width,
        ow = owed_width,
        pw = pct_width
    );
    for (name, owed, pct) in &rows {
        let _ = writeln!(
            out,
            "{:<nw$}  {:>ow$}  {:>pw$}",
            name,
            owed,
            pct,
            nw = name_width,
            ow = owed_width,
            pw = pct_width
        );
    }
    out
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

// =============================================================================
// JSON
// =============================================================================

/// `splitbill split --json` payload. Amounts are integer cents.
#[derive(Debug, Serialize)]
pub struct SplitReport<'a> {
    pub items: &'a [BillItem],
    pub total: Money,
    pub unallocated: Money,
    pub shares: &'a [ParticipantShare],
}

impl<'a> SplitReport<'a> {
    pub fn new(bill: &'a ConfirmedBill, split: &'a SplitResult) -> Self {
        SplitReport {
            items: bill.items(),
            total: split.total,
            unallocated: split.unallocated(),
            shares: &split.shares,
        }
    }
}
