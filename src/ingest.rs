//! CSV ingestion of contact plans (spec §6, "Ingestion format").
//!
//! Grounded on `other_examples/.../khx02-vrp`'s use of the `csv` crate for
//! its own flexible row-oriented input, adapted to the spec's exact
//! tolerance rules: comment and blank lines ignored, malformed rows
//! silently skipped (with a running count), whitespace around fields
//! tolerated. The teacher's own `Parser<ContactInfo>` trait
//! (`src/contact.rs`) is a different shape (parses one line at a time
//! into a fixed struct via manual splitting); this module keeps that
//! one-row-at-a-time spirit but delegates splitting and whitespace
//! handling to `csv`, which is the idiomatic choice once comment lines
//! enter the picture.

use std::io::Read;

use tracing::warn;

use crate::contact::Contact;

/// Outcome of ingesting a contact plan: the successfully parsed contacts,
/// in file order, and how many rows were skipped as malformed
/// (spec §7, "Malformed input row").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub contacts: Vec<Contact>,
    pub skipped: usize,
}

/// Parses a contact plan from `reader`. Each non-comment, non-blank row
/// must have the nine fields of §3 in order:
/// `id, from, to, t_start, t_end, owlt, rate_bps, setup_s, residual_bytes`.
pub fn from_reader<R: Read>(reader: R) -> IngestReport {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut report = IngestReport::default();
    for result in csv_reader.records() {
        let Ok(record) = result else {
            report.skipped += 1;
            continue;
        };
        if record.is_empty() || (record.len() == 1 && record.get(0).map(str::is_empty).unwrap_or(true)) {
            continue;
        }
        match parse_row(&record) {
            Some(contact) => report.contacts.push(contact),
            None => {
                warn!(row = ?record, "skipping malformed contact row");
                report.skipped += 1;
            }
        }
    }
    report
}

fn parse_row(record: &csv::StringRecord) -> Option<Contact> {
    if record.len() != 9 {
        return None;
    }
    let id = record.get(0)?.parse().ok()?;
    let from = record.get(1)?.parse().ok()?;
    let to = record.get(2)?.parse().ok()?;
    let t_start = record.get(3)?.parse().ok()?;
    let t_end = record.get(4)?.parse().ok()?;
    let owlt = record.get(5)?.parse().ok()?;
    let rate_bps = record.get(6)?.parse().ok()?;
    let setup_s = record.get(7)?.parse().ok()?;
    let residual_bytes = record.get(8)?.parse().ok()?;
    Contact::try_new(id, from, to, t_start, t_end, owlt, rate_bps, setup_s, residual_bytes)
}
