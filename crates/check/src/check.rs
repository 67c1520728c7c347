use std::fmt;

use tracing::{info, warn};

use rawtx_codec::{double_sha256_reversed, RawTx, Txid, Wtxid};
use rawtx_provider::{FetchError, TxSource};

use crate::{error::DecodeError, records::Record};

/// The result of checking one record.
#[derive(Debug)]
pub enum Outcome {
    /// The fetched transaction hashes to the expected wtxid.
    Match,
    /// The fetched transaction hashes to a different wtxid.
    WtxidMismatch {
        /// From the record
        expected: Wtxid,
        /// From the fetched bytes
        computed: Wtxid,
    },
    /// The wtxid matches but the fetched transaction has a different txid than requested.
    TxidMismatch {
        /// From the record
        expected: Txid,
        /// From the fetched bytes
        computed: Txid,
    },
    /// The transaction could not be fetched.
    FetchFailed(FetchError),
    /// The fetched body is not a transaction.
    Undecodable(DecodeError),
}

impl Outcome {
    /// True for `Match`.
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match)
    }

    /// True for either mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Outcome::WtxidMismatch { .. } | Outcome::TxidMismatch { .. }
        )
    }
}

/// A record and its outcome.
#[derive(Debug)]
pub struct RecordReport {
    /// The record checked
    pub record: Record,
    /// What happened
    pub outcome: Outcome,
}

/// The outcome of a whole run.
#[derive(Debug, Default)]
pub struct Report {
    /// Per-record outcomes, in input order
    pub results: Vec<RecordReport>,
    /// Records checked
    pub checked: usize,
    /// Records whose wtxid and txid matched
    pub matched: usize,
    /// Records with a txid or wtxid mismatch
    pub mismatched: usize,
    /// Records that could not be fetched or decoded
    pub failed: usize,
}

impl Report {
    fn push(&mut self, record: Record, outcome: Outcome) {
        self.checked += 1;
        match &outcome {
            Outcome::Match => self.matched += 1,
            Outcome::WtxidMismatch { .. } | Outcome::TxidMismatch { .. } => self.mismatched += 1,
            Outcome::FetchFailed(_) | Outcome::Undecodable(_) => self.failed += 1,
        }
        self.results.push(RecordReport { record, outcome });
    }

    /// True if every record matched.
    pub fn is_success(&self) -> bool {
        self.matched == self.checked
    }

    /// The records that did not match, with their outcomes.
    pub fn problems(&self) -> impl Iterator<Item = &RecordReport> {
        self.results.iter().filter(|r| !r.outcome.is_match())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "checked {}, matched {}, mismatched {}, failed {}",
            self.checked, self.matched, self.mismatched, self.failed
        )
    }
}

/// Compute the txid and wtxid of a hex transaction.
pub fn compute_ids(tx_hex: &str) -> Result<(Txid, Wtxid), DecodeError> {
    let tx_hex = tx_hex.trim();
    let wtxid: Wtxid = double_sha256_reversed(tx_hex)?.parse()?;
    let txid = RawTx::from_hex(tx_hex)?.txid();
    Ok((txid, wtxid))
}

/// Fetch and check a single record.
pub async fn check_record<S>(source: &S, record: &Record) -> Outcome
where
    S: TxSource + ?Sized,
{
    let tx_hex = match source.fetch_tx_hex(&record.txid).await {
        Ok(tx_hex) => tx_hex,
        Err(e) => return Outcome::FetchFailed(e),
    };

    let (txid, wtxid) = match compute_ids(&tx_hex) {
        Ok(ids) => ids,
        Err(e) => return Outcome::Undecodable(e),
    };

    if wtxid != record.wtxid {
        return Outcome::WtxidMismatch {
            expected: record.wtxid,
            computed: wtxid,
        };
    }
    if txid != record.txid {
        return Outcome::TxidMismatch {
            expected: record.txid,
            computed: txid,
        };
    }
    Outcome::Match
}

/// Check every record in order, one fetch at a time. A mismatch or failure is recorded and the
/// run continues.
pub async fn check_records<S, I>(source: &S, records: I) -> Report
where
    S: TxSource + ?Sized,
    I: IntoIterator<Item = Record>,
{
    let mut report = Report::default();
    for record in records {
        let outcome = check_record(source, &record).await;
        match &outcome {
            Outcome::Match => info!(line = record.line, txid = %record.txid, "wtxid ok"),
            Outcome::WtxidMismatch { expected, computed } => warn!(
                line = record.line,
                label = %record.label,
                %expected,
                %computed,
                "invalid wtxid"
            ),
            Outcome::TxidMismatch { expected, computed } => warn!(
                line = record.line,
                label = %record.label,
                %expected,
                %computed,
                "fetched transaction has a different txid"
            ),
            Outcome::FetchFailed(e) => warn!(
                line = record.line,
                label = %record.label,
                error = %e,
                "fetch failed"
            ),
            Outcome::Undecodable(e) => warn!(
                line = record.line,
                label = %record.label,
                error = %e,
                "fetched body is not a transaction"
            ),
        }
        report.push(record, outcome);
    }
    report
}
