use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use rawtx_codec::{Txid, Wtxid};

use crate::error::{CheckError, RecordError};

/// One expected `txid,wtxid,label` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source
    pub line: usize,
    /// The txid to fetch
    pub txid: Txid,
    /// The wtxid the fetched transaction should hash to
    pub wtxid: Wtxid,
    /// Free-form label reported with failures. May contain commas.
    pub label: String,
}

/// Parse a single line. Blank lines give `None`.
pub fn parse_record(line: usize, text: &str) -> Result<Option<Record>, RecordError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = text.splitn(3, ',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(RecordError::WrongFieldCount {
            line,
            found: fields.len(),
        });
    }

    let txid = Txid::from_be_hex(fields[0]).map_err(|source| RecordError::BadDigest {
        line,
        field: "txid",
        source,
    })?;
    let wtxid = Wtxid::from_be_hex(fields[1]).map_err(|source| RecordError::BadDigest {
        line,
        field: "wtxid",
        source,
    })?;

    Ok(Some(Record {
        line,
        txid,
        wtxid,
        label: fields[2].to_owned(),
    }))
}

/// Parse every record from `reader`, one per line, no header. Stops at the first bad line.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<Record>, CheckError> {
    let mut records = vec![];
    for (i, line) in reader.lines().enumerate() {
        if let Some(record) = parse_record(i + 1, &line?)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parse the records file at `path`.
pub fn read_records_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, CheckError> {
    parse_records(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod test {
    use super::*;

    static TXID: &str = "ff58846e06d32ccbc92dc8055499a5700dbac3278322de87584a5641e14dd84e";
    static WTXID: &str = "69d3299ab15eaad2d0ff12f11bb54d87ea8d0f9221664fd41540272414291fcc";

    #[test]
    fn it_parses_records_and_skips_blank_lines() {
        let input = format!(
            "{txid},{wtxid},mempool/a.json\n\n   \n  {txid} , {wtxid} , label, with, commas  \n",
            txid = TXID,
            wtxid = WTXID
        );
        let records = parse_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].line, 1);
        assert_eq!(records[0].txid.to_be_hex(), TXID);
        assert_eq!(records[0].wtxid.to_be_hex(), WTXID);
        assert_eq!(records[0].label, "mempool/a.json");

        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].label, "label, with, commas");
    }

    #[test]
    fn it_reports_the_field_count() {
        let input = format!("{},{}\n", TXID, WTXID);
        match parse_records(input.as_bytes()) {
            Err(CheckError::Record(RecordError::WrongFieldCount { line: 1, found: 2 })) => {}
            other => panic!("expected WrongFieldCount, got {:?}", other),
        }
    }

    #[test]
    fn it_reports_bad_digests_with_line_numbers() {
        let cases = [
            (format!("{},{},x", &TXID[2..], WTXID), "txid"),
            (format!("{},{}zz,x", TXID, &WTXID[2..]), "wtxid"),
        ];
        for (line, expected_field) in cases.iter() {
            let input = format!("\n{}\n", line);
            match parse_records(input.as_bytes()) {
                Err(CheckError::Record(e @ RecordError::BadDigest { .. })) => {
                    assert_eq!(e.line(), 2);
                    if let RecordError::BadDigest { field, .. } = e {
                        assert_eq!(field, *expected_field);
                    }
                }
                other => panic!("expected BadDigest, got {:?}", other),
            }
        }
    }
}
