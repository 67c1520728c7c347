use std::sync::Arc;

use rawtx_check::{check_records, parse_records, Outcome};
use rawtx_codec::{compute_txid, double_sha256_reversed, encode_input, encode_output};
use rawtx_provider::{FetchError, MemorySource, RetryPolicy};

static LEGACY: &str = "0100000001141b04efa51955416471dcc906e882a28c2568310305595ab6bca2f6c73e28d1000000006a4730440220200b9a61529151f9f264a04e9aa17bb6e1d53fb345747c44885b1e185a82c17502200e41059f8ab4d3b3709dcb91b050c344b06c5086f05598d62bc06a8b746db4290121025f0ba0cdc8aa97ec1fffd01fac34d3a7f700baf07658048263a2c925825e8d33ffffffff0179cb1000000000001976a914e5977cf916acdba010b9d847b9682135aa3ea81a88ac00000000";
static SEGWIT: &str = "02000000000101141b04efa51955416471dcc906e882a28c2568310305595ab6bca2f6c73e28d10100000000fdffffff012601000000000000160014a40897ac0756778584e7dbe457cca54abc6daf4c02483044022020abababababababababababababababababababababababababababababababababababababababababababababababababababababababababababababababababab012102cdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd00000000";

static LEGACY_TXID: &str = "ff58846e06d32ccbc92dc8055499a5700dbac3278322de87584a5641e14dd84e";
static SEGWIT_TXID: &str = "d66cf2294c17cf808b7474cd908cd572d487904aeece1f999fdebe88223b3993";
static SEGWIT_WTXID: &str = "69d3299ab15eaad2d0ff12f11bb54d87ea8d0f9221664fd41540272414291fcc";

#[test]
fn it_rebuilds_the_served_txid_from_fields() {
    // scriptSig of the only input, after its 0x6a length byte
    let script_sig = hex::decode(&LEGACY[84..296]).unwrap();
    let input = encode_input(
        &hex::decode("d1283ec7f6a2bcb65a5905033168258ca282e806c9dc7164415519a5ef041b14").unwrap(),
        0,
        &script_sig,
        0xffff_ffff,
    )
    .unwrap();
    let output = encode_output(
        &hex::decode("76a914e5977cf916acdba010b9d847b9682135aa3ea81a88ac").unwrap(),
        1100665,
    )
    .unwrap();
    assert_eq!(compute_txid(&[input], &[output]).unwrap(), LEGACY_TXID);
    assert_eq!(double_sha256_reversed(LEGACY).unwrap(), LEGACY_TXID);
}

#[tokio::test]
async fn it_keeps_checking_after_a_mismatch() {
    let mut source = MemorySource::new();
    source.insert_raw(LEGACY).unwrap();
    source.insert_raw(SEGWIT).unwrap();
    let source = Arc::new(source);

    // the second record claims the legacy txid hashes to the segwit wtxid
    let file = format!(
        "{legacy},{legacy},blocks/legacy.json\n\
         {legacy},{segwit_wtxid},blocks/wrong.json\n\
         \n\
         {segwit},{segwit_wtxid},blocks/segwit.json\n",
        legacy = LEGACY_TXID,
        segwit = SEGWIT_TXID,
        segwit_wtxid = SEGWIT_WTXID,
    );
    let records = parse_records(file.as_bytes()).unwrap();
    assert_eq!(records.len(), 3);

    let report = check_records(&source, records).await;
    assert_eq!(report.checked, 3);
    assert_eq!(report.matched, 2);
    assert_eq!(report.mismatched, 1);
    assert_eq!(report.failed, 0);
    assert!(!report.is_success());

    let problems: Vec<_> = report.problems().collect();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].record.line, 2);
    assert_eq!(problems[0].record.label, "blocks/wrong.json");
    assert!(problems[0].outcome.is_mismatch());
    match &problems[0].outcome {
        Outcome::WtxidMismatch { expected, computed } => {
            assert_eq!(expected.to_be_hex(), SEGWIT_WTXID);
            assert_eq!(computed.to_be_hex(), LEGACY_TXID);
        }
        other => panic!("expected WtxidMismatch, got {:?}", other),
    }

    assert!(report.results[2].outcome.is_match());
}

#[tokio::test]
async fn it_passes_every_valid_record() {
    let mut source = MemorySource::new();
    source.insert_raw(SEGWIT).unwrap();
    let file = format!("{},{},segwit\n", SEGWIT_TXID, SEGWIT_WTXID);
    let report = check_records(&source, parse_records(file.as_bytes()).unwrap()).await;
    assert!(report.is_success());
    assert_eq!(report.to_string(), "checked 1, matched 1, mismatched 0, failed 0");
}

#[tokio::test]
async fn it_counts_unreachable_transactions_as_failures() {
    let client = rawtx_provider::EsploraClient::default()
        .with_api_root("http://127.0.0.1:9/api")
        .with_retry_policy(RetryPolicy::none());
    let file = format!("{},{},segwit\n", SEGWIT_TXID, SEGWIT_WTXID);
    let report = check_records(&client, parse_records(file.as_bytes()).unwrap()).await;
    assert_eq!(report.failed, 1);
    assert!(matches!(
        report.results[0].outcome,
        Outcome::FetchFailed(FetchError::Exhausted { attempts: 1, .. })
            | Outcome::FetchFailed(FetchError::Status { .. })
    ));
}
