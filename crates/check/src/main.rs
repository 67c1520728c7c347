use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rawtx_check::{check_records, read_records_file, CheckError, Report};
use rawtx_provider::{EsploraClient, RetryPolicy, DEFAULT_API_ROOT, DEFAULT_MAX_ATTEMPTS};

/// Fetch every transaction listed in a `txid,wtxid,label` file and check that its bytes hash to
/// the expected wtxid.
#[derive(Parser, Debug)]
#[command(name = "wtxid-check", version)]
struct Args {
    /// Records file, one `txid,wtxid,label` per line
    #[arg(short, long, default_value = "wtxids.txt")]
    input: PathBuf,

    /// Esplora API root
    #[arg(long, env = "RAWTX_API_ROOT", default_value = DEFAULT_API_ROOT)]
    api_root: String,

    /// Proxy for every request, e.g. socks5h://127.0.0.1:9050 for Tor
    #[arg(long, env = "RAWTX_PROXY")]
    proxy: Option<String>,

    /// Attempts per transaction before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Seconds to wait between attempts
    #[arg(long, default_value_t = 5)]
    retry_delay_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Args {
    fn client(&self) -> Result<EsploraClient, CheckError> {
        let mut client = EsploraClient::default()
            .with_api_root(&self.api_root)
            .with_retry_policy(RetryPolicy::fixed(
                self.max_attempts,
                Duration::from_secs(self.retry_delay_secs),
            ));
        if let Some(proxy) = &self.proxy {
            client = client.with_proxy(proxy)?;
        }
        if let Some(secs) = self.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs))?;
        }
        Ok(client)
    }
}

async fn run(args: &Args) -> Result<Report, CheckError> {
    let records = read_records_file(&args.input)?;
    info!(
        records = records.len(),
        input = %args.input.display(),
        api_root = %args.api_root,
        "checking records"
    );
    let client = args.client()?;
    Ok(check_records(&client, records).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(report) if report.is_success() => {
            info!(%report, "all wtxids valid");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            for problem in report.problems() {
                warn!(
                    line = problem.record.line,
                    label = %problem.record.label,
                    outcome = ?problem.outcome,
                    "record failed"
                );
            }
            warn!(%report, "check failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "could not run check");
            ExitCode::FAILURE
        }
    }
}
