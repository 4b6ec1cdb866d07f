// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Dropscan CLI - submit a source file to the analyzer and print the report

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};

use dropscan::{AnalysisOutcome, EventResponse, OfferedFile, PageEvent, Session, SessionConfig};

/// Exit status when the analyzer flagged at least one finding
const EXIT_FLAGGED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dropscan=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "analyze" => {
            let options = match AnalyzeOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("{}", e);
                    eprintln!("Usage: dropscan analyze <file> [--server <url>] [--timeout <secs>]");
                    return ExitCode::from(1);
                }
            };
            analyze(options).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("dropscan {}", dropscan::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Dropscan - Source File Analysis Client

USAGE:
    dropscan <COMMAND> [OPTIONS]

COMMANDS:
    analyze <file>  Upload a Python file to the analyzer and print the report
    help            Show this help message
    version         Show version information

OPTIONS:
    --server <url>    Analyzer base URL (default: http://127.0.0.1:5000)
    --timeout <secs>  Give up on the upload after this many seconds

EXIT STATUS:
    0  analysis complete, nothing flagged
    2  analysis complete, findings flagged
    1  file rejected, analyzer error or transport failure

EXAMPLES:
    dropscan analyze app.py
    dropscan analyze app.py --server http://scanner.local:5000 --timeout 30
"#
    );
}

#[derive(Debug, Clone, PartialEq)]
struct AnalyzeOptions {
    file: String,
    server: Option<String>,
    timeout: Option<Duration>,
}

impl AnalyzeOptions {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut file = None;
        let mut server = None;
        let mut timeout = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--server" => {
                    server = Some(iter.next().context("--server needs a URL")?.clone());
                }
                "--timeout" => {
                    let raw = iter.next().context("--timeout needs a number of seconds")?;
                    let secs: u64 = raw
                        .parse()
                        .with_context(|| format!("invalid timeout: {}", raw))?;
                    if secs == 0 {
                        bail!("timeout must be at least one second");
                    }
                    timeout = Some(Duration::from_secs(secs));
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                path if file.is_none() => file = Some(path.to_string()),
                extra => bail!("Unexpected argument: {}", extra),
            }
        }

        Ok(Self {
            file: file.context("missing <file>")?,
            server,
            timeout,
        })
    }

    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = SessionConfig::new();
        if let Some(server) = &self.server {
            config = config
                .endpoint(server)
                .with_context(|| format!("invalid server URL: {}", server))?;
        }
        if let Some(timeout) = self.timeout {
            config = config.request_timeout(timeout);
        }
        Ok(config)
    }
}

async fn analyze(options: AnalyzeOptions) -> ExitCode {
    match run_analysis(&options).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run_analysis(options: &AnalyzeOptions) -> anyhow::Result<ExitCode> {
    let config = options.session_config()?;
    let file = load_file(Path::new(&options.file)).await?;
    let session = Session::connect(config).context("failed to start session")?;

    println!("Analyzing: {}", file.name);
    println!("Server: {}", session.config().upload_url()?);

    match session.dispatch(PageEvent::OfferedViaPick(vec![file])) {
        EventResponse::Accepted(_) => {}
        _ => {
            for alert in session.notices().alert_messages() {
                eprintln!("{}", alert);
            }
            return Ok(ExitCode::from(1));
        }
    }

    let Some(outcome) = session.click_analyze().await else {
        bail!("analyze trigger was not available");
    };

    match outcome {
        AnalysisOutcome::Success(results) => {
            let surface = session.surface();

            println!("\n=== Vulnerabilities ===");
            for item in surface.vulnerability_items() {
                println!("  - {}", item);
            }

            let safe = surface.safe_items();
            if !safe.is_empty() {
                println!("\n=== Safe ({}) ===", safe.len());
                for item in &safe {
                    println!("  - {}", item);
                }
            }

            println!("\nStatus: {}", surface.status());

            if results.has_vulnerabilities() {
                Ok(ExitCode::from(EXIT_FLAGGED))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        AnalysisOutcome::ApplicationError(_) | AnalysisOutcome::TransportError(_) => {
            for alert in session.notices().alert_messages() {
                eprintln!("{}", alert);
            }
            Ok(ExitCode::from(1))
        }
    }
}

async fn load_file(path: &Path) -> anyhow::Result<OfferedFile> {
    OfferedFile::from_path(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_analyze_options() {
        let options =
            AnalyzeOptions::parse(&args(&["app.py", "--server", "http://h:1", "--timeout", "3"]))
                .unwrap();
        assert_eq!(options.file, "app.py");
        assert_eq!(options.server.as_deref(), Some("http://h:1"));
        assert_eq!(options.timeout, Some(Duration::from_secs(3)));

        let config = options.session_config().unwrap();
        assert_eq!(config.upload_url().unwrap().as_str(), "http://h:1/upload");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(AnalyzeOptions::parse(&args(&[])).is_err());
        assert!(AnalyzeOptions::parse(&args(&["a.py", "b.py"])).is_err());
        assert!(AnalyzeOptions::parse(&args(&["a.py", "--timeout", "soon"])).is_err());
        assert!(AnalyzeOptions::parse(&args(&["a.py", "--timeout", "0"])).is_err());
        assert!(AnalyzeOptions::parse(&args(&["a.py", "--verbose"])).is_err());
        assert!(AnalyzeOptions::parse(&args(&["a.py", "--server"])).is_err());
    }

    #[tokio::test]
    async fn test_load_file_uses_final_component() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.py");
        std::fs::write(&path, "print('hi')").unwrap();

        let file = load_file(&path).await.unwrap();
        assert_eq!(file.name, "scan.py");
        assert_eq!(&file.bytes[..], b"print('hi')");

        assert!(load_file(&dir.path().join("missing.py")).await.is_err());
    }
}
