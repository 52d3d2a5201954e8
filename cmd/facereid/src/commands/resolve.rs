//! Replays raw embeddings through the identity store.
//!
//! Input is JSON lines, each either a bare array of floats or an object
//! with an `embedding` field. Every line is normalized, matched against the
//! store and enrolled if unknown, exactly as a live camera face would be.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context as _;
use clap::Args;
use facereid_identity::{
    DEFAULT_SINK_ADDR, EmbeddingVector, IdentityStore, MatchPolicy, NopSink, Outcome,
    OutcomeSink, TcpSink,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{get_config, open_store, print_success, print_warning};
use crate::Cli;

/// Resolve raw embeddings read as JSON lines.
#[derive(Args)]
pub struct ResolveCommand {
    /// Input file (reads stdin when omitted or "-")
    #[arg(short = 'f', long = "file")]
    input: Option<String>,

    /// Push outcome records to host:port (defaults to the config's sender)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_SINK_ADDR)]
    send: Option<String>,

    /// Log bad lines and continue instead of stopping
    #[arg(long)]
    keep_going: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum EmbeddingLine {
    Bare(Vec<f32>),
    Wrapped { embedding: Vec<f32> },
}

impl EmbeddingLine {
    fn into_vec(self) -> Vec<f32> {
        match self {
            Self::Bare(v) | Self::Wrapped { embedding: v } => v,
        }
    }
}

/// Counters over one replay.
#[derive(Debug, Default, PartialEq, Eq)]
struct ReplaySummary {
    recognized: usize,
    enrolled: usize,
    failed: usize,
    send_failures: usize,
}

impl ResolveCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let policy = cfg.policy()?;
        let store = open_store(&cfg)?;

        let sink: Box<dyn OutcomeSink> = match self.send.as_ref().or(cfg.sender.as_ref()) {
            Some(addr) => {
                info!("sending outcomes to {}", addr);
                Box::new(TcpSink::new(addr.clone()))
            }
            None => Box::new(NopSink),
        };

        let reader: Box<dyn BufRead> = match self.input.as_deref() {
            None | Some("-") => Box::new(BufReader::new(io::stdin())),
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("failed to open {}", path))?,
            )),
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let summary = replay(
            reader,
            &store,
            &policy,
            sink.as_ref(),
            self.keep_going,
            cli.json,
            &mut out,
        )?;

        if summary.failed > 0 {
            print_warning(&format!("{} lines failed", summary.failed));
        }
        if summary.send_failures > 0 {
            print_warning(&format!("{} records not delivered", summary.send_failures));
        }
        print_success(&format!(
            "{} recognized, {} enrolled, store holds {}",
            summary.recognized,
            summary.enrolled,
            store.len()
        ));
        Ok(())
    }
}

fn parse_line(line: &str) -> anyhow::Result<Vec<f32>> {
    let parsed: EmbeddingLine = serde_json::from_str(line)?;
    Ok(parsed.into_vec())
}

fn resolve_line(
    line: &str,
    store: &IdentityStore,
    policy: &MatchPolicy,
) -> anyhow::Result<Outcome> {
    let vector = EmbeddingVector::normalize(parse_line(line)?)?;
    Ok(store.resolve_or_enroll(vector, policy)?)
}

fn replay(
    reader: impl BufRead,
    store: &IdentityStore,
    policy: &MatchPolicy,
    sink: &dyn OutcomeSink,
    keep_going: bool,
    as_json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (n, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = match resolve_line(line, store, policy) {
            Ok(outcome) => outcome,
            Err(e) if keep_going => {
                warn!("line {}: {:#}", n + 1, e);
                summary.failed += 1;
                continue;
            }
            Err(e) => return Err(e.context(format!("line {}", n + 1))),
        };

        match &outcome {
            Outcome::Recognized { .. } => summary.recognized += 1,
            Outcome::Enrolled { .. } => summary.enrolled += 1,
        }

        let record = outcome.to_record();
        if as_json {
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else {
            match &outcome {
                Outcome::Recognized { identity, distance } => {
                    writeln!(out, "recognized {} distance={:.4}", identity, distance)?
                }
                Outcome::Enrolled { identity } => writeln!(out, "enrolled   {}", identity)?,
            }
        }

        if let Err(e) = sink.send(&record) {
            summary.send_failures += 1;
            warn!("failed to send outcome for {}: {}", record.identity, e);
        }
    }

    Ok(summary)
}
