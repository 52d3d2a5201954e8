//! Store inspection and maintenance commands.

use clap::Args;
use facereid_identity::{FaceIdError, IdentityStore, RepairReport};
use serde::Serialize;

use super::{get_config, open_store, output_result, print_success, print_warning};
use crate::Cli;

#[derive(Serialize)]
struct StoreInfo {
    index: String,
    labels: String,
    dim: usize,
    identities: usize,
    threshold: f32,
}

#[derive(Serialize)]
struct RepairSummary {
    kept: usize,
    dropped_vectors: usize,
    dropped_labels: usize,
    applied: bool,
}

impl RepairSummary {
    fn new(report: &RepairReport, applied: bool) -> Self {
        Self {
            kept: report.kept,
            dropped_vectors: report.dropped_vectors,
            dropped_labels: report.dropped_labels,
            applied,
        }
    }
}

/// Show store size and artifact locations.
#[derive(Args)]
pub struct InfoCommand {}

impl InfoCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let store = open_store(&cfg)?;
        let paths = cfg.store_paths()?;

        output_result(
            &StoreInfo {
                index: paths.index.display().to_string(),
                labels: paths.labels.display().to_string(),
                dim: store.dim(),
                identities: store.len(),
                threshold: cfg.threshold,
            },
            cli.json,
        )
    }
}

/// Verify that the index and the label list agree.
///
/// Exits non-zero when the store cannot be loaded.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        match open_store(&cfg) {
            Ok(store) => {
                print_success(&format!("store is consistent: {} identities", store.len()));
                Ok(())
            }
            Err(e) => {
                if let Some(FaceIdError::CountMismatch { .. }) = e.downcast_ref::<FaceIdError>() {
                    print_warning("run 'facereid repair' to truncate both artifacts to the shorter one");
                }
                Err(e)
            }
        }
    }
}

/// Truncate both artifacts to the shorter one.
///
/// Without --yes only reports what would be dropped.
#[derive(Args)]
pub struct RepairCommand {
    /// Rewrite the artifacts
    #[arg(long)]
    yes: bool,
}

impl RepairCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let paths = cfg.store_paths()?;

        let plan = IdentityStore::plan_repair(&paths, cfg.dim)?;
        if !plan.changed() {
            print_success("nothing to repair");
            return output_result(&RepairSummary::new(&plan, false), cli.json);
        }
        if !self.yes {
            print_warning("dry run, pass --yes to rewrite the artifacts");
            return output_result(&RepairSummary::new(&plan, false), cli.json);
        }

        let report = IdentityStore::repair(&paths, cfg.dim)?;
        print_success(&format!("repaired {}", paths.index.display()));
        output_result(&RepairSummary::new(&report, true), cli.json)
    }
}
