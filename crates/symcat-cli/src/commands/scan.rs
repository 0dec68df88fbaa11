//! Scan command - list a namespace's bindings and how extraction treats them.

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use symcat::{Namespace, ScanEntry, load_module, scan};
use symcat_output::{OutputFormatter, Palette};

use super::{Context, exit_code, print_report};

/// Scan command arguments
#[derive(Args)]
pub struct ScanArgs {
    /// Namespace descriptor (.json, .yaml or .yml)
    pub descriptor: PathBuf,
}

/// Run the scan command
pub fn run(args: ScanArgs, ctx: &Context) -> i32 {
    exit_code(run_scan(args, ctx))
}

fn run_scan(args: ScanArgs, ctx: &Context) -> anyhow::Result<()> {
    let module = load_module(&args.descriptor)
        .with_context(|| format!("failed to load {}", args.descriptor.display()))?;
    let rules = ctx.config.rules.resolve();
    let entries = scan(&module, &rules)?
        .iter()
        .map(ScanEntry::from)
        .collect();

    let report = ScanReport {
        namespace: module.name().to_string(),
        entries,
    };
    print_report(&report, &ctx.format)
}

/// Every binding of a namespace with its classification.
#[derive(Serialize)]
pub struct ScanReport {
    pub namespace: String,
    pub entries: Vec<ScanEntry>,
}

impl ScanReport {
    fn render_with(&self, palette: Palette) -> String {
        let mut lines = vec![palette.heading(&self.namespace)];
        for entry in &self.entries {
            let kind = format!("{:<9}", entry.kind);
            let mut line = format!("{} {}", palette.keyword(&kind), palette.name(&entry.name));
            if let Some(reason) = entry.skipped {
                let reason = serde_json::to_value(reason)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                line.push_str(&palette.dim(&format!(" (skipped: {})", reason)));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl OutputFormatter for ScanReport {
    fn format_text(&self) -> String {
        self.render_with(Palette::new(false))
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.render_with(Palette::new(colors))
    }
}
