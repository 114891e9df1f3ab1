//! `songsmith check`

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use songsmith_compliance::{ComplianceConfig, ComplianceConfigUpdate, ComplianceEngine};

use super::{load_prompt, print_json};

pub struct CheckArgs {
    pub prompt: PathBuf,
    pub config: Option<PathBuf>,
    pub strict: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ComplianceConfig::load(path)
            .with_context(|| format!("Failed to load compliance config: {}", path.display()))?,
        None => ComplianceConfig::default(),
    };

    let mut engine = ComplianceEngine::with_config(config);
    if args.strict {
        engine.update_config(ComplianceConfigUpdate {
            strict_mode: Some(true),
            ..Default::default()
        });
    }

    let prompt = load_prompt(&args.prompt)?;
    let report = engine.check(&prompt.compliance_input());
    info!(
        prompt = %prompt.id,
        level = %report.overall_level,
        score = report.score,
        "Compliance check finished"
    );
    print_json(&report)
}
