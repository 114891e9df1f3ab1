//! `songsmith optimize`

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use songsmith_pipeline::{
    JsonFilePromptStore, MemoryPromptStore, OptimizationPipeline, OptimizationRequest,
    PromptStore,
};

use super::{load_prompt, print_json};

pub struct OptimizeArgs {
    pub prompt: PathBuf,
    pub target: usize,
    pub mode: String,
    /// Without a directory the result is only printed.
    pub store: Option<PathBuf>,
}

pub fn run(args: OptimizeArgs) -> Result<()> {
    let prompt = load_prompt(&args.prompt)?;
    let request = OptimizationRequest::new(prompt)
        .with_target_length(args.target)
        .with_mode(args.mode);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let store: Arc<dyn PromptStore> = match args.store {
            Some(dir) => Arc::new(JsonFilePromptStore::open(dir).await?),
            None => Arc::new(MemoryPromptStore::new()),
        };
        let outcome = OptimizationPipeline::new(store)
            .run(&request)
            .await
            .context("Optimization failed")?;
        print_json(&outcome)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_writes_store() {
        let dir = tempfile::tempdir().unwrap();
        let prompt_path = dir.path().join("prompt.json");
        std::fs::write(
            &prompt_path,
            r#"{"title":"Power Up","style":"Rock, rock, very energetic, really powerful"}"#,
        )
        .unwrap();
        let store_dir = dir.path().join("store");

        run(OptimizeArgs {
            prompt: prompt_path,
            target: 30,
            mode: "suno".to_string(),
            store: Some(store_dir.clone()),
        })
        .unwrap();

        let saved = std::fs::read_dir(&store_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .count();
        assert_eq!(saved, 1);
    }

    #[test]
    fn test_invalid_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        let prompt_path = dir.path().join("prompt.json");
        std::fs::write(&prompt_path, r#"{"title":"T","style":"S"}"#).unwrap();

        let result = run(OptimizeArgs {
            prompt: prompt_path,
            target: 10,
            mode: "suno".to_string(),
            store: None,
        });
        assert!(result.is_err());
    }
}
