use crate::models::OptionsConfig;
use crate::services::aggregator::OperationAggregator;
use crate::services::classifier::{ClassifyError, PathClassifier};
use crate::services::resolver::{resolve_overrides, OverridePrompt};
use crate::services::synthesis::synthesize;
use camino::Utf8PathBuf;

/// Outcome of building converter options for one batch of dropped paths
#[derive(Debug)]
pub enum Synthesis {
    /// Arguments ready to hand to the converter
    Ready(Vec<String>),
    /// At least one path could not be classified; already reported to the prompt
    Rejected(Vec<ClassifyError>),
    /// The prompt ran out of input; the user backed out
    Aborted,
}

/// Turn dropped paths plus configuration into converter arguments.
///
/// 1. Ask once per directory holding bundles for a shared decompile directory
/// 2. Classify every path, collecting errors instead of stopping
/// 3. Group by `(operation, output)` in first-seen order
/// 4. Render the argument list, or report every error together
pub fn build_options(
    config: &OptionsConfig,
    paths: &[Utf8PathBuf],
    prompt: &mut dyn OverridePrompt,
) -> Synthesis {
    tracing::info!("Building options for {} dropped paths", paths.len());

    let Some(overrides) = resolve_overrides(paths, prompt) else {
        tracing::info!("Input exhausted while choosing directories, aborting");
        return Synthesis::Aborted;
    };

    let classifier = PathClassifier::new(&overrides);
    let aggregation = paths
        .iter()
        .fold(OperationAggregator::new(), |aggregation, path| {
            let result = classifier.classify(path);
            if let Ok(entry) = &result {
                tracing::debug!("{} -> {} {}", path, entry.operation, entry.output);
            }
            aggregation.record(result)
        });

    match synthesize(config, aggregation) {
        Ok(args) => {
            tracing::info!("Synthesized {} converter arguments", args.len());
            Synthesis::Ready(args)
        }
        Err(errors) => {
            tracing::warn!("Rejected batch with {} unrecognized paths", errors.len());
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            prompt.report_errors(&messages);
            Synthesis::Rejected(errors)
        }
    }
}
