use crate::models::OptionsConfig;
use crate::services::aggregator::OperationAggregator;
use crate::services::classifier::ClassifyError;
use crate::services::tokenizer::tokenize;

/// Flags taken straight from the configuration, before any operation groups.
///
/// Order: game, `-basedir`, `-backup`, `-extra` entries, then the tokenized
/// `other_options`. No validation happens here; the converter rejects bad values.
pub fn config_arguments(config: &OptionsConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(game) = config.game() {
        args.push(format!("-{game}"));
    }
    if let Some(base_dir) = config.base_dir() {
        args.push("-basedir".to_string());
        args.push(base_dir.to_string());
    }
    if config.backup {
        args.push("-backup".to_string());
    }
    if !config.extra.is_empty() {
        args.push("-extra".to_string());
        args.extend(config.extra.iter().map(|(name, path)| format!("{name}={path}")));
    }
    if !config.other_options.trim().is_empty() {
        args.extend(tokenize(&config.other_options));
    }

    args
}

/// Render the full converter argument list.
///
/// Each group becomes `-i <inputs...> -<operation> <output>`. If any path
/// failed to classify, nothing is rendered and every error is returned.
pub fn synthesize(
    config: &OptionsConfig,
    aggregation: OperationAggregator,
) -> Result<Vec<String>, Vec<ClassifyError>> {
    let (groups, errors) = aggregation.into_parts();
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut args = config_arguments(config);
    for (key, inputs) in groups {
        args.push("-i".to_string());
        args.extend(inputs.into_iter().map(String::from));
        args.push(key.operation.flag());
        args.push(key.output);
    }

    Ok(args)
}
