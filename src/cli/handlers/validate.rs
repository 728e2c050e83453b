//! Offline validation and prompt inspection handlers

use crate::cli::handlers::read_input;
use crate::cli::output::print_validation_summary;
use crate::prompts;
use crate::validation::ResponseValidator;
use crate::validation::ValidationReport;
use crate::validation::ValidatorConfig;
use crate::AppConfig;
use crate::Result;

pub struct ValidateOptions {
    pub strict: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub json: bool,
}

pub fn handle_validate(
    config: &AppConfig,
    response: &str,
    context: &str,
    query: &str,
    options: &ValidateOptions,
) -> Result<()> {
    let response = read_input(response)?;
    let context = read_input(context)?;
    let query = read_input(query)?;

    let mut validator_config = ValidatorConfig::from_app_config(config);
    if let Some(min_length) = options.min_length {
        validator_config.min_length = min_length;
    }
    if let Some(max_length) = options.max_length {
        validator_config.max_length = max_length;
    }
    validator_config.strict_mode |= options.strict;

    let outcome = ResponseValidator::new(validator_config).validate(&response, &context, &query);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", ValidationReport::format(&outcome));
        print_validation_summary(&outcome);
    }

    Ok(())
}

pub fn handle_prompt(strategy: &str, context: &str, query: &str) -> Result<()> {
    let context = read_input(context)?;
    let query = read_input(query)?;

    let strategy = prompts::get_by_name(strategy);
    println!(
        "# {} (max_tokens recomendados: {})",
        strategy.name, strategy.max_tokens_recommended
    );
    println!();
    println!("{}", strategy.build(&context, &query));
    Ok(())
}
