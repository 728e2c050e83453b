use bpgrag::cli::*;
use bpgrag::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(cli.config.as_deref(), cli.preset.as_deref())?;

    // Initialize logging
    if cli.verbose {
        bpgrag::logging::init_logging_with_level("debug")?;
    } else {
        bpgrag::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Ask {
            question,
            k,
            temperature,
            max_tokens,
            strategy,
            report,
            json,
        } => {
            handle_ask(
                &config,
                question,
                AskOptions {
                    k,
                    temperature,
                    max_tokens,
                    strategy,
                    report,
                    json,
                },
            )
            .await?;
        }
        Commands::Search { question, k } => {
            handle_search(&config, &question, k).await?;
        }
        Commands::Chat => {
            handle_chat(&config).await?;
        }
        Commands::Validate {
            response,
            context,
            query,
            strict,
            min_length,
            max_length,
            json,
        } => {
            handle_validate(
                &config,
                &response,
                &context,
                &query,
                &ValidateOptions {
                    strict,
                    min_length,
                    max_length,
                    json,
                },
            )?;
        }
        Commands::Prompt {
            strategy,
            context,
            query,
        } => {
            handle_prompt(&strategy, &context, &query)?;
        }
        Commands::Strategies => {
            handle_strategies_command(&config);
        }
        Commands::Config => {
            handle_config_command(&config);
        }
        Commands::Check => {
            if !handle_check_command(&config).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
