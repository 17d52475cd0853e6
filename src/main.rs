use allpairs_prm::config::cli::{Cli, Command};
use allpairs_prm::config::DatasetConfig;
use allpairs_prm::core::{inputs, output};
use allpairs_prm::utils::error::ErrorSeverity;
use allpairs_prm::utils::{logger, validation::Validate};
use allpairs_prm::{
    AllPairs, AllPairsConfig, CliContainerExecutor, FilenameMap, PathwayAlgorithm, PathwayEngine,
    PipelineLayout, PrmError, Result, RunParams, TableDataset,
};
use clap::Parser;

/// Exit code when the dataset has no source/target annotations.
const EXIT_NO_SOURCES_TARGETS: i32 = 4;

enum Outcome {
    Completed,
    NoSourcesTargets,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting allpairs");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    match execute(cli).await {
        Ok(Outcome::Completed) => {}
        Ok(Outcome::NoSourcesTargets) => {
            eprintln!("Dataset has no source/target annotations, nothing was generated");
            std::process::exit(EXIT_NO_SOURCES_TARGETS);
        }
        Err(e) => {
            tracing::error!(
                "allpairs failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            std::process::exit(exit_code(e.severity()));
        }
    }
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn execute(cli: Cli) -> Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            AllPairsConfig::from_file(path)?
        }
        None => AllPairsConfig::default(),
    };

    match cli.command {
        Command::GenerateInputs {
            dataset,
            nodetypes,
            network,
        } => {
            config.validate()?;
            let dataset = load_dataset(&dataset.resolve(&config)?)?;

            let mut filename_map = FilenameMap::new();
            filename_map.insert("nodetypes".to_string(), nodetypes);
            filename_map.insert("network".to_string(), network);

            match inputs::generate_inputs(&dataset, &filename_map)? {
                Some(summary) => {
                    println!(
                        "Wrote {} node types and {} edges",
                        summary.node_rows, summary.edge_rows
                    );
                    Ok(Outcome::Completed)
                }
                None => Ok(Outcome::NoSourcesTargets),
            }
        }

        Command::Run {
            nodetypes,
            network,
            output_file,
            container,
        } => {
            container.apply(&mut config);
            config.validate()?;

            let params = RunParams {
                nodetypes,
                network,
                output_file: output_file.clone(),
                framework: config.container.framework,
            };
            let executor = CliContainerExecutor::from_settings(&config.container);
            let allpairs = AllPairs::new(executor, config.container.clone());
            allpairs.run(&params).await?;

            if let Some(path) = output_file {
                println!("Pathway saved to: {}", path.display());
            }
            Ok(Outcome::Completed)
        }

        Command::ParseOutput {
            raw_pathway,
            standardized_pathway,
        } => {
            let rows = output::parse_output(&raw_pathway, &standardized_pathway)?;
            println!(
                "Standardized {} edges into {}",
                rows,
                standardized_pathway.display()
            );
            Ok(Outcome::Completed)
        }

        Command::Pipeline {
            dataset,
            output_dir,
            metrics_file,
            container,
        } => {
            container.apply(&mut config);
            config.validate()?;

            let dataset = load_dataset(&dataset.resolve(&config)?)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_directory());
            let metrics_file = metrics_file.or_else(|| config.metrics_file().map(Into::into));
            let layout = PipelineLayout::in_dir(&output_dir);

            let executor = CliContainerExecutor::from_settings(&config.container);
            let allpairs = AllPairs::new(executor, config.container.clone());
            let engine = PathwayEngine::new_with_monitoring(allpairs, cli.monitor);

            let Some(report) = engine
                .run(&dataset, &layout, config.container.framework)
                .await?
            else {
                return Ok(Outcome::NoSourcesTargets);
            };

            tracing::info!(
                "Pipeline finished in {:?}",
                report.total_duration()
            );
            if let Some(path) = metrics_file {
                report.write_json(&path)?;
                println!("Metrics exported to: {}", path.display());
            }
            println!(
                "Pathway with {} edges saved to: {}",
                report.pathway_edges,
                report.layout.pathway.display()
            );
            Ok(Outcome::Completed)
        }
    }
}

fn load_dataset(dataset: &DatasetConfig) -> Result<TableDataset> {
    if dataset.sources.is_none() && dataset.targets.is_none() {
        tracing::warn!("Neither --sources nor --targets given");
    }
    TableDataset::from_files(
        dataset.sources.as_deref(),
        dataset.targets.as_deref(),
        &dataset.interactome,
    )
    .map_err(|e| match e {
        PrmError::IoError(source) => PrmError::ConfigError {
            message: format!("could not read dataset: {}", source),
        },
        other => other,
    })
}
