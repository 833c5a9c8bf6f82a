use clap::Parser;
use phishguard_cli::cli::{Cli, Commands};
use phishguard_cli::config::AppConfig;
use phishguard_cli::input::{is_blank, read_email};
use phishguard_cli::report::{render_summary, AnalysisReport, EMPTY_INPUT_WARNING};
use phishguard_cli::session::{load_failure_guidance, select_model, Session};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Commands::Models => {
            let registry = config.model_registry()?;
            let selected = select_model(&registry, config.default_model.as_deref())?;
            for entry in registry.entries() {
                let marker = if entry.name == selected.name { "*" } else { " " };
                println!(
                    "{} {:<12} {}  {}",
                    marker,
                    entry.name,
                    entry.classifier_artifact_path.display(),
                    entry.vectorizer_artifact_path.display()
                );
            }
        }

        Commands::Analyze {
            model,
            text,
            file,
            report,
            json,
        } => {
            let config = config.with_model(model);

            let session = match Session::start(&config) {
                Ok(session) => session,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    if let Some(guidance) = load_failure_guidance(&config, &err) {
                        eprintln!("{}", guidance);
                    }
                    std::process::exit(1);
                }
            };

            let text = read_email(text, file.as_deref())?;
            if is_blank(&text) {
                warn!("{}", EMPTY_INPUT_WARNING);
                eprintln!("{}", EMPTY_INPUT_WARNING);
                return Ok(());
            }

            let analysis = session.analyze(&text)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", render_summary(&analysis));
            }

            if let Some(path) = report {
                AnalysisReport::new(&text, &analysis).write_to(&path)?;
                info!("Report written to {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "phishguard=debug,phishguard_cli=debug,phishguard_classifiers=debug"
    } else {
        "phishguard=info,phishguard_cli=info,phishguard_classifiers=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
