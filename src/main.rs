//! shopsnap - main entry point

use clap::Parser;
use log::{error, info};

use shopsnap::ui::{create_spinner, finish_spinner};
use shopsnap::{
    ArtifactWriter, Cli, CredentialResolver, ExtractOutcome, Extractor, JobReport, ResourceKind,
    RunSummary, ShopTransport,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting shopsnap v{}", env!("CARGO_PKG_VERSION"));

    let creds = CredentialResolver::resolve(
        cli.key.as_deref(),
        cli.password.as_deref(),
        cli.shop.as_deref(),
    )?;

    let shop = ShopTransport::new(creds).into_read_only();

    if !cli.no_ping {
        info!("Checking the shop answers before extracting");
        if !shop.ping().await {
            return Err(
                "shop did not answer the preflight check; aborting (use --no-ping to skip)".into(),
            );
        }
    }

    let writer = ArtifactWriter::new(&cli.out_dir, cli.overwrite);
    let extractor = Extractor::new(&shop, &writer);
    let opts = cli.extract_options();

    let mut summary = RunSummary::new();
    for resource in cli.selected_resources() {
        let spinner = create_spinner(&format!("Extracting {}...", resource), cli.quiet);

        let outcome = match resource {
            ResourceKind::SmartCollections => extractor.extract_smart_collections(&opts).await,
            ResourceKind::CustomCollections => extractor.extract_custom_collections(&opts).await,
            ResourceKind::Collects => extractor.extract_collects(&opts).await,
            ResourceKind::Products => extractor.extract_products(&opts).await,
        };

        finish_spinner(
            spinner,
            &format!("{}: {}", resource, outcome.status_label()),
        );

        if let ExtractOutcome::Failed { errors, .. } = &outcome {
            for err in errors {
                error!("{}: {}", resource, err);
            }
        }

        summary.push(JobReport::new(&resource.to_string(), &outcome));
    }

    summary.print_table();

    if !cli.no_write {
        match summary.write_manifest(&writer) {
            Ok(path) => info!("Run manifest written to {}", path.display()),
            Err(e) => error!("Failed to write run manifest: {}", e),
        }
    }

    if summary.had_errors() {
        info!("Completed with some errors");
        std::process::exit(1);
    }
    info!("Completed successfully");
    Ok(())
}
