use crate::cli::commands::Cli;
use anyhow::Result;
use chrono::Local;
use storysmith::Config;
use storysmith::providers::{
    ChatOptions, ChatProvider, ProviderEndpoint, create_provider, resolve_api_key,
};
use storysmith::session::{ConsoleOperator, Operator, run_session, write_report};
use storysmith::ui::style;
use tracing::Instrument;
use uuid::Uuid;

/// Resolve the provider from the final config, run one session and save it.
pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    cli.apply_overrides(&mut config);
    config.validate()?;

    let kind = config.provider_kind()?;
    let model = config.resolved_model(kind);
    let api_key = resolve_api_key(kind, config.api_key.as_deref());
    let provider = create_provider(
        kind,
        &ProviderEndpoint {
            api_key: api_key.as_deref(),
            base_url: config.base_url.as_deref(),
        },
        ChatOptions::new(model.as_str(), config.temperature).with_pricing(config.pricing_table()),
    );

    let span = tracing::info_span!(
        "session",
        id = %Uuid::new_v4(),
        provider = provider.name(),
        model = model.as_str()
    );
    run(&cli, &config, provider.as_ref()).instrument(span).await
}

async fn run(cli: &Cli, config: &Config, provider: &dyn ChatProvider) -> Result<()> {
    let mut operator = ConsoleOperator::stdio();
    let request = match &cli.request {
        Some(request) => request.clone(),
        None => operator.read_request()?,
    };
    tracing::info!(chars = request.len(), "session started");

    let report = run_session(provider, &mut operator, &request).await?;
    let path = write_report(
        &config.output_dir_path(),
        &report.document,
        Local::now().naive_local(),
    )?;

    if cli.print {
        println!("\n{}", report.document);
    } else {
        println!("\n{}\n{}", style::header("User Stories:"), report.user_stories);
    }
    println!(
        "\n{} {}",
        style::success("User stories saved to"),
        style::value(path.display())
    );
    println!(
        "{}",
        style::dim(format!(
            "{} clarifying question(s), stopped: {}, total cost ${}",
            report.rounds,
            report.outcome.describe(),
            report.stats.cost
        ))
    );
    Ok(())
}
