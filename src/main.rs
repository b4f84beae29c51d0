use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docdelta::application::services::{
    AnalysisService, ComparisonService, PromptBuilder, UploadPolicy,
};
use docdelta::infrastructure::llm::AzureOpenAiClient;
use docdelta::infrastructure::observability::init_tracing;
use docdelta::infrastructure::text_processing::CompositeFileLoader;
use docdelta::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&settings.tracing(environment)).context("Failed to initialize tracing")?;

    let azure = &settings.azure_openai;
    let llm_client = match azure.credentials() {
        Some(credentials) => {
            let client = AzureOpenAiClient::new(credentials, azure.request_timeout())
                .context("Failed to build Azure OpenAI client")?;
            tracing::info!(
                deployment = %client.deployment(),
                api_version = %azure.api_version,
                timeout_secs = azure.request_timeout_secs,
                "Azure OpenAI configured"
            );
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("Azure OpenAI credentials not set, running in demo mode");
            None
        }
    };

    let analysis_service = Arc::new(AnalysisService::new(llm_client, azure.generation()));
    let comparison_service = Arc::new(ComparisonService::new(
        Arc::new(CompositeFileLoader::with_default_adapters()),
        Arc::clone(&analysis_service),
        PromptBuilder::new(settings.profile()),
        UploadPolicy::new(settings.max_upload_bytes()),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host or port")?;

    let state = AppState {
        comparison_service,
        analysis_service,
        settings: Arc::new(settings),
    };

    tracing::info!(
        %addr,
        demo_mode = !state.analysis_service.is_configured(),
        max_upload_mb = state.settings.server.max_upload_size_mb,
        "Listening"
    );

    let router = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
