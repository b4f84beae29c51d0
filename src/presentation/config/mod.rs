mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, AzureCredentials, AzureOpenAiSettings, LoggingSettings, ServerSettings,
    Settings,
};
