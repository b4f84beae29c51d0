use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{AnalysisService, ComparisonService};
use crate::presentation::config::Settings;

pub struct AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub comparison_service: Arc<ComparisonService<F, L>>,
    pub analysis_service: Arc<AnalysisService<L>>,
    pub settings: Arc<Settings>,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            comparison_service: Arc::clone(&self.comparison_service),
            analysis_service: Arc::clone(&self.analysis_service),
            settings: Arc::clone(&self.settings),
        }
    }
}
