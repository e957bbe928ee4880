use std::sync::Arc;

use analytics::AnalyticsContext;
use shared::protocol::DatasetSummary;

use crate::callbacks::CallbackRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) analytics: AnalyticsContext,
    pub(crate) callbacks: Arc<CallbackRegistry>,
    pub(crate) dataset: DatasetSummary,
}
