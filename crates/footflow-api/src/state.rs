use footflow_core::feedback::FeedbackService;
use footflow_core::ports::FeedbackLog;
use footflow_core::Explorer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub explorer: Explorer,
    pub feedback: FeedbackService,
}

impl AppState {
    pub fn new(explorer: Explorer, feedback_log: Arc<dyn FeedbackLog>) -> Self {
        Self {
            explorer,
            feedback: FeedbackService::new(feedback_log),
        }
    }
}
