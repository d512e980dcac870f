//! Application State

use std::sync::Arc;

use assistant_core::LlmProvider;
use swap_assistant::Assistant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Routing, quoting and knowledge answers
    pub assistant: Arc<Assistant>,

    /// Completion provider, if one was reachable at startup
    pub provider: Option<Arc<dyn LlmProvider>>,
}
