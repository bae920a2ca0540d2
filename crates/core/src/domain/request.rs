// Invocation Request

use serde::{Deserialize, Serialize};

use crate::application::constants::DEFAULT_PREDICT_LIMIT;

/// One inference call: the prompt and how many tokens to ask for
///
/// Neither field is validated. An empty prompt or a zero/negative limit is
/// handed to the child process as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub prompt: String,
    #[serde(default = "default_predict_limit")]
    pub predict_limit: i64,
}

fn default_predict_limit() -> i64 {
    DEFAULT_PREDICT_LIMIT
}

impl InvocationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            predict_limit: DEFAULT_PREDICT_LIMIT,
        }
    }

    pub fn with_predict_limit(mut self, predict_limit: i64) -> Self {
        self.predict_limit = predict_limit;
        self
    }
}

impl From<&str> for InvocationRequest {
    fn from(prompt: &str) -> Self {
        Self::new(prompt)
    }
}

impl From<String> for InvocationRequest {
    fn from(prompt: String) -> Self {
        Self::new(prompt)
    }
}
