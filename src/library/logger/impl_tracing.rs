use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Forwards log lines to `tracing` so a subscriber installed by the binary
/// decides formatting and filtering.
#[derive(Debug, Clone, Default)]
pub struct LoggerTracing {
    namespace: String,
}

impl LoggerTracing {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for LoggerTracing {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(namespace = %self.namespace, "{}", message);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::warn!(namespace = %self.namespace, "{}", message);
        Ok(())
    }

    fn debug(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!(namespace = %self.namespace, "{}", message);
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let namespace = if self.namespace.is_empty() {
            namespace.to_string()
        } else {
            format!("{}:{}", self.namespace, namespace)
        };

        Arc::new(LoggerTracing { namespace })
    }
}
