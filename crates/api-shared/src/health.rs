use crate::models::HealthRes;

/// Simple health service shared by the REST API and the CLI.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as healthy, naming the document-store backend in use.
    pub fn check_health(backend: &str) -> HealthRes {
        HealthRes {
            ok: true,
            message: format!("catalog is alive ({} store)", backend),
        }
    }
}
