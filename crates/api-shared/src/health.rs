use crate::views::HealthRes;

/// Simple health service shared by the REST server and the CLI.
///
/// This service provides a standardised way to check the liveness of the analytics service.
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is alive.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Vitals analytics is alive".into(),
        }
    }
}
