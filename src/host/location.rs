//! Device position acquisition
//!
//! A [`LocationProvider`] answers one "where am I" query synchronously; the
//! provider may block, so [`acquire_location`] runs it on tokio's blocking
//! pool and enforces the timeout itself rather than trusting the provider.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::error::LocationError;
use crate::state::config::LocationConfig;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    /// Short label used in headers ("40.4168, -3.7038")
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Full-precision coordinates for the details panel
    pub fn precise(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Options for one acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    /// Ask the host for its most precise fix
    pub high_accuracy: bool,
    /// Give up after this long
    pub timeout: Duration,
    /// Oldest cached fix the host may return (zero = always fresh)
    pub maximum_age: Duration,
}

impl PositionOptions {
    /// High accuracy, no cached fixes, the given timeout
    pub fn fresh(timeout: Duration) -> Self {
        Self {
            high_accuracy: true,
            timeout,
            maximum_age: Duration::ZERO,
        }
    }
}

/// Host capability that can report the device position
pub trait LocationProvider: Debug + Send + Sync + 'static {
    /// May block. Called from the blocking pool.
    fn current_position(&self, options: &PositionOptions) -> Result<GeoPosition, LocationError>;
}

/// Provider backed by the configuration file.
///
/// Desktop machines rarely expose a position, so the "device" position is
/// whatever the user configured, guarded by a permission switch.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    config: LocationConfig,
}

impl ConfiguredLocation {
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, LocationError> {
        if !self.config.permission_granted {
            return Err(LocationError::PermissionDenied);
        }
        if let Some(code) = self.config.fault_code {
            return Err(LocationError::from_code(code));
        }

        let (Some(latitude), Some(longitude)) = (self.config.latitude, self.config.longitude) else {
            return Err(LocationError::PositionUnavailable);
        };

        let position = GeoPosition { latitude, longitude };
        if !position.is_valid() {
            tracing::warn!("Configured position {:?} is out of range", position);
            return Err(LocationError::PositionUnavailable);
        }

        Ok(position)
    }
}

/// Query `provider` once, bounded by `options.timeout`.
///
/// A provider that panics surfaces as [`LocationError::Unknown`]. A provider
/// that overruns the timeout is abandoned (its result is dropped).
pub async fn acquire_location(
    provider: Arc<dyn LocationProvider>,
    options: PositionOptions,
) -> Result<GeoPosition, LocationError> {
    tracing::debug!(
        "Requesting position (high accuracy: {}, max age: {:?}, timeout: {:?})",
        options.high_accuracy,
        options.maximum_age,
        options.timeout
    );
    let query = task::spawn_blocking(move || provider.current_position(&options));

    match tokio::time::timeout(options.timeout, query).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            tracing::warn!("Location provider task failed: {}", e);
            Err(LocationError::Unknown)
        }
        Err(_) => Err(LocationError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider that answers after a real (thread) delay
    #[derive(Debug)]
    struct SlowProvider(Duration);

    impl LocationProvider for SlowProvider {
        fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, LocationError> {
            std::thread::sleep(self.0);
            Ok(GeoPosition {
                latitude: 1.0,
                longitude: 2.0,
            })
        }
    }

    /// Provider that reports a raw host fault code
    #[derive(Debug)]
    struct FaultingProvider(u16);

    impl LocationProvider for FaultingProvider {
        fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, LocationError> {
            Err(LocationError::from_code(self.0))
        }
    }

    #[derive(Debug)]
    struct PanickingProvider;

    impl LocationProvider for PanickingProvider {
        fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, LocationError> {
            panic!("sensor exploded");
        }
    }

    fn options() -> PositionOptions {
        PositionOptions::fresh(Duration::from_secs(5))
    }

    #[test]
    fn test_fresh_options() {
        let options = options();
        assert!(options.high_accuracy);
        assert_eq!(options.maximum_age, Duration::ZERO);
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_configured_position() {
        let provider = ConfiguredLocation::new(LocationConfig::default());
        let position = provider.current_position(&options()).unwrap();
        assert_eq!(position.label(), "40.4168, -3.7038");
        assert_eq!(position.precise(), "40.416800, -3.703800");
    }

    #[test]
    fn test_configured_permission_denied() {
        let provider = ConfiguredLocation::new(LocationConfig {
            permission_granted: false,
            ..LocationConfig::default()
        });
        assert_eq!(
            provider.current_position(&options()),
            Err(LocationError::PermissionDenied)
        );
    }

    #[test]
    fn test_configured_missing_or_invalid_position() {
        let missing = ConfiguredLocation::new(LocationConfig {
            latitude: None,
            ..LocationConfig::default()
        });
        assert_eq!(
            missing.current_position(&options()),
            Err(LocationError::PositionUnavailable)
        );

        let invalid = ConfiguredLocation::new(LocationConfig {
            latitude: Some(123.0),
            ..LocationConfig::default()
        });
        assert_eq!(
            invalid.current_position(&options()),
            Err(LocationError::PositionUnavailable)
        );
    }

    #[test]
    fn test_configured_fault_codes() {
        let expected = [
            (1, LocationError::PermissionDenied),
            (2, LocationError::PositionUnavailable),
            (3, LocationError::Timeout),
            (7, LocationError::Unknown),
        ];
        for (code, error) in expected {
            let provider = ConfiguredLocation::new(LocationConfig {
                fault_code: Some(code),
                ..LocationConfig::default()
            });
            assert_eq!(provider.current_position(&options()), Err(error));
        }
    }

    #[tokio::test]
    async fn test_acquire_passes_through_result() {
        let provider: Arc<dyn LocationProvider> = Arc::new(ConfiguredLocation::new(LocationConfig::default()));
        let position = acquire_location(provider, options()).await.unwrap();
        assert_eq!(position.latitude, 40.4168);
    }

    #[tokio::test]
    async fn test_acquire_maps_each_fault_code() {
        let expected = [
            (1, LocationError::PermissionDenied),
            (2, LocationError::PositionUnavailable),
            (3, LocationError::Timeout),
            (42, LocationError::Unknown),
        ];
        for (code, error) in expected {
            let provider: Arc<dyn LocationProvider> = Arc::new(FaultingProvider(code));
            assert_eq!(acquire_location(provider, options()).await, Err(error));
        }
    }

    #[tokio::test]
    async fn test_acquire_times_out_slow_provider() {
        let provider: Arc<dyn LocationProvider> = Arc::new(SlowProvider(Duration::from_millis(300)));
        let result = acquire_location(provider, PositionOptions::fresh(Duration::from_millis(20))).await;
        assert_eq!(result, Err(LocationError::Timeout));
    }

    #[tokio::test]
    async fn test_acquire_panicking_provider_is_unknown() {
        let provider: Arc<dyn LocationProvider> = Arc::new(PanickingProvider);
        assert_eq!(
            acquire_location(provider, options()).await,
            Err(LocationError::Unknown)
        );
    }
}
