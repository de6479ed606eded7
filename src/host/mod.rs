/// Host capabilities the pipelines consume as black boxes
///
/// - Device position (location.rs)
/// - Network reachability (connectivity.rs)
/// - Image files chosen by the user (preview.rs)
/// - Randomness for the simulated classifier and camera (random.rs)

pub mod connectivity;
pub mod preview;
pub mod location;
pub mod random;
