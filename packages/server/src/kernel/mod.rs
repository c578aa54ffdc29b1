// Infrastructure layer: dependency container and trait seams for external
// collaborators (SMS vendor, token signing).

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServiceDeps, SmsGateAdapter};
pub use test_dependencies::StubSmsSender;
pub use traits::BaseSmsSender;
