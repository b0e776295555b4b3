/// Margin band and minimum-gap validation of candidate centers
pub mod collision;
/// Layout orchestration with attempt restarts
pub mod executor;
/// Draw budget shared across one layout attempt
pub mod patience;
/// Gaussian candidate sampling around cluster estimates
pub mod sampler;
