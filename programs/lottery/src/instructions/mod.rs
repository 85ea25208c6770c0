pub mod admin;
pub mod check_upkeep;
pub mod enter_lottery;
pub mod fulfill_randomness;
pub mod perform_upkeep;
pub mod queries;

pub use admin::*;
pub use check_upkeep::*;
pub use enter_lottery::*;
pub use fulfill_randomness::*;
pub use perform_upkeep::*;
pub use queries::*;
