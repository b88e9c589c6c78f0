//! Reusable dashboard components

pub mod feature_card;
pub mod sidebar;
pub mod status_card;

pub use feature_card::FeatureCard;
pub use sidebar::render_sidebar;
pub use status_card::{CardStatus, StatusCard};
