//! Dashboard views

pub mod home;
pub mod recognize;
pub mod settings;

pub use home::render_home_view;
pub use recognize::render_recognize_view;
pub use settings::render_settings_view;
