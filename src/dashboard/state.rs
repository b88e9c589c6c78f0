//! Dashboard view state management

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Home,
    Recognize,
    Settings,
}

impl DashboardView {
    /// All views, in sidebar order
    pub const ALL: [DashboardView; 3] = [
        DashboardView::Home,
        DashboardView::Recognize,
        DashboardView::Settings,
    ];

    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Home => "Home",
            DashboardView::Recognize => "Recognize",
            DashboardView::Settings => "Settings",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Home => "H",
            DashboardView::Recognize => "R",
            DashboardView::Settings => "S",
        }
    }
}

/// Overall dashboard state
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current active view
    pub current_view: DashboardView,
    /// Recognize view state
    pub recognize: RecognizeViewState,
    /// Settings view state
    pub settings: SettingsViewState,
}

/// Recognize view state
#[derive(Default)]
pub struct RecognizeViewState {
    /// Cached preview texture handle
    pub preview_texture: Option<egui::TextureHandle>,
    /// Last preview frame dimensions (to detect size changes)
    pub preview_frame_size: Option<(u32, u32)>,
}

impl std::fmt::Debug for RecognizeViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognizeViewState")
            .field("preview_texture", &self.preview_texture.as_ref().map(|_| "<texture>"))
            .field("preview_frame_size", &self.preview_frame_size)
            .finish()
    }
}

/// Settings view state
#[derive(Debug, Default)]
pub struct SettingsViewState {
    /// Unsaved changes flag
    pub has_unsaved_changes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_active_nav_entry() {
        for current in DashboardView::ALL {
            let active_count = DashboardView::ALL
                .iter()
                .filter(|view| **view == current)
                .count();
            assert_eq!(active_count, 1);
        }
    }

    #[test]
    fn test_view_names_are_unique() {
        let names: Vec<_> = DashboardView::ALL.iter().map(|v| v.name()).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn test_default_view_is_home() {
        assert_eq!(DashboardView::default(), DashboardView::Home);
        assert_eq!(DashboardState::default().current_view, DashboardView::Home);
    }
}
