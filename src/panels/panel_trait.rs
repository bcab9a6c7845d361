use egui::Ui;

/// Title, icon and visibility shared by every panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: &'static str,
    pub visible: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon,
            visible: true,
        }
    }
}

pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    /// Icon and title, for menu entries and panel headers.
    fn label(&self) -> String {
        format!("{} {}", self.state().icon, self.state().title)
    }

    /// Visibility toggle for the View menu.
    fn render_menu(&mut self, ui: &mut Ui) {
        let label = self.label();
        ui.checkbox(&mut self.state_mut().visible, label);
    }
}
