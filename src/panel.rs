//! Info panel contents: selected cube details, transient notices and the
//! help overlay. The renderer shows the result in the window title and the
//! log.

use std::time::Duration;

use crate::selection::{ObjectSnapshot, SelectionEvent};

pub const APP_TITLE: &str = "Cube Inspector";

pub const HELP_LINES: [&str; 6] = [
    "Click a cube to inspect it",
    "Click empty space or press Escape to clear the selection",
    "R: randomize the cubes",
    "W/S/A/D: orbit the camera",
    "Mouse wheel: zoom",
    "H: toggle this help",
];

/// A message that disappears on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    remaining: Duration,
}

#[derive(Debug)]
pub struct InfoPanel {
    selected: Option<ObjectSnapshot>,
    notice: Option<Notice>,
    notice_duration: Duration,
    help_visible: bool,
}

impl InfoPanel {
    pub fn new(notice_duration: Duration) -> Self {
        Self {
            selected: None,
            notice: None,
            notice_duration,
            help_visible: false,
        }
    }

    pub fn apply(&mut self, event: &SelectionEvent) {
        match event {
            SelectionEvent::Changed(snapshot) => {
                self.selected = Some(snapshot.clone());
                self.notice = None;
                for line in self.lines() {
                    log::info!("{line}");
                }
            }
            SelectionEvent::Cleared => self.selected = None,
        }
    }

    /// Show `text` until the notice duration has elapsed.
    pub fn show_notice(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.notice = Some(Notice {
            text,
            remaining: self.notice_duration,
        });
    }

    /// Count down the notice by one frame of `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(notice) = &mut self.notice {
            notice.remaining = notice.remaining.saturating_sub(dt);
            if notice.remaining.is_zero() {
                self.notice = None;
            }
        }
    }

    pub fn toggle_help(&mut self) -> bool {
        self.help_visible = !self.help_visible;
        if self.help_visible {
            for line in HELP_LINES {
                log::info!("{line}");
            }
        }
        self.help_visible
    }

    pub fn selected(&self) -> Option<&ObjectSnapshot> {
        self.selected.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Panel rows for the selected cube, empty when nothing is selected.
    pub fn lines(&self) -> Vec<String> {
        let Some(s) = &self.selected else {
            return Vec::new();
        };
        vec![
            format!("Cube ID: {}", s.id.0),
            format!(
                "Position: X {:.2}  Y {:.2}  Z {:.2}",
                s.position.x, s.position.y, s.position.z
            ),
            format!(
                "Size: W {:.2}  H {:.2}  D {:.2}",
                s.size.width, s.size.height, s.size.depth
            ),
            format!("Color: {}", s.color_hex),
        ]
    }

    /// One-line summary for the window title. Help wins over a notice,
    /// a notice wins over the selection.
    pub fn title(&self) -> String {
        if self.help_visible {
            return format!("{APP_TITLE} | {}", HELP_LINES.join(" | "));
        }
        if let Some(notice) = &self.notice {
            return format!("{APP_TITLE} | {}", notice.text);
        }
        match &self.selected {
            Some(s) => format!(
                "{APP_TITLE} | Cube {} | pos ({:.2}, {:.2}, {:.2}) | size {:.2} x {:.2} x {:.2} | {}",
                s.id.0,
                s.position.x,
                s.position.y,
                s.position.z,
                s.size.width,
                s.size.height,
                s.size.depth,
                s.color_hex
            ),
            None => format!("{APP_TITLE} | Click on a cube to see its properties"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Dimensions, ObjectId};
    use glam::Vec3;

    fn snapshot() -> ObjectSnapshot {
        ObjectSnapshot {
            id: ObjectId(7),
            position: Vec3::new(1.234, -2.0, 3.456),
            size: Dimensions::new(0.5, 1.25, 2.0),
            color_hex: "#3498DB".to_owned(),
        }
    }

    #[test]
    fn changed_event_fills_the_panel() {
        let mut panel = InfoPanel::new(Duration::from_secs(2));
        panel.apply(&SelectionEvent::Changed(snapshot()));
        assert_eq!(
            panel.lines(),
            vec![
                "Cube ID: 7",
                "Position: X 1.23  Y -2.00  Z 3.46",
                "Size: W 0.50  H 1.25  D 2.00",
                "Color: #3498DB",
            ]
        );
        assert!(panel.title().contains("Cube 7"));
    }

    #[test]
    fn cleared_event_empties_the_panel() {
        let mut panel = InfoPanel::new(Duration::from_secs(2));
        panel.apply(&SelectionEvent::Changed(snapshot()));
        panel.apply(&SelectionEvent::Cleared);
        assert!(panel.selected().is_none());
        assert!(panel.lines().is_empty());
        assert!(panel.title().ends_with("Click on a cube to see its properties"));
    }

    #[test]
    fn notice_dismisses_itself() {
        let mut panel = InfoPanel::new(Duration::from_secs(2));
        panel.show_notice("No cube selected");
        assert!(panel.title().ends_with("No cube selected"));

        panel.advance(Duration::from_millis(1500));
        assert!(panel.notice().is_some());
        panel.advance(Duration::from_millis(600));
        assert!(panel.notice().is_none());
    }

    #[test]
    fn new_selection_replaces_notice() {
        let mut panel = InfoPanel::new(Duration::from_secs(2));
        panel.show_notice("No cube selected");
        panel.apply(&SelectionEvent::Changed(snapshot()));
        assert!(panel.notice().is_none());
    }

    #[test]
    fn help_overrides_title_until_toggled_off() {
        let mut panel = InfoPanel::new(Duration::from_secs(2));
        assert!(panel.toggle_help());
        assert!(panel.title().contains("toggle this help"));
        assert!(!panel.toggle_help());
        assert!(!panel.title().contains("toggle this help"));
    }
}
