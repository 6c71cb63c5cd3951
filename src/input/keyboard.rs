//! Keyboard shortcuts.
//!
//! | Key                       | Action                                  |
//! |---------------------------|-----------------------------------------|
//! | `r` / `R`                 | Rotate the dragged item's preview       |
//! | `Delete` / `Backspace`    | Return the selected item to the panel   |
//! | `Escape`                  | Cancel the drag                         |
//! | `Ctrl+Z` / `Cmd+Z`        | Undo                                    |
//! | `Ctrl+Shift+Z` / `Ctrl+Y` | Redo                                    |
//! | `+` / `=`, `-`, `0`       | Zoom in, zoom out, reset zoom           |

use super::DragController;
use tracing::debug;

/// Modifier keys held with a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    /// Cmd on macOS
    pub platform: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn command() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    pub(crate) fn is_command(&self) -> bool {
        self.control || self.platform
    }
}

impl DragController {
    /// Handle a key press. Returns true if the key was consumed.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> bool {
        if modifiers.is_command() {
            return match key.to_ascii_lowercase().as_str() {
                "z" if modifiers.shift => self.redo(),
                "z" => self.undo(),
                "y" => self.redo(),
                _ => false,
            };
        }

        match key {
            "r" | "R" => self.rotate_drag(),
            "Delete" | "Backspace" | "delete" | "backspace" => self.remove_selected(),
            "Escape" | "escape" => self.cancel() != super::DropOutcome::Ignored,
            "+" | "=" => self.zoom_in(),
            "-" => self.zoom_out(),
            "0" => self.reset_zoom(),
            _ => false,
        }
    }

    /// Toggle the preview rotation of the dragged item.
    ///
    /// Swaps the preview width and height and recomputes the ghost at the
    /// last pointer position. No-op when idle.
    pub fn rotate_drag(&mut self) -> bool {
        if self.state.is_idle() {
            return false;
        }
        let rotated = !self.ghost.preview_rotated();
        let size = self.ghost.preview_size().rotated();
        self.ghost.set_preview_rotation(rotated);
        self.ghost.set_preview_size(size.width, size.height);
        debug!(rotated, w = size.width, h = size.height, "Preview rotated");

        self.refresh_ghost();
        true
    }

    /// Take the selected item off the grid and put it back on the panel.
    pub fn remove_selected(&mut self) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        let Some(id) = self.selection.clone() else {
            return false;
        };
        match self.remove_from_grid(&id) {
            Ok(()) => true,
            Err(e) => {
                debug!(item = %id, error = %e, "Remove shortcut ignored");
                false
            }
        }
    }
}
