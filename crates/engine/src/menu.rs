//! Menu entries and cursor handling shared by the main and pause menus.

use crate::types::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    Play,
    Rankings,
    Settings,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseMenuItem {
    Continue,
    Restart,
    MainMenu,
}

pub const MAIN_MENU: [MainMenuItem; 4] = [
    MainMenuItem::Play,
    MainMenuItem::Rankings,
    MainMenuItem::Settings,
    MainMenuItem::Quit,
];

pub const PAUSE_MENU: [PauseMenuItem; 3] = [
    PauseMenuItem::Continue,
    PauseMenuItem::Restart,
    PauseMenuItem::MainMenu,
];

/// Display text of a menu entry
pub trait MenuLabel {
    fn label(&self) -> &'static str;
}

impl MenuLabel for MainMenuItem {
    fn label(&self) -> &'static str {
        match self {
            MainMenuItem::Play => "Play",
            MainMenuItem::Rankings => "Rankings",
            MainMenuItem::Settings => "Settings",
            MainMenuItem::Quit => "Quit",
        }
    }
}

impl MenuLabel for PauseMenuItem {
    fn label(&self) -> &'static str {
        match self {
            PauseMenuItem::Continue => "Continue",
            PauseMenuItem::Restart => "Restart",
            PauseMenuItem::MainMenu => "Main Menu",
        }
    }
}

/// Highlighted entry of whichever menu is on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuCursor {
    selected: usize,
}

impl MenuCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Up/Down move the cursor (wrapping); Enter returns the highlighted item.
    pub fn handle<T: Copy>(&mut self, key: Key, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let len = items.len();
        match key {
            Key::Up => {
                self.selected = (self.selected + len - 1) % len;
                None
            }
            Key::Down => {
                self.selected = (self.selected + 1) % len;
                None
            }
            Key::Enter => items.get(self.selected.min(len - 1)).copied(),
            _ => None,
        }
    }
}
