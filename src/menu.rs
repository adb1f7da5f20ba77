use crate::config::TrayConfig;

/// Entries of the tray's context menu. The discriminant is the command id
/// the platform reports when the entry is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr, strum::EnumIter)]
#[repr(u32)]
pub enum MenuItem {
    ShowApp = 1,
    Exit = 2,
}

impl MenuItem {
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::from_repr(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { item: MenuItem, label: String },
    Separator,
}

impl MenuEntry {
    fn item(item: MenuItem, label: &str) -> Self {
        Self::Item {
            item,
            label: label.to_owned(),
        }
    }
}

/// The fixed context menu: show app, separator, exit.
pub fn tray_menu(config: &TrayConfig) -> Vec<MenuEntry> {
    vec![
        MenuEntry::item(MenuItem::ShowApp, &config.show_label),
        MenuEntry::Separator,
        MenuEntry::item(MenuItem::Exit, &config.exit_label),
    ]
}
