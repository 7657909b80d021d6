//! Screen and anchor state identifiers.

use serde::{Deserialize, Serialize};

/// Which home screen variant is mounted.
///
/// Fixed for the lifetime of a coordinator; switching screens builds a new one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HomeScreen {
    #[default]
    Home,
    Favorites,
    Search,
    FavoritesSearch,
}

impl HomeScreen {
    /// All screens, in declaration order.
    pub const ALL: [HomeScreen; 4] = [
        HomeScreen::Home,
        HomeScreen::Favorites,
        HomeScreen::Search,
        HomeScreen::FavoritesSearch,
    ];

    /// Stable lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            HomeScreen::Home => "home",
            HomeScreen::Favorites => "favorites",
            HomeScreen::Search => "search",
            HomeScreen::FavoritesSearch => "favorites_search",
        }
    }

    /// Parse a screen from its [`name`](Self::name). Dashes are accepted for underscores.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|s| s.name() == normalized)
    }
}

/// Anchor states of the horizontal menu drawer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    Opened,
    #[default]
    Closed,
}

impl MenuState {
    /// The opposite drawer state.
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Opened => MenuState::Closed,
            MenuState::Closed => MenuState::Opened,
        }
    }
}

/// Anchor states of the vertical content card.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    #[default]
    Collapsed,
    Expanded,
}

/// Toolbar visual variant selected by the drawer state and screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarMode {
    #[default]
    Main,
    MainClosed,
    Favorites,
    FavoritesSearch,
    Search,
}
