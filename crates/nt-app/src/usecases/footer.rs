//! Footer tab targets
//! 底部导航

use std::sync::Arc;

use nt_core::Route;

use crate::usecases::auth_watcher::AuthStateWatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterTab {
    Home,
    Settings,
    Profile,
}

impl FooterTab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "home" => Some(FooterTab::Home),
            "settings" => Some(FooterTab::Settings),
            "profile" => Some(FooterTab::Profile),
            _ => None,
        }
    }
}

/// The profile tab leads to the profile screen only when signed in.
pub struct FooterRouting {
    watcher: Arc<AuthStateWatcher>,
}

impl FooterRouting {
    pub fn new(watcher: Arc<AuthStateWatcher>) -> Self {
        Self { watcher }
    }

    pub fn target(&self, tab: FooterTab) -> Route {
        match tab {
            FooterTab::Home => Route::Home,
            FooterTab::Settings => Route::Settings,
            FooterTab::Profile if self.watcher.is_signed_in() => Route::Profile,
            FooterTab::Profile => Route::RegisterLogin,
        }
    }
}
