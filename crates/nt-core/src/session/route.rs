use serde::{Deserialize, Serialize};

/// Screens the gate can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    RegisterLogin,
    UserSetup,
    Profile,
    Settings,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::RegisterLogin => "RegisterLogin",
            Route::UserSetup => "UserSetup",
            Route::Profile => "Profile",
            Route::Settings => "Settings",
        }
    }
}

/// Which screen to show at the bottom of the stack, and optionally which
/// screen to push on top of it right away.
///
/// `provisional` is set while the decision rests on the local hint alone
/// and may still be overridden when the identity stream reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub initial_route: Route,
    pub redirect_route: Option<Route>,
    pub provisional: bool,
}

impl RouteDecision {
    pub fn settled(initial_route: Route) -> Self {
        Self {
            initial_route,
            redirect_route: None,
            provisional: false,
        }
    }

    /// The screen the user ends up looking at.
    pub fn visible_route(&self) -> Route {
        self.redirect_route.unwrap_or(self.initial_route)
    }
}
