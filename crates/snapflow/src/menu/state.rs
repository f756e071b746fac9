//! Menu state machine
//!
//! Two screens and a terminal state. Transitions are pure so the flow
//! can be tested without touching stdin or the network.

use snapflow_hcloud::Server;

/// Current screen
#[derive(Debug, Clone, PartialEq)]
pub enum MenuState {
    /// Server list, token storage, quit
    MainMenu,
    /// Snapshot management for one server
    ServerMenu(Server),
    /// Terminal state; the run loop stops
    Exited,
}

/// A parsed input event
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEvent {
    SelectServer(Server),
    StoreToken,
    Refresh,
    CreateSnapshot,
    DeleteSnapshot,
    Back,
    Quit,
}

impl MenuState {
    /// Transition table. Screen-local actions (create, delete, refresh,
    /// token storage) keep the current state; the screen is redrawn with
    /// fresh data on the next pass of the run loop.
    pub fn apply(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (_, MenuEvent::Quit) => MenuState::Exited,
            (MenuState::MainMenu, MenuEvent::SelectServer(server)) => {
                MenuState::ServerMenu(server)
            }
            (MenuState::ServerMenu(_), MenuEvent::Back) => MenuState::MainMenu,
            (state, _) => state,
        }
    }
}
