//! Deferred menu composition.

use super::DashboardMenu;

/// Contributes entries to the dashboard menu when it is composed.
pub trait MenuProvider: Send + Sync {
    fn compose(&self, menu: &mut DashboardMenu);
}

/// Holds menu providers until a page asks for the menu.
#[derive(Default)]
pub struct MenuComposer {
    providers: Vec<Box<dyn MenuProvider>>,
}

impl MenuComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn MenuProvider>) {
        self.providers.push(provider);
    }

    /// Build the menu by running every provider in registration order.
    pub fn compose(&self) -> DashboardMenu {
        let mut menu = DashboardMenu::new();
        for provider in &self.providers {
            provider.compose(&mut menu);
        }
        menu
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
