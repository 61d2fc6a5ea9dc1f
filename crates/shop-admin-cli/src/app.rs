use shop_admin_client::{AdminApi, Product, User};
use shop_admin_core::{Dashboard, DraftField, SessionStore};
use tracing::info;

/// Screen states for the TUI state machine
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    SignIn,
    Dashboard,
    ConfirmLogout,
    Message(String, bool), // Message, is_error
}

/// Dashboard sections
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Users,
    Products,
    NewProduct,
}

impl Tab {
    pub fn all() -> [Tab; 3] {
        [Tab::Users, Tab::Products, Tab::NewProduct]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Users => 0,
            Tab::Products => 1,
            Tab::NewProduct => 2,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Users => Tab::Products,
            Tab::Products => Tab::NewProduct,
            Tab::NewProduct => Tab::Users,
        }
    }

    pub fn previous(&self) -> Tab {
        match self {
            Tab::Users => Tab::NewProduct,
            Tab::Products => Tab::Users,
            Tab::NewProduct => Tab::Products,
        }
    }
}

/// Application state
pub struct App<A, S> {
    pub screen: Screen,
    pub tab: Tab,
    pub should_quit: bool,
    pub dashboard: Dashboard<A, S>,

    // Table and form cursors
    pub user_index: usize,
    pub product_index: usize,
    pub field_index: usize,

    // Sign-in input
    pub token_input: String,

    /// Set when the lists must be fetched before the next input.
    pub needs_load: bool,
    /// Last failed toggle, shown on the status line.
    pub status: Option<String>,
}

impl<A: AdminApi, S: SessionStore> App<A, S> {
    pub fn new(dashboard: Dashboard<A, S>) -> Self {
        let signed_in = dashboard.is_signed_in();
        Self {
            screen: if signed_in {
                Screen::Dashboard
            } else {
                Screen::SignIn
            },
            tab: Tab::Users,
            should_quit: false,
            dashboard,
            user_index: 0,
            product_index: 0,
            field_index: 0,
            token_input: String::new(),
            needs_load: signed_in,
            status: None,
        }
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.dashboard.users().get(self.user_index)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.dashboard.products().get(self.product_index)
    }

    pub fn selected_field(&self) -> DraftField {
        DraftField::ALL[self.field_index]
    }

    // Navigation helpers
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.status = None;
    }

    pub fn up(&mut self) {
        let index = match self.tab {
            Tab::Users => &mut self.user_index,
            Tab::Products => &mut self.product_index,
            Tab::NewProduct => &mut self.field_index,
        };
        *index = index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        let (index, len) = match self.tab {
            Tab::Users => (&mut self.user_index, self.dashboard.users().len()),
            Tab::Products => (&mut self.product_index, self.dashboard.products().len()),
            Tab::NewProduct => (&mut self.field_index, DraftField::ALL.len()),
        };
        if *index < len.saturating_sub(1) {
            *index += 1;
        }
    }

    /// Keeps cursors inside the freshly replaced lists.
    fn clamp_selection(&mut self) {
        self.user_index = self
            .user_index
            .min(self.dashboard.users().len().saturating_sub(1));
        self.product_index = self
            .product_index
            .min(self.dashboard.products().len().saturating_sub(1));
    }

    pub fn dismiss_message(&mut self) {
        self.screen = if self.dashboard.is_signed_in() {
            Screen::Dashboard
        } else {
            Screen::SignIn
        };
    }

    // Form editing
    pub fn push_char(&mut self, c: char) {
        let field = self.selected_field();
        let mut value = self.dashboard.draft().get(field).to_string();
        value.push(c);
        self.dashboard.update_draft(field, value);
    }

    pub fn pop_char(&mut self) {
        let field = self.selected_field();
        let mut value = self.dashboard.draft().get(field).to_string();
        value.pop();
        self.dashboard.update_draft(field, value);
    }

    pub fn push_str(&mut self, text: &str) {
        let field = self.selected_field();
        let value = format!("{}{}", self.dashboard.draft().get(field), text);
        self.dashboard.update_draft(field, value);
    }

    pub fn sign_in(&mut self) {
        match self.dashboard.sign_in(&self.token_input) {
            Ok(()) => {
                self.token_input.clear();
                self.tab = Tab::Users;
                self.screen = Screen::Dashboard;
                self.needs_load = true;
            }
            Err(e) => {
                self.screen = Screen::Message(e.to_string(), true);
            }
        }
    }

    pub fn logout(&mut self) {
        match self.dashboard.logout() {
            Ok(()) => {
                self.user_index = 0;
                self.product_index = 0;
                self.field_index = 0;
                self.status = None;
                self.tab = Tab::Users;
                self.screen = Screen::SignIn;
            }
            Err(e) => {
                self.screen = Screen::Message(format!("Logout failed: {}", e), true);
            }
        }
    }

    // Async operations (called from main loop)
    pub async fn load(&mut self) {
        self.needs_load = false;
        self.dashboard.load().await;
        self.clamp_selection();
        info!(
            users = self.dashboard.users().len(),
            products = self.dashboard.products().len(),
            "Dashboard loaded"
        );
    }

    pub async fn refresh(&mut self) {
        self.status = None;
        match self.tab {
            Tab::Users => self.dashboard.refresh_users().await,
            Tab::Products | Tab::NewProduct => self.dashboard.refresh_products().await,
        }
        self.clamp_selection();
    }

    pub async fn toggle_selected(&mut self) {
        self.status = None;
        match self.tab {
            Tab::Users => {
                if let Some(user) = self.selected_user().cloned() {
                    if let Err(e) = self.dashboard.toggle_user(&user.id, user.active).await {
                        self.status = Some(format!("Could not update {}: {}", user.email, e));
                    }
                }
            }
            Tab::Products => {
                if let Some(product) = self.selected_product().cloned() {
                    if let Err(e) = self
                        .dashboard
                        .toggle_product(&product.id, product.available)
                        .await
                    {
                        self.status = Some(format!("Could not update {}: {}", product.name, e));
                    }
                }
            }
            Tab::NewProduct => {}
        }
        self.clamp_selection();
    }

    pub async fn submit(&mut self) {
        let outcome = self.dashboard.submit_draft().await;
        if !outcome.is_error() {
            self.field_index = 0;
        }
        self.screen = Screen::Message(outcome.message(), outcome.is_error());
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in_app, StubApi};
    use shop_admin_core::MemorySessionStore;

    #[tokio::test]
    async fn test_starts_signed_out_without_credential() {
        let app = App::new(Dashboard::new(StubApi::default(), MemorySessionStore::new()));
        assert_eq!(app.screen, Screen::SignIn);
        assert!(!app.needs_load);
    }

    #[tokio::test]
    async fn test_sign_in_requests_load() {
        let mut app = App::new(Dashboard::new(StubApi::default(), MemorySessionStore::new()));
        app.token_input = "tok".to_string();
        app.sign_in();

        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.needs_load);
        assert!(app.token_input.is_empty());
    }

    #[tokio::test]
    async fn test_blank_token_shows_error_then_returns_to_sign_in() {
        let mut app = App::new(Dashboard::new(StubApi::default(), MemorySessionStore::new()));
        app.sign_in();
        assert!(matches!(app.screen, Screen::Message(_, true)));

        app.dismiss_message();
        assert_eq!(app.screen, Screen::SignIn);
    }

    #[tokio::test]
    async fn test_selection_is_clamped_after_refresh() {
        let mut app = signed_in_app();
        app.load().await;
        app.down();
        assert_eq!(app.user_index, 1);

        app.dashboard.api().users.lock().truncate(1);
        app.refresh().await;
        assert_eq!(app.user_index, 0);
    }

    #[tokio::test]
    async fn test_toggle_failure_sets_status_line() {
        let mut app = signed_in_app();
        app.load().await;
        *app.dashboard.api().fail_mutations.lock() = true;

        app.toggle_selected().await;

        let status = app.status.clone().unwrap();
        assert!(status.contains("ada@shop.test"));
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[tokio::test]
    async fn test_form_editing_targets_selected_field() {
        let mut app = signed_in_app();
        app.select_tab(Tab::NewProduct);
        app.down();
        app.push_str("12");
        app.push_char('5');
        app.pop_char();

        assert_eq!(app.dashboard.draft().price, "12");
        assert!(app.dashboard.draft().name.is_empty());
    }
}
