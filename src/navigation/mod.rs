use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

/// Where the menu is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuVariant {
    #[default]
    Sidebar,
    Popup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Staff,
    Admin,
}

/// Who is looking at the menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub approved: bool,
    /// An admin is acting as another user
    pub impersonating: bool,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn member() -> Self {
        Self {
            authenticated: true,
            role: Some(Role::Member),
            ..Self::default()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn is_approved_staff(&self) -> bool {
        self.role == Some(Role::Staff) && self.approved
    }
}

/// What activating a menu entry does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Link(&'static str),
    OpenSearch,
    EndSession,
    Login,
    Logout,
    Install,
    /// Popup footer: close the menu and return home
    Home,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyle {
    Popup,
    Active,
    Idle,
    /// Sign-out style entries (End Session)
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub style: ItemStyle,
    pub disabled: bool,
}

/// Ends an impersonated session on the auth backend
#[async_trait]
pub trait SessionControl: Send + Sync {
    async fn end_session(&self) -> Result<()>;
}

const LINKS: [(&str, &str); 6] = [
    ("Our Services", "/services"),
    ("Contact Info", "/contact"),
    ("About Us", "/about"),
    ("List Your Property", "/list-property"),
    ("Bookmarks", "/bookmarks"),
    ("My Properties", "/my-properties"),
];

/// Navigation menu shown in the sidebar or the popup
#[derive(Debug, Clone, Default)]
pub struct NavigationMenu {
    variant: MenuVariant,
    ending_session: bool,
}

impl NavigationMenu {
    pub fn new(variant: MenuVariant) -> Self {
        Self {
            variant,
            ending_session: false,
        }
    }

    pub fn variant(&self) -> MenuVariant {
        self.variant
    }

    pub fn is_ending_session(&self) -> bool {
        self.ending_session
    }

    fn link_style(&self, path: &str, target: &str) -> ItemStyle {
        if self.variant == MenuVariant::Popup {
            return ItemStyle::Popup;
        }
        let active = path == target
            || (target == "/bookmarks" && path == "/recently-removed-bookmarks");
        if active {
            ItemStyle::Active
        } else {
            ItemStyle::Idle
        }
    }

    fn action_style(&self) -> ItemStyle {
        match self.variant {
            MenuVariant::Popup => ItemStyle::Popup,
            MenuVariant::Sidebar => ItemStyle::Idle,
        }
    }

    fn link(&self, path: &str, label: &'static str, target: &'static str) -> MenuItem {
        MenuItem {
            label,
            action: MenuAction::Link(target),
            style: self.link_style(path, target),
            disabled: false,
        }
    }

    fn button(&self, label: &'static str, action: MenuAction) -> MenuItem {
        MenuItem {
            label,
            action,
            style: self.action_style(),
            disabled: false,
        }
    }

    /// Entries to render for `path`, in display order
    pub fn items(&self, path: &str, viewer: &Viewer, standalone: bool) -> Vec<MenuItem> {
        let mut items = vec![
            self.link(path, "Home", "/"),
            self.button("Search", MenuAction::OpenSearch),
        ];
        items.extend(
            LINKS
                .iter()
                .map(|&(label, target)| self.link(path, label, target)),
        );

        if viewer.is_approved_staff() {
            items.push(self.link(path, "Staff Portal", "/staff"));
        }
        if viewer.is_admin() {
            items.push(self.link(path, "Admin Portal", "/admin"));
        }
        if viewer.impersonating {
            items.push(MenuItem {
                label: if self.ending_session {
                    "Ending..."
                } else {
                    "End Session"
                },
                action: MenuAction::EndSession,
                style: ItemStyle::Warning,
                disabled: self.ending_session,
            });
        }

        items.push(self.link(path, "Profile", "/profile"));

        if viewer.authenticated {
            items.push(self.button("Logout", MenuAction::Logout));
        } else {
            items.push(self.button("Login/Register", MenuAction::Login));
        }

        if self.variant == MenuVariant::Popup {
            if !standalone {
                items.push(self.button("Install App", MenuAction::Install));
            }
            items.push(self.button("Home", MenuAction::Home));
            items.push(self.button("Close", MenuAction::Close));
        }

        items
    }

    /// End an impersonated session.
    ///
    /// The entry shows as busy while the request runs. Failures are logged
    /// and the menu returns to its idle state.
    pub async fn end_session(&mut self, session: &dyn SessionControl) {
        if self.ending_session {
            return;
        }
        self.ending_session = true;

        match session.end_session().await {
            Ok(()) => info!("Impersonated session ended"),
            Err(e) => error!("Error ending session: {:#}", e),
        }

        self.ending_session = false;
    }
}

/// Where to send the viewer after logging out, if anywhere
pub fn logout_redirect(viewer: &Viewer) -> Option<&'static str> {
    viewer.is_admin().then_some("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakySession {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SessionControl for FlakySession {
        async fn end_session(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("auth backend unavailable");
            }
            Ok(())
        }
    }

    fn labels(items: &[MenuItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.label).collect()
    }

    #[test]
    fn anonymous_sidebar_entries() {
        let menu = NavigationMenu::new(MenuVariant::Sidebar);
        let items = menu.items("/", &Viewer::anonymous(), false);
        assert_eq!(
            labels(&items),
            [
                "Home",
                "Search",
                "Our Services",
                "Contact Info",
                "About Us",
                "List Your Property",
                "Bookmarks",
                "My Properties",
                "Profile",
                "Login/Register",
            ]
        );
        assert_eq!(items[0].style, ItemStyle::Active);
        assert_eq!(items[2].style, ItemStyle::Idle);
    }

    #[test]
    fn bookmarks_active_on_removed_bookmarks() {
        let menu = NavigationMenu::new(MenuVariant::Sidebar);
        let items = menu.items("/recently-removed-bookmarks", &Viewer::member(), false);
        let bookmarks = items.iter().find(|i| i.label == "Bookmarks").unwrap();
        assert_eq!(bookmarks.style, ItemStyle::Active);
    }

    #[test]
    fn popup_always_uses_popup_style_and_offers_install() {
        let menu = NavigationMenu::new(MenuVariant::Popup);
        let items = menu.items("/about", &Viewer::member(), false);
        assert!(items
            .iter()
            .filter(|i| i.action != MenuAction::EndSession)
            .all(|i| i.style == ItemStyle::Popup));
        assert!(items.iter().any(|i| i.action == MenuAction::Install));
        assert_eq!(items.last().map(|i| i.label), Some("Close"));

        let standalone = menu.items("/about", &Viewer::member(), true);
        assert!(!standalone.iter().any(|i| i.action == MenuAction::Install));
    }

    #[test]
    fn role_gated_entries() {
        let menu = NavigationMenu::new(MenuVariant::Sidebar);

        let pending_staff = Viewer {
            authenticated: true,
            role: Some(Role::Staff),
            approved: false,
            impersonating: false,
        };
        assert!(!labels(&menu.items("/", &pending_staff, false)).contains(&"Staff Portal"));

        let staff = Viewer {
            approved: true,
            ..pending_staff
        };
        assert!(labels(&menu.items("/", &staff, false)).contains(&"Staff Portal"));

        let admin = Viewer {
            authenticated: true,
            role: Some(Role::Admin),
            approved: true,
            impersonating: true,
        };
        let admin_labels = labels(&menu.items("/", &admin, false));
        assert!(admin_labels.contains(&"Admin Portal"));
        assert!(admin_labels.contains(&"End Session"));
        assert!(admin_labels.contains(&"Logout"));
    }

    #[test]
    fn only_admins_are_redirected_after_logout() {
        let admin = Viewer {
            authenticated: true,
            role: Some(Role::Admin),
            ..Viewer::default()
        };
        assert_eq!(logout_redirect(&admin), Some("/"));
        assert_eq!(logout_redirect(&Viewer::member()), None);
    }

    #[tokio::test]
    async fn failed_end_session_returns_to_idle() {
        let session = FlakySession {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let mut menu = NavigationMenu::new(MenuVariant::Popup);
        menu.end_session(&session).await;

        assert!(!menu.is_ending_session());
        assert_eq!(session.calls.load(Ordering::SeqCst), 1);

        let viewer = Viewer {
            impersonating: true,
            ..Viewer::member()
        };
        let end = menu
            .items("/", &viewer, true)
            .into_iter()
            .find(|i| i.action == MenuAction::EndSession)
            .unwrap();
        assert_eq!(end.label, "End Session");
        assert!(!end.disabled);
    }

    #[tokio::test]
    async fn successful_end_session() {
        let session = FlakySession {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let mut menu = NavigationMenu::default();
        menu.end_session(&session).await;
        assert!(!menu.is_ending_session());
        assert_eq!(session.calls.load(Ordering::SeqCst), 1);
    }
}
