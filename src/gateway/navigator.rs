//! Navigation seam used for the forced redirect to the login route.

use parking_lot::Mutex;

/// Where the client currently "is", and how to leave it.
pub trait Navigator: Send + Sync {
    fn current_location(&self) -> String;

    /// Full navigation: all in-memory view state is discarded.
    fn navigate_full(&self, route: &str);
}

/// True when two routes name the same screen, ignoring query string,
/// fragment and trailing slash.
pub fn same_route(a: &str, b: &str) -> bool {
    fn base(route: &str) -> &str {
        let end = route.find(['?', '#']).unwrap_or(route.len());
        let path = route[..end].trim_end_matches('/');
        if path.is_empty() { "/" } else { path }
    }
    base(a) == base(b)
}

/// Records navigations in memory.
#[derive(Debug)]
pub struct MemoryNavigator {
    location: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Every full navigation performed, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    /// Move without a full navigation (a client-side route transition).
    pub fn set_location(&self, location: impl Into<String>) {
        *self.location.lock() = location.into();
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate_full(&self, route: &str) {
        *self.location.lock() = route.to_string();
        self.history.lock().push(route.to_string());
    }
}

/// Navigator for the command-line client: a redirect becomes a sign-in hint.
#[derive(Debug)]
pub struct CliNavigator {
    inner: MemoryNavigator,
}

impl CliNavigator {
    pub fn new(command: &str) -> Self {
        Self {
            inner: MemoryNavigator::new(format!("/{}", command.trim_start_matches('/'))),
        }
    }
}

impl Navigator for CliNavigator {
    fn current_location(&self) -> String {
        self.inner.current_location()
    }

    fn navigate_full(&self, route: &str) {
        eprintln!("Session expired. Run `bitebox login` to sign in again.");
        self.inner.navigate_full(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_route() {
        assert!(same_route("/login", "/login"));
        assert!(same_route("/login/", "/login"));
        assert!(same_route("/login?next=/orders", "/login"));
        assert!(!same_route("/login-help", "/login"));
        assert!(same_route("", "/"));
    }

    #[test]
    fn test_memory_navigator_records_history() {
        let nav = MemoryNavigator::new("/orders");
        nav.navigate_full("/login");
        assert_eq!(nav.current_location(), "/login");
        assert_eq!(nav.navigations(), vec!["/login".to_string()]);

        nav.set_location("/foods");
        assert_eq!(nav.current_location(), "/foods");
        assert_eq!(nav.navigations().len(), 1);
    }

    #[test]
    fn test_cli_navigator_location() {
        let nav = CliNavigator::new("orders");
        assert_eq!(nav.current_location(), "/orders");
        nav.navigate_full("/login");
        assert_eq!(nav.current_location(), "/login");
    }
}
