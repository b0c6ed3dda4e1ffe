/// Screen routing
///
/// Screens never switch themselves; they hand a `Navigation` back to the
/// application, which mounts the target screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The Add Form
    Add,
    /// The Carousel View
    View,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Add => "/",
            Route::View => "/view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// In-app transition: application-level caches are kept
    Transition(Route),
    /// Full reload of the target: only the item store survives
    Redirect(Route),
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Transition(route) | Navigation::Redirect(route) => *route,
        }
    }

    pub fn is_reload(&self) -> bool {
        matches!(self, Navigation::Redirect(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Add.path(), "/");
        assert_eq!(Route::View.path(), "/view");
    }

    #[test]
    fn test_only_redirect_reloads() {
        assert!(!Navigation::Transition(Route::View).is_reload());
        assert!(Navigation::Redirect(Route::Add).is_reload());
        assert_eq!(Navigation::Redirect(Route::Add).route(), Route::Add);
    }
}
