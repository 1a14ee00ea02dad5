//! Page paths.

/// The two screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`: create an employee.
    #[default]
    Form,
    /// `/employees`: list employees.
    List,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Form => "/",
            Route::List => "/employees",
        }
    }

    /// Match a location path exactly (ignoring query, fragment and a
    /// trailing slash). Unknown paths give `None`.
    pub fn recognize(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Form),
            "/employees" => Some(Route::List),
            _ => None,
        }
    }

    /// Like [`Route::recognize`], redirecting anything unknown to the form.
    pub fn resolve(path: &str) -> Route {
        Route::recognize(path).unwrap_or(Route::Form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(Route::resolve("/"), Route::Form);
        assert_eq!(Route::resolve("/employees"), Route::List);
        assert_eq!(Route::resolve("/employees/"), Route::List);
        assert_eq!(Route::resolve("/employees?page=2#top"), Route::List);
    }

    #[test]
    fn test_unknown_path_redirects_to_form() {
        assert_eq!(Route::recognize("/nowhere"), None);
        assert_eq!(Route::resolve("/nowhere"), Route::Form);
        assert_eq!(Route::resolve("/employees/42"), Route::Form);
        assert_eq!(Route::resolve(""), Route::Form);
    }

    #[test]
    fn test_paths_resolve_to_themselves() {
        for route in [Route::Form, Route::List] {
            assert_eq!(Route::recognize(route.path()), Some(route));
        }
    }
}
