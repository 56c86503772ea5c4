use std::fmt;

/// Named routes of the application. Handlers redirect to a `Route`, never to
/// a concrete URL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Logout,
    DriverInfo,
    DriverDashboard,
    JobRunning,
    MileUpdate,
    OperatorMenu,
    UserMenu,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Logout,
        Route::DriverInfo,
        Route::DriverDashboard,
        Route::JobRunning,
        Route::MileUpdate,
        Route::OperatorMenu,
        Route::UserMenu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Logout => "logout",
            Route::DriverInfo => "driver_info",
            Route::DriverDashboard => "driver_dashboard",
            Route::JobRunning => "job_running",
            Route::MileUpdate => "mile_update",
            Route::OperatorMenu => "operator_menu",
            Route::UserMenu => "user_menu",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login/",
            Route::Logout => "/logout/",
            Route::DriverInfo => "/driver-info/",
            Route::DriverDashboard => "/driver-dashboard/",
            Route::JobRunning => "/job-running/",
            Route::MileUpdate => "/mile-update/",
            Route::OperatorMenu => "/operator-menu/",
            Route::UserMenu => "/user-menu/",
        }
    }

    /// Resolve a request path; the trailing slash is optional.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.split('?').next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|r| r.path().trim_end_matches('/') == trimmed || r.name() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
