use super::form::encode_component;
use super::route::Route;
use crate::models::job_run::JobRunRecord;
use crate::models::mileage::Mileage;
use crate::models::profile::DriverProfile;
use crate::models::user::User;

/// What a handler wants done with the caller's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    Set(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub query: Vec<(String, String)>,
    pub session: Option<SessionUpdate>,
}

impl Redirect {
    pub fn to(route: Route) -> Self {
        Self {
            to: route,
            query: Vec::new(),
            session: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_session(mut self, update: SessionUpdate) -> Self {
        self.session = Some(update);
        self
    }

    pub fn location(&self) -> String {
        if self.query.is_empty() {
            return self.to.path().to_string();
        }
        let q: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect();
        format!("{}?{}", self.to.path(), q.join("&"))
    }
}

/// Data a page needs to be rendered; presentation is left to the caller.
#[derive(Debug, Clone)]
pub enum Page {
    Login {
        error: Option<String>,
    },
    Menu {
        title: String,
        user: User,
        links: Vec<Route>,
    },
    Forbidden {
        message: String,
    },
    DriverInfo {
        user: User,
        profile: DriverProfile,
        error: Option<String>,
    },
    DriverDashboard {
        label: String,
        month: String,
        job_runs: Vec<JobRunRecord>,
        latest_mileage: Option<Mileage>,
    },
    JobRunning {
        year: String,
        month: String,
        records: Vec<JobRunRecord>,
        error: Option<String>,
    },
    MileUpdate {
        entries: Vec<Mileage>,
        error: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum Response {
    Render(Page),
    Redirect(Redirect),
    MethodNotAllowed,
    NotFound,
}

impl Response {
    pub fn redirect(route: Route) -> Self {
        Response::Redirect(Redirect::to(route))
    }

    /// HTTP status code equivalent.
    pub fn status(&self) -> u16 {
        match self {
            Response::Render(Page::Forbidden { .. }) => 403,
            Response::Render(_) => 200,
            Response::Redirect(_) => 302,
            Response::MethodNotAllowed => 405,
            Response::NotFound => 404,
        }
    }
}
