use super::form::Form;
use crate::errors::{AppError, AppResult};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(AppError::InvalidInput(format!("Unknown method '{}'", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file field of a multipart submission, already on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub field: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Form,
    pub form: Form,
    pub files: Vec<Upload>,
    pub session: Option<String>,
}

impl Request {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            params: Form::new(),
            form: Form::new(),
            files: Vec::new(),
            session: None,
        }
    }

    /// Build from a request target such as `/job-running/?year=2024&month=02`.
    pub fn from_target(method: Method, target: &str) -> AppResult<Self> {
        match target.split_once('?') {
            Some((path, query)) => Ok(Self::new(method, path).with_params(Form::parse(query)?)),
            None => Ok(Self::new(method, target)),
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str, form: Form) -> Self {
        Self {
            form,
            ..Self::new(Method::Post, path)
        }
    }

    pub fn with_session(mut self, token: Option<String>) -> Self {
        self.session = token;
        self
    }

    pub fn with_params(mut self, params: Form) -> Self {
        self.params = params;
        self
    }

    pub fn with_file(mut self, field: &str, path: impl Into<PathBuf>) -> Self {
        self.files.push(Upload {
            field: field.to_string(),
            path: path.into(),
        });
        self
    }
}
