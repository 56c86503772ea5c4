use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Operator,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Driver, Role::Operator, Role::Admin];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Driver => "driver",
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "driver" => Some(Role::Driver),
            "operator" => Some(Role::Operator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(&code.trim().to_lowercase())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Driver => "Driver",
            Role::Operator => "Operator",
            Role::Admin => "Admin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Driver => "Logs daily job rounds and vehicle mileage",
            Role::Operator => "Office staff supervising drivers",
            Role::Admin => "Manages accounts and reference data",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
