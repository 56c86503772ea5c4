use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct Warehouse {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub created_date: String,
    pub last_updated_date: String,
}

impl fmt::Display for Warehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "Warehouse {}", self.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Bank {
    pub id: i64,
    pub bank_code: String,
    pub bank_name_th: Option<String>,
    pub bank_name_eng: Option<String>,
    pub created_date: String,
    pub last_updated_date: String,
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bank_code)
    }
}
