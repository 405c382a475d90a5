use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub const COLLECTION: &str = "employees";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Employee => "employee",
        }
    }
}

/// Stored employee document. Missing fields in a stored document read as
/// their defaults.
///
/// `salary` keeps the JSON number as sent, so integer salaries stay integers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub dni: String,
    pub salary: Number,
    pub email: String,
    pub uid: String,
    pub rol: Role,
}

impl Default for Employee {
    fn default() -> Self {
        Employee {
            id: String::new(),
            name: String::new(),
            last_name: String::new(),
            dni: String::new(),
            salary: Number::from(0),
            email: String::new(),
            uid: String::new(),
            rol: Role::User,
        }
    }
}

/// Create body. Every field is optional; missing ones are stored empty.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEmployee {
    pub name: String,
    pub last_name: String,
    pub dni: String,
    #[serde(deserialize_with = "falsy_as_none")]
    pub salary: Option<Number>,
    pub email: String,
    pub uid: Option<String>,
}

impl NewEmployee {
    /// New accounts always start as plain users, unlinked unless a uid was given.
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            name: self.name,
            last_name: self.last_name,
            dni: self.dni,
            salary: self.salary.unwrap_or_else(|| Number::from(0)),
            email: self.email,
            uid: self.uid.unwrap_or_default(),
            rol: Role::User,
        }
    }
}

/// Partial update body. Any field may be missing, `null` or empty.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<String>,
    #[serde(deserialize_with = "falsy_as_none")]
    pub salary: Option<Number>,
    pub email: Option<String>,
    pub uid: Option<String>,
    #[serde(deserialize_with = "falsy_as_none")]
    pub rol: Option<Role>,
}

/// Reads `null`, `false` and `""` as "not provided" for typed fields, so an
/// empty value falls back to the stored one instead of failing the body.
fn falsy_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(de::Error::custom),
    }
}

/// How a patch salary of exactly `0` is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalaryZeroPolicy {
    /// `0` counts as "not provided" and the stored salary is kept.
    #[default]
    Absent,
    /// `0` is a real salary and overwrites the stored one.
    Valid,
}

impl FromStr for SalaryZeroPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absent" => Ok(SalaryZeroPolicy::Absent),
            "valid" => Ok(SalaryZeroPolicy::Valid),
            other => Err(format!("unknown salary zero policy '{}'", other)),
        }
    }
}

impl fmt::Display for SalaryZeroPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryZeroPolicy::Absent => write!(f, "absent"),
            SalaryZeroPolicy::Valid => write!(f, "valid"),
        }
    }
}

fn pick_text(patch: Option<String>, current: String) -> String {
    match patch {
        Some(value) if !value.is_empty() => value,
        _ => current,
    }
}

fn pick_salary(patch: Option<Number>, current: Number, policy: SalaryZeroPolicy) -> Number {
    match (patch, policy) {
        (Some(value), SalaryZeroPolicy::Absent) if value.as_f64() == Some(0.0) => current,
        (Some(value), _) => value,
        (None, _) => current,
    }
}

/// Next persisted state of `existing` after applying `patch`.
///
/// Each field takes the patch value when it is present and non-empty,
/// otherwise the existing value. The result is written back as a whole
/// document.
pub fn merge_update(existing: Employee, patch: EmployeePatch, policy: SalaryZeroPolicy) -> Employee {
    Employee {
        id: pick_text(patch.id, existing.id),
        name: pick_text(patch.name, existing.name),
        last_name: pick_text(patch.last_name, existing.last_name),
        dni: pick_text(patch.dni, existing.dni),
        salary: pick_salary(patch.salary, existing.salary, policy),
        email: pick_text(patch.email, existing.email),
        uid: pick_text(patch.uid, existing.uid),
        rol: patch.rol.unwrap_or(existing.rol),
    }
}
