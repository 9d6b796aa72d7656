//! Client input for create and update, and its validation.
//!
//! Fields arrive as loosely typed JSON so that the rules, not the
//! deserializer, decide what is acceptable and which error code applies.

use serde::Deserialize;
use serde_json::Value;

use crate::{GuestError, Host, Result, MAX_NAME_CHARS};

/// Raw guest fields as sent by a client. Absent and `null` fields are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInput {
    pub name: Option<Value>,
    pub invited_by: Option<Value>,
    pub is_paid: Option<Value>,
    pub is_confirmed: Option<Value>,
}

/// Validated fields for a new guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub name: String,
    pub invited_by: Host,
    pub is_paid: bool,
    pub is_confirmed: bool,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestPatch {
    pub name: Option<String>,
    pub invited_by: Option<Host>,
    pub is_paid: Option<bool>,
    pub is_confirmed: Option<bool>,
}

impl GuestInput {
    /// Validates the input for a create. Name and host are required; the
    /// flags default to `false`.
    pub fn to_new_guest(&self) -> Result<NewGuest> {
        let name = parse_name(self.name.as_ref().unwrap_or(&Value::Null))?;
        let invited_by = parse_host(self.invited_by.as_ref().unwrap_or(&Value::Null))?;
        let is_paid = self
            .is_paid
            .as_ref()
            .map(|v| parse_flag(v, "isPaid"))
            .transpose()?
            .unwrap_or(false);
        let is_confirmed = self
            .is_confirmed
            .as_ref()
            .map(|v| parse_flag(v, "isConfirmed"))
            .transpose()?
            .unwrap_or(false);

        Ok(NewGuest {
            name,
            invited_by,
            is_paid,
            is_confirmed,
        })
    }

    /// Validates only the fields that are present.
    pub fn to_patch(&self) -> Result<GuestPatch> {
        Ok(GuestPatch {
            name: self.name.as_ref().map(parse_name).transpose()?,
            invited_by: self.invited_by.as_ref().map(parse_host).transpose()?,
            is_paid: self
                .is_paid
                .as_ref()
                .map(|v| parse_flag(v, "isPaid"))
                .transpose()?,
            is_confirmed: self
                .is_confirmed
                .as_ref()
                .map(|v| parse_flag(v, "isConfirmed"))
                .transpose()?,
        })
    }
}

fn parse_name(value: &Value) -> Result<String> {
    let name = value.as_str().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(GuestError::NameRequired);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(GuestError::NameTooLong {
            max: MAX_NAME_CHARS,
        });
    }
    Ok(name.to_string())
}

fn parse_host(value: &Value) -> Result<Host> {
    value
        .as_str()
        .ok_or(GuestError::InvalidInvitedBy)?
        .parse()
}

/// Interprets a yes/no field.
///
/// Accepts JSON booleans, the numbers `0` and `1`, and the strings
/// `true`/`false`, `1`/`0`, `sim`/`não`/`nao`, `s`/`n` and `yes`/`no`
/// (trimmed, case-insensitive). Anything else is rejected.
pub fn parse_flag(value: &Value, field: &'static str) -> Result<bool> {
    let invalid = GuestError::InvalidBoolean { field };
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Ok(true),
            Some(x) if x == 0.0 => Ok(false),
            _ => Err(invalid),
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "sim" | "s" | "yes" => Ok(true),
            "false" | "0" | "não" | "nao" | "n" | "no" => Ok(false),
            _ => Err(invalid),
        },
        _ => Err(invalid),
    }
}
