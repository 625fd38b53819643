use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl User {
    /// Two-letter avatar label derived from the name.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }

    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// The mutable part of a user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid user id: {0:?}")]
    InvalidId(String),
}

/// The raw body of a `POST /` submission. Every key is optional here;
/// [`UserForm::into_command`] decides which ones the action needs.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub action: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Create,
    Update,
    Delete,
}

impl UserAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "create" => Some(UserAction::Create),
            "update" => Some(UserAction::Update),
            "delete" => Some(UserAction::Delete),
            _ => None,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            UserAction::Create => "User created successfully!",
            UserAction::Update => "User updated successfully!",
            UserAction::Delete => "User deleted successfully!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            UserAction::Create => "Unable to create user.",
            UserAction::Update => "Unable to update user.",
            UserAction::Delete => "Unable to delete user.",
        }
    }
}

/// A fully-typed write request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Create(UserFields),
    Update { id: i64, fields: UserFields },
    Delete { id: i64 },
}

impl UserForm {
    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// A key sent more than once keeps its last value; unknown keys are ignored.
    pub fn from_urlencoded(body: &[u8]) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
        Ok(Self::from_pairs(pairs))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "action" => &mut form.action,
                "id" => &mut form.id,
                "name" => &mut form.name,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                _ => continue,
            };
            *slot = Some(value);
        }
        form
    }

    /// The requested action, or `None` for a missing or unknown value.
    pub fn action(&self) -> Option<UserAction> {
        self.action.as_deref().and_then(UserAction::parse)
    }

    pub fn into_command(self, action: UserAction) -> Result<UserCommand, FormError> {
        match action {
            UserAction::Create => Ok(UserCommand::Create(self.into_fields()?)),
            UserAction::Update => {
                let id = parse_id(self.id.as_deref())?;
                Ok(UserCommand::Update {
                    id,
                    fields: self.into_fields()?,
                })
            }
            UserAction::Delete => Ok(UserCommand::Delete {
                id: parse_id(self.id.as_deref())?,
            }),
        }
    }

    fn into_fields(self) -> Result<UserFields, FormError> {
        Ok(UserFields {
            name: self.name.ok_or(FormError::MissingField("name"))?,
            email: self.email.ok_or(FormError::MissingField("email"))?,
            phone: self.phone.ok_or(FormError::MissingField("phone"))?,
        })
    }
}

/// Parses the `id` form field or the `edit` query parameter.
pub fn parse_id(raw: Option<&str>) -> Result<i64, FormError> {
    let raw = raw.ok_or(FormError::MissingField("id"))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| FormError::InvalidId(raw.to_string()))
}
