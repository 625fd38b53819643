use std::env;

/// SQL dialect the configured URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MySql,
}

/// Connection settings for the user store.
///
/// `DATABASE_URL` wins when set. Otherwise a MySQL URL is assembled from
/// `DB_HOST`, `DB_NAME`, `DB_USER` and `DB_PASS`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub url_override: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            name: "crud_app".to_string(),
            user: "root".to_string(),
            password: String::new(),
            url_override: None,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("DB_HOST").unwrap_or(defaults.host),
            name: env::var("DB_NAME").unwrap_or(defaults.name),
            user: env::var("DB_USER").unwrap_or(defaults.user),
            password: env::var("DB_PASS").unwrap_or(defaults.password),
            url_override: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        }
    }

    /// A config that points straight at `url`.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url_override: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }

        if self.password.is_empty() {
            format!("mysql://{}@{}/{}", self.user, self.host, self.name)
        } else {
            format!(
                "mysql://{}:{}@{}/{}",
                self.user, self.password, self.host, self.name
            )
        }
    }

    pub fn backend(&self) -> Backend {
        if self.url().starts_with("sqlite:") {
            Backend::Sqlite
        } else {
            Backend::MySql
        }
    }

    /// The URL with any password replaced, safe to log.
    pub fn redacted_url(&self) -> String {
        let url = self.url();
        match (url.find("://"), url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &url[scheme_end + 3..at];
                match credentials.split_once(':') {
                    Some((user, _)) => {
                        format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..])
                    }
                    None => url,
                }
            }
            _ => url,
        }
    }
}
