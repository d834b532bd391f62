use serde::Deserialize;

/// Contact form body. Name, email and message are required; the rest is
/// optional context the site collects. `postalCode` is accepted as an alias
/// because the public form predates the snake_case convention.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, alias = "postalCode")]
    pub postal_code: Option<String>,
    pub objectif: Option<String>,
    pub message: Option<String>,
}
