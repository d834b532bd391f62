use serde::Deserialize;

/// Create body. Required fields arrive as `Option` so a missing key maps to
/// a 400; `link` is genuinely optional.
#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

/// Update body. Everything is optional; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub is_active: Option<bool>,
}
