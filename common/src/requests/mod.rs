use serde::Deserialize;

/// Form payload of `POST /login`.
///
/// Fields are optional so a missing field surfaces as a validation error instead of
/// a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Form payload of `POST /sheets`.
#[derive(Debug, Deserialize)]
pub struct SheetForm {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Form payload of `POST /sheets/edit/{id}`. Only supplied fields are changed.
#[derive(Debug, Default, Deserialize)]
pub struct SheetEditForm {
    pub name: Option<String>,
    pub url: Option<String>,
}
