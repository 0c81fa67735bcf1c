use serde::Deserialize;

/// A customer record from the directory service.
///
/// Company, address, and website are not guaranteed to be present on every
/// record, so callers must supply their own fallbacks for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub company: Option<Company>,
    pub address: Option<Address>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Company {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Address {
    pub city: String,
}

/// A single post from the directory service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
}
