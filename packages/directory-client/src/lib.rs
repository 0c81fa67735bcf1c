//! Pure REST client for the customer directory service.
//!
//! A minimal client for a read-only directory exposing customer records and
//! their posts. Supports looking up a customer by exact email match and
//! fetching the most recent post titles for a customer id.
//!
//! # Example
//!
//! ```rust,ignore
//! use directory_client::DirectoryClient;
//!
//! let client = DirectoryClient::new(directory_client::DEFAULT_BASE_URL);
//!
//! if let Some(customer) = client.find_by_email("Sincere@april.biz").await? {
//!     let titles = client.list_recent_posts(customer.id).await?;
//!     for title in &titles {
//!         println!("{title}");
//!     }
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{DirectoryError, Result};
pub use types::{Address, Company, Customer, Post};

/// Public JSONPlaceholder-compatible directory endpoint.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// How many recent posts a customer lookup returns at most.
pub const RECENT_POSTS_LIMIT: usize = 3;

pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look up a customer by exact email match.
    ///
    /// Returns `Ok(None)` when the directory has no matching record. That is
    /// an expected outcome, distinct from a transport or API failure.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let url = format!("{}/users", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let mut matches: Vec<Customer> = resp.json().await?;
        if matches.is_empty() {
            tracing::debug!(email, "No directory record matched");
            return Ok(None);
        }
        if matches.len() > 1 {
            tracing::warn!(email, count = matches.len(), "Multiple directory matches, using first");
        }
        Ok(Some(matches.remove(0)))
    }

    /// Fetch the titles of a customer's most recent posts.
    ///
    /// The directory returns posts oldest-first, so this takes the last
    /// [`RECENT_POSTS_LIMIT`] and reverses them: the most recently returned
    /// post comes first. An empty result is valid.
    pub async fn list_recent_posts(&self, customer_id: i64) -> Result<Vec<String>> {
        let url = format!("{}/posts", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("userId", customer_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let posts: Vec<Post> = resp.json().await?;
        tracing::debug!(customer_id, count = posts.len(), "Fetched posts");
        Ok(latest_titles(posts, RECENT_POSTS_LIMIT))
    }
}

/// Select the last `limit` posts in returned order, most recent first.
pub fn latest_titles(posts: Vec<Post>, limit: usize) -> Vec<String> {
    let skip = posts.len().saturating_sub(limit);
    let mut titles: Vec<String> = posts.into_iter().skip(skip).map(|p| p.title).collect();
    titles.reverse();
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
        }
    }

    #[test]
    fn latest_titles_takes_last_three_reversed() {
        let posts = vec![
            post(1, "first"),
            post(2, "second"),
            post(3, "third"),
            post(4, "fourth"),
        ];
        let titles = latest_titles(posts, 3);
        assert_eq!(titles, vec!["fourth", "third", "second"]);
    }

    #[test]
    fn latest_titles_handles_short_lists() {
        let titles = latest_titles(vec![post(1, "only")], 3);
        assert_eq!(titles, vec!["only"]);

        let titles = latest_titles(vec![], 3);
        assert!(titles.is_empty());
    }

    #[test]
    fn customer_deserializes_from_directory_payload() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "city": "Gwenborough",
                "zipcode": "92998-3874"
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net"
            }
        }"#;

        let customer: Customer = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(customer.id, 1);
        assert_eq!(customer.name, "Leanne Graham");
        assert_eq!(customer.company.as_ref().map(|c| c.name.as_str()), Some("Romaguera-Crona"));
        assert_eq!(customer.address.as_ref().map(|a| a.city.as_str()), Some("Gwenborough"));
        assert_eq!(customer.website.as_deref(), Some("hildegard.org"));
    }

    #[test]
    fn customer_tolerates_missing_optional_fields() {
        let json = r#"{ "id": 9, "name": "Ghost", "email": "ghost@example.com" }"#;
        let customer: Customer = serde_json::from_str(json).expect("should deserialize");
        assert!(customer.company.is_none());
        assert!(customer.address.is_none());
        assert!(customer.website.is_none());
    }

    #[test]
    fn post_deserializes_with_renamed_user_id() {
        let json = r#"{ "userId": 1, "id": 7, "title": "magnam facilis autem", "body": "..." }"#;
        let post: Post = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(post.user_id, 1);
        assert_eq!(post.title, "magnam facilis autem");
    }
}
