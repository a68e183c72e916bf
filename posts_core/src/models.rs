use serde::{Deserialize, Serialize};

use crate::text::SafeText;

/* -------------------------------------------------------------------------- */
/*                     structures échangées avec l’API                         */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id:      i64,
    pub title:   String,
    pub content: String,
    // renvoyés par /api/v1 uniquement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author:  Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date:    Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPost {
    pub title:   String,
    pub content: String,
}

/// Body du PUT : les champs absents ne sont pas envoyés.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Enveloppe de `GET /api/v1/posts`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PostsPage {
    pub posts:       Vec<Post>,
    #[serde(default)]
    pub total_posts: Option<u64>,
    #[serde(default)]
    pub page:        Option<u32>,
    #[serde(default)]
    pub per_page:    Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/* -------------------------------------------------------------------------- */
/*                              forme affichée                                */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct PostCard {
    pub id:      i64,
    pub title:   SafeText,
    pub content: SafeText,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id:      post.id,
            title:   SafeText::escape(&post.title),
            content: SafeText::escape(&post.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_post_extra_fields() {
        let post: Post = serde_json::from_str(
            r#"{"id":3,"title":"t","content":"c","author":"Anonymous","date":"2024-08-01"}"#,
        )
        .unwrap();
        assert_eq!(post.author.as_deref(), Some("Anonymous"));

        let plain: Post = serde_json::from_str(r#"{"id":1,"title":"t","content":"c"}"#).unwrap();
        assert_eq!(plain.date, None);
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = PostPatch { title: Some("x".into()), content: None };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"title":"x"}"#);
    }

    #[test]
    fn test_card_escapes_markup() {
        let post = Post {
            id: 7,
            title: "<b>hi</b>".into(),
            content: "plain".into(),
            author: None,
            date: None,
        };
        let card = PostCard::from(&post);
        assert_eq!(card.title.as_str(), "&lt;b&gt;hi&lt;/b&gt;");
        assert_eq!(card.content.as_str(), "plain");
    }
}
