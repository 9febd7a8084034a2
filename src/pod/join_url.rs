//! Join URL: chat id, claimed role and token packed in a query string.

use crate::entities::LinkRole;
use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinUrl {
    pub chat_id: i32,
    pub role: LinkRole,
    pub token: String,
}

#[derive(Deserialize)]
struct JoinQuery {
    #[serde(rename = "type")]
    role: Option<LinkRole>,
    chat: i32,
    l: String,
}

impl JoinUrl {
    pub fn new(chat_id: i32, role: LinkRole, token: impl Into<String>) -> Self {
        Self {
            chat_id,
            role,
            token: token.into(),
        }
    }

    /// `{base}/join?type={role}&chat={chat_id}&l={token}`
    pub fn render(&self, base_url: &str) -> String {
        // tokens are alphanumeric, nothing to escape
        format!(
            "{}/join?type={}&chat={}&l={}",
            base_url.trim_end_matches('/'),
            self.role,
            self.chat_id,
            self.token
        )
    }

    /// Parses the query part of a join URL (with or without the leading path).
    ///
    /// A missing `type` means respondent. Returns `None` when the chat id or
    /// the token is missing or malformed.
    pub fn parse(url: &str) -> Option<Self> {
        let query = url.split_once('?').map(|(_, q)| q).unwrap_or(url);
        let query = query.split('#').next().unwrap_or_default();
        let uri: Uri = format!("/?{}", query).parse().ok()?;
        let Query(params) = Query::<JoinQuery>::try_from_uri(&uri).ok()?;

        if params.l.is_empty() {
            return None;
        }
        Some(Self::new(
            params.chat,
            params.role.unwrap_or(LinkRole::Respondent),
            params.l,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_and_parse() {
        let url = JoinUrl::new(4, LinkRole::Client, "abc123").render("https://pods.example.org/");
        assert_eq!(url, "https://pods.example.org/join?type=client&chat=4&l=abc123");
        assert_eq!(JoinUrl::parse(&url), Some(JoinUrl::new(4, LinkRole::Client, "abc123")));
    }

    #[test]
    fn test_parse_defaults_to_respondent() {
        let parsed = JoinUrl::parse("/join?chat=9&l=tok1").expect("valid");
        assert_eq!(parsed.role, LinkRole::Respondent);
        assert_eq!(parsed.chat_id, 9);
    }

    #[test]
    fn test_parse_rejects_incomplete_urls() {
        assert_eq!(JoinUrl::parse("/join?chat=9"), None);
        assert_eq!(JoinUrl::parse("/join?chat=x&l=tok"), None);
        assert_eq!(JoinUrl::parse("/join?type=moderator&chat=1&l=tok"), None);
        assert_eq!(JoinUrl::parse("/join?chat=1&l="), None);
    }

    #[test]
    fn test_parse_decodes_percent_encoding() {
        let parsed =
            JoinUrl::parse("https://pods.example.org/join?type=cli%65nt&chat=%37&l=ab%2Dc_1#top")
                .expect("valid");
        assert_eq!(parsed, JoinUrl::new(7, LinkRole::Client, "ab-c_1"));
    }
}
