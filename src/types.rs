//! Data model for the streamed dashboard payloads.
//!
//! These mirror the backend's JSON wire shapes. Component internals are kept
//! as raw [`serde_json::Value`]s: the client republishes them, it does not
//! interpret them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single label filter applied to the subscription.
///
/// Filters are ordered; two filter sequences are equivalent only when they
/// match element-wise in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    pub value: String,
}

impl Filter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Top-level content snapshot delivered on the `message` event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
    pub content: Content,
}

/// Rendered content: a list of view components plus a title path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub view_components: Vec<Value>,
    pub title: Vec<Value>,
}

/// Navigation tree delivered on the `navigation` event or fetched one-shot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub sections: Vec<NavigationSection>,
}

/// One entry in the navigation tree. Payloads may omit everything but the
/// title, so the rest defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSection {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationSection>,
}

/// Wrapper for the `namespaces` event payload and the one-shot namespaces
/// endpoint. The channel stores the inner list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceList {
    pub namespaces: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_response_wire_shape() {
        let json = r#"{"content":{"viewComponents":[{"kind":"table"}],"title":[{"text":"Workloads"}]}}"#;
        let parsed: ContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content.view_components.len(), 1);
        assert_eq!(parsed.content.title.len(), 1);
    }

    #[test]
    fn test_partial_navigation_section() {
        let parsed: Navigation = serde_json::from_str(r#"{"sections":[{"title":"X"}]}"#).unwrap();
        assert_eq!(parsed.sections[0].title, "X");
        assert!(parsed.sections[0].path.is_none());
        assert!(parsed.sections[0].children.is_empty());
    }

    #[test]
    fn test_defaults_are_empty() {
        assert!(ContentResponse::default().content.view_components.is_empty());
        assert!(ContentResponse::default().content.title.is_empty());
        assert!(Navigation::default().sections.is_empty());
        assert!(NamespaceList::default().namespaces.is_empty());
    }
}
