//! Resource path matching for the provider's fixed URI table.

use super::error::ProviderError;

pub const SCHEME: &str = "content";

/// Logical resources the provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tasks,
    Tags,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Tasks, Resource::Tags];

    pub fn path(self) -> &'static str {
        match self {
            Resource::Tasks => "tasks",
            Resource::Tags => "tags",
        }
    }
}

/// Exact-match dispatch of `content://<authority>/<path>` URIs.
///
/// Query strings and fragments are ignored, as are empty path segments, so
/// `content://a/tasks/` and `content://a/tasks?x=1` both resolve to
/// [`Resource::Tasks`]. The scheme and authority must match exactly.
#[derive(Debug, Clone)]
pub struct UriMatcher {
    authority: String,
}

impl UriMatcher {
    pub fn new(authority: impl Into<String>) -> Self {
        Self { authority: authority.into() }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Root URI of the provider, used as the change notification address.
    pub fn content_uri(&self) -> String {
        format!("{}://{}", SCHEME, self.authority)
    }

    pub fn uri_for(&self, resource: Resource) -> String {
        format!("{}/{}", self.content_uri(), resource.path())
    }

    pub fn match_uri(&self, uri: &str) -> Option<Resource> {
        let rest = uri.strip_prefix(SCHEME)?.strip_prefix("://")?;
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        if authority != self.authority {
            return None;
        }

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let resource = match segments.next()? {
            "tasks" => Resource::Tasks,
            "tags" => Resource::Tags,
            _ => return None,
        };
        match segments.next() {
            None => Some(resource),
            Some(_) => None,
        }
    }

    pub fn resolve(&self, uri: &str) -> Result<Resource, ProviderError> {
        self.match_uri(uri).ok_or_else(|| ProviderError::UnrecognizedUri(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> UriMatcher {
        UriMatcher::new("org.example.tasksprovider")
    }

    #[test]
    fn resolves_known_paths() {
        let m = matcher();
        assert_eq!(m.match_uri("content://org.example.tasksprovider/tasks"), Some(Resource::Tasks));
        assert_eq!(m.match_uri("content://org.example.tasksprovider/tags"), Some(Resource::Tags));
        assert_eq!(m.match_uri("content://org.example.tasksprovider/tags/"), Some(Resource::Tags));
        assert_eq!(m.match_uri("content://org.example.tasksprovider/tasks?limit=1"), Some(Resource::Tasks));
    }

    #[test]
    fn rejects_everything_else() {
        let m = matcher();
        for uri in [
            "content://org.example.tasksprovider",
            "content://org.example.tasksprovider/",
            "content://org.example.tasksprovider/notes",
            "content://org.example.tasksprovider/tasks/1",
            "content://other.authority/tasks",
            "http://org.example.tasksprovider/tasks",
            "tasks",
            "",
        ] {
            assert_eq!(m.match_uri(uri), None, "{uri}");
        }
    }

    #[test]
    fn resolve_reports_the_uri() {
        let err = matcher().resolve("content://org.example.tasksprovider/nope").unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized URI:content://org.example.tasksprovider/nope");
    }

    #[test]
    fn builds_resource_uris() {
        let m = matcher();
        assert_eq!(m.content_uri(), "content://org.example.tasksprovider");
        for resource in Resource::ALL {
            assert_eq!(m.match_uri(&m.uri_for(resource)), Some(resource));
        }
    }
}
