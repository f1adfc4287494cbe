//! Request authorization rules.
//!
//! A policy is an ordered list of `(method, path pattern) -> Access` rules.
//! The first rule matching a request decides; requests no rule matches
//! require an authenticated user.

use axum::http::Method;

use crate::domain::Role;
use crate::services::AuthenticatedUser;

/// Paths that never require credentials.
const DOCUMENTATION_PATHS: &[&str] = &[
    "/swagger-ui.html",
    "/swagger-ui/**",
    "/v3/api-docs/**",
    "/webjars/**",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    Authenticated,
    HasRole(Role),
}

impl Access {
    /// Whether an authenticated user satisfies this rule.
    #[must_use]
    pub fn permits(self, user: &AuthenticatedUser) -> bool {
        match self {
            Self::PermitAll | Self::Authenticated => true,
            Self::HasRole(role) => user.role == role,
        }
    }

    #[must_use]
    pub const fn requires_credentials(self) -> bool {
        !matches!(self, Self::PermitAll)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`
    One,
    /// `**`, only meaningful as the last segment.
    Rest,
}

/// Segment-wise path matcher. Empty segments are ignored, so trailing
/// slashes do not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|segment| match segment {
                "**" => Segment::Rest,
                "*" => Segment::One,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split(path);
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::One => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(literal) => {
                    if parts.next() != Some(literal.as_str()) {
                        return false;
                    }
                }
            }
        }
        parts.next().is_none()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[derive(Debug, Clone)]
pub struct Rule {
    /// `None` matches every method.
    pub methods: Option<Vec<Method>>,
    pub pattern: PathPattern,
    pub access: Access,
}

impl Rule {
    fn applies_to(&self, method: &Method, path: &str) -> bool {
        self.methods
            .as_ref()
            .is_none_or(|methods| methods.contains(method))
            && self.pattern.matches(path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthorizationPolicy {
    rules: Vec<Rule>,
}

impl AuthorizationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule for any method.
    #[must_use]
    pub fn any(mut self, pattern: &str, access: Access) -> Self {
        self.rules.push(Rule {
            methods: None,
            pattern: PathPattern::parse(pattern),
            access,
        });
        self
    }

    /// Appends a rule restricted to `methods`.
    #[must_use]
    pub fn on(mut self, methods: &[Method], pattern: &str, access: Access) -> Self {
        self.rules.push(Rule {
            methods: Some(methods.to_vec()),
            pattern: PathPattern::parse(pattern),
            access,
        });
        self
    }

    /// Rules for the anime API: documentation, health and any configured
    /// public paths are open, writes and the full listing need ADMIN.
    #[must_use]
    pub fn for_anime_api(public_paths: &[String]) -> Self {
        let mut policy = DOCUMENTATION_PATHS
            .iter()
            .fold(Self::new(), |policy, path| policy.any(path, Access::PermitAll))
            .any("/health", Access::PermitAll);

        for path in public_paths {
            policy = policy.any(path, Access::PermitAll);
        }

        let admin = Access::HasRole(Role::Admin);
        policy
            .on(
                &[Method::POST, Method::PUT, Method::DELETE],
                "/anime/**",
                admin,
            )
            .on(&[Method::GET], "/anime", admin)
            .on(&[Method::GET], "/metrics", admin)
    }

    #[must_use]
    pub fn access_for(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(method, path))
            .map_or(Access::Authenticated, |rule| rule.access)
    }
}
