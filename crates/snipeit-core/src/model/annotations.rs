// Response annotations
//
// Side-channel metadata the host reads next to a page or mutation result.

use serde::Serialize;

use snipeit_api::RateLimitInfo;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// Rate-limit headers observed on the upstream response.
    RateLimit(RateLimitInfo),
    /// Resources of this type have no entitlements or grants to sync.
    SkipEntitlementsAndGrants,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// Record rate-limit metadata when the response carried any.
    pub fn push_rate_limit(&mut self, rate_limit: Option<RateLimitInfo>) {
        if let Some(info) = rate_limit {
            self.0.push(Annotation::RateLimit(info));
        }
    }

    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn skips_entitlements_and_grants(&self) -> bool {
        self.0
            .iter()
            .any(|a| matches!(a, Annotation::SkipEntitlementsAndGrants))
    }

    /// Most recent rate-limit annotation, if any.
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        self.0.iter().rev().find_map(|a| match a {
            Annotation::RateLimit(info) => Some(info),
            Annotation::SkipEntitlementsAndGrants => None,
        })
    }
}

impl From<Annotation> for Annotations {
    fn from(annotation: Annotation) -> Self {
        Self(vec![annotation])
    }
}
