//! Audience enumeration and the static prompt template table.
//!
//! The table is the [`Audience`] enum itself: every variant owns exactly one
//! template and one wire key, so the set of accepted audiences and the set of
//! templates cannot drift apart.

pub mod templates;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use templates::{CUSTOMER_TEMPLATE, PEER_TEAM_TEMPLATE, SUPERIOR_TEMPLATE, TEXT_PLACEHOLDER};

/// Intended recipient of the rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    #[serde(rename = "상사")]
    Superior,
    #[serde(rename = "타팀 동료")]
    PeerTeam,
    #[serde(rename = "고객")]
    Customer,
}

impl Audience {
    /// Every audience, in declaration order.
    pub const ALL: [Audience; 3] = [Audience::Superior, Audience::PeerTeam, Audience::Customer];

    /// Wire key used in requests and responses.
    pub fn key(&self) -> &'static str {
        match self {
            Audience::Superior => "상사",
            Audience::PeerTeam => "타팀 동료",
            Audience::Customer => "고객",
        }
    }

    /// Parses a wire key. Surrounding whitespace is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn template(&self) -> PromptTemplate {
        let template = match self {
            Audience::Superior => SUPERIOR_TEMPLATE,
            Audience::PeerTeam => PEER_TEAM_TEMPLATE,
            Audience::Customer => CUSTOMER_TEMPLATE,
        };
        PromptTemplate {
            audience: *self,
            template,
        }
    }

    /// Comma separated list of accepted keys, for error messages.
    pub fn accepted_keys() -> String {
        Self::ALL
            .iter()
            .map(|a| a.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Instruction template for one audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub audience: Audience,
    pub template: &'static str,
}

impl PromptTemplate {
    /// Builds the system instruction with `text` embedded verbatim.
    pub fn render(&self, text: &str) -> String {
        self.template.replacen(TEXT_PLACEHOLDER, text, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown audience: {0}")]
pub struct UnknownAudience(pub String);

/// Looks up the template for an audience key.
pub fn resolve(audience_key: &str) -> Result<PromptTemplate, UnknownAudience> {
    Audience::from_key(audience_key)
        .map(|a| a.template())
        .ok_or_else(|| UnknownAudience(audience_key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_keys() {
        for audience in Audience::ALL {
            let template = resolve(audience.key()).unwrap();
            assert_eq!(template.audience, audience);
        }
        assert_eq!(resolve(" 고객 ").unwrap().audience, Audience::Customer);
    }

    #[test]
    fn test_resolve_unknown_key() {
        let err = resolve("친구").unwrap_err();
        assert_eq!(err, UnknownAudience("친구".to_string()));
        assert!(resolve("").is_err());
        assert!(resolve("Superior").is_err());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let first = resolve("고객").unwrap();
        let second = resolve("고객").unwrap();
        assert_eq!(first.template.as_bytes(), second.template.as_bytes());
        assert_eq!(first.render("안내 부탁드립니다"), second.render("안내 부탁드립니다"));
    }

    #[test]
    fn test_render_embeds_text_verbatim() {
        let text = "내일까지 {text} \"부탁\" 드립니다\n감사합니다";
        let rendered = Audience::Superior.template().render(text);
        assert!(rendered.ends_with(text));
        assert_eq!(rendered.matches(TEXT_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_templates_are_distinct() {
        let a = Audience::Superior.template().template;
        let b = Audience::PeerTeam.template().template;
        let c = Audience::Customer.template().template;
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        for t in [a, b, c] {
            assert_eq!(t.matches(TEXT_PLACEHOLDER).count(), 1);
        }
    }

    #[test]
    fn test_serde_uses_wire_keys() {
        let json = serde_json::to_string(&Audience::PeerTeam).unwrap();
        assert_eq!(json, "\"타팀 동료\"");
        let parsed: Audience = serde_json::from_str("\"상사\"").unwrap();
        assert_eq!(parsed, Audience::Superior);
        assert_eq!(Audience::accepted_keys(), "상사, 타팀 동료, 고객");
    }
}
