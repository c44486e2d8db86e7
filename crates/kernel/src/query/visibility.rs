//! Moderation visibility compiler.
//!
//! Produces the predicate clauses restricting which user-generated content
//! a requester may see: approved and legacy content for everyone, content
//! flagged by a user report but still pending review for everyone, and
//! pending or rejected content only for its own author.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::types::{Predicate, Value};

/// Field holding a content item's moderation status. Legacy items created
/// before moderation existed carry no such field at all.
const MODERATION_FIELD: &str = "moderationStatus";

/// Field set when content was reported by another user.
const REPORTED_FIELD: &str = "isUserReported";

/// Field holding the author identifier.
const AUTHOR_FIELD: &str = "author";

/// Field linking a comment to its post.
const POST_FIELD: &str = "relevantPostId";

/// Moderation state attached to content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Approved,
    Pending,
    Rejected,
}

impl ModerationStatus {
    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationStatus::Approved => "approved",
            ModerationStatus::Pending => "pending",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

/// The requesting principal.
///
/// An explicit sum type rather than a nullable identifier: the restricted
/// visibility branches are simply not emitted for anonymous requesters
/// instead of being compared against a null id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated { id: String },
}

impl Identity {
    /// Authenticated principal with the given stable identifier.
    pub fn authenticated(id: impl Into<String>) -> Self {
        Identity::Authenticated { id: id.into() }
    }
}

/// Validated document identifier (24 hex characters).
///
/// Historical data stores references both as native identifiers and as
/// plain strings; [`DocumentId::match_clause`] emits a clause covering
/// both representations so neither generation of documents goes missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentId(String);

impl DocumentId {
    /// Parse a raw identifier, rejecting anything that cannot address a
    /// stored document. Callers translate the error into a bad-request
    /// response before any query is compiled.
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(AppError::InvalidIdentifier(raw.to_string()))
        }
    }

    /// The canonical lowercase hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Equality clause matching the native representation first and
    /// falling back to string-typed legacy documents.
    pub fn match_clause(&self, field: &str) -> Predicate {
        Predicate::AnyOf(vec![
            Predicate::eq(field, Value::id(&self.0)),
            Predicate::eq(field, Value::string(&self.0)),
        ])
    }
}

/// Build the visibility clauses for the given requester.
///
/// Everyone sees approved content, legacy content without a moderation
/// field, and user-reported content still pending review. Pending and
/// rejected content is otherwise visible only to its own author, so the
/// author always knows its state.
pub fn visibility_filter(identity: &Identity) -> Predicate {
    let mut branches = vec![
        Predicate::eq(
            MODERATION_FIELD,
            Value::string(ModerationStatus::Approved.as_str()),
        ),
        Predicate::Exists {
            field: MODERATION_FIELD.to_string(),
            exists: false,
        },
        Predicate::AllOf(vec![
            Predicate::eq(
                MODERATION_FIELD,
                Value::string(ModerationStatus::Pending.as_str()),
            ),
            Predicate::eq(REPORTED_FIELD, Value::Boolean(true)),
        ]),
    ];

    if let Identity::Authenticated { id } = identity {
        for status in [ModerationStatus::Pending, ModerationStatus::Rejected] {
            branches.push(Predicate::AllOf(vec![
                author_clause(id),
                Predicate::eq(MODERATION_FIELD, Value::string(status.as_str())),
            ]));
        }
    }

    Predicate::AnyOf(branches)
}

/// Visibility filter for the comments under a single post.
pub fn comment_visibility(post_id: &DocumentId, identity: &Identity) -> Predicate {
    Predicate::and(vec![
        post_id.match_clause(POST_FIELD),
        visibility_filter(identity),
    ])
}

/// Authorship clause for a principal id. Ids that parse as document
/// identifiers get the legacy fallback treatment; auth-provider ids are
/// plain strings.
fn author_clause(id: &str) -> Predicate {
    match DocumentId::parse(id) {
        Ok(doc_id) => doc_id.match_clause(AUTHOR_FIELD),
        Err(_) => Predicate::eq(AUTHOR_FIELD, Value::string(id)),
    }
}
