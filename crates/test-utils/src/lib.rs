//! Rione test utilities.
//!
//! Fixture builders producing the JSON documents the community app
//! stores: forum topics, comments on posts, and marketplace listings.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value as JsonValue, json};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Default timestamp for fixtures.
const EPOCH: &str = "2024-01-01T00:00:00.000Z";

/// Fresh 24-hex-char document identifier.
pub fn next_id() -> String {
    format!("{:024x}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Create a test forum topic.
pub fn topic(title: &str) -> TestDoc {
    TestDoc::new(json!({
        "_id": {"$oid": next_id()},
        "title": title,
        "description": "",
        "tags": [],
        "author": "user-1",
        "date": EPOCH,
        "createdAt": EPOCH,
        "comments": [],
        "likes": 0,
        "views": 0,
    }))
}

/// Create a test comment under a post.
pub fn comment(post_id: &str, body: &str) -> TestDoc {
    TestDoc::new(json!({
        "_id": {"$oid": next_id()},
        "relevantPostId": {"$oid": post_id},
        "body": body,
        "author": "user-1",
        "date": EPOCH,
        "createdAt": EPOCH,
    }))
}

/// Create a test marketplace listing.
pub fn listing(title: &str, price: f64) -> TestDoc {
    TestDoc::new(json!({
        "_id": {"$oid": next_id()},
        "title": title,
        "description": "",
        "descriptionPlainText": "",
        "category": "other",
        "condition": "good",
        "price": price,
        "status": "available",
        "createdAt": EPOCH,
    }))
}

/// A chainable document fixture builder.
#[derive(Debug, Clone)]
pub struct TestDoc {
    fields: Map<String, JsonValue>,
}

impl TestDoc {
    fn new(value: JsonValue) -> Self {
        let JsonValue::Object(fields) = value else {
            unreachable!("fixtures are always objects");
        };
        Self { fields }
    }

    /// Set a specific document identifier.
    pub fn with_id(mut self, hex: &str) -> Self {
        self.fields
            .insert("_id".to_string(), json!({"$oid": hex}));
        self
    }

    /// Set the author identifier.
    pub fn with_author(mut self, id: &str) -> Self {
        self.fields.insert("author".to_string(), json!(id));
        self
    }

    /// Set the tag collection.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.fields.insert("tags".to_string(), json!(tags));
        self
    }

    /// Set the like count.
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.fields.insert("likes".to_string(), json!(likes));
        self
    }

    /// Set the view count.
    pub fn with_views(mut self, views: i64) -> Self {
        self.fields.insert("views".to_string(), json!(views));
        self
    }

    /// Set both timestamp fields.
    pub fn with_date(mut self, iso: &str) -> Self {
        self.fields.insert("date".to_string(), json!(iso));
        self.fields.insert("createdAt".to_string(), json!(iso));
        self
    }

    /// Store the given number of (empty) comments on the document.
    pub fn with_comment_count(mut self, count: usize) -> Self {
        self.fields
            .insert("comments".to_string(), json!(vec![json!({}); count]));
        self
    }

    /// Set the moderation status field.
    pub fn with_moderation(mut self, status: &str) -> Self {
        self.fields
            .insert("moderationStatus".to_string(), json!(status));
        self
    }

    /// Mark the document as reported by a user.
    pub fn reported(mut self) -> Self {
        self.fields.insert("isUserReported".to_string(), json!(true));
        self
    }

    /// Set an arbitrary field.
    pub fn with(mut self, key: &str, value: JsonValue) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Finish the fixture.
    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}
