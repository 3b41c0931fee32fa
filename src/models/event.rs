use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One entry of a user's public activity feed.
///
/// The wire format carries the event class as a `"type"` string and a
/// payload whose shape depends on that class. Deserialization resolves the
/// tag up front so downstream code matches on [`EventKind`] and
/// [`EventPayload`] instead of probing loose JSON fields.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    Create,
    CommitComment,
    PullRequestReview,
    PullRequestReviewComment,
    /// Any feed entry outside the recognized set, keeping its wire tag.
    Other(String),
}

impl EventKind {
    /// Whether events of this kind count as contributions in the activity
    /// chart, the heat-map, and the yearly contribution total.
    pub fn is_contribution(&self) -> bool {
        !matches!(self, EventKind::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Push => "PushEvent",
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::Create => "CreateEvent",
            EventKind::CommitComment => "CommitCommentEvent",
            EventKind::PullRequestReview => "PullRequestReviewEvent",
            EventKind::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            EventKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        match tag {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issues,
            "CreateEvent" => EventKind::Create,
            "CommitCommentEvent" => EventKind::CommitComment,
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            "PullRequestReviewCommentEvent" => EventKind::PullRequestReviewComment,
            _ => EventKind::Other(tag.to_string()),
        }
    }
}

/// Typed payload union. Only push events carry a commit list; every other
/// kind maps to `Untyped`, so a commit access on the wrong variant is a
/// compile error rather than a runtime check.
#[derive(Debug, Clone)]
pub enum EventPayload {
    Push(PushPayload),
    Untyped,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub commits: Vec<PushCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushCommit {
    pub sha: String,
    pub message: String,
}

impl Event {
    /// Commits carried by this event; zero for anything but a push.
    pub fn commit_count(&self) -> usize {
        match &self.payload {
            EventPayload::Push(push) => push.commits.len(),
            EventPayload::Untyped => 0,
        }
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawEvent {
            id: String,
            #[serde(rename = "type")]
            kind: String,
            created_at: DateTime<Utc>,
            #[serde(default)]
            payload: serde_json::Value,
        }

        let raw = RawEvent::deserialize(deserializer)?;
        let kind = EventKind::from(raw.kind.as_str());

        let payload = match kind {
            EventKind::Push => {
                // An absent payload is a zero-contribution push, not an error.
                let push = if raw.payload.is_null() {
                    PushPayload::default()
                } else {
                    serde_json::from_value(raw.payload).map_err(serde::de::Error::custom)?
                };
                EventPayload::Push(push)
            }
            _ => EventPayload::Untyped,
        };

        Ok(Event {
            id: raw.id,
            kind,
            created_at: raw.created_at,
            payload,
        })
    }
}
