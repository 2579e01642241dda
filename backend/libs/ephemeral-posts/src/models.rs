/// Data models for ephemeral posts
///
/// `EphemeralPost` keeps `is_ephemeral` and `expires_at` private so the pair can
/// only be set together: a status post always has an expiration, a regular post
/// never does. Neither can change after construction.
use crate::config::ExpirationConfig;
use crate::error::{ExpirationError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Text,
    Audio,
    Status,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Text => "text",
            PostKind::Audio => "audio",
            PostKind::Status => "status",
        }
    }
}

impl TryFrom<&str> for PostKind {
    type Error = ExpirationError;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s {
            "text" => Ok(PostKind::Text),
            "audio" => Ok(PostKind::Audio),
            "status" => Ok(PostKind::Status),
            _ => Err(ExpirationError::InvalidKind(s.to_string())),
        }
    }
}

/// Geographic coordinates a post is tagged with (WGS84 degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(ExpirationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Raw post row as stored by the backend
///
/// Nothing is validated here; convert with [`EphemeralPost::from_record`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub kind: PostKind,
    pub content: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub is_ephemeral: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PostRecord", into = "PostRecord")]
pub struct EphemeralPost {
    id: Uuid,
    author_id: Uuid,
    kind: PostKind,
    content: String,
    location: GeoPoint,
    created_at: DateTime<Utc>,
    is_ephemeral: bool,
    expires_at: Option<DateTime<Utc>>,
}

impl EphemeralPost {
    /// Create a regular post that never expires
    pub fn permanent(
        author_id: Uuid,
        kind: PostKind,
        content: impl Into<String>,
        location: GeoPoint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            kind,
            content: content.into(),
            location,
            created_at,
            is_ephemeral: false,
            expires_at: None,
        }
    }

    /// Create an ephemeral post that expires `lifetime` after `created_at`.
    ///
    /// The lifetime must be strictly positive and within `config.max_lifetime()`.
    pub fn ephemeral(
        author_id: Uuid,
        kind: PostKind,
        content: impl Into<String>,
        location: GeoPoint,
        created_at: DateTime<Utc>,
        lifetime: Duration,
        config: &ExpirationConfig,
    ) -> Result<Self> {
        config.validate()?;
        if lifetime <= Duration::zero() {
            return Err(ExpirationError::InvalidLifetime {
                millis: lifetime.num_milliseconds(),
            });
        }
        if lifetime > config.max_lifetime() {
            return Err(ExpirationError::LifetimeTooLong {
                seconds: lifetime.num_seconds(),
                max_seconds: config.max_lifetime_secs,
            });
        }
        let expires_at = created_at.checked_add_signed(lifetime).ok_or(
            ExpirationError::ExpirationOutOfRange {
                created_at,
                seconds: lifetime.num_seconds(),
            },
        )?;

        let post = Self {
            id: Uuid::new_v4(),
            author_id,
            kind,
            content: content.into(),
            location,
            created_at,
            is_ephemeral: true,
            expires_at: Some(expires_at),
        };

        tracing::debug!(
            post_id = %post.id,
            kind = post.kind.as_str(),
            lifetime_secs = lifetime.num_seconds(),
            "Created ephemeral post"
        );
        Ok(post)
    }

    /// Create a status update, using the configured default lifetime when none is given
    pub fn status_update(
        author_id: Uuid,
        content: impl Into<String>,
        location: GeoPoint,
        created_at: DateTime<Utc>,
        lifetime: Option<Duration>,
        config: &ExpirationConfig,
    ) -> Result<Self> {
        config.validate()?;
        let lifetime = lifetime.unwrap_or_else(|| config.default_lifetime());
        Self::ephemeral(
            author_id,
            PostKind::Status,
            content,
            location,
            created_at,
            lifetime,
            config,
        )
    }

    /// Convert a stored record, rejecting rows where `is_ephemeral` and `expires_at` disagree.
    ///
    /// An `expires_at` earlier than `created_at` is accepted as-is.
    pub fn from_record(record: PostRecord) -> Result<Self> {
        if record.is_ephemeral != record.expires_at.is_some() {
            tracing::warn!(
                post_id = %record.id,
                is_ephemeral = record.is_ephemeral,
                "Rejected post record with inconsistent expiration"
            );
            return Err(ExpirationError::ExpirationMismatch {
                post_id: record.id,
                is_ephemeral: record.is_ephemeral,
                has_expiration: record.expires_at.is_some(),
            });
        }
        let location = GeoPoint::new(record.latitude, record.longitude)?;

        Ok(Self {
            id: record.id,
            author_id: record.author_id,
            kind: record.kind,
            content: record.content,
            location,
            created_at: record.created_at,
            is_ephemeral: record.is_ephemeral,
            expires_at: record.expires_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    pub fn kind(&self) -> PostKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_ephemeral(&self) -> bool {
        self.is_ephemeral
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl TryFrom<PostRecord> for EphemeralPost {
    type Error = ExpirationError;

    fn try_from(record: PostRecord) -> std::result::Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl From<EphemeralPost> for PostRecord {
    fn from(post: EphemeralPost) -> Self {
        PostRecord {
            id: post.id,
            author_id: post.author_id,
            kind: post.kind,
            content: post.content,
            latitude: post.location.latitude,
            longitude: post.location.longitude,
            created_at: post.created_at,
            is_ephemeral: post.is_ephemeral,
            expires_at: post.expires_at,
        }
    }
}
