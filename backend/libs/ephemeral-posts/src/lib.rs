/// Ephemeral Posts Library
///
/// Display-state policy for time-limited "status" posts on the Nova location feed.
/// A status post carries a fixed expiration timestamp; once it passes, clients treat
/// the post as deleted while the backend cleanup job removes it for real.
///
/// # Modules
///
/// - `models`: Post entity with the ephemeral/expiration invariant enforced at construction
/// - `policy`: Remaining-time labels, expiring badge and visibility filtering
/// - `config`: Status post lifetimes loaded from the environment
/// - `error`: Error types and handling
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use ephemeral_posts::{policy, EphemeralPost, ExpirationConfig, GeoPoint, PostKind};
/// use uuid::Uuid;
///
/// let now = Utc::now();
/// let location = GeoPoint::new(37.7749, -122.4194).unwrap();
/// let post = EphemeralPost::ephemeral(
///     Uuid::new_v4(),
///     PostKind::Status,
///     "at the beach",
///     location,
///     now,
///     Duration::minutes(45),
///     &ExpirationConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(
///     policy::remaining_time_label(&post, now).as_deref(),
///     Some("will delete in 45 minutes")
/// );
/// assert!(policy::should_show_expiring_badge(&post, now));
/// ```
pub mod config;
pub mod error;
pub mod models;
pub mod policy;

pub use config::ExpirationConfig;
pub use error::{ExpirationError, Result};
pub use models::{EphemeralPost, GeoPoint, PostKind, PostRecord};
pub use policy::{ExpirationDisplay, ExpirationPolicy, ExpirationState};
