/// Expiration policy for ephemeral posts
///
/// Pure functions over a post's `expires_at` and the current time. With
/// `delta = expires_at - now`:
///
/// | delta              | label                      | badge |
/// |--------------------|----------------------------|-------|
/// | `<= 0`             | `deleted`                  | no    |
/// | `(0, 60s)`         | `deleting soon`            | yes   |
/// | `[60s, 3600s)`     | `will delete in N minutes` | yes   |
/// | `>= 3600s`         | `will delete in N hours`   | no    |
///
/// Posts without an expiration get no label and no badge.
use crate::models::EphemeralPost;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 60 * 60;

/// Display classification of a post's remaining lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationState {
    /// Not an ephemeral post
    Permanent,
    Deleted,
    /// Less than a minute left
    DeletingSoon,
    Minutes(i64),
    Hours(i64),
}

impl ExpirationState {
    /// Classify a post relative to `now`
    pub fn classify(post: &EphemeralPost, now: DateTime<Utc>) -> Self {
        let Some(expires_at) = post.expires_at() else {
            return ExpirationState::Permanent;
        };

        let delta = expires_at.signed_duration_since(now);
        if delta <= Duration::zero() {
            ExpirationState::Deleted
        } else if delta < Duration::seconds(MINUTE_SECS) {
            ExpirationState::DeletingSoon
        } else if delta < Duration::seconds(HOUR_SECS) {
            ExpirationState::Minutes(delta.num_minutes().max(1))
        } else {
            ExpirationState::Hours(delta.num_hours())
        }
    }

    /// Label shown next to the post, `None` for permanent posts
    pub fn label(&self) -> Option<String> {
        match self {
            ExpirationState::Permanent => None,
            other => Some(other.to_string()),
        }
    }

    /// Under an hour left and not yet expired
    pub fn is_expiring_soon(&self) -> bool {
        matches!(
            self,
            ExpirationState::DeletingSoon | ExpirationState::Minutes(_)
        )
    }
}

impl fmt::Display for ExpirationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpirationState::Permanent => Ok(()),
            ExpirationState::Deleted => write!(f, "deleted"),
            ExpirationState::DeletingSoon => write!(f, "deleting soon"),
            ExpirationState::Minutes(n) => write!(f, "will delete in {}", plural(*n, "minute")),
            ExpirationState::Hours(n) => write!(f, "will delete in {}", plural(*n, "hour")),
        }
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Rendered expiration state for a single post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpirationDisplay {
    pub label: Option<String>,
    pub expiring_soon: bool,
}

/// Entry point bundling the policy operations
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpirationPolicy;

impl ExpirationPolicy {
    pub fn display(&self, post: &EphemeralPost, now: DateTime<Utc>) -> ExpirationDisplay {
        let state = ExpirationState::classify(post, now);
        ExpirationDisplay {
            label: state.label(),
            expiring_soon: state.is_expiring_soon(),
        }
    }

    pub fn display_now(&self, post: &EphemeralPost) -> ExpirationDisplay {
        self.display(post, Utc::now())
    }
}

pub fn expiration_state(post: &EphemeralPost, now: DateTime<Utc>) -> ExpirationState {
    ExpirationState::classify(post, now)
}

/// Human-readable remaining time, `None` for non-ephemeral posts
pub fn remaining_time_label(post: &EphemeralPost, now: DateTime<Utc>) -> Option<String> {
    ExpirationState::classify(post, now).label()
}

pub fn remaining_time_label_now(post: &EphemeralPost) -> Option<String> {
    remaining_time_label(post, Utc::now())
}

/// True while an ephemeral post has strictly less than one hour left
pub fn should_show_expiring_badge(post: &EphemeralPost, now: DateTime<Utc>) -> bool {
    ExpirationState::classify(post, now).is_expiring_soon()
}

pub fn should_show_expiring_badge_now(post: &EphemeralPost) -> bool {
    should_show_expiring_badge(post, Utc::now())
}

/// Whether the post should be treated as deleted for display
pub fn is_expired(post: &EphemeralPost, now: DateTime<Utc>) -> bool {
    matches!(ExpirationState::classify(post, now), ExpirationState::Deleted)
}

/// Drop expired ephemeral posts from a list before rendering it.
///
/// Only affects the local list; removal on the backend is done by its cleanup job.
pub fn retain_visible(posts: &mut Vec<EphemeralPost>, now: DateTime<Utc>) -> usize {
    let before = posts.len();
    posts.retain(|post| !is_expired(post, now));
    let removed = before - posts.len();

    if removed > 0 {
        tracing::debug!(
            removed,
            remaining = posts.len(),
            "Hid expired ephemeral posts"
        );
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpirationConfig;
    use crate::models::{GeoPoint, PostKind};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// Ephemeral post whose expiration sits `delta` away from `now()`
    fn expiring_in(delta: Duration) -> EphemeralPost {
        let created_at = now() - Duration::days(1);
        EphemeralPost::ephemeral(
            Uuid::new_v4(),
            PostKind::Status,
            "status",
            GeoPoint::new(0.0, 0.0).unwrap(),
            created_at,
            delta + Duration::days(1),
            &ExpirationConfig::default(),
        )
        .unwrap()
    }

    fn permanent() -> EphemeralPost {
        EphemeralPost::permanent(
            Uuid::new_v4(),
            PostKind::Text,
            "regular",
            GeoPoint::new(0.0, 0.0).unwrap(),
            now() - Duration::days(30),
        )
    }

    #[test]
    fn test_classify_buckets() {
        let cases = [
            (Duration::seconds(-1), ExpirationState::Deleted),
            (Duration::zero(), ExpirationState::Deleted),
            (Duration::seconds(1), ExpirationState::DeletingSoon),
            (Duration::seconds(59), ExpirationState::DeletingSoon),
            (Duration::seconds(60), ExpirationState::Minutes(1)),
            (Duration::seconds(119), ExpirationState::Minutes(1)),
            (Duration::seconds(3599), ExpirationState::Minutes(59)),
            (Duration::seconds(3600), ExpirationState::Hours(1)),
            (Duration::seconds(7199), ExpirationState::Hours(1)),
            (Duration::hours(23), ExpirationState::Hours(23)),
        ];
        for (delta, expected) in cases {
            assert_eq!(
                expiration_state(&expiring_in(delta), now()),
                expected,
                "delta={}s",
                delta.num_seconds()
            );
        }
    }

    #[test]
    fn test_sub_second_remaining_is_deleting_soon() {
        let post = expiring_in(Duration::milliseconds(500));
        assert_eq!(
            remaining_time_label(&post, now()).as_deref(),
            Some("deleting soon")
        );
        assert!(should_show_expiring_badge(&post, now()));
    }

    #[test]
    fn test_label_wording() {
        assert_eq!(
            remaining_time_label(&expiring_in(Duration::minutes(1)), now()).as_deref(),
            Some("will delete in 1 minute")
        );
        assert_eq!(
            remaining_time_label(&expiring_in(Duration::minutes(12)), now()).as_deref(),
            Some("will delete in 12 minutes")
        );
        assert_eq!(
            remaining_time_label(&expiring_in(Duration::hours(1)), now()).as_deref(),
            Some("will delete in 1 hour")
        );
        assert_eq!(
            remaining_time_label(&expiring_in(Duration::hours(5)), now()).as_deref(),
            Some("will delete in 5 hours")
        );
    }

    #[test]
    fn test_permanent_post_has_no_label_or_badge() {
        let post = permanent();
        assert_eq!(remaining_time_label(&post, now()), None);
        assert!(!should_show_expiring_badge(&post, now()));
        assert!(!is_expired(&post, now()));
        assert_eq!(ExpirationState::Permanent.to_string(), "");
    }

    #[test]
    fn test_display_snapshot() {
        let policy = ExpirationPolicy;
        let display = policy.display(&expiring_in(Duration::minutes(45)), now());
        assert_eq!(
            display,
            ExpirationDisplay {
                label: Some("will delete in 45 minutes".to_string()),
                expiring_soon: true,
            }
        );

        let json = serde_json::to_value(policy.display(&permanent(), now())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "label": null, "expiring_soon": false })
        );
    }

    #[test]
    fn test_now_variants_use_wall_clock() {
        let post = EphemeralPost::ephemeral(
            Uuid::new_v4(),
            PostKind::Status,
            "now",
            GeoPoint::new(0.0, 0.0).unwrap(),
            Utc::now(),
            Duration::hours(10),
            &ExpirationConfig::default(),
        )
        .unwrap();
        let label = remaining_time_label_now(&post).unwrap();
        assert!(label.ends_with("hours"), "unexpected label: {}", label);
        assert!(!should_show_expiring_badge_now(&post));
        assert!(!ExpirationPolicy.display_now(&post).expiring_soon);
    }

    #[test]
    fn test_retain_visible_drops_only_expired() {
        let mut posts = vec![
            expiring_in(Duration::seconds(-10)),
            expiring_in(Duration::zero()),
            expiring_in(Duration::seconds(30)),
            permanent(),
        ];
        let kept_ids: Vec<Uuid> = posts[2..].iter().map(|p| p.id()).collect();

        let removed = retain_visible(&mut posts, now());

        assert_eq!(removed, 2);
        assert_eq!(posts.iter().map(|p| p.id()).collect::<Vec<_>>(), kept_ids);
    }
}
