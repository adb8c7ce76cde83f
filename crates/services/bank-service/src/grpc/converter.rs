//! Domain to wire conversions.

use chrono::{DateTime, Timelike, Utc};
use prost_types::Timestamp;

use domain::User;
use proto::pb;

/// Largest nanosecond value a protobuf timestamp accepts.
const MAX_TIMESTAMP_NANOS: u32 = 999_999_999;

/// Convert a domain user to its public wire form.
///
/// Only the five public fields are copied; the password hash, the
/// verification flag and anything added to `User` later stay behind.
pub fn convert_user(user: &User) -> pb::User {
    pb::User {
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        password_changed_at: Some(to_timestamp(user.password_changed_at)),
        created_at: Some(to_timestamp(user.created_at)),
    }
}

/// Convert a UTC time to a protobuf timestamp.
///
/// Leap-second nanoseconds are clamped into the valid range.
pub fn to_timestamp(time: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: time.timestamp(),
        nanos: time.nanosecond().min(MAX_TIMESTAMP_NANOS) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use domain::password_never_changed;

    fn from_timestamp(ts: &Timestamp) -> DateTime<Utc> {
        DateTime::from_timestamp(ts.seconds, ts.nanos as u32).unwrap()
    }

    fn alice() -> User {
        User {
            username: "alice".to_string(),
            hashed_password: "$argon2id$secret-hash".to_string(),
            full_name: "Alice A.".to_string(),
            email: "alice@x.com".to_string(),
            is_email_verified: true,
            password_changed_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
                + Duration::milliseconds(123),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
                + Duration::microseconds(456_789),
        }
    }

    #[test]
    fn test_copies_public_fields() {
        let user = alice();
        let pb_user = convert_user(&user);

        assert_eq!(pb_user.username, "alice");
        assert_eq!(pb_user.full_name, "Alice A.");
        assert_eq!(pb_user.email, "alice@x.com");
        assert_eq!(
            from_timestamp(pb_user.password_changed_at.as_ref().unwrap()),
            user.password_changed_at
        );
        assert_eq!(
            from_timestamp(pb_user.created_at.as_ref().unwrap()),
            user.created_at
        );
    }

    #[test]
    fn test_password_hash_never_copied() {
        let pb_user = convert_user(&alice());
        let rendered = format!("{:?}", pb_user);

        assert!(!rendered.contains("argon2id"));
        assert!(!rendered.contains("secret-hash"));
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let user = alice();
        assert_eq!(convert_user(&user), convert_user(&user));
    }

    #[test]
    fn test_millisecond_precision_kept() {
        let ts = to_timestamp(alice().password_changed_at);
        assert_eq!(ts.nanos, 123_000_000);
    }

    #[test]
    fn test_never_changed_password_encoded_as_is() {
        let mut user = alice();
        user.password_changed_at = password_never_changed();

        let ts = convert_user(&user).password_changed_at.unwrap();

        assert_eq!(ts.seconds, -62_135_596_800);
        assert_eq!(ts.nanos, 0);
    }
}
