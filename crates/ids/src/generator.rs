use crate::{IdError, IdResult};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::{fmt, str::FromStr};

pub use ::uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

/// A time-prefixed unique identifier.
///
/// Format:
/// `YYYYMMDDTHHMMSS.mmmZ-<canonical_uuid>`
///
/// The timestamp is held at millisecond precision so that the displayed form parses back
/// to an equal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AdmissionUid {
    timestamp: DateTime<Utc>,
    uuid: Uuid,
}

impl AdmissionUid {
    /// Generate a new uid.
    ///
    /// If `last_uid` is provided, the timestamp is guaranteed to be strictly greater than
    /// the last one (by at least 1 ms).
    pub fn generate(last_uid: Option<&AdmissionUid>) -> Self {
        let now = Utc::now().trunc_subsecs(3);

        let timestamp = match last_uid {
            Some(prev) if now <= prev.timestamp => prev.timestamp + Duration::milliseconds(1),
            _ => now,
        };

        Self {
            timestamp,
            uuid: Uuid::new_v4(),
        }
    }

    /// Returns the timestamp component.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the UUID component.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// True when `input` is 32 lowercase hexadecimal characters.
    fn is_canonical_uuid(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for AdmissionUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Z-{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.uuid.simple()
        )
    }
}

impl FromStr for AdmissionUid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ts_str, uuid_str) = s
            .split_once('-')
            .ok_or_else(|| {
                IdError::InvalidInput(format!("Invalid admission uid format: '{}'", s))
            })?;

        let ts_no_z = ts_str.strip_suffix('Z').ok_or_else(|| {
            IdError::InvalidInput(format!("Timestamp must end with 'Z': '{}'", ts_str))
        })?;

        let naive = chrono::NaiveDateTime::parse_from_str(ts_no_z, TIMESTAMP_FORMAT).map_err(
            |e| IdError::InvalidInput(format!("Invalid timestamp format '{}': {}", ts_str, e)),
        )?;

        if !Self::is_canonical_uuid(uuid_str) {
            return Err(IdError::InvalidInput(format!(
                "UUID must be 32 lowercase hex characters: '{}'",
                uuid_str
            )));
        }
        let uuid = Uuid::parse_str(uuid_str)
            .map_err(|e| IdError::InvalidInput(format!("Invalid UUID '{}': {}", uuid_str, e)))?;

        Ok(Self {
            timestamp: DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc),
            uuid,
        })
    }
}

/// Identifier of a patient in the ward register.
///
/// The value is opaque to callers. Identifiers allocated by [`PatientIdGenerator`] are
/// [`AdmissionUid`]s in string form; identifiers of seeded records are short literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PatientId(String);

impl PatientId {
    /// Wraps an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if the identifier is empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> IdResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdError::InvalidInput(
                "patient id cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the time-prefixed form, if this id has one.
    pub fn admission_uid(&self) -> Option<AdmissionUid> {
        self.0.parse().ok()
    }
}

impl From<AdmissionUid> for PatientId {
    fn from(uid: AdmissionUid) -> Self {
        Self(uid.to_string())
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Allocates fresh [`PatientId`]s with strictly increasing timestamps.
///
/// The generator is owned by the patient register, so monotonicity holds per register.
#[derive(Clone, Debug, Default)]
pub struct PatientIdGenerator {
    last: Option<AdmissionUid>,
}

impl PatientIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next identifier.
    pub fn next_id(&mut self) -> PatientId {
        let uid = AdmissionUid::generate(self.last.as_ref());
        self.last = Some(uid.clone());
        PatientId::from(uid)
    }

    /// The most recently issued uid, if any.
    pub fn last(&self) -> Option<&AdmissionUid> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_canonical_uuid_suffix() {
        let uid = AdmissionUid::generate(None);
        let displayed = uid.to_string();

        let (ts, uuid) = displayed.split_once('-').expect("separator present");
        assert!(ts.ends_with('Z'));
        assert!(AdmissionUid::is_canonical_uuid(uuid));
        assert_eq!(uuid, uid.uuid().simple().to_string());
        assert_eq!(uid.uuid().get_version_num(), 4);
    }

    #[test]
    fn test_generate_monotonic_same_instant() {
        let uid1 = AdmissionUid::generate(None);
        // Back to back: either the clock moved or the 1 ms bump applies
        let uid2 = AdmissionUid::generate(Some(&uid1));

        assert!(uid2.timestamp() > uid1.timestamp());
    }

    #[test]
    fn test_generate_bumps_past_future_previous() {
        let far = AdmissionUid {
            timestamp: Utc::now().trunc_subsecs(3) + Duration::hours(1),
            uuid: Uuid::new_v4(),
        };
        let next = AdmissionUid::generate(Some(&far));

        assert_eq!(next.timestamp(), far.timestamp() + Duration::milliseconds(1));
    }

    #[test]
    fn test_display_parses_back_to_equal_value() {
        let uid = AdmissionUid::generate(None);
        let parsed: AdmissionUid = uid.to_string().parse().expect("should parse");
        assert_eq!(parsed, uid);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = "20250825T080512.301Z550e8400e29b41d4a716446655440000"
            .parse::<AdmissionUid>()
            .expect_err("expected parse failure");
        match err {
            IdError::InvalidInput(msg) => assert!(msg.contains("Invalid admission uid format")),
        }
    }

    #[test]
    fn test_parse_rejects_missing_z() {
        let result =
            "20250825T080512.301-550e8400e29b41d4a716446655440000".parse::<AdmissionUid>();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_uppercase_uuid() {
        let result =
            "20250825T080512.301Z-550E8400E29B41D4A716446655440000".parse::<AdmissionUid>();
        assert!(result.is_err());
    }

    #[test]
    fn test_patient_id_rejects_blank() {
        assert!(PatientId::new("   ").is_err());
        assert_eq!(PatientId::new("1").unwrap().as_str(), "1");
    }

    #[test]
    fn test_seed_id_has_no_admission_uid() {
        let id = PatientId::new("3").unwrap();
        assert!(id.admission_uid().is_none());
    }

    #[test]
    fn test_generator_issues_unique_increasing_ids() {
        let mut generator = PatientIdGenerator::new();
        let ids: Vec<PatientId> = (0..200).map(|_| generator.next_id()).collect();

        let unique: HashSet<&PatientId> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());

        let stamps: Vec<DateTime<Utc>> = ids
            .iter()
            .map(|id| id.admission_uid().expect("generated id parses").timestamp())
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            generator.last().map(AdmissionUid::to_string).as_deref(),
            ids.last().map(PatientId::as_str)
        );
    }

    #[test]
    fn test_patient_id_serialises_as_plain_string() {
        let id = PatientId::new("5").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"5\"");
    }
}
