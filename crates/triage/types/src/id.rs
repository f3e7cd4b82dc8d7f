//! Artifact identifiers.
//!
//! Format: `YYYYMMDD-<16 lowercase hex>`. The hex part is the SHA-256 prefix of
//! the decision timestamp, track, primary reason and a salt, so identifiers are
//! reproducible under a fixed clock and salt and practically unique otherwise.
//! The date prefix is the UTC day of the timestamp and selects the partition.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::InvalidArtifactId;

const DATE_LEN: usize = 8;
const HASH_LEN: usize = 16;
const SEPARATOR: u8 = 0x1f;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactId {
    value: String,
    date: NaiveDate,
}

impl ArtifactId {
    pub fn derive(
        timestamp: &DateTime<Utc>,
        track: &str,
        primary_reason: &str,
        salt: &str,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(
            timestamp
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .as_bytes(),
        );
        hasher.update([SEPARATOR]);
        hasher.update(track.as_bytes());
        hasher.update([SEPARATOR]);
        hasher.update(primary_reason.as_bytes());
        hasher.update([SEPARATOR]);
        hasher.update(salt.as_bytes());
        let digest = hex::encode(hasher.finalize());

        let date = timestamp.date_naive();
        Self {
            value: format!("{}-{}", date.format("%Y%m%d"), &digest[..HASH_LEN]),
            date,
        }
    }

    pub fn parse(value: &str) -> Result<Self, InvalidArtifactId> {
        let invalid = |reason| InvalidArtifactId {
            value: value.to_string(),
            reason,
        };

        if !value.is_ascii() || value.len() != DATE_LEN + 1 + HASH_LEN {
            return Err(invalid("wrong length"));
        }
        let (date_part, rest) = value.split_at(DATE_LEN);
        let hash_part = rest
            .strip_prefix('-')
            .ok_or_else(|| invalid("missing '-' after date"))?;
        if !date_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("date prefix is not numeric"));
        }
        let date = NaiveDate::parse_from_str(date_part, "%Y%m%d")
            .map_err(|_| invalid("date prefix is not a calendar date"))?;
        if !hash_part
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(invalid("hash is not lowercase hex"));
        }

        Ok(Self {
            value: value.to_string(),
            date,
        })
    }

    /// UTC day the decision was made; names the storage partition.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for ArtifactId {
    type Error = InvalidArtifactId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArtifactId> for String {
    fn from(id: ArtifactId) -> String {
        id.value
    }
}
