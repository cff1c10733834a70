//! Sensor record domain model
//!
//! A record is a single telemetry-like measurement. It is created fresh on
//! every producer tick, persisted once, and never updated by this crate.

use crate::domain::ids::RecordId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exclusive upper bound for generated humidity values
pub const HUMIDITY_UPPER_BOUND: i32 = 100;

/// Exclusive upper bound for generated temperature values
pub const TEMPERATURE_UPPER_BOUND: i32 = 50;

/// A single sensor measurement as stored in the document collection
///
/// Field names on the wire (`_id`, `temp`, `hasSent`) match the document
/// layout existing collections were written with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Unique identifier, primary key of the collection
    #[serde(rename = "_id")]
    pub id: RecordId,

    /// Relative humidity, in [0, 100)
    pub humidity: i32,

    /// Temperature, in [0, 50)
    #[serde(rename = "temp")]
    pub temperature: i32,

    /// Set by a downstream consumer once the record has been forwarded
    #[serde(rename = "hasSent")]
    pub sent: bool,
}

impl SensorRecord {
    /// Generates a record with a fresh id and random measurements
    ///
    /// Uses the thread-local RNG, so concurrent callers never contend.
    ///
    /// # Examples
    ///
    /// ```
    /// use sensorhub::domain::record::SensorRecord;
    ///
    /// let record = SensorRecord::generate();
    /// assert!((0..100).contains(&record.humidity));
    /// assert!(!record.sent);
    /// ```
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates a record drawing measurements from the given RNG
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            id: RecordId::generate(),
            humidity: rng.gen_range(0..HUMIDITY_UPPER_BOUND),
            temperature: rng.gen_range(0..TEMPERATURE_UPPER_BOUND),
            sent: false,
        }
    }

    /// Serializes the record into its stored document form
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::json!({
            "_id": self.id.as_str(),
            "humidity": self.humidity,
            "temp": self.temperature,
            "hasSent": self.sent,
        })
    }

    /// Decodes a stored document back into a typed record
    ///
    /// # Errors
    ///
    /// Returns the decoder's error message if the document does not have the
    /// record shape.
    pub fn from_document(document: serde_json::Value) -> Result<Self, String> {
        serde_json::from_value(document).map_err(|e| e.to_string())
    }
}

impl fmt::Display for SensorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {}, humidity: {}, temp: {}, sent: {}}}",
            self.id, self.humidity, self.temperature, self.sent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_records_are_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let record = SensorRecord::generate_with(&mut rng);
            assert!((0..HUMIDITY_UPPER_BOUND).contains(&record.humidity));
            assert!((0..TEMPERATURE_UPPER_BOUND).contains(&record.temperature));
            assert!(!record.sent);
        }
    }

    #[test]
    fn test_generate_with_thread_rng() {
        let a = SensorRecord::generate();
        let b = SensorRecord::generate();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_generate_concurrently() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..100).map(|_| SensorRecord::generate()).count()))
            .collect();
        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 800);
    }

    #[test]
    fn test_document_layout() {
        let record = SensorRecord {
            id: RecordId::new("r-1").unwrap(),
            humidity: 42,
            temperature: 21,
            sent: false,
        };

        let doc = record.to_document();
        assert_eq!(doc["_id"], "r-1");
        assert_eq!(doc["humidity"], 42);
        assert_eq!(doc["temp"], 21);
        assert_eq!(doc["hasSent"], false);
        assert_eq!(doc, serde_json::to_value(&record).unwrap());

        let decoded = SensorRecord::from_document(doc).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_from_document_rejects_string_flag() {
        let doc = serde_json::json!({
            "_id": "r-2",
            "humidity": 10,
            "temp": 10,
            "hasSent": "false",
        });
        assert!(SensorRecord::from_document(doc).is_err());
    }
}
