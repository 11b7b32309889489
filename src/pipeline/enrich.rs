use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::geocoding::Geocoder;
use crate::pipeline::normalize::Record;

/// Resolves the record's address to coordinates and attaches them.
///
/// Exactly one geocoding call per record, no retries, no caching. Every
/// failure mode (unset address, no candidates, service error) is the same
/// soft outcome: the record ships without Coordinates and one diagnostic
/// is returned for the caller to collect.
pub async fn enrich_record(record: &mut Record, geocoder: &dyn Geocoder) -> Option<Diagnostic> {
    let address = record.address().unwrap_or_default().to_string();

    let reason = match geocoder.geocode(&address).await {
        Ok(candidates) => match candidates.first() {
            Some(candidate) => {
                record.attach_coordinates(*candidate);
                debug!(
                    "Attached coordinates ({}, {}) for \"{}\"",
                    candidate.lat,
                    candidate.lng,
                    record.name_or_unknown()
                );
                return None;
            }
            None => "no match on the geocoding service".to_string(),
        },
        Err(e) => e.to_string(),
    };

    let diagnostic = Diagnostic::GeocodingFailed {
        name: record.name_or_unknown(),
        address,
        reason,
    };
    diagnostic.report();
    Some(diagnostic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::GeoCandidate;
    use crate::pipeline::schema::FieldIndex;
    use async_trait::async_trait;

    struct FirstCandidateWins;

    #[async_trait]
    impl Geocoder for FirstCandidateWins {
        async fn geocode(&self, _address: &str) -> anyhow::Result<Vec<GeoCandidate>> {
            Ok(vec![
                GeoCandidate { lat: 40.0, lng: -75.0 },
                GeoCandidate { lat: 99.0, lng: 99.0 },
            ])
        }
    }

    struct NoMatch;

    #[async_trait]
    impl Geocoder for NoMatch {
        async fn geocode(&self, _address: &str) -> anyhow::Result<Vec<GeoCandidate>> {
            Ok(Vec::new())
        }
    }

    fn record_with_address() -> Record {
        let (index, _) = FieldIndex::bind(&["Name".to_string(), "Address".to_string()]);
        crate::pipeline::normalize::normalize_row(
            &["Jane Doe".to_string(), "1 Main St".to_string()],
            &index,
            &mut Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_first_candidate_is_attached() {
        let mut record = record_with_address();
        let diagnostic = enrich_record(&mut record, &FirstCandidateWins).await;

        assert!(diagnostic.is_none());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Coordinates"]["lat"], 40.0);
        assert_eq!(value["Coordinates"]["lng"], -75.0);
    }

    #[tokio::test]
    async fn test_no_match_leaves_record_without_coordinates() {
        let mut record = record_with_address();
        let diagnostic = enrich_record(&mut record, &NoMatch).await;

        assert!(!record.has_coordinates());
        match diagnostic {
            Some(Diagnostic::GeocodingFailed { name, address, .. }) => {
                assert_eq!(name, "Jane Doe");
                assert_eq!(address, "1 Main St");
            }
            other => panic!("expected GeocodingFailed, got {other:?}"),
        }
    }
}
