//! Attendee aggregation

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::WorkshopResult;
use crate::models::{Attendee, DesignationStat};
use crate::repository::DocumentRepository;

/// Reporting over the attendee collection.
#[async_trait]
pub trait StatsReporter: Send + Sync {
    /// Attendee counts per designation, in no particular order.
    async fn stats_by_designation(&self) -> WorkshopResult<Vec<DesignationStat>>;
}

/// Recomputes the counts from a full attendee scan on every call.
#[derive(Clone)]
pub struct ScanStatsReporter {
    attendees: DocumentRepository<Attendee>,
}

impl ScanStatsReporter {
    pub fn new(attendees: DocumentRepository<Attendee>) -> Self {
        Self { attendees }
    }
}

#[async_trait]
impl StatsReporter for ScanStatsReporter {
    #[instrument(skip(self))]
    async fn stats_by_designation(&self) -> WorkshopResult<Vec<DesignationStat>> {
        let attendees = self.attendees.list().await?;
        Ok(group_by_designation(&attendees))
    }
}

fn group_by_designation(attendees: &[Attendee]) -> Vec<DesignationStat> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for attendee in attendees {
        *counts.entry(attendee.designation.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(designation, count)| DesignationStat {
            designation: designation.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkshopError;
    use database::{DatabaseError, MockDocumentCollection, StoredDocument};
    use serde_json::json;
    use std::sync::Arc;

    fn attendee(designation: &str) -> Attendee {
        Attendee {
            designation: designation.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_by_designation() {
        let mut stats =
            group_by_designation(&[attendee("Engineer"), attendee("Engineer"), attendee("PM")]);
        stats.sort_by(|a, b| a.designation.cmp(&b.designation));

        assert_eq!(
            stats,
            vec![
                DesignationStat {
                    designation: "Engineer".to_string(),
                    count: 2,
                },
                DesignationStat {
                    designation: "PM".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_no_attendees_yields_no_stats() {
        assert!(group_by_designation(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_scan_reads_every_attendee() {
        let mut mock = MockDocumentCollection::new();
        mock.expect_list().times(1).returning(|| {
            Ok(["Engineer", "Designer", "Engineer"]
                .iter()
                .enumerate()
                .map(|(i, designation)| {
                    StoredDocument::new(
                        i.to_string(),
                        json!({"designation": designation}).as_object().cloned().unwrap(),
                    )
                })
                .collect())
        });

        let reporter = ScanStatsReporter::new(DocumentRepository::new(Arc::new(mock)));
        let stats = reporter.stats_by_designation().await.unwrap();
        let engineers = stats.iter().find(|s| s.designation == "Engineer").unwrap();
        assert_eq!(engineers.count, 2);
        assert_eq!(stats.len(), 2);
    }

    #[tokio::test]
    async fn test_scan_fault_returns_no_partial_result() {
        let mut mock = MockDocumentCollection::new();
        mock.expect_list()
            .returning(|| Err(DatabaseError::Generic("cursor lost".to_string())));

        let reporter = ScanStatsReporter::new(DocumentRepository::new(Arc::new(mock)));
        let err = reporter.stats_by_designation().await.unwrap_err();
        assert!(matches!(err, WorkshopError::Store(_)));
    }
}
