//! Presentation grouping of requests by job opportunity.

use std::collections::HashMap;

use uuid::Uuid;

use relata_core::{defaults, ReferralGroup, ReferralRequest};

/// Group requests by `job_id` for display ordering.
///
/// Requests without a job land in a single unassigned bucket. Each group
/// carries the first non-empty job title and company seen among its members;
/// the sort label falls back `title → company → "Unassigned Job"`. Groups are
/// sorted case-insensitive ascending by label. The partition is lossless:
/// every input request appears in exactly one group, unmodified.
pub fn group_by_job(requests: &[ReferralRequest]) -> Vec<ReferralGroup> {
    let mut index: HashMap<Option<Uuid>, usize> = HashMap::new();
    let mut groups: Vec<ReferralGroup> = Vec::new();

    for req in requests {
        let slot = *index.entry(req.job_id).or_insert_with(|| {
            groups.push(ReferralGroup {
                job_id: req.job_id,
                job_title: None,
                job_company: None,
                label: String::new(),
                requests: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        if group.job_title.is_none() {
            group.job_title = req.job_title.clone().filter(|t| !t.is_empty());
        }
        if group.job_company.is_none() {
            group.job_company = req.job_company.clone().filter(|c| !c.is_empty());
        }
        group.requests.push(req.clone());
    }

    for group in &mut groups {
        group.label = group
            .job_title
            .clone()
            .or_else(|| group.job_company.clone())
            .unwrap_or_else(|| defaults::UNASSIGNED_JOB_LABEL.to_string());
    }

    groups.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::draft_request;

    fn request_for_job(
        job_id: Option<Uuid>,
        title: Option<&str>,
        company: Option<&str>,
    ) -> ReferralRequest {
        let mut r = draft_request();
        r.job_id = job_id;
        r.job_title = title.map(String::from);
        r.job_company = company.map(String::from);
        r
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_job(&[]).is_empty());
    }

    #[test]
    fn test_partition_is_lossless() {
        let job_a = Uuid::new_v4();
        let job_b = Uuid::new_v4();
        let requests = vec![
            request_for_job(Some(job_a), Some("Backend Engineer"), None),
            request_for_job(None, None, None),
            request_for_job(Some(job_b), Some("Data Analyst"), Some("Acme")),
            request_for_job(Some(job_a), None, Some("Initech")),
            request_for_job(None, None, None),
        ];

        let groups = group_by_job(&requests);
        let grouped: usize = groups.iter().map(|g| g.requests.len()).sum();
        assert_eq!(grouped, requests.len());

        // Every input id appears exactly once across all groups.
        let mut ids: Vec<Uuid> = groups
            .iter()
            .flat_map(|g| g.requests.iter().map(|r| r.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), requests.len());
    }

    #[test]
    fn test_unassigned_bucket_is_single() {
        let requests = vec![
            request_for_job(None, None, None),
            request_for_job(None, None, None),
        ];
        let groups = group_by_job(&requests);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Unassigned Job");
        assert!(groups[0].job_id.is_none());
        assert_eq!(groups[0].requests.len(), 2);
    }

    #[test]
    fn test_first_non_empty_label_fields_carried() {
        let job = Uuid::new_v4();
        let requests = vec![
            request_for_job(Some(job), Some(""), None),
            request_for_job(Some(job), Some("Platform Engineer"), Some("Globex")),
        ];
        let groups = group_by_job(&requests);
        assert_eq!(groups[0].job_title.as_deref(), Some("Platform Engineer"));
        assert_eq!(groups[0].job_company.as_deref(), Some("Globex"));
        assert_eq!(groups[0].label, "Platform Engineer");
    }

    #[test]
    fn test_label_falls_back_to_company() {
        let job = Uuid::new_v4();
        let requests = vec![request_for_job(Some(job), None, Some("Acme"))];
        let groups = group_by_job(&requests);
        assert_eq!(groups[0].label, "Acme");
    }

    #[test]
    fn test_groups_sorted_case_insensitive() {
        let requests = vec![
            request_for_job(Some(Uuid::new_v4()), Some("zookeeper admin"), None),
            request_for_job(Some(Uuid::new_v4()), Some("Backend Engineer"), None),
            request_for_job(None, None, None),
            request_for_job(Some(Uuid::new_v4()), Some("analyst"), None),
        ];
        let groups = group_by_job(&requests);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["analyst", "Backend Engineer", "Unassigned Job", "zookeeper admin"]
        );
    }
}
