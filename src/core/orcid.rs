//! Normalization of the ORCID `/activities` document.
//!
//! Container levels of the document are required; a body without them is a
//! [`ProfileError::StructuralMismatch`]. Leaf values are all optional and
//! default to `""` (strings) or `None` (journal, url).

use crate::domain::model::{EducationRecord, PublicationRecord, RawResponse};
use crate::utils::error::{ProfileError, Result};
use serde::Deserialize;

pub const SOURCE: &str = "ORCID";

#[derive(Debug, Deserialize)]
struct Activities {
    educations: Educations,
    works: Works,
}

#[derive(Debug, Deserialize)]
struct Educations {
    #[serde(rename = "affiliation-group")]
    affiliation_group: Vec<AffiliationGroup>,
}

#[derive(Debug, Deserialize)]
struct AffiliationGroup {
    summaries: Vec<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(rename = "education-summary")]
    education_summary: Option<EducationSummary>,
}

#[derive(Debug, Deserialize)]
struct EducationSummary {
    #[serde(rename = "start-date")]
    start_date: Option<FuzzyDate>,
    #[serde(rename = "end-date")]
    end_date: Option<FuzzyDate>,
    #[serde(rename = "role-title")]
    role_title: Option<String>,
    #[serde(rename = "department-name")]
    department_name: Option<String>,
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct FuzzyDate {
    year: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Value {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Works {
    group: Vec<WorkGroup>,
}

#[derive(Debug, Deserialize)]
struct WorkGroup {
    #[serde(rename = "work-summary")]
    work_summary: Vec<WorkSummary>,
}

#[derive(Debug, Deserialize)]
struct WorkSummary {
    title: Option<WorkTitle>,
    #[serde(rename = "journal-title")]
    journal_title: Option<Value>,
    #[serde(rename = "publication-date")]
    publication_date: Option<FuzzyDate>,
    url: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WorkTitle {
    title: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrcidProfile {
    pub education: Vec<EducationRecord>,
    pub publication: Vec<PublicationRecord>,
}

fn year_of(date: Option<FuzzyDate>) -> String {
    date.and_then(|d| d.year)
        .and_then(|y| y.value)
        .unwrap_or_default()
}

fn non_empty(value: Option<Value>) -> Option<String> {
    value.and_then(|v| v.value).filter(|v| !v.is_empty())
}

/// Parses and flattens an ORCID activities body.
pub fn normalize(body: &str) -> Result<OrcidProfile> {
    let activities: Activities = serde_json::from_str(body)
        .map_err(|e| ProfileError::structural(SOURCE, e.to_string()))?;

    let education = activities
        .educations
        .affiliation_group
        .into_iter()
        .flat_map(|group| group.summaries)
        .filter_map(|summary| summary.education_summary)
        .map(|edu| EducationRecord {
            start_year: year_of(edu.start_date),
            end_year: year_of(edu.end_date),
            title: edu.role_title.unwrap_or_default(),
            department: edu.department_name.unwrap_or_default(),
            university: edu.organization.and_then(|o| o.name).unwrap_or_default(),
        })
        .collect();

    let publication = activities
        .works
        .group
        .into_iter()
        .flat_map(|group| group.work_summary)
        .map(|work| PublicationRecord {
            title: work
                .title
                .and_then(|t| t.title)
                .and_then(|t| t.value)
                .unwrap_or_default(),
            journal: non_empty(work.journal_title),
            year: year_of(work.publication_date),
            url: non_empty(work.url),
        })
        .collect();

    Ok(OrcidProfile {
        education,
        publication,
    })
}

/// Applies the status check before normalizing.
pub fn from_response(response: &RawResponse) -> Result<OrcidProfile> {
    if !response.is_success() {
        return Err(ProfileError::UpstreamUnavailable {
            source_name: SOURCE,
            status: response.status.as_u16(),
            body: response.body.clone(),
        });
    }
    normalize(&response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "educations": {
                "affiliation-group": [
                    {
                        "summaries": [{
                            "education-summary": {
                                "start-date": {"year": {"value": "2018"}, "month": null},
                                "end-date": {"year": {"value": "2022"}},
                                "role-title": "PhD",
                                "department-name": "Computer Science",
                                "organization": {"name": "University A"}
                            }
                        }]
                    },
                    {
                        "summaries": [{
                            "education-summary": {
                                "start-date": {"year": null},
                                "end-date": null,
                                "role-title": null,
                                "department-name": "Mathematics",
                                "organization": {"name": "University B"}
                            }
                        }]
                    }
                ]
            },
            "works": {
                "group": [
                    {
                        "work-summary": [{
                            "title": {"title": {"value": "First Paper"}},
                            "journal-title": {"value": "Journal of Things"},
                            "publication-date": {"year": {"value": "2021"}},
                            "url": {"value": "https://pub/doi/10?a=1"}
                        }]
                    },
                    {
                        "work-summary": [
                            {
                                "title": {"title": {"value": "Second Paper"}},
                                "journal-title": null,
                                "publication-date": null,
                                "url": null
                            },
                            {
                                "title": {"title": {"value": "Second Paper (preprint)"}}
                            }
                        ]
                    }
                ]
            }
        })
    }

    #[test]
    fn test_education_in_group_order() {
        let profile = normalize(&sample().to_string()).unwrap();

        assert_eq!(profile.education.len(), 2);
        assert_eq!(
            profile.education[0],
            EducationRecord {
                start_year: "2018".to_string(),
                end_year: "2022".to_string(),
                title: "PhD".to_string(),
                department: "Computer Science".to_string(),
                university: "University A".to_string(),
            }
        );
        assert_eq!(profile.education[1].start_year, "");
        assert_eq!(profile.education[1].end_year, "");
        assert_eq!(profile.education[1].title, "");
        assert_eq!(profile.education[1].university, "University B");
    }

    #[test]
    fn test_publications_flatten_every_work_summary() {
        let profile = normalize(&sample().to_string()).unwrap();

        assert_eq!(profile.publication.len(), 3);
        assert_eq!(profile.publication[0].title, "First Paper");
        assert_eq!(
            profile.publication[0].journal.as_deref(),
            Some("Journal of Things")
        );
        assert_eq!(profile.publication[0].year, "2021");
        assert_eq!(profile.publication[1].journal, None);
        assert_eq!(profile.publication[1].year, "");
        assert_eq!(profile.publication[1].url, None);
        assert_eq!(profile.publication[2].title, "Second Paper (preprint)");
    }

    #[test]
    fn test_publication_url_is_kept_verbatim() {
        let profile = normalize(&sample().to_string()).unwrap();
        assert_eq!(
            profile.publication[0].url.as_deref(),
            Some("https://pub/doi/10?a=1")
        );
    }

    #[test]
    fn test_empty_groups() {
        let body = json!({
            "educations": {"affiliation-group": []},
            "works": {"group": []}
        });
        let profile = normalize(&body.to_string()).unwrap();
        assert_eq!(profile, OrcidProfile::default());
    }

    #[test]
    fn test_missing_container_is_structural_mismatch() {
        let body = json!({"educations": {"affiliation-group": []}});
        let err = normalize(&body.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::StructuralMismatch { source_name: "ORCID", .. }
        ));

        let err = normalize("<html>not json</html>").unwrap_err();
        assert!(err.is_source_failure());
    }

    #[test]
    fn test_non_success_status_is_upstream_unavailable() {
        let response = RawResponse::new(http::StatusCode::SERVICE_UNAVAILABLE, "down");
        let err = from_response(&response).unwrap_err();
        match err {
            ProfileError::UpstreamUnavailable {
                source_name,
                status,
                body,
            } => {
                assert_eq!(source_name, "ORCID");
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
