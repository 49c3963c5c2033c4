use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::worker::schema::WorkerProfileEntity;

/// Activity buckets offered by the search UI. Each bucket is a rolling
/// window ending at the caller's `now`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastActiveWindow {
    #[default]
    Any,
    Today,
    Week,
    Month,
}

impl LastActiveWindow {
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            LastActiveWindow::Any => None,
            LastActiveWindow::Today => Some(now - Duration::hours(24)),
            LastActiveWindow::Week => Some(now - Duration::days(7)),
            LastActiveWindow::Month => Some(now - Duration::days(30)),
        }
    }
}

/// The full search filter. Both store modes evaluate exactly these rules:
/// the in-memory store calls [`FilterState::matches`] per row and the
/// Postgres repository compiles the same rules into SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub country: String,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_hours: i32,
    pub max_hours: i32,
    pub verified_only: bool,
    pub last_active: LastActiveWindow,
    pub skills: Vec<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            search: String::new(),
            country: "all".to_string(),
            min_rate: 0.0,
            max_rate: 10.0,
            min_hours: 0,
            max_hours: 12,
            verified_only: false,
            last_active: LastActiveWindow::Any,
            skills: Vec::new(),
        }
    }
}

fn country_is_wildcard(country: &str) -> bool {
    country.is_empty() || country.eq_ignore_ascii_case("all") || country.eq_ignore_ascii_case("any")
}

impl FilterState {
    /// An inverted range can come straight from the client. It matches
    /// nothing; it is never an error.
    pub fn is_satisfiable(&self) -> bool {
        self.min_rate <= self.max_rate && self.min_hours <= self.max_hours
    }

    pub fn has_country(&self) -> bool {
        !country_is_wildcard(&self.country)
    }

    pub fn matches(&self, worker: &WorkerProfileEntity, now: DateTime<Utc>) -> bool {
        if !self.is_satisfiable() {
            return false;
        }

        let search = self.search.trim().to_lowercase();
        if !search.is_empty() {
            let in_name = worker.name.to_lowercase().contains(&search);
            let in_headline = worker.headline.to_lowercase().contains(&search);
            let in_skills = worker.skills.iter().any(|s| s.to_lowercase().contains(&search));
            if !in_name && !in_headline && !in_skills {
                return false;
            }
        }

        if self.has_country() && !worker.country_code.eq_ignore_ascii_case(&self.country) {
            return false;
        }

        // Rate ranges pass when they overlap, not when one contains the other.
        if worker.hourly_rate_max < self.min_rate || worker.hourly_rate_min > self.max_rate {
            return false;
        }

        if worker.availability_hours < self.min_hours || worker.availability_hours > self.max_hours
        {
            return false;
        }

        if self.verified_only && !worker.is_verified {
            return false;
        }

        if let Some(cutoff) = self.last_active.cutoff(now) {
            if worker.last_active < cutoff {
                return false;
            }
        }

        if !self.skills.is_empty() {
            let any_shared = self.skills.iter().any(|wanted| worker.skills.contains(wanted));
            if !any_shared {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::worker::schema::AvailabilityType;
    use uuid::Uuid;

    fn worker() -> WorkerProfileEntity {
        let now = Utc::now();
        WorkerProfileEntity {
            id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
            user_id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
            name: "Maria Santos".to_string(),
            avatar_url: None,
            country: "Philippines".to_string(),
            country_code: "PH".to_string(),
            headline: "WordPress developer".to_string(),
            skills: vec!["WordPress".to_string(), "PHP".to_string()],
            hourly_rate_min: 3.0,
            hourly_rate_max: 5.0,
            availability_hours: 8,
            availability_type: AvailabilityType::FullTime,
            bio: String::new(),
            last_active: now,
            is_verified: true,
            review_count: 12,
            average_rating: 4.8,
            created_at: now,
        }
    }

    #[test]
    fn default_filter_matches_everyone() {
        assert!(FilterState::default().matches(&worker(), Utc::now()));
    }

    #[test]
    fn search_hits_name_headline_and_skills() {
        let w = worker();
        let now = Utc::now();
        for term in ["maria", "WORDPRESS", "php", "  wordpress  "] {
            let filter = FilterState { search: term.to_string(), ..Default::default() };
            assert!(filter.matches(&w, now), "term {term:?} should match");
        }
        let filter = FilterState { search: "kubernetes".to_string(), ..Default::default() };
        assert!(!filter.matches(&w, now));
    }

    #[test]
    fn country_sentinels_pass_everything() {
        let w = worker();
        let now = Utc::now();
        for sentinel in ["", "all", "any", "ALL"] {
            let filter = FilterState { country: sentinel.to_string(), ..Default::default() };
            assert!(filter.matches(&w, now));
        }
        let filter = FilterState { country: "ph".to_string(), ..Default::default() };
        assert!(filter.matches(&w, now));
        let filter = FilterState { country: "BR".to_string(), ..Default::default() };
        assert!(!filter.matches(&w, now));
    }

    #[test]
    fn rate_ranges_match_on_overlap() {
        // worker advertises [3, 5]
        let w = worker();
        let now = Utc::now();
        let cases = [
            (0.0, 2.9, false),
            (0.0, 3.0, true), // touching at the worker's minimum counts
            (2.0, 3.0, true),
            (4.0, 4.5, true), // strictly inside
            (5.0, 9.0, true), // touching at the worker's maximum counts
            (5.1, 10.0, false),
        ];
        for (min, max, expect) in cases {
            let filter = FilterState { min_rate: min, max_rate: max, ..Default::default() };
            assert_eq!(filter.matches(&w, now), expect, "range [{min}, {max}]");
        }
    }

    #[test]
    fn hours_are_containment_not_overlap() {
        let w = worker(); // 8 hrs/day
        let now = Utc::now();
        let filter = FilterState { min_hours: 8, max_hours: 8, ..Default::default() };
        assert!(filter.matches(&w, now));
        let filter = FilterState { min_hours: 9, max_hours: 12, ..Default::default() };
        assert!(!filter.matches(&w, now));
        let filter = FilterState { min_hours: 0, max_hours: 7, ..Default::default() };
        assert!(!filter.matches(&w, now));
    }

    #[test]
    fn verified_gate() {
        let mut w = worker();
        let now = Utc::now();
        let filter = FilterState { verified_only: true, ..Default::default() };
        assert!(filter.matches(&w, now));
        w.is_verified = false;
        assert!(!filter.matches(&w, now));
        assert!(FilterState::default().matches(&w, now));
    }

    #[test]
    fn last_active_buckets() {
        let now = Utc::now();
        let mut w = worker();
        w.last_active = now - Duration::hours(30);

        let today = FilterState { last_active: LastActiveWindow::Today, ..Default::default() };
        let week = FilterState { last_active: LastActiveWindow::Week, ..Default::default() };
        assert!(!today.matches(&w, now));
        assert!(week.matches(&w, now));

        w.last_active = now - Duration::days(40);
        let month = FilterState { last_active: LastActiveWindow::Month, ..Default::default() };
        assert!(!month.matches(&w, now));
        assert!(FilterState::default().matches(&w, now));
    }

    #[test]
    fn skills_require_any_shared_exact_match() {
        let w = worker(); // {WordPress, PHP}
        let now = Utc::now();
        let filter = FilterState {
            skills: vec!["PHP".to_string(), "Kubernetes".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&w, now));

        let filter = FilterState {
            skills: vec!["Kubernetes".to_string(), "Go".to_string()],
            ..Default::default()
        };
        assert!(!filter.matches(&w, now));

        // exact string match, not substring
        let filter = FilterState { skills: vec!["Word".to_string()], ..Default::default() };
        assert!(!filter.matches(&w, now));
    }

    #[test]
    fn combined_rate_and_skill_filter() {
        let now = Utc::now();
        let wordpress_dev = worker(); // WordPress at [3, 5]
        let mut data_entry_clerk = worker();
        data_entry_clerk.name = "Grace Okafor".to_string();
        data_entry_clerk.headline = "Data entry specialist".to_string();
        data_entry_clerk.skills = vec!["Data Entry".to_string()];
        data_entry_clerk.hourly_rate_min = 1.0;
        data_entry_clerk.hourly_rate_max = 2.0;

        let filter = FilterState {
            min_rate: 4.0,
            max_rate: 6.0,
            skills: vec!["WordPress".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&wordpress_dev, now));
        assert!(!filter.matches(&data_entry_clerk, now));
    }

    #[test]
    fn inverted_ranges_match_nothing_without_erroring() {
        let w = worker();
        let now = Utc::now();
        let filter = FilterState { min_rate: 6.0, max_rate: 2.0, ..Default::default() };
        assert!(!filter.is_satisfiable());
        assert!(!filter.matches(&w, now));

        let filter = FilterState { min_hours: 10, max_hours: 2, ..Default::default() };
        assert!(!filter.matches(&w, now));
    }
}
