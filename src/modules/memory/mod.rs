pub mod seed;

use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::error;
use crate::modules::conversation::model::ConversationSummary;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::employer::model::{InsertEmployerProfile, UpdateEmployerProfileModel};
use crate::modules::employer::repository::EmployerRepository;
use crate::modules::employer::schema::EmployerProfileEntity;
use crate::modules::job::model::{InsertJob, JobSearch, JobSort, UpdateJobModel};
use crate::modules::job::repository::JobRepository;
use crate::modules::job::schema::JobEntity;
use crate::modules::message::model::InsertMessage;
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageEntity;
use crate::modules::review::model::{InsertReview, ReviewResponse};
use crate::modules::review::repository::ReviewRepository;
use crate::modules::review::schema::ReviewEntity;
use crate::modules::saved_worker::repository::SavedWorkerRepository;
use crate::modules::saved_worker::schema::SavedWorkerEntity;
use crate::modules::session::UserRole;
use crate::modules::worker::filter::FilterState;
use crate::modules::worker::model::{InsertWorkerProfile, UpdateWorkerProfileModel};
use crate::modules::worker::repository::WorkerRepository;
use crate::modules::worker::schema::WorkerProfileEntity;

fn next_id() -> Uuid {
    Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

fn page<T: Clone>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter().skip(offset.max(0) as usize).take(limit.max(0) as usize).collect()
}

/// In-memory store backing every repository trait. Runs the service
/// without Postgres (demo mode and tests); each query evaluates the same
/// rules the SQL repositories compile, so both modes return identical
/// results for identical inputs.
#[derive(Default)]
pub struct MemStore {
    workers: RwLock<Vec<WorkerProfileEntity>>,
    employers: RwLock<Vec<EmployerProfileEntity>>,
    jobs: RwLock<Vec<JobEntity>>,
    reviews: RwLock<Vec<ReviewEntity>>,
    saved: RwLock<Vec<SavedWorkerEntity>>,
    conversations: RwLock<Vec<ConversationEntity>>,
    messages: RwLock<Vec<MessageEntity>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl WorkerRepository for MemStore {
    async fn find_all(
        &self,
        filter: &FilterState,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError> {
        let workers = read(&self.workers);
        let mut rows: Vec<WorkerProfileEntity> =
            workers.iter().filter(|w| filter.matches(w, now)).cloned().collect();
        rows.sort_by(|a, b| b.last_active.cmp(&a.last_active).then(a.id.cmp(&b.id)));
        Ok(page(rows, limit, offset))
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError> {
        Ok(read(&self.workers).iter().find(|w| w.id == *id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError> {
        Ok(read(&self.workers).iter().find(|w| w.user_id == *user_id).cloned())
    }

    async fn create(
        &self,
        profile: &InsertWorkerProfile,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        let mut workers = write(&self.workers);
        if workers.iter().any(|w| w.user_id == profile.user_id) {
            return Err(error::SystemError::Conflict(None));
        }
        let now = Utc::now();
        let entity = WorkerProfileEntity {
            id: next_id(),
            user_id: profile.user_id,
            name: profile.name.clone(),
            avatar_url: None,
            country: profile.country.clone(),
            country_code: profile.country_code.clone(),
            headline: profile.headline.clone(),
            skills: profile.skills.clone(),
            hourly_rate_min: profile.hourly_rate_min,
            hourly_rate_max: profile.hourly_rate_max,
            availability_hours: profile.availability_hours,
            availability_type: profile.availability_type.clone(),
            bio: profile.bio.clone(),
            last_active: now,
            is_verified: false,
            review_count: 0,
            average_rating: 0.0,
            created_at: now,
        };
        workers.push(entity.clone());
        Ok(entity)
    }

    async fn update_by_user_id(
        &self,
        user_id: &Uuid,
        changes: &UpdateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        let mut workers = write(&self.workers);
        let worker = workers
            .iter_mut()
            .find(|w| w.user_id == *user_id)
            .ok_or_else(|| error::SystemError::not_found("Worker profile not found"))?;

        if let Some(name) = &changes.name {
            worker.name = name.clone();
        }
        if let Some(avatar_url) = &changes.avatar_url {
            worker.avatar_url = avatar_url.clone();
        }
        if let Some(country) = &changes.country {
            worker.country = country.clone();
        }
        if let Some(country_code) = &changes.country_code {
            worker.country_code = country_code.clone();
        }
        if let Some(headline) = &changes.headline {
            worker.headline = headline.clone();
        }
        if let Some(skills) = &changes.skills {
            worker.skills = skills.clone();
        }
        if let Some(min) = changes.hourly_rate_min {
            worker.hourly_rate_min = min;
        }
        if let Some(max) = changes.hourly_rate_max {
            worker.hourly_rate_max = max;
        }
        if let Some(hours) = changes.availability_hours {
            worker.availability_hours = hours;
        }
        if let Some(availability_type) = &changes.availability_type {
            worker.availability_type = availability_type.clone();
        }
        if let Some(bio) = &changes.bio {
            worker.bio = bio.clone();
        }
        worker.last_active = Utc::now();
        Ok(worker.clone())
    }
}

#[async_trait::async_trait]
impl EmployerRepository for MemStore {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError> {
        Ok(read(&self.employers).iter().find(|e| e.id == *id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError> {
        Ok(read(&self.employers).iter().find(|e| e.user_id == *user_id).cloned())
    }

    async fn create(
        &self,
        profile: &InsertEmployerProfile,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        let mut employers = write(&self.employers);
        if employers.iter().any(|e| e.user_id == profile.user_id) {
            return Err(error::SystemError::Conflict(None));
        }
        let entity = EmployerProfileEntity {
            id: next_id(),
            user_id: profile.user_id,
            company_name: profile.company_name.clone(),
            avatar_url: None,
            country: profile.country.clone(),
            country_code: profile.country_code.clone(),
            bio: profile.bio.clone(),
            created_at: Utc::now(),
        };
        employers.push(entity.clone());
        Ok(entity)
    }

    async fn update_by_user_id(
        &self,
        user_id: &Uuid,
        changes: &UpdateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        let mut employers = write(&self.employers);
        let employer = employers
            .iter_mut()
            .find(|e| e.user_id == *user_id)
            .ok_or_else(|| error::SystemError::not_found("Employer profile not found"))?;

        if let Some(company_name) = &changes.company_name {
            employer.company_name = company_name.clone();
        }
        if let Some(avatar_url) = &changes.avatar_url {
            employer.avatar_url = avatar_url.clone();
        }
        if let Some(country) = &changes.country {
            employer.country = country.clone();
        }
        if let Some(country_code) = &changes.country_code {
            employer.country_code = country_code.clone();
        }
        if let Some(bio) = &changes.bio {
            employer.bio = bio.clone();
        }
        Ok(employer.clone())
    }
}

fn job_matches(job: &JobEntity, search: &JobSearch) -> bool {
    if !job.is_active {
        return false;
    }
    let term = search.search.trim().to_lowercase();
    if !term.is_empty()
        && !job.title.to_lowercase().contains(&term)
        && !job.description.to_lowercase().contains(&term)
    {
        return false;
    }
    if let Some(skill) = &search.skill {
        if !job.skills.contains(skill) {
            return false;
        }
    }
    true
}

fn job_order(a: &JobEntity, b: &JobEntity, sort: JobSort) -> Ordering {
    let newest = b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id));
    match sort {
        JobSort::Newest => newest,
        JobSort::RateHigh => {
            b.hourly_rate_max.partial_cmp(&a.hourly_rate_max).unwrap_or(Ordering::Equal).then(newest)
        }
        JobSort::RateLow => {
            a.hourly_rate_min.partial_cmp(&b.hourly_rate_min).unwrap_or(Ordering::Equal).then(newest)
        }
    }
}

#[async_trait::async_trait]
impl JobRepository for MemStore {
    async fn find_all(
        &self,
        search: &JobSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobEntity>, error::SystemError> {
        let jobs = read(&self.jobs);
        let mut rows: Vec<JobEntity> =
            jobs.iter().filter(|j| job_matches(j, search)).cloned().collect();
        rows.sort_by(|a, b| job_order(a, b, search.sort));
        Ok(page(rows, limit, offset))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<JobEntity>, error::SystemError> {
        Ok(read(&self.jobs).iter().find(|j| j.id == *id).cloned())
    }

    async fn find_by_employer(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<JobEntity>, error::SystemError> {
        let jobs = read(&self.jobs);
        let mut rows: Vec<JobEntity> =
            jobs.iter().filter(|j| j.employer_id == *employer_id).cloned().collect();
        rows.sort_by(|a, b| job_order(a, b, JobSort::Newest));
        Ok(rows)
    }

    async fn create(&self, job: &InsertJob) -> Result<JobEntity, error::SystemError> {
        let entity = JobEntity {
            id: next_id(),
            employer_id: job.employer_id,
            title: job.title.clone(),
            description: job.description.clone(),
            skills: job.skills.clone(),
            hourly_rate_min: job.hourly_rate_min,
            hourly_rate_max: job.hourly_rate_max,
            availability_hours: job.availability_hours,
            country_preference: job.country_preference.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        write(&self.jobs).push(entity.clone());
        Ok(entity)
    }

    async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateJobModel,
    ) -> Result<JobEntity, error::SystemError> {
        let mut jobs = write(&self.jobs);
        let job = jobs
            .iter_mut()
            .find(|j| j.id == *id)
            .ok_or_else(|| error::SystemError::not_found("Job not found"))?;

        if let Some(title) = &changes.title {
            job.title = title.clone();
        }
        if let Some(description) = &changes.description {
            job.description = description.clone();
        }
        if let Some(skills) = &changes.skills {
            job.skills = skills.clone();
        }
        if let Some(min) = changes.hourly_rate_min {
            job.hourly_rate_min = min;
        }
        if let Some(max) = changes.hourly_rate_max {
            job.hourly_rate_max = max;
        }
        if let Some(hours) = changes.availability_hours {
            job.availability_hours = hours;
        }
        if let Some(country_preference) = &changes.country_preference {
            job.country_preference = country_preference.clone();
        }
        Ok(job.clone())
    }

    async fn deactivate(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut jobs = write(&self.jobs);
        match jobs.iter_mut().find(|j| j.id == *id) {
            Some(job) => {
                job.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl ReviewRepository for MemStore {
    async fn find_by_worker(
        &self,
        worker_id: &Uuid,
    ) -> Result<Vec<ReviewResponse>, error::SystemError> {
        let reviews = read(&self.reviews);
        let employers = read(&self.employers);
        let mut rows: Vec<ReviewResponse> = reviews
            .iter()
            .filter(|r| r.worker_id == *worker_id)
            .filter_map(|r| {
                let employer = employers.iter().find(|e| e.id == r.employer_id)?;
                Some(ReviewResponse {
                    id: r.id,
                    worker_id: r.worker_id,
                    employer_id: r.employer_id,
                    company_name: employer.company_name.clone(),
                    avatar_url: employer.avatar_url.clone(),
                    rating: r.rating,
                    comment: r.comment.clone(),
                    created_at: r.created_at,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create(&self, review: &InsertReview) -> Result<ReviewEntity, error::SystemError> {
        let entity = ReviewEntity {
            id: next_id(),
            worker_id: review.worker_id,
            employer_id: review.employer_id,
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Utc::now(),
        };
        write(&self.reviews).push(entity.clone());
        Ok(entity)
    }
}

#[async_trait::async_trait]
impl SavedWorkerRepository for MemStore {
    async fn save(&self, employer_id: &Uuid, worker_id: &Uuid) -> Result<(), error::SystemError> {
        let mut saved = write(&self.saved);
        let exists =
            saved.iter().any(|s| s.employer_id == *employer_id && s.worker_id == *worker_id);
        if !exists {
            saved.push(SavedWorkerEntity {
                employer_id: *employer_id,
                worker_id: *worker_id,
                saved_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn unsave(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        write(&self.saved)
            .retain(|s| !(s.employer_id == *employer_id && s.worker_id == *worker_id));
        Ok(())
    }

    async fn is_saved(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        Ok(read(&self.saved)
            .iter()
            .any(|s| s.employer_id == *employer_id && s.worker_id == *worker_id))
    }

    async fn list_ids(&self, employer_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        Ok(read(&self.saved)
            .iter()
            .filter(|s| s.employer_id == *employer_id)
            .map(|s| s.worker_id)
            .collect())
    }

    async fn list_saved(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError> {
        let saved = read(&self.saved);
        let workers = read(&self.workers);
        let mut rows: Vec<(DateTime<Utc>, WorkerProfileEntity)> = saved
            .iter()
            .filter(|s| s.employer_id == *employer_id)
            .filter_map(|s| {
                workers.iter().find(|w| w.id == s.worker_id).map(|w| (s.saved_at, w.clone()))
            })
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, w)| w).collect())
    }
}

#[async_trait::async_trait]
impl ConversationRepository for MemStore {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        Ok(read(&self.conversations).iter().find(|c| c.id == *id).cloned())
    }

    async fn find_by_pair(
        &self,
        worker_id: &Uuid,
        employer_id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        Ok(read(&self.conversations)
            .iter()
            .find(|c| c.worker_id == *worker_id && c.employer_id == *employer_id)
            .cloned())
    }

    async fn create(
        &self,
        worker_id: &Uuid,
        employer_id: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let mut conversations = write(&self.conversations);
        let exists = conversations
            .iter()
            .any(|c| c.worker_id == *worker_id && c.employer_id == *employer_id);
        if exists {
            return Err(error::SystemError::Conflict(None));
        }
        let entity = ConversationEntity {
            id: next_id(),
            worker_id: *worker_id,
            employer_id: *employer_id,
            last_message: None,
            last_message_at: None,
            created_at: Utc::now(),
        };
        conversations.push(entity.clone());
        Ok(entity)
    }

    async fn list_for_profile(
        &self,
        profile_id: &Uuid,
        role: &UserRole,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        let conversations = read(&self.conversations);
        let workers = read(&self.workers);
        let employers = read(&self.employers);
        let messages = read(&self.messages);

        let mut rows: Vec<ConversationSummary> = conversations
            .iter()
            .filter(|c| match role {
                UserRole::Worker => c.worker_id == *profile_id,
                UserRole::Employer => c.employer_id == *profile_id,
            })
            .filter_map(|c| {
                let worker = workers.iter().find(|w| w.id == c.worker_id)?;
                let employer = employers.iter().find(|e| e.id == c.employer_id)?;
                let unread_count = messages
                    .iter()
                    .filter(|m| {
                        m.conversation_id == c.id && m.sender_id != *profile_id && !m.is_read
                    })
                    .count() as i64;
                Some(ConversationSummary {
                    id: c.id,
                    worker_id: c.worker_id,
                    employer_id: c.employer_id,
                    worker_name: worker.name.clone(),
                    worker_avatar_url: worker.avatar_url.clone(),
                    employer_name: employer.company_name.clone(),
                    employer_avatar_url: employer.avatar_url.clone(),
                    last_message: c.last_message.clone(),
                    last_message_at: c.last_message_at,
                    created_at: c.created_at,
                    unread_count,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            let a_key = a.last_message_at.unwrap_or(a.created_at);
            let b_key = b.last_message_at.unwrap_or(b.created_at);
            b_key.cmp(&a_key)
        });
        Ok(rows)
    }

    async fn record_last_message(
        &self,
        conversation_id: &Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<(), error::SystemError> {
        let mut conversations = write(&self.conversations);
        if let Some(conversation) = conversations.iter_mut().find(|c| c.id == *conversation_id) {
            conversation.last_message = Some(content.to_string());
            conversation.last_message_at = Some(at);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemStore {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let entity = MessageEntity {
            id: next_id(),
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        write(&self.messages).push(entity.clone());
        Ok(entity)
    }

    async fn history(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = read(&self.messages);
        let mut rows: Vec<MessageEntity> = messages
            .iter()
            .filter(|m| m.conversation_id == *conversation_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn mark_read(
        &self,
        conversation_id: &Uuid,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let mut messages = write(&self.messages);
        let mut updated = 0u64;
        for message in messages.iter_mut() {
            if message.conversation_id == *conversation_id
                && message.sender_id != *reader_id
                && !message.is_read
            {
                message.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::worker::schema::AvailabilityType;

    fn insert_worker(name: &str, skills: &[&str]) -> InsertWorkerProfile {
        InsertWorkerProfile {
            user_id: next_id(),
            name: name.to_string(),
            country: "Philippines".to_string(),
            country_code: "PH".to_string(),
            headline: "Generalist".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            hourly_rate_min: 2.0,
            hourly_rate_max: 4.0,
            availability_hours: 8,
            availability_type: AvailabilityType::FullTime,
            bio: String::new(),
        }
    }

    fn insert_employer(company: &str) -> InsertEmployerProfile {
        InsertEmployerProfile {
            user_id: next_id(),
            company_name: company.to_string(),
            country: "United States".to_string(),
            country_code: "US".to_string(),
            bio: String::new(),
        }
    }

    #[tokio::test]
    async fn worker_search_orders_by_last_active_desc() {
        let store = MemStore::new();
        let a = WorkerRepository::create(&store, &insert_worker("First", &[])).await.unwrap();
        let b = WorkerRepository::create(&store, &insert_worker("Second", &[])).await.unwrap();

        // push `a` ahead by refreshing last_active through an update
        WorkerRepository::update_by_user_id(
            &store,
            &a.user_id,
            &UpdateWorkerProfileModel { bio: Some("updated".to_string()), ..Default::default() },
        )
        .await
        .unwrap();

        let results = WorkerRepository::find_all(&store, &FilterState::default(), Utc::now(), 50, 0)
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, a.id);
        assert_eq!(results[1].id, b.id);
    }

    #[tokio::test]
    async fn duplicate_worker_profile_conflicts() {
        let store = MemStore::new();
        let mut insert = insert_worker("Solo", &[]);
        WorkerRepository::create(&store, &insert).await.unwrap();
        insert.name = "Again".to_string();
        let err = WorkerRepository::create(&store, &insert).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn job_rate_sorts_break_ties_by_recency() {
        let store = MemStore::new();
        let employer_id = next_id();
        for (title, min, max) in
            [("Cheap", 1.0, 2.0), ("Pricey", 4.0, 6.0), ("Mid", 2.0, 4.0)]
        {
            JobRepository::create(
                &store,
                &InsertJob {
                    employer_id,
                    title: title.to_string(),
                    description: "desc".to_string(),
                    skills: vec![],
                    hourly_rate_min: min,
                    hourly_rate_max: max,
                    availability_hours: 8,
                    country_preference: None,
                },
            )
            .await
            .unwrap();
        }

        let search = JobSearch { sort: JobSort::RateHigh, ..Default::default() };
        let jobs = JobRepository::find_all(&store, &search, 50, 0).await.unwrap();
        let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Pricey", "Mid", "Cheap"]);

        let search = JobSearch { sort: JobSort::RateLow, ..Default::default() };
        let jobs = JobRepository::find_all(&store, &search, 50, 0).await.unwrap();
        let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Cheap", "Mid", "Pricey"]);
    }

    #[tokio::test]
    async fn deactivated_jobs_disappear_from_search_but_not_lookup() {
        let store = MemStore::new();
        let job = JobRepository::create(
            &store,
            &InsertJob {
                employer_id: next_id(),
                title: "Short gig".to_string(),
                description: "desc".to_string(),
                skills: vec![],
                hourly_rate_min: 1.0,
                hourly_rate_max: 2.0,
                availability_hours: 4,
                country_preference: None,
            },
        )
        .await
        .unwrap();

        assert!(store.deactivate(&job.id).await.unwrap());
        let jobs = JobRepository::find_all(&store, &JobSearch::default(), 50, 0).await.unwrap();
        assert!(jobs.is_empty());
        let found = JobRepository::find_by_id(&store, &job.id).await.unwrap();
        assert!(!found.unwrap().is_active);
    }

    #[tokio::test]
    async fn save_is_idempotent_and_unsave_is_a_noop_when_absent() {
        let store = MemStore::new();
        let employer_id = next_id();
        let worker = WorkerRepository::create(&store, &insert_worker("Saved", &[])).await.unwrap();

        store.save(&employer_id, &worker.id).await.unwrap();
        store.save(&employer_id, &worker.id).await.unwrap();
        assert_eq!(store.list_ids(&employer_id).await.unwrap().len(), 1);

        store.unsave(&employer_id, &worker.id).await.unwrap();
        store.unsave(&employer_id, &worker.id).await.unwrap();
        assert!(!store.is_saved(&employer_id, &worker.id).await.unwrap());
    }

    #[tokio::test]
    async fn conversation_pair_is_unique() {
        let store = MemStore::new();
        let (worker_id, employer_id) = (next_id(), next_id());
        ConversationRepository::create(&store, &worker_id, &employer_id).await.unwrap();
        let err =
            ConversationRepository::create(&store, &worker_id, &employer_id).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn mark_read_only_touches_the_counterpart_messages() {
        let store = MemStore::new();
        let conversation =
            ConversationRepository::create(&store, &next_id(), &next_id()).await.unwrap();
        let (worker_id, employer_id) = (conversation.worker_id, conversation.employer_id);

        for (sender, content) in [(employer_id, "hello"), (worker_id, "hi"), (employer_id, "there")]
        {
            MessageRepository::create(
                &store,
                &InsertMessage {
                    conversation_id: conversation.id,
                    sender_id: sender,
                    content: content.to_string(),
                },
            )
            .await
            .unwrap();
        }

        // worker reads: both employer messages flip, their own stays
        let updated = store.mark_read(&conversation.id, &worker_id).await.unwrap();
        assert_eq!(updated, 2);
        let updated = store.mark_read(&conversation.id, &worker_id).await.unwrap();
        assert_eq!(updated, 0);

        let history = store.history(&conversation.id).await.unwrap();
        assert!(!history.iter().find(|m| m.sender_id == worker_id).unwrap().is_read);
    }

    #[tokio::test]
    async fn unread_counts_are_per_viewer() {
        let store = MemStore::new();
        let worker = WorkerRepository::create(&store, &insert_worker("W", &[])).await.unwrap();
        let employer =
            EmployerRepository::create(&store, &insert_employer("Acme")).await.unwrap();
        let conversation =
            ConversationRepository::create(&store, &worker.id, &employer.id).await.unwrap();

        let message = MessageRepository::create(
            &store,
            &InsertMessage {
                conversation_id: conversation.id,
                sender_id: employer.id,
                content: "ping".to_string(),
            },
        )
        .await
        .unwrap();
        store
            .record_last_message(&conversation.id, &message.content, message.created_at)
            .await
            .unwrap();

        let for_worker =
            store.list_for_profile(&worker.id, &UserRole::Worker).await.unwrap();
        assert_eq!(for_worker.len(), 1);
        assert_eq!(for_worker[0].unread_count, 1);
        assert_eq!(for_worker[0].last_message.as_deref(), Some("ping"));

        let for_employer =
            store.list_for_profile(&employer.id, &UserRole::Employer).await.unwrap();
        assert_eq!(for_employer[0].unread_count, 0);
    }
}
