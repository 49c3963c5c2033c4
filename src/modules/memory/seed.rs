//! Demo dataset loaded when the service runs without a database.

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{next_id, MemStore};
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::employer::schema::EmployerProfileEntity;
use crate::modules::job::schema::JobEntity;
use crate::modules::message::schema::MessageEntity;
use crate::modules::review::schema::ReviewEntity;
use crate::modules::worker::schema::{AvailabilityType, WorkerProfileEntity};

#[allow(clippy::too_many_arguments)]
fn worker(
    name: &str,
    country: &str,
    country_code: &str,
    headline: &str,
    skills: &[&str],
    rate: (f64, f64),
    hours: i32,
    availability_type: AvailabilityType,
    bio: &str,
    last_active_hours_ago: i64,
    is_verified: bool,
    review_count: i32,
    average_rating: f64,
) -> WorkerProfileEntity {
    let now = Utc::now();
    WorkerProfileEntity {
        id: next_id(),
        user_id: next_id(),
        name: name.to_string(),
        avatar_url: None,
        country: country.to_string(),
        country_code: country_code.to_string(),
        headline: headline.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        hourly_rate_min: rate.0,
        hourly_rate_max: rate.1,
        availability_hours: hours,
        availability_type,
        bio: bio.to_string(),
        last_active: now - Duration::hours(last_active_hours_ago),
        is_verified,
        review_count,
        average_rating,
        created_at: now - Duration::days(90),
    }
}

fn employer(company_name: &str) -> EmployerProfileEntity {
    EmployerProfileEntity {
        id: next_id(),
        user_id: next_id(),
        company_name: company_name.to_string(),
        avatar_url: None,
        country: "United States".to_string(),
        country_code: "US".to_string(),
        bio: String::new(),
        created_at: Utc::now() - Duration::days(120),
    }
}

#[allow(clippy::too_many_arguments)]
fn job(
    employer_id: Uuid,
    title: &str,
    description: &str,
    skills: &[&str],
    rate: (f64, f64),
    hours: i32,
    country_preference: Option<&str>,
    days_ago: i64,
) -> JobEntity {
    JobEntity {
        id: next_id(),
        employer_id,
        title: title.to_string(),
        description: description.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        hourly_rate_min: rate.0,
        hourly_rate_max: rate.1,
        availability_hours: hours,
        country_preference: country_preference.map(str::to_string),
        is_active: true,
        created_at: Utc::now() - Duration::days(days_ago),
    }
}

fn review(
    worker_id: Uuid,
    employer_id: Uuid,
    rating: i32,
    comment: &str,
    days_ago: i64,
) -> ReviewEntity {
    ReviewEntity {
        id: next_id(),
        worker_id,
        employer_id,
        rating,
        comment: comment.to_string(),
        created_at: Utc::now() - Duration::days(days_ago),
    }
}

impl MemStore {
    /// A store pre-filled with a small marketplace: six workers, three
    /// employers, a handful of jobs and reviews, and one conversation
    /// with an unread reply.
    pub fn with_demo_data() -> Self {
        let store = MemStore::new();
        let now = Utc::now();

        let workers = vec![
            worker(
                "Maria Santos",
                "Philippines",
                "PH",
                "Experienced Virtual Assistant & Customer Service Specialist",
                &["Virtual Assistant", "Customer Service", "Data Entry", "Email Marketing"],
                (2.0, 3.0),
                8,
                AvailabilityType::FullTime,
                "Detail-oriented professional with 5+ years of experience in virtual assistance.",
                0,
                true,
                12,
                4.8,
            ),
            worker(
                "Raj Patel",
                "India",
                "IN",
                "Full Stack Web Developer & WordPress Expert",
                &["Web Development", "WordPress", "Shopify", "SEO"],
                (3.0, 5.0),
                6,
                AvailabilityType::PartTime,
                "Passionate web developer specialized in WordPress, Shopify, and custom web applications.",
                2,
                true,
                8,
                4.9,
            ),
            worker(
                "Grace Okafor",
                "Nigeria",
                "NG",
                "Content Writer & Social Media Manager",
                &["Content Writing", "Social Media", "SEO", "Research"],
                (1.0, 2.0),
                8,
                AvailabilityType::FullTime,
                "Creative content writer with a knack for engaging storytelling.",
                24,
                false,
                5,
                4.6,
            ),
            worker(
                "Linh Nguyen",
                "Vietnam",
                "VN",
                "Graphic Designer & Video Editor",
                &["Graphic Design", "Video Editing", "Social Media", "PowerPoint"],
                (2.0, 4.0),
                5,
                AvailabilityType::PartTime,
                "Creative designer with an eye for aesthetics.",
                72,
                true,
                15,
                4.7,
            ),
            worker(
                "Ahmed Hassan",
                "Pakistan",
                "PK",
                "Data Entry Specialist & Bookkeeper",
                &["Data Entry", "Bookkeeping", "Excel", "Administrative"],
                (1.0, 2.0),
                8,
                AvailabilityType::FullTime,
                "Meticulous data entry specialist with strong attention to detail.",
                12,
                true,
                20,
                4.5,
            ),
            worker(
                "Sofia Rodriguez",
                "Colombia",
                "CO",
                "Lead Generation & Research Specialist",
                &["Lead Generation", "Research", "Data Entry", "Excel"],
                (2.0, 3.0),
                6,
                AvailabilityType::PartTime,
                "Results-driven professional specializing in lead generation and market research.",
                6,
                false,
                7,
                4.4,
            ),
        ];
        let maria = workers[0].id;
        let raj = workers[1].id;
        let linh = workers[3].id;

        let employers =
            vec![employer("TechStart Inc."), employer("Digital Marketing Co."), employer("WebSolutions Ltd.")];
        let techstart = employers[0].id;
        let digital = employers[1].id;
        let websolutions = employers[2].id;

        let jobs = vec![
            job(
                techstart,
                "Virtual Assistant for E-commerce Business",
                "Reliable virtual assistant to help manage e-commerce operations: customer service, order processing, and inventory management.",
                &["Virtual Assistant", "Customer Service", "Data Entry"],
                (2.0, 3.0),
                8,
                None,
                2,
            ),
            job(
                digital,
                "Social Media Manager",
                "Creative social media manager to handle client accounts: content, scheduling, engagement, and analytics reports.",
                &["Social Media", "Content Writing", "Graphic Design"],
                (3.0, 5.0),
                4,
                None,
                5,
            ),
            job(
                websolutions,
                "WordPress Developer Needed",
                "Experienced WordPress developer to build and maintain client websites. Themes, plugins, and basic SEO.",
                &["WordPress", "Web Development", "SEO"],
                (4.0, 6.0),
                6,
                None,
                1,
            ),
            job(
                techstart,
                "Data Entry Clerk",
                "Large-scale data entry project. Fast, accurate spreadsheet work; expected to last 2-3 months.",
                &["Data Entry", "Excel", "Administrative"],
                (1.0, 2.0),
                8,
                Some("Philippines"),
                3,
            ),
        ];

        let reviews = vec![
            review(maria, techstart, 5, "Maria is exceptional! Very professional, always on time, and goes above and beyond.", 30),
            review(maria, digital, 5, "Excellent communication skills and attention to detail. Will definitely work with again.", 60),
            review(raj, websolutions, 5, "Raj delivered a beautiful website on time and within budget. Great problem solver.", 20),
            review(linh, techstart, 4, "Very creative designs. Sometimes needs clarification but overall great work.", 45),
        ];

        let conversation = ConversationEntity {
            id: next_id(),
            worker_id: maria,
            employer_id: techstart,
            last_message: Some(
                "Thank you for your interest! I would love to discuss the position.".to_string(),
            ),
            last_message_at: Some(now - Duration::hours(2)),
            created_at: now - Duration::hours(4),
        };
        let messages = vec![
            MessageEntity {
                id: next_id(),
                conversation_id: conversation.id,
                sender_id: techstart,
                content: "Hi Maria, I saw your profile and I think you would be a great fit for our virtual assistant position.".to_string(),
                is_read: true,
                created_at: now - Duration::hours(4),
            },
            MessageEntity {
                id: next_id(),
                conversation_id: conversation.id,
                sender_id: maria,
                content: "Thank you for your interest! I would love to discuss the position.".to_string(),
                is_read: false,
                created_at: now - Duration::hours(2),
            },
        ];

        *store.workers.write().unwrap_or_else(|e| e.into_inner()) = workers;
        *store.employers.write().unwrap_or_else(|e| e.into_inner()) = employers;
        *store.jobs.write().unwrap_or_else(|e| e.into_inner()) = jobs;
        *store.reviews.write().unwrap_or_else(|e| e.into_inner()) = reviews;
        *store.conversations.write().unwrap_or_else(|e| e.into_inner()) = vec![conversation];
        *store.messages.write().unwrap_or_else(|e| e.into_inner()) = messages;

        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::session::UserRole;
    use crate::modules::worker::filter::FilterState;
    use crate::modules::worker::repository::WorkerRepository;
    use crate::modules::conversation::repository::ConversationRepository;

    #[tokio::test]
    async fn demo_data_is_searchable() {
        let store = MemStore::with_demo_data();
        let filter = FilterState { skills: vec!["WordPress".to_string()], ..Default::default() };
        let hits = WorkerRepository::find_all(&store, &filter, Utc::now(), 50, 0).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Raj Patel");
    }

    #[tokio::test]
    async fn demo_conversation_has_one_unread_for_the_employer() {
        let store = MemStore::with_demo_data();
        let conversations = {
            let all = store.conversations.read().unwrap_or_else(|e| e.into_inner());
            all.clone()
        };
        let employer_id = conversations[0].employer_id;
        let summaries =
            store.list_for_profile(&employer_id, &UserRole::Employer).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].unread_count, 1);
        assert_eq!(summaries[0].worker_name, "Maria Santos");
    }
}
