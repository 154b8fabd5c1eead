//! Fire-and-forget enrichment jobs: run an aggregation pass in the
//! background, publish the result, and keep a short in-memory history of
//! job states for status queries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use fashioning_common::{Category, Region, TrendPublisher};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::adapters::SourceAdapter;
use crate::pipeline::{Aggregator, Focus, RunStats, SourceFailure};
use crate::sources::select_adapters;

/// Finished and in-flight jobs kept for status queries.
const MAX_TRACKED_JOBS: usize = 100;

/// A completed run younger than this is handed back for an identical
/// request unless `force_refresh` is set.
const RECENT_RUN_MINUTES: i64 = 30;

/// Hints are plain strings; unknown categories, regions and sources are
/// ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentRequest {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    /// Run even when an identical request completed recently or is in flight.
    #[serde(default)]
    pub force_refresh: bool,
}

impl EnrichmentRequest {
    pub fn focus(&self) -> Focus {
        Focus {
            categories: self
                .categories
                .iter()
                .filter_map(|c| c.parse::<Category>().ok())
                .collect(),
            regions: self
                .regions
                .iter()
                .filter_map(|r| r.parse::<Region>().ok())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Accepted,
    Running,
    Completed {
        stats: RunStats,
        errors: Vec<SourceFailure>,
        published: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        publish_error: Option<String>,
    },
    Failed {
        cause: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentJob {
    pub id: Uuid,
    pub sources: Vec<String>,
    pub categories: Vec<Category>,
    pub regions: Vec<Region>,
    pub state: JobState,
    pub requested_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl EnrichmentJob {
    pub fn is_finished(&self) -> bool {
        matches!(self.state, JobState::Completed { .. } | JobState::Failed { .. })
    }

    fn same_selection(&self, sources: &[String], focus: &Focus) -> bool {
        self.sources == sources
            && self.categories == focus.categories
            && self.regions == focus.regions
    }

    /// In flight, or completed within the reuse window.
    fn reusable_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.state, self.finished_at) {
            (JobState::Accepted | JobState::Running, _) => true,
            (JobState::Completed { .. }, Some(finished)) => {
                now - finished < Duration::minutes(RECENT_RUN_MINUTES)
            }
            _ => false,
        }
    }
}

pub struct EnrichmentService {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    publisher: Option<Arc<dyn TrendPublisher>>,
    jobs: Arc<RwLock<HashMap<Uuid, EnrichmentJob>>>,
    latest: Arc<RwLock<Option<Uuid>>>,
}

impl EnrichmentService {
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        publisher: Option<Arc<dyn TrendPublisher>>,
    ) -> Self {
        Self {
            adapters,
            publisher,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            latest: Arc::new(RwLock::new(None)),
        }
    }

    pub fn source_names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_string()).collect()
    }

    /// Register a job and spawn it. Returns as soon as the job is recorded;
    /// the aggregation itself runs on the runtime. Without `force_refresh`
    /// an identical in-flight or recently completed job is returned instead.
    pub async fn trigger(&self, request: EnrichmentRequest) -> EnrichmentJob {
        let adapters = select_adapters(&self.adapters, &request.sources);
        let focus = request.focus();
        let aggregator = Aggregator::new(adapters).with_focus(focus.clone());
        let sources = aggregator.source_names();

        if !request.force_refresh {
            if let Some(job) = self.recent_match(&sources, &focus).await {
                info!(job_id = %job.id, "Identical enrichment is recent, reusing it");
                *self.latest.write().await = Some(job.id);
                return job;
            }
        }

        let job = EnrichmentJob {
            id: Uuid::new_v4(),
            sources,
            categories: focus.categories,
            regions: focus.regions,
            state: JobState::Accepted,
            requested_at: Utc::now(),
            finished_at: None,
        };

        {
            let mut jobs = self.jobs.write().await;
            evict_oldest(&mut jobs);
            jobs.insert(job.id, job.clone());
        }
        *self.latest.write().await = Some(job.id);

        info!(job_id = %job.id, sources = ?job.sources, force_refresh = request.force_refresh, "Enrichment accepted");

        let id = job.id;
        let jobs = self.jobs.clone();
        let publisher = self.publisher.clone();
        let task = tokio::spawn({
            let jobs = jobs.clone();
            async move {
                set_state(&jobs, id, JobState::Running).await;
                run_job(id, &aggregator, publisher.as_deref()).await
            }
        });
        tokio::spawn(async move {
            let state = match task.await {
                Ok(state) => state,
                Err(e) => {
                    error!(job_id = %id, error = %e, "Enrichment task aborted");
                    JobState::Failed {
                        cause: format!("enrichment task aborted: {e}"),
                    }
                }
            };
            set_state(&jobs, id, state).await;
        });

        job
    }

    pub async fn status(&self, id: Uuid) -> Option<EnrichmentJob> {
        self.jobs.read().await.get(&id).cloned()
    }

    pub async fn latest(&self) -> Option<EnrichmentJob> {
        let id = (*self.latest.read().await)?;
        self.status(id).await
    }

    async fn recent_match(&self, sources: &[String], focus: &Focus) -> Option<EnrichmentJob> {
        let now = Utc::now();
        self.jobs
            .read()
            .await
            .values()
            .filter(|j| j.same_selection(sources, focus) && j.reusable_at(now))
            .max_by_key(|j| j.requested_at)
            .cloned()
    }
}

async fn run_job(
    id: Uuid,
    aggregator: &Aggregator,
    publisher: Option<&dyn TrendPublisher>,
) -> JobState {
    let run = match aggregator.run().await {
        Ok(run) => run,
        Err(e) => {
            error!(job_id = %id, error = %e, "Enrichment failed");
            return JobState::Failed {
                cause: e.to_string(),
            };
        }
    };

    let (published, publish_error) = match publisher {
        Some(p) if !run.trends.is_empty() => match p.publish(&run.trends).await {
            Ok(n) => {
                info!(job_id = %id, published = n, target = p.name(), "Published trends");
                (n, None)
            }
            Err(e) => {
                warn!(job_id = %id, error = %e, target = p.name(), "Publish failed");
                (0, Some(format!("{e:#}")))
            }
        },
        _ => (0, None),
    };

    JobState::Completed {
        stats: run.stats,
        errors: run.errors,
        published,
        publish_error,
    }
}

async fn set_state(jobs: &RwLock<HashMap<Uuid, EnrichmentJob>>, id: Uuid, state: JobState) {
    let mut jobs = jobs.write().await;
    match jobs.get_mut(&id) {
        Some(job) => {
            let finished = matches!(state, JobState::Completed { .. } | JobState::Failed { .. });
            job.state = state;
            if finished {
                job.finished_at = Some(Utc::now());
            }
        }
        None => debug!(job_id = %id, "Job no longer tracked, state dropped"),
    }
}

/// Drops finished jobs oldest first; in-flight jobs go only when nothing
/// finished is left.
fn evict_oldest(jobs: &mut HashMap<Uuid, EnrichmentJob>) {
    while jobs.len() >= MAX_TRACKED_JOBS {
        let victim = jobs
            .values()
            .filter(|j| j.is_finished())
            .min_by_key(|j| j.requested_at)
            .or_else(|| jobs.values().min_by_key(|j| j.requested_at))
            .map(|j| j.id);
        match victim {
            Some(id) => {
                jobs.remove(&id);
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_ignores_unknown_hints() {
        let request = EnrichmentRequest {
            categories: vec!["Luxury".into(), "gothic".into()],
            regions: vec!["europe".into(), "Atlantis".into()],
            ..Default::default()
        };
        let focus = request.focus();
        assert_eq!(focus.categories, vec![Category::Luxury]);
        assert_eq!(focus.regions, vec![Region::Europe]);
    }

    fn job(state: JobState, requested_at: DateTime<Utc>) -> EnrichmentJob {
        let finished_at = matches!(state, JobState::Completed { .. } | JobState::Failed { .. })
            .then_some(requested_at);
        EnrichmentJob {
            id: Uuid::new_v4(),
            sources: vec!["Vogue".into()],
            categories: Vec::new(),
            regions: Vec::new(),
            state,
            requested_at,
            finished_at,
        }
    }

    fn completed() -> JobState {
        JobState::Completed {
            stats: RunStats::default(),
            errors: Vec::new(),
            published: 0,
            publish_error: None,
        }
    }

    #[test]
    fn eviction_keeps_running_jobs_over_finished_ones() {
        let start = Utc::now() - Duration::hours(1);
        let running = job(JobState::Running, start);
        let running_id = running.id;

        let mut jobs = HashMap::from([(running.id, running)]);
        for i in 1..MAX_TRACKED_JOBS as i64 {
            let done = job(completed(), start + Duration::seconds(i));
            jobs.insert(done.id, done);
        }
        let oldest_finished = jobs
            .values()
            .filter(|j| j.is_finished())
            .min_by_key(|j| j.requested_at)
            .map(|j| j.id)
            .unwrap();

        evict_oldest(&mut jobs);

        assert_eq!(jobs.len(), MAX_TRACKED_JOBS - 1);
        assert!(jobs.contains_key(&running_id));
        assert!(!jobs.contains_key(&oldest_finished));
    }

    #[test]
    fn only_fresh_successful_or_in_flight_jobs_are_reusable() {
        let now = Utc::now();
        assert!(job(JobState::Running, now).reusable_at(now));
        assert!(job(completed(), now - Duration::minutes(5)).reusable_at(now));
        assert!(!job(completed(), now - Duration::minutes(RECENT_RUN_MINUTES + 1)).reusable_at(now));
        assert!(!job(JobState::Failed { cause: "x".into() }, now).reusable_at(now));
    }

    #[test]
    fn request_fields_are_all_optional() {
        let request: EnrichmentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.sources.is_empty());
        assert!(!request.force_refresh);
    }
}
