//! Depth-first provisioning engine

use std::time::Duration;

use tracing::{debug, info, warn};

use super::RunTally;
use crate::config::{ProvisionConfig, DEFAULT_MAX_TASKS_PER_STORY};
use crate::plan::{Plan, Tier};
use crate::report::{Reporter, SilentReporter};
use crate::tracker::{CreateRequest, Tracker, TrackerId};

/// Pauses inserted after successful creations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    /// After a day (epic)
    pub day: Duration,
    /// After a story
    pub story: Duration,
    /// After a task
    pub task: Duration,
}

impl RateLimits {
    /// No pauses at all
    pub fn none() -> Self {
        Self {
            day: Duration::ZERO,
            story: Duration::ZERO,
            task: Duration::ZERO,
        }
    }

    /// Pause that follows a successful creation at `tier`
    pub fn after(&self, tier: Tier) -> Duration {
        match tier {
            Tier::Day => self.day,
            Tier::Story => self.story,
            Tier::Task => self.task,
        }
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::from(&ProvisionConfig::default())
    }
}

impl From<&ProvisionConfig> for RateLimits {
    fn from(config: &ProvisionConfig) -> Self {
        Self {
            day: config.day_delay,
            story: config.story_delay,
            task: config.task_delay,
        }
    }
}

/// Walks a plan and creates its nodes through a [`Tracker`]
pub struct Provisioner {
    tracker: Box<dyn Tracker>,
    reporter: Box<dyn Reporter>,
    max_tasks_per_story: usize,
    limits: RateLimits,
}

impl Provisioner {
    /// Create a provisioner with default limits and no console output
    pub fn new(tracker: impl Tracker + 'static) -> Self {
        Self {
            tracker: Box::new(tracker),
            reporter: Box::new(SilentReporter),
            max_tasks_per_story: DEFAULT_MAX_TASKS_PER_STORY,
            limits: RateLimits::default(),
        }
    }

    /// Create a provisioner using the cutoff and delays from configuration
    pub fn from_config(tracker: impl Tracker + 'static, config: &ProvisionConfig) -> Self {
        Self::new(tracker)
            .with_max_tasks_per_story(config.max_tasks_per_story)
            .with_rate_limits(RateLimits::from(config))
    }

    /// Report progress to `reporter`
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Stories declaring more tasks than this stay story-only
    pub fn with_max_tasks_per_story(mut self, max: usize) -> Self {
        self.max_tasks_per_story = max;
        self
    }

    /// Set the post-success pauses
    pub fn with_rate_limits(mut self, limits: RateLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Create every node of `plan`, parents before children
    ///
    /// Always walks the whole plan. A failed day skips its stories and
    /// tasks, a failed story skips its tasks; everything else continues.
    pub async fn provision(&mut self, plan: &Plan) -> RunTally {
        let mut tally = RunTally::default();

        info!(
            days = plan.days.len(),
            stories = plan.story_count(),
            tasks = plan.task_count(),
            tracker = self.tracker.command(),
            "Starting provisioning run"
        );
        self.reporter.run_started(plan, self.tracker.command());

        for day in &plan.days {
            let Some(day_id) = self
                .create(Tier::Day, &day.title, day.priority, None, &mut tally)
                .await
            else {
                warn!(title = %day.title, "Skipping day due to epic creation failure");
                tally.days_skipped += 1;
                self.reporter.day_skipped(day);
                continue;
            };

            for story in &day.stories {
                let Some(story_id) = self
                    .create(
                        Tier::Story,
                        &story.title,
                        Tier::Story.default_priority(),
                        Some(&day_id),
                        &mut tally,
                    )
                    .await
                else {
                    continue;
                };

                if !story.tasks_within(self.max_tasks_per_story) {
                    info!(
                        title = %story.title,
                        tasks = story.tasks.len(),
                        max = self.max_tasks_per_story,
                        "Story has too many tasks, leaving it story-only"
                    );
                    tally.stories_trimmed += 1;
                    self.reporter.tasks_skipped(story, self.max_tasks_per_story);
                    continue;
                }

                for task in &story.tasks {
                    self.create(
                        Tier::Task,
                        task,
                        Tier::Task.default_priority(),
                        Some(&story_id),
                        &mut tally,
                    )
                    .await;
                }
            }
        }

        info!(
            created = tally.created,
            failed = tally.failed,
            "Provisioning run complete"
        );
        self.reporter.run_finished(&tally);

        tally
    }

    /// Issue one creation call and record its outcome
    async fn create(
        &mut self,
        tier: Tier,
        title: &str,
        priority: u8,
        parent: Option<&TrackerId>,
        tally: &mut RunTally,
    ) -> Option<TrackerId> {
        // Stories and tasks are meaningless without a parent
        if tier.requires_parent() && parent.is_none() {
            debug!(%tier, title, "No parent id, not creating");
            return None;
        }

        let request = CreateRequest {
            tier,
            title: title.to_string(),
            priority,
            parent: parent.cloned(),
        };

        debug!(%tier, title, priority, parent = ?request.parent, "Creating node");
        self.reporter.attempt(&request);
        tally.attempted += 1;

        match self.tracker.create(&request).await {
            Ok(id) => {
                info!(%tier, title, id = %id, "Created");
                tally.created += 1;
                self.reporter.created(&request, &id);

                let pause = self.limits.after(tier);
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                Some(id)
            }
            Err(e) => {
                warn!(%tier, title, error = %e, "Failed to create");
                tally.failed += 1;
                self.reporter.failed(&request, &e);
                None
            }
        }
    }
}
