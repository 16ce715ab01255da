//! Aggregate root for the Story Progression context.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use mythicloom_core::clock::Clock;
use mythicloom_core::error::DomainError;
use mythicloom_core::id::IdGenerator;
use uuid::Uuid;

use super::records::{Chapter, StoryState, Submission};
use super::values::{DayKey, MAX_BRANCH_LENGTH, MIN_BRANCH_LENGTH, VoteDirection};

/// Prompt used for the very first day when none is configured.
pub const DEFAULT_PROMPT: &str = "Begin the adventure with an intriguing opening line.";

/// Length of the very first day when none is configured.
pub const DEFAULT_DEADLINE_MINUTES: i64 = 24 * 60;

/// A finalized day always opens a successor at least this long.
pub const MIN_DAY_MINUTES: i64 = 60;

/// Options for opening the first day of a new engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryOptions {
    /// Prompt of the first day.
    pub initial_prompt: String,
    /// Minutes from construction until the first deadline.
    pub initial_deadline_minutes: i64,
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self {
            initial_prompt: DEFAULT_PROMPT.to_owned(),
            initial_deadline_minutes: DEFAULT_DEADLINE_MINUTES,
        }
    }
}

/// Display and winner order: highest tally first, then earliest submission.
/// Ids break the remaining ties so the order is total.
#[must_use]
pub fn display_order(a: &Submission, b: &Submission) -> Ordering {
    b.votes
        .cmp(&a.votes)
        .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// The mutable working set of the current day.
#[derive(Debug)]
pub(crate) struct ActiveDay {
    pub day_key: DayKey,
    pub prompt: String,
    pub deadline: DateTime<Utc>,
    pub submissions: HashMap<Uuid, Submission>,
    /// voter -> submission -> recorded direction.
    pub ballots: HashMap<String, HashMap<Uuid, VoteDirection>>,
}

impl ActiveDay {
    fn open(prompt: &str, deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            day_key: DayKey::of(now),
            prompt: prompt.trim().to_owned(),
            deadline,
            submissions: HashMap::new(),
            ballots: HashMap::new(),
        }
    }

    fn ranked(&self) -> Vec<Submission> {
        let mut submissions: Vec<Submission> = self.submissions.values().cloned().collect();
        submissions.sort_by(display_order);
        submissions
    }

    fn leader(&self) -> Option<&Submission> {
        self.submissions.values().min_by(|a, b| display_order(a, b))
    }
}

fn minutes_after(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    Duration::try_minutes(minutes)
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Rounds the requested deadline up to whole minutes from `now`, never less
/// than [`MIN_DAY_MINUTES`].
fn clamp_next_deadline(requested: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let millis = (requested - now).num_milliseconds();
    let minutes = millis
        .saturating_add(59_999)
        .div_euclid(60_000)
        .max(MIN_DAY_MINUTES);
    minutes_after(now, minutes)
}

/// The aggregate root holding the canon and the active day.
#[derive(Debug)]
pub struct StoryEngine {
    /// The canon, oldest first.
    chapters: Vec<Chapter>,
    /// The day currently accepting submissions and votes.
    pub(crate) active_day: ActiveDay,
}

impl StoryEngine {
    /// Creates an engine with an empty canon and the first day already open.
    #[must_use]
    pub fn new(options: &StoryOptions, clock: &dyn Clock) -> Self {
        let now = clock.now();
        let deadline = minutes_after(now, options.initial_deadline_minutes);
        Self {
            chapters: Vec::new(),
            active_day: ActiveDay::open(&options.initial_prompt, deadline, now),
        }
    }

    /// Returns a snapshot of the canon and the active day.
    #[must_use]
    pub fn state(&self) -> StoryState {
        StoryState {
            active_day_key: self.active_day.day_key,
            prompt: self.active_day.prompt.clone(),
            deadline: self.active_day.deadline,
            canonical_chapters: self.chapters.clone(),
            submissions: self.active_day.ranked(),
        }
    }

    /// Key of the day currently accepting submissions.
    #[must_use]
    pub fn active_day_key(&self) -> DayKey {
        self.active_day.day_key
    }

    /// The canon, oldest first.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Adds a branch to the active day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the author is blank or the trimmed
    /// text falls outside the length bounds, and `DomainError::DeadlinePassed`
    /// once the active deadline is behind us.
    pub fn submit_branch(
        &mut self,
        author_id: &str,
        branch_text: &str,
        source_comment_url: Option<&str>,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
    ) -> Result<Submission, DomainError> {
        if author_id.trim().is_empty() {
            return Err(DomainError::Validation("authorId is required.".to_owned()));
        }

        let trimmed = branch_text.trim();
        let length = trimmed.chars().count();
        if length < MIN_BRANCH_LENGTH {
            return Err(DomainError::Validation(format!(
                "branchText must be at least {MIN_BRANCH_LENGTH} characters."
            )));
        }
        if length > MAX_BRANCH_LENGTH {
            return Err(DomainError::Validation(format!(
                "branchText must be at most {MAX_BRANCH_LENGTH} characters."
            )));
        }

        let now = clock.now();
        if now > self.active_day.deadline {
            return Err(DomainError::DeadlinePassed(
                "Submissions are closed for the current day.".to_owned(),
            ));
        }

        let submission = Submission {
            id: ids.next_id(),
            day_key: self.active_day.day_key,
            prompt: self.active_day.prompt.clone(),
            author_id: author_id.to_owned(),
            branch_text: trimmed.to_owned(),
            source_comment_url: source_comment_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_owned),
            submitted_at: now,
            votes: 0,
        };

        self.active_day
            .submissions
            .insert(submission.id, submission.clone());

        Ok(submission)
    }

    /// Records, flips or retracts `voter_id`'s vote on a submission.
    ///
    /// Casting the direction already on record retracts it; casting the
    /// opposite direction replaces it in a single adjustment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a blank voter or a delta other
    /// than `1`/`-1`, `DomainError::SubmissionNotFound` if the id is not part
    /// of the active day, and `DomainError::DeadlinePassed` after the deadline.
    pub fn vote(
        &mut self,
        submission_id: Uuid,
        delta: i64,
        voter_id: &str,
        clock: &dyn Clock,
    ) -> Result<Submission, DomainError> {
        if voter_id.trim().is_empty() {
            return Err(DomainError::Validation("voterId is required.".to_owned()));
        }

        let day = &mut self.active_day;
        let submission = day
            .submissions
            .get_mut(&submission_id)
            .ok_or(DomainError::SubmissionNotFound(submission_id))?;

        let now = clock.now();
        if now > day.deadline {
            return Err(DomainError::DeadlinePassed(
                "Voting is closed for the current day.".to_owned(),
            ));
        }

        let direction = VoteDirection::try_from(delta)?;

        let ballot = day.ballots.entry(voter_id.to_owned()).or_default();
        let previous = ballot.get(&submission_id).copied();
        let adjustment = if previous == Some(direction) {
            ballot.remove(&submission_id);
            -direction.delta()
        } else {
            ballot.insert(submission_id, direction);
            direction.delta() - previous.map_or(0, VoteDirection::delta)
        };
        if ballot.is_empty() {
            day.ballots.remove(voter_id);
        }

        submission.votes = submission.votes.saturating_add(adjustment);
        Ok(submission.clone())
    }

    /// Closes the active day and opens the next one.
    ///
    /// The leading submission is promoted only when its tally is positive;
    /// otherwise the day is silent and the canon is left as is. Every
    /// submission and ballot of the closed day is dropped.
    pub fn finalize_day(
        &mut self,
        next_prompt: &str,
        next_deadline: DateTime<Utc>,
        clock: &dyn Clock,
    ) -> Option<Chapter> {
        let now = clock.now();

        let promoted = self
            .active_day
            .leader()
            .filter(|leader| leader.votes > 0)
            .cloned()
            .map(Chapter::from);

        if let Some(chapter) = &promoted {
            self.chapters.push(chapter.clone());
        }

        self.active_day = ActiveDay::open(
            next_prompt,
            clamp_next_deadline(next_deadline, now),
            now,
        );

        promoted
    }

    /// Replaces the canon with `chapters`, ordered by day key. Chapters
    /// sharing a day key keep their given order.
    pub fn seed_canon(&mut self, mut chapters: Vec<Chapter>) {
        chapters.sort_by_key(|chapter| chapter.day_key);
        self.chapters = chapters;
    }

    /// Replaces the active day with the given prompt, deadline and
    /// submissions. The day key is the deadline's UTC date and the prompt is
    /// kept verbatim. Tallies are taken as given; no ballots are on record.
    pub fn seed_active_day(
        &mut self,
        prompt: &str,
        deadline: DateTime<Utc>,
        submissions: Vec<Submission>,
    ) {
        self.active_day = ActiveDay {
            day_key: DayKey::of(deadline),
            prompt: prompt.to_owned(),
            deadline,
            submissions: submissions
                .into_iter()
                .map(|submission| (submission.id, submission))
                .collect(),
            ballots: HashMap::new(),
        };
    }
}
