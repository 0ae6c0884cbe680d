//! Leaderboard service
//!
//! Assembles one scoring cycle from the upstream sources: the most-seen
//! casts from the counter store, their likes from the hub, then the pure
//! scoring pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use super::cast_sort::{sort_casts, CastView, SortBy};
use crate::domain::entities::{Cast, CastLikes, Fid, Like, ModeratorRoster, RulesConfig};
use crate::domain::ports::{EngagementSource, ReactionSource};
use crate::domain::scoring::{dedupe_by_hash, score_cycle, ExclusionList, ScoringCycle};
use crate::error::{AppError, DomainError};

/// Hub requests in flight at once
const LIKES_CONCURRENCY: usize = 25;

/// Static inputs of every cycle
#[derive(Debug, Clone)]
pub struct LeaderboardSettings {
    pub rules: RulesConfig,
    pub exclusions: ExclusionList,
    pub moderators: ModeratorRoster,
    /// Casts kept per author in the most-seen list
    pub most_seen_per_fid: usize,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            exclusions: ExclusionList::new().with_fids([Fid(6546)]),
            moderators: ModeratorRoster::default(),
            most_seen_per_fid: 3,
        }
    }
}

/// One computed leaderboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub rules_config: RulesConfig,
    /// Candidate casts with their moderator likes attached
    pub casts: Vec<Cast>,
    #[serde(flatten)]
    pub cycle: ScoringCycle,
}

/// Pick the casts shown on the leaderboard.
///
/// All counted casts ordered by views, at most `per_fid` per author,
/// excluded authors removed, cut to `limit`. The viewer's own casts are
/// always added back so they can see where they stand.
pub fn select_most_seen(
    mut all: Vec<Cast>,
    per_fid: usize,
    exclusions: &ExclusionList,
    limit: usize,
    viewer: Option<Fid>,
) -> Vec<Cast> {
    all.sort_by(|a, b| b.count.cmp(&a.count));

    let mut seen_per_fid: HashMap<Fid, usize> = HashMap::new();
    let mut selected: Vec<Cast> = all
        .iter()
        .filter(|cast| {
            let seen = seen_per_fid.entry(cast.fid).or_insert(0);
            *seen += 1;
            *seen <= per_fid
        })
        .filter(|cast| !exclusions.excludes_fid(cast.fid))
        .take(limit)
        .cloned()
        .collect();

    if let Some(viewer) = viewer {
        selected.extend(all.iter().filter(|c| c.fid == viewer).cloned());
    }

    let mut selected = dedupe_by_hash(selected);
    selected.sort_by(|a, b| b.count.cmp(&a.count));
    selected
}

/// Service computing leaderboards from live data
pub struct LeaderboardService<ES, RS>
where
    ES: EngagementSource + ?Sized,
    RS: ReactionSource + ?Sized,
{
    engagement: Arc<ES>,
    reactions: Arc<RS>,
    settings: LeaderboardSettings,
}

impl<ES, RS> LeaderboardService<ES, RS>
where
    ES: EngagementSource + ?Sized,
    RS: ReactionSource + ?Sized,
{
    pub fn new(engagement: Arc<ES>, reactions: Arc<RS>) -> Self {
        Self {
            engagement,
            reactions,
            settings: LeaderboardSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: LeaderboardSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.settings.rules
    }

    /// Most-seen casts, twice the number of paid slots so the gate has room
    pub async fn most_seen_casts(&self, viewer: Option<Fid>) -> Result<Vec<Cast>, AppError> {
        let all = self.engagement.view_counts().await?;
        Ok(select_most_seen(
            all,
            self.settings.most_seen_per_fid,
            &self.settings.exclusions,
            self.settings.rules.top_n() * 2,
            viewer,
        ))
    }

    /// Likes for each cast keyed by hash.
    ///
    /// A failed lookup is logged and counts as no likes.
    pub async fn fetch_likes(&self, casts: &[Cast]) -> HashMap<String, CastLikes> {
        let requests: Vec<(Fid, String)> = casts
            .iter()
            .map(|cast| (cast.fid, cast.cast_hash.clone()))
            .collect();

        let reactions = Arc::clone(&self.reactions);
        let fetched: Vec<(String, Result<Vec<Like>, DomainError>)> = stream::iter(requests)
            .map(move |(fid, cast_hash)| {
                let reactions = Arc::clone(&reactions);
                async move {
                    let likes = reactions.likes(fid, &cast_hash).await;
                    (cast_hash, likes)
                }
            })
            .buffer_unordered(LIKES_CONCURRENCY)
            .collect()
            .await;

        let roster = &self.settings.moderators;
        fetched
            .into_iter()
            .map(|(cast_hash, likes)| {
                let likes = match likes {
                    Ok(likes) => CastLikes::from_likes(&likes, roster),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            cast_hash = %cast_hash,
                            "Failed to fetch likes"
                        );
                        CastLikes::default()
                    }
                };
                (cast_hash, likes)
            })
            .collect()
    }

    /// Casts with like data, sorted for display
    pub async fn list_casts(
        &self,
        viewer: Option<Fid>,
        sort: SortBy,
    ) -> Result<Vec<CastView>, AppError> {
        let casts = self.most_seen_casts(viewer).await?;
        let mut likes = self.fetch_likes(&casts).await;

        let mut views: Vec<CastView> = casts
            .into_iter()
            .map(|cast| {
                let likes = likes.remove(&cast.cast_hash).unwrap_or_default();
                CastView::new(cast, likes)
            })
            .collect();
        sort_casts(&mut views, sort);
        Ok(views)
    }

    /// Score the current week.
    ///
    /// `min_mods` overrides the configured moderator threshold; it may not
    /// exceed the number of moderators.
    pub async fn current(&self, min_mods: Option<usize>) -> Result<Leaderboard, AppError> {
        let rules = match min_mods {
            Some(min_mods) if min_mods > self.settings.moderators.len() => {
                return Err(AppError::BadRequest(format!(
                    "min_mods must be between 0 and {}",
                    self.settings.moderators.len()
                )));
            }
            Some(min_mods) => self.settings.rules.clone().with_min_mods(min_mods),
            None => self.settings.rules.clone(),
        };

        let casts = self.most_seen_casts(None).await?;
        let likes = self.fetch_likes(&casts).await;
        let casts: Vec<Cast> = casts
            .into_iter()
            .map(|cast| {
                let mod_likes = likes
                    .get(&cast.cast_hash)
                    .map(|l| l.moderators.clone())
                    .unwrap_or_default();
                cast.with_mod_likes(mod_likes)
            })
            .collect();

        let cycle = score_cycle(casts.clone(), &rules, &self.settings.exclusions)?;
        tracing::info!(
            candidates = casts.len(),
            eligible = cycle.eligible.len(),
            winners = cycle.winners.len(),
            min_mods = rules.min_mods(),
            "Computed leaderboard"
        );

        Ok(Leaderboard {
            rules_config: rules,
            casts,
            cycle,
        })
    }
}
