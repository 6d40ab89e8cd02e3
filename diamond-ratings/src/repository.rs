//! Distribution repository: sorted historical pools bucketed by role, sub-role, and position.
//!
//! Generation and display both resolve pools through [`Repository::pools_for`],
//! so a rating means the same thing on both sides.
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::attributes::{AttributeKey, HITTER_KEYS, PITCH_KEYS, PITCHER_KEYS};
use crate::constants::STARTER_ENDURANCE_THRESHOLD;
use crate::percentile::{self, Band};
use crate::positions::{Position, Role, SubRole};
use crate::source::{HistoricalRow, SampleSource};

/// Resolution scope of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bucket {
    All,
    Role(Role),
    SubRole(SubRole),
    Position(Position),
}

impl Bucket {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Role(role) => role.label(),
            Self::SubRole(sub_role) => sub_role.code(),
            Self::Position(position) => position.code(),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ascending pool of integer samples for one `(attribute, bucket)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionPool {
    values: Vec<i32>,
}

static EMPTY_POOL: DistributionPool = DistributionPool { values: Vec::new() };

impl DistributionPool {
    /// Sort arbitrary samples into a pool.
    #[must_use]
    pub fn from_unsorted(mut values: Vec<i32>) -> Self {
        values.sort_unstable();
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> Option<i32> {
        self.values.first().copied()
    }

    #[must_use]
    pub fn max(&self) -> Option<i32> {
        self.values.last().copied()
    }

    /// Arithmetic mean, or `None` for an empty pool.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let total: f64 = self.values.iter().map(|v| f64::from(*v)).sum();
        Some(total / crate::numbers::usize_to_f64(self.values.len()))
    }

    #[must_use]
    pub fn percentile_of(&self, value: f64) -> Option<f64> {
        percentile::percentile_of(&self.values, value)
    }

    pub fn sample<R: rand::Rng + ?Sized>(
        &self,
        band: Band,
        jitter: f64,
        fallback: i32,
        rng: &mut R,
    ) -> i32 {
        percentile::sample_from_band(&self.values, band, jitter, fallback, rng)
    }

    fn push(&mut self, value: i32) {
        self.values.push(value);
    }

    fn finish(&mut self) {
        self.values.sort_unstable();
    }
}

/// Pool chosen by the fallback chain plus the bucket it came from.
#[derive(Debug, Clone, Copy)]
pub struct PoolLookup<'a> {
    pub pool: &'a DistributionPool,
    /// `None` when every bucket in the chain was empty.
    pub bucket: Option<Bucket>,
}

/// Immutable set of pools built from one historical source.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pools: BTreeMap<(AttributeKey, Bucket), DistributionPool>,
    rows: usize,
}

impl Repository {
    /// Repository with no samples; every lookup falls back.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build pools from normalized rows.
    #[must_use]
    pub fn from_rows(rows: &[HistoricalRow]) -> Self {
        let mut pools: BTreeMap<(AttributeKey, Bucket), DistributionPool> = BTreeMap::new();
        let mut add = |key: AttributeKey, buckets: &[Bucket], value: i32| {
            for bucket in buckets {
                pools.entry((key, *bucket)).or_default().push(value);
            }
        };

        for row in rows {
            if row.is_pitcher {
                let sub_role = pitcher_sub_role(row);
                let buckets = [
                    Bucket::All,
                    Bucket::Role(Role::Pitcher),
                    Bucket::SubRole(sub_role),
                ];
                for key in PITCHER_KEYS {
                    if let Some(value) = row.value(key) {
                        add(key, &buckets, value);
                    }
                }
                for key in PITCH_KEYS {
                    if let Some(value) = row.value(key).filter(|v| *v > 0) {
                        add(key, &buckets, value);
                    }
                }
            } else {
                let position = row.primary_position.unwrap_or(Position::CenterField);
                let buckets = [
                    Bucket::All,
                    Bucket::Role(Role::Hitter),
                    Bucket::Position(position),
                ];
                for key in HITTER_KEYS {
                    let value = if key == AttributeKey::Eye {
                        row.value(key).or_else(|| derived_eye(row))
                    } else {
                        row.value(key)
                    };
                    if let Some(value) = value {
                        add(key, &buckets, value);
                    }
                }
            }
        }

        for pool in pools.values_mut() {
            pool.finish();
        }
        Self {
            pools,
            rows: rows.len(),
        }
    }

    /// Load a repository, degrading to an empty one if the source fails.
    pub fn load<S: SampleSource>(source: &S) -> Self {
        match source.load_rows() {
            Ok(rows) => {
                let repo = Self::from_rows(&rows);
                info!(
                    "built rating repository from {} row(s) into {} pool(s)",
                    repo.rows,
                    repo.pools.len()
                );
                repo
            }
            Err(err) => {
                warn!("historical source unavailable, using empty pools: {err}");
                Self::empty()
            }
        }
    }

    /// Number of source rows the pools were built from.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Exact pool for one bucket, if any sample landed there.
    #[must_use]
    pub fn pool(&self, key: AttributeKey, bucket: Bucket) -> Option<&DistributionPool> {
        self.pools.get(&(key, bucket)).filter(|pool| !pool.is_empty())
    }

    /// Resolve a pool through the fallback chain.
    ///
    /// Order: role+position (hitters) or role+sub-role (pitchers), then role,
    /// then `ALL`, then an empty pool. A missing `role` starts at `ALL`.
    #[must_use]
    pub fn pools_for(
        &self,
        key: AttributeKey,
        role: Option<Role>,
        sub_role: Option<SubRole>,
        position: Option<Position>,
    ) -> PoolLookup<'_> {
        let specific = match role {
            Some(Role::Pitcher) => sub_role.map(Bucket::SubRole),
            Some(Role::Hitter) => position.map(Bucket::Position),
            None => None,
        };
        let chain = [specific, role.map(Bucket::Role), Some(Bucket::All)];
        for bucket in chain.into_iter().flatten() {
            if let Some(pool) = self.pool(key, bucket) {
                if Some(bucket) != specific {
                    debug!("pool for {key} fell back to {bucket}");
                }
                return PoolLookup {
                    pool,
                    bucket: Some(bucket),
                };
            }
        }
        PoolLookup {
            pool: &EMPTY_POOL,
            bucket: None,
        }
    }
}

fn pitcher_sub_role(row: &HistoricalRow) -> SubRole {
    match row.pitching_role {
        Some(role) if role.is_bullpen() => SubRole::Reliever,
        Some(_) => SubRole::Starter,
        None => {
            if row.value(AttributeKey::Endurance).unwrap_or(0) >= STARTER_ENDURANCE_THRESHOLD {
                SubRole::Starter
            } else {
                SubRole::Reliever
            }
        }
    }
}

/// Eye for hitter rows that lack the column: a contact and scoring blend.
fn derived_eye(row: &HistoricalRow) -> Option<i32> {
    let contact = row.value(AttributeKey::Ch)?;
    let scoring = row.value(AttributeKey::Sc).unwrap_or(contact);
    Some(crate::numbers::round_to_rating(
        f64::from(contact).mul_add(0.6, f64::from(scoring) * 0.4),
    ))
}

/// Lazily built, resettable repository shared across threads.
///
/// Readers clone an `Arc` snapshot; the build and [`RepositoryCache::reset`]
/// take the write lock, so at most one writer runs at a time.
pub struct RepositoryCache<S> {
    source: S,
    slot: RwLock<Option<Arc<Repository>>>,
}

impl<S: SampleSource> RepositoryCache<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
        }
    }

    /// Current repository, building it on first use.
    pub fn get(&self) -> Arc<Repository> {
        if let Ok(guard) = self.slot.read()
            && let Some(repo) = guard.as_ref()
        {
            return Arc::clone(repo);
        }
        let mut guard = match self.slot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(repo) = guard.as_ref() {
            return Arc::clone(repo);
        }
        let repo = Arc::new(Repository::load(&self.source));
        *guard = Some(Arc::clone(&repo));
        repo
    }

    /// Drop the cached pools; the next [`RepositoryCache::get`] rebuilds them.
    pub fn reset(&self) {
        let mut guard = match self.slot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }

    /// Whether pools are currently built.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.slot.read().is_ok_and(|guard| guard.is_some())
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::PitchingRole;
    use crate::source::InMemorySource;
    use std::cell::Cell;
    use std::convert::Infallible;

    fn rows() -> Vec<HistoricalRow> {
        vec![
            HistoricalRow::hitter(Position::FirstBase)
                .with(AttributeKey::Ch, 60)
                .with(AttributeKey::Ph, 80),
            HistoricalRow::hitter(Position::FirstBase)
                .with(AttributeKey::Ch, 40)
                .with(AttributeKey::Sc, 50),
            HistoricalRow::default().with(AttributeKey::Ch, 70),
            HistoricalRow::pitcher(Some(PitchingRole::Closer))
                .with(AttributeKey::Endurance, 80)
                .with(AttributeKey::Fb, 0)
                .with(AttributeKey::Sl, 75),
            HistoricalRow::pitcher(None)
                .with(AttributeKey::Endurance, 65)
                .with(AttributeKey::Fb, 90),
            HistoricalRow::pitcher(None).with(AttributeKey::Endurance, 40),
        ]
    }

    #[test]
    fn buckets_follow_role_and_position() {
        let repo = Repository::from_rows(&rows());
        let first = repo
            .pool(AttributeKey::Ch, Bucket::Position(Position::FirstBase))
            .unwrap();
        assert_eq!(first.values(), &[40, 60]);
        let center = repo
            .pool(AttributeKey::Ch, Bucket::Position(Position::CenterField))
            .unwrap();
        assert_eq!(center.values(), &[70]);
        let hitters = repo.pool(AttributeKey::Ch, Bucket::Role(Role::Hitter)).unwrap();
        assert_eq!(hitters.values(), &[40, 60, 70]);

        let starters = repo
            .pool(AttributeKey::Endurance, Bucket::SubRole(SubRole::Starter))
            .unwrap();
        assert_eq!(starters.values(), &[65]);
        let relievers = repo
            .pool(AttributeKey::Endurance, Bucket::SubRole(SubRole::Reliever))
            .unwrap();
        assert_eq!(relievers.values(), &[40, 80]);
    }

    #[test]
    fn zero_pitches_are_not_samples() {
        let repo = Repository::from_rows(&rows());
        let fastballs = repo.pool(AttributeKey::Fb, Bucket::All).unwrap();
        assert_eq!(fastballs.values(), &[90]);
        assert!(repo.pool(AttributeKey::Fb, Bucket::SubRole(SubRole::Reliever)).is_none());
    }

    #[test]
    fn missing_eye_is_derived_for_hitters() {
        let repo = Repository::from_rows(&rows());
        let eye = repo.pool(AttributeKey::Eye, Bucket::Role(Role::Hitter)).unwrap();
        // 60 -> 60, 40/50 -> 44, 70 -> 70
        assert_eq!(eye.values(), &[44, 60, 70]);
    }

    #[test]
    fn fallback_chain_walks_to_all_then_empty() {
        let repo = Repository::from_rows(&rows());
        let lookup = repo.pools_for(
            AttributeKey::Fb,
            Some(Role::Pitcher),
            Some(SubRole::Reliever),
            None,
        );
        assert_eq!(lookup.bucket, Some(Bucket::Role(Role::Pitcher)));

        let lookup = repo.pools_for(
            AttributeKey::Ph,
            Some(Role::Hitter),
            None,
            Some(Position::Shortstop),
        );
        assert_eq!(lookup.bucket, Some(Bucket::Role(Role::Hitter)));

        let lookup = repo.pools_for(AttributeKey::Endurance, None, None, None);
        assert_eq!(lookup.bucket, Some(Bucket::All));

        let lookup = repo.pools_for(AttributeKey::Kn, Some(Role::Pitcher), None, None);
        assert!(lookup.pool.is_empty());
        assert_eq!(lookup.bucket, None);
    }

    #[test]
    fn pool_statistics() {
        let pool = DistributionPool::from_unsorted(vec![70, 30, 50]);
        assert_eq!(pool.min(), Some(30));
        assert_eq!(pool.max(), Some(70));
        assert_eq!(pool.mean(), Some(50.0));
        assert_eq!(pool.percentile_of(30.0), Some(0.0));
        assert_eq!(pool.percentile_of(70.0), Some(1.0));
        assert_eq!(DistributionPool::default().mean(), None);
    }

    struct CountingSource {
        loads: Cell<u32>,
    }

    impl SampleSource for CountingSource {
        type Error = Infallible;

        fn load_rows(&self) -> Result<Vec<HistoricalRow>, Self::Error> {
            self.loads.set(self.loads.get() + 1);
            Ok(rows())
        }
    }

    #[test]
    fn cache_builds_once_until_reset() {
        let cache = RepositoryCache::new(CountingSource {
            loads: Cell::new(0),
        });
        assert!(!cache.is_built());
        let first = cache.get();
        let second = cache.get();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().loads.get(), 1);

        cache.reset();
        assert!(!cache.is_built());
        let third = cache.get();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.source().loads.get(), 2);
        assert_eq!(third.row_count(), 6);
    }

    #[test]
    fn in_memory_source_loads() {
        let repo = Repository::load(&InMemorySource::new(rows()));
        assert_eq!(repo.row_count(), 6);
        assert!(!repo.is_empty());
        assert!(Repository::empty().is_empty());
    }
}
