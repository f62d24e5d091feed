//! Filter that keeps family titles away from adult seeds.

use crate::context::PoolContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CandidatePool;
use query::vocab::{KID_CERTIFICATIONS, MATURE_CERTIFICATIONS};

/// Drops G, PG and PG-13 titles when the seed is R or NC-17.
///
/// ## Algorithm
/// 1. Skip entirely if the user picked a certification
/// 2. Skip unless the seed's certification is R or NC-17
/// 3. Keep records whose certification is unknown or not a kids' rating
pub struct MatureSeedFilter;

impl Filter for MatureSeedFilter {
    fn name(&self) -> &str {
        "MatureSeedFilter"
    }

    fn apply(&self, mut pool: CandidatePool, context: &PoolContext) -> Result<CandidatePool> {
        if context.picked_certification.is_some() {
            return Ok(pool);
        }

        let seed_is_mature = context
            .seed
            .cert
            .as_deref()
            .is_some_and(|cert| MATURE_CERTIFICATIONS.contains(&cert));
        if !seed_is_mature {
            return Ok(pool);
        }

        pool.retain(|record| {
            record
                .cert
                .as_deref()
                .is_none_or(|cert| !KID_CERTIFICATIONS.contains(&cert))
        });
        Ok(pool)
    }
}
