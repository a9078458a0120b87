// crates/townsdb-core/src/resolve/country.rs
use super::{keep_best, CountryMatch, MatchTier, Resolver};
use crate::scoring::BestMatch;
use crate::text::{is_missing, normalize};
use crate::traits::{NameMatch, Scorer};
use tracing::debug;

/// Country tiers, in evaluation order.
const COUNTRY_TIERS: [MatchTier; 4] = [
    MatchTier::CountryName,
    MatchTier::CountryAlias,
    MatchTier::Capital,
    MatchTier::Province,
];

impl<'g, S: Scorer> Resolver<'g, S> {
    /// Resolve a free-form country name to an ISO2 code.
    ///
    /// Tiers: canonical country names, country aliases, capitals, provinces.
    /// Blank queries (and the literal `nan`) return `None` without scoring.
    pub fn resolve_country(&self, query: &str) -> Option<CountryMatch<'g>> {
        if is_missing(query) {
            return None;
        }
        let query = normalize(query);

        let mut fallback: Option<CountryMatch<'g>> = None;
        for tier in COUNTRY_TIERS {
            let Some(found) = self.country_tier(&query, tier) else {
                debug!(%query, %tier, "empty tier");
                continue;
            };
            debug!(%query, %tier, code = found.code, candidate = found.candidate, score = found.score, "tier best");
            if self.accepts(found.score) {
                return Some(found);
            }
            keep_best(&mut fallback, found, |m| m.score);
        }

        fallback.filter(|m| self.accepts_last_resort(m.score))
    }

    fn country_tier(&self, query: &str, tier: MatchTier) -> Option<CountryMatch<'g>> {
        let db = self.db;
        let (best, code): (BestMatch<'g>, &'g str) = match tier {
            MatchTier::CountryName => {
                let best = self
                    .scorer
                    .best_match(query, db.countries.iter().map(NameMatch::name_str))?;
                (best, db.countries[best.index].code.as_str())
            }
            MatchTier::CountryAlias => {
                let best = self
                    .scorer
                    .best_match(query, db.aliases.iter().map(NameMatch::name_str))?;
                (best, db.aliases[best.index].country_code.as_str())
            }
            MatchTier::Capital => {
                // countries without a capital keep their slot as ""
                let pool = db
                    .countries
                    .iter()
                    .map(|c| c.capital.as_deref().unwrap_or(""));
                let best = self.scorer.best_match(query, pool)?;
                (best, db.countries[best.index].code.as_str())
            }
            MatchTier::Province => {
                let best = self
                    .scorer
                    .best_match(query, db.provinces.iter().map(NameMatch::name_str))?;
                (best, db.provinces[best.index].country_code.as_str())
            }
            MatchTier::TownName | MatchTier::TownAlias => return None,
        };

        Some(CountryMatch {
            code,
            score: best.score,
            tier,
            candidate: best.candidate,
        })
    }
}
