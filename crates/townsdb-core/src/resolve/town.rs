// crates/townsdb-core/src/resolve/town.rs
use super::{keep_best, MatchTier, Resolver, TownMatch};
use crate::error::{Result, TownsDbError};
use crate::model::CountryTowns;
use crate::text::{is_missing, normalize};
use crate::traits::Scorer;
use tracing::debug;

impl<'g, S: Scorer> Resolver<'g, S> {
    /// Resolve a free-form town name.
    ///
    /// With `country` (an ISO2 code, any case) only that country's canonical
    /// names and then its aliases are searched. Without it every country is
    /// scanned in code order, first by canonical name and then by alias, and
    /// the first country whose best score reaches the acceptance threshold
    /// wins. That is the first in scan order, not necessarily the best overall.
    ///
    /// Alias hits report the canonical name of the town the alias belongs to.
    ///
    /// # Errors
    /// [`TownsDbError::InvalidScope`] when `country` is not a two-character
    /// code of a country in the gazetteer. A known country without a town
    /// table simply yields `Ok(None)`.
    pub fn resolve_town(&self, query: &str, country: Option<&str>) -> Result<Option<TownMatch<'g>>> {
        if is_missing(query) {
            return Ok(None);
        }
        let query = normalize(query);

        match country {
            Some(code) => self.resolve_town_in(&query, code),
            None => Ok(self.resolve_town_anywhere(&query)),
        }
    }

    fn resolve_town_in(&self, query: &str, code: &str) -> Result<Option<TownMatch<'g>>> {
        if code.chars().count() != 2 {
            return Err(TownsDbError::InvalidScope(format!(
                "country scope must be a two-letter ISO code, got {code:?}"
            )));
        }
        let db = self.db;
        let country = db.country(code).ok_or_else(|| {
            TownsDbError::InvalidScope(format!("unknown country code {code:?}"))
        })?;
        let Some(table) = db.towns.get(&country.code) else {
            debug!(country = %country.code, "no town table");
            return Ok(None);
        };
        let code = country.code.as_str();

        let mut fallback = None;
        for tier in [MatchTier::TownName, MatchTier::TownAlias] {
            let Some(found) = self.town_tier(query, code, table, tier) else {
                continue;
            };
            debug!(%query, %tier, country = code, town = found.name, score = found.score, "tier best");
            if self.accepts(found.score) {
                return Ok(Some(found));
            }
            keep_best(&mut fallback, found, |m| m.score);
        }
        Ok(fallback.filter(|m| self.accepts_last_resort(m.score)))
    }

    fn resolve_town_anywhere(&self, query: &str) -> Option<TownMatch<'g>> {
        let mut fallback = None;
        for tier in [MatchTier::TownName, MatchTier::TownAlias] {
            for (code, table) in self.db.town_tables() {
                let Some(found) = self.town_tier(query, code, table, tier) else {
                    continue;
                };
                if self.accepts(found.score) {
                    debug!(%query, %tier, country = code, town = found.name, score = found.score, "accepted");
                    return Some(found);
                }
                keep_best(&mut fallback, found, |m| m.score);
            }
        }
        if let Some(m) = &fallback {
            debug!(%query, country = m.country_code, town = m.name, score = m.score, "best of all tiers");
        }
        fallback.filter(|m| self.accepts_last_resort(m.score))
    }

    fn town_tier(
        &self,
        query: &str,
        code: &'g str,
        table: &'g CountryTowns,
        tier: MatchTier,
    ) -> Option<TownMatch<'g>> {
        match tier {
            MatchTier::TownName => {
                let best = self
                    .scorer
                    .best_match(query, table.towns.iter().map(|t| t.name.as_str()))?;
                Some(TownMatch {
                    name: best.candidate,
                    score: best.score,
                    town_index: best.index,
                    country_code: code,
                    tier,
                    alias: None,
                })
            }
            MatchTier::TownAlias => {
                let best = self
                    .scorer
                    .best_match(query, table.aliases.iter().map(String::as_str))?;
                let town_index = table.alias_index[best.index];
                Some(TownMatch {
                    name: table.towns[town_index].name.as_str(),
                    score: best.score,
                    town_index,
                    country_code: code,
                    tier,
                    alias: Some(best.candidate),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::model::{AliasRecord, CountryRecord, Gazetteer, ProvinceRecord, TownRecord};
    use crate::resolve::MatchOutcome;
    use crate::scoring::{BestMatch, CandidateScorer};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn country(code: &str, name: &str, capital: Option<&str>) -> CountryRecord {
        CountryRecord {
            code: code.into(),
            code3: None,
            numeric: None,
            fips: None,
            name: name.into(),
            capital: capital.map(Into::into),
            area_km2: None,
            population: None,
            continent: None,
        }
    }

    fn town(name: &str) -> TownRecord {
        TownRecord {
            index: 0,
            source_row: None,
            name: name.into(),
            lat: None,
            lon: None,
            population: None,
            province: None,
            county: None,
            sub_address: None,
            class_code: None,
        }
    }

    fn towns(names: &[&str], aliases: &[(&str, usize)]) -> CountryTowns {
        CountryTowns::new(
            names.iter().map(|n| town(n)).collect(),
            aliases.iter().map(|(a, _)| a.to_string()).collect(),
            aliases.iter().map(|(_, i)| *i).collect(),
        )
        .unwrap()
    }

    fn fixture() -> Gazetteer {
        let mut tables = BTreeMap::new();
        tables.insert(
            "IE".to_string(),
            towns(&["Dublin", "Cork", "Galway"], &[("Baile Atha Cliath", 0), ("Gaillimh", 2)]),
        );
        tables.insert("GB".to_string(), towns(&["London", "Cork Hill"], &[("Londinium", 0)]));
        Gazetteer::new(
            vec![
                country("IE", "Ireland", Some("Dublin")),
                country("GB", "United Kingdom", Some("London")),
                country("AQ", "Antarctica", None),
            ],
            vec![AliasRecord {
                alias: "Eire".into(),
                country_code: "IE".into(),
            }],
            vec![ProvinceRecord {
                name: "Munster".into(),
                country_code: "IE".into(),
            }],
            tables,
        )
        .unwrap()
    }

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Scorer for Counting {
        fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<BestMatch<'a>>
        where
            I: IntoIterator<Item = &'a str>,
        {
            self.calls.fetch_add(1, Ordering::Relaxed);
            CandidateScorer::default().best_match(query, candidates)
        }
    }

    #[test]
    fn scoped_canonical_hit() {
        let db = fixture();
        let m = db.resolver().resolve_town("galway", Some("ie")).unwrap().unwrap();
        assert_eq!((m.name, m.town_index, m.country_code), ("Galway", 2, "IE"));
        assert_eq!(m.score, 1.0);
        assert_eq!(m.tier, MatchTier::TownName);
    }

    #[test]
    fn alias_reports_the_canonical_town() {
        let db = fixture();
        let m = db.resolver().resolve_town("Gaillimh", Some("IE")).unwrap().unwrap();
        assert_eq!(m.name, "Galway");
        assert_eq!(m.town_index, 2);
        assert_eq!(m.alias, Some("Gaillimh"));
        assert_eq!(m.tier, MatchTier::TownAlias);
        assert_eq!(db.towns_for("IE").unwrap().towns()[m.town_index].name, m.name);
    }

    #[test]
    fn unscoped_scans_countries_in_code_order() {
        let db = fixture();
        assert_eq!(db.country_codes().collect::<Vec<_>>(), ["GB", "IE"]);
        let m = db.resolver().resolve_town("london", None).unwrap().unwrap();
        assert_eq!(m.country_code, "GB");
        let m = db.resolver().resolve_town("cork", None).unwrap().unwrap();
        assert_eq!((m.name, m.country_code), ("Cork", "IE"));
    }

    #[test]
    fn unscoped_checks_every_canonical_table_before_aliases() {
        let db = fixture();
        let m = db.resolver().resolve_town("Londinium", None).unwrap().unwrap();
        assert_eq!((m.name, m.country_code, m.tier), ("London", "GB", MatchTier::TownAlias));
    }

    #[test]
    fn invalid_scopes_are_errors() {
        let db = fixture();
        for scope in ["IRL", "I", "", "ZZ", " IE", "IE "] {
            let err = db.resolver().resolve_town("Cork", Some(scope)).unwrap_err();
            assert!(matches!(err, TownsDbError::InvalidScope(_)), "{scope}: {err}");
            assert!(!err.is_load_error());
        }
    }

    #[test]
    fn country_without_towns_is_no_match() {
        let db = fixture();
        assert!(db.resolver().resolve_town("Cork", Some("AQ")).unwrap().is_none());
    }

    #[test]
    fn missing_queries_never_reach_the_scorer() {
        let db = fixture();
        let resolver = db.resolver().with_scorer(Counting::default());
        for q in ["", "   ", "nan"] {
            assert_eq!(resolver.resolve_town(q, None).unwrap().to_tuple(), (None, 0.0, None, None));
            assert!(resolver.resolve_town(q, Some("IE")).unwrap().is_none());
        }
        assert_eq!(resolver.scorer.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn accepted_canonical_hit_stops_the_scan() {
        let db = fixture();
        let resolver = db.resolver().with_scorer(Counting::default());
        resolver.resolve_town("London", None).unwrap().unwrap();
        // GB canonical names only
        assert_eq!(resolver.scorer.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn nothing_close_enough_is_none() {
        let db = fixture();
        let strict = Thresholds::new(0.95, 0.9);
        let resolver = db.resolver().with_thresholds(strict);
        assert!(resolver.resolve_town("Xyzzy", None).unwrap().is_none());
        assert!(resolver.resolve_town("Qwrtp", Some("GB")).unwrap().is_none());
    }
}
