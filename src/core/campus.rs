//! Campus alias table and the longest-match scan over message tokens.

use crate::core::lexer::normalize;
use crate::domain::model::{Campus, ResolutionFailure};
use crate::utils::error::{BotError, Result};
use crate::utils::validation::Validate;
use std::collections::HashMap;
use std::ops::Range;

const BUILTIN_ALIASES: &[(Campus, &str)] = &[
    (Campus::DrieEiken, "cde"),
    (Campus::DrieEiken, "drie eiken"),
    (Campus::DrieEiken, "drie-eiken"),
    (Campus::Middelheim, "cmi"),
    (Campus::Middelheim, "middelheim"),
    (Campus::Stad, "cst"),
    (Campus::Stad, "stad"),
    (Campus::Stad, "stadscampus"),
    (Campus::Stad, "city"),
    (Campus::Stad, "city campus"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct CampusAlias {
    campus: Campus,
    tokens: Vec<String>,
}

impl CampusAlias {
    fn matches_at(&self, tokens: &[String], start: usize) -> bool {
        tokens
            .get(start..start + self.tokens.len())
            .is_some_and(|run| run == self.tokens.as_slice())
    }
}

/// Where in the token sequence a campus was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusMatch {
    pub campus: Campus,
    pub span: Range<usize>,
}

/// Aliases accepted for each campus, kept longest first.
#[derive(Debug, Clone)]
pub struct CampusTable {
    aliases: Vec<CampusAlias>,
}

impl Default for CampusTable {
    fn default() -> Self {
        Self::from_entries(BUILTIN_ALIASES.iter().copied())
    }
}

impl CampusTable {
    /// Builds a table without checking for conflicts; see [`Validate`].
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Campus, S)>,
        S: AsRef<str>,
    {
        let mut table = Self {
            aliases: Vec::new(),
        };
        for (campus, alias) in entries {
            table.push(campus, alias.as_ref());
        }
        table
    }

    pub fn with_alias(mut self, campus: Campus, alias: &str) -> Self {
        self.push(campus, alias);
        self
    }

    fn push(&mut self, campus: Campus, alias: &str) {
        let tokens = normalize(alias);
        if tokens.is_empty() {
            tracing::warn!("Ignoring empty alias for campus {}", campus);
            return;
        }
        let alias = CampusAlias { campus, tokens };
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
            // stable, so equal-length aliases keep insertion order
            self.aliases.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        }
    }

    /// Aliases of `campus` in their normalized, space-joined form.
    pub fn aliases_for(&self, campus: Campus) -> Vec<String> {
        self.aliases
            .iter()
            .filter(|alias| alias.campus == campus)
            .map(|alias| alias.tokens.join(" "))
            .collect()
    }

    /// Finds the first campus mentioned in `tokens`.
    ///
    /// At each start position the longest matching alias wins. Two campuses
    /// matching the same run with the same length is reported as ambiguous.
    pub fn resolve(
        &self,
        tokens: &[String],
    ) -> std::result::Result<Option<CampusMatch>, ResolutionFailure> {
        for start in 0..tokens.len() {
            let mut best: Option<(usize, Campus)> = None;

            for alias in &self.aliases {
                if !alias.matches_at(tokens, start) {
                    continue;
                }
                let len = alias.tokens.len();
                match best {
                    Some((best_len, campus)) if best_len == len && campus != alias.campus => {
                        return Err(ResolutionFailure::AmbiguousCampus {
                            phrase: tokens[start..start + len].join(" "),
                            first: campus,
                            second: alias.campus,
                        });
                    }
                    Some((best_len, _)) if best_len >= len => {}
                    _ => best = Some((len, alias.campus)),
                }
            }

            if let Some((len, campus)) = best {
                return Ok(Some(CampusMatch {
                    campus,
                    span: start..start + len,
                }));
            }
        }

        Ok(None)
    }
}

impl Validate for CampusTable {
    fn validate(&self) -> Result<()> {
        let mut owners: HashMap<&[String], Campus> = HashMap::new();
        for alias in &self.aliases {
            match owners.get(alias.tokens.as_slice()) {
                Some(&owner) if owner != alias.campus => {
                    return Err(BotError::AliasConflict {
                        alias: alias.tokens.join(" "),
                        first: owner,
                        second: alias.campus,
                    });
                }
                _ => {
                    owners.insert(alias.tokens.as_slice(), alias.campus);
                }
            }
        }
        Ok(())
    }
}

/// Resolves the campus named in `phrase` against the built-in alias table.
pub fn resolve_campus(phrase: &str) -> std::result::Result<Option<Campus>, ResolutionFailure> {
    let tokens = normalize(phrase);
    Ok(CampusTable::default()
        .resolve(&tokens)?
        .map(|found| found.campus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_alias_in_any_case() {
        for &(campus, alias) in BUILTIN_ALIASES {
            assert_eq!(resolve_campus(alias).unwrap(), Some(campus), "{}", alias);
            assert_eq!(
                resolve_campus(&alias.to_uppercase()).unwrap(),
                Some(campus),
                "{}",
                alias
            );
        }
        assert_eq!(
            resolve_campus("CDE").unwrap(),
            resolve_campus("drie eiken").unwrap()
        );
        assert_eq!(resolve_campus("Drie Eiken").unwrap(), Some(Campus::DrieEiken));
    }

    #[test]
    fn test_no_campus_is_not_an_error() {
        assert_eq!(resolve_campus("what's for lunch").unwrap(), None);
        assert_eq!(resolve_campus("").unwrap(), None);
    }

    #[test]
    fn test_alias_must_be_a_whole_token() {
        assert_eq!(resolve_campus("stadium tomorrow").unwrap(), None);
        assert_eq!(resolve_campus("eiken").unwrap(), None);
    }

    #[test]
    fn test_longest_alias_wins_and_reports_span() {
        let tokens = normalize("menu for city campus tomorrow");
        let found = CampusTable::default().resolve(&tokens).unwrap().unwrap();
        assert_eq!(found.campus, Campus::Stad);
        assert_eq!(found.span, 2..4);
    }

    #[test]
    fn test_first_position_wins() {
        let tokens = normalize("cmi or stad");
        let found = CampusTable::default().resolve(&tokens).unwrap().unwrap();
        assert_eq!(found.campus, Campus::Middelheim);
        assert_eq!(found.span, 0..1);
    }

    #[test]
    fn test_colliding_aliases_are_ambiguous() {
        let table = CampusTable::default().with_alias(Campus::Middelheim, "Stad");
        let err = table.resolve(&normalize("stad today")).unwrap_err();
        assert_eq!(
            err,
            ResolutionFailure::AmbiguousCampus {
                phrase: "stad".to_string(),
                first: Campus::Stad,
                second: Campus::Middelheim,
            }
        );
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_longer_alias_shadows_collision_on_its_prefix() {
        let table = CampusTable::default().with_alias(Campus::Middelheim, "city");
        let found = table.resolve(&normalize("city campus")).unwrap().unwrap();
        assert_eq!(found.campus, Campus::Stad);
    }

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(CampusTable::default().validate().is_ok());
    }

    #[test]
    fn test_extra_alias_and_duplicates() {
        let table = CampusTable::default()
            .with_alias(Campus::DrieEiken, "De Drie Eiken")
            .with_alias(Campus::DrieEiken, "cde");
        assert!(table.validate().is_ok());
        assert_eq!(
            table.resolve(&normalize("de drie eiken")).unwrap().unwrap().campus,
            Campus::DrieEiken
        );
        assert_eq!(
            table.aliases_for(Campus::DrieEiken),
            vec!["de drie eiken", "drie eiken", "cde", "drie-eiken"]
        );
    }
}
