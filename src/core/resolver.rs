use crate::core::campus::CampusTable;
use crate::core::date::find_date;
use crate::core::lexer::normalize;
use crate::domain::model::{
    Campus, Outcome, Query, ReferenceClock, ResolutionFailure, TriggerOutcome,
};

/// Turns a classified message into a concrete campus and date.
///
/// Anything the phrase leaves unspecified falls back to the default campus
/// and to today; the only failure is a campus alias collision.
#[derive(Debug, Clone, Default)]
pub struct CommandResolver {
    campuses: CampusTable,
    default_campus: Campus,
}

impl CommandResolver {
    pub fn new(campuses: CampusTable, default_campus: Campus) -> Self {
        Self {
            campuses,
            default_campus,
        }
    }

    pub fn resolve(&self, trigger: &TriggerOutcome, clock: &ReferenceClock) -> Outcome {
        match trigger {
            TriggerOutcome::NotAddressed => Outcome::NoAction,
            TriggerOutcome::AddressedDefault => {
                Outcome::Query(Query::new(self.default_campus, clock.today()))
            }
            TriggerOutcome::AddressedWithPhrase(phrase) => {
                match self.resolve_phrase(phrase, clock) {
                    Ok(query) => Outcome::Query(query),
                    Err(failure) => Outcome::Failure(failure),
                }
            }
        }
    }

    pub fn resolve_phrase(
        &self,
        phrase: &str,
        clock: &ReferenceClock,
    ) -> Result<Query, ResolutionFailure> {
        let tokens = normalize(phrase);
        let found_campus = self.campuses.resolve(&tokens)?;
        let consumed = found_campus.as_ref().map(|found| &found.span);

        let campus = match &found_campus {
            Some(found) => found.campus,
            None => {
                tracing::debug!("No campus in '{}', using {}", phrase, self.default_campus);
                self.default_campus
            }
        };

        let date = match find_date(&tokens, consumed, clock) {
            Some(found) => found.spec.resolve(clock).unwrap_or_else(|| {
                tracing::debug!("Date {:?} is out of range, using today", found.spec);
                clock.today()
            }),
            None => {
                tracing::debug!("No date in '{}', using today", phrase);
                clock.today()
            }
        };

        tracing::debug!("Resolved '{}' to {} {}", phrase, campus, date);
        Ok(Query::new(campus, date))
    }
}
