//! The foreign-key rule.
//!
//! One [`FkRule`] is declared per schema field. The host calls
//! [`FkRule::check`] once per field instance with the run's context; all
//! checks of a run share that context's cache.

use serde_json::Value;
use tracing::trace;

use crate::cache::SharedLookupCache;
use crate::context::ValidationContext;
use crate::enums::BaseType;
use crate::error::{EmptyPatternSet, FkError};
use crate::types::{PathSpec, PatternSet};

#[derive(Clone, Debug, PartialEq)]
pub struct FkRule {
    base: BaseType,
    path: PathSpec,
    patterns: PatternSet,
}

impl FkRule {
    /// # Errors
    ///
    /// [`EmptyPatternSet`] if `path` lists no patterns.
    pub fn new(base: BaseType, path: PathSpec) -> Result<Self, EmptyPatternSet> {
        let patterns = path.pattern_set()?;
        Ok(FkRule {
            base,
            path,
            patterns,
        })
    }

    /// Rule on a string field.
    pub fn string(path: impl Into<PathSpec>) -> Result<Self, EmptyPatternSet> {
        FkRule::new(BaseType::String, path.into())
    }

    /// Rule on a number field.
    pub fn number(path: impl Into<PathSpec>) -> Result<Self, EmptyPatternSet> {
        FkRule::new(BaseType::Number, path.into())
    }

    pub fn base(&self) -> BaseType {
        self.base
    }

    pub fn path(&self) -> &PathSpec {
        &self.path
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Checks that `value` is reachable through one of the rule's patterns in
    /// the context document.
    ///
    /// # Errors
    ///
    /// [`FkError::NoContext`] if `context` is `None`; [`FkError::NotFound`]
    /// if no pattern reaches `value`.
    pub fn check(
        &self,
        value: &Value,
        context: Option<&mut ValidationContext<'_>>,
    ) -> Result<(), FkError> {
        let Some(context) = context else {
            return Err(FkError::NoContext { base: self.base });
        };
        let (data, cache) = context.parts_mut();
        let found = cache.resolve(&self.patterns, data).contains(value);
        trace!(value = %value, path = %self.path, found, "fk check");
        self.outcome(value, found)
    }

    /// Same as [`check`](FkRule::check) against a cache shared between
    /// threads. `data` is the lookup document the cache belongs to.
    pub fn check_shared(
        &self,
        value: &Value,
        context: Option<(&Value, &SharedLookupCache)>,
    ) -> Result<(), FkError> {
        let Some((data, cache)) = context else {
            return Err(FkError::NoContext { base: self.base });
        };
        let found = cache.resolve(&self.patterns, data).contains(value);
        trace!(value = %value, path = %self.path, found, "fk check");
        self.outcome(value, found)
    }

    fn outcome(&self, value: &Value, found: bool) -> Result<(), FkError> {
        if found {
            Ok(())
        } else {
            Err(FkError::NotFound {
                base: self.base,
                value: value.clone(),
                path: self.path.clone(),
            })
        }
    }
}
