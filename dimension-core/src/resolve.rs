//! Conversion path resolution
//!
//! Lookup order, first hit wins:
//! 1. identity, when both units are the same after alias resolution
//! 2. the direct edge `source -> target`
//! 3. the edge `target -> source` walked backwards, scalar entries only
//! 4. `source -> anchor -> target`, each leg resolved by 1-3
//!
//! A parametric edge is never walked backwards.

use std::fmt;
use crate::entry::ParametricFn;
use crate::{ConversionEntry, ConversionRegistry, Parameters};

/// Options for `ConversionRegistry::resolve`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Bind the transform to a copy of the parameters at resolution time
    pub freeze_config: bool,
}

impl ResolveOptions {
    pub fn frozen() -> Self {
        ResolveOptions { freeze_config: true }
    }
}

#[derive(Clone)]
enum Step {
    Identity,
    Multiply(f64),
    Divide(f64),
    Parametric(ParametricFn),
    Chain(Box<Step>, Box<Step>),
}

impl Step {
    fn apply(&self, value: f64, params: &Parameters) -> f64 {
        match self {
            Step::Identity => value,
            Step::Multiply(f) => value * f,
            Step::Divide(f) => value / f,
            Step::Parametric(f) => f(value, params),
            Step::Chain(first, second) => second.apply(first.apply(value, params), params),
        }
    }

    fn factor(&self) -> Option<f64> {
        match self {
            Step::Identity => Some(1.0),
            Step::Multiply(f) => Some(*f),
            Step::Divide(f) => Some(1.0 / f),
            Step::Parametric(_) => None,
            Step::Chain(first, second) => Some(first.factor()? * second.factor()?),
        }
    }

    fn compose(first: Step, second: Step) -> Step {
        match (first, second) {
            (Step::Multiply(a), Step::Multiply(b)) => Step::Multiply(a * b),
            (first, second) => Step::Chain(Box::new(first), Box::new(second)),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Identity => write!(f, "Identity"),
            Step::Multiply(factor) => write!(f, "Multiply({})", factor),
            Step::Divide(factor) => write!(f, "Divide({})", factor),
            Step::Parametric(_) => write!(f, "Parametric(<fn>)"),
            Step::Chain(first, second) => write!(f, "Chain({:?}, {:?})", first, second),
        }
    }
}

/// A resolved conversion between two units
///
/// Parameters are passed in at call time. A frozen transform ignores them
/// and uses the snapshot taken when it was resolved.
#[derive(Debug, Clone)]
pub struct Transform {
    step: Step,
    indirect: bool,
    frozen: Option<Parameters>,
}

impl Transform {
    /// Convert `value`, reading `params` unless the transform is frozen
    pub fn apply(&self, value: f64, params: &Parameters) -> f64 {
        let params = self.frozen.as_ref().unwrap_or(params);
        self.step.apply(value, params)
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.step, Step::Identity)
    }

    /// True when the conversion went through the anchor unit
    pub fn is_indirect(&self) -> bool {
        self.indirect
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Parameters captured at resolution time, for frozen transforms
    pub fn frozen_parameters(&self) -> Option<&Parameters> {
        self.frozen.as_ref()
    }

    /// The constant factor, when no parametric edge is involved
    pub fn as_factor(&self) -> Option<f64> {
        self.step.factor()
    }
}

impl ConversionRegistry {
    /// Find a transform from `source` to `target`
    ///
    /// `None` means no direct, reverse or anchor path exists. That is a
    /// normal answer, not an error.
    pub fn resolve(&self, source: &str, target: &str, options: ResolveOptions) -> Option<Transform> {
        let source = self.resolve_alias(source);
        let target = self.resolve_alias(target);

        let resolved = self.find_path(source, target);
        match &resolved {
            Some((step, indirect)) => {
                tracing::debug!(source, target, indirect, ?step, "conversion resolved")
            }
            None => tracing::debug!(source, target, "no conversion path"),
        }

        let (step, indirect) = resolved?;
        Some(Transform {
            step,
            indirect,
            frozen: options.freeze_config.then(|| self.snapshot()),
        })
    }

    /// Shorthand for `resolve(..).is_some()`
    pub fn can_convert(&self, source: &str, target: &str) -> bool {
        self.resolve(source, target, ResolveOptions::default()).is_some()
    }

    /// Resolve and apply against the current parameters
    pub fn convert(&self, value: f64, source: &str, target: &str) -> Option<f64> {
        self.resolve(source, target, ResolveOptions::default())
            .map(|t| t.apply(value, self.parameters()))
    }

    // Both units are canonical here. The legs of an indirect path always
    // have the anchor on one side, so recursion stops after one hop.
    fn find_path(&self, source: &str, target: &str) -> Option<(Step, bool)> {
        if source == target {
            return Some((Step::Identity, false));
        }

        if let Some(entry) = self.entry(source, target) {
            let step = match entry {
                ConversionEntry::Scalar(f) => Step::Multiply(*f),
                ConversionEntry::Parametric(f) => Step::Parametric(f.clone()),
            };
            return Some((step, false));
        }

        if let Some(ConversionEntry::Scalar(f)) = self.entry(target, source) {
            return Some((Step::Divide(*f), false));
        }

        let anchor = self.resolve_alias(&self.parameters().anchor_unit);
        if source != anchor && target != anchor {
            let (first, _) = self.find_path(source, anchor)?;
            let (second, _) = self.find_path(anchor, target)?;
            return Some((Step::compose(first, second), true));
        }

        None
    }
}
