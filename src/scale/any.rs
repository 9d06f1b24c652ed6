use fastnum::decimal::D128;

use super::{
    BinnedScale, ContinuousScale, DiscreteScale, Domain, GradientScale, IdentityScale, ManualScale,
    PaletteScale, Scale, TemporalScale, TickIter,
};
use crate::aesthetic::Aesthetic;
use crate::value::{Mapped, Value};

/// Any scale the crate can build, behind one concrete type.
#[derive(Debug, Clone)]
pub enum AnyScale {
    Continuous(ContinuousScale),
    Discrete(DiscreteScale),
    Binned(BinnedScale),
    Temporal(TemporalScale),
    Gradient(GradientScale),
    Palette(PaletteScale),
    Manual(ManualScale),
    Identity(IdentityScale),
}

macro_rules! dispatch {
    ($self:expr, $scale:ident => $body:expr) => {
        match $self {
            AnyScale::Continuous($scale) => $body,
            AnyScale::Discrete($scale) => $body,
            AnyScale::Binned($scale) => $body,
            AnyScale::Temporal($scale) => $body,
            AnyScale::Gradient($scale) => $body,
            AnyScale::Palette($scale) => $body,
            AnyScale::Manual($scale) => $body,
            AnyScale::Identity($scale) => $body,
        }
    };
}

impl AnyScale {
    pub fn as_scale(&self) -> &dyn Scale {
        dispatch!(self, scale => scale)
    }

    /// Sets the output range of a positional scale. Returns false for scales
    /// whose range is fixed.
    pub fn set_range(&mut self, lo: f64, hi: f64) -> bool {
        match self {
            AnyScale::Continuous(scale) => scale.set_range(lo, hi),
            AnyScale::Discrete(scale) => scale.set_range(lo, hi),
            AnyScale::Binned(scale) => scale.set_range(lo, hi),
            AnyScale::Temporal(scale) => scale.set_range(lo, hi),
            _ => return false,
        }
        true
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnyScale::Continuous(_) => "continuous",
            AnyScale::Discrete(_) => "discrete",
            AnyScale::Binned(_) => "binned",
            AnyScale::Temporal(_) => "temporal",
            AnyScale::Gradient(_) => "gradient",
            AnyScale::Palette(_) => "palette",
            AnyScale::Manual(_) => "manual",
            AnyScale::Identity(_) => "identity",
        }
    }
}

impl Scale for AnyScale {
    fn aesthetic(&self) -> Aesthetic {
        dispatch!(self, scale => scale.aesthetic())
    }

    fn name(&self) -> Option<&str> {
        dispatch!(self, scale => scale.name())
    }

    fn is_trained(&self) -> bool {
        dispatch!(self, scale => scale.is_trained())
    }

    fn train(&mut self, values: &[Value]) {
        dispatch!(self, scale => scale.train(values))
    }

    fn reset(&mut self) {
        dispatch!(self, scale => scale.reset())
    }

    fn transform(&self, value: &Value) -> Mapped {
        dispatch!(self, scale => scale.transform(value))
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        dispatch!(self, scale => scale.inverse(position))
    }

    fn domain(&self) -> Domain {
        dispatch!(self, scale => scale.domain())
    }

    fn range(&self) -> Option<(D128, D128)> {
        dispatch!(self, scale => scale.range())
    }

    fn computed_breaks(&self) -> Vec<Value> {
        dispatch!(self, scale => scale.computed_breaks())
    }

    fn computed_minor_breaks(&self) -> Vec<Value> {
        dispatch!(self, scale => scale.computed_minor_breaks())
    }

    fn computed_labels(&self) -> Vec<String> {
        dispatch!(self, scale => scale.computed_labels())
    }

    fn bandwidth(&self) -> Option<D128> {
        dispatch!(self, scale => scale.bandwidth())
    }

    fn ticks(&self) -> TickIter {
        dispatch!(self, scale => scale.ticks())
    }
}

macro_rules! impl_from {
    ($($variant:ident($scale:ty)),+ $(,)?) => {
        $(
            impl From<$scale> for AnyScale {
                fn from(scale: $scale) -> Self {
                    AnyScale::$variant(scale)
                }
            }
        )+
    };
}

impl_from!(
    Continuous(ContinuousScale),
    Discrete(DiscreteScale),
    Binned(BinnedScale),
    Temporal(TemporalScale),
    Gradient(GradientScale),
    Palette(PaletteScale),
    Manual(ManualScale),
    Identity(IdentityScale),
);
