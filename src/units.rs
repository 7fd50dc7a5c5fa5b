use derive_more::{Add, AddAssign, Div, From, Into, Mul, Neg, Sub, SubAssign, Sum};

/// A length in PDF points (1/72 of an inch). All layout coordinates use points,
/// with the origin at the bottom-left corner of the page.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    Div,
    Neg,
    Sum,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into)]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into)]
pub struct Mm(pub f32);

impl Pt {
    /// The absolute difference between two lengths
    pub fn distance(self, other: Pt) -> Pt {
        Pt((self.0 - other.0).abs())
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_imperial_and_metric_lengths() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert!(Pt::from(Mm(25.4)).distance(Pt(72.0)) < Pt(0.001));
    }

    #[test]
    fn scales_by_plain_numbers() {
        assert_eq!(Pt(12.0) * 1.5, Pt(18.0));
        assert_eq!(Pt(12.0) / 2.0, Pt(6.0));
        let total: Pt = [Pt(1.0), Pt(2.5)].into_iter().sum();
        assert_eq!(total, Pt(3.5));
    }

    #[test]
    fn negates() {
        assert_eq!(-Pt(2.0), Pt(-2.0));
        assert_eq!(Pt(1.0) - Pt(3.0), -Pt(2.0));
    }
}
