use crate::combat::Move;

/// A punch gesture, already recognised and normalised by the input layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Punch {
    /// Direction in world space. Carried through for presentation only.
    pub direction: [f32; 3],
    /// Strength in `[0, 1]`. Out-of-range values are clamped.
    pub force: f32,
}

impl Punch {
    pub const fn new(direction: [f32; 3], force: f32) -> Self {
        Self { direction, force }
    }

    /// Power factor in `[0.5, 1.0]`: a feather-light punch still lands at
    /// half power.
    pub fn power_factor(&self) -> f64 {
        let force = if self.force.is_nan() {
            0.0
        } else {
            f64::from(self.force.clamp(0.0, 1.0))
        };
        0.5 + force / 2.0
    }

    /// `mv` with its base power scaled by this punch's force.
    pub fn scaled_move(&self, mv: &Move) -> Move {
        mv.scaled(self.power_factor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonType;

    #[test]
    fn force_maps_to_half_through_full_power() {
        let mv = Move::new("punch", MonType::Fighting, 80);
        assert_eq!(Punch::new([0.0; 3], 0.0).scaled_move(&mv).base_power, 40);
        assert_eq!(Punch::new([0.0; 3], 1.0).scaled_move(&mv).base_power, 80);
        assert_eq!(Punch::new([0.0; 3], 7.5).scaled_move(&mv).base_power, 80);
        assert_eq!(Punch::new([0.0; 3], f32::NAN).power_factor(), 0.5);
    }
}
