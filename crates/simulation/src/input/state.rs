use serde::{Deserialize, Serialize};

/// One tick's control values plus the tick at which they were captured.
///
/// Equality only looks at the control values: two states with the same
/// thruster, rudder and brake are the same state regardless of tick. Delta
/// encoding depends on this. Use [`InputState::same_frame`] when the tick
/// index matters too.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    pub thruster: f32,
    pub rudder: f32,
    #[serde(rename = "isBreaking")]
    pub is_braking: bool,
    pub tick_index: u64,
}

impl InputState {
    pub fn new(thruster: f32, rudder: f32, is_braking: bool, tick_index: u64) -> Self {
        Self {
            thruster,
            rudder,
            is_braking,
            tick_index,
        }
    }

    /// All controls released.
    pub fn neutral(tick_index: u64) -> Self {
        Self::new(0.0, 0.0, false, tick_index)
    }

    /// A state no real frame can equal (NaN never compares equal), so the
    /// first observed frame is always emitted.
    pub fn sentinel() -> Self {
        Self::new(f32::NAN, f32::NAN, true, 0)
    }

    /// Equal control values *and* equal tick index.
    pub fn same_frame(&self, other: &Self) -> bool {
        self == other && self.tick_index == other.tick_index
    }

    pub fn is_neutral(&self) -> bool {
        self.thruster == 0.0 && self.rudder == 0.0 && !self.is_braking
    }
}

impl PartialEq for InputState {
    fn eq(&self, other: &Self) -> bool {
        self.thruster == other.thruster
            && self.rudder == other.rudder
            && self.is_braking == other.is_braking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_tick_index() {
        let a = InputState::new(1.0, 0.5, false, 0);
        let b = InputState::new(1.0, 0.5, false, 99);
        assert_eq!(a, b);
        assert!(!a.same_frame(&b));
    }

    #[test]
    fn test_any_control_difference_is_unequal() {
        let base = InputState::new(1.0, 0.5, false, 7);
        assert_ne!(base, InputState::new(0.9, 0.5, false, 7));
        assert_ne!(base, InputState::new(1.0, -0.5, false, 7));
        assert_ne!(base, InputState::new(1.0, 0.5, true, 7));
    }

    #[test]
    fn test_sentinel_never_equals_a_real_frame() {
        let sentinel = InputState::sentinel();
        assert_ne!(sentinel, InputState::neutral(0));
        assert_ne!(sentinel, InputState::new(0.0, 0.0, true, 0));
        let copy = sentinel;
        assert_ne!(sentinel, copy);
    }

    #[test]
    fn test_serializes_with_camel_case_field_names() {
        let json = serde_json::to_string(&InputState::new(1.0, 0.0, true, 12)).unwrap();
        assert!(json.contains("\"isBreaking\":true"), "got: {json}");
        assert!(json.contains("\"tickIndex\":12"), "got: {json}");
    }
}
