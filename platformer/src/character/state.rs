//! Character state and area sets.
//!
//! States are independent bits, but entering some states forces others out.
//! The rules live in one static table ([`exits_on_enter`]) so they can be
//! checked without a character.

use crate::bitmask_flags::BitmaskFlags;
use crate::define_bitmask_flags;

define_bitmask_flags!(CharacterState, u16, {
    OnGround,
    Falling,
    Jumping,
    WallSliding,
    Hanging,
    Pushing,
    Slipping,
    Grabbing,
    Ladder,
});

define_bitmask_flags!(Area, u8, {
    Liquid,
    Ladder,
    Grabbing,
});

/// Set of [`CharacterState`]. Empty means no state.
pub type StateSet = BitmaskFlags<u16>;

/// Set of [`Area`] the character overlaps. Empty means no area.
pub type AreaSet = BitmaskFlags<u8>;

/// States removed when `state` is entered.
pub fn exits_on_enter(state: CharacterState) -> &'static [CharacterState] {
    use CharacterState::*;
    match state {
        Jumping => &[Falling, OnGround, WallSliding],
        OnGround => &[Falling, Hanging, WallSliding],
        Falling => &[Hanging],
        WallSliding => &[Falling, Hanging, Jumping],
        _ => &[],
    }
}

/// States that replace the whole set when entered.
#[inline]
pub fn is_exclusive(state: CharacterState) -> bool {
    matches!(state, CharacterState::Grabbing | CharacterState::Ladder)
}

/// Net result of one enter/exit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub before: StateSet,
    pub after: StateSet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateMachine {
    states: StateSet,
}

impl StateMachine {
    #[inline]
    pub fn states(&self) -> StateSet {
        self.states
    }

    #[inline]
    pub fn is_on(&self, state: CharacterState) -> bool {
        self.states.has(state)
    }

    #[inline]
    pub fn is_on_any(&self, states: &[CharacterState]) -> bool {
        self.states.has_any(states)
    }

    /// Enters `state`, applying the exclusion table.
    ///
    /// Returns `None` when the set did not change, or when the enter is
    /// rejected: while the character is only grabbing, nothing but another
    /// exclusive state gets in.
    pub fn enter(&mut self, state: CharacterState) -> Option<StateChange> {
        let before = self.states;
        if is_exclusive(state) {
            self.states.clear();
        } else if self.states.is_exactly(CharacterState::Grabbing) {
            return None;
        } else {
            self.states.remove_many(exits_on_enter(state));
        }
        self.states.add(state);
        self.change_from(before)
    }

    /// Exits `state`. `None` when it was not set.
    pub fn exit(&mut self, state: CharacterState) -> Option<StateChange> {
        let before = self.states;
        self.states.remove(state);
        self.change_from(before)
    }

    fn change_from(&self, before: StateSet) -> Option<StateChange> {
        (before != self.states).then_some(StateChange {
            before,
            after: self.states,
        })
    }

    /// Like [`enter`](Self::enter), but a no-op when already in `state`.
    pub fn soft_enter(&mut self, state: CharacterState) -> Option<StateChange> {
        if self.is_on(state) {
            return None;
        }
        self.enter(state)
    }

    /// Like [`exit`](Self::exit), but a no-op when not in `state`.
    pub fn soft_exit(&mut self, state: CharacterState) -> Option<StateChange> {
        if !self.is_on(state) {
            return None;
        }
        self.exit(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CharacterState::*;

    fn machine(states: &[CharacterState]) -> StateMachine {
        StateMachine {
            states: StateSet::from_tags(states),
        }
    }

    #[test]
    fn jumping_clears_ground_and_falling() {
        let mut m = machine(&[OnGround, Falling, WallSliding, Pushing]);
        let change = m.enter(Jumping).unwrap();
        assert!(change.after.has(Jumping));
        assert!(!change.after.has_any(&[Falling, OnGround, WallSliding]));
        assert!(change.after.has(Pushing));
        assert_eq!(change.before, StateSet::from_tags(&[OnGround, Falling, WallSliding, Pushing]));
    }

    #[test]
    fn table_entries() {
        let mut m = machine(&[Falling, Hanging, WallSliding]);
        m.enter(OnGround);
        assert_eq!(m.states(), StateSet::from_tags(&[OnGround]));

        let mut m = machine(&[Hanging]);
        m.enter(Falling);
        assert_eq!(m.states(), StateSet::from_tags(&[Falling]));

        let mut m = machine(&[Falling, Hanging, Jumping]);
        m.enter(WallSliding);
        assert_eq!(m.states(), StateSet::from_tags(&[WallSliding]));

        let mut m = machine(&[OnGround]);
        m.enter(Slipping);
        assert_eq!(m.states(), StateSet::from_tags(&[OnGround, Slipping]));
    }

    #[test]
    fn exclusive_states_replace_everything() {
        let mut m = machine(&[OnGround, Pushing, Slipping]);
        m.enter(Ladder);
        assert!(m.states().is_exactly(Ladder));
        m.enter(Grabbing);
        assert!(m.states().is_exactly(Grabbing));
    }

    #[test]
    fn grabbing_rejects_regular_states() {
        let mut m = machine(&[Grabbing]);
        assert_eq!(m.enter(Falling), None);
        assert_eq!(m.enter(OnGround), None);
        assert!(m.states().is_exactly(Grabbing));
        assert!(m.enter(Ladder).is_some());
        assert!(m.states().is_exactly(Ladder));
    }

    #[test]
    fn unchanged_sets_report_nothing() {
        let mut m = machine(&[OnGround]);
        assert_eq!(m.enter(OnGround), None);
        assert_eq!(m.soft_enter(OnGround), None);
        assert_eq!(m.exit(Falling), None);
        assert_eq!(m.soft_exit(Falling), None);

        let change = m.soft_exit(OnGround).unwrap();
        assert!(change.after.is_empty());
        assert_eq!(m.exit(OnGround), None);
    }

    #[test]
    fn hard_enter_still_applies_the_table() {
        // Soft enter skips a state already set; a hard one clears its exits.
        let mut m = machine(&[OnGround, Falling]);
        assert_eq!(m.soft_enter(OnGround), None);
        let change = m.enter(OnGround).unwrap();
        assert_eq!(change.after, StateSet::from_tags(&[OnGround]));
    }
}
