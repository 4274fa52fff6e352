//! Characters: a kinematic body driven by prioritized actions.
//!
//! One [`Character::update`] is one tick:
//!
//! 1. actions are arbitrated; forced ones run during the scan, the winner
//!    after it
//! 2. gravity and world collisions follow the winner's post-update flags
//! 3. `before_move` hooks run, the body moves, contact edges become events
//! 4. vertical velocity is cleared on vertical contact and the ground and
//!    falling states are derived from the contact history
//!
//! Characters never call user code. Everything observable goes to an event
//! outbox drained by the simulation.

pub mod action;
pub mod actions;
pub mod state;

use serde::{Deserialize, Serialize};

use crate::collision::kinematic::{DeferredEffect, KinematicBody, MoveOutcome};
use crate::collision::settings::BodySettings;
use crate::collision::types::{CollisionLayer, Vec2};
use crate::collision::world::CollisionWorld;
use crate::config::Configuration;
use crate::constants::{
    DEFAULT_BODY_EFFECT_DELAY, DEFAULT_FALLING_TIME, DEFAULT_GROUND_GRACE_TIME,
    DEFAULT_MIN_VELOCITY, JUMP_SLOPE_GRACE_TIME,
};
use crate::error::{Result, SetupError};
use crate::events::{CharacterEvent, ContactEvent, ContactEvents, contact_events};
use crate::input::{InputSource, NeutralInput, clamped_axis};
use crate::platform::PlatformId;
use crate::timer::{Cooldown, frames_for};

pub use action::{
    ActionContext, CharacterAction, MoveContext, Neighbours, PostUpdate, PostUpdateFlags,
};
pub use state::{Area, AreaSet, CharacterState, StateChange, StateMachine, StateSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Time moving down without ground before the character counts as falling.
    pub falling_time: f32,
    /// Time without ground contact before leaving the ground state.
    pub ground_grace_time: f32,
    /// Velocity components below this are snapped to zero.
    pub min_velocity: f32,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            falling_time: DEFAULT_FALLING_TIME,
            ground_grace_time: DEFAULT_GROUND_GRACE_TIME,
            min_velocity: DEFAULT_MIN_VELOCITY,
        }
    }
}

/// Builds a [`Character`]. Nothing touches the world until [`build`](Self::build)
/// has validated the action set.
pub struct CharacterBuilder {
    position: Vec2,
    half_extents: Vec2,
    layer: CollisionLayer,
    tag: Option<String>,
    body: BodySettings,
    settings: CharacterSettings,
    actions: Vec<Box<dyn CharacterAction>>,
    input: Box<dyn InputSource>,
}

impl CharacterBuilder {
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            half_extents,
            layer: CollisionLayer::CHARACTERS,
            tag: None,
            body: BodySettings::default(),
            settings: CharacterSettings::default(),
            actions: Vec::new(),
            input: Box::new(NeutralInput),
        }
    }

    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_body_settings(mut self, body: BodySettings) -> Self {
        self.body = body;
        self
    }

    pub fn with_settings(mut self, settings: CharacterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Registers an action. Registration order breaks priority ties.
    pub fn with_action(mut self, action: impl CharacterAction + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn build(self, world: &mut CollisionWorld, config: &Configuration) -> Result<Character> {
        if let Some((action, requires)) = action::missing_requirement(&self.actions) {
            return Err(SetupError::MissingAction { action, requires });
        }
        let body = KinematicBody::spawn(
            world,
            self.position,
            self.half_extents,
            self.layer,
            self.tag,
            self.body,
        )?;

        Ok(Character {
            velocity: Vec2::zeros(),
            body,
            position: self.position,
            states: StateMachine::default(),
            areas: AreaSet::default(),
            actions: self.actions,
            last_action: None,
            platform: None,
            input: self.input,
            ground_grace_frames: frames_for(self.settings.ground_grace_time, config.fixed_delta),
            falling_cooldown: Cooldown::from_seconds(self.settings.falling_time, config.fixed_delta),
            settings: self.settings,
            jump_start: Vec2::zeros(),
            jump_end: Vec2::zeros(),
            fall_start: Vec2::zeros(),
            fall_end: Vec2::zeros(),
            events: Vec::new(),
        })
    }
}

pub struct Character {
    /// Units per second. Scaled by the tick delta when moving.
    pub velocity: Vec2,
    body: KinematicBody,
    /// Center of the body after its last move.
    position: Vec2,
    states: StateMachine,
    areas: AreaSet,
    actions: Vec<Box<dyn CharacterAction>>,
    last_action: Option<usize>,
    platform: Option<PlatformId>,
    input: Box<dyn InputSource>,
    settings: CharacterSettings,
    ground_grace_frames: u32,
    falling_cooldown: Cooldown,
    jump_start: Vec2,
    jump_end: Vec2,
    fall_start: Vec2,
    fall_end: Vec2,
    events: Vec<CharacterEvent>,
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("shape", &self.body.shape())
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("states", &self.states.states())
            .field("areas", &self.areas)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl Character {
    #[inline]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn settings(&self) -> &CharacterSettings {
        &self.settings
    }

    /// Horizontal input in `[-1, 1]`.
    pub fn input_axis(&self) -> f32 {
        clamped_axis(self.input.as_ref())
    }

    pub fn set_input(&mut self, input: impl InputSource + 'static) {
        self.input = Box::new(input);
    }

    /// Name of the action in control after the last update.
    pub fn controlling_action(&self) -> Option<&'static str> {
        self.last_action
            .and_then(|i| self.actions.get(i))
            .map(|a| a.name())
    }

    // --- States ---

    #[inline]
    pub fn states(&self) -> StateSet {
        self.states.states()
    }

    #[inline]
    pub fn is_on_state(&self, state: CharacterState) -> bool {
        self.states.is_on(state)
    }

    #[inline]
    pub fn is_on_any_state(&self, states: &[CharacterState]) -> bool {
        self.states.is_on_any(states)
    }

    pub fn enter_state(&mut self, state: CharacterState) {
        let change = self.states.enter(state);
        self.on_state_change(change);
    }

    pub fn exit_state(&mut self, state: CharacterState) {
        let change = self.states.exit(state);
        self.on_state_change(change);
    }

    /// Enters `state` unless already in it.
    pub fn soft_enter_state(&mut self, state: CharacterState) {
        let change = self.states.soft_enter(state);
        self.on_state_change(change);
    }

    /// Exits `state` if in it.
    pub fn soft_exit_state(&mut self, state: CharacterState) {
        let change = self.states.soft_exit(state);
        self.on_state_change(change);
    }

    fn on_state_change(&mut self, change: Option<StateChange>) {
        let Some(StateChange { before, after }) = change else {
            return;
        };
        let entered = |s: CharacterState| !before.has(s) && after.has(s);
        let exited = |s: CharacterState| before.has(s) && !after.has(s);

        if entered(CharacterState::Jumping) {
            self.jump_start = self.position;
            self.body.disable_slopes(JUMP_SLOPE_GRACE_TIME);
        }
        if exited(CharacterState::Jumping) {
            self.jump_end = self.position;
        }
        if entered(CharacterState::Falling) {
            self.fall_start = self.position;
        }
        if exited(CharacterState::Falling) {
            self.fall_end = self.position;
        }

        log::debug!("{:?} states {:#011b} -> {:#011b}", self.body.shape(), before.bits, after.bits);
        self.events.push(CharacterEvent::StateChanged { before, after });
    }

    /// Height gained during the last finished jump.
    pub fn last_jump_distance(&self) -> f32 {
        self.jump_end.y - self.jump_start.y
    }

    /// Height lost during the last finished fall.
    pub fn last_fall_distance(&self) -> f32 {
        self.fall_start.y - self.fall_end.y
    }

    // --- Areas ---

    #[inline]
    pub fn areas(&self) -> AreaSet {
        self.areas
    }

    #[inline]
    pub fn is_in_area(&self, area: Area) -> bool {
        self.areas.has(area)
    }

    pub fn enter_area(&mut self, area: Area) {
        let before = self.areas;
        self.areas.add(area);
        self.on_area_change(before);
    }

    pub fn exit_area(&mut self, area: Area) {
        let before = self.areas;
        self.areas.remove(area);
        self.on_area_change(before);
    }

    fn on_area_change(&mut self, before: AreaSet) {
        if before == self.areas {
            return;
        }
        self.events.push(CharacterEvent::AreaChanged {
            before,
            after: self.areas,
        });
    }

    // --- Platforms ---

    /// The platform carrying this character, if any.
    #[inline]
    pub fn platform(&self) -> Option<PlatformId> {
        self.platform
    }

    pub fn set_platform(&mut self, platform: Option<PlatformId>) {
        if self.platform == platform {
            return;
        }
        let before = self.platform;
        self.platform = platform;
        if platform.is_none() {
            self.body.collisions_mut().standing_on_platform = false;
        }
        self.events.push(CharacterEvent::PlatformChanged {
            before,
            after: platform,
        });
    }

    /// Starts dropping through pass-through platforms for a while.
    pub fn fall_through_platform(&mut self) -> bool {
        self.body.fall_through_platform(DEFAULT_BODY_EFFECT_DELAY)
    }

    // --- Movement ---

    /// Moves the body by `velocity` outside of the regular update (pushes,
    /// platform transport), reporting contact edges as usual.
    pub fn displace(
        &mut self,
        world: &mut CollisionWorld,
        config: &Configuration,
        velocity: Vec2,
    ) -> MoveOutcome {
        let outcome = self.body.carry_by(world, config, velocity);
        self.record_move(world, outcome.contacts);
        outcome
    }

    fn record_move(&mut self, world: &CollisionWorld, contacts: ContactEvents) {
        self.events.extend(contact_events(contacts));
        self.position = self.body.position(world);
    }

    /// Carries the character along with a platform.
    ///
    /// A standing rider keeps its ground contact even though the carrying
    /// move itself has no vertical component.
    pub fn transport(
        &mut self,
        world: &mut CollisionWorld,
        config: &Configuration,
        velocity: Vec2,
        standing_on_platform: bool,
    ) {
        let mut outcome = self.body.carry_by(world, config, velocity);
        if standing_on_platform {
            let collisions = self.body.collisions_mut();
            collisions.below = true;
            collisions.standing_on_platform = true;
            collisions.frames_since.below = 0;
            outcome.contacts.remove(ContactEvent::LeaveGround);
        }
        self.record_move(world, outcome.contacts);
    }

    pub fn update(
        &mut self,
        world: &mut CollisionWorld,
        config: &Configuration,
        delta: f32,
        neighbours: &mut Neighbours<'_>,
    ) {
        let mut actions = std::mem::take(&mut self.actions);

        let winner = {
            let cx = ActionContext {
                delta,
                config,
                world: &*world,
            };
            action::arbitrate(&mut actions, self, &cx)
        };
        if winner != self.last_action {
            if let Some(previous) = self.last_action.and_then(|i| actions.get_mut(i)) {
                previous.lose_control(self, delta);
            }
            if let Some(next) = winner.and_then(|i| actions.get_mut(i)) {
                next.gain_control(self, delta);
            }
            self.last_action = winner;
        }

        let mut flags = action::default_post_update();
        if let Some(controller) = winner.and_then(|i| actions.get_mut(i)) {
            let cx = ActionContext {
                delta,
                config,
                world: &*world,
            };
            controller.perform(self, &cx);
            flags = controller.post_update_flags();
        }

        if flags.has(PostUpdate::ApplyGravity) {
            self.velocity += self.body.gravity(config) * delta;
        }
        self.body.disable_world_collisions = !flags.has(PostUpdate::WorldCollisions);

        let min = self.settings.min_velocity;
        if self.velocity.x.abs() < min {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < min {
            self.velocity.y = 0.0;
        }

        self.events.push(CharacterEvent::BeforeMove { delta });
        {
            let mut cx = MoveContext {
                delta,
                config,
                world: &mut *world,
                neighbours,
            };
            for action in actions.iter_mut() {
                action.before_move(self, &mut cx);
            }
        }
        let outcome = self.body.move_by(world, config, self.velocity * delta);
        self.record_move(world, outcome.contacts);
        self.events.push(CharacterEvent::AfterMove { delta });

        let collisions = *self.body.collisions();
        if collisions.above || collisions.below {
            self.velocity.y = 0.0;
        }
        if collisions.below {
            self.falling_cooldown.reset();
            self.soft_enter_state(CharacterState::OnGround);
        } else {
            if collisions.frames_since.below > self.ground_grace_frames {
                self.soft_exit_state(CharacterState::OnGround);
            }
            if self.velocity.y < 0.0
                && !self.is_on_state(CharacterState::WallSliding)
                && self.falling_cooldown.inc_ready()
            {
                self.soft_enter_state(CharacterState::Falling);
            }
        }

        self.actions = actions;
    }

    /// Takes the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<CharacterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Takes the delayed body effects requested since the last call.
    pub fn drain_deferred(&mut self) -> Vec<DeferredEffect> {
        self.body.drain_deferred()
    }
}

#[cfg(test)]
mod tests {
    use super::actions::GroundMovement;
    use super::*;
    use crate::collision::world::ShapeDesc;
    use crate::input::FixedAxis;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Wants a fixed priority and records every callback.
    struct Scripted {
        name: &'static str,
        priority: i32,
        requires: &'static [&'static str],
        flags: PostUpdateFlags,
        log: Log,
    }

    impl Scripted {
        fn new(name: &'static str, priority: i32, log: &Log) -> Self {
            Self {
                name,
                priority,
                requires: &[],
                flags: action::default_post_update(),
                log: log.clone(),
            }
        }
    }

    impl CharacterAction for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn requires(&self) -> &'static [&'static str] {
            self.requires
        }

        fn wanted_priority(&mut self, _: &Character, _: &ActionContext<'_>) -> i32 {
            self.priority
        }

        fn gain_control(&mut self, _: &mut Character, _: f32) {
            self.log.borrow_mut().push(format!("gain {}", self.name));
        }

        fn perform(&mut self, _: &mut Character, _: &ActionContext<'_>) {
            self.log.borrow_mut().push(format!("perform {}", self.name));
        }

        fn lose_control(&mut self, _: &mut Character, _: f32) {
            self.log.borrow_mut().push(format!("lose {}", self.name));
        }

        fn post_update_flags(&self) -> PostUpdateFlags {
            self.flags
        }
    }

    fn floor() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.insert(ShapeDesc::cuboid(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5)));
        world
    }

    fn tick(character: &mut Character, world: &mut CollisionWorld, config: &Configuration) {
        character.update(world, config, DT, &mut Neighbours::default());
    }

    #[test]
    fn missing_requirement_is_rejected() {
        let log = Log::default();
        let mut world = CollisionWorld::new();
        let mut needy = Scripted::new("push", 1, &log);
        needy.requires = &["ground_movement"];
        let err = CharacterBuilder::new(Vec2::zeros(), Vec2::new(0.5, 0.5))
            .with_action(needy)
            .build(&mut world, &Configuration::default())
            .unwrap_err();
        assert_eq!(
            err,
            SetupError::MissingAction {
                action: "push",
                requires: "ground_movement"
            }
        );
        assert!(world.is_empty());
    }

    #[test]
    fn arbitration_runs_forced_then_winner() {
        let log = Log::default();
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 5.0), Vec2::new(0.5, 0.5))
            .with_action(Scripted::new("a", 5, &log))
            .with_action(Scripted::new("b", -1, &log))
            .with_action(Scripted::new("c", 3, &log))
            .build(&mut world, &config)
            .unwrap();

        tick(&mut character, &mut world, &config);
        assert_eq!(*log.borrow(), ["perform b", "gain a", "perform a"]);
        assert_eq!(character.controlling_action(), Some("a"));

        log.borrow_mut().clear();
        tick(&mut character, &mut world, &config);
        assert_eq!(*log.borrow(), ["perform b", "perform a"]);
    }

    #[test]
    fn ties_go_to_the_first_action() {
        let log = Log::default();
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 5.0), Vec2::new(0.5, 0.5))
            .with_action(Scripted::new("first", 4, &log))
            .with_action(Scripted::new("second", 4, &log))
            .build(&mut world, &config)
            .unwrap();

        tick(&mut character, &mut world, &config);
        assert_eq!(character.controlling_action(), Some("first"));
    }

    #[test]
    fn zero_priority_never_takes_control() {
        let log = Log::default();
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 5.0), Vec2::new(0.5, 0.5))
            .with_action(Scripted::new("idle", 0, &log))
            .build(&mut world, &config)
            .unwrap();

        tick(&mut character, &mut world, &config);
        assert!(log.borrow().is_empty());
        assert_eq!(character.controlling_action(), None);
        // No controller: gravity still applies.
        assert!(character.velocity.y < 0.0);
    }

    #[test]
    fn controller_can_skip_gravity_and_collisions() {
        let log = Log::default();
        let mut world = floor();
        let config = Configuration::default();
        let mut scripted = Scripted::new("cutscene", 1, &log);
        scripted.flags = PostUpdateFlags::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5))
            .with_action(scripted)
            .build(&mut world, &config)
            .unwrap();

        // Straight into the floor: nothing is probed, so nothing stops it.
        character.velocity = Vec2::new(0.0, -30.0);
        tick(&mut character, &mut world, &config);
        assert!(character.body().disable_world_collisions);
        assert_eq!(character.velocity.y, -30.0);
        assert!(!character.body().collisions().below);
        assert!((character.position().y - 0.0).abs() < 1e-4);
    }

    #[test]
    fn settles_on_the_ground() {
        let mut world = floor();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 2.0), Vec2::new(0.5, 0.5))
            .build(&mut world, &config)
            .unwrap();

        for _ in 0..120 {
            tick(&mut character, &mut world, &config);
        }
        assert_eq!(character.velocity.y, 0.0);
        assert!(character.is_on_state(CharacterState::OnGround));
        assert!(!character.is_on_state(CharacterState::Falling));
        assert!((character.position().y - 0.5).abs() < 0.05);

        let events = character.drain_events();
        let landings = events
            .iter()
            .filter(|e| e.is_contact(ContactEvent::Landing))
            .count();
        assert_eq!(landings, 1);
        assert!(character.last_fall_distance() > 1.0);
    }

    #[test]
    fn leaves_the_ground_after_grace() {
        let mut world = floor();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5))
            .build(&mut world, &config)
            .unwrap();
        tick(&mut character, &mut world, &config);
        assert!(character.is_on_state(CharacterState::OnGround));

        // Walk off a cliff by removing the floor from under the body.
        character.body_mut().translate(&mut world, Vec2::new(100.0, 0.0));
        let mut ticks_on_ground = 0;
        for _ in 0..30 {
            tick(&mut character, &mut world, &config);
            if character.is_on_state(CharacterState::OnGround) {
                ticks_on_ground += 1;
            }
        }
        // 0.05 s of grace at 60 Hz.
        assert_eq!(ticks_on_ground, 3);
        assert!(character.is_on_state(CharacterState::Falling));
    }

    #[test]
    fn extra_moves_keep_the_ground_grace() {
        let mut world = floor();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5))
            .build(&mut world, &config)
            .unwrap();
        tick(&mut character, &mut world, &config);

        character.body_mut().translate(&mut world, Vec2::new(100.0, 0.0));
        let mut ticks_on_ground = 0;
        for _ in 0..10 {
            // Nudged sideways every tick, as a platform push would.
            character.displace(&mut world, &config, Vec2::new(0.02, 0.0));
            tick(&mut character, &mut world, &config);
            if character.is_on_state(CharacterState::OnGround) {
                ticks_on_ground += 1;
            }
        }
        assert_eq!(ticks_on_ground, 3);
    }

    #[test]
    fn unchanged_states_and_areas_raise_nothing() {
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::zeros(), Vec2::new(0.5, 0.5))
            .build(&mut world, &config)
            .unwrap();

        character.exit_state(CharacterState::Pushing);
        character.soft_exit_state(CharacterState::Falling);
        character.exit_area(Area::Liquid);
        assert!(character.drain_events().is_empty());

        character.enter_state(CharacterState::Pushing);
        character.enter_state(CharacterState::Pushing);
        let changes = character
            .drain_events()
            .into_iter()
            .filter(CharacterEvent::is_state_change)
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn jumping_excludes_ground_and_falling() {
        let mut world = floor();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5))
            .build(&mut world, &config)
            .unwrap();
        tick(&mut character, &mut world, &config);
        character.drain_events();

        character.enter_state(CharacterState::Jumping);
        assert!(character.is_on_state(CharacterState::Jumping));
        assert!(!character.is_on_any_state(&[CharacterState::Falling, CharacterState::OnGround]));
        assert!(!character.body().slopes_enabled());

        let changes: Vec<_> = character
            .drain_events()
            .into_iter()
            .filter(CharacterEvent::is_state_change)
            .collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(character.drain_deferred().len(), 1);
    }

    #[test]
    fn ground_movement_walks_towards_input() {
        let mut world = floor();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5))
            .with_action(GroundMovement::default())
            .with_input(FixedAxis(1.0))
            .build(&mut world, &config)
            .unwrap();

        for _ in 0..60 {
            tick(&mut character, &mut world, &config);
        }
        assert!((character.velocity.x - 6.0).abs() < 0.01);
        assert!(character.position().x > 4.0);
        assert!(character.is_on_state(CharacterState::OnGround));
    }

    #[test]
    fn area_changes_are_reported() {
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut character = CharacterBuilder::new(Vec2::zeros(), Vec2::new(0.5, 0.5))
            .build(&mut world, &config)
            .unwrap();

        character.enter_area(Area::Liquid);
        character.enter_area(Area::Liquid);
        assert!(character.is_in_area(Area::Liquid));
        character.exit_area(Area::Liquid);
        character.exit_area(Area::Liquid);
        assert_eq!(
            character.drain_events(),
            vec![
                CharacterEvent::AreaChanged {
                    before: AreaSet::default(),
                    after: AreaSet::from_tags(&[Area::Liquid]),
                },
                CharacterEvent::AreaChanged {
                    before: AreaSet::from_tags(&[Area::Liquid]),
                    after: AreaSet::default(),
                },
            ]
        );
    }
}
