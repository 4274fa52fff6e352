//! Fixed-step simulation driver.
//!
//! Owns the collision world, every platform and every character, and runs
//! them in a fixed order each tick:
//!
//! 1. delayed body effects whose timers ran out
//! 2. platforms, in registration order, each carrying its passengers
//! 3. characters, in registration order
//! 4. outboxes are collected into the event queue and new timers are armed

use std::collections::HashMap;

use crate::character::action::Neighbours;
use crate::character::{Character, CharacterBuilder, CharacterId};
use crate::collision::kinematic::BodyEffect;
use crate::collision::types::{ShapeId, Vec2};
use crate::collision::world::{CollisionWorld, ShapeDesc};
use crate::config::Configuration;
use crate::error::Result;
use crate::events::SimEvent;
use crate::platform::{MovingPlatform, PassengerMovement, PlatformCommand, PlatformDesc, PlatformId};
use crate::timer::{TimerQueue, frames_for};

type EffectKey = (CharacterId, BodyEffect);

pub struct Simulation {
    config: Configuration,
    world: CollisionWorld,
    platforms: Vec<MovingPlatform>,
    characters: Vec<Character>,
    by_shape: HashMap<ShapeId, usize>,
    timers: TimerQueue<EffectKey>,
    events: Vec<SimEvent>,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            world: CollisionWorld::new(),
            platforms: Vec::new(),
            characters: Vec::new(),
            by_shape: HashMap::new(),
            timers: TimerQueue::new(),
            events: Vec::new(),
            ticks: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Direct access to the world, for level geometry and tag changes.
    #[inline]
    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }

    /// Ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Adds static level geometry.
    pub fn add_static(&mut self, desc: ShapeDesc) -> ShapeId {
        self.world.insert(desc)
    }

    pub fn add_platform(&mut self, desc: PlatformDesc) -> Result<PlatformId> {
        let platform = MovingPlatform::spawn(&mut self.world, &self.config, desc)?;
        let id = PlatformId(self.platforms.len() as u32);
        log::debug!("added platform {:?} with shape {:?}", id, platform.shape());
        self.platforms.push(platform);
        Ok(id)
    }

    pub fn add_character(&mut self, builder: CharacterBuilder) -> Result<CharacterId> {
        let character = builder.build(&mut self.world, &self.config)?;
        let index = self.characters.len();
        let id = CharacterId(index as u32);
        log::debug!("added character {:?} with shape {:?}", id, character.body().shape());
        self.by_shape.insert(character.body().shape(), index);
        self.characters.push(character);
        Ok(id)
    }

    pub fn platform(&self, id: PlatformId) -> Option<&MovingPlatform> {
        self.platforms.get(id.0 as usize)
    }

    pub fn platform_mut(&mut self, id: PlatformId) -> Option<&mut MovingPlatform> {
        self.platforms.get_mut(id.0 as usize)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0 as usize)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0 as usize)
    }

    /// The character whose body owns `shape`.
    pub fn character_by_shape(&self, shape: ShapeId) -> Option<CharacterId> {
        self.by_shape.get(&shape).map(|i| CharacterId(*i as u32))
    }

    /// Sends a command to a platform. Returns false for an unknown id.
    pub fn command_platform(&mut self, id: PlatformId, command: PlatformCommand) -> bool {
        let Some(platform) = self.platforms.get_mut(id.0 as usize) else {
            return false;
        };
        platform.apply(command);
        self.collect_platform_events(id);
        true
    }

    /// One tick of the configured fixed delta.
    pub fn step(&mut self) {
        let delta = self.config.fixed_delta;
        self.tick(delta);
    }

    pub fn tick(&mut self, delta: f32) {
        // ---------------------------------------------------------------------
        // Delayed effects
        // ---------------------------------------------------------------------
        for (id, effect) in self.timers.advance() {
            if let Some(character) = self.characters.get_mut(id.0 as usize) {
                log::trace!("{:?}: {:?}", id, effect);
                character.body_mut().apply_effect(effect);
            }
        }

        // ---------------------------------------------------------------------
        // Platforms and their passengers
        // ---------------------------------------------------------------------
        for index in 0..self.platforms.len() {
            self.tick_platform(PlatformId(index as u32), delta);
        }

        // ---------------------------------------------------------------------
        // Characters
        // ---------------------------------------------------------------------
        for index in 0..self.characters.len() {
            let (before, rest) = self.characters.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                continue;
            };
            let mut neighbours = Neighbours::new(before, after);
            current.update(&mut self.world, &self.config, delta, &mut neighbours);
        }

        // ---------------------------------------------------------------------
        // Outboxes
        // ---------------------------------------------------------------------
        for (index, character) in self.characters.iter_mut().enumerate() {
            let id = CharacterId(index as u32);
            self.events
                .extend(character.drain_events().into_iter().map(|e| SimEvent::character(id, e)));
            for deferred in character.drain_deferred() {
                let ticks = frames_for(deferred.delay, self.config.fixed_delta);
                if !self.timers.arm((id, deferred.effect), ticks) {
                    log::trace!("{:?}: {:?} already scheduled", id, deferred.effect);
                }
            }
        }

        self.ticks += 1;
    }

    fn tick_platform(&mut self, id: PlatformId, delta: f32) {
        let index = id.0 as usize;
        let Some(platform) = self.platforms.get_mut(index) else {
            return;
        };
        platform.plan(&mut self.world, &self.config, delta);
        let moves = platform.passengers().to_vec();

        for movement in moves.iter().filter(|m| m.move_before_platform) {
            self.carry(movement);
        }
        let Some(platform) = self.platforms.get_mut(index) else {
            return;
        };
        platform.translate(&mut self.world);
        for movement in moves.iter().filter(|m| !m.move_before_platform) {
            self.carry(movement);
        }

        let Some(platform) = self.platforms.get_mut(index) else {
            return;
        };
        let diff = platform.finish_riders();
        for shape in diff.departed {
            if let Some(character) = self.by_shape.get(&shape).and_then(|i| self.characters.get_mut(*i)) {
                if character.platform() == Some(id) {
                    character.set_platform(None);
                }
            }
        }
        for shape in diff.present {
            if let Some(character) = self.by_shape.get(&shape).and_then(|i| self.characters.get_mut(*i)) {
                character.set_platform(Some(id));
            }
        }

        self.collect_platform_events(id);
    }

    /// Moves one passenger. Shapes no character owns stay where they are.
    fn carry(&mut self, movement: &PassengerMovement) {
        let Some(character) = self
            .by_shape
            .get(&movement.rider)
            .and_then(|i| self.characters.get_mut(*i))
        else {
            log::warn!(
                "shape {:?} is on a platform's passenger mask but no character owns it",
                movement.rider
            );
            return;
        };
        character.transport(
            &mut self.world,
            &self.config,
            movement.velocity,
            movement.standing_on_platform,
        );
    }

    fn collect_platform_events(&mut self, id: PlatformId) {
        if let Some(platform) = self.platforms.get_mut(id.0 as usize) {
            self.events
                .extend(platform.drain_events().into_iter().map(|e| SimEvent::platform(id, e)));
        }
    }

    /// Takes every event raised since the last call, in order.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Center of a character's body, straight from the world.
    pub fn character_position(&self, id: CharacterId) -> Option<Vec2> {
        self.character(id).map(|c| c.body().position(&self.world))
    }
}
