// Fixed-capacity particle arena shared by cursor sparks and hero ambience.
//
// Slots are addressed by index and recycled through a free list, so a full
// frame step touches at most `capacity` slots and never allocates.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Spark,
    Ambient,
}

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub age: f32,
    pub life: f32,
    /// Per-second exponential velocity drag.
    pub drag: f32,
    serial: u64,
}

impl Particle {
    /// Opacity decays linearly over the particle's life.
    #[inline]
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.life.max(1e-3)).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpawnParams {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub drag: f32,
}

#[derive(Debug)]
pub struct ParticlePool {
    slots: Vec<Option<Particle>>,
    free: Vec<usize>,
    next_serial: u64,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            // pop() hands out low indices first
            free: (0..capacity).rev().collect(),
            next_serial: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns the slot index used. When the pool is full the oldest live
    /// particle is overwritten.
    pub fn spawn(&mut self, p: SpawnParams) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let index = match self.free.pop() {
            Some(i) => i,
            None => self.oldest_slot()?,
        };
        self.slots[index] = Some(Particle {
            kind: p.kind,
            pos: p.pos,
            vel: p.vel,
            size: p.size,
            age: 0.0,
            life: p.life,
            drag: p.drag,
            serial: self.next_serial,
        });
        self.next_serial += 1;
        Some(index)
    }

    fn oldest_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p.serial)))
            .min_by_key(|(_, serial)| *serial)
            .map(|(i, _)| i)
    }

    pub fn step(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let expired = match slot {
                Some(p) => {
                    p.age += dt;
                    p.vel *= (-p.drag * dt).exp();
                    p.pos += p.vel * dt;
                    p.age >= p.life
                }
                None => false,
            };
            if expired {
                *slot = None;
                self.free.push(i);
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    pub fn clear(&mut self) {
        for s in &mut self.slots {
            *s = None;
        }
        self.free = (0..self.slots.len()).rev().collect();
    }
}
