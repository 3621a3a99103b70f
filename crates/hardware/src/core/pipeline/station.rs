//! Reservation station pool.
//!
//! Stations are allocated once, at initialization, from the configured pool
//! layout and live in one flat vector. A [`StationTag`] is an index into that
//! vector; it is what the register table and waiting stations store instead
//! of a reference to the producer. It provides:
//! 1. **Allocation:** First-fit search in pool declaration order, then slot order.
//! 2. **Readiness:** A busy station with no pending tags may start executing.
//! 3. **Completion:** First station (in the same order) whose timer reached zero.
//! 4. **Broadcast fan-out:** Resolving every operand waiting on a tag.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::common::Value;
use crate::config::PoolConfig;
use crate::isa::instruction::InstructionId;
use crate::isa::opcode::Opcode;

/// Identity of a reservation station: its index in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationTag(pub usize);

impl fmt::Display for StationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RS{}", self.0)
    }
}

/// Lifecycle state of a station, derived from its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StationState {
    /// Not allocated.
    Free,
    /// Allocated, at least one operand tag outstanding.
    WaitingOperands,
    /// Operands resolved; execution starts next execute phase.
    Ready,
    /// Timer running.
    Executing,
    /// Timer at zero; waiting for the common data bus.
    Complete,
}

/// A reservation station slot.
///
/// When `busy` is `false` every other operand field is `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReservationStation {
    /// Display name, e.g. `Add2`.
    pub name: String,
    /// Index of the pool this station was allocated from.
    pub pool: usize,
    /// Whether the slot holds an instruction.
    pub busy: bool,
    /// Operation being performed.
    pub opcode: Option<Opcode>,
    /// First operand value (base register for loads/stores).
    pub vj: Option<Value>,
    /// Second operand value (store data, immediate for `ADDI`).
    pub vk: Option<Value>,
    /// Producer of the first operand, if still pending.
    pub qj: Option<StationTag>,
    /// Producer of the second operand, if still pending.
    pub qk: Option<StationTag>,
    /// Destination register; `None` for stores.
    pub dest: Option<String>,
    /// Offset at issue; effective address once execution has started.
    pub address: Option<i64>,
    /// Remaining execution cycles; `None` until execution starts.
    pub time_left: Option<u32>,
    /// Instruction occupying the slot.
    pub instruction_id: Option<InstructionId>,
}

impl ReservationStation {
    fn new(name: String, pool: usize) -> Self {
        Self {
            name,
            pool,
            busy: false,
            opcode: None,
            vj: None,
            vk: None,
            qj: None,
            qk: None,
            dest: None,
            address: None,
            time_left: None,
            instruction_id: None,
        }
    }

    /// Busy with both operands resolved.
    #[inline]
    pub const fn operands_ready(&self) -> bool {
        self.busy && self.qj.is_none() && self.qk.is_none()
    }

    /// Busy with the execution timer at zero.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.busy && self.time_left == Some(0)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StationState {
        if !self.busy {
            StationState::Free
        } else if !self.operands_ready() {
            StationState::WaitingOperands
        } else {
            match self.time_left {
                None => StationState::Ready,
                Some(0) => StationState::Complete,
                Some(_) => StationState::Executing,
            }
        }
    }

    /// Returns the slot to its free state.
    pub(crate) fn release(&mut self) {
        *self = Self::new(std::mem::take(&mut self.name), self.pool);
    }

    /// Resolves any operand waiting on `tag`. Returns how many were resolved.
    fn capture(&mut self, tag: StationTag, value: Value) -> usize {
        let mut captured = 0;
        if self.qj == Some(tag) {
            self.vj = Some(value);
            self.qj = None;
            captured += 1;
        }
        if self.qk == Some(tag) {
            self.vk = Some(value);
            self.qk = None;
            captured += 1;
        }
        captured
    }
}

/// Opcodes accepted by one pool, captured at allocation time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolLayout {
    /// Pool name.
    pub name: String,
    /// Accepted opcodes.
    pub opcodes: Vec<Opcode>,
}

/// All reservation stations of the machine.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StationPool {
    layout: Vec<PoolLayout>,
    stations: Vec<ReservationStation>,
}

impl StationPool {
    /// Allocates stations for every configured pool, in declaration order.
    pub fn allocate(pools: &[PoolConfig]) -> Self {
        let mut layout = Vec::with_capacity(pools.len());
        let mut stations = Vec::with_capacity(pools.iter().map(|p| p.count).sum());
        for (idx, pool) in pools.iter().enumerate() {
            layout.push(PoolLayout {
                name: pool.name.clone(),
                opcodes: pool.opcodes.clone(),
            });
            for name in pool.station_names() {
                stations.push(ReservationStation::new(name, idx));
            }
        }
        Self { layout, stations }
    }

    /// Number of stations across all pools.
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns `true` if no stations were allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Pool layout captured at allocation.
    pub fn layout(&self) -> &[PoolLayout] {
        &self.layout
    }

    /// First pool, in declaration order, that accepts `op`.
    pub fn pool_for(&self, op: Opcode) -> Option<usize> {
        self.layout.iter().position(|p| p.opcodes.contains(&op))
    }

    /// First free station in the first pool that accepts `op`.
    ///
    /// Later pools accepting `op` are never tried; a full pool is a stall.
    pub fn find_free(&self, op: Opcode) -> Option<StationTag> {
        let pool = self.pool_for(op)?;
        self.stations
            .iter()
            .position(|rs| rs.pool == pool && !rs.busy)
            .map(StationTag)
    }

    /// First station whose execution has completed.
    pub fn first_complete(&self) -> Option<StationTag> {
        self.stations
            .iter()
            .position(ReservationStation::is_complete)
            .map(StationTag)
    }

    /// Number of stations waiting for the common data bus.
    pub fn complete_count(&self) -> usize {
        self.stations.iter().filter(|rs| rs.is_complete()).count()
    }

    /// Returns `true` when every station is free.
    pub fn is_idle(&self) -> bool {
        self.stations.iter().all(|rs| !rs.busy)
    }

    /// Looks up a station.
    pub fn get(&self, tag: StationTag) -> Option<&ReservationStation> {
        self.stations.get(tag.0)
    }

    /// Name of the station behind `tag`, or `"?"` for a dangling tag.
    pub fn name(&self, tag: StationTag) -> &str {
        self.get(tag).map_or("?", |rs| rs.name.as_str())
    }

    /// Looks up a station by display name.
    ///
    /// Names are unique for any configuration that passed
    /// [`Config::validate`](crate::config::Config::validate).
    pub fn by_name(&self, name: &str) -> Option<&ReservationStation> {
        self.stations.iter().find(|rs| rs.name == name)
    }

    /// Delivers a broadcast value to every operand waiting on `tag`.
    ///
    /// Returns the number of operands resolved.
    pub fn broadcast(&mut self, tag: StationTag, value: Value) -> usize {
        self.stations
            .iter_mut()
            .map(|rs| rs.capture(tag, value))
            .sum()
    }

    /// Iterates stations with their tags.
    pub fn iter(&self) -> impl Iterator<Item = (StationTag, &ReservationStation)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, rs)| (StationTag(i), rs))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ReservationStation> {
        self.stations.iter_mut()
    }
}

impl Index<StationTag> for StationPool {
    type Output = ReservationStation;

    fn index(&self, tag: StationTag) -> &Self::Output {
        &self.stations[tag.0]
    }
}

impl IndexMut<StationTag> for StationPool {
    fn index_mut(&mut self, tag: StationTag) -> &mut Self::Output {
        &mut self.stations[tag.0]
    }
}
