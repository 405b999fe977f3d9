use super::{PhaseState, TransformationPhase};

/// The group used when no group index is specified
pub const DEFAULT_GROUP: i32 = 0;

/// The ordering index of the first phase added without an explicit index
pub const DEFAULT_INDEX: i32 = 1;

/// A phase together with its scheduling position
pub struct PhaseEntry<J> {
    pub(crate) phase: Box<dyn TransformationPhase<J>>,
    pub(crate) index: i32,
    pub(crate) group: i32,
    pub(crate) state: PhaseState,
}

impl<J> PhaseEntry<J> {
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn group(&self) -> i32 {
        self.group
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }
}

type ResetHook<J> = Box<dyn FnMut(&mut J)>;

/// An ordered bundle of phases sharing per-run job state.
///
/// Phases are scheduled by `(index, group)`; equal positions fuse walk phases into
/// one traversal. The default counter assigns ascending indices starting at
/// [DEFAULT_INDEX]; [Transformation::add_concurrent_phase] re-uses the previous
/// position so the new phase runs alongside the previous one.
pub struct Transformation<J> {
    pub(crate) registry: Vec<PhaseEntry<J>>,
    next_phase_index: i32,
    default_group: i32,
    reset_hooks: Vec<ResetHook<J>>,
}

impl<J> Default for Transformation<J> {
    fn default() -> Self {
        Self {
            registry: Vec::new(),
            next_phase_index: DEFAULT_INDEX,
            default_group: DEFAULT_GROUP,
            reset_hooks: Vec::new(),
        }
    }
}

impl<J> Transformation<J> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stateless transformation around a single phase
    pub fn with_phase(phase: impl TransformationPhase<J> + 'static) -> Self {
        let mut transformation = Self::new();
        transformation.add_phase(phase);
        transformation
    }

    /// Override the group used for phases added without an explicit one
    pub fn set_default_group(&mut self, group: i32) {
        self.default_group = group;
    }

    /// Append a phase at the next counter position
    pub fn add_phase(&mut self, phase: impl TransformationPhase<J> + 'static) {
        let index = self.next_phase_index;
        self.next_phase_index += 1;
        self.add_phase_at(index, phase);
    }

    /// Add a phase at an explicit index in the default group
    pub fn add_phase_at(&mut self, index: i32, phase: impl TransformationPhase<J> + 'static) {
        self.add_phase_in(index, self.default_group, phase);
    }

    /// Add a phase at an explicit index and group
    pub fn add_phase_in(
        &mut self,
        index: i32,
        group: i32,
        phase: impl TransformationPhase<J> + 'static,
    ) {
        self.registry.push(PhaseEntry {
            phase: Box::new(phase),
            index,
            group,
            state: PhaseState::Created,
        });
    }

    /// Add a phase at the previous counter position, without advancing the counter,
    /// so it fuses with the previously added phase
    pub fn add_concurrent_phase(&mut self, phase: impl TransformationPhase<J> + 'static) {
        self.add_phase_at(DEFAULT_INDEX.max(self.next_phase_index - 1), phase);
    }

    /// Register a hook run before each transformation run to (re-)initialize
    /// inter-phase state
    pub fn on_reset(&mut self, hook: impl FnMut(&mut J) + 'static) {
        self.reset_hooks.push(Box::new(hook));
    }

    /// Import another transformation's entries verbatim; they interleave with this
    /// one's according to their indices and groups
    pub fn merge(&mut self, other: Transformation<J>) {
        self.registry.extend(other.registry);
        self.reset_hooks.extend(other.reset_hooks);
    }

    /// Import another transformation's entries after this one's: indices shift by
    /// the current next index, groups stay unchanged, and the counter advances past
    /// the appended tail
    pub fn append(&mut self, other: Transformation<J>) {
        let offset = self.next_phase_index - 1;
        let mut max_index = i32::MIN;
        for mut entry in other.registry {
            entry.index += offset;
            max_index = max_index.max(entry.index);
            self.registry.push(entry);
        }
        if max_index > i32::MIN {
            self.next_phase_index = max_index + 1;
        }
        self.reset_hooks.extend(other.reset_hooks);
    }

    /// The scheduling positions of the registered entries, in registration order
    pub fn schedule(&self) -> Vec<(i32, i32)> {
        self.registry
            .iter()
            .map(|entry| (entry.index, entry.group))
            .collect()
    }

    pub(crate) fn reset_state(&mut self, job: &mut J) {
        for hook in &mut self.reset_hooks {
            hook(job);
        }
    }
}
