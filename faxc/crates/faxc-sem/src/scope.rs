//! The binder's lexical binding environment (§3.5, §4.4): a stack of
//! frames, each holding two disjoint namespaces — values (variables,
//! functions, aliases, structures, enumerations) and labels — so a loop
//! label and a variable may share spelling without colliding.

use crate::types::Type;
use faxc_util::Symbol;
use std::collections::HashMap;

/// What a name in the value namespace refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Alias,
    Struct,
    Enum,
}

/// A resolved entry in the value namespace, as described by §3.5.
#[derive(Debug, Clone)]
pub struct SymbolDescriptor {
    pub kind: SymbolKind,
    pub ty: Type,
    pub mutable: bool,
    pub block_index: u32,
}

/// Raised by [`ScopeStack::declare`] when a name is already bound in the
/// current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redeclaration;

struct Frame {
    values: HashMap<Symbol, SymbolDescriptor>,
    labels: HashMap<Symbol, (u32, usize)>,
}

impl Frame {
    fn new() -> Self {
        Frame {
            values: HashMap::new(),
            labels: HashMap::new(),
        }
    }
}

/// The binder's scope stack. Lookup walks frames top-to-bottom; the first
/// hit wins, implementing lexical shadowing.
pub struct ScopeStack {
    frames: Vec<Frame>,
    /// Monotonic counter handed out to each statement that can be a
    /// `break`/`continue`/`jump` target, independent of frame depth.
    next_block_index: u32,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Frame::new()],
            next_block_index: 0,
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn pop_frame(&mut self) {
        // The outermost frame is the program-level frame and is never
        // popped; binder code is expected to balance its own pushes.
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Hands out the next unique block-index, used by the binder to tag
    /// labelable statements as they're emitted (§4.4).
    pub fn next_block_index(&mut self) -> u32 {
        let idx = self.next_block_index;
        self.next_block_index += 1;
        idx
    }

    pub fn declare(&mut self, name: Symbol, descriptor: SymbolDescriptor) -> Result<(), Redeclaration> {
        let frame = self.frames.last_mut().expect("scope stack is never empty");
        if frame.values.contains_key(&name) {
            return Err(Redeclaration);
        }
        frame.values.insert(name, descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: Symbol) -> Option<&SymbolDescriptor> {
        for frame in self.frames.iter().rev() {
            if let Some(descriptor) = frame.values.get(&name) {
                return Some(descriptor);
            }
        }
        None
    }

    /// Mutates the mutability flag on an existing binding in-place;
    /// unused by the current rule set but kept symmetrical with
    /// `declare`/`lookup` for a descriptor-adjusting pass to use.
    pub fn lookup_mut(&mut self, name: Symbol) -> Option<&mut SymbolDescriptor> {
        for frame in self.frames.iter_mut().rev() {
            if let Some(descriptor) = frame.values.get_mut(&name) {
                return Some(descriptor);
            }
        }
        None
    }

    /// Declares a label in the current frame's separate label namespace.
    pub fn declare_label(&mut self, name: Symbol, block_index: u32) -> Result<(), Redeclaration> {
        let depth = self.frames.len();
        let frame = self.frames.last_mut().expect("scope stack is never empty");
        if frame.labels.contains_key(&name) {
            return Err(Redeclaration);
        }
        frame.labels.insert(name, (block_index, depth));
        Ok(())
    }

    /// Looks up a label by name, returning its `(block-index, scope-depth)`.
    pub fn lookup_label(&self, name: Symbol) -> Option<(u32, usize)> {
        for frame in self.frames.iter().rev() {
            if let Some(entry) = frame.labels.get(&name) {
                return Some(*entry);
            }
        }
        None
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
