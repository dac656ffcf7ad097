// Debug UI contract
//
// The teacher embeds the debugger in an egui render loop; the core crate
// only specifies the shape of that integration (per SPEC_FULL.md's
// collaborator-contract section), it does not drive a real GUI backend.
// An embedding application assembles a `DebugSnapshot` each frame and
// hands it to its own `DebugPanel` implementation (egui, a TUI, whatever
// fits), rather than the core opening a window itself.

use super::{CpuState, PpuState, TraceEntry};

/// Point-in-time debug state handed from the embedding application to a
/// `DebugPanel` implementation.
#[derive(Debug, Clone)]
pub struct DebugSnapshot {
    /// CPU register/cycle snapshot
    pub cpu: CpuState,

    /// PPU timing/register snapshot
    pub ppu: PpuState,

    /// Currently armed CPU breakpoints
    pub breakpoints: Vec<u16>,

    /// Whether execution is currently paused
    pub paused: bool,

    /// Most recent trace log entries, newest last
    pub recent_trace: Vec<TraceEntry>,
}

/// Contract for rendering a [`DebugSnapshot`] into a concrete UI. No
/// implementation ships with the core; embedding it in egui, a terminal
/// UI, or any other backend is a collaborator concern.
pub trait DebugPanel {
    /// Render one frame of debug UI from the given snapshot.
    fn render(&mut self, snapshot: &DebugSnapshot);
}

/// Minimal toggle-state a `DebugPanel` implementation typically needs to
/// track which windows are open; kept here since it carries no backend
/// dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugPanelVisibility {
    pub cpu: bool,
    pub memory: bool,
    pub ppu: bool,
    pub disassembly: bool,
    pub execution_log: bool,
}

impl Default for DebugPanelVisibility {
    fn default() -> Self {
        Self {
            cpu: true,
            memory: true,
            ppu: true,
            disassembly: true,
            execution_log: true,
        }
    }
}
