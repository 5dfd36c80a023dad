//! Drill tool selection and usage accounting
//!
//! Per-job state: the tool-change latch that keeps redundant tool-select
//! directives out of the drill file, and the per-tool hole counters read
//! once by the report trailer. Both start fresh with every job.

use crate::catalog::{self, DrillSize, TOOL_COUNT};

#[derive(Debug)]
pub struct ToolSelector {
    current: Option<usize>,
    counts: [u32; TOOL_COUNT + 1],
}

impl ToolSelector {
    pub fn new() -> Self {
        Self {
            current: None,
            counts: [0; TOOL_COUNT + 1],
        }
    }

    /// Resolve a hole radius to its catalog row. The returned flag is true
    /// when the physical tool differs from the previously selected one and
    /// a tool-change directive must be emitted.
    pub fn select(&mut self, fig_radius: i32) -> (&'static DrillSize, bool) {
        let size = catalog::drill_size(fig_radius);
        let changed = self.current != Some(size.tool);
        self.current = Some(size.tool);
        (size, changed)
    }

    /// Count one hole against the tool resolved for this radius.
    pub fn record_usage(&mut self, fig_radius: i32) {
        let size = catalog::drill_size(fig_radius);
        self.counts[size.tool] += 1;
    }

    /// Tools with at least one hole, in tool order.
    pub fn usage(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, &count)| count > 0)
            .map(|(tool, &count)| (tool, count))
    }
}

impl Default for ToolSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_change_only_on_different_tool() {
        let mut tools = ToolSelector::new();
        let (size, changed) = tools.select(65);
        assert_eq!(size.tool, 1);
        assert!(changed);
        // same radius: no change
        assert!(!tools.select(65).1);
        // different radius, different tool
        let (size, changed) = tools.select(66);
        assert_eq!(size.tool, 2);
        assert!(changed);
        // back to the first tool
        assert!(tools.select(65).1);
    }

    #[test]
    fn shared_tool_radii_do_not_retrigger_selection() {
        let mut tools = ToolSelector::new();
        assert!(tools.select(83).1);
        // radius 99 maps to the same physical tool
        assert!(!tools.select(99).1);
    }

    #[test]
    fn unknown_radius_counts_against_default_tool() {
        let mut tools = ToolSelector::new();
        tools.record_usage(9999);
        tools.record_usage(65);
        tools.record_usage(66);
        let usage: Vec<_> = tools.usage().collect();
        assert_eq!(usage, vec![(1, 2), (2, 1)]);
    }
}
