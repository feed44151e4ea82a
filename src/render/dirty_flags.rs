use bitflags::bitflags;

bitflags! {
    /// Flags to track which parts of the screen need re-rendering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u32 {
        /// Nothing needs rendering
        const NONE = 0;
        /// Sidebar controls (focus, cursor, checked options)
        const SIDEBAR = 0b0000_0001;
        /// Main page (cards, charts, table, notices)
        const PAGE = 0b0000_0010;
        /// Help popup
        const POPUP_HELP = 0b0000_0100;
        /// Footer status and loading indicator
        const STATUS = 0b0000_1000;
        /// Full redraw
        const ALL = 0xFFFF_FFFF;
    }
}

impl DirtyFlags {
    /// Check if any component needs rendering
    #[inline]
    pub fn needs_render(self) -> bool {
        !self.is_empty()
    }

    /// Mark components touched by a control change
    #[inline]
    #[must_use]
    pub fn mark_control_change(mut self) -> Self {
        self.insert(Self::SIDEBAR | Self::STATUS);
        self
    }

    /// Mark components touched by a finished render pass
    #[inline]
    #[must_use]
    pub fn mark_pass_finished(mut self) -> Self {
        self.insert(Self::PAGE | Self::STATUS);
        self
    }
}

/// Tracks which components need updates and how often drawing was skipped
#[derive(Debug)]
pub struct RenderState {
    dirty: DirtyFlags,
    render_count: u64,
    skip_count: u64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlags::NONE,
            render_count: 0,
            skip_count: 0,
        }
    }

    #[inline]
    pub fn needs_render(&self) -> bool {
        self.dirty.needs_render()
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
    }

    #[inline]
    pub fn mark_all_dirty(&mut self) {
        self.dirty = DirtyFlags::ALL;
    }

    /// Clear all dirty flags after a successful draw
    #[inline]
    pub fn clear(&mut self) {
        self.dirty = DirtyFlags::NONE;
        self.render_count += 1;
    }

    #[inline]
    pub fn skip(&mut self) {
        self.skip_count += 1;
    }

    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Percentage of ticks that drew nothing
    pub fn efficiency(&self) -> f64 {
        let total = self.render_count + self.skip_count;
        if total == 0 {
            0.0
        } else {
            (self.skip_count as f64 / total as f64) * 100.0
        }
    }

    pub fn stats(&self) -> String {
        format!(
            "renders: {}, skipped: {}, skip rate: {:.1}%",
            self.render_count,
            self.skip_count,
            self.efficiency()
        )
    }
}
