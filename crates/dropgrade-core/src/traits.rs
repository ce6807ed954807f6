//! The boundary between the grading core and whatever draws the question.
//!
//! The core never renders anything. After a grading pass, or when solutions
//! are hidden again, it tells a [`PresentationShell`] what to paint and which
//! elements may still be dragged.

use crate::grading::Verdict;
use crate::model::ElementId;

// ---------------------------------------------------------------------------
// Presentation shell trait
// ---------------------------------------------------------------------------

/// Rendering and gesture layer driven by a question session.
pub trait PresentationShell {
    /// Show `verdict` on `element`.
    fn mark_verdict(&mut self, element: ElementId, verdict: Verdict);

    /// Remove any verdict marking from `element`.
    fn clear_verdict(&mut self, element: ElementId);

    /// Allow or forbid dragging `element`.
    fn set_drag_enabled(&mut self, element: ElementId, enabled: bool);
}

/// Shell that ignores every instruction. Useful for headless grading.
pub struct NoopShell;

impl PresentationShell for NoopShell {
    fn mark_verdict(&mut self, _: ElementId, _: Verdict) {}
    fn clear_verdict(&mut self, _: ElementId) {}
    fn set_drag_enabled(&mut self, _: ElementId, _: bool) {}
}
