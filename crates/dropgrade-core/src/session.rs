//! A single interactive question session.
//!
//! The session owns one task definition and one placement store, and drives
//! grading, the check button cycle, and drag gestures. Nothing is shared
//! between sessions: two questions on the same page are two sessions with
//! distinct [`InstanceId`]s.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::acceptance::AcceptanceResolver;
use crate::gesture::{DragGesture, GestureOutcome};
use crate::grading::{grade, GradeOutcome};
use crate::model::{ElementId, Position, TaskDefinition, ZoneId};
use crate::placement::PlacementStore;
use crate::report::GradeReport;
use crate::traits::PresentationShell;

/// Identity of one question session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the check button currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckButton {
    ShowScore,
    TryAgain,
    /// Graded with retries disabled; the button is gone.
    Hidden,
}

/// One learner's interaction with one task.
#[derive(Debug)]
pub struct QuestionSession {
    instance: InstanceId,
    task: TaskDefinition,
    store: PlacementStore,
    /// Verdicts currently on screen. `None` until graded, and after a reset.
    solutions: Option<GradeOutcome>,
    button: CheckButton,
}

/// A clone is a separate question: it copies task, placements and verdicts
/// but gets its own [`InstanceId`].
impl Clone for QuestionSession {
    fn clone(&self) -> Self {
        Self {
            instance: InstanceId::new(),
            task: self.task.clone(),
            store: self.store.clone(),
            solutions: self.solutions.clone(),
            button: self.button,
        }
    }
}

impl QuestionSession {
    pub fn new(task: TaskDefinition) -> Self {
        Self {
            instance: InstanceId::new(),
            task,
            store: PlacementStore::new(),
            solutions: None,
            button: CheckButton::ShowScore,
        }
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn task(&self) -> &TaskDefinition {
        &self.task
    }

    pub fn placements(&self) -> &PlacementStore {
        &self.store
    }

    pub fn check_button(&self) -> CheckButton {
        self.button
    }

    /// True while verdicts are shown; placements are frozen in that state.
    pub fn showing_solutions(&self) -> bool {
        self.solutions.is_some()
    }

    pub fn resolver(&self) -> AcceptanceResolver<'_> {
        AcceptanceResolver::new(&self.task)
    }

    pub fn is_acceptable(&self, element: ElementId, zone: ZoneId) -> bool {
        self.resolver().is_acceptable(element, zone)
    }

    /// Place `element` in `zone` if the pairing is acceptable.
    ///
    /// Returns whether the placement was recorded. Ignored while solutions
    /// are shown.
    pub fn place(&mut self, element: ElementId, zone: ZoneId) -> bool {
        if self.showing_solutions() {
            tracing::debug!("ignoring placement of element {element}: solutions shown");
            return false;
        }
        if !self.is_acceptable(element, zone) {
            tracing::debug!("element {element} is not accepted by zone {zone}");
            return false;
        }
        self.store.place(element, zone);
        true
    }

    /// Take `element` out of whatever zone it is in.
    pub fn remove(&mut self, element: ElementId) {
        if self.showing_solutions() {
            tracing::debug!("ignoring removal of element {element}: solutions shown");
            return;
        }
        self.store.remove(element);
    }

    pub fn zone_of(&self, element: ElementId) -> Option<ZoneId> {
        self.store.zone_of(element)
    }

    /// Empty every zone. Ignored while solutions are shown.
    pub fn clear_all(&mut self) {
        if self.showing_solutions() {
            tracing::debug!("ignoring clear of session {}: solutions shown", self.instance);
            return;
        }
        self.store.clear_all();
    }

    /// Grade the current placements without touching the shell.
    pub fn grade(&self) -> GradeOutcome {
        grade(&self.task, &self.store)
    }

    /// Grade, paint the verdicts, and lock every gradeable element.
    ///
    /// An unplaced distractor earns its point but has no zone to paint, so
    /// the shell gets no mark for it.
    pub fn show_solutions(&mut self, shell: &mut dyn PresentationShell) -> GradeReport {
        let outcome = self.grade();

        for (element, verdict) in &outcome.verdicts {
            shell.set_drag_enabled(*element, false);
            if verdict.is_correct() && self.store.zone_of(*element).is_none() {
                continue;
            }
            shell.mark_verdict(*element, *verdict);
        }

        tracing::debug!(
            "session {}: {}/{} points",
            self.instance,
            outcome.score.points,
            outcome.score.max_score
        );

        let report = GradeReport::new(self.instance, self.task.title(), &outcome, &self.store);
        self.solutions = Some(outcome);
        report
    }

    /// Clear verdict markings and re-enable dragging ("try again").
    ///
    /// Placements are kept unless the task asks for a full reset on retry.
    pub fn hide_solutions(&mut self, shell: &mut dyn PresentationShell) {
        for element in self.task.gradeable_elements() {
            shell.clear_verdict(element.id);
            shell.set_drag_enabled(element.id, true);
        }
        self.solutions = None;

        if self.task.behaviour().reset_placements_on_retry {
            self.store.clear_all();
        }
    }

    /// Points from the last grading pass, or `None` if not graded since the
    /// last reset.
    pub fn score(&self) -> Option<u32> {
        self.solutions.as_ref().map(|o| o.score.points)
    }

    pub fn max_score(&self) -> u32 {
        self.task.max_score()
    }

    /// Activate the check button and return what it offers next.
    pub fn press_check_button(&mut self, shell: &mut dyn PresentationShell) -> CheckButton {
        self.button = match self.button {
            CheckButton::ShowScore => {
                self.show_solutions(shell);
                if self.task.behaviour().try_again {
                    CheckButton::TryAgain
                } else {
                    CheckButton::Hidden
                }
            }
            CheckButton::TryAgain => {
                self.hide_solutions(shell);
                CheckButton::ShowScore
            }
            CheckButton::Hidden => CheckButton::Hidden,
        };
        self.button
    }

    /// Start dragging `element`.
    ///
    /// Returns `None` for static or unknown elements and while solutions are
    /// shown.
    pub fn begin_drag(&self, element: ElementId) -> Option<DragGesture> {
        if self.showing_solutions() {
            tracing::debug!("drag of element {element} refused: solutions shown");
            return None;
        }
        let draggable = self.task.element(element).is_some_and(|e| e.is_gradeable());
        if !draggable {
            return None;
        }
        Some(DragGesture::start(
            self.instance,
            element,
            self.store.zone_of(element),
        ))
    }

    /// Finish a drag, applying its final outcome to the placement store.
    ///
    /// A drop over an acceptable zone places the element there. Anything
    /// else reverts it: the element leaves its zone. Gestures started by a
    /// different session, or finished while solutions are shown, revert
    /// without touching this session's store.
    pub fn finish_drag(
        &mut self,
        gesture: DragGesture,
        position: Option<Position>,
    ) -> GestureOutcome {
        let element = gesture.element();

        if gesture.instance() != self.instance {
            tracing::warn!(
                "session {} ignoring drop of element {element} from session {}",
                self.instance,
                gesture.instance()
            );
            return GestureOutcome::Reverted {
                element,
                from: gesture.origin(),
            };
        }

        let target = gesture
            .hovered()
            .filter(|zone| self.is_acceptable(element, *zone));

        match target {
            Some(zone) if !self.showing_solutions() => {
                match position {
                    Some(position) => self.store.place_at(element, zone, position),
                    None => self.store.place(element, zone),
                }
                GestureOutcome::Accepted {
                    element,
                    zone,
                    position,
                }
            }
            _ => {
                if !self.showing_solutions() {
                    self.store.remove(element);
                }
                tracing::debug!("drag of element {element} reverted");
                GestureOutcome::Reverted {
                    element,
                    from: gesture.origin(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Verdict;
    use crate::model::Behaviour;
    use crate::traits::NoopShell;
    use std::collections::HashMap;

    /// Shell that remembers the last instruction per element.
    #[derive(Default)]
    struct RecordingShell {
        marks: HashMap<ElementId, Verdict>,
        enabled: HashMap<ElementId, bool>,
    }

    impl PresentationShell for RecordingShell {
        fn mark_verdict(&mut self, element: ElementId, verdict: Verdict) {
            self.marks.insert(element, verdict);
        }

        fn clear_verdict(&mut self, element: ElementId) {
            self.marks.remove(&element);
        }

        fn set_drag_enabled(&mut self, element: ElementId, enabled: bool) {
            self.enabled.insert(element, enabled);
        }
    }

    fn scenario_task(behaviour: Behaviour) -> TaskDefinition {
        TaskDefinition::builder()
            .drop_zone([0])
            .drop_zone([1])
            .draggable([0, 1])
            .draggable([0, 1])
            .static_element()
            .behaviour(behaviour)
            .build()
            .unwrap()
    }

    #[test]
    fn show_solutions_marks_and_locks() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        assert!(session.place(ElementId(0), ZoneId(0)));
        assert!(session.place(ElementId(1), ZoneId(0)));

        let mut shell = RecordingShell::default();
        let report = session.show_solutions(&mut shell);

        assert_eq!(report.score.points, 1);
        assert_eq!(report.score.max_score, 2);
        assert_eq!(session.score(), Some(1));
        assert_eq!(shell.marks[&ElementId(0)], Verdict::Correct);
        assert_eq!(shell.marks[&ElementId(1)], Verdict::Incorrect);
        assert!(!shell.marks.contains_key(&ElementId(2)));
        assert!(!shell.enabled[&ElementId(0)]);
        assert!(!shell.enabled[&ElementId(1)]);
    }

    #[test]
    fn hide_solutions_resets_score_and_keeps_placements() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        session.place(ElementId(0), ZoneId(0));

        let mut shell = RecordingShell::default();
        session.show_solutions(&mut shell);
        session.hide_solutions(&mut shell);

        assert_eq!(session.score(), None);
        assert!(shell.marks.is_empty());
        assert!(shell.enabled.values().all(|e| *e));
        assert_eq!(session.zone_of(ElementId(0)), Some(ZoneId(0)));

        session.show_solutions(&mut shell);
        assert_eq!(session.score(), Some(1));
    }

    #[test]
    fn retry_can_reset_placements() {
        let behaviour = Behaviour {
            try_again: true,
            reset_placements_on_retry: true,
        };
        let mut session = QuestionSession::new(scenario_task(behaviour));
        session.place(ElementId(0), ZoneId(0));
        session.show_solutions(&mut NoopShell);
        session.hide_solutions(&mut NoopShell);
        assert!(session.placements().is_empty());
    }

    #[test]
    fn score_absent_is_distinct_from_zero() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        assert_eq!(session.score(), None);
        session.show_solutions(&mut NoopShell);
        assert_eq!(session.score(), Some(0));
        assert_eq!(session.max_score(), 2);
    }

    #[test]
    fn place_rejects_unacceptable_pairing() {
        let task = TaskDefinition::builder()
            .drop_zone([0])
            .drop_zone([])
            .draggable([0])
            .static_element()
            .build()
            .unwrap();
        let mut session = QuestionSession::new(task);
        assert!(!session.place(ElementId(0), ZoneId(1)));
        assert!(!session.place(ElementId(1), ZoneId(0)));
        assert!(!session.place(ElementId(8), ZoneId(0)));
        assert!(session.placements().is_empty());
    }

    #[test]
    fn placements_frozen_while_solutions_shown() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        session.place(ElementId(0), ZoneId(0));
        session.show_solutions(&mut NoopShell);

        assert!(!session.place(ElementId(1), ZoneId(1)));
        session.remove(ElementId(0));
        assert_eq!(session.zone_of(ElementId(0)), Some(ZoneId(0)));
        assert!(session.begin_drag(ElementId(0)).is_none());
    }

    #[test]
    fn check_button_cycles() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        assert_eq!(session.check_button(), CheckButton::ShowScore);
        assert_eq!(session.press_check_button(&mut NoopShell), CheckButton::TryAgain);
        assert!(session.showing_solutions());
        assert_eq!(session.press_check_button(&mut NoopShell), CheckButton::ShowScore);
        assert_eq!(session.score(), None);
    }

    #[test]
    fn check_button_hides_without_retry() {
        let behaviour = Behaviour {
            try_again: false,
            reset_placements_on_retry: false,
        };
        let mut session = QuestionSession::new(scenario_task(behaviour));
        assert_eq!(session.press_check_button(&mut NoopShell), CheckButton::Hidden);
        assert_eq!(session.press_check_button(&mut NoopShell), CheckButton::Hidden);
        assert!(session.showing_solutions());
    }

    #[test]
    fn drag_onto_acceptable_zone_places() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        let mut gesture = session.begin_drag(ElementId(0)).unwrap();
        gesture.enter(ZoneId(1));
        let position = Position {
            top: 10.0,
            left: 20.0,
        };

        let outcome = session.finish_drag(gesture, Some(position));
        assert_eq!(
            outcome,
            GestureOutcome::Accepted {
                element: ElementId(0),
                zone: ZoneId(1),
                position: Some(position),
            }
        );
        assert_eq!(session.zone_of(ElementId(0)), Some(ZoneId(1)));
        assert_eq!(
            session.placements().get(ElementId(0)).unwrap().position,
            Some(position)
        );
    }

    #[test]
    fn drag_outside_any_zone_reverts_and_unplaces() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        session.place(ElementId(1), ZoneId(0));

        let gesture = session.begin_drag(ElementId(1)).unwrap();
        assert_eq!(gesture.origin(), Some(ZoneId(0)));
        let outcome = session.finish_drag(gesture, None);

        assert_eq!(
            outcome,
            GestureOutcome::Reverted {
                element: ElementId(1),
                from: Some(ZoneId(0)),
            }
        );
        assert_eq!(session.zone_of(ElementId(1)), None);
    }

    #[test]
    fn drag_onto_unlisted_zone_reverts() {
        let task = TaskDefinition::builder()
            .drop_zone([0])
            .drop_zone([])
            .draggable([0])
            .build()
            .unwrap();
        let mut session = QuestionSession::new(task);
        let mut gesture = session.begin_drag(ElementId(0)).unwrap();
        gesture.enter(ZoneId(1));
        let outcome = session.finish_drag(gesture, None);
        assert!(matches!(outcome, GestureOutcome::Reverted { .. }));
        assert_eq!(session.zone_of(ElementId(0)), None);
    }

    #[test]
    fn static_elements_cannot_be_dragged() {
        let session = QuestionSession::new(scenario_task(Behaviour::default()));
        assert!(session.begin_drag(ElementId(2)).is_none());
        assert!(session.begin_drag(ElementId(42)).is_none());
    }

    #[test]
    fn gestures_do_not_cross_sessions() {
        let first = QuestionSession::new(scenario_task(Behaviour::default()));
        let mut second = QuestionSession::new(scenario_task(Behaviour::default()));
        assert_ne!(first.instance(), second.instance());

        second.place(ElementId(0), ZoneId(0));
        let mut gesture = first.begin_drag(ElementId(0)).unwrap();
        gesture.enter(ZoneId(1));

        let outcome = second.finish_drag(gesture, None);
        assert!(matches!(outcome, GestureOutcome::Reverted { .. }));
        assert_eq!(second.zone_of(ElementId(0)), Some(ZoneId(0)));
        assert!(first.placements().is_empty());
    }

    #[test]
    fn cloned_session_is_a_separate_instance() {
        let mut first = QuestionSession::new(scenario_task(Behaviour::default()));
        first.place(ElementId(1), ZoneId(0));
        let mut second = first.clone();
        assert_ne!(first.instance(), second.instance());
        assert_eq!(second.zone_of(ElementId(1)), Some(ZoneId(0)));

        let mut gesture = first.begin_drag(ElementId(0)).unwrap();
        gesture.enter(ZoneId(1));
        let outcome = second.finish_drag(gesture, None);

        assert!(matches!(outcome, GestureOutcome::Reverted { .. }));
        assert_eq!(second.zone_of(ElementId(0)), None);
    }

    #[test]
    fn clear_all_ignored_while_solutions_shown() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        session.place(ElementId(0), ZoneId(0));
        session.show_solutions(&mut NoopShell);

        session.clear_all();
        assert_eq!(session.zone_of(ElementId(0)), Some(ZoneId(0)));
        assert_eq!(session.score(), Some(session.grade().score.points));

        session.hide_solutions(&mut NoopShell);
        session.clear_all();
        assert!(session.placements().is_empty());
    }

    #[test]
    fn unplaced_distractor_is_scored_but_not_marked() {
        let task = TaskDefinition::builder()
            .drop_zone([0])
            .draggable([0])
            .draggable([0])
            .build()
            .unwrap();
        let mut session = QuestionSession::new(task);
        let mut shell = RecordingShell::default();
        let report = session.show_solutions(&mut shell);

        assert_eq!(report.score.points, 1);
        assert_eq!(shell.marks[&ElementId(0)], Verdict::Incorrect);
        assert!(!shell.marks.contains_key(&ElementId(1)));
        assert!(!shell.enabled[&ElementId(1)]);
    }

    #[test]
    fn gesture_finished_after_grading_keeps_placement() {
        let mut session = QuestionSession::new(scenario_task(Behaviour::default()));
        session.place(ElementId(0), ZoneId(0));
        let mut gesture = session.begin_drag(ElementId(0)).unwrap();
        gesture.enter(ZoneId(1));
        session.show_solutions(&mut NoopShell);

        let outcome = session.finish_drag(gesture, None);
        assert_eq!(
            outcome,
            GestureOutcome::Reverted {
                element: ElementId(0),
                from: Some(ZoneId(0)),
            }
        );
        assert_eq!(session.zone_of(ElementId(0)), Some(ZoneId(0)));
    }
}
