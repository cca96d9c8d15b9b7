//! The two-click selection cycle.
//!
//! [`transition`] is a pure function over the current step, the configured
//! forced endpoint, the incoming pick and the current range. It decides which
//! endpoint moves; ordering is left to [`normalize`](crate::normalize).

use crate::{CalendarDate, DateRange, Endpoint, Endpoints, SelectionStep};

/// A single user action on the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pick {
    /// One day clicked on a calendar panel
    Date(CalendarDate),
    /// A complete pair chosen at once, e.g. from a preset menu
    Range(Endpoints),
}

impl From<CalendarDate> for Pick {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<Endpoints> for Pick {
    fn from(pair: Endpoints) -> Self {
        Self::Range(pair)
    }
}

impl From<DateRange> for Pick {
    fn from(range: DateRange) -> Self {
        Self::Range(range.into())
    }
}

/// Outcome of feeding one pick through the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Proposed endpoints, not yet ordered
    pub candidate: Endpoints,
    pub next_step: SelectionStep,
    /// Whether observers should hear about the candidate
    pub emit:      bool,
}

/// Computes the next candidate range and step.
pub fn transition(
    step: SelectionStep,
    force_edit: Option<Endpoint>,
    pick: Pick,
    current: Endpoints,
) -> Transition {
    match (force_edit, pick) {
        (None, Pick::Range(pair)) => Transition {
            candidate: pair,
            next_step: SelectionStep::Begin,
            emit:      true,
        },
        (Some(endpoint), pick) => {
            // The forced endpoint overrides whatever step was stored
            let date = match pick {
                Pick::Date(date) => date,
                Pick::Range(pair) => pair.get(endpoint),
            };
            let next_step = match endpoint {
                Endpoint::Start => SelectionStep::Complete,
                Endpoint::End => SelectionStep::Begin,
            };
            Transition {
                candidate: current.with(endpoint, date),
                next_step,
                emit: true,
            }
        },
        (None, Pick::Date(date)) => match step {
            SelectionStep::Begin => Transition {
                candidate: Endpoints::single(date),
                next_step: SelectionStep::Complete,
                emit:      true,
            },
            SelectionStep::Complete => Transition {
                candidate: Endpoints::new(current.start_date, date),
                next_step: SelectionStep::Begin,
                emit:      true,
            },
        },
    }
}

/// Holds the step between picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionStateMachine {
    step:       SelectionStep,
    force_edit: Option<Endpoint>,
}

impl SelectionStateMachine {
    pub const fn new(force_edit: Option<Endpoint>) -> Self {
        Self {
            step: SelectionStep::Begin,
            force_edit,
        }
    }

    pub const fn step(&self) -> SelectionStep {
        self.step
    }

    pub const fn force_edit(&self) -> Option<Endpoint> {
        self.force_edit
    }

    /// Back to the first click of the cycle, keeping the forced endpoint.
    pub const fn restart(&mut self) {
        self.step = SelectionStep::Begin;
    }

    /// Applies a pick against the current range, returning the unordered candidate
    /// and whether it should be published.
    pub fn handle_pick(&mut self, pick: Pick, current: DateRange) -> (Endpoints, bool) {
        let outcome = transition(self.step, self.force_edit, pick, current.into());
        tracing::debug!(
            from = ?self.step,
            to = ?outcome.next_step,
            force_edit = ?self.force_edit,
            candidate = %outcome.candidate,
            "selection transition"
        );
        self.step = outcome.next_step;
        (outcome.candidate, outcome.emit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, range};

    #[test]
    fn test_begin_collapses_to_single_day() {
        let current = Endpoints::new(date(2024, 1, 1), date(2024, 1, 31));
        let t = transition(SelectionStep::Begin, None, Pick::Date(date(2024, 3, 5)), current);
        assert_eq!(t.candidate, Endpoints::single(date(2024, 3, 5)));
        assert_eq!(t.next_step, SelectionStep::Complete);
        assert!(t.emit);
    }

    #[test]
    fn test_complete_keeps_start_and_sets_end() {
        let current = Endpoints::single(date(2024, 3, 5));
        let t = transition(SelectionStep::Complete, None, Pick::Date(date(2024, 3, 9)), current);
        assert_eq!(t.candidate, Endpoints::new(date(2024, 3, 5), date(2024, 3, 9)));
        assert_eq!(t.next_step, SelectionStep::Begin);
        assert!(t.emit);
    }

    #[test]
    fn test_complete_leaves_reversed_candidate_unordered() {
        let current = Endpoints::single(date(2024, 3, 5));
        let t = transition(SelectionStep::Complete, None, Pick::Date(date(2024, 3, 1)), current);
        assert_eq!(t.candidate.start_date, date(2024, 3, 5));
        assert_eq!(t.candidate.end_date, date(2024, 3, 1));
    }

    #[test]
    fn test_range_pick_bypasses_cycle() {
        let pair = Endpoints::new(date(2024, 5, 1), date(2024, 5, 7));
        let current = Endpoints::single(date(2024, 1, 1));
        for step in [SelectionStep::Begin, SelectionStep::Complete] {
            let t = transition(step, None, Pick::Range(pair), current);
            assert_eq!(t.candidate, pair);
            assert_eq!(t.next_step, SelectionStep::Begin);
            assert!(t.emit);
        }
    }

    #[test]
    fn test_force_start_ignores_step() {
        let current = Endpoints::new(date(2024, 1, 1), date(2024, 1, 31));
        for step in [SelectionStep::Begin, SelectionStep::Complete] {
            let t = transition(step, Some(Endpoint::Start), Pick::Date(date(2024, 1, 10)), current);
            assert_eq!(t.candidate, Endpoints::new(date(2024, 1, 10), date(2024, 1, 31)));
            assert_eq!(t.next_step, SelectionStep::Complete);
        }
    }

    #[test]
    fn test_force_end_ignores_step() {
        let current = Endpoints::new(date(2024, 1, 1), date(2024, 1, 31));
        for step in [SelectionStep::Begin, SelectionStep::Complete] {
            let t = transition(step, Some(Endpoint::End), Pick::Date(date(2024, 1, 10)), current);
            assert_eq!(t.candidate, Endpoints::new(date(2024, 1, 1), date(2024, 1, 10)));
            assert_eq!(t.next_step, SelectionStep::Begin);
        }
    }

    #[test]
    fn test_force_edit_takes_matching_endpoint_of_pair() {
        let current = Endpoints::new(date(2024, 1, 1), date(2024, 1, 31));
        let pair = Endpoints::new(date(2024, 2, 1), date(2024, 2, 29));

        let t = transition(SelectionStep::Begin, Some(Endpoint::Start), Pick::Range(pair), current);
        assert_eq!(t.candidate, Endpoints::new(date(2024, 2, 1), date(2024, 1, 31)));

        let t = transition(SelectionStep::Begin, Some(Endpoint::End), Pick::Range(pair), current);
        assert_eq!(t.candidate, Endpoints::new(date(2024, 1, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_machine_runs_two_click_cycle() {
        let mut machine = SelectionStateMachine::default();
        assert_eq!(machine.step(), SelectionStep::Begin);

        let (candidate, emit) = machine.handle_pick(date(2024, 4, 10).into(), range(date(2024, 1, 1), date(2024, 1, 2)));
        assert!(emit);
        assert_eq!(candidate, Endpoints::single(date(2024, 4, 10)));
        assert_eq!(machine.step(), SelectionStep::Complete);

        let (candidate, _) = machine.handle_pick(date(2024, 4, 12).into(), candidate.normalize());
        assert_eq!(candidate, Endpoints::new(date(2024, 4, 10), date(2024, 4, 12)));
        assert_eq!(machine.step(), SelectionStep::Begin);
    }

    #[test]
    fn test_machine_range_pick_resets_step() {
        let mut machine = SelectionStateMachine::new(None);
        let current = DateRange::single(date(2024, 1, 1));
        machine.handle_pick(date(2024, 1, 5).into(), current);
        assert_eq!(machine.step(), SelectionStep::Complete);

        let preset = range(date(2024, 2, 1), date(2024, 2, 7));
        let (candidate, _) = machine.handle_pick(preset.into(), current);
        assert_eq!(candidate, Endpoints::from(preset));
        assert_eq!(machine.step(), SelectionStep::Begin);
    }

    #[test]
    fn test_machine_restart() {
        let mut machine = SelectionStateMachine::new(Some(Endpoint::Start));
        machine.handle_pick(date(2024, 1, 5).into(), DateRange::single(date(2024, 1, 1)));
        assert_eq!(machine.step(), SelectionStep::Complete);

        machine.restart();
        assert_eq!(machine.step(), SelectionStep::Begin);
        assert_eq!(machine.force_edit(), Some(Endpoint::Start));
    }

    #[test]
    fn test_machine_keeps_force_edit() {
        let machine = SelectionStateMachine::new(Some(Endpoint::End));
        assert_eq!(machine.force_edit(), Some(Endpoint::End));
    }
}
