//! Header search-box collapse choreography.
//!
//! The web front end wraps the search input in a collapse animation and
//! steers it indirectly through the toggle button's collapse target. This
//! module keeps that state explicit instead of reading it back out of DOM
//! attributes: the target is disarmed once the box has fully expanded so a
//! stray click cannot close it mid-typing, and an empty submit re-arms the
//! target and drives the box closed without navigating.

/// Observable collapse phase of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapseState {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
}

/// Whether the toggle button currently carries its collapse target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleTarget {
    #[default]
    Armed,
    Disarmed,
}

/// Transition-completion events reported by the collapse animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Expansion has started; the box is not yet fully visible.
    ShowStarted,
    /// Expansion finished.
    Shown,
    /// Collapse finished.
    Hidden,
}

/// Side effects the host must carry out after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ClearQuery,
    DisarmToggle,
    RearmToggle,
    Collapse,
}

/// Outcome of a primary-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Navigation proceeds.
    Allow,
    /// Submission is suppressed; run the effects instead.
    Suppress(Vec<Effect>),
}

/// State machine for the collapsible header search box.
#[derive(Debug, Default)]
pub struct SearchCollapse {
    state: CollapseState,
    target: ToggleTarget,
}

impl SearchCollapse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CollapseState {
        self.state
    }

    pub fn toggle_target(&self) -> ToggleTarget {
        self.target
    }

    /// Applies a collapse transition and returns the effects to run.
    pub fn apply(&mut self, transition: Transition) -> Vec<Effect> {
        match transition {
            Transition::ShowStarted => {
                self.state = CollapseState::Expanding;
                // A query left over from back-navigation would fire a
                // search as soon as the box reopens.
                vec![Effect::ClearQuery]
            }
            Transition::Shown => {
                self.state = CollapseState::Expanded;
                self.target = ToggleTarget::Disarmed;
                vec![Effect::DisarmToggle]
            }
            Transition::Hidden => {
                self.state = CollapseState::Collapsed;
                Vec::new()
            }
        }
    }

    /// Decides a submit of the primary search form. An empty query re-arms
    /// the toggle target and collapses the box instead of navigating.
    pub fn submit(&mut self, query: &str) -> SubmitDecision {
        if !query.is_empty() {
            return SubmitDecision::Allow;
        }
        self.target = ToggleTarget::Armed;
        SubmitDecision::Suppress(vec![Effect::RearmToggle, Effect::Collapse])
    }

    /// Forces the box closed when the page is hidden so it is collapsed
    /// again when the user navigates back.
    pub fn page_hidden(&mut self) -> Vec<Effect> {
        self.target = ToggleTarget::Armed;
        vec![Effect::RearmToggle, Effect::Collapse]
    }
}

/// Submit guard for the secondary search form, which has no collapse
/// choreography: a non-empty query submits, an empty one is suppressed.
pub struct SubmitGuard;

impl SubmitGuard {
    pub fn allows(query: &str) -> bool {
        !query.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_clears_query_then_disarms_toggle() {
        let mut search = SearchCollapse::new();
        assert_eq!(search.apply(Transition::ShowStarted), vec![Effect::ClearQuery]);
        assert_eq!(search.state(), CollapseState::Expanding);

        assert_eq!(search.apply(Transition::Shown), vec![Effect::DisarmToggle]);
        assert_eq!(search.state(), CollapseState::Expanded);
        assert_eq!(search.toggle_target(), ToggleTarget::Disarmed);
    }

    #[test]
    fn non_empty_submit_allows_navigation() {
        let mut search = SearchCollapse::new();
        search.apply(Transition::ShowStarted);
        search.apply(Transition::Shown);
        assert_eq!(search.submit("earthquake"), SubmitDecision::Allow);
    }

    #[test]
    fn empty_submit_rearms_and_collapses() {
        let mut search = SearchCollapse::new();
        search.apply(Transition::ShowStarted);
        search.apply(Transition::Shown);

        let decision = search.submit("");
        assert_eq!(
            decision,
            SubmitDecision::Suppress(vec![Effect::RearmToggle, Effect::Collapse])
        );
        assert_eq!(search.toggle_target(), ToggleTarget::Armed);

        search.apply(Transition::Hidden);
        assert_eq!(search.state(), CollapseState::Collapsed);
    }

    #[test]
    fn page_hide_forces_collapse() {
        let mut search = SearchCollapse::new();
        search.apply(Transition::ShowStarted);
        search.apply(Transition::Shown);

        let effects = search.page_hidden();
        assert!(effects.contains(&Effect::RearmToggle));
        assert!(effects.contains(&Effect::Collapse));
        assert_eq!(search.toggle_target(), ToggleTarget::Armed);
    }

    #[test]
    fn secondary_form_guard_checks_query_only() {
        assert!(SubmitGuard::allows("AUCK"));
        assert!(!SubmitGuard::allows(""));
    }
}
