//! Guided "pick a branch, then pick what to do" flow shown in the location
//! modal.
//!
//! ```text
//! ChooseBranch --select_branch--> ChooseAction --select_action(map|contact)--> detail view
//!      ^                              |   ^                                        |
//!      +------------back--------------+   +-------------------back-----------------+
//!
//! ChooseAction --select_action(offers)--> hand-off to the offers page (modal closes)
//! ```
//!
//! Closing the modal drops the state; reopening starts from scratch.

use crate::catalog::CatalogProvider;
use crate::models::{Branch, Locale};
use crate::query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChooseBranch,
    ChooseAction,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::ChooseBranch => 1,
            WizardStep::ChooseAction => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Map,
    Contact,
    Offers,
}

impl WizardAction {
    pub const ALL: [WizardAction; 3] = [
        WizardAction::Map,
        WizardAction::Contact,
        WizardAction::Offers,
    ];
}

/// Detail views rendered inside the modal in place of the action chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView {
    Map,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("{0:?} is not available on this step")]
    WrongStep(&'static str),
    #[error("branch {branch} is not part of location {location}")]
    ForeignBranch { branch: String, location: String },
    #[error("selection no longer resolves in the catalog")]
    Unresolved,
}

/// Display names handed to the offers page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffersHandoff {
    pub location_name: String,
    pub branch_name: String,
}

impl OffersHandoff {
    /// Encoded `location=…&branch=…` without the leading `?`.
    pub fn query(&self) -> String {
        let pairs = [
            ("location".to_string(), self.location_name.clone()),
            ("branch".to_string(), self.branch_name.clone()),
        ];
        query::encode_query(&pairs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The modal stays open and renders the new state.
    Stay,
    /// The modal closes and the page navigates to the offers listing.
    HandOff(OffersHandoff),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    Back,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    location_id: String,
    step: WizardStep,
    branch: Option<String>,
    view: Option<DetailView>,
}

impl WizardState {
    pub fn open(location_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            step: WizardStep::ChooseBranch,
            branch: None,
            view: None,
        }
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        self.view
    }

    pub fn is_initial(&self) -> bool {
        self.step == WizardStep::ChooseBranch && self.view.is_none()
    }

    /// Branches offered on step 1. Empty when the location is unknown.
    pub fn branches<'c, C: CatalogProvider + ?Sized>(&self, catalog: &'c C) -> Vec<&'c Branch> {
        catalog.branches_for(&self.location_id)
    }

    pub fn selected_branch<'c, C: CatalogProvider + ?Sized>(
        &self,
        catalog: &'c C,
    ) -> Option<&'c Branch> {
        self.branch.as_deref().and_then(|id| catalog.branch(id))
    }

    pub fn step_status(&self, step: WizardStep) -> StepStatus {
        let (n, current) = (step.number(), self.step.number());
        if n < current {
            StepStatus::Done
        } else if n == current {
            StepStatus::Current
        } else {
            StepStatus::Upcoming
        }
    }

    pub fn select_branch(&mut self, branch: &Branch) -> Result<(), WizardError> {
        if self.step != WizardStep::ChooseBranch {
            return Err(WizardError::WrongStep("select_branch"));
        }
        if branch.location_id != self.location_id {
            return Err(WizardError::ForeignBranch {
                branch: branch.id.clone(),
                location: self.location_id.clone(),
            });
        }
        self.branch = Some(branch.id.clone());
        self.step = WizardStep::ChooseAction;
        Ok(())
    }

    /// Apply an action chosen on step 2. `Offers` leaves the state untouched
    /// and returns the hand-off; the caller closes the modal.
    pub fn select_action<C: CatalogProvider + ?Sized>(
        &mut self,
        action: WizardAction,
        catalog: &C,
        locale: Locale,
    ) -> Result<WizardOutcome, WizardError> {
        if self.step != WizardStep::ChooseAction {
            return Err(WizardError::WrongStep("select_action"));
        }
        match action {
            WizardAction::Map => {
                self.view = Some(DetailView::Map);
                Ok(WizardOutcome::Stay)
            }
            WizardAction::Contact => {
                self.view = Some(DetailView::Contact);
                Ok(WizardOutcome::Stay)
            }
            WizardAction::Offers => {
                let location = catalog
                    .location(&self.location_id)
                    .ok_or(WizardError::Unresolved)?;
                let branch = self
                    .selected_branch(catalog)
                    .ok_or(WizardError::Unresolved)?;
                Ok(WizardOutcome::HandOff(OffersHandoff {
                    location_name: location.name.get(locale).to_string(),
                    branch_name: branch.name.get(locale).to_string(),
                }))
            }
        }
    }

    pub fn back(&mut self) {
        if self.view.is_some() {
            self.view = None;
        } else if self.step == WizardStep::ChooseAction {
            self.step = WizardStep::ChooseBranch;
            self.branch = None;
        }
    }

    /// Escape steps back when possible and closes only from the initial state.
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.is_initial() {
            EscapeOutcome::Close
        } else {
            self.back();
            EscapeOutcome::Back
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::catalog;

    #[test]
    fn test_open_starts_at_branch_step() {
        let state = WizardState::open("kuwait");
        assert_eq!(state.step(), WizardStep::ChooseBranch);
        assert!(state.branch_id().is_none());
        assert!(state.detail_view().is_none());
        assert!(state.is_initial());
    }

    #[test]
    fn test_branches_are_filtered_by_location() {
        let catalog = catalog();
        let state = WizardState::open("kuwait");
        let ids: Vec<&str> = state.branches(&catalog).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["kuwait-city-salmiya", "kuwait-city-jahra"]);
    }

    #[test]
    fn test_unknown_location_opens_with_empty_list() {
        let catalog = catalog();
        let state = WizardState::open("atlantis");
        assert!(state.branches(&catalog).is_empty());
        assert!(state.is_initial());
    }

    #[test]
    fn test_select_branch_advances() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        state
            .select_branch(catalog.branch("kuwait-city-salmiya").unwrap())
            .unwrap();
        assert_eq!(state.step(), WizardStep::ChooseAction);
        assert_eq!(state.branch_id(), Some("kuwait-city-salmiya"));
        assert!(state.detail_view().is_none());
    }

    #[test]
    fn test_select_branch_only_on_step_one() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        state
            .select_branch(catalog.branch("kuwait-city-salmiya").unwrap())
            .unwrap();
        let err = state
            .select_branch(catalog.branch("kuwait-city-jahra").unwrap())
            .unwrap_err();
        assert_eq!(err, WizardError::WrongStep("select_branch"));
        assert_eq!(state.branch_id(), Some("kuwait-city-salmiya"));
    }

    #[test]
    fn test_select_branch_rejects_foreign_branch() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        let err = state
            .select_branch(catalog.branch("riyadh-olaya").unwrap())
            .unwrap_err();
        assert!(matches!(err, WizardError::ForeignBranch { .. }));
        assert!(state.is_initial());
    }

    #[test]
    fn test_select_action_on_step_one_changes_nothing() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        let before = state.clone();
        let err = state
            .select_action(WizardAction::Map, &catalog, Locale::En)
            .unwrap_err();
        assert_eq!(err, WizardError::WrongStep("select_action"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_map_and_contact_open_detail_views() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        state
            .select_branch(catalog.branch("kuwait-city-salmiya").unwrap())
            .unwrap();

        let outcome = state
            .select_action(WizardAction::Contact, &catalog, Locale::En)
            .unwrap();
        assert_eq!(outcome, WizardOutcome::Stay);
        assert_eq!(state.detail_view(), Some(DetailView::Contact));
        assert_eq!(state.step(), WizardStep::ChooseAction);

        state.back();
        state
            .select_action(WizardAction::Map, &catalog, Locale::En)
            .unwrap();
        assert_eq!(state.detail_view(), Some(DetailView::Map));
    }

    #[test]
    fn test_back_unwinds_one_level_at_a_time() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        state
            .select_branch(catalog.branch("kuwait-city-salmiya").unwrap())
            .unwrap();
        state
            .select_action(WizardAction::Map, &catalog, Locale::En)
            .unwrap();

        state.back();
        assert_eq!(state.step(), WizardStep::ChooseAction);
        assert!(state.detail_view().is_none());
        assert_eq!(state.branch_id(), Some("kuwait-city-salmiya"));

        state.back();
        assert!(state.is_initial());
        assert!(state.branch_id().is_none());

        state.back();
        assert!(state.is_initial());
    }

    #[test]
    fn test_escape_from_map_view_goes_back() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        state
            .select_branch(catalog.branch("kuwait-city-salmiya").unwrap())
            .unwrap();
        state
            .select_action(WizardAction::Map, &catalog, Locale::En)
            .unwrap();

        assert_eq!(state.escape(), EscapeOutcome::Back);
        assert_eq!(state.step(), WizardStep::ChooseAction);
        assert!(state.detail_view().is_none());

        assert_eq!(state.escape(), EscapeOutcome::Back);
        assert!(state.is_initial());

        assert_eq!(state.escape(), EscapeOutcome::Close);
    }

    #[test]
    fn test_offers_hands_off_localized_names() {
        let catalog = catalog();
        let mut state = WizardState::open("saudi-arabia");
        state
            .select_branch(catalog.branch("riyadh-olaya").unwrap())
            .unwrap();

        let outcome = state
            .select_action(WizardAction::Offers, &catalog, Locale::En)
            .unwrap();
        let WizardOutcome::HandOff(handoff) = outcome else {
            panic!("expected hand-off");
        };
        assert_eq!(handoff.location_name, "Saudi Arabia");
        assert_eq!(handoff.branch_name, "Riyadh - Olaya");
        assert_eq!(
            handoff.query(),
            "location=Saudi%20Arabia&branch=Riyadh%20-%20Olaya"
        );
    }

    #[test]
    fn test_offers_hand_off_in_arabic_round_trips() {
        let catalog = catalog();
        let mut state = WizardState::open("saudi-arabia");
        state
            .select_branch(catalog.branch("riyadh-olaya").unwrap())
            .unwrap();
        let WizardOutcome::HandOff(handoff) = state
            .select_action(WizardAction::Offers, &catalog, Locale::Ar)
            .unwrap()
        else {
            panic!("expected hand-off");
        };

        let pairs = query::parse_query(&handoff.query());
        assert_eq!(
            query::get_param(&pairs, "location"),
            Some("المملكة العربية السعودية")
        );
        assert_eq!(query::get_param(&pairs, "branch"), Some("الرياض - العليا"));
    }

    #[test]
    fn test_step_status() {
        let catalog = catalog();
        let mut state = WizardState::open("kuwait");
        assert_eq!(state.step_status(WizardStep::ChooseBranch), StepStatus::Current);
        assert_eq!(state.step_status(WizardStep::ChooseAction), StepStatus::Upcoming);

        state
            .select_branch(catalog.branch("kuwait-city-jahra").unwrap())
            .unwrap();
        assert_eq!(state.step_status(WizardStep::ChooseBranch), StepStatus::Done);
        assert_eq!(state.step_status(WizardStep::ChooseAction), StepStatus::Current);
    }
}
