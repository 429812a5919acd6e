//! Participants panel: registrations, check-in and CSV export

use std::str::FromStr;
use crate::models::Participant;
use crate::services::ApiClient;
use crate::services::api::{DELETE_FALLBACK, EXPORT_FALLBACK, LOAD_FALLBACK, SAVE_FALLBACK};
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers::contains_ignore_case;
use crate::utils::logging::log_admin_action;
use super::{Feedback, PanelState};

/// Default file name for the registrations export
pub const EXPORT_FILE_NAME: &str = "participantes_jornada_2026.csv";

/// Mutation results applied to the local participant list
#[derive(Debug, Clone)]
pub enum ParticipantAction {
    Loaded(Vec<Participant>),
    PresenceToggled { id: i64, present: bool },
    Removed(i64),
}

/// Reconcile the local list with a server response
pub fn reduce(participants: &mut Vec<Participant>, action: ParticipantAction) {
    match action {
        ParticipantAction::Loaded(list) => *participants = list,
        ParticipantAction::PresenceToggled { id, present } => {
            if let Some(p) = participants.iter_mut().find(|p| p.id == id) {
                p.present = present;
            }
        }
        ParticipantAction::Removed(id) => participants.retain(|p| p.id != id),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticipantFilter {
    #[default]
    All,
    Present,
    Absent,
}

impl ParticipantFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantFilter::All => "todos",
            ParticipantFilter::Present => "presentes",
            ParticipantFilter::Absent => "ausentes",
        }
    }

    fn accepts(&self, participant: &Participant) -> bool {
        match self {
            ParticipantFilter::All => true,
            ParticipantFilter::Present => participant.present,
            ParticipantFilter::Absent => !participant.present,
        }
    }
}

impl FromStr for ParticipantFilter {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "todos" | "all" => Ok(ParticipantFilter::All),
            "presentes" | "present" => Ok(ParticipantFilter::Present),
            "ausentes" | "absent" => Ok(ParticipantFilter::Absent),
            other => Err(PortalError::Validation(format!("Filtro inválido: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticipantTotals {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
}

#[derive(Debug)]
pub struct ParticipantsPanel {
    participants: Vec<Participant>,
    state: PanelState,
    filter: ParticipantFilter,
    search: String,
    feedback: Option<Feedback>,
}

impl ParticipantsPanel {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            state: PanelState::Loading,
            filter: ParticipantFilter::All,
            search: String::new(),
            feedback: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn filter(&self) -> ParticipantFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ParticipantFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.trim().to_string();
    }

    /// Reset tab and search term
    pub fn clear_filters(&mut self) {
        self.filter = ParticipantFilter::All;
        self.search.clear();
    }

    pub fn apply(&mut self, action: ParticipantAction) {
        reduce(&mut self.participants, action);
        self.state = PanelState::from_len(self.participants.len());
    }

    /// Participants matching the current tab and search term.
    /// Name, e-mail and institution match case-insensitively; CPF by substring.
    pub fn visible(&self) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| self.filter.accepts(p))
            .filter(|p| self.matches_search(p))
            .collect()
    }

    pub fn totals(&self) -> ParticipantTotals {
        let present = self.participants.iter().filter(|p| p.present).count();
        ParticipantTotals {
            total: self.participants.len(),
            present,
            absent: self.participants.len() - present,
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.state = PanelState::Loading;
        match api.fetch_participants().await {
            Ok(list) => self.apply(ParticipantAction::Loaded(list)),
            Err(e) => self.state = PanelState::failed(&e, LOAD_FALLBACK),
        }
    }

    /// Flip check-in for one participant and return the new flag
    pub async fn toggle_presence(&mut self, api: &ApiClient, id: i64) -> Result<bool> {
        self.feedback = None;
        match api.toggle_presence(id).await {
            Ok(update) => {
                log_admin_action("toggle_presence", Some(&id.to_string()), Some(&update.present.to_string()));
                self.apply(ParticipantAction::PresenceToggled { id, present: update.present });
                Ok(update.present)
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(SAVE_FALLBACK)));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<()> {
        self.feedback = None;
        match api.delete_registration(id).await {
            Ok(()) => {
                log_admin_action("delete_registration", Some(&id.to_string()), None);
                self.apply(ParticipantAction::Removed(id));
                Ok(())
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(DELETE_FALLBACK)));
                Err(e)
            }
        }
    }

    /// Download the registrations CSV
    pub async fn export(&mut self, api: &ApiClient) -> Result<String> {
        api.export_registrations_csv().await.inspect_err(|e| {
            self.feedback = Some(Feedback::Error(e.user_message(EXPORT_FALLBACK)));
        })
    }

    fn matches_search(&self, participant: &Participant) -> bool {
        let term = self.search.as_str();
        term.is_empty()
            || contains_ignore_case(&participant.name, term)
            || participant.cpf.contains(term)
            || contains_ignore_case(&participant.email, term)
            || contains_ignore_case(&participant.institution, term)
    }
}

impl Default for ParticipantsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Confirmation prompt shown before deleting a registration
pub fn delete_confirmation(name: &str) -> String {
    format!(
        "Tem certeza que deseja excluir a inscrição de \"{}\"? Esta ação não pode ser desfeita.",
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: i64, name: &str, institution: &str, present: bool) -> Participant {
        Participant {
            id,
            name: name.to_string(),
            cpf: format!("111.444.777-{:02}", id),
            email: format!("{}@escola.ma.gov.br", name.to_lowercase().replace(' ', ".")),
            phone: "(99) 99999-0000".to_string(),
            institution: institution.to_string(),
            role: "Professor(a)".to_string(),
            present,
            participation_day: None,
            registered_at: None,
        }
    }

    fn loaded_panel() -> ParticipantsPanel {
        let mut panel = ParticipantsPanel::new();
        panel.apply(ParticipantAction::Loaded(vec![
            participant(1, "Ana Souza", "Escola Municipal Centro", true),
            participant(2, "Bruno Lima", "UE Povoado Sul", false),
            participant(3, "Carla Dias", "Escola Municipal Norte", false),
        ]));
        panel
    }

    #[test]
    fn test_starts_loading_and_empty_list_is_empty_state() {
        let mut panel = ParticipantsPanel::new();
        assert!(panel.state().is_loading());

        panel.apply(ParticipantAction::Loaded(vec![]));
        assert_eq!(panel.state(), &PanelState::Empty);
    }

    #[test]
    fn test_reducer_patches_presence_and_removes() {
        let mut panel = loaded_panel();

        panel.apply(ParticipantAction::PresenceToggled { id: 2, present: true });
        assert!(panel.participants().iter().find(|p| p.id == 2).unwrap().present);

        panel.apply(ParticipantAction::Removed(1));
        assert_eq!(panel.participants().len(), 2);
        assert!(panel.participants().iter().all(|p| p.id != 1));

        panel.apply(ParticipantAction::PresenceToggled { id: 42, present: true });
        assert_eq!(panel.participants().len(), 2);
    }

    #[test]
    fn test_removing_last_participant_empties_panel() {
        let mut panel = ParticipantsPanel::new();
        panel.apply(ParticipantAction::Loaded(vec![participant(7, "Davi Alves", "UE Sul", false)]));
        panel.apply(ParticipantAction::Removed(7));
        assert_eq!(panel.state(), &PanelState::Empty);
    }

    #[test]
    fn test_filter_tabs_and_totals() {
        let mut panel = loaded_panel();
        assert_eq!(panel.totals(), ParticipantTotals { total: 3, present: 1, absent: 2 });

        panel.set_filter(ParticipantFilter::Present);
        assert_eq!(panel.visible().len(), 1);

        panel.set_filter(ParticipantFilter::Absent);
        assert_eq!(panel.visible().len(), 2);
    }

    #[test]
    fn test_search_over_name_institution_and_cpf() {
        let mut panel = loaded_panel();

        panel.set_search("municipal");
        assert_eq!(panel.visible().len(), 2);

        panel.set_search("BRUNO");
        assert_eq!(panel.visible()[0].id, 2);

        panel.set_search("777-03");
        assert_eq!(panel.visible()[0].id, 3);

        panel.set_filter(ParticipantFilter::Present);
        panel.set_search("norte");
        assert!(panel.visible().is_empty());

        panel.clear_filters();
        assert_eq!(panel.visible().len(), 3);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("presentes".parse::<ParticipantFilter>().unwrap(), ParticipantFilter::Present);
        assert_eq!("all".parse::<ParticipantFilter>().unwrap(), ParticipantFilter::All);
        assert!("outros".parse::<ParticipantFilter>().is_err());
    }

    #[test]
    fn test_delete_confirmation_names_participant() {
        assert!(delete_confirmation("Ana Souza").contains("\"Ana Souza\""));
    }
}
