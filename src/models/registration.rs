//! Registration model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::PortalError;

/// First entry of the role selector; selecting it counts as no selection
pub const ROLE_PLACEHOLDER: &str = "Selecione seu cargo/função";

/// Roles offered by the registration form, placeholder excluded
pub const ROLE_OPTIONS: &[&str] = &[
    "Professor(a)",
    "Coordenador(a) Pedagógico(a)",
    "Diretor(a)",
    "Vice-Diretor(a)",
    "Supervisor(a)",
    "Técnico(a) Educacional",
    "Agente Administrativo",
    "Outro",
];

/// Which event day(s) an attendee registers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipationDay {
    #[serde(rename = "dia1")]
    Day1,
    #[serde(rename = "dia2")]
    Day2,
    #[serde(rename = "ambos")]
    Both,
}

impl ParticipationDay {
    pub const ALL: [ParticipationDay; 3] = [
        ParticipationDay::Day1,
        ParticipationDay::Day2,
        ParticipationDay::Both,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationDay::Day1 => "dia1",
            ParticipationDay::Day2 => "dia2",
            ParticipationDay::Both => "ambos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParticipationDay::Day1 => "1º Dia",
            ParticipationDay::Day2 => "2º Dia",
            ParticipationDay::Both => "Ambos",
        }
    }

    /// Audience of the day
    pub fn audience(&self) -> &'static str {
        match self {
            ParticipationDay::Day1 => "Gestores, Coordenadores e Equipe Técnica da SEMED",
            ParticipationDay::Day2 => "Professores, Gestores, Coordenadores e Equipe da SEMED",
            ParticipationDay::Both => "Todos os dias",
        }
    }
}

impl fmt::Display for ParticipationDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipationDay {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dia1" | "1" => Ok(ParticipationDay::Day1),
            "dia2" | "2" => Ok(ParticipationDay::Day2),
            "ambos" | "both" => Ok(ParticipationDay::Both),
            other => Err(PortalError::Validation(format!("Dia de participação inválido: {}", other))),
        }
    }
}

/// Body of `POST /inscricoes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "dia_participacao")]
    pub participation_day: ParticipationDay,
}

/// A registration as listed to organizers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "presente", deserialize_with = "super::deserialize_flag")]
    pub present: bool,
    #[serde(rename = "dia_participacao", default)]
    pub participation_day: Option<ParticipationDay>,
    #[serde(rename = "data_inscricao", default)]
    pub registered_at: Option<String>,
}

/// Response of `PATCH /inscricoes/:id/presenca`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceUpdate {
    #[serde(rename = "presente", deserialize_with = "super::deserialize_flag")]
    pub present: bool,
}

/// Capacity counters for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayVacancy {
    pub total: i64,
    pub max: i64,
    #[serde(rename = "disponivel")]
    pub available: i64,
}

/// Response of `GET /inscricoes/vagas`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancies {
    #[serde(rename = "dia1")]
    pub day1: DayVacancy,
    #[serde(rename = "dia2")]
    pub day2: DayVacancy,
}

impl Vacancies {
    /// Remaining places for a day option; "both" is bounded by the fuller day
    pub fn remaining(&self, day: ParticipationDay) -> i64 {
        match day {
            ParticipationDay::Day1 => self.day1.available,
            ParticipationDay::Day2 => self.day2.available,
            ParticipationDay::Both => self.day1.available.min(self.day2.available),
        }
    }

    pub fn is_exhausted(&self, day: ParticipationDay) -> bool {
        self.remaining(day) <= 0
    }
}

/// `N vaga restante` / `N vagas restantes`
pub fn remaining_label(remaining: i64) -> String {
    if remaining == 1 {
        format!("{} vaga restante", remaining)
    } else {
        format!("{} vagas restantes", remaining)
    }
}
