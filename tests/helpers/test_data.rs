//! Canned backend payloads

use serde_json::{json, Value};

/// A CPF that passes the checksum
pub const VALID_CPF: &str = "111.444.777-35";

pub fn participant_json(id: i64, name: &str, present: bool) -> Value {
    json!({
        "id": id,
        "nome": name,
        "cpf": format!("529.982.247-{:02}", id),
        "email": format!("participante{}@escola.ma.gov.br", id),
        "telefone": "(99) 98888-7777",
        "instituicao": "Escola Municipal Centro",
        "cargo": "Professor(a)",
        "presente": if present { 1 } else { 0 },
        "dia_participacao": "ambos",
        "data_inscricao": "2026-02-10 09:30:00"
    })
}

pub fn admin_json(id: i64, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "nome": name,
        "email": email,
        "created_at": "2026-01-15T12:00:00Z"
    })
}

pub fn certificate_stats_json(present: u64, generated: u64, sent: u64) -> Value {
    json!({
        "totalPresentes": present,
        "certificadosGerados": generated,
        "certificadosEnviados": sent,
        "pendentes": present - sent
    })
}

pub fn registration_stats_json() -> Value {
    json!({
        "totalInscritos": 3,
        "presentes": 2,
        "ausentes": 1,
        "certificadosEnviados": 0,
        "porInstituicao": [ { "name": "Escola Municipal Centro", "count": 3 } ],
        "recentes": [
            {
                "nome": "Ana Souza",
                "instituicao": "Escola Municipal Centro",
                "cargo": "Professor(a)",
                "data_inscricao": "2026-02-10 09:30:00"
            }
        ]
    })
}
