use crate::Stage;

/// Output-format instruction shared by both stages. The extractor relies on
/// every prompt ending with exactly this text.
pub const JSON_OUTPUT_CONTRACT: &str = r#"OUTPUT:
Devi restituire SOLO un array JSON valido. Non aggiungere testo prima o dopo.
Il formato JSON deve essere:
[
  {
    "keyword": "parola chiave",
    "metric": "etichetta breve della metrica",
    "details": "spiegazione sintetica"
  }
]"#;

/// Build the model instruction for `stage` about the already-normalized `url`.
pub fn build_prompt(stage: Stage, url: &str) -> String {
    let body = match stage {
        Stage::CurrentTraffic => current_traffic_instructions(url),
        Stage::PotentialGap => potential_gap_instructions(url),
    };
    format!("{body}\n\n{JSON_OUTPUT_CONTRACT}")
}

fn current_traffic_instructions(url: &str) -> String {
    format!(
        r#"Sei un analista SEO tecnico esperto. Il tuo compito è analizzare il dominio: {url}.

ISTRUZIONI CRITICHE DI "GROUNDING" (VERIFICA DEL CONTESTO):
1. Prima di estrarre qualsiasi keyword, usa Google Search per determinare INEQUIVOCABILMENTE il settore di attività di questa azienda specifica.
2. Cerca attivamente la pagina "Chi siamo" o la "Home" per leggere la mission aziendale (es. se si occupano di GRC, E-commerce, Edilizia, Energia, ecc.).
3. ATTENZIONE: Evita assolutamente di confondere questa azienda con altre che hanno nomi simili ma operano in settori diversi. Basati ESCLUSIVAMENTE sui servizi reali trovati sul sito.

TASK:
Una volta identificato con certezza il settore, stima le 20 keyword principali che portano traffico organico qualificato a questo sito.
Per ogni keyword:
- "metric": Traffico Stimato (Alto/Medio/Basso)
- "details": motivo della rilevanza (es. 'Servizio core identificato in home', 'Blog post su normativa X')"#
    )
}

fn potential_gap_instructions(url: &str) -> String {
    format!(
        r#"Agisci come un Senior SEO Strategist specializzato in analisi dei competitor.
Sito in analisi: {url}.

FASE 1: IDENTIFICAZIONE SETTORE E COMPETITOR
Usa Google Search per:
1. Confermare il settore esatto (es. Governance Risk & Compliance, Cybersecurity, Retail, ecc.).
2. Identificare 2-3 competitor diretti REALI e autorevoli per questo specifico settore.

FASE 2: GAP ANALYSIS
Identifica 20 "Keywords ad Alto Potenziale" che i competitor stanno usando o che sono trend emergenti nel settore specifico, ma che questo sito non sta ancora coprendo adeguatamente.

CRITERI:
- Se il sito è B2B, privilegia keyword transazionali o informative professionali (es. "software gestione rischi", "consulenza iso 27001").
- Evita keyword troppo generiche o consumer se l'azienda è B2B.
- Le keyword devono essere opportunità concrete di business.
Per ogni keyword:
- "metric": Potenziale (Alto/Molto Alto)
- "details": strategia (es. 'Usata dal competitor X', 'Gap normativo', 'Domanda crescente nel settore')"#
    )
}
