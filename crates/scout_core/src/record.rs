use serde::Serialize;

/// One ranked keyword row returned by the model for a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordRecord {
    keyword: String,
    metric: String,
    details: String,
}

impl KeywordRecord {
    pub fn new(
        keyword: impl Into<String>,
        metric: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            metric: metric.into(),
            details: details.into(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Short qualitative label, e.g. "Alto" or "Molto Alto".
    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

/// The two analysis passes of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CurrentTraffic,
    PotentialGap,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::CurrentTraffic, Stage::PotentialGap];

    pub fn label(self) -> &'static str {
        match self {
            Stage::CurrentTraffic => "current-traffic",
            Stage::PotentialGap => "potential-gap",
        }
    }

    /// Prefix used for exported file names.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Stage::CurrentTraffic => "current_traffic",
            Stage::PotentialGap => "potential_opportunities",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::CurrentTraffic => "Top Keywords Attuali",
            Stage::PotentialGap => "Opportunità ad Alto Potenziale",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::CurrentTraffic => {
                "Le 20 parole chiave che stimiamo stiano portando il maggior volume di traffico \
                 organico al sito, basate sui risultati di ricerca attuali."
            }
            Stage::PotentialGap => {
                "Keywords strategiche utilizzate dai competitor o rilevanti per il settore che \
                 questo sito non sta ancora intercettando efficacemente."
            }
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
