use scout_core::{AnalysisState, AppViewModel, KeywordRecord, KeywordSection};
use scout_engine::EXPORT_HEADERS;

const DETAILS_MAX_CHARS: usize = 80;

/// Full terminal rendering of the view: status, error, then each visible section.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![status_line(view)];

    if let Some(progress) = view.progress {
        lines.push(progress.to_string());
    }
    if let Some(error) = &view.error {
        lines.push(format!("Errore: {error}"));
    }
    for section in view.sections() {
        lines.push(String::new());
        lines.extend(render_section(section));
    }
    lines
}

pub fn status_line(view: &AppViewModel) -> String {
    let state_label = match view.state {
        AnalysisState::Idle => "In attesa",
        AnalysisState::AnalyzingCurrent | AnalysisState::AnalyzingPotential => "Analisi in corso",
        AnalysisState::Complete => "Completata",
        AnalysisState::Error => "Errore",
    };
    match &view.url {
        Some(url) => format!("[{state_label}] {url}"),
        None => format!("[{state_label}]"),
    }
}

fn render_section(section: &KeywordSection) -> Vec<String> {
    let mut lines = vec![
        format!("== {} ({}) ==", section.title, section.records.len()),
        section.description.to_string(),
    ];

    let rows: Vec<[String; 4]> = section
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| row(index + 1, record))
        .collect();
    let header = [
        "#".to_string(),
        EXPORT_HEADERS[0].to_string(),
        EXPORT_HEADERS[1].to_string(),
        EXPORT_HEADERS[2].to_string(),
    ];

    let mut widths = [0usize; 4];
    for cells in std::iter::once(&header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    lines.push(format_row(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|cells| format_row(cells, &widths)));
    lines
}

fn row(position: usize, record: &KeywordRecord) -> [String; 4] {
    [
        position.to_string(),
        record.keyword().to_string(),
        record.metric().to_string(),
        truncate(record.details(), DETAILS_MAX_CHARS),
    ]
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join(" | ").trim_end().to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
